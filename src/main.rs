use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use folio::app::AppState;
use folio::async_tasks::{AsyncTaskRunner, TaskMessage};
use folio::cli::Cli;
use folio::config::ConfigManager;
use folio::constants::{
    FRAME_DURATION_MS, MIN_TERMINAL_HEIGHT, MIN_TERMINAL_WIDTH, RESIZE_DEBOUNCE_MS,
};
use folio::download::downloads_dir;
use folio::error::{AppError, Result};
use folio::page::Portfolio;
use folio::types::Config;
use folio::ui::{self, input_handler::InputHandler};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Validate CLI arguments
    cli.validate().map_err(AppError::Other)?;

    // Initialize logging if requested; the guard flushes on drop
    let _log_guard = match &cli.log_file {
        Some(log_file) => {
            let guard = init_logging(log_file)?;
            tracing::info!("=== folio starting ===");
            tracing::info!("Log file: {}", log_file);
            Some(guard)
        }
        None => None,
    };

    // Check terminal size
    let (width, height) = crossterm::terminal::size()?;
    if width < MIN_TERMINAL_WIDTH || height < MIN_TERMINAL_HEIGHT {
        tracing::error!(
            "Terminal too small: {}x{} (minimum: {}x{})",
            width,
            height,
            MIN_TERMINAL_WIDTH,
            MIN_TERMINAL_HEIGHT
        );
        return Err(AppError::TerminalTooSmall);
    }
    tracing::debug!("Terminal size: {}x{}", width, height);

    // Build the page before touching the terminal so content errors print plainly
    let app = initialize_app_state(&cli, width, height)?;

    setup_terminal()?;
    tracing::debug!("Terminal setup completed");

    // Setup Ctrl-C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        tracing::info!("Ctrl-C received, shutting down");
        r.store(false, Ordering::SeqCst);
    })
    .map_err(|e| AppError::Other(format!("Failed to set Ctrl-C handler: {}", e)))?;

    let result = run_app(app, running).await;

    cleanup_terminal()?;
    tracing::debug!("Terminal cleanup completed");

    result
}

fn setup_terminal() -> Result<()> {
    enable_raw_mode()?;
    execute!(
        io::stdout(),
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        Hide
    )?;

    // Set panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal();
        original_hook(panic_info);
    }));

    Ok(())
}

fn cleanup_terminal() -> Result<()> {
    execute!(
        io::stdout(),
        Show,
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    disable_raw_mode()?;
    Ok(())
}

fn init_logging(log_file: &str) -> Result<WorkerGuard> {
    use std::fs::OpenOptions;

    // Open/create log file, truncating if it exists
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_file)
        .map_err(|e| AppError::Other(format!("Failed to open log file: {}", e)))?;

    let (writer, guard) = tracing_appender::non_blocking(file);

    // Only our crate by default; RUST_LOG overrides
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("folio=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::Other(format!("Failed to initialize logging: {}", e)))?;

    Ok(guard)
}

fn initialize_app_state(cli: &Cli, width: u16, height: u16) -> Result<AppState> {
    tracing::debug!("Initializing application state");

    let config = match ConfigManager::new() {
        Ok(manager) => manager.load_config().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}. Using defaults.", e);
            Config::default()
        }),
        Err(e) => {
            tracing::warn!("Config directory unavailable: {}. Using defaults.", e);
            Config::default()
        }
    };
    let config = apply_cli_overrides(config, cli);
    tracing::debug!(
        "Config loaded: max_particles={}, splash={}, cv={:?}",
        config.smoke.max_particles,
        config.splash_enabled,
        config.cv_path
    );

    let portfolio = match &cli.content {
        Some(path) => {
            tracing::info!("Loading portfolio content: {}", path);
            Portfolio::load(Path::new(path))?
        }
        None => Portfolio::builtin()?,
    };

    Ok(AppState::new(config, portfolio, width, height))
}

/// CLI flags win over the config file and are never written back
fn apply_cli_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(max_particles) = cli.max_particles {
        config.smoke.max_particles = max_particles;
    }
    if cli.no_splash {
        config.splash_enabled = false;
    }
    if let Some(cv) = &cli.cv {
        config.cv_path = Some(cv.clone());
    }
    config
}

async fn run_app(mut app: AppState, running: Arc<AtomicBool>) -> Result<()> {
    // Create backend and terminal
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    // Create task channel and runner
    let (task_tx, mut task_rx) = mpsc::unbounded_channel();
    let task_runner = AsyncTaskRunner::new(task_tx);

    // Create resize debouncer
    let resize_tx = task_runner.spawn_resize_debouncer(RESIZE_DEBOUNCE_MS);

    run_event_loop(
        &mut terminal,
        &mut app,
        &mut task_rx,
        &task_runner,
        running,
        &resize_tx,
    )
    .await?;

    tracing::info!("folio shutting down");
    Ok(())
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    task_rx: &mut mpsc::UnboundedReceiver<TaskMessage>,
    task_runner: &AsyncTaskRunner,
    running: Arc<AtomicBool>,
    resize_tx: &mpsc::UnboundedSender<(u16, u16)>,
) -> Result<()> {
    let frame_duration = Duration::from_millis(FRAME_DURATION_MS);
    let started = Instant::now();
    let mut input_handler = InputHandler;

    while running.load(Ordering::SeqCst) && !app.should_quit {
        let frame_start = Instant::now();

        // Process all pending task messages (non-blocking)
        while let Ok(msg) = task_rx.try_recv() {
            handle_task_message(app, msg);
        }

        // Run due timers and this frame's scroll effects
        app.tick(started.elapsed().as_millis() as u64);

        if let Some(source) = app.take_download_request() {
            match downloads_dir() {
                Some(dest) => {
                    task_runner.spawn_cv_download(source, dest);
                }
                None => app.on_cv_failed("no downloads folder found".to_string()),
            }
        }

        // Render UI
        terminal.draw(|f| {
            ui::layout::render(f, app);
        })?;

        // Drain input events; pointer motion arrives in bursts
        while event::poll(Duration::from_millis(0))? {
            let ev = event::read()?;
            handle_event(app, &mut input_handler, ev, resize_tx)?;
        }

        let elapsed = frame_start.elapsed();
        app.record_frame(elapsed.as_millis() as u64);

        // Sleep to maintain frame rate
        if elapsed < frame_duration {
            tokio::time::sleep(frame_duration - elapsed).await;
        }
    }

    Ok(())
}

fn handle_task_message(app: &mut AppState, msg: TaskMessage) {
    match msg {
        TaskMessage::CvSaved { path } => app.on_cv_saved(path),

        TaskMessage::CvFailed { error } => {
            tracing::error!("CV download error: {}", error);
            app.on_cv_failed(error);
        }

        TaskMessage::ResizeComplete { width, height } => {
            tracing::info!("Resize complete: {}x{}", width, height);
            app.handle_resize_complete(width, height);
        }
    }
}

fn handle_event(
    app: &mut AppState,
    input_handler: &mut InputHandler,
    ev: Event,
    resize_tx: &mpsc::UnboundedSender<(u16, u16)>,
) -> Result<()> {
    match ev {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            input_handler.handle_key(app, key)?;
        }
        Event::Mouse(mouse) => {
            input_handler.handle_mouse(app, mouse)?;
        }
        Event::FocusGained => app.on_focus_gained(),
        Event::FocusLost => app.on_focus_lost(),
        Event::Resize(width, height) => {
            // Update viewport immediately for UI
            app.update_viewport_size(width, height);

            // Send to debouncer for re-layout
            let _ = resize_tx.send((width, height));
        }
        _ => {}
    }
    Ok(())
}
