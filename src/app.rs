use crate::accordion::Accordion;
use crate::constants::{
    DOWNLOAD_TOAST_MS, FORM_TOAST_MS, NAVBAR_HEIGHT, PERF_REPORT_INTERVAL_MS, SECTION_PROBE_PX,
};
use crate::contact::{ContactForm, ContactTask, SubmitOutcome};
use crate::error::AppError;
use crate::navigation::{NavLink, Navigator};
use crate::observer::{ObserverOptions, Span, VisibilityObserver};
use crate::page::{Action, LineAction, PageLayout, Portfolio};
use crate::perf::{LazyImages, PerfMonitor, PerfTask, ScrollThrottle};
use crate::reveal::{RevealAnimations, RevealTask};
use crate::scheduler::{TaskQueue, TimerService};
use crate::smoke::{SmokeEffect, SmokeTask};
use crate::splash::{SplashScreen, SplashTask};
use crate::toast::{ToastChannel, ToastKind, ToastTask, Toasts};
use crate::types::{Config, UiMode, Viewport};
use crate::ui::scene::{NavBar, ParticleLayer};
use std::path::PathBuf;

const FORM_INVALID_MESSAGE: &str = "Please fix the errors above.";
const FORM_SENT_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";
const CV_STARTED_MESSAGE: &str = "CV download started! Check your downloads folder.";

/// Every piece of timer work in the app
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppTask {
    Smoke(SmokeTask),
    Splash(SplashTask),
    Reveal(RevealTask),
    Contact(ContactTask),
    Toast(ToastTask),
    Perf(PerfTask),
}

impl From<SmokeTask> for AppTask {
    fn from(task: SmokeTask) -> Self {
        AppTask::Smoke(task)
    }
}

impl From<SplashTask> for AppTask {
    fn from(task: SplashTask) -> Self {
        AppTask::Splash(task)
    }
}

impl From<RevealTask> for AppTask {
    fn from(task: RevealTask) -> Self {
        AppTask::Reveal(task)
    }
}

impl From<ContactTask> for AppTask {
    fn from(task: ContactTask) -> Self {
        AppTask::Contact(task)
    }
}

impl From<ToastTask> for AppTask {
    fn from(task: ToastTask) -> Self {
        AppTask::Toast(task)
    }
}

impl From<PerfTask> for AppTask {
    fn from(task: PerfTask) -> Self {
        AppTask::Perf(task)
    }
}

pub struct AppState {
    pub config: Config,
    pub portfolio: Portfolio,
    pub layout: PageLayout,
    pub viewport: Viewport,
    pub ui_mode: UiMode,
    pub should_quit: bool,

    // Terminal focus; animations pause while it is away
    pub focused: bool,

    pub timers: TaskQueue<AppTask>,

    // Effects
    pub smoke: SmokeEffect<ParticleLayer>,
    pub navigator: Navigator<NavBar>,
    section_spy: VisibilityObserver<String>,
    pub reveal: RevealAnimations,
    pub lazy_images: LazyImages,
    pub splash: SplashScreen,

    // Page widgets
    pub contact: ContactForm,
    pub toasts: Toasts,
    pub accordion: Accordion,

    throttle: ScrollThrottle,
    perf: PerfMonitor,

    // CV copy waiting to be handed to the task runner
    download_request: Option<PathBuf>,
}

impl AppState {
    /// Build the page for a terminal of `width` x `height` cells
    pub fn new(config: Config, portfolio: Portfolio, width: u16, height: u16) -> Self {
        let mut timers = TaskQueue::new();

        let smoke = SmokeEffect::new(ParticleLayer::new(), config.smoke.clone(), &mut timers);
        timers.set_interval(PERF_REPORT_INTERVAL_MS, PerfTask::Report.into());

        let links: Vec<NavLink> = portfolio
            .sections
            .iter()
            .map(|s| NavLink::new(s.nav_label.clone(), s.id.clone()))
            .collect();
        let navigator = Navigator::new(
            NavBar::new(links.len()),
            links,
            config.navigation.clone(),
        );

        let accordion = Accordion::new(portfolio.project_count());
        let splash = SplashScreen::new(config.splash_enabled);

        let mut app = AppState {
            config,
            portfolio,
            layout: PageLayout::default(),
            viewport: Viewport {
                width,
                height: height.saturating_sub(NAVBAR_HEIGHT),
                scroll_offset: 0,
            },
            ui_mode: UiMode::Normal,
            should_quit: false,
            focused: true,
            timers,
            smoke,
            navigator,
            section_spy: VisibilityObserver::new(ObserverOptions::section_spy()),
            reveal: RevealAnimations::new(),
            lazy_images: LazyImages::new(),
            splash,
            contact: ContactForm::new(),
            toasts: Toasts::new(),
            accordion,
            throttle: ScrollThrottle::new(),
            perf: PerfMonitor::new(),
            download_request: None,
        };

        app.relayout();
        app.apply_scroll_effects(0.0);
        app.splash.on_page_loaded(&mut app.timers);

        tracing::debug!(
            "Page built: {} sections, {} rows at width {}",
            app.layout.sections.len(),
            app.layout.total_rows(),
            width
        );
        app
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Advance the clock to `now_ms`, running due timers and the frame's
    /// scroll effects
    pub fn tick(&mut self, now_ms: u64) {
        while let Some(task) = self.timers.poll(now_ms) {
            self.dispatch(task);
        }

        if let Some((scroll_y, direction)) = self.throttle.on_frame() {
            tracing::trace!("Scrolled {:?} to {}px", direction, scroll_y);
            self.apply_scroll_effects(scroll_y);
        }
    }

    fn dispatch(&mut self, task: AppTask) {
        match task {
            AppTask::Smoke(task) => self.smoke.handle(task, &mut self.timers),
            AppTask::Splash(task) => self.splash.handle(task),
            AppTask::Reveal(task) => {
                let now = self.timers.now_ms();
                self.reveal.handle(task, now);
            }
            AppTask::Contact(task) => {
                if self.contact.handle(task) {
                    self.toasts.show(
                        ToastChannel::Form,
                        ToastKind::Success,
                        FORM_SENT_MESSAGE,
                        FORM_TOAST_MS,
                        &mut self.timers,
                    );
                    if self.ui_mode == UiMode::ContactForm {
                        self.ui_mode = UiMode::Normal;
                    }
                }
            }
            AppTask::Toast(task) => self.toasts.handle(task, &mut self.timers),
            AppTask::Perf(PerfTask::Report) => {
                self.perf.report(self.smoke.live_count());
            }
        }
    }

    pub fn record_frame(&mut self, frame_ms: u64) {
        self.perf.record_frame(frame_ms);
    }

    // Geometry

    pub fn scroll_y(&self) -> f64 {
        self.config.cells.rows_to_px(self.viewport.scroll_offset)
    }

    /// The visible part of the page, in page pixels
    pub fn viewport_span(&self) -> Span {
        Span::new(
            self.scroll_y(),
            self.config.cells.rows_to_px(self.viewport.height as usize),
        )
    }

    /// Immediate size update; the page is re-wrapped once resizing settles
    pub fn update_viewport_size(&mut self, width: u16, height: u16) {
        self.viewport.width = width;
        self.viewport.height = height.saturating_sub(NAVBAR_HEIGHT);
        self.clamp_scroll();
    }

    pub fn handle_resize_complete(&mut self, width: u16, height: u16) {
        self.update_viewport_size(width, height);
        self.relayout();
    }

    /// Rebuild the page and re-measure everything observers and the
    /// navigator depend on
    pub fn relayout(&mut self) {
        self.layout = PageLayout::build(&self.portfolio, self.viewport.width, &self.accordion);
        let metrics = self.config.cells;

        for section in &self.layout.sections {
            let span = Span::new(
                metrics.rows_to_px(section.top_row),
                metrics.rows_to_px(section.rows),
            );
            self.section_spy.observe(section.id.clone(), span);
        }
        self.reveal.observe_layout(&self.layout, &metrics);
        self.lazy_images.observe_layout(&self.layout, &metrics);

        let labels: Vec<String> = self
            .navigator
            .links()
            .iter()
            .map(|l| l.label.clone())
            .collect();
        let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
        self.navigator
            .surface_mut()
            .measure(&labels, self.viewport.width, &metrics);
        self.navigator.update_indicator_position();

        self.clamp_scroll();
        self.refresh_visibility();
    }

    fn clamp_scroll(&mut self) {
        let max = self.layout.max_scroll(self.viewport.height as usize);
        if self.viewport.scroll_offset > max {
            self.viewport.scroll_offset = max;
            self.throttle.on_scroll(self.scroll_y());
        }
    }

    fn apply_scroll_effects(&mut self, scroll_y: f64) {
        self.navigator.on_scroll(scroll_y);
        self.reveal.on_scroll(scroll_y);
        self.refresh_visibility();
    }

    fn refresh_visibility(&mut self) {
        let span = self.viewport_span();

        for entry in self.section_spy.check(span) {
            self.navigator.on_section_visibility_changed(
                &entry.target,
                entry.intersection_ratio,
                entry.is_intersecting,
            );
        }

        // Left unchecked while paused so nothing is missed on return
        if self.focused {
            self.reveal.on_viewport_changed(span, &mut self.timers);
        }
        self.lazy_images.on_viewport_changed(span);
    }

    // Scrolling

    pub fn scroll_to_row(&mut self, row: usize) {
        let row = row.min(self.layout.max_scroll(self.viewport.height as usize));
        if row != self.viewport.scroll_offset {
            self.viewport.scroll_offset = row;
            self.throttle.on_scroll(self.scroll_y());
        }
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll_to_row(self.viewport.scroll_offset.saturating_add(rows));
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll_to_row(self.viewport.scroll_offset.saturating_sub(rows));
    }

    pub fn page_down(&mut self) {
        self.scroll_down((self.viewport.height as usize).saturating_sub(1).max(1));
    }

    pub fn page_up(&mut self) {
        self.scroll_up((self.viewport.height as usize).saturating_sub(1).max(1));
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_to_row(0);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_to_row(usize::MAX);
    }

    /// Scroll so the section sits just below the navbar
    fn scroll_to_section(&mut self, section_idx: usize) {
        let Some(section) = self.layout.sections.get(section_idx) else {
            return;
        };
        let metrics = self.config.cells;
        let target = self
            .navigator
            .scroll_target(metrics.rows_to_px(section.top_row));
        self.scroll_to_row((target / metrics.cell_height_px).ceil() as usize);
    }

    /// Follow a navbar link to its section
    pub fn go_to_link(&mut self, link: usize) {
        let Some(section_id) = self.navigator.links().get(link).map(|l| l.section_id.clone())
        else {
            return;
        };
        match self.layout.sections.iter().position(|s| s.id == section_id) {
            Some(idx) => {
                tracing::debug!("Navigating to section '{}'", section_id);
                self.scroll_to_section(idx);
            }
            None => tracing::warn!("Link target '{}' is not on the page", section_id),
        }
    }

    /// Section whose span contains the probe line below the viewport top
    pub fn current_section(&self) -> Option<usize> {
        let probe = self.scroll_y() + SECTION_PROBE_PX;
        self.layout
            .section_index_at_row(self.config.cells.px_to_rows(probe))
    }

    /// No-op while the probe line sits outside every section
    pub fn next_section(&mut self) {
        if let Some(idx) = self.current_section() {
            self.scroll_to_section(idx + 1);
        }
    }

    pub fn previous_section(&mut self) {
        if let Some(idx) = self.current_section() {
            if idx > 0 {
                self.scroll_to_section(idx - 1);
            }
        }
    }

    // Page interaction

    pub fn toggle_project(&mut self, idx: usize) {
        let open = self.accordion.toggle(idx);
        tracing::debug!("Project {} tech stack {}", idx, if open { "opened" } else { "closed" });
        self.relayout();
    }

    /// Esc: close accordions and any popup
    pub fn close_all(&mut self) {
        self.ui_mode = UiMode::Normal;
        if self.accordion.open_index().is_some() {
            self.accordion.close_all();
            self.relayout();
        }
    }

    pub fn trigger(&mut self, action: Action) {
        match action {
            Action::DownloadCv => self.request_cv_download(),
            Action::ContactForm => self.open_contact_form(),
            Action::ScrollToTop => self.scroll_to_top(),
        }
    }

    pub fn request_cv_download(&mut self) {
        let Some(path) = self.config.cv_path.clone() else {
            tracing::warn!("CV download requested but no CV is configured");
            self.toasts.show(
                ToastChannel::Download,
                ToastKind::Error,
                AppError::NoCvConfigured.to_string(),
                DOWNLOAD_TOAST_MS,
                &mut self.timers,
            );
            return;
        };

        self.download_request = Some(PathBuf::from(path));
        self.toasts.show(
            ToastChannel::Download,
            ToastKind::Info,
            CV_STARTED_MESSAGE,
            DOWNLOAD_TOAST_MS,
            &mut self.timers,
        );
    }

    /// Hand a pending CV copy to whoever runs background tasks
    pub fn take_download_request(&mut self) -> Option<PathBuf> {
        self.download_request.take()
    }

    pub fn on_cv_saved(&mut self, path: PathBuf) {
        tracing::info!("CV saved to {}", path.display());
    }

    pub fn on_cv_failed(&mut self, error: String) {
        self.toasts.show(
            ToastChannel::Download,
            ToastKind::Error,
            format!("CV download failed: {}", error),
            DOWNLOAD_TOAST_MS,
            &mut self.timers,
        );
    }

    pub fn open_contact_form(&mut self) {
        self.ui_mode = UiMode::ContactForm;
    }

    pub fn submit_contact(&mut self) {
        if self.contact.submit(&mut self.timers) == SubmitOutcome::Invalid {
            self.toasts.show(
                ToastChannel::Form,
                ToastKind::Error,
                FORM_INVALID_MESSAGE,
                FORM_TOAST_MS,
                &mut self.timers,
            );
        }
    }

    pub fn toggle_help(&mut self) {
        self.ui_mode = match self.ui_mode {
            UiMode::Help => UiMode::Normal,
            _ => UiMode::Help,
        };
    }

    // Pointer and focus

    pub fn on_pointer_move(&mut self, column: u16, row: u16) {
        if !self.focused || self.splash.is_visible() {
            return;
        }
        let position = self.config.cells.cell_center(column, row);
        self.smoke.on_pointer_move(position, &mut self.timers);
    }

    pub fn on_click(&mut self, column: u16, row: u16) {
        if row < NAVBAR_HEIGHT {
            let point = self.config.cells.cell_center(column, row);
            if let Some(link) = self.navigator.surface().link_at(point) {
                self.go_to_link(link);
            }
            return;
        }

        let terminal_height = self.viewport.height + NAVBAR_HEIGHT;
        if self.reveal.scroll_top_visible()
            && crate::ui::layout::scroll_top_button_area(self.viewport.width, terminal_height)
                .contains((column, row).into())
        {
            self.scroll_to_top();
            return;
        }

        let page_row = self.viewport.scroll_offset + (row - NAVBAR_HEIGHT) as usize;
        let action = self.layout.lines.get(page_row).and_then(|line| line.action);
        match action {
            Some(LineAction::Trigger(action)) => self.trigger(action),
            Some(LineAction::ToggleTech(idx)) => self.toggle_project(idx),
            None => {}
        }
    }

    pub fn on_focus_lost(&mut self) {
        tracing::debug!("Focus lost, pausing animations");
        self.focused = false;
    }

    pub fn on_focus_gained(&mut self) {
        tracing::debug!("Focus regained");
        self.focused = true;
        if self.config.splash_enabled {
            self.splash.on_focus_regained(&mut self.timers);
        }
        self.refresh_visibility();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::Field;
    use crate::navigation::NavbarStyle;
    use crate::page::ElementKind;

    fn create_test_app() -> AppState {
        let config = Config {
            splash_enabled: false,
            ..Config::default()
        };
        AppState::new(config, Portfolio::builtin().unwrap(), 100, 30)
    }

    #[test]
    fn test_first_link_active_on_load() {
        let app = create_test_app();
        assert_eq!(app.navigator.active_link(), Some(0));
        assert!(app.navigator.surface().is_active(0));
        assert!(app.navigator.surface().indicator().is_some());
        assert_eq!(app.navigator.navbar_style(), NavbarStyle::Translucent);
    }

    #[test]
    fn test_link_scroll_activates_section_and_solid_navbar() {
        let mut app = create_test_app();
        let last = app.navigator.links().len() - 1;
        let last_id = app.navigator.links()[last].section_id.clone();

        app.go_to_link(last);
        app.tick(16);

        assert!(app.scroll_y() > 100.0);
        assert_eq!(app.navigator.navbar_style(), NavbarStyle::Solid);
        assert_eq!(app.navigator.active_section(), Some(last_id.as_str()));

        let active: Vec<bool> = (0..app.navigator.links().len())
            .map(|i| app.navigator.surface().is_active(i))
            .collect();
        assert_eq!(active.iter().filter(|a| **a).count(), 1);
        assert!(active[last]);
    }

    #[test]
    fn test_section_jumps_follow_the_probe_line() {
        let mut app = create_test_app();
        assert_eq!(app.current_section(), Some(0));

        app.next_section();
        assert_eq!(app.current_section(), Some(1));
        app.next_section();
        assert_eq!(app.current_section(), Some(2));
        app.previous_section();
        assert_eq!(app.current_section(), Some(1));
    }

    #[test]
    fn test_next_section_ignored_below_last_section() {
        let config = Config {
            splash_enabled: false,
            ..Config::default()
        };
        // 14 page rows: at the bottom the probe line lands on the footer
        let mut app = AppState::new(config, Portfolio::builtin().unwrap(), 100, 16);
        app.scroll_to_bottom();
        assert_eq!(app.current_section(), None);

        let offset = app.viewport.scroll_offset;
        app.next_section();
        assert_eq!(app.viewport.scroll_offset, offset);
    }

    #[test]
    fn test_tall_sections_leave_links_inactive_at_minimum_size() {
        let config = Config {
            splash_enabled: false,
            ..Config::default()
        };
        let mut app = AppState::new(
            config,
            Portfolio::builtin().unwrap(),
            crate::constants::MIN_TERMINAL_WIDTH,
            crate::constants::MIN_TERMINAL_HEIGHT,
        );
        // Every section is taller than the spy band can cover past 0.25
        assert_eq!(app.navigator.active_link(), None);

        app.go_to_link(1);
        app.tick(16);
        assert!(app.viewport.scroll_offset > 0);
        assert_eq!(app.navigator.active_link(), None);
        assert!(app.navigator.surface().indicator().is_none());
    }

    #[test]
    fn test_scroll_effects_run_once_per_frame() {
        let mut app = create_test_app();
        app.scroll_down(30);
        app.scroll_down(5);
        assert_eq!(app.navigator.navbar_style(), NavbarStyle::Translucent);

        app.tick(16);
        assert_eq!(app.navigator.navbar_style(), NavbarStyle::Solid);
        assert!(app.reveal.scroll_top_visible());

        app.scroll_to_top();
        app.tick(32);
        assert_eq!(app.navigator.navbar_style(), NavbarStyle::Translucent);
        assert!(!app.reveal.scroll_top_visible());
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut app = create_test_app();
        app.scroll_to_bottom();
        assert_eq!(
            app.viewport.scroll_offset,
            app.layout.max_scroll(app.viewport.height as usize)
        );
        app.scroll_up(usize::MAX);
        assert_eq!(app.viewport.scroll_offset, 0);
    }

    #[test]
    fn test_pointer_spawns_and_particles_retire() {
        let mut app = create_test_app();
        app.on_pointer_move(10, 10);
        app.on_pointer_move(20, 10);
        assert_eq!(app.smoke.live_count(), 2);
        assert_eq!(app.smoke.surface().len(), 2);

        app.tick(2_100);
        assert_eq!(app.smoke.live_count(), 0);
        assert!(app.smoke.surface().is_empty());
    }

    #[test]
    fn test_focus_loss_pauses_spawning() {
        let mut app = create_test_app();
        app.on_focus_lost();
        app.on_pointer_move(10, 10);
        assert_eq!(app.smoke.live_count(), 0);

        app.on_focus_gained();
        app.on_pointer_move(10, 10);
        assert_eq!(app.smoke.live_count(), 1);
    }

    #[test]
    fn test_splash_blocks_smoke_until_hidden() {
        let mut app = AppState::new(Config::default(), Portfolio::builtin().unwrap(), 100, 30);
        assert!(app.splash.is_visible());
        app.on_pointer_move(10, 10);
        assert_eq!(app.smoke.live_count(), 0);

        app.tick(3_000);
        assert!(!app.splash.is_visible());

        app.on_focus_lost();
        app.on_focus_gained();
        assert!(app.splash.is_visible());
        app.tick(4_500);
        assert!(!app.splash.is_visible());
    }

    #[test]
    fn test_visible_cards_reveal_after_load() {
        let mut app = create_test_app();
        app.tick(2_000);
        let revealed = app
            .layout
            .elements
            .iter()
            .filter(|e| e.kind.reveals())
            .filter(|e| app.reveal.is_revealed(e.key))
            .count();
        assert!(revealed > 0);

        let last = app
            .layout
            .elements
            .iter()
            .rev()
            .find(|e| e.kind == ElementKind::Contact)
            .unwrap();
        assert!(!app.reveal.is_revealed(last.key));
    }

    #[test]
    fn test_toggle_project_relayouts() {
        let mut app = create_test_app();
        let rows = app.layout.total_rows();
        assert!(app.accordion.is_open(0));

        app.toggle_project(0);
        assert!(!app.accordion.is_open(0));
        assert!(app.layout.total_rows() < rows);

        app.toggle_project(0);
        app.close_all();
        assert_eq!(app.accordion.open_index(), None);
    }

    #[test]
    fn test_cv_download_without_path_shows_error() {
        let mut app = create_test_app();
        app.trigger(Action::DownloadCv);
        assert_eq!(app.take_download_request(), None);
        let toast = app.toasts.iter().next().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
    }

    #[test]
    fn test_cv_download_is_queued_with_info_toast() {
        let mut app = create_test_app();
        app.config.cv_path = Some("/tmp/cv.pdf".to_string());
        app.trigger(Action::DownloadCv);

        assert_eq!(app.take_download_request(), Some(PathBuf::from("/tmp/cv.pdf")));
        assert_eq!(app.take_download_request(), None);
        let toast = app.toasts.iter().next().unwrap();
        assert_eq!(toast.message, CV_STARTED_MESSAGE);

        app.tick(3_400);
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn test_cv_failure_is_a_toast_not_a_popup() {
        let mut app = create_test_app();
        app.on_cv_failed("disk full".to_string());

        assert_eq!(app.ui_mode, UiMode::Normal);
        let toast = app.toasts.iter().next().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "CV download failed: disk full");
    }

    #[test]
    fn test_contact_submit_flow() {
        let mut app = create_test_app();
        app.open_contact_form();
        assert_eq!(app.ui_mode, UiMode::ContactForm);

        app.submit_contact();
        assert_eq!(app.toasts.iter().next().unwrap().message, FORM_INVALID_MESSAGE);

        for (field, text) in [
            (Field::Name, "Ada"),
            (Field::Email, "ada@example.com"),
            (Field::Subject, "Hello there"),
            (Field::Message, "Let's build something."),
        ] {
            app.contact.focus(field);
            for c in text.chars() {
                app.contact.input(c);
            }
        }
        app.submit_contact();

        let now = app.now_ms();
        app.tick(now + 2_000);
        assert_eq!(app.ui_mode, UiMode::Normal);
        let messages: Vec<_> = app.toasts.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec![FORM_SENT_MESSAGE]);
    }

    #[test]
    fn test_click_on_nav_link() {
        let mut app = create_test_app();
        let bounds = app.navigator.surface().bounds(2).unwrap();
        let (column, row) = app
            .config
            .cells
            .to_cell(crate::types::Point::new(bounds.left + 1.0, 1.0))
            .unwrap();

        app.on_click(column, row);
        app.tick(16);
        assert_eq!(app.navigator.active_link(), Some(2));
    }

    #[test]
    fn test_resize_rewraps_and_remeasures() {
        let mut app = create_test_app();
        let indicator = app.navigator.surface().indicator().unwrap();
        app.handle_resize_complete(70, 25);

        assert_eq!(app.layout.width, 70);
        assert_eq!(app.viewport.height, 25 - NAVBAR_HEIGHT);
        // Indicator is relative to the menu, so its offset is unchanged
        assert_eq!(app.navigator.surface().indicator().unwrap(), indicator);
    }
}
