//! Application-wide constants

/// Minimum terminal width required to run the application
pub const MIN_TERMINAL_WIDTH: u16 = 60;

/// Minimum terminal height required to run the application
pub const MIN_TERMINAL_HEIGHT: u16 = 20;

/// Upper bound for the particle cap from config or CLI
pub const MAX_PARTICLE_CAP: usize = 500;

/// Columns left blank on each side of the page text
pub const PAGE_MARGIN_WIDTH: usize = 4;

/// Rows reserved for a project image placeholder
pub const IMAGE_PLACEHOLDER_ROWS: usize = 3;

/// Rows taken by the fixed navbar (links + indicator)
pub const NAVBAR_HEIGHT: u16 = 2;

/// Rows scrolled per wheel notch
pub const WHEEL_SCROLL_ROWS: usize = 3;

/// Splash stays up this long after the page loads
pub const SPLASH_INITIAL_MS: u64 = 3000;

/// Splash flash duration when the terminal regains focus
pub const SPLASH_RETURN_MS: u64 = 1500;

/// Stagger between reveals reported in the same batch
pub const REVEAL_STAGGER_MS: u64 = 100;

/// Duration of the reveal fade-in
pub const REVEAL_TRANSITION_MS: u64 = 800;

/// Scroll offset in px past which the scroll-to-top button shows
pub const SCROLL_TOP_THRESHOLD_PX: f64 = 300.0;

/// Viewport line (px from the top) that decides the current section for
/// arrow-key navigation
pub const SECTION_PROBE_PX: f64 = 100.0;

/// Simulated contact form send time
pub const FORM_SEND_MS: u64 = 2000;

/// How long form messages stay on screen
pub const FORM_TOAST_MS: u64 = 5000;

/// How long the CV download message stays on screen
pub const DOWNLOAD_TOAST_MS: u64 = 3000;

/// Toast slide-out duration before removal
pub const TOAST_EXIT_MS: u64 = 400;

/// Maximum characters accepted in a single-line form field
pub const MAX_FIELD_INPUT_LENGTH: usize = 200;

/// Maximum characters accepted in the message field
pub const MAX_MESSAGE_INPUT_LENGTH: usize = 2000;

/// Interval between performance reports
pub const PERF_REPORT_INTERVAL_MS: u64 = 30_000;

/// Frame duration in milliseconds for the UI render loop (targeting 60 FPS)
pub const FRAME_DURATION_MS: u64 = 16;

/// Debounce timeout for terminal resize events in milliseconds
pub const RESIZE_DEBOUNCE_MS: u64 = 200;
