//! UI widget components
//!
//! Popups, the splash screen and the toast stack drawn over the page.

pub mod popups;
pub mod splash;
pub mod toasts;
