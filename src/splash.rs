//! Loading splash screen

use crate::constants::{SPLASH_INITIAL_MS, SPLASH_RETURN_MS};
use crate::scheduler::{TimerId, TimerService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashTask {
    Hide,
}

#[derive(Debug)]
pub struct SplashScreen {
    visible: bool,
    hide_timer: Option<TimerId>,
    shown_at_ms: u64,
}

impl SplashScreen {
    pub fn new(enabled: bool) -> Self {
        SplashScreen {
            visible: enabled,
            hide_timer: None,
            shown_at_ms: 0,
        }
    }

    /// The page finished loading: keep the splash up a little longer
    pub fn on_page_loaded<T>(&mut self, timers: &mut impl TimerService<T>)
    where
        T: From<SplashTask>,
    {
        if self.visible {
            self.schedule_hide(SPLASH_INITIAL_MS, timers);
        }
    }

    /// The terminal regained focus: flash the splash again
    pub fn on_focus_regained<T>(&mut self, timers: &mut impl TimerService<T>)
    where
        T: From<SplashTask>,
    {
        if !self.visible {
            self.show(timers.now_ms());
            self.schedule_hide(SPLASH_RETURN_MS, timers);
        }
    }

    /// Dismiss immediately, e.g. on a key press
    pub fn skip<T>(&mut self, timers: &mut impl TimerService<T>) {
        if let Some(timer) = self.hide_timer.take() {
            timers.clear(timer);
        }
        self.hide();
    }

    fn schedule_hide<T>(&mut self, delay_ms: u64, timers: &mut impl TimerService<T>)
    where
        T: From<SplashTask>,
    {
        if let Some(previous) = self.hide_timer.take() {
            timers.clear(previous);
        }
        self.hide_timer = Some(timers.set_timeout(delay_ms, SplashTask::Hide.into()));
    }

    pub fn handle(&mut self, task: SplashTask) {
        match task {
            SplashTask::Hide => {
                self.hide_timer = None;
                self.hide();
            }
        }
    }

    pub fn show(&mut self, now_ms: u64) {
        if !self.visible {
            tracing::debug!("Splash shown");
        }
        self.visible = true;
        self.shown_at_ms = now_ms;
    }

    pub fn hide(&mut self) {
        if self.visible {
            tracing::debug!("Splash hidden");
        }
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn shown_at_ms(&self) -> u64 {
        self.shown_at_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::TaskQueue;

    fn run_until(splash: &mut SplashScreen, timers: &mut TaskQueue<SplashTask>, until: u64) {
        while let Some(task) = timers.poll(until) {
            splash.handle(task);
        }
    }

    #[test]
    fn test_hides_three_seconds_after_load() {
        let mut timers = TaskQueue::<SplashTask>::new();
        let mut splash = SplashScreen::new(true);
        splash.on_page_loaded(&mut timers);

        run_until(&mut splash, &mut timers, 2_999);
        assert!(splash.is_visible());
        run_until(&mut splash, &mut timers, 3_000);
        assert!(!splash.is_visible());
    }

    #[test]
    fn test_returning_focus_flashes_splash() {
        let mut timers = TaskQueue::<SplashTask>::new();
        let mut splash = SplashScreen::new(true);
        splash.on_page_loaded(&mut timers);
        run_until(&mut splash, &mut timers, 5_000);

        splash.on_focus_regained(&mut timers);
        assert!(splash.is_visible());
        assert_eq!(splash.shown_at_ms(), 5_000);

        run_until(&mut splash, &mut timers, 6_500);
        assert!(!splash.is_visible());
    }

    #[test]
    fn test_focus_while_visible_does_nothing() {
        let mut timers = TaskQueue::<SplashTask>::new();
        let mut splash = SplashScreen::new(true);
        splash.on_page_loaded(&mut timers);
        splash.on_focus_regained(&mut timers);

        assert_eq!(timers.pending(), 1);
        run_until(&mut splash, &mut timers, 1_500);
        assert!(splash.is_visible());
    }

    #[test]
    fn test_skip_cancels_pending_hide() {
        let mut timers = TaskQueue::<SplashTask>::new();
        let mut splash = SplashScreen::new(true);
        splash.on_page_loaded(&mut timers);
        splash.skip(&mut timers);

        assert!(!splash.is_visible());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_disabled_splash_never_schedules() {
        let mut timers = TaskQueue::<SplashTask>::new();
        let mut splash = SplashScreen::new(false);
        splash.on_page_loaded(&mut timers);
        assert_eq!(timers.pending(), 0);
        assert!(!splash.is_visible());
    }
}
