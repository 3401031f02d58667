//! Reveal-on-scroll and parallax animations
//!
//! Cards, skills, projects and contact items stay hidden until the reveal
//! observer first sees them, then fade in with a per-batch stagger. They never
//! hide again.

use crate::constants::{REVEAL_STAGGER_MS, REVEAL_TRANSITION_MS, SCROLL_TOP_THRESHOLD_PX};
use crate::observer::{ObserverOptions, Span, VisibilityObserver};
use crate::page::{ElementKey, PageLayout};
use crate::scheduler::TimerService;
use crate::types::CellMetrics;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealTask {
    Reveal(ElementKey),
}

pub struct RevealAnimations {
    observer: VisibilityObserver<ElementKey>,
    // Reveal time of every revealed element
    revealed: HashMap<ElementKey, u64>,
    scheduled: HashSet<ElementKey>,
    scroll_top_visible: bool,
}

impl Default for RevealAnimations {
    fn default() -> Self {
        Self::new()
    }
}

impl RevealAnimations {
    pub fn new() -> Self {
        RevealAnimations {
            observer: VisibilityObserver::new(ObserverOptions::reveal()),
            revealed: HashMap::new(),
            scheduled: HashSet::new(),
            scroll_top_visible: false,
        }
    }

    /// (Re)register every revealable element at its current position
    pub fn observe_layout(&mut self, layout: &PageLayout, metrics: &CellMetrics) {
        for element in layout.elements.iter().filter(|e| e.kind.reveals()) {
            if self.revealed.contains_key(&element.key) {
                continue;
            }
            let span = Span::new(
                metrics.rows_to_px(element.top_row),
                metrics.rows_to_px(element.rows),
            );
            self.observer.observe(element.key, span);
        }
    }

    /// Measure against the viewport and schedule reveals for elements that
    /// came into view. Returns how many were scheduled.
    pub fn on_viewport_changed<T>(&mut self, viewport: Span, timers: &mut impl TimerService<T>) -> usize
    where
        T: From<RevealTask>,
    {
        let entries = self.observer.check(viewport);
        let mut scheduled = 0;

        for (index, entry) in entries.iter().enumerate() {
            if !entry.is_intersecting {
                continue;
            }
            let key = entry.target;
            if self.revealed.contains_key(&key) || !self.scheduled.insert(key) {
                continue;
            }
            timers.set_timeout(index as u64 * REVEAL_STAGGER_MS, RevealTask::Reveal(key).into());
            scheduled += 1;
        }
        scheduled
    }

    pub fn handle(&mut self, task: RevealTask, now_ms: u64) {
        match task {
            RevealTask::Reveal(key) => {
                self.scheduled.remove(&key);
                self.revealed.entry(key).or_insert(now_ms);
                // Revealed elements are never hidden again
                self.observer.unobserve(&key);
            }
        }
    }

    pub fn is_revealed(&self, key: ElementKey) -> bool {
        self.revealed.contains_key(&key)
    }

    /// Fade-in progress in [0, 1]; 0 while hidden
    pub fn progress(&self, key: ElementKey, now_ms: u64) -> f64 {
        match self.revealed.get(&key) {
            Some(&at) => {
                (now_ms.saturating_sub(at) as f64 / REVEAL_TRANSITION_MS as f64).min(1.0)
            }
            None => 0.0,
        }
    }

    /// Update the scroll-to-top button. Returns whether it is visible.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        self.scroll_top_visible = scroll_y > SCROLL_TOP_THRESHOLD_PX;
        self.scroll_top_visible
    }

    pub fn scroll_top_visible(&self) -> bool {
        self.scroll_top_visible
    }
}

/// Vertical parallax shift in px for the `index`-th decoration
pub fn parallax_offset(index: usize, scroll_y: f64) -> f64 {
    let rate = scroll_y * -0.5;
    let speed = (index + 1) as f64 * 0.2;
    rate * speed
}
