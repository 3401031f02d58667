//! Scroll throttling, lazy image loading and frame statistics

use crate::constants::FRAME_DURATION_MS;
use crate::observer::{ObserverOptions, Span, VisibilityObserver};
use crate::page::{ElementKey, ElementKind, PageLayout};
use crate::types::{CellMetrics, ScrollDirection};
use std::collections::HashSet;

/// Coalesces scroll events so scroll effects run at most once per frame
#[derive(Debug, Default)]
pub struct ScrollThrottle {
    ticking: bool,
    pending_y: f64,
    last_y: f64,
}

impl ScrollThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scroll event. Returns true if this requested a new frame.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        self.pending_y = scroll_y;
        if self.ticking {
            return false;
        }
        self.ticking = true;
        true
    }

    /// Run once per frame. Yields the settled position if anything scrolled.
    pub fn on_frame(&mut self) -> Option<(f64, ScrollDirection)> {
        if !self.ticking {
            return None;
        }
        self.ticking = false;

        let y = self.pending_y;
        let direction = if y > self.last_y {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        };
        self.last_y = y;
        Some((y, direction))
    }
}

/// Project images render as placeholders until first scrolled into view
pub struct LazyImages {
    observer: VisibilityObserver<ElementKey>,
    loaded: HashSet<ElementKey>,
}

impl Default for LazyImages {
    fn default() -> Self {
        Self::new()
    }
}

impl LazyImages {
    pub fn new() -> Self {
        LazyImages {
            observer: VisibilityObserver::new(ObserverOptions::default()),
            loaded: HashSet::new(),
        }
    }

    pub fn observe_layout(&mut self, layout: &PageLayout, metrics: &CellMetrics) {
        for element in layout
            .elements
            .iter()
            .filter(|e| e.kind == ElementKind::Image && !self.loaded.contains(&e.key))
        {
            let span = Span::new(
                metrics.rows_to_px(element.top_row),
                metrics.rows_to_px(element.rows),
            );
            self.observer.observe(element.key, span);
        }
    }

    /// Load images that entered the viewport. Returns the newly loaded keys.
    pub fn on_viewport_changed(&mut self, viewport: Span) -> Vec<ElementKey> {
        let mut newly_loaded = Vec::new();
        for entry in self.observer.check(viewport) {
            if entry.is_intersecting && self.loaded.insert(entry.target) {
                self.observer.unobserve(&entry.target);
                newly_loaded.push(entry.target);
            }
        }
        if !newly_loaded.is_empty() {
            tracing::debug!("Lazy-loaded {} images", newly_loaded.len());
        }
        newly_loaded
    }

    pub fn is_loaded(&self, key: ElementKey) -> bool {
        self.loaded.contains(&key)
    }

    pub fn pending(&self) -> usize {
        self.observer.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerfTask {
    Report,
}

/// Frame timing collected between periodic reports
#[derive(Debug, Default)]
pub struct PerfMonitor {
    frames: u64,
    total_frame_ms: u64,
    worst_frame_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerfReport {
    pub frames: u64,
    pub average_frame_ms: f64,
    pub worst_frame_ms: u64,
    pub over_budget: bool,
}

impl PerfMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&mut self, frame_ms: u64) {
        self.frames += 1;
        self.total_frame_ms += frame_ms;
        self.worst_frame_ms = self.worst_frame_ms.max(frame_ms);
    }

    /// Summarize and reset the window
    pub fn report(&mut self, live_particles: usize) -> PerfReport {
        let average = if self.frames > 0 {
            self.total_frame_ms as f64 / self.frames as f64
        } else {
            0.0
        };
        let report = PerfReport {
            frames: self.frames,
            average_frame_ms: average,
            worst_frame_ms: self.worst_frame_ms,
            over_budget: average > FRAME_DURATION_MS as f64 * 1.9,
        };

        tracing::debug!(
            "Perf: {} frames, avg {:.1}ms, worst {}ms, {} particles",
            report.frames,
            report.average_frame_ms,
            report.worst_frame_ms,
            live_particles
        );
        if report.over_budget {
            tracing::warn!(
                "Frame time {:.1}ms well over the {}ms budget",
                report.average_frame_ms,
                FRAME_DURATION_MS
            );
        }

        *self = PerfMonitor::default();
        report
    }
}
