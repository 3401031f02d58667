//! Viewport visibility observer
//!
//! Tracks how much of each observed element overlaps the viewport and reports
//! a change whenever an element is first observed, crosses one of the
//! configured thresholds, or starts/stops intersecting. Only the vertical axis
//! matters for a scrolling page.

/// A vertical extent in page pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Span {
    pub top: f64,
    pub height: f64,
}

impl Span {
    pub fn new(top: f64, height: f64) -> Self {
        Span {
            top,
            height: height.max(0.0),
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Grows (positive) or shrinks (negative) one edge of the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Margin {
    Px(f64),
    /// Fraction of the viewport height, -0.2 for "-20%"
    Fraction(f64),
}

impl Margin {
    fn resolve(&self, viewport_height: f64) -> f64 {
        match self {
            Margin::Px(px) => *px,
            Margin::Fraction(f) => f * viewport_height,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub margin_top: Margin,
    pub margin_bottom: Margin,
    /// Ratios at which a change is reported, ascending
    pub thresholds: Vec<f64>,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        ObserverOptions {
            margin_top: Margin::Px(0.0),
            margin_bottom: Margin::Px(0.0),
            thresholds: vec![0.0],
        }
    }
}

impl ObserverOptions {
    /// Navigation spy: a band from 20% to 40% of the viewport
    pub fn section_spy() -> Self {
        ObserverOptions {
            margin_top: Margin::Fraction(-0.2),
            margin_bottom: Margin::Fraction(-0.6),
            thresholds: vec![0.0, 0.25, 0.5, 0.75, 1.0],
        }
    }

    /// Reveal on scroll: trigger slightly before the element clears the bottom
    pub fn reveal() -> Self {
        ObserverOptions {
            margin_top: Margin::Px(0.0),
            margin_bottom: Margin::Px(-100.0),
            thresholds: vec![0.1],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityEntry<K> {
    pub target: K,
    pub intersection_ratio: f64,
    pub is_intersecting: bool,
}

#[derive(Debug)]
struct Observed<K> {
    key: K,
    span: Span,
    // (threshold bucket, intersecting) at the last report
    last: Option<(usize, bool)>,
}

#[derive(Debug)]
pub struct VisibilityObserver<K> {
    options: ObserverOptions,
    targets: Vec<Observed<K>>,
}

impl<K: Clone + PartialEq> VisibilityObserver<K> {
    pub fn new(mut options: ObserverOptions) -> Self {
        if options.thresholds.is_empty() {
            options.thresholds.push(0.0);
        }
        options
            .thresholds
            .sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        VisibilityObserver {
            options,
            targets: Vec::new(),
        }
    }

    /// Start observing. Re-observing a key only updates its span.
    pub fn observe(&mut self, key: K, span: Span) {
        match self.targets.iter_mut().find(|t| t.key == key) {
            Some(target) => target.span = span,
            None => self.targets.push(Observed {
                key,
                span,
                last: None,
            }),
        }
    }

    pub fn unobserve(&mut self, key: &K) {
        self.targets.retain(|t| &t.key != key);
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Measure every target against `viewport` and return the changed ones,
    /// in observation order
    pub fn check(&mut self, viewport: Span) -> Vec<VisibilityEntry<K>> {
        let root_top = viewport.top - self.options.margin_top.resolve(viewport.height);
        let root_bottom = viewport.bottom() + self.options.margin_bottom.resolve(viewport.height);
        let root = Span::new(root_top, root_bottom - root_top);

        let mut entries = Vec::new();
        for target in &mut self.targets {
            let (ratio, intersecting) = intersection(target.span, root);
            let bucket = threshold_bucket(&self.options.thresholds, ratio, intersecting);

            if target.last != Some((bucket, intersecting)) {
                target.last = Some((bucket, intersecting));
                entries.push(VisibilityEntry {
                    target: target.key.clone(),
                    intersection_ratio: ratio,
                    is_intersecting: intersecting,
                });
            }
        }
        entries
    }
}

fn intersection(target: Span, root: Span) -> (f64, bool) {
    if target.height == 0.0 {
        let inside = target.top >= root.top && target.top < root.bottom();
        return if inside { (1.0, true) } else { (0.0, false) };
    }

    let top = target.top.max(root.top);
    let bottom = target.bottom().min(root.bottom());
    if bottom <= top {
        return (0.0, false);
    }
    (((bottom - top) / target.height).clamp(0.0, 1.0), true)
}

/// How many thresholds the ratio has reached
fn threshold_bucket(thresholds: &[f64], ratio: f64, intersecting: bool) -> usize {
    thresholds
        .iter()
        .filter(|&&t| if t == 0.0 { intersecting } else { ratio >= t })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(top: f64) -> Span {
        Span::new(top, 400.0)
    }

    #[test]
    fn test_first_check_reports_every_target() {
        let mut observer = VisibilityObserver::new(ObserverOptions::default());
        observer.observe("a", Span::new(0.0, 100.0));
        observer.observe("b", Span::new(1_000.0, 100.0));

        let entries = observer.check(viewport(0.0));
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_intersecting);
        assert_eq!(entries[0].intersection_ratio, 1.0);
        assert!(!entries[1].is_intersecting);
        assert_eq!(entries[1].intersection_ratio, 0.0);
    }

    #[test]
    fn test_reports_only_on_threshold_crossings() {
        let mut observer = VisibilityObserver::new(ObserverOptions {
            thresholds: vec![0.0, 0.5, 1.0],
            ..ObserverOptions::default()
        });
        observer.observe("card", Span::new(400.0, 100.0));
        observer.check(viewport(0.0));

        // 10% visible: crossed 0
        let entries = observer.check(viewport(10.0));
        assert_eq!(entries.len(), 1);
        assert!((entries[0].intersection_ratio - 0.1).abs() < 1e-9);

        // 20% visible: same bucket, nothing reported
        assert!(observer.check(viewport(20.0)).is_empty());

        // 60% visible: crossed 0.5
        assert_eq!(observer.check(viewport(60.0)).len(), 1);
    }

    #[test]
    fn test_section_spy_band() {
        let mut observer = VisibilityObserver::new(ObserverOptions::section_spy());
        // Band for a 1000px viewport at 0 is [200, 400)
        observer.observe("projects", Span::new(250.0, 100.0));
        observer.observe("contact", Span::new(600.0, 300.0));

        let entries = observer.check(Span::new(0.0, 1_000.0));
        let projects = &entries[0];
        assert!(projects.is_intersecting);
        assert_eq!(projects.intersection_ratio, 1.0);
        assert!(!entries[1].is_intersecting);
    }

    #[test]
    fn test_reveal_margin_shrinks_bottom_edge() {
        let mut observer = VisibilityObserver::new(ObserverOptions::reveal());
        observer.observe(1usize, Span::new(350.0, 100.0));

        // Viewport bottom 400 shrinks to 300: not yet visible
        let entries = observer.check(viewport(0.0));
        assert!(!entries[0].is_intersecting);

        // Viewport bottom 500 shrinks to 400: 50% visible
        let entries = observer.check(viewport(100.0));
        assert!(entries[0].is_intersecting);
        assert!((entries[0].intersection_ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_leaving_viewport_is_reported() {
        let mut observer = VisibilityObserver::new(ObserverOptions::default());
        observer.observe("a", Span::new(0.0, 100.0));
        observer.check(viewport(0.0));

        let entries = observer.check(viewport(500.0));
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_intersecting);
    }

    #[test]
    fn test_unobserve_stops_reports() {
        let mut observer = VisibilityObserver::new(ObserverOptions::default());
        observer.observe("img", Span::new(0.0, 50.0));
        observer.unobserve(&"img");

        assert!(observer.is_empty());
        assert!(observer.check(viewport(0.0)).is_empty());
    }

    #[test]
    fn test_reobserve_keeps_history() {
        let mut observer = VisibilityObserver::new(ObserverOptions::default());
        observer.observe("a", Span::new(0.0, 100.0));
        observer.check(viewport(0.0));

        observer.observe("a", Span::new(10.0, 100.0));
        assert_eq!(observer.len(), 1);
        assert!(observer.check(viewport(0.0)).is_empty());
    }
}
