//! Retained render state the effects draw into
//!
//! The smoke effect and the navigator only issue parameters; these surfaces
//! keep them until the next frame is drawn.

use crate::navigation::{IndicatorGeometry, NavSurface, NavbarStyle};
use crate::smoke::{Particle, ParticleId, ParticleSurface};
use crate::types::{Bounds, CellMetrics, Point};
use ratatui::text::Span;
use std::collections::BTreeMap;

/// Live smoke sprites, keyed (and so drawn) in spawn order
#[derive(Debug, Default)]
pub struct ParticleLayer {
    sprites: BTreeMap<ParticleId, Particle>,
}

impl ParticleLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sprites(&self) -> impl Iterator<Item = &Particle> {
        self.sprites.values()
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

impl ParticleSurface for ParticleLayer {
    fn append_particle(&mut self, particle: &Particle) {
        self.sprites.insert(particle.id, particle.clone());
    }

    fn remove_particle(&mut self, id: ParticleId) {
        self.sprites.remove(&id);
    }
}

/// Navbar geometry and styling as last measured and set
#[derive(Debug)]
pub struct NavBar {
    active: Vec<bool>,
    link_bounds: Vec<Bounds>,
    menu_bounds: Option<Bounds>,
    indicator: Option<IndicatorGeometry>,
    style: NavbarStyle,
}

impl NavBar {
    pub fn new(link_count: usize) -> Self {
        NavBar {
            active: vec![false; link_count],
            link_bounds: Vec::new(),
            menu_bounds: None,
            indicator: None,
            style: NavbarStyle::default(),
        }
    }

    /// Lay the link labels out right-aligned on the navbar's first row.
    /// Links that do not fit are left unmeasured.
    pub fn measure(&mut self, labels: &[&str], width: u16, metrics: &CellMetrics) {
        let widths: Vec<u16> = labels
            .iter()
            .map(|label| Span::raw(*label).width() as u16 + 2)
            .collect();
        let total: u16 = widths.iter().sum::<u16>() + widths.len().saturating_sub(1) as u16;

        self.link_bounds.clear();
        if total + 2 > width {
            self.menu_bounds = None;
            return;
        }

        let menu_left = width - total - 1;
        self.menu_bounds = Some(Bounds::new(
            metrics.columns_to_px(menu_left),
            0.0,
            metrics.columns_to_px(total),
            metrics.cell_height_px,
        ));

        let mut column = menu_left;
        for link_width in widths {
            self.link_bounds.push(Bounds::new(
                metrics.columns_to_px(column),
                0.0,
                metrics.columns_to_px(link_width),
                metrics.cell_height_px,
            ));
            column += link_width + 1;
        }
    }

    /// Link under a pointer position, if any
    pub fn link_at(&self, point: Point) -> Option<usize> {
        self.link_bounds.iter().position(|b| b.contains(point))
    }

    pub fn is_active(&self, link: usize) -> bool {
        self.active.get(link).copied().unwrap_or(false)
    }

    pub fn bounds(&self, link: usize) -> Option<Bounds> {
        self.link_bounds.get(link).copied()
    }

    pub fn menu(&self) -> Option<Bounds> {
        self.menu_bounds
    }

    pub fn indicator(&self) -> Option<IndicatorGeometry> {
        self.indicator
    }

    pub fn style(&self) -> NavbarStyle {
        self.style
    }
}

impl NavSurface for NavBar {
    fn set_link_active(&mut self, link: usize, active: bool) {
        if let Some(flag) = self.active.get_mut(link) {
            *flag = active;
        }
    }

    fn link_bounds(&self, link: usize) -> Option<Bounds> {
        self.bounds(link)
    }

    fn menu_bounds(&self) -> Option<Bounds> {
        self.menu_bounds
    }

    fn place_indicator(&mut self, geometry: IndicatorGeometry) {
        self.indicator = Some(geometry);
    }

    fn set_navbar_style(&mut self, style: NavbarStyle) {
        self.style = style;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_are_right_aligned_with_gaps() {
        let metrics = CellMetrics::default();
        let mut nav = NavBar::new(2);
        nav.measure(&["Home", "About"], 80, &metrics);

        // " Home " + gap + " About " = 6 + 1 + 7 columns ending one column short of the edge
        let menu = nav.menu().unwrap();
        assert_eq!(menu.left, metrics.columns_to_px(80 - 14 - 1));
        assert_eq!(menu.width, metrics.columns_to_px(14));

        let home = nav.bounds(0).unwrap();
        let about = nav.bounds(1).unwrap();
        assert_eq!(home.left, menu.left);
        assert_eq!(home.width, metrics.columns_to_px(6));
        assert_eq!(about.left, home.left + metrics.columns_to_px(7));

        let inside_about = Point::new(about.left + 1.0, 4.0);
        assert_eq!(nav.link_at(inside_about), Some(1));
        assert_eq!(nav.link_at(Point::new(0.0, 4.0)), None);
    }

    #[test]
    fn test_too_narrow_leaves_links_unmeasured() {
        let mut nav = NavBar::new(1);
        nav.measure(&["A very long navigation label"], 20, &CellMetrics::default());
        assert_eq!(nav.menu(), None);
        assert_eq!(nav.bounds(0), None);
    }

    #[test]
    fn test_active_flag_out_of_range_is_ignored() {
        let mut nav = NavBar::new(1);
        nav.set_link_active(3, true);
        nav.set_link_active(0, true);
        assert!(nav.is_active(0));
        assert!(!nav.is_active(3));
    }
}
