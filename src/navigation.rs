//! Scroll-synchronized navigation bar
//!
//! Keeps exactly one nav link highlighted for the section in view, slides the
//! underline indicator to match it, and switches the navbar backdrop once the
//! page has scrolled past a threshold.

use crate::types::Bounds;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub section_id: String,
}

impl NavLink {
    pub fn new(label: impl Into<String>, section_id: impl Into<String>) -> Self {
        NavLink {
            label: label.into(),
            section_id: section_id.into(),
        }
    }
}

/// Underline placement relative to the menu container
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IndicatorGeometry {
    pub left: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavbarStyle {
    /// Page near the top: light, lightly blurred backdrop
    #[default]
    Translucent,
    /// Scrolled past the threshold: dark, heavily blurred backdrop
    Solid,
}

/// Rendering surface for the navigation bar
pub trait NavSurface {
    fn set_link_active(&mut self, link: usize, active: bool);

    /// Rendered bounds of a link, if it has been laid out
    fn link_bounds(&self, link: usize) -> Option<Bounds>;

    /// Rendered bounds of the menu containing the links
    fn menu_bounds(&self) -> Option<Bounds>;

    fn place_indicator(&mut self, geometry: IndicatorGeometry);

    fn set_navbar_style(&mut self, style: NavbarStyle);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Visibility ratio a section must exceed to claim the active link
    pub activation_ratio: f64,
    /// Scroll offset in px past which the navbar turns solid
    pub navbar_threshold_px: f64,
    /// Gap left above a section when scrolling to it from a link
    pub scroll_margin_px: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        NavConfig {
            activation_ratio: 0.25,
            navbar_threshold_px: 100.0,
            scroll_margin_px: 100.0,
        }
    }
}

pub struct Navigator<S> {
    surface: S,
    config: NavConfig,
    links: Vec<NavLink>,
    by_section: HashMap<String, usize>,
    active: Option<usize>,
    navbar: NavbarStyle,
}

impl<S: NavSurface> Navigator<S> {
    /// Register the link/section pairs. They cannot change afterwards.
    pub fn new(surface: S, links: Vec<NavLink>, config: NavConfig) -> Self {
        let by_section = links
            .iter()
            .enumerate()
            .map(|(idx, link)| (link.section_id.clone(), idx))
            .collect();

        let mut navigator = Navigator {
            surface,
            config,
            links,
            by_section,
            active: None,
            navbar: NavbarStyle::default(),
        };
        navigator.surface.set_navbar_style(navigator.navbar);
        navigator.update_indicator_position();
        navigator
    }

    /// Apply a visibility report for one section
    pub fn on_section_visibility_changed(
        &mut self,
        section_id: &str,
        intersection_ratio: f64,
        is_intersecting: bool,
    ) {
        if !is_intersecting || intersection_ratio <= self.config.activation_ratio {
            return;
        }

        let Some(&link) = self.by_section.get(section_id) else {
            return;
        };

        self.activate(link);
    }

    fn activate(&mut self, link: usize) {
        for idx in 0..self.links.len() {
            self.surface.set_link_active(idx, idx == link);
        }

        if self.active != Some(link) {
            tracing::debug!(
                "Active nav link: {} -> {}",
                self.active
                    .map(|idx| self.links[idx].section_id.as_str())
                    .unwrap_or("none"),
                self.links[link].section_id
            );
        }
        self.active = Some(link);
        self.update_indicator_position();
    }

    /// Move the indicator under the active link's current geometry
    pub fn update_indicator_position(&mut self) {
        let Some(link) = self.active else {
            return;
        };

        let (Some(link_bounds), Some(menu_bounds)) =
            (self.surface.link_bounds(link), self.surface.menu_bounds())
        else {
            return;
        };

        self.surface.place_indicator(IndicatorGeometry {
            left: link_bounds.left - menu_bounds.left,
            width: link_bounds.width,
        });
    }

    /// React to a scroll tick. Returns the navbar style now in effect.
    pub fn on_scroll(&mut self, scroll_y: f64) -> NavbarStyle {
        let style = if scroll_y > self.config.navbar_threshold_px {
            NavbarStyle::Solid
        } else {
            NavbarStyle::Translucent
        };

        if style != self.navbar {
            tracing::debug!("Navbar style: {:?} at scroll {}px", style, scroll_y);
            self.navbar = style;
        }
        self.surface.set_navbar_style(style);
        self.update_indicator_position();

        style
    }

    /// Scroll position that brings a link's section into view, given the
    /// section's top edge in page pixels
    pub fn scroll_target(&self, section_top_px: f64) -> f64 {
        (section_top_px - self.config.scroll_margin_px).max(0.0)
    }

    pub fn active_link(&self) -> Option<usize> {
        self.active
    }

    pub fn active_section(&self) -> Option<&str> {
        self.active.map(|idx| self.links[idx].section_id.as_str())
    }

    pub fn navbar_style(&self) -> NavbarStyle {
        self.navbar
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
