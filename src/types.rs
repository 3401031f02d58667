use crate::navigation::NavConfig;
use crate::smoke::SmokeConfig;
use serde::{Deserialize, Serialize};

/// A position in virtual pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Axis-aligned rectangle in virtual pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Bounds {
            left,
            top,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x < self.left + self.width
            && point.y >= self.top
            && point.y < self.top + self.height
    }
}

/// Converts terminal cells to virtual pixels and back
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellMetrics {
    pub cell_width_px: f64,
    pub cell_height_px: f64,
}

impl Default for CellMetrics {
    fn default() -> Self {
        CellMetrics {
            cell_width_px: 8.0,
            cell_height_px: 16.0,
        }
    }
}

impl CellMetrics {
    /// Pixel position of the centre of a cell
    pub fn cell_center(&self, column: u16, row: u16) -> Point {
        Point {
            x: (column as f64 + 0.5) * self.cell_width_px,
            y: (row as f64 + 0.5) * self.cell_height_px,
        }
    }

    /// Cell containing a pixel position, if it is not left of or above the origin
    pub fn to_cell(&self, point: Point) -> Option<(u16, u16)> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let column = (point.x / self.cell_width_px).floor();
        let row = (point.y / self.cell_height_px).floor();
        if column > u16::MAX as f64 || row > u16::MAX as f64 {
            return None;
        }
        Some((column as u16, row as u16))
    }

    pub fn rows_to_px(&self, rows: usize) -> f64 {
        rows as f64 * self.cell_height_px
    }

    pub fn columns_to_px(&self, columns: u16) -> f64 {
        columns as f64 * self.cell_width_px
    }

    /// Whole rows covering `px`, rounding down
    pub fn px_to_rows(&self, px: f64) -> usize {
        (px.max(0.0) / self.cell_height_px).floor() as usize
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub smoke: SmokeConfig,
    pub navigation: NavConfig,
    pub cells: CellMetrics,
    pub cv_path: Option<String>,
    pub splash_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            smoke: SmokeConfig::default(),
            navigation: NavConfig::default(),
            cells: CellMetrics::default(),
            cv_path: None,
            splash_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    ContactForm,
    Help,
}

/// Terminal viewport over the page, in rows
#[derive(Debug, Clone)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    pub scroll_offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}
