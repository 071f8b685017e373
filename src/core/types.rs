use serde::{Deserialize, Serialize};

/// Pixel size of the drawing surface, reported by the renderer every pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn translated_x(self, dx: f64) -> Self {
        Self::new(self.x + dx, self.y)
    }
}

/// Axis-aligned pixel rectangle. `right`/`bottom` are exclusive edges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        (self.right - self.left).max(0.0)
    }

    #[must_use]
    pub fn height(self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }

    /// A rectangle with no drawable area, including inverted and NaN edges.
    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.right > self.left && self.bottom > self.top)
    }

    #[must_use]
    pub fn contains_x(self, x: f64) -> bool {
        x >= self.left && x <= self.right
    }

    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        self.contains_x(point.x) && point.y >= self.top && point.y <= self.bottom
    }

    #[must_use]
    pub fn center_x(self) -> f64 {
        (self.left + self.right) / 2.0
    }

    /// Shrinks the rectangle by the given insets, never producing negative size.
    #[must_use]
    pub fn inset(self, start: f64, top: f64, end: f64, bottom: f64) -> Self {
        let left = self.left + start;
        let top = self.top + top;
        let right = (self.right - end).max(left);
        let bottom = (self.bottom - bottom).max(top);
        Self::new(left, top, right, bottom)
    }
}
