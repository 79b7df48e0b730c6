//! Shared layout geometry: device-space rectangles and margins.

use serde::{Deserialize, Serialize};

/// A rectangle in device coordinates with a bottom-left origin, matching
/// the GL convention the rendering backend works in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.left() && px <= self.right() && py >= self.bottom() && py <= self.top()
    }

    /// Whether the rectangle is large enough to draw into at all.
    pub fn is_drawable(&self) -> bool {
        self.width > 1.0 && self.height > 1.0
    }
}

/// Fixed margins around a layout region.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Margin {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn set_all(&mut self, value: f32) {
        self.left = value;
        self.right = value;
        self.top = value;
        self.bottom = value;
    }

    /// Shrink a rectangle by these margins.
    pub fn apply(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x + self.left,
            rect.y + self.bottom,
            rect.width - (self.left + self.right),
            rect.height - (self.top + self.bottom),
        )
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            left: 10.0,
            right: 10.0,
            top: 5.0,
            bottom: 5.0,
        }
    }
}

/// A point in device coordinates (bottom-left origin).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DevicePoint {
    pub x: f32,
    pub y: f32,
}

impl DevicePoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
