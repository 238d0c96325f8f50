//! Axis-aligned rectangle collision
//!
//! Screen coordinates: `x` grows right, `y` grows down, `(x, y)` is the
//! top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
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

    /// Build from a top-left position and a size
    #[inline]
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Inclusive AABB overlap: rectangles whose edges exactly touch collide.
    ///
    /// Two rectangles are apart only if one lies strictly left, right,
    /// above or below the other.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() < other.x
            || self.x > other.right()
            || self.bottom() < other.y
            || self.y > other.bottom())
    }
}

/// Does `rect` overlap any of `others`?
pub fn overlaps_any(rect: &Rect, others: impl IntoIterator<Item = Rect>) -> bool {
    others.into_iter().any(|other| rect.overlaps(&other))
}
