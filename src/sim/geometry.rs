//! Extents and centered shapes
//!
//! Every shape is positioned by its CENTER, never by a corner. Positions and
//! displacements are plain `glam::Vec2` values.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned extent of a shape
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn square(side: f32) -> Self {
        Self::new(side, side)
    }

    /// Half extents as a vector (distance from center to edge per axis)
    #[inline]
    pub fn half(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Which overlap formula applies to a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Square,
}

/// A centered shape used for overlap tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub pos: Vec2,
    pub size: Size,
}

impl Shape {
    pub fn new(kind: ShapeKind, pos: Vec2, size: Size) -> Self {
        Self { kind, pos, size }
    }

    /// Same shape moved to another center
    pub fn at(&self, pos: Vec2) -> Self {
        Self { pos, ..*self }
    }

    /// Circle radius; sizes are assumed symmetric so the width is used
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.width / 2.0
    }

    pub fn min(&self) -> Vec2 {
        self.pos - self.size.half()
    }

    pub fn max(&self) -> Vec2 {
        self.pos + self.size.half()
    }
}
