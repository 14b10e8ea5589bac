//! Geometry primitives for the interaction engine.
//!
//! Points come in two coordinate spaces: view space for the canvas element
//! and canvas-local space for shapes. The engine only ever adds and
//! subtracts them; zoom/scale math lives outside this crate.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub};

/// A position in whatever coordinate space is relevant to its element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Outward direction of a connector on its owning shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Axis-aligned rectangle with non-negative dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Build a rectangle from an anchor corner and the pointer's current
    /// position. Negative deltas flip the anchor corner instead of
    /// producing negative dimensions.
    pub fn from_corners(anchor: Point, current: Point) -> Self {
        let dx = current.x - anchor.x;
        let dy = current.y - anchor.y;
        Self {
            x: if dx < 0.0 { current.x } else { anchor.x },
            y: if dy < 0.0 { current.y } else { anchor.y },
            width: dx.abs(),
            height: dy.abs(),
        }
    }

    /// Point-in-region test, inclusive of edges.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}
