//! Drawable primitives shared by every generator and renderer.
//!
//! A [`Scene`] is an immutable list of filled shapes. Renderers group
//! shapes by fill color and apply the nonzero winding rule inside each
//! group, so a counter-clockwise shape punches a hole into a same-colored
//! clockwise shape underneath it.
//!
//! Coordinates use the screen convention: origin top-left, y grows down.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::color::Color;

/// A point in icon space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Direction a closed shape is traced in (screen coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

impl Winding {
    /// Contribution to the winding number of an enclosed point.
    pub const fn sign(self) -> i32 {
        match self {
            Winding::Clockwise => 1,
            Winding::CounterClockwise => -1,
        }
    }
}

/// A filled circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center of the circle.
    pub position: Point,
    pub radius: f32,
    pub color: Color,
    pub winding: Winding,
}

impl Circle {
    /// A clockwise (solid) circle.
    pub const fn new(position: Point, radius: f32, color: Color) -> Self {
        Self {
            position,
            radius,
            color,
            winding: Winding::Clockwise,
        }
    }

    /// Winding number contribution at `(x, y)`.
    pub fn winding_at(&self, x: f32, y: f32) -> i32 {
        let dx = x - self.position.x;
        let dy = y - self.position.y;
        if dx * dx + dy * dy < self.radius * self.radius {
            self.winding.sign()
        } else {
            0
        }
    }
}

/// A filled, implicitly closed polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Point>,
    pub color: Color,
}

impl Polygon {
    pub fn new(points: Vec<Point>, color: Color) -> Self {
        Self { points, color }
    }

    /// An axis-aligned rectangle traced clockwise.
    pub fn rect(x: f32, y: f32, w: f32, h: f32, color: Color) -> Self {
        Self::new(
            vec![
                Point::new(x, y),
                Point::new(x + w, y),
                Point::new(x + w, y + h),
                Point::new(x, y + h),
            ],
            color,
        )
    }

    /// Winding number of the polygon around `(x, y)`.
    pub fn winding_at(&self, x: f32, y: f32) -> i32 {
        let n = self.points.len();
        if n < 3 {
            return 0;
        }

        let mut wn = 0;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            let side = (b.x - a.x) * (y - a.y) - (x - a.x) * (b.y - a.y);
            if a.y <= y {
                if b.y > y && side > 0.0 {
                    wn += 1;
                }
            } else if b.y <= y && side < 0.0 {
                wn -= 1;
            }
        }
        wn
    }
}

/// A drawable unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Circle(Circle),
    Polygon(Polygon),
}

impl Primitive {
    /// Fill color.
    pub fn color(&self) -> Color {
        match self {
            Primitive::Circle(c) => c.color,
            Primitive::Polygon(p) => p.color,
        }
    }

    /// Winding number contribution at `(x, y)`.
    pub fn winding_at(&self, x: f32, y: f32) -> i32 {
        match self {
            Primitive::Circle(c) => c.winding_at(x, y),
            Primitive::Polygon(p) => p.winding_at(x, y),
        }
    }
}

impl From<Circle> for Primitive {
    fn from(c: Circle) -> Self {
        Primitive::Circle(c)
    }
}

impl From<Polygon> for Primitive {
    fn from(p: Polygon) -> Self {
        Primitive::Polygon(p)
    }
}

/// What sits underneath the primitives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Background {
    /// Nothing; the icon is transparent outside its shapes.
    None,
    /// The whole square is filled.
    Fill(Color),
    /// A disc inscribed in the square is filled.
    Disc(Color),
}

/// An immutable drawing: `size × size` icon space, background, primitives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub size: u32,
    pub background: Background,
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn new(size: u32, background: Background, primitives: Vec<Primitive>) -> Self {
        Self {
            size,
            background,
            primitives,
        }
    }

    /// Distinct fill colors of the visible primitives, as sorted color
    /// strings. Fully transparent primitives draw nothing and are skipped.
    pub fn fill_colors(&self) -> BTreeSet<String> {
        self.primitives
            .iter()
            .map(Primitive::color)
            .filter(|c| !c.is_transparent())
            .map(|c| c.to_hex())
            .collect()
    }

    /// Number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}
