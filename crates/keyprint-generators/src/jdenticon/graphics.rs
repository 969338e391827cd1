//! Cell-local drawing with rotation.
//!
//! Shapes are described in coordinates local to one cell. A [`Transform`]
//! places the cell on the icon and rotates it in quarter turns; [`Graphics`]
//! collects the transformed primitives in the current fill color.

use keyprint_core::{Circle, Color, Point, Polygon, Primitive, Winding};

/// Placement of one cell: top-left corner, side length, quarter turns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    x: f32,
    y: f32,
    size: f32,
    rotation: u8,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        size: 0.0,
        rotation: 0,
    };

    pub fn new(x: f32, y: f32, size: f32, rotation: u8) -> Self {
        Self {
            x,
            y,
            size,
            rotation: rotation % 4,
        }
    }

    /// Map the top-left corner of a `w × h` box at local `(x, y)` to icon
    /// space.
    pub fn transform_point(&self, x: f32, y: f32, w: f32, h: f32) -> Point {
        let right = self.x + self.size;
        let bottom = self.y + self.size;
        match self.rotation {
            1 => Point::new(right - y - h, self.y + x),
            2 => Point::new(right - x - w, bottom - y - h),
            3 => Point::new(self.x + y, bottom - x - w),
            _ => Point::new(self.x + x, self.y + y),
        }
    }
}

/// Accumulates primitives for the shapes drawn into it.
#[derive(Debug)]
pub struct Graphics {
    transform: Transform,
    color: Color,
    primitives: Vec<Primitive>,
}

impl Graphics {
    pub fn new() -> Self {
        Self {
            transform: Transform::IDENTITY,
            color: Color::BLACK,
            primitives: Vec::new(),
        }
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Polygon from flat `[x0, y0, x1, y1, ...]` local coordinates.
    ///
    /// `invert` traces the points backwards, cutting a hole.
    pub fn add_polygon(&mut self, coords: &[f32], invert: bool) {
        let mut points: Vec<Point> = coords
            .chunks_exact(2)
            .map(|xy| self.transform.transform_point(xy[0], xy[1], 0.0, 0.0))
            .collect();
        if invert {
            points.reverse();
        }
        self.primitives
            .push(Polygon::new(points, self.color).into());
    }

    /// Circle whose bounding box has top-left `(x, y)` and side `size`.
    pub fn add_circle(&mut self, x: f32, y: f32, size: f32, invert: bool) {
        let corner = self.transform.transform_point(x, y, size, size);
        let radius = size / 2.0;
        self.primitives.push(
            Circle {
                position: Point::new(corner.x + radius, corner.y + radius),
                radius,
                color: self.color,
                winding: if invert {
                    Winding::CounterClockwise
                } else {
                    Winding::Clockwise
                },
            }
            .into(),
        );
    }

    pub fn add_rectangle(&mut self, x: f32, y: f32, w: f32, h: f32, invert: bool) {
        self.add_polygon(&[x, y, x + w, y, x + w, y + h, x, y + h], invert);
    }

    /// Right triangle filling half of a box; `r` picks the dropped corner.
    pub fn add_triangle(&mut self, x: f32, y: f32, w: f32, h: f32, r: usize, invert: bool) {
        let mut coords = vec![x + w, y, x + w, y + h, x, y + h, x, y];
        let dropped = (r % 4) * 2;
        coords.drain(dropped..dropped + 2);
        self.add_polygon(&coords, invert);
    }

    pub fn add_rhombus(&mut self, x: f32, y: f32, w: f32, h: f32, invert: bool) {
        self.add_polygon(
            &[
                x + w / 2.0,
                y,
                x + w,
                y + h / 2.0,
                x + w / 2.0,
                y + h,
                x,
                y + h / 2.0,
            ],
            invert,
        );
    }

    /// Everything drawn so far, in draw order.
    pub fn into_primitives(self) -> Vec<Primitive> {
        self.primitives
    }
}

impl Default for Graphics {
    fn default() -> Self {
        Self::new()
    }
}
