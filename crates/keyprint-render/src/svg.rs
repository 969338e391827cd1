//! Vector backend: SVG markup.
//!
//! Shapes are accumulated into one [`SvgPath`] per fill color. Polygons
//! become closed `M … L … Z` sub-paths and circles become two opposing
//! arcs, so holes work through the nonzero fill rule exactly as in the
//! raster backend.

use std::collections::BTreeMap;
use std::fmt;

use keyprint_core::{parse_fill_or_black, Background, Circle, Color, Polygon, Primitive, Scene, Winding};

use crate::error::{RenderError, Result};
use crate::traits::Renderer;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

fn round_tenth(value: f32) -> f64 {
    (f64::from(value) * 10.0 + 0.5).floor() / 10.0
}

/// Format a coordinate rounded to one decimal, without trailing zeros.
pub fn svg_value(value: f32) -> String {
    round_tenth(value).to_string()
}

/// Path data for a single fill color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvgPath {
    data: String,
}

impl SvgPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a closed polygon.
    pub fn add_polygon(&mut self, polygon: &Polygon) {
        let mut points = polygon.points.iter();
        let Some(first) = points.next() else {
            return;
        };
        self.data.push('M');
        self.push_point(first.x, first.y);
        for point in points {
            self.data.push('L');
            self.push_point(point.x, point.y);
        }
        self.data.push('Z');
    }

    /// Append a circle as two half-circle arcs.
    pub fn add_circle(&mut self, circle: &Circle) {
        let sweep = match circle.winding {
            Winding::Clockwise => 1,
            Winding::CounterClockwise => 0,
        };
        let radius = svg_value(circle.radius);
        let diameter = round_tenth(circle.radius * 2.0);
        let arc = format!("a{radius},{radius} 0 1,{sweep} ");

        self.data.push('M');
        self.push_point(circle.position.x - circle.radius, circle.position.y);
        self.data.push_str(&arc);
        self.data.push_str(&format!("{diameter},0"));
        self.data.push_str(&arc);
        // 0.0 - x keeps a zero diameter from printing as "-0"
        self.data.push_str(&format!("{},0", 0.0 - diameter));
    }

    pub fn add(&mut self, primitive: &Primitive) {
        match primitive {
            Primitive::Circle(c) => self.add_circle(c),
            Primitive::Polygon(p) => self.add_polygon(p),
        }
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn push_point(&mut self, x: f32, y: f32) {
        self.data.push_str(&svg_value(x));
        self.data.push(' ');
        self.data.push_str(&svg_value(y));
    }
}

/// Merged paths keyed by color string.
///
/// Iteration is in ascending color-string order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeSet {
    paths: BTreeMap<String, (Color, SvgPath)>,
}

impl ShapeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every visible primitive of a scene.
    pub fn from_scene(scene: &Scene) -> Self {
        let mut set = Self::new();
        for primitive in &scene.primitives {
            set.add(primitive);
        }
        set
    }

    /// Append a primitive to the path of its color. Fully transparent
    /// primitives are dropped.
    pub fn add(&mut self, primitive: &Primitive) {
        let color = primitive.color();
        if color.is_transparent() {
            return;
        }
        self.paths
            .entry(color.to_hex())
            .or_insert_with(|| (color, SvgPath::new()))
            .1
            .add(primitive);
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// `(color, path)` pairs in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&Color, &SvgPath)> {
        self.paths.values().map(|(c, p)| (c, p))
    }
}

/// Finished SVG markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocument {
    size: u32,
    markup: String,
}

impl SvgDocument {
    /// Side length of the viewBox.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn as_str(&self) -> &str {
        &self.markup
    }

    pub fn into_string(self) -> String {
        self.markup
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.markup)
    }
}

/// Renders scenes into [`SvgDocument`]s.
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    background: Option<String>,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the scene background with a fill-color string.
    ///
    /// The string is parsed at render time; a malformed value renders as
    /// opaque black and a fully transparent one omits the background.
    pub fn with_background(mut self, fill: &str) -> Self {
        self.background = Some(fill.to_string());
        self
    }

    fn background(&self, scene: &Scene) -> Background {
        match &self.background {
            Some(fill) => Background::Fill(parse_fill_or_black(fill)),
            None => scene.background,
        }
    }
}

/// `fill` plus an opacity attribute when the color is not opaque.
fn fill_attrs(color: &Color, opacity_attr: &str) -> String {
    if color.is_opaque() {
        format!("fill=\"{}\"", color.to_rgb_hex())
    } else {
        format!(
            "fill=\"{}\" {}=\"{:.2}\"",
            color.to_rgb_hex(),
            opacity_attr,
            color.opacity()
        )
    }
}

impl Renderer for SvgRenderer {
    type Output = SvgDocument;

    fn render(&self, scene: &Scene) -> Result<SvgDocument> {
        let size = scene.size;
        if size == 0 {
            return Err(RenderError::ZeroSize);
        }

        let mut markup = format!(
            "<svg xmlns=\"{SVG_NS}\" width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\">"
        );

        match self.background(scene) {
            Background::Fill(c) if !c.is_transparent() => {
                markup.push_str(&format!(
                    "<rect width=\"100%\" height=\"100%\" fill=\"{}\" opacity=\"{:.2}\"/>",
                    c.to_rgb_hex(),
                    c.opacity()
                ));
            }
            Background::Disc(c) if !c.is_transparent() => {
                let half = svg_value(size as f32 / 2.0);
                markup.push_str(&format!(
                    "<circle cx=\"{half}\" cy=\"{half}\" r=\"{half}\" {}/>",
                    fill_attrs(&c, "fill-opacity")
                ));
            }
            _ => {}
        }

        let shapes = ShapeSet::from_scene(scene);
        tracing::debug!(size, paths = shapes.len(), "writing svg");

        for (color, path) in shapes.iter() {
            markup.push_str(&format!(
                "<path {} d=\"{}\"/>",
                fill_attrs(color, "fill-opacity"),
                path.data()
            ));
        }
        markup.push_str("</svg>");

        Ok(SvgDocument { size, markup })
    }
}
