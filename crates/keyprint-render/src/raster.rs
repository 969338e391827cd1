//! Raster backend: an RGBA pixel buffer.
//!
//! Every output pixel is split into `supersample × supersample` sample
//! points. Each sample starts from the background, then each color group
//! is painted over it (source-over) where its winding number is nonzero.
//! The samples are averaged in premultiplied space.
//!
//! Work is done one sample row at a time: only the primitives whose
//! bounds cross that row are tested, and each group is skipped outside
//! the horizontal span its crossing members cover. Large outputs lower
//! the samples per pixel so a render never exceeds [`MAX_SAMPLES`].

use std::collections::BTreeMap;

use keyprint_core::{Background, Color, Primitive, Scene};
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};
use crate::traits::Renderer;

/// Largest accepted output width or height.
pub const MAX_DIMENSION: u32 = 8192;

/// Largest accepted supersampling factor.
pub const MAX_SUPERSAMPLE: u32 = 16;

/// Upper bound on sample points per render, above one sample per pixel.
pub const MAX_SAMPLES: u64 = 1 << 22;

/// Samples per axis used for a `width × height` output.
///
/// The requested factor is clamped to `1..=16`, then lowered until the
/// total sample count fits in [`MAX_SAMPLES`]. It never drops below one.
pub fn effective_supersample(requested: u32, width: u32, height: u32) -> u32 {
    let pixels = u64::from(width) * u64::from(height);
    let mut n = requested.clamp(1, MAX_SUPERSAMPLE);
    while n > 1 && pixels * u64::from(n * n) > MAX_SAMPLES {
        n -= 1;
    }
    n
}

/// Options for [`RasterRenderer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterOptions {
    /// Output width; the scene size when unset.
    pub width: Option<u32>,
    /// Output height; the scene size when unset.
    pub height: Option<u32>,
    /// Samples per pixel along each axis, clamped to `1..=16` and lowered
    /// for large outputs by [`effective_supersample`].
    pub supersample: u32,
    /// Clear everything outside the inscribed circle.
    pub round_clip: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            supersample: 4,
            round_clip: false,
        }
    }
}

/// A `width × height` RGBA buffer, row-major, 4 bytes per pixel.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Bitmap {
    /// Color of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let i = ((y * self.width + x) * 4) as usize;
        Color::rgba(
            self.rgba[i],
            self.rgba[i + 1],
            self.rgba[i + 2],
            self.rgba[i + 3],
        )
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.rgba
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.rgba
    }
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bitmap({}x{}, {} bytes)", self.width, self.height, self.rgba.len())
    }
}

/// Renders scenes into [`Bitmap`]s.
#[derive(Debug, Clone, Default)]
pub struct RasterRenderer {
    options: RasterOptions,
}

/// Premultiplied RGBA in `[0, 1]`.
type Premul = [f32; 4];

/// Paint `color` over `dst` (source-over).
fn blend(dst: Premul, color: Color) -> Premul {
    let a = f32::from(color.a) / 255.0;
    let src = [
        f32::from(color.r) / 255.0 * a,
        f32::from(color.g) / 255.0 * a,
        f32::from(color.b) / 255.0 * a,
        a,
    ];
    let keep = 1.0 - a;
    [
        src[0] + dst[0] * keep,
        src[1] + dst[1] * keep,
        src[2] + dst[2] * keep,
        src[3] + dst[3] * keep,
    ]
}

/// Convert an averaged premultiplied sample back to straight 8-bit RGBA.
fn unpremultiply(p: Premul) -> [u8; 4] {
    let to_u8 = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
    if p[3] <= 0.0 {
        return [0, 0, 0, 0];
    }
    [
        to_u8(p[0] / p[3]),
        to_u8(p[1] / p[3]),
        to_u8(p[2] / p[3]),
        to_u8(p[3]),
    ]
}

/// Axis-aligned bounds of a primitive: `[min_x, min_y, max_x, max_y]`.
fn bounds(primitive: &Primitive) -> [f32; 4] {
    match primitive {
        Primitive::Circle(c) => [
            c.position.x - c.radius,
            c.position.y - c.radius,
            c.position.x + c.radius,
            c.position.y + c.radius,
        ],
        Primitive::Polygon(p) => p.points.iter().fold(
            [f32::MAX, f32::MAX, f32::MIN, f32::MIN],
            |[x0, y0, x1, y1], pt| [x0.min(pt.x), y0.min(pt.y), x1.max(pt.x), y1.max(pt.y)],
        ),
    }
}

/// Primitives of one fill color, with their bounds and the union of them.
struct ColorGroup<'a> {
    color: Color,
    bounds: [f32; 4],
    members: Vec<(&'a Primitive, [f32; 4])>,
}

impl<'a> ColorGroup<'a> {
    /// The members whose bounds cross row `y`, or `None` if none do.
    fn row(&self, y: f32) -> Option<RowGroup<'a>> {
        if y < self.bounds[1] || y > self.bounds[3] {
            return None;
        }
        let members: Vec<_> = self
            .members
            .iter()
            .filter(|(_, b)| y >= b[1] && y <= b[3])
            .map(|&(p, b)| (p, b[0], b[2]))
            .collect();
        if members.is_empty() {
            return None;
        }
        let min_x = members.iter().map(|m| m.1).fold(f32::MAX, f32::min);
        let max_x = members.iter().map(|m| m.2).fold(f32::MIN, f32::max);
        Some(RowGroup {
            color: self.color,
            min_x,
            max_x,
            members,
        })
    }
}

/// A color group restricted to one sample row.
struct RowGroup<'a> {
    color: Color,
    min_x: f32,
    max_x: f32,
    members: Vec<(&'a Primitive, f32, f32)>,
}

impl RowGroup<'_> {
    fn covers(&self, x: f32, y: f32) -> bool {
        if x < self.min_x || x > self.max_x {
            return false;
        }
        let winding: i32 = self
            .members
            .iter()
            .filter(|(_, x0, x1)| x >= *x0 && x <= *x1)
            .map(|(p, _, _)| p.winding_at(x, y))
            .sum();
        winding != 0
    }
}

/// Group visible primitives by color string, in ascending order.
fn color_groups(scene: &Scene) -> Vec<ColorGroup<'_>> {
    let mut groups: BTreeMap<String, ColorGroup<'_>> = BTreeMap::new();
    for primitive in &scene.primitives {
        let color = primitive.color();
        if color.is_transparent() {
            continue;
        }
        let b = bounds(primitive);
        let group = groups.entry(color.to_hex()).or_insert_with(|| ColorGroup {
            color,
            bounds: [f32::MAX, f32::MAX, f32::MIN, f32::MIN],
            members: Vec::new(),
        });
        group.bounds = [
            group.bounds[0].min(b[0]),
            group.bounds[1].min(b[1]),
            group.bounds[2].max(b[2]),
            group.bounds[3].max(b[3]),
        ];
        group.members.push((primitive, b));
    }
    groups.into_values().collect()
}

/// The background alone at one sample point.
fn background_at(background: Background, x: f32, y: f32, size: f32) -> Premul {
    match background {
        Background::Fill(c) => blend([0.0; 4], c),
        Background::Disc(c) if inside_disc(x, y, size) => blend([0.0; 4], c),
        _ => [0.0; 4],
    }
}

fn inside_disc(x: f32, y: f32, size: f32) -> bool {
    let r = size / 2.0;
    let (dx, dy) = (x - r, y - r);
    dx * dx + dy * dy <= r * r
}

impl RasterRenderer {
    pub fn new(options: RasterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RasterOptions {
        &self.options
    }

    fn dimensions(&self, scene: &Scene) -> Result<(u32, u32)> {
        let width = self.options.width.unwrap_or(scene.size);
        let height = self.options.height.unwrap_or(scene.size);
        let valid = |d: u32| (1..=MAX_DIMENSION).contains(&d);
        if scene.size == 0 {
            return Err(RenderError::ZeroSize);
        }
        if !valid(width) || !valid(height) {
            return Err(RenderError::InvalidDimensions {
                width,
                height,
                max: MAX_DIMENSION,
            });
        }
        Ok((width, height))
    }
}

impl Renderer for RasterRenderer {
    type Output = Bitmap;

    fn render(&self, scene: &Scene) -> Result<Bitmap> {
        let (width, height) = self.dimensions(scene)?;
        let n = effective_supersample(self.options.supersample, width, height);
        let groups = color_groups(scene);
        let size = scene.size as f32;
        let scale_x = size / width as f32;
        let scale_y = size / height as f32;
        let weight = 1.0 / (n * n) as f32;

        tracing::debug!(
            width,
            height,
            supersample = n,
            groups = groups.len(),
            "rasterizing scene"
        );

        let mut rgba = Vec::with_capacity((width as usize) * (height as usize) * 4);
        let mut row: Vec<Premul> = vec![[0.0; 4]; width as usize];
        for py in 0..height {
            row.fill([0.0; 4]);
            for sy in 0..n {
                let y = (py as f32 + (sy as f32 + 0.5) / n as f32) * scale_y;
                let active: Vec<RowGroup<'_>> = groups.iter().filter_map(|g| g.row(y)).collect();

                for (px, acc) in row.iter_mut().enumerate() {
                    for sx in 0..n {
                        let x = (px as f32 + (sx as f32 + 0.5) / n as f32) * scale_x;
                        if self.options.round_clip && !inside_disc(x, y, size) {
                            continue;
                        }

                        let mut sample = background_at(scene.background, x, y, size);
                        for group in &active {
                            if group.covers(x, y) {
                                sample = blend(sample, group.color);
                            }
                        }
                        for (a, s) in acc.iter_mut().zip(sample) {
                            *a += s * weight;
                        }
                    }
                }
            }
            for acc in &row {
                rgba.extend_from_slice(&unpremultiply(*acc));
            }
        }

        Ok(Bitmap {
            width,
            height,
            rgba,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyprint_core::{Circle, Point, Polygon, Winding};
    use proptest::prelude::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    fn render(scene: &Scene, options: RasterOptions) -> Bitmap {
        RasterRenderer::new(options).render(scene).unwrap()
    }

    fn sharp() -> RasterOptions {
        RasterOptions {
            supersample: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_buffer_size() {
        let scene = Scene::new(10, Background::None, vec![]);
        let bitmap = render(&scene, RasterOptions::default());
        assert_eq!(bitmap.width, 10);
        assert_eq!(bitmap.height, 10);
        assert_eq!(bitmap.rgba.len(), 400);
        assert!(bitmap.rgba.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_fill_background() {
        let scene = Scene::new(4, Background::Fill(BLUE), vec![]);
        let bitmap = render(&scene, sharp());
        assert_eq!(bitmap.pixel(0, 0), BLUE);
        assert_eq!(bitmap.pixel(3, 3), BLUE);
    }

    #[test]
    fn test_disc_background_leaves_corners_clear() {
        let scene = Scene::new(20, Background::Disc(BLUE), vec![]);
        let bitmap = render(&scene, sharp());
        assert_eq!(bitmap.pixel(0, 0), Color::TRANSPARENT);
        assert_eq!(bitmap.pixel(10, 10), BLUE);
    }

    #[test]
    fn test_rect_cells_are_exact() {
        let scene = Scene::new(
            4,
            Background::Fill(BLUE),
            vec![Polygon::rect(1.0, 1.0, 2.0, 2.0, RED).into()],
        );
        let bitmap = render(&scene, RasterOptions::default());
        assert_eq!(bitmap.pixel(1, 1), RED);
        assert_eq!(bitmap.pixel(2, 2), RED);
        assert_eq!(bitmap.pixel(0, 0), BLUE);
        assert_eq!(bitmap.pixel(3, 2), BLUE);
    }

    #[test]
    fn test_hole_shows_background() {
        let mut hole = Circle::new(Point::new(5.0, 5.0), 2.0, RED);
        hole.winding = Winding::CounterClockwise;
        let scene = Scene::new(
            10,
            Background::Fill(BLUE),
            vec![Polygon::rect(0.0, 0.0, 10.0, 10.0, RED).into(), hole.into()],
        );
        let bitmap = render(&scene, sharp());
        assert_eq!(bitmap.pixel(5, 5), BLUE);
        assert_eq!(bitmap.pixel(0, 0), RED);
    }

    #[test]
    fn test_groups_painted_in_color_order() {
        // "#0000ff" sorts before "#ff0000", so red ends on top
        let scene = Scene::new(
            4,
            Background::None,
            vec![
                Polygon::rect(0.0, 0.0, 4.0, 4.0, RED).into(),
                Polygon::rect(0.0, 0.0, 4.0, 4.0, BLUE).into(),
            ],
        );
        let bitmap = render(&scene, sharp());
        assert_eq!(bitmap.pixel(2, 2), RED);
    }

    #[test]
    fn test_edge_pixels_are_blended() {
        let scene = Scene::new(
            2,
            Background::None,
            vec![Polygon::rect(0.0, 0.0, 1.5, 2.0, RED).into()],
        );
        let bitmap = render(&scene, RasterOptions::default());
        let edge = bitmap.pixel(1, 0);
        assert_eq!((edge.r, edge.g, edge.b), (255, 0, 0));
        assert_eq!(edge.a, 128);
    }

    #[test]
    fn test_target_dimensions_scale_scene() {
        let scene = Scene::new(
            4,
            Background::None,
            vec![Polygon::rect(0.0, 0.0, 2.0, 4.0, RED).into()],
        );
        let bitmap = render(
            &scene,
            RasterOptions {
                width: Some(8),
                height: Some(2),
                supersample: 1,
                round_clip: false,
            },
        );
        assert_eq!((bitmap.width, bitmap.height), (8, 2));
        assert_eq!(bitmap.pixel(3, 1), RED);
        assert_eq!(bitmap.pixel(4, 1), Color::TRANSPARENT);
    }

    #[test]
    fn test_round_clip() {
        let scene = Scene::new(20, Background::Fill(BLUE), vec![]);
        let bitmap = render(
            &scene,
            RasterOptions {
                supersample: 1,
                round_clip: true,
                ..Default::default()
            },
        );
        assert_eq!(bitmap.pixel(0, 0), Color::TRANSPARENT);
        assert_eq!(bitmap.pixel(19, 0), Color::TRANSPARENT);
        assert_eq!(bitmap.pixel(10, 10), BLUE);
    }

    #[test]
    fn test_transparent_primitives_draw_nothing() {
        let scene = Scene::new(
            4,
            Background::Fill(BLUE),
            vec![Polygon::rect(0.0, 0.0, 4.0, 4.0, Color::TRANSPARENT).into()],
        );
        assert_eq!(render(&scene, sharp()).pixel(1, 1), BLUE);
    }

    #[test]
    fn test_invalid_dimensions() {
        let scene = Scene::new(0, Background::None, vec![]);
        assert_eq!(
            RasterRenderer::default().render(&scene),
            Err(RenderError::ZeroSize)
        );

        let scene = Scene::new(8, Background::None, vec![]);
        let renderer = RasterRenderer::new(RasterOptions {
            width: Some(MAX_DIMENSION + 1),
            ..Default::default()
        });
        assert!(matches!(
            renderer.render(&scene),
            Err(RenderError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_effective_supersample() {
        assert_eq!(effective_supersample(4, 64, 64), 4);
        assert_eq!(effective_supersample(4, 512, 512), 4);
        assert_eq!(effective_supersample(4, 1024, 1024), 2);
        assert_eq!(effective_supersample(4, 4096, 4096), 1);
        assert_eq!(effective_supersample(0, 8, 8), 1);
        assert_eq!(effective_supersample(100, 8, 8), MAX_SUPERSAMPLE);
        assert_eq!(effective_supersample(16, MAX_DIMENSION, MAX_DIMENSION), 1);
    }

    #[test]
    fn test_disjoint_members_of_one_color() {
        // Two red squares on one row leave the gap between them unpainted
        let scene = Scene::new(
            9,
            Background::Fill(BLUE),
            vec![
                Polygon::rect(0.0, 3.0, 3.0, 3.0, RED).into(),
                Polygon::rect(6.0, 3.0, 3.0, 3.0, RED).into(),
            ],
        );
        let bitmap = render(&scene, RasterOptions::default());
        assert_eq!(bitmap.pixel(1, 4), RED);
        assert_eq!(bitmap.pixel(4, 4), BLUE);
        assert_eq!(bitmap.pixel(7, 4), RED);
        assert_eq!(bitmap.pixel(4, 0), BLUE);
        assert_eq!(bitmap.pixel(1, 7), BLUE);
    }

    #[test]
    fn test_large_render_is_bounded() {
        let circles: Vec<Primitive> = (0..19)
            .map(|i| {
                let (x, y) = ((i % 5) as f32 * 200.0 + 112.0, (i / 5) as f32 * 250.0 + 140.0);
                let color = if i % 2 == 0 { RED } else { BLUE };
                Circle::new(Point::new(x, y), 96.0, color).into()
            })
            .collect();
        let scene = Scene::new(1024, Background::Disc(Color::rgb(238, 238, 238)), circles);

        let start = std::time::Instant::now();
        let bitmap = render(&scene, RasterOptions::default());
        let elapsed = start.elapsed();

        assert_eq!(bitmap.rgba.len(), 1024 * 1024 * 4);
        assert_eq!(bitmap.pixel(112, 140), RED);
        assert!(
            elapsed < std::time::Duration::from_secs(2),
            "1024px render took {elapsed:?}"
        );
    }

    proptest! {
        #[test]
        fn test_bitmap_len_matches_dimensions(
            size in 1u32..48,
            width in 1u32..64,
            height in 1u32..64,
            supersample in 0u32..6,
        ) {
            let scene = Scene::new(
                size,
                Background::Fill(BLUE),
                vec![Polygon::rect(0.0, 0.0, size as f32 / 2.0, size as f32, RED).into()],
            );
            let bitmap = render(&scene, RasterOptions {
                width: Some(width),
                height: Some(height),
                supersample,
                round_clip: false,
            });
            prop_assert_eq!((bitmap.width, bitmap.height), (width, height));
            prop_assert_eq!(bitmap.rgba.len(), (width * height * 4) as usize);
            // Background and rect are both opaque
            prop_assert!(bitmap.rgba.chunks(4).all(|px| px[3] == 255));
        }
    }

    #[test]
    fn test_options_serde_defaults() {
        let options: RasterOptions = serde_json::from_str(r#"{"round_clip": true}"#).unwrap();
        assert!(options.round_clip);
        assert_eq!(options.supersample, 4);
        assert_eq!(options.width, None);
    }
}
