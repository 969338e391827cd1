//! Jdenticon identicons.
//!
//! The key is hashed to 64 hex digits. The last seven digits select a hue;
//! single digits at fixed offsets select the three theme colors and, for
//! each cell group, the shape and its starting rotation.
//!
//! The icon is a 4×4 grid of square cells inside a padding margin:
//!
//! ```text
//!   C S S C      C = corner group   (outer shape)
//!   S M M S      S = side group     (outer shape)
//!   S M M S      M = center group   (center shape)
//!   C S S C
//! ```

mod graphics;
mod shapes;
mod theme;

pub use graphics::{Graphics, Transform};
pub use shapes::{center_shape, outer_shape, CENTER_SHAPES, OUTER_SHAPES};
pub use theme::color_theme;

use keyprint_core::{parse_fill_or_black, Background, Blake3Digest, CanonicalKey, Color, Scene};
use serde::{Deserialize, Serialize};

use crate::Generator;
use theme::{CONFLICTING_SLOTS, MID_COLOR};

/// Configuration for the Jdenticon generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JdenticonConfig {
    /// Margin on each side, as a fraction of the icon size.
    pub padding: f64,
    /// Saturation of the colored theme slots.
    pub saturation: f64,
    /// Saturation of the gray theme slots.
    pub grayscale_saturation: f64,
    /// Lightness range of the colored slots.
    pub color_lightness: [f64; 2],
    /// Lightness range of the gray slots.
    pub grayscale_lightness: [f64; 2],
    /// Background fill color string (`#rgb[a]` or `#rrggbb[aa]`).
    pub background: String,
}

impl Default for JdenticonConfig {
    fn default() -> Self {
        Self {
            padding: 0.08,
            saturation: 0.5,
            grayscale_saturation: 0.0,
            color_lightness: [0.4, 0.8],
            grayscale_lightness: [0.3, 0.9],
            background: "#00000000".to_string(),
        }
    }
}

/// A shape group: which theme selection it uses, which hash digits pick
/// its shape and rotation, and which cells it covers.
struct Group {
    color: usize,
    shape_digit: usize,
    rotation_digit: Option<usize>,
    cells: &'static [(u8, u8)],
    outer: bool,
}

const GROUPS: [Group; 3] = [
    // Sides
    Group {
        color: 0,
        shape_digit: 2,
        rotation_digit: Some(3),
        cells: &[(1, 0), (2, 0), (2, 3), (1, 3), (0, 1), (3, 1), (3, 2), (0, 2)],
        outer: true,
    },
    // Corners
    Group {
        color: 1,
        shape_digit: 4,
        rotation_digit: Some(5),
        cells: &[(0, 0), (3, 0), (3, 3), (0, 3)],
        outer: true,
    },
    // Center
    Group {
        color: 2,
        shape_digit: 1,
        rotation_digit: None,
        cells: &[(1, 1), (2, 1), (2, 2), (1, 2)],
        outer: false,
    },
];

/// The 64-digit hash all selections are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconHash(String);

impl IconHash {
    /// Hash the canonical key bytes.
    pub fn of(key: &CanonicalKey) -> Self {
        Self(Blake3Digest::hash(key.as_bytes()).to_hex())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value of the single hex digit at `index`.
    pub fn digit(&self, index: usize) -> usize {
        self.0
            .as_bytes()
            .get(index)
            .and_then(|&c| (c as char).to_digit(16))
            .unwrap_or(0) as usize
    }

    /// Hue in `[0, 1]` from the last seven digits.
    pub fn hue(&self) -> f64 {
        let tail = &self.0[self.0.len().saturating_sub(7)..];
        let value = u32::from_str_radix(tail, 16).unwrap_or(0);
        f64::from(value) / f64::from(0xFFF_FFFFu32)
    }
}

/// Pick three theme slots, avoiding the conflicting pairs.
pub fn select_colors(hash: &IconHash) -> [usize; 3] {
    let mut selected: Vec<usize> = Vec::with_capacity(3);
    for i in 0..3 {
        let mut index = hash.digit(8 + i) % 5;
        let conflicts = CONFLICTING_SLOTS.iter().any(|pair| {
            pair.contains(&index) && pair.iter().any(|slot| selected.contains(slot))
        });
        if conflicts {
            index = MID_COLOR;
        }
        selected.push(index);
    }
    [selected[0], selected[1], selected[2]]
}

/// Integer layout of the cell grid within the icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub cell: u32,
    pub x: i64,
    pub y: i64,
}

impl Layout {
    pub fn new(size: u32, padding: f64) -> Self {
        let padding = (0.5 + f64::from(size) * padding.clamp(0.0, 0.5)) as u32;
        let inner = size.saturating_sub(padding * 2);
        let cell = inner / 4;
        let offset = (f64::from(padding) + f64::from(inner) / 2.0 - f64::from(cell) * 2.0) as i64;
        Self {
            cell,
            x: offset,
            y: offset,
        }
    }
}

/// Generator for Jdenticon identicons.
#[derive(Debug, Clone, Default)]
pub struct JdenticonGenerator {
    config: JdenticonConfig,
}

impl JdenticonGenerator {
    pub fn new(config: JdenticonConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &JdenticonConfig {
        &self.config
    }

    /// The theme colors actually used by the three groups.
    pub fn colors(&self, key: &CanonicalKey) -> [Color; 3] {
        let hash = IconHash::of(key);
        let theme = color_theme(hash.hue(), &self.config);
        select_colors(&hash).map(|slot| theme[slot])
    }

    fn background(&self) -> Background {
        let color = parse_fill_or_black(&self.config.background);
        if color.is_transparent() {
            Background::None
        } else {
            Background::Fill(color)
        }
    }
}

impl Generator for JdenticonGenerator {
    fn name(&self) -> &'static str {
        "jdenticon"
    }

    fn scene(&self, key: &CanonicalKey, size: u32) -> Scene {
        let hash = IconHash::of(key);
        let theme = color_theme(hash.hue(), &self.config);
        let selected = select_colors(&hash);
        let layout = Layout::new(size, self.config.padding);
        let cell = layout.cell as f32;
        tracing::debug!(hue = hash.hue(), ?selected, cell = layout.cell, "building jdenticon scene");

        let mut g = Graphics::new();
        for group in GROUPS.iter() {
            let shape = hash.digit(group.shape_digit);
            let mut rotation = group.rotation_digit.map(|d| hash.digit(d)).unwrap_or(0);

            g.set_color(theme[selected[group.color]]);
            for (position, &(col, row)) in group.cells.iter().enumerate() {
                g.set_transform(Transform::new(
                    layout.x as f32 + f32::from(col) * cell,
                    layout.y as f32 + f32::from(row) * cell,
                    cell,
                    (rotation % 4) as u8,
                ));
                rotation += 1;

                if group.outer {
                    outer_shape(shape, &mut g, cell);
                } else {
                    center_shape(shape, &mut g, cell, position);
                }
            }
        }

        Scene::new(size, self.background(), g.into_primitives())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hash(s: &str) -> IconHash {
        IconHash(s.to_string())
    }

    #[test]
    fn test_hue_from_last_seven_digits() {
        let h = hash(&format!("{}{}", "0".repeat(57), "fffffff"));
        assert_eq!(h.hue(), 1.0);
        let h = hash(&"0".repeat(64));
        assert_eq!(h.hue(), 0.0);
    }

    #[test]
    fn test_digit() {
        let h = hash("0a9f");
        assert_eq!(h.digit(1), 10);
        assert_eq!(h.digit(2), 9);
        assert_eq!(h.digit(3), 15);
        assert_eq!(h.digit(99), 0);
    }

    #[test]
    fn test_conflicting_colors_replaced() {
        // digits 8, 9, 10 = 0 (dark gray), 4 (dark color), 2 (light gray)
        let h = hash("00000000042");
        assert_eq!(select_colors(&h), [0, MID_COLOR, 2]);

        // 3 (light color) after 2 (light gray) is replaced too
        let h = hash("00000000023");
        assert_eq!(select_colors(&h), [0, 2, MID_COLOR]);
    }

    #[test]
    fn test_non_conflicting_colors_kept() {
        let h = hash("00000000013");
        assert_eq!(select_colors(&h), [0, 1, 3]);
    }

    #[test]
    fn test_layout_default_padding() {
        // padding = (0.5 + 64 * 0.08) | 0 = 5, inner = 54, cell = 13
        let layout = Layout::new(64, 0.08);
        assert_eq!(layout.cell, 13);
        assert_eq!(layout.x, 6);
        assert_eq!(layout.y, 6);
    }

    #[test]
    fn test_tiny_sizes_are_total() {
        let g = JdenticonGenerator::default();
        let key = CanonicalKey::from([9u8; 32]);
        for size in 0..8 {
            let _ = g.scene(&key, size);
        }
    }

    #[test]
    fn test_transparent_background_omitted() {
        let g = JdenticonGenerator::default();
        assert_eq!(g.background(), Background::None);

        let g = JdenticonGenerator::new(JdenticonConfig {
            background: "#ffffff80".into(),
            ..Default::default()
        });
        assert_eq!(g.background(), Background::Fill(Color::rgba(255, 255, 255, 128)));
    }

    #[test]
    fn test_bad_background_falls_back_to_black() {
        let g = JdenticonGenerator::new(JdenticonConfig {
            background: "white".into(),
            ..Default::default()
        });
        assert_eq!(g.background(), Background::Fill(Color::BLACK));
    }

    #[test]
    fn test_scene_uses_at_most_three_colors() {
        let g = JdenticonGenerator::default();
        let key = CanonicalKey::from([0x42u8; 32]);
        let scene = g.scene(&key, 100);
        assert!(!scene.is_empty());
        assert!(scene.fill_colors().len() <= 3);
        let used: Vec<String> = g.colors(&key).iter().map(|c| c.to_hex()).collect();
        for color in scene.fill_colors() {
            assert!(used.contains(&color));
        }
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: JdenticonConfig = serde_json::from_str(r#"{"padding": 0.1}"#).unwrap();
        assert_eq!(config.padding, 0.1);
        assert_eq!(config.saturation, 0.5);
        assert_eq!(config.background, "#00000000");
    }

    proptest! {
        #[test]
        fn test_scene_deterministic(bytes in prop::collection::vec(any::<u8>(), 1..48), size in 1u32..256) {
            let g = JdenticonGenerator::default();
            let key = CanonicalKey::from_bytes(bytes);
            prop_assert_eq!(g.scene(&key, size), g.scene(&key, size));
        }

        #[test]
        fn test_shapes_inside_icon(bytes in prop::collection::vec(any::<u8>(), 1..48), size in 16u32..256) {
            let g = JdenticonGenerator::default();
            let scene = g.scene(&CanonicalKey::from_bytes(bytes), size);
            let limit = size as f32 + 0.5;
            for p in &scene.primitives {
                if let keyprint_core::Primitive::Polygon(poly) = p {
                    for pt in &poly.points {
                        prop_assert!(pt.x >= -0.5 && pt.x <= limit);
                        prop_assert!(pt.y >= -0.5 && pt.y <= limit);
                    }
                }
            }
        }
    }
}
