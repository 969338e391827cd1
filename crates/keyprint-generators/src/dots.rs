//! Dots (Polkadot-style) identicons.
//!
//! Nineteen circles sit on a two-ring hexagonal template inside a light
//! disc. Their colors come from a 64-entry palette derived from the key
//! digest, arranged by one of seven symmetric color schemes.
//!
//! Derivation:
//! 1. `id = blake2b_512(key) - blake2b_512([0; 32])` (byte-wise, wrapping)
//! 2. Scheme selector `d = (id[30] + 256 * id[31]) mod 357`
//! 3. Rotation `rot = (id[28] mod 6) * 3`
//! 4. Saturation `((id[29] * 70 / 256 + 26) mod 80) + 30` percent
//! 5. Palette entry `i` from `b = id[i] + (i mod 28) * 58`

use keyprint_core::{
    Background, Blake2b512, CanonicalKey, Circle, Color, Hsl, Point, Primitive, Scene,
};

use crate::Generator;

/// Number of circles in every Dots icon.
pub const DOTS_CIRCLES: usize = 19;

/// Fill of the disc behind the circles.
pub const DOTS_BACKGROUND: Color = Color::rgb(0xee, 0xee, 0xee);

/// Palette entry for a zero palette byte.
const DARK_GRAY: Color = Color::rgb(0x44, 0x44, 0x44);

/// Lightness (percent) by palette byte quarter.
const LIGHTNESS: [u8; 4] = [53, 15, 35, 75];

/// A frequency-weighted arrangement of palette indices over the 19 circles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub name: &'static str,
    pub frequency: u32,
    pub color_palette_indices: [u8; DOTS_CIRCLES],
}

/// The scheme catalogue. Never reorder: selection walks cumulative
/// frequency ranges in this order.
pub static DOTS_SCHEMES: [ColorScheme; 7] = [
    ColorScheme {
        name: "target",
        frequency: 1,
        color_palette_indices: [0, 28, 0, 0, 28, 0, 0, 28, 0, 0, 28, 0, 0, 28, 0, 0, 28, 0, 1],
    },
    ColorScheme {
        name: "cube",
        frequency: 20,
        color_palette_indices: [0, 1, 3, 2, 4, 3, 0, 1, 3, 2, 4, 3, 0, 1, 3, 2, 4, 3, 5],
    },
    ColorScheme {
        name: "quazar",
        frequency: 16,
        color_palette_indices: [1, 2, 3, 1, 2, 4, 5, 5, 4, 1, 2, 3, 1, 2, 4, 5, 5, 4, 0],
    },
    ColorScheme {
        name: "flower",
        frequency: 32,
        color_palette_indices: [0, 1, 2, 0, 1, 2, 0, 1, 2, 0, 1, 2, 0, 1, 2, 0, 1, 2, 3],
    },
    ColorScheme {
        name: "cyclic",
        frequency: 32,
        color_palette_indices: [
            0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18,
        ],
    },
    ColorScheme {
        name: "vmirror",
        frequency: 128,
        color_palette_indices: [0, 1, 2, 3, 4, 5, 3, 4, 2, 0, 1, 6, 7, 8, 9, 7, 8, 6, 10],
    },
    ColorScheme {
        name: "hmirror",
        frequency: 128,
        color_palette_indices: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 8, 6, 7, 5, 3, 4, 2, 11],
    },
];

/// Sum of all scheme frequencies; the modulus for scheme selection.
pub fn schemes_total() -> u32 {
    DOTS_SCHEMES.iter().map(|s| s.frequency).sum()
}

/// Select a scheme by walking cumulative frequency ranges.
///
/// `selector` is reduced modulo [`schemes_total`] first.
pub fn select_scheme(selector: u32) -> &'static ColorScheme {
    let mut remainder = selector % schemes_total();
    for scheme in DOTS_SCHEMES.iter() {
        if remainder < scheme.frequency {
            return scheme;
        }
        remainder -= scheme.frequency;
    }
    &DOTS_SCHEMES[DOTS_SCHEMES.len() - 1]
}

/// Values derived from the key digest.
#[derive(Debug, Clone)]
struct DotsSeed {
    id: [u8; 64],
}

impl DotsSeed {
    fn derive(key: &CanonicalKey) -> Self {
        let zero = Blake2b512::hash(&[0u8; 32]);
        let id = Blake2b512::hash(key.as_bytes()).wrapping_sub(&zero);
        Self { id }
    }

    fn selector(&self) -> u32 {
        u32::from(self.id[30]) + u32::from(self.id[31]) * 256
    }

    fn rotation(&self) -> usize {
        usize::from(self.id[28] % 6) * 3
    }

    fn saturation(&self) -> u32 {
        ((u32::from(self.id[29]) * 70 / 256 + 26) % 80) + 30
    }

    fn palette(&self) -> [Color; 64] {
        let saturation = f64::from(self.saturation()) / 100.0;
        let mut palette = [Color::TRANSPARENT; 64];

        for (i, (slot, x)) in palette.iter_mut().zip(self.id.iter()).enumerate() {
            let b = x.wrapping_add(((i % 28) as u8).wrapping_mul(58));
            *slot = match b {
                0 => DARK_GRAY,
                255 => Color::TRANSPARENT,
                _ => {
                    let hue = f64::from(u32::from(b % 64) * 360 / 64);
                    let lightness = f64::from(LIGHTNESS[usize::from(b / 64)]) / 100.0;
                    Hsl::new(hue, saturation, lightness).to_rgb()
                }
            };
        }
        palette
    }
}

/// Generator for Dots identicons.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotsGenerator;

impl DotsGenerator {
    pub fn new() -> Self {
        Self
    }

    /// The 19 circle colors, in template order.
    pub fn colors(&self, key: &CanonicalKey) -> [Color; DOTS_CIRCLES] {
        let seed = DotsSeed::derive(key);
        let scheme = select_scheme(seed.selector());
        let rotation = seed.rotation();
        let palette = seed.palette();

        let mut colors = [Color::TRANSPARENT; DOTS_CIRCLES];
        for (i, color) in colors.iter_mut().enumerate() {
            let slot = if i < 18 { (i + rotation) % 18 } else { 18 };
            *color = palette[usize::from(scheme.color_palette_indices[slot])];
        }
        colors
    }

    /// The selected scheme for a key.
    pub fn scheme(&self, key: &CanonicalKey) -> &'static ColorScheme {
        select_scheme(DotsSeed::derive(key).selector())
    }

    /// The 19 circles, laid out for a `size × size` icon.
    pub fn circles(&self, key: &CanonicalKey, size: u32) -> Vec<Circle> {
        let radius = circle_radius(size);
        circle_positions(size)
            .into_iter()
            .zip(self.colors(key))
            .map(|(position, color)| Circle::new(position, radius, color))
            .collect()
    }
}

impl Generator for DotsGenerator {
    fn name(&self) -> &'static str {
        "dots"
    }

    fn scene(&self, key: &CanonicalKey, size: u32) -> Scene {
        tracing::debug!(scheme = self.scheme(key).name, size, "building dots scene");
        let primitives = self
            .circles(key, size)
            .into_iter()
            .map(Primitive::from)
            .collect();
        Scene::new(size, Background::Disc(DOTS_BACKGROUND), primitives)
    }
}

/// Radius of each circle: 5/12 of the spacing between neighbors.
pub fn circle_radius(size: u32) -> f32 {
    ring_radius(size) / 2.0 * 5.0 / 12.0
}

/// Radius of the outer ring of circle centers.
fn ring_radius(size: u32) -> f32 {
    size as f32 / 2.0 / 4.0 * 3.0
}

/// Centers of the 19 circles: outer ring, inner ring, then the center.
pub fn circle_positions(size: u32) -> [Point; DOTS_CIRCLES] {
    let c = size as f32 / 2.0;
    let r = ring_radius(size);
    let r_root3_2 = r * 3f32.sqrt() / 2.0;
    let r_2 = r / 2.0;
    let r_root3_4 = r * 3f32.sqrt() / 4.0;
    let r_4 = r / 4.0;
    let r3_4 = r * 3.0 / 4.0;

    [
        Point::new(c, c - r),
        Point::new(c, c - r_2),
        Point::new(c - r_root3_4, c - r3_4),
        Point::new(c - r_root3_2, c - r_2),
        Point::new(c - r_root3_4, c - r_4),
        Point::new(c - r_root3_2, c),
        Point::new(c - r_root3_2, c + r_2),
        Point::new(c - r_root3_4, c + r_4),
        Point::new(c - r_root3_4, c + r3_4),
        Point::new(c, c + r),
        Point::new(c, c + r_2),
        Point::new(c + r_root3_4, c + r3_4),
        Point::new(c + r_root3_2, c + r_2),
        Point::new(c + r_root3_4, c + r_4),
        Point::new(c + r_root3_2, c),
        Point::new(c + r_root3_2, c - r_2),
        Point::new(c + r_root3_4, c - r_4),
        Point::new(c + r_root3_4, c - r3_4),
        Point::new(c, c),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn alice() -> CanonicalKey {
        CanonicalKey::from_bytes(
            hex::decode("d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d")
                .unwrap(),
        )
    }

    #[test]
    fn test_alice_colors() {
        let expected = [
            (165, 227, 156),
            (60, 40, 17),
            (184, 68, 202),
            (139, 39, 88),
            (135, 68, 202),
            (225, 156, 227),
            (139, 39, 88),
            (135, 68, 202),
            (184, 68, 202),
            (165, 227, 156),
            (60, 40, 17),
            (162, 202, 68),
            (39, 139, 139),
            (187, 202, 68),
            (38, 60, 17),
            (39, 139, 139),
            (187, 202, 68),
            (162, 202, 68),
            (61, 39, 139),
        ];
        let colors = DotsGenerator::new().colors(&alice());
        for (i, (got, (r, g, b))) in colors.iter().zip(expected).enumerate() {
            assert_eq!(*got, Color::rgb(r, g, b), "circle {} differs", i);
        }
    }

    #[test]
    fn test_alice_scheme() {
        // selector 176 lands in the vmirror range [101, 229)
        assert_eq!(DotsGenerator::new().scheme(&alice()).name, "vmirror");
    }

    #[test]
    fn test_schemes_total() {
        assert_eq!(schemes_total(), 357);
    }

    #[test]
    fn test_scheme_selection_monotonic() {
        let index_of = |s: &ColorScheme| DOTS_SCHEMES.iter().position(|x| x == s).unwrap();

        let mut boundaries = Vec::new();
        let mut prev = index_of(select_scheme(0));
        assert_eq!(prev, 0);

        for d in 1..schemes_total() {
            let idx = index_of(select_scheme(d));
            assert!(idx == prev || idx == prev + 1, "jump at selector {}", d);
            if idx != prev {
                boundaries.push(d);
            }
            prev = idx;
        }

        assert_eq!(boundaries, vec![1, 21, 37, 69, 101, 229]);
    }

    #[test]
    fn test_scheme_selection_wraps_modulus() {
        assert_eq!(select_scheme(357), select_scheme(0));
        assert_eq!(select_scheme(357 + 230), select_scheme(230));
    }

    #[test]
    fn test_template_is_symmetric_about_center() {
        let size = 64;
        let c = size as f32 / 2.0;
        let positions = circle_positions(size);
        assert_eq!(positions[18], Point::new(c, c));
        for i in 0..9 {
            let a = positions[i];
            let b = positions[i + 9];
            assert!((a.x + b.x - 2.0 * c).abs() < 1e-4);
            assert!((a.y + b.y - 2.0 * c).abs() < 1e-4);
        }
    }

    #[test]
    fn test_circles_never_overlap() {
        let size = 64;
        let radius = circle_radius(size);
        let positions = circle_positions(size);
        for i in 0..positions.len() {
            for j in i + 1..positions.len() {
                let dx = positions[i].x - positions[j].x;
                let dy = positions[i].y - positions[j].y;
                assert!((dx * dx + dy * dy).sqrt() + 1e-3 >= 2.0 * radius);
            }
        }
    }

    #[test]
    fn test_scene_shape() {
        let scene = DotsGenerator::new().scene(&alice(), 128);
        assert_eq!(scene.size, 128);
        assert_eq!(scene.len(), DOTS_CIRCLES);
        assert_eq!(scene.background, Background::Disc(DOTS_BACKGROUND));
    }

    proptest! {
        #[test]
        fn test_colors_deterministic(bytes in prop::collection::vec(any::<u8>(), 1..64)) {
            let key = CanonicalKey::from_bytes(bytes);
            let g = DotsGenerator::new();
            prop_assert_eq!(g.colors(&key), g.colors(&key));
        }
    }
}
