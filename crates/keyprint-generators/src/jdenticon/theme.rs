//! The five-color theme derived from a hue.

use keyprint_core::{corrected_hsl, Color};

use super::JdenticonConfig;

/// Theme slot indices.
pub const DARK_GRAY: usize = 0;
pub const MID_COLOR: usize = 1;
pub const LIGHT_GRAY: usize = 2;
pub const LIGHT_COLOR: usize = 3;
pub const DARK_COLOR: usize = 4;

/// Slot pairs that may not both be selected.
pub const CONFLICTING_SLOTS: [[usize; 2]; 2] = [[DARK_GRAY, DARK_COLOR], [LIGHT_GRAY, LIGHT_COLOR]];

/// Interpolate within a lightness range and clamp to `[0, 1]`.
fn lightness(range: [f64; 2], value: f64) -> f64 {
    (range[0] + value * (range[1] - range[0])).clamp(0.0, 1.0)
}

/// Theme colors for `hue` in `[0, 1)`, indexed by the slot constants.
pub fn color_theme(hue: f64, config: &JdenticonConfig) -> [Color; 5] {
    let gray = |value| {
        corrected_hsl(
            hue,
            config.grayscale_saturation,
            lightness(config.grayscale_lightness, value),
        )
    };
    let color = |value| corrected_hsl(hue, config.saturation, lightness(config.color_lightness, value));

    [gray(0.0), color(0.5), gray(1.0), color(1.0), color(0.0)]
}
