//! Blockies identicons.
//!
//! A square grid of three colors, mirrored left to right. The stream comes
//! from [`Lcg48`] seeded with the `0x`-prefixed lowercase hex of the key:
//! the first three draws pick the background, primary and spot colors,
//! the rest fill the grid row by row over the left half.

use keyprint_core::{Background, CanonicalKey, Color, Hsl, Polygon, Primitive, Scene};
use serde::{Deserialize, Serialize};

use crate::prng::Lcg48;
use crate::Generator;

/// Grid sizes outside this range are clamped.
pub const MAX_GRID_SIZE: u32 = 64;

/// Saturation shared by all three role colors.
const SATURATION: f64 = 0.65;

/// Draws above this become spot cells.
const SPOT_THRESHOLD: f64 = 0.8;

/// Draws above this (and not spot) become primary cells.
const PRIMARY_THRESHOLD: f64 = 0.6;

/// Configuration for the Blockies generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockiesConfig {
    /// Cells per side.
    pub grid_size: u32,
}

impl Default for BlockiesConfig {
    fn default() -> Self {
        Self { grid_size: 8 }
    }
}

/// The value of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Background,
    Primary,
    Spot,
}

impl Cell {
    /// Lightness of this role's color.
    fn lightness(self) -> f64 {
        match self {
            Cell::Background => 0.85,
            Cell::Primary => 0.5,
            Cell::Spot => 0.3,
        }
    }

    fn from_draw(value: f64) -> Self {
        if value > SPOT_THRESHOLD {
            Cell::Spot
        } else if value > PRIMARY_THRESHOLD {
            Cell::Primary
        } else {
            Cell::Background
        }
    }
}

/// The three role colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockiesColors {
    pub background: Color,
    pub primary: Color,
    pub spot: Color,
}

impl BlockiesColors {
    /// Color for a cell value.
    pub fn of(&self, cell: Cell) -> Color {
        match cell {
            Cell::Background => self.background,
            Cell::Primary => self.primary,
            Cell::Spot => self.spot,
        }
    }
}

/// A `size × size` grid of cells, symmetric about the vertical axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    size: usize,
    cells: Vec<Cell>,
}

impl PixelGrid {
    /// Number of cells per side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.size + col]
    }

    /// Cells of one row, left to right.
    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    /// Whether every row reads the same backwards.
    pub fn is_mirrored(&self) -> bool {
        (0..self.size).all(|row| {
            let cells = self.row(row);
            cells.iter().eq(cells.iter().rev())
        })
    }

    /// Number of columns drawn before mirroring: `ceil(size / 2)`.
    pub fn generated_width(size: usize) -> usize {
        (size + 1) / 2
    }
}

/// Generator for Blockies identicons.
#[derive(Debug, Clone, Default)]
pub struct BlockiesGenerator {
    config: BlockiesConfig,
}

impl BlockiesGenerator {
    pub fn new(config: BlockiesConfig) -> Self {
        Self { config }
    }

    fn grid_size(&self) -> usize {
        self.config.grid_size.clamp(1, MAX_GRID_SIZE) as usize
    }

    /// The string the stream is seeded from.
    pub fn seed_string(key: &CanonicalKey) -> String {
        format!("0x{}", key.to_hex())
    }

    /// Role colors and cell grid for a key.
    pub fn draw(&self, key: &CanonicalKey) -> (BlockiesColors, PixelGrid) {
        let mut rng = Lcg48::from_seed_str(&Self::seed_string(key));

        let mut role_color = |role: Cell| {
            Hsl::new(rng.next_f64() * 360.0, SATURATION, role.lightness()).to_rgb()
        };
        let colors = BlockiesColors {
            background: role_color(Cell::Background),
            primary: role_color(Cell::Primary),
            spot: role_color(Cell::Spot),
        };

        let size = self.grid_size();
        let width = PixelGrid::generated_width(size);
        let mut cells = vec![Cell::Background; size * size];

        for row in 0..size {
            for col in 0..width {
                let cell = Cell::from_draw(rng.next_f64());
                cells[row * size + col] = cell;
                cells[row * size + (size - 1 - col)] = cell;
            }
        }

        (colors, PixelGrid { size, cells })
    }
}

impl Generator for BlockiesGenerator {
    fn name(&self) -> &'static str {
        "blockies"
    }

    fn scene(&self, key: &CanonicalKey, size: u32) -> Scene {
        let (colors, grid) = self.draw(key);
        let scale = size as f32 / grid.size() as f32;
        tracing::debug!(grid = grid.size(), size, "building blockies scene");

        let mut primitives = Vec::new();
        for row in 0..grid.size() {
            for col in 0..grid.size() {
                let cell = grid.get(row, col);
                if cell == Cell::Background {
                    continue;
                }
                primitives.push(Primitive::from(Polygon::rect(
                    col as f32 * scale,
                    row as f32 * scale,
                    scale,
                    scale,
                    colors.of(cell),
                )));
            }
        }

        Scene::new(size, Background::Fill(colors.background), primitives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn key(byte: u8) -> CanonicalKey {
        CanonicalKey::from([byte; 32])
    }

    #[test]
    fn test_seed_string_format() {
        let k = CanonicalKey::from_bytes(vec![0xAB, 0x01]);
        assert_eq!(BlockiesGenerator::seed_string(&k), "0xab01");
    }

    #[test]
    fn test_generated_width() {
        assert_eq!(PixelGrid::generated_width(8), 4);
        assert_eq!(PixelGrid::generated_width(7), 4);
        assert_eq!(PixelGrid::generated_width(1), 1);
    }

    #[test]
    fn test_default_grid_is_8() {
        let (_, grid) = BlockiesGenerator::default().draw(&key(1));
        assert_eq!(grid.size(), 8);
    }

    #[test]
    fn test_grid_size_clamped() {
        let g = BlockiesGenerator::new(BlockiesConfig { grid_size: 0 });
        assert_eq!(g.draw(&key(1)).1.size(), 1);

        let g = BlockiesGenerator::new(BlockiesConfig { grid_size: 1000 });
        assert_eq!(g.draw(&key(1)).1.size(), MAX_GRID_SIZE as usize);
    }

    #[test]
    fn test_role_colors_use_role_lightness() {
        let (colors, _) = BlockiesGenerator::default().draw(&key(7));
        // Background is the lightest role, spot the darkest
        let luma = |c: Color| u32::from(c.r) + u32::from(c.g) + u32::from(c.b);
        assert!(luma(colors.background) > luma(colors.primary));
        assert!(luma(colors.primary) > luma(colors.spot));
    }

    #[test]
    fn test_scene_skips_background_cells() {
        let g = BlockiesGenerator::default();
        let k = key(3);
        let (colors, grid) = g.draw(&k);
        let scene = g.scene(&k, 64);

        let foreground = (0..8)
            .flat_map(|r| (0..8).map(move |c| (r, c)))
            .filter(|&(r, c)| grid.get(r, c) != Cell::Background)
            .count();
        assert_eq!(scene.len(), foreground);
        assert_eq!(scene.background, Background::Fill(colors.background));
    }

    #[test]
    fn test_scene_logs_grid_size() {
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl Write for Captured {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            BlockiesGenerator::default().scene(&key(5), 40);
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("building blockies scene"), "{output}");
        assert!(output.contains("grid=8"), "{output}");
    }

    #[test]
    fn test_cell_thresholds() {
        assert_eq!(Cell::from_draw(0.0), Cell::Background);
        assert_eq!(Cell::from_draw(0.6), Cell::Background);
        assert_eq!(Cell::from_draw(0.61), Cell::Primary);
        assert_eq!(Cell::from_draw(0.8), Cell::Primary);
        assert_eq!(Cell::from_draw(0.81), Cell::Spot);
    }

    proptest! {
        #[test]
        fn test_grid_symmetry(
            bytes in prop::collection::vec(any::<u8>(), 1..48),
            grid_size in 1u32..=17,
        ) {
            let g = BlockiesGenerator::new(BlockiesConfig { grid_size });
            let (_, grid) = g.draw(&CanonicalKey::from_bytes(bytes));
            let n = grid.size();
            for row in 0..n {
                for col in 0..n {
                    prop_assert_eq!(grid.get(row, col), grid.get(row, n - 1 - col));
                }
            }
            prop_assert!(grid.is_mirrored());
        }

        #[test]
        fn test_draw_deterministic(bytes in prop::collection::vec(any::<u8>(), 1..48)) {
            let g = BlockiesGenerator::default();
            let k = CanonicalKey::from_bytes(bytes);
            prop_assert_eq!(g.draw(&k), g.draw(&k));
        }
    }
}
