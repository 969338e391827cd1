//! Algorithm dispatch and the top-level generation API.

use std::fmt;
use std::str::FromStr;

use keyprint_core::{CanonicalKey, PublicKey, Scene};
use keyprint_generators::{BlockiesGenerator, DotsGenerator, Generator, JdenticonGenerator};
use keyprint_render::{Bitmap, RasterRenderer, Renderer, SvgDocument, SvgRenderer};
use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::error::{KeyprintError, Result};

/// Largest accepted icon size.
pub const MAX_SIZE: u32 = 4096;

/// Which identicon algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// 19 circles in a hexagon (Polkadot style).
    #[serde(alias = "polkadot")]
    Dots,
    /// Mirrored three-color grid.
    Blockies,
    /// Rotated shapes on a 4×4 grid.
    Jdenticon,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Dots, Algorithm::Blockies, Algorithm::Jdenticon];

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Dots => "dots",
            Algorithm::Blockies => "blockies",
            Algorithm::Jdenticon => "jdenticon",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = KeyprintError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dots" | "polkadot" => Ok(Algorithm::Dots),
            "blockies" => Ok(Algorithm::Blockies),
            "jdenticon" => Ok(Algorithm::Jdenticon),
            _ => Err(KeyprintError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Requested output kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// RGBA pixel buffer.
    Raster,
    /// SVG markup.
    Vector,
}

impl FromStr for ImageFormat {
    type Err = KeyprintError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raster" | "rgba" => Ok(ImageFormat::Raster),
            "vector" | "svg" => Ok(ImageFormat::Vector),
            _ => Err(KeyprintError::UnknownFormat(s.to_string())),
        }
    }
}

/// A generated identicon, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Image {
    Raster(Bitmap),
    Vector(SvgDocument),
}

impl Image {
    pub fn format(&self) -> ImageFormat {
        match self {
            Image::Raster(_) => ImageFormat::Raster,
            Image::Vector(_) => ImageFormat::Vector,
        }
    }

    pub fn as_raster(&self) -> Option<&Bitmap> {
        match self {
            Image::Raster(bitmap) => Some(bitmap),
            Image::Vector(_) => None,
        }
    }

    pub fn as_vector(&self) -> Option<&SvgDocument> {
        match self {
            Image::Vector(svg) => Some(svg),
            Image::Raster(_) => None,
        }
    }
}

/// One generator per algorithm, selected at runtime.
#[derive(Debug, Clone)]
pub enum IdenticonGenerator {
    Dots(DotsGenerator),
    Blockies(BlockiesGenerator),
    Jdenticon(JdenticonGenerator),
}

impl IdenticonGenerator {
    pub fn new(algorithm: Algorithm, config: &GeneratorConfig) -> Self {
        match algorithm {
            Algorithm::Dots => IdenticonGenerator::Dots(DotsGenerator::new()),
            Algorithm::Blockies => {
                IdenticonGenerator::Blockies(BlockiesGenerator::new(config.blockies.clone()))
            }
            Algorithm::Jdenticon => {
                IdenticonGenerator::Jdenticon(JdenticonGenerator::new(config.jdenticon.clone()))
            }
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            IdenticonGenerator::Dots(_) => Algorithm::Dots,
            IdenticonGenerator::Blockies(_) => Algorithm::Blockies,
            IdenticonGenerator::Jdenticon(_) => Algorithm::Jdenticon,
        }
    }

    fn inner(&self) -> &dyn Generator {
        match self {
            IdenticonGenerator::Dots(g) => g,
            IdenticonGenerator::Blockies(g) => g,
            IdenticonGenerator::Jdenticon(g) => g,
        }
    }
}

impl Generator for IdenticonGenerator {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn scene(&self, key: &CanonicalKey, size: u32) -> Scene {
        self.inner().scene(key, size)
    }
}

/// The identicon pipeline: decode, generate, render.
///
/// Holds only configuration. Every call builds fresh values and returns
/// them to the caller.
#[derive(Debug, Clone, Default)]
pub struct Keyprint {
    config: GeneratorConfig,
}

impl Keyprint {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Decode `key` and build the scene for `algorithm`.
    pub fn scene(&self, key: &PublicKey, algorithm: Algorithm, size: u32) -> Result<Scene> {
        check_size(size)?;
        let canonical = key.decode()?;
        let generator = IdenticonGenerator::new(algorithm, &self.config);

        tracing::debug!(%algorithm, size, key = ?canonical, "generating identicon");
        Ok(generator.scene(&canonical, size))
    }

    /// Decode, generate and render in one call.
    pub fn generate(
        &self,
        key: &PublicKey,
        algorithm: Algorithm,
        size: u32,
        format: ImageFormat,
    ) -> Result<Image> {
        let scene = self.scene(key, algorithm, size)?;
        self.render(&scene, format)
    }

    /// Render an existing scene.
    pub fn render(&self, scene: &Scene, format: ImageFormat) -> Result<Image> {
        Ok(match format {
            ImageFormat::Raster => {
                Image::Raster(RasterRenderer::new(self.config.raster.clone()).render(scene)?)
            }
            ImageFormat::Vector => Image::Vector(SvgRenderer::new().render(scene)?),
        })
    }
}

/// Generate with the default configuration.
pub fn generate(
    key: &PublicKey,
    algorithm: Algorithm,
    size: u32,
    format: ImageFormat,
) -> Result<Image> {
    Keyprint::default().generate(key, algorithm, size, format)
}

fn check_size(size: u32) -> Result<()> {
    if size == 0 || size > MAX_SIZE {
        return Err(KeyprintError::InvalidSize {
            size,
            max: MAX_SIZE,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyprint_core::DecodeError;

    fn key() -> PublicKey {
        PublicKey::Bytes(vec![0x5a; 32])
    }

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("dots".parse::<Algorithm>().unwrap(), Algorithm::Dots);
        assert_eq!("Polkadot".parse::<Algorithm>().unwrap(), Algorithm::Dots);
        assert_eq!(" blockies ".parse::<Algorithm>().unwrap(), Algorithm::Blockies);
        assert_eq!("JDENTICON".parse::<Algorithm>().unwrap(), Algorithm::Jdenticon);
        assert!(matches!(
            "identicon".parse::<Algorithm>(),
            Err(KeyprintError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn test_algorithm_display_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn test_algorithm_serde() {
        assert_eq!(serde_json::to_string(&Algorithm::Jdenticon).unwrap(), "\"jdenticon\"");
        let dots: Algorithm = serde_json::from_str("\"polkadot\"").unwrap();
        assert_eq!(dots, Algorithm::Dots);
    }

    #[test]
    fn test_image_format_from_str() {
        assert_eq!("svg".parse::<ImageFormat>().unwrap(), ImageFormat::Vector);
        assert_eq!("raster".parse::<ImageFormat>().unwrap(), ImageFormat::Raster);
        assert!("png".parse::<ImageFormat>().is_err());
    }

    #[test]
    fn test_dispatch_selects_generator() {
        let config = GeneratorConfig::default();
        for algorithm in Algorithm::ALL {
            let generator = IdenticonGenerator::new(algorithm, &config);
            assert_eq!(generator.algorithm(), algorithm);
            assert_eq!(generator.name(), algorithm.as_str());
        }
    }

    #[test]
    fn test_generate_raster_size() {
        let image = generate(&key(), Algorithm::Blockies, 24, ImageFormat::Raster).unwrap();
        let bitmap = image.as_raster().unwrap();
        assert_eq!((bitmap.width, bitmap.height), (24, 24));
        assert_eq!(bitmap.rgba.len(), 24 * 24 * 4);
        assert!(image.as_vector().is_none());
    }

    #[test]
    fn test_generate_vector() {
        let image = generate(&key(), Algorithm::Jdenticon, 64, ImageFormat::Vector).unwrap();
        assert_eq!(image.format(), ImageFormat::Vector);
        assert!(image.as_vector().unwrap().as_str().starts_with("<svg"));
    }

    #[test]
    fn test_large_dots_raster_is_bounded() {
        let start = std::time::Instant::now();
        let image = generate(&key(), Algorithm::Dots, 1024, ImageFormat::Raster).unwrap();
        let elapsed = start.elapsed();

        assert_eq!(image.as_raster().unwrap().rgba.len(), 1024 * 1024 * 4);
        assert!(
            elapsed < std::time::Duration::from_secs(2),
            "1024px dots render took {elapsed:?}"
        );
    }

    #[test]
    fn test_invalid_size() {
        for size in [0, MAX_SIZE + 1] {
            assert!(matches!(
                generate(&key(), Algorithm::Dots, size, ImageFormat::Vector),
                Err(KeyprintError::InvalidSize { .. })
            ));
        }
    }

    #[test]
    fn test_decode_error_yields_no_image() {
        let bad = PublicKey::Hex("abc".into());
        let err = generate(&bad, Algorithm::Dots, 32, ImageFormat::Raster).unwrap_err();
        assert!(matches!(
            err,
            KeyprintError::Decode(DecodeError::InvalidEncoding { .. })
        ));
    }

    #[test]
    fn test_config_reaches_generator() {
        let mut config = GeneratorConfig::default();
        config.blockies.grid_size = 5;
        let kp = Keyprint::new(config);
        let scene = kp.scene(&key(), Algorithm::Blockies, 50).unwrap();
        // 10px cells on a 5x5 grid
        for p in &scene.primitives {
            if let keyprint_core::Primitive::Polygon(poly) = p {
                assert_eq!(poly.points[0].x % 10.0, 0.0);
            }
        }
    }
}
