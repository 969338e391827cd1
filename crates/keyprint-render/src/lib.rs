//! # Keyprint Render
//!
//! Backends that turn an immutable [`Scene`](keyprint_core::Scene) into an
//! image. Both backends are pure functions of the scene.
//!
//! ## Key Types
//!
//! - [`Renderer`] - The trait every backend implements
//! - [`RasterRenderer`] - Supersampled RGBA bitmap output
//! - [`SvgRenderer`] - SVG markup with one merged path per fill color
//! - [`ShapeSet`] - Color-keyed path accumulator used by the SVG backend
//!
//! ## Usage
//!
//! ```rust
//! use keyprint_core::{Background, Color, Polygon, Scene};
//! use keyprint_render::{RasterRenderer, Renderer, SvgRenderer};
//!
//! let scene = Scene::new(
//!     16,
//!     Background::Fill(Color::WHITE),
//!     vec![Polygon::rect(4.0, 4.0, 8.0, 8.0, Color::BLACK).into()],
//! );
//!
//! let bitmap = RasterRenderer::default().render(&scene).unwrap();
//! assert_eq!(bitmap.pixel(8, 8), Color::BLACK);
//!
//! let svg = SvgRenderer::new().render(&scene).unwrap();
//! assert!(svg.as_str().contains("<path fill=\"#000000\""));
//! ```
//!
//! ## Design Notes
//!
//! - **Grouping**: shapes are grouped by fill color and each group is
//!   filled with the nonzero winding rule, so holes only cut through
//!   shapes of their own color
//! - **Order**: groups are painted (raster) and emitted (SVG) in ascending
//!   color-string order, which keeps output byte-stable

pub mod error;
pub mod raster;
pub mod svg;
pub mod traits;

pub use error::{RenderError, Result};
pub use raster::{effective_supersample, Bitmap, RasterOptions, RasterRenderer, MAX_SAMPLES};
pub use svg::{svg_value, ShapeSet, SvgDocument, SvgPath, SvgRenderer};
pub use traits::Renderer;
