//! Canvas 2D rendering and bitmap resource engine.
//!
//! This crate implements the Canvas 2D drawing model without a browser or
//! JavaScript runtime: paths, fills and strokes, gradients and patterns,
//! Porter-Duff and blend compositing, CSS filters, shadows, clipping, text,
//! and pixel I/O over a premultiplied RGBA surface. Around the context it
//! provides the bitmap lifecycle: `ImageBitmap` with close and transfer,
//! `OffscreenCanvas`, and a `MessageChannel` that moves bitmaps between
//! threads.
//!
//! It uses:
//! - `tiny-skia` for path geometry, coverage masks and stroke expansion
//! - `cosmic-text` and `fontdb` for the default glyph rasterizer
//! - `png` and `image` for Blob encoding
//!
//! # Example
//!
//! ```rust,ignore
//! use canvas2d_engine::{Canvas2dContext, RectParams};
//!
//! let mut ctx = Canvas2dContext::new(400, 300)?;
//! ctx.set_fill_style("#ff0000")?;
//! ctx.fill_rect(&RectParams::new(10.0, 10.0, 100.0, 50.0));
//! let png_data = ctx.to_png(None)?;
//! ```

mod arc;
mod bitmap;
mod channel;
mod composite;
mod context;
mod dom_matrix;
mod drawing_state;
mod encoder;
mod error;
mod filter;
mod font_config;
mod font_parser;
mod geometry;
mod gradient;
mod image_data;
mod offscreen;
mod paint;
mod path;
mod path2d;
mod pattern;
mod raster;
mod style;
mod surface;
mod text;

// Re-export public API
pub use bitmap::{create_image_bitmap, create_image_bitmap_cropped, CanvasImageSource, ImageBitmap};
pub use channel::{Message, MessageChannel, MessagePort};
pub use composite::CompositeOperation;
pub use context::{Canvas2dContext, Canvas2dContextBuilder};
pub use dom_matrix::DOMMatrix;
pub use drawing_state::DrawingState;
pub use encoder::{
    encode_jpeg, encode_png, Blob, DefaultImageEncoder, ImageEncoder, DEFAULT_JPEG_QUALITY,
};
pub use error::{Canvas2dError, Canvas2dResult};
pub use filter::{parse_filter, FilterChain, FilterPrimitive};
pub use font_config::{CustomFont, FontConfig, GenericFamilyMap};
pub use font_parser::{parse_font, FontStyle, ParsedFont};
pub use geometry::{
    ArcParams, ArcToParams, CanvasColor, CornerRadius, CubicBezierParams, DirtyRect,
    EllipseParams, ImageCropParams, QuadraticBezierParams, RadialGradientParams, RectParams,
    RoundRectParams,
};
pub use gradient::{CanvasGradient, GradientStop, GradientType};
pub use image_data::ImageData;
pub use offscreen::OffscreenCanvas;
pub use path2d::Path2D;
pub use pattern::{CanvasPattern, Repetition};
pub use style::{
    CanvasFillRule, Direction, FillStyle, ImageSmoothingQuality, LineCap, LineJoin, TextAlign,
    TextBaseline,
};
pub use surface::{Surface, MAX_DIMENSION};
pub use text::{CosmicTextRasterizer, GlyphRasterizer, GlyphRun, TextMetrics};
