//! Canvas without a document, owning exactly one live surface.

use crate::bitmap::ImageBitmap;
use crate::context::{Canvas2dContext, Canvas2dContextBuilder};
use crate::encoder::Blob;
use crate::error::Canvas2dResult;
use crate::surface::Surface;

/// An offscreen canvas with a single 2D context.
#[derive(Debug)]
pub struct OffscreenCanvas {
    context: Canvas2dContext,
}

impl OffscreenCanvas {
    pub fn new(width: u32, height: u32) -> Canvas2dResult<Self> {
        Self::from_builder(Canvas2dContext::builder(width, height))
    }

    /// Build the backing context with custom fonts, glyph rasterizer or
    /// encoder.
    pub fn from_builder(builder: Canvas2dContextBuilder) -> Canvas2dResult<Self> {
        Ok(Self {
            context: builder.build()?,
        })
    }

    pub fn width(&self) -> u32 {
        self.context.width()
    }

    pub fn height(&self) -> u32 {
        self.context.height()
    }

    /// Reallocate with a new width. Content and context state are reset
    /// even when the width is unchanged.
    pub fn set_width(&mut self, width: u32) -> Canvas2dResult<()> {
        let height = self.height();
        self.context.resize(width, height)
    }

    /// Reallocate with a new height. Content and context state are reset
    /// even when the height is unchanged.
    pub fn set_height(&mut self, height: u32) -> Canvas2dResult<()> {
        let width = self.width();
        self.context.resize(width, height)
    }

    /// The rendering context for `context_id`. Only `"2d"` is supported.
    pub fn get_context(&mut self, context_id: &str) -> Option<&mut Canvas2dContext> {
        if context_id == "2d" {
            Some(&mut self.context)
        } else {
            log::debug!(target: "canvas", "unsupported context type {context_id:?}");
            None
        }
    }

    /// Read access to the 2D context.
    pub fn context(&self) -> &Canvas2dContext {
        &self.context
    }

    pub fn surface(&self) -> &Surface {
        self.context.surface()
    }

    /// Move the current pixels into a new bitmap. The canvas keeps its
    /// dimensions with a cleared surface.
    pub fn transfer_to_image_bitmap(&mut self) -> Canvas2dResult<ImageBitmap> {
        let surface = self.context.take_surface();
        log::debug!(
            target: "canvas",
            "transferToImageBitmap {}x{}",
            surface.width(),
            surface.height()
        );
        Ok(ImageBitmap::from_surface(surface))
    }

    /// Encode the current pixels with the context's image encoder.
    pub fn convert_to_blob_sync(&self, mime_type: &str, quality: Option<f64>) -> Canvas2dResult<Blob> {
        self.context.to_blob(mime_type, quality)
    }
}
