//! Image drawing, pixel data, and PNG output operations for Canvas2dContext.

use super::render::render;
use super::Canvas2dContext;
use crate::bitmap::CanvasImageSource;
use crate::encoder::encode_png;
use crate::error::Canvas2dResult;
use crate::geometry::{DirtyRect, ImageCropParams, RectParams};
use crate::image_data::ImageData;
use crate::paint::{ImageSampler, PaintSource, TexelRect};
use crate::pattern::{CanvasPattern, Repetition};
use crate::raster::fill_coverage;
use crate::style::CanvasFillRule;
use crate::surface::{validate_dimensions, Surface};
use std::sync::Arc;

impl Canvas2dContext {
    // --- drawImage ---

    /// Draw a whole image with its top-left corner at (dx, dy).
    ///
    /// Fails with `InvalidState` for a closed bitmap, leaving the canvas
    /// untouched.
    pub fn draw_image<'a>(&mut self, image: impl Into<CanvasImageSource<'a>>, dx: f32, dy: f32) -> Canvas2dResult<()> {
        let pixels = image.into().pixels()?;
        let (w, h) = (pixels.width() as f32, pixels.height() as f32);
        log::debug!(target: "canvas", "drawImage {}x{} at {} {}", w, h, dx, dy);
        self.draw_image_region(&pixels, crop(0.0, 0.0, w, h, dx, dy, w, h));
        Ok(())
    }

    /// Draw a whole image scaled into the (dx, dy, dw, dh) rectangle.
    pub fn draw_image_scaled<'a>(
        &mut self,
        image: impl Into<CanvasImageSource<'a>>,
        dx: f32,
        dy: f32,
        dw: f32,
        dh: f32,
    ) -> Canvas2dResult<()> {
        let pixels = image.into().pixels()?;
        let (w, h) = (pixels.width() as f32, pixels.height() as f32);
        log::debug!(target: "canvas", "drawImage {}x{} into {} {} {} {}", w, h, dx, dy, dw, dh);
        self.draw_image_region(&pixels, crop(0.0, 0.0, w, h, dx, dy, dw, dh));
        Ok(())
    }

    /// Draw the (sx, sy, sw, sh) region of an image into the
    /// (dx, dy, dw, dh) rectangle.
    ///
    /// A source rectangle reaching outside the image is clipped to it and
    /// the destination shrinks in proportion.
    pub fn draw_image_cropped<'a>(
        &mut self,
        image: impl Into<CanvasImageSource<'a>>,
        params: &ImageCropParams,
    ) -> Canvas2dResult<()> {
        let pixels = image.into().pixels()?;
        log::debug!(target: "canvas", "drawImage cropped {:?}", params);
        self.draw_image_region(&pixels, *params);
        Ok(())
    }

    fn draw_image_region(&mut self, pixels: &Surface, params: ImageCropParams) {
        let values = [
            params.sx, params.sy, params.sw, params.sh, params.dx, params.dy, params.dw, params.dh,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return;
        }
        let Some(p) = params.clipped_to_source(pixels.width(), pixels.height()) else {
            return;
        };

        let dest = self.rect_path(&RectParams::new(p.dx, p.dy, p.dw, p.dh)).to_skia();
        let coverage = dest.and_then(|d| {
            fill_coverage(&d, CanvasFillRule::NonZero, self.surface.width(), self.surface.height())
        });

        // Device pixel -> user space -> source texel.
        let placement = self
            .state
            .transform
            .pre_translate(p.dx, p.dy)
            .pre_scale(p.dw / p.sw, p.dh / p.sh)
            .pre_translate(-p.sx, -p.sy);
        let Some(inverse) = placement.invert() else {
            return;
        };
        let mut sampler = ImageSampler::new(
            pixels,
            inverse,
            Repetition::NoRepeat,
            self.state.image_smoothing_enabled,
        );
        sampler.texels = TexelRect {
            x0: p.sx.floor() as i32,
            y0: p.sy.floor() as i32,
            x1: (p.sx + p.sw).ceil() as i32 - 1,
            y1: (p.sy + p.sh).ceil() as i32 - 1,
        };
        let paint = PaintSource::Image(sampler);
        render(&mut self.surface, &self.state, coverage.as_ref(), Some(&paint));
    }

    /// Create a pattern from any image source. The pixels are copied.
    pub fn create_pattern_from_source<'a>(
        &self,
        image: impl Into<CanvasImageSource<'a>>,
        repetition: &str,
    ) -> Canvas2dResult<Arc<CanvasPattern>> {
        let rep = repetition.parse::<Repetition>()?;
        let pixels = image.into().pixels()?;
        Ok(Arc::new(CanvasPattern::from_surface(pixels.into_owned(), rep)))
    }

    // --- Pixel access ---

    /// Create transparent black image data.
    pub fn create_image_data(&self, width: u32, height: u32) -> Canvas2dResult<ImageData> {
        ImageData::new(width, height)
    }

    /// Read a region of the canvas as straight-alpha RGBA. Pixels outside
    /// the canvas read as transparent black.
    pub fn get_image_data(&self, x: i32, y: i32, width: u32, height: u32) -> Canvas2dResult<ImageData> {
        log::debug!(target: "canvas", "getImageData {} {} {}x{}", x, y, width, height);
        validate_dimensions(width, height)?;
        let data = self.surface.to_rgba(x, y, width, height);
        ImageData::from_vec(width, height, data)
    }

    /// Write image data at (dx, dy), bypassing transform, compositing,
    /// alpha, shadow, filter and clip.
    pub fn put_image_data(&mut self, data: &ImageData, dx: i32, dy: i32) -> Canvas2dResult<()> {
        self.put_image_data_dirty(
            data,
            dx,
            dy,
            &DirtyRect {
                x: 0,
                y: 0,
                width: data.width() as i32,
                height: data.height() as i32,
            },
        )
    }

    /// Write only the `dirty` region of image data at (dx, dy).
    /// Pixels outside the canvas bounds are silently ignored.
    pub fn put_image_data_dirty(
        &mut self,
        data: &ImageData,
        dx: i32,
        dy: i32,
        dirty: &DirtyRect,
    ) -> Canvas2dResult<()> {
        log::debug!(target: "canvas", "putImageData at {} {} dirty {:?}", dx, dy, dirty);
        self.surface
            .write_rgba(data.data(), data.width(), data.height(), dx, dy, dirty)
    }

    // --- Output ---

    /// Export the canvas as PNG, with an optional pixels-per-inch hint.
    pub fn to_png(&self, ppi: Option<f32>) -> Canvas2dResult<Vec<u8>> {
        encode_png(&self.surface, ppi)
    }
}

#[allow(clippy::too_many_arguments)]
fn crop(sx: f32, sy: f32, sw: f32, sh: f32, dx: f32, dy: f32, dw: f32, dh: f32) -> ImageCropParams {
    ImageCropParams {
        sx,
        sy,
        sw,
        sh,
        dx,
        dy,
        dw,
        dh,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::create_image_bitmap;
    use crate::error::Canvas2dError;

    fn checker() -> ImageData {
        // 2x2: red, green / blue, white
        ImageData::from_vec(
            2,
            2,
            vec![
                255, 0, 0, 255, 0, 255, 0, 255, //
                0, 0, 255, 255, 255, 255, 255, 255,
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_draw_image_at_offset() {
        let mut ctx = Canvas2dContext::new(6, 6).unwrap();
        ctx.draw_image(&checker(), 2.0, 3.0).unwrap();
        assert_eq!(ctx.surface().pixel(2, 3), Some([255, 0, 0, 255]));
        assert_eq!(ctx.surface().pixel(3, 4), Some([255, 255, 255, 255]));
        assert_eq!(ctx.surface().pixel(1, 3), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_draw_image_scaled_nearest() {
        let mut ctx = Canvas2dContext::new(8, 8).unwrap();
        ctx.set_image_smoothing_enabled(false);
        ctx.draw_image_scaled(&checker(), 0.0, 0.0, 8.0, 8.0).unwrap();
        assert_eq!(ctx.surface().pixel(3, 3), Some([255, 0, 0, 255]));
        assert_eq!(ctx.surface().pixel(4, 0), Some([0, 255, 0, 255]));
        assert_eq!(ctx.surface().pixel(0, 7), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_draw_image_cropped() {
        let mut ctx = Canvas2dContext::new(8, 8).unwrap();
        ctx.set_image_smoothing_enabled(false);
        let params = crop(1.0, 0.0, 1.0, 2.0, 2.0, 2.0, 4.0, 4.0);
        ctx.draw_image_cropped(&checker(), &params).unwrap();
        assert_eq!(ctx.surface().pixel(2, 2), Some([0, 255, 0, 255]));
        assert_eq!(ctx.surface().pixel(5, 5), Some([255, 255, 255, 255]));
        assert_eq!(ctx.surface().pixel(6, 2), Some([0, 0, 0, 0]));
        assert_eq!(ctx.surface().pixel(1, 2), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_draw_closed_bitmap_fails_cleanly() {
        let mut ctx = Canvas2dContext::new(4, 4).unwrap();
        let mut bitmap = create_image_bitmap(&checker()).unwrap();
        bitmap.close();
        assert!(matches!(
            ctx.draw_image(&bitmap, 0.0, 0.0),
            Err(Canvas2dError::InvalidState(_))
        ));
        assert!(ctx.surface().data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_get_put_image_data() {
        let mut ctx = Canvas2dContext::new(4, 4).unwrap();
        let data = ImageData::from_vec(1, 1, vec![10, 20, 30, 128]).unwrap();
        ctx.put_image_data(&data, 1, 1).unwrap();
        let read = ctx.get_image_data(1, 1, 1, 1).unwrap();
        let px = read.data();
        assert_eq!(px[3], 128);
        assert!((px[0] as i32 - 10).abs() <= 1);
        assert!((px[2] as i32 - 30).abs() <= 1);

        let outside = ctx.get_image_data(-2, -2, 2, 2).unwrap();
        assert!(outside.data().iter().all(|&b| b == 0));
        assert!(ctx.get_image_data(0, 0, 0, 1).is_err());
    }

    #[test]
    fn test_put_image_data_dirty() {
        let mut ctx = Canvas2dContext::new(4, 4).unwrap();
        ctx.put_image_data_dirty(
            &checker(),
            0,
            0,
            &DirtyRect {
                x: 1,
                y: 1,
                width: 1,
                height: 1,
            },
        )
        .unwrap();
        assert_eq!(ctx.surface().pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(ctx.surface().pixel(1, 1), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_put_image_data_ignores_state() {
        let mut ctx = Canvas2dContext::new(2, 2).unwrap();
        ctx.set_global_alpha(0.1);
        ctx.set_global_composite_operation("xor");
        ctx.translate(1.0, 1.0);
        ctx.put_image_data(&checker(), 0, 0).unwrap();
        assert_eq!(ctx.surface().pixel(0, 0), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_pattern_from_canvas() {
        let mut src = Canvas2dContext::new(2, 2).unwrap();
        src.put_image_data(&checker(), 0, 0).unwrap();
        let mut ctx = Canvas2dContext::new(4, 4).unwrap();
        let pattern = ctx.create_pattern_from_source(&src, "repeat").unwrap();
        ctx.set_fill_style_pattern(pattern);
        ctx.fill_rect(&RectParams::new(0.0, 0.0, 4.0, 4.0));
        assert_eq!(ctx.surface().pixel(2, 2), Some([255, 0, 0, 255]));
        assert_eq!(ctx.surface().pixel(3, 3), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_to_png_signature() {
        let ctx = Canvas2dContext::new(3, 3).unwrap();
        let png = ctx.to_png(None).unwrap();
        assert_eq!(&png[..4], b"\x89PNG");
    }
}
