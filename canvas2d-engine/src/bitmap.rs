//! Immutable bitmap snapshots and their open/closed lifecycle.

use crate::context::Canvas2dContext;
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::image_data::ImageData;
use crate::offscreen::OffscreenCanvas;
use crate::surface::Surface;
use std::borrow::Cow;

/// An immutable pixel snapshot.
///
/// A bitmap is either open, owning its surface, or closed. Closing is
/// irreversible: a closed bitmap reports 0x0 and cannot be drawn,
/// transferred or copied.
#[derive(Debug, PartialEq, Eq)]
pub struct ImageBitmap {
    surface: Option<Surface>,
}

impl ImageBitmap {
    pub(crate) fn from_surface(surface: Surface) -> Self {
        Self {
            surface: Some(surface),
        }
    }

    /// Width in pixels, 0 once closed.
    pub fn width(&self) -> u32 {
        self.surface.as_ref().map_or(0, Surface::width)
    }

    /// Height in pixels, 0 once closed.
    pub fn height(&self) -> u32 {
        self.surface.as_ref().map_or(0, Surface::height)
    }

    pub fn is_closed(&self) -> bool {
        self.surface.is_none()
    }

    /// Release the pixels. Closing twice is a no-op.
    pub fn close(&mut self) {
        if self.surface.take().is_some() {
            log::debug!(target: "canvas", "close image bitmap");
        }
    }

    /// The pixels of an open bitmap.
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// Move the pixels into a new handle, closing this one. The content is
    /// not copied.
    pub fn transfer(&mut self) -> Canvas2dResult<ImageBitmap> {
        let surface = self
            .surface
            .take()
            .ok_or_else(|| Canvas2dError::InvalidState("cannot transfer a closed ImageBitmap".to_string()))?;
        log::debug!(
            target: "canvas",
            "transfer image bitmap {}x{}",
            surface.width(),
            surface.height()
        );
        Ok(ImageBitmap::from_surface(surface))
    }

    pub(crate) fn open_surface(&self) -> Canvas2dResult<&Surface> {
        self.surface
            .as_ref()
            .ok_or_else(|| Canvas2dError::InvalidState("ImageBitmap is closed".to_string()))
    }
}

/// Anything drawImage, createPattern or createImageBitmap can read pixels
/// from.
#[derive(Debug, Clone, Copy)]
pub enum CanvasImageSource<'a> {
    Surface(&'a Surface),
    Canvas(&'a Canvas2dContext),
    Offscreen(&'a OffscreenCanvas),
    ImageData(&'a ImageData),
    Bitmap(&'a ImageBitmap),
}

impl<'a> CanvasImageSource<'a> {
    /// Premultiplied pixels of the source. Fails for a closed bitmap.
    pub(crate) fn pixels(&self) -> Canvas2dResult<Cow<'a, Surface>> {
        Ok(match *self {
            CanvasImageSource::Surface(s) => Cow::Borrowed(s),
            CanvasImageSource::Canvas(ctx) => Cow::Borrowed(ctx.surface()),
            CanvasImageSource::Offscreen(canvas) => Cow::Borrowed(canvas.surface()),
            CanvasImageSource::ImageData(data) => {
                Cow::Owned(Surface::from_rgba(data.width(), data.height(), data.data())?)
            }
            CanvasImageSource::Bitmap(bitmap) => Cow::Borrowed(bitmap.open_surface()?),
        })
    }
}

impl<'a> From<&'a Surface> for CanvasImageSource<'a> {
    fn from(s: &'a Surface) -> Self {
        CanvasImageSource::Surface(s)
    }
}

impl<'a> From<&'a Canvas2dContext> for CanvasImageSource<'a> {
    fn from(ctx: &'a Canvas2dContext) -> Self {
        CanvasImageSource::Canvas(ctx)
    }
}

impl<'a> From<&'a OffscreenCanvas> for CanvasImageSource<'a> {
    fn from(canvas: &'a OffscreenCanvas) -> Self {
        CanvasImageSource::Offscreen(canvas)
    }
}

impl<'a> From<&'a ImageData> for CanvasImageSource<'a> {
    fn from(data: &'a ImageData) -> Self {
        CanvasImageSource::ImageData(data)
    }
}

impl<'a> From<&'a ImageBitmap> for CanvasImageSource<'a> {
    fn from(bitmap: &'a ImageBitmap) -> Self {
        CanvasImageSource::Bitmap(bitmap)
    }
}

/// Snapshot `source` into a new open bitmap. Later changes to the source
/// do not affect the bitmap.
pub fn create_image_bitmap<'a>(source: impl Into<CanvasImageSource<'a>>) -> Canvas2dResult<ImageBitmap> {
    let pixels = source_pixels(source.into())?;
    log::debug!(
        target: "canvas",
        "createImageBitmap {}x{}",
        pixels.width(),
        pixels.height()
    );
    Ok(ImageBitmap::from_surface(pixels.into_owned()))
}

/// Snapshot the `(sx, sy, sw, sh)` region of `source`. Negative extents
/// flip the rectangle; areas outside the source are transparent.
pub fn create_image_bitmap_cropped<'a>(
    source: impl Into<CanvasImageSource<'a>>,
    sx: i32,
    sy: i32,
    sw: i32,
    sh: i32,
) -> Canvas2dResult<ImageBitmap> {
    if sw == 0 || sh == 0 {
        return Err(Canvas2dError::InvalidArgument(format!(
            "crop rectangle {sw}x{sh} has zero area"
        )));
    }
    let pixels = source_pixels(source.into())?;
    let (x, width) = if sw < 0 { (sx + sw, sw.unsigned_abs()) } else { (sx, sw as u32) };
    let (y, height) = if sh < 0 { (sy + sh, sh.unsigned_abs()) } else { (sy, sh as u32) };
    log::debug!(
        target: "canvas",
        "createImageBitmap crop ({x}, {y}) {width}x{height}"
    );
    Ok(ImageBitmap::from_surface(pixels.crop(x, y, width, height)?))
}

fn source_pixels(source: CanvasImageSource<'_>) -> Canvas2dResult<Cow<'_, Surface>> {
    let pixels = source.pixels()?;
    if pixels.width() == 0 || pixels.height() == 0 {
        return Err(Canvas2dError::UnsupportedSource(
            "image source has no pixels".to_string(),
        ));
    }
    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Surface {
        let data: Vec<u8> = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Surface::from_rgba(width, height, &data).unwrap()
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut bitmap = create_image_bitmap(&solid(4, 3, [1, 2, 3, 255])).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (4, 3));
        bitmap.close();
        assert!(bitmap.is_closed());
        assert_eq!((bitmap.width(), bitmap.height()), (0, 0));
        bitmap.close();
        assert_eq!((bitmap.width(), bitmap.height()), (0, 0));
    }

    #[test]
    fn test_transfer_moves_pixels() {
        let mut sender = create_image_bitmap(&solid(2, 2, [9, 9, 9, 255])).unwrap();
        let receiver = sender.transfer().unwrap();
        assert!(sender.is_closed());
        assert_eq!(receiver.width(), 2);
        assert_eq!(receiver.surface().unwrap().pixel(0, 0), Some([9, 9, 9, 255]));
        assert!(matches!(sender.transfer(), Err(Canvas2dError::InvalidState(_))));
    }

    #[test]
    fn test_copy_is_independent_of_source() {
        let mut original = create_image_bitmap(&solid(2, 2, [255, 0, 0, 255])).unwrap();
        let copy = create_image_bitmap(&original).unwrap();
        original.close();
        assert_eq!(copy.surface().unwrap().pixel(1, 1), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_closed_source_is_rejected() {
        let mut bitmap = create_image_bitmap(&solid(2, 2, [0, 0, 0, 255])).unwrap();
        bitmap.close();
        assert!(matches!(
            create_image_bitmap(&bitmap),
            Err(Canvas2dError::InvalidState(_))
        ));
    }

    #[test]
    fn test_cropped_bitmap() {
        let data = ImageData::from_vec(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255]).unwrap();
        let bitmap = create_image_bitmap_cropped(&data, 1, 0, 2, 1).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (2, 1));
        let surface = bitmap.surface().unwrap();
        assert_eq!(surface.pixel(0, 0), Some([0, 255, 0, 255]));
        assert_eq!(surface.pixel(1, 0), Some([0, 0, 0, 0]));

        let flipped = create_image_bitmap_cropped(&data, 1, 1, -1, -1).unwrap();
        assert_eq!(flipped.surface().unwrap().pixel(0, 0), Some([255, 0, 0, 255]));

        assert!(matches!(
            create_image_bitmap_cropped(&data, 0, 0, 0, 1),
            Err(Canvas2dError::InvalidArgument(_))
        ));
    }
}
