//! Encoding pixel surfaces into named image formats.
//!
//! The context and `OffscreenCanvas` only call [`ImageEncoder::encode`];
//! the format codecs themselves are external crates.

use crate::error::{Canvas2dError, Canvas2dResult};
use crate::surface::Surface;
use std::io::Cursor;

/// Default JPEG quality when none (or an out-of-range value) is given.
pub const DEFAULT_JPEG_QUALITY: f64 = 0.92;

/// Encoded image bytes tagged with their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    mime_type: String,
    data: Vec<u8>,
}

impl Blob {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// The `type` of the blob, e.g. `image/png`.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Encodes a surface into a [`Blob`] of the requested MIME type.
///
/// `quality` is the 0..1 hint passed to lossy formats.
pub trait ImageEncoder: Send + Sync {
    fn encode(&self, surface: &Surface, mime_type: &str, quality: Option<f64>) -> Canvas2dResult<Blob>;
}

/// PNG via the `png` crate, JPEG via `image`. Any other MIME type falls
/// back to PNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultImageEncoder;

impl ImageEncoder for DefaultImageEncoder {
    fn encode(&self, surface: &Surface, mime_type: &str, quality: Option<f64>) -> Canvas2dResult<Blob> {
        match mime_type.to_ascii_lowercase().as_str() {
            "image/png" | "" => Ok(Blob::new("image/png", encode_png(surface, None)?)),
            "image/jpeg" | "image/jpg" => Ok(Blob::new("image/jpeg", encode_jpeg(surface, quality)?)),
            other => {
                log::warn!(target: "canvas", "unsupported blob type {other:?}, encoding as image/png");
                Ok(Blob::new("image/png", encode_png(surface, None)?))
            }
        }
    }
}

/// Encode a surface as straight-alpha RGBA PNG.
///
/// `ppi` sets the pHYs chunk when given.
pub fn encode_png(surface: &Surface, ppi: Option<f32>) -> Canvas2dResult<Vec<u8>> {
    let (width, height) = (surface.width(), surface.height());
    let data = surface.to_rgba(0, 0, width, height);

    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        if let Some(ppi) = ppi {
            let ppm = (ppi.max(0.0) / 0.0254).round() as u32;
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));
        }
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&data)?;
    }
    Ok(buf)
}

/// Encode a surface as baseline JPEG. Transparent areas composite over black.
pub fn encode_jpeg(surface: &Surface, quality: Option<f64>) -> Canvas2dResult<Vec<u8>> {
    let quality = quality
        .filter(|q| q.is_finite() && (0.0..=1.0).contains(q))
        .unwrap_or(DEFAULT_JPEG_QUALITY);
    let quality = ((quality * 100.0).round() as u8).max(1);

    // Premultiplied color over black is the color channels as stored.
    let rgb: Vec<u8> = surface
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    let img = image::RgbImage::from_raw(surface.width(), surface.height(), rgb)
        .ok_or_else(|| Canvas2dError::EncodingError("Failed to create RGB image".to_string()))?;

    let mut buf = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut buf), quality);
    img.write_with_encoder(encoder)?;
    Ok(buf)
}
