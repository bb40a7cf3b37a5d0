//! Owned premultiplied RGBA pixel buffers.

use crate::error::{Canvas2dError, Canvas2dResult};
use crate::geometry::DirtyRect;

/// Maximum surface dimension (same as Chrome).
pub const MAX_DIMENSION: u32 = 32767;

/// A rectangular buffer of premultiplied RGBA samples.
///
/// The buffer length is always `width * height * 4`. Resizing reallocates
/// and clears every sample to transparent black.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

pub(crate) fn validate_dimensions(width: u32, height: u32) -> Canvas2dResult<()> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(Canvas2dError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Convert a straight-alpha sample to premultiplied form, rounding to nearest.
pub(crate) fn premultiply(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    match a {
        255 => [r, g, b, a],
        0 => [0, 0, 0, 0],
        _ => {
            let a16 = a as u16;
            [
                ((r as u16 * a16 + 127) / 255) as u8,
                ((g as u16 * a16 + 127) / 255) as u8,
                ((b as u16 * a16 + 127) / 255) as u8,
                a,
            ]
        }
    }
}

/// Convert a premultiplied sample back to straight alpha, rounding to nearest.
pub(crate) fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    match a {
        255 => [r, g, b, a],
        0 => [0, 0, 0, 0],
        _ => {
            let a32 = a as u32;
            let channel = |c: u8| ((c as u32 * 255 + a32 / 2) / a32).min(255) as u8;
            [channel(r), channel(g), channel(b), a]
        }
    }
}

impl Surface {
    /// Create a transparent surface.
    pub fn new(width: u32, height: u32) -> Canvas2dResult<Self> {
        validate_dimensions(width, height)?;
        Ok(Self::blank(width, height))
    }

    /// Wrap an existing premultiplied RGBA buffer.
    pub fn from_premultiplied(width: u32, height: u32, data: Vec<u8>) -> Canvas2dResult<Self> {
        validate_dimensions(width, height)?;
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(Canvas2dError::InvalidArgument(format!(
                "Data length {} does not match expected {} for {}x{} RGBA surface",
                data.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a surface from straight-alpha RGBA bytes (ImageData layout).
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Canvas2dResult<Self> {
        let mut surface = Self::new(width, height)?;
        if rgba.len() != surface.data.len() {
            return Err(Canvas2dError::InvalidArgument(format!(
                "Data length {} does not match expected {} for {}x{} RGBA image",
                rgba.len(),
                surface.data.len(),
                width,
                height
            )));
        }
        for (dst, src) in surface.data.chunks_exact_mut(4).zip(rgba.chunks_exact(4)) {
            dst.copy_from_slice(&premultiply(src[0], src[1], src[2], src[3]));
        }
        Ok(surface)
    }

    /// A transparent surface whose dimensions were already validated.
    pub(crate) fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA samples, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Reallocate to new dimensions. All prior content is discarded.
    pub fn resize(&mut self, width: u32, height: u32) -> Canvas2dResult<()> {
        validate_dimensions(width, height)?;
        *self = Self::blank(width, height);
        Ok(())
    }

    /// Clear every sample to transparent black.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Premultiplied sample at (x, y), if inside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }

    /// Read a region as straight-alpha RGBA. Samples outside the surface read as transparent.
    pub fn to_rgba(&self, x: i32, y: i32, width: u32, height: u32) -> Vec<u8> {
        let mut out = vec![0u8; width as usize * height as usize * 4];
        for row in 0..height as i64 {
            let sy = y as i64 + row;
            if sy < 0 || sy >= self.height as i64 {
                continue;
            }
            for col in 0..width as i64 {
                let sx = x as i64 + col;
                if sx < 0 || sx >= self.width as i64 {
                    continue;
                }
                let src = (sy as usize * self.width as usize + sx as usize) * 4;
                let dst = (row as usize * width as usize + col as usize) * 4;
                let p = &self.data[src..src + 4];
                out[dst..dst + 4].copy_from_slice(&unpremultiply(p[0], p[1], p[2], p[3]));
            }
        }
        out
    }

    /// Write straight-alpha RGBA directly into the surface, bypassing compositing.
    ///
    /// Only the `dirty` region of the source is written. Destination pixels
    /// outside the surface are ignored.
    pub fn write_rgba(
        &mut self,
        rgba: &[u8],
        src_width: u32,
        src_height: u32,
        dx: i32,
        dy: i32,
        dirty: &DirtyRect,
    ) -> Canvas2dResult<()> {
        let expected = src_width as usize * src_height as usize * 4;
        if rgba.len() != expected {
            return Err(Canvas2dError::InvalidArgument(format!(
                "Data length {} does not match expected {} for {}x{} RGBA image",
                rgba.len(),
                expected,
                src_width,
                src_height
            )));
        }

        let (dirty_x, dirty_width) = normalize_span(dirty.x, dirty.width);
        let (dirty_y, dirty_height) = normalize_span(dirty.y, dirty.height);
        let x0 = dirty_x.max(0);
        let y0 = dirty_y.max(0);
        let x1 = (dirty_x + dirty_width).min(src_width as i64);
        let y1 = (dirty_y + dirty_height).min(src_height as i64);

        for sy in y0..y1 {
            let ty = dy as i64 + sy;
            if ty < 0 || ty >= self.height as i64 {
                continue;
            }
            for sx in x0..x1 {
                let tx = dx as i64 + sx;
                if tx < 0 || tx >= self.width as i64 {
                    continue;
                }
                let src = (sy as usize * src_width as usize + sx as usize) * 4;
                let dst = (ty as usize * self.width as usize + tx as usize) * 4;
                let p = &rgba[src..src + 4];
                self.data[dst..dst + 4].copy_from_slice(&premultiply(p[0], p[1], p[2], p[3]));
            }
        }
        Ok(())
    }

    /// Copy a region into a new surface. Areas outside this surface become transparent.
    pub fn crop(&self, x: i32, y: i32, width: u32, height: u32) -> Canvas2dResult<Surface> {
        let mut out = Surface::new(width, height)?;
        for row in 0..height as i64 {
            let sy = y as i64 + row;
            if sy < 0 || sy >= self.height as i64 {
                continue;
            }
            let sx0 = (x as i64).max(0);
            let sx1 = (x as i64 + width as i64).min(self.width as i64);
            if sx0 >= sx1 {
                continue;
            }
            let src = (sy as usize * self.width as usize + sx0 as usize) * 4;
            let len = (sx1 - sx0) as usize * 4;
            let dst = (row as usize * width as usize + (sx0 - x as i64) as usize) * 4;
            out.data[dst..dst + len].copy_from_slice(&self.data[src..src + len]);
        }
        Ok(out)
    }

    /// Bounding box `(x0, y0, x1, y1)` of samples with non-zero alpha, exclusive on the far edge.
    pub(crate) fn content_bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        let stride = self.width as usize * 4;
        for y in 0..self.height {
            let row = &self.data[y as usize * stride..(y as usize + 1) * stride];
            let first = row.chunks_exact(4).position(|p| p[3] != 0);
            let Some(first) = first else { continue };
            let last = row.chunks_exact(4).rposition(|p| p[3] != 0).unwrap_or(first);
            bounds = Some(match bounds {
                None => (first as u32, y, last as u32 + 1, y + 1),
                Some((x0, y0, x1, _)) => (x0.min(first as u32), y0, x1.max(last as u32 + 1), y + 1),
            });
        }
        bounds
    }
}

/// Normalize a possibly negative span into (start, length).
fn normalize_span(start: i32, len: i32) -> (i64, i64) {
    if len < 0 {
        (start as i64 + len as i64, -(len as i64))
    } else {
        (start as i64, len as i64)
    }
}
