//! Detached straight-alpha pixel snapshots.

use crate::error::{Canvas2dError, Canvas2dResult};
use crate::surface::validate_dimensions;

/// A width x height RGBA buffer, not premultiplied, independent of any
/// surface once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ImageData {
    /// Transparent black image data.
    pub fn new(width: u32, height: u32) -> Canvas2dResult<Self> {
        validate_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        })
    }

    /// Wrap RGBA bytes. The length must be exactly `width * height * 4`.
    pub fn from_vec(width: u32, height: u32, data: Vec<u8>) -> Canvas2dResult<Self> {
        validate_dimensions(width, height)?;
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(Canvas2dError::InvalidArgument(format!(
                "ImageData length {} does not match {}x{}",
                data.len(),
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

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}
