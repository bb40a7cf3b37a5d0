//! Image patterns for fill and stroke styles.

use crate::dom_matrix::DOMMatrix;
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::surface::Surface;
use std::sync::atomic::{AtomicU64, Ordering};
use tiny_skia::Transform;

/// Global counter for pattern IDs.
static PATTERN_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Pattern repetition mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Repetition {
    #[default]
    Repeat,
    RepeatX,
    RepeatY,
    NoRepeat,
}

impl Repetition {
    pub(crate) fn repeats_x(self) -> bool {
        matches!(self, Repetition::Repeat | Repetition::RepeatX)
    }

    pub(crate) fn repeats_y(self) -> bool {
        matches!(self, Repetition::Repeat | Repetition::RepeatY)
    }
}

impl std::str::FromStr for Repetition {
    type Err = Canvas2dError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "repeat" | "" => Ok(Repetition::Repeat),
            "repeat-x" => Ok(Repetition::RepeatX),
            "repeat-y" => Ok(Repetition::RepeatY),
            "no-repeat" => Ok(Repetition::NoRepeat),
            _ => Err(Canvas2dError::InvalidArgument(format!(
                "Invalid repetition mode: '{}'",
                s
            ))),
        }
    }
}

/// A snapshot of image pixels tiled as a paint style.
///
/// The pixels are copied at creation; later changes to the source do not
/// affect the pattern.
#[derive(Debug, Clone)]
pub struct CanvasPattern {
    id: u64,
    surface: Surface,
    repetition: Repetition,
    transform: Transform,
}

impl PartialEq for CanvasPattern {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.transform == other.transform
    }
}

impl CanvasPattern {
    /// Create a pattern from straight-alpha RGBA bytes.
    pub fn new(data: &[u8], width: u32, height: u32, repetition: Repetition) -> Canvas2dResult<Self> {
        Ok(Self::from_surface(Surface::from_rgba(width, height, data)?, repetition))
    }

    /// Create a pattern that takes ownership of a surface copy.
    pub fn from_surface(surface: Surface, repetition: Repetition) -> Self {
        Self {
            id: PATTERN_ID_COUNTER.fetch_add(1, Ordering::Relaxed),
            surface,
            repetition,
            transform: Transform::identity(),
        }
    }

    /// Set the pattern-space transform, applied before the context transform.
    pub fn set_transform(&mut self, transform: DOMMatrix) {
        self.transform = transform.into();
    }

    pub fn transform(&self) -> DOMMatrix {
        self.transform.into()
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    pub fn repetition(&self) -> Repetition {
        self.repetition
    }

    pub(crate) fn surface(&self) -> &Surface {
        &self.surface
    }

    pub(crate) fn pattern_transform(&self) -> Transform {
        self.transform
    }
}
