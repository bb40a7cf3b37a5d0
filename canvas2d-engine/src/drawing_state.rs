//! Drawing state that can be saved and restored.

use crate::composite::CompositeOperation;
use crate::filter::FilterChain;
use crate::font_parser::ParsedFont;
use crate::raster::ClipMask;
use crate::style::{
    Direction, FillStyle, ImageSmoothingQuality, LineCap, LineJoin, TextAlign, TextBaseline,
};
use tiny_skia::Transform;

/// Drawing state that can be saved and restored.
///
/// `save` pushes a full copy, clip mask and filter chain included.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingState {
    pub fill_style: FillStyle,
    pub stroke_style: FillStyle,
    pub line_width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f32,
    /// Always even length.
    pub line_dash: Vec<f32>,
    pub line_dash_offset: f32,
    pub font: ParsedFont,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
    pub direction: Direction,
    /// Letter spacing for text rendering (in pixels).
    pub letter_spacing: f32,
    pub global_alpha: f32,
    pub global_composite_operation: CompositeOperation,
    pub shadow_offset_x: f32,
    pub shadow_offset_y: f32,
    pub shadow_blur: f32,
    pub shadow_color: tiny_skia::Color,
    pub filter: FilterChain,
    /// Current transform matrix.
    pub transform: Transform,
    /// Device-space clip coverage; `None` is unbounded.
    pub(crate) clip: Option<ClipMask>,
    pub image_smoothing_enabled: bool,
    pub image_smoothing_quality: ImageSmoothingQuality,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            fill_style: FillStyle::default(),
            stroke_style: FillStyle::default(),
            line_width: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            miter_limit: 10.0,
            line_dash: Vec::new(),
            line_dash_offset: 0.0,
            font: ParsedFont::default(),
            text_align: TextAlign::default(),
            text_baseline: TextBaseline::default(),
            direction: Direction::default(),
            letter_spacing: 0.0,
            global_alpha: 1.0,
            global_composite_operation: CompositeOperation::default(),
            shadow_offset_x: 0.0,
            shadow_offset_y: 0.0,
            shadow_blur: 0.0,
            shadow_color: tiny_skia::Color::TRANSPARENT,
            filter: FilterChain::default(),
            transform: Transform::identity(),
            clip: None,
            image_smoothing_enabled: true,
            image_smoothing_quality: ImageSmoothingQuality::default(),
        }
    }
}

impl DrawingState {
    /// Whether drawing casts a visible shadow.
    pub(crate) fn has_shadow(&self) -> bool {
        self.shadow_color.alpha() > 0.0
            && (self.shadow_blur > 0.0 || self.shadow_offset_x != 0.0 || self.shadow_offset_y != 0.0)
    }
}
