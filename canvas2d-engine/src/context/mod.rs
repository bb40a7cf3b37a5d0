//! Canvas 2D rendering context implementation.

mod drawing;
mod image_ops;
mod path_ops;
mod render;
mod text_rendering;
mod transform;

use crate::composite::CompositeOperation;
use crate::drawing_state::DrawingState;
use crate::encoder::{DefaultImageEncoder, ImageEncoder};
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::filter::parse_filter;
use crate::font_config::FontConfig;
use crate::geometry::{CanvasColor, RadialGradientParams};
use crate::gradient::CanvasGradient;
use crate::path::Path;
use crate::pattern::{CanvasPattern, Repetition};
use crate::style::{FillStyle, ImageSmoothingQuality, LineCap, LineJoin};
use crate::surface::Surface;
use crate::text::GlyphRasterizer;
use std::sync::Arc;

/// Canvas 2D rendering context.
///
/// Owns one pixel surface, the current drawing state with its save stack,
/// and the current path. Paths are stored in device space: every point is
/// mapped through the transform current when it is added.
pub struct Canvas2dContext {
    pub(crate) surface: Surface,
    pub(crate) state: DrawingState,
    state_stack: Vec<DrawingState>,
    pub(crate) path: Path,
    /// Used to build the default glyph rasterizer on first text use.
    pub(crate) font_config: FontConfig,
    pub(crate) glyphs: Option<Box<dyn GlyphRasterizer>>,
    encoder: Arc<dyn ImageEncoder>,
}

impl std::fmt::Debug for Canvas2dContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas2dContext")
            .field("width", &self.surface.width())
            .field("height", &self.surface.height())
            .field("state", &self.state)
            .field("saved_states", &self.state_stack.len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Canvas2dContext`].
///
/// ```rust,ignore
/// use canvas2d_engine::{Canvas2dContext, FontConfig};
///
/// let ctx = Canvas2dContext::builder(400, 300)
///     .with_font_config(FontConfig { load_system_fonts: false, ..Default::default() })
///     .build()?;
/// ```
pub struct Canvas2dContextBuilder {
    width: u32,
    height: u32,
    font_config: FontConfig,
    glyphs: Option<Box<dyn GlyphRasterizer>>,
    encoder: Option<Arc<dyn ImageEncoder>>,
}

impl Canvas2dContextBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            font_config: FontConfig::default(),
            glyphs: None,
            encoder: None,
        }
    }

    /// Fonts for the default glyph rasterizer. The font database is only
    /// built when text is first drawn or measured.
    pub fn with_font_config(mut self, config: FontConfig) -> Self {
        self.font_config = config;
        self
    }

    /// Replace the default cosmic-text glyph rasterizer.
    pub fn with_glyph_rasterizer(mut self, glyphs: impl GlyphRasterizer + 'static) -> Self {
        self.glyphs = Some(Box::new(glyphs));
        self
    }

    /// Replace the default PNG/JPEG encoder.
    pub fn with_image_encoder(mut self, encoder: impl ImageEncoder + 'static) -> Self {
        self.encoder = Some(Arc::new(encoder));
        self
    }

    pub fn build(self) -> Canvas2dResult<Canvas2dContext> {
        let surface = Surface::new(self.width, self.height)?;
        log::debug!(target: "canvas", "new context {}x{}", self.width, self.height);
        Ok(Canvas2dContext {
            surface,
            state: DrawingState::default(),
            state_stack: Vec::new(),
            path: Path::new(),
            font_config: self.font_config,
            glyphs: self.glyphs,
            encoder: self.encoder.unwrap_or_else(|| Arc::new(DefaultImageEncoder)),
        })
    }
}

impl Canvas2dContext {
    /// Create a new context with default fonts and encoder.
    pub fn new(width: u32, height: u32) -> Canvas2dResult<Self> {
        Canvas2dContextBuilder::new(width, height).build()
    }

    pub fn builder(width: u32, height: u32) -> Canvas2dContextBuilder {
        Canvas2dContextBuilder::new(width, height)
    }

    /// Get canvas width.
    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    /// Get canvas height.
    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// The backing pixels.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The current drawing state.
    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    /// Number of states saved with [`save`](Self::save) and not yet restored.
    pub fn save_depth(&self) -> usize {
        self.state_stack.len()
    }

    /// Reallocate the surface and reset the context, as setting a canvas
    /// width or height does. On error nothing changes.
    pub fn resize(&mut self, width: u32, height: u32) -> Canvas2dResult<()> {
        log::debug!(target: "canvas", "resize {}x{}", width, height);
        self.surface.resize(width, height)?;
        self.reset_state();
        Ok(())
    }

    /// Swap the surface for a cleared one of the same size.
    pub(crate) fn take_surface(&mut self) -> Surface {
        let blank = Surface::blank(self.surface.width(), self.surface.height());
        std::mem::replace(&mut self.surface, blank)
    }

    /// Save the current drawing state.
    pub fn save(&mut self) {
        log::debug!(target: "canvas", "save");
        self.state_stack.push(self.state.clone());
    }

    /// Restore the previously saved drawing state. No-op on an empty stack.
    pub fn restore(&mut self) {
        log::debug!(target: "canvas", "restore");
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
        }
    }

    /// Reset the rendering context to its default state.
    ///
    /// This clears the canvas to transparent, resets all drawing state
    /// and empties both the state stack and the current path.
    pub fn reset(&mut self) {
        log::debug!(target: "canvas", "reset");
        self.surface.clear();
        self.reset_state();
    }

    fn reset_state(&mut self) {
        self.state = DrawingState::default();
        self.state_stack.clear();
        self.path.clear();
    }

    // --- Style setters ---

    /// Set the fill style from a CSS color string. On error the previous
    /// style is kept.
    pub fn set_fill_style(&mut self, style: &str) -> Canvas2dResult<()> {
        let color = parse_color(style)?;
        self.state.fill_style = FillStyle::Color(color);
        Ok(())
    }

    /// Set the fill style from a CanvasColor.
    pub fn set_fill_style_color(&mut self, color: CanvasColor) {
        self.state.fill_style = FillStyle::Color(color.into());
    }

    /// Set the stroke style from a CSS color string. On error the previous
    /// style is kept.
    pub fn set_stroke_style(&mut self, style: &str) -> Canvas2dResult<()> {
        let color = parse_color(style)?;
        self.state.stroke_style = FillStyle::Color(color);
        Ok(())
    }

    /// Set the stroke style from a CanvasColor.
    pub fn set_stroke_style_color(&mut self, color: CanvasColor) {
        self.state.stroke_style = FillStyle::Color(color.into());
    }

    pub fn get_fill_style(&self) -> &FillStyle {
        &self.state.fill_style
    }

    pub fn get_stroke_style(&self) -> &FillStyle {
        &self.state.stroke_style
    }

    /// Set the line width. Non-finite or non-positive values are ignored.
    pub fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    pub fn get_line_width(&self) -> f32 {
        self.state.line_width
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    pub fn get_line_cap(&self) -> LineCap {
        self.state.line_cap
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        self.state.line_join = join;
    }

    pub fn get_line_join(&self) -> LineJoin {
        self.state.line_join
    }

    /// Set the miter limit. Non-finite or non-positive values are ignored.
    pub fn set_miter_limit(&mut self, limit: f32) {
        if limit.is_finite() && limit > 0.0 {
            self.state.miter_limit = limit;
        }
    }

    pub fn get_miter_limit(&self) -> f32 {
        self.state.miter_limit
    }

    /// Set the global alpha. Values that are non-finite or outside
    /// [0.0, 1.0] are ignored.
    pub fn set_global_alpha(&mut self, alpha: f32) {
        if alpha.is_finite() && (0.0..=1.0).contains(&alpha) {
            self.state.global_alpha = alpha;
        }
    }

    pub fn get_global_alpha(&self) -> f32 {
        self.state.global_alpha
    }

    /// Set the global composite operation by its CSS keyword.
    /// Unknown keywords leave the current operation in place.
    /// Returns true if the value was accepted.
    pub fn set_global_composite_operation(&mut self, op: &str) -> bool {
        match op.parse::<CompositeOperation>() {
            Ok(op) => {
                self.state.global_composite_operation = op;
                true
            }
            Err(_) => {
                log::debug!(target: "canvas", "ignoring composite operation {op:?}");
                false
            }
        }
    }

    pub fn get_global_composite_operation(&self) -> CompositeOperation {
        self.state.global_composite_operation
    }

    /// Set the line dash pattern.
    /// Ignored if any value is non-finite or negative; odd-length lists are
    /// repeated to make them even.
    pub fn set_line_dash(&mut self, mut segments: Vec<f32>) {
        if segments.iter().any(|&v| !v.is_finite() || v < 0.0) {
            log::debug!(target: "canvas", "ignoring line dash {segments:?}");
            return;
        }
        if segments.len() % 2 != 0 {
            segments.extend_from_within(..);
        }
        self.state.line_dash = segments;
    }

    pub fn get_line_dash(&self) -> &[f32] {
        &self.state.line_dash
    }

    /// Set the line dash offset. Non-finite values are ignored.
    pub fn set_line_dash_offset(&mut self, offset: f32) {
        if offset.is_finite() {
            self.state.line_dash_offset = offset;
        }
    }

    pub fn get_line_dash_offset(&self) -> f32 {
        self.state.line_dash_offset
    }

    // --- Filter ---

    /// Set the filter from a CSS filter string.
    ///
    /// Invalid functions are dropped. A string with no valid function at
    /// all is rejected and the previous filter is kept; returns whether the
    /// value was accepted.
    pub fn set_filter(&mut self, filter: &str) -> bool {
        match parse_filter(filter) {
            Some(chain) => {
                self.state.filter = chain;
                true
            }
            None => {
                log::debug!(target: "canvas", "ignoring filter {filter:?}");
                false
            }
        }
    }

    pub fn get_filter(&self) -> &str {
        self.state.filter.as_str()
    }

    // --- Shadows ---

    pub fn set_shadow_offset_x(&mut self, offset: f32) {
        if offset.is_finite() {
            self.state.shadow_offset_x = offset;
        }
    }

    pub fn get_shadow_offset_x(&self) -> f32 {
        self.state.shadow_offset_x
    }

    pub fn set_shadow_offset_y(&mut self, offset: f32) {
        if offset.is_finite() {
            self.state.shadow_offset_y = offset;
        }
    }

    pub fn get_shadow_offset_y(&self) -> f32 {
        self.state.shadow_offset_y
    }

    /// Set the shadow blur. Non-finite or negative values are ignored.
    pub fn set_shadow_blur(&mut self, blur: f32) {
        if blur.is_finite() && blur >= 0.0 {
            self.state.shadow_blur = blur;
        }
    }

    pub fn get_shadow_blur(&self) -> f32 {
        self.state.shadow_blur
    }

    /// Set the shadow color from a CSS color string. On error the previous
    /// color is kept.
    pub fn set_shadow_color(&mut self, color: &str) -> Canvas2dResult<()> {
        self.state.shadow_color = parse_color(color)?;
        Ok(())
    }

    pub fn get_shadow_color(&self) -> tiny_skia::Color {
        self.state.shadow_color
    }

    // --- Image smoothing ---

    pub fn set_image_smoothing_enabled(&mut self, enabled: bool) {
        self.state.image_smoothing_enabled = enabled;
    }

    pub fn get_image_smoothing_enabled(&self) -> bool {
        self.state.image_smoothing_enabled
    }

    /// Set the image smoothing quality. Every quality level samples
    /// bilinearly.
    pub fn set_image_smoothing_quality(&mut self, quality: ImageSmoothingQuality) {
        self.state.image_smoothing_quality = quality;
    }

    pub fn get_image_smoothing_quality(&self) -> ImageSmoothingQuality {
        self.state.image_smoothing_quality
    }

    // --- Gradients ---

    /// Create a linear gradient.
    pub fn create_linear_gradient(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> CanvasGradient {
        CanvasGradient::new_linear(x0, y0, x1, y1)
    }

    /// Create a radial gradient. Negative radii are rejected.
    pub fn create_radial_gradient(&self, params: &RadialGradientParams) -> Canvas2dResult<CanvasGradient> {
        if params.r0 < 0.0 || params.r1 < 0.0 {
            return Err(Canvas2dError::InvalidArgument(format!(
                "Negative radial gradient radius: r0={}, r1={}",
                params.r0, params.r1
            )));
        }
        Ok(CanvasGradient::new_radial(params))
    }

    /// Create a conic gradient sweeping clockwise from `start_angle`
    /// around (x, y).
    pub fn create_conic_gradient(&self, start_angle: f32, x: f32, y: f32) -> CanvasGradient {
        CanvasGradient::new_conic(start_angle, x, y)
    }

    pub fn set_fill_style_gradient(&mut self, gradient: CanvasGradient) {
        self.state.fill_style = FillStyle::Gradient(gradient);
    }

    pub fn set_stroke_style_gradient(&mut self, gradient: CanvasGradient) {
        self.state.stroke_style = FillStyle::Gradient(gradient);
    }

    // --- Patterns ---

    /// Create a pattern from RGBA pixel data.
    ///
    /// # Arguments
    /// * `data` - RGBA pixel data (4 bytes per pixel, non-premultiplied)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `repetition` - "repeat", "repeat-x", "repeat-y", "no-repeat" or ""
    pub fn create_pattern(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
        repetition: &str,
    ) -> Canvas2dResult<Arc<CanvasPattern>> {
        let rep = repetition.parse::<Repetition>()?;
        let pattern = CanvasPattern::new(data, width, height, rep)?;
        Ok(Arc::new(pattern))
    }

    pub fn set_fill_style_pattern(&mut self, pattern: Arc<CanvasPattern>) {
        self.state.fill_style = FillStyle::Pattern(pattern);
    }

    pub fn set_stroke_style_pattern(&mut self, pattern: Arc<CanvasPattern>) {
        self.state.stroke_style = FillStyle::Pattern(pattern);
    }

    // --- Encoding ---

    /// Encode the canvas with the configured image encoder. Unknown MIME
    /// types fall back to PNG with the default encoder.
    pub fn to_blob(&self, mime_type: &str, quality: Option<f64>) -> Canvas2dResult<crate::encoder::Blob> {
        log::debug!(target: "canvas", "toBlob {mime_type}");
        self.encoder.encode(&self.surface, mime_type, quality)
    }
}

/// Parse a CSS color string into a tiny_skia::Color.
///
/// Components are quantized to 8 bits, rounding to nearest, so `0.5` alpha
/// is stored as 128.
pub(crate) fn parse_color(s: &str) -> Canvas2dResult<tiny_skia::Color> {
    let parsed = csscolorparser::parse(s)
        .map_err(|e| Canvas2dError::ColorParseError(format!("{}: {}", s, e)))?;

    let [r, g, b, a] = parsed.to_rgba8();
    Ok(tiny_skia::Color::from_rgba8(r, g, b, a))
}
