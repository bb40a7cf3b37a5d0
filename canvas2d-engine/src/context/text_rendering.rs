//! Text rendering operations for Canvas2dContext.

use super::render::PaintKind;
use super::Canvas2dContext;
use crate::error::Canvas2dResult;
use crate::font_parser::parse_font;
use crate::raster::stroke_outline;
use crate::style::{CanvasFillRule, Direction, TextAlign, TextBaseline};
use crate::text::{
    calculate_text_x_offset, calculate_text_y_offset, CosmicTextRasterizer, GlyphRasterizer,
    GlyphRun, TextMetrics,
};

impl Canvas2dContext {
    /// Set the font from a CSS font string. An unparsable string leaves the
    /// current font in place and returns the parse error.
    pub fn set_font(&mut self, font: &str) -> Canvas2dResult<()> {
        self.state.font = parse_font(font)?;
        Ok(())
    }

    /// The current font as a CSS font string.
    pub fn get_font(&self) -> String {
        self.state.font.to_css()
    }

    pub fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
    }

    pub fn get_text_align(&self) -> TextAlign {
        self.state.text_align
    }

    pub fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.text_baseline = baseline;
    }

    pub fn get_text_baseline(&self) -> TextBaseline {
        self.state.text_baseline
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.state.direction = direction;
    }

    pub fn get_direction(&self) -> Direction {
        self.state.direction
    }

    /// Set the letter spacing in pixels. Non-finite values are ignored.
    pub fn set_letter_spacing(&mut self, spacing: f32) {
        if spacing.is_finite() {
            self.state.letter_spacing = spacing;
        }
    }

    pub fn get_letter_spacing(&self) -> f32 {
        self.state.letter_spacing
    }

    /// Measure text with the current font and letter spacing.
    pub fn measure_text(&mut self, text: &str) -> TextMetrics {
        let font = self.state.font.clone();
        let run = GlyphRun {
            text,
            font: &font,
            letter_spacing: self.state.letter_spacing,
        };
        self.glyphs().measure(&run)
    }

    /// Fill text at (x, y) with the current fill style.
    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        log::debug!(target: "canvas", "fillText {:?} at {} {}", text, x, y);
        self.draw_text(text, x, y, None, PaintKind::Fill);
    }

    /// Fill text, compressed horizontally to fit `max_width`.
    pub fn fill_text_max_width(&mut self, text: &str, x: f32, y: f32, max_width: f32) {
        log::debug!(target: "canvas", "fillText {:?} at {} {} max {}", text, x, y, max_width);
        self.draw_text(text, x, y, Some(max_width), PaintKind::Fill);
    }

    /// Stroke text outlines at (x, y) with the current stroke style.
    pub fn stroke_text(&mut self, text: &str, x: f32, y: f32) {
        log::debug!(target: "canvas", "strokeText {:?} at {} {}", text, x, y);
        self.draw_text(text, x, y, None, PaintKind::Stroke);
    }

    pub fn stroke_text_max_width(&mut self, text: &str, x: f32, y: f32, max_width: f32) {
        log::debug!(target: "canvas", "strokeText {:?} at {} {} max {}", text, x, y, max_width);
        self.draw_text(text, x, y, Some(max_width), PaintKind::Stroke);
    }

    /// The glyph rasterizer, building the default one from the font
    /// config on first use.
    fn glyphs(&mut self) -> &mut Box<dyn GlyphRasterizer> {
        let config = &self.font_config;
        self.glyphs.get_or_insert_with(|| {
            log::debug!(target: "canvas", "building default glyph rasterizer");
            Box::new(CosmicTextRasterizer::new(config))
        })
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, max_width: Option<f32>, kind: PaintKind) {
        if text.is_empty() || !x.is_finite() || !y.is_finite() {
            return;
        }
        if max_width.is_some_and(|w| !w.is_finite() || w <= 0.0) {
            return;
        }

        let font = self.state.font.clone();
        let run = GlyphRun {
            text,
            font: &font,
            letter_spacing: self.state.letter_spacing,
        };
        let glyphs = self.glyphs();
        let metrics = glyphs.measure(&run);
        let Some(outline) = glyphs.outline(&run) else {
            return;
        };

        let scale_x = match max_width {
            Some(max) if metrics.width > max => max / metrics.width,
            _ => 1.0,
        };
        let dx = calculate_text_x_offset(
            metrics.width * scale_x,
            self.state.text_align,
            self.state.direction,
        );
        let dy = calculate_text_y_offset(
            metrics.font_bounding_box_ascent,
            metrics.font_bounding_box_descent,
            self.state.text_baseline,
        );
        let ctm = self.state.transform;
        let placement = ctm.pre_translate(x + dx, y + dy).pre_scale(scale_x, 1.0);
        let Some(device) = outline.transform(placement) else {
            return;
        };

        match kind {
            PaintKind::Fill => self.render_path(&device, CanvasFillRule::NonZero, kind),
            PaintKind::Stroke => {
                let style = self.stroke_style();
                if let Some(stroked) = stroke_outline(&device, &style, &ctm) {
                    self.render_path(&stroked, CanvasFillRule::NonZero, kind);
                }
            }
        }
    }
}
