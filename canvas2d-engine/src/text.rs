//! Text metrics, alignment, and the glyph-run rasterizer interface.
//!
//! Shaping and font handling live behind [`GlyphRasterizer`]. The context
//! only asks for a run's metrics and its outline; the default
//! implementation uses cosmic-text over a fontdb database.

use crate::font_config::{font_config_to_fontdb, FontConfig};
use crate::font_parser::{FontStyle, ParsedFont};
use crate::style::{Direction, TextAlign, TextBaseline};
use cosmic_text::{
    Attrs, Buffer, CacheKeyFlags, Command, Family, FontSystem, Metrics, Shaping, Style, SwashCache,
    Weight,
};

/// Text metrics returned by measureText().
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMetrics {
    /// Advance width of the text in pixels.
    pub width: f32,
    /// Distance from baseline to top of the ink bounding box.
    pub actual_bounding_box_ascent: f32,
    /// Distance from baseline to bottom of the ink bounding box.
    pub actual_bounding_box_descent: f32,
    pub font_bounding_box_ascent: f32,
    pub font_bounding_box_descent: f32,
    /// Distance from the alignment point to the left of the ink bounding box.
    pub actual_bounding_box_left: f32,
    /// Distance from the alignment point to the right of the ink bounding box.
    pub actual_bounding_box_right: f32,
}

/// One run of text to measure or outline.
#[derive(Debug, Clone, Copy)]
pub struct GlyphRun<'a> {
    pub text: &'a str,
    pub font: &'a ParsedFont,
    /// Extra space after each character, in pixels.
    pub letter_spacing: f32,
}

/// External text capability used by `fillText`, `strokeText` and
/// `measureText`.
pub trait GlyphRasterizer: Send {
    /// Metrics of the run, relative to a left-aligned alphabetic baseline
    /// origin.
    fn measure(&mut self, run: &GlyphRun) -> TextMetrics;

    /// Outline of the run in pixels with the left end of the alphabetic
    /// baseline at (0, 0) and y pointing down. `None` when nothing is
    /// visible (empty text, whitespace, missing glyphs).
    fn outline(&mut self, run: &GlyphRun) -> Option<tiny_skia::Path>;
}

/// X offset that moves a run of `width` from its left edge to the anchor.
pub fn calculate_text_x_offset(width: f32, align: TextAlign, direction: Direction) -> f32 {
    let rtl = direction.is_rtl();
    match align {
        TextAlign::Left => 0.0,
        TextAlign::Right => -width,
        TextAlign::Center => -width / 2.0,
        TextAlign::Start if rtl => -width,
        TextAlign::Start => 0.0,
        TextAlign::End if rtl => 0.0,
        TextAlign::End => -width,
    }
}

/// Y offset from the anchor to the alphabetic baseline.
pub fn calculate_text_y_offset(ascent: f32, descent: f32, baseline: TextBaseline) -> f32 {
    match baseline {
        TextBaseline::Top => ascent,
        TextBaseline::Hanging => ascent * 0.8,
        TextBaseline::Middle => (ascent - descent) / 2.0,
        TextBaseline::Alphabetic => 0.0,
        TextBaseline::Ideographic => -descent * 0.5,
        TextBaseline::Bottom => -descent,
    }
}

/// cosmic-text backed rasterizer.
pub struct CosmicTextRasterizer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    hinting_enabled: bool,
}

impl CosmicTextRasterizer {
    /// Build the font database described by `config`. This scans system
    /// fonts when the config asks for them.
    pub fn new(config: &FontConfig) -> Self {
        let db = font_config_to_fontdb(config);
        Self {
            font_system: FontSystem::new_with_locale_and_db("en".to_string(), db),
            swash_cache: SwashCache::new(),
            hinting_enabled: config.hinting_enabled,
        }
    }

    fn shape(&mut self, run: &GlyphRun) -> Buffer {
        let font = run.font;
        let metrics = Metrics::new(font.size_px, font.size_px * 1.2);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);

        let family = font
            .families
            .first()
            .map(|f| css_family(f))
            .unwrap_or(Family::SansSerif);
        let style = match font.style {
            FontStyle::Normal => Style::Normal,
            FontStyle::Italic => Style::Italic,
            FontStyle::Oblique => Style::Oblique,
        };
        let flags = if self.hinting_enabled {
            CacheKeyFlags::empty()
        } else {
            CacheKeyFlags::DISABLE_HINTING
        };
        let attrs = Attrs::new()
            .family(family)
            .weight(Weight(font.weight))
            .style(style)
            .letter_spacing(run.letter_spacing)
            .cache_key_flags(flags);

        buffer.set_text(&mut self.font_system, run.text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }
}

fn css_family(name: &str) -> Family<'_> {
    match name {
        "serif" => Family::Serif,
        "sans-serif" => Family::SansSerif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        other => Family::Name(other),
    }
}

impl GlyphRasterizer for CosmicTextRasterizer {
    fn measure(&mut self, run: &GlyphRun) -> TextMetrics {
        let buffer = self.shape(run);
        let mut width: f32 = 0.0;
        let mut ascent: f32 = 0.0;
        let mut descent: f32 = 0.0;
        for line in buffer.layout_runs() {
            width = width.max(line.line_w);
            ascent = ascent.max(line.line_y - line.line_top);
            descent = descent.max(line.line_top + line.line_height - line.line_y);
        }
        if ascent == 0.0 && descent == 0.0 {
            ascent = run.font.size_px * 0.8;
            descent = run.font.size_px * 0.2;
        }

        let ink = self.outline(run).map(|p| p.bounds());
        TextMetrics {
            width,
            actual_bounding_box_ascent: ink.map_or(0.0, |b| -b.top()),
            actual_bounding_box_descent: ink.map_or(0.0, |b| b.bottom()),
            font_bounding_box_ascent: ascent,
            font_bounding_box_descent: descent,
            actual_bounding_box_left: ink.map_or(0.0, |b| -b.left()),
            actual_bounding_box_right: ink.map_or(width, |b| b.right()),
        }
    }

    fn outline(&mut self, run: &GlyphRun) -> Option<tiny_skia::Path> {
        let buffer = self.shape(run);
        let mut pb = tiny_skia::PathBuilder::new();
        // Single-line runs only.
        let line = buffer.layout_runs().next()?;
        for glyph in line.glyphs.iter() {
            let physical = glyph.physical((0.0, 0.0), 1.0);
            let gx = glyph.x + glyph.font_size * glyph.x_offset;
            let gy = glyph.y - glyph.font_size * glyph.y_offset;
            let Some(commands) = self
                .swash_cache
                .get_outline_commands(&mut self.font_system, physical.cache_key)
            else {
                continue;
            };
            // Font outlines are y-up.
            for cmd in commands {
                match *cmd {
                    Command::MoveTo(p) => pb.move_to(gx + p.x, gy - p.y),
                    Command::LineTo(p) => pb.line_to(gx + p.x, gy - p.y),
                    Command::QuadTo(c, p) => pb.quad_to(gx + c.x, gy - c.y, gx + p.x, gy - p.y),
                    Command::CurveTo(c1, c2, p) => pb.cubic_to(
                        gx + c1.x,
                        gy - c1.y,
                        gx + c2.x,
                        gy - c2.y,
                        gx + p.x,
                        gy - p.y,
                    ),
                    Command::Close => pb.close(),
                }
            }
        }
        pb.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TextAlign::Left, Direction::Ltr, 0.0)]
    #[case(TextAlign::Right, Direction::Ltr, -100.0)]
    #[case(TextAlign::Center, Direction::Rtl, -50.0)]
    #[case(TextAlign::Start, Direction::Ltr, 0.0)]
    #[case(TextAlign::Start, Direction::Rtl, -100.0)]
    #[case(TextAlign::End, Direction::Ltr, -100.0)]
    #[case(TextAlign::End, Direction::Rtl, 0.0)]
    #[case(TextAlign::Start, Direction::Inherit, 0.0)]
    fn test_x_offset(#[case] align: TextAlign, #[case] dir: Direction, #[case] expected: f32) {
        assert_eq!(calculate_text_x_offset(100.0, align, dir), expected);
    }

    #[test]
    fn test_y_offset() {
        assert_eq!(calculate_text_y_offset(8.0, 2.0, TextBaseline::Alphabetic), 0.0);
        assert_eq!(calculate_text_y_offset(8.0, 2.0, TextBaseline::Top), 8.0);
        assert_eq!(calculate_text_y_offset(8.0, 2.0, TextBaseline::Bottom), -2.0);
        assert_eq!(calculate_text_y_offset(8.0, 2.0, TextBaseline::Middle), 3.0);
    }
}
