//! Drawing operations (fill, stroke, clip, rect) and hit testing for Canvas2dContext.

use super::render::{erase, PaintKind};
use super::Canvas2dContext;
use crate::geometry::RectParams;
use crate::path::Path;
use crate::path2d::Path2D;
use crate::raster::{contains_point, fill_coverage, stroke_outline, ClipMask, StrokeStyle};
use crate::style::CanvasFillRule;

impl Canvas2dContext {
    /// Fill the current path with the nonzero rule.
    pub fn fill(&mut self) {
        self.fill_with_rule(CanvasFillRule::NonZero);
    }

    /// Fill the current path with the given fill rule.
    pub fn fill_with_rule(&mut self, fill_rule: CanvasFillRule) {
        log::debug!(target: "canvas", "fill {:?}", fill_rule);
        if let Some(device) = self.path.to_skia() {
            self.render_path(&device, fill_rule, PaintKind::Fill);
        }
    }

    /// Stroke the current path.
    pub fn stroke(&mut self) {
        log::debug!(target: "canvas", "stroke");
        let path = std::mem::take(&mut self.path);
        self.stroke_device_path(&path);
        self.path = path;
    }

    /// Intersect the clip with the current path using the nonzero rule.
    pub fn clip(&mut self) {
        self.clip_with_rule(CanvasFillRule::NonZero);
    }

    /// Intersect the clip with the current path.
    pub fn clip_with_rule(&mut self, fill_rule: CanvasFillRule) {
        log::debug!(target: "canvas", "clip {:?}", fill_rule);
        let device = self.path.to_skia();
        self.intersect_clip(device.as_ref(), fill_rule);
    }

    /// Fill a Path2D with the nonzero rule.
    pub fn fill_path2d(&mut self, path: &Path2D) {
        self.fill_path2d_with_rule(path, CanvasFillRule::NonZero);
    }

    /// Fill a Path2D, mapped through the current transform.
    pub fn fill_path2d_with_rule(&mut self, path: &Path2D, fill_rule: CanvasFillRule) {
        log::debug!(target: "canvas", "fill Path2D {:?}", fill_rule);
        if let Some(device) = self.device_path(path).to_skia() {
            self.render_path(&device, fill_rule, PaintKind::Fill);
        }
    }

    /// Stroke a Path2D, mapped through the current transform.
    pub fn stroke_path2d(&mut self, path: &Path2D) {
        log::debug!(target: "canvas", "stroke Path2D");
        let device = self.device_path(path);
        self.stroke_device_path(&device);
    }

    pub fn clip_path2d(&mut self, path: &Path2D) {
        self.clip_path2d_with_rule(path, CanvasFillRule::NonZero);
    }

    /// Intersect the clip with a Path2D.
    pub fn clip_path2d_with_rule(&mut self, path: &Path2D, fill_rule: CanvasFillRule) {
        log::debug!(target: "canvas", "clip Path2D {:?}", fill_rule);
        let device = self.device_path(path).to_skia();
        self.intersect_clip(device.as_ref(), fill_rule);
    }

    /// Fill a rectangle without touching the current path.
    pub fn fill_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "fillRect {:?}", params);
        if let Some(device) = self.rect_path(params).to_skia() {
            self.render_path(&device, CanvasFillRule::NonZero, PaintKind::Fill);
        }
    }

    /// Stroke a rectangle without touching the current path.
    pub fn stroke_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "strokeRect {:?}", params);
        if params.width == 0.0 && params.height == 0.0 {
            return;
        }
        let device = self.rect_path(params);
        self.stroke_device_path(&device);
    }

    /// Clear a rectangle to transparent black, inside the clip.
    pub fn clear_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "clearRect {:?}", params);
        let Some(device) = self.rect_path(params).to_skia() else {
            return;
        };
        let (width, height) = (self.surface.width(), self.surface.height());
        if let Some(coverage) = fill_coverage(&device, CanvasFillRule::NonZero, width, height) {
            erase(&mut self.surface, &self.state, &coverage);
        }
    }

    // --- Hit testing ---

    /// Whether the canvas point (x, y) is inside the current path. The
    /// point is not affected by the current transform.
    pub fn is_point_in_path(&self, x: f32, y: f32, fill_rule: CanvasFillRule) -> bool {
        self.path
            .to_skia()
            .is_some_and(|p| contains_point(&p, fill_rule, x, y))
    }

    /// Whether the canvas point (x, y) is inside a Path2D drawn with the
    /// current transform.
    pub fn is_point_in_path2d(&self, path: &Path2D, x: f32, y: f32, fill_rule: CanvasFillRule) -> bool {
        self.device_path(path)
            .to_skia()
            .is_some_and(|p| contains_point(&p, fill_rule, x, y))
    }

    /// Whether the canvas point (x, y) is inside the stroke of the current path.
    pub fn is_point_in_stroke(&self, x: f32, y: f32) -> bool {
        self.stroke_contains(&self.path, x, y)
    }

    pub fn is_point_in_stroke_path2d(&self, path: &Path2D, x: f32, y: f32) -> bool {
        self.stroke_contains(&self.device_path(path), x, y)
    }

    // --- Helpers ---

    pub(crate) fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            width: self.state.line_width,
            cap: self.state.line_cap,
            join: self.state.line_join,
            miter_limit: self.state.miter_limit,
            dash: self.state.line_dash.clone(),
            dash_offset: self.state.line_dash_offset,
        }
    }

    fn stroke_device_path(&mut self, path: &Path) {
        let Some(device) = path.to_skia() else {
            return;
        };
        let style = self.stroke_style();
        if let Some(outline) = stroke_outline(&device, &style, &self.state.transform) {
            self.render_path(&outline, CanvasFillRule::NonZero, PaintKind::Stroke);
        }
    }

    fn stroke_contains(&self, path: &Path, x: f32, y: f32) -> bool {
        let Some(device) = path.to_skia() else {
            return false;
        };
        stroke_outline(&device, &self.stroke_style(), &self.state.transform)
            .is_some_and(|outline| contains_point(&outline, CanvasFillRule::NonZero, x, y))
    }

    fn device_path(&self, path: &Path2D) -> Path {
        path.path().transformed(&self.state.transform)
    }

    pub(crate) fn rect_path(&self, params: &RectParams) -> Path {
        let mut path = Path::new();
        crate::arc::rect(&mut path, &self.state.transform, params);
        path
    }

    fn intersect_clip(&mut self, device: Option<&tiny_skia::Path>, fill_rule: CanvasFillRule) {
        let (width, height) = (self.surface.width(), self.surface.height());
        let mask = ClipMask::from_path(device, fill_rule, width, height);
        match &mut self.state.clip {
            Some(clip) if clip.matches(width, height) => clip.intersect(&mask),
            slot => *slot = Some(mask),
        }
    }
}
