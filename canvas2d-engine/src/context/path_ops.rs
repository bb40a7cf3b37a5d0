//! Path building operations for Canvas2dContext.
//!
//! Points are mapped through the current transform as they are added, so
//! later transform changes do not move already-built geometry.

use super::Canvas2dContext;
use crate::arc;
use crate::geometry::{
    ArcParams, ArcToParams, CubicBezierParams, EllipseParams, QuadraticBezierParams, RectParams,
    RoundRectParams,
};
use crate::error::Canvas2dResult;
use crate::path::map_point;

impl Canvas2dContext {
    /// Begin a new path.
    pub fn begin_path(&mut self) {
        log::debug!(target: "canvas", "beginPath");
        self.path.clear();
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "moveTo {} {}", x, y);
        let p = map_point(&self.state.transform, x, y);
        self.path.move_to(p);
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "lineTo {} {}", x, y);
        let p = map_point(&self.state.transform, x, y);
        self.path.line_to(p);
    }

    pub fn close_path(&mut self) {
        log::debug!(target: "canvas", "closePath");
        self.path.close();
    }

    pub fn bezier_curve_to(&mut self, params: &CubicBezierParams) {
        log::debug!(target: "canvas", "bezierCurveTo {:?}", params);
        let ts = &self.state.transform;
        self.path.cubic_to(
            map_point(ts, params.cp1x, params.cp1y),
            map_point(ts, params.cp2x, params.cp2y),
            map_point(ts, params.x, params.y),
        );
    }

    pub fn quadratic_curve_to(&mut self, params: &QuadraticBezierParams) {
        log::debug!(target: "canvas", "quadraticCurveTo {:?}", params);
        let ts = &self.state.transform;
        self.path
            .quad_to(map_point(ts, params.cpx, params.cpy), map_point(ts, params.x, params.y));
    }

    /// Add a closed rectangle subpath.
    pub fn rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "rect {:?}", params);
        arc::rect(&mut self.path, &self.state.transform, params);
    }

    /// Add a rounded rectangle subpath. Negative radii are an error.
    pub fn round_rect(&mut self, params: &RoundRectParams) -> Canvas2dResult<()> {
        log::debug!(target: "canvas", "roundRect {:?}", params);
        arc::round_rect(&mut self.path, &self.state.transform, params)
    }

    /// Add a circular arc. A negative radius is an error.
    pub fn arc(&mut self, params: &ArcParams) -> Canvas2dResult<()> {
        log::debug!(target: "canvas", "arc {:?}", params);
        arc::ellipse(&mut self.path, &self.state.transform, &EllipseParams::from(params))
    }

    /// Add a tangent arc from the current point. A negative radius is an
    /// error.
    pub fn arc_to(&mut self, params: &ArcToParams) -> Canvas2dResult<()> {
        log::debug!(target: "canvas", "arcTo {:?}", params);
        arc::arc_to(&mut self.path, &self.state.transform, params)
    }

    /// Add an elliptical arc. Negative radii are an error.
    pub fn ellipse(&mut self, params: &EllipseParams) -> Canvas2dResult<()> {
        log::debug!(target: "canvas", "ellipse {:?}", params);
        arc::ellipse(&mut self.path, &self.state.transform, params)
    }
}
