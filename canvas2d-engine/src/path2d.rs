//! Reusable path objects.
//!
//! A Path2D records geometry in its own coordinate space. The context maps
//! it through the current transform each time it is filled, stroked,
//! clipped or hit-tested.

use crate::arc;
use crate::dom_matrix::DOMMatrix;
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::geometry::{
    ArcParams, ArcToParams, CubicBezierParams, EllipseParams, QuadraticBezierParams, RectParams,
    RoundRectParams,
};
use crate::path::Path;
use tiny_skia::{Point, Transform};

/// A path that can be built once and drawn many times.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path2D {
    path: Path,
}

impl Path2D {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse SVG path data, e.g. `"M10,10 L50,50 A10,10 0 0 1 100,100 Z"`.
    ///
    /// Relative, shorthand and arc commands are converted to absolute
    /// lines and curves.
    pub fn from_svg_path_data(path_data: &str) -> Canvas2dResult<Self> {
        let mut path = Path2D::new();

        for segment in svgtypes::SimplifyingPathParser::from(path_data) {
            let segment = segment.map_err(|e| {
                Canvas2dError::InvalidArgument(format!("Invalid SVG path data: {:?}", e))
            })?;

            match segment {
                svgtypes::SimplePathSegment::MoveTo { x, y } => path.move_to(x as f32, y as f32),
                svgtypes::SimplePathSegment::LineTo { x, y } => path.line_to(x as f32, y as f32),
                svgtypes::SimplePathSegment::Quadratic { x1, y1, x, y } => {
                    path.quadratic_curve_to(&QuadraticBezierParams {
                        cpx: x1 as f32,
                        cpy: y1 as f32,
                        x: x as f32,
                        y: y as f32,
                    })
                }
                svgtypes::SimplePathSegment::CurveTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => path.bezier_curve_to(&CubicBezierParams {
                    cp1x: x1 as f32,
                    cp1y: y1 as f32,
                    cp2x: x2 as f32,
                    cp2y: y2 as f32,
                    x: x as f32,
                    y: y as f32,
                }),
                svgtypes::SimplePathSegment::ClosePath => path.close_path(),
            }
        }

        Ok(path)
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Append the subpaths of `other`, optionally mapped through `transform`.
    /// A non-finite transform appends nothing.
    pub fn add_path(&mut self, other: &Path2D, transform: Option<DOMMatrix>) {
        let matrix = transform.unwrap_or_default();
        if !matrix.is_finite() {
            return;
        }
        self.path.append(&other.path, &Transform::from(matrix));
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(Point::from_xy(x, y));
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(Point::from_xy(x, y));
    }

    pub fn close_path(&mut self) {
        self.path.close();
    }

    pub fn bezier_curve_to(&mut self, params: &CubicBezierParams) {
        self.path.cubic_to(
            Point::from_xy(params.cp1x, params.cp1y),
            Point::from_xy(params.cp2x, params.cp2y),
            Point::from_xy(params.x, params.y),
        );
    }

    pub fn quadratic_curve_to(&mut self, params: &QuadraticBezierParams) {
        self.path.quad_to(
            Point::from_xy(params.cpx, params.cpy),
            Point::from_xy(params.x, params.y),
        );
    }

    pub fn rect(&mut self, params: &RectParams) {
        arc::rect(&mut self.path, &Transform::identity(), params);
    }

    pub fn round_rect(&mut self, params: &RoundRectParams) -> Canvas2dResult<()> {
        arc::round_rect(&mut self.path, &Transform::identity(), params)
    }

    pub fn arc(&mut self, params: &ArcParams) -> Canvas2dResult<()> {
        arc::ellipse(&mut self.path, &Transform::identity(), &EllipseParams::from(params))
    }

    pub fn arc_to(&mut self, params: &ArcToParams) -> Canvas2dResult<()> {
        arc::arc_to(&mut self.path, &Transform::identity(), params)
    }

    pub fn ellipse(&mut self, params: &EllipseParams) -> Canvas2dResult<()> {
        arc::ellipse(&mut self.path, &Transform::identity(), params)
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Segment;

    fn pt(x: f32, y: f32) -> Point {
        Point::from_xy(x, y)
    }

    #[test]
    fn test_svg_path_line() {
        let path = Path2D::from_svg_path_data("M10,10 L50,50 Z").unwrap();
        let sub = &path.path().subpaths()[0];
        assert_eq!(sub.start, pt(10.0, 10.0));
        assert_eq!(sub.segments, vec![Segment::Line(pt(50.0, 50.0))]);
        assert!(sub.closed);
    }

    #[test]
    fn test_svg_path_relative_commands() {
        let path = Path2D::from_svg_path_data("M10,10 l40,40 z").unwrap();
        assert_eq!(path.path().subpaths()[0].end(), pt(50.0, 50.0));
    }

    #[test]
    fn test_svg_path_curves() {
        let path = Path2D::from_svg_path_data("M0,0 Q50,50,100,0 C150,50,200,50,250,0").unwrap();
        let segs = &path.path().subpaths()[0].segments;
        assert_eq!(segs[0], Segment::Quad(pt(50.0, 50.0), pt(100.0, 0.0)));
        assert_eq!(
            segs[1],
            Segment::Cubic(pt(150.0, 50.0), pt(200.0, 50.0), pt(250.0, 0.0))
        );
    }

    #[test]
    fn test_svg_path_arc_produces_cubics() {
        let path = Path2D::from_svg_path_data("M10,10 A20,20 0 0 1 50,50").unwrap();
        let segs = &path.path().subpaths()[0].segments;
        assert!(!segs.is_empty());
        assert!(segs.iter().all(|s| matches!(s, Segment::Cubic(..))));
    }

    #[test]
    fn test_svg_path_empty_and_invalid() {
        assert!(Path2D::from_svg_path_data("").unwrap().is_empty());
        assert!(Path2D::from_svg_path_data("not valid path data").is_err());
    }

    #[test]
    fn test_add_path_with_transform() {
        let mut inner = Path2D::new();
        inner.rect(&RectParams::new(0.0, 0.0, 2.0, 2.0));
        let mut outer = Path2D::new();
        outer.add_path(&inner, Some(DOMMatrix::new(1.0, 0.0, 0.0, 1.0, 10.0, 5.0)));
        assert_eq!(outer.path().subpaths()[0].start, pt(10.0, 5.0));

        outer.add_path(&inner, Some(DOMMatrix::new(f32::NAN, 0.0, 0.0, 1.0, 0.0, 0.0)));
        outer.add_path(&inner, None);
        assert_eq!(outer.path().subpaths().len(), 4);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut a = Path2D::new();
        a.move_to(1.0, 1.0);
        let b = a.clone();
        a.line_to(2.0, 2.0);
        assert_ne!(a, b);
    }
}
