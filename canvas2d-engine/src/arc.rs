//! Arc, ellipse and rounded-rectangle geometry.
//!
//! Curved shapes are built in user space and mapped point by point into
//! the path's device space. Elliptical arcs are approximated with cubic
//! Bezier curves via kurbo, using a tolerance scaled by the transform so
//! that magnified arcs stay smooth.

use crate::error::{Canvas2dError, Canvas2dResult};
use crate::geometry::{ArcToParams, EllipseParams, RectParams, RoundRectParams};
use crate::path::{map_point, Path};
use std::f64::consts::TAU;
use tiny_skia::Transform;

/// Maximum deviation of the cubic approximation, in device pixels.
const DEVICE_TOLERANCE: f64 = 0.05;

/// Kappa for quarter-ellipse cubic Bezier approximation.
const K: f32 = 0.552_284_8;

/// Largest axis scale of a transform.
pub(crate) fn max_scale(ts: &Transform) -> f32 {
    let sx = (ts.sx * ts.sx + ts.ky * ts.ky).sqrt();
    let sy = (ts.kx * ts.kx + ts.sy * ts.sy).sqrt();
    sx.max(sy)
}

/// Signed sweep for an arc, following the canvas angle normalization rules.
fn sweep_angle(start: f64, end: f64, anticlockwise: bool) -> f64 {
    if anticlockwise {
        if start - end >= TAU {
            -TAU
        } else {
            -(start - end).rem_euclid(TAU)
        }
    } else if end - start >= TAU {
        TAU
    } else {
        (end - start).rem_euclid(TAU)
    }
}

/// Add an elliptical arc. Connects from the current point with a straight
/// line when the path already has a subpath.
pub(crate) fn ellipse(path: &mut Path, ts: &Transform, params: &EllipseParams) -> Canvas2dResult<()> {
    let EllipseParams {
        x,
        y,
        radius_x,
        radius_y,
        rotation,
        start_angle,
        end_angle,
        anticlockwise,
    } = *params;
    let values = [x, y, radius_x, radius_y, rotation, start_angle, end_angle];
    if values.iter().any(|v| !v.is_finite()) {
        return Ok(());
    }
    if radius_x < 0.0 || radius_y < 0.0 {
        return Err(Canvas2dError::InvalidArgument(format!(
            "Negative arc radius: {}, {}",
            radius_x, radius_y
        )));
    }

    let arc = kurbo::Arc {
        center: kurbo::Point::new(x as f64, y as f64),
        radii: kurbo::Vec2::new(radius_x as f64, radius_y as f64),
        start_angle: start_angle as f64,
        sweep_angle: sweep_angle(start_angle as f64, end_angle as f64, anticlockwise),
        x_rotation: rotation as f64,
    };

    let point_at = |angle: f64| {
        let (sin, cos) = angle.sin_cos();
        let (rot_sin, rot_cos) = arc.x_rotation.sin_cos();
        let px = arc.radii.x * cos;
        let py = arc.radii.y * sin;
        (
            arc.center.x + px * rot_cos - py * rot_sin,
            arc.center.y + px * rot_sin + py * rot_cos,
        )
    };

    let (sx, sy) = point_at(arc.start_angle);
    let start = map_point(ts, sx as f32, sy as f32);
    if path.is_empty() {
        path.move_to(start);
    } else {
        path.line_to(start);
    }

    if arc.sweep_angle == 0.0 {
        return Ok(());
    }
    if radius_x == 0.0 || radius_y == 0.0 {
        let (ex, ey) = point_at(arc.start_angle + arc.sweep_angle);
        path.line_to(map_point(ts, ex as f32, ey as f32));
        return Ok(());
    }

    let scale = (max_scale(ts) as f64).max(1e-6);
    let tolerance = (DEVICE_TOLERANCE / scale).max(1e-6);
    for el in arc.append_iter(tolerance) {
        match el {
            kurbo::PathEl::CurveTo(c1, c2, p) => path.cubic_to(
                map_point(ts, c1.x as f32, c1.y as f32),
                map_point(ts, c2.x as f32, c2.y as f32),
                map_point(ts, p.x as f32, p.y as f32),
            ),
            kurbo::PathEl::LineTo(p) => path.line_to(map_point(ts, p.x as f32, p.y as f32)),
            _ => {}
        }
    }
    Ok(())
}

/// Add a tangent arc through the corner (x1, y1) toward (x2, y2).
pub(crate) fn arc_to(path: &mut Path, ts: &Transform, params: &ArcToParams) -> Canvas2dResult<()> {
    let ArcToParams {
        x1,
        y1,
        x2,
        y2,
        radius,
    } = *params;
    if ![x1, y1, x2, y2, radius].iter().all(|v| v.is_finite()) {
        return Ok(());
    }
    if radius < 0.0 {
        return Err(Canvas2dError::InvalidArgument(format!(
            "Negative arcTo radius: {}",
            radius
        )));
    }

    let corner = map_point(ts, x1, y1);
    path.ensure_subpath(corner);

    let (Some(current), Some(inverse)) = (path.current_point(), ts.invert()) else {
        path.line_to(corner);
        return Ok(());
    };
    let p0 = map_point(&inverse, current.x, current.y);
    let (x0, y0) = (p0.x as f64, p0.y as f64);
    let (x1, y1, x2, y2, r) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64, radius as f64);

    let (v1x, v1y) = (x0 - x1, y0 - y1);
    let (v2x, v2y) = (x2 - x1, y2 - y1);
    let len1 = v1x.hypot(v1y);
    let len2 = v2x.hypot(v2y);
    let cross = v1x * v2y - v1y * v2x;

    if len1 < 1e-9 || len2 < 1e-9 || r == 0.0 || cross.abs() < 1e-9 * len1 * len2 {
        path.line_to(corner);
        return Ok(());
    }

    let (u1x, u1y) = (v1x / len1, v1y / len1);
    let (u2x, u2y) = (v2x / len2, v2y / len2);
    let theta = (u1x * u2x + u1y * u2y).clamp(-1.0, 1.0).acos();
    let tangent_dist = r / (theta / 2.0).tan();
    let center_dist = r / (theta / 2.0).sin();

    let (bx, by) = (u1x + u2x, u1y + u2y);
    let blen = bx.hypot(by);
    let (cx, cy) = (x1 + bx / blen * center_dist, y1 + by / blen * center_dist);
    let (t1x, t1y) = (x1 + u1x * tangent_dist, y1 + u1y * tangent_dist);
    let (t2x, t2y) = (x1 + u2x * tangent_dist, y1 + u2y * tangent_dist);

    ellipse(
        path,
        ts,
        &EllipseParams {
            x: cx as f32,
            y: cy as f32,
            radius_x: radius,
            radius_y: radius,
            rotation: 0.0,
            start_angle: (t1y - cy).atan2(t1x - cx) as f32,
            end_angle: (t2y - cy).atan2(t2x - cx) as f32,
            anticlockwise: cross > 0.0,
        },
    )
}

/// Add a closed rectangle and start a new subpath at its origin.
pub(crate) fn rect(path: &mut Path, ts: &Transform, params: &RectParams) {
    if !params.is_finite() {
        return;
    }
    let RectParams {
        x,
        y,
        width,
        height,
    } = *params;
    path.polygon(&[
        map_point(ts, x, y),
        map_point(ts, x + width, y),
        map_point(ts, x + width, y + height),
        map_point(ts, x, y + height),
    ]);
}

/// Add a closed rounded rectangle and start a new subpath at its origin.
pub(crate) fn round_rect(path: &mut Path, ts: &Transform, params: &RoundRectParams) -> Canvas2dResult<()> {
    let rect_params = RectParams::new(params.x, params.y, params.width, params.height);
    if !rect_params.is_finite() || params.radii.iter().any(|r| !r.x.is_finite() || !r.y.is_finite()) {
        return Ok(());
    }
    if params.radii.iter().any(|r| r.x < 0.0 || r.y < 0.0) {
        return Err(Canvas2dError::InvalidArgument(
            "roundRect radii must be non-negative".to_string(),
        ));
    }

    let (x, width) = if params.width < 0.0 {
        (params.x + params.width, -params.width)
    } else {
        (params.x, params.width)
    };
    let (y, height) = if params.height < 0.0 {
        (params.y + params.height, -params.height)
    } else {
        (params.y, params.height)
    };

    let [mut tl, mut tr, mut br, mut bl] = params.radii;

    // Overlapping corners shrink uniformly.
    let top = tl.x + tr.x;
    let bottom = bl.x + br.x;
    let left = tl.y + bl.y;
    let right = tr.y + br.y;
    let mut scale = 1.0_f32;
    for (sum, extent) in [(top, width), (bottom, width), (left, height), (right, height)] {
        if sum > extent && sum > 0.0 {
            scale = scale.min(extent / sum);
        }
    }
    for corner in [&mut tl, &mut tr, &mut br, &mut bl] {
        corner.x *= scale;
        corner.y *= scale;
    }

    let p = |px: f32, py: f32| map_point(ts, px, py);

    path.move_to(p(x + tl.x, y));
    path.line_to(p(x + width - tr.x, y));
    if tr.x > 0.0 && tr.y > 0.0 {
        path.cubic_to(
            p(x + width - tr.x + tr.x * K, y),
            p(x + width, y + tr.y - tr.y * K),
            p(x + width, y + tr.y),
        );
    }
    path.line_to(p(x + width, y + height - br.y));
    if br.x > 0.0 && br.y > 0.0 {
        path.cubic_to(
            p(x + width, y + height - br.y + br.y * K),
            p(x + width - br.x + br.x * K, y + height),
            p(x + width - br.x, y + height),
        );
    }
    path.line_to(p(x + bl.x, y + height));
    if bl.x > 0.0 && bl.y > 0.0 {
        path.cubic_to(
            p(x + bl.x - bl.x * K, y + height),
            p(x, y + height - bl.y + bl.y * K),
            p(x, y + height - bl.y),
        );
    }
    path.line_to(p(x, y + tl.y));
    if tl.x > 0.0 && tl.y > 0.0 {
        path.cubic_to(
            p(x, y + tl.y - tl.y * K),
            p(x + tl.x - tl.x * K, y),
            p(x + tl.x, y),
        );
    }
    path.close();
    path.move_to(p(params.x, params.y));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Segment;
    use std::f32::consts::PI;

    fn circle(r: f32, ts: Transform) -> Path {
        let mut path = Path::new();
        ellipse(
            &mut path,
            &ts,
            &EllipseParams {
                x: 0.0,
                y: 0.0,
                radius_x: r,
                radius_y: r,
                rotation: 0.0,
                start_angle: 0.0,
                end_angle: 2.0 * PI,
                anticlockwise: false,
            },
        )
        .unwrap();
        path
    }

    fn max_radius_error(path: &Path, r: f32) -> f32 {
        let sub = &path.subpaths()[0];
        let mut prev = sub.start;
        let mut worst = 0.0_f32;
        for seg in &sub.segments {
            if let Segment::Cubic(c1, c2, p) = *seg {
                for i in 1..8 {
                    let t = i as f32 / 8.0;
                    let mt = 1.0 - t;
                    let x = mt * mt * mt * prev.x
                        + 3.0 * mt * mt * t * c1.x
                        + 3.0 * mt * t * t * c2.x
                        + t * t * t * p.x;
                    let y = mt * mt * mt * prev.y
                        + 3.0 * mt * mt * t * c1.y
                        + 3.0 * mt * t * t * c2.y
                        + t * t * t * p.y;
                    worst = worst.max(((x * x + y * y).sqrt() - r).abs());
                }
                prev = p;
            }
        }
        worst
    }

    #[test]
    fn test_sweep_normalization() {
        assert_eq!(sweep_angle(0.0, TAU * 2.0, false), TAU);
        assert_eq!(sweep_angle(0.0, TAU * 2.0, true), 0.0);
        assert!((sweep_angle(0.0, -1.0, false) - (TAU - 1.0)).abs() < 1e-12);
        assert!((sweep_angle(1.0, 0.0, true) + 1.0).abs() < 1e-12);
        assert_eq!(sweep_angle(TAU, 0.0, true), -TAU);
    }

    #[test]
    fn test_full_circle_ends_at_start() {
        let path = circle(10.0, Transform::identity());
        let sub = &path.subpaths()[0];
        let end = sub.end();
        assert!((end.x - sub.start.x).abs() < 1e-3);
        assert!((end.y - sub.start.y).abs() < 1e-3);
    }

    #[test]
    fn test_magnified_circle_stays_smooth() {
        // A unit circle scaled 500x must stay within the device tolerance.
        let path = circle(1.0, Transform::from_scale(500.0, 500.0));
        assert!(max_radius_error(&path, 500.0) < 0.25);
    }

    #[test]
    fn test_negative_radius_is_error() {
        let mut path = Path::new();
        let result = ellipse(
            &mut path,
            &Transform::identity(),
            &EllipseParams {
                x: 0.0,
                y: 0.0,
                radius_x: -1.0,
                radius_y: 1.0,
                rotation: 0.0,
                start_angle: 0.0,
                end_angle: 1.0,
                anticlockwise: false,
            },
        );
        assert!(matches!(result, Err(Canvas2dError::InvalidArgument(_))));
        assert!(path.is_empty());
    }

    #[test]
    fn test_arc_connects_with_line() {
        let mut path = Path::new();
        path.move_to(tiny_skia::Point::from_xy(0.0, 0.0));
        ellipse(
            &mut path,
            &Transform::identity(),
            &EllipseParams {
                x: 50.0,
                y: 50.0,
                radius_x: 10.0,
                radius_y: 10.0,
                rotation: 0.0,
                start_angle: 0.0,
                end_angle: PI / 2.0,
                anticlockwise: false,
            },
        )
        .unwrap();
        let sub = &path.subpaths()[0];
        assert_eq!(sub.segments[0], Segment::Line(tiny_skia::Point::from_xy(60.0, 50.0)));
        let end = sub.end();
        assert!((end.x - 50.0).abs() < 1e-3);
        assert!((end.y - 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_arc_to_corner() {
        let mut path = Path::new();
        path.move_to(tiny_skia::Point::from_xy(0.0, 0.0));
        arc_to(
            &mut path,
            &Transform::identity(),
            &ArcToParams {
                x1: 20.0,
                y1: 0.0,
                x2: 20.0,
                y2: 20.0,
                radius: 5.0,
            },
        )
        .unwrap();
        let sub = &path.subpaths()[0];
        let Segment::Line(tangent) = sub.segments[0] else {
            panic!("expected a line to the first tangent point");
        };
        assert!((tangent.x - 15.0).abs() < 1e-3);
        assert!(tangent.y.abs() < 1e-3);
        let end = sub.end();
        assert!((end.x - 20.0).abs() < 1e-3);
        assert!((end.y - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_arc_to_collinear_is_line() {
        let mut path = Path::new();
        path.move_to(tiny_skia::Point::from_xy(0.0, 0.0));
        arc_to(
            &mut path,
            &Transform::identity(),
            &ArcToParams {
                x1: 10.0,
                y1: 0.0,
                x2: 20.0,
                y2: 0.0,
                radius: 5.0,
            },
        )
        .unwrap();
        assert_eq!(
            path.subpaths()[0].segments,
            vec![Segment::Line(tiny_skia::Point::from_xy(10.0, 0.0))]
        );
    }

    #[test]
    fn test_round_rect_bounds_and_new_subpath() {
        let mut path = Path::new();
        let params = RoundRectParams::with_radii(
            RectParams::new(10.0, 10.0, 40.0, 20.0),
            &[crate::geometry::CornerRadius::uniform(30.0)],
        )
        .unwrap();
        round_rect(&mut path, &Transform::identity(), &params).unwrap();
        let bounds = path.to_skia().unwrap().bounds();
        assert!((bounds.left() - 10.0).abs() < 1e-3);
        assert!((bounds.right() - 50.0).abs() < 1e-3);
        assert!((bounds.top() - 10.0).abs() < 1e-3);
        assert!((bounds.bottom() - 30.0).abs() < 1e-3);
        assert_eq!(path.current_point(), Some(tiny_skia::Point::from_xy(10.0, 10.0)));
    }
}
