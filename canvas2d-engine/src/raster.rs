//! Coverage rasterization for fills, strokes and clip regions.
//!
//! Paths arrive in device space. Coverage is produced by tiny-skia's
//! antialiased scan converter into an 8-bit [`tiny_skia::Mask`].

use crate::style::{CanvasFillRule, LineCap, LineJoin};
use tiny_skia::{Mask, PathStroker, Transform};

/// Integer pixel rectangle, half-open: `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PixelBounds {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelBounds {
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: width,
            y1: height,
        }
    }

    /// Round a float rectangle outward and clamp it to the surface.
    /// `None` when nothing of it lies on the surface.
    pub fn from_rect(rect: tiny_skia::Rect, width: u32, height: u32) -> Option<Self> {
        let x0 = rect.left().floor().max(0.0);
        let y0 = rect.top().floor().max(0.0);
        let x1 = rect.right().ceil().min(width as f32);
        let y1 = rect.bottom().ceil().min(height as f32);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self {
            x0: x0 as u32,
            y0: y0 as u32,
            x1: x1 as u32,
            y1: y1 as u32,
        })
    }

    /// Grow by `by` pixels on every side, clamped to the surface.
    pub fn outset(self, by: u32, width: u32, height: u32) -> Self {
        Self {
            x0: self.x0.saturating_sub(by),
            y0: self.y0.saturating_sub(by),
            x1: self.x1.saturating_add(by).min(width),
            y1: self.y1.saturating_add(by).min(height),
        }
    }
}

/// Antialiased coverage of a device-space path plus the pixels it touches.
pub(crate) struct Coverage {
    pub mask: Mask,
    pub bounds: PixelBounds,
}

impl Coverage {
    pub fn at(&self, x: u32, y: u32) -> u8 {
        self.mask.data()[(y * self.mask.width() + x) as usize]
    }
}

/// Rasterize a device-space path with the given fill rule.
///
/// Returns `None` for empty or degenerate paths and for paths entirely off
/// the surface.
pub(crate) fn fill_coverage(
    path: &tiny_skia::Path,
    rule: CanvasFillRule,
    width: u32,
    height: u32,
) -> Option<Coverage> {
    let bounds = PixelBounds::from_rect(path.bounds(), width, height)?;
    let mut mask = Mask::new(width, height)?;
    mask.fill_path(path, rule.into(), true, Transform::identity());
    Some(Coverage { mask, bounds })
}

/// Pen parameters for stroke expansion.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StrokeStyle {
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
    pub miter_limit: f32,
    pub dash: Vec<f32>,
    pub dash_offset: f32,
}

/// Expand a device-space path into its stroke outline, also in device space.
///
/// The pen is applied in user space so that a non-uniform transform
/// stretches the line width the same way it stretches the geometry. Dashes
/// are measured along user-space arc length.
pub(crate) fn stroke_outline(
    device: &tiny_skia::Path,
    style: &StrokeStyle,
    ctm: &Transform,
) -> Option<tiny_skia::Path> {
    let inverse = ctm.invert()?;
    let mut user = device.clone().transform(inverse)?;
    let res_scale = PathStroker::compute_resolution_scale(ctm);

    if !style.dash.is_empty() {
        match tiny_skia::StrokeDash::new(style.dash.clone(), style.dash_offset) {
            Some(dash) => user = user.dash(&dash, res_scale)?,
            // All-zero dash lists draw nothing.
            None => return None,
        }
    }

    let stroke = tiny_skia::Stroke {
        width: style.width,
        miter_limit: style.miter_limit,
        line_cap: style.cap.into(),
        line_join: style.join.into(),
        dash: None,
    };
    user.stroke(&stroke, res_scale)?.transform(*ctm)
}

/// Device-space point test against a filled path, sampling the point with
/// non-antialiased coverage.
pub(crate) fn contains_point(path: &tiny_skia::Path, rule: CanvasFillRule, x: f32, y: f32) -> bool {
    if !x.is_finite() || !y.is_finite() {
        return false;
    }
    let Some(mut sample) = Mask::new(1, 1) else {
        return false;
    };
    sample.fill_path(
        path,
        rule.into(),
        false,
        Transform::from_translate(0.5 - x, 0.5 - y),
    );
    sample.data()[0] > 0
}

/// Clip region as per-pixel coverage. Absence of a clip (`None` in the
/// drawing state) means unbounded.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ClipMask {
    width: u32,
    height: u32,
    coverage: Vec<u8>,
}

impl ClipMask {
    /// A clip covering `path` with the given fill rule. Paths that produce
    /// no coverage yield an empty clip, which hides all later drawing.
    pub fn from_path(path: Option<&tiny_skia::Path>, rule: CanvasFillRule, width: u32, height: u32) -> Self {
        let mut coverage = vec![0u8; width as usize * height as usize];
        if let Some(cov) = path.and_then(|p| fill_coverage(p, rule, width, height)) {
            coverage.copy_from_slice(cov.mask.data());
        }
        Self {
            width,
            height,
            coverage,
        }
    }

    /// Multiply this clip by another.
    pub fn intersect(&mut self, other: &ClipMask) {
        for (a, &b) in self.coverage.iter_mut().zip(&other.coverage) {
            *a = ((*a as u32 * b as u32 + 127) / 255) as u8;
        }
    }

    pub fn at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.coverage[(y * self.width + x) as usize]
    }

    pub fn matches(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Path;
    use tiny_skia::Point;

    fn square(x: f32, y: f32, size: f32) -> Path {
        let mut p = Path::new();
        p.polygon(&[
            Point::from_xy(x, y),
            Point::from_xy(x + size, y),
            Point::from_xy(x + size, y + size),
            Point::from_xy(x, y + size),
        ]);
        p
    }

    #[test]
    fn test_fill_coverage_pixel_aligned_rect() {
        let path = square(2.0, 2.0, 4.0).to_skia().unwrap();
        let cov = fill_coverage(&path, CanvasFillRule::NonZero, 10, 10).unwrap();
        assert_eq!(cov.at(3, 3), 255);
        assert_eq!(cov.at(1, 1), 0);
        assert_eq!(cov.at(6, 6), 0);
        assert_eq!(
            cov.bounds,
            PixelBounds {
                x0: 2,
                y0: 2,
                x1: 6,
                y1: 6
            }
        );
    }

    #[test]
    fn test_fill_coverage_off_surface() {
        let path = square(20.0, 20.0, 4.0).to_skia().unwrap();
        assert!(fill_coverage(&path, CanvasFillRule::NonZero, 10, 10).is_none());
    }

    #[test]
    fn test_even_odd_hole() {
        let mut path = square(0.0, 0.0, 10.0);
        path.append(&square(3.0, 3.0, 4.0), &Transform::identity());
        let skia = path.to_skia().unwrap();
        assert!(contains_point(&skia, CanvasFillRule::NonZero, 5.0, 5.0));
        assert!(!contains_point(&skia, CanvasFillRule::EvenOdd, 5.0, 5.0));
        assert!(contains_point(&skia, CanvasFillRule::EvenOdd, 1.0, 1.0));
        assert!(!contains_point(&skia, CanvasFillRule::NonZero, 11.0, 1.0));
    }

    #[test]
    fn test_stroke_outline_width() {
        let mut path = Path::new();
        path.move_to(Point::from_xy(0.0, 5.0));
        path.line_to(Point::from_xy(10.0, 5.0));
        let style = StrokeStyle {
            width: 2.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            miter_limit: 10.0,
            dash: Vec::new(),
            dash_offset: 0.0,
        };
        let outline = stroke_outline(&path.to_skia().unwrap(), &style, &Transform::identity()).unwrap();
        let b = outline.bounds();
        assert_eq!((b.top(), b.bottom()), (4.0, 6.0));

        // A 3x scale widens the pen.
        let scaled = path.transformed(&Transform::from_scale(3.0, 3.0));
        let outline = stroke_outline(&scaled.to_skia().unwrap(), &style, &Transform::from_scale(3.0, 3.0)).unwrap();
        let b = outline.bounds();
        assert!((b.bottom() - b.top() - 6.0).abs() < 1e-3);
    }

    #[test]
    fn test_dashed_stroke_has_gaps() {
        let mut path = Path::new();
        path.move_to(Point::from_xy(0.0, 5.0));
        path.line_to(Point::from_xy(20.0, 5.0));
        let style = StrokeStyle {
            width: 2.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            miter_limit: 10.0,
            dash: vec![5.0, 5.0],
            dash_offset: 0.0,
        };
        let outline = stroke_outline(&path.to_skia().unwrap(), &style, &Transform::identity()).unwrap();
        assert!(contains_point(&outline, CanvasFillRule::NonZero, 2.5, 5.0));
        assert!(!contains_point(&outline, CanvasFillRule::NonZero, 7.5, 5.0));
        assert!(contains_point(&outline, CanvasFillRule::NonZero, 12.5, 5.0));
    }

    #[test]
    fn test_clip_intersection_multiplies() {
        let a = square(0.0, 0.0, 6.0).to_skia();
        let b = square(4.0, 4.0, 6.0).to_skia();
        let mut clip = ClipMask::from_path(a.as_ref(), CanvasFillRule::NonZero, 10, 10);
        clip.intersect(&ClipMask::from_path(b.as_ref(), CanvasFillRule::NonZero, 10, 10));
        assert_eq!(clip.at(5, 5), 255);
        assert_eq!(clip.at(1, 1), 0);
        assert_eq!(clip.at(8, 8), 0);
    }

    #[test]
    fn test_empty_clip_hides_everything() {
        let clip = ClipMask::from_path(None, CanvasFillRule::NonZero, 4, 4);
        assert_eq!(clip.at(0, 0), 0);
        assert!(clip.matches(4, 4));
    }
}
