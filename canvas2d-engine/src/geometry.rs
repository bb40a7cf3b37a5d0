//! Parameter structs for drawing operators.
//!
//! Named fields instead of long positional argument lists.

use crate::error::{Canvas2dError, Canvas2dResult};

/// Parameters for a circular arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Starting angle in radians.
    pub start_angle: f32,
    /// Ending angle in radians.
    pub end_angle: f32,
    pub anticlockwise: bool,
}

/// Parameters for an elliptical arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseParams {
    pub x: f32,
    pub y: f32,
    pub radius_x: f32,
    pub radius_y: f32,
    /// Rotation of the ellipse axes in radians.
    pub rotation: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    pub anticlockwise: bool,
}

impl From<&ArcParams> for EllipseParams {
    fn from(arc: &ArcParams) -> Self {
        Self {
            x: arc.x,
            y: arc.y,
            radius_x: arc.radius,
            radius_y: arc.radius,
            rotation: 0.0,
            start_angle: arc.start_angle,
            end_angle: arc.end_angle,
            anticlockwise: arc.anticlockwise,
        }
    }
}

/// Parameters for arcTo: a tangent arc through the corner (x1, y1) toward (x2, y2).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcToParams {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub radius: f32,
}

/// Parameters for a cubic Bezier curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezierParams {
    pub cp1x: f32,
    pub cp1y: f32,
    pub cp2x: f32,
    pub cp2y: f32,
    pub x: f32,
    pub y: f32,
}

/// Parameters for a quadratic Bezier curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezierParams {
    pub cpx: f32,
    pub cpy: f32,
    pub x: f32,
    pub y: f32,
}

/// An axis-aligned rectangle in user space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectParams {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectParams {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// An independent x/y corner radius for rounded rectangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerRadius {
    pub x: f32,
    pub y: f32,
}

impl CornerRadius {
    /// A corner radius with equal x and y values.
    pub const fn uniform(r: f32) -> Self {
        Self { x: r, y: r }
    }
}

/// Parameters for a rounded rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundRectParams {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Corner radii: top-left, top-right, bottom-right, bottom-left.
    pub radii: [CornerRadius; 4],
}

impl RoundRectParams {
    /// Expand a 1 to 4 element radius list the way `roundRect()` does.
    pub fn with_radii(
        rect: RectParams,
        radii: &[CornerRadius],
    ) -> Canvas2dResult<RoundRectParams> {
        let radii = match *radii {
            [all] => [all; 4],
            [tl_br, tr_bl] => [tl_br, tr_bl, tl_br, tr_bl],
            [tl, tr_bl, br] => [tl, tr_bl, br, tr_bl],
            [tl, tr, br, bl] => [tl, tr, br, bl],
            _ => {
                return Err(Canvas2dError::InvalidArgument(format!(
                    "roundRect expects 1 to 4 radii, got {}",
                    radii.len()
                )))
            }
        };
        if radii.iter().any(|r| r.x < 0.0 || r.y < 0.0) {
            return Err(Canvas2dError::InvalidArgument(
                "roundRect radii must be non-negative".to_string(),
            ));
        }
        Ok(RoundRectParams {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            radii,
        })
    }
}

/// Source and destination rectangles for the cropped drawImage form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageCropParams {
    pub sx: f32,
    pub sy: f32,
    pub sw: f32,
    pub sh: f32,
    pub dx: f32,
    pub dy: f32,
    pub dw: f32,
    pub dh: f32,
}

impl ImageCropParams {
    /// Flip negative widths/heights so both rectangles have positive extents.
    pub(crate) fn normalized(mut self) -> Self {
        if self.sw < 0.0 {
            self.sx += self.sw;
            self.sw = -self.sw;
        }
        if self.sh < 0.0 {
            self.sy += self.sh;
            self.sh = -self.sh;
        }
        if self.dw < 0.0 {
            self.dx += self.dw;
            self.dw = -self.dw;
        }
        if self.dh < 0.0 {
            self.dy += self.dh;
            self.dh = -self.dh;
        }
        self
    }

    /// Clip the source rectangle to `width` x `height`, shrinking the
    /// destination rectangle by the same proportion.
    pub(crate) fn clipped_to_source(self, width: u32, height: u32) -> Option<Self> {
        let p = self.normalized();
        if p.sw == 0.0 || p.sh == 0.0 || p.dw == 0.0 || p.dh == 0.0 {
            return None;
        }
        let scale_x = p.dw / p.sw;
        let scale_y = p.dh / p.sh;
        let sx0 = p.sx.max(0.0);
        let sy0 = p.sy.max(0.0);
        let sx1 = (p.sx + p.sw).min(width as f32);
        let sy1 = (p.sy + p.sh).min(height as f32);
        if sx1 <= sx0 || sy1 <= sy0 {
            return None;
        }
        Some(Self {
            sx: sx0,
            sy: sy0,
            sw: sx1 - sx0,
            sh: sy1 - sy0,
            dx: p.dx + (sx0 - p.sx) * scale_x,
            dy: p.dy + (sy0 - p.sy) * scale_y,
            dw: (sx1 - sx0) * scale_x,
            dh: (sy1 - sy0) * scale_y,
        })
    }
}

/// The region of an ImageData written by putImageData.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Parameters for a two-circle radial gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradientParams {
    pub x0: f32,
    pub y0: f32,
    pub r0: f32,
    pub x1: f32,
    pub y1: f32,
    pub r1: f32,
}

/// A backend-neutral RGBA color with 8-bit straight-alpha components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanvasColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl CanvasColor {
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl From<CanvasColor> for tiny_skia::Color {
    fn from(c: CanvasColor) -> Self {
        tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
    }
}
