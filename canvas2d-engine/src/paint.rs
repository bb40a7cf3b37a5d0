//! Paint resolution: turns a fill or stroke style into a per-pixel color
//! source evaluated at device pixel centers.
//!
//! All samples are premultiplied RGBA in `0.0..=1.0`.

use crate::gradient::{CanvasGradient, GradientType};
use crate::pattern::Repetition;
use crate::raster::Coverage;
use crate::style::FillStyle;
use crate::surface::Surface;
use std::f32::consts::TAU;
use tiny_skia::Transform;

/// Inclusive integer texel range that bilinear taps are clamped to.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TexelRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl TexelRect {
    fn whole(surface: &Surface) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: surface.width() as i32 - 1,
            y1: surface.height() as i32 - 1,
        }
    }
}

/// Image sampling parameters shared by patterns and drawImage.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ImageSampler<'a> {
    pub surface: &'a Surface,
    /// Device space to source texel space.
    pub inverse: Transform,
    pub repetition: Repetition,
    pub smoothing: bool,
    pub texels: TexelRect,
}

impl<'a> ImageSampler<'a> {
    pub fn new(surface: &'a Surface, inverse: Transform, repetition: Repetition, smoothing: bool) -> Self {
        Self {
            surface,
            inverse,
            repetition,
            smoothing,
            texels: TexelRect::whole(surface),
        }
    }

    fn sample(&self, u: f32, v: f32) -> [f32; 4] {
        let wrap_x = self.repetition.repeats_x();
        let wrap_y = self.repetition.repeats_y();
        let t = self.texels;
        // Outside a non-repeating axis nothing is painted.
        if (!wrap_x && (u < t.x0 as f32 || u >= (t.x1 + 1) as f32))
            || (!wrap_y && (v < t.y0 as f32 || v >= (t.y1 + 1) as f32))
        {
            return [0.0; 4];
        }

        if !self.smoothing {
            return self.texel(u.floor() as i32, v.floor() as i32, wrap_x, wrap_y);
        }

        let fx = u - 0.5;
        let fy = v - 0.5;
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = fx - x0;
        let ty = fy - y0;
        let (x0, y0) = (x0 as i32, y0 as i32);

        let p00 = self.texel(x0, y0, wrap_x, wrap_y);
        let p10 = self.texel(x0 + 1, y0, wrap_x, wrap_y);
        let p01 = self.texel(x0, y0 + 1, wrap_x, wrap_y);
        let p11 = self.texel(x0 + 1, y0 + 1, wrap_x, wrap_y);
        let mut out = [0.0f32; 4];
        for i in 0..4 {
            let top = p00[i] + (p10[i] - p00[i]) * tx;
            let bottom = p01[i] + (p11[i] - p01[i]) * tx;
            out[i] = top + (bottom - top) * ty;
        }
        out
    }

    /// Fetch one texel, wrapping repeating axes and clamping the others.
    fn texel(&self, x: i32, y: i32, wrap_x: bool, wrap_y: bool) -> [f32; 4] {
        let t = self.texels;
        let x = if wrap_x {
            x.rem_euclid(self.surface.width() as i32)
        } else {
            x.clamp(t.x0, t.x1)
        };
        let y = if wrap_y {
            y.rem_euclid(self.surface.height() as i32)
        } else {
            y.clamp(t.y0, t.y1)
        };
        let idx = (y as usize * self.surface.width() as usize + x as usize) * 4;
        let px = &self.surface.data()[idx..idx + 4];
        [
            px[0] as f32 / 255.0,
            px[1] as f32 / 255.0,
            px[2] as f32 / 255.0,
            px[3] as f32 / 255.0,
        ]
    }
}

/// A style resolved against the transform current at draw time.
pub(crate) enum PaintSource<'a> {
    Solid([f32; 4]),
    Linear {
        gradient: &'a CanvasGradient,
        inverse: Transform,
        x0: f32,
        y0: f32,
        dx: f32,
        dy: f32,
        len2: f32,
    },
    Radial {
        gradient: &'a CanvasGradient,
        inverse: Transform,
        x0: f32,
        y0: f32,
        r0: f32,
        cdx: f32,
        cdy: f32,
        dr: f32,
    },
    Conic {
        gradient: &'a CanvasGradient,
        inverse: Transform,
        x: f32,
        y: f32,
        start: f32,
    },
    Image(ImageSampler<'a>),
}

/// Resolve a style for a draw call under `ctm`.
///
/// `None` means the style paints nothing: a degenerate gradient, or a
/// pattern or gradient under a singular transform.
pub(crate) fn resolve<'a>(style: &'a FillStyle, ctm: &Transform, smoothing: bool) -> Option<PaintSource<'a>> {
    match style {
        FillStyle::Color(c) => {
            let a = c.alpha();
            Some(PaintSource::Solid([c.red() * a, c.green() * a, c.blue() * a, a]))
        }
        FillStyle::Gradient(gradient) => {
            let inverse = ctm.invert()?;
            match gradient.gradient_type {
                GradientType::Linear { x0, y0, x1, y1 } => {
                    let (dx, dy) = (x1 - x0, y1 - y0);
                    let len2 = dx * dx + dy * dy;
                    if len2 == 0.0 {
                        return None;
                    }
                    Some(PaintSource::Linear {
                        gradient,
                        inverse,
                        x0,
                        y0,
                        dx,
                        dy,
                        len2,
                    })
                }
                GradientType::Radial(p) => {
                    if p.x0 == p.x1 && p.y0 == p.y1 && p.r0 == p.r1 {
                        return None;
                    }
                    Some(PaintSource::Radial {
                        gradient,
                        inverse,
                        x0: p.x0,
                        y0: p.y0,
                        r0: p.r0,
                        cdx: p.x1 - p.x0,
                        cdy: p.y1 - p.y0,
                        dr: p.r1 - p.r0,
                    })
                }
                GradientType::Conic { start_angle, x, y } => Some(PaintSource::Conic {
                    gradient,
                    inverse,
                    x,
                    y,
                    start: start_angle,
                }),
            }
        }
        FillStyle::Pattern(pattern) => {
            let full = ctm.pre_concat(pattern.pattern_transform());
            let inverse = full.invert()?;
            Some(PaintSource::Image(ImageSampler::new(
                pattern.surface(),
                inverse,
                pattern.repetition(),
                smoothing,
            )))
        }
    }
}

fn map(ts: &Transform, x: f32, y: f32) -> (f32, f32) {
    (
        ts.sx * x + ts.kx * y + ts.tx,
        ts.ky * x + ts.sy * y + ts.ty,
    )
}

/// Parameter of the two-circle radial gradient at a user-space point, or
/// `None` where the gradient is undefined.
#[allow(clippy::too_many_arguments)]
fn radial_t(px: f32, py: f32, x0: f32, y0: f32, r0: f32, cdx: f32, cdy: f32, dr: f32) -> Option<f32> {
    let pdx = px - x0;
    let pdy = py - y0;
    let a = cdx * cdx + cdy * cdy - dr * dr;
    let b = pdx * cdx + pdy * cdy + r0 * dr;
    let c = pdx * pdx + pdy * pdy - r0 * r0;

    if a.abs() < 1e-6 {
        if b == 0.0 {
            return None;
        }
        let t = c / (2.0 * b);
        return (r0 + t * dr >= 0.0).then_some(t);
    }

    let disc = b * b - a * c;
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    let t_hi = (b + root) / a;
    let t_lo = (b - root) / a;
    let (first, second) = if t_hi >= t_lo { (t_hi, t_lo) } else { (t_lo, t_hi) };
    if r0 + first * dr >= 0.0 {
        Some(first)
    } else if r0 + second * dr >= 0.0 {
        Some(second)
    } else {
        None
    }
}

impl PaintSource<'_> {
    /// Premultiplied color at device position (x, y).
    pub fn sample(&self, x: f32, y: f32) -> [f32; 4] {
        match self {
            PaintSource::Solid(c) => *c,
            PaintSource::Linear {
                gradient,
                inverse,
                x0,
                y0,
                dx,
                dy,
                len2,
            } => {
                let (ux, uy) = map(inverse, x, y);
                let t = ((ux - x0) * dx + (uy - y0) * dy) / len2;
                gradient.sample(t)
            }
            PaintSource::Radial {
                gradient,
                inverse,
                x0,
                y0,
                r0,
                cdx,
                cdy,
                dr,
            } => {
                let (ux, uy) = map(inverse, x, y);
                match radial_t(ux, uy, *x0, *y0, *r0, *cdx, *cdy, *dr) {
                    Some(t) => gradient.sample(t),
                    None => [0.0; 4],
                }
            }
            PaintSource::Conic {
                gradient,
                inverse,
                x: cx,
                y: cy,
                start,
            } => {
                let (ux, uy) = map(inverse, x, y);
                let angle = (uy - cy).atan2(ux - cx) - start;
                gradient.sample((angle / TAU).rem_euclid(1.0))
            }
            PaintSource::Image(sampler) => {
                let (u, v) = map(&sampler.inverse, x, y);
                sampler.sample(u, v)
            }
        }
    }

    /// Write paint times coverage into `layer` over the coverage bounds.
    pub fn paint_into(&self, layer: &mut Surface, coverage: &Coverage) {
        let width = layer.width() as usize;
        let b = coverage.bounds;
        let data = layer.data_mut();
        for y in b.y0..b.y1 {
            for x in b.x0..b.x1 {
                let cov = coverage.at(x, y);
                if cov == 0 {
                    continue;
                }
                let c = self.sample(x as f32 + 0.5, y as f32 + 0.5);
                let f = cov as f32 / 255.0;
                let idx = (y as usize * width + x as usize) * 4;
                for i in 0..4 {
                    data[idx + i] = to_byte(c[i] * f);
                }
            }
        }
    }
}

/// Quantize a unit float to a byte, rounding to nearest.
pub(crate) fn to_byte(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
