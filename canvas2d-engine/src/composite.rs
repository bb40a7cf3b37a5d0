//! Compositing of a rendered layer onto the destination surface.
//!
//! Porter-Duff operators combine premultiplied colors with fixed source and
//! destination factors. Blend modes follow the W3C Compositing and Blending
//! formulas, composited with source-over.

use crate::paint::to_byte;
use crate::raster::{ClipMask, PixelBounds};
use crate::style::keyword_enum;
use crate::surface::Surface;

/// Value of `globalCompositeOperation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeOperation {
    #[default]
    SourceOver,
    SourceIn,
    SourceOut,
    SourceAtop,
    DestinationOver,
    DestinationIn,
    DestinationOut,
    DestinationAtop,
    Lighter,
    Copy,
    Xor,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

keyword_enum!(CompositeOperation {
    SourceOver => "source-over",
    SourceIn => "source-in",
    SourceOut => "source-out",
    SourceAtop => "source-atop",
    DestinationOver => "destination-over",
    DestinationIn => "destination-in",
    DestinationOut => "destination-out",
    DestinationAtop => "destination-atop",
    Lighter => "lighter",
    Copy => "copy",
    Xor => "xor",
    Multiply => "multiply",
    Screen => "screen",
    Overlay => "overlay",
    Darken => "darken",
    Lighten => "lighten",
    ColorDodge => "color-dodge",
    ColorBurn => "color-burn",
    HardLight => "hard-light",
    SoftLight => "soft-light",
    Difference => "difference",
    Exclusion => "exclusion",
    Hue => "hue",
    Saturation => "saturation",
    Color => "color",
    Luminosity => "luminosity",
});

impl CompositeOperation {
    /// Whether a transparent source leaves the destination unchanged.
    ///
    /// Unbounded operators clear or modify pixels the shape does not cover,
    /// so they are applied across the whole surface.
    pub fn is_bounded(self) -> bool {
        !matches!(
            self,
            CompositeOperation::Copy
                | CompositeOperation::SourceIn
                | CompositeOperation::SourceOut
                | CompositeOperation::DestinationIn
                | CompositeOperation::DestinationAtop
        )
    }

    /// Porter-Duff (Fa, Fb) factors, or `None` for blend modes.
    fn factors(self, sa: f32, da: f32) -> Option<(f32, f32)> {
        use CompositeOperation::*;
        Some(match self {
            SourceOver => (1.0, 1.0 - sa),
            SourceIn => (da, 0.0),
            SourceOut => (1.0 - da, 0.0),
            SourceAtop => (da, 1.0 - sa),
            DestinationOver => (1.0 - da, 1.0),
            DestinationIn => (0.0, sa),
            DestinationOut => (0.0, 1.0 - sa),
            DestinationAtop => (1.0 - da, sa),
            Lighter => (1.0, 1.0),
            Copy => (1.0, 0.0),
            Xor => (1.0 - da, 1.0 - sa),
            _ => return None,
        })
    }
}

fn separable(op: CompositeOperation, cb: f32, cs: f32) -> f32 {
    use CompositeOperation::*;
    match op {
        Multiply => cb * cs,
        Screen => cb + cs - cb * cs,
        Overlay => hard_light(cs, cb),
        Darken => cb.min(cs),
        Lighten => cb.max(cs),
        ColorDodge => {
            if cb == 0.0 {
                0.0
            } else if cs >= 1.0 {
                1.0
            } else {
                (cb / (1.0 - cs)).min(1.0)
            }
        }
        ColorBurn => {
            if cb >= 1.0 {
                1.0
            } else if cs <= 0.0 {
                0.0
            } else {
                1.0 - ((1.0 - cb) / cs).min(1.0)
            }
        }
        HardLight => hard_light(cb, cs),
        SoftLight => {
            if cs <= 0.5 {
                cb - (1.0 - 2.0 * cs) * cb * (1.0 - cb)
            } else {
                let d = if cb <= 0.25 {
                    ((16.0 * cb - 12.0) * cb + 4.0) * cb
                } else {
                    cb.sqrt()
                };
                cb + (2.0 * cs - 1.0) * (d - cb)
            }
        }
        Difference => (cb - cs).abs(),
        Exclusion => cb + cs - 2.0 * cb * cs,
        _ => cs,
    }
}

fn hard_light(cb: f32, cs: f32) -> f32 {
    if cs <= 0.5 {
        cb * 2.0 * cs
    } else {
        let s = 2.0 * cs - 1.0;
        cb + s - cb * s
    }
}

fn lum(c: [f32; 3]) -> f32 {
    0.3 * c[0] + 0.59 * c[1] + 0.11 * c[2]
}

fn clip_color(c: [f32; 3]) -> [f32; 3] {
    let l = lum(c);
    let n = c[0].min(c[1]).min(c[2]);
    let x = c[0].max(c[1]).max(c[2]);
    let mut out = c;
    if n < 0.0 && l - n != 0.0 {
        for v in &mut out {
            *v = l + (*v - l) * l / (l - n);
        }
    }
    if x > 1.0 && x - l != 0.0 {
        for v in &mut out {
            *v = l + (*v - l) * (1.0 - l) / (x - l);
        }
    }
    out
}

fn set_lum(c: [f32; 3], l: f32) -> [f32; 3] {
    let d = l - lum(c);
    clip_color([c[0] + d, c[1] + d, c[2] + d])
}

fn sat(c: [f32; 3]) -> f32 {
    c[0].max(c[1]).max(c[2]) - c[0].min(c[1]).min(c[2])
}

fn set_sat(c: [f32; 3], s: f32) -> [f32; 3] {
    let max = c[0].max(c[1]).max(c[2]);
    let min = c[0].min(c[1]).min(c[2]);
    if max <= min {
        return [0.0; 3];
    }
    let mut out = [0.0; 3];
    for i in 0..3 {
        out[i] = if c[i] == max {
            s
        } else if c[i] == min {
            0.0
        } else {
            (c[i] - min) * s / (max - min)
        };
    }
    out
}

/// Blend-mode result color B(Cb, Cs) for unpremultiplied inputs.
fn blend_color(op: CompositeOperation, cb: [f32; 3], cs: [f32; 3]) -> [f32; 3] {
    use CompositeOperation::*;
    match op {
        Hue => set_lum(set_sat(cs, sat(cb)), lum(cb)),
        Saturation => set_lum(set_sat(cb, sat(cs)), lum(cb)),
        Color => set_lum(cs, lum(cb)),
        Luminosity => set_lum(cb, lum(cs)),
        _ => [
            separable(op, cb[0], cs[0]),
            separable(op, cb[1], cs[1]),
            separable(op, cb[2], cs[2]),
        ],
    }
}

fn unpremul(c: [f32; 4]) -> [f32; 3] {
    if c[3] <= 0.0 {
        [0.0; 3]
    } else {
        [c[0] / c[3], c[1] / c[3], c[2] / c[3]]
    }
}

/// Combine one premultiplied source pixel with one destination pixel.
pub(crate) fn blend_pixel(op: CompositeOperation, s: [f32; 4], d: [f32; 4]) -> [f32; 4] {
    let (sa, da) = (s[3], d[3]);
    if let Some((fa, fb)) = op.factors(sa, da) {
        let mut out = [0.0; 4];
        for i in 0..4 {
            out[i] = (s[i] * fa + d[i] * fb).min(1.0);
        }
        return out;
    }

    let b = blend_color(op, unpremul(d), unpremul(s));
    let ao = sa + da - sa * da;
    let mut out = [0.0; 4];
    for i in 0..3 {
        let c = s[i] * (1.0 - da) + d[i] * (1.0 - sa) + sa * da * b[i];
        out[i] = c.clamp(0.0, ao);
    }
    out[3] = ao;
    out
}

/// How a layer is combined with the destination.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CompositeParams<'a> {
    pub op: CompositeOperation,
    pub global_alpha: f32,
    pub clip: Option<&'a ClipMask>,
}

/// Composite `layer` onto `dst`.
///
/// `bounds` is the region the layer may have content in; bounded operators
/// only visit it. Unbounded operators visit every pixel. The result is
/// interpolated with the destination by clip coverage.
pub(crate) fn composite(dst: &mut Surface, layer: &Surface, bounds: Option<PixelBounds>, params: CompositeParams) {
    let region = if params.op.is_bounded() {
        match bounds {
            Some(b) => b,
            None => return,
        }
    } else {
        PixelBounds::full(dst.width(), dst.height())
    };

    let width = dst.width() as usize;
    let alpha = params.global_alpha;
    let src_data = layer.data();
    let dst_data = dst.data_mut();
    for y in region.y0..region.y1 {
        for x in region.x0..region.x1 {
            let clip = match params.clip {
                Some(c) => c.at(x, y),
                None => 255,
            };
            if clip == 0 {
                continue;
            }
            let idx = (y as usize * width + x as usize) * 4;
            let s = unit4(&src_data[idx..idx + 4], alpha);
            if s[3] == 0.0 && params.op.is_bounded() {
                continue;
            }
            let d = unit4(&dst_data[idx..idx + 4], 1.0);
            let r = blend_pixel(params.op, s, d);
            let k = clip as f32 / 255.0;
            for i in 0..4 {
                dst_data[idx + i] = to_byte(d[i] + (r[i] - d[i]) * k);
            }
        }
    }
}

fn unit4(px: &[u8], scale: f32) -> [f32; 4] {
    [
        px[0] as f32 / 255.0 * scale,
        px[1] as f32 / 255.0 * scale,
        px[2] as f32 / 255.0 * scale,
        px[3] as f32 / 255.0 * scale,
    ]
}
