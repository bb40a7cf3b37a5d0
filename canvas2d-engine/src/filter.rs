//! The `filter` property: parsing of CSS filter function lists and their
//! application to a rendered layer before compositing.

use crate::composite::{composite, CompositeOperation, CompositeParams};
use crate::raster::PixelBounds;
use crate::surface::Surface;
use std::f32::consts::PI;

/// One filter function.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPrimitive {
    /// Gaussian blur with the given standard deviation in pixels.
    Blur(f32),
    Brightness(f32),
    Contrast(f32),
    Grayscale(f32),
    HueRotate(f32),
    Invert(f32),
    Opacity(f32),
    Saturate(f32),
    Sepia(f32),
    DropShadow {
        offset_x: f32,
        offset_y: f32,
        blur: f32,
        color: tiny_skia::Color,
    },
}

/// A parsed filter list together with the text it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterChain {
    source: String,
    primitives: Vec<FilterPrimitive>,
}

impl Default for FilterChain {
    fn default() -> Self {
        Self {
            source: "none".to_string(),
            primitives: Vec::new(),
        }
    }
}

impl FilterChain {
    /// The filter string as set.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn primitives(&self) -> &[FilterPrimitive] {
        &self.primitives
    }

    pub fn is_identity(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Apply every primitive in order to `layer`.
    pub(crate) fn apply(&self, layer: &mut Surface) {
        for primitive in &self.primitives {
            match *primitive {
                FilterPrimitive::Blur(sigma) => gaussian_blur(layer, sigma),
                FilterPrimitive::DropShadow {
                    offset_x,
                    offset_y,
                    blur,
                    color,
                } => {
                    let mut shadow = shadow_layer(layer, offset_x, offset_y, blur / 2.0, color);
                    let bounds = content_bounds(layer);
                    composite(
                        &mut shadow,
                        layer,
                        bounds,
                        CompositeParams {
                            op: CompositeOperation::SourceOver,
                            global_alpha: 1.0,
                            clip: None,
                        },
                    );
                    *layer = shadow;
                }
                ref color_op => apply_color_op(layer, &ColorOp::from_primitive(color_op)),
            }
        }
    }
}

/// Parse a filter string.
///
/// `none` gives the identity chain. Tokens that fail to parse are dropped
/// and the rest are kept in order. Returns `None` for an empty string or when
/// no token at all is valid, in which case callers keep their previous value.
pub fn parse_filter(input: &str) -> Option<FilterChain> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed == "none" {
        return Some(FilterChain::default());
    }

    let mut primitives = Vec::new();
    for (name, args) in function_tokens(trimmed) {
        match parse_primitive(name, args) {
            Some(p) => primitives.push(p),
            None => log::debug!(target: "canvas", "dropping filter token {}({})", name, args),
        }
    }

    if primitives.is_empty() {
        return None;
    }
    Some(FilterChain {
        source: trimmed.to_string(),
        primitives,
    })
}

/// Split `a(x) b(y z)` into (name, args) pairs. Fragments that are not
/// function calls are yielded with an empty name so they get dropped.
fn function_tokens(input: &str) -> Vec<(&str, &str)> {
    let mut tokens = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() {
            i += 1;
            continue;
        }
        let name_start = i;
        while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-') {
            i += 1;
        }
        let name = &input[name_start..i];
        if i >= bytes.len() || bytes[i] != b'(' {
            // Skip to the next whitespace.
            while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            tokens.push(("", &input[name_start..i]));
            continue;
        }
        let args_start = i + 1;
        let mut depth = 0;
        let mut end = None;
        while i < bytes.len() {
            match bytes[i] {
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        end = Some(i);
                        break;
                    }
                }
                _ => {}
            }
            i += 1;
        }
        match end {
            Some(end) => {
                tokens.push((name, input[args_start..end].trim()));
                i = end + 1;
            }
            None => {
                // Unbalanced parentheses swallow the rest of the string.
                tokens.push(("", &input[name_start..]));
                break;
            }
        }
    }
    tokens
}

fn parse_primitive(name: &str, args: &str) -> Option<FilterPrimitive> {
    let amount = |default: f32, clamp_to_one: bool| -> Option<f32> {
        let v = if args.is_empty() {
            default
        } else {
            parse_number_or_percentage(args)?
        };
        if v < 0.0 {
            return None;
        }
        Some(if clamp_to_one { v.min(1.0) } else { v })
    };

    Some(match name.to_ascii_lowercase().as_str() {
        "blur" => {
            let radius = if args.is_empty() { 0.0 } else { parse_length(args)? };
            if radius < 0.0 {
                return None;
            }
            FilterPrimitive::Blur(radius)
        }
        "brightness" => FilterPrimitive::Brightness(amount(1.0, false)?),
        "contrast" => FilterPrimitive::Contrast(amount(1.0, false)?),
        "grayscale" => FilterPrimitive::Grayscale(amount(1.0, true)?),
        "invert" => FilterPrimitive::Invert(amount(1.0, true)?),
        "opacity" => FilterPrimitive::Opacity(amount(1.0, true)?),
        "saturate" => FilterPrimitive::Saturate(amount(1.0, false)?),
        "sepia" => FilterPrimitive::Sepia(amount(1.0, true)?),
        "hue-rotate" => {
            let angle = if args.is_empty() { 0.0 } else { parse_angle(args)? };
            FilterPrimitive::HueRotate(angle)
        }
        "drop-shadow" => parse_drop_shadow(args)?,
        _ => return None,
    })
}

fn parse_number(s: &str) -> Option<f32> {
    let v: f32 = s.trim().parse().ok()?;
    v.is_finite().then_some(v)
}

fn parse_number_or_percentage(s: &str) -> Option<f32> {
    match s.strip_suffix('%') {
        Some(pct) => Some(parse_number(pct)? / 100.0),
        None => parse_number(s),
    }
}

/// A CSS length in px. Unitless zero is allowed.
fn parse_length(s: &str) -> Option<f32> {
    match s.strip_suffix("px") {
        Some(v) => parse_number(v),
        None => parse_number(s).filter(|v| *v == 0.0),
    }
}

/// A CSS angle in radians. Unitless zero is allowed.
fn parse_angle(s: &str) -> Option<f32> {
    let s = s.trim();
    if let Some(v) = s.strip_suffix("deg") {
        Some(parse_number(v)?.to_radians())
    } else if let Some(v) = s.strip_suffix("grad") {
        Some(parse_number(v)? * PI / 200.0)
    } else if let Some(v) = s.strip_suffix("rad") {
        parse_number(v)
    } else if let Some(v) = s.strip_suffix("turn") {
        Some(parse_number(v)? * 2.0 * PI)
    } else {
        parse_number(s).filter(|v| *v == 0.0)
    }
}

/// `drop-shadow(<dx> <dy> [<blur>] [<color>])`, color first or last.
fn parse_drop_shadow(args: &str) -> Option<FilterPrimitive> {
    let mut lengths = Vec::new();
    let mut color = None;
    let mut color_last = false;
    for part in split_args(args) {
        if let Some(len) = parse_length(part) {
            if color_last {
                return None;
            }
            lengths.push(len);
        } else if color.is_none() && (lengths.is_empty() || lengths.len() >= 2) {
            color = Some(crate::context::parse_color(part).ok()?);
            color_last = !lengths.is_empty();
        } else {
            return None;
        }
    }
    let (offset_x, offset_y, blur) = match lengths.as_slice() {
        [x, y] => (*x, *y, 0.0),
        [x, y, b] if *b >= 0.0 => (*x, *y, *b),
        _ => return None,
    };
    Some(FilterPrimitive::DropShadow {
        offset_x,
        offset_y,
        blur,
        color: color.unwrap_or(tiny_skia::Color::BLACK),
    })
}

/// Whitespace-separated arguments, keeping parenthesized groups whole.
fn split_args(args: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = None;
    for (i, ch) in args.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    parts.push(&args[s..i]);
                }
                continue;
            }
            _ => {}
        }
        if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        parts.push(&args[s..]);
    }
    parts
}

/// Per-pixel color transform on unpremultiplied values.
enum ColorOp {
    /// 3x3 matrix on RGB, row-major.
    Matrix([f32; 9]),
    /// `c * slope + intercept` on each RGB channel.
    Linear { slope: f32, intercept: f32 },
    Opacity(f32),
}

impl ColorOp {
    fn from_primitive(p: &FilterPrimitive) -> ColorOp {
        match *p {
            FilterPrimitive::Brightness(a) => ColorOp::Linear {
                slope: a,
                intercept: 0.0,
            },
            FilterPrimitive::Contrast(a) => ColorOp::Linear {
                slope: a,
                intercept: 0.5 - 0.5 * a,
            },
            FilterPrimitive::Invert(a) => ColorOp::Linear {
                slope: 1.0 - 2.0 * a,
                intercept: a,
            },
            FilterPrimitive::Opacity(a) => ColorOp::Opacity(a),
            FilterPrimitive::Grayscale(amount) => {
                let a = 1.0 - amount;
                ColorOp::Matrix([
                    0.2126 + 0.7874 * a,
                    0.7152 - 0.7152 * a,
                    0.0722 - 0.0722 * a,
                    0.2126 - 0.2126 * a,
                    0.7152 + 0.2848 * a,
                    0.0722 - 0.0722 * a,
                    0.2126 - 0.2126 * a,
                    0.7152 - 0.7152 * a,
                    0.0722 + 0.9278 * a,
                ])
            }
            FilterPrimitive::Sepia(amount) => {
                let a = 1.0 - amount;
                ColorOp::Matrix([
                    0.393 + 0.607 * a,
                    0.769 - 0.769 * a,
                    0.189 - 0.189 * a,
                    0.349 - 0.349 * a,
                    0.686 + 0.314 * a,
                    0.168 - 0.168 * a,
                    0.272 - 0.272 * a,
                    0.534 - 0.534 * a,
                    0.131 + 0.869 * a,
                ])
            }
            FilterPrimitive::Saturate(s) => ColorOp::Matrix([
                0.213 + 0.787 * s,
                0.715 - 0.715 * s,
                0.072 - 0.072 * s,
                0.213 - 0.213 * s,
                0.715 + 0.285 * s,
                0.072 - 0.072 * s,
                0.213 - 0.213 * s,
                0.715 - 0.715 * s,
                0.072 + 0.928 * s,
            ]),
            FilterPrimitive::HueRotate(angle) => {
                let (sin, cos) = angle.sin_cos();
                ColorOp::Matrix([
                    0.213 + cos * 0.787 - sin * 0.213,
                    0.715 - cos * 0.715 - sin * 0.715,
                    0.072 - cos * 0.072 + sin * 0.928,
                    0.213 - cos * 0.213 + sin * 0.143,
                    0.715 + cos * 0.285 + sin * 0.140,
                    0.072 - cos * 0.072 - sin * 0.283,
                    0.213 - cos * 0.213 - sin * 0.787,
                    0.715 - cos * 0.715 + sin * 0.715,
                    0.072 + cos * 0.928 + sin * 0.072,
                ])
            }
            FilterPrimitive::Blur(_) | FilterPrimitive::DropShadow { .. } => ColorOp::Linear {
                slope: 1.0,
                intercept: 0.0,
            },
        }
    }
}

fn apply_color_op(layer: &mut Surface, op: &ColorOp) {
    for px in layer.data_mut().chunks_exact_mut(4) {
        let a = px[3] as f32 / 255.0;
        if a == 0.0 {
            continue;
        }
        let c = [
            px[0] as f32 / 255.0 / a,
            px[1] as f32 / 255.0 / a,
            px[2] as f32 / 255.0 / a,
        ];
        let (rgb, alpha) = match op {
            ColorOp::Matrix(m) => (
                [
                    m[0] * c[0] + m[1] * c[1] + m[2] * c[2],
                    m[3] * c[0] + m[4] * c[1] + m[5] * c[2],
                    m[6] * c[0] + m[7] * c[1] + m[8] * c[2],
                ],
                a,
            ),
            ColorOp::Linear { slope, intercept } => (
                [
                    c[0] * slope + intercept,
                    c[1] * slope + intercept,
                    c[2] * slope + intercept,
                ],
                a,
            ),
            ColorOp::Opacity(k) => (c, a * k),
        };
        let alpha = alpha.clamp(0.0, 1.0);
        for i in 0..3 {
            px[i] = crate::paint::to_byte(rgb[i].clamp(0.0, 1.0) * alpha);
        }
        px[3] = crate::paint::to_byte(alpha);
    }
}

/// Pixels of `surface` with non-zero alpha.
pub(crate) fn content_bounds(surface: &Surface) -> Option<PixelBounds> {
    surface
        .content_bounds()
        .map(|(x0, y0, x1, y1)| PixelBounds { x0, y0, x1, y1 })
}

const MIN_BLUR_SIGMA: f32 = 1e-3;

/// In-place separable Gaussian blur of premultiplied samples. Samples
/// beyond the surface edge count as transparent.
pub(crate) fn gaussian_blur(surface: &mut Surface, sigma: f32) {
    // Below this the kernel is a single unit tap, and 2*sigma^2 can underflow.
    if !(sigma >= MIN_BLUR_SIGMA) {
        return;
    }
    let Some(bounds) = content_bounds(surface) else {
        return;
    };
    let (width, height) = (surface.width(), surface.height());
    // Taps beyond the surface are transparent, so a wider kernel adds nothing.
    let radius = ((sigma * 3.0).ceil() as i64).clamp(1, width.max(height) as i64);
    let region = bounds.outset(radius as u32, width, height);

    let two_sigma_sq = 2.0 * sigma * sigma;
    let mut kernel = Vec::with_capacity(2 * radius as usize + 1);
    for i in -radius..=radius {
        kernel.push((-((i * i) as f32) / two_sigma_sq).exp());
    }
    let sum: f32 = kernel.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        return;
    }
    for k in kernel.iter_mut() {
        *k /= sum;
    }

    let rw = (region.x1 - region.x0) as usize;
    let rh = (region.y1 - region.y0) as usize;
    let stride = width as usize * 4;
    let data = surface.data_mut();

    // Horizontal pass into a region-sized float buffer.
    let mut tmp = vec![0.0f32; rw * rh * 4];
    for ry in 0..rh {
        let y = region.y0 as usize + ry;
        for rx in 0..rw {
            let x = region.x0 as i64 + rx as i64;
            let mut acc = [0.0f32; 4];
            for (k, weight) in kernel.iter().enumerate() {
                let sx = x + k as i64 - radius;
                if sx < region.x0 as i64 || sx >= region.x1 as i64 {
                    continue;
                }
                let idx = y * stride + sx as usize * 4;
                for c in 0..4 {
                    acc[c] += data[idx + c] as f32 * weight;
                }
            }
            tmp[(ry * rw + rx) * 4..(ry * rw + rx) * 4 + 4].copy_from_slice(&acc);
        }
    }

    // Vertical pass back into the surface.
    for ry in 0..rh {
        for rx in 0..rw {
            let mut acc = [0.0f32; 4];
            for (k, weight) in kernel.iter().enumerate() {
                let sy = ry as i64 + k as i64 - radius;
                if sy < 0 || sy >= rh as i64 {
                    continue;
                }
                let t = (sy as usize * rw + rx) * 4;
                for c in 0..4 {
                    acc[c] += tmp[t + c] * weight;
                }
            }
            let idx = (region.y0 as usize + ry) * stride + (region.x0 as usize + rx) * 4;
            for c in 0..4 {
                data[idx + c] = acc[c].round().clamp(0.0, 255.0) as u8;
            }
            // Keep premultiplied color within alpha after rounding.
            let a = data[idx + 3];
            for c in 0..3 {
                data[idx + c] = data[idx + c].min(a);
            }
        }
    }
}

/// A shadow of `layer`: its alpha tinted with `color`, offset by whole
/// pixels, then blurred with standard deviation `sigma`.
pub(crate) fn shadow_layer(layer: &Surface, offset_x: f32, offset_y: f32, sigma: f32, color: tiny_skia::Color) -> Surface {
    let (width, height) = (layer.width(), layer.height());
    let mut shadow = Surface::blank(width, height);
    let ox = offset_x.round() as i64;
    let oy = offset_y.round() as i64;
    let ca = color.alpha();
    let tint = [color.red() * ca, color.green() * ca, color.blue() * ca, ca];

    let src = layer.data();
    let stride = width as usize * 4;
    let dst = shadow.data_mut();
    for y in 0..height as i64 {
        let ty = y + oy;
        if ty < 0 || ty >= height as i64 {
            continue;
        }
        for x in 0..width as i64 {
            let tx = x + ox;
            if tx < 0 || tx >= width as i64 {
                continue;
            }
            let a = src[y as usize * stride + x as usize * 4 + 3];
            if a == 0 {
                continue;
            }
            let k = a as f32 / 255.0;
            let idx = ty as usize * stride + tx as usize * 4;
            for c in 0..4 {
                dst[idx + c] = crate::paint::to_byte(tint[c] * k);
            }
        }
    }
    gaussian_blur(&mut shadow, sigma);
    shadow
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("blur(4px)", FilterPrimitive::Blur(4.0))]
    #[case("blur()", FilterPrimitive::Blur(0.0))]
    #[case("brightness(150%)", FilterPrimitive::Brightness(1.5))]
    #[case("contrast(0.5)", FilterPrimitive::Contrast(0.5))]
    #[case("grayscale(2)", FilterPrimitive::Grayscale(1.0))]
    #[case("sepia()", FilterPrimitive::Sepia(1.0))]
    #[case("saturate(300%)", FilterPrimitive::Saturate(3.0))]
    #[case("invert(100%)", FilterPrimitive::Invert(1.0))]
    #[case("opacity(25%)", FilterPrimitive::Opacity(0.25))]
    #[case("hue-rotate(0.5turn)", FilterPrimitive::HueRotate(PI))]
    fn test_parse_single(#[case] input: &str, #[case] expected: FilterPrimitive) {
        let chain = parse_filter(input).unwrap();
        assert_eq!(chain.primitives(), &[expected]);
        assert_eq!(chain.as_str(), input);
    }

    #[rstest]
    #[case("blur(-1px)")]
    #[case("blur(4)")]
    #[case("brightness(-0.5)")]
    #[case("hue-rotate(90)")]
    #[case("wobble(3)")]
    #[case("blur(2px")]
    #[case("garbage")]
    #[case("")]
    #[case("   ")]
    fn test_invalid_filter_rejected(#[case] input: &str) {
        assert!(parse_filter(input).is_none());
    }

    #[test]
    fn test_none_is_identity() {
        assert!(parse_filter("none").unwrap().is_identity());
        assert!(parse_filter(" none ").unwrap().is_identity());
        assert_eq!(FilterChain::default().as_str(), "none");
    }

    #[test]
    fn test_bad_token_dropped_rest_kept_in_order() {
        let chain = parse_filter("sepia(1) wobble(2) blur(2px) grayscale(oops) invert(0.5)").unwrap();
        assert_eq!(
            chain.primitives(),
            &[
                FilterPrimitive::Sepia(1.0),
                FilterPrimitive::Blur(2.0),
                FilterPrimitive::Invert(0.5),
            ]
        );
    }

    #[test]
    fn test_parse_drop_shadow() {
        let chain = parse_filter("drop-shadow(2px 3px 4px rgba(0, 0, 0, 0.5))").unwrap();
        match &chain.primitives()[0] {
            FilterPrimitive::DropShadow {
                offset_x,
                offset_y,
                blur,
                color,
            } => {
                assert_eq!((*offset_x, *offset_y, *blur), (2.0, 3.0, 4.0));
                assert_eq!(color.alpha(), 0.5);
            }
            other => panic!("unexpected primitive {:?}", other),
        }
        let chain = parse_filter("drop-shadow(red 1px 1px)").unwrap();
        assert!(matches!(
            chain.primitives()[0],
            FilterPrimitive::DropShadow { blur, .. } if blur == 0.0
        ));
        assert!(parse_filter("drop-shadow(1px)").is_none());
    }

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Surface {
        Surface::from_rgba(width, height, &rgba.repeat((width * height) as usize)).unwrap()
    }

    #[test]
    fn test_grayscale_and_invert() {
        let mut layer = solid(1, 1, [255, 0, 0, 255]);
        parse_filter("grayscale(1)").unwrap().apply(&mut layer);
        let px = layer.pixel(0, 0).unwrap();
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
        assert_eq!(px[0], 54);

        let mut layer = solid(1, 1, [255, 0, 0, 255]);
        parse_filter("invert(1)").unwrap().apply(&mut layer);
        assert_eq!(layer.pixel(0, 0), Some([0, 255, 255, 255]));
    }

    #[test]
    fn test_opacity_scales_alpha() {
        let mut layer = solid(1, 1, [0, 0, 255, 255]);
        parse_filter("opacity(50%)").unwrap().apply(&mut layer);
        assert_eq!(layer.pixel(0, 0), Some([0, 0, 128, 128]));
    }

    #[test]
    fn test_brightness_leaves_transparent_pixels() {
        let mut layer = Surface::new(2, 2).unwrap();
        parse_filter("brightness(3)").unwrap().apply(&mut layer);
        assert!(layer.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_blur_spreads_and_preserves_mass() {
        let mut layer = Surface::new(21, 21).unwrap();
        layer.data_mut()[(10 * 21 + 10) * 4..(10 * 21 + 10) * 4 + 4].copy_from_slice(&[255; 4]);
        let mut blurred = Surface::new(21, 21).unwrap();
        blurred.data_mut().copy_from_slice(layer.data());
        gaussian_blur(&mut blurred, 1.0);
        let center = blurred.pixel(10, 10).unwrap()[3];
        let neighbor = blurred.pixel(11, 10).unwrap()[3];
        assert!(center < 255 && center > neighbor && neighbor > 0);
        let total: u32 = blurred.data().chunks_exact(4).map(|p| p[3] as u32).sum();
        assert!((total as i32 - 255).abs() < 12);
    }

    #[rstest]
    #[case(1e-30)]
    #[case(1e-4)]
    #[case(f32::MIN_POSITIVE)]
    fn test_tiny_sigma_leaves_pixels(#[case] sigma: f32) {
        let mut layer = Surface::new(5, 5).unwrap();
        layer.data_mut()[(2 * 5 + 2) * 4..(2 * 5 + 2) * 4 + 4].copy_from_slice(&[255, 0, 0, 255]);
        let before = layer.data().to_vec();
        gaussian_blur(&mut layer, sigma);
        assert_eq!(layer.data(), &before[..]);
    }

    #[rstest]
    #[case(1e12)]
    #[case(f32::MAX)]
    fn test_huge_sigma_flattens_within_surface(#[case] sigma: f32) {
        let mut layer = Surface::new(8, 8).unwrap();
        layer.data_mut()[..4].copy_from_slice(&[255; 4]);
        gaussian_blur(&mut layer, sigma);
        // Every tap reaches every pixel, so the result is uniform
        let first = layer.pixel(0, 0).unwrap();
        assert!(layer.data().chunks_exact(4).all(|p| p == first));
        assert!(first[3] < 255);
    }

    #[test]
    fn test_drop_shadow_beneath_content() {
        let mut layer = Surface::new(6, 6).unwrap();
        let white = [255u8; 4];
        layer.data_mut()[..4].copy_from_slice(&white);
        parse_filter("drop-shadow(2px 2px black)").unwrap().apply(&mut layer);
        assert_eq!(layer.pixel(0, 0), Some(white));
        assert_eq!(layer.pixel(2, 2), Some([0, 0, 0, 255]));
        assert_eq!(layer.pixel(1, 1), Some([0, 0, 0, 0]));
    }
}
