//! Gradient types and color-stop sampling.

use crate::error::{Canvas2dError, Canvas2dResult};
use crate::geometry::RadialGradientParams;

/// A color stop in a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Offset position (0.0 to 1.0).
    pub offset: f64,
    /// Straight-alpha color at this stop.
    pub color: tiny_skia::Color,
}

/// Gradient geometry, in the user space current at paint time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientType {
    /// Linear gradient from (x0, y0) to (x1, y1).
    Linear { x0: f32, y0: f32, x1: f32, y1: f32 },
    /// Two-circle radial gradient.
    Radial(RadialGradientParams),
    /// Conic sweep around (x, y) starting at `start_angle` radians.
    Conic { start_angle: f32, x: f32, y: f32 },
}

/// Canvas gradient: geometry plus an ordered stop list.
///
/// Stops are kept sorted by offset with insertion order preserved among
/// equal offsets, so the last added stop at an offset wins at sample time.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasGradient {
    pub gradient_type: GradientType,
    stops: Vec<GradientStop>,
}

impl CanvasGradient {
    pub fn new_linear(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            gradient_type: GradientType::Linear { x0, y0, x1, y1 },
            stops: Vec::new(),
        }
    }

    pub fn new_radial(params: &RadialGradientParams) -> Self {
        Self {
            gradient_type: GradientType::Radial(*params),
            stops: Vec::new(),
        }
    }

    pub fn new_conic(start_angle: f32, x: f32, y: f32) -> Self {
        Self {
            gradient_type: GradientType::Conic { start_angle, x, y },
            stops: Vec::new(),
        }
    }

    /// Add a color stop from a CSS color string.
    pub fn add_color_stop(&mut self, offset: f64, color: &str) -> Canvas2dResult<()> {
        if !(0.0..=1.0).contains(&offset) {
            return Err(Canvas2dError::InvalidGradientStop(offset));
        }
        let color = crate::context::parse_color(color)?;
        self.add_color_stop_color(offset, color)
    }

    /// Add a color stop from an already parsed color.
    pub fn add_color_stop_color(&mut self, offset: f64, color: tiny_skia::Color) -> Canvas2dResult<()> {
        // Also rejects NaN.
        if !(0.0..=1.0).contains(&offset) {
            return Err(Canvas2dError::InvalidGradientStop(offset));
        }
        let idx = self.stops.partition_point(|s| s.offset <= offset);
        self.stops.insert(idx, GradientStop { offset, color });
        Ok(())
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Premultiplied color at parameter `t`, clamped to the end stops.
    pub(crate) fn sample(&self, t: f32) -> [f32; 4] {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return [0.0; 4];
        };
        let t = t as f64;
        let idx = self.stops.partition_point(|s| s.offset <= t);
        let straight = if idx == 0 {
            color_array(first.color)
        } else if idx == self.stops.len() {
            color_array(last.color)
        } else {
            let a = &self.stops[idx - 1];
            let b = &self.stops[idx];
            let f = ((t - a.offset) / (b.offset - a.offset)) as f32;
            let ca = color_array(a.color);
            let cb = color_array(b.color);
            [
                ca[0] + (cb[0] - ca[0]) * f,
                ca[1] + (cb[1] - ca[1]) * f,
                ca[2] + (cb[2] - ca[2]) * f,
                ca[3] + (cb[3] - ca[3]) * f,
            ]
        };
        let a = straight[3];
        [straight[0] * a, straight[1] * a, straight[2] * a, a]
    }
}

fn color_array(c: tiny_skia::Color) -> [f32; 4] {
    [c.red(), c.green(), c.blue(), c.alpha()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(r: u8, g: u8, b: u8, a: u8) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(r, g, b, a)
    }

    #[test]
    fn test_stops_sorted_stable() {
        let mut g = CanvasGradient::new_linear(0.0, 0.0, 10.0, 0.0);
        g.add_color_stop_color(1.0, rgba(0, 0, 255, 255)).unwrap();
        g.add_color_stop_color(0.5, rgba(255, 0, 0, 255)).unwrap();
        g.add_color_stop_color(0.5, rgba(0, 255, 0, 255)).unwrap();
        g.add_color_stop_color(0.0, rgba(0, 0, 0, 255)).unwrap();
        let offsets: Vec<f64> = g.stops().iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.5, 0.5, 1.0]);
        assert_eq!(g.stops()[1].color, rgba(255, 0, 0, 255));
        assert_eq!(g.stops()[2].color, rgba(0, 255, 0, 255));
    }

    #[test]
    fn test_duplicate_offset_last_wins() {
        let mut g = CanvasGradient::new_linear(0.0, 0.0, 10.0, 0.0);
        g.add_color_stop_color(0.0, rgba(0, 0, 0, 255)).unwrap();
        g.add_color_stop_color(0.5, rgba(255, 0, 0, 255)).unwrap();
        g.add_color_stop_color(0.5, rgba(0, 255, 0, 255)).unwrap();
        g.add_color_stop_color(1.0, rgba(0, 0, 255, 255)).unwrap();
        assert_eq!(g.sample(0.5), [0.0, 1.0, 0.0, 1.0]);
        // Just below the hard edge still interpolates toward red.
        assert!(g.sample(0.49)[0] > 0.9);
    }

    #[test]
    fn test_sample_clamps_outside_range() {
        let mut g = CanvasGradient::new_linear(0.0, 0.0, 10.0, 0.0);
        g.add_color_stop_color(0.25, rgba(255, 0, 0, 255)).unwrap();
        g.add_color_stop_color(0.75, rgba(0, 0, 255, 255)).unwrap();
        assert_eq!(g.sample(-3.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(g.sample(7.0), [0.0, 0.0, 1.0, 1.0]);
        let mid = g.sample(0.5);
        assert!((mid[0] - 0.5).abs() < 1e-6);
        assert!((mid[2] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_sample_premultiplies() {
        let mut g = CanvasGradient::new_linear(0.0, 0.0, 10.0, 0.0);
        g.add_color_stop_color(0.0, rgba(255, 255, 255, 0)).unwrap();
        g.add_color_stop_color(1.0, rgba(255, 255, 255, 255)).unwrap();
        let mid = g.sample(0.5);
        assert!((mid[0] - 0.5).abs() < 1e-6);
        assert!((mid[3] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_empty_gradient_is_transparent() {
        let g = CanvasGradient::new_conic(0.0, 5.0, 5.0);
        assert_eq!(g.sample(0.3), [0.0; 4]);
    }

    #[test]
    fn test_invalid_offsets_rejected() {
        let mut g = CanvasGradient::new_linear(0.0, 0.0, 1.0, 0.0);
        assert!(matches!(
            g.add_color_stop(1.5, "red"),
            Err(Canvas2dError::InvalidGradientStop(_))
        ));
        assert!(g.add_color_stop_color(f64::NAN, rgba(0, 0, 0, 255)).is_err());
        assert!(matches!(
            g.add_color_stop(0.5, "not-a-color"),
            Err(Canvas2dError::ColorParseError(_))
        ));
        assert!(g.stops().is_empty());
    }
}
