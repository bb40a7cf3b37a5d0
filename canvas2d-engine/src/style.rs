//! Style types and enums for Canvas 2D operations.

use crate::gradient::CanvasGradient;
use crate::pattern::CanvasPattern;
use std::sync::Arc;

/// Paint style for fill and stroke operations.
#[derive(Debug, Clone, PartialEq)]
pub enum FillStyle {
    /// Solid color fill (straight alpha).
    Color(tiny_skia::Color),
    /// Linear, radial or conic gradient.
    Gradient(CanvasGradient),
    /// Image pattern with its own transform.
    Pattern(Arc<CanvasPattern>),
}

impl Default for FillStyle {
    fn default() -> Self {
        FillStyle::Color(tiny_skia::Color::BLACK)
    }
}

/// Implements `FromStr` and `as_str` for keyword enums.
macro_rules! keyword_enum {
    ($name:ident { $($variant:ident => $kw:literal),+ $(,)? }) => {
        impl $name {
            /// The CSS/canvas keyword for this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $kw),+
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::Canvas2dError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($kw => Ok($name::$variant),)+
                    _ => Err($crate::error::Canvas2dError::InvalidArgument(format!(
                        "Invalid {} value: '{}'",
                        stringify!($name),
                        s
                    ))),
                }
            }
        }
    };
}

pub(crate) use keyword_enum;

/// Line cap style for stroke operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

keyword_enum!(LineCap { Butt => "butt", Round => "round", Square => "square" });

impl From<LineCap> for tiny_skia::LineCap {
    fn from(cap: LineCap) -> Self {
        match cap {
            LineCap::Butt => tiny_skia::LineCap::Butt,
            LineCap::Round => tiny_skia::LineCap::Round,
            LineCap::Square => tiny_skia::LineCap::Square,
        }
    }
}

/// Line join style for stroke operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

keyword_enum!(LineJoin { Miter => "miter", Round => "round", Bevel => "bevel" });

impl From<LineJoin> for tiny_skia::LineJoin {
    fn from(join: LineJoin) -> Self {
        match join {
            LineJoin::Miter => tiny_skia::LineJoin::Miter,
            LineJoin::Round => tiny_skia::LineJoin::Round,
            LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
        }
    }
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    Right,
    Center,
    /// Left for LTR, right for RTL.
    #[default]
    Start,
    /// Right for LTR, left for RTL.
    End,
}

keyword_enum!(TextAlign {
    Left => "left",
    Right => "right",
    Center => "center",
    Start => "start",
    End => "end",
});

/// Vertical text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    Top,
    Hanging,
    Middle,
    #[default]
    Alphabetic,
    Ideographic,
    Bottom,
}

keyword_enum!(TextBaseline {
    Top => "top",
    Hanging => "hanging",
    Middle => "middle",
    Alphabetic => "alphabetic",
    Ideographic => "ideographic",
    Bottom => "bottom",
});

/// Text direction, used to resolve `start`/`end` alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
    /// No document to inherit from, so this behaves as LTR.
    Inherit,
}

keyword_enum!(Direction { Ltr => "ltr", Rtl => "rtl", Inherit => "inherit" });

impl Direction {
    pub(crate) fn is_rtl(self) -> bool {
        self == Direction::Rtl
    }
}

/// Fill rule for path operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CanvasFillRule {
    #[default]
    NonZero,
    EvenOdd,
}

keyword_enum!(CanvasFillRule { NonZero => "nonzero", EvenOdd => "evenodd" });

impl From<CanvasFillRule> for tiny_skia::FillRule {
    fn from(rule: CanvasFillRule) -> Self {
        match rule {
            CanvasFillRule::NonZero => tiny_skia::FillRule::Winding,
            CanvasFillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
        }
    }
}

/// Image smoothing quality levels. Every level samples bilinearly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSmoothingQuality {
    #[default]
    Low,
    Medium,
    High,
}

keyword_enum!(ImageSmoothingQuality { Low => "low", Medium => "medium", High => "high" });
