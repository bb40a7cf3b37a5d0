//! DOMMatrix type for 2D affine transforms.

/// A 2D affine matrix as exposed to callers (`getTransform`, pattern and
/// Path2D transforms).
///
/// The matrix is laid out as:
/// ```text
/// | a c e |
/// | b d f |
/// | 0 0 1 |
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DOMMatrix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for DOMMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl DOMMatrix {
    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// True when every component is finite.
    pub fn is_finite(&self) -> bool {
        [self.a, self.b, self.c, self.d, self.e, self.f]
            .iter()
            .all(|v| v.is_finite())
    }

    /// `self * other`: `other` is applied to points first.
    pub fn multiply(&self, other: &DOMMatrix) -> DOMMatrix {
        let lhs: tiny_skia::Transform = (*self).into();
        lhs.pre_concat((*other).into()).into()
    }

    /// The inverse matrix, or `None` when the matrix is singular.
    pub fn inverse(&self) -> Option<DOMMatrix> {
        tiny_skia::Transform::from(*self).invert().map(DOMMatrix::from)
    }

    /// Map a point through the matrix.
    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }
}

impl From<tiny_skia::Transform> for DOMMatrix {
    fn from(t: tiny_skia::Transform) -> Self {
        DOMMatrix {
            a: t.sx,
            b: t.ky,
            c: t.kx,
            d: t.sy,
            e: t.tx,
            f: t.ty,
        }
    }
}

impl From<DOMMatrix> for tiny_skia::Transform {
    fn from(m: DOMMatrix) -> Self {
        tiny_skia::Transform::from_row(m.a, m.b, m.c, m.d, m.e, m.f)
    }
}
