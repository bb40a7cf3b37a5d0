//! Path model: ordered subpaths of line and Bezier segments.
//!
//! Coordinates are stored already mapped through whatever transform was
//! current when each point was added, so curves are flattened by the
//! rasterizer in device space.

use tiny_skia::{Point, Transform};

/// A single drawing segment. The start point is the previous segment's end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line(Point),
    Quad(Point, Point),
    Cubic(Point, Point, Point),
}

impl Segment {
    pub fn end(&self) -> Point {
        match *self {
            Segment::Line(p) | Segment::Quad(_, p) | Segment::Cubic(_, _, p) => p,
        }
    }

    fn mapped(&self, ts: &Transform) -> Segment {
        match *self {
            Segment::Line(p) => Segment::Line(map(ts, p)),
            Segment::Quad(c, p) => Segment::Quad(map(ts, c), map(ts, p)),
            Segment::Cubic(c1, c2, p) => Segment::Cubic(map(ts, c1), map(ts, c2), map(ts, p)),
        }
    }
}

/// A run of connected segments starting at `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct Subpath {
    pub start: Point,
    pub segments: Vec<Segment>,
    pub closed: bool,
}

impl Subpath {
    fn new(start: Point) -> Self {
        Self {
            start,
            segments: Vec::new(),
            closed: false,
        }
    }

    /// The last point of the subpath.
    pub fn end(&self) -> Point {
        self.segments.last().map(Segment::end).unwrap_or(self.start)
    }
}

/// Map a user-space coordinate through a transform.
pub(crate) fn map_point(ts: &Transform, x: f32, y: f32) -> Point {
    Point::from_xy(
        ts.sx * x + ts.kx * y + ts.tx,
        ts.ky * x + ts.sy * y + ts.ty,
    )
}

fn map(ts: &Transform, p: Point) -> Point {
    map_point(ts, p.x, p.y)
}

fn finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// A geometric path value.
///
/// Builder operations silently ignore non-finite points. Degenerate
/// subpaths are kept; they produce no fill coverage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    subpaths: Vec<Subpath>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn subpaths(&self) -> &[Subpath] {
        &self.subpaths
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    /// Remove every subpath (beginPath).
    pub fn clear(&mut self) {
        self.subpaths.clear();
    }

    /// End point of the last subpath, if any.
    pub fn current_point(&self) -> Option<Point> {
        self.subpaths.last().map(Subpath::end)
    }

    pub fn move_to(&mut self, p: Point) {
        if finite(p) {
            self.subpaths.push(Subpath::new(p));
        }
    }

    /// Start a subpath at `p` if none exists yet.
    pub fn ensure_subpath(&mut self, p: Point) {
        if self.subpaths.is_empty() {
            self.move_to(p);
        }
    }

    pub fn line_to(&mut self, p: Point) {
        if !finite(p) {
            return;
        }
        match self.subpaths.last_mut() {
            Some(sub) => sub.segments.push(Segment::Line(p)),
            None => self.move_to(p),
        }
    }

    pub fn quad_to(&mut self, c: Point, p: Point) {
        if !finite(c) || !finite(p) {
            return;
        }
        self.ensure_subpath(c);
        if let Some(sub) = self.subpaths.last_mut() {
            sub.segments.push(Segment::Quad(c, p));
        }
    }

    pub fn cubic_to(&mut self, c1: Point, c2: Point, p: Point) {
        if !finite(c1) || !finite(c2) || !finite(p) {
            return;
        }
        self.ensure_subpath(c1);
        if let Some(sub) = self.subpaths.last_mut() {
            sub.segments.push(Segment::Cubic(c1, c2, p));
        }
    }

    /// Mark the last subpath closed and open a new one at its start point.
    pub fn close(&mut self) {
        let Some(sub) = self.subpaths.last_mut() else {
            return;
        };
        if sub.closed {
            return;
        }
        sub.closed = true;
        let start = sub.start;
        self.subpaths.push(Subpath::new(start));
    }

    /// Add a closed polygon followed by a new subpath at its first corner.
    pub fn polygon(&mut self, corners: &[Point]) {
        let Some((&first, rest)) = corners.split_first() else {
            return;
        };
        if !corners.iter().all(|&p| finite(p)) {
            return;
        }
        self.move_to(first);
        for &p in rest {
            self.line_to(p);
        }
        self.close();
    }

    /// Append every subpath of `other`, mapped through `ts`.
    pub fn append(&mut self, other: &Path, ts: &Transform) {
        self.subpaths.extend(other.subpaths.iter().map(|sub| Subpath {
            start: map(ts, sub.start),
            segments: sub.segments.iter().map(|seg| seg.mapped(ts)).collect(),
            closed: sub.closed,
        }));
    }

    /// A copy of this path with every point mapped through `ts`.
    pub fn transformed(&self, ts: &Transform) -> Path {
        let mut out = Path::new();
        out.append(self, ts);
        out
    }

    /// Convert to a tiny-skia path for rasterization. Subpaths without
    /// segments are dropped; `None` when nothing remains.
    pub(crate) fn to_skia(&self) -> Option<tiny_skia::Path> {
        let mut pb = tiny_skia::PathBuilder::new();
        for sub in &self.subpaths {
            if sub.segments.is_empty() {
                continue;
            }
            pb.move_to(sub.start.x, sub.start.y);
            for seg in &sub.segments {
                match *seg {
                    Segment::Line(p) => pb.line_to(p.x, p.y),
                    Segment::Quad(c, p) => pb.quad_to(c.x, c.y, p.x, p.y),
                    Segment::Cubic(c1, c2, p) => pb.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
                }
            }
            if sub.closed {
                pb.close();
            }
        }
        pb.finish()
    }
}
