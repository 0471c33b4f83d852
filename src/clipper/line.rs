//! Parametric clipping of a line segment against a convex polygon.
//!
//! The segment is written as `start + t * (end - start)` for `t` in `[0, 1]`.
//! Every edge of the clip polygon is a half-plane bounded by the edge line with
//! an inward normal; crossings where the segment enters a half-plane raise
//! `t0`, crossings where it leaves lower `t1`. Whatever remains of `[t0, t1]`
//! is the part of the segment inside the polygon.

use super::polygon::Polygon2D;
use crate::math::vec2::Vec2;
use crate::math::CLIP_EPSILON;

/// A straight piece of an edge, in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.direction().length()
    }

    /// Point at parameter `t`; `0` is `start`, `1` is `end`.
    pub fn point_at(&self, t: f64) -> Vec2 {
        self.start.lerp(self.end, t)
    }

    /// Parameter of the orthogonal projection of `point` onto the segment's line.
    pub fn parameter_of(&self, point: Vec2) -> f64 {
        let direction = self.direction();
        (point - self.start).dot(direction) / direction.length_squared()
    }

    /// Whether the projection of `point` onto the segment's line falls between
    /// the end points, with [`CLIP_EPSILON`] slack at both ends.
    pub fn spans(&self, point: Vec2) -> bool {
        let direction = self.direction();
        let length = direction.length();
        if length <= CLIP_EPSILON {
            return (point - self.start).length() <= CLIP_EPSILON;
        }
        let along = (point - self.start).dot(direction) / length;
        along >= -CLIP_EPSILON && along <= length + CLIP_EPSILON
    }
}

/// Where a point lies relative to a convex polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointPosition {
    Inside,
    OnEdge,
    Outside,
}

/// Where a segment lies relative to a convex polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinePosition {
    InsideFully,
    OutsideFully,
    PartiallyInside,
}

/// Outcome of [`clip_segment`].
///
/// For [`LinePosition::PartiallyInside`], `[t0, t1]` is the inside part of the
/// segment; a bound left at `0` or `1` means the segment ends inside the
/// polygon on that side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipResult {
    pub position: LinePosition,
    pub t0: f64,
    pub t1: f64,
}

impl ClipResult {
    fn with_position(position: LinePosition) -> Self {
        Self {
            position,
            t0: 0.0,
            t1: 1.0,
        }
    }

    /// The end points disagree but no crossing was found. Callers leave such
    /// a segment as it was.
    pub fn is_unresolved(&self) -> bool {
        self.position == LinePosition::PartiallyInside && self.t0 <= 0.0 && self.t1 >= 1.0
    }

    /// Splits `segment` into its inside and outside pieces according to this result.
    pub fn split(&self, segment: Segment) -> Pieces {
        let mut pieces = Pieces::default();
        match self.position {
            LinePosition::InsideFully => pieces.inside.push(segment),
            LinePosition::OutsideFully => pieces.outside.push(segment),
            LinePosition::PartiallyInside => {
                let entered = self.t0 > 0.0;
                let left = self.t1 < 1.0;
                match (entered, left) {
                    (false, true) => {
                        let cross = segment.point_at(self.t1);
                        pieces.inside.push(Segment::new(segment.start, cross));
                        pieces.outside.push(Segment::new(cross, segment.end));
                    }
                    (true, false) => {
                        let cross = segment.point_at(self.t0);
                        pieces.outside.push(Segment::new(segment.start, cross));
                        pieces.inside.push(Segment::new(cross, segment.end));
                    }
                    (true, true) => {
                        let first = segment.point_at(self.t0);
                        let second = segment.point_at(self.t1);
                        pieces.outside.push(Segment::new(segment.start, first));
                        pieces.inside.push(Segment::new(first, second));
                        pieces.outside.push(Segment::new(second, segment.end));
                    }
                    // Unresolved; see `is_unresolved`.
                    (false, false) => pieces.outside.push(segment),
                }
            }
        }
        pieces
    }
}

/// Inside and outside pieces of a clipped segment, in segment order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pieces {
    pub inside: Vec<Segment>,
    pub outside: Vec<Segment>,
}

/// Clips `segment` against the convex `polygon`.
pub fn clip_segment(segment: Segment, polygon: &Polygon2D) -> ClipResult {
    if !polygon.is_solid() {
        return ClipResult::with_position(LinePosition::OutsideFully);
    }

    let direction = segment.direction();
    let mut result = ClipResult::with_position(LinePosition::PartiallyInside);
    let mut narrowed = false;

    for (edge, normal) in polygon.edges().iter().zip(polygon.inward_normals()) {
        let Some(normal) = normal else {
            continue;
        };
        let q = normal.dot(segment.start - edge.start());
        let p = normal.dot(direction);

        if p.abs() <= CLIP_EPSILON {
            if q < -CLIP_EPSILON {
                return ClipResult::with_position(LinePosition::OutsideFully);
            }
            continue;
        }

        let t = -q / p;
        if !edge.segment().spans(segment.point_at(t)) {
            continue;
        }
        if t > result.t0 && t < result.t1 {
            if p < 0.0 {
                result.t1 = t;
            } else {
                result.t0 = t;
            }
            narrowed = true;
        }
    }

    if !narrowed {
        return ClipResult::with_position(line_position(segment, polygon));
    }

    // Touching a corner from outside yields a crossing pair with nothing between.
    // The gap is measured on screen, so long segments keep short inside parts.
    let middle = segment.point_at((result.t0 + result.t1) / 2.0);
    if (result.t1 - result.t0) * direction.length() <= CLIP_EPSILON
        || polygon.point_position(middle) == PointPosition::Outside
    {
        return ClipResult::with_position(LinePosition::OutsideFully);
    }
    result
}

/// Classifies a segment that crosses no polygon edge by its end points.
fn line_position(segment: Segment, polygon: &Polygon2D) -> LinePosition {
    use PointPosition::{Inside, OnEdge, Outside};

    match (
        polygon.point_position(segment.start),
        polygon.point_position(segment.end),
    ) {
        (Inside | OnEdge, Inside | OnEdge) => LinePosition::InsideFully,
        (Outside, Outside) | (OnEdge, Outside) | (Outside, OnEdge) => LinePosition::OutsideFully,
        _ => LinePosition::PartiallyInside,
    }
}
