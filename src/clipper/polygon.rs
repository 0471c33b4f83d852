//! Projected convex polygons whose edges carry visible and occluded pieces.

use super::line::{clip_segment, PointPosition, Segment};
use crate::math::vec2::Vec2;
use crate::math::CLIP_EPSILON;

/// Which part of a clipped edge stays visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipMode {
    /// Keep what lies inside the clip polygon, as for a viewport window.
    KeepInside,
    /// Keep what lies outside the clip polygon, as for an occluding facet.
    KeepOutside,
}

/// Axis-aligned bounding box in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds2 {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds2 {
    /// Bounding box of `points`, or `None` when there are none.
    pub fn of(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(
            Self {
                min: *first,
                max: *first,
            },
            |acc, p| Self {
                min: Vec2::new(acc.min.x.min(p.x), acc.min.y.min(p.y)),
                max: Vec2::new(acc.max.x.max(p.x), acc.max.y.max(p.y)),
            },
        ))
    }

    /// Whether the boxes share any area or boundary, with [`CLIP_EPSILON`] slack.
    pub fn overlaps(&self, other: &Bounds2) -> bool {
        self.min.x <= other.max.x + CLIP_EPSILON
            && other.min.x <= self.max.x + CLIP_EPSILON
            && self.min.y <= other.max.y + CLIP_EPSILON
            && other.min.y <= self.max.y + CLIP_EPSILON
    }
}

/// One side of a projected polygon.
///
/// The visible and occluded lists together always cover the edge exactly once.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    start: Vec2,
    end: Vec2,
    visible: Vec<Segment>,
    occluded: Vec<Segment>,
}

impl Edge {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self {
            start,
            end,
            visible: vec![Segment::new(start, end)],
            occluded: Vec::new(),
        }
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn end(&self) -> Vec2 {
        self.end
    }

    pub fn segment(&self) -> Segment {
        Segment::new(self.start, self.end)
    }

    pub fn visible(&self) -> &[Segment] {
        &self.visible
    }

    pub fn occluded(&self) -> &[Segment] {
        &self.occluded
    }

    /// Makes the whole edge visible again.
    pub fn reset(&mut self) {
        self.visible.clear();
        self.visible.push(self.segment());
        self.occluded.clear();
    }

    /// Moves every visible piece to the occluded list.
    pub fn occlude_all(&mut self) {
        self.occluded.append(&mut self.visible);
    }

    fn clip_by(&mut self, polygon: &Polygon2D, mode: ClipMode) {
        for part in std::mem::take(&mut self.visible) {
            let result = clip_segment(part, polygon);
            if result.is_unresolved() {
                log::trace!("inconsistent clip of {part:?}; leaving it visible");
                self.visible.push(part);
                continue;
            }
            let pieces = result.split(part);
            let (keep, hide) = match mode {
                ClipMode::KeepInside => (pieces.inside, pieces.outside),
                ClipMode::KeepOutside => (pieces.outside, pieces.inside),
            };
            self.visible.extend(keep);
            self.occluded.extend(hide);
        }
    }
}

/// A convex polygon in screen coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon2D {
    vertices: Vec<Vec2>,
    edges: Vec<Edge>,
    /// Unit inward normal per edge; `None` for edges that cannot bound anything.
    normals: Vec<Option<Vec2>>,
    bounds: Option<Bounds2>,
}

impl Polygon2D {
    /// Builds the polygon from its vertices in boundary order.
    ///
    /// Either winding works; the normals are oriented toward the interior
    /// from the vertices themselves.
    pub fn new(vertices: Vec<Vec2>) -> Self {
        let n = vertices.len();
        let edges: Vec<Edge> = (0..n)
            .map(|i| Edge::new(vertices[i], vertices[(i + 1) % n]))
            .collect();
        let normals = (0..n).map(|i| inward_normal(&vertices, i)).collect();
        let bounds = Bounds2::of(&vertices);
        Self {
            vertices,
            edges,
            normals,
            bounds,
        }
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn inward_normals(&self) -> &[Option<Vec2>] {
        &self.normals
    }

    pub fn bounds(&self) -> Option<Bounds2> {
        self.bounds
    }

    /// Whether the polygon encloses any area. Collapsed polygons clip nothing.
    pub fn is_solid(&self) -> bool {
        self.normals.iter().flatten().count() >= 3
    }

    /// Whether the bounding boxes of the two polygons touch.
    pub fn may_overlap(&self, other: &Polygon2D) -> bool {
        match (self.bounds, other.bounds) {
            (Some(a), Some(b)) => a.overlaps(&b),
            _ => false,
        }
    }

    /// Classifies `point` against the polygon.
    pub fn point_position(&self, point: Vec2) -> PointPosition {
        for (edge, normal) in self.edges.iter().zip(&self.normals) {
            let Some(normal) = normal else {
                continue;
            };
            let side = normal.dot(edge.start - point);
            if side > CLIP_EPSILON {
                return PointPosition::Outside;
            }
            if side.abs() <= CLIP_EPSILON {
                return if edge.segment().spans(point) {
                    PointPosition::OnEdge
                } else {
                    PointPosition::Outside
                };
            }
        }
        PointPosition::Inside
    }

    /// Clips every visible piece of every edge against `clip`.
    pub fn clip_by(&mut self, clip: &Polygon2D, mode: ClipMode) {
        for edge in &mut self.edges {
            edge.clip_by(clip, mode);
        }
    }

    /// Marks every edge as fully occluded.
    pub fn occlude_all(&mut self) {
        for edge in &mut self.edges {
            edge.occlude_all();
        }
    }

    /// Makes every edge fully visible again.
    pub fn reset(&mut self) {
        for edge in &mut self.edges {
            edge.reset();
        }
    }
}

/// Unit normal of edge `i` pointing into the polygon.
///
/// The reference point is the end of the next edge, falling back to any other
/// vertex off the edge line when that one is collinear.
fn inward_normal(vertices: &[Vec2], i: usize) -> Option<Vec2> {
    let n = vertices.len();
    let start = vertices[i];
    let direction = vertices[(i + 1) % n] - start;
    if direction.length() <= CLIP_EPSILON {
        return None;
    }
    let normal = direction.perpendicular().normalize();
    let side = (2..n)
        .map(|k| normal.dot(vertices[(i + k) % n] - start))
        .find(|side| side.abs() > CLIP_EPSILON)?;
    Some(if side < 0.0 { -normal } else { normal })
}
