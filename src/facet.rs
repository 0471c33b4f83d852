//! One planar face of a polyhedron.
//!
//! A facet stores indices into its polyhedron's vertex arena. Everything else
//! (extents, visibility, the projected polygon) is derived once per frame by
//! [`Facet::update`].

use crate::clipper::{ClipMode, Edge, Polygon2D};
use crate::error::GeometryError;
use crate::math::point::HomogeneousPoint;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::projection::Projection;

/// Stable identity of a facet: the polyhedron that owns it and its position
/// in that polyhedron's facet list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FacetId {
    pub owner: u32,
    pub index: usize,
}

/// Axis-aligned bounding box in observer coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extents3 {
    pub min: Vec3,
    pub max: Vec3,
}

impl Extents3 {
    fn of(mut points: impl Iterator<Item = Vec3>) -> Option<Self> {
        let first = points.next()?;
        Some(points.fold(
            Self {
                min: first,
                max: first,
            },
            |acc, p| Self {
                min: acc.min.min(p),
                max: acc.max.max(p),
            },
        ))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Facet {
    id: FacetId,
    vertices: Vec<usize>,
    extents: Option<Extents3>,
    polygon: Option<Polygon2D>,
    visible: bool,
}

impl Facet {
    /// Creates a facet over the given vertex indices.
    ///
    /// Indices are listed counterclockwise as seen from outside the solid.
    /// Range checks against the vertex arena are the owner's job.
    pub fn new(vertices: Vec<usize>, id: FacetId) -> Result<Self, GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices {
                count: vertices.len(),
            });
        }
        Ok(Self {
            id,
            vertices,
            extents: None,
            polygon: None,
            visible: false,
        })
    }

    pub fn id(&self) -> FacetId {
        self.id
    }

    pub fn owner(&self) -> u32 {
        self.id.owner
    }

    pub fn vertex_indices(&self) -> &[usize] {
        &self.vertices
    }

    /// Recomputes extents, projection and visibility from the current vertex
    /// positions.
    ///
    /// Vertices that were already projected reuse their cached screen position.
    pub fn update(&mut self, points: &[HomogeneousPoint], projection: &Projection) {
        let screen: Vec<Vec2> = self
            .vertices
            .iter()
            .map(|&i| {
                let point = &points[i];
                point
                    .projection()
                    .unwrap_or_else(|| projection.project(point.position()))
            })
            .collect();

        self.extents = Extents3::of(self.vertices.iter().map(|&i| points[i].position()));
        self.visible = faces_observer(&screen);
        self.polygon = Some(Polygon2D::new(screen));
    }

    /// Whether the facet faces the observer, as of the last [`update`](Self::update).
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn extents(&self) -> Option<Extents3> {
        self.extents
    }

    pub fn polygon(&self) -> Option<&Polygon2D> {
        self.polygon.as_ref()
    }

    /// The projected edges with their visible and occluded pieces.
    pub fn edges(&self) -> &[Edge] {
        self.polygon.as_ref().map_or(&[], |p| p.edges())
    }

    /// Whether the projected outlines of the two facets can touch at all.
    pub fn may_overlap(&self, other: &Facet) -> bool {
        match (&self.polygon, &other.polygon) {
            (Some(a), Some(b)) => a.may_overlap(b),
            _ => false,
        }
    }

    /// Hides whatever part of this facet's edges `occluder` covers on screen.
    pub fn clip_by(&mut self, occluder: &Facet) {
        if let (Some(polygon), Some(outline)) = (self.polygon.as_mut(), occluder.polygon.as_ref()) {
            polygon.clip_by(outline, ClipMode::KeepOutside);
        }
    }

    /// Marks every edge as occluded.
    pub fn occlude_all(&mut self) {
        if let Some(polygon) = self.polygon.as_mut() {
            polygon.occlude_all();
        }
    }
}

/// Back-face test on projected vertices: counterclockwise on a y-down screen
/// gives a negative cross product.
fn faces_observer(screen: &[Vec2]) -> bool {
    match screen {
        [p0, p1, p2, ..] => (*p1 - *p0).cross(*p2 - *p0) < 0.0,
        _ => false,
    }
}
