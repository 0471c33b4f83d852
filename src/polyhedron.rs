//! Polyhedra: simple solids with their own vertices, and composites of other
//! polyhedra that move as one unit.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::GeometryError;
use crate::facet::{Facet, FacetId};
use crate::math::mat4::Mat4;
use crate::math::point::HomogeneousPoint;
use crate::math::vec3::Vec3;
use crate::projection::Projection;
use crate::transform;

static NEXT_OWNER: AtomicU32 = AtomicU32::new(1);

/// A convex solid.
///
/// Vertices live in an arena; facets refer to them by index, so every vertex is
/// transformed exactly once no matter how many facets share it.
#[derive(Clone, Debug, PartialEq)]
pub struct SimplePolyhedron {
    owner: u32,
    vertices: Vec<HomogeneousPoint>,
    facets: Vec<Facet>,
    rotation_center: HomogeneousPoint,
    geometric_center: HomogeneousPoint,
    axis: (usize, usize),
}

impl SimplePolyhedron {
    /// Creates a polyhedron from a vertex table and facet index lists.
    ///
    /// `axis` names the two vertices whose connecting line is the rotation vector.
    pub fn new(
        vertices: Vec<HomogeneousPoint>,
        facets: Vec<Vec<usize>>,
        axis: (usize, usize),
        rotation_center: Vec3,
        geometric_center: Vec3,
    ) -> Result<Self, GeometryError> {
        let len = vertices.len();
        for index in [axis.0, axis.1] {
            if index >= len {
                return Err(GeometryError::AxisVertexOutOfRange { index, len });
            }
        }

        let owner = NEXT_OWNER.fetch_add(1, Ordering::Relaxed);
        let facets = facets
            .into_iter()
            .enumerate()
            .map(|(index, indices)| {
                if let Some(&index) = indices.iter().find(|&&i| i >= len) {
                    return Err(GeometryError::VertexOutOfRange { index, len });
                }
                Facet::new(indices, FacetId { owner, index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            owner,
            vertices,
            facets,
            rotation_center: rotation_center.into(),
            geometric_center: geometric_center.into(),
            axis,
        })
    }

    /// Identifier shared by all facets of this polyhedron.
    pub fn owner(&self) -> u32 {
        self.owner
    }

    pub fn vertices(&self) -> &[HomogeneousPoint] {
        &self.vertices
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    fn transform(&mut self, matrix: &Mat4) {
        for vertex in &mut self.vertices {
            vertex.transform(matrix);
        }
        self.rotation_center.transform(matrix);
        self.geometric_center.transform(matrix);
    }

    fn project_and_classify(&mut self, projection: &Projection) {
        for vertex in &mut self.vertices {
            vertex.project(projection);
        }
        for facet in &mut self.facets {
            facet.update(&self.vertices, projection);
        }
    }

    fn rotation_axis(&self) -> (Vec3, Vec3) {
        (
            self.vertices[self.axis.0].position(),
            self.vertices[self.axis.1].position(),
        )
    }
}

/// Several polyhedra handled as one.
///
/// A composite has no vertices of its own. Its rotation vector runs from the
/// start of one child's vector to the end of another's.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositePolyhedron {
    children: Vec<Polyhedron>,
    rotation_center: HomogeneousPoint,
    geometric_center: HomogeneousPoint,
    axis: (usize, usize),
}

impl CompositePolyhedron {
    pub fn new(
        children: Vec<Polyhedron>,
        axis: (usize, usize),
        rotation_center: Vec3,
        geometric_center: Vec3,
    ) -> Result<Self, GeometryError> {
        if children.is_empty() {
            return Err(GeometryError::EmptyComposite);
        }
        let len = children.len();
        for index in [axis.0, axis.1] {
            if index >= len {
                return Err(GeometryError::ChildOutOfRange { index, len });
            }
        }
        Ok(Self {
            children,
            rotation_center: rotation_center.into(),
            geometric_center: geometric_center.into(),
            axis,
        })
    }

    /// A composite holding just `child`, centered on the origin, that takes
    /// its rotation vector from that child.
    pub fn around(child: Polyhedron) -> Self {
        Self {
            children: vec![child],
            rotation_center: HomogeneousPoint::at(0.0, 0.0, 0.0),
            geometric_center: HomogeneousPoint::at(0.0, 0.0, 0.0),
            axis: (0, 0),
        }
    }

    pub fn children(&self) -> &[Polyhedron] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Polyhedron] {
        &mut self.children
    }

    pub fn push(&mut self, child: Polyhedron) {
        self.children.push(child);
    }

    fn rotation_axis(&self) -> (Vec3, Vec3) {
        // Indices were checked in `new` and children are never removed.
        let start = self.children[self.axis.0].rotation_axis().0;
        let end = self.children[self.axis.1].rotation_axis().1;
        (start, end)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Polyhedron {
    Simple(SimplePolyhedron),
    Composite(CompositePolyhedron),
}

impl Polyhedron {
    /// Applies `matrix` to every vertex and to both centers.
    pub fn transform(&mut self, matrix: &Mat4) {
        match self {
            Polyhedron::Simple(simple) => simple.transform(matrix),
            Polyhedron::Composite(composite) => {
                for child in &mut composite.children {
                    child.transform(matrix);
                }
                composite.rotation_center.transform(matrix);
                composite.geometric_center.transform(matrix);
            }
        }
    }

    /// Projects every vertex and recomputes every facet's derived state.
    pub fn project_and_classify(&mut self, projection: &Projection) {
        match self {
            Polyhedron::Simple(simple) => simple.project_and_classify(projection),
            Polyhedron::Composite(composite) => {
                for child in &mut composite.children {
                    child.project_and_classify(projection);
                }
            }
        }
    }

    pub fn rotation_center(&self) -> Vec3 {
        match self {
            Polyhedron::Simple(simple) => simple.rotation_center.position(),
            Polyhedron::Composite(composite) => composite.rotation_center.position(),
        }
    }

    pub fn geometric_center(&self) -> Vec3 {
        match self {
            Polyhedron::Simple(simple) => simple.geometric_center.position(),
            Polyhedron::Composite(composite) => composite.geometric_center.position(),
        }
    }

    /// End points of the rotation vector.
    pub fn rotation_axis(&self) -> (Vec3, Vec3) {
        match self {
            Polyhedron::Simple(simple) => simple.rotation_axis(),
            Polyhedron::Composite(composite) => composite.rotation_axis(),
        }
    }

    /// Moves only the rotation center, leaving the geometry in place.
    pub fn set_rotation_center(&mut self, point: Vec3) {
        match self {
            Polyhedron::Simple(simple) => simple.rotation_center = point.into(),
            Polyhedron::Composite(composite) => composite.rotation_center = point.into(),
        }
    }

    /// Moves only the geometric center, leaving the geometry in place.
    pub fn set_geometric_center(&mut self, point: Vec3) {
        match self {
            Polyhedron::Simple(simple) => simple.geometric_center = point.into(),
            Polyhedron::Composite(composite) => composite.geometric_center = point.into(),
        }
    }

    /// Translates the whole polyhedron so its geometric center lands on `target`.
    pub fn move_geometric_center_to(&mut self, target: Vec3) {
        let offset = self.geometric_center() - target;
        self.transform(&transform::translate_to(offset));
    }

    /// All facets, depth first.
    pub fn facets(&self) -> Vec<&Facet> {
        let mut out = Vec::new();
        self.collect_facets(&mut out);
        out
    }

    /// All facets, depth first, for the clipping pass.
    pub fn facets_mut(&mut self) -> Vec<&mut Facet> {
        let mut out = Vec::new();
        self.collect_facets_mut(&mut out);
        out
    }

    fn collect_facets<'a>(&'a self, out: &mut Vec<&'a Facet>) {
        match self {
            Polyhedron::Simple(simple) => out.extend(simple.facets.iter()),
            Polyhedron::Composite(composite) => {
                for child in &composite.children {
                    child.collect_facets(out);
                }
            }
        }
    }

    fn collect_facets_mut<'a>(&'a mut self, out: &mut Vec<&'a mut Facet>) {
        match self {
            Polyhedron::Simple(simple) => out.extend(simple.facets.iter_mut()),
            Polyhedron::Composite(composite) => {
                for child in &mut composite.children {
                    child.collect_facets_mut(out);
                }
            }
        }
    }

    /// Number of simple solids in the tree.
    pub fn solid_count(&self) -> usize {
        match self {
            Polyhedron::Simple(_) => 1,
            Polyhedron::Composite(composite) => composite.children.iter().map(Polyhedron::solid_count).sum(),
        }
    }
}

impl From<SimplePolyhedron> for Polyhedron {
    fn from(simple: SimplePolyhedron) -> Self {
        Polyhedron::Simple(simple)
    }
}

impl From<CompositePolyhedron> for Polyhedron {
    fn from(composite: CompositePolyhedron) -> Self {
        Polyhedron::Composite(composite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{rotate_about_point_on_axis, Axis};
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn tetrahedron(offset: f64) -> SimplePolyhedron {
        SimplePolyhedron::new(
            vec![
                HomogeneousPoint::at(offset, 0.0, 0.0),
                HomogeneousPoint::at(offset + 1.0, 0.0, 0.0),
                HomogeneousPoint::at(offset, 1.0, 0.0),
                HomogeneousPoint::at(offset, 0.0, 1.0),
            ],
            vec![vec![0, 2, 1], vec![0, 1, 3], vec![0, 3, 2], vec![1, 2, 3]],
            (0, 3),
            Vec3::new(offset, 0.0, 0.0),
            Vec3::new(offset + 0.25, 0.25, 0.25),
        )
        .unwrap()
    }

    #[test]
    fn facet_index_out_of_range_is_rejected() {
        let err = SimplePolyhedron::new(
            vec![HomogeneousPoint::at(0.0, 0.0, 0.0); 3],
            vec![vec![0, 1, 5]],
            (0, 1),
            Vec3::ZERO,
            Vec3::ZERO,
        )
        .unwrap_err();
        assert_eq!(err, GeometryError::VertexOutOfRange { index: 5, len: 3 });
    }

    #[test]
    fn short_facet_is_rejected() {
        let err = SimplePolyhedron::new(
            vec![HomogeneousPoint::at(0.0, 0.0, 0.0); 3],
            vec![vec![0, 1]],
            (0, 1),
            Vec3::ZERO,
            Vec3::ZERO,
        )
        .unwrap_err();
        assert_eq!(err, GeometryError::TooFewVertices { count: 2 });
    }

    #[test]
    fn axis_out_of_range_is_rejected() {
        let err = SimplePolyhedron::new(
            vec![HomogeneousPoint::at(0.0, 0.0, 0.0); 3],
            vec![vec![0, 1, 2]],
            (0, 3),
            Vec3::ZERO,
            Vec3::ZERO,
        )
        .unwrap_err();
        assert_eq!(err, GeometryError::AxisVertexOutOfRange { index: 3, len: 3 });
    }

    #[test]
    fn facets_of_one_solid_share_an_owner() {
        let a = tetrahedron(0.0);
        let b = tetrahedron(0.0);
        assert_ne!(a.owner(), b.owner());
        assert!(a.facets().iter().all(|f| f.owner() == a.owner()));
        let indices: Vec<usize> = a.facets().iter().map(|f| f.id().index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn transform_moves_vertices_and_centers() {
        let mut poly = Polyhedron::from(tetrahedron(0.0));
        poly.transform(&Mat4::translation(1.0, 2.0, 3.0));
        assert_eq!(poly.rotation_center(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(poly.geometric_center(), Vec3::new(1.25, 2.25, 3.25));
        assert_eq!(
            poly.rotation_axis(),
            (Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, 4.0))
        );
    }

    #[test]
    fn empty_composite_is_rejected() {
        assert_eq!(
            CompositePolyhedron::new(vec![], (0, 0), Vec3::ZERO, Vec3::ZERO),
            Err(GeometryError::EmptyComposite)
        );
    }

    #[test]
    fn composite_axis_child_out_of_range_is_rejected() {
        assert_eq!(
            CompositePolyhedron::new(vec![tetrahedron(0.0).into()], (0, 1), Vec3::ZERO, Vec3::ZERO),
            Err(GeometryError::ChildOutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn composite_axis_spans_two_children() {
        let composite = CompositePolyhedron::new(
            vec![tetrahedron(0.0).into(), tetrahedron(5.0).into()],
            (0, 1),
            Vec3::ZERO,
            Vec3::ZERO,
        )
        .unwrap();
        let poly = Polyhedron::from(composite);
        assert_eq!(
            poly.rotation_axis(),
            (Vec3::new(0.0, 0.0, 0.0), Vec3::new(5.0, 0.0, 1.0))
        );
        assert_eq!(poly.facets().len(), 8);
        assert_eq!(poly.solid_count(), 2);
    }

    #[test]
    fn composite_delegates_transforms_to_children() {
        let mut poly = Polyhedron::from(
            CompositePolyhedron::new(
                vec![tetrahedron(0.0).into(), tetrahedron(5.0).into()],
                (0, 1),
                Vec3::ZERO,
                Vec3::ZERO,
            )
            .unwrap(),
        );
        poly.transform(&rotate_about_point_on_axis(Axis::Z, Vec3::ZERO, FRAC_PI_2));
        let Polyhedron::Composite(composite) = &poly else {
            panic!("expected a composite");
        };
        let moved = composite.children()[1].rotation_center();
        assert_relative_eq!(moved.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(moved.y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn move_geometric_center_translates_everything() {
        let mut poly = Polyhedron::from(tetrahedron(0.0));
        poly.move_geometric_center_to(Vec3::new(10.0, 0.0, 0.0));
        assert_relative_eq!(poly.geometric_center().x, 10.0);
        assert_relative_eq!(poly.rotation_center().x, 9.75);
    }

    #[test]
    fn projection_classifies_every_facet() {
        let mut poly = Polyhedron::from(tetrahedron(0.0));
        poly.transform(&Mat4::translation(0.0, 0.0, 10.0));
        poly.project_and_classify(&Projection::new(100.0, crate::math::vec2::Vec2::ZERO));
        let facets = poly.facets();
        assert!(facets.iter().all(|f| f.polygon().is_some()));
        let visible = facets.iter().filter(|f| f.is_visible()).count();
        assert!(visible >= 1 && visible < facets.len());
    }
}
