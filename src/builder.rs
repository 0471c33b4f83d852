//! Box-shaped polyhedra.

use crate::error::GeometryError;
use crate::math::point::HomogeneousPoint;
use crate::math::vec3::Vec3;
use crate::polyhedron::{CompositePolyhedron, Polyhedron, SimplePolyhedron};

/// Facets of the unit box below, each wound so that `(p1 - p0) x (p2 - p0)`
/// points out of the solid.
const BOX_FACETS: [[usize; 4]; 6] = [
    [0, 3, 2, 1],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [7, 6, 2, 3],
    [0, 4, 7, 3],
    [1, 2, 6, 5],
];

/// The rotation vector of a box runs along its main diagonal.
const BOX_AXIS: (usize, usize) = (0, 6);

/// Builds boxes, boxes with a square hole through them, and rows of either.
///
/// ```ignore
/// let row = BoxBuilder::new(Vec3::new(200.0, 200.0, 200.0))
///     .with_hole(true)
///     .repeat(3)
///     .build()?;
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxBuilder {
    size: Vec3,
    hole: bool,
    repeat: usize,
    geometric_center: Vec3,
    rotation_center: Vec3,
}

impl BoxBuilder {
    pub fn new(size: Vec3) -> Self {
        Self {
            size,
            hole: false,
            repeat: 1,
            geometric_center: Vec3::ZERO,
            rotation_center: Vec3::ZERO,
        }
    }

    /// A cube with edge length `edge`.
    pub fn cube(edge: f64) -> Self {
        Self::new(Vec3::new(edge, edge, edge))
    }

    /// Cut a square hole along Z through the middle third of the box.
    pub fn with_hole(mut self, hole: bool) -> Self {
        self.hole = hole;
        self
    }

    /// Place `count` copies side by side along X.
    pub fn repeat(mut self, count: usize) -> Self {
        self.repeat = count;
        self
    }

    pub fn centered_at(mut self, point: Vec3) -> Self {
        self.geometric_center = point;
        self
    }

    pub fn rotating_about(mut self, point: Vec3) -> Self {
        self.rotation_center = point;
        self
    }

    pub fn build(&self) -> Result<Polyhedron, GeometryError> {
        let Vec3 { x, y, z } = self.size;
        if [x, y, z].iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(GeometryError::InvalidShape(format!(
                "box size must be positive, got {x} x {y} x {z}"
            )));
        }
        if self.repeat == 0 {
            return Err(GeometryError::InvalidShape(
                "repeat count must be at least 1".to_string(),
            ));
        }

        if self.repeat == 1 {
            return self.unit(self.geometric_center);
        }

        let gap = self.size.x / 2.0;
        let step = self.size.x + gap;
        let length = self.repeat as f64 * step - gap;
        let first = self.geometric_center.x - length / 2.0 + self.size.x / 2.0;
        let units = (0..self.repeat)
            .map(|i| {
                let center = Vec3::new(first + i as f64 * step, self.geometric_center.y, self.geometric_center.z);
                self.unit(center)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let last = units.len() - 1;
        Ok(CompositePolyhedron::new(units, (0, last), self.rotation_center, self.geometric_center)?.into())
    }

    /// One box, with or without its hole.
    fn unit(&self, center: Vec3) -> Result<Polyhedron, GeometryError> {
        if !self.hole {
            return Ok(solid_box(self.size, center, self.rotation_center)?.into());
        }

        // Four bars around the hole: full-height left and right, short bottom and top.
        let Vec3 { x: a, y: b, z: c } = self.size;
        let (third_a, third_b) = (a / 3.0, b / 3.0);
        let bars = [
            (Vec3::new(third_a, b, c), Vec3::new(-third_a, 0.0, 0.0)),
            (Vec3::new(third_a, b, c), Vec3::new(third_a, 0.0, 0.0)),
            (Vec3::new(third_a, third_b, c), Vec3::new(0.0, -third_b, 0.0)),
            (Vec3::new(third_a, third_b, c), Vec3::new(0.0, third_b, 0.0)),
        ];
        let children = bars
            .into_iter()
            .map(|(size, offset)| solid_box(size, center + offset, self.rotation_center).map(Polyhedron::from))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CompositePolyhedron::new(children, (0, 1), self.rotation_center, center)?.into())
    }
}

/// An axis-aligned box of `size` centered on `center`.
fn solid_box(size: Vec3, center: Vec3, rotation_center: Vec3) -> Result<SimplePolyhedron, GeometryError> {
    let Vec3 { x: a, y: b, z: c } = size;
    let origin = center - size / 2.0;
    let corners = [
        (0.0, 0.0, 0.0),
        (0.0, 0.0, c),
        (a, 0.0, c),
        (a, 0.0, 0.0),
        (0.0, b, 0.0),
        (0.0, b, c),
        (a, b, c),
        (a, b, 0.0),
    ];
    let vertices = corners
        .iter()
        .map(|&(x, y, z)| HomogeneousPoint::from(origin + Vec3::new(x, y, z)))
        .collect();
    let facets = BOX_FACETS.iter().map(|f| f.to_vec()).collect();
    SimplePolyhedron::new(vertices, facets, BOX_AXIS, rotation_center, center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn cube_is_a_simple_box() {
        let poly = BoxBuilder::cube(2.0).centered_at(Vec3::new(1.0, 1.0, 1.0)).build().unwrap();
        let Polyhedron::Simple(simple) = &poly else {
            panic!("expected a simple polyhedron");
        };
        assert_eq!(simple.vertices().len(), 8);
        assert_eq!(simple.facets().len(), 6);
        assert_eq!(simple.vertices()[0].position(), Vec3::ZERO);
        assert_eq!(simple.vertices()[6].position(), Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(poly.geometric_center(), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(poly.rotation_axis(), (Vec3::ZERO, Vec3::new(2.0, 2.0, 2.0)));
    }

    #[test]
    fn box_facets_wind_outward() {
        let poly = BoxBuilder::new(Vec3::new(4.0, 2.0, 6.0)).build().unwrap();
        let Polyhedron::Simple(simple) = &poly else {
            panic!("expected a simple polyhedron");
        };
        let center = poly.geometric_center();
        for facet in simple.facets() {
            let p: Vec<Vec3> = facet
                .vertex_indices()
                .iter()
                .map(|&i| simple.vertices()[i].position())
                .collect();
            let normal = (p[1] - p[0]).cross(p[2] - p[0]);
            assert!(normal.dot(p[0] - center) > 0.0, "facet {:?} winds inward", facet.id());
        }
    }

    #[test]
    fn hole_builds_four_bars() {
        let poly = BoxBuilder::cube(3.0).with_hole(true).build().unwrap();
        assert_eq!(poly.solid_count(), 4);
        assert_eq!(poly.facets().len(), 24);
        let (start, end) = poly.rotation_axis();
        assert_relative_eq!(start.x, -1.5);
        assert_relative_eq!(end.x, 1.5);
        assert_relative_eq!(end.y, 1.5);
    }

    #[test]
    fn repeat_lays_units_along_x() {
        let poly = BoxBuilder::cube(2.0).repeat(3).build().unwrap();
        let Polyhedron::Composite(row) = &poly else {
            panic!("expected a composite");
        };
        let centers: Vec<f64> = row.children().iter().map(|c| c.geometric_center().x).collect();
        assert_eq!(centers, vec![-3.0, 0.0, 3.0]);
        assert_eq!(poly.geometric_center(), Vec3::ZERO);
    }

    #[test]
    fn repeated_holes_nest_composites() {
        let poly = BoxBuilder::cube(3.0).with_hole(true).repeat(2).build().unwrap();
        assert_eq!(poly.solid_count(), 8);
    }

    #[rstest]
    #[case(Vec3::new(0.0, 1.0, 1.0), 1)]
    #[case(Vec3::new(1.0, -1.0, 1.0), 1)]
    #[case(Vec3::new(1.0, 1.0, f64::NAN), 1)]
    #[case(Vec3::new(1.0, 1.0, 1.0), 0)]
    fn invalid_parameters_are_rejected(#[case] size: Vec3, #[case] repeat: usize) {
        let result = BoxBuilder::new(size).repeat(repeat).build();
        assert!(matches!(result, Err(GeometryError::InvalidShape(_))));
    }
}
