//! Homogeneous 3D points with a cached screen projection.

use super::mat4::Mat4;
use super::vec2::Vec2;
use super::vec3::Vec3;
use super::vec4::Vec4;
use crate::projection::Projection;

/// A vertex in homogeneous coordinates.
///
/// Points are mutated in place: [`transform`](Self::transform) replaces the
/// coordinates, [`project`](Self::project) caches the screen position until the
/// next projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HomogeneousPoint {
    coords: Vec4,
    projection: Option<Vec2>,
}

impl HomogeneousPoint {
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self {
            coords: Vec4::new(x, y, z, w),
            projection: None,
        }
    }

    /// Creates an affine point (w=1).
    pub const fn at(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, 1.0)
    }

    /// Cartesian position of the point.
    pub fn position(&self) -> Vec3 {
        self.coords.to_vec3_perspective()
    }

    /// Screen position from the last [`project`](Self::project) call.
    pub fn projection(&self) -> Option<Vec2> {
        self.projection
    }

    /// Applies `matrix` to the point. Any cached projection becomes stale and is dropped.
    pub fn transform(&mut self, matrix: &Mat4) {
        self.coords = *matrix * self.coords;
        self.projection = None;
    }

    pub fn project(&mut self, projection: &Projection) -> Vec2 {
        let screen = projection.project(self.position());
        self.projection = Some(screen);
        screen
    }
}

impl From<Vec3> for HomogeneousPoint {
    fn from(v: Vec3) -> Self {
        Self::at(v.x, v.y, v.z)
    }
}
