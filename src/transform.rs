//! Affine transform construction.
//!
//! Free functions build the individual matrices; [`Transform`] chains them with
//! a fluent API where mutating methods return `&mut Self`:
//!
//! ```ignore
//! let matrix = Transform::new()
//!     .translate_to(observer)
//!     .rotate_about_point_on_axis(Axis::Y, center, 0.1)
//!     .to_matrix();
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::GeometryError;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

/// Coordinate axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of the axis in `[x, y, z]` order.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl FromStr for Axis {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" | "ox" => Ok(Axis::X),
            "y" | "oy" => Ok(Axis::Y),
            "z" | "oz" => Ok(Axis::Z),
            _ => Err(GeometryError::UnknownAxis(s.to_string())),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Matrix that moves `point` to the origin.
pub fn translate_to(point: Vec3) -> Mat4 {
    Mat4::translation(-point.x, -point.y, -point.z)
}

/// Matrix that moves the origin back to `point`; the inverse of [`translate_to`].
pub fn translate_back(point: Vec3) -> Mat4 {
    Mat4::translation(point.x, point.y, point.z)
}

/// Rotation about a coordinate axis through the origin.
pub fn rotate_about_axis(axis: Axis, angle: f64) -> Mat4 {
    match axis {
        Axis::X => Mat4::rotation_x(angle),
        Axis::Y => Mat4::rotation_y(angle),
        Axis::Z => Mat4::rotation_z(angle),
    }
}

/// Rotation about the line through `point` parallel to `axis`.
pub fn rotate_about_point_on_axis(axis: Axis, point: Vec3, angle: f64) -> Mat4 {
    translate_back(point) * rotate_about_axis(axis, angle) * translate_to(point)
}

/// Rotation about the line from `from` towards `to`.
///
/// A zero-length vector has no direction; the identity is returned.
pub fn rotate_about_vector(from: Vec3, to: Vec3, angle: f64) -> Mat4 {
    let direction = to - from;
    if direction.magnitude() <= f64::EPSILON {
        return Mat4::identity();
    }
    translate_back(from) * Mat4::rotation_about_unit(direction.normalize(), angle) * translate_to(from)
}

/// A composed affine transform.
///
/// Every appended step is applied after the steps already appended.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    /// Create the identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an arbitrary matrix.
    pub fn then(&mut self, matrix: Mat4) -> &mut Self {
        self.matrix = matrix * self.matrix;
        self
    }

    /// Append a translation that moves `point` to the origin.
    pub fn translate_to(&mut self, point: Vec3) -> &mut Self {
        self.then(translate_to(point))
    }

    /// Append a translation by `delta`.
    pub fn translate_by(&mut self, delta: Vec3) -> &mut Self {
        self.then(translate_back(delta))
    }

    /// Append a rotation about the line through `point` parallel to `axis`.
    pub fn rotate_about_point_on_axis(&mut self, axis: Axis, point: Vec3, angle: f64) -> &mut Self {
        self.then(rotate_about_point_on_axis(axis, point, angle))
    }

    /// Append a rotation about the line from `from` towards `to`.
    pub fn rotate_about_vector(&mut self, from: Vec3, to: Vec3, angle: f64) -> &mut Self {
        self.then(rotate_about_vector(from, to, angle))
    }

    /// The composed matrix.
    pub fn to_matrix(&self) -> Mat4 {
        self.matrix
    }
}
