//! Vector, matrix and point algebra.

pub mod mat4;
pub mod point;
pub mod vec2;
pub mod vec3;
pub mod vec4;

/// Tolerance used by the 2D clipping tests, in screen units.
pub const CLIP_EPSILON: f64 = 1e-5;

/// Tolerance used when comparing facet extents for depth ordering.
pub const DEPTH_EPSILON: f64 = 1e-3;
