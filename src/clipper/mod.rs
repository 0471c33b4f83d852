//! Line clipping against convex polygons in screen space.
//!
//! - [`line`]: parametric clipping of a single segment, returning how much of
//!   it lies inside a polygon.
//! - [`polygon`]: projected polygons whose edges accumulate visible and
//!   occluded pieces as they are clipped by one polygon after another.

pub mod line;
pub mod polygon;

pub use line::{clip_segment, ClipResult, LinePosition, PointPosition, Segment};
pub use polygon::{Bounds2, ClipMode, Edge, Polygon2D};
