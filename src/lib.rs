//! Hidden-line removal for scenes built from convex polyhedra.
//!
//! Objects are transformed in homogeneous coordinates, projected onto a screen
//! plane, culled facet by facet, depth-sorted and clipped against each other in
//! 2D. What survives is a set of edge pieces tagged visible or occluded, drawn
//! as solid or dashed wireframe lines. SDL2 is only used to show the result.
//!
//! # Quick Start
//!
//! ```ignore
//! use hidline::prelude::*;
//!
//! let config = Config::default();
//! let mut scene = Scene::new(&config);
//! scene.add_object(BoxBuilder::cube(200.0).build()?);
//! scene.rotate_around_axis(Axis::Y, 0.3);
//!
//! let mut renderer = Renderer::new(config.width, config.height);
//! scene.render(&mut renderer, &mut WireframeDrawer::default());
//! ```

// Public API - exposed to library consumers
pub mod builder;
pub mod clipper;
pub mod colors;
pub mod config;
pub mod error;
pub mod facet;
pub mod math;
pub mod polyhedron;
pub mod projection;
pub mod render;
pub mod scene;
pub mod sorting;
pub mod transform;
pub mod window;

pub use builder::BoxBuilder;
pub use clipper::{ClipMode, ClipResult, Edge, LinePosition, PointPosition, Polygon2D, Segment};
pub use config::{Config, Layout};
pub use error::GeometryError;
pub use polyhedron::{CompositePolyhedron, Polyhedron, SimplePolyhedron};
pub use projection::Projection;
pub use scene::{Command, RenderStats, Scene, SceneState};
pub use transform::{Axis, Transform};

/// Prelude module for convenient imports.
pub mod prelude {
    // Model
    pub use crate::builder::BoxBuilder;
    pub use crate::error::GeometryError;
    pub use crate::polyhedron::{CompositePolyhedron, Polyhedron, SimplePolyhedron};

    // Scene
    pub use crate::config::{Config, Layout};
    pub use crate::scene::{Command, RenderStats, Scene, SceneState};

    // Projection & Transform
    pub use crate::projection::Projection;
    pub use crate::transform::{Axis, Transform};

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Rendering
    pub use crate::render::{Drawer, Renderer, WireframeDrawer};

    // Window & Input
    pub use crate::window::{FrameLimiter, Keycode, Window, WindowEvent};
}
