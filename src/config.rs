//! Runtime settings shared by the scene and the window shell.

use std::f64::consts::PI;

use crate::math::vec3::Vec3;
use crate::transform::Axis;

/// How a scene arranges the objects added to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Layout {
    /// Each added object replaces the previous one.
    Single,
    /// Objects accumulate on a circle of `radius` around the Z axis, viewed
    /// from `radius` units away.
    Ring { radius: f64 },
}

impl Layout {
    pub const DEFAULT_RING_RADIUS: f64 = 1000.0;

    pub fn ring() -> Self {
        Layout::Ring {
            radius: Self::DEFAULT_RING_RADIUS,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    /// Initial observer position in model coordinates.
    pub observer: Vec3,
    /// Observer-to-screen distance.
    pub display_distance: f64,
    /// Angle applied per rotation key press, in radians.
    pub rotation_step: f64,
    pub observer_step: f64,
    pub display_step: f64,
    /// Number of parts an occluded line is split into; every other part is drawn.
    pub dash_count: u32,
    pub show_occluded: bool,
    pub layout: Layout,
    /// Rotate the model a step about this axis every frame.
    pub auto_rotate: Option<Axis>,
    /// Edge length of the boxes the shell builds.
    pub box_size: f64,
    pub hole: bool,
    pub repeat: usize,
    pub fps: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            observer: Vec3::new(0.0, 0.0, -500.0),
            display_distance: 450.0,
            rotation_step: PI / 90.0,
            observer_step: 10.0,
            display_step: 10.0,
            dash_count: 5,
            show_occluded: true,
            layout: Layout::Single,
            auto_rotate: None,
            box_size: 200.0,
            hole: false,
            repeat: 1,
            fps: 60,
        }
    }
}

impl Config {
    /// Target duration of one frame, in milliseconds.
    pub fn frame_time_ms(&self) -> u64 {
        1000 / self.fps.max(1)
    }
}
