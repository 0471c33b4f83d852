//! Perspective projection parameters.
//!
//! The observer sits at the origin looking along +Z. The screen plane is
//! `distance` units in front of it; a point `(x, y, z)` lands on the screen at
//! `round(x / (z / distance)) - center.x`, `round(y / (z / distance)) - center.y`.

use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// Smallest depth a point is projected with. Points at or behind the observer
/// are pushed onto this plane so the projected coordinates stay finite.
const MIN_DEPTH: f64 = 1e-6;

/// Smallest distance the screen can be moved to.
pub const MIN_DISTANCE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Distance from the observer to the screen plane.
    distance: f64,
    /// Offset subtracted from projected coordinates.
    screen_center: Vec2,
}

impl Projection {
    /// Creates a new projection.
    ///
    /// # Arguments
    /// * `distance` - Observer-to-screen distance
    /// * `screen_center` - Offset subtracted from every projected point
    pub fn new(distance: f64, screen_center: Vec2) -> Self {
        Self {
            distance: distance.max(MIN_DISTANCE),
            screen_center,
        }
    }

    /// Creates a projection whose line of sight hits the middle of a
    /// `width` x `height` viewport with a y-down pixel grid.
    pub fn for_viewport(distance: f64, width: u32, height: u32) -> Self {
        Self::new(
            distance,
            Vec2::new(-(width as f64) / 2.0, -(height as f64) / 2.0),
        )
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Moves the screen by `delta` along the line of sight.
    ///
    /// Returns `false` if the distance had to be clamped to [`MIN_DISTANCE`].
    pub fn move_screen(&mut self, delta: f64) -> bool {
        let wanted = self.distance + delta;
        self.distance = wanted.max(MIN_DISTANCE);
        wanted >= MIN_DISTANCE
    }

    /// Updates the viewport (typically called on window resize).
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.screen_center = Vec2::new(-(width as f64) / 2.0, -(height as f64) / 2.0);
    }

    /// Projects a point given in observer coordinates onto the screen.
    pub fn project(&self, point: Vec3) -> Vec2 {
        let depth = point.z.max(MIN_DEPTH) / self.distance;
        Vec2::new(
            (point.x / depth).round() - self.screen_center.x,
            (point.y / depth).round() - self.screen_center.y,
        )
    }
}
