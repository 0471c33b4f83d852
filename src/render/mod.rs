//! Turning classified edges into pixels.
//!
//! The scene hands each facet's edges to a [`Drawer`]; the drawer decides how
//! visible and occluded pieces look. [`WireframeDrawer`] draws into a
//! [`Renderer`] pixel buffer.

mod renderer;

pub use renderer::Renderer;

use crate::clipper::Edge;
use crate::colors;

/// Receives the edges of one facet at a time.
pub trait Drawer {
    type Surface;

    fn draw(&mut self, surface: &mut Self::Surface, edges: &[Edge]);
}

/// Solid lines for visible pieces, dashed lines for occluded ones.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WireframeDrawer {
    pub visible_color: u32,
    pub occluded_color: u32,
    pub dash_count: u32,
    pub show_occluded: bool,
}

impl Default for WireframeDrawer {
    fn default() -> Self {
        Self {
            visible_color: colors::VISIBLE_EDGE,
            occluded_color: colors::OCCLUDED_EDGE,
            dash_count: 5,
            show_occluded: true,
        }
    }
}

impl Drawer for WireframeDrawer {
    type Surface = Renderer;

    fn draw(&mut self, surface: &mut Renderer, edges: &[Edge]) {
        for edge in edges {
            if self.show_occluded {
                for segment in edge.occluded() {
                    surface.draw_dashed_segment(segment.start, segment.end, self.dash_count, self.occluded_color);
                }
            }
            for segment in edge.visible() {
                surface.draw_segment(segment.start, segment.end, self.visible_color);
            }
        }
    }
}
