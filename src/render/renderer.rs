//! Low-level rendering primitives.
//!
//! Provides the [`Renderer`] struct which owns the color buffer and implements
//! solid and dashed lines.

use std::path::Path;

use crate::clipper::{clip_segment, LinePosition, Polygon2D, Segment};
use crate::colors;
use crate::math::vec2::Vec2;

pub struct Renderer {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
    /// The pixel grid as a clip polygon. Segments are cut to it before rasterizing.
    viewport: Polygon2D,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            color_buffer: vec![colors::BACKGROUND; buffer_len(width, height)],
            width,
            height,
            viewport: viewport(width, height),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.color_buffer = vec![colors::BACKGROUND; buffer_len(width, height)];
        self.width = width;
        self.height = height;
        self.viewport = viewport(width, height);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let index = y as usize * self.width as usize + x as usize;
            self.color_buffer[index] = color;
        }
    }

    /// Color at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.color_buffer[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Draws a line between two pixels using Bresenham's algorithm.
    ///
    /// The error term tracks the distance between the ideal line and the
    /// current pixel; whenever it crosses a threshold the minor axis steps too.
    /// Every pixel between the end points is visited, so callers keep the end
    /// points near the buffer (see [`draw_segment`](Self::draw_segment)).
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let (x0, y0, x1, y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let x_incr_direction = if x0 < x1 { 1 } else { -1 };
        let y_incr_direction = if y0 < y1 { 1 } else { -1 };

        let mut err = dx - dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            // Both coordinates stay between the i32 end points.
            self.set_pixel(x as i32, y as i32, color);
            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += x_incr_direction;
            }
            if e2 < dx {
                err += dx;
                y += y_incr_direction;
            }
        }
    }

    /// Draws the part of the line between two screen points that falls on
    /// the buffer.
    pub fn draw_segment(&mut self, from: Vec2, to: Vec2, color: u32) {
        if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
            return;
        }
        let segment = Segment::new(from, to);
        let result = clip_segment(segment, &self.viewport);
        if result.position == LinePosition::OutsideFully {
            return;
        }
        if result.is_unresolved() {
            log::trace!("inconsistent viewport clip of {segment:?}; skipping it");
            return;
        }
        for piece in result.split(segment).inside {
            let (x0, y0) = piece.start.to_pixel();
            let (x1, y1) = piece.end.to_pixel();
            self.draw_line(x0, y0, x1, y1, color);
        }
    }

    /// Splits the line into `parts` equal pieces and draws every other one,
    /// starting with the first.
    pub fn draw_dashed_segment(&mut self, from: Vec2, to: Vec2, parts: u32, color: u32) {
        let parts = parts.max(1);
        for i in (0..parts).step_by(2) {
            let start = from.lerp(to, i as f64 / parts as f64);
            let end = from.lerp(to, (i + 1) as f64 / parts as f64);
            self.draw_segment(start, end, color);
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    /// Writes the buffer to an image file; the format follows the extension.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        let image = image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let color = self.color_buffer[y as usize * self.width as usize + x as usize];
            image::Rgba(colors::to_rgba(color))
        });
        image.save(path)
    }
}

fn buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Rectangle covering every pixel of a `width` x `height` buffer. Empty for
/// an empty buffer.
fn viewport(width: u32, height: u32) -> Polygon2D {
    let (left, top) = (-0.5, -0.5);
    let (right, bottom) = (width as f64 - 0.5, height as f64 - 0.5);
    Polygon2D::new(vec![
        Vec2::new(left, top),
        Vec2::new(right, top),
        Vec2::new(right, bottom),
        Vec2::new(left, bottom),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: u32 = 0xFFFF0000;

    #[test]
    fn out_of_bounds_pixels_are_ignored() {
        let mut renderer = Renderer::new(4, 4);
        renderer.set_pixel(-1, 0, RED);
        renderer.set_pixel(4, 4, RED);
        assert!(renderer.as_bytes().chunks(4).all(|p| p != RED.to_ne_bytes()));
        assert_eq!(renderer.pixel(4, 0), None);
    }

    #[test]
    fn line_covers_both_end_points() {
        let mut renderer = Renderer::new(10, 10);
        renderer.draw_line(1, 8, 7, 2, RED);
        assert_eq!(renderer.pixel(1, 8), Some(RED));
        assert_eq!(renderer.pixel(7, 2), Some(RED));
        assert_eq!(renderer.pixel(4, 5), Some(RED));
    }

    #[test]
    fn dashed_line_leaves_gaps() {
        let mut renderer = Renderer::new(20, 1);
        renderer.draw_dashed_segment(Vec2::new(0.0, 0.0), Vec2::new(19.0, 0.0), 5, RED);
        let lit = (0..20).filter(|&x| renderer.pixel(x, 0) == Some(RED)).count();
        assert!(lit > 0 && lit < 20);
        assert_eq!(renderer.pixel(0, 0), Some(RED));
        assert_eq!(renderer.pixel(19, 0), Some(RED));
        assert_eq!(renderer.pixel(6, 0), Some(colors::BACKGROUND));
    }

    #[test]
    fn far_end_point_is_cut_to_the_buffer() {
        let mut renderer = Renderer::new(800, 600);
        renderer.draw_segment(Vec2::new(400.0, 300.0), Vec2::new(4.5e11, 300.0), RED);
        assert_eq!(renderer.pixel(399, 300), Some(colors::BACKGROUND));
        assert_eq!(renderer.pixel(400, 300), Some(RED));
        assert_eq!(renderer.pixel(799, 300), Some(RED));
        assert_eq!(renderer.pixel(600, 301), Some(colors::BACKGROUND));
    }

    #[test]
    fn segment_passing_by_the_buffer_draws_nothing() {
        let mut renderer = Renderer::new(800, 600);
        renderer.draw_segment(Vec2::new(-3.0e10, -1.0e10), Vec2::new(4.0e10, -2.0e10), RED);
        renderer.draw_segment(Vec2::new(f64::NAN, 0.0), Vec2::new(10.0, 10.0), RED);
        assert!(renderer.as_bytes().chunks(4).all(|p| p != RED.to_ne_bytes()));
    }

    #[test]
    fn empty_buffer_draws_nothing() {
        let mut renderer = Renderer::new(0, 5);
        renderer.draw_segment(Vec2::new(0.0, 0.0), Vec2::new(3.0, 3.0), RED);
        assert!(renderer.as_bytes().is_empty());
        renderer.resize(70_000, 0);
        assert!(renderer.as_bytes().is_empty());
    }

    #[test]
    fn buffer_length_is_computed_in_usize() {
        assert_eq!(buffer_len(70_000, 70_000), 4_900_000_000);
    }

    #[test]
    fn resize_reallocates_and_clears() {
        let mut renderer = Renderer::new(2, 2);
        renderer.set_pixel(0, 0, RED);
        renderer.resize(3, 1);
        assert_eq!(renderer.as_bytes().len(), 12);
        assert_eq!(renderer.pixel(0, 0), Some(colors::BACKGROUND));
    }
}
