//! Platform abstraction layer
//!
//! Bridges browser events to the simulation:
//! - Input capture (held keys, key presses, clicks)
//! - Frame timing
//! - CSS pixel to logical canvas mapping

pub mod input;
pub mod time;

pub use input::InputState;
pub use time::FrameClock;

use glam::Vec2;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Map a position in the canvas element's CSS pixels (`offsetX/offsetY`) to
/// logical canvas coordinates. A zero-sized element maps to the origin.
pub fn canvas_to_logical(x: f32, y: f32, client_width: f32, client_height: f32) -> Vec2 {
    if client_width <= 0.0 || client_height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        x * CANVAS_WIDTH / client_width,
        y * CANVAS_HEIGHT / client_height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_at_logical_size() {
        assert_eq!(
            canvas_to_logical(123.0, 456.0, CANVAS_WIDTH, CANVAS_HEIGHT),
            Vec2::new(123.0, 456.0)
        );
    }

    #[test]
    fn test_scaled_canvas() {
        // Canvas displayed at half size
        assert_eq!(
            canvas_to_logical(200.0, 150.0, 400.0, 300.0),
            Vec2::new(400.0, 300.0)
        );
        // Canvas stretched to 1600x1200
        assert_eq!(
            canvas_to_logical(1600.0, 0.0, 1600.0, 1200.0),
            Vec2::new(800.0, 0.0)
        );
    }

    #[test]
    fn test_degenerate_canvas() {
        assert_eq!(canvas_to_logical(10.0, 10.0, 0.0, 300.0), Vec2::ZERO);
    }
}
