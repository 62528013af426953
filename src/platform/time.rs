//! Frame timing
//!
//! Turns `requestAnimationFrame` timestamps into per-frame deltas. There is no
//! clamping and no catch-up: after a long gap (hidden tab) the next frame just
//! reports one large delta.

use crate::consts::FRAME_MS;

/// Number of frames in the FPS window
const FPS_WINDOW: usize = 60;

#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    frames_seen: usize,
    fps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_ms: None,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            frames_seen: 0,
            fps: 0,
        }
    }

    /// Record a frame at `now_ms` and return the elapsed time since the last
    /// one (nominal 60 Hz frame on the first call)
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => (now_ms - last).max(0.0) as f32,
            None => FRAME_MS,
        };
        self.last_ms = Some(now_ms);
        self.track_fps(now_ms);
        dt
    }

    fn track_fps(&mut self, now_ms: f64) {
        // Oldest sample is the slot about to be overwritten
        let oldest = self.frame_times[self.frame_index];
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frames_seen += 1;

        if self.frames_seen > FPS_WINDOW {
            let elapsed = now_ms - oldest;
            if elapsed > 0.0 {
                self.fps = (FPS_WINDOW as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    /// Rolling frames-per-second estimate (0 until the window fills)
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_nominal() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(12_345.0), FRAME_MS);
    }

    #[test]
    fn test_delta_between_frames() {
        let mut clock = FrameClock::new();
        clock.advance(1000.0);
        assert_eq!(clock.advance(1016.0), 16.0);
        assert_eq!(clock.advance(1050.0), 34.0);
    }

    #[test]
    fn test_long_gap_is_not_clamped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(10_000.0), 10_000.0);
    }

    #[test]
    fn test_time_going_backwards() {
        let mut clock = FrameClock::new();
        clock.advance(500.0);
        assert_eq!(clock.advance(400.0), 0.0);
    }

    #[test]
    fn test_fps_estimate() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.fps(), 0);
        for i in 0..=120 {
            clock.advance(i as f64 * 20.0);
        }
        assert_eq!(clock.fps(), 50);
    }
}
