use crate::error::{Error, Result};

/// Default animation frame rate.
pub const DEFAULT_FPS: u32 = 90;

/// Timestamp-gated rate limiter for the host's animation loop.
///
/// The host calls [`FrameLimiter::ready`] on every animation callback and only
/// runs `update` + `render` when it returns `true`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLimiter {
    interval_ms: f64,
    last_frame_ms: Option<f64>,
}

impl FrameLimiter {
    pub fn new(target_fps: u32) -> Result<Self> {
        if target_fps == 0 {
            return Err(Error::InvalidFrameRate);
        }
        Ok(Self {
            interval_ms: 1000.0 / f64::from(target_fps),
            last_frame_ms: None,
        })
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Returns `true` and records `now_ms` when more than one frame interval has
    /// passed since the last accepted frame. The first call is always accepted.
    pub fn ready(&mut self, now_ms: f64) -> bool {
        match self.last_frame_ms {
            Some(last) if now_ms <= last + self.interval_ms => false,
            _ => {
                self.last_frame_ms = Some(now_ms);
                true
            }
        }
    }

    /// Forgets the last frame, e.g. after the host paused the loop for a resize.
    pub fn reset(&mut self) {
        self.last_frame_ms = None;
    }
}

impl Default for FrameLimiter {
    fn default() -> Self {
        Self {
            interval_ms: 1000.0 / f64::from(DEFAULT_FPS),
            last_frame_ms: None,
        }
    }
}
