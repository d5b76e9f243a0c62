use std::time::Duration;

use crate::foundation::error::{PentweenError, PentweenResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Upper bound accepted for any authored or configured duration, in seconds.
pub const MAX_SECONDS: f64 = 3600.0;

/// Upper bound accepted for a slide frame rate, in frames per second.
pub const MAX_FPS: f64 = 1000.0;

/// Frame rate used to tick sub-animations such as vector slides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Frames per `den` seconds.
    pub num: u32,
    /// Denominator; must be > 0.
    pub den: u32,
}

impl Fps {
    /// Build a validated frame rate.
    pub fn new(num: u32, den: u32) -> PentweenResult<Self> {
        if den == 0 {
            return Err(PentweenError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(PentweenError::validation("Fps num must be > 0"));
        }
        let fps = Self { num, den };
        if fps.as_f64() > MAX_FPS {
            return Err(PentweenError::validation(format!(
                "Fps {num}/{den} exceeds {MAX_FPS} frames per second"
            )));
        }
        Ok(fps)
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Wall-clock length of one frame, never shorter than one millisecond.
    pub fn frame_duration(self) -> Duration {
        let secs = f64::from(self.den) / f64::from(self.num.max(1));
        Duration::try_from_secs_f64(secs)
            .unwrap_or(Duration::MAX)
            .max(Duration::from_millis(1))
    }

    /// Number of frames needed to cover `secs`, never less than one.
    pub fn frames_covering(self, secs: f64) -> u64 {
        let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
        ((secs * self.as_f64()).ceil() as u64).max(1)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 60, den: 1 }
    }
}

/// Convert advisory seconds into a `Duration`.
///
/// Negative or non-finite input maps to zero; anything above [`MAX_SECONDS`] is clamped.
pub fn secs_to_duration(secs: f64) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::from_secs_f64(secs.min(MAX_SECONDS))
    } else {
        Duration::ZERO
    }
}

/// True when `secs` is finite and within `0..=MAX_SECONDS`.
pub fn is_valid_seconds(secs: f64) -> bool {
    secs.is_finite() && (0.0..=MAX_SECONDS).contains(&secs)
}

/// True when both coordinates of `p` are finite.
pub fn is_finite_point(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
