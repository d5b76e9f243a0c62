use tokio::time::{MissedTickBehavior, interval};

use crate::{
    effects::context::{SlideSettings, StopSignal},
    foundation::core::{Point, Vec2},
};

/// Linear interpolation between two values.
pub trait Lerp: Sized {
    /// Value at fraction `t` between `a` and `b`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

impl<A: Lerp, B: Lerp> Lerp for (A, B) {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (A::lerp(&a.0, &b.0, t), B::lerp(&a.1, &b.1, t))
    }
}

/// Drive an eased interpolation from `from` to `to`, calling `apply` once per frame.
///
/// The final frame always applies `to` exactly. Returns `false` when `stop`
/// fired before the last frame.
pub async fn slide<T: Lerp>(
    from: T,
    to: T,
    settings: SlideSettings,
    stop: &StopSignal,
    mut apply: impl FnMut(T),
) -> bool {
    let frames = settings.fps.frames_covering(settings.seconds);
    let mut ticker = interval(settings.fps.frame_duration());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick of an interval is immediate.
    ticker.tick().await;

    for frame in 1..=frames {
        tokio::select! {
            biased;
            _ = stop.stopped() => return false,
            _ = ticker.tick() => {}
        }
        if frame == frames {
            apply(to);
            break;
        }
        apply(T::lerp(&from, &to, settings.ease.at_frame(frame, frames)));
    }
    true
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
