use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::sync::watch;

use crate::{
    animation::ease::Ease,
    foundation::config::PlaybackConfig,
    foundation::core::{Fps, Point},
};

/// How a play future ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// The transition ran to its end (or failed soft and was skipped).
    Finished,
    /// The run was aborted before the transition finished.
    Stopped,
}

impl Completion {
    /// True for [`Completion::Finished`].
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Finished)
    }
}

/// Shared record of where the pen last touched the canvas.
///
/// Clones share the same position, so one pen can be threaded through every
/// play context of a diagram.
#[derive(Clone, Debug, Default)]
pub struct Pen {
    last: Arc<Mutex<Option<Point>>>,
}

impl Pen {
    /// Fresh pen with no visited point.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last point the pen visited, if any.
    pub fn last_visited(&self) -> Option<Point> {
        self.last.lock().map(|p| *p).unwrap_or(None)
    }

    /// Move the pen to `point`.
    pub fn visit(&self, point: Point) {
        if let Ok(mut last) = self.last.lock() {
            *last = Some(point);
        }
    }

    /// Lift the pen off the canvas.
    pub fn reset(&self) {
        if let Ok(mut last) = self.last.lock() {
            *last = None;
        }
    }
}

/// Sending side of a run's stop broadcast.
#[derive(Clone, Debug)]
pub struct StopHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    /// New handle plus the signal effects listen on.
    pub fn new() -> (Self, StopSignal) {
        let (tx, rx) = watch::channel(false);
        (Self { tx: Arc::new(tx) }, StopSignal { rx })
    }

    /// Ask every listening effect to stop. Idempotent.
    pub fn stop(&self) {
        self.tx.send_replace(true);
    }

    /// True once [`StopHandle::stop`] has been called.
    pub fn is_stopped(&self) -> bool {
        *self.tx.borrow()
    }

    /// Another signal bound to this handle.
    pub fn signal(&self) -> StopSignal {
        StopSignal {
            rx: self.tx.subscribe(),
        }
    }
}

/// Receiving side of a run's stop broadcast.
#[derive(Clone, Debug)]
pub struct StopSignal {
    rx: watch::Receiver<bool>,
}

impl StopSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    /// True once stop has been requested.
    pub fn is_stopped(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once stop has been requested; pends forever if the handle is
    /// dropped without stopping.
    pub async fn stopped(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|stopped| *stopped).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Parameters of the positional sub-animation some leaves run after drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideSettings {
    /// Slide length in seconds.
    pub seconds: f64,
    /// Tick rate.
    pub fps: Fps,
    /// Easing curve.
    pub ease: Ease,
}

impl Default for SlideSettings {
    fn default() -> Self {
        Self {
            seconds: 0.8,
            fps: Fps::default(),
            ease: Ease::OutQuad,
        }
    }
}

/// Everything one `play` invocation threads down the effect tree.
#[derive(Clone, Debug)]
pub struct PlayContext {
    duration_secs: f64,
    pen: Pen,
    stop: StopSignal,
    fallback: Duration,
    slide: SlideSettings,
}

impl PlayContext {
    /// Context with the given advisory duration, a fresh pen and no stop source.
    pub fn new(duration_secs: f64) -> Self {
        Self {
            duration_secs,
            pen: Pen::new(),
            stop: StopSignal::never(),
            fallback: Duration::from_millis(300),
            slide: SlideSettings::default(),
        }
    }

    /// Root context for one step of a run, built from playback config.
    ///
    /// Returns the handle that aborts everything played under this context.
    pub fn for_run(config: &PlaybackConfig, pen: Pen) -> (Self, StopHandle) {
        let (handle, stop) = StopHandle::new();
        let ctx = Self {
            duration_secs: config.step_seconds,
            pen,
            stop,
            fallback: config.fallback(),
            slide: SlideSettings {
                seconds: config.slide_seconds,
                fps: config.slide_fps,
                ease: config.slide_ease,
            },
        };
        (ctx, handle)
    }

    /// Replace the pen.
    pub fn with_pen(mut self, pen: Pen) -> Self {
        self.pen = pen;
        self
    }

    /// Replace the stop signal.
    pub fn with_stop(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    /// Replace the fail-soft completion delay.
    pub fn with_fallback(mut self, fallback: Duration) -> Self {
        self.fallback = fallback;
        self
    }

    /// Replace the slide settings.
    pub fn with_slide(mut self, slide: SlideSettings) -> Self {
        self.slide = slide;
        self
    }

    /// Advisory per-effect duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Pen shared by every effect of the run.
    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    /// Stop signal of the run.
    pub fn stop_signal(&self) -> &StopSignal {
        &self.stop
    }

    /// Fail-soft completion delay.
    pub fn fallback(&self) -> Duration {
        self.fallback
    }

    /// Slide sub-animation parameters.
    pub fn slide(&self) -> SlideSettings {
        self.slide
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/context.rs"]
mod tests;
