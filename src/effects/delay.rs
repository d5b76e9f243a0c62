use futures::future::BoxFuture;

use crate::{
    effects::context::{Completion, PlayContext},
    effects::effect::{Effect, EffectKind, unless_stopped},
    foundation::core::secs_to_duration,
};

/// Pause between other effects. Has no visual payload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DelayEffect {
    seconds: f64,
}

impl DelayEffect {
    /// Pause for `seconds`; negative or non-finite values pause for zero.
    pub fn new(seconds: f64) -> Self {
        Self { seconds }
    }

    /// Requested pause length.
    pub fn seconds(&self) -> f64 {
        self.seconds
    }
}

impl Effect for DelayEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Delay
    }

    fn play<'a>(&'a mut self, ctx: &'a PlayContext) -> BoxFuture<'a, Completion> {
        let wait = secs_to_duration(self.seconds);
        Box::pin(async move {
            tokio::task::yield_now().await;
            match unless_stopped(ctx, tokio::time::sleep(wait)).await {
                Some(()) => Completion::Finished,
                None => Completion::Stopped,
            }
        })
    }

    fn stop(&mut self) {}

    fn to_end_state(&mut self) {}

    fn show(&mut self) {}

    fn hide(&mut self) {}
}

#[cfg(test)]
#[path = "../../tests/unit/effects/delay.rs"]
mod tests;
