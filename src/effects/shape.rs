use futures::future::BoxFuture;

use crate::{
    effects::completion::{self, CompletionHandle, WaitOutcome},
    effects::context::{Completion, PlayContext},
    effects::effect::{Effect, EffectKind, unless_stopped},
    surface::drawable::{Drawable, DrawableRef},
};

/// Draws one shape with the pen, continuing from wherever the pen last stopped.
pub struct MathShapeEffect {
    shape: DrawableRef,
    pending: Option<CompletionHandle>,
}

impl MathShapeEffect {
    /// Wrap `shape`.
    pub fn new(shape: DrawableRef) -> Self {
        Self {
            shape,
            pending: None,
        }
    }

    /// The wrapped shape.
    pub fn shape(&self) -> &DrawableRef {
        &self.shape
    }
}

impl Effect for MathShapeEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Shape
    }

    fn play<'a>(&'a mut self, ctx: &'a PlayContext) -> BoxFuture<'a, Completion> {
        self.show();
        Box::pin(async move {
            let outcome = draw_stroke(self.shape.as_ref(), &mut self.pending, ctx).await;
            if outcome == Completion::Stopped {
                self.stop();
            }
            outcome
        })
    }

    fn stop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.disarm();
            self.shape.cancel_animation();
        }
    }

    fn to_end_state(&mut self) {
        self.shape.show();
        self.shape.enable_stroke();
        self.shape.render_end_state();
    }

    fn show(&mut self) {
        self.shape.show();
    }

    fn hide(&mut self) {
        self.shape.hide();
    }
}

/// Run one pen stroke of `shape` to completion under `ctx`.
///
/// `pending` holds the live completion handle so a concurrent `stop` can
/// disarm it. A shape that refuses to animate is rendered at its end state
/// and reported complete after the context's fallback delay.
pub(crate) async fn draw_stroke<S: Drawable + ?Sized>(
    shape: &S,
    pending: &mut Option<CompletionHandle>,
    ctx: &PlayContext,
) -> Completion {
    tokio::task::yield_now().await;
    if ctx.stop_signal().is_stopped() {
        return Completion::Stopped;
    }

    let (handle, wait) = completion::channel();
    *pending = Some(handle.clone());

    let settled = match shape.render_with_animation(ctx.pen().last_visited(), handle) {
        Ok(()) => unless_stopped(ctx, wait.wait()).await.map(|outcome| {
            if outcome == WaitOutcome::Abandoned {
                tracing::debug!(shape = %shape.id(), "drawable dropped its completion handle");
            }
        }),
        Err(err) => {
            tracing::warn!(shape = %shape.id(), error = %err, "pen animation failed, showing end state");
            shape.enable_stroke();
            shape.render_end_state();
            unless_stopped(ctx, tokio::time::sleep(ctx.fallback())).await
        }
    };

    match settled {
        Some(()) => {
            if let Some(handle) = pending.take() {
                handle.disarm();
            }
            if let Some(end) = shape.pen_end() {
                ctx.pen().visit(end);
            }
            Completion::Finished
        }
        None => Completion::Stopped,
    }
}

/// Reveals a shape instantly when its turn comes.
pub struct ShowEffect {
    shape: DrawableRef,
}

impl ShowEffect {
    /// Wrap `shape`.
    pub fn new(shape: DrawableRef) -> Self {
        Self { shape }
    }
}

impl Effect for ShowEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Show
    }

    fn play<'a>(&'a mut self, ctx: &'a PlayContext) -> BoxFuture<'a, Completion> {
        self.show();
        Box::pin(async move { instant(ctx).await })
    }

    fn stop(&mut self) {}

    fn to_end_state(&mut self) {
        self.shape.show();
    }

    fn show(&mut self) {
        self.shape.show();
    }

    fn hide(&mut self) {
        self.shape.hide();
    }
}

/// Removes a shape from view when its turn comes.
///
/// Its visual payload is the absence of the shape, so `show`/`hide` leave
/// the shape alone until the effect plays.
pub struct HideEffect {
    shape: DrawableRef,
}

impl HideEffect {
    /// Wrap `shape`.
    pub fn new(shape: DrawableRef) -> Self {
        Self { shape }
    }
}

impl Effect for HideEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Hide
    }

    fn play<'a>(&'a mut self, ctx: &'a PlayContext) -> BoxFuture<'a, Completion> {
        self.shape.hide();
        Box::pin(async move { instant(ctx).await })
    }

    fn stop(&mut self) {}

    fn to_end_state(&mut self) {
        self.shape.hide();
    }

    fn show(&mut self) {}

    fn hide(&mut self) {}
}

async fn instant(ctx: &PlayContext) -> Completion {
    tokio::task::yield_now().await;
    if ctx.stop_signal().is_stopped() {
        Completion::Stopped
    } else {
        Completion::Finished
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/shape.rs"]
mod tests;
