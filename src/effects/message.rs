use futures::future::BoxFuture;

use crate::{
    effects::completion::{self, CompletionHandle},
    effects::context::{Completion, PlayContext},
    effects::effect::{Effect, EffectKind, unless_stopped},
    foundation::core::{Point, Rect, Size},
    surface::drawable::{ContainerRef, MessageRef},
};

/// Positions a note on the message layer and animates it in.
pub struct MessageEffect {
    model: MessageRef,
    container: ContainerRef,
    position: Point,
    size: Size,
    pending: Option<CompletionHandle>,
}

impl MessageEffect {
    /// Note `model` placed at `position` (top-left, pixels) with `size`.
    pub fn new(model: MessageRef, container: ContainerRef, position: Point, size: Size) -> Self {
        Self {
            model,
            container,
            position,
            size,
            pending: None,
        }
    }

    /// Placement rectangle of the note.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    fn place(&self) {
        self.container.place_note(&self.model.id(), self.rect());
    }
}

impl Effect for MessageEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Message
    }

    fn play<'a>(&'a mut self, ctx: &'a PlayContext) -> BoxFuture<'a, Completion> {
        self.place();
        self.show();
        Box::pin(async move {
            tokio::task::yield_now().await;
            if ctx.stop_signal().is_stopped() {
                return Completion::Stopped;
            }

            let (handle, wait) = completion::channel();
            self.pending = Some(handle.clone());
            let settled = match self.model.render_with_animation(handle, ctx.duration_secs()) {
                Ok(()) => unless_stopped(ctx, wait.wait()).await.map(|_| ()),
                Err(err) => {
                    tracing::warn!(note = %self.model.id(), error = %err, "note animation failed, showing it directly");
                    self.model.render_end_state();
                    unless_stopped(ctx, tokio::time::sleep(ctx.fallback())).await
                }
            };

            match settled {
                Some(()) => {
                    if let Some(handle) = self.pending.take() {
                        handle.disarm();
                    }
                    Completion::Finished
                }
                None => {
                    self.stop();
                    Completion::Stopped
                }
            }
        })
    }

    fn stop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.disarm();
        }
    }

    fn to_end_state(&mut self) {
        self.place();
        self.model.render_end_state();
    }

    fn show(&mut self) {
        self.model.show();
    }

    fn hide(&mut self) {
        self.model.hide();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/message.rs"]
mod tests;
