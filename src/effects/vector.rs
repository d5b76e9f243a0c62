use futures::future::BoxFuture;

use crate::{
    animation::tween::slide,
    effects::completion::CompletionHandle,
    effects::context::{Completion, PlayContext},
    effects::effect::{Effect, EffectKind},
    effects::shape::draw_stroke,
    foundation::core::{Point, Vec2},
    surface::drawable::VectorRef,
};

/// Draw an arrow, then slide it from one placement to another.
struct SlidingVector {
    shape: VectorRef,
    from: (Point, Point),
    to: (Point, Point),
    pending: Option<CompletionHandle>,
}

impl SlidingVector {
    async fn play(&mut self, ctx: &PlayContext) -> Completion {
        let (tail, head) = self.from;
        self.shape.set_endpoints(tail, head);

        let drawn = draw_stroke(self.shape.as_ref(), &mut self.pending, ctx).await;
        if drawn == Completion::Stopped {
            self.stop();
            return drawn;
        }

        let shape = &self.shape;
        let pen = ctx.pen();
        let finished = slide(self.from, self.to, ctx.slide(), ctx.stop_signal(), |(tail, head)| {
            shape.set_endpoints(tail, head);
            pen.visit(head);
        })
        .await;

        if finished {
            Completion::Finished
        } else {
            self.stop();
            Completion::Stopped
        }
    }

    fn stop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.disarm();
            self.shape.cancel_animation();
        }
    }

    fn to_end_state(&mut self) {
        let (tail, head) = self.to;
        self.shape.set_endpoints(tail, head);
        self.shape.show();
        self.shape.enable_stroke();
        self.shape.render_end_state();
    }
}

/// Reversed copy of a vector that slides onto its mirror image.
///
/// The arrow is first drawn from `original_end` back to `original_start`,
/// then slides until its tail rests on `original_start` and its head on
/// `original_start - displacement`.
pub struct ReverseVectorEffect {
    inner: SlidingVector,
}

impl ReverseVectorEffect {
    /// Wrap the reversed arrow `shape`.
    pub fn new(
        shape: VectorRef,
        original_start: Point,
        original_end: Point,
        displacement: Vec2,
    ) -> Self {
        Self {
            inner: SlidingVector {
                shape,
                from: (original_end, original_start),
                to: (original_start, original_start - displacement),
                pending: None,
            },
        }
    }

    /// Final `(tail, head)` after the slide.
    pub fn final_endpoints(&self) -> (Point, Point) {
        self.inner.to
    }
}

/// Copy of a vector, drawn in place, that slides to a new tail position.
pub struct MoveVectorEffect {
    inner: SlidingVector,
}

impl MoveVectorEffect {
    /// Wrap `shape`, currently drawn from `original_start`, and move its tail to `target_start`.
    pub fn new(shape: VectorRef, original_start: Point, target_start: Point) -> Self {
        let (_, head) = shape.endpoints();
        let offset = target_start - original_start;
        Self {
            inner: SlidingVector {
                shape,
                from: (original_start, head),
                to: (target_start, head + offset),
                pending: None,
            },
        }
    }

    /// Final `(tail, head)` after the slide.
    pub fn final_endpoints(&self) -> (Point, Point) {
        self.inner.to
    }
}

macro_rules! sliding_effect {
    ($ty:ident, $kind:expr) => {
        impl Effect for $ty {
            fn kind(&self) -> EffectKind {
                $kind
            }

            fn play<'a>(&'a mut self, ctx: &'a PlayContext) -> BoxFuture<'a, Completion> {
                self.show();
                Box::pin(self.inner.play(ctx))
            }

            fn stop(&mut self) {
                self.inner.stop();
            }

            fn to_end_state(&mut self) {
                self.inner.to_end_state();
            }

            fn show(&mut self) {
                self.inner.shape.show();
            }

            fn hide(&mut self) {
                self.inner.shape.hide();
            }
        }
    };
}

sliding_effect!(ReverseVectorEffect, EffectKind::ReverseVector);
sliding_effect!(MoveVectorEffect, EffectKind::MoveVector);

#[cfg(test)]
#[path = "../../tests/unit/effects/vector.rs"]
mod tests;
