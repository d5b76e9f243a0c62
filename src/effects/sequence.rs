use futures::future::BoxFuture;

use crate::effects::{
    context::{Completion, PlayContext},
    effect::{Composite, Effect, EffectKind},
};

/// Plays its children one after another, in insertion order.
///
/// The completed counter doubles as the cursor of the child currently
/// playing. Children are hidden as they are added so that nothing is
/// visible before its turn.
#[derive(Default)]
pub struct SequenceStepEffect {
    children: Vec<Box<dyn Effect>>,
    completed: usize,
}

impl SequenceStepEffect {
    /// Empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence over `children`, hiding each.
    pub fn from_children(children: Vec<Box<dyn Effect>>) -> Self {
        let mut seq = Self::new();
        seq.add_all(children);
        seq
    }
}

impl Effect for SequenceStepEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Sequence
    }

    fn play<'a>(&'a mut self, ctx: &'a PlayContext) -> BoxFuture<'a, Completion> {
        self.completed = 0;
        Box::pin(async move {
            if self.children.is_empty() {
                tokio::task::yield_now().await;
                return Completion::Finished;
            }
            while self.completed < self.children.len() {
                if ctx.stop_signal().is_stopped() {
                    return Completion::Stopped;
                }
                let index = self.completed;
                let child = &mut self.children[index];
                tracing::trace!(index, kind = %child.kind(), "sequence child starting");
                if child.play(ctx).await == Completion::Stopped {
                    tracing::debug!(index, "sequence stopped");
                    return Completion::Stopped;
                }
                self.completed += 1;
            }
            Completion::Finished
        })
    }

    fn stop(&mut self) {
        if let Some(child) = self.children.get_mut(self.completed) {
            child.stop();
        }
    }

    fn to_end_state(&mut self) {
        for child in &mut self.children {
            child.to_end_state();
        }
        self.completed = self.children.len();
    }

    fn show(&mut self) {
        for child in &mut self.children {
            child.show();
        }
    }

    fn hide(&mut self) {
        for child in &mut self.children {
            child.hide();
        }
    }

    fn as_composite(&mut self) -> Option<&mut dyn Composite> {
        Some(self)
    }
}

impl Composite for SequenceStepEffect {
    fn add(&mut self, mut child: Box<dyn Effect>) {
        child.hide();
        self.children.push(child);
    }

    fn len(&self) -> usize {
        self.children.len()
    }

    fn completed_count(&self) -> usize {
        self.completed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/sequence.rs"]
mod tests;
