use futures::{StreamExt, future::BoxFuture, stream::FuturesUnordered};

use crate::effects::{
    context::{Completion, PlayContext},
    effect::{Composite, Effect, EffectKind},
};

/// Plays all children at once and finishes when the slowest one does.
#[derive(Default)]
pub struct ParallelTweenEffect {
    children: Vec<Box<dyn Effect>>,
    completed: usize,
}

impl ParallelTweenEffect {
    /// Empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Group over `children`.
    pub fn from_children(children: Vec<Box<dyn Effect>>) -> Self {
        Self {
            children,
            completed: 0,
        }
    }
}

impl Effect for ParallelTweenEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Parallel
    }

    fn play<'a>(&'a mut self, ctx: &'a PlayContext) -> BoxFuture<'a, Completion> {
        let Self {
            children,
            completed,
        } = self;
        *completed = 0;

        // Every child is started here, inside the caller's poll.
        let mut running: FuturesUnordered<_> =
            children.iter_mut().map(|child| child.play(ctx)).collect();

        Box::pin(async move {
            if running.is_empty() {
                tokio::task::yield_now().await;
                return Completion::Finished;
            }
            let mut outcome = Completion::Finished;
            while let Some(done) = running.next().await {
                match done {
                    Completion::Finished => *completed += 1,
                    Completion::Stopped => outcome = Completion::Stopped,
                }
            }
            outcome
        })
    }

    fn stop(&mut self) {
        for child in &mut self.children {
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

impl Composite for ParallelTweenEffect {
    fn add(&mut self, child: Box<dyn Effect>) {
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
#[path = "../../tests/unit/effects/parallel.rs"]
mod tests;
