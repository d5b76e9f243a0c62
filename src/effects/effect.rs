use std::{fmt, future::Future};

use futures::future::BoxFuture;

use crate::{
    effects::context::{Completion, PlayContext},
    foundation::error::{PentweenError, PentweenResult},
};

/// Concrete family of an effect node, used for logging and structural checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Pen-drawn shape.
    Shape,
    /// Pure timer.
    Delay,
    /// Instant reveal of a shape.
    Show,
    /// Instant removal of a shape from view.
    Hide,
    /// Animated note.
    Message,
    /// Reversed vector that slides onto its mirror position.
    ReverseVector,
    /// Vector copy that slides to a new tail.
    MoveVector,
    /// Children one after another.
    Sequence,
    /// Children all at once.
    Parallel,
}

impl EffectKind {
    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Shape => "shape",
            Self::Delay => "delay",
            Self::Show => "show",
            Self::Hide => "hide",
            Self::Message => "message",
            Self::ReverseVector => "reverse_vector",
            Self::MoveVector => "move_vector",
            Self::Sequence => "sequence",
            Self::Parallel => "parallel",
        }
    }

    /// True for node families that own children.
    pub fn is_composite(self) -> bool {
        matches!(self, Self::Sequence | Self::Parallel)
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A playable unit of a diagram animation.
///
/// `play` reveals the effect before returning its future and the future
/// always yields at least once before resolving, so a parent never observes
/// completion from inside the call that started the child. A node is played
/// at most once; the future resolving is its single completion report.
pub trait Effect: Send {
    /// Node family.
    fn kind(&self) -> EffectKind;

    /// Start the transition and resolve when it finished or was stopped.
    fn play<'a>(&'a mut self, ctx: &'a PlayContext) -> BoxFuture<'a, Completion>;

    /// Halt an in-progress transition. Late completion reports are ignored afterwards.
    fn stop(&mut self);

    /// Jump to the fully-played visual state without animating.
    fn to_end_state(&mut self);

    /// Make the effect's visual visible without changing its progress.
    fn show(&mut self);

    /// Make the effect's visual invisible without changing its progress.
    fn hide(&mut self);

    /// Composite view of this node, `None` for leaves.
    fn as_composite(&mut self) -> Option<&mut dyn Composite> {
        None
    }
}

/// An effect that owns an ordered list of children.
pub trait Composite: Effect {
    /// Append a child.
    fn add(&mut self, child: Box<dyn Effect>);

    /// Append children in order.
    fn add_all(&mut self, children: Vec<Box<dyn Effect>>) {
        for child in children {
            self.add(child);
        }
    }

    /// Number of children.
    fn len(&self) -> usize;

    /// True when there are no children.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Children that reported completion during the current run.
    fn completed_count(&self) -> usize;
}

/// Add `child` under `node`, failing when `node` is a leaf.
pub fn add_child(node: &mut dyn Effect, child: Box<dyn Effect>) -> PentweenResult<()> {
    let kind = node.kind();
    match node.as_composite() {
        Some(composite) => {
            composite.add(child);
            Ok(())
        }
        None => Err(PentweenError::structure(format!(
            "cannot add a {} child to leaf effect '{kind}'",
            child.kind()
        ))),
    }
}

/// Race `fut` against the run's stop signal; `None` means stop won.
pub(crate) async fn unless_stopped<F: Future>(ctx: &PlayContext, fut: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = ctx.stop_signal().stopped() => None,
        out = fut => Some(out),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/effect.rs"]
mod tests;
