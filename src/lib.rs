//! Pentween plays step-by-step, pen-animated mathematical diagrams.
//!
//! A lesson is authored as an ordered list of steps. Each step queues
//! effects on a [`Diagram`]: pen strokes, vector slides, notes and pauses.
//! The [`Paginator2D`] turns the queue of one step into a tree of
//! [`SequenceStepEffect`] and [`ParallelTweenEffect`] nodes, plays it, and
//! waits for the root to complete before accepting the next advance.
//!
//! # Pieces
//!
//! 1. **Effects**: leaves ([`MathShapeEffect`], [`DelayEffect`], [`MessageEffect`],
//!    [`ReverseVectorEffect`], [`MoveVectorEffect`], [`ShowEffect`], [`HideEffect`])
//!    and composites, all behind the async [`Effect`] trait.
//! 2. **Authoring**: [`Diagram`] in animated or static mode, and [`Script`]s of
//!    [`Step`]s, either written in Rust or loaded from a JSON [`Lesson`].
//! 3. **Control**: [`Paginator2D`] with its Start/Stop/Next state machine.
//! 4. **Surface**: the [`ShapeFactory`] boundary traits; [`LogSurface`] is a
//!    headless implementation that records every call.
//!
//! Playback is cooperative on a tokio runtime. A run's [`StopHandle`] reaches
//! every effect of the step in flight, and completion handles accept exactly
//! one report, so late callbacks from a torn-down tree are ignored.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod diagram;
mod effects;
mod foundation;
mod paginator;
mod surface;

pub use animation::ease::Ease;
pub use animation::tween::{Lerp, slide};
pub use diagram::diagram::{Diagram, DiagramMode, DiagramObject, StepPlayback};
pub use diagram::lesson::{Action, Lesson, LessonStep};
pub use diagram::script::{LessonScript, Script, Step, StepBody, StepCursor};
pub use effects::completion::{
    CompletionHandle, CompletionWait, WaitOutcome, channel as completion_channel,
};
pub use effects::context::{Completion, Pen, PlayContext, SlideSettings, StopHandle, StopSignal};
pub use effects::delay::DelayEffect;
pub use effects::effect::{Composite, Effect, EffectKind, add_child};
pub use effects::message::MessageEffect;
pub use effects::parallel::ParallelTweenEffect;
pub use effects::sequence::SequenceStepEffect;
pub use effects::shape::{HideEffect, MathShapeEffect, ShowEffect};
pub use effects::vector::{MoveVectorEffect, ReverseVectorEffect};
pub use foundation::config::PlaybackConfig;
pub use foundation::core::{
    Fps, MAX_FPS, MAX_SECONDS, Point, Rect, Size, Vec2, is_finite_point, is_valid_seconds,
    secs_to_duration,
};
pub use foundation::error::{PentweenError, PentweenResult};
pub use paginator::controls::{
    ADVANCE_TEXT, COMPLETE_TEXT, Control, Key, PaginatorState, READY_TEXT, StepOutcome,
    ToggleLabel, UiState,
};
pub use paginator::paginator::Paginator2D;
pub use surface::drawable::{
    ContainerRef, Drawable, DrawableRef, MessageAnimation, MessageContainer, MessageModel,
    MessageRef, ShapeFactory, ShapeSpec, ShapeStyle, VectorRef, VectorShape,
};
pub use surface::log::{LogSurface, ShapeSnapshot, SurfaceEvent};

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
pub(crate) mod test_support;
