use std::sync::Arc;

use crate::{
    effects::{
        context::{Completion, Pen, PlayContext, StopHandle},
        delay::DelayEffect,
        effect::{Composite, Effect},
        message::MessageEffect,
        parallel::ParallelTweenEffect,
        sequence::SequenceStepEffect,
        shape::{HideEffect, MathShapeEffect, ShowEffect},
        vector::{MoveVectorEffect, ReverseVectorEffect},
    },
    foundation::config::PlaybackConfig,
    foundation::core::{Point, Size},
    foundation::error::{PentweenError, PentweenResult},
    surface::drawable::{
        DrawableRef, MessageAnimation, MessageRef, ShapeFactory, ShapeSpec, ShapeStyle, VectorRef,
    },
};

/// Whether a diagram animates its effects or applies them at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagramMode {
    /// Effects are queued and played step by step.
    Animated,
    /// Effects jump to their end state as soon as they are authored.
    Static,
}

/// Something a diagram built on its surface.
#[derive(Clone)]
pub enum DiagramObject {
    /// Pen-drawn shape.
    Shape(DrawableRef),
    /// Repositionable arrow.
    Vector(VectorRef),
    /// Text note.
    Message(MessageRef),
}

impl DiagramObject {
    fn hide(&self) {
        match self {
            Self::Shape(s) => s.hide(),
            Self::Vector(v) => v.hide(),
            Self::Message(m) => m.hide(),
        }
    }

    fn id(&self) -> String {
        match self {
            Self::Shape(s) => s.id(),
            Self::Vector(v) => v.id(),
            Self::Message(m) => m.id(),
        }
    }
}

impl std::fmt::Debug for DiagramObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::Shape(_) => "Shape",
            Self::Vector(_) => "Vector",
            Self::Message(_) => "Message",
        };
        f.debug_tuple(kind).field(&self.id()).finish()
    }
}

/// Authoring surface of a lesson: builds shapes and queues their effects.
///
/// In [`DiagramMode::Animated`] every authored effect waits in a queue until
/// [`Diagram::take_step`] drains it into one [`SequenceStepEffect`]. In
/// [`DiagramMode::Static`] the same calls render the end state immediately,
/// so running a script against a static diagram yields the final picture.
pub struct Diagram {
    mode: DiagramMode,
    factory: Arc<dyn ShapeFactory>,
    config: PlaybackConfig,
    pen: Pen,
    queue: Vec<Box<dyn Effect>>,
    objects: Vec<DiagramObject>,
    active: Option<StopHandle>,
}

impl Diagram {
    /// Diagram over `factory`.
    pub fn new(mode: DiagramMode, factory: Arc<dyn ShapeFactory>, config: PlaybackConfig) -> Self {
        Self {
            mode,
            factory,
            config,
            pen: Pen::new(),
            queue: Vec::new(),
            objects: Vec::new(),
            active: None,
        }
    }

    /// Animated diagram over `factory`.
    pub fn animated(factory: Arc<dyn ShapeFactory>, config: PlaybackConfig) -> Self {
        Self::new(DiagramMode::Animated, factory, config)
    }

    /// Static diagram over `factory`.
    pub fn static_view(factory: Arc<dyn ShapeFactory>, config: PlaybackConfig) -> Self {
        Self::new(DiagramMode::Static, factory, config)
    }

    /// Current mode.
    pub fn mode(&self) -> DiagramMode {
        self.mode
    }

    /// Playback settings applied to each step.
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Pen shared by every step of this diagram.
    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    /// Objects built since the last [`Diagram::clear_all`].
    pub fn objects(&self) -> &[DiagramObject] {
        &self.objects
    }

    /// Number of effects waiting for the next step.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Build `spec` and queue its pen stroke.
    pub fn draw(&mut self, spec: &ShapeSpec, style: &ShapeStyle) -> PentweenResult<DrawableRef> {
        let shape = self.factory.shape(spec, style)?;
        shape.hide();
        self.objects.push(DiagramObject::Shape(Arc::clone(&shape)));
        self.enqueue(Box::new(MathShapeEffect::new(Arc::clone(&shape))));
        Ok(shape)
    }

    /// Queue the reverse of the vector `from -> to`.
    ///
    /// The reversed arrow is drawn over the original and then slides so that
    /// it starts at `from`, pointing the opposite way.
    pub fn reverse_vector(
        &mut self,
        from: Point,
        to: Point,
        style: &ShapeStyle,
    ) -> PentweenResult<VectorRef> {
        let shape = self.factory.vector(to, from, style)?;
        shape.hide();
        self.objects.push(DiagramObject::Vector(Arc::clone(&shape)));
        self.enqueue(Box::new(ReverseVectorEffect::new(
            Arc::clone(&shape),
            from,
            to,
            to - from,
        )));
        Ok(shape)
    }

    /// Queue a copy of the vector `from -> to` that moves its tail to `target`.
    pub fn move_vector(
        &mut self,
        from: Point,
        to: Point,
        target: Point,
        style: &ShapeStyle,
    ) -> PentweenResult<VectorRef> {
        let shape = self.factory.vector(from, to, style)?;
        shape.hide();
        self.objects.push(DiagramObject::Vector(Arc::clone(&shape)));
        self.enqueue(Box::new(MoveVectorEffect::new(Arc::clone(&shape), from, target)));
        Ok(shape)
    }

    /// Queue a text note at `at` (top-left, pixels).
    pub fn message(
        &mut self,
        text: &str,
        at: Point,
        size: Size,
        animation: MessageAnimation,
        style: &ShapeStyle,
    ) -> PentweenResult<MessageRef> {
        let note = self.factory.message(text, animation, style)?;
        note.hide();
        self.objects.push(DiagramObject::Message(Arc::clone(&note)));
        let container = self.factory.note_container();
        self.enqueue(Box::new(MessageEffect::new(
            Arc::clone(&note),
            container,
            at,
            size,
        )));
        Ok(note)
    }

    /// Queue a pause.
    pub fn delay(&mut self, seconds: f64) {
        self.enqueue(Box::new(DelayEffect::new(seconds)));
    }

    /// Queue an instant reveal of `shape`.
    pub fn show(&mut self, shape: &DrawableRef) {
        self.enqueue(Box::new(ShowEffect::new(Arc::clone(shape))));
    }

    /// Queue an instant removal of `shape`.
    pub fn hide(&mut self, shape: &DrawableRef) {
        self.enqueue(Box::new(HideEffect::new(Arc::clone(shape))));
    }

    /// Group everything `build` queues into one parallel effect.
    ///
    /// Effects queued before a failure are still grouped; the error is
    /// returned afterwards.
    pub fn parallel(
        &mut self,
        build: impl FnOnce(&mut Diagram) -> PentweenResult<()>,
    ) -> PentweenResult<()> {
        if self.mode == DiagramMode::Static {
            return build(self);
        }
        let outer = std::mem::take(&mut self.queue);
        let result = build(self);
        let inner = std::mem::replace(&mut self.queue, outer);
        if !inner.is_empty() {
            self.queue.push(Box::new(ParallelTweenEffect::from_children(inner)));
        }
        result
    }

    /// Queue `effect`, or render its end state right away in static mode.
    pub fn enqueue(&mut self, mut effect: Box<dyn Effect>) {
        match self.mode {
            DiagramMode::Animated => self.queue.push(effect),
            DiagramMode::Static => effect.to_end_state(),
        }
    }

    /// Drain the queue into the playback of one step.
    ///
    /// A static diagram has nothing to play and returns [`PentweenError::State`].
    pub fn take_step(&mut self) -> PentweenResult<StepPlayback> {
        if self.mode == DiagramMode::Static {
            return Err(PentweenError::state(
                "a static diagram renders effects as they are authored and has no steps to play",
            ));
        }
        let mut tree = SequenceStepEffect::new();
        tree.add_all(std::mem::take(&mut self.queue));
        let (ctx, stop) = PlayContext::for_run(&self.config, self.pen.clone());
        self.active = Some(stop.clone());
        Ok(StepPlayback { tree, ctx, stop })
    }

    /// Play everything queued since the last step.
    pub async fn play_next(&mut self) -> PentweenResult<Completion> {
        let mut step = self.take_step()?;
        let outcome = step.play().await;
        self.active = None;
        Ok(outcome)
    }

    /// Signal the step handed out by the last [`Diagram::take_step`] to stop.
    pub fn stop_animation(&mut self) {
        if let Some(active) = self.active.take() {
            active.stop();
        }
    }

    /// Drop every queued effect without playing it.
    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    /// Stop, forget every object and wipe the surface.
    pub fn clear_all(&mut self) {
        self.stop_animation();
        self.clear_queue();
        for object in self.objects.drain(..) {
            object.hide();
        }
        self.factory.clear();
        self.pen.reset();
    }

    /// Render every queued effect at its end state and empty the queue.
    pub fn show_all_instantly(&mut self) {
        for mut effect in self.queue.drain(..) {
            effect.to_end_state();
        }
    }
}

impl std::fmt::Debug for Diagram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagram")
            .field("mode", &self.mode)
            .field("queued", &self.queue.len())
            .field("objects", &self.objects)
            .finish_non_exhaustive()
    }
}

/// One drained step: the sequence tree plus the context it plays under.
pub struct StepPlayback {
    tree: SequenceStepEffect,
    ctx: PlayContext,
    stop: StopHandle,
}

impl std::fmt::Debug for StepPlayback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepPlayback")
            .field("effects", &self.tree.len())
            .finish_non_exhaustive()
    }
}

impl StepPlayback {
    /// Handle that aborts this step from elsewhere.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Effects in this step.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// True when the step queued nothing.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Play the step to completion or until stopped.
    #[tracing::instrument(level = "debug", skip(self), fields(effects = self.tree.len()))]
    pub async fn play(&mut self) -> Completion {
        let outcome = self.tree.play(&self.ctx).await;
        tracing::debug!(?outcome, completed = self.tree.completed_count(), "step settled");
        outcome
    }

    /// Jump every effect of the step to its end state.
    pub fn finish_instantly(&mut self) {
        self.tree.to_end_state();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/diagram.rs"]
mod tests;
