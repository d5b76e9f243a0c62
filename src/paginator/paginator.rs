use std::{collections::BTreeMap, pin::pin, sync::Arc};

use tokio::sync::{mpsc, watch};

use crate::{
    diagram::diagram::{Diagram, StepPlayback},
    diagram::script::{LessonScript, StepCursor},
    effects::context::Completion,
    foundation::config::PlaybackConfig,
    paginator::controls::{COMPLETE_TEXT, Control, PaginatorState, StepOutcome, UiState},
};

/// Step-by-step controller of an animated lesson.
///
/// Owns an animated diagram that plays one step per Next request and a
/// static diagram that shows the whole lesson at once while no run is
/// active. Each run consumes a fresh [`crate::Script`] from the lesson, so a
/// stopped run never leaks queued effects into the next one.
pub struct Paginator2D {
    animated: Diagram,
    static_view: Diagram,
    script: Arc<dyn LessonScript>,
    descriptions: BTreeMap<String, String>,
    cursor: Option<StepCursor>,
    state: PaginatorState,
    played: usize,
    playing: bool,
    ui: UiState,
    ui_tx: watch::Sender<UiState>,
}

impl Paginator2D {
    /// Controller over the two views of `script`.
    ///
    /// Step descriptions come from the lesson, overridden by `config.step_descriptions`.
    pub fn new(
        animated: Diagram,
        static_view: Diagram,
        script: Arc<dyn LessonScript>,
        config: PlaybackConfig,
    ) -> Self {
        let mut descriptions = script.descriptions();
        descriptions.extend(config.step_descriptions);
        let ui = UiState::idle();
        let (ui_tx, _) = watch::channel(ui.clone());
        Self {
            animated,
            static_view,
            script,
            descriptions,
            cursor: None,
            state: PaginatorState::NotStarted,
            played: 0,
            playing: false,
            ui,
            ui_tx,
        }
    }

    /// Current state.
    pub fn state(&self) -> PaginatorState {
        self.state
    }

    /// Index of the next step, or the number of played steps once finished.
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            PaginatorState::NotStarted => None,
            PaginatorState::Running(i) => Some(i),
            PaginatorState::Finished => Some(self.played),
        }
    }

    /// True while a run is active.
    pub fn is_animating(&self) -> bool {
        self.state != PaginatorState::NotStarted
    }

    /// True while a step is playing.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// What the control panel shows.
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Receiver notified of every panel change.
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.ui_tx.subscribe()
    }

    /// The animated view.
    pub fn animated(&self) -> &Diagram {
        &self.animated
    }

    /// The all-at-once view.
    pub fn static_view(&self) -> &Diagram {
        &self.static_view
    }

    /// Begin a run, tearing down any active one first.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn start(&mut self) {
        if self.is_animating() {
            self.stop();
        }
        self.animated.clear_all();
        self.static_view.clear_all();
        let cursor = StepCursor::new(self.script.script());
        tracing::info!(steps = cursor.remaining(), "run started");
        self.cursor = Some(cursor);
        self.state = PaginatorState::Running(0);
        self.played = 0;
        self.set_ui(UiState::running());
    }

    /// Run the next step body and hand out its playback.
    ///
    /// Disables Next until [`Paginator2D::finish_next`] is called. Returns the
    /// outcome directly when there is nothing to play.
    pub fn begin_next(&mut self) -> Result<StepPlayback, StepOutcome> {
        if self.playing {
            return Err(StepOutcome::Ignored);
        }
        match self.state {
            PaginatorState::NotStarted => return Err(StepOutcome::Ignored),
            PaginatorState::Finished => return Err(StepOutcome::Finished),
            PaginatorState::Running(_) => {}
        }
        let Some(cursor) = self.cursor.as_mut() else {
            return Err(StepOutcome::Ignored);
        };
        if cursor.advance(&mut self.animated).is_none() {
            self.finish_run();
            return Err(StepOutcome::Finished);
        }
        let step = match self.animated.take_step() {
            Ok(step) => step,
            Err(err) => {
                tracing::warn!(%err, "animated view cannot play steps");
                return Err(StepOutcome::Ignored);
            }
        };
        self.playing = true;
        self.set_ui(UiState {
            next_enabled: false,
            ..self.ui.clone()
        });
        Ok(step)
    }

    /// Record how the step handed out by [`Paginator2D::begin_next`] ended.
    pub fn finish_next(&mut self, outcome: Completion) -> StepOutcome {
        self.playing = false;
        if outcome == Completion::Stopped {
            return StepOutcome::Stopped;
        }
        let Some(cursor) = self.cursor.as_ref() else {
            return StepOutcome::Stopped;
        };
        let index = cursor.index();
        let played = index.saturating_sub(1);
        self.played = index;
        if cursor.is_done() {
            self.finish_run();
        } else {
            let text = cursor
                .peek_key()
                .and_then(|key| self.descriptions.get(key).cloned())
                .unwrap_or_else(|| format!("Step {}", index + 1));
            self.state = PaginatorState::Running(index);
            self.set_ui(UiState {
                next_enabled: true,
                text,
                ..self.ui.clone()
            });
        }
        tracing::debug!(step = played, state = ?self.state, "step finished");
        StepOutcome::Played(played)
    }

    /// Play the next step and wait for it.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn handle_next(&mut self) -> StepOutcome {
        match self.begin_next() {
            Ok(mut step) => {
                let outcome = step.play().await;
                self.finish_next(outcome)
            }
            Err(outcome) => outcome,
        }
    }

    /// End the run and show the static view again.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn stop(&mut self) {
        self.animated.stop_animation();
        self.animated.clear_all();
        self.cursor = None;
        self.state = PaginatorState::NotStarted;
        self.played = 0;
        self.playing = false;
        self.render_static();
        self.set_ui(UiState::idle());
        tracing::info!("run stopped");
    }

    /// Start when idle, stop otherwise.
    pub fn handle_toggle(&mut self) {
        if self.is_animating() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Draw every step's end state on the static view.
    pub fn render_static(&mut self) -> usize {
        self.static_view.clear_all();
        self.script.script().run_all(&mut self.static_view)
    }

    /// Stop any active run.
    pub fn dispose(&mut self) {
        if self.is_animating() {
            self.stop();
        }
    }

    /// Drive the paginator from `controls` until the sender side closes.
    ///
    /// While a step plays, Next is ignored and Stop/Toggle abort the step:
    /// the tree is signalled, drained so every leaf runs its own stop, and
    /// the run is then stopped.
    pub async fn run(&mut self, mut controls: mpsc::Receiver<Control>) {
        while let Some(control) = controls.recv().await {
            match control {
                Control::Toggle => self.handle_toggle(),
                Control::Stop => {
                    if self.is_animating() {
                        self.stop();
                    }
                }
                Control::Next => {
                    let mut step = match self.begin_next() {
                        Ok(step) => step,
                        Err(outcome) => {
                            tracing::debug!(?outcome, "next without a step to play");
                            continue;
                        }
                    };
                    let stop = step.stop_handle();
                    let mut aborted = false;
                    let mut closed = false;
                    let outcome = {
                        let mut play = pin!(step.play());
                        loop {
                            tokio::select! {
                                outcome = &mut play => break outcome,
                                control = controls.recv(), if !closed => match control {
                                    Some(Control::Next) => tracing::debug!("next ignored while a step plays"),
                                    Some(Control::Toggle | Control::Stop) => {
                                        aborted = true;
                                        stop.stop();
                                    }
                                    None => {
                                        closed = true;
                                        aborted = true;
                                        stop.stop();
                                    }
                                },
                            }
                        }
                    };
                    self.finish_next(outcome);
                    if aborted {
                        self.stop();
                    }
                    if closed {
                        break;
                    }
                }
            }
        }
        tracing::debug!("control channel closed");
    }

    fn finish_run(&mut self) {
        self.state = PaginatorState::Finished;
        self.set_ui(UiState {
            next_enabled: false,
            text: COMPLETE_TEXT.to_string(),
            ..self.ui.clone()
        });
        tracing::info!(steps = self.played, "run complete");
    }

    fn set_ui(&mut self, ui: UiState) {
        if ui != self.ui {
            self.ui = ui.clone();
            self.ui_tx.send_replace(ui);
        }
    }
}

impl std::fmt::Debug for Paginator2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator2D")
            .field("state", &self.state)
            .field("playing", &self.playing)
            .field("ui", &self.ui)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paginator/paginator.rs"]
mod tests;
