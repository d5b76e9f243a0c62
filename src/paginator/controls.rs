use std::fmt;

/// Text shown before a run starts.
pub const READY_TEXT: &str = "Ready to start";
/// Text shown right after a run starts.
pub const ADVANCE_TEXT: &str = "Click Next to advance";
/// Text shown once every step played.
pub const COMPLETE_TEXT: &str = "Animation complete";

/// Where the paginator is in a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaginatorState {
    /// No run; the static view is showing.
    NotStarted,
    /// Run active; holds the index of the next step to play.
    Running(usize),
    /// Every step played.
    Finished,
}

/// Label of the start/stop control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ToggleLabel {
    /// Starts a run.
    Start,
    /// Ends the current run.
    Stop,
}

impl fmt::Display for ToggleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "Start",
            Self::Stop => "Stop",
        })
    }
}

/// What the control panel shows.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct UiState {
    /// Start/stop label.
    pub toggle: ToggleLabel,
    /// Whether Next may be pressed.
    pub next_enabled: bool,
    /// Status text.
    pub text: String,
}

impl UiState {
    pub(crate) fn idle() -> Self {
        Self {
            toggle: ToggleLabel::Start,
            next_enabled: false,
            text: READY_TEXT.to_string(),
        }
    }

    pub(crate) fn running() -> Self {
        Self {
            toggle: ToggleLabel::Stop,
            next_enabled: true,
            text: ADVANCE_TEXT.to_string(),
        }
    }

    /// True while a run is active.
    pub fn is_running(&self) -> bool {
        self.toggle == ToggleLabel::Stop
    }

    /// True while a step plays: the run is active, Next is off and the run has not completed.
    pub fn is_busy(&self) -> bool {
        self.is_running() && !self.next_enabled && self.text != COMPLETE_TEXT
    }
}

impl fmt::Display for UiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let next = if self.next_enabled { "on" } else { "off" };
        write!(f, "[{}] [Next: {next}] {}", self.toggle, self.text)
    }
}

/// Result of one Next request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step with this index played to completion.
    Played(usize),
    /// No steps were left.
    Finished,
    /// The step was aborted.
    Stopped,
    /// Not running, or a step is already playing.
    Ignored,
}

/// User intent fed to [`crate::Paginator2D::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    /// Advance one step.
    Next,
    /// Start when idle, stop otherwise.
    Toggle,
    /// End the current run.
    Stop,
}

/// Keys the control panel listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Right arrow.
    ArrowRight,
    /// Space bar.
    Space,
    /// Enter / return.
    Enter,
    /// Escape.
    Escape,
    /// Anything else.
    Other,
}

impl Key {
    /// Control this key triggers given what the panel currently shows.
    pub fn control(self, ui: &UiState) -> Option<Control> {
        match self {
            Self::ArrowRight | Self::Space if ui.next_enabled => Some(Control::Next),
            Self::Enter => Some(Control::Toggle),
            Self::Escape if ui.is_running() => Some(Control::Stop),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paginator/controls.rs"]
mod tests;
