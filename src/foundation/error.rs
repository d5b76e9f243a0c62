/// Convenience result type used across pentween.
pub type PentweenResult<T> = Result<T, PentweenError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum PentweenError {
    /// Misuse of the effect tree, such as adding a child to a leaf effect.
    #[error("structure error: {0}")]
    Structure(String),

    /// A drawable or message failed to start its transition.
    #[error("render error: {0}")]
    Render(String),

    /// An authored step body failed.
    #[error("script error: {0}")]
    Script(String),

    /// Invalid user-provided lesson or geometry data.
    #[error("validation error: {0}")]
    Validation(String),

    /// An operation was requested in a controller state that does not allow it.
    #[error("state error: {0}")]
    State(String),

    /// Errors while loading or validating playback configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PentweenError {
    /// Build a [`PentweenError::Structure`] value.
    pub fn structure(msg: impl Into<String>) -> Self {
        Self::Structure(msg.into())
    }

    /// Build a [`PentweenError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PentweenError::Script`] value.
    pub fn script(msg: impl Into<String>) -> Self {
        Self::Script(msg.into())
    }

    /// Build a [`PentweenError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PentweenError::State`] value.
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    /// Build a [`PentweenError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
