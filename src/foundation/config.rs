use std::{collections::BTreeMap, path::Path, time::Duration};

use crate::{
    animation::ease::Ease,
    foundation::core::{Fps, MAX_SECONDS, is_valid_seconds},
    foundation::error::{PentweenError, PentweenResult},
};

/// Playback tuning shared by the diagram, its effects and the paginator.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaybackConfig {
    /// Advisory duration handed to every effect of a step.
    pub step_seconds: f64,
    /// Delay before a failed transition reports completion anyway.
    pub fallback_ms: u64,
    /// Length of vector slide sub-animations.
    pub slide_seconds: f64,
    /// Tick rate of vector slide sub-animations.
    pub slide_fps: Fps,
    /// Easing of vector slide sub-animations.
    pub slide_ease: Ease,
    /// Step key -> text shown while that step is the next one to play.
    pub step_descriptions: BTreeMap<String, String>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            step_seconds: 1.0,
            fallback_ms: 300,
            slide_seconds: 0.8,
            slide_fps: Fps::default(),
            slide_ease: Ease::OutQuad,
            step_descriptions: BTreeMap::new(),
        }
    }
}

impl PlaybackConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> PentweenResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| PentweenError::config(format!("parse playback config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: &Path) -> PentweenResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            PentweenError::config(format!("read playback config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Reject values that would stall or break playback.
    pub fn validate(&self) -> PentweenResult<()> {
        if !is_valid_seconds(self.step_seconds) {
            return Err(PentweenError::config(format!(
                "step_seconds must be finite and within 0..={MAX_SECONDS}"
            )));
        }
        if !is_valid_seconds(self.slide_seconds) {
            return Err(PentweenError::config(format!(
                "slide_seconds must be finite and within 0..={MAX_SECONDS}"
            )));
        }
        Fps::new(self.slide_fps.num, self.slide_fps.den)
            .map_err(|e| PentweenError::config(format!("slide_fps: {e}")))?;
        Ok(())
    }

    /// Fail-soft completion delay as a `Duration`.
    pub fn fallback(&self) -> Duration {
        Duration::from_millis(self.fallback_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
