//! JSON lesson documents.
//!
//! A lesson lists its steps declaratively; each step is a list of actions
//! that map one-to-one onto [`Diagram`] authoring calls.

use std::{collections::BTreeMap, path::Path};

use crate::{
    diagram::diagram::Diagram,
    diagram::script::{LessonScript, Script, Step},
    foundation::core::{MAX_SECONDS, Point, Size, is_finite_point, is_valid_seconds},
    foundation::error::{PentweenError, PentweenResult},
    surface::drawable::{MessageAnimation, ShapeSpec, ShapeStyle},
};

/// A whole lesson as stored on disk.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Lesson {
    /// Human-readable title.
    pub title: String,
    /// Step key -> text shown while that step is next.
    #[serde(default)]
    pub descriptions: BTreeMap<String, String>,
    /// Steps in playing order.
    pub steps: Vec<LessonStep>,
}

/// One user-paced step.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LessonStep {
    /// Description key.
    #[serde(default)]
    pub key: Option<String>,
    /// Actions authored by this step, in order.
    pub actions: Vec<Action>,
}

/// One authoring call.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Draw a shape with the pen.
    Draw {
        /// Geometry.
        shape: ShapeSpec,
        /// Stroke style.
        #[serde(default)]
        style: ShapeStyle,
    },
    /// Reverse the vector `from -> to`.
    ReverseVector {
        /// Tail of the original vector.
        from: Point,
        /// Head of the original vector.
        to: Point,
        /// Stroke style.
        #[serde(default)]
        style: ShapeStyle,
    },
    /// Move a copy of the vector `from -> to` so its tail sits on `target`.
    MoveVector {
        /// Tail of the original vector.
        from: Point,
        /// Head of the original vector.
        to: Point,
        /// New tail.
        target: Point,
        /// Stroke style.
        #[serde(default)]
        style: ShapeStyle,
    },
    /// Show a text note.
    Message {
        /// Note text.
        text: String,
        /// Top-left corner in pixels.
        at: Point,
        /// Note size in pixels.
        size: Size,
        /// Entrance animation.
        #[serde(default)]
        animation: MessageAnimation,
        /// Text style.
        #[serde(default)]
        style: ShapeStyle,
    },
    /// Pause.
    Delay {
        /// Pause length.
        seconds: f64,
    },
    /// Play the nested actions together.
    Parallel {
        /// Actions started at once.
        actions: Vec<Action>,
    },
}

impl Action {
    /// Author this action on `diagram`.
    pub fn apply(&self, diagram: &mut Diagram) -> PentweenResult<()> {
        match self {
            Self::Draw { shape, style } => diagram.draw(shape, style).map(drop),
            Self::ReverseVector { from, to, style } => {
                diagram.reverse_vector(*from, *to, style).map(drop)
            }
            Self::MoveVector {
                from,
                to,
                target,
                style,
            } => diagram.move_vector(*from, *to, *target, style).map(drop),
            Self::Message {
                text,
                at,
                size,
                animation,
                style,
            } => diagram
                .message(text, *at, *size, *animation, style)
                .map(drop),
            Self::Delay { seconds } => {
                diagram.delay(*seconds);
                Ok(())
            }
            Self::Parallel { actions } => diagram.parallel(|d| {
                for action in actions {
                    action.apply(d)?;
                }
                Ok(())
            }),
        }
    }

    fn validate(&self, at: &str) -> PentweenResult<()> {
        let bad = |msg: &str| Err(PentweenError::validation(format!("{at}: {msg}")));
        match self {
            Self::Draw { shape, .. } => validate_shape(shape, at),
            Self::ReverseVector { from, to, .. } => {
                if !is_finite_point(*from) || !is_finite_point(*to) {
                    return bad("vector endpoints must be finite");
                }
                Ok(())
            }
            Self::MoveVector {
                from, to, target, ..
            } => {
                if ![*from, *to, *target].into_iter().all(is_finite_point) {
                    return bad("vector endpoints must be finite");
                }
                Ok(())
            }
            Self::Message { text, at: pos, size, .. } => {
                if text.trim().is_empty() {
                    return bad("message text must not be empty");
                }
                if !is_finite_point(*pos) {
                    return bad("message position must be finite");
                }
                if !(size.width.is_finite() && size.height.is_finite())
                    || size.width <= 0.0
                    || size.height <= 0.0
                {
                    return bad("message size must be finite and > 0");
                }
                Ok(())
            }
            Self::Delay { seconds } => {
                if !is_valid_seconds(*seconds) {
                    let msg = format!("delay seconds must be finite and within 0..={MAX_SECONDS}");
                    return bad(msg.as_str());
                }
                Ok(())
            }
            Self::Parallel { actions } => {
                for (i, action) in actions.iter().enumerate() {
                    action.validate(&format!("{at}.actions[{i}]"))?;
                }
                Ok(())
            }
        }
    }
}

fn validate_shape(shape: &ShapeSpec, at: &str) -> PentweenResult<()> {
    let bad = |msg: String| Err(PentweenError::validation(format!("{at}: {msg}")));
    let name = shape.name();
    let points: Vec<Point> = match shape {
        ShapeSpec::Point { at, radius } => {
            if !radius.is_finite() || *radius <= 0.0 {
                return bad(format!("{name} radius must be finite and > 0"));
            }
            vec![*at]
        }
        ShapeSpec::Line { from, to } | ShapeSpec::Vector { from, to } => vec![*from, *to],
        ShapeSpec::Circle { center, radius } => {
            if !radius.is_finite() || *radius <= 0.0 {
                return bad(format!("{name} radius must be finite and > 0"));
            }
            vec![*center]
        }
        ShapeSpec::Polygon { points } => {
            if points.len() < 2 {
                return bad(format!("{name} needs at least two points"));
            }
            points.clone()
        }
        ShapeSpec::Arc {
            center,
            radius,
            start_deg,
            sweep_deg,
        } => {
            if !radius.is_finite() || *radius <= 0.0 {
                return bad(format!("{name} radius must be finite and > 0"));
            }
            if !start_deg.is_finite() || !sweep_deg.is_finite() {
                return bad(format!("{name} angles must be finite"));
            }
            vec![*center]
        }
    };
    if !points.into_iter().all(is_finite_point) {
        return bad(format!("{name} coordinates must be finite"));
    }
    Ok(())
}

impl Lesson {
    /// Parse and validate a JSON lesson.
    pub fn from_json_str(s: &str) -> PentweenResult<Self> {
        let lesson: Self = serde_json::from_str(s)
            .map_err(|e| PentweenError::validation(format!("parse lesson: {e}")))?;
        lesson.validate()?;
        Ok(lesson)
    }

    /// Read, parse and validate a JSON lesson file.
    pub fn from_path(path: &Path) -> PentweenResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            PentweenError::validation(format!("read lesson '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Check every action for values that cannot be drawn.
    pub fn validate(&self) -> PentweenResult<()> {
        for (s, step) in self.steps.iter().enumerate() {
            for (a, action) in step.actions.iter().enumerate() {
                action.validate(&format!("steps[{s}].actions[{a}]"))?;
            }
        }
        Ok(())
    }

    /// Total number of actions, nested ones included.
    pub fn action_count(&self) -> usize {
        fn count(actions: &[Action]) -> usize {
            actions
                .iter()
                .map(|a| match a {
                    Action::Parallel { actions } => 1 + count(actions),
                    _ => 1,
                })
                .sum()
        }
        self.steps.iter().map(|s| count(&s.actions)).sum()
    }
}

impl LessonScript for Lesson {
    fn script(&self) -> Script {
        let mut script = Script::new();
        for (index, lesson_step) in self.steps.iter().enumerate() {
            let actions = lesson_step.actions.clone();
            let body = move |d: &mut Diagram| -> PentweenResult<()> {
                for (i, action) in actions.iter().enumerate() {
                    action.apply(d).map_err(|e| {
                        PentweenError::script(format!("steps[{index}].actions[{i}]: {e}"))
                    })?;
                }
                Ok(())
            };
            script.push(match &lesson_step.key {
                Some(key) => Step::keyed(key.clone(), body),
                None => Step::new(body),
            });
        }
        script
    }

    fn descriptions(&self) -> BTreeMap<String, String> {
        self.descriptions.clone()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/lesson.rs"]
mod tests;
