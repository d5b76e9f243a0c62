use std::{collections::BTreeMap, collections::VecDeque, fmt};

use crate::{diagram::diagram::Diagram, foundation::error::PentweenResult};

/// Body of one authored step.
pub type StepBody = Box<dyn FnOnce(&mut Diagram) -> PentweenResult<()> + Send>;

/// One user-paced step of a lesson.
pub struct Step {
    key: Option<String>,
    body: StepBody,
}

impl Step {
    /// Unkeyed step.
    pub fn new(body: impl FnOnce(&mut Diagram) -> PentweenResult<()> + Send + 'static) -> Self {
        Self {
            key: None,
            body: Box::new(body),
        }
    }

    /// Step whose description is looked up under `key`.
    pub fn keyed(
        key: impl Into<String>,
        body: impl FnOnce(&mut Diagram) -> PentweenResult<()> + Send + 'static,
    ) -> Self {
        Self {
            key: Some(key.into()),
            body: Box::new(body),
        }
    }

    /// Description key.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Author the step's effects on `diagram`.
    pub fn run(self, diagram: &mut Diagram) -> PentweenResult<()> {
        (self.body)(diagram)
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step").field("key", &self.key).finish_non_exhaustive()
    }
}

/// Ordered list of steps that together make up a lesson.
#[derive(Debug, Default)]
pub struct Script {
    steps: VecDeque<Step>,
}

impl Script {
    /// Empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an unkeyed step.
    pub fn step(
        mut self,
        body: impl FnOnce(&mut Diagram) -> PentweenResult<()> + Send + 'static,
    ) -> Self {
        self.steps.push_back(Step::new(body));
        self
    }

    /// Append a keyed step.
    pub fn keyed_step(
        mut self,
        key: impl Into<String>,
        body: impl FnOnce(&mut Diagram) -> PentweenResult<()> + Send + 'static,
    ) -> Self {
        self.steps.push_back(Step::keyed(key, body));
        self
    }

    /// Append `step`.
    pub fn push(&mut self, step: Step) {
        self.steps.push_back(step);
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when there are no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Keys of every step, `None` for unkeyed ones.
    pub fn keys(&self) -> Vec<Option<&str>> {
        self.steps.iter().map(Step::key).collect()
    }

    /// Run every step against `diagram` without pausing.
    ///
    /// Failing steps are logged and skipped. Returns how many steps ran.
    pub fn run_all(self, diagram: &mut Diagram) -> usize {
        let mut cursor = StepCursor::new(self);
        while cursor.advance(diagram).is_some() {}
        diagram.show_all_instantly();
        cursor.index()
    }
}

impl IntoIterator for Script {
    type Item = Step;
    type IntoIter = std::collections::vec_deque::IntoIter<Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

/// Something that can produce a fresh [`Script`] for every run.
pub trait LessonScript: Send + Sync {
    /// A new, unplayed script.
    fn script(&self) -> Script;

    /// Step descriptions keyed by step key.
    fn descriptions(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }
}

impl<F> LessonScript for F
where
    F: Fn() -> Script + Send + Sync,
{
    fn script(&self) -> Script {
        self()
    }
}

/// A script being consumed one step at a time.
#[derive(Debug)]
pub struct StepCursor {
    steps: VecDeque<Step>,
    index: usize,
}

impl StepCursor {
    /// Cursor before the first step of `script`.
    pub fn new(script: Script) -> Self {
        Self {
            steps: script.steps,
            index: 0,
        }
    }

    /// Index of the next step to run.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Steps not yet run.
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }

    /// True once every step ran.
    pub fn is_done(&self) -> bool {
        self.steps.is_empty()
    }

    /// Key of the next step.
    pub fn peek_key(&self) -> Option<&str> {
        self.steps.front().and_then(Step::key)
    }

    /// Run the next step against `diagram` and return its index.
    ///
    /// A failing body is logged; whatever it queued before failing stays queued.
    pub fn advance(&mut self, diagram: &mut Diagram) -> Option<usize> {
        let step = self.steps.pop_front()?;
        let index = self.index;
        let key = step.key.clone();
        if let Err(err) = step.run(diagram) {
            tracing::warn!(step = index, key = ?key, error = %err, "step failed, playing what it queued");
        }
        self.index += 1;
        Some(index)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/script.rs"]
mod tests;
