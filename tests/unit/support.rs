//! Recording test doubles shared by the unit tests.
#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::time::Instant;

use crate::{
    effects::completion::CompletionHandle,
    foundation::core::Point,
    foundation::error::{PentweenError, PentweenResult},
    surface::drawable::{Drawable, VectorShape},
};

/// Timestamped log of calls made on probes.
#[derive(Debug)]
pub(crate) struct Journal {
    origin: Instant,
    entries: Mutex<Vec<(Duration, String)>>,
}

impl Journal {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            origin: Instant::now(),
            entries: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn push(&self, entry: impl Into<String>) {
        self.entries
            .lock()
            .unwrap()
            .push((self.origin.elapsed(), entry.into()));
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().iter().map(|(_, e)| e.clone()).collect()
    }

    pub(crate) fn count(&self, entry: &str) -> usize {
        self.entries().iter().filter(|e| *e == entry).count()
    }

    pub(crate) fn time_of(&self, entry: &str) -> Option<Duration> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .find(|(_, e)| e == entry)
            .map(|(t, _)| *t)
    }

    pub(crate) fn position(&self, entry: &str) -> Option<usize> {
        self.entries().iter().position(|e| e == entry)
    }
}

/// How a probe reacts to `render_with_animation`.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Behavior {
    /// Fire once after the given time.
    Draw(Duration),
    /// Refuse to animate.
    Fail,
    /// Keep the handle and never fire.
    Silent,
    /// Fire twice after the given time.
    FireTwice(Duration),
}

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct ProbeState {
    pub(crate) visible: bool,
    pub(crate) drawn: bool,
    pub(crate) stroke: bool,
    pub(crate) endpoints: Option<(Point, Point)>,
}

/// Drawable that journals every call as `"<id>:<call>"`.
#[derive(Debug)]
pub(crate) struct Probe {
    id: String,
    behavior: Behavior,
    journal: Arc<Journal>,
    state: Arc<Mutex<ProbeState>>,
    held: Mutex<Option<CompletionHandle>>,
    task: Mutex<Option<tokio::task::AbortHandle>>,
    end: Point,
    accepted_fires: Arc<Mutex<usize>>,
}

impl Probe {
    pub(crate) fn new(journal: &Arc<Journal>, id: &str, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            behavior,
            journal: Arc::clone(journal),
            state: Arc::new(Mutex::new(ProbeState::default())),
            held: Mutex::new(None),
            task: Mutex::new(None),
            end: Point::new(1.0, 1.0),
            accepted_fires: Arc::new(Mutex::new(0)),
        })
    }

    pub(crate) fn drawing(journal: &Arc<Journal>, id: &str, millis: u64) -> Arc<Self> {
        Self::new(journal, id, Behavior::Draw(Duration::from_millis(millis)))
    }

    pub(crate) fn vector(
        journal: &Arc<Journal>,
        id: &str,
        millis: u64,
        tail: Point,
        head: Point,
    ) -> Arc<Self> {
        let probe = Self::drawing(journal, id, millis);
        probe.set_endpoints(tail, head);
        probe
    }

    pub(crate) fn state(&self) -> ProbeState {
        self.state.lock().unwrap().clone()
    }

    pub(crate) fn accepted_fires(&self) -> usize {
        *self.accepted_fires.lock().unwrap()
    }

    fn log(&self, call: &str) {
        self.journal.push(format!("{}:{call}", self.id));
    }
}

impl Drawable for Probe {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn show(&self) {
        self.state.lock().unwrap().visible = true;
        self.log("show");
    }

    fn hide(&self) {
        self.state.lock().unwrap().visible = false;
        self.log("hide");
    }

    fn render_end_state(&self) {
        self.state.lock().unwrap().drawn = true;
        self.log("end_state");
    }

    fn enable_stroke(&self) {
        self.state.lock().unwrap().stroke = true;
        self.log("enable_stroke");
    }

    fn disable_stroke(&self) {
        self.state.lock().unwrap().stroke = false;
        self.log("disable_stroke");
    }

    fn render_with_animation(
        &self,
        _pen_start: Option<Point>,
        on_complete: CompletionHandle,
    ) -> PentweenResult<()> {
        self.log("draw_start");
        let (wait, fires) = match self.behavior {
            Behavior::Fail => return Err(PentweenError::render(format!("{} exploded", self.id))),
            Behavior::Silent => {
                *self.held.lock().unwrap() = Some(on_complete);
                return Ok(());
            }
            Behavior::Draw(wait) => (wait, 1),
            Behavior::FireTwice(wait) => (wait, 2),
        };
        let journal = Arc::clone(&self.journal);
        let state = Arc::clone(&self.state);
        let accepted = Arc::clone(&self.accepted_fires);
        let id = self.id.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            {
                let mut s = state.lock().unwrap();
                s.drawn = true;
                s.stroke = true;
            }
            journal.push(format!("{id}:draw_end"));
            for _ in 0..fires {
                if on_complete.fire() {
                    *accepted.lock().unwrap() += 1;
                }
            }
        });
        *self.task.lock().unwrap() = Some(task.abort_handle());
        Ok(())
    }

    fn cancel_animation(&self) {
        if let Some(task) = self.task.lock().unwrap().take() {
            task.abort();
        }
        self.log("cancel");
    }

    fn pen_end(&self) -> Option<Point> {
        Some(self.state().endpoints.map(|(_, head)| head).unwrap_or(self.end))
    }
}

impl VectorShape for Probe {
    fn set_endpoints(&self, tail: Point, head: Point) {
        self.state.lock().unwrap().endpoints = Some((tail, head));
    }

    fn endpoints(&self) -> (Point, Point) {
        self.state().endpoints.unwrap_or((Point::ORIGIN, self.end))
    }
}
