//! Headless surface that records every drawable call.
//!
//! Used by the CLI and by tests: shapes keep their visual state in memory,
//! report each call through `tracing`, and "animate" by sleeping on a tokio
//! task before firing their completion handle.

use std::{
    sync::{
        Arc, Mutex, Weak,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use tokio::{task::AbortHandle, time::Instant};

use crate::{
    effects::completion::CompletionHandle,
    foundation::core::{Point, Rect, secs_to_duration},
    foundation::error::{PentweenError, PentweenResult},
    surface::drawable::{
        ContainerRef, Drawable, DrawableRef, MessageAnimation, MessageContainer, MessageModel,
        MessageRef, ShapeFactory, ShapeSpec, ShapeStyle, VectorRef, VectorShape,
    },
};

/// One recorded call on the surface.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SurfaceEvent {
    /// Time since the surface was created.
    #[serde(with = "millis")]
    pub at: Duration,
    /// Shape or note id, or `"surface"`.
    pub target: String,
    /// What happened, e.g. `"show"` or `"draw_end"`.
    pub action: String,
}

/// Final visual state of one shape or note.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ShapeSnapshot {
    /// Shape or note id.
    pub id: String,
    /// Geometry family or `"message"`.
    pub kind: String,
    /// Visible on the canvas.
    pub visible: bool,
    /// Stroke fully drawn.
    pub drawn: bool,
    /// Stroke enabled.
    pub stroke: bool,
    /// Arrow endpoints, for vectors.
    pub endpoints: Option<(Point, Point)>,
    /// Placement, for notes.
    pub rect: Option<Rect>,
    /// Text, for notes.
    pub text: Option<String>,
}

mod millis {
    use std::time::Duration;

    pub fn serialize<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }
}

#[derive(Debug)]
struct Inner {
    origin: Instant,
    draw: Duration,
    next_id: AtomicUsize,
    events: Mutex<Vec<SurfaceEvent>>,
    shapes: Mutex<Vec<Arc<LoggedShape>>>,
    notes: Mutex<Vec<Arc<LoggedNote>>>,
}

impl Inner {
    fn record(&self, target: &str, action: &str) {
        tracing::debug!(shape = %target, %action, "surface call");
        if let Ok(mut events) = self.events.lock() {
            events.push(SurfaceEvent {
                at: self.origin.elapsed(),
                target: target.to_string(),
                action: action.to_string(),
            });
        }
    }

    fn next_id(&self, prefix: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}-{n}")
    }
}

/// Recording [`ShapeFactory`].
#[derive(Clone, Debug)]
pub struct LogSurface {
    inner: Arc<Inner>,
}

impl Default for LogSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSurface {
    /// Surface whose strokes take 250 ms to draw.
    pub fn new() -> Self {
        Self::with_draw_seconds(0.25)
    }

    /// Surface whose strokes and notes take `secs` to animate.
    pub fn with_draw_seconds(secs: f64) -> Self {
        Self {
            inner: Arc::new(Inner {
                origin: Instant::now(),
                draw: secs_to_duration(secs),
                next_id: AtomicUsize::new(0),
                events: Mutex::new(Vec::new()),
                shapes: Mutex::new(Vec::new()),
                notes: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Every call recorded so far, in order.
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.inner
            .events
            .lock()
            .map(|e| e.clone())
            .unwrap_or_default()
    }

    /// Recorded actions for `target`, in order.
    pub fn actions_of(&self, target: &str) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| e.target == target)
            .map(|e| e.action)
            .collect()
    }

    /// Current state of every live shape and note, sorted by id.
    pub fn snapshot(&self) -> Vec<ShapeSnapshot> {
        let mut out: Vec<ShapeSnapshot> = Vec::new();
        if let Ok(shapes) = self.inner.shapes.lock() {
            out.extend(shapes.iter().map(|s| s.snapshot()));
        }
        if let Ok(notes) = self.inner.notes.lock() {
            out.extend(notes.iter().map(|n| n.snapshot()));
        }
        out.sort_by(|a, b| a.id.cmp(&b.id));
        out
    }

    /// Snapshot with ids erased, for comparing two surfaces fed the same script.
    pub fn visual_state(&self) -> Vec<ShapeSnapshot> {
        let mut out = self.snapshot();
        for s in &mut out {
            s.id.clear();
        }
        out
    }

    fn new_shape(
        &self,
        spec_name: &'static str,
        pen_end: Point,
        endpoints: Option<(Point, Point)>,
    ) -> Arc<LoggedShape> {
        let shape = Arc::new(LoggedShape {
            id: self.inner.next_id(spec_name),
            spec_name,
            pen_end,
            inner: Arc::downgrade(&self.inner),
            state: Arc::new(Mutex::new(ShapeState {
                endpoints,
                ..ShapeState::default()
            })),
            task: Mutex::new(None),
        });
        if let Ok(mut shapes) = self.inner.shapes.lock() {
            shapes.push(Arc::clone(&shape));
        }
        self.inner.record(&shape.id, "create");
        shape
    }
}

fn spawn_after(
    wait: Duration,
    label: &str,
    done: impl FnOnce() + Send + 'static,
) -> PentweenResult<AbortHandle> {
    let runtime = tokio::runtime::Handle::try_current()
        .map_err(|_| PentweenError::render(format!("{label}: no async runtime to animate on")))?;
    let task = runtime.spawn(async move {
        tokio::time::sleep(wait).await;
        done();
    });
    Ok(task.abort_handle())
}

fn record(inner: &Weak<Inner>, target: &str, action: &str) {
    if let Some(inner) = inner.upgrade() {
        inner.record(target, action);
    }
}

fn draw_time(inner: &Weak<Inner>) -> Duration {
    inner.upgrade().map(|i| i.draw).unwrap_or_default()
}

#[derive(Clone, Debug, Default)]
struct ShapeState {
    visible: bool,
    drawn: bool,
    stroke: bool,
    endpoints: Option<(Point, Point)>,
}

fn update(state: &Mutex<ShapeState>, f: impl FnOnce(&mut ShapeState)) {
    if let Ok(mut state) = state.lock() {
        f(&mut state);
    }
}

fn read(state: &Mutex<ShapeState>) -> ShapeState {
    state.lock().map(|s| s.clone()).unwrap_or_default()
}

#[derive(Debug)]
struct LoggedShape {
    id: String,
    spec_name: &'static str,
    pen_end: Point,
    inner: Weak<Inner>,
    state: Arc<Mutex<ShapeState>>,
    task: Mutex<Option<AbortHandle>>,
}

impl LoggedShape {
    fn snapshot(&self) -> ShapeSnapshot {
        let state = read(&self.state);
        ShapeSnapshot {
            id: self.id.clone(),
            kind: self.spec_name.to_string(),
            visible: state.visible,
            drawn: state.drawn,
            stroke: state.stroke,
            endpoints: state.endpoints,
            rect: None,
            text: None,
        }
    }

    fn abort_task(&self) -> bool {
        match self.task.lock().ok().and_then(|mut t| t.take()) {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }
}

impl Drawable for LoggedShape {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn show(&self) {
        update(&self.state, |s| s.visible = true);
        record(&self.inner, &self.id, "show");
    }

    fn hide(&self) {
        update(&self.state, |s| s.visible = false);
        record(&self.inner, &self.id, "hide");
    }

    fn render_end_state(&self) {
        update(&self.state, |s| s.drawn = true);
        record(&self.inner, &self.id, "end_state");
    }

    fn enable_stroke(&self) {
        update(&self.state, |s| s.stroke = true);
        record(&self.inner, &self.id, "enable_stroke");
    }

    fn disable_stroke(&self) {
        update(&self.state, |s| s.stroke = false);
        record(&self.inner, &self.id, "disable_stroke");
    }

    fn render_with_animation(
        &self,
        pen_start: Option<Point>,
        on_complete: CompletionHandle,
    ) -> PentweenResult<()> {
        let action = match pen_start {
            Some(p) => format!("draw_start from ({}, {})", p.x, p.y),
            None => "draw_start".to_string(),
        };
        record(&self.inner, &self.id, &action);

        let inner = Weak::clone(&self.inner);
        let state = Arc::clone(&self.state);
        let id = self.id.clone();
        let abort = spawn_after(draw_time(&self.inner), &self.id, move || {
            update(&state, |s| {
                s.drawn = true;
                s.stroke = true;
            });
            record(&inner, &id, "draw_end");
            on_complete.fire();
        })?;
        if let Ok(mut task) = self.task.lock() {
            *task = Some(abort);
        }
        Ok(())
    }

    fn cancel_animation(&self) {
        if self.abort_task() {
            record(&self.inner, &self.id, "cancel");
        }
    }

    fn pen_end(&self) -> Option<Point> {
        match read(&self.state).endpoints {
            Some((_, head)) => Some(head),
            None => Some(self.pen_end),
        }
    }
}

impl VectorShape for LoggedShape {
    fn set_endpoints(&self, tail: Point, head: Point) {
        update(&self.state, |s| s.endpoints = Some((tail, head)));
    }

    fn endpoints(&self) -> (Point, Point) {
        read(&self.state)
            .endpoints
            .unwrap_or((Point::ORIGIN, self.pen_end))
    }
}

#[derive(Debug)]
struct LoggedNote {
    id: String,
    text: String,
    animation: MessageAnimation,
    inner: Weak<Inner>,
    state: Arc<Mutex<ShapeState>>,
    rect: Mutex<Option<Rect>>,
}

impl LoggedNote {
    fn snapshot(&self) -> ShapeSnapshot {
        let state = read(&self.state);
        ShapeSnapshot {
            id: self.id.clone(),
            kind: "message".to_string(),
            visible: state.visible,
            drawn: state.drawn,
            stroke: false,
            endpoints: None,
            rect: self.rect.lock().ok().and_then(|r| *r),
            text: Some(self.text.clone()),
        }
    }
}

impl MessageModel for LoggedNote {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn show(&self) {
        update(&self.state, |s| s.visible = true);
        record(&self.inner, &self.id, "show");
    }

    fn hide(&self) {
        update(&self.state, |s| s.visible = false);
        record(&self.inner, &self.id, "hide");
    }

    fn render_with_animation(
        &self,
        on_complete: CompletionHandle,
        duration_secs: f64,
    ) -> PentweenResult<()> {
        record(
            &self.inner,
            &self.id,
            &format!("animate_in {:?} over {duration_secs}s", self.animation),
        );
        let inner = Weak::clone(&self.inner);
        let state = Arc::clone(&self.state);
        let id = self.id.clone();
        spawn_after(draw_time(&self.inner), &self.id, move || {
            update(&state, |s| s.drawn = true);
            record(&inner, &id, "animate_in_end");
            on_complete.fire();
        })?;
        Ok(())
    }

    fn render_end_state(&self) {
        update(&self.state, |s| {
            s.visible = true;
            s.drawn = true;
        });
        record(&self.inner, &self.id, "end_state");
    }
}

impl MessageContainer for LogSurface {
    fn place_note(&self, note_id: &str, rect: Rect) {
        let note = self
            .inner
            .notes
            .lock()
            .ok()
            .and_then(|notes| notes.iter().find(|n| n.id == note_id).cloned());
        if let Some(note) = note
            && let Ok(mut slot) = note.rect.lock()
        {
            *slot = Some(rect);
        }
        self.inner.record(note_id, "place");
    }
}

impl ShapeFactory for LogSurface {
    fn shape(&self, spec: &ShapeSpec, _style: &ShapeStyle) -> PentweenResult<DrawableRef> {
        let endpoints = match spec {
            ShapeSpec::Vector { from, to } => Some((*from, *to)),
            _ => None,
        };
        Ok(self.new_shape(spec.name(), spec.pen_end(), endpoints))
    }

    fn vector(&self, tail: Point, head: Point, _style: &ShapeStyle) -> PentweenResult<VectorRef> {
        Ok(self.new_shape("vector", head, Some((tail, head))))
    }

    fn message(
        &self,
        text: &str,
        animation: MessageAnimation,
        _style: &ShapeStyle,
    ) -> PentweenResult<MessageRef> {
        let note = Arc::new(LoggedNote {
            id: self.inner.next_id("message"),
            text: text.to_string(),
            animation,
            inner: Arc::downgrade(&self.inner),
            state: Arc::new(Mutex::new(ShapeState::default())),
            rect: Mutex::new(None),
        });
        if let Ok(mut notes) = self.inner.notes.lock() {
            notes.push(Arc::clone(&note));
        }
        self.inner.record(&note.id, "create");
        Ok(note)
    }

    fn note_container(&self) -> ContainerRef {
        Arc::new(self.clone())
    }

    fn clear(&self) {
        if let Ok(mut shapes) = self.inner.shapes.lock() {
            for shape in shapes.drain(..) {
                shape.abort_task();
            }
        }
        if let Ok(mut notes) = self.inner.notes.lock() {
            notes.clear();
        }
        self.inner.record("surface", "clear");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/log.rs"]
mod tests;
