use std::sync::Arc;

use super::*;
use crate::{
    diagram::diagram::DiagramMode,
    foundation::config::PlaybackConfig,
    surface::drawable::{ContainerRef, DrawableRef, MessageRef, ShapeFactory, VectorRef},
    surface::log::LogSurface,
};

const LESSON: &str = include_str!("../../data/lesson.json");

#[test]
fn sample_lesson_parses_and_validates() {
    let lesson = Lesson::from_json_str(LESSON).unwrap();
    assert_eq!(lesson.steps.len(), 3);
    assert_eq!(lesson.action_count(), 8);
    assert_eq!(lesson.descriptions["sum"], "Close the triangle with the sum");
    match &lesson.steps[2].actions[0] {
        Action::Parallel { actions } => match &actions[1] {
            Action::Message { animation, .. } => assert_eq!(*animation, MessageAnimation::SlideLeft),
            other => panic!("unexpected action {other:?}"),
        },
        other => panic!("unexpected action {other:?}"),
    }
}

#[test]
fn validation_points_at_the_offending_action() {
    let json = r#"{
        "title": "bad",
        "steps": [
            { "actions": [ { "action": "delay", "seconds": 1.0 } ] },
            { "actions": [
                { "action": "parallel", "actions": [
                    { "action": "draw", "shape": { "kind": "circle", "center": { "x": 0, "y": 0 }, "radius": -1 } }
                ] }
            ] }
        ]
    }"#;
    let err = Lesson::from_json_str(json).unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("validation error:"), "{msg}");
    assert!(msg.contains("steps[1].actions[0].actions[0]"), "{msg}");
    assert!(msg.contains("radius"), "{msg}");
}

#[test]
fn rejects_bad_values() {
    let cases = [
        r#"{ "action": "delay", "seconds": -0.5 }"#,
        r#"{ "action": "draw", "shape": { "kind": "polygon", "points": [ { "x": 0, "y": 0 } ] } }"#,
        r#"{ "action": "message", "text": "  ", "at": { "x": 0, "y": 0 }, "size": { "width": 10, "height": 10 } }"#,
        r#"{ "action": "message", "text": "ok", "at": { "x": 0, "y": 0 }, "size": { "width": 0, "height": 10 } }"#,
    ];
    for action in cases {
        let json = format!(r#"{{ "title": "t", "steps": [ {{ "actions": [ {action} ] }} ] }}"#);
        assert!(
            matches!(Lesson::from_json_str(&json), Err(PentweenError::Validation(_))),
            "accepted {action}"
        );
    }
}

#[test]
fn unknown_fields_are_rejected() {
    let json = r#"{ "title": "t", "steps": [], "speed": 2 }"#;
    assert!(Lesson::from_json_str(json).is_err());
}

#[test]
fn script_runs_every_step_on_a_static_view() {
    let lesson = Lesson::from_json_str(LESSON).unwrap();
    let surface = LogSurface::new();
    let mut view = Diagram::new(
        DiagramMode::Static,
        Arc::new(surface.clone()),
        PlaybackConfig::default(),
    );

    let script = lesson.script();
    assert_eq!(script.keys(), vec![Some("first"), Some("second"), Some("sum")]);
    assert_eq!(script.run_all(&mut view), 3);

    let snap = surface.snapshot();
    assert_eq!(snap.iter().filter(|s| s.kind == "vector").count(), 5);
    assert_eq!(snap.iter().filter(|s| s.kind == "message").count(), 1);
    assert!(snap.iter().all(|s| s.visible && s.drawn));
    assert_eq!(lesson.descriptions().len(), 3);
}

#[test]
fn oversized_delay_is_rejected() {
    let json = r#"{
        "title": "long wait",
        "steps": [ { "actions": [ { "action": "delay", "seconds": 1e20 } ] } ]
    }"#;
    let err = Lesson::from_json_str(json).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("steps[0].actions[0]"), "{msg}");
    assert!(msg.contains("delay seconds"), "{msg}");
}

struct NoNotes(LogSurface);

impl ShapeFactory for NoNotes {
    fn shape(&self, spec: &ShapeSpec, style: &ShapeStyle) -> PentweenResult<DrawableRef> {
        self.0.shape(spec, style)
    }

    fn vector(&self, tail: Point, head: Point, style: &ShapeStyle) -> PentweenResult<VectorRef> {
        self.0.vector(tail, head, style)
    }

    fn message(
        &self,
        _text: &str,
        _animation: MessageAnimation,
        _style: &ShapeStyle,
    ) -> PentweenResult<MessageRef> {
        Err(PentweenError::render("notes are not supported here"))
    }

    fn note_container(&self) -> ContainerRef {
        self.0.note_container()
    }

    fn clear(&self) {
        self.0.clear();
    }
}

#[test]
fn failing_action_reports_its_step_and_position() {
    let lesson = Lesson::from_json_str(LESSON).unwrap();
    let mut view = Diagram::new(
        DiagramMode::Static,
        Arc::new(NoNotes(LogSurface::new())),
        PlaybackConfig::default(),
    );

    let mut steps = lesson.script().into_iter();
    steps.next().unwrap().run(&mut view).unwrap();
    steps.next().unwrap().run(&mut view).unwrap();
    let err = steps.next().unwrap().run(&mut view).unwrap_err();

    assert!(matches!(err, PentweenError::Script(_)), "{err}");
    let msg = err.to_string();
    assert!(msg.contains("steps[2].actions[0]"), "{msg}");
    assert!(msg.contains("notes are not supported here"), "{msg}");
}
