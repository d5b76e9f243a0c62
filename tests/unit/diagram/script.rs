use std::sync::Arc;

use super::*;
use crate::{
    diagram::diagram::DiagramMode,
    foundation::config::PlaybackConfig,
    foundation::error::PentweenError,
    surface::log::LogSurface,
};

fn static_diagram() -> (Diagram, LogSurface) {
    let surface = LogSurface::new();
    (
        Diagram::new(
            DiagramMode::Static,
            Arc::new(surface.clone()),
            PlaybackConfig::default(),
        ),
        surface,
    )
}

#[test]
fn builder_keeps_order_and_keys() {
    let script = Script::new()
        .keyed_step("intro", |_| Ok(()))
        .step(|_| Ok(()))
        .keyed_step("outro", |_| Ok(()));
    assert_eq!(script.len(), 3);
    assert_eq!(script.keys(), vec![Some("intro"), None, Some("outro")]);
}

#[test]
fn cursor_advances_one_step_at_a_time() {
    let (mut d, _surface) = static_diagram();
    let mut cursor = StepCursor::new(
        Script::new()
            .keyed_step("a", |d| {
                d.delay(0.1);
                Ok(())
            })
            .step(|_| Ok(())),
    );

    assert_eq!(cursor.peek_key(), Some("a"));
    assert_eq!(cursor.advance(&mut d), Some(0));
    assert_eq!(cursor.index(), 1);
    assert_eq!(cursor.peek_key(), None);
    assert_eq!(cursor.advance(&mut d), Some(1));
    assert!(cursor.is_done());
    assert_eq!(cursor.advance(&mut d), None);
    assert_eq!(cursor.index(), 2);
}

#[test]
fn failing_step_is_skipped_not_fatal() {
    let (mut d, surface) = static_diagram();
    let spec = crate::surface::drawable::ShapeSpec::Point {
        at: crate::foundation::core::Point::ORIGIN,
        radius: 2.0,
    };
    let ran = Script::new()
        .step(|_| Err(PentweenError::script("bad step")))
        .step(move |d| d.draw(&spec, &Default::default()).map(drop))
        .run_all(&mut d);

    assert_eq!(ran, 2);
    assert_eq!(surface.snapshot().len(), 1);
}

#[test]
fn closures_are_lesson_scripts() {
    let lesson = || Script::new().step(|_| Ok(())).step(|_| Ok(()));
    let shared: Arc<dyn LessonScript> = Arc::new(lesson);
    assert_eq!(shared.script().len(), 2);
    assert_eq!(shared.script().len(), 2, "every call builds a fresh script");
    assert!(shared.descriptions().is_empty());
}
