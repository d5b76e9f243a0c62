use std::time::Duration;

use super::*;
use crate::{
    animation::ease::Ease,
    foundation::core::Fps,
    foundation::error::PentweenError,
    surface::log::LogSurface,
};

fn quick_config() -> PlaybackConfig {
    PlaybackConfig {
        slide_seconds: 0.2,
        slide_fps: Fps::new(10, 1).unwrap(),
        slide_ease: Ease::Linear,
        ..PlaybackConfig::default()
    }
}

fn diagram(mode: DiagramMode) -> (Diagram, LogSurface) {
    let surface = LogSurface::with_draw_seconds(0.1);
    (Diagram::new(mode, Arc::new(surface.clone()), quick_config()), surface)
}

fn circle(x: f64, radius: f64) -> ShapeSpec {
    ShapeSpec::Circle {
        center: Point::new(x, 0.0),
        radius,
    }
}

#[test]
fn animated_mode_queues_hidden_shapes() {
    let (mut d, surface) = diagram(DiagramMode::Animated);
    d.draw(&circle(0.0, 1.0), &ShapeStyle::default()).unwrap();
    d.delay(0.5);

    assert_eq!(d.queued(), 2);
    assert_eq!(d.objects().len(), 1);
    let snap = surface.snapshot();
    assert!(!snap[0].visible && !snap[0].drawn);
}

#[test]
fn static_mode_renders_end_states_immediately() {
    let (mut d, surface) = diagram(DiagramMode::Static);
    d.draw(&circle(0.0, 1.0), &ShapeStyle::default()).unwrap();
    d.reverse_vector(Point::new(0.0, 0.0), Point::new(2.0, 1.0), &ShapeStyle::default())
        .unwrap();

    assert_eq!(d.queued(), 0);
    let snap = surface.snapshot();
    assert!(snap.iter().all(|s| s.visible && s.drawn && s.stroke));
    let vector = snap.iter().find(|s| s.kind == "vector").unwrap();
    assert_eq!(
        vector.endpoints,
        Some((Point::new(0.0, 0.0), Point::new(-2.0, -1.0)))
    );
}

#[tokio::test(start_paused = true)]
async fn consecutive_strokes_continue_from_the_pen() {
    let (mut d, surface) = diagram(DiagramMode::Animated);
    let first = d.draw(&circle(0.0, 2.0), &ShapeStyle::default()).unwrap();
    let second = d.draw(&circle(5.0, 1.0), &ShapeStyle::default()).unwrap();

    assert_eq!(d.play_next().await.unwrap(), Completion::Finished);

    assert!(
        surface
            .actions_of(&first.id())
            .contains(&"draw_start".to_string())
    );
    assert!(
        surface
            .actions_of(&second.id())
            .contains(&"draw_start from (2, 0)".to_string())
    );
    assert_eq!(d.pen().last_visited(), Some(Point::new(6.0, 0.0)));
}

#[tokio::test(start_paused = true)]
async fn parallel_groups_play_together() {
    let (mut d, surface) = diagram(DiagramMode::Animated);
    d.parallel(|d| {
        d.draw(&circle(0.0, 1.0), &ShapeStyle::default())?;
        d.draw(&circle(3.0, 1.0), &ShapeStyle::default())?;
        Ok(())
    })
    .unwrap();
    assert_eq!(d.queued(), 1);

    let began = tokio::time::Instant::now();
    assert_eq!(d.play_next().await.unwrap(), Completion::Finished);
    assert_eq!(began.elapsed(), Duration::from_millis(100));
    assert!(surface.snapshot().iter().all(|s| s.drawn));
}

#[test]
fn failing_parallel_body_keeps_what_it_queued() {
    let (mut d, _surface) = diagram(DiagramMode::Animated);
    let err = d
        .parallel(|d| {
            d.delay(0.1);
            Err(PentweenError::script("boom"))
        })
        .unwrap_err();
    assert!(err.to_string().contains("boom"));
    assert_eq!(d.queued(), 1);
}

#[tokio::test(start_paused = true)]
async fn stop_handle_aborts_a_taken_step() {
    let (mut d, surface) = diagram(DiagramMode::Animated);
    let shape = d.draw(&circle(0.0, 1.0), &ShapeStyle::default()).unwrap();
    d.delay(5.0);

    let mut step = d.take_step().unwrap();
    assert_eq!(step.len(), 2);
    let stop = step.stop_handle();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        stop.stop();
    });

    assert_eq!(step.play().await, Completion::Stopped);
    assert_eq!(surface.actions_of(&shape.id()).last().map(String::as_str), Some("draw_end"));
    assert_eq!(d.queued(), 0);
}

#[test]
fn clear_all_forgets_everything() {
    let (mut d, surface) = diagram(DiagramMode::Static);
    d.draw(&circle(0.0, 1.0), &ShapeStyle::default()).unwrap();
    d.pen().visit(Point::new(1.0, 1.0));

    d.clear_all();

    assert!(d.objects().is_empty());
    assert!(surface.snapshot().is_empty());
    assert_eq!(d.pen().last_visited(), None);
    assert_eq!(surface.actions_of("surface"), vec!["clear"]);
}

#[test]
fn show_all_instantly_drains_the_queue() {
    let (mut d, surface) = diagram(DiagramMode::Animated);
    d.draw(&circle(0.0, 1.0), &ShapeStyle::default()).unwrap();
    d.message(
        "hello",
        Point::new(10.0, 10.0),
        Size::new(100.0, 40.0),
        MessageAnimation::Fade,
        &ShapeStyle::default(),
    )
    .unwrap();

    d.show_all_instantly();

    assert_eq!(d.queued(), 0);
    assert!(surface.snapshot().iter().all(|s| s.visible && s.drawn));
}

#[tokio::test(start_paused = true)]
async fn empty_step_completes_at_once() {
    let (mut d, _surface) = diagram(DiagramMode::Animated);
    let step = d.take_step().unwrap();
    assert!(step.is_empty());
    assert_eq!(d.play_next().await.unwrap(), Completion::Finished);
}

#[tokio::test(start_paused = true)]
async fn static_diagram_has_no_step_to_play() {
    let (mut d, surface) = diagram(DiagramMode::Static);
    d.draw(&circle(0.0, 1.0), &ShapeStyle::default()).unwrap();

    let err = d.take_step().unwrap_err();
    assert!(matches!(err, PentweenError::State(_)), "{err}");
    assert!(d.play_next().await.is_err());
    assert!(surface.snapshot().iter().all(|s| s.visible && s.drawn));
}
