use super::*;

#[test]
fn shape_specs_are_tagged_by_kind() {
    let spec: ShapeSpec =
        serde_json::from_str(r#"{ "kind": "point", "at": { "x": 1.0, "y": 2.0 } }"#).unwrap();
    assert_eq!(
        spec,
        ShapeSpec::Point {
            at: Point::new(1.0, 2.0),
            radius: 4.0
        }
    );
    assert_eq!(spec.name(), "point");
}

#[test]
fn pen_end_follows_the_stroke() {
    let line = ShapeSpec::Line {
        from: Point::new(0.0, 0.0),
        to: Point::new(5.0, 1.0),
    };
    assert_eq!(line.pen_end(), Point::new(5.0, 1.0));

    let circle = ShapeSpec::Circle {
        center: Point::new(1.0, 1.0),
        radius: 2.0,
    };
    assert_eq!(circle.pen_end(), Point::new(3.0, 1.0));

    let arc = ShapeSpec::Arc {
        center: Point::ORIGIN,
        radius: 1.0,
        start_deg: 0.0,
        sweep_deg: 90.0,
    };
    let end = arc.pen_end();
    assert!(end.x.abs() < 1e-9 && (end.y - 1.0).abs() < 1e-9);
}

#[test]
fn message_animation_accepts_short_codes() {
    let long: MessageAnimation = serde_json::from_str("\"slide-left\"").unwrap();
    let short: MessageAnimation = serde_json::from_str("\"l\"").unwrap();
    assert_eq!(long, MessageAnimation::SlideLeft);
    assert_eq!(short, MessageAnimation::SlideLeft);
}

#[test]
fn style_defaults_to_solid_black() {
    let style: ShapeStyle = serde_json::from_str("{}").unwrap();
    assert_eq!(style, ShapeStyle::default());
    assert_eq!(ShapeStyle::color("red").dashed("5,3").dash.as_deref(), Some("5,3"));
}
