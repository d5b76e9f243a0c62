use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(60, 0).is_err());
    assert_eq!(Fps::new(60, 1).unwrap(), Fps::default());
}

#[test]
fn frames_covering_rounds_up_and_has_a_floor() {
    let fps = Fps::new(60, 1).unwrap();
    assert_eq!(fps.frames_covering(0.5), 30);
    assert_eq!(fps.frames_covering(0.501), 31);
    assert_eq!(fps.frames_covering(0.0), 1);
    assert_eq!(fps.frames_covering(-3.0), 1);
    assert_eq!(fps.frames_covering(f64::NAN), 1);
}

#[test]
fn frame_duration_matches_rate() {
    let fps = Fps::new(30000, 1001).unwrap();
    let d = fps.frame_duration().as_secs_f64();
    assert!((d - 1001.0 / 30000.0).abs() < 1e-9);
}

#[test]
fn secs_to_duration_clamps_bad_input() {
    assert_eq!(secs_to_duration(-1.0), Duration::ZERO);
    assert_eq!(secs_to_duration(f64::INFINITY), Duration::ZERO);
    assert_eq!(secs_to_duration(0.25), Duration::from_millis(250));
    assert_eq!(secs_to_duration(1e20), Duration::from_secs(3600));
}

#[test]
fn seconds_bound_check() {
    assert!(is_valid_seconds(0.0));
    assert!(is_valid_seconds(MAX_SECONDS));
    assert!(!is_valid_seconds(MAX_SECONDS + 1.0));
    assert!(!is_valid_seconds(-0.5));
    assert!(!is_valid_seconds(f64::NAN));
}

#[test]
fn fps_above_the_cap_is_rejected() {
    assert!(Fps::new(1000, 1).is_ok());
    assert!(Fps::new(4_000_000_000, 1).is_err());
    assert!(Fps::new(2001, 2).is_err());
}

#[test]
fn frame_duration_never_reaches_zero() {
    let unchecked = Fps { num: 4_000_000_000, den: 1 };
    assert_eq!(unchecked.frame_duration(), Duration::from_millis(1));
}

#[test]
fn finite_point_check() {
    assert!(is_finite_point(Point::new(1.0, -2.0)));
    assert!(!is_finite_point(Point::new(f64::NAN, 0.0)));
}
