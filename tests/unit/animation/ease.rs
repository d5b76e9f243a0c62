use super::*;

const ALL: [Ease; 7] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::InOutSine,
];

#[test]
fn curves_pin_their_endpoints() {
    for ease in ALL {
        assert!(ease.apply(0.0).abs() < 1e-12, "{ease:?}");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?}");
    }
}

#[test]
fn out_of_range_progress_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(-0.5), ease.apply(0.0));
        assert_eq!(ease.apply(7.0), ease.apply(1.0));
    }
}

#[test]
fn last_frame_lands_exactly_on_target() {
    assert_eq!(Ease::OutQuad.at_frame(48, 48), 1.0);
    assert_eq!(Ease::Linear.at_frame(3, 0), 1.0);
    assert!(Ease::OutQuad.at_frame(24, 48) > 0.5);
}

#[test]
fn names_are_snake_case_in_config() {
    let e: Ease = serde_json::from_str("\"in_out_sine\"").unwrap();
    assert_eq!(e, Ease::InOutSine);
    assert_eq!(Ease::default(), Ease::OutQuad);
}
