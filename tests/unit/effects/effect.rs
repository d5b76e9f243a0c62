use super::*;
use crate::effects::{
    delay::DelayEffect, parallel::ParallelTweenEffect, sequence::SequenceStepEffect,
};

#[test]
fn leaves_refuse_children() {
    let mut leaf = DelayEffect::new(1.0);
    let err = add_child(&mut leaf, Box::new(DelayEffect::new(0.5))).unwrap_err();
    assert!(matches!(err, PentweenError::Structure(_)));
    assert!(err.to_string().starts_with("structure error:"));
    assert!(err.to_string().contains("'delay'"));
}

#[test]
fn composites_accept_children() {
    let mut seq = SequenceStepEffect::new();
    add_child(&mut seq, Box::new(DelayEffect::new(0.1))).unwrap();
    add_child(&mut seq, Box::new(ParallelTweenEffect::new())).unwrap();
    assert_eq!(seq.len(), 2);
    assert_eq!(seq.completed_count(), 0);
}

#[test]
fn kind_names_are_stable() {
    assert_eq!(EffectKind::ReverseVector.to_string(), "reverse_vector");
    assert_eq!(EffectKind::Sequence.name(), "sequence");
    assert!(EffectKind::Parallel.is_composite());
    assert!(!EffectKind::Shape.is_composite());
}

#[tokio::test(start_paused = true)]
async fn unless_stopped_prefers_the_stop_signal() {
    let (handle, signal) = crate::effects::context::StopHandle::new();
    handle.stop();
    let ctx = PlayContext::new(1.0).with_stop(signal);
    assert_eq!(unless_stopped(&ctx, async { 7 }).await, None);
    assert_eq!(unless_stopped(&PlayContext::new(1.0), async { 7 }).await, Some(7));
}
