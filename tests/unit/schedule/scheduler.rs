use super::*;
use crate::host::manual::ManualHost;

fn started(fps: f64, now: f64) -> (FrameScheduler, ManualHost) {
    let mut host = ManualHost::new(Timestamp(now));
    let mut s = FrameScheduler::new(TargetFps::new(fps), Timestamp(now));
    s.start(&mut host);
    (s, host)
}

fn fire(s: &mut FrameScheduler, host: &mut ManualHost, now: f64) -> FrameDecision {
    let token = host.take_due().expect("a callback should be armed");
    s.on_frame(host, token, Timestamp(now))
}

#[test]
fn start_arms_exactly_once() {
    let (mut s, mut host) = started(30.0, 0.0);
    s.start(&mut host);
    assert_eq!(host.outstanding(), 1);
    assert_eq!(s.state(), LoopState::Running);
}

#[test]
fn throttle_skips_close_frames_and_renders_spaced_ones() {
    let (mut s, mut host) = started(30.0, 0.0);
    assert!(matches!(fire(&mut s, &mut host, 40.0), FrameDecision::Render { .. }));
    assert_eq!(fire(&mut s, &mut host, 50.0), FrameDecision::Skipped);
    assert!(matches!(fire(&mut s, &mut host, 80.0), FrameDecision::Render { .. }));
}

#[test]
fn skipped_frames_still_rearm() {
    let (mut s, mut host) = started(30.0, 0.0);
    assert_eq!(fire(&mut s, &mut host, 5.0), FrameDecision::Skipped);
    assert_eq!(host.outstanding(), 1);
    assert_eq!(s.last_render(), Timestamp(0.0));
    assert_eq!(s.last_tick(), Timestamp(0.0));
}

#[test]
fn dt_measures_from_last_render() {
    let (mut s, mut host) = started(30.0, 0.0);
    let _ = fire(&mut s, &mut host, 10.0);
    match fire(&mut s, &mut host, 50.0) {
        FrameDecision::Render { dt_secs, now } => {
            assert!((dt_secs - 0.05).abs() < 1e-12);
            assert_eq!(now, Timestamp(50.0));
        }
        other => panic!("expected render, got {other:?}"),
    }
}

#[test]
fn fps_changes_apply_on_next_callback() {
    let fps = TargetFps::new(30.0);
    let mut host = ManualHost::new(Timestamp(0.0));
    let mut s = FrameScheduler::new(fps.clone(), Timestamp(0.0));
    s.start(&mut host);

    assert_eq!(fire(&mut s, &mut host, 20.0), FrameDecision::Skipped);
    fps.set(60.0);
    assert!(matches!(fire(&mut s, &mut host, 20.0), FrameDecision::Render { .. }));
    fps.set(0.0);
    // Clamped to 1 fps: a full second must pass.
    assert_eq!(fire(&mut s, &mut host, 900.0), FrameDecision::Skipped);
    assert!(matches!(fire(&mut s, &mut host, 1020.0), FrameDecision::Render { .. }));
}

#[test]
fn stale_tokens_are_ignored() {
    let (mut s, mut host) = started(30.0, 0.0);
    let token = host.take_due().unwrap();
    assert!(matches!(s.on_frame(&mut host, token, Timestamp(40.0)), FrameDecision::Render { .. }));
    // Same token again: not the armed one any more.
    assert_eq!(s.on_frame(&mut host, token, Timestamp(80.0)), FrameDecision::Ignored);
    assert_eq!(host.outstanding(), 1);
}

#[test]
fn suspend_cancels_and_resume_resets_baselines() {
    let (mut s, mut host) = started(30.0, 0.0);
    let _ = fire(&mut s, &mut host, 40.0);

    assert!(s.suspend(&mut host));
    assert!(!s.suspend(&mut host));
    assert_eq!(s.state(), LoopState::Suspended);
    assert_eq!(host.outstanding(), 0);
    assert_eq!(s.pending(), None);
    // Timing frozen while hidden.
    assert_eq!(s.last_tick(), Timestamp(40.0));

    assert!(s.resume(&mut host, Timestamp(10_000.0)));
    assert!(!s.resume(&mut host, Timestamp(10_001.0)));
    assert_eq!(s.last_tick(), Timestamp(10_000.0));
    assert_eq!(s.last_render(), Timestamp(10_000.0));
    assert_eq!(host.outstanding(), 1);

    match fire(&mut s, &mut host, 10_040.0) {
        FrameDecision::Render { dt_secs, .. } => assert!(dt_secs < 0.1),
        other => panic!("expected render, got {other:?}"),
    }
}

#[test]
fn callbacks_while_suspended_are_ignored() {
    let (mut s, mut host) = started(30.0, 0.0);
    let token = s.pending().unwrap();
    s.suspend(&mut host);
    assert_eq!(s.on_frame(&mut host, token, Timestamp(100.0)), FrameDecision::Ignored);
    assert_eq!(host.outstanding(), 0);
}

#[test]
fn stop_is_terminal_and_idempotent() {
    let (mut s, mut host) = started(30.0, 0.0);
    let token = s.pending().unwrap();
    assert!(s.stop(&mut host));
    assert!(!s.stop(&mut host));
    assert_eq!(s.state(), LoopState::Stopped);
    assert_eq!(host.outstanding(), 0);
    assert_eq!(host.cancel_count(), 1);

    assert!(!s.resume(&mut host, Timestamp(5.0)));
    s.start(&mut host);
    assert_eq!(s.on_frame(&mut host, token, Timestamp(100.0)), FrameDecision::Ignored);
    assert_eq!(host.outstanding(), 0);
}
