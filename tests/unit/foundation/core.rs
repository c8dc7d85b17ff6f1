use super::*;

#[test]
fn timestamp_since_and_secs() {
    let a = Timestamp(1500.0);
    let b = Timestamp(1000.0);
    assert_eq!(a.since(b), 500.0);
    assert_eq!(a.as_secs(), 1.5);
    assert_eq!(Timestamp::from_secs(2.0), Timestamp(2000.0));
    assert_eq!(b.add_ms(16.0), Timestamp(1016.0));
}

#[test]
fn buffer_size_byte_len() {
    let s = BufferSize {
        width: 3,
        height: 2,
    };
    assert_eq!(s.byte_len().unwrap(), 24);
    assert!(!s.is_empty());
    assert!(BufferSize::default().is_empty());
}

#[test]
fn target_fps_interval_clamps_to_one() {
    let fps = TargetFps::new(30.0);
    assert!((fps.frame_interval_ms() - 1000.0 / 30.0).abs() < 1e-9);

    fps.set(0.0);
    assert_eq!(fps.frame_interval_ms(), 1000.0);
    fps.set(-12.0);
    assert_eq!(fps.frame_interval_ms(), 1000.0);
    fps.set(f64::NAN);
    assert_eq!(fps.frame_interval_ms(), 1000.0);
    fps.set(f64::INFINITY);
    assert_eq!(fps.frame_interval_ms(), 1000.0);
}

#[test]
fn target_fps_clones_share_value() {
    let host_side = TargetFps::default();
    let loop_side = host_side.clone();
    assert_eq!(loop_side.get(), DEFAULT_TARGET_FPS);
    host_side.set(60.0);
    assert_eq!(loop_side.get(), 60.0);
}
