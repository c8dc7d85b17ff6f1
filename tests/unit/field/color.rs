use super::*;

#[test]
fn normalize_maps_unit_range() {
    assert_eq!(normalize(-1.0), 0.0);
    assert_eq!(normalize(0.0), 0.5);
    assert_eq!(normalize(1.0), 1.0);
}

#[test]
fn zero_sample_yields_offsets() {
    assert_eq!(ColorMapper.map_sample(0.0, 0.0), [50, 30, 50]);
    // Offsets hold at any phase when n = 0.
    assert_eq!(ColorMapper.map_sample(0.0, 123.4), [50, 30, 50]);
}

#[test]
fn full_sample_at_time_zero() {
    let [r, g, b] = ColorMapper.map_sample(1.0, 0.0);
    assert_eq!(r, 150);
    let g_expected = (80.0 + 60.0 * 2f64.sin() + 30.0) as u8;
    let b_expected = (150.0 + 70.0 * 4f64.sin() + 50.0) as u8;
    assert_eq!(g, g_expected);
    assert_eq!(b, b_expected);
    assert_eq!((g, b), (164, 147));
}

#[test]
fn palette_matches_per_sample_mapping() {
    let t = 7.25;
    let palette = ColorMapper.palette(t);
    for i in 0..=10 {
        let n = f64::from(i) / 10.0;
        assert_eq!(palette.map(n), ColorMapper.map_sample(n, t));
    }
}

#[test]
fn hue_drifts_with_time() {
    assert_ne!(ColorMapper.map_sample(1.0, 0.0), ColorMapper.map_sample(1.0, 1.5));
}
