use super::*;

#[test]
fn rng_is_seed_deterministic() {
    let mut a = Rng64::new(7);
    let mut b = Rng64::new(7);
    for _ in 0..8 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
    let v = Rng64::new(42).next_f64_01();
    assert!((0.0..1.0).contains(&v));
}

#[test]
fn entropy_seeds_diverge() {
    assert_ne!(entropy_seed(), entropy_seed());
}

#[test]
fn clamp_byte_truncates_and_saturates() {
    assert_eq!(clamp_byte(-3.5), 0);
    assert_eq!(clamp_byte(0.0), 0);
    assert_eq!(clamp_byte(49.99), 49);
    assert_eq!(clamp_byte(255.0), 255);
    assert_eq!(clamp_byte(300.0), 255);
    assert_eq!(clamp_byte(f64::NAN), 0);
}
