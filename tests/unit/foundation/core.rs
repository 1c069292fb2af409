use super::*;

#[test]
fn rest_offset_defaults_to_twenty_twenty() {
    let p = RestOffset::default().apply(Point::new(5.0, -3.0));
    assert_eq!(p, Point::new(25.0, 17.0));
}

#[test]
fn map_clamped_clamps_both_ends() {
    assert_eq!(map_clamped(0.0, 100.0, 1000.0, 0.15, 0.35), 0.15);
    assert_eq!(map_clamped(5000.0, 100.0, 1000.0, 0.15, 0.35), 0.35);
    let mid = map_clamped(550.0, 100.0, 1000.0, 0.15, 0.35);
    assert!((mid - 0.25).abs() < 1e-12);
}

#[test]
fn map_clamped_degenerate_band_is_a_step() {
    assert_eq!(map_clamped(9.0, 10.0, 10.0, 1.0, 2.0), 1.0);
    assert_eq!(map_clamped(10.0, 10.0, 10.0, 1.0, 2.0), 2.0);
}

#[test]
fn lerp_point_hits_endpoints() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 4.0);
    assert_eq!(lerp_point(a, b, 0.0), a);
    assert_eq!(lerp_point(a, b, 1.0), b);
    assert_eq!(lerp_point(a, b, 0.5), Point::new(5.0, 2.0));
}
