use super::*;

#[test]
fn defaults_to_one_and_clamps() {
    let s = SpeedControl::default();
    assert_eq!(s.get(), 1.0);
    s.set(10.0);
    assert_eq!(s.get(), 3.0);
    s.set(0.0);
    assert_eq!(s.get(), 0.1);
    s.set(f64::NAN);
    assert_eq!(s.get(), 1.0);
}

#[test]
fn clones_share_the_same_cell() {
    let a = SpeedControl::default();
    let b = a.clone();
    b.set(2.0);
    assert_eq!(a.get(), 2.0);
    assert_eq!(a.scale_duration(1.0), 0.5);
}
