use super::*;

const ALL: [Ease; 3] = [Ease::Linear, Ease::InOutQuad, Ease::InOutCubic];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn out_of_range_progress_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(-0.5), 0.0);
        assert_eq!(ease.apply(1.5), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn serde_names_are_snake_case() {
    assert_eq!(
        serde_json::to_string(&Ease::InOutCubic).unwrap(),
        "\"in_out_cubic\""
    );
}

#[test]
fn in_out_curves_are_symmetric_about_midpoint() {
    for ease in [Ease::InOutQuad, Ease::InOutCubic] {
        assert!((ease.apply(0.5) - 0.5).abs() < 1e-12);
        assert!((ease.apply(0.2) + ease.apply(0.8) - 1.0).abs() < 1e-12);
    }
}
