use super::*;

#[test]
fn parses_six_and_eight_digit_hex() {
    assert_eq!(
        StrokeColor::parse_hex("#FF3366").unwrap(),
        StrokeColor::rgb(0xff, 0x33, 0x66)
    );
    assert_eq!(
        StrokeColor::parse_hex("ff336680").unwrap(),
        StrokeColor::rgb(0xff, 0x33, 0x66).with_alpha(0x80)
    );
}

#[test]
fn rejects_bad_hex() {
    assert!(StrokeColor::parse_hex("#12345").is_err());
    assert!(StrokeColor::parse_hex("#zz0000").is_err());
}

#[test]
fn display_omits_opaque_alpha() {
    assert_eq!(StrokeColor::rgb(1, 2, 3).to_string(), "#010203");
    assert_eq!(StrokeColor::rgb(1, 2, 3).with_alpha(0).to_string(), "#01020300");
}

#[test]
fn serde_accepts_hex_and_arrays() {
    let c: StrokeColor = serde_json::from_str("\"#00ff00\"").unwrap();
    assert_eq!(c, StrokeColor::rgb(0, 255, 0));
    let c: StrokeColor = serde_json::from_str("[1, 2, 3, 4]").unwrap();
    assert_eq!(c.a, 4);
    assert!(serde_json::from_str::<StrokeColor>("[1, 2]").is_err());
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"#01020304\"");
}
