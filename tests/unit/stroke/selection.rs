use super::*;
use crate::test_support::{bound, row_of_lines};

#[test]
fn fragments_are_deduplicated_in_order() {
    let mut unit = SelectionUnit::from_addresses("vars", ["1.2", "1.1", "1.2"]);
    unit.add_fragment("1.3");
    let got: Vec<&str> = unit.fragments.iter().map(|f| f.as_str()).collect();
    assert_eq!(got, vec!["1.2", "1.1", "1.3"]);
    assert_eq!(unit.len(), 3);
    assert!(unit.contains_fragment("1.1"));
    assert!(!unit.contains_fragment("1"));
}

#[test]
fn deserializes_with_defaults() {
    let unit: SelectionUnit = serde_json::from_str(r#"{"fragments":["1.1","9.9"]}"#).unwrap();
    assert_eq!(unit.name, "");
    assert_eq!(unit.len(), 2);

    let empty: SelectionUnit = serde_json::from_str("{}").unwrap();
    assert!(empty.is_empty());
}

#[test]
fn region_picks_strokes_fully_inside() {
    let (root, concrete, _) = bound(&row_of_lines(3));
    let surface = concrete.borrow();
    // Covers the first two lines (x 0..100 and 200..300) but only half of the third.
    let unit = SelectionUnit::from_region("left", &root, &*surface, Rect::new(-1.0, -1.0, 450.0, 1.0));
    let got: Vec<&str> = unit.fragments.iter().map(|f| f.as_str()).collect();
    assert_eq!(got, vec!["1.1", "1.2"]);
}

#[test]
fn bounds_union_selected_strokes() {
    let (root, concrete, _) = bound(&row_of_lines(3));
    let surface = concrete.borrow();
    let unit = SelectionUnit::from_addresses("ends", ["1.1", "1.3", "7"]);
    let b = unit.bounds(&root, &*surface).unwrap();
    assert_eq!((b.x0, b.x1), (0.0, 500.0));

    // A group address covers every drawable beneath it.
    let group = SelectionUnit::from_addresses("row", ["1"]);
    let b = group.bounds(&root, &*surface).unwrap();
    assert_eq!((b.x0, b.x1), (0.0, 500.0));

    assert!(SelectionUnit::new("none").bounds(&root, &*surface).is_none());
}
