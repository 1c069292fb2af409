use super::*;
use crate::foundation::color::StrokeColor;
use crate::tree::glyph::GlyphElement;

fn node(id: &str, category: &str) -> StrokeGraphNode {
    StrokeGraphNode::from_element(
        id.to_owned(),
        &GlyphElement::group(category),
        StrokeColor::BLACK,
    )
}

fn parent_with(children: &[(&str, &str)]) -> StrokeGraphNode {
    let mut parent = node("p", "fraction");
    for (id, cat) in children {
        parent.push_child(node(id, cat));
    }
    parent
}

fn ids(node: &StrokeGraphNode) -> Vec<&str> {
    node.children().iter().map(|c| c.id()).collect()
}

#[test]
fn fraction_rule_moves_numerator_first() {
    let mut p = parent_with(&[("bar", "horizontal-divider"), ("num", "x"), ("den", "y")]);
    let fired = RenderOrderHeuristics::default().reorder(&mut p);
    assert_eq!(fired, Some("fraction-numerator-first"));
    assert_eq!(ids(&p), vec!["num", "bar", "den"]);
}

#[test]
fn fraction_rule_needs_exactly_three_children() {
    let mut p = parent_with(&[("bar", "horizontal-divider"), ("num", "x")]);
    assert_eq!(RenderOrderHeuristics::default().reorder(&mut p), None);
    assert_eq!(ids(&p), vec!["bar", "num"]);
}

#[test]
fn fraction_rule_needs_divider_in_front() {
    let mut p = parent_with(&[("num", "x"), ("bar", "horizontal-divider"), ("den", "y")]);
    assert_eq!(RenderOrderHeuristics::default().reorder(&mut p), None);
}

#[test]
fn known_over_match_on_unrelated_divider_shapes() {
    // Any three-child shape that leads with a divider is treated as a fraction.
    let mut p = parent_with(&[("rule", "horizontal-divider"), ("a", "label"), ("b", "label")]);
    assert!(RenderOrderHeuristics::default().reorder(&mut p).is_some());
    assert_eq!(ids(&p), vec!["a", "rule", "b"]);
}

#[test]
fn first_matching_rule_wins() {
    fn always(_: &[StrokeGraphNode]) -> bool {
        true
    }
    fn reverse(children: &mut [StrokeGraphNode]) {
        children.reverse();
    }
    let table = RenderOrderHeuristics::default().with_rule(OrderRule {
        name: "reverse-everything",
        matches: always,
        permute: reverse,
    });
    assert_eq!(table.rules().len(), 2);

    let mut frac = parent_with(&[("bar", "horizontal-divider"), ("num", "x"), ("den", "y")]);
    assert_eq!(table.reorder(&mut frac), Some("fraction-numerator-first"));
    assert_eq!(ids(&frac), vec!["num", "bar", "den"]);

    let mut other = parent_with(&[("a", "x"), ("b", "y")]);
    assert_eq!(table.reorder(&mut other), Some("reverse-everything"));
    assert_eq!(ids(&other), vec!["b", "a"]);
}

#[test]
fn nested_fractions_resolve_innermost_first() {
    let mut inner = node("inner", "fraction");
    inner.push_child(node("ibar", "horizontal-divider"));
    inner.push_child(node("inum", "x"));
    inner.push_child(node("iden", "y"));
    let mut outer = node("outer", "fraction");
    outer.push_child(node("obar", "horizontal-divider"));
    outer.push_child(inner);
    outer.push_child(node("oden", "y"));

    RenderOrderHeuristics::default().reorder_tree(&mut outer);
    assert_eq!(ids(&outer), vec!["inner", "obar", "oden"]);
    assert_eq!(ids(&outer.children()[0]), vec!["inum", "ibar", "iden"]);
}
