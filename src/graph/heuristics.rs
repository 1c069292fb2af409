use crate::{graph::node::StrokeGraphNode, tree::glyph::category};

/// A named render-order rule: a predicate over a node's children plus the permutation to
/// apply when it matches.
#[derive(Clone, Copy, Debug)]
pub struct OrderRule {
    /// Rule name, reported in logs.
    pub name: &'static str,
    /// Predicate over the already-built children.
    pub matches: fn(&[StrokeGraphNode]) -> bool,
    /// In-place permutation applied on a match.
    pub permute: fn(&mut [StrokeGraphNode]),
}

/// `[divider, numerator, denominator]` becomes `[numerator, divider, denominator]`.
///
/// Matches any three-child node whose first child is a horizontal divider. The match is
/// deliberately permissive: an unrelated shape that happens to lead with a divider is
/// reordered too.
pub const FRACTION_NUMERATOR_FIRST: OrderRule = OrderRule {
    name: "fraction-numerator-first",
    matches: leads_with_divider,
    permute: swap_first_two,
};

fn leads_with_divider(children: &[StrokeGraphNode]) -> bool {
    children.len() == 3 && children[0].category() == Some(category::HORIZONTAL_DIVIDER)
}

fn swap_first_two(children: &mut [StrokeGraphNode]) {
    children.swap(0, 1);
}

/// Ordered table of render-order rules. First match wins; at most one rule fires per node.
#[derive(Clone, Debug)]
pub struct RenderOrderHeuristics {
    rules: Vec<OrderRule>,
}

impl Default for RenderOrderHeuristics {
    fn default() -> Self {
        Self {
            rules: vec![FRACTION_NUMERATOR_FIRST],
        }
    }
}

impl RenderOrderHeuristics {
    /// A table with no rules (document order is kept).
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule; it is checked after every rule already present.
    pub fn with_rule(mut self, rule: OrderRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[OrderRule] {
        &self.rules
    }

    /// Permute `node`'s children if a rule matches. Returns the rule that fired.
    pub fn reorder(&self, node: &mut StrokeGraphNode) -> Option<&'static str> {
        let rule = self
            .rules
            .iter()
            .find(|rule| (rule.matches)(node.children()))?;
        (rule.permute)(node.children_mut());
        tracing::debug!(node = node.id(), rule = rule.name, "render order rule applied");
        Some(rule.name)
    }

    /// Bottom-up pass over a whole subtree; innermost nodes are reordered first.
    pub(crate) fn reorder_tree(&self, node: &mut StrokeGraphNode) {
        for child in node.children_mut() {
            self.reorder_tree(child);
        }
        self.reorder(node);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/heuristics.rs"]
mod tests;
