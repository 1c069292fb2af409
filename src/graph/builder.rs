use crate::{
    foundation::color::StrokeColor,
    graph::address::{AddressAssigner, StructuralAddress},
    graph::heuristics::RenderOrderHeuristics,
    graph::node::StrokeGraphNode,
    tree::glyph::GlyphElement,
};

/// Turns a typeset glyph tree into a stroke graph.
///
/// Three passes, in this order:
/// 1. construction: every structural child becomes a node (ids are `"{parent}-{index}"`);
/// 2. render-order heuristics, bottom-up;
/// 3. address assignment, top-down, so addresses reflect the reordered children.
///
/// The glyph tree is assumed to be well-formed; nothing here validates it.
#[derive(Clone, Debug, Default)]
pub struct GraphBuilder {
    heuristics: RenderOrderHeuristics,
}

impl GraphBuilder {
    /// Builder using a custom heuristics table.
    pub fn new(heuristics: RenderOrderHeuristics) -> Self {
        Self { heuristics }
    }

    /// Build the stroke graph rooted at `tree`.
    #[tracing::instrument(skip(self, tree))]
    pub fn build(&self, tree: &GlyphElement, root_id: &str, stroke_color: StrokeColor) -> StrokeGraphNode {
        let mut root = StrokeGraphNode::from_element(root_id.to_owned(), tree, stroke_color);
        attach_children(&mut root, tree, stroke_color);
        self.heuristics.reorder_tree(&mut root);

        root.set_address(StructuralAddress::root());
        let mut assigner = AddressAssigner::default();
        assign_addresses(&mut root, &mut assigner);

        tracing::debug!(nodes = root.node_count(), "stroke graph built");
        root
    }
}

fn attach_children(parent: &mut StrokeGraphNode, element: &GlyphElement, color: StrokeColor) {
    for (index, child) in element.children.iter().enumerate() {
        if !child.is_structural() {
            continue;
        }
        let id = format!("{}-{}", parent.id(), index);
        let mut node = StrokeGraphNode::from_element(id, child, color);
        attach_children(&mut node, child, color);
        parent.push_child(node);
    }
}

fn assign_addresses(node: &mut StrokeGraphNode, assigner: &mut AddressAssigner) {
    assigner.enter();
    for child in node.children_mut() {
        let address = assigner.next_sibling();
        child.set_address(address);
        assign_addresses(child, assigner);
    }
    assigner.leave();
}

#[cfg(test)]
#[path = "../../tests/unit/graph/builder.rs"]
mod tests;
