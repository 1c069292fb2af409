use std::collections::BTreeMap;

use crate::{
    foundation::color::StrokeColor,
    foundation::error::GlyphPenResult,
    graph::address::StructuralAddress,
    surface::RenderSurface,
    tree::glyph::{GlyphElement, PrimitiveKind},
};

/// One node of the stroke graph, wrapping a structural glyph element.
///
/// A node owns its children exclusively and never points back at its parent; every
/// traversal is top-down. Drawable nodes are leaf shape primitives; any children they
/// carry are structural only and never contribute strokes.
#[derive(Clone, Debug, serde::Serialize)]
pub struct StrokeGraphNode {
    id: String,
    category: Option<String>,
    primitive: Option<PrimitiveKind>,
    #[serde(skip)]
    attrs: BTreeMap<String, String>,
    address: StructuralAddress,
    stroke_color: StrokeColor,
    children: Vec<StrokeGraphNode>,
}

impl StrokeGraphNode {
    pub(crate) fn from_element(id: String, element: &GlyphElement, color: StrokeColor) -> Self {
        let mut attrs = element.attrs.clone();
        attrs.insert("id".to_owned(), id.clone());
        Self {
            id,
            category: element.category().map(str::to_owned),
            primitive: element.primitive_kind(),
            attrs,
            address: StructuralAddress::default(),
            stroke_color: color,
            children: Vec::new(),
        }
    }

    /// Id, unique within one build.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Category tag copied from the glyph tree.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Primitive kind of a drawable node.
    pub fn primitive(&self) -> Option<PrimitiveKind> {
        self.primitive
    }

    /// `true` for leaf shape primitives.
    pub fn is_drawable(&self) -> bool {
        self.primitive.is_some()
    }

    /// Glyph attributes of the wrapped element (children excluded).
    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    /// Structural address assigned by the builder.
    pub fn address(&self) -> &StructuralAddress {
        &self.address
    }

    /// Current ink color.
    pub fn stroke_color(&self) -> StrokeColor {
        self.stroke_color
    }

    /// Children in drawing order.
    pub fn children(&self) -> &[StrokeGraphNode] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<StrokeGraphNode> {
        &mut self.children
    }

    pub(crate) fn push_child(&mut self, child: StrokeGraphNode) {
        self.children.push(child);
    }

    pub(crate) fn set_address(&mut self, address: StructuralAddress) {
        self.address = address;
    }

    /// Set this node's color only.
    pub fn set_stroke_color(&mut self, color: StrokeColor) {
        self.stroke_color = color;
    }

    /// Recolor this node and every descendant.
    pub fn recolor(&mut self, color: StrokeColor) {
        self.stroke_color = color;
        for child in &mut self.children {
            child.recolor(color);
        }
    }

    /// Visit every node in pre-order.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a StrokeGraphNode)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }

    /// Drawable nodes in structural (pre-order) order.
    pub fn drawables(&self) -> Vec<&StrokeGraphNode> {
        let mut out = Vec::new();
        self.collect_drawables(&mut out);
        out
    }

    fn collect_drawables<'a>(&'a self, out: &mut Vec<&'a StrokeGraphNode>) {
        if self.is_drawable() {
            out.push(self);
            return;
        }
        for child in &self.children {
            child.collect_drawables(out);
        }
    }

    /// Total node count including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Every addressable node keyed by address. The root is excluded.
    pub fn address_map(&self) -> BTreeMap<StructuralAddress, &StrokeGraphNode> {
        let mut out = BTreeMap::new();
        self.walk(&mut |node| {
            if !node.address.is_root() {
                out.insert(node.address.clone(), node);
            }
        });
        out
    }

    /// Look up a non-root node by address.
    pub fn find(&self, address: &str) -> Option<&StrokeGraphNode> {
        if address == StructuralAddress::ROOT {
            return None;
        }
        if self.address.as_str() == address {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(address))
    }

    /// Register every node with the surface: drawable objects, addresses and colors.
    pub fn bind(&self, surface: &mut dyn RenderSurface) -> GlyphPenResult<()> {
        if let Some(kind) = self.primitive {
            surface.attach(&self.id, kind, &self.attrs)?;
        }
        surface.set_address(&self.id, &self.address);
        surface.set_stroke_color(&self.id, self.stroke_color);
        for child in &self.children {
            child.bind(surface)?;
        }
        Ok(())
    }

    /// Push this subtree's colors to the surface.
    pub fn apply_stroke_color(&self, surface: &mut dyn RenderSurface) {
        surface.set_stroke_color(&self.id, self.stroke_color);
        for child in &self.children {
            child.apply_stroke_color(surface);
        }
    }

    /// Reveal every stroke in this subtree.
    pub fn enable_stroke(&self, surface: &mut dyn RenderSurface) {
        for node in self.drawables() {
            surface.enable_stroke(&node.id);
        }
    }

    /// Hide every stroke in this subtree.
    pub fn disable_stroke(&self, surface: &mut dyn RenderSurface) {
        for node in self.drawables() {
            surface.disable_stroke(&node.id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/node.rs"]
mod tests;
