use crate::{
    foundation::core::Rect,
    graph::address::StructuralAddress,
    graph::node::StrokeGraphNode,
    surface::RenderSurface,
};

/// A named, ordered subset of structural addresses ("fragments").
///
/// Fragments need not exist in the tree being animated: unmatched addresses are skipped
/// silently, so one selection can be reused across similar expressions.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SelectionUnit {
    /// Caller-facing label.
    #[serde(default)]
    pub name: String,
    /// Selected addresses in selection order.
    #[serde(default)]
    pub fragments: Vec<StructuralAddress>,
}

impl SelectionUnit {
    /// Empty unit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fragments: Vec::new(),
        }
    }

    /// Unit from address strings.
    pub fn from_addresses<I, A>(name: impl Into<String>, addresses: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<StructuralAddress>,
    {
        let mut unit = Self::new(name);
        for a in addresses {
            unit.add_fragment(a);
        }
        unit
    }

    /// Append an address; duplicates are ignored.
    pub fn add_fragment(&mut self, address: impl Into<StructuralAddress>) {
        let address = address.into();
        if !self.fragments.contains(&address) {
            self.fragments.push(address);
        }
    }

    /// `true` when `address` is part of the unit.
    pub fn contains_fragment(&self, address: &str) -> bool {
        self.fragments.iter().any(|f| f.as_str() == address)
    }

    /// Number of fragments.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// `true` when the unit selects nothing.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Every drawable node whose screen bounds lie fully inside `region`.
    pub fn from_region(
        name: impl Into<String>,
        root: &StrokeGraphNode,
        surface: &dyn RenderSurface,
        region: Rect,
    ) -> Self {
        let mut unit = Self::new(name);
        for node in root.drawables() {
            let Some(bounds) = surface.stroke_bounds(node.id()) else {
                continue;
            };
            if region.union(bounds) == region {
                unit.add_fragment(node.address().clone());
            }
        }
        unit
    }

    /// Union of the screen bounds of every selected node, if any can be measured.
    pub fn bounds(&self, root: &StrokeGraphNode, surface: &dyn RenderSurface) -> Option<Rect> {
        let mut out: Option<Rect> = None;
        root.walk(&mut |node| {
            if !self.contains_fragment(node.address().as_str()) {
                return;
            }
            for leaf in node.drawables() {
                if let Some(b) = surface.stroke_bounds(leaf.id()) {
                    out = Some(out.map_or(b, |acc| acc.union(b)));
                }
            }
        });
        out
    }
}

/// `true` when any unit names `address`.
pub(crate) fn any_contains(units: &[SelectionUnit], address: &str) -> bool {
    units.iter().any(|u| u.contains_fragment(address))
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/selection.rs"]
mod tests;
