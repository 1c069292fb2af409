use std::borrow::Borrow;
use std::fmt;

/// Dotted sibling-index path naming a node's position in the built hierarchy (`"1.2.3"`).
///
/// Addresses are assigned after render-order heuristics run, so they reflect the drawing
/// order of siblings rather than document order. The root carries the literal marker
/// [`StructuralAddress::ROOT`] and is never addressable.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct StructuralAddress(String);

impl StructuralAddress {
    /// Marker carried by the root node.
    pub const ROOT: &'static str = "root";

    /// The root marker address.
    pub fn root() -> Self {
        Self(Self::ROOT.to_owned())
    }

    /// Wrap an address string as-is. Selection units may name addresses that do not exist.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// `true` for the root marker.
    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT
    }

    /// Address text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric sibling indices, outermost first. Empty for the root marker.
    pub fn segments(&self) -> Vec<u32> {
        if self.is_root() || self.0.is_empty() {
            return Vec::new();
        }
        self.0.split('.').filter_map(|s| s.parse().ok()).collect()
    }

    /// Nesting depth below the root (`"1.2"` is depth 2).
    pub fn depth(&self) -> usize {
        self.segments().len()
    }

    /// `true` when `self` names `other` or one of its ancestors.
    pub fn is_prefix_of(&self, other: &StructuralAddress) -> bool {
        if self.is_root() {
            return true;
        }
        other.0 == self.0
            || (other.0.starts_with(&self.0) && other.0.as_bytes().get(self.0.len()) == Some(&b'.'))
    }
}

impl fmt::Display for StructuralAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for StructuralAddress {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StructuralAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StructuralAddress {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Depth/sibling counter stack driving the top-down address pass.
#[derive(Debug, Default)]
pub(crate) struct AddressAssigner {
    counters: Vec<u32>,
}

impl AddressAssigner {
    pub(crate) fn enter(&mut self) {
        self.counters.push(0);
    }

    pub(crate) fn leave(&mut self) {
        self.counters.pop();
    }

    /// Advance the sibling counter at the current depth and return the full path.
    pub(crate) fn next_sibling(&mut self) -> StructuralAddress {
        if let Some(last) = self.counters.last_mut() {
            *last += 1;
        }
        let joined = self
            .counters
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(".");
        StructuralAddress(joined)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/address.rs"]
mod tests;
