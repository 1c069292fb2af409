use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{GlyphPenError, GlyphPenResult};

/// Attribute keys the engine reads from typeset output.
pub mod attr {
    /// Presence marks an element as a stroke-graph candidate.
    pub const STRUCTURAL: &str = "structural";
    /// Shape category used by the render-order heuristics.
    pub const CATEGORY: &str = "category";
    /// SVG path data of an outline-fill primitive.
    pub const PATH_DATA: &str = "d";
}

/// Well-known categories produced by the typesetter.
pub mod category {
    /// Horizontal bar of a fraction.
    pub const HORIZONTAL_DIVIDER: &str = "horizontal-divider";
    /// Fraction container.
    pub const FRACTION: &str = "fraction";
    /// Radical container.
    pub const ROOT_CONTAINER: &str = "root-container";
}

/// Leaf shape kind. Only elements with a primitive kind are drawable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    /// Filled glyph outline (`path`).
    OutlineFill,
    /// Straight segment (`line`).
    Line,
    /// Axis-aligned box (`rect`).
    Rectangle,
}

impl PrimitiveKind {
    /// Primitive kind for an element tag, if the tag is a drawable leaf.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "path" => Some(Self::OutlineFill),
            "line" => Some(Self::Line),
            "rect" => Some(Self::Rectangle),
            _ => None,
        }
    }
}

/// One element of the typeset glyph tree: `{tag, attributes, children}`.
///
/// The tree is open-ended markup rather than a closed set of node types; the engine only
/// pattern-matches on the [`attr`] keys it knows about.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlyphElement {
    /// Element name (`g`, `path`, `line`, `rect`, ...).
    pub tag: String,
    /// Element attributes.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// Child elements in document order.
    #[serde(default)]
    pub children: Vec<GlyphElement>,
}

impl GlyphElement {
    /// Bare element with no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Structural group tagged with `category`.
    pub fn group(category: impl Into<String>) -> Self {
        Self::new("g").structural().with_attr(attr::CATEGORY, category)
    }

    /// Structural outline primitive with SVG path data.
    pub fn path(d: impl Into<String>) -> Self {
        Self::new("path").structural().with_attr(attr::PATH_DATA, d)
    }

    /// Structural line primitive.
    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new("line")
            .structural()
            .with_attr("x1", x1.to_string())
            .with_attr("y1", y1.to_string())
            .with_attr("x2", x2.to_string())
            .with_attr("y2", y2.to_string())
    }

    /// Structural rectangle primitive.
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new("rect")
            .structural()
            .with_attr("x", x.to_string())
            .with_attr("y", y.to_string())
            .with_attr("width", width.to_string())
            .with_attr("height", height.to_string())
    }

    /// Mark the element as a stroke-graph candidate.
    pub fn structural(self) -> Self {
        self.with_attr(attr::STRUCTURAL, "")
    }

    /// Set the shape category.
    pub fn with_category(self, category: impl Into<String>) -> Self {
        self.with_attr(attr::CATEGORY, category)
    }

    /// Set one attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Append a child element.
    pub fn with_child(mut self, child: GlyphElement) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child elements.
    pub fn with_children(mut self, children: impl IntoIterator<Item = GlyphElement>) -> Self {
        self.children.extend(children);
        self
    }

    /// `true` when the element carries the structural tag.
    pub fn is_structural(&self) -> bool {
        self.attrs.contains_key(attr::STRUCTURAL)
    }

    /// Category tag, if any.
    pub fn category(&self) -> Option<&str> {
        self.attr(attr::CATEGORY)
    }

    /// Drawable primitive kind, if the element is a leaf shape.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        PrimitiveKind::from_tag(&self.tag)
    }

    /// Raw attribute value.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Load a glyph tree from JSON text.
    pub fn from_json_str(s: &str) -> GlyphPenResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a glyph tree from a JSON file.
    pub fn from_path(path: &Path) -> GlyphPenResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read glyph tree '{}'", path.display()))?;
        Self::from_json_str(&text)
    }
}

/// Parse a numeric geometry attribute.
pub(crate) fn numeric_attr(attrs: &BTreeMap<String, String>, key: &str) -> GlyphPenResult<f64> {
    let raw = attrs
        .get(key)
        .ok_or_else(|| GlyphPenError::geometry(format!("missing attribute \"{key}\"")))?;
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| GlyphPenError::geometry(format!("attribute \"{key}\" is not a number: {raw}")))?;
    if !value.is_finite() {
        return Err(GlyphPenError::geometry(format!(
            "attribute \"{key}\" is not finite: {raw}"
        )));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "../../tests/unit/tree/glyph.rs"]
mod tests;
