//! Rendering-surface seam.
//!
//! The surface owns the actual drawable stroke objects. The engine only ever asks it to
//! reveal, hide, recolor or partially draw a stroke, and to report geometry.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::{
    foundation::color::StrokeColor,
    foundation::core::{Affine, Point, Rect},
    foundation::error::GlyphPenResult,
    graph::address::StructuralAddress,
    tree::glyph::PrimitiveKind,
};

pub(crate) mod path;

/// Shared single-threaded handle to a surface.
pub type SharedSurface = Rc<RefCell<dyn RenderSurface>>;

/// Wrap a concrete surface into a [`SharedSurface`].
pub fn shared<S: RenderSurface + 'static>(surface: S) -> SharedSurface {
    Rc::new(RefCell::new(surface))
}

/// Drawable-object operations the engine consumes, keyed by stroke id.
///
/// Visibility operations on ids the surface does not know are ignored; geometry queries
/// on unknown ids fail.
pub trait RenderSurface {
    /// Materialize the drawable object for a leaf node from its glyph attributes.
    fn attach(
        &mut self,
        id: &str,
        kind: PrimitiveKind,
        attrs: &BTreeMap<String, String>,
    ) -> GlyphPenResult<()>;

    /// Record the structural address of a stroke.
    fn set_address(&mut self, id: &str, address: &StructuralAddress);

    /// Set the ink color of a stroke.
    fn set_stroke_color(&mut self, id: &str, color: StrokeColor);

    /// Reveal a stroke fully and instantly.
    fn enable_stroke(&mut self, id: &str);

    /// Hide a stroke instantly.
    fn disable_stroke(&mut self, id: &str);

    /// Show the first `ratio` (0..1) of a stroke's path.
    fn set_draw_progress(&mut self, id: &str, ratio: f64);

    /// Set the alpha of a stroke (fade effects).
    fn set_opacity(&mut self, id: &str, alpha: f64);

    /// Point along the stroke's path at `ratio`, in the surface's local space.
    fn sample_local_point(&self, id: &str, ratio: f64) -> GlyphPenResult<Point>;

    /// Total path length in model units.
    fn total_path_length(&self, id: &str) -> GlyphPenResult<f64>;

    /// Mapping from local space to screen space.
    fn local_to_screen(&self) -> Affine {
        Affine::IDENTITY
    }

    /// Screen-space bounds of a stroke, when the surface can measure them.
    fn stroke_bounds(&self, _id: &str) -> Option<Rect> {
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/mod.rs"]
mod tests;
