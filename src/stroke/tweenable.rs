use std::cell::Cell;

use crate::{
    foundation::core::Point,
    foundation::error::{GlyphPenError, GlyphPenResult},
    graph::address::StructuralAddress,
    graph::node::StrokeGraphNode,
    surface::SharedSurface,
    timing::policy::TimingPolicy,
};

/// One drawable stroke adapted to the animation primitive.
///
/// Refers to its graph node by id and address only; the node itself stays owned by the
/// graph. Length and duration are fixed at construction. Start and end points are cached
/// on first use and go stale if the surface re-lays out the stroke; call
/// [`TweenableStroke::invalidate`] or use [`TweenableStroke::sample`] for live values.
#[derive(Clone)]
pub struct TweenableStroke {
    node_id: String,
    address: StructuralAddress,
    surface: SharedSurface,
    total_length: f64,
    draw_duration: f64,
    start: Cell<Option<Point>>,
    end: Cell<Option<Point>>,
}

impl std::fmt::Debug for TweenableStroke {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenableStroke")
            .field("node_id", &self.node_id)
            .field("address", &self.address)
            .field("total_length", &self.total_length)
            .field("draw_duration", &self.draw_duration)
            .finish_non_exhaustive()
    }
}

impl TweenableStroke {
    /// Adapt a drawable node. Fails for structural nodes and for strokes the surface
    /// cannot measure.
    pub fn new(
        node: &StrokeGraphNode,
        surface: SharedSurface,
        policy: &TimingPolicy,
    ) -> GlyphPenResult<Self> {
        if !node.is_drawable() {
            return Err(GlyphPenError::validation(format!(
                "node \"{}\" is not drawable",
                node.id()
            )));
        }
        let total_length = surface.borrow().total_path_length(node.id())?;
        Ok(Self {
            node_id: node.id().to_owned(),
            address: node.address().clone(),
            surface,
            total_length,
            draw_duration: policy.duration_for(total_length),
            start: Cell::new(None),
            end: Cell::new(None),
        })
    }

    /// One stroke per drawable node under `root`, in structural order.
    pub fn collect(
        root: &StrokeGraphNode,
        surface: &SharedSurface,
        policy: &TimingPolicy,
    ) -> GlyphPenResult<Vec<Self>> {
        root.drawables()
            .into_iter()
            .map(|node| Self::new(node, surface.clone(), policy))
            .collect()
    }

    /// Multiply the draw duration by `factor`.
    pub fn scale_duration(&mut self, factor: f64) {
        self.draw_duration *= factor;
    }

    /// Id of the wrapped graph node.
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Structural address of the wrapped graph node.
    pub fn structural_address(&self) -> &StructuralAddress {
        &self.address
    }

    /// Path length in model units.
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Reveal duration in seconds, before any speed multiplier.
    pub fn draw_duration(&self) -> f64 {
        self.draw_duration
    }

    pub(crate) fn surface(&self) -> &SharedSurface {
        &self.surface
    }

    /// Live screen-space point at `ratio` along the stroke.
    pub fn sample(&self, ratio: f64) -> GlyphPenResult<Point> {
        let surface = self.surface.borrow();
        let local = surface.sample_local_point(&self.node_id, ratio)?;
        Ok(surface.local_to_screen() * local)
    }

    /// Screen-space start point (cached).
    pub fn start_point(&self) -> GlyphPenResult<Point> {
        cached(&self.start, || self.sample(0.0))
    }

    /// Screen-space end point (cached).
    pub fn end_point(&self) -> GlyphPenResult<Point> {
        cached(&self.end, || self.sample(1.0))
    }

    /// Drop cached start/end points.
    pub fn invalidate(&self) {
        self.start.set(None);
        self.end.set(None);
    }
}

fn cached(
    slot: &Cell<Option<Point>>,
    compute: impl FnOnce() -> GlyphPenResult<Point>,
) -> GlyphPenResult<Point> {
    if let Some(p) = slot.get() {
        return Ok(p);
    }
    let p = compute()?;
    slot.set(Some(p));
    Ok(p)
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/tweenable.rs"]
mod tests;
