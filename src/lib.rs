//! Glyphpen turns a typeset math expression into a hand-drawn, pen-traced animation.
//!
//! The engine never renders pixels itself. It consumes a labeled glyph tree from a
//! typesetting layer, drives a [`RenderSurface`] that owns the real stroke objects, and
//! advances through a host-ticked [`TimelinePlayer`].
//!
//! # Pipeline overview
//!
//! 1. **Build**: `GlyphElement -> StrokeGraphNode` ([`GraphBuilder`]): structural
//!    children become nodes, [`RenderOrderHeuristics`] permute special shapes (fractions),
//!    then every node receives a dotted [`StructuralAddress`].
//! 2. **Adapt**: every drawable node becomes a [`TweenableStroke`] whose reveal duration
//!    follows its path length ([`TimingPolicy`]).
//! 3. **Sequence**: [`StrokeSequencer`] orders the strokes, optionally driven by
//!    [`SelectionUnit`]s, in one of four [`SequenceMode`]s.
//! 4. **Schedule**: [`PenPathScheduler`] interleaves pen travels with stroke reveals into
//!    one [`Timeline`].
//! 5. **Play**: [`TimelinePlayer::tick`] advances the timeline frame by frame, publishing
//!    every pen position on the shared [`PenBroadcaster`].
//!
//! [`StrokeAnimator`] wires these together behind the caller-facing entry points.
//!
//! Everything is single-threaded and cooperative: shared state lives in `Rc<RefCell<_>>`
//! handles, and no call blocks.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod animator;
mod foundation;
mod graph;
mod pen;
mod playback;
mod schedule;
mod stroke;
mod surface;
mod timing;
mod tree;

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
pub(crate) mod test_support;

pub use animation::ease::Ease;
pub use animator::config::AnimatorConfig;
pub use animator::engine::{AnimationPlan, StrokeAnimator};
pub use foundation::color::StrokeColor;
pub use foundation::core::{Affine, BezPath, Point, Rect, RestOffset, Vec2};
pub use foundation::error::{GlyphPenError, GlyphPenResult};
pub use graph::address::StructuralAddress;
pub use graph::builder::GraphBuilder;
pub use graph::heuristics::{FRACTION_NUMERATOR_FIRST, OrderRule, RenderOrderHeuristics};
pub use graph::node::StrokeGraphNode;
pub use pen::broadcaster::{ListenerId, PenBroadcaster, PenEvent};
pub use playback::player::{CompletionFn, EndState, PlaybackState, TimelinePlayer};
pub use schedule::scheduler::PenPathScheduler;
pub use schedule::timeline::{
    FadeDirection, FadeSegment, PointFn, RevealSegment, Segment, SegmentSummary, Timeline,
    TimelineSummary, TravelKind, TravelSegment, fixed_point,
};
pub use stroke::selection::SelectionUnit;
pub use stroke::sequencer::{Addressed, SequenceMode, StrokeSequence, StrokeSequencer};
pub use stroke::tweenable::TweenableStroke;
pub use surface::path::{PathSurface, StrokeVisibility, SurfaceCall};
pub use surface::{RenderSurface, SharedSurface, shared};
pub use timing::policy::{TimingPolicy, count_scale};
pub use timing::speed::SpeedControl;
pub use tree::glyph::{GlyphElement, PrimitiveKind, attr, category};
