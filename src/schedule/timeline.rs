use std::rc::Rc;

use crate::{
    animation::ease::Ease,
    foundation::core::Point,
    foundation::error::GlyphPenResult,
    graph::address::StructuralAddress,
    stroke::tweenable::TweenableStroke,
    surface::SharedSurface,
    timing::policy::TimingPolicy,
};

/// Zero-argument point accessor, resolved when a segment begins.
pub type PointFn = Rc<dyn Fn() -> GlyphPenResult<Point>>;

/// Accessor that always yields `p`.
pub fn fixed_point(p: Point) -> PointFn {
    Rc::new(move || -> GlyphPenResult<Point> { Ok(p) })
}

/// Where a pen travel sits in the timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelKind {
    /// From the initial pen position to the first stroke.
    Approach,
    /// From one stroke's end to the next stroke's start.
    Transit,
    /// From the last stroke's end to the resting point.
    Rest,
}

/// Pen movement between two live points.
#[derive(Clone)]
pub struct TravelSegment {
    /// Position of the travel in the timeline.
    pub kind: TravelKind,
    pub(crate) from: PointFn,
    pub(crate) to: PointFn,
    /// Distance-to-duration band.
    pub policy: TimingPolicy,
    /// Progress easing.
    pub ease: Ease,
}

impl std::fmt::Debug for TravelSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TravelSegment")
            .field("kind", &self.kind)
            .field("policy", &self.policy)
            .field("ease", &self.ease)
            .finish_non_exhaustive()
    }
}

impl TravelSegment {
    /// Travel with the default travel band and cubic easing.
    pub fn new(kind: TravelKind, from: PointFn, to: PointFn) -> Self {
        Self {
            kind,
            from,
            to,
            policy: TimingPolicy::travel(),
            ease: Ease::InOutCubic,
        }
    }

    /// Read both endpoints now.
    pub fn resolve(&self) -> GlyphPenResult<(Point, Point)> {
        Ok(((self.from)()?, (self.to)()?))
    }

    /// Duration for a travel between `from` and `to`.
    pub fn duration_between(&self, from: Point, to: Point) -> f64 {
        self.policy.duration_for(from.distance(to))
    }
}

/// Progressive reveal of one stroke.
#[derive(Clone, Debug)]
pub struct RevealSegment {
    /// The stroke being drawn.
    pub stroke: TweenableStroke,
    /// Unscaled duration in seconds.
    pub duration: f64,
    /// Progress easing.
    pub ease: Ease,
}

impl RevealSegment {
    /// Reveal over the stroke's own draw duration.
    pub fn new(stroke: TweenableStroke) -> Self {
        let duration = stroke.draw_duration();
        Self {
            stroke,
            duration,
            ease: Ease::Linear,
        }
    }
}

/// Direction of an opacity fade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeDirection {
    /// Transparent to opaque.
    In,
    /// Opaque to hidden.
    Out,
}

/// Alpha-only animation of a set of strokes.
#[derive(Clone)]
pub struct FadeSegment {
    /// Fade direction.
    pub direction: FadeDirection,
    pub(crate) node_ids: Vec<String>,
    pub(crate) surface: SharedSurface,
    /// Unscaled duration in seconds.
    pub duration: f64,
    /// Progress easing.
    pub ease: Ease,
}

impl std::fmt::Debug for FadeSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FadeSegment")
            .field("direction", &self.direction)
            .field("node_ids", &self.node_ids)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

impl FadeSegment {
    /// Fade `node_ids` on `surface` over `duration` seconds.
    pub fn new(
        direction: FadeDirection,
        node_ids: Vec<String>,
        surface: SharedSurface,
        duration: f64,
    ) -> Self {
        Self {
            direction,
            node_ids,
            surface,
            duration: duration.max(0.0),
            ease: Ease::InOutQuad,
        }
    }
}

/// One scheduled unit of a timeline.
#[derive(Clone, Debug)]
pub enum Segment {
    /// Pen movement.
    Travel(TravelSegment),
    /// Stroke reveal.
    Reveal(RevealSegment),
    /// Opacity fade.
    Fade(FadeSegment),
}

impl Segment {
    /// Visit every stroke the segment touches as `(surface, node id)`.
    pub(crate) fn for_each_stroke(&self, mut f: impl FnMut(&SharedSurface, &str)) {
        match self {
            Self::Travel(_) => {}
            Self::Reveal(r) => f(r.stroke.surface(), r.stroke.node_id()),
            Self::Fade(fade) => {
                for id in &fade.node_ids {
                    f(&fade.surface, id);
                }
            }
        }
    }
}

/// Ordered segments played back to back, plus the speed multiplier captured at build.
#[derive(Clone, Debug)]
pub struct Timeline {
    segments: Vec<Segment>,
    time_scale: f64,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Timeline {
    /// Empty timeline playing at `time_scale`.
    pub fn new(time_scale: f64) -> Self {
        Self {
            segments: Vec::new(),
            time_scale,
        }
    }

    /// Append a segment.
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Segments in playback order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub(crate) fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// `true` when nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Speed multiplier applied during playback.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Number of pen travels.
    pub fn travel_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Travel(_)))
            .count()
    }

    /// Number of stroke reveals.
    pub fn reveal_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Reveal(_)))
            .count()
    }

    /// Addresses of revealed strokes, in order.
    pub fn reveal_order(&self) -> Vec<&StructuralAddress> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Reveal(r) => Some(r.stroke.structural_address()),
                _ => None,
            })
            .collect()
    }

    /// Snapshot of the timeline with travel endpoints resolved against the current
    /// surface state.
    pub fn summary(&self) -> GlyphPenResult<TimelineSummary> {
        let segments = self
            .segments
            .iter()
            .map(|segment| {
                Ok(match segment {
                    Segment::Travel(t) => {
                        let (from, to) = t.resolve()?;
                        SegmentSummary::Travel {
                            travel: t.kind,
                            from,
                            to,
                            duration: t.duration_between(from, to),
                        }
                    }
                    Segment::Reveal(r) => SegmentSummary::Reveal {
                        address: r.stroke.structural_address().clone(),
                        node_id: r.stroke.node_id().to_owned(),
                        duration: r.duration,
                    },
                    Segment::Fade(f) => SegmentSummary::Fade {
                        direction: f.direction,
                        strokes: f.node_ids.len(),
                        duration: f.duration,
                    },
                })
            })
            .collect::<GlyphPenResult<Vec<_>>>()?;
        Ok(TimelineSummary {
            time_scale: self.time_scale,
            segments,
        })
    }
}

/// Serializable view of a [`Timeline`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TimelineSummary {
    /// Speed multiplier.
    pub time_scale: f64,
    /// One entry per segment.
    pub segments: Vec<SegmentSummary>,
}

/// Serializable view of one [`Segment`]. Durations are unscaled seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SegmentSummary {
    /// Pen travel.
    Travel {
        /// Travel position.
        travel: TravelKind,
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Duration for the current distance.
        duration: f64,
    },
    /// Stroke reveal.
    Reveal {
        /// Stroke address.
        address: StructuralAddress,
        /// Stroke id.
        node_id: String,
        /// Duration.
        duration: f64,
    },
    /// Opacity fade.
    Fade {
        /// Direction.
        direction: FadeDirection,
        /// Number of strokes.
        strokes: usize,
        /// Duration.
        duration: f64,
    },
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/timeline.rs"]
mod tests;
