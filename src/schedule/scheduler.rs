use std::rc::Rc;

use crate::{
    foundation::core::{Point, RestOffset},
    foundation::error::GlyphPenResult,
    schedule::timeline::{
        PointFn, RevealSegment, Segment, Timeline, TravelKind, TravelSegment, fixed_point,
    },
    stroke::tweenable::TweenableStroke,
    timing::policy::{TimingPolicy, count_scale},
    timing::speed::SpeedControl,
};

/// Turns an ordered stroke list into one pen-driven timeline.
///
/// Each stroke is preceded by a pen travel from wherever the pen was and followed, after
/// the last stroke, by a travel to a resting point beside it. Travel endpoints are read
/// live when the travel begins.
#[derive(Clone, Debug)]
pub struct PenPathScheduler {
    travel_policy: TimingPolicy,
    rest_offset: RestOffset,
    adjacency_threshold: f64,
    count_scaling: bool,
    speed: SpeedControl,
}

impl Default for PenPathScheduler {
    fn default() -> Self {
        Self {
            travel_policy: TimingPolicy::travel(),
            rest_offset: RestOffset::default(),
            adjacency_threshold: 5.0,
            count_scaling: false,
            speed: SpeedControl::default(),
        }
    }
}

impl PenPathScheduler {
    /// Band mapping travel distance to duration.
    pub fn with_travel_policy(mut self, policy: TimingPolicy) -> Self {
        self.travel_policy = policy;
        self
    }

    /// Offset of the final resting point from the last stroke's end.
    pub fn with_rest_offset(mut self, offset: RestOffset) -> Self {
        self.rest_offset = offset;
        self
    }

    /// Inter-stroke travels shorter than this are dropped. Zero keeps all of them.
    pub fn with_adjacency_threshold(mut self, threshold: f64) -> Self {
        self.adjacency_threshold = threshold.max(0.0);
        self
    }

    /// Shorten strokes when many are drawn together (see [`count_scale`]).
    pub fn with_count_scaling(mut self, enabled: bool) -> Self {
        self.count_scaling = enabled;
        self
    }

    /// Speed control read when a timeline is built.
    pub fn with_speed(mut self, speed: SpeedControl) -> Self {
        self.speed = speed;
        self
    }

    /// Schedule `ordered` starting from `initial_pen`.
    ///
    /// Fails only if a stroke cannot be sampled while checking adjacency.
    #[tracing::instrument(skip(self, ordered), fields(strokes = ordered.len()))]
    pub fn schedule(
        &self,
        ordered: Vec<TweenableStroke>,
        initial_pen: Point,
    ) -> GlyphPenResult<Timeline> {
        let mut timeline = Timeline::new(self.speed.get());
        let factor = if self.count_scaling {
            count_scale(ordered.len())
        } else {
            1.0
        };

        let mut previous: Option<TweenableStroke> = None;
        for mut stroke in ordered {
            stroke.scale_duration(factor);
            let travel = match &previous {
                None => Some(self.travel(
                    TravelKind::Approach,
                    fixed_point(initial_pen),
                    start_of(&stroke),
                )),
                Some(prev) => {
                    let gap = prev.end_point()?.distance(stroke.start_point()?);
                    (gap >= self.adjacency_threshold).then(|| {
                        self.travel(TravelKind::Transit, end_of(prev), start_of(&stroke))
                    })
                }
            };
            if let Some(travel) = travel {
                timeline.push(Segment::Travel(travel));
            }
            timeline.push(Segment::Reveal(RevealSegment::new(stroke.clone())));
            previous = Some(stroke);
        }

        if let Some(last) = previous {
            let offset = self.rest_offset;
            let anchor = end_of(&last);
            let rest: PointFn = Rc::new(move || -> GlyphPenResult<Point> {
                Ok(offset.apply(anchor()?))
            });
            timeline.push(Segment::Travel(self.travel(
                TravelKind::Rest,
                end_of(&last),
                rest,
            )));
        }

        tracing::debug!(
            segments = timeline.len(),
            travels = timeline.travel_count(),
            reveals = timeline.reveal_count(),
            time_scale = timeline.time_scale(),
            "scheduled pen timeline"
        );
        Ok(timeline)
    }

    fn travel(&self, kind: TravelKind, from: PointFn, to: PointFn) -> TravelSegment {
        TravelSegment {
            policy: self.travel_policy,
            ..TravelSegment::new(kind, from, to)
        }
    }
}

fn start_of(stroke: &TweenableStroke) -> PointFn {
    let stroke = stroke.clone();
    Rc::new(move || stroke.sample(0.0))
}

fn end_of(stroke: &TweenableStroke) -> PointFn {
    let stroke = stroke.clone();
    Rc::new(move || stroke.sample(1.0))
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/scheduler.rs"]
mod tests;
