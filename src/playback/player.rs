use crate::{
    foundation::core::{Point, lerp_point},
    foundation::error::{GlyphPenError, GlyphPenResult},
    pen::broadcaster::PenBroadcaster,
    schedule::timeline::{FadeDirection, Segment, Timeline},
    timing::speed::SpeedControl,
};

/// Callback fired once when a player stops for any reason.
pub type CompletionFn = Box<dyn FnOnce()>;

/// Lifecycle of a [`TimelinePlayer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Not ticked yet.
    Pending,
    /// Advancing.
    Running,
    /// Played to the end.
    Finished,
    /// Stopped by [`TimelinePlayer::cancel`].
    Cancelled,
    /// Abandoned after a runtime error.
    Failed,
}

impl PlaybackState {
    /// `true` once the completion callback has fired.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Cancelled | Self::Failed)
    }
}

/// Visual state to snap strokes to on cancellation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndState {
    /// Every stroke of the timeline fully shown.
    #[default]
    Revealed,
    /// Every stroke of the timeline hidden.
    Hidden,
    /// Leave strokes as they are.
    AsIs,
}

struct Active {
    duration: f64,
    elapsed: f64,
    travel: Option<(Point, Point)>,
}

/// Frame-driven playback of a [`Timeline`].
///
/// The host calls [`TimelinePlayer::tick`] once per frame. Segment callbacks run inside
/// the tick; time left over when a segment completes flows into the next one. Runtime
/// errors are logged and end playback early. The completion callback fires exactly once,
/// whether the timeline finishes, is cancelled or fails.
pub struct TimelinePlayer {
    segments: Vec<Segment>,
    index: usize,
    active: Option<Active>,
    time_scale: f64,
    pen: PenBroadcaster,
    state: PlaybackState,
    on_complete: Option<CompletionFn>,
    deferred_error: Option<GlyphPenError>,
    last_error: Option<GlyphPenError>,
}

impl std::fmt::Debug for TimelinePlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelinePlayer")
            .field("segments", &self.segments.len())
            .field("index", &self.index)
            .field("time_scale", &self.time_scale)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl TimelinePlayer {
    /// Player for `timeline`, publishing pen moves to `pen`.
    pub fn new(timeline: Timeline, pen: PenBroadcaster, on_complete: impl FnOnce() + 'static) -> Self {
        let time_scale = timeline.time_scale();
        Self {
            segments: timeline.into_segments(),
            index: 0,
            active: None,
            time_scale,
            pen,
            state: PlaybackState::Pending,
            on_complete: Some(Box::new(on_complete)),
            deferred_error: None,
            last_error: None,
        }
    }

    /// Player that fails on its first tick. Used when a timeline could not be built, so
    /// callers still get their completion from the frame loop.
    pub fn abandoned(error: GlyphPenError, on_complete: impl FnOnce() + 'static) -> Self {
        let mut player = Self::new(Timeline::default(), PenBroadcaster::new(), on_complete);
        player.deferred_error = Some(error);
        player
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// `true` once the player has stopped.
    pub fn is_done(&self) -> bool {
        self.state.is_terminal()
    }

    /// Error that ended playback, if any.
    pub fn last_error(&self) -> Option<&GlyphPenError> {
        self.last_error.as_ref()
    }

    /// Index of the segment being played (equals the length once done).
    pub fn position(&self) -> usize {
        self.index
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// `true` when the timeline has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Current speed multiplier.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Re-apply a speed multiplier to this player, clamped like [`SpeedControl`].
    pub fn set_time_scale(&mut self, multiplier: f64) {
        self.time_scale = SpeedControl::clamp(multiplier);
    }

    /// Advance by `dt` seconds of host time.
    pub fn tick(&mut self, dt: f64) -> PlaybackState {
        if self.state.is_terminal() {
            return self.state;
        }
        self.state = PlaybackState::Running;
        if let Some(err) = self.deferred_error.take() {
            self.fail(err);
            return self.state;
        }
        if let Err(err) = self.advance(dt.max(0.0) * self.time_scale) {
            self.fail(err);
        }
        self.state
    }

    /// Tick with a fixed frame step until the player stops.
    pub fn play_to_end(&mut self, frame_dt: f64) -> PlaybackState {
        let frame_dt = frame_dt.max(1e-3);
        while !self.is_done() {
            self.tick(frame_dt);
        }
        self.state
    }

    /// Stop playback and snap every stroke of the timeline to `end`.
    ///
    /// Returns `false` if the player had already stopped.
    pub fn cancel(&mut self, end: EndState) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        if end != EndState::AsIs {
            for segment in &self.segments {
                segment.for_each_stroke(|surface, id| {
                    let mut surface = surface.borrow_mut();
                    match end {
                        EndState::Revealed => surface.enable_stroke(id),
                        EndState::Hidden => surface.disable_stroke(id),
                        EndState::AsIs => {}
                    }
                });
            }
        }
        self.active = None;
        self.stop(PlaybackState::Cancelled);
        true
    }

    fn advance(&mut self, mut budget: f64) -> GlyphPenResult<()> {
        loop {
            let Some(segment) = self.segments.get(self.index) else {
                self.stop(PlaybackState::Finished);
                return Ok(());
            };
            let mut active = match self.active.take() {
                Some(a) => a,
                None => begin(segment)?,
            };

            let remaining = active.duration - active.elapsed;
            if budget >= remaining {
                active.elapsed = active.duration;
                budget -= remaining.max(0.0);
            } else {
                active.elapsed += budget;
                budget = 0.0;
            }
            let t = if active.duration <= 0.0 {
                1.0
            } else {
                active.elapsed / active.duration
            };
            update(segment, &active, t, &self.pen)?;

            if active.elapsed >= active.duration {
                complete(segment, &active, &self.pen);
                self.index += 1;
                continue;
            }
            self.active = Some(active);
            return Ok(());
        }
    }

    fn fail(&mut self, err: GlyphPenError) {
        tracing::error!(error = %err, segment = self.index, "stroke animation abandoned");
        self.active = None;
        self.last_error = Some(err);
        self.stop(PlaybackState::Failed);
    }

    fn stop(&mut self, state: PlaybackState) {
        self.state = state;
        if let Some(cb) = self.on_complete.take() {
            cb();
        }
    }
}

fn begin(segment: &Segment) -> GlyphPenResult<Active> {
    let active = start(segment)?;
    if !active.duration.is_finite() {
        return Err(GlyphPenError::playback(format!(
            "segment duration is not finite: {}",
            active.duration
        )));
    }
    Ok(active)
}

fn start(segment: &Segment) -> GlyphPenResult<Active> {
    Ok(match segment {
        Segment::Travel(travel) => {
            let (from, to) = travel.resolve()?;
            Active {
                duration: travel.duration_between(from, to),
                elapsed: 0.0,
                travel: Some((from, to)),
            }
        }
        Segment::Reveal(reveal) => {
            reveal
                .stroke
                .surface()
                .borrow_mut()
                .disable_stroke(reveal.stroke.node_id());
            Active {
                duration: reveal.duration,
                elapsed: 0.0,
                travel: None,
            }
        }
        Segment::Fade(fade) => {
            if fade.direction == FadeDirection::In {
                let mut surface = fade.surface.borrow_mut();
                for id in &fade.node_ids {
                    surface.enable_stroke(id);
                    surface.set_opacity(id, 0.0);
                }
            }
            Active {
                duration: fade.duration,
                elapsed: 0.0,
                travel: None,
            }
        }
    })
}

fn update(segment: &Segment, active: &Active, t: f64, pen: &PenBroadcaster) -> GlyphPenResult<()> {
    match segment {
        Segment::Travel(travel) => {
            if let Some((from, to)) = active.travel {
                pen.publish(lerp_point(from, to, travel.ease.apply(t)));
            }
        }
        Segment::Reveal(reveal) => {
            let ratio = reveal.ease.apply(t);
            let point = reveal.stroke.sample(ratio)?;
            reveal
                .stroke
                .surface()
                .borrow_mut()
                .set_draw_progress(reveal.stroke.node_id(), ratio);
            pen.publish(point);
        }
        Segment::Fade(fade) => {
            let eased = fade.ease.apply(t);
            let alpha = match fade.direction {
                FadeDirection::In => eased,
                FadeDirection::Out => 1.0 - eased,
            };
            let mut surface = fade.surface.borrow_mut();
            for id in &fade.node_ids {
                surface.set_opacity(id, alpha);
            }
        }
    }
    Ok(())
}

fn complete(segment: &Segment, active: &Active, pen: &PenBroadcaster) {
    match segment {
        Segment::Travel(_) => {
            if let Some((_, to)) = active.travel {
                pen.publish(to);
            }
        }
        Segment::Reveal(reveal) => {
            reveal
                .stroke
                .surface()
                .borrow_mut()
                .enable_stroke(reveal.stroke.node_id());
        }
        Segment::Fade(fade) => {
            let mut surface = fade.surface.borrow_mut();
            for id in &fade.node_ids {
                match fade.direction {
                    FadeDirection::In => surface.set_opacity(id, 1.0),
                    FadeDirection::Out => surface.disable_stroke(id),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/player.rs"]
mod tests;
