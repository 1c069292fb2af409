use crate::{
    animator::config::AnimatorConfig,
    foundation::color::StrokeColor,
    foundation::core::{Point, Rect},
    foundation::error::GlyphPenResult,
    graph::builder::GraphBuilder,
    graph::node::StrokeGraphNode,
    pen::broadcaster::PenBroadcaster,
    playback::player::TimelinePlayer,
    schedule::timeline::{FadeDirection, FadeSegment, Segment, Timeline},
    stroke::selection::{SelectionUnit, any_contains},
    stroke::sequencer::{SequenceMode, StrokeSequencer},
    stroke::tweenable::TweenableStroke,
    surface::{RenderSurface, SharedSurface},
    timing::speed::SpeedControl,
    tree::glyph::GlyphElement,
};

/// A scheduled request that has not started playing.
#[derive(Clone, Debug)]
pub struct AnimationPlan {
    /// Timeline to play.
    pub timeline: Timeline,
    /// Strokes outside the timeline to hide before playback.
    pub to_disable: Vec<TweenableStroke>,
}

impl AnimationPlan {
    /// Hide everything the plan will draw plus everything it must disable.
    pub fn prepare(&self) {
        for stroke in &self.to_disable {
            stroke.surface().borrow_mut().disable_stroke(stroke.node_id());
        }
        for segment in self.timeline.segments() {
            if let Segment::Reveal(_) = segment {
                segment.for_each_stroke(|surface, id| surface.borrow_mut().disable_stroke(id));
            }
        }
    }
}

/// Entry point tying graph building, sequencing, scheduling and playback together.
///
/// Every `animate*`/`fade*` call returns a [`TimelinePlayer`] the host ticks from its
/// frame loop. Its completion callback fires exactly once, including when scheduling
/// fails.
#[derive(Clone)]
pub struct StrokeAnimator {
    surface: SharedSurface,
    pen: PenBroadcaster,
    speed: SpeedControl,
    config: AnimatorConfig,
    builder: GraphBuilder,
}

impl std::fmt::Debug for StrokeAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrokeAnimator")
            .field("pen", &self.pen)
            .field("speed", &self.speed)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl StrokeAnimator {
    /// Animator over `surface` with default settings.
    pub fn new(surface: SharedSurface) -> Self {
        Self {
            surface,
            pen: PenBroadcaster::new(),
            speed: SpeedControl::default(),
            config: AnimatorConfig::default(),
            builder: GraphBuilder::default(),
        }
    }

    /// Animator using a validated `config`; its speed seeds a fresh [`SpeedControl`].
    pub fn with_config(surface: SharedSurface, config: AnimatorConfig) -> GlyphPenResult<Self> {
        config.validate()?;
        Ok(Self {
            speed: SpeedControl::new(config.speed),
            config,
            ..Self::new(surface)
        })
    }

    /// Share a pen broadcaster with other animators.
    pub fn with_pen(mut self, pen: PenBroadcaster) -> Self {
        self.pen = pen;
        self
    }

    /// Share a speed control with other animators.
    pub fn with_speed(mut self, speed: SpeedControl) -> Self {
        self.speed = speed;
        self
    }

    /// Use a custom graph builder (for extra ordering rules).
    pub fn with_builder(mut self, builder: GraphBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Rendering surface.
    pub fn surface(&self) -> &SharedSurface {
        &self.surface
    }

    /// Pen broadcaster.
    pub fn pen(&self) -> &PenBroadcaster {
        &self.pen
    }

    /// Speed control.
    pub fn speed(&self) -> &SpeedControl {
        &self.speed
    }

    /// Configuration.
    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    /// Build the stroke graph for `tree` and register it with the surface.
    #[tracing::instrument(skip(self, tree))]
    pub fn build_graph(
        &self,
        tree: &GlyphElement,
        root_id: &str,
        color: StrokeColor,
    ) -> GlyphPenResult<StrokeGraphNode> {
        let root = self.builder.build(tree, root_id, color);
        root.bind(&mut *self.surface.borrow_mut())?;
        Ok(root)
    }

    /// One tweenable stroke per drawable node, in structural order.
    pub fn tweenable_strokes(&self, root: &StrokeGraphNode) -> GlyphPenResult<Vec<TweenableStroke>> {
        TweenableStroke::collect(root, &self.surface, &self.config.stroke_timing)
    }

    /// Sequence and schedule a request without touching the surface.
    #[tracing::instrument(skip(self, root, units), fields(root = root.id(), units = units.len()))]
    pub fn plan(
        &self,
        root: &StrokeGraphNode,
        units: &[SelectionUnit],
        mode: SequenceMode,
    ) -> GlyphPenResult<AnimationPlan> {
        let sequence = StrokeSequencer::arrange(self.tweenable_strokes(root)?, units, mode);
        let initial_pen = match (self.pen.last_position(), sequence.ordered.first()) {
            (Some(p), _) => p,
            (None, Some(first)) => first.start_point()?,
            (None, None) => Point::ZERO,
        };
        let timeline = self
            .config
            .scheduler(self.speed.clone())
            .schedule(sequence.ordered, initial_pen)?;
        Ok(AnimationPlan {
            timeline,
            to_disable: sequence.to_disable,
        })
    }

    /// Plan, hide what needs hiding and hand back a player.
    pub fn animate_with(
        &self,
        root: &StrokeGraphNode,
        units: &[SelectionUnit],
        mode: SequenceMode,
        on_complete: impl FnOnce() + 'static,
    ) -> TimelinePlayer {
        match self.plan(root, units, mode) {
            Ok(plan) => {
                plan.prepare();
                TimelinePlayer::new(plan.timeline, self.pen.clone(), on_complete)
            }
            Err(err) => TimelinePlayer::abandoned(err, on_complete),
        }
    }

    /// Recolor `root` and write the whole expression in structural order.
    pub fn animate(
        &self,
        root: &mut StrokeGraphNode,
        color: StrokeColor,
        on_complete: impl FnOnce() + 'static,
    ) -> TimelinePlayer {
        self.update_stroke_color(root, color);
        self.animate_with(root, &[], SequenceMode::default(), on_complete)
    }

    /// Selected units first, then (with `auto_complete`) everything else.
    pub fn animate_selection(
        &self,
        root: &StrokeGraphNode,
        units: &[SelectionUnit],
        auto_complete: bool,
        on_complete: impl FnOnce() + 'static,
    ) -> TimelinePlayer {
        self.animate_with(root, units, SequenceMode::Sequence { auto_complete }, on_complete)
    }

    /// Exactly the selected units, in order.
    pub fn animate_selection_only(
        &self,
        root: &StrokeGraphNode,
        units: &[SelectionUnit],
        on_complete: impl FnOnce() + 'static,
    ) -> TimelinePlayer {
        self.animate_with(root, units, SequenceMode::SelectionOnly, on_complete)
    }

    /// Everything except the units, which are hidden.
    pub fn animate_excluding(
        &self,
        root: &StrokeGraphNode,
        units: &[SelectionUnit],
        on_complete: impl FnOnce() + 'static,
    ) -> TimelinePlayer {
        self.animate_with(root, units, SequenceMode::ExcludeAndDisable, on_complete)
    }

    /// Everything except the units, which keep their current state.
    pub fn animate_excluding_without_disabling(
        &self,
        root: &StrokeGraphNode,
        units: &[SelectionUnit],
        on_complete: impl FnOnce() + 'static,
    ) -> TimelinePlayer {
        self.animate_with(root, units, SequenceMode::ExcludeWithoutDisabling, on_complete)
    }

    /// Fade every stroke of `root` in over `duration` seconds.
    pub fn fade_in(
        &self,
        root: &StrokeGraphNode,
        duration: f64,
        on_complete: impl FnOnce() + 'static,
    ) -> TimelinePlayer {
        self.fade(root, FadeDirection::In, duration, on_complete)
    }

    /// Fade every stroke of `root` out over `duration` seconds, hiding them at the end.
    pub fn fade_out(
        &self,
        root: &StrokeGraphNode,
        duration: f64,
        on_complete: impl FnOnce() + 'static,
    ) -> TimelinePlayer {
        self.fade(root, FadeDirection::Out, duration, on_complete)
    }

    fn fade(
        &self,
        root: &StrokeGraphNode,
        direction: FadeDirection,
        duration: f64,
        on_complete: impl FnOnce() + 'static,
    ) -> TimelinePlayer {
        let ids = root.drawables().iter().map(|n| n.id().to_owned()).collect();
        let mut timeline = Timeline::new(self.speed.get());
        timeline.push(Segment::Fade(FadeSegment::new(
            direction,
            ids,
            self.surface.clone(),
            duration,
        )));
        TimelinePlayer::new(timeline, self.pen.clone(), on_complete)
    }

    /// Hide every stroke of `root` instantly.
    pub fn hide(&self, root: &StrokeGraphNode) {
        root.disable_stroke(&mut *self.surface.borrow_mut());
    }

    /// Reveal every stroke of `root` instantly.
    pub fn show(&self, root: &StrokeGraphNode) {
        root.enable_stroke(&mut *self.surface.borrow_mut());
    }

    /// Hide only the strokes the units select.
    pub fn hide_selection(&self, root: &StrokeGraphNode, units: &[SelectionUnit]) {
        let mut surface = self.surface.borrow_mut();
        root.walk(&mut |node| {
            if any_contains(units, node.address().as_str()) {
                node.disable_stroke(&mut *surface);
            }
        });
    }

    /// Recolor the whole tree and push the colors to the surface.
    pub fn update_stroke_color(&self, root: &mut StrokeGraphNode, color: StrokeColor) {
        root.recolor(color);
        root.apply_stroke_color(&mut *self.surface.borrow_mut());
    }

    /// Recolor only the subtrees the units select.
    pub fn update_selection_stroke(
        &self,
        root: &mut StrokeGraphNode,
        units: &[SelectionUnit],
        color: StrokeColor,
    ) {
        recolor_selected(root, units, color, &mut *self.surface.borrow_mut());
    }

    /// Selection of every stroke lying fully inside `region`.
    pub fn selection_from_region(
        &self,
        name: &str,
        root: &StrokeGraphNode,
        region: Rect,
    ) -> SelectionUnit {
        SelectionUnit::from_region(name, root, &*self.surface.borrow(), region)
    }

    /// Screen bounds covered by `unit`.
    pub fn selection_bounds(&self, root: &StrokeGraphNode, unit: &SelectionUnit) -> Option<Rect> {
        unit.bounds(root, &*self.surface.borrow())
    }

    /// Screen-space start of the first stroke, if `root` has any.
    pub fn start_trace_point(&self, root: &StrokeGraphNode) -> GlyphPenResult<Option<Point>> {
        self.trace_point(root.drawables().first().copied(), 0.0)
    }

    /// Screen-space end of the last stroke, if `root` has any.
    pub fn last_trace_point(&self, root: &StrokeGraphNode) -> GlyphPenResult<Option<Point>> {
        self.trace_point(root.drawables().last().copied(), 1.0)
    }

    fn trace_point(&self, node: Option<&StrokeGraphNode>, ratio: f64) -> GlyphPenResult<Option<Point>> {
        let Some(node) = node else {
            return Ok(None);
        };
        let surface = self.surface.borrow();
        let local = surface.sample_local_point(node.id(), ratio)?;
        Ok(Some(surface.local_to_screen() * local))
    }
}

fn recolor_selected(
    node: &mut StrokeGraphNode,
    units: &[SelectionUnit],
    color: StrokeColor,
    surface: &mut dyn RenderSurface,
) {
    if any_contains(units, node.address().as_str()) {
        node.recolor(color);
        node.apply_stroke_color(surface);
        return;
    }
    for child in node.children_mut() {
        recolor_selected(child, units, color, surface);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animator/engine.rs"]
mod tests;
