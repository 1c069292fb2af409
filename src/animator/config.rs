use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::core::RestOffset,
    foundation::error::{GlyphPenError, GlyphPenResult},
    schedule::scheduler::PenPathScheduler,
    timing::policy::TimingPolicy,
    timing::speed::SpeedControl,
};

/// Tunables for [`crate::StrokeAnimator`]. Every field has a default, so partial JSON
/// documents load.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Stroke length to reveal duration.
    pub stroke_timing: TimingPolicy,
    /// Pen travel distance to travel duration.
    pub travel_timing: TimingPolicy,
    /// Where the pen parks after the last stroke.
    pub rest_offset: RestOffset,
    /// Inter-stroke travels shorter than this (screen units) are skipped.
    pub adjacency_threshold: f64,
    /// Shorten strokes when many are drawn together. Off by default.
    pub count_scaling: bool,
    /// Initial speed multiplier.
    pub speed: f64,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            stroke_timing: TimingPolicy::stroke(),
            travel_timing: TimingPolicy::travel(),
            rest_offset: RestOffset::default(),
            adjacency_threshold: 5.0,
            count_scaling: false,
            speed: SpeedControl::DEFAULT,
        }
    }
}

impl AnimatorConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> GlyphPenResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: &Path) -> GlyphPenResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read animator config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Reject bands and values that cannot produce a sane timeline.
    pub fn validate(&self) -> GlyphPenResult<()> {
        self.stroke_timing.validate()?;
        self.travel_timing.validate()?;
        if !(self.rest_offset.dx.is_finite() && self.rest_offset.dy.is_finite()) {
            return Err(GlyphPenError::validation("rest_offset must be finite"));
        }
        if !self.adjacency_threshold.is_finite() || self.adjacency_threshold < 0.0 {
            return Err(GlyphPenError::validation(
                "adjacency_threshold must be finite and >= 0",
            ));
        }
        if !(SpeedControl::MIN..=SpeedControl::MAX).contains(&self.speed) {
            return Err(GlyphPenError::validation(format!(
                "speed must be in [{}, {}]",
                SpeedControl::MIN,
                SpeedControl::MAX
            )));
        }
        Ok(())
    }

    /// Scheduler configured from this config, reading `speed` at build time.
    pub fn scheduler(&self, speed: SpeedControl) -> PenPathScheduler {
        PenPathScheduler::default()
            .with_travel_policy(self.travel_timing)
            .with_rest_offset(self.rest_offset)
            .with_adjacency_threshold(self.adjacency_threshold)
            .with_count_scaling(self.count_scaling)
            .with_speed(speed)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animator/config.rs"]
mod tests;
