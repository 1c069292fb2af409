use crate::{
    foundation::core::map_clamped,
    foundation::error::{GlyphPenError, GlyphPenResult},
};

/// Maps a length (path length or travel distance) to a duration in seconds.
///
/// `duration = lerp(min_duration, max_duration, clamp((len - min_length) / (max_length -
/// min_length), 0, 1))`, so very short and very long inputs land exactly on the band's
/// ends instead of producing degenerate durations.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimingPolicy {
    /// Length at or below which `min_duration` applies.
    pub min_length: f64,
    /// Length at or above which `max_duration` applies.
    pub max_length: f64,
    /// Shortest duration, seconds.
    pub min_duration: f64,
    /// Longest duration, seconds.
    pub max_duration: f64,
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self::stroke()
    }
}

impl TimingPolicy {
    /// Default band for stroke-graph reveals.
    pub const fn stroke() -> Self {
        Self {
            min_length: 100.0,
            max_length: 1000.0,
            min_duration: 0.15,
            max_duration: 0.35,
        }
    }

    /// Tight band for small decorative strokes such as points.
    pub const fn fast() -> Self {
        Self {
            min_length: 10.0,
            max_length: 200.0,
            min_duration: 0.08,
            max_duration: 0.15,
        }
    }

    /// Wide band for primary strokes drawn on their own.
    pub const fn slow() -> Self {
        Self {
            min_length: 50.0,
            max_length: 1000.0,
            min_duration: 0.5,
            max_duration: 1.5,
        }
    }

    /// Pen-tracing contexts (a single shape traced slowly).
    pub const fn pen_trace() -> Self {
        Self {
            min_length: 100.0,
            max_length: 1000.0,
            min_duration: 1.0,
            max_duration: 2.0,
        }
    }

    /// Pen travel between strokes, keyed by travel distance.
    pub const fn travel() -> Self {
        Self {
            min_length: 50.0,
            max_length: 1000.0,
            min_duration: 0.3,
            max_duration: 2.0,
        }
    }

    /// Duration in seconds for a stroke or travel of `length` model units.
    pub fn duration_for(&self, length: f64) -> f64 {
        map_clamped(
            length,
            self.min_length,
            self.max_length,
            self.min_duration,
            self.max_duration,
        )
    }

    /// Reject non-finite, negative or inverted bands.
    pub fn validate(&self) -> GlyphPenResult<()> {
        let all = [
            self.min_length,
            self.max_length,
            self.min_duration,
            self.max_duration,
        ];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(GlyphPenError::validation("timing band values must be finite"));
        }
        if self.min_length > self.max_length {
            return Err(GlyphPenError::validation("timing min_length must be <= max_length"));
        }
        if self.min_duration < 0.0 || self.min_duration > self.max_duration {
            return Err(GlyphPenError::validation(
                "timing durations must satisfy 0 <= min_duration <= max_duration",
            ));
        }
        Ok(())
    }
}

/// Per-stroke duration factor when `count` strokes are drawn together.
///
/// More strokes draw faster each so the whole expression keeps a reasonable total time:
/// `max(0.3, 1 / sqrt(count))`.
pub fn count_scale(count: usize) -> f64 {
    if count <= 1 {
        return 1.0;
    }
    (1.0 / (count as f64).sqrt()).max(0.3)
}

#[cfg(test)]
#[path = "../../tests/unit/timing/policy.rs"]
mod tests;
