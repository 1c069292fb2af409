use std::cell::Cell;
use std::rc::Rc;

/// Process-wide playback speed multiplier, shared by handle.
///
/// Read when a timeline is scheduled; durations are divided by it. Changing it later
/// only affects timelines scheduled afterwards unless the host re-applies it to a running
/// player.
#[derive(Clone, Debug)]
pub struct SpeedControl {
    multiplier: Rc<Cell<f64>>,
}

impl Default for SpeedControl {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl SpeedControl {
    /// Slowest allowed multiplier.
    pub const MIN: f64 = 0.1;
    /// Fastest allowed multiplier.
    pub const MAX: f64 = 3.0;
    /// Initial multiplier.
    pub const DEFAULT: f64 = 1.0;

    /// New control starting at `multiplier` (clamped).
    pub fn new(multiplier: f64) -> Self {
        Self {
            multiplier: Rc::new(Cell::new(Self::clamp(multiplier))),
        }
    }

    pub(crate) fn clamp(v: f64) -> f64 {
        if v.is_nan() {
            return Self::DEFAULT;
        }
        v.clamp(Self::MIN, Self::MAX)
    }

    /// Current multiplier.
    pub fn get(&self) -> f64 {
        self.multiplier.get()
    }

    /// Set the multiplier, clamped to `[MIN, MAX]`. Visible through every clone.
    pub fn set(&self, multiplier: f64) {
        self.multiplier.set(Self::clamp(multiplier));
    }

    /// `secs` at the current speed.
    pub fn scale_duration(&self, secs: f64) -> f64 {
        secs / self.get()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/speed.rs"]
mod tests;
