use crate::{
    graph::address::StructuralAddress, graph::node::StrokeGraphNode,
    stroke::selection::SelectionUnit, stroke::tweenable::TweenableStroke,
};

/// Anything that carries a structural address and can be sequenced.
pub trait Addressed {
    /// Address used for selection matching.
    fn structural_address(&self) -> &StructuralAddress;
}

impl Addressed for TweenableStroke {
    fn structural_address(&self) -> &StructuralAddress {
        TweenableStroke::structural_address(self)
    }
}

impl Addressed for &StrokeGraphNode {
    fn structural_address(&self) -> &StructuralAddress {
        self.address()
    }
}

/// How a request orders (and filters) the drawable strokes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceMode {
    /// Selected units first, in the given order; then, with `auto_complete`, everything
    /// left in structural order. Without it the leftovers are hidden.
    Sequence {
        /// Append the unselected strokes after the selections.
        auto_complete: bool,
    },
    /// Exactly the selected units, in the given order. Other strokes are left alone.
    SelectionOnly,
    /// Everything except the selections; the excluded strokes are hidden.
    ExcludeAndDisable,
    /// Everything except the selections; the excluded strokes keep their current state.
    ExcludeWithoutDisabling,
}

impl Default for SequenceMode {
    fn default() -> Self {
        Self::Sequence {
            auto_complete: true,
        }
    }
}

/// Result of sequencing: what to animate and what to hide outside the animation list.
#[derive(Clone, Debug)]
pub struct StrokeSequence<T> {
    /// Strokes to animate, in order. A permutation of a subset of the input; no repeats.
    pub ordered: Vec<T>,
    /// Strokes not animated that must be hidden before playback.
    pub to_disable: Vec<T>,
}

/// Orders drawable strokes according to selection units.
///
/// Every mode is built from [`StrokeSequencer::collect_by_selection`], which claims nodes
/// out of a shrinking pool: once a unit has claimed a node, later units cannot.
pub struct StrokeSequencer;

impl StrokeSequencer {
    /// Split `pool` into the items `unit` selects and the rest, both in pool order.
    pub fn collect_by_selection<T: Addressed>(pool: Vec<T>, unit: &SelectionUnit) -> (Vec<T>, Vec<T>) {
        pool.into_iter()
            .partition(|item| unit.contains_fragment(item.structural_address().as_str()))
    }

    /// Mode 1: selections in order, optionally followed by the remaining pool.
    pub fn sequence<T: Addressed>(all: Vec<T>, units: &[SelectionUnit], auto_complete: bool) -> Vec<T> {
        let (mut ordered, remaining) = Self::claim_all(all, units);
        if auto_complete {
            ordered.extend(remaining);
        }
        ordered
    }

    /// Modes 2 and 3: whatever no unit claims, in structural order.
    pub fn complement<T: Addressed>(all: Vec<T>, units: &[SelectionUnit]) -> Vec<T> {
        Self::claim_all(all, units).1
    }

    /// Mode 4: only the selections, in the order given.
    pub fn selection_only<T: Addressed>(all: Vec<T>, units: &[SelectionUnit]) -> Vec<T> {
        Self::claim_all(all, units).0
    }

    /// Apply `mode`, also reporting which unanimated strokes must be hidden.
    pub fn arrange<T: Addressed>(
        all: Vec<T>,
        units: &[SelectionUnit],
        mode: SequenceMode,
    ) -> StrokeSequence<T> {
        let (claimed, remaining) = Self::claim_all(all, units);
        match mode {
            SequenceMode::Sequence { auto_complete: true } => {
                let mut ordered = claimed;
                ordered.extend(remaining);
                StrokeSequence {
                    ordered,
                    to_disable: Vec::new(),
                }
            }
            SequenceMode::Sequence {
                auto_complete: false,
            } => StrokeSequence {
                ordered: claimed,
                to_disable: remaining,
            },
            SequenceMode::SelectionOnly => StrokeSequence {
                ordered: claimed,
                to_disable: Vec::new(),
            },
            SequenceMode::ExcludeAndDisable => StrokeSequence {
                ordered: remaining,
                to_disable: claimed,
            },
            SequenceMode::ExcludeWithoutDisabling => StrokeSequence {
                ordered: remaining,
                to_disable: Vec::new(),
            },
        }
    }

    fn claim_all<T: Addressed>(all: Vec<T>, units: &[SelectionUnit]) -> (Vec<T>, Vec<T>) {
        let mut pool = all;
        let mut claimed = Vec::new();
        for unit in units {
            let (collected, remaining) = Self::collect_by_selection(pool, unit);
            claimed.extend(collected);
            pool = remaining;
        }
        (claimed, pool)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/sequencer.rs"]
mod tests;
