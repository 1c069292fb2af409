pub(crate) mod selection;
pub(crate) mod sequencer;
pub(crate) mod tweenable;
