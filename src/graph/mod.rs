pub(crate) mod address;
pub(crate) mod builder;
pub(crate) mod heuristics;
pub(crate) mod node;
