//! Policies used by the dice learner
//!
//! Selection policies decide how many dice to roll from a score pair and the
//! statistics gathered so far.

pub mod selection;

pub use selection::{SelectionPolicy, SmoothedBestPolicy, UniformPolicy};
