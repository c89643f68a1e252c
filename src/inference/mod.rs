//! Belief propagation over the per-match factor graph
//!
//! This module provides the Gaussian belief type, the variable arena, the
//! fixed set of factor kinds, the message schedule, and the graph that ties
//! them together for one match.

pub mod factors;
pub mod gaussian;
pub mod graph;
pub mod schedule;
pub mod truncation;
pub mod variables;

// Re-export commonly used types
pub use factors::{Factor, FactorKind, Outcome};
pub use gaussian::Gaussian;
pub use graph::FactorGraph;
pub use schedule::{Schedule, ScheduleReport, Step};
pub use variables::{VariableId, VariableStore};
