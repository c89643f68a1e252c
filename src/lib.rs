//! Factor Skill - TrueSkill ratings via belief propagation
//!
//! This crate updates Gaussian skill beliefs for players and teams after a
//! ranked match (draws included) by running message passing over a small
//! factor graph, and derives match quality and win probability from the
//! same model.

pub mod config;
pub mod error;
pub mod inference;
pub mod rating;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Result, SkillError};
pub use types::*;

// Re-export key components
pub use config::{ConvergenceSettings, TrueSkillConfig};
pub use rating::{RatingCalculator, TrueSkillCalculator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
