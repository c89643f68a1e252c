//! Rating system using TrueSkill
//!
//! This module provides the rating calculator interface and the TrueSkill
//! engine behind it.

pub mod calculator;
pub mod trueskill;

// Re-export commonly used types
pub use calculator::RatingCalculator;
pub use trueskill::TrueSkillCalculator;
