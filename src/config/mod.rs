//! Configuration for the rating engine and the command-line tool
//!
//! The model parameters live in `rating`; `app` layers environment-driven
//! settings on top for `skill-calc`.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ModelSettings};
pub use rating::{
    ConvergenceSettings, TrueSkillConfig, DEFAULT_BETA, DEFAULT_DRAW_PROBABILITY_PERCENT,
    DEFAULT_MU, DEFAULT_SIGMA, DEFAULT_TAU,
};
