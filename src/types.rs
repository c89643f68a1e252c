//! Common types used throughout the rating engine

use crate::inference::Gaussian;
use serde::{Deserialize, Serialize};

/// Skill belief for a single player: mean and standard deviation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub mu: f64,
    pub sigma: f64,
}

impl Rating {
    pub fn new(mu: f64, sigma: f64) -> Self {
        Self { mu, sigma }
    }

    pub fn variance(&self) -> f64 {
        self.sigma * self.sigma
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self {
            mu: crate::config::DEFAULT_MU,
            sigma: crate::config::DEFAULT_SIGMA,
        }
    }
}

impl From<Gaussian> for Rating {
    fn from(belief: Gaussian) -> Self {
        Self {
            mu: belief.mean(),
            sigma: belief.std_dev(),
        }
    }
}

impl From<Rating> for Gaussian {
    fn from(rating: Rating) -> Self {
        Gaussian::from_mean_std_dev(rating.mu, rating.sigma)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "N({:.3}, {:.3})", self.mu, self.sigma)
    }
}

/// Players competing together; their performances add up
pub type Team = Vec<Rating>;

/// Updated ratings for a match of individual players
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Posterior ratings, aligned with the submitted ranking
    pub ratings: Vec<Rating>,
    /// Probability the model assigned to the observed outcome
    pub probability: f64,
}

/// Updated ratings for a match between teams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMatchResult {
    /// Posterior ratings, aligned with the submitted teams and members
    pub teams: Vec<Team>,
    /// Probability the model assigned to the observed outcome
    pub probability: f64,
}

impl From<TeamMatchResult> for MatchResult {
    fn from(result: TeamMatchResult) -> Self {
        Self {
            ratings: result.teams.into_iter().flatten().collect(),
            probability: result.probability,
        }
    }
}
