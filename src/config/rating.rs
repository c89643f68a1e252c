//! Rating model configuration
//!
//! `TrueSkillConfig` carries the five model parameters and is immutable once
//! built, so a single value can back any number of concurrent calculations.

use crate::error::{Result, SkillError};
use crate::inference::truncation::inverse_normal_cdf;
use crate::types::Rating;
use serde::{Deserialize, Serialize};

/// Default mean of a new player's skill
pub const DEFAULT_MU: f64 = 25.0;
/// Default standard deviation of a new player's skill
pub const DEFAULT_SIGMA: f64 = DEFAULT_MU / 3.0;
/// Default performance noise (one skill class width)
pub const DEFAULT_BETA: f64 = DEFAULT_SIGMA * 0.5;
/// Default additive dynamics factor
pub const DEFAULT_TAU: f64 = DEFAULT_SIGMA * 0.01;
/// Default draw probability, in percent
pub const DEFAULT_DRAW_PROBABILITY_PERCENT: f64 = 10.0;

/// Parameters of the TrueSkill model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TrueSkillConfigRepr")]
pub struct TrueSkillConfig {
    mu: f64,
    sigma: f64,
    beta: f64,
    tau: f64,
    /// Stored as a fraction in [0, 1]
    draw_probability: f64,
}

/// Unvalidated wire form; deserialization goes through `TrueSkillConfig::from_fraction`
#[derive(Deserialize)]
struct TrueSkillConfigRepr {
    mu: f64,
    sigma: f64,
    beta: f64,
    tau: f64,
    draw_probability: f64,
}

impl TryFrom<TrueSkillConfigRepr> for TrueSkillConfig {
    type Error = SkillError;

    fn try_from(repr: TrueSkillConfigRepr) -> Result<Self> {
        Self::from_fraction(
            repr.mu,
            repr.sigma,
            repr.beta,
            repr.tau,
            repr.draw_probability,
        )
    }
}

impl Default for TrueSkillConfig {
    fn default() -> Self {
        Self {
            mu: DEFAULT_MU,
            sigma: DEFAULT_SIGMA,
            beta: DEFAULT_BETA,
            tau: DEFAULT_TAU,
            draw_probability: DEFAULT_DRAW_PROBABILITY_PERCENT / 100.0,
        }
    }
}

impl TrueSkillConfig {
    /// Create a configuration; the draw probability is given in percent
    pub fn new(
        mu: f64,
        sigma: f64,
        beta: f64,
        tau: f64,
        draw_probability_percent: f64,
    ) -> Result<Self> {
        // Written so that NaN fails the range check too
        if !(0.0..=100.0).contains(&draw_probability_percent) {
            return Err(SkillError::DrawProbabilityOutOfRange {
                percentage: draw_probability_percent,
            });
        }

        Self::from_fraction(mu, sigma, beta, tau, draw_probability_percent / 100.0)
    }

    /// Standard parameters (mu = 25, sigma = mu / 3, beta = sigma / 2,
    /// tau = sigma / 100) with the given draw probability in percent
    pub fn new_default(draw_probability_percent: f64) -> Result<Self> {
        Self::new(
            DEFAULT_MU,
            DEFAULT_SIGMA,
            DEFAULT_BETA,
            DEFAULT_TAU,
            draw_probability_percent,
        )
    }

    fn from_fraction(
        mu: f64,
        sigma: f64,
        beta: f64,
        tau: f64,
        draw_probability: f64,
    ) -> Result<Self> {
        let config = Self {
            mu,
            sigma,
            beta,
            tau,
            draw_probability,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.draw_probability) {
            return Err(SkillError::DrawProbabilityOutOfRange {
                percentage: self.draw_probability * 100.0,
            });
        }

        if !self.mu.is_finite() {
            return Err(SkillError::InvalidParameter {
                name: "mu",
                value: self.mu,
            });
        }

        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(SkillError::InvalidParameter {
                name: "sigma",
                value: self.sigma,
            });
        }

        if !(self.beta.is_finite() && self.beta > 0.0) {
            return Err(SkillError::InvalidParameter {
                name: "beta",
                value: self.beta,
            });
        }

        if !(self.tau.is_finite() && self.tau >= 0.0) {
            return Err(SkillError::InvalidParameter {
                name: "tau",
                value: self.tau,
            });
        }

        Ok(())
    }

    /// Reject a rating that cannot serve as a skill belief: the mean must be
    /// finite, and the standard deviation finite and non-negative with a
    /// positive variance once widened by tau.
    pub fn validate_rating(&self, rating: &Rating) -> Result<()> {
        if !rating.mu.is_finite() {
            return Err(SkillError::InvalidParameter {
                name: "rating mu",
                value: rating.mu,
            });
        }

        let widened = rating.variance() + self.tau * self.tau;
        if !(rating.sigma.is_finite() && rating.sigma >= 0.0 && widened > 0.0) {
            return Err(SkillError::InvalidParameter {
                name: "rating sigma",
                value: rating.sigma,
            });
        }

        Ok(())
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }

    /// Draw probability as a fraction in [0, 1]
    pub fn draw_probability(&self) -> f64 {
        self.draw_probability
    }

    /// Half-width of the performance difference counted as a draw, for a
    /// comparison involving `player_count` players in total.
    ///
    /// A draw probability of 100% would put the margin at infinity; the
    /// quantile is taken just below 1 so the margin stays finite.
    pub fn draw_margin(&self, player_count: usize) -> f64 {
        if self.draw_probability <= 0.0 {
            return 0.0;
        }

        let quantile = ((self.draw_probability + 1.0) / 2.0).min(1.0 - f64::EPSILON);
        inverse_normal_cdf(quantile) * (player_count as f64).sqrt() * self.beta
    }
}

/// Stopping rule for the looped part of the message schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceSettings {
    /// A pass whose largest belief change is at or below this ends the loop
    pub max_delta: f64,
    /// Upper bound on loop passes; reaching it is not an error
    pub max_passes: usize,
}

impl Default for ConvergenceSettings {
    fn default() -> Self {
        Self {
            max_delta: 1e-4,
            max_passes: 100,
        }
    }
}

impl ConvergenceSettings {
    pub fn validate(&self) -> Result<()> {
        if !(self.max_delta.is_finite() && self.max_delta >= 0.0) {
            return Err(SkillError::InvalidParameter {
                name: "max_delta",
                value: self.max_delta,
            });
        }

        if self.max_passes == 0 {
            return Err(SkillError::InvalidParameter {
                name: "max_passes",
                value: 0.0,
            });
        }

        Ok(())
    }
}
