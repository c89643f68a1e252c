//! Command-line tool configuration
//!
//! Settings for `skill-calc`, loaded from environment variables with
//! fallback to the model defaults.

use crate::config::rating::{
    ConvergenceSettings, TrueSkillConfig, DEFAULT_BETA, DEFAULT_DRAW_PROBABILITY_PERCENT,
    DEFAULT_MU, DEFAULT_SIGMA, DEFAULT_TAU,
};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub model: ModelSettings,
    pub convergence: ConvergenceSettings,
}

/// Raw model parameters before validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    pub mu: f64,
    pub sigma: f64,
    pub beta: f64,
    pub tau: f64,
    /// Draw probability in percent
    pub draw_probability_percent: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            model: ModelSettings::default(),
            convergence: ConvergenceSettings::default(),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            mu: DEFAULT_MU,
            sigma: DEFAULT_SIGMA,
            beta: DEFAULT_BETA,
            tau: DEFAULT_TAU,
            draw_probability_percent: DEFAULT_DRAW_PROBABILITY_PERCENT,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| anyhow!("Invalid {} value: {}", name, value)),
        Err(_) => Ok(None),
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.log_level = log_level;
        }

        // Model settings
        if let Some(mu) = parse_var("TRUESKILL_MU")? {
            config.model.mu = mu;
        }
        if let Some(sigma) = parse_var("TRUESKILL_SIGMA")? {
            config.model.sigma = sigma;
        }
        if let Some(beta) = parse_var("TRUESKILL_BETA")? {
            config.model.beta = beta;
        }
        if let Some(tau) = parse_var("TRUESKILL_TAU")? {
            config.model.tau = tau;
        }
        if let Some(draw) = parse_var("TRUESKILL_DRAW_PROBABILITY")? {
            config.model.draw_probability_percent = draw;
        }

        // Convergence settings
        if let Some(passes) = parse_var("TRUESKILL_MAX_PASSES")? {
            config.convergence.max_passes = passes;
        }
        if let Some(delta) = parse_var("TRUESKILL_MAX_DELTA")? {
            config.convergence.max_delta = delta;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Build the validated model configuration
    pub fn trueskill_config(&self) -> Result<TrueSkillConfig> {
        let model = &self.model;
        TrueSkillConfig::new(
            model.mu,
            model.sigma,
            model.beta,
            model.tau,
            model.draw_probability_percent,
        )
        .map_err(|e| anyhow!("Invalid model configuration: {}", e))
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.log_level)),
    }

    config.trueskill_config()?;
    config
        .convergence
        .validate()
        .map_err(|e| anyhow!("Invalid convergence settings: {}", e))?;

    Ok(())
}
