//! Shared fixtures for integration testing

#![allow(dead_code)]

use factor_skill::{Rating, Team, TrueSkillCalculator, TrueSkillConfig};

/// Calculator with the standard parameters and 10% draws
pub fn calculator() -> TrueSkillCalculator {
    TrueSkillCalculator::new(TrueSkillConfig::default())
}

/// Calculator with the standard parameters and the given draw percentage
pub fn calculator_with_draws(percent: f64) -> TrueSkillCalculator {
    TrueSkillCalculator::new(TrueSkillConfig::new_default(percent).unwrap())
}

/// `count` players with the default rating
pub fn default_players(count: usize) -> Vec<Rating> {
    vec![Rating::default(); count]
}

/// `teams` teams of `size` default-rated players each
pub fn default_teams(teams: usize, size: usize) -> Vec<Team> {
    (0..teams).map(|_| vec![Rating::default(); size]).collect()
}

/// Assert a rating matches a published reference within `tolerance`
pub fn assert_rating_close(actual: &Rating, mu: f64, sigma: f64, tolerance: f64) {
    assert!(
        (actual.mu - mu).abs() < tolerance,
        "mu {} differs from expected {}",
        actual.mu,
        mu
    );
    assert!(
        (actual.sigma - sigma).abs() < tolerance,
        "sigma {} differs from expected {}",
        actual.sigma,
        sigma
    );
}
