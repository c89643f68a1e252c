//! Rating calculator trait
//!
//! This module defines the interface callers program against; the TrueSkill
//! engine in `trueskill` is its implementation.

use crate::error::Result;
use crate::types::{MatchResult, Rating, Team, TeamMatchResult};

/// Trait for rating models that update skills from ranked match results
pub trait RatingCalculator: Send + Sync {
    /// Posterior ratings for teams ranked best to worst
    ///
    /// # Arguments
    /// * `teams` - Entrants in finishing order, each with one or more players
    /// * `draws` - `draws[k]` is true if entrants `k` and `k + 1` tied
    fn adjust_team_skills(&self, teams: &[Team], draws: &[bool]) -> Result<TeamMatchResult>;

    /// Posterior ratings for individual players ranked best to worst
    fn adjust_skills(&self, players: &[Rating], draws: &[bool]) -> Result<MatchResult> {
        let teams: Vec<Team> = players.iter().map(|rating| vec![*rating]).collect();
        self.adjust_team_skills(&teams, draws).map(MatchResult::from)
    }

    /// Likelihood of a draw between exactly two entrants, in [0, 1]
    fn match_quality(&self, ratings: &[Rating]) -> Result<f64>;

    /// Probability that `team_a`'s total performance exceeds `team_b`'s
    fn win_probability(&self, team_a: &[Rating], team_b: &[Rating]) -> Result<f64>;

    /// Rating for a player with no history
    fn initial_rating(&self) -> Rating;

    /// Single scalar for leaderboard ordering
    fn conservative_skill(&self, rating: &Rating) -> f64;

    /// Indices of `ratings` from highest to lowest conservative skill
    fn leaderboard(&self, ratings: &[Rating]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..ratings.len()).collect();
        order.sort_by(|&a, &b| {
            self.conservative_skill(&ratings[b])
                .total_cmp(&self.conservative_skill(&ratings[a]))
        });
        order
    }

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}
