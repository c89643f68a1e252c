//! TrueSkill rating engine
//!
//! Match updates go through a freshly built factor graph; match quality,
//! win probability and conservative skill are closed-form arithmetic on the
//! ratings themselves.

use crate::config::{ConvergenceSettings, TrueSkillConfig};
use crate::error::{Result, SkillError};
use crate::inference::truncation::normal_cdf;
use crate::inference::FactorGraph;
use crate::rating::calculator::RatingCalculator;
use crate::types::{MatchResult, Rating, Team, TeamMatchResult};
use tracing::{debug, warn};

/// TrueSkill rating calculator
///
/// Holds only immutable configuration; every call builds and discards its
/// own graph, so one calculator can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct TrueSkillCalculator {
    config: TrueSkillConfig,
    convergence: ConvergenceSettings,
}

impl TrueSkillCalculator {
    /// Create a calculator with the default convergence settings
    pub fn new(config: TrueSkillConfig) -> Self {
        Self {
            config,
            convergence: ConvergenceSettings::default(),
        }
    }

    /// Replace the convergence settings
    pub fn with_convergence(mut self, convergence: ConvergenceSettings) -> Result<Self> {
        convergence.validate()?;
        self.convergence = convergence;
        Ok(self)
    }

    pub fn trueskill_config(&self) -> &TrueSkillConfig {
        &self.config
    }

    pub fn convergence(&self) -> &ConvergenceSettings {
        &self.convergence
    }

    /// Rate players where every adjacent pair shares the same draw flag
    pub fn adjust_skills_uniform(&self, players: &[Rating], draw: bool) -> Result<MatchResult> {
        let draws = vec![draw; players.len().saturating_sub(1)];
        self.adjust_skills(players, &draws)
    }

    /// Match quality for two ratings: the draw likelihood relative to two
    /// identical players.
    pub fn match_quality_pair(&self, a: &Rating, b: &Rating) -> Result<f64> {
        self.config.validate_rating(a)?;
        self.config.validate_rating(b)?;

        let two_beta_squared = 2.0 * self.config.beta() * self.config.beta();
        let spread = two_beta_squared + a.variance() + b.variance();
        let mean_difference = a.mu - b.mu;

        Ok((two_beta_squared / spread).sqrt()
            * (-mean_difference * mean_difference / (2.0 * spread)).exp())
    }

    /// `mu - 3 sigma`, clamped to `[0, 2 mu_default]`
    pub fn true_skill(&self, rating: &Rating) -> f64 {
        let conservative = rating.mu - 3.0 * rating.sigma;
        conservative.max(0.0).min(2.0 * self.config.mu())
    }

    /// Rating for a player with no history
    pub fn new_default_player(&self) -> Rating {
        Rating::new(self.config.mu(), self.config.sigma())
    }
}

impl RatingCalculator for TrueSkillCalculator {
    fn adjust_team_skills(&self, teams: &[Team], draws: &[bool]) -> Result<TeamMatchResult> {
        let mut graph = FactorGraph::build(&self.config, teams, draws)?;
        debug!(
            "Built factor graph for {} entrants: {} variables, {} factors",
            teams.len(),
            graph.variable_count(),
            graph.factor_count()
        );

        let report = graph.run(&self.convergence);
        if report.converged {
            debug!(
                "Schedule converged after {} passes (delta {:.3e})",
                report.passes, report.last_delta
            );
        } else {
            warn!(
                "Schedule stopped after {} passes without converging (delta {:.3e})",
                report.passes, report.last_delta
            );
        }

        let teams = graph
            .skill_beliefs()
            .into_iter()
            .map(|team| team.into_iter().map(Rating::from).collect())
            .collect();

        Ok(TeamMatchResult {
            teams,
            probability: graph.outcome_probability(),
        })
    }

    fn match_quality(&self, ratings: &[Rating]) -> Result<f64> {
        match ratings {
            [a, b] => self.match_quality_pair(a, b),
            _ => Err(SkillError::UnsupportedArity {
                expected: 2,
                actual: ratings.len(),
            }),
        }
    }

    fn win_probability(&self, team_a: &[Rating], team_b: &[Rating]) -> Result<f64> {
        if team_a.is_empty() || team_b.is_empty() {
            return Err(SkillError::MalformedMatch {
                reason: "win probability needs two non-empty teams".to_string(),
            });
        }
        team_a
            .iter()
            .chain(team_b)
            .try_for_each(|rating| self.config.validate_rating(rating))?;

        let mean_difference: f64 = team_a.iter().map(|r| r.mu).sum::<f64>()
            - team_b.iter().map(|r| r.mu).sum::<f64>();
        let variance: f64 = team_a.iter().chain(team_b).map(Rating::variance).sum();
        let player_count = (team_a.len() + team_b.len()) as f64;
        let beta = self.config.beta();

        let denominator = (player_count * beta * beta + variance).sqrt();
        Ok(normal_cdf(mean_difference / denominator))
    }

    fn initial_rating(&self) -> Rating {
        self.new_default_player()
    }

    fn conservative_skill(&self, rating: &Rating) -> f64 {
        self.true_skill(rating)
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "trueskill",
            "model": self.config,
            "convergence": self.convergence,
        })
    }
}
