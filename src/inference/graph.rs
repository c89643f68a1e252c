//! Factor graph for a single match
//!
//! Layout, top to bottom:
//!
//! ```text
//! skill_i      <- Prior (rating widened by tau)
//! perf_i       <- Likelihood (skill_i, beta²)
//! team_t       <- Sum (members' perf, unit coefficients)
//! diff_k       <- Sum (team_k - team_{k+1})
//!              <- Comparison (diff_k, margin, outcome_k)
//! ```
//!
//! A graph owns its variables and factors and is dropped once the ratings
//! have been read back.

use crate::config::{ConvergenceSettings, TrueSkillConfig};
use crate::error::{Result, SkillError};
use crate::inference::factors::{Factor, FactorId, Outcome};
use crate::inference::gaussian::Gaussian;
use crate::inference::schedule::{Schedule, ScheduleReport, Step};
use crate::inference::variables::{VariableId, VariableStore};
use crate::types::Team;

#[derive(Debug, Clone)]
pub struct FactorGraph {
    variables: VariableStore,
    factors: Vec<Factor>,
    schedule: Schedule,
    /// Skill variable of every member, grouped by team
    skills: Vec<Vec<VariableId>>,
}

/// Reject matches the graph cannot represent
pub fn validate_match(config: &TrueSkillConfig, teams: &[Team], draws: &[bool]) -> Result<()> {
    if teams.len() < 2 {
        return Err(SkillError::MalformedMatch {
            reason: format!("at least two entrants required, got {}", teams.len()),
        });
    }

    if draws.len() != teams.len() - 1 {
        return Err(SkillError::MalformedMatch {
            reason: format!(
                "expected {} draw flags for {} entrants, got {}",
                teams.len() - 1,
                teams.len(),
                draws.len()
            ),
        });
    }

    if let Some(index) = teams.iter().position(|team| team.is_empty()) {
        return Err(SkillError::MalformedMatch {
            reason: format!("entrant {} has no players", index),
        });
    }

    teams
        .iter()
        .flatten()
        .try_for_each(|rating| config.validate_rating(rating))
}

impl FactorGraph {
    /// Build the graph for `teams`, ranked best to worst, where `draws[k]`
    /// says whether teams `k` and `k + 1` tied.
    pub fn build(config: &TrueSkillConfig, teams: &[Team], draws: &[bool]) -> Result<Self> {
        validate_match(config, teams, draws)?;

        let mut variables = VariableStore::new();
        let mut factors = Vec::new();
        let mut push = |factor: Factor| -> FactorId {
            factors.push(factor);
            factors.len() - 1
        };

        let tau_squared = config.tau() * config.tau();
        let beta_squared = config.beta() * config.beta();

        let mut skills = Vec::with_capacity(teams.len());
        let mut priors = Vec::new();
        let mut likelihoods = Vec::new();
        let mut team_sums = Vec::with_capacity(teams.len());
        let mut team_performances = Vec::with_capacity(teams.len());

        for team in teams {
            let mut team_skills = Vec::with_capacity(team.len());
            let mut performances = Vec::with_capacity(team.len());

            for rating in team {
                let skill = variables.allocate(Gaussian::UNIFORM);
                let widened = (rating.variance() + tau_squared).sqrt();
                priors.push(push(Factor::prior(
                    skill,
                    Gaussian::from_mean_std_dev(rating.mu, widened),
                )));

                let performance = variables.allocate(Gaussian::UNIFORM);
                likelihoods.push(push(Factor::likelihood(performance, skill, beta_squared)));

                team_skills.push(skill);
                performances.push(performance);
            }

            let team_performance = variables.allocate(Gaussian::UNIFORM);
            team_sums.push(push(Factor::sum(
                team_performance,
                &performances,
                vec![1.0; performances.len()],
            )));

            skills.push(team_skills);
            team_performances.push(team_performance);
        }

        let mut differences = Vec::with_capacity(draws.len());
        let mut comparisons = Vec::with_capacity(draws.len());
        for (k, &is_draw) in draws.iter().enumerate() {
            let difference = variables.allocate(Gaussian::UNIFORM);
            differences.push(push(Factor::sum(
                difference,
                &[team_performances[k], team_performances[k + 1]],
                vec![1.0, -1.0],
            )));

            let margin = config.draw_margin(teams[k].len() + teams[k + 1].len());
            comparisons.push(push(Factor::comparison(
                difference,
                margin,
                Outcome::from(is_draw),
            )));
        }

        let repeat = differences.len() > 1 || teams.iter().any(|team| team.len() > 1);
        let schedule = build_schedule(
            &priors,
            &likelihoods,
            &team_sums,
            &teams.iter().map(|team| team.len()).collect::<Vec<_>>(),
            &differences,
            &comparisons,
            repeat,
        );

        Ok(Self {
            variables,
            factors,
            schedule,
            skills,
        })
    }

    /// Propagate messages until the schedule terminates
    pub fn run(&mut self, settings: &ConvergenceSettings) -> ScheduleReport {
        let Self {
            variables,
            factors,
            schedule,
            ..
        } = self;

        schedule.run(settings, |step| {
            factors[step.factor].update(step.edge, variables)
        })
    }

    /// Current skill beliefs, grouped as the teams were submitted
    pub fn skill_beliefs(&self) -> Vec<Vec<Gaussian>> {
        self.skills
            .iter()
            .map(|team| team.iter().map(|&id| self.variables.get(id)).collect())
            .collect()
    }

    /// Log of the probability the model assigns to the observed outcome.
    ///
    /// Every factor's own normalization term is summed first; a comparison
    /// that retains no mass makes the whole outcome `-inf`. Every message is
    /// then multiplied onto a fresh set of uniform marginals, accumulating
    /// the normalizer of each product.
    pub fn log_normalization(&self) -> f64 {
        let mut log_z = 0.0;
        for factor in &self.factors {
            let term = factor.log_normalization(&self.variables);
            if term == f64::NEG_INFINITY {
                return f64::NEG_INFINITY;
            }
            log_z += term;
        }

        let mut fresh = vec![Gaussian::UNIFORM; self.variables.len()];
        for factor in &self.factors {
            for (id, message) in factor.variables().iter().zip(factor.messages()) {
                let marginal = &mut fresh[id.index()];
                log_z += Gaussian::log_product_normalization(marginal, message);
                *marginal = *marginal * *message;
            }
        }

        log_z
    }

    /// Probability of the observed outcome under the model
    pub fn outcome_probability(&self) -> f64 {
        self.log_normalization().exp()
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn factor_count(&self) -> usize {
        self.factors.len()
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }
}

/// Order updates down the graph, around the comparisons, and back up.
///
/// With several comparisons the pass sweeps forward over all but the last
/// difference, sending each result to the lower ranked team, then backward
/// over all but the first, sending each result to the higher ranked team.
fn build_schedule(
    priors: &[FactorId],
    likelihoods: &[FactorId],
    team_sums: &[FactorId],
    team_sizes: &[usize],
    differences: &[FactorId],
    comparisons: &[FactorId],
    repeat: bool,
) -> Schedule {
    let prelude: Vec<Step> = priors
        .iter()
        .chain(likelihoods)
        .chain(team_sums)
        .map(|&factor| Step::new(factor, 0))
        .collect();

    let mut pass = Vec::new();
    if differences.len() == 1 {
        pass.push(Step::new(differences[0], 0));
        pass.push(Step::new(comparisons[0], 0));
    } else {
        let last = differences.len() - 1;
        for k in 0..last {
            pass.push(Step::new(differences[k], 0));
            pass.push(Step::new(comparisons[k], 0));
            pass.push(Step::new(differences[k], 2));
        }
        for k in (1..=last).rev() {
            pass.push(Step::new(differences[k], 0));
            pass.push(Step::new(comparisons[k], 0));
            pass.push(Step::new(differences[k], 1));
        }
    }

    let mut epilogue = vec![
        Step::new(differences[0], 1),
        Step::new(differences[differences.len() - 1], 2),
    ];
    for (&factor, &size) in team_sums.iter().zip(team_sizes) {
        epilogue.extend((1..=size).map(|edge| Step::new(factor, edge)));
    }
    epilogue.extend(likelihoods.iter().map(|&factor| Step::new(factor, 1)));

    Schedule::new(prelude, pass, repeat, epilogue)
}
