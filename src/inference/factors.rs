//! Factor kinds of the skill graph and their message updates
//!
//! Every factor remembers the last message it sent along each edge. An
//! update retracts that message from the variable's marginal and multiplies
//! the new one in, so repeated updates never double-count evidence.

use crate::inference::gaussian::Gaussian;
use crate::inference::truncation::{normal_cdf, v_draw, v_win, w_draw, w_win};
use crate::inference::variables::{VariableId, VariableStore};

/// Index of a factor within its graph
pub type FactorId = usize;

/// Observed result between two adjacent entrants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The higher ranked side performed better by more than the margin
    Decisive,
    /// The two sides performed within the margin of each other
    Draw,
}

impl From<bool> for Outcome {
    fn from(is_draw: bool) -> Self {
        if is_draw {
            Outcome::Draw
        } else {
            Outcome::Decisive
        }
    }
}

/// The closed set of factors a match graph is built from
#[derive(Debug, Clone, PartialEq)]
pub enum FactorKind {
    /// Fixed belief on a skill variable. Edge 0: skill.
    Prior { belief: Gaussian },
    /// performance = skill + N(0, variance). Edge 0: performance, edge 1: skill.
    Likelihood { variance: f64 },
    /// sum = Σ coefficients[i] · term[i]. Edge 0: sum, edge i + 1: term i.
    Sum { coefficients: Vec<f64> },
    /// Truncates a performance difference to the observed outcome.
    /// Edge 0: difference.
    Comparison { margin: f64, outcome: Outcome },
}

#[derive(Debug, Clone)]
pub struct Factor {
    kind: FactorKind,
    variables: Vec<VariableId>,
    messages: Vec<Gaussian>,
}

impl Factor {
    fn with_edges(kind: FactorKind, variables: Vec<VariableId>) -> Self {
        let messages = vec![Gaussian::UNIFORM; variables.len()];
        Self {
            kind,
            variables,
            messages,
        }
    }

    pub fn prior(skill: VariableId, belief: Gaussian) -> Self {
        Self::with_edges(FactorKind::Prior { belief }, vec![skill])
    }

    pub fn likelihood(performance: VariableId, skill: VariableId, variance: f64) -> Self {
        Self::with_edges(
            FactorKind::Likelihood { variance },
            vec![performance, skill],
        )
    }

    pub fn sum(sum: VariableId, terms: &[VariableId], coefficients: Vec<f64>) -> Self {
        debug_assert_eq!(terms.len(), coefficients.len());
        let mut variables = Vec::with_capacity(terms.len() + 1);
        variables.push(sum);
        variables.extend_from_slice(terms);
        Self::with_edges(FactorKind::Sum { coefficients }, variables)
    }

    pub fn comparison(difference: VariableId, margin: f64, outcome: Outcome) -> Self {
        Self::with_edges(
            FactorKind::Comparison { margin, outcome },
            vec![difference],
        )
    }

    pub fn kind(&self) -> &FactorKind {
        &self.kind
    }

    pub fn variables(&self) -> &[VariableId] {
        &self.variables
    }

    pub fn messages(&self) -> &[Gaussian] {
        &self.messages
    }

    /// Belief on an edge's variable excluding this factor's own message
    fn cavity(&self, edge: usize, store: &VariableStore) -> Gaussian {
        store.get(self.variables[edge]) / self.messages[edge]
    }

    /// Recompute the message along `edge` and fold it into that variable's
    /// marginal. Returns how far the marginal moved.
    pub fn update(&mut self, edge: usize, store: &mut VariableStore) -> f64 {
        let message = match &self.kind {
            FactorKind::Prior { belief } => *belief,
            FactorKind::Likelihood { variance } => {
                let incoming = self.cavity(1 - edge, store);
                let a = 1.0 / (1.0 + variance * incoming.precision());
                Gaussian::from_precision(a * incoming.precision(), a * incoming.precision_mean())
            }
            FactorKind::Sum { coefficients } => self.sum_message(coefficients, edge, store),
            FactorKind::Comparison { margin, outcome } => {
                let cavity = self.cavity(edge, store);
                if cavity.precision() <= 0.0 {
                    // Nothing has reached the difference yet
                    return 0.0;
                }
                truncate(cavity, *margin, *outcome) / cavity
            }
        };

        self.send(edge, message, store)
    }

    fn send(&mut self, edge: usize, message: Gaussian, store: &mut VariableStore) -> f64 {
        let variable = self.variables[edge];
        let marginal = store.get(variable) / self.messages[edge] * message;
        self.messages[edge] = message;
        store.set(variable, marginal)
    }

    fn sum_message(&self, coefficients: &[f64], edge: usize, store: &VariableStore) -> Gaussian {
        // Rewrite the linear relation with the target variable on the left
        let weighted: Vec<(f64, usize)> = if edge == 0 {
            coefficients
                .iter()
                .enumerate()
                .map(|(i, &c)| (c, i + 1))
                .collect()
        } else {
            let own = coefficients[edge - 1];
            std::iter::once((1.0 / own, 0))
                .chain(
                    coefficients
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| i + 1 != edge)
                        .map(|(i, &c)| (-c / own, i + 1)),
                )
                .collect()
        };

        let mut variance = 0.0;
        let mut mean = 0.0;
        for (weight, source) in weighted {
            let incoming = self.cavity(source, store);
            if incoming.precision() <= 0.0 {
                return Gaussian::UNIFORM;
            }
            variance += weight * weight / incoming.precision();
            mean += weight * incoming.mean();
        }

        let precision = 1.0 / variance;
        Gaussian::from_precision(precision, precision * mean)
    }

    /// This factor's contribution to the graph's log evidence, given the
    /// converged marginals
    pub fn log_normalization(&self, store: &VariableStore) -> f64 {
        match &self.kind {
            FactorKind::Prior { .. } => 0.0,
            FactorKind::Likelihood { .. } => {
                Gaussian::log_ratio_normalization(&store.get(self.variables[0]), &self.messages[0])
            }
            FactorKind::Sum { .. } => (1..self.variables.len())
                .map(|edge| {
                    Gaussian::log_ratio_normalization(
                        &store.get(self.variables[edge]),
                        &self.messages[edge],
                    )
                })
                .sum(),
            FactorKind::Comparison { margin, outcome } => {
                let message = self.messages[0];
                let cavity = self.cavity(0, store);
                let mean = cavity.mean();
                let std_dev = cavity.std_dev();
                let retained = match outcome {
                    Outcome::Decisive => normal_cdf((mean - margin) / std_dev),
                    Outcome::Draw => {
                        normal_cdf((margin - mean) / std_dev)
                            - normal_cdf((-margin - mean) / std_dev)
                    }
                };
                if retained <= 0.0 {
                    // The observed outcome is impossible under the cavity
                    return f64::NEG_INFINITY;
                }
                -Gaussian::log_product_normalization(&cavity, &message) + retained.ln()
            }
        }
    }
}

/// Moment-matched marginal of `cavity` truncated to the observed outcome
fn truncate(cavity: Gaussian, margin: f64, outcome: Outcome) -> Gaussian {
    let sqrt_pi = cavity.precision().sqrt();
    let t = cavity.precision_mean() / sqrt_pi;
    let e = margin * sqrt_pi;

    let (v, w) = match outcome {
        Outcome::Decisive => (v_win(t, e), w_win(t, e)),
        Outcome::Draw => (v_draw(t, e), w_draw(t, e)),
    };

    let denom = 1.0 - w;
    Gaussian::from_precision(
        cavity.precision() / denom,
        (cavity.precision_mean() + sqrt_pi * v) / denom,
    )
}
