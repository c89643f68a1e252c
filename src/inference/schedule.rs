//! Message schedule: an explicit, ordered list of factor updates
//!
//! A schedule has three phases. The prelude runs once and pushes prior
//! information down to the comparisons, the pass is repeated until the
//! largest belief change in a pass drops to the threshold (or the pass cap
//! is hit), and the epilogue pushes the result back up to the skills.

use crate::config::ConvergenceSettings;
use crate::inference::factors::FactorId;
use serde::Serialize;

/// "Update factor `factor` toward the variable on its edge `edge`"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub factor: FactorId,
    pub edge: usize,
}

impl Step {
    pub fn new(factor: FactorId, edge: usize) -> Self {
        Self { factor, edge }
    }
}

/// Outcome of running a schedule once
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScheduleReport {
    /// Passes executed in the repeated phase
    pub passes: usize,
    /// Largest belief change seen in the final pass
    pub last_delta: f64,
    /// Whether the final pass was within the threshold
    pub converged: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Schedule {
    prelude: Vec<Step>,
    pass: Vec<Step>,
    repeat: bool,
    epilogue: Vec<Step>,
}

impl Schedule {
    pub fn new(prelude: Vec<Step>, pass: Vec<Step>, repeat: bool, epilogue: Vec<Step>) -> Self {
        Self {
            prelude,
            pass,
            repeat,
            epilogue,
        }
    }

    /// Whether the pass phase loops until convergence
    pub fn repeats(&self) -> bool {
        self.repeat
    }

    pub fn len(&self) -> usize {
        self.prelude.len() + self.pass.len() + self.epilogue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Execute every step through `apply`, which performs the update and
    /// returns the belief change it caused.
    pub fn run<F>(&self, settings: &ConvergenceSettings, mut apply: F) -> ScheduleReport
    where
        F: FnMut(Step) -> f64,
    {
        for step in &self.prelude {
            apply(*step);
        }

        let max_passes = if self.repeat { settings.max_passes } else { 1 };
        let mut passes = 0;
        let mut last_delta = 0.0_f64;
        while passes < max_passes {
            last_delta = self
                .pass
                .iter()
                .fold(0.0_f64, |delta, step| delta.max(apply(*step)));
            passes += 1;

            if last_delta <= settings.max_delta {
                break;
            }
        }

        for step in &self.epilogue {
            apply(*step);
        }

        ScheduleReport {
            passes,
            last_delta,
            converged: !self.repeat || last_delta <= settings.max_delta,
        }
    }
}
