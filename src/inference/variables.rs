//! Arena of variable marginals for one factor graph

use crate::inference::gaussian::Gaussian;

/// Handle to a variable in a `VariableStore`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(usize);

impl VariableId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for VariableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Current marginal belief of every latent variable in a graph
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    marginals: Vec<Gaussian>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable with the given initial belief
    pub fn allocate(&mut self, initial: Gaussian) -> VariableId {
        self.marginals.push(initial);
        VariableId(self.marginals.len() - 1)
    }

    pub fn get(&self, id: VariableId) -> Gaussian {
        self.marginals[id.0]
    }

    /// Replace a marginal, returning how far it moved
    pub fn set(&mut self, id: VariableId, belief: Gaussian) -> f64 {
        let old = std::mem::replace(&mut self.marginals[id.0], belief);
        old.delta(&belief)
    }

    pub fn len(&self) -> usize {
        self.marginals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marginals.is_empty()
    }
}
