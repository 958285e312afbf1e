use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RecreateParams {
    /// How many of the cheapest feasible insertions the perturbed variant
    /// samples from. 1 degenerates to plain greedy.
    pub near_best_k: usize,
}

impl Default for RecreateParams {
    fn default() -> Self {
        RecreateParams { near_best_k: 3 }
    }
}
