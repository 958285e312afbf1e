use serde::Serialize;

use crate::solver::recreate::recreate_params::RecreateParams;
use crate::solver::recreate::recreate_strategy::RecreateStrategy;
use crate::solver::ruin::ruin_params::RuinParams;
use crate::solver::ruin::ruin_strategy::RuinStrategy;

#[derive(Debug, Clone, Copy, Serialize)]
pub enum AcceptorStrategy {
    RecordToRecord {
        start_threshold: f64,
        end_threshold: f64,
        /// Iterations per decay cycle; `None` decays once over the whole
        /// budget.
        restart_interval: Option<usize>,
    },
    Greedy,
}

#[derive(Debug, Clone, Serialize)]
pub struct SolverParams {
    pub iterations: usize,
    pub seed: u64,

    pub ruin: RuinParams,
    pub recreate: RecreateParams,

    pub ruin_strategies: Vec<RuinStrategy>,
    pub recreate_strategies: Vec<RecreateStrategy>,

    pub acceptor: AcceptorStrategy,

    /// Blend factor between the previous weight and the segment's average
    /// score when updating operator weights.
    pub alns_reaction_factor: f64,
    pub alns_segment_iterations: usize,
    pub alns_best_factor: f64,
    pub alns_improvement_factor: f64,
    pub alns_accepted_factor: f64,
    pub alns_rejected_factor: f64,

    /// Probability of running local search on a candidate; new bests are
    /// always polished.
    pub local_search_probability: f64,
    pub max_sequencing_customers: usize,
    pub num_blocks: usize,
}

impl Default for SolverParams {
    fn default() -> Self {
        SolverParams {
            iterations: 25_000,
            seed: 2_427_121,

            ruin: RuinParams::default(),
            recreate: RecreateParams::default(),

            ruin_strategies: RuinStrategy::all(),
            recreate_strategies: RecreateStrategy::all(),

            acceptor: AcceptorStrategy::RecordToRecord {
                start_threshold: 200.0,
                end_threshold: 1.0,
                restart_interval: None,
            },

            alns_reaction_factor: 0.2,
            alns_segment_iterations: 100,
            alns_best_factor: 25.0,
            alns_improvement_factor: 5.0,
            alns_accepted_factor: 1.0,
            alns_rejected_factor: 1.0,

            local_search_probability: 0.1,
            max_sequencing_customers: 10,
            num_blocks: 4,
        }
    }
}
