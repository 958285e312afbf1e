pub mod greedy_insertion;
pub mod near_best_insertion;
pub mod random_insertion;
pub mod recreate_context;
pub mod recreate_params;
pub mod recreate_solution;
pub mod recreate_strategy;

pub use recreate_context::RecreateContext;
pub use recreate_params::RecreateParams;
pub use recreate_solution::RecreateSolution;
pub use recreate_strategy::RecreateStrategy;
