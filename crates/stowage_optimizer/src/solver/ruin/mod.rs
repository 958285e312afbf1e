pub mod minimum_quantity;
pub mod random_customers;
pub mod random_routes;
pub mod related;
pub mod ruin_context;
pub mod ruin_params;
pub mod ruin_solution;
pub mod ruin_strategy;
pub mod selection;
pub mod worst;

pub use ruin_context::RuinContext;
pub use ruin_params::RuinParams;
pub use ruin_solution::RuinSolution;
pub use ruin_strategy::RuinStrategy;
