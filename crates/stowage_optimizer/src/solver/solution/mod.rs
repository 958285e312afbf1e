pub mod persistence;
pub mod route;
pub mod solution;
pub mod stack;
pub mod stack_set;

pub use route::Route;
pub use solution::Solution;
pub use stack::Stack;
pub use stack_set::StackSet;

/// Tolerance used by capacity and cost comparisons. Instance volumes come
/// from text files with a handful of decimals, so this is far below anything
/// meaningful in the data.
pub const EPSILON: f64 = 1e-9;
