use rand::Rng;

use crate::solver::recreate::recreate_context::RecreateContext;
use crate::solver::solution::Solution;

/// Recreate operators drain the unassigned pool completely: opening a fresh
/// single-customer route is always available as a fallback, so they never
/// fail.
pub trait RecreateSolution {
    fn recreate_solution<R>(&self, solution: &mut Solution, context: RecreateContext<R>)
    where
        R: Rng;
}
