use rand::Rng;

use crate::solver::ruin::ruin_context::RuinContext;
use crate::solver::solution::Solution;

pub trait RuinSolution {
    fn ruin_solution<R>(&self, solution: &mut Solution, context: RuinContext<R>)
    where
        R: Rng;
}
