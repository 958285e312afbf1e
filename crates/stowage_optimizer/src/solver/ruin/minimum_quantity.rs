use rand::Rng;

use crate::solver::ruin::ruin_context::RuinContext;
use crate::solver::ruin::ruin_solution::RuinSolution;
use crate::solver::ruin::selection::skewed_selection;
use crate::solver::solution::Solution;

/// Removes customers with small total quantity (demand + pickup) first.
/// Small customers fit almost anywhere, so they are the cheapest to park
/// elsewhere when repair reshuffles the routes.
pub struct MinimumQuantity;

impl RuinSolution for MinimumQuantity {
    fn ruin_solution<R>(&self, solution: &mut Solution, context: RuinContext<R>)
    where
        R: Rng,
    {
        let by_quantity = context.instance.customers_by_quantity();

        for position in skewed_selection(context.rng, by_quantity.len(), context.num_to_remove)
        {
            // Position 0 is most likely and maps to the smallest quantity.
            solution.remove_customer(context.instance, by_quantity[position]);
        }

        solution.remove_empty_routes();
    }
}
