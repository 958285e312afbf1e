use rand::Rng;

use crate::solver::ruin::ruin_context::RuinContext;
use crate::solver::ruin::ruin_solution::RuinSolution;
use crate::solver::solution::Solution;

/// Removes whole routes until at least the requested number of customers is
/// unassigned. Usually overshoots, which is fine: repair sees more freedom.
pub struct RandomRoutes;

impl RuinSolution for RandomRoutes {
    fn ruin_solution<R>(&self, solution: &mut Solution, context: RuinContext<R>)
    where
        R: Rng,
    {
        while solution.unassigned().len() < context.num_to_remove && solution.num_routes() > 0 {
            let index = context.rng.random_range(0..solution.num_routes());

            let customers = solution.route(index).customers().to_vec();
            for customer in customers {
                solution.route_mut(index).remove_customer(context.instance, customer);
                solution.unassigned_mut().push(customer);
            }

            solution.remove_empty_routes();
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::solver::construction::initial_solution;
    use crate::solver::ruin::ruin_params::RuinParams;
    use crate::test_utils;

    #[test]
    fn removes_whole_routes() {
        let instance = test_utils::line_instance(6, 40.0, 2, 1.0, 2.0, 2.0);
        let mut solution = initial_solution(&instance);
        let mut rng = SmallRng::seed_from_u64(11);
        let params = RuinParams::default();

        RandomRoutes.ruin_solution(
            &mut solution,
            RuinContext {
                instance: &instance,
                params: &params,
                rng: &mut rng,
                num_to_remove: 2,
            },
        );

        // Single-customer routes, so exactly two removals.
        assert_eq!(solution.unassigned().len(), 2);
        assert_eq!(solution.num_routes(), 4);
    }
}
