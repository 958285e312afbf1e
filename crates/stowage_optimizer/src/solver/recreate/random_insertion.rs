use rand::Rng;
use rand::seq::SliceRandom;

use crate::solver::recreate::recreate_context::RecreateContext;
use crate::solver::recreate::recreate_solution::RecreateSolution;
use crate::solver::solution::{Route, Solution};

/// Reinserts each customer at a uniformly random feasible position,
/// including the option of a brand-new route. Pure diversification.
pub struct RandomInsertion;

impl RecreateSolution for RandomInsertion {
    fn recreate_solution<R>(&self, solution: &mut Solution, context: RecreateContext<R>)
    where
        R: Rng,
    {
        solution.unassigned_mut().shuffle(context.rng);

        while let Some(customer) = solution.pop_unassigned() {
            let attempts = 2 * (solution.num_routes() + 1);
            let mut inserted = false;

            for _ in 0..attempts {
                let choice = context.rng.random_range(0..=solution.num_routes());

                if choice == solution.num_routes() {
                    solution.push_route(Route::single_customer(context.instance, customer));
                    inserted = true;
                    break;
                }

                let route = solution.route(choice);
                let at = context.rng.random_range(0..=route.len());

                if route.can_insert(context.instance, customer, at) {
                    solution
                        .route_mut(choice)
                        .insert_customer(context.instance, customer, at);
                    inserted = true;
                    break;
                }
            }

            if !inserted {
                solution.push_route(Route::single_customer(context.instance, customer));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::solver::recreate::recreate_params::RecreateParams;
    use crate::test_utils;

    #[test]
    fn repairs_every_customer_feasibly() {
        let instance = test_utils::line_instance(8, 8.0, 2, 1.0, 2.0, 2.0);
        let params = RecreateParams::default();
        let mut rng = SmallRng::seed_from_u64(31);

        for _ in 0..20 {
            let mut solution = Solution::empty();
            solution.unassigned_mut().extend(0..8);

            RandomInsertion.recreate_solution(
                &mut solution,
                RecreateContext {
                    instance: &instance,
                    params: &params,
                    rng: &mut rng,
                },
            );

            assert!(solution.unassigned().is_empty());
            assert!(solution.is_feasible(&instance));
        }
    }
}
