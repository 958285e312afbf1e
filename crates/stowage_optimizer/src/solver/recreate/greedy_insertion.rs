use rand::Rng;
use rand::seq::SliceRandom;
use rayon::prelude::*;

use crate::problem::Instance;
use crate::solver::recreate::recreate_context::RecreateContext;
use crate::solver::recreate::recreate_solution::RecreateSolution;
use crate::solver::solution::{Route, Solution};

/// One feasible way to place a customer into an existing route.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InsertionCandidate {
    pub cost: f64,
    pub at: usize,
    pub route: usize,
}

/// Evaluates the locally optimal insertion point of `customer` in every
/// route, keeping the feasible ones. Read-only over the solution, so the
/// routes are scanned in parallel and reduced afterwards.
pub(crate) fn feasible_insertions(
    instance: &Instance,
    solution: &Solution,
    customer: usize,
) -> Vec<InsertionCandidate> {
    solution
        .routes()
        .par_iter()
        .enumerate()
        .filter_map(|(index, route)| {
            let (at, cost) = route.opt_insert(instance, customer);

            route
                .can_insert(instance, customer, at)
                .then_some(InsertionCandidate {
                    cost,
                    at,
                    route: index,
                })
        })
        .collect()
}

/// Reinserts the unassigned customers in random order, each into its
/// cheapest feasible position; a new single-customer route is opened when
/// that beats every existing option.
pub struct GreedyInsertion;

impl RecreateSolution for GreedyInsertion {
    fn recreate_solution<R>(&self, solution: &mut Solution, context: RecreateContext<R>)
    where
        R: Rng,
    {
        solution.unassigned_mut().shuffle(context.rng);

        while let Some(customer) = solution.pop_unassigned() {
            let best = feasible_insertions(context.instance, solution, customer)
                .into_iter()
                .min_by(|a, b| a.cost.total_cmp(&b.cost));

            let new_route_cost = context.instance.round_trip_distance(customer);

            match best {
                Some(candidate) if candidate.cost <= new_route_cost => {
                    solution.route_mut(candidate.route).insert_customer(
                        context.instance,
                        customer,
                        candidate.at,
                    );
                }
                _ => solution.push_route(Route::single_customer(context.instance, customer)),
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
    fn repairs_every_customer() {
        let instance = test_utils::line_instance(6, 60.0, 2, 1.0, 2.0, 2.0);
        let mut solution = Solution::empty();
        solution.unassigned_mut().extend(0..6);

        let params = RecreateParams::default();
        let mut rng = SmallRng::seed_from_u64(13);

        GreedyInsertion.recreate_solution(
            &mut solution,
            RecreateContext {
                instance: &instance,
                params: &params,
                rng: &mut rng,
            },
        );

        assert!(solution.unassigned().is_empty());
        assert!(solution.is_feasible(&instance));

        for customer in 0..instance.num_customers() {
            assert!(solution.find_route(customer).is_some());
        }
    }

    #[test]
    fn merges_into_existing_routes_when_cheaper() {
        // Plenty of capacity: on a line the cheapest repair is one route.
        let instance = test_utils::line_instance(5, 200.0, 2, 0.0, 2.0, 2.0);
        let mut solution = Solution::empty();
        solution.unassigned_mut().extend(0..5);

        let params = RecreateParams::default();
        let mut rng = SmallRng::seed_from_u64(3);

        GreedyInsertion.recreate_solution(
            &mut solution,
            RecreateContext {
                instance: &instance,
                params: &params,
                rng: &mut rng,
            },
        );

        // Every partial tour on the line can absorb the next customer at
        // zero or bypass cost, always at most a fresh round trip.
        assert_eq!(solution.num_routes(), 1);
    }

    #[test]
    fn opens_new_route_when_capacity_is_tight() {
        // Stack capacity 2 and volume-2 items: one customer per stack pair.
        let instance = test_utils::line_instance(4, 4.0, 2, 1.0, 2.0, 2.0);
        let mut solution = Solution::empty();
        solution.unassigned_mut().extend(0..4);

        let params = RecreateParams::default();
        let mut rng = SmallRng::seed_from_u64(3);

        GreedyInsertion.recreate_solution(
            &mut solution,
            RecreateContext {
                instance: &instance,
                params: &params,
                rng: &mut rng,
            },
        );

        assert!(solution.unassigned().is_empty());
        assert!(solution.is_feasible(&instance));
        assert!(solution.num_routes() > 1);
    }
}
