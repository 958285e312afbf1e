use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::solver::recreate::greedy_insertion::feasible_insertions;
use crate::solver::recreate::recreate_context::RecreateContext;
use crate::solver::recreate::recreate_solution::RecreateSolution;
use crate::solver::solution::{Route, Solution};

/// Like greedy insertion, but samples among the `k` cheapest feasible
/// options instead of always committing to the best. The perturbation keeps
/// repair from retracing the same solution every iteration.
pub struct NearBestInsertion {
    nearness: usize,
}

impl NearBestInsertion {
    pub fn new(nearness: usize) -> Self {
        assert!(nearness > 0);
        NearBestInsertion { nearness }
    }
}

impl RecreateSolution for NearBestInsertion {
    fn recreate_solution<R>(&self, solution: &mut Solution, context: RecreateContext<R>)
    where
        R: Rng,
    {
        solution.unassigned_mut().shuffle(context.rng);

        while let Some(customer) = solution.pop_unassigned() {
            let mut candidates = feasible_insertions(context.instance, solution, customer);
            candidates.sort_by(|a, b| a.cost.total_cmp(&b.cost));

            let near_best = candidates
                .get(..self.nearness.min(candidates.len()))
                .and_then(|best| best.choose(context.rng))
                .copied();

            let new_route_cost = context.instance.round_trip_distance(customer);

            match near_best {
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
