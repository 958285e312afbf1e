use tracing::trace;

use crate::problem::Instance;
use crate::solver::ls::held_karp::{held_karp_tour, rebuild_route};
use crate::solver::ls::loading_plan_dp::{optimize_loading, plan_handling_cost};
use crate::solver::solution::{EPSILON, Route, Solution};

/// Per-route exact improvement: resequencing via the subset DP for short
/// routes, then loading via the block DP. Neither touches which customers a
/// route serves, and each candidate is kept only when it does not make the
/// route worse, so the solution objective never increases.
pub struct LocalSearch {
    /// Routes longer than this skip the sequencing DP; it is exponential in
    /// the route length.
    max_sequencing_customers: usize,

    /// Block count for the loading DP; its state space is `num_blocks!`.
    num_blocks: usize,
}

impl LocalSearch {
    pub fn new(max_sequencing_customers: usize, num_blocks: usize) -> Self {
        LocalSearch {
            max_sequencing_customers,
            num_blocks,
        }
    }

    pub fn improve(&self, instance: &Instance, solution: &mut Solution) {
        for index in 0..solution.num_routes() {
            self.improve_sequence(instance, solution.route_mut(index));
            self.improve_loading(instance, solution.route_mut(index));
        }
    }

    fn improve_sequence(&self, instance: &Instance, route: &mut Route) {
        if route.len() < 2 || route.len() > self.max_sequencing_customers {
            return;
        }

        let tour = held_karp_tour(instance, route.customers());
        if tour == route.customers() {
            return;
        }

        // The optimal tour may not admit a feasible loading, and its fresh
        // greedy loading may cost more in handling than the routing saves;
        // in either case the candidate is discarded.
        if let Some(mut candidate) = rebuild_route(instance, &tour)
            && candidate.cost(instance) <= route.cost(instance)
        {
            trace!(
                from = route.cost(instance),
                to = candidate.cost(instance),
                "resequenced route"
            );
            *route = candidate;
        }
    }

    fn improve_loading(&self, instance: &Instance, route: &mut Route) {
        if route.len() < 2 || instance.handling_cost() == 0.0 {
            return;
        }

        let current = route.handling_cost(instance);
        if current <= EPSILON {
            return;
        }

        if let Some(plan) = optimize_loading(instance, route, self.num_blocks) {
            let improved = plan_handling_cost(instance, route.customers(), &plan);

            if improved + EPSILON < current {
                trace!(from = current, to = improved, "replaced loading plan");
                route.replace_plan(plan);
            }
        }
    }
}
