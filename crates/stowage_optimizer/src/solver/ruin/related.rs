use fixedbitset::FixedBitSet;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::solver::ruin::ruin_context::RuinContext;
use crate::solver::ruin::ruin_solution::RuinSolution;
use crate::solver::solution::Solution;

/// Grows a cluster of removed customers by repeatedly taking the nearest
/// neighbour of an already-removed one. Targets customers that are spatially
/// entangled and likely to be jointly improvable.
pub struct RelatedNearest;

impl RuinSolution for RelatedNearest {
    fn ruin_solution<R>(&self, solution: &mut Solution, context: RuinContext<R>)
    where
        R: Rng,
    {
        let num_customers = context.instance.num_customers();
        let mut removed_mask = FixedBitSet::with_capacity(num_customers);
        let mut removed = Vec::with_capacity(context.num_to_remove);

        while removed.len() < context.num_to_remove {
            let seed = match removed.choose(context.rng) {
                Some(&customer) => customer,
                None => context.rng.random_range(0..num_customers),
            };

            let next = if removed_mask.contains(seed) {
                context
                    .instance
                    .nearest_customers(seed)
                    .iter()
                    .copied()
                    .find(|&other| !removed_mask.contains(other))
            } else {
                Some(seed)
            };

            match next {
                Some(customer) => {
                    removed_mask.insert(customer);
                    removed.push(customer);
                    solution.remove_customer(context.instance, customer);
                }
                None => break,
            }
        }

        solution.remove_empty_routes();
    }
}

/// Picks a customer and its nearest neighbour in a *different* route and
/// removes both together with their direct route neighbours, so entangled
/// stretches of two routes open up at once.
pub struct CrossRoute;

impl RuinSolution for CrossRoute {
    fn ruin_solution<R>(&self, solution: &mut Solution, context: RuinContext<R>)
    where
        R: Rng,
    {
        let num_customers = context.instance.num_customers();
        let mut removed_mask = FixedBitSet::with_capacity(num_customers);
        let mut num_removed = 0;

        while num_removed < context.num_to_remove && num_removed < num_customers {
            let candidate = random_remaining(context.rng, &removed_mask, num_customers);

            let candidate_route = solution
                .find_route(candidate)
                .expect("candidate not in any route");

            let partner = context
                .instance
                .nearest_customers(candidate)
                .iter()
                .copied()
                .find(|&other| {
                    !removed_mask.contains(other)
                        && !solution.route(candidate_route).contains(other)
                });

            num_removed +=
                remove_with_neighbours(solution, &context, candidate, &mut removed_mask);

            if let Some(partner) = partner {
                num_removed +=
                    remove_with_neighbours(solution, &context, partner, &mut removed_mask);
            }

            solution.remove_empty_routes();
        }
    }
}

fn random_remaining<R>(rng: &mut R, removed_mask: &FixedBitSet, num_customers: usize) -> usize
where
    R: Rng,
{
    loop {
        let candidate = rng.random_range(0..num_customers);
        if !removed_mask.contains(candidate) {
            return candidate;
        }
    }
}

/// Removes `customer` and its immediate predecessor/successor on its route,
/// where those exist. Returns how many customers were removed.
fn remove_with_neighbours<R>(
    solution: &mut Solution,
    context: &RuinContext<R>,
    customer: usize,
    removed_mask: &mut FixedBitSet,
) -> usize
where
    R: Rng,
{
    if removed_mask.contains(customer) {
        return 0;
    }

    let route_index = match solution.find_route(customer) {
        Some(index) => index,
        None => return 0,
    };

    let route = solution.route(route_index);
    let at = route.position(customer).expect("membership checked above");

    let from = at.saturating_sub(1);
    let to = (at + 2).min(route.len());
    let selected = route.customers()[from..to].to_vec();

    let mut count = 0;
    for customer in selected {
        if removed_mask.contains(customer) {
            continue;
        }

        removed_mask.insert(customer);
        solution.remove_customer(context.instance, customer);
        count += 1;
    }

    count
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::solver::construction::initial_solution;
    use crate::solver::ruin::ruin_params::RuinParams;
    use crate::solver::solution::Route;
    use crate::test_utils;

    #[test]
    fn related_nearest_removes_a_cluster() {
        let instance = test_utils::line_instance(10, 40.0, 2, 1.0, 2.0, 2.0);
        let mut solution = initial_solution(&instance);
        let mut rng = SmallRng::seed_from_u64(23);
        let params = RuinParams::default();

        RelatedNearest.ruin_solution(
            &mut solution,
            RuinContext {
                instance: &instance,
                params: &params,
                rng: &mut rng,
                num_to_remove: 4,
            },
        );

        let mut removed = solution.unassigned().to_vec();
        assert_eq!(removed.len(), 4);

        // On a line, growing by nearest neighbours yields a contiguous run.
        removed.sort_unstable();
        let span = removed[removed.len() - 1] - removed[0];
        assert_eq!(span, removed.len() - 1);
    }

    #[test]
    fn cross_route_removes_neighbourhoods_of_two_routes() {
        let instance = test_utils::line_instance(8, 80.0, 2, 1.0, 2.0, 2.0);

        // Two routes of four customers each.
        let mut first = Route::single_customer(&instance, 0);
        for (at, customer) in [1, 2, 3].into_iter().enumerate() {
            first.insert_customer(&instance, customer, at + 1);
        }

        let mut second = Route::single_customer(&instance, 4);
        for (at, customer) in [5, 6, 7].into_iter().enumerate() {
            second.insert_customer(&instance, customer, at + 1);
        }

        let mut solution = Solution::new(vec![first, second], Vec::new());
        let mut rng = SmallRng::seed_from_u64(7);
        let params = RuinParams::default();

        CrossRoute.ruin_solution(
            &mut solution,
            RuinContext {
                instance: &instance,
                params: &params,
                rng: &mut rng,
                num_to_remove: 4,
            },
        );

        assert!(solution.unassigned().len() >= 4);

        for customer in 0..instance.num_customers() {
            let assigned = solution.find_route(customer).is_some();
            let pooled = solution.unassigned().contains(&customer);
            assert!(assigned ^ pooled);
        }
    }
}
