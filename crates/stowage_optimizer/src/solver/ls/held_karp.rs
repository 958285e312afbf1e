use crate::problem::Instance;
use crate::solver::solution::Route;

/// The provably shortest depot-to-depot tour over the given customers, via
/// the classic subset dynamic program: `cost[mask][k]` is the cheapest path
/// from the depot through exactly the customers in `mask`, ending at `k`.
/// O(2^n n^2) time and O(2^n n) space, so callers cap `n`.
pub fn held_karp_tour(instance: &Instance, customers: &[usize]) -> Vec<usize> {
    let n = customers.len();
    debug_assert!((2..=24).contains(&n));

    let full = (1usize << n) - 1;
    let mut cost = vec![f64::INFINITY; (full + 1) * n];
    let mut parent = vec![usize::MAX; (full + 1) * n];

    for k in 0..n {
        cost[(1 << k) * n + k] = instance.distance_from_depot(customers[k]);
    }

    for mask in 1..=full {
        for last in 0..n {
            if mask & (1 << last) == 0 {
                continue;
            }

            let here = cost[mask * n + last];
            if !here.is_finite() {
                continue;
            }

            for next in 0..n {
                if mask & (1 << next) != 0 {
                    continue;
                }

                let next_mask = mask | (1 << next);
                let candidate =
                    here + instance.distance_between(customers[last], customers[next]);

                if candidate < cost[next_mask * n + next] {
                    cost[next_mask * n + next] = candidate;
                    parent[next_mask * n + next] = last;
                }
            }
        }
    }

    let mut last = (0..n)
        .min_by(|&a, &b| {
            let close_a = cost[full * n + a] + instance.distance_to_depot(customers[a]);
            let close_b = cost[full * n + b] + instance.distance_to_depot(customers[b]);
            close_a.total_cmp(&close_b)
        })
        .expect("tour has at least two customers");

    let mut order = Vec::with_capacity(n);
    let mut mask = full;

    while last != usize::MAX {
        order.push(customers[last]);
        let up = parent[mask * n + last];
        mask &= !(1 << last);
        last = up;
    }

    order.reverse();
    order
}

/// Builds a route visiting `customers` in order, loading greedily into the
/// shortest stacks. Returns `None` when any insertion would violate a stack
/// capacity: routing optimality does not guarantee a feasible loading.
pub(crate) fn rebuild_route(instance: &Instance, customers: &[usize]) -> Option<Route> {
    let mut route = Route::empty(instance);

    for (at, &customer) in customers.iter().enumerate() {
        if !route.can_insert(instance, customer, at) {
            return None;
        }

        route.insert_customer(instance, customer, at);
    }

    Some(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    fn permutations(values: &[usize]) -> Vec<Vec<usize>> {
        if values.len() <= 1 {
            return vec![values.to_vec()];
        }

        let mut result = Vec::new();
        for (index, &value) in values.iter().enumerate() {
            let mut rest = values.to_vec();
            rest.remove(index);

            for mut tail in permutations(&rest) {
                tail.insert(0, value);
                result.push(tail);
            }
        }

        result
    }

    #[test]
    fn tour_on_a_line_sweeps_outward() {
        let instance = test_utils::line_instance(4, 100.0, 2, 0.0, 1.0, 1.0);

        let tour = held_karp_tour(&instance, &[2, 0, 3, 1]);
        let distance = Route::tour_distance(&instance, &tour);

        // Out to the farthest customer and straight back: 2 * 4.
        assert!((distance - 8.0).abs() < 1e-9);
    }

    #[test]
    fn tour_is_optimal_among_all_permutations() {
        // An asymmetric matrix with no exploitable structure.
        #[rustfmt::skip]
        let distances = vec![
            0.0, 3.0, 8.0, 5.0, 6.0, 1.0,
            2.0, 0.0, 4.0, 9.0, 3.0, 7.0,
            6.0, 2.0, 0.0, 3.0, 8.0, 2.0,
            1.0, 7.0, 5.0, 0.0, 2.0, 9.0,
            4.0, 6.0, 1.0, 8.0, 0.0, 3.0,
            9.0, 1.0, 6.0, 2.0, 5.0, 0.0,
        ];

        let instance = test_utils::matrix_instance(
            distances,
            vec![1.0; 5],
            vec![1.0; 5],
            100.0,
            2,
            1.0,
        );

        let customers = vec![0, 1, 2, 3, 4];
        let tour = held_karp_tour(&instance, &customers);
        let tour_distance = Route::tour_distance(&instance, &tour);

        let brute_force = permutations(&customers)
            .into_iter()
            .map(|order| Route::tour_distance(&instance, &order))
            .fold(f64::INFINITY, f64::min);

        assert!((tour_distance - brute_force).abs() < 1e-9);
    }

    #[test]
    fn tour_visits_each_customer_once() {
        let instance = test_utils::line_instance(6, 100.0, 2, 0.0, 1.0, 1.0);

        let mut tour = held_karp_tour(&instance, &[5, 1, 4, 2, 0, 3]);
        tour.sort_unstable();

        assert_eq!(tour, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn rebuild_fails_on_infeasible_loading() {
        // Stack capacity 2 with volume-2 items: three customers cannot share
        // a two-stack vehicle at the depot leg.
        let instance = test_utils::line_instance(3, 4.0, 2, 1.0, 2.0, 2.0);

        assert!(rebuild_route(&instance, &[0, 1]).is_some());
        assert!(rebuild_route(&instance, &[0, 1, 2]).is_none());
    }
}
