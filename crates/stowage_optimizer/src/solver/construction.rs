use tracing::debug;

use crate::problem::Instance;
use crate::solver::solution::{Route, Solution};

/// The trivial starting point: every customer on its own route. Expensive,
/// but always feasible (the loader rejects items larger than a stack), and
/// the search tears it apart within a few iterations anyway.
pub fn initial_solution(instance: &Instance) -> Solution {
    let routes = (0..instance.num_customers())
        .map(|customer| Route::single_customer(instance, customer))
        .collect::<Vec<_>>();

    debug!(routes = routes.len(), "constructed initial solution");

    Solution::new(routes, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    #[test]
    fn one_route_per_customer() {
        let instance = test_utils::small_instance(2, 1.0);
        let mut solution = initial_solution(&instance);

        assert_eq!(solution.num_routes(), 3);
        assert!(solution.unassigned().is_empty());
        assert!(solution.is_feasible(&instance));

        for (index, route) in solution.routes().iter().enumerate() {
            assert_eq!(route.customers(), &[index]);
        }

        // Round trips on the small instance: 2 + 4 + 6.
        assert_eq!(solution.objective(&instance), 12.0);
    }
}
