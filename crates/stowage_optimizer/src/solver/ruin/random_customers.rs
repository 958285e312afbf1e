use rand::Rng;
use rand::seq::index;

use crate::solver::ruin::ruin_context::RuinContext;
use crate::solver::ruin::ruin_solution::RuinSolution;
use crate::solver::solution::Solution;

/// Removes a uniform sample of customers, without replacement.
pub struct RandomCustomers;

impl RuinSolution for RandomCustomers {
    fn ruin_solution<R>(&self, solution: &mut Solution, context: RuinContext<R>)
    where
        R: Rng,
    {
        let num_customers = context.instance.num_customers();

        for customer in index::sample(context.rng, num_customers, context.num_to_remove) {
            solution.remove_customer(context.instance, customer);
        }

        solution.remove_empty_routes();
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
    fn removes_requested_count() {
        let instance = test_utils::line_instance(8, 40.0, 2, 1.0, 2.0, 2.0);
        let mut solution = initial_solution(&instance);
        let mut rng = SmallRng::seed_from_u64(3);
        let params = RuinParams::default();

        RandomCustomers.ruin_solution(
            &mut solution,
            RuinContext {
                instance: &instance,
                params: &params,
                rng: &mut rng,
                num_to_remove: 3,
            },
        );

        assert_eq!(solution.unassigned().len(), 3);
        assert_eq!(solution.num_routes(), 5);

        for customer in 0..instance.num_customers() {
            let assigned = solution.find_route(customer).is_some();
            let pooled = solution.unassigned().contains(&customer);
            assert!(assigned ^ pooled);
        }
    }
}
