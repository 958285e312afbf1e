use std::fmt::Display;

use rand::Rng;
use serde::Serialize;

use crate::solver::ruin::minimum_quantity::MinimumQuantity;
use crate::solver::ruin::random_customers::RandomCustomers;
use crate::solver::ruin::random_routes::RandomRoutes;
use crate::solver::ruin::related::{CrossRoute, RelatedNearest};
use crate::solver::ruin::ruin_context::RuinContext;
use crate::solver::ruin::ruin_solution::RuinSolution;
use crate::solver::ruin::worst::Worst;
use crate::solver::solution::Solution;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuinStrategy {
    RandomCustomers,
    RandomRoutes,
    WorstCost,
    WorstDistance,
    WorstHandling,
    RelatedNearest,
    CrossRoute,
    MinimumQuantity,
}

impl RuinStrategy {
    pub fn all() -> Vec<RuinStrategy> {
        vec![
            RuinStrategy::RandomCustomers,
            RuinStrategy::RandomRoutes,
            RuinStrategy::WorstCost,
            RuinStrategy::WorstDistance,
            RuinStrategy::WorstHandling,
            RuinStrategy::RelatedNearest,
            RuinStrategy::CrossRoute,
            RuinStrategy::MinimumQuantity,
        ]
    }
}

impl Serialize for RuinStrategy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl Display for RuinStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RandomCustomers => write!(f, "RandomCustomers"),
            Self::RandomRoutes => write!(f, "RandomRoutes"),
            Self::WorstCost => write!(f, "WorstCost"),
            Self::WorstDistance => write!(f, "WorstDistance"),
            Self::WorstHandling => write!(f, "WorstHandling"),
            Self::RelatedNearest => write!(f, "RelatedNearest"),
            Self::CrossRoute => write!(f, "CrossRoute"),
            Self::MinimumQuantity => write!(f, "MinimumQuantity"),
        }
    }
}

impl RuinSolution for RuinStrategy {
    fn ruin_solution<R>(&self, solution: &mut Solution, context: RuinContext<R>)
    where
        R: Rng,
    {
        match self {
            RuinStrategy::RandomCustomers => RandomCustomers.ruin_solution(solution, context),
            RuinStrategy::RandomRoutes => RandomRoutes.ruin_solution(solution, context),
            RuinStrategy::WorstCost => Worst::Cost.ruin_solution(solution, context),
            RuinStrategy::WorstDistance => Worst::Distance.ruin_solution(solution, context),
            RuinStrategy::WorstHandling => Worst::Handling.ruin_solution(solution, context),
            RuinStrategy::RelatedNearest => RelatedNearest.ruin_solution(solution, context),
            RuinStrategy::CrossRoute => CrossRoute.ruin_solution(solution, context),
            RuinStrategy::MinimumQuantity => MinimumQuantity.ruin_solution(solution, context),
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
    fn every_strategy_preserves_conservation() {
        let instance = test_utils::line_instance(12, 60.0, 2, 1.0, 2.0, 2.0);
        let params = RuinParams::default();
        let mut rng = SmallRng::seed_from_u64(41);

        for strategy in RuinStrategy::all() {
            let mut solution = initial_solution(&instance);

            strategy.ruin_solution(
                &mut solution,
                RuinContext {
                    instance: &instance,
                    params: &params,
                    rng: &mut rng,
                    num_to_remove: params.num_to_remove(instance.num_customers()),
                },
            );

            assert!(
                solution.unassigned().len() >= params.num_to_remove(instance.num_customers()),
                "{strategy} removed too few customers"
            );

            for customer in 0..instance.num_customers() {
                let assigned = solution.find_route(customer).is_some();
                let pooled = solution.unassigned().contains(&customer);
                assert!(assigned ^ pooled, "{strategy} lost customer {customer}");
            }

            // Ruin never leaves empty route husks behind.
            assert!(solution.routes().iter().all(|route| !route.is_empty()));
        }
    }
}
