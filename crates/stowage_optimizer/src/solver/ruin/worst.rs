use rand::Rng;

use crate::problem::Instance;
use crate::solver::ruin::ruin_context::RuinContext;
use crate::solver::ruin::ruin_solution::RuinSolution;
use crate::solver::ruin::selection::skewed_selection;
use crate::solver::solution::{Solution, StackSet};

/// Removes customers ranked by how much their removal would save, sampled
/// with a bias towards the worst so the choice is not deterministic.
pub enum Worst {
    Cost,
    Distance,
    Handling,
}

impl RuinSolution for Worst {
    fn ruin_solution<R>(&self, solution: &mut Solution, context: RuinContext<R>)
    where
        R: Rng,
    {
        let costs = match self {
            Worst::Distance => customer_routing_costs(context.instance, solution),
            Worst::Handling => customer_handling_costs(context.instance, solution),
            Worst::Cost => {
                let routing = customer_routing_costs(context.instance, solution);
                let handling = customer_handling_costs(context.instance, solution);

                routing
                    .iter()
                    .zip(handling.iter())
                    .map(|(r, h)| r + h)
                    .collect()
            }
        };

        let mut customers = (0..context.instance.num_customers()).collect::<Vec<_>>();
        customers.sort_by(|&a, &b| costs[a].total_cmp(&costs[b]));

        for position in skewed_selection(context.rng, customers.len(), context.num_to_remove) {
            // Position 0 is most likely; count from the worst (last) end.
            let customer = customers[customers.len() - 1 - position];
            solution.remove_customer(context.instance, customer);
        }

        solution.remove_empty_routes();
    }
}

/// The routing cost attributable to each customer: what the route would save
/// by skipping it (its two edges against the bypass edge); a customer alone
/// on a route is worth the whole round trip.
pub(crate) fn customer_routing_costs(instance: &Instance, solution: &Solution) -> Vec<f64> {
    let mut costs = vec![0.0; instance.num_customers()];

    for route in solution.routes() {
        let customers = route.customers();

        for (at, &customer) in customers.iter().enumerate() {
            costs[customer] = if customers.len() == 1 {
                instance.round_trip_distance(customer)
            } else {
                let previous = at.checked_sub(1).map(|index| customers[index]);
                let next = customers.get(at + 1).copied();

                instance.leg_distance(previous, Some(customer))
                    + instance.leg_distance(Some(customer), next)
                    - instance.leg_distance(previous, next)
            };
        }
    }

    costs
}

/// The handling cost attributable to each customer. This only counts the
/// cost at the customer's own visit; movements its items cause elsewhere on
/// the route are ignored, which keeps this O(customers) per solution.
pub(crate) fn customer_handling_costs(instance: &Instance, solution: &Solution) -> Vec<f64> {
    let mut costs = vec![0.0; instance.num_customers()];

    for route in solution.routes() {
        for (at, &customer) in route.customers().iter().enumerate() {
            costs[customer] = StackSet::handling_cost(
                customer,
                instance,
                &route.plan()[at],
                &route.plan()[at + 1],
            );
        }
    }

    costs
}
