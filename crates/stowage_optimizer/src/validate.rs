//! Feasibility rules for finished solutions, used to check solution files
//! independently of the search that produced them.

use crate::problem::{Instance, Item};
use crate::solver::solution::{EPSILON, Solution};

#[derive(Debug, Clone)]
pub struct RuleOutcome {
    pub rule: &'static str,
    pub passed: bool,
    pub message: String,
}

impl RuleOutcome {
    fn pass(rule: &'static str, message: impl Into<String>) -> Self {
        RuleOutcome {
            rule,
            passed: true,
            message: message.into(),
        }
    }

    fn fail(rule: &'static str, message: impl Into<String>) -> Self {
        RuleOutcome {
            rule,
            passed: false,
            message: message.into(),
        }
    }
}

/// Runs every rule and reports each outcome. A solution is feasible when all
/// rules pass.
pub fn validate(instance: &Instance, solution: &Solution) -> Vec<RuleOutcome> {
    vec![
        all_customers_visited(instance, solution),
        all_deliveries_satisfied(instance, solution),
        all_pickups_satisfied(instance, solution),
        stack_capacity_respected(instance, solution),
        vehicle_capacity_respected(instance, solution),
    ]
}

pub fn is_feasible(instance: &Instance, solution: &Solution) -> bool {
    validate(instance, solution)
        .iter()
        .all(|outcome| outcome.passed)
}

fn all_customers_visited(instance: &Instance, solution: &Solution) -> RuleOutcome {
    const RULE: &str = "all_customers_visited";

    for customer in 0..instance.num_customers() {
        if solution.find_route(customer).is_none() {
            return RuleOutcome::fail(
                RULE,
                format!("customer {} is not in the solution", customer + 1),
            );
        }
    }

    RuleOutcome::pass(RULE, "all customers are visited")
}

fn all_deliveries_satisfied(instance: &Instance, solution: &Solution) -> RuleOutcome {
    const RULE: &str = "all_deliveries_satisfied";

    for route in solution.routes() {
        for (position, &customer) in route.customers().iter().enumerate() {
            let delivery = Item::delivery(instance, customer);

            for stacks in &route.plan()[..=position] {
                if !stacks.contains(&delivery) {
                    return RuleOutcome::fail(
                        RULE,
                        format!("{delivery} is missing from a leg before its customer"),
                    );
                }
            }
        }
    }

    RuleOutcome::pass(RULE, "all deliveries are on board until their customer")
}

fn all_pickups_satisfied(instance: &Instance, solution: &Solution) -> RuleOutcome {
    const RULE: &str = "all_pickups_satisfied";

    for route in solution.routes() {
        for (position, &customer) in route.customers().iter().enumerate() {
            let pickup = Item::pickup(instance, customer);

            for stacks in &route.plan()[position + 1..] {
                if !stacks.contains(&pickup) {
                    return RuleOutcome::fail(
                        RULE,
                        format!("{pickup} is missing from a leg after its customer"),
                    );
                }
            }
        }
    }

    RuleOutcome::pass(RULE, "all pickups are on board after their customer")
}

fn stack_capacity_respected(instance: &Instance, solution: &Solution) -> RuleOutcome {
    const RULE: &str = "stack_capacity_respected";

    for route in solution.routes() {
        for stacks in route.plan() {
            if !stacks.is_feasible(instance) {
                return RuleOutcome::fail(RULE, "a stack exceeds its capacity");
            }
        }
    }

    RuleOutcome::pass(RULE, "stack capacity is respected on every leg")
}

fn vehicle_capacity_respected(instance: &Instance, solution: &Solution) -> RuleOutcome {
    const RULE: &str = "vehicle_capacity_respected";

    for route in solution.routes() {
        for stacks in route.plan() {
            if stacks.used_capacity() > instance.capacity() + EPSILON {
                return RuleOutcome::fail(RULE, "a vehicle exceeds its total capacity");
            }
        }
    }

    RuleOutcome::pass(RULE, "vehicle capacity is respected on every leg")
}
