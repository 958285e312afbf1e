use fxhash::FxHashSet;

use crate::problem::{Instance, Item};
use crate::solver::solution::EPSILON;
use crate::solver::solution::stack_set::StackSet;

/// A vehicle's tour: the visiting sequence plus one [`StackSet`] snapshot per
/// leg (before the first customer, between every pair, and after the last,
/// back to the depot). Routing and handling costs are cached and invalidated
/// on every mutation; the routing cost is additionally patched incrementally
/// on insert/remove so it rarely needs a full recomputation.
///
/// Loading-plan invariant: customer `c` at position `i` has its delivery item
/// in snapshots `0..=i` and nowhere later, and its pickup item in snapshots
/// `i + 1..` and nowhere earlier.
#[derive(Debug, Clone)]
pub struct Route {
    customers: Vec<usize>,
    members: FxHashSet<usize>,
    plan: Vec<StackSet>,

    cached_routing_cost: Option<f64>,
    cached_handling_cost: Option<f64>,
}

impl Route {
    pub fn new(customers: Vec<usize>, plan: Vec<StackSet>) -> Self {
        assert_eq!(plan.len(), customers.len() + 1);

        let members = customers.iter().copied().collect();

        Route {
            customers,
            members,
            plan,
            cached_routing_cost: None,
            cached_handling_cost: None,
        }
    }

    pub fn empty(instance: &Instance) -> Self {
        Route::new(Vec::new(), vec![StackSet::new(instance.num_stacks())])
    }

    /// Depot -> customer -> depot, with both items in the shortest (empty)
    /// stack of their respective leg.
    pub fn single_customer(instance: &Instance, customer: usize) -> Self {
        let mut plan = vec![
            StackSet::new(instance.num_stacks()),
            StackSet::new(instance.num_stacks()),
        ];

        plan[0]
            .shortest_stack_mut()
            .push_rear(Item::delivery(instance, customer));
        plan[1]
            .shortest_stack_mut()
            .push_rear(Item::pickup(instance, customer));

        Route::new(vec![customer], plan)
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn customers(&self) -> &[usize] {
        &self.customers
    }

    pub fn plan(&self) -> &[StackSet] {
        &self.plan
    }

    pub fn contains(&self, customer: usize) -> bool {
        self.members.contains(&customer)
    }

    pub fn position(&self, customer: usize) -> Option<usize> {
        if !self.members.contains(&customer) {
            return None;
        }

        self.customers.iter().position(|&c| c == customer)
    }

    /// The closed-tour distance over depot, customers, depot.
    pub fn tour_distance(instance: &Instance, customers: &[usize]) -> f64 {
        let mut distance = 0.0;
        let mut previous = None;

        for &customer in customers {
            distance += instance.leg_distance(previous, Some(customer));
            previous = Some(customer);
        }

        distance + instance.leg_distance(previous, None)
    }

    pub fn routing_cost(&mut self, instance: &Instance) -> f64 {
        if let Some(cost) = self.cached_routing_cost {
            return cost;
        }

        let cost = Route::tour_distance(instance, &self.customers);
        self.cached_routing_cost = Some(cost);
        cost
    }

    pub fn handling_cost(&mut self, instance: &Instance) -> f64 {
        if let Some(cost) = self.cached_handling_cost {
            return cost;
        }

        let cost = self
            .customers
            .iter()
            .enumerate()
            .map(|(leg, &customer)| {
                StackSet::handling_cost(customer, instance, &self.plan[leg], &self.plan[leg + 1])
            })
            .sum();

        self.cached_handling_cost = Some(cost);
        cost
    }

    pub fn cost(&mut self, instance: &Instance) -> f64 {
        self.routing_cost(instance) + self.handling_cost(instance)
    }

    pub fn is_feasible(&self, instance: &Instance) -> bool {
        self.plan.iter().all(|stacks| stacks.is_feasible(instance))
    }

    /// The customer before/after position `at`, with `None` for the depot.
    fn neighbours(&self, at: usize) -> (Option<usize>, Option<usize>) {
        let previous = at.checked_sub(1).map(|index| self.customers[index]);
        let next = self.customers.get(at).copied();
        (previous, next)
    }

    /// The routing-cost change of inserting `customer` at position `at`.
    fn insert_distance_delta(&self, instance: &Instance, customer: usize, at: usize) -> f64 {
        let (previous, next) = self.neighbours(at);

        instance.leg_distance(previous, Some(customer))
            + instance.leg_distance(Some(customer), next)
            - instance.leg_distance(previous, next)
    }

    /// Whether `customer` can be inserted at position `at` without violating
    /// any stack capacity: the delivery item goes into the shortest stack of
    /// every leg up to `at`, the pickup item into the shortest stack of the
    /// new leg and every leg after it. Never fails; infeasible just means
    /// `false`.
    pub fn can_insert(&self, instance: &Instance, customer: usize, at: usize) -> bool {
        debug_assert!(at <= self.len());

        let stack_capacity = instance.stack_capacity();
        let delivery = instance.demand(customer);
        let pickup = instance.pickup(customer);

        for (leg, stacks) in self.plan.iter().enumerate() {
            let shortest = stacks.shortest_stack().volume();

            // Legs up to `at` gain the delivery; the leg at `at` is also the
            // template for the new post-visit leg, which gains the pickup, as
            // do all later legs.
            if leg <= at && shortest + delivery > stack_capacity + EPSILON {
                return false;
            }

            if leg >= at && shortest + pickup > stack_capacity + EPSILON {
                return false;
            }
        }

        true
    }

    /// Inserts `customer` at position `at`: duplicates leg `at`'s snapshot to
    /// form the new leg `at + 1`, adds the delivery item to the shortest
    /// stack of every leg up to the visit and the pickup item to the
    /// shortest stack of every leg after it.
    pub fn insert_customer(&mut self, instance: &Instance, customer: usize, at: usize) {
        assert!(!self.contains(customer), "customer already on route");
        assert!(at <= self.len());

        if let Some(cost) = self.cached_routing_cost {
            let delta = self.insert_distance_delta(instance, customer, at);
            self.cached_routing_cost = Some(cost + delta);
        }
        self.cached_handling_cost = None;

        let template = self.plan[at].clone();
        self.plan.insert(at + 1, template);

        let delivery = Item::delivery(instance, customer);
        let pickup = Item::pickup(instance, customer);

        for stacks in &mut self.plan[..=at] {
            stacks.shortest_stack_mut().push_rear(delivery);
        }

        for stacks in &mut self.plan[at + 1..] {
            stacks.shortest_stack_mut().push_rear(pickup);
        }

        self.customers.insert(at, customer);
        self.members.insert(customer);
    }

    /// Removes `customer` and its items from every affected leg, dropping
    /// the post-visit snapshot. Panics when the customer is not on this
    /// route; that is a caller bug, not a recoverable condition.
    pub fn remove_customer(&mut self, instance: &Instance, customer: usize) {
        let at = self.position(customer).expect("customer not on route");

        if let Some(cost) = self.cached_routing_cost {
            // The same edge delta as insertion, measured on the sequence
            // without the customer.
            let previous = at.checked_sub(1).map(|index| self.customers[index]);
            let next = self.customers.get(at + 1).copied();

            let delta = instance.leg_distance(previous, Some(customer))
                + instance.leg_distance(Some(customer), next)
                - instance.leg_distance(previous, next);

            self.cached_routing_cost = Some(cost - delta);
        }
        self.cached_handling_cost = None;

        let delivery = Item::delivery(instance, customer);
        let pickup = Item::pickup(instance, customer);

        for stacks in &mut self.plan[..=at] {
            stacks.remove(&delivery);
        }

        for stacks in &mut self.plan[at + 1..] {
            stacks.remove(&pickup);
        }

        self.plan.remove(at + 1);
        self.customers.remove(at);
        self.members.remove(&customer);
    }

    /// The cheapest position to insert `customer` by routing-cost delta,
    /// evaluated between every consecutive pair of stops including both
    /// depot ends. Handling effects are deliberately not considered here.
    pub fn opt_insert(&self, instance: &Instance, customer: usize) -> (usize, f64) {
        let mut best_at = 0;
        let mut best_delta = self.insert_distance_delta(instance, customer, 0);

        for at in 1..=self.len() {
            let delta = self.insert_distance_delta(instance, customer, at);
            if delta < best_delta {
                best_at = at;
                best_delta = delta;
            }
        }

        (best_at, best_delta)
    }

    /// Swaps in a new loading plan for the same visiting sequence. The
    /// routing cost is untouched; the handling cost is invalidated.
    pub(crate) fn replace_plan(&mut self, plan: Vec<StackSet>) {
        assert_eq!(plan.len(), self.customers.len() + 1);

        self.plan = plan;
        self.cached_handling_cost = None;
    }

    /// Checks the loading-plan invariant; used by debug assertions and
    /// tests.
    #[cfg(test)]
    pub(crate) fn assert_plan_invariant(&self, instance: &Instance) {
        for (position, &customer) in self.customers.iter().enumerate() {
            let delivery = Item::delivery(instance, customer);
            let pickup = Item::pickup(instance, customer);

            for (leg, stacks) in self.plan.iter().enumerate() {
                assert_eq!(stacks.contains(&delivery), leg <= position);
                assert_eq!(stacks.contains(&pickup), leg > position);
            }
        }
    }
}
