use smallvec::SmallVec;

use crate::problem::{Instance, Item};
use crate::solver::solution::EPSILON;
use crate::solver::solution::stack::Stack;

/// The loading state of a vehicle on one leg: a fixed set of `num_stacks`
/// stacks. A route keeps one of these per leg.
#[derive(Debug, Clone)]
pub struct StackSet {
    stacks: SmallVec<[Stack; 4]>,
}

impl StackSet {
    pub fn new(num_stacks: usize) -> Self {
        StackSet {
            stacks: (0..num_stacks).map(|_| Stack::new()).collect(),
        }
    }

    pub fn num_stacks(&self) -> usize {
        self.stacks.len()
    }

    pub fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    pub fn stack(&self, index: usize) -> &Stack {
        &self.stacks[index]
    }

    pub fn stack_mut(&mut self, index: usize) -> &mut Stack {
        &mut self.stacks[index]
    }

    /// The stack with the least used volume; ties are broken arbitrarily
    /// (first wins).
    pub fn shortest_stack(&self) -> &Stack {
        self.stacks
            .iter()
            .min_by(|a, b| a.volume().total_cmp(&b.volume()))
            .expect("stack set has no stacks")
    }

    pub fn shortest_stack_mut(&mut self) -> &mut Stack {
        self.stacks
            .iter_mut()
            .min_by(|a, b| a.volume().total_cmp(&b.volume()))
            .expect("stack set has no stacks")
    }

    /// The stack holding the given item, if any.
    pub fn find(&self, item: &Item) -> Option<usize> {
        self.stacks.iter().position(|stack| stack.contains(item))
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.find(item).is_some()
    }

    /// Removes the item from whichever stack holds it. Panics when no stack
    /// does: that means the loading-plan invariants are broken.
    pub fn remove(&mut self, item: &Item) {
        let index = self.find(item).expect("item not in any stack");
        self.stacks[index].remove(item);
    }

    pub fn used_capacity(&self) -> f64 {
        self.stacks.iter().map(Stack::volume).sum()
    }

    pub fn is_feasible(&self, instance: &Instance) -> bool {
        let stack_capacity = instance.stack_capacity();
        self.stacks
            .iter()
            .all(|stack| stack.volume() <= stack_capacity + EPSILON)
    }

    /// The handling cost of the visit to `customer` that transforms `before`
    /// into `after`. The total volume lifted out across all stacks includes
    /// the customer's own delivery, which has to come out regardless and is
    /// therefore subtracted once; the pickup insertion is free because the
    /// item is simply placed on whatever front position the unloading opened.
    pub fn handling_cost(
        customer: usize,
        instance: &Instance,
        before: &StackSet,
        after: &StackSet,
    ) -> f64 {
        debug_assert_eq!(before.num_stacks(), after.num_stacks());

        let moved: f64 = before
            .stacks
            .iter()
            .zip(after.stacks.iter())
            .map(|(b, a)| Stack::moved_volume(b, a))
            .sum();

        let own = instance.demand(customer);
        debug_assert!(moved + EPSILON >= own, "moved volume misses own item");

        instance.handling_cost() * (moved - own).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Item;
    use crate::test_utils;

    // The scenarios below use three customers with delivery volumes 5, 4, 3
    // and pickup volumes 2, 3, 0.5.

    #[test]
    fn handling_cost_scales_with_parameter() {
        let mut instance = test_utils::small_instance(1, 0.0);

        // before: [d2, d1] front to rear; after: [p1, d2].
        let mut before = StackSet::new(1);
        before.stack_mut(0).push_rear(Item::delivery(&instance, 1));
        before.stack_mut(0).push_rear(Item::delivery(&instance, 0));

        let mut after = StackSet::new(1);
        after.stack_mut(0).push_rear(Item::delivery(&instance, 1));
        after.stack_mut(0).push_front(Item::pickup(&instance, 0));

        // No handling cost, so the moved volume does not matter.
        assert_eq!(StackSet::handling_cost(0, &instance, &before, &after), 0.0);

        // Moving d2 (volume 4) exposes the front position.
        instance = test_utils::small_instance(1, 1.0);
        assert_eq!(StackSet::handling_cost(0, &instance, &before, &after), 4.0);

        instance = test_utils::small_instance(1, 4.0);
        assert_eq!(StackSet::handling_cost(0, &instance, &before, &after), 16.0);
    }

    #[test]
    fn handling_cost_across_two_stacks() {
        let instance = test_utils::small_instance(2, 4.0 / 3.0);

        // before: [d1; d3, d2]; after: [d2, d1; p3].
        let mut before = StackSet::new(2);
        before.stack_mut(0).push_rear(Item::delivery(&instance, 0));
        before.stack_mut(1).push_rear(Item::delivery(&instance, 2));
        before.stack_mut(1).push_rear(Item::delivery(&instance, 1));

        let mut after = StackSet::new(2);
        after.stack_mut(0).push_rear(Item::delivery(&instance, 1));
        after.stack_mut(0).push_rear(Item::delivery(&instance, 0));
        after.stack_mut(1).push_rear(Item::pickup(&instance, 2));

        // d1 and d2 move (5 + 4), plus d3's own removal (3), minus the own
        // item: (4/3) * 9 = 12.
        let cost = StackSet::handling_cost(2, &instance, &before, &after);
        assert!((cost - 12.0).abs() < 1e-9);
    }

    #[test]
    fn handling_cost_emptied_stack() {
        let instance = test_utils::small_instance(2, 3.0);

        // before: [d1; d3, d2]; after: [d1, d2, p3; ].
        let mut before = StackSet::new(2);
        before.stack_mut(0).push_rear(Item::delivery(&instance, 0));
        before.stack_mut(1).push_rear(Item::delivery(&instance, 2));
        before.stack_mut(1).push_rear(Item::delivery(&instance, 1));

        let mut after = StackSet::new(2);
        after.stack_mut(0).push_rear(Item::delivery(&instance, 0));
        after.stack_mut(0).push_rear(Item::delivery(&instance, 1));
        after.stack_mut(0).push_rear(Item::pickup(&instance, 2));

        // Stack 1 is emptied: d3 comes out anyway, d2 (volume 4) is the
        // extra movement. 3 * 4 = 12.
        assert_eq!(StackSet::handling_cost(2, &instance, &before, &after), 12.0);
    }

    #[test]
    fn shortest_stack_has_minimum_volume() {
        let instance = test_utils::small_instance(2, 1.0);

        let mut stacks = StackSet::new(2);
        stacks.stack_mut(0).push_rear(Item::delivery(&instance, 0));

        stacks
            .shortest_stack_mut()
            .push_rear(Item::delivery(&instance, 2));

        assert_eq!(stacks.stack(0).volume(), 5.0);
        assert_eq!(stacks.stack(1).volume(), 3.0);
    }

    #[test]
    fn feasibility_is_per_stack() {
        // Capacity 10 across 2 stacks: stack capacity 5.
        let instance = test_utils::small_instance(2, 1.0);

        let mut stacks = StackSet::new(2);
        stacks.stack_mut(0).push_rear(Item::delivery(&instance, 0));
        assert!(stacks.is_feasible(&instance));

        stacks.stack_mut(0).push_rear(Item::delivery(&instance, 2));
        assert!(!stacks.is_feasible(&instance));
    }
}
