use fxhash::FxHashMap;

use crate::problem::{Instance, Item};
use crate::solver::ls::block::{Block, make_blocks};
use crate::solver::solution::{Route, StackSet};

/// Searches for a cheaper loading plan for the route's current visiting
/// sequence by dynamic programming over block orderings: a state is one
/// permutation of the blocks, a transition happens at every customer visit
/// and is priced with the mutation-diff handling cost. Returns the cheapest
/// plan found, or `None` when no finite-cost assignment exists (block
/// granularity cannot always produce a feasible layout).
pub fn optimize_loading(
    instance: &Instance,
    route: &Route,
    num_blocks: usize,
) -> Option<Vec<StackSet>> {
    let customers = route.customers();
    if customers.is_empty() {
        return None;
    }

    let blocks = make_blocks(instance, customers, num_blocks);
    let states = permutations(num_blocks);

    let positions: FxHashMap<usize, usize> = customers
        .iter()
        .enumerate()
        .map(|(position, &customer)| (customer, position))
        .collect();

    let layout = Layout {
        instance,
        blocks: &blocks,
        positions: &positions,
    };

    let num_snapshots = customers.len() + 1;
    let num_states = states.len();

    // costs[i][s]: cheapest completion when leaving snapshot i in state s.
    let mut costs = vec![vec![0.0_f64; num_states]; num_snapshots];
    let mut decisions = vec![vec![0_usize; num_states]; num_snapshots - 1];

    for snapshot in (0..num_snapshots - 1).rev() {
        let customer_position = snapshot;

        // Reconstructed layouts depend only on the state and the visit, so
        // hoist them out of the quadratic state loop.
        let befores: Vec<StackSet> = states
            .iter()
            .map(|state| layout.stack_set(state, customer_position, false))
            .collect();
        let afters: Vec<StackSet> = states
            .iter()
            .map(|state| layout.stack_set(state, customer_position, true))
            .collect();

        for (from, before) in befores.iter().enumerate() {
            let mut best = f64::INFINITY;
            let mut best_to = 0;

            for (to, after) in afters.iter().enumerate() {
                let transition = if before.is_feasible(instance) && after.is_feasible(instance)
                {
                    StackSet::handling_cost(
                        customers[customer_position],
                        instance,
                        before,
                        after,
                    )
                } else {
                    f64::INFINITY
                };

                let total = transition + costs[snapshot + 1][to];
                if total < best {
                    best = total;
                    best_to = to;
                }
            }

            costs[snapshot][from] = best;
            decisions[snapshot][from] = best_to;
        }
    }

    let start = (0..num_states)
        .min_by(|&a, &b| costs[0][a].total_cmp(&costs[0][b]))
        .expect("at least one block permutation");

    if !costs[0][start].is_finite() {
        return None;
    }

    let mut state_path = vec![start];
    for snapshot in 0..num_snapshots - 1 {
        let here = *state_path.last().expect("path is non-empty");
        state_path.push(decisions[snapshot][here]);
    }

    let plan = state_path
        .iter()
        .enumerate()
        .map(|(snapshot, &state)| {
            // The depot snapshot has unloaded nobody; every later snapshot
            // reflects the state just after its visit.
            if snapshot == 0 {
                layout.stack_set(&states[state], 0, false)
            } else {
                layout.stack_set(&states[state], snapshot - 1, true)
            }
        })
        .collect();

    Some(plan)
}

/// The handling cost of a plan over the given visiting sequence.
pub(crate) fn plan_handling_cost(
    instance: &Instance,
    customers: &[usize],
    plan: &[StackSet],
) -> f64 {
    debug_assert_eq!(plan.len(), customers.len() + 1);

    customers
        .iter()
        .enumerate()
        .map(|(leg, &customer)| {
            StackSet::handling_cost(customer, instance, &plan[leg], &plan[leg + 1])
        })
        .sum()
}

struct Layout<'a> {
    instance: &'a Instance,
    blocks: &'a [Block],
    positions: &'a FxHashMap<usize, usize>,
}

impl Layout<'_> {
    /// Materializes the stack layout for one block ordering at the moment
    /// just before (`after == false`) or just after (`after == true`) the
    /// visit at `customer_position`. Blocks are dealt across the stacks in
    /// order, as evenly as possible; a customer's item is its pickup once
    /// its visit is behind the vehicle and its delivery otherwise.
    fn stack_set(&self, state: &[usize], customer_position: usize, after: bool) -> StackSet {
        let num_stacks = self.instance.num_stacks();
        let mut stacks = StackSet::new(num_stacks);

        let per_stack = state.len() / num_stacks;
        let remainder = state.len() % num_stacks;

        for stack_index in 0..num_stacks {
            let from = stack_index * per_stack + stack_index.min(remainder);
            let to = (stack_index + 1) * per_stack + (stack_index + 1).min(remainder);

            for &block_index in &state[from..to] {
                for &customer in self.blocks[block_index].customers() {
                    let position = self.positions[&customer];
                    let picked_up =
                        position < customer_position || (position == customer_position && after);

                    let item = if picked_up {
                        Item::pickup(self.instance, customer)
                    } else {
                        Item::delivery(self.instance, customer)
                    };

                    stacks.stack_mut(stack_index).push_rear(item);
                }
            }
        }

        stacks
    }
}

fn permutations(count: usize) -> Vec<Vec<usize>> {
    fn recurse(prefix: &mut Vec<usize>, remaining: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if remaining.is_empty() {
            out.push(prefix.clone());
            return;
        }

        for index in 0..remaining.len() {
            let value = remaining.remove(index);
            prefix.push(value);
            recurse(prefix, remaining, out);
            prefix.pop();
            remaining.insert(index, value);
        }
    }

    let mut out = Vec::new();
    recurse(&mut Vec::new(), &mut (0..count).collect(), &mut out);
    out
}
