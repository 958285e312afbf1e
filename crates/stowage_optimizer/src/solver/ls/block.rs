use crate::problem::Instance;
use crate::solver::solution::EPSILON;

/// A group of customers the loading DP moves around as one unit. Blocks keep
/// the DP's state space at `num_blocks!` instead of one state per item
/// arrangement; the price is that the resulting plan is only near-optimal.
#[derive(Debug, Clone, Default)]
pub struct Block {
    customers: Vec<usize>,
}

impl Block {
    pub fn new(customers: Vec<usize>) -> Self {
        Block { customers }
    }

    pub fn customers(&self) -> &[usize] {
        &self.customers
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Worst-case volume of this block: each customer counts its larger
    /// item, since the block must fit whichever of the two is on board. The
    /// worst case may never occur, but it is what keeps blocks
    /// interchangeable across stack positions.
    pub fn max_capacity_used(&self, instance: &Instance) -> f64 {
        self.customers
            .iter()
            .map(|&customer| instance.demand(customer).max(instance.pickup(customer)))
            .sum()
    }
}

/// Partitions the route's customers into exactly `num_blocks` blocks. Routes
/// short enough get a singleton block per customer (padded with empties),
/// which makes the DP exact; longer routes are split into contiguous chunks
/// of roughly equal worst-case volume.
pub fn make_blocks(instance: &Instance, customers: &[usize], num_blocks: usize) -> Vec<Block> {
    let mut blocks = if customers.len() <= num_blocks {
        let mut blocks = vec![Block::default(); num_blocks - customers.len()];
        blocks.extend(
            customers
                .iter()
                .map(|&customer| Block::new(vec![customer])),
        );
        blocks
    } else {
        split_balanced(instance, customers, num_blocks)
            .into_iter()
            .map(Block::new)
            .collect()
    };

    debug_assert_eq!(blocks.len(), num_blocks);
    blocks.shrink_to_fit();
    blocks
}

/// Splits `customers` into `num_partitions` contiguous, non-empty chunks of
/// roughly equal worst-case volume, re-targeting the remaining average after
/// each chunk closes.
fn split_balanced(
    instance: &Instance,
    customers: &[usize],
    num_partitions: usize,
) -> Vec<Vec<usize>> {
    debug_assert!(customers.len() >= num_partitions);

    let weight =
        |customer: usize| instance.demand(customer).max(instance.pickup(customer));

    let mut remaining_weight: f64 = customers.iter().map(|&c| weight(c)).sum();
    let mut target = remaining_weight / num_partitions as f64;

    let mut chunks: Vec<Vec<usize>> = Vec::with_capacity(num_partitions);
    let mut chunk: Vec<usize> = Vec::new();
    let mut chunk_weight = 0.0;

    for (index, &customer) in customers.iter().enumerate() {
        let chunks_open = num_partitions - chunks.len();
        let customers_left = customers.len() - index;

        // Close the chunk when it met its share, or when every remaining
        // customer is needed to keep the remaining chunks non-empty.
        let must_close = !chunk.is_empty() && customers_left == chunks_open - 1;
        let met_share =
            !chunk.is_empty() && chunks_open > 1 && chunk_weight + EPSILON >= target;

        if must_close || met_share {
            remaining_weight -= chunk_weight;
            chunks.push(std::mem::take(&mut chunk));
            chunk_weight = 0.0;
            target = remaining_weight / (num_partitions - chunks.len()) as f64;
        }

        chunk.push(customer);
        chunk_weight += weight(customer);
    }

    chunks.push(chunk);
    chunks
}
