use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::info;

#[derive(Args)]
pub struct GenerateArgs {
    /// Where to write the instance file.
    output: PathBuf,

    /// Numeric identifier written into the instance.
    #[arg(long, default_value_t = 1)]
    id: u64,

    #[arg(short = 'n', long, default_value_t = 20)]
    customers: usize,

    #[arg(long, default_value_t = 500.0)]
    capacity: f64,

    #[arg(long, default_value_t = 5.0)]
    handling_cost: f64,

    #[arg(long, default_value_t = 2)]
    stacks: usize,

    /// Distances are drawn uniformly from this range, symmetrically.
    #[arg(long, default_value_t = 80.0)]
    max_distance: f64,

    /// Item volumes are drawn uniformly from `0..max_volume`.
    #[arg(long, default_value_t = 80.0)]
    max_volume: f64,

    #[arg(short, long, default_value_t = 1)]
    seed: u64,
}

/// Writes a random instance in the single-line CSV format: symmetric
/// uniform distances, uniform delivery and pickup volumes.
pub fn run(args: GenerateArgs) -> Result<(), anyhow::Error> {
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let num_nodes = args.customers + 1;

    let mut distances = vec![0.0_f64; num_nodes * num_nodes];
    for i in 0..num_nodes {
        for j in i + 1..num_nodes {
            let distance = (rng.random_range(0.0..args.max_distance) * 1e5).round() / 1e5;
            distances[i * num_nodes + j] = distance;
            distances[j * num_nodes + i] = distance;
        }
    }

    // Volumes are capped at the stack capacity so the instance is loadable.
    let stack_capacity = args.capacity / args.stacks as f64;
    let max_volume = args.max_volume.min(stack_capacity);

    let mut volume = || (rng.random_range(0.0..max_volume) * 1e5).round() / 1e5;
    let volumes = (0..2 * args.customers).map(|_| volume()).collect::<Vec<_>>();

    let mut line = String::new();
    write!(
        line,
        "{},{},{},{},{}",
        args.id, args.capacity, args.customers, args.handling_cost, args.stacks
    )?;

    for distance in &distances {
        write!(line, ",{distance}")?;
    }

    for volume in &volumes {
        write!(line, ",{volume}")?;
    }

    std::fs::write(&args.output, line)
        .with_context(|| format!("writing instance to {}", args.output.display()))?;

    info!(
        path = %args.output.display(),
        customers = args.customers,
        "instance written"
    );

    Ok(())
}
