use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use jiff::Timestamp;
use tracing::info;

use stowage_optimizer::problem::Instance;
use stowage_optimizer::solver::alns::Alns;
use stowage_optimizer::solver::solution::persistence;
use stowage_optimizer::solver::solver_params::SolverParams;

pub struct SolveArgs {
    pub instance: PathBuf,
    pub output: Option<PathBuf>,
    pub iterations: Option<usize>,
    pub seed: Option<u64>,
    pub stats: Option<PathBuf>,
}

pub fn run(args: SolveArgs) -> Result<(), anyhow::Error> {
    let instance = Instance::from_file(&args.instance)
        .with_context(|| format!("loading instance {}", args.instance.display()))?;
    let instance = Arc::new(instance);

    let mut params = SolverParams::default();
    if let Some(iterations) = args.iterations {
        params.iterations = iterations;
    }
    if let Some(seed) = args.seed {
        params.seed = seed;
    }

    let progress = ProgressBar::new(params.iterations as u64).with_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} iterations, best {msg}")
            .expect("static template is valid"),
    );

    let started = Timestamp::now();
    let solver = Alns::new(Arc::clone(&instance), params);

    let result = solver.run_with_observer(|_, best_cost| {
        progress.inc(1);
        progress.set_message(format!("{best_cost:.2}"));
    });

    progress.finish_and_clear();

    let elapsed = Timestamp::now().duration_since(started);
    info!(cost = result.best_cost, ?elapsed, "best solution found");

    print_route_summary(&instance, &result);

    let output = args.output.unwrap_or_else(|| {
        let mut path = args.instance.clone();
        path.set_file_name(format!("solution_{}.csv", instance.instance_id()));
        path
    });

    persistence::save(&output, &instance, &result.best)
        .with_context(|| format!("writing solution to {}", output.display()))?;
    info!(path = %output.display(), "solution written");

    if let Some(stats_path) = args.stats {
        let json = serde_json::to_string_pretty(&result.statistics)?;
        std::fs::write(&stats_path, json)
            .with_context(|| format!("writing statistics to {}", stats_path.display()))?;
        info!(path = %stats_path.display(), "statistics written");
    }

    Ok(())
}

fn print_route_summary(
    instance: &Instance,
    result: &stowage_optimizer::solver::alns::AlnsResult,
) {
    let mut best = result.best.clone();
    let mut table = Table::new();
    table.set_header(["Route", "Customers", "Routing", "Handling", "Total"]);

    for index in 0..best.num_routes() {
        let route = best.route_mut(index);
        let routing = route.routing_cost(instance);
        let handling = route.handling_cost(instance);

        let stops = route
            .customers()
            .iter()
            .map(|&customer| (customer + 1).to_string())
            .collect::<Vec<_>>()
            .join(" -> ");

        table.add_row([
            format!("{}", index + 1),
            stops,
            format!("{routing:.2}"),
            format!("{handling:.2}"),
            format!("{:.2}", routing + handling),
        ]);
    }

    println!("{table}");
    println!("total cost: {:.2}", result.best_cost);
}
