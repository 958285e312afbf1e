use std::path::Path;

use anyhow::{Context, bail};

use stowage_optimizer::problem::Instance;
use stowage_optimizer::solver::solution::persistence;
use stowage_optimizer::validate;

pub fn run(instance_path: &Path, solution_path: &Path) -> Result<(), anyhow::Error> {
    let instance = Instance::from_file(instance_path)
        .with_context(|| format!("loading instance {}", instance_path.display()))?;

    let solution = persistence::load(solution_path, &instance)
        .with_context(|| format!("loading solution {}", solution_path.display()))?;

    let outcomes = validate::validate(&instance, &solution);
    let mut feasible = true;

    for (index, outcome) in outcomes.iter().enumerate() {
        let verdict = if outcome.passed { "ok" } else { "FAIL" };
        println!("{index}: [{verdict}] {}", outcome.message);

        feasible &= outcome.passed;
    }

    if !feasible {
        bail!("solution is infeasible");
    }

    Ok(())
}
