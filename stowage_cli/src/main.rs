use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

mod check;
mod generate;
mod optimize;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the search on an instance file and write the best solution found.
    Solve {
        /// Instance file (single-line CSV).
        instance: PathBuf,

        /// Solution output path; defaults to `solution_{id}.csv` next to the
        /// instance.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Iteration budget.
        #[arg(short, long)]
        iterations: Option<usize>,

        /// RNG seed, for reproducible runs.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write search statistics to this JSON file.
        #[arg(long)]
        stats: Option<PathBuf>,
    },

    /// Validate a solution file against its instance.
    Check {
        instance: PathBuf,
        solution: PathBuf,
    },

    /// Generate a random instance file.
    #[command(visible_alias = "g")]
    Generate {
        #[command(flatten)]
        args: generate::GenerateArgs,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Solve {
            instance,
            output,
            iterations,
            seed,
            stats,
        } => optimize::run(optimize::SolveArgs {
            instance,
            output,
            iterations,
            seed,
            stats,
        }),
        Commands::Check { instance, solution } => check::run(&instance, &solution),
        Commands::Generate { args } => generate::run(args),
    }
}
