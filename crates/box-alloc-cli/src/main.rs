// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use anyhow::{Context, Result};
use box_alloc_model::prelude::{AllocationValidator, Problem, ProblemLoader, SolveRequest};
use box_alloc_solver::{AllocationSolver, SolverOptions};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Catalog and regional prices used when no `--config` is given.
const DEFAULT_CONFIG: &str = include_str!("../config/default.json");

/// Finds the cheapest set of containers that adds up exactly to a capacity,
/// for every region, and prints the result as JSON.
#[derive(Parser, Debug)]
#[command(name = "box-alloc", version, about, allow_negative_numbers = true)]
struct Cli {
    /// Number of hours the containers are needed
    duration: i64,

    /// Total volume the containers must add up to
    capacity: i64,

    /// JSON file with the container catalog and regional prices
    #[arg(long, short, env = "BOX_ALLOC_CONFIG")]
    config: Option<PathBuf>,

    /// Drop prices of containers missing from the catalog instead of failing
    #[arg(long)]
    lenient: bool,

    /// Solve regions in parallel
    #[arg(long)]
    parallel: bool,

    /// Re-check every allocation against the catalog and prices before printing
    #[arg(long)]
    verify: bool,

    /// Print the report on a single line
    #[arg(long)]
    compact: bool,
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_problem(cli: &Cli) -> Result<Problem> {
    let loader = ProblemLoader::new().strict_prices(!cli.lenient);
    match &cli.config {
        Some(path) => loader
            .from_path(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => loader
            .from_str(DEFAULT_CONFIG)
            .context("Built-in configuration is invalid"),
    }
}

fn run(cli: &Cli) -> Result<String> {
    let request = SolveRequest::from_signed(cli.duration, cli.capacity)?;
    let problem = load_problem(cli)?;
    tracing::info!(
        "Loaded {} containers and {} regions",
        problem.containers_len(),
        problem.regions_len()
    );

    let solver = AllocationSolver::with_options(SolverOptions::new().parallel(cli.parallel));
    let t0 = Instant::now();
    let report = solver.solve_problem(&request, &problem)?;
    tracing::info!("Solved {} in {:?}", request, t0.elapsed());

    if cli.verify {
        AllocationValidator::new()
            .validate_report(&request, problem.catalog(), problem.prices(), &report)
            .context("Allocation failed verification")?;
    }

    let json = if cli.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    Ok(json)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    enable_tracing();

    let json = run(&cli)?;
    println!("{json}");
    Ok(())
}
