//! Benchmark driver for the paragrid solver.
//!
//! Repeatedly builds a puzzle from the canonical solution of the requested
//! grid size, keeps a random subset of givens, times each solve, and reports
//! the median duration together with its median absolute deviation.
//!
//! # Usage
//!
//! ```sh
//! cargo run --release -- --grid-size 9 --givens 20 --threads 4 --runs 2000
//! ```

mod puzzle;

use std::{error::Error, time::Instant};

use clap::Parser;
use log::warn;
use paragrid_solver::{GridSolver, GridStatus};
use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Grid size (4, 9, 16 or 25).
    #[arg(long, default_value_t = 9)]
    grid_size: u8,

    /// Number of given cells kept from the reference solution.
    #[arg(long, default_value_t = 20)]
    givens: usize,

    /// Worker threads used for propagation and the hidden-single scan.
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Number of timed solve runs.
    #[arg(long, default_value_t = 2000)]
    runs: usize,

    /// Seed for the given-selection RNG.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Print the first solved grid.
    #[arg(long)]
    show: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let solver = GridSolver::new(args.threads)?;
    let mut rng = Pcg64Mcg::seed_from_u64(args.seed);

    println!(
        "paragrid: grid size {}, {} givens, {} worker thread(s), {} runs",
        args.grid_size,
        args.givens,
        solver.thread_count(),
        args.runs
    );

    let mut durations_us = Vec::with_capacity(args.runs);
    for run in 0..args.runs {
        let mut grid = puzzle::random_puzzle(args.grid_size, args.givens, &mut rng)?;

        let start = Instant::now();
        let status = solver.solve(&mut grid);
        let elapsed = start.elapsed();

        if status != GridStatus::SolvedCorrectly {
            warn!("run {run}: puzzle not solved ({status}), skipping sample");
            continue;
        }
        durations_us.push(elapsed.as_micros());

        if run == 0 && args.show {
            println!("{grid}");
        }
    }

    println!("runs completed: {}", durations_us.len());
    if let Some(median_us) = median(&mut durations_us) {
        let mut deviations: Vec<_> = durations_us
            .iter()
            .map(|&duration| duration.abs_diff(median_us))
            .collect();
        let mad_us = median(&mut deviations).unwrap_or(0);

        println!("median duration: {median_us} µs");
        println!("median absolute deviation: {mad_us} µs");
    }

    Ok(())
}

fn median(samples: &mut [u128]) -> Option<u128> {
    if samples.is_empty() {
        return None;
    }
    let middle = samples.len() / 2;
    let (_, median, _) = samples.select_nth_unstable(middle);
    Some(*median)
}
