//! lane-emden - Adomian decomposition of a Lane-Emden type equation
//!
//! Prints the series terms θ_0 .. θ_{N-1} and their partial sum.
//!
//! # Usage
//!
//! ```bash
//! lane-emden --terms 5 --verify
//! ```

use std::time::Instant;

use clap::Parser;
use lane_emden_adm::{
    error::Result, solve_with, SolverConfig, Symbol, DEFAULT_NUM_TERMS, DEFAULT_PARAMETER,
    DEFAULT_VARIABLE,
};

/// Adomian decomposition solver for L[θ] + (θ² - C)^(3/2) = 0
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of series terms to generate
    #[arg(short = 'n', long, default_value_t = DEFAULT_NUM_TERMS)]
    terms: usize,

    /// Name of the independent variable
    #[arg(long, default_value = DEFAULT_VARIABLE)]
    variable: String,

    /// Name of the parameter C
    #[arg(long, default_value = DEFAULT_PARAMETER)]
    parameter: String,

    /// Print only the approximate solution
    #[arg(long)]
    sum_only: bool,

    /// Re-check the recurrence after solving
    #[arg(long)]
    verify: bool,

    /// Abort once an expression exceeds this many monomials
    #[arg(long, value_name = "MONOMIALS")]
    max_term_size: Option<usize>,

    /// Report progress on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = SolverConfig::new(args.terms)
        .with_variable(Symbol::new(&args.variable))
        .with_parameter(Symbol::new(&args.parameter));
    if let Some(limit) = args.max_term_size {
        config = config.with_max_term_size(limit);
    }
    config.validate()?;

    println!(
        "--- Solving Lane-Emden for (theta^2 - {})^(3/2) with {} terms ---",
        args.parameter, args.terms
    );

    let start = Instant::now();
    let solution = solve_with(&config, |index, term| {
        if args.verbose {
            eprintln!(
                "[{:>8.3}s] theta_{index}: {} monomials",
                start.elapsed().as_secs_f64(),
                term.len()
            );
        }
        if !args.sum_only {
            println!("theta_{index} = {term}");
        }
    })?;

    if args.verify {
        solution.verify()?;
        if args.verbose {
            eprintln!("recurrence verified for {} terms", solution.len());
        }
    }

    println!();
    println!("Approximate solution:");
    println!("{}", solution.partial_sum());

    Ok(())
}
