// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! The `mkp` executable: solves one instance file and writes the record
//! `<instance>;<objective>;<elapsed ms>;<status>` on stdout.

use std::{process, time::Duration};

use clap::Parser;
use log::LevelFilter;
use mkp::*;

/// The Multidimensional Knapsack Problem
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The path to the instance file
    fname: String,
    /// The maximum number of seconds given to the algorithm
    #[clap(short, long, default_value = "30")]
    time: u64,
    /// Trace level: prints the solution and the value of the constraints
    #[clap(short, long)]
    verbose: bool,
    /// The solver to use
    #[clap(long, value_enum, default_value_t = SolverKind::BranchAndBound)]
    solver: SolverKind,
    /// The order in which branch-and-bound explores its nodes
    #[clap(long, value_enum, default_value_t = NodeOrder::DepthFirst)]
    order: NodeOrder,
    /// The number of threads used by branch-and-bound (0 means one per cpu)
    #[clap(long, default_value = "1")]
    threads: usize,
}

/// `-help` is accepted as a synonym of `--help`
fn normalize(args: impl Iterator<Item = String>) -> Vec<String> {
    args.map(|a| if a == "-help" { "--help".to_string() } else { a }).collect()
}

fn init_logger(verbose: bool) {
    let level = if verbose { LevelFilter::Info } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() {
    let args = match Args::try_parse_from(normalize(std::env::args())) {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            eprintln!("{e}");
            process::exit(1);
        },
        // help and version: stdout only ever carries the record
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };
    init_logger(args.verbose);

    let config = RunConfigBuilder::default()
        .instance(args.fname)
        .time_budget(Duration::from_secs(args.time))
        .verbose(args.verbose)
        .solver(args.solver)
        .order(args.order)
        .threads(args.threads)
        .build();

    let outcome = match config {
        Ok(config) => run(&config).map_err(|e| e.to_string()),
        Err(e)     => Err(e.to_string()),
    };
    match outcome {
        Ok(report) => println!("{report}"),
        Err(e)     => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
