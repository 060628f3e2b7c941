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

//! This module runs a configured solver on an instance file.

use std::{io::Write, time::Instant};

use log::{info, warn};

use crate::{Error, Report, RunConfig, SolutionState, Status, read_instance};

/// Reads the instance, solves it and reports the outcome. When the run is
/// verbose, the solution details are written to stderr.
pub fn run(config: &RunConfig) -> Result<Report, Error> {
    run_with(config, &mut std::io::stderr())
}

/// Reads the instance, solves it and reports the outcome. When the run is
/// verbose, the solution details are written to `details`.
///
/// Only the solve phase is timed: reading the instance and validating the
/// solution do not count against the budget.
pub fn run_with<W: Write>(config: &RunConfig, details: &mut W) -> Result<Report, Error> {
    let problem = read_instance(&config.instance)?;
    info!("instance {} has {} items and {} dimensions",
        config.instance.display(), problem.item_count(), problem.dimension_count());

    let mut state  = SolutionState::new(&problem);
    let mut solver = config.make_solver();

    let start = Instant::now();
    solver.solve(&mut state, config.time_budget)?;
    let elapsed = start.elapsed();

    let name   = config.instance.display().to_string();
    let report = Report::new(name, &mut state, elapsed, config.time_budget);
    if report.status == Status::BudgetExceeded {
        warn!("time limit exceeded ({:?} for a budget of {:?})", elapsed, config.time_budget);
    }
    if config.verbose {
        report.write_details(details, &state)?;
    }
    Ok(report)
}
