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

//! This module defines the configuration of a run: which instance is solved,
//! with which solver and within which time budget.

use std::{path::PathBuf, time::Duration};

use derive_builder::Builder;

use crate::{BranchAndBound, GreedySolver, NodeOrder, ParallelBranchAndBound, Solver};

/// The default time budget of a run
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(30);

/// The solvers which can be selected to process an instance
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum SolverKind {
    /// Adds the items in their natural order, whenever they fit
    Greedy,
    /// Adds the items in decreasing efficiency order, whenever they fit
    EfficiencyGreedy,
    /// Branch-and-bound (parallel when more than one thread is requested)
    #[default]
    BranchAndBound,
}

/// This is how you configure a run. Only the instance is mandatory:
///
/// ```
/// # use mkp::*;
/// # use std::time::Duration;
/// let config = RunConfigBuilder::default()
///     .instance("tests/resources/mkp/two_items.txt")
///     .time_budget(Duration::from_secs(5))
///     .build()
///     .unwrap();
///
/// assert_eq!(SolverKind::BranchAndBound, config.solver);
/// assert_eq!(1, config.threads);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct RunConfig {
    /// The path to the instance file. It is reported exactly as given.
    #[builder(setter(into))]
    pub instance: PathBuf,
    /// The maximum wall clock time granted to the solver
    #[builder(default="DEFAULT_TIME_BUDGET")]
    pub time_budget: Duration,
    /// When true, the solution details are written along with the record
    #[builder(default="false")]
    pub verbose: bool,
    /// The solver to use
    #[builder(default)]
    pub solver: SolverKind,
    /// The order in which branch-and-bound explores its nodes
    #[builder(default)]
    pub order: NodeOrder,
    /// The number of threads used by branch-and-bound. Zero means one per cpu.
    #[builder(default="1")]
    pub threads: usize,
}

impl RunConfig {
    /// Instantiates the solver described by this configuration
    pub fn make_solver(&self) -> Box<dyn Solver> {
        match self.solver {
            SolverKind::Greedy           => Box::new(GreedySolver::natural()),
            SolverKind::EfficiencyGreedy => Box::new(GreedySolver::by_efficiency()),
            SolverKind::BranchAndBound if self.threads == 1 =>
                Box::new(BranchAndBound::new(self.order)),
            SolverKind::BranchAndBound   =>
                Box::new(ParallelBranchAndBound::new(self.threads).with_order(self.order)),
        }
    }
}
