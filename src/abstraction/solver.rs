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

//! This module defines the `Solver` trait.

use std::time::Duration;

use crate::{Error, SolutionState};

/// The time a solver should leave free at the end of its budget so that the
/// result can still be validated and reported within the budget.
pub const SAFETY_MARGIN: Duration = Duration::from_millis(500);

/// This is the solver abstraction. It is implemented by any algorithm
/// (greedy, branch-and-bound, local search, ...) which improves a solution
/// within a given time budget.
///
/// A solver only ever works through the incremental operations of the
/// `SolutionState` it is given (and possibly on clones thereof). It must give
/// control back once the elapsed wall clock time approaches `budget`; by
/// convention it keeps `SAFETY_MARGIN` free for the reporting.
///
/// Upon return, `state` holds whatever the solver considers to be the best
/// solution it found. That solution need not be feasible: feasibility is
/// judged afterwards with `SolutionState::validate`. Solvers never write to
/// the primary output; their diagnostics go through the `log` facade.
pub trait Solver {
    /// Improves `state` in place for at most `budget`.
    fn solve(&mut self, state: &mut SolutionState<'_>, budget: Duration) -> Result<(), Error>;
}
