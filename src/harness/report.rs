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

//! This module turns the outcome of a run into the record which is written on
//! the primary output: `<instance>;<objective>;<elapsed ms>;<status>`.

use std::{fmt, io::Write, time::Duration};

use crate::{SolutionState, Validation};

/// How much longer than its budget a solver may run before the run is
/// reported as overtime.
pub const GRACE_PERIOD: Duration = Duration::from_secs(1);

/// The status code of a run
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Status {
    /// The solution is feasible and was found within the time budget
    Feasible,
    /// The solution violates at least one constraint
    Infeasible,
    /// The solver exceeded its time budget (plus the grace period)
    BudgetExceeded,
}
impl Status {
    /// Derives the status of a run. Overtime is checked independently of the
    /// feasibility and takes precedence over it.
    pub fn derive(feasible: bool, elapsed: Duration, budget: Duration) -> Self {
        if elapsed > budget.saturating_add(GRACE_PERIOD) {
            Status::BudgetExceeded
        } else if feasible {
            Status::Feasible
        } else {
            Status::Infeasible
        }
    }
    /// The numeric code which is reported in the record
    pub fn code(self) -> u8 {
        match self {
            Status::Feasible       => 0,
            Status::Infeasible     => 1,
            Status::BudgetExceeded => 2,
        }
    }
}

/// The outcome of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The instance file name, as it was given
    pub instance: String,
    /// The objective value of the final solution
    pub objective: i64,
    /// The duration of the solve phase
    pub elapsed: Duration,
    /// The status code derived from the validation and the elapsed time
    pub status: Status,
    /// The from-scratch validation of the final solution
    pub validation: Validation,
}
impl Report {
    /// Validates `state` from scratch and derives the status of the run
    pub fn new(instance: String, state: &mut SolutionState<'_>, elapsed: Duration, budget: Duration) -> Self {
        let validation = state.validate();
        let status     = Status::derive(validation.is_feasible(), elapsed, budget);
        Self { instance, objective: state.objective(), elapsed, status, validation }
    }

    /// Writes the human readable details of the solution: the chosen items,
    /// what is wrong with it (if anything) and the load of each constraint.
    pub fn write_details<W: Write>(&self, out: &mut W, state: &SolutionState<'_>) -> std::io::Result<()> {
        write!(out, "{}", state.summary())?;
        if self.status == Status::Infeasible {
            writeln!(out, "Error: There is an error in the solution: {}", self.validation)?;
        }
        writeln!(out, "******* Value of constraints ********")?;
        write!(out, "{}", state.constraints())
    }
}
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{};{};{}",
            self.instance, self.objective, self.elapsed.as_millis(), self.status.code())
    }
}
