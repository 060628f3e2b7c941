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

//! This module provides the implementation of the cutoff policies that can be
//! used to bound the time a solver spends on a problem.

use std::time::{Duration, Instant};

use crate::Cutoff;

/// This cutoff never stops the search. The solver only stops when it has
/// nothing left to explore.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoCutoff;
impl Cutoff for NoCutoff {
    fn must_stop(&self) -> bool {false}
}

/// This cutoff allows one to specify a maximum time budget to solve the problem.
/// Once the time budget is elapsed, `must_stop` returns true and the solver is
/// expected to return the best solution it found so far.
///
/// The clock starts ticking when the cutoff is created. Nothing runs in the
/// background: the elapsed time is only measured when the cutoff is polled.
///
/// # Example
/// ```
/// # use mkp::*;
/// use std::time::Duration;
///
/// let cutoff = TimeBudget::with_margin(Duration::from_secs(30), SAFETY_MARGIN);
/// assert!(!cutoff.must_stop()); // 29.5 seconds are left
///
/// let cutoff = TimeBudget::with_margin(Duration::from_millis(200), SAFETY_MARGIN);
/// assert!(cutoff.must_stop()); // the margin swallows the whole budget
/// ```
#[derive(Debug, Copy, Clone)]
pub struct TimeBudget {
    start: Instant,
    limit: Duration,
}
impl TimeBudget {
    /// Creates a cutoff that fires once `budget` has elapsed
    pub fn new(budget: Duration) -> Self {
        Self { start: Instant::now(), limit: budget }
    }
    /// Creates a cutoff that fires once `budget - margin` has elapsed
    /// (immediately if the margin exceeds the budget).
    pub fn with_margin(budget: Duration, margin: Duration) -> Self {
        Self::new(budget.saturating_sub(margin))
    }
    /// The time elapsed since this cutoff was created
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
    /// The time left before this cutoff fires
    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.elapsed())
    }
}
impl Cutoff for TimeBudget {
    fn must_stop(&self) -> bool {
        self.elapsed() >= self.limit
    }
}
