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

//! This module provides the greedy construction heuristics. These are the
//! simplest solvers one can think of: they walk the items once, in a fixed
//! order, and put each item in the knapsack if it still fits.

use std::time::Duration;

use log::info;

use crate::{Cutoff, Error, IndexError, SAFETY_MARGIN, SolutionState, Solver, TimeBudget};

/// The order in which a greedy solver considers the items
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ItemOrder {
    /// Items are considered by increasing index
    #[default]
    Natural,
    /// Items are considered by decreasing efficiency (see
    /// `ProblemDefinition::efficiency`)
    Efficiency,
}

/// A greedy solver: it adds every item that fits, in the given order. Items
/// which are already selected are left untouched, so this solver can also be
/// used to complete a partial solution.
///
/// # Example
/// ```
/// # use mkp::*;
/// # use std::time::Duration;
/// let problem = ProblemDefinition::new(vec![10, 20], vec![vec![6], vec![7]], vec![10]).unwrap();
///
/// let mut state = SolutionState::new(&problem);
/// GreedySolver::natural().solve(&mut state, Duration::from_secs(1)).unwrap();
/// assert_eq!(10, state.objective()); // item 0 came first and item 1 did not fit
///
/// let mut state = SolutionState::new(&problem);
/// GreedySolver::by_efficiency().solve(&mut state, Duration::from_secs(1)).unwrap();
/// assert_eq!(20, state.objective());
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct GreedySolver {
    order: ItemOrder,
}
impl GreedySolver {
    pub fn new(order: ItemOrder) -> Self {
        Self { order }
    }
    /// Considers the items by increasing index
    pub fn natural() -> Self {
        Self::new(ItemOrder::Natural)
    }
    /// Considers the items by decreasing efficiency
    pub fn by_efficiency() -> Self {
        Self::new(ItemOrder::Efficiency)
    }

    /// Adds every item that fits to `state`, in the configured order, unless
    /// the cutoff fires first. It returns the number of items that were added.
    pub fn complete<C: Cutoff + ?Sized>(&self, state: &mut SolutionState<'_>, cutoff: &C) -> Result<usize, IndexError> {
        let items = match self.order {
            ItemOrder::Natural    => (0..state.problem().item_count()).collect::<Vec<_>>(),
            ItemOrder::Efficiency => state.problem().items_by_efficiency(),
        };

        let mut added = 0;
        for item in items {
            if cutoff.must_stop() {
                break;
            }
            if !state.is_selected(item)? && state.can_add(item)? {
                state.add(item)?;
                added += 1;
            }
        }
        Ok(added)
    }
}

impl Solver for GreedySolver {
    fn solve(&mut self, state: &mut SolutionState<'_>, budget: Duration) -> Result<(), Error> {
        let cutoff = TimeBudget::with_margin(budget, SAFETY_MARGIN);
        let added  = self.complete(state, &cutoff)?;
        info!("greedy ({:?} order) added {} items, objective {} in {:?}",
            self.order, added, state.objective(), cutoff.elapsed());
        Ok(())
    }
}
