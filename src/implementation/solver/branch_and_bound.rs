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

//! This module provides the implementation of a sequential branch-and-bound
//! solver. That is a solver that explores the search tree using one single
//! thread of execution.

use std::time::Duration;

use log::{info, warn};

use crate::{Error, NodeOrder, SAFETY_MARGIN, SolutionState, Solver, TimeBudget};

use super::search::Search;

/// A branch-and-bound solver. It proves optimality when it is given enough
/// time, and returns the best solution it found otherwise.
///
/// The items which are selected in the state it is given are kept; the search
/// decides on the other ones. If the given state is infeasible, it is emptied
/// first.
///
/// # Example
/// ```
/// # use mkp::*;
/// # use std::time::Duration;
/// let problem = ProblemDefinition::new(
///     vec![10, 20, 15],
///     vec![vec![6, 1], vec![7, 5], vec![4, 5]],
///     vec![10, 10],
/// ).unwrap();
///
/// let mut state  = SolutionState::new(&problem);
/// let mut solver = BranchAndBound::default();
/// solver.solve(&mut state, Duration::from_secs(2)).unwrap();
///
/// assert_eq!(25, state.objective()); // items 0 and 2
/// assert!(solver.is_exact());
/// ```
#[derive(Debug, Default, Clone)]
pub struct BranchAndBound {
    /// the order in which the open nodes are explored
    order: NodeOrder,
    /// the number of nodes expanded during the last call to `solve`
    explored: usize,
    /// did the last call to `solve` prove optimality ?
    is_exact: bool,
}
impl BranchAndBound {
    pub fn new(order: NodeOrder) -> Self {
        Self { order, explored: 0, is_exact: false }
    }
    /// The number of nodes that were expanded during the last resolution
    pub fn explored(&self) -> usize {
        self.explored
    }
    /// True iff the last resolution proved the optimality of its solution
    pub fn is_exact(&self) -> bool {
        self.is_exact
    }
}

impl Solver for BranchAndBound {
    fn solve(&mut self, state: &mut SolutionState<'_>, budget: Duration) -> Result<(), Error> {
        let cutoff = TimeBudget::with_margin(budget, SAFETY_MARGIN);
        self.explored = 0;
        self.is_exact = false;

        if !state.is_feasible() {
            warn!("the initial solution is infeasible, starting from an empty knapsack");
            state.clear();
            if !state.is_feasible() {
                warn!("even the empty knapsack is infeasible, giving up");
                return Ok(());
            }
        }

        let search    = Search::new(state);
        let incumbent = search.initial_incumbent(state, &cutoff)?;
        let root      = search.node(state.clone(), 0);
        let done      = search.explore(root, &incumbent, &cutoff, self.order)?;

        self.explored = done.explored;
        self.is_exact = done.is_exact;
        *state = incumbent.into_inner();

        info!("branch-and-bound explored {} nodes in {:?}, objective {} ({})",
            self.explored, cutoff.elapsed(), state.objective(),
            if self.is_exact { "optimal" } else { "cutoff occurred" });
        Ok(())
    }
}

#[cfg(test)]
mod test_branch_and_bound {
    use std::time::Duration;

    use crate::*;
    use crate::test_utils::*;

    #[test]
    fn it_finds_the_optimum_of_the_two_items_instance() {
        let pb = two_items();
        let mut state = SolutionState::new(&pb);
        let mut solver = BranchAndBound::default();
        solver.solve(&mut state, Duration::from_secs(5)).unwrap();
        assert_eq!(20, state.objective());
        assert_eq!(vec![1], state.selected_items().collect::<Vec<_>>());
        assert!(solver.is_exact());
    }
    #[test]
    fn both_node_orders_find_the_brute_force_optimum() {
        for seed in 0..20 {
            let pb = pseudo_random_problem(seed, 15, 4);
            let expected = brute_force_optimum(&pb);
            for order in [NodeOrder::DepthFirst, NodeOrder::BestFirst] {
                let mut state = SolutionState::new(&pb);
                let mut solver = BranchAndBound::new(order);
                solver.solve(&mut state, Duration::from_secs(10)).unwrap();
                assert!(solver.is_exact());
                assert_eq!(expected, state.objective());
                assert!(state.validate().is_feasible());
            }
        }
    }
    #[test]
    fn the_selected_items_are_kept() {
        let pb = two_items();
        let mut state = SolutionState::new(&pb);
        state.add(0).unwrap();
        BranchAndBound::default().solve(&mut state, Duration::from_secs(5)).unwrap();
        assert_eq!(vec![0], state.selected_items().collect::<Vec<_>>());
        assert_eq!(10, state.objective());
    }
    #[test]
    fn an_infeasible_start_is_repaired() {
        let pb = two_items();
        let mut state = SolutionState::new(&pb);
        state.add(0).unwrap();
        state.add(1).unwrap();
        BranchAndBound::default().solve(&mut state, Duration::from_secs(5)).unwrap();
        assert!(state.validate().is_feasible());
        assert_eq!(20, state.objective());
    }
    #[test]
    fn negative_weights_are_handled() {
        let pb = ProblemDefinition::new(
            vec![5, 3, 4],
            vec![vec![8], vec![-4], vec![3]],
            vec![6],
        ).unwrap();
        let mut state = SolutionState::new(&pb);
        BranchAndBound::default().solve(&mut state, Duration::from_secs(5)).unwrap();
        assert_eq!(brute_force_optimum(&pb), state.objective());
    }
    #[test]
    fn a_tiny_budget_still_returns_a_feasible_solution() {
        let pb = pseudo_random_problem(11, 200, 5);
        let mut state = SolutionState::new(&pb);
        let mut solver = BranchAndBound::default();
        solver.solve(&mut state, Duration::from_millis(600)).unwrap();
        assert!(state.validate().is_feasible());
        assert!(state.objective() > 0);
    }
}
