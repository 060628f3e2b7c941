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

//! This module provides the implementation of a parallel branch-and-bound
//! solver. The search tree is split on its first few branching decisions and
//! the resulting subtrees are handed out to a pool of worker threads. All the
//! workers share one single incumbent, which means that a good solution found
//! by one of them immediately helps the others prune their own subtree.

use std::time::Duration;

use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::{Completion, Error, IndexError, NodeOrder, Node, SAFETY_MARGIN, SolutionState, Solver, TimeBudget};

use super::search::{Incumbent, Search};

/// The number of subtrees the search is split into per worker thread
const SUBTREES_PER_THREAD: usize = 4;
/// The maximum number of branching decisions used to split the search
const MAX_SPLIT_DEPTH: usize = 16;
/// The maximum number of worker threads
pub const MAX_THREADS: usize = 1024;

/// A branch-and-bound solver which uses several threads. Its results are
/// identical to the ones of `BranchAndBound` (when optimality is proved), only
/// quicker to obtain on large instances.
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
/// let mut solver = ParallelBranchAndBound::new(2);
/// solver.solve(&mut state, Duration::from_secs(2)).unwrap();
///
/// assert_eq!(25, state.objective());
/// ```
#[derive(Debug, Clone)]
pub struct ParallelBranchAndBound {
    /// The number of worker threads
    nb_threads: usize,
    /// the order in which each worker explores its open nodes
    order: NodeOrder,
    /// the number of nodes expanded during the last call to `solve`
    explored: usize,
    /// did the last call to `solve` prove optimality ?
    is_exact: bool,
}
impl Default for ParallelBranchAndBound {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}
impl ParallelBranchAndBound {
    /// Creates a solver with the given number of threads. Zero means one
    /// thread per cpu. The number of threads is capped at `MAX_THREADS`.
    pub fn new(nb_threads: usize) -> Self {
        let nb_threads = if nb_threads == 0 { num_cpus::get() } else { nb_threads };
        if nb_threads > MAX_THREADS {
            warn!("{} threads were requested, using {} instead", nb_threads, MAX_THREADS);
        }
        let nb_threads = nb_threads.min(MAX_THREADS);
        Self { nb_threads, order: NodeOrder::default(), explored: 0, is_exact: false }
    }
    /// Sets the order in which the workers explore their nodes
    pub fn with_order(mut self, order: NodeOrder) -> Self {
        self.order = order;
        self
    }
    pub fn nb_threads(&self) -> usize {
        self.nb_threads
    }
    /// The number of nodes that were expanded during the last resolution
    pub fn explored(&self) -> usize {
        self.explored
    }
    /// True iff the last resolution proved the optimality of its solution
    pub fn is_exact(&self) -> bool {
        self.is_exact
    }

    /// Expands the root until it has enough subtrees to keep all threads busy.
    /// Subtrees which cannot improve on the incumbent are not kept.
    fn split<'a>(&self, search: &Search, root: Node<'a>, incumbent: &Incumbent<'a>) -> Result<Vec<Node<'a>>, IndexError> {
        let wanted = self.nb_threads.saturating_mul(SUBTREES_PER_THREAD);
        let depth  = search.depth().min(MAX_SPLIT_DEPTH);

        let mut current = vec![root];
        for _ in 0..depth {
            if current.len() >= wanted {
                break;
            }
            let mut next = Vec::with_capacity(2 * current.len());
            for node in current {
                next.extend(search.branch(node)?);
            }
            next.retain(|n| n.ub > incumbent.value());
            current = next;
        }
        // workers pop from the back: the most promising subtrees go first
        current.sort_unstable_by_key(|n| n.ub);
        Ok(current)
    }
}

impl Solver for ParallelBranchAndBound {
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
        let subtrees  = self.split(&search, root, &incumbent)?;
        debug!("search split into {} subtrees for {} threads", subtrees.len(), self.nb_threads);

        let queue = Mutex::new(subtrees);
        let order = self.order;
        let outcomes = std::thread::scope(|s| {
            let handles = (0..self.nb_threads).map(|_| {
                let (search, incumbent, cutoff, queue) = (&search, &incumbent, &cutoff, &queue);
                s.spawn(move || {
                    let mut total = Completion { is_exact: true, explored: 0 };
                    loop {
                        let node = queue.lock().pop();
                        match node {
                            None       => break,
                            Some(node) => {
                                let done = search.explore(node, incumbent, cutoff, order)?;
                                total.explored += done.explored;
                                total.is_exact &= done.is_exact;
                            }
                        }
                    }
                    Ok::<_, IndexError>(total)
                })
            }).collect::<Vec<_>>();

            handles.into_iter()
                .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect::<Vec<_>>()
        });

        self.is_exact = true;
        for outcome in outcomes {
            let done = outcome?;
            self.explored += done.explored;
            self.is_exact &= done.is_exact;
        }
        *state = incumbent.into_inner();

        info!("parallel branch-and-bound ({} threads) explored {} nodes in {:?}, objective {} ({})",
            self.nb_threads, self.explored, cutoff.elapsed(), state.objective(),
            if self.is_exact { "optimal" } else { "cutoff occurred" });
        Ok(())
    }
}
