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

//! This module provides the pieces that are shared by the sequential and the
//! parallel branch-and-bound solvers: the incumbent (best known solution) and
//! the exploration of a subtree.

use std::sync::atomic::{AtomicI64, Ordering};

use log::debug;
use parking_lot::Mutex;

use crate::{Cutoff, Fringe, GreedySolver, IndexError, Node, NodeOrder, SolutionState};

use super::bound::UpperBound;

// ----------------------------------------------------------------------------
// --- INCUMBENT --------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The best feasible solution found so far. It can safely be shared among
/// several threads: the value is readable without locking, which makes the
/// pruning test cheap.
#[derive(Debug)]
pub struct Incumbent<'a> {
    value: AtomicI64,
    best : Mutex<SolutionState<'a>>,
}
impl <'a> Incumbent<'a> {
    pub fn new(state: SolutionState<'a>) -> Self {
        Self { value: AtomicI64::new(state.objective()), best: Mutex::new(state) }
    }
    /// The objective value of the best known solution
    #[inline]
    pub fn value(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }
    /// Replaces the best known solution with `candidate` if it is strictly
    /// better. The candidate must be feasible. Returns true iff the incumbent
    /// was replaced.
    pub fn offer(&self, candidate: &SolutionState<'a>) -> bool {
        if candidate.objective() <= self.value() {
            return false;
        }
        let mut best = self.best.lock();
        if candidate.objective() > best.objective() {
            *best = candidate.clone();
            self.value.store(candidate.objective(), Ordering::Relaxed);
            debug!("new incumbent: objective {}", candidate.objective());
            true
        } else {
            false
        }
    }
    pub fn into_inner(self) -> SolutionState<'a> {
        self.best.into_inner()
    }
}

// ----------------------------------------------------------------------------
// --- SEARCH -----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The outcome of the exploration of a subtree
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Completion {
    /// is the subtree fully explored (proved optimal) or was the exploration
    /// stopped by the cutoff ?
    pub is_exact: bool,
    /// the number of nodes that were expanded
    pub explored: usize,
}

/// A branch-and-bound search tree rooted at a given feasible state. The items
/// which are selected in the root are fixed; the other ones are branched on
/// in decreasing efficiency order (include first, then exclude).
///
/// When some weights are negative, a node may be infeasible and still lead to
/// feasible leaves. Such a node is kept as long as the negative weights of the
/// undecided items can bring each load back below its capacity.
#[derive(Debug, Clone)]
pub struct Search {
    /// the undecided items, in branching order
    order: Vec<usize>,
    bound: UpperBound,
    /// the number of dimensions
    nb_dims: usize,
    /// relief[d * nb_dims + i] is the sum of the negative weights in dimension
    /// i of the items order[d..]. Empty when all weights are nonnegative.
    relief: Vec<i64>,
}
impl Search {
    pub fn new(root: &SolutionState<'_>) -> Self {
        let problem = root.problem();
        let order   = problem.items_by_efficiency().into_iter()
            .filter(|j| !root.is_selected(*j).unwrap_or(true))
            .collect::<Vec<_>>();
        let bound   = UpperBound::new(root, &order);
        let nb_dims = problem.dimension_count();

        let mut relief = vec![];
        if !problem.has_nonnegative_weights() {
            relief = vec![0; (order.len() + 1) * nb_dims];
            for d in (0..order.len()).rev() {
                for i in 0..nb_dims {
                    let w = problem.row(order[d])[i];
                    relief[d * nb_dims + i] = relief[(d + 1) * nb_dims + i] + w.min(0);
                }
            }
        }
        Self { order, bound, nb_dims, relief }
    }
    /// The number of branching decisions from the root to a leaf
    pub fn depth(&self) -> usize {
        self.order.len()
    }
    /// Turns a state into a node at the given depth
    pub fn node<'a>(&self, state: SolutionState<'a>, depth: usize) -> Node<'a> {
        let ub = self.bound.estimate(&state, depth);
        Node { state, depth, ub }
    }

    /// The first incumbent: the better of the root itself and its greedy
    /// completion (in the same order as the branching one).
    pub fn initial_incumbent<'a, C>(&self, root: &SolutionState<'a>, cutoff: &C) -> Result<Incumbent<'a>, IndexError>
    where C: Cutoff + ?Sized
    {
        let mut greedy = root.clone();
        GreedySolver::by_efficiency().complete(&mut greedy, cutoff)?;
        debug!("greedy incumbent: objective {}", greedy.objective());
        if greedy.objective() >= root.objective() {
            Ok(Incumbent::new(greedy))
        } else {
            Ok(Incumbent::new(root.clone()))
        }
    }

    /// Returns the children of a node (include first, then exclude). Children
    /// which cannot lead to any feasible leaf are not returned.
    pub fn branch<'a>(&self, node: Node<'a>) -> Result<Vec<Node<'a>>, IndexError> {
        let mut children = Vec::with_capacity(2);
        if node.depth >= self.order.len() {
            return Ok(children);
        }
        let item  = self.order[node.depth];
        let depth = node.depth + 1;
        let state = node.state;

        let include = if self.relief.is_empty() { state.can_add(item)? } else { true };
        if include {
            let mut with = state.clone();
            with.add(item)?;
            if self.is_viable(&with, depth) {
                children.push(self.node(with, depth));
            }
        }
        if self.is_viable(&state, depth) {
            children.push(self.node(state, depth));
        }
        Ok(children)
    }
    /// True iff the loads of `state` can still fit the capacities once the
    /// items order[depth..] are decided.
    fn is_viable(&self, state: &SolutionState<'_>, depth: usize) -> bool {
        if self.relief.is_empty() {
            return state.is_feasible();
        }
        let relief = &self.relief[depth * self.nb_dims..(depth + 1) * self.nb_dims];
        state.loads().iter()
            .zip(relief)
            .zip(state.problem().capacities())
            .all(|((load, relief), capacity)| load + relief <= *capacity)
    }

    /// Explores the subtree rooted at `root` until it is exhausted or the
    /// cutoff fires. Every improving solution is offered to the incumbent.
    pub fn explore<'a, C>(&self, root: Node<'a>, incumbent: &Incumbent<'a>, cutoff: &C, order: NodeOrder) -> Result<Completion, IndexError>
    where C: Cutoff + ?Sized
    {
        let mut fringe   = Fringe::new(order);
        let mut explored = 0;
        fringe.push(root);

        while let Some(node) = fringe.pop() {
            if cutoff.must_stop() {
                return Ok(Completion { is_exact: false, explored });
            }
            if node.ub <= incumbent.value() {
                continue;
            }
            explored += 1;
            if node.state.is_feasible() {
                incumbent.offer(&node.state);
            }
            for child in self.branch(node)? {
                if child.ub > incumbent.value() {
                    fringe.push(child);
                }
            }
        }
        Ok(Completion { is_exact: true, explored })
    }
}
