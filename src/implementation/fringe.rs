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

//! This module provides the fringe of the branch-and-bound solvers: a priority
//! queue of the nodes that must still be explored, along with the orderings
//! that can be used to prioritize them.

use std::cmp::Ordering;

use binary_heap_plus::BinaryHeap;
use compare::Compare;

use crate::SolutionState;

/// An open node of the branch-and-bound tree.
#[derive(Debug, Clone)]
pub struct Node<'a> {
    /// The partial solution of this node. It is feasible unless some weights
    /// are negative.
    pub state: SolutionState<'a>,
    /// The number of branching decisions that were made to reach this node
    pub depth: usize,
    /// An upper bound on the objective reachable from this node
    pub ub: i64,
}

/// The order in which the open nodes are explored.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum NodeOrder {
    /// Always expand the deepest node first (ties broken by upper bound).
    /// The fringe never holds more than a couple of nodes per level.
    #[default]
    DepthFirst,
    /// Always expand the node with the highest upper bound first (ties broken
    /// by objective value, then depth). This may need a lot of memory.
    BestFirst,
}

/// Adapts a `NodeOrder` to the `Compare` trait used by the binary heap. The
/// greatest node pops first.
#[derive(Debug, Copy, Clone)]
pub struct CompareNodes(pub NodeOrder);
impl <'a> Compare<Node<'a>> for CompareNodes {
    fn compare(&self, l: &Node<'a>, r: &Node<'a>) -> Ordering {
        match self.0 {
            NodeOrder::DepthFirst => l.depth.cmp(&r.depth)
                .then_with(|| l.ub.cmp(&r.ub)),
            NodeOrder::BestFirst  => l.ub.cmp(&r.ub)
                .then_with(|| l.state.objective().cmp(&r.state.objective()))
                .then_with(|| l.depth.cmp(&r.depth)),
        }
    }
}

/// The set of nodes that must still be explored before the problem can be
/// considered solved.
pub struct Fringe<'a> {
    heap: BinaryHeap<Node<'a>, CompareNodes>,
}
impl <'a> Fringe<'a> {
    /// Creates an empty fringe using the given node order
    pub fn new(order: NodeOrder) -> Self {
        Self { heap: BinaryHeap::from_vec_cmp(vec![], CompareNodes(order)) }
    }
    pub fn push(&mut self, node: Node<'a>) {
        self.heap.push(node)
    }
    pub fn pop(&mut self) -> Option<Node<'a>> {
        self.heap.pop()
    }
    pub fn clear(&mut self) {
        self.heap.clear()
    }
    pub fn len(&self) -> usize {
        self.heap.len()
    }
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod test_fringe {
    use crate::*;
    use crate::test_utils::*;

    fn node<'a>(pb: &'a ProblemDefinition, items: &[usize], depth: usize, ub: i64) -> Node<'a> {
        let mut state = SolutionState::new(pb);
        for item in items {
            state.add(*item).unwrap();
        }
        Node { state, depth, ub }
    }

    #[test]
    fn by_default_it_is_empty() {
        let fringe = Fringe::new(NodeOrder::default());
        assert!(fringe.is_empty());
        assert_eq!(0, fringe.len());
    }
    #[test]
    fn when_i_push_and_pop_the_length_follows() {
        let pb = three_items_two_dims();
        let mut fringe = Fringe::new(NodeOrder::DepthFirst);
        fringe.push(node(&pb, &[], 0, 10));
        fringe.push(node(&pb, &[0], 1, 10));
        assert_eq!(2, fringe.len());
        fringe.pop();
        assert_eq!(1, fringe.len());
        fringe.clear();
        assert!(fringe.is_empty());
        assert!(fringe.pop().is_none());
    }
    #[test]
    fn depth_first_pops_the_deepest_node_first() {
        let pb = three_items_two_dims();
        let mut fringe = Fringe::new(NodeOrder::DepthFirst);
        fringe.push(node(&pb, &[], 1, 100));
        fringe.push(node(&pb, &[0], 3, 5));
        fringe.push(node(&pb, &[1], 2, 50));
        fringe.push(node(&pb, &[2], 3, 7));

        assert_eq!(7,   fringe.pop().unwrap().ub);  // depth 3, better ub
        assert_eq!(5,   fringe.pop().unwrap().ub);  // depth 3
        assert_eq!(50,  fringe.pop().unwrap().ub);  // depth 2
        assert_eq!(100, fringe.pop().unwrap().ub);  // depth 1
    }
    #[test]
    fn best_first_pops_the_highest_upper_bound_first() {
        let pb = three_items_two_dims();
        let mut fringe = Fringe::new(NodeOrder::BestFirst);
        fringe.push(node(&pb, &[], 1, 100));
        fringe.push(node(&pb, &[0], 3, 5));
        fringe.push(node(&pb, &[2], 2, 100));   // same ub, larger objective
        fringe.push(node(&pb, &[1], 2, 50));

        let first = fringe.pop().unwrap();
        assert_eq!(100, first.ub);
        assert_eq!(6, first.state.objective());
        assert_eq!(100, fringe.pop().unwrap().ub);
        assert_eq!(50,  fringe.pop().unwrap().ub);
        assert_eq!(5,   fringe.pop().unwrap().ub);
    }
}
