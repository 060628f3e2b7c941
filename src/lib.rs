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

//! # MKP
//! This crate provides an incremental solution state for the Multidimensional
//! Knapsack Problem (MKP) along with the harness which is used to benchmark
//! solvers on it.
//!
//! An MKP instance (see `ProblemDefinition`) has `n` items, each with a profit
//! and one weight per dimension, and `m` capacities. A solution selects a
//! subset of the items; it is feasible iff the load of each dimension does not
//! exceed its capacity and its objective is the total profit of the selection.
//!
//! The `SolutionState` keeps its objective and loads up to date as items get
//! added and removed, so that a solver can evaluate its moves in `O(m)`
//! rather than recomputing everything. Its `validate` method recomputes it
//! all from scratch and reports the violated constraints, if any.
//!
//! ## Example
//! ```
//! use mkp::*;
//!
//! let problem: ProblemDefinition = "2 1\n10 20\n6 7\n10\n".parse().unwrap();
//! let mut state = SolutionState::new(&problem);
//!
//! assert!(state.can_add(1).unwrap());
//! state.add(1).unwrap();
//! assert!(!state.can_add(0).unwrap());
//!
//! assert_eq!(20, state.objective());
//! assert!(state.validate().is_feasible());
//! ```
//!
//! ## Solvers
//! Any type implementing `Solver` can be plugged into the harness. This crate
//! ships with greedy solvers and (parallel) branch-and-bound ones.

mod common;
mod model;
mod abstraction;
mod implementation;
mod harness;

pub use common::*;
pub use model::*;
pub use abstraction::*;
pub use implementation::*;
pub use harness::*;

#[cfg(test)]
mod test_utils;
