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

//! This module defines the `SolutionState`: the selection of items a search
//! algorithm works on, along with the incrementally maintained objective value
//! and per-dimension load. It also defines the `Validation` which is the
//! outcome of a from-scratch feasibility check.

use std::fmt;

use crate::{IndexError, IndexKind, ProblemDefinition};

// ----------------------------------------------------------------------------
// --- SOLUTION STATE ---------------------------------------------------------
// ----------------------------------------------------------------------------
/// A (possibly partial) selection of the items of a problem.
///
/// The objective value and the load of each dimension are cached and updated
/// along with each mutation. As a consequence `add`, `remove` and `can_add`
/// all run in O(nb dimensions) regardless of the number of items. At any time
/// the following invariants hold:
///
/// * `objective() == Σ profit[j]` over the selected items
/// * `load(i) == Σ weight[j][i]` over the selected items, for every dimension
///
/// Feasibility is *not* an invariant: `add` never checks it. This lets a search
/// algorithm explore infeasible states on purpose (e.g. before a repair).
/// Callers that need a feasibility guarantee are expected to call `can_add`
/// first.
///
/// Cloning a solution state yields an independent deep copy which shares the
/// (immutable) problem definition with the original.
///
/// # Example
/// ```
/// # use mkp::*;
/// let problem = ProblemDefinition::new(vec![10, 20], vec![vec![6], vec![7]], vec![10]).unwrap();
/// let mut state = SolutionState::new(&problem);
///
/// state.add(0).unwrap();
/// assert_eq!(10, state.objective());
/// assert_eq!(&[6], state.loads());
/// assert!(!state.can_add(1).unwrap()); // 6 + 7 > 10
///
/// let validation = state.validate();
/// assert!(validation.is_feasible());
/// assert_eq!(4, state.remaining_capacity(0).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionState<'a> {
    /// The problem this solution is a solution of
    problem: &'a ProblemDefinition,
    /// selected[j] is true iff item j is in the knapsack
    selected: Vec<bool>,
    /// The number of items that are currently selected
    nb_selected: usize,
    /// The cached total profit of the selected items
    objective: i64,
    /// The cached per-dimension consumption of the selected items
    load: Vec<i64>,
}

impl <'a> SolutionState<'a> {
    /// Creates an empty solution (no item selected, objective and loads all
    /// zero) for the given problem.
    pub fn new(problem: &'a ProblemDefinition) -> Self {
        SolutionState {
            problem,
            selected: vec![false; problem.item_count()],
            nb_selected: 0,
            objective: 0,
            load: vec![0; problem.dimension_count()],
        }
    }

    /// The problem definition this state was built from
    #[inline]
    pub fn problem(&self) -> &'a ProblemDefinition {
        self.problem
    }

    /// Returns true iff adding `item` to the current selection would respect
    /// the capacity of every dimension. This is a pure predicate evaluated on
    /// the cached loads; it does not care whether the item is already selected.
    pub fn can_add(&self, item: usize) -> Result<bool, IndexError> {
        let item = IndexError::check(IndexKind::Item, item, self.selected.len())?;
        Ok(self.load.iter()
            .zip(self.problem.row(item))
            .zip(self.problem.capacities())
            .all(|((load, weight), capacity)| load + weight <= *capacity))
    }

    /// Puts `item` in the knapsack. This is a no-op if the item was already
    /// selected.
    ///
    /// # Note
    /// This method does not check the feasibility of the resulting state.
    pub fn add(&mut self, item: usize) -> Result<(), IndexError> {
        let item = IndexError::check(IndexKind::Item, item, self.selected.len())?;
        if !self.selected[item] {
            self.selected[item] = true;
            self.nb_selected   += 1;
            self.objective     += self.problem.profits()[item];
            for (load, weight) in self.load.iter_mut().zip(self.problem.row(item)) {
                *load += weight;
            }
        }
        Ok(())
    }

    /// Takes `item` out of the knapsack. This is a no-op if the item was not
    /// selected.
    pub fn remove(&mut self, item: usize) -> Result<(), IndexError> {
        let item = IndexError::check(IndexKind::Item, item, self.selected.len())?;
        if self.selected[item] {
            self.selected[item] = false;
            self.nb_selected   -= 1;
            self.objective     -= self.problem.profits()[item];
            for (load, weight) in self.load.iter_mut().zip(self.problem.row(item)) {
                *load -= weight;
            }
        }
        Ok(())
    }

    /// Returns true iff `item` is currently in the knapsack.
    pub fn is_selected(&self, item: usize) -> Result<bool, IndexError> {
        let item = IndexError::check(IndexKind::Item, item, self.selected.len())?;
        Ok(self.selected[item])
    }

    /// Empties the knapsack.
    pub fn clear(&mut self) {
        self.selected.iter_mut().for_each(|s| *s = false);
        self.load.iter_mut().for_each(|l| *l = 0);
        self.nb_selected = 0;
        self.objective   = 0;
    }

    /// The (cached) total profit of the selected items
    #[inline]
    pub fn objective(&self) -> i64 {
        self.objective
    }
    /// The (cached) consumption of resource `dimension`
    pub fn load(&self, dimension: usize) -> Result<i64, IndexError> {
        let dim = IndexError::check(IndexKind::Dimension, dimension, self.load.len())?;
        Ok(self.load[dim])
    }
    /// The (cached) consumption of all resources
    #[inline]
    pub fn loads(&self) -> &[i64] {
        &self.load
    }
    /// How much of resource `dimension` is still available. This is negative
    /// when the capacity of the dimension is exceeded.
    pub fn remaining_capacity(&self, dimension: usize) -> Result<i64, IndexError> {
        Ok(self.problem.capacity_of(dimension)? - self.load(dimension)?)
    }
    /// The number of selected items
    #[inline]
    pub fn len(&self) -> usize {
        self.nb_selected
    }
    /// True iff no item is selected
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nb_selected == 0
    }
    /// Iterates over the selected items in increasing order
    pub fn selected_items(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().enumerate().filter(|(_, s)| **s).map(|(j, _)| j)
    }

    /// Checks that no capacity is exceeded using the cached loads.
    ///
    /// This trusts the incremental bookkeeping. Use `validate` when you
    /// need an authoritative answer.
    pub fn is_feasible(&self) -> bool {
        self.load.iter()
            .zip(self.problem.capacities())
            .all(|(load, capacity)| load <= capacity)
    }

    /// Recomputes the objective and every load from the selection alone, in
    /// O(nb items × nb dimensions). The cached values are overwritten with the
    /// recomputed ones, which are returned.
    pub fn recompute_from_scratch(&mut self) -> (i64, &[i64]) {
        let mut objective   = 0;
        let mut nb_selected = 0;
        self.load.iter_mut().for_each(|l| *l = 0);

        for (item, _) in self.selected.iter().enumerate().filter(|(_, s)| **s) {
            nb_selected += 1;
            objective   += self.problem.profits()[item];
            for (load, weight) in self.load.iter_mut().zip(self.problem.row(item)) {
                *load += weight;
            }
        }
        self.objective   = objective;
        self.nb_selected = nb_selected;
        (self.objective, &self.load)
    }

    /// Recomputes the load of one single dimension from the selection,
    /// overwriting the cached value.
    pub fn recompute_load(&mut self, dimension: usize) -> Result<i64, IndexError> {
        let dim  = IndexError::check(IndexKind::Dimension, dimension, self.load.len())?;
        let load = self.selected_items()
            .map(|item| self.problem.row(item)[dim])
            .sum::<i64>();
        self.load[dim] = load;
        Ok(load)
    }

    /// This is the authoritative feasibility check. It never trusts the cached
    /// values: it first recomputes everything from scratch and then checks
    /// each dimension against the recomputed load. All violated dimensions are
    /// reported, not only the first one.
    pub fn validate(&mut self) -> Validation {
        let problem = self.problem;
        let (_, loads) = self.recompute_from_scratch();

        let violations = loads.iter()
            .zip(problem.capacities())
            .enumerate()
            .filter(|(_, (load, capacity))| load > capacity)
            .map(|(dimension, (load, capacity))| Violation { dimension, load: *load, capacity: *capacity })
            .collect();

        Validation { violations }
    }

    /// A human readable summary: the objective value and the chosen items
    pub fn summary(&self) -> Summary<'_, 'a> {
        Summary(self)
    }
    /// A human readable report on the load of each dimension
    pub fn constraints(&self) -> ConstraintsReport<'_, 'a> {
        ConstraintsReport(self)
    }
}

// ----------------------------------------------------------------------------
// --- VALIDATION -------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A dimension whose capacity is exceeded
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Violation {
    /// The violated dimension
    pub dimension: usize,
    /// The (recomputed) load of that dimension
    pub load: i64,
    /// The capacity of that dimension
    pub capacity: i64,
}

/// The outcome of `SolutionState::validate`. Its `Display` implementation
/// yields the diagnostic text: one line per violated dimension followed by a
/// conclusion line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    /// All the violated dimensions, in increasing order
    pub violations: Vec<Violation>,
}
impl Validation {
    /// True iff no dimension is violated
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }
    /// The diagnostic text
    pub fn diagnostic(&self) -> String {
        self.to_string()
    }
}
impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in self.violations.iter() {
            writeln!(f, "Error: constraint {} is violated ({} > {}).", v.dimension, v.load, v.capacity)?;
        }
        if self.is_feasible() {
            write!(f, "Solution is feasible for MKP.")
        } else {
            write!(f, "Solution is unfeasible for MKP.")
        }
    }
}

// ----------------------------------------------------------------------------
// --- PRINTING ---------------------------------------------------------------
// ----------------------------------------------------------------------------
/// Displays the objective value and the chosen items of a solution
#[derive(Debug, Clone, Copy)]
pub struct Summary<'s, 'a>(&'s SolutionState<'a>);
impl fmt::Display for Summary<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MKP objective value: {}", self.0.objective())?;
        writeln!(f, "Objects chosen: ")?;
        for item in self.0.selected_items() {
            write!(f, "{} / ", item)?;
        }
        writeln!(f)
    }
}

/// Displays the load, capacity and remaining capacity of each dimension
#[derive(Debug, Clone, Copy)]
pub struct ConstraintsReport<'s, 'a>(&'s SolutionState<'a>);
impl fmt::Display for ConstraintsReport<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        for (dim, (load, capacity)) in state.loads().iter().zip(state.problem().capacities()).enumerate() {
            writeln!(f, "Constraint {}: {} <= {} / Remaining = {}", dim, load, capacity, capacity - load)?;
        }
        Ok(())
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
