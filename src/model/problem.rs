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

//! This module defines the `ProblemDefinition`: the immutable description of
//! a multidimensional knapsack instance. Once built, a problem definition is
//! never mutated again; it is shared by reference among all the solutions that
//! are derived from it.

use std::fmt;

use crate::{FormatError, IndexError, IndexKind};

/// The items (profit and per-dimension weight) and the per-dimension
/// capacities of a multidimensional knapsack instance.
///
/// Every accessor bounds-checks its arguments and fails with an `IndexError`
/// rather than silently clamping an out-of-range index.
///
/// # Example
/// ```
/// # use mkp::*;
/// let problem = ProblemDefinition::new(
///     vec![10, 20],
///     vec![vec![6], vec![7]],
///     vec![10],
/// ).unwrap();
///
/// assert_eq!(2,  problem.item_count());
/// assert_eq!(1,  problem.dimension_count());
/// assert_eq!(20, problem.profit_of(1).unwrap());
/// assert_eq!(7,  problem.weight_of(1, 0).unwrap());
/// assert_eq!(10, problem.capacity_of(0).unwrap());
/// assert!(problem.profit_of(2).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemDefinition {
    /// The profit of each item
    profit: Vec<i64>,
    /// The weights, laid out item after item: the weights of item `j` are
    /// found at `weight[j * nb_dimensions .. (j+1) * nb_dimensions]`
    weight: Vec<i64>,
    /// The capacity of each dimension
    capacity: Vec<i64>,
}

impl ProblemDefinition {
    /// Assembles a problem definition from its profits, its weights (one row
    /// per item, each row holding one weight per dimension) and capacities.
    ///
    /// This fails with a `FormatError::Shape` when the pieces do not have
    /// consistent sizes, and with a `FormatError::OutOfRange` when a value
    /// does not fit in 32 bits.
    pub fn new(profit: Vec<i64>, weights: Vec<Vec<i64>>, capacity: Vec<i64>) -> Result<Self, FormatError> {
        check_range("a profit", &profit)?;
        check_range("a capacity", &capacity)?;
        for row in weights.iter() {
            check_range("a weight", row)?;
        }
        if weights.len() != profit.len() {
            return Err(FormatError::Shape(format!(
                "{} weight rows were given for {} items", weights.len(), profit.len())));
        }
        let nb_dimensions = capacity.len();
        let mut weight = Vec::with_capacity(profit.len() * nb_dimensions);
        for (item, row) in weights.into_iter().enumerate() {
            if row.len() != nb_dimensions {
                return Err(FormatError::Shape(format!(
                    "item {} has {} weights but there are {} dimensions", item, row.len(), nb_dimensions)));
            }
            weight.extend(row);
        }
        Ok(Self { profit, weight, capacity })
    }

    /// Assembles a problem from an item-major flat weight vector whose size
    /// has already been validated by the caller.
    pub(crate) fn from_parts(profit: Vec<i64>, weight: Vec<i64>, capacity: Vec<i64>) -> Self {
        debug_assert_eq!(weight.len(), profit.len() * capacity.len());
        Self { profit, weight, capacity }
    }

    /// The number of items in this instance
    #[inline]
    pub fn item_count(&self) -> usize {
        self.profit.len()
    }
    /// The number of dimensions (capacity constraints) of this instance.
    /// This may be zero, in which case the problem is unconstrained.
    #[inline]
    pub fn dimension_count(&self) -> usize {
        self.capacity.len()
    }
    /// The profit of the given item
    pub fn profit_of(&self, item: usize) -> Result<i64, IndexError> {
        let item = IndexError::check(IndexKind::Item, item, self.item_count())?;
        Ok(self.profit[item])
    }
    /// The amount of resource `dimension` consumed by `item`
    pub fn weight_of(&self, item: usize, dimension: usize) -> Result<i64, IndexError> {
        let item = IndexError::check(IndexKind::Item, item, self.item_count())?;
        let dim  = IndexError::check(IndexKind::Dimension, dimension, self.dimension_count())?;
        Ok(self.weight[item * self.dimension_count() + dim])
    }
    /// The capacity of the given dimension
    pub fn capacity_of(&self, dimension: usize) -> Result<i64, IndexError> {
        let dim = IndexError::check(IndexKind::Dimension, dimension, self.dimension_count())?;
        Ok(self.capacity[dim])
    }
    /// All the weights of the given item (one per dimension)
    pub fn weights_of(&self, item: usize) -> Result<&[i64], IndexError> {
        let item = IndexError::check(IndexKind::Item, item, self.item_count())?;
        Ok(self.row(item))
    }
    /// The profits of all items
    #[inline]
    pub fn profits(&self) -> &[i64] {
        &self.profit
    }
    /// The capacities of all dimensions
    #[inline]
    pub fn capacities(&self) -> &[i64] {
        &self.capacity
    }

    /// Unchecked access to the weights row of an item. The caller must have
    /// checked the index beforehand.
    #[inline]
    pub(crate) fn row(&self, item: usize) -> &[i64] {
        let m = self.dimension_count();
        &self.weight[item * m..(item + 1) * m]
    }

    /// The sum of all positive profits. No solution can ever have a larger
    /// objective value.
    pub fn total_profit(&self) -> i64 {
        self.profit.iter().copied().filter(|p| *p > 0).sum()
    }
    /// True iff no item ever consumes a negative amount of any resource.
    pub fn has_nonnegative_weights(&self) -> bool {
        self.weight.iter().all(|w| *w >= 0)
    }
    /// The efficiency of an item: its profit per unit of normalized weight.
    /// The weight of an item is normalized by dividing the consumption in
    /// each dimension by the capacity of that dimension. Dimensions with a
    /// non-positive capacity are ignored.
    pub fn efficiency(&self, item: usize) -> Result<f64, IndexError> {
        let item   = IndexError::check(IndexKind::Item, item, self.item_count())?;
        let profit = self.profit[item] as f64;
        let normalized: f64 = self.row(item).iter()
            .zip(self.capacity.iter())
            .filter(|(_, c)| **c > 0)
            .map(|(w, c)| *w as f64 / *c as f64)
            .sum();

        if normalized > 0.0 {
            Ok(profit / normalized)
        } else if profit > 0.0 {
            Ok(f64::INFINITY)
        } else {
            Ok(profit)
        }
    }
    /// All items sorted by decreasing efficiency. Ties are broken by
    /// increasing index so that the order is deterministic.
    pub fn items_by_efficiency(&self) -> Vec<usize> {
        let ratios = (0..self.item_count())
            .map(|j| self.efficiency(j).unwrap_or(f64::NEG_INFINITY))
            .collect::<Vec<_>>();
        let mut items = (0..self.item_count()).collect::<Vec<_>>();
        items.sort_by(|a, b| ratios[*b].total_cmp(&ratios[*a]).then_with(|| a.cmp(b)));
        items
    }
}

/// Every value must fit in an `i32` so that the 64 bits sums over the items
/// never overflow.
fn check_range(expected: &'static str, values: &[i64]) -> Result<(), FormatError> {
    match values.iter().find(|v| i32::try_from(**v).is_err()) {
        Some(value) => Err(FormatError::OutOfRange { expected, value: *value }),
        None        => Ok(()),
    }
}

/// Dumps the weights matrix, one dimension per line.
impl fmt::Display for ProblemDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Weights matrix :")?;
        for dim in 0..self.dimension_count() {
            for item in 0..self.item_count() {
                write!(f, "{};", self.row(item)[dim])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
