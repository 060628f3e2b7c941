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

//! This module provides the upper bound used to prune the branch-and-bound
//! tree.

use crate::SolutionState;

/// An upper bound on the objective reachable by completing a partial solution
/// with the items of a branching order which have not been decided yet.
///
/// Two bounds are combined and the tightest one is kept:
///
/// * the sum of the positive profits of the undecided items. This one is
///   always valid;
/// * when no weight is negative, the Dantzig bound (the optimum of the linear
///   relaxation) of the single dimension knapsack defined by each dimension.
///   Each dimension alone is a relaxation of the problem, hence the minimum
///   over all dimensions is a valid bound too.
#[derive(Debug, Clone)]
pub struct UpperBound {
    /// suffix[d] = Σ max(0, profit) of the items at positions d.. of the
    /// branching order
    suffix: Vec<i64>,
    /// position[j] = position of item j in the branching order (usize::MAX if
    /// item j is not part of it)
    position: Vec<usize>,
    /// For each dimension, the profitable items of the branching order sorted
    /// by decreasing profit/weight ratio in that dimension. Empty when the
    /// Dantzig bound cannot be used.
    by_ratio: Vec<Vec<usize>>,
}

impl UpperBound {
    /// Prepares the bound for the given branching order
    pub fn new(state: &SolutionState<'_>, order: &[usize]) -> Self {
        let problem = state.problem();
        let profits = problem.profits();

        let mut suffix = vec![0; order.len() + 1];
        for (d, item) in order.iter().enumerate().rev() {
            suffix[d] = suffix[d + 1] + profits[*item].max(0);
        }

        let mut position = vec![usize::MAX; problem.item_count()];
        for (d, item) in order.iter().enumerate() {
            position[*item] = d;
        }

        let mut by_ratio = vec![];
        if problem.has_nonnegative_weights() {
            for dim in 0..problem.dimension_count() {
                let ratio = |j: usize| {
                    let w = problem.row(j)[dim];
                    if w == 0 { f64::INFINITY } else { profits[j] as f64 / w as f64 }
                };
                let mut items = order.iter().copied()
                    .filter(|j| profits[*j] > 0)
                    .collect::<Vec<_>>();
                items.sort_by(|a, b| ratio(*b).total_cmp(&ratio(*a)));
                by_ratio.push(items);
            }
        }

        Self { suffix, position, by_ratio }
    }

    /// Estimates the best objective reachable from `state` when the items at
    /// positions `depth..` of the branching order are still undecided.
    pub fn estimate(&self, state: &SolutionState<'_>, depth: usize) -> i64 {
        let mut best = self.suffix[depth.min(self.suffix.len() - 1)];
        for (dim, items) in self.by_ratio.iter().enumerate() {
            best = best.min(self.dantzig(state, depth, dim, items));
        }
        state.objective() + best
    }

    /// The optimal value of the linear relaxation of the knapsack restricted
    /// to dimension `dim` and to the undecided items.
    fn dantzig(&self, state: &SolutionState<'_>, depth: usize, dim: usize, items: &[usize]) -> i64 {
        let problem  = state.problem();
        let mut room = problem.capacities()[dim] - state.loads()[dim];
        if room < 0 {
            return 0;
        }
        let mut value = 0;
        for item in items.iter().copied() {
            if self.position[item] < depth {
                continue;
            }
            let profit = problem.profits()[item];
            let weight = problem.row(item)[dim];
            if weight <= room {
                value += profit;
                room  -= weight;
            } else {
                value += (profit as i128 * room as i128 / weight as i128) as i64;
                break;
            }
        }
        value
    }
}

#[cfg(test)]
mod test_bound {
    use crate::*;
    use crate::test_utils::*;
    use super::UpperBound;

    #[test]
    fn without_dimensions_it_sums_the_remaining_profits() {
        let pb = ProblemDefinition::new(vec![3, -1, 4], vec![vec![], vec![], vec![]], vec![]).unwrap();
        let state = SolutionState::new(&pb);
        let bound = UpperBound::new(&state, &[0, 1, 2]);
        assert_eq!(7, bound.estimate(&state, 0));
        assert_eq!(4, bound.estimate(&state, 1));
        assert_eq!(0, bound.estimate(&state, 3));
    }
    #[test]
    fn the_linear_relaxation_takes_a_fraction_of_the_critical_item() {
        // ratios are 10/6 and 20/7: item 1 fits, then 3/6 of item 0
        let pb = two_items();
        let state = SolutionState::new(&pb);
        let bound = UpperBound::new(&state, &[1, 0]);
        assert_eq!(25, bound.estimate(&state, 0));
    }
    #[test]
    fn decided_items_are_not_counted_again() {
        let pb = two_items();
        let mut state = SolutionState::new(&pb);
        let bound = UpperBound::new(&state, &[1, 0]);
        state.add(1).unwrap();
        // only item 0 is left, 3 units of room: 10 * 3 / 6 = 5
        assert_eq!(25, bound.estimate(&state, 1));
        // nothing is left
        assert_eq!(20, bound.estimate(&state, 2));
    }
    #[test]
    fn the_tightest_dimension_wins() {
        let pb = ProblemDefinition::new(
            vec![10, 10],
            vec![vec![1, 10], vec![1, 10]],
            vec![100, 10],
        ).unwrap();
        let state = SolutionState::new(&pb);
        let bound = UpperBound::new(&state, &[0, 1]);
        assert_eq!(10, bound.estimate(&state, 0));
    }
    #[test]
    fn it_never_underestimates_the_optimum() {
        for seed in 0..30 {
            let pb = pseudo_random_problem(seed, 12, 3);
            let state = SolutionState::new(&pb);
            let order = pb.items_by_efficiency();
            let bound = UpperBound::new(&state, &order);
            assert!(bound.estimate(&state, 0) >= brute_force_optimum(&pb));
        }
    }
}
