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

//! This module provides some utilities to write unit tests: small hand made
//! instances, a deterministic generator for larger ones and brute force
//! oracles to check the solvers against.
#![cfg(test)]

use crate::{ProblemDefinition, SolutionState};

/// Two items, one dimension: profits [10, 20], weights [6, 7], capacity 10.
pub fn two_items() -> ProblemDefinition {
    ProblemDefinition::new(vec![10, 20], vec![vec![6], vec![7]], vec![10]).unwrap()
}

/// Three items, two dimensions: profits [4, 5, 6], weights [[1, 2], [3, 4], [5, 6]]
/// and capacities [7, 8].
pub fn three_items_two_dims() -> ProblemDefinition {
    ProblemDefinition::new(
        vec![4, 5, 6],
        vec![vec![1, 2], vec![3, 4], vec![5, 6]],
        vec![7, 8],
    ).unwrap()
}

/// A tiny linear congruential generator. It is only meant to produce
/// reproducible test data.
#[derive(Debug, Clone)]
pub struct Lcg(u64);
impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407))
    }
    pub fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }
    pub fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

/// A reproducible instance with profits in 1..=100, weights in 0..=50 and
/// capacities set to roughly half the total weight of each dimension.
pub fn pseudo_random_problem(seed: u64, nb_items: usize, nb_dims: usize) -> ProblemDefinition {
    let mut rng = Lcg::new(seed);
    let profit  = (0..nb_items).map(|_| 1 + rng.below(100) as i64).collect::<Vec<_>>();
    let weights = (0..nb_items)
        .map(|_| (0..nb_dims).map(|_| rng.below(51) as i64).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    let capacity = (0..nb_dims)
        .map(|i| weights.iter().map(|row| row[i]).sum::<i64>() / 2)
        .collect::<Vec<_>>();
    ProblemDefinition::new(profit, weights, capacity).unwrap()
}

/// Sums the profit of the selected items without looking at any cache
pub fn brute_objective(pb: &ProblemDefinition, state: &SolutionState) -> i64 {
    (0..pb.item_count())
        .filter(|j| state.is_selected(*j).unwrap())
        .map(|j| pb.profit_of(j).unwrap())
        .sum()
}
/// Sums the weights of the selected items without looking at any cache
pub fn brute_loads(pb: &ProblemDefinition, state: &SolutionState) -> Vec<i64> {
    (0..pb.dimension_count())
        .map(|i| (0..pb.item_count())
            .filter(|j| state.is_selected(*j).unwrap())
            .map(|j| pb.weight_of(j, i).unwrap())
            .sum())
        .collect()
}

/// Enumerates all subsets to find the optimal objective. Only use it on very
/// small instances.
pub fn brute_force_optimum(pb: &ProblemDefinition) -> i64 {
    let n = pb.item_count();
    assert!(n <= 20, "too many items to enumerate");
    let mut best = 0;
    for mask in 0_u32..(1 << n) {
        let mut state = SolutionState::new(pb);
        for j in (0..n).filter(|j| mask & (1 << j) != 0) {
            state.add(j).unwrap();
        }
        if state.is_feasible() {
            best = best.max(state.objective());
        }
    }
    best
}
