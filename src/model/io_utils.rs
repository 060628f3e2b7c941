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

//! This module is where the instance files get parsed. An instance file is a
//! plain sequence of whitespace separated integers:
//!
//! ```text
//! <nb items> <nb dimensions>
//! <profit of each item>
//! <weight of each item in dimension 1>
//! ...
//! <weight of each item in dimension m>
//! <capacity of each dimension>
//! ```
//!
//! Line breaks carry no meaning: the tokens are consumed in this exact order
//! regardless of where the lines are broken.

use std::{fs, path::Path, str::{FromStr, SplitAsciiWhitespace}};

use log::debug;

use crate::{FormatError, ProblemDefinition};

/// A cursor over the integer tokens of an instance
struct Tokens<'a> {
    inner: SplitAsciiWhitespace<'a>,
}
impl <'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self { inner: text.split_ascii_whitespace() }
    }
    fn next_token(&mut self, expected: &'static str) -> Result<&'a str, FormatError> {
        self.inner.next().ok_or(FormatError::Truncated { expected })
    }
    fn next_count(&mut self, expected: &'static str) -> Result<usize, FormatError> {
        let token = self.next_token(expected)?;
        token.parse().map_err(|source| FormatError::ParseInt { expected, token: token.to_string(), source })
    }
    /// Values are 32 bits integers, widened to 64 bits so that no sum over
    /// the items can overflow.
    fn next_value(&mut self, expected: &'static str) -> Result<i64, FormatError> {
        let token = self.next_token(expected)?;
        token.parse::<i32>()
            .map(i64::from)
            .map_err(|source| FormatError::ParseInt { expected, token: token.to_string(), source })
    }
    fn remaining(self) -> usize {
        self.inner.count()
    }
}

impl FromStr for ProblemDefinition {
    type Err = FormatError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut tokens = Tokens::new(text);

        let nb_items      = tokens.next_count("the number of items")?;
        let nb_dimensions = tokens.next_count("the number of dimensions")?;

        let mut profit = vec![];
        for _ in 0..nb_items {
            profit.push(tokens.next_value("a profit")?);
        }
        // the file gives the weights dimension after dimension
        let mut by_dimension = vec![];
        for _ in 0..nb_dimensions {
            for _ in 0..nb_items {
                by_dimension.push(tokens.next_value("a weight")?);
            }
        }
        let mut capacity = vec![];
        for _ in 0..nb_dimensions {
            capacity.push(tokens.next_value("a capacity")?);
        }

        let trailing = tokens.remaining();
        if trailing > 0 {
            debug!("ignoring {} trailing token(s) after the capacities", trailing);
        }

        let mut weight = vec![0; by_dimension.len()];
        for dim in 0..nb_dimensions {
            for item in 0..nb_items {
                weight[item * nb_dimensions + dim] = by_dimension[dim * nb_items + item];
            }
        }
        Ok(ProblemDefinition::from_parts(profit, weight, capacity))
    }
}

/// This function is used to read an instance from file. It returns either a
/// problem definition if everything went on well or an error describing the
/// problem. No partially built problem is ever returned.
pub fn read_instance<P: AsRef<Path>>(fname: P) -> Result<ProblemDefinition, FormatError> {
    let path = fname.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|source| FormatError::Io { path: path.to_path_buf(), source })?;
    text.parse()
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
