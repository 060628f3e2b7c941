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

//! This module defines the error types that are used throughout all the code
//! of our library. These are also the errors your client code is likely to
//! have to deal with.

use std::{fmt, num::ParseIntError, path::PathBuf};

// ----------------------------------------------------------------------------
// --- INDEX ERROR ------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The kind of index that was out of range.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// An index that was meant to designate an item
    Item,
    /// An index that was meant to designate a dimension (a constraint)
    Dimension,
}
impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Item      => write!(f, "item"),
            IndexKind::Dimension => write!(f, "dimension"),
        }
    }
}

/// This error is raised whenever an accessor or a mutator receives an item or
/// dimension index which lies outside of its valid range. There is no sensible
/// fallback for such an index: it is always surfaced to the caller.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{index} is not a valid {kind} index (expected a value in 0..{len})")]
pub struct IndexError {
    /// What the offending index was meant to designate
    pub kind: IndexKind,
    /// The offending index
    pub index: usize,
    /// The number of valid indices (valid range is `0..len`)
    pub len: usize,
}
impl IndexError {
    /// Returns `Ok(index)` iff index lies in `0..len`.
    #[inline]
    pub fn check(kind: IndexKind, index: usize, len: usize) -> Result<usize, IndexError> {
        if index < len {
            Ok(index)
        } else {
            Err(IndexError { kind, index, len })
        }
    }
}

// ----------------------------------------------------------------------------
// --- FORMAT ERROR -----------------------------------------------------------
// ----------------------------------------------------------------------------
/// This enumeration groups the kind of errors that might occur when building a
/// problem definition. There can be io errors (file unavailable ?), truncated
/// files, parse int errors (the parser expected a 32 bits integer but got
/// something else), out of range values or shape mismatches when the problem
/// is assembled by hand.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The instance file could not be read
    #[error("the instance file {} could not be read: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The input ended before all the expected values could be read
    #[error("unexpected end of input while reading {expected}")]
    Truncated { expected: &'static str },
    /// The parser expected an integer but got some garbage
    #[error("expected an integer for {expected} but found '{token}'")]
    ParseInt {
        expected: &'static str,
        token: String,
        #[source]
        source: ParseIntError,
    },
    /// A value does not fit in 32 bits
    #[error("{value} is out of range for {expected} (values must fit in 32 bits)")]
    OutOfRange { expected: &'static str, value: i64 },
    /// The pieces of the problem do not have consistent sizes
    #[error("ill formed instance: {0}")]
    Shape(String),
}

// ----------------------------------------------------------------------------
// --- ERROR ------------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The umbrella error of this crate. Any of these aborts a run: there is no
/// partial or degraded output in presence of an error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An item or dimension index was out of range
    #[error(transparent)]
    Index(#[from] IndexError),
    /// The problem definition could not be built
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The diagnostics could not be written
    #[error("could not write the diagnostics: {0}")]
    Io(#[from] std::io::Error),
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_errors {
    use crate::{Error, FormatError, IndexError, IndexKind};

    #[test]
    fn check_accepts_indices_in_range() {
        assert_eq!(Ok(0), IndexError::check(IndexKind::Item, 0, 3));
        assert_eq!(Ok(2), IndexError::check(IndexKind::Item, 2, 3));
    }
    #[test]
    fn check_rejects_the_upper_bound_itself() {
        let err = IndexError::check(IndexKind::Item, 3, 3).unwrap_err();
        assert_eq!(IndexError { kind: IndexKind::Item, index: 3, len: 3 }, err);
    }
    #[test]
    fn check_rejects_anything_when_len_is_zero() {
        assert!(IndexError::check(IndexKind::Dimension, 0, 0).is_err());
    }
    #[test]
    fn index_error_names_the_index_and_the_valid_range() {
        let err = IndexError { kind: IndexKind::Dimension, index: 7, len: 5 };
        assert_eq!("7 is not a valid dimension index (expected a value in 0..5)", err.to_string());
    }
    #[test]
    fn errors_convert_into_the_umbrella_type() {
        let err: Error = IndexError { kind: IndexKind::Item, index: 1, len: 1 }.into();
        assert!(matches!(err, Error::Index(_)));
        let err: Error = FormatError::Truncated { expected: "capacity" }.into();
        assert!(matches!(err, Error::Format(_)));
        assert_eq!("unexpected end of input while reading capacity", err.to_string());
        let err: Error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
