// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-entry decode failures collected during a load.

use crate::domain::errors::DecodeError;
use std::fmt;

/// One entry that was skipped because its value could not be decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeFailure {
    /// One-based line number of the entry
    pub line: usize,
    /// The section the entry appeared in
    pub section: String,
    /// The variable name of the entry
    pub name: String,
    /// Why decoding failed
    pub error: DecodeError,
}

impl fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: [{}] {}: {}",
            self.line, self.section, self.name, self.error
        )
    }
}

/// The outcome of a successful load.
///
/// A load that returns `Ok` may still have skipped entries whose values could not
/// be decoded; they are listed here in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    failures: Vec<DecodeFailure>,
}

impl LoadReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a skipped entry.
    pub fn push(&mut self, failure: DecodeFailure) {
        self.failures.push(failure);
    }

    /// Returns `true` if every entry loaded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the number of skipped entries.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Returns `true` if no entry was skipped.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the skipped entries in file order.
    pub fn failures(&self) -> &[DecodeFailure] {
        &self.failures
    }

    /// Consumes the report and returns the skipped entries.
    pub fn into_failures(self) -> Vec<DecodeFailure> {
        self.failures
    }
}

impl IntoIterator for LoadReport {
    type Item = DecodeFailure;
    type IntoIter = std::vec::IntoIter<DecodeFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.into_iter()
    }
}

impl<'a> IntoIterator for &'a LoadReport {
    type Item = &'a DecodeFailure;
    type IntoIter = std::slice::Iter<'a, DecodeFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.iter()
    }
}
