//! Error types for rule configuration and grid parsing.

use thiserror::Error;

/// Errors raised while building or editing rules and rule sequences.
///
/// Stepping itself never fails; these only surface when configuration
/// arrives from outside the crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// A B/S label could not be parsed.
    #[error("invalid rule label {label:?}: {reason}")]
    InvalidLabel {
        /// The offending label.
        label: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// A transition table did not have exactly nine entries.
    #[error("{table} table has {len} entries, expected 9")]
    TableLength {
        /// Which table ("alive" or "dead").
        table: &'static str,
        /// Number of entries supplied.
        len: usize,
    },

    /// A rule sequence would be left without any rules.
    #[error("rule sequence must contain at least one rule")]
    EmptySequence,

    /// An index into a rule sequence was out of range.
    #[error("rule index {index} out of range for sequence of length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the sequence.
        len: usize,
    },
}

impl RuleError {
    pub(crate) fn label(label: &str, reason: &'static str) -> Self {
        RuleError::InvalidLabel {
            label: label.to_string(),
            reason,
        }
    }
}

/// Error returned when parsing a grid from its text form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseGridError {
    /// The text held no non-blank rows.
    #[error("grid text contains no rows")]
    Empty,

    /// A row's length differed from the first row's.
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Cells in that row.
        len: usize,
        /// Cells in the first row.
        expected: usize,
    },

    /// A character was neither a live nor a dead cell marker.
    #[error("unexpected character {ch:?} in row {row}")]
    BadCell {
        /// Zero-based row index.
        row: usize,
        /// The offending character.
        ch: char,
    },
}
