use thiserror::Error;

use crate::diff::Stream;
use crate::source::Source;

/// Errors surfaced by alignment construction and merge bookkeeping.
///
/// Merge conflicts are not errors; they are reported as data in
/// [`crate::MergeResult`]. A cancelled build is not an error either.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignError {
    /// A pairwise diff list does not cover the number of lines its source has.
    ///
    /// This indicates a bug in whatever produced the diff list.
    #[error("diff list {list} covers {found} lines of its {stream} stream, expected {expected}")]
    LengthMismatch {
        list: &'static str,
        stream: Stream,
        expected: usize,
        found: usize,
    },

    /// A source needed for the requested operation was not provided.
    #[error("source {0} was not provided")]
    MissingSource(Source),

    /// A manual resolution targeted a row that is not a conflict.
    #[error("row {row} is not a conflict")]
    NotAConflict { row: usize },

    /// A manual resolution picked a source with no line on the conflicting row.
    #[error("source {choice} has no line on row {row}")]
    UnavailableChoice { row: usize, choice: Source },
}

pub type Result<T> = std::result::Result<T, AlignError>;
