//! Three-way diff alignment and merge reconciliation.
//!
//! Given two pairwise line diffs that share a reference source, for example
//! BASE against THIS and BASE against OTHER, build one ordered alignment of
//! all three inputs and decide, row by row, what a merge should contain.
//!
//! ```
//! use diff3merge::{AlignOptions, CancelToken, Diff3LineVector, MergeResult, StandardMarkers, TextSources};
//!
//! let base = ["a\n", "b\n", "c\n"];
//! let this = ["a\n", "B\n", "c\n"];
//! let other = ["a\n", "b\n", "c\n", "d\n"];
//! let sources = TextSources::three_way(&base, &this, &other);
//!
//! let vector = Diff3LineVector::compare(&sources, &AlignOptions::default(), &CancelToken::new())
//!     .unwrap()
//!     .unwrap();
//! let merged = MergeResult::build(&vector, &sources);
//! assert!(merged.is_clean());
//! let text = merged.merge_lines(&sources, &StandardMarkers::default()).concat();
//! assert_eq!(text, "a\nB\nc\nd\n");
//! ```

pub mod diff;
pub mod diff3;
pub mod error;
pub mod layout;
pub mod merge;
pub mod merger;
pub mod publish;
pub mod source;

pub use diff::{Algorithm, DiffList, DiffSegment, Stream};
pub use diff3::{AlignOptions, Diff3Line, Diff3LineVector, LineInfo, Pair};
pub use error::{AlignError, Result};
pub use layout::DisplayLayout;
pub use merge::{MergeClass, MergeLine, MergeMarkers, MergeResult, Selection, StandardMarkers};
pub use merger::{char_changes, ChangeFlags, Merger};
pub use publish::{AlignmentStore, CancelToken};
pub use source::{split_lines, LineSource, Reference, Source, TextSources};
