//! Run-length pairwise diff lists.
//!
//! A [`DiffList`] describes how two token streams (lines or characters)
//! relate: a sequence of [`DiffSegment`]s, each an equal run followed by a
//! change. The lists are produced once and only read afterwards.

use std::fmt;
use std::hash::Hash;

use difflib::sequencematcher::SequenceMatcher;
use tracing::warn;

use crate::error::{AlignError, Result};

/// One of the two token streams a [`DiffList`] compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    First,
    Second,
}

impl Stream {
    /// The stream on the other side of the comparison.
    pub const fn other(self) -> Stream {
        match self {
            Stream::First => Stream::Second,
            Stream::Second => Stream::First,
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::First => f.write_str("first"),
            Stream::Second => f.write_str("second"),
        }
    }
}

/// `equal` matching elements, followed by `diff_first` elements consumed
/// from the first stream and `diff_second` from the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DiffSegment {
    pub equal: usize,
    pub diff_first: usize,
    pub diff_second: usize,
}

impl DiffSegment {
    /// Terminates every [`DiffList`].
    pub const SENTINEL: DiffSegment = DiffSegment::new(0, 0, 0);

    pub const fn new(equal: usize, diff_first: usize, diff_second: usize) -> Self {
        Self {
            equal,
            diff_first,
            diff_second,
        }
    }

    pub const fn has_diff(&self) -> bool {
        self.diff_first > 0 || self.diff_second > 0
    }

    /// Number of changed elements on `stream`.
    pub const fn diff(&self, stream: Stream) -> usize {
        match stream {
            Stream::First => self.diff_first,
            Stream::Second => self.diff_second,
        }
    }

    pub(crate) fn diff_mut(&mut self, stream: Stream) -> &mut usize {
        match stream {
            Stream::First => &mut self.diff_first,
            Stream::Second => &mut self.diff_second,
        }
    }
}

/// Pairwise diff producer used by the convenience entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// `difflib`'s sequence matcher.
    #[default]
    Difflib,
    /// Patience diff; tends to produce smaller diffs on source code.
    #[cfg(feature = "patiencediff")]
    Patience,
}

/// An ordered, sentinel-terminated sequence of [`DiffSegment`]s.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiffList {
    segments: Vec<DiffSegment>,
}

impl Default for DiffList {
    fn default() -> Self {
        Self::new(std::iter::empty())
    }
}

impl DiffList {
    /// Build a list from raw segments.
    ///
    /// Empty segments are dropped and the terminating sentinel is appended,
    /// so the sentinel is the only segment with no content.
    pub fn new(segments: impl IntoIterator<Item = DiffSegment>) -> Self {
        let mut segments: Vec<DiffSegment> = segments
            .into_iter()
            .filter(|s| s.equal > 0 || s.has_diff())
            .collect();
        segments.push(DiffSegment::SENTINEL);
        Self { segments }
    }

    /// A list describing two identical streams of `len` elements.
    pub fn identity(len: usize) -> Self {
        Self::new([DiffSegment::new(len, 0, 0)])
    }

    /// Build a list from matching blocks `(first_start, second_start, size)`.
    ///
    /// Blocks must be increasing in both streams. Zero-sized blocks are
    /// ignored, so a trailing sentinel block is harmless.
    pub fn from_matching_blocks(
        blocks: impl IntoIterator<Item = (usize, usize, usize)>,
        first_len: usize,
        second_len: usize,
    ) -> Self {
        let mut segments = Vec::new();
        let (mut i, mut j, mut equal) = (0, 0, 0);
        for (first_start, second_start, size) in blocks {
            if size == 0 {
                continue;
            }
            debug_assert!(first_start >= i && second_start >= j);
            let diff_first = first_start - i;
            let diff_second = second_start - j;
            if diff_first > 0 || diff_second > 0 {
                segments.push(DiffSegment::new(equal, diff_first, diff_second));
                equal = 0;
            }
            equal += size;
            i = first_start + size;
            j = second_start + size;
        }
        segments.push(DiffSegment::new(equal, first_len - i, second_len - j));
        Self::new(segments)
    }

    /// Compare two token streams with the given algorithm.
    pub fn compute<T: Eq + Hash + Clone>(first: &[T], second: &[T], algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Difflib => {
                let blocks = SequenceMatcher::new(first, second)
                    .get_matching_blocks()
                    .into_iter()
                    .map(|m| (m.first_start, m.second_start, m.size));
                Self::from_matching_blocks(blocks, first.len(), second.len())
            }
            #[cfg(feature = "patiencediff")]
            Algorithm::Patience => {
                let blocks = patiencediff::SequenceMatcher::new(first, second).get_matching_blocks();
                Self::from_matching_blocks(blocks, first.len(), second.len())
            }
        }
    }

    /// Character-level comparison of two lines.
    pub fn chars(first: &str, second: &str) -> Self {
        let first: Vec<char> = first.chars().collect();
        let second: Vec<char> = second.chars().collect();
        Self::compute(&first, &second, Algorithm::Difflib)
    }

    /// All segments, sentinel included.
    pub fn segments(&self) -> &[DiffSegment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiffSegment> {
        self.segments.iter()
    }

    /// Total number of elements the list covers on `stream`.
    pub fn len(&self, stream: Stream) -> usize {
        self.segments.iter().map(|s| s.equal + s.diff(stream)).sum()
    }

    /// True when the list reports no change at all.
    pub fn is_identity(&self) -> bool {
        self.segments.iter().all(|s| !s.has_diff())
    }

    /// Check that `stream` covers exactly `expected` elements.
    pub(crate) fn check_len(&self, list: &'static str, stream: Stream, expected: usize) -> Result<()> {
        let found = self.len(stream);
        if found != expected {
            warn!(list, %stream, expected, found, "diff list length mismatch");
            return Err(AlignError::LengthMismatch {
                list,
                stream,
                expected,
                found,
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a DiffList {
    type Item = &'a DiffSegment;
    type IntoIter = std::slice::Iter<'a, DiffSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
