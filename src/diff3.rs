//! Three-way line alignment.
//!
//! Two pairwise line diffs sharing a reference source are fused into one
//! ordered [`Diff3LineVector`]: every row names the corresponding line of
//! each source, or none where that source has no counterpart.
//!
//! Construction walks a [`Merger`] over both lists. At every reference line
//! the cursors first report the lines their other stream inserted since the
//! previous reference line; those become single-source rows, side 1 before
//! side 2. Then one row is emitted for the reference line itself, carrying
//! whatever each side aligned with it.

use std::ops::Index;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::diff::{Algorithm, DiffList, Stream};
use crate::error::{AlignError, Result};
use crate::merger::{ChangeFlags, Merger};
use crate::publish::CancelToken;
use crate::source::{LineSource, Reference, Source, TextSources};

/// An unordered pair of sources, stored in cyclic orientation.
///
/// Fine diffs for a pair are oriented so that the first named source is the
/// first stream: A in `AB`, B in `BC`, C in `CA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pair {
    AB,
    BC,
    CA,
}

impl Pair {
    pub const ALL: [Pair; 3] = [Pair::AB, Pair::BC, Pair::CA];

    const fn index(self) -> usize {
        match self {
            Pair::AB => 0,
            Pair::BC => 1,
            Pair::CA => 2,
        }
    }

    pub const fn sources(self) -> (Source, Source) {
        match self {
            Pair::AB => (Source::A, Source::B),
            Pair::BC => (Source::B, Source::C),
            Pair::CA => (Source::C, Source::A),
        }
    }

    /// The pair whose first stream is `source`.
    pub const fn starting_at(source: Source) -> Pair {
        match source {
            Source::A => Pair::AB,
            Source::B => Pair::BC,
            Source::C => Pair::CA,
        }
    }

    pub fn between(x: Source, y: Source) -> Option<Pair> {
        if x == y {
            None
        } else if y == x.next() {
            Some(Self::starting_at(x))
        } else {
            Some(Self::starting_at(y))
        }
    }
}

/// One row of the three-way alignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff3Line {
    lines: [Option<usize>; 3],
    equal: [bool; 3],
    fine: [Option<Arc<DiffList>>; 3],
}

/// How one source's line on a row relates to the two other sources.
///
/// "First other" is the cyclic successor of the source (B for A), "second
/// other" its predecessor (C for A); the fine diffs are oriented so that
/// they can be handed to [`crate::char_changes`] directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo<'a> {
    pub line: Option<usize>,
    pub fine_first: Option<&'a DiffList>,
    pub fine_second: Option<&'a DiffList>,
    /// Presence of a line differs from the first/second other source.
    pub changed: ChangeFlags,
    /// Text differs from the first/second other source.
    pub changed_text: ChangeFlags,
}

impl Diff3Line {
    fn single(source: Source, line: usize) -> Self {
        let mut row = Self::default();
        row.lines[source.index()] = Some(line);
        row
    }

    pub fn line(&self, source: Source) -> Option<usize> {
        self.lines[source.index()]
    }

    pub fn line_a(&self) -> Option<usize> {
        self.line(Source::A)
    }

    pub fn line_b(&self) -> Option<usize> {
        self.line(Source::B)
    }

    pub fn line_c(&self) -> Option<usize> {
        self.line(Source::C)
    }

    /// Line indices of A, B and C.
    pub fn lines(&self) -> [Option<usize>; 3] {
        self.lines
    }

    /// Both lines are absent, or both present with identical text.
    pub fn is_equal(&self, x: Source, y: Source) -> bool {
        Pair::between(x, y).map_or(true, |pair| self.equal[pair.index()])
    }

    /// Character-level diff between the two lines of `pair`, present only
    /// when both lines exist and differ.
    pub fn fine_diff(&self, pair: Pair) -> Option<&DiffList> {
        self.fine[pair.index()].as_deref()
    }

    /// Which sides differ from the reference on this row.
    pub fn changes(&self, reference: Reference, three_way: bool) -> ChangeFlags {
        let base = reference.source();
        let (side1, side2) = reference.sides();
        let mut changed = ChangeFlags::NONE;
        if !self.is_equal(base, side1) {
            changed |= ChangeFlags::FIRST;
        }
        if three_way && !self.is_equal(base, side2) {
            changed |= ChangeFlags::SECOND;
        }
        changed
    }

    /// The row as seen from `source`.
    pub fn line_info(&self, source: Source, three_way: bool) -> LineInfo<'_> {
        let first = source.next();
        let second = source.prev();
        let counted = |other: Source| three_way || other != Source::C;
        let present = self.line(source).is_some();

        let mut changed = ChangeFlags::NONE;
        let mut changed_text = ChangeFlags::NONE;
        if counted(first) {
            if self.line(first).is_some() != present {
                changed |= ChangeFlags::FIRST;
            }
            if !self.is_equal(source, first) {
                changed_text |= ChangeFlags::FIRST;
            }
        }
        if counted(second) {
            if self.line(second).is_some() != present {
                changed |= ChangeFlags::SECOND;
            }
            if !self.is_equal(source, second) {
                changed_text |= ChangeFlags::SECOND;
            }
        }

        LineInfo {
            line: self.line(source),
            fine_first: self.fine_diff(Pair::starting_at(source)),
            fine_second: self.fine_diff(Pair::starting_at(second)),
            changed,
            changed_text,
        }
    }

    /// Fill in equality flags and, if requested, fine diffs.
    fn compared<S: LineSource + ?Sized>(mut self, sources: &S, fine_diffs: bool) -> Self {
        for pair in Pair::ALL {
            let (x, y) = pair.sources();
            let text_x = self.line(x).and_then(|i| sources.line(x, i));
            let text_y = self.line(y).and_then(|i| sources.line(y, i));
            let equal = text_x == text_y;
            self.equal[pair.index()] = equal;
            if let (false, true, Some(text_x), Some(text_y)) = (equal, fine_diffs, text_x, text_y) {
                self.fine[pair.index()] = Some(Arc::new(DiffList::chars(text_x, text_y)));
            }
        }
        self
    }
}

/// Settings for building an alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignOptions {
    pub reference: Reference,
    /// Compute character-level diffs for rows whose lines differ.
    pub fine_diffs: bool,
    /// Pairwise producer for [`Diff3LineVector::compare`].
    pub algorithm: Algorithm,
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            reference: Reference::default(),
            fine_diffs: true,
            algorithm: Algorithm::default(),
        }
    }
}

/// The ordered rows of a three-way (or two-way) alignment.
///
/// Row order is document order. A vector is never modified once built; a
/// new comparison builds a new vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff3LineVector {
    rows: Vec<Diff3Line>,
    reference: Reference,
    three_way: bool,
}

fn line_count<S: LineSource + ?Sized>(sources: &S, source: Source) -> Result<usize> {
    sources
        .line_count(source)
        .ok_or(AlignError::MissingSource(source))
}

fn text_lines<'a, T: AsRef<str>>(sources: &TextSources<'a, T>, source: Source) -> Result<Vec<&'a str>> {
    let lines = sources
        .lines(source)
        .ok_or(AlignError::MissingSource(source))?;
    Ok(lines.iter().map(AsRef::as_ref).collect())
}

impl Diff3LineVector {
    /// Align three sources from the (A,B) diff and the diff of the reference
    /// against C: (A,C) for [`Reference::A`], (B,C) for [`Reference::B`].
    ///
    /// Returns `Ok(None)` if `cancel` fired during the build.
    pub fn build<S: LineSource + ?Sized>(
        ab: &DiffList,
        against_c: &DiffList,
        sources: &S,
        options: &AlignOptions,
        cancel: &CancelToken,
    ) -> Result<Option<Self>> {
        let reference = options.reference;
        let (side1, side2) = reference.sides();
        let ref_len = line_count(sources, reference.source())?;
        ab.check_len("AB", Stream::First, line_count(sources, Source::A)?)?;
        ab.check_len("AB", Stream::Second, line_count(sources, Source::B)?)?;
        let name = match reference {
            Reference::A => "AC",
            Reference::B => "BC",
        };
        against_c.check_len(name, Stream::First, ref_len)?;
        against_c.check_len(name, Stream::Second, line_count(sources, Source::C)?)?;

        let merger = Merger::with_streams(ab, reference.stream_in_ab(), against_c, Stream::First);
        let rows = align(
            merger,
            reference.source(),
            (side1, Some(side2)),
            ref_len,
            sources,
            options.fine_diffs,
            cancel,
        );
        Ok(rows.map(|rows| Self::finish(rows, reference, true)))
    }

    /// Align A and B only; C is absent on every row.
    pub fn build_two_way<S: LineSource + ?Sized>(
        ab: &DiffList,
        sources: &S,
        options: &AlignOptions,
        cancel: &CancelToken,
    ) -> Result<Option<Self>> {
        let reference = options.reference;
        let (side1, _) = reference.sides();
        let ref_len = line_count(sources, reference.source())?;
        ab.check_len("AB", Stream::First, line_count(sources, Source::A)?)?;
        ab.check_len("AB", Stream::Second, line_count(sources, Source::B)?)?;

        let unchanged = DiffList::identity(ref_len);
        let merger = Merger::with_streams(ab, reference.stream_in_ab(), &unchanged, Stream::First);
        let rows = align(
            merger,
            reference.source(),
            (side1, None),
            ref_len,
            sources,
            options.fine_diffs,
            cancel,
        );
        Ok(rows.map(|rows| Self::finish(rows, reference, false)))
    }

    /// Diff the given texts with `options.algorithm` and align them.
    ///
    /// Two-way when `sources` has no C.
    pub fn compare<T: AsRef<str>>(
        sources: &TextSources<'_, T>,
        options: &AlignOptions,
        cancel: &CancelToken,
    ) -> Result<Option<Self>> {
        let a = text_lines(sources, Source::A)?;
        let b = text_lines(sources, Source::B)?;
        let ab = DiffList::compute(&a, &b, options.algorithm);
        if !sources.is_three_way() {
            return Self::build_two_way(&ab, sources, options, cancel);
        }
        let c = text_lines(sources, Source::C)?;
        let base = match options.reference {
            Reference::A => &a,
            Reference::B => &b,
        };
        let against_c = DiffList::compute(base, &c, options.algorithm);
        Self::build(&ab, &against_c, sources, options, cancel)
    }

    fn finish(rows: Vec<Diff3Line>, reference: Reference, three_way: bool) -> Self {
        let vector = Self {
            rows,
            reference,
            three_way,
        };
        debug!(
            rows = vector.len(),
            deltas = vector.delta_count(),
            %reference,
            three_way,
            "aligned sources"
        );
        vector
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&Diff3Line> {
        self.rows.get(row)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diff3Line> {
        self.rows.iter()
    }

    pub fn rows(&self) -> &[Diff3Line] {
        &self.rows
    }

    pub fn reference(&self) -> Reference {
        self.reference
    }

    pub fn is_three_way(&self) -> bool {
        self.three_way
    }

    /// Which sides differ from the reference on `row`.
    pub fn changes(&self, row: usize) -> ChangeFlags {
        self.rows
            .get(row)
            .map_or(ChangeFlags::NONE, |r| r.changes(self.reference, self.three_way))
    }

    pub fn is_delta(&self, row: usize) -> bool {
        !self.changes(row).is_empty()
    }

    fn is_delta_start(&self, row: usize) -> bool {
        self.is_delta(row) && (row == 0 || !self.is_delta(row - 1))
    }

    /// Number of blocks of consecutive differing rows.
    pub fn delta_count(&self) -> usize {
        (0..self.len()).filter(|&row| self.is_delta_start(row)).count()
    }

    /// First row of the next differing block after `row`.
    pub fn next_delta(&self, row: usize) -> Option<usize> {
        (row + 1..self.len()).find(|&i| self.is_delta_start(i))
    }

    /// First row of the differing block before the one containing `row`.
    pub fn prev_delta(&self, row: usize) -> Option<usize> {
        let mut start = row.min(self.len());
        while start > 0 && start < self.len() && self.is_delta(start) && self.is_delta(start - 1) {
            start -= 1;
        }
        (0..start).rev().find(|&i| self.is_delta_start(i))
    }
}

impl Index<usize> for Diff3LineVector {
    type Output = Diff3Line;

    fn index(&self, row: usize) -> &Diff3Line {
        &self.rows[row]
    }
}

impl<'a> IntoIterator for &'a Diff3LineVector {
    type Item = &'a Diff3Line;
    type IntoIter = std::slice::Iter<'a, Diff3Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn align<S: LineSource + ?Sized>(
    mut merger: Merger<'_>,
    reference: Source,
    (side1, side2): (Source, Option<Source>),
    ref_len: usize,
    sources: &S,
    fine_diffs: bool,
    cancel: &CancelToken,
) -> Option<Vec<Diff3Line>> {
    let mut rows = Vec::with_capacity(ref_len);
    for ref_line in 0..=ref_len {
        if cancel.is_cancelled() {
            debug!(ref_line, rows = rows.len(), "alignment cancelled");
            return None;
        }

        let (first, second) = merger.cursors_mut();
        let inserted_first = first.take_insertions();
        let inserted_second = second.take_insertions();
        if !inserted_first.is_empty() || !inserted_second.is_empty() {
            trace!(
                ref_line,
                first = inserted_first.len(),
                second = inserted_second.len(),
                "insertions"
            );
        }
        let inserted = inserted_first
            .map(|line| (side1, line))
            .chain(side2.into_iter().flat_map(|side2| {
                inserted_second.clone().map(move |line| (side2, line))
            }));
        for (side, line) in inserted {
            if cancel.is_cancelled() {
                debug!(ref_line, rows = rows.len(), "alignment cancelled");
                return None;
            }
            rows.push(Diff3Line::single(side, line).compared(sources, fine_diffs));
        }
        if ref_line == ref_len {
            break;
        }

        debug_assert_eq!(first.ref_index(), ref_line);
        let mut row = Diff3Line::single(reference, ref_line);
        row.lines[side1.index()] = first.counterpart();
        if let Some(side2) = side2 {
            row.lines[side2.index()] = second.counterpart();
        }
        rows.push(row.compared(sources, fine_diffs));
        merger.advance();
    }
    debug_assert!(merger.is_end_reached());
    Some(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffSegment;
    use pretty_assertions::assert_eq;

    fn table(vector: &Diff3LineVector) -> Vec<[Option<usize>; 3]> {
        vector.iter().map(Diff3Line::lines).collect()
    }

    fn build(
        a: &[&str],
        b: &[&str],
        c: &[&str],
        ab: &DiffList,
        against_c: &DiffList,
        reference: Reference,
    ) -> Diff3LineVector {
        let sources = TextSources::three_way(a, b, c);
        let options = AlignOptions {
            reference,
            ..AlignOptions::default()
        };
        Diff3LineVector::build(ab, against_c, &sources, &options, &CancelToken::new())
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_colocated_insertions_side1_first() {
        let a = ["x\n"];
        let b = ["p\n", "x\n"];
        let c = ["q\n", "x\n"];
        let insert_one = DiffList::new([DiffSegment::new(0, 0, 1), DiffSegment::new(1, 0, 0)]);
        let vector = build(&a, &b, &c, &insert_one, &insert_one, Reference::A);
        assert_eq!(
            table(&vector),
            vec![
                [None, Some(0), None],
                [None, None, Some(0)],
                [Some(0), Some(1), Some(1)],
            ]
        );
    }

    #[test]
    fn test_uneven_substitution() {
        let a = ["a\n", "b\n", "c\n"];
        let b = ["a\n", "X\n", "Y\n", "Z\n", "c\n"];
        let ab = DiffList::new([DiffSegment::new(1, 1, 3), DiffSegment::new(1, 0, 0)]);
        let vector = build(&a, &b, &a, &ab, &DiffList::identity(3), Reference::A);
        assert_eq!(
            table(&vector),
            vec![
                [Some(0), Some(0), Some(0)],
                [Some(1), Some(1), Some(1)],
                [None, Some(2), None],
                [None, Some(3), None],
                [Some(2), Some(4), Some(2)],
            ]
        );
        let row = &vector[1];
        assert!(!row.is_equal(Source::A, Source::B));
        assert!(row.is_equal(Source::A, Source::C));
        assert!(row.fine_diff(Pair::AB).is_some());
        assert!(row.fine_diff(Pair::CA).is_none());
        assert_eq!(vector.changes(1), ChangeFlags::FIRST);
        assert_eq!(vector.changes(0), ChangeFlags::NONE);
    }

    #[test]
    fn test_deletion() {
        let a = ["a\n", "b\n", "c\n"];
        let c = ["a\n", "c\n"];
        let ac = DiffList::new([DiffSegment::new(1, 1, 0), DiffSegment::new(1, 0, 0)]);
        let vector = build(&a, &a, &c, &DiffList::identity(3), &ac, Reference::A);
        assert_eq!(
            table(&vector),
            vec![
                [Some(0), Some(0), Some(0)],
                [Some(1), Some(1), None],
                [Some(2), Some(2), Some(1)],
            ]
        );
        assert_eq!(vector.changes(1), ChangeFlags::SECOND);
    }

    #[test]
    fn test_trailing_insertions() {
        let a = ["a\n"];
        let b = ["a\n", "b1\n", "b2\n"];
        let c = ["a\n", "c1\n"];
        let ab = DiffList::new([DiffSegment::new(1, 0, 2)]);
        let ac = DiffList::new([DiffSegment::new(1, 0, 1)]);
        let vector = build(&a, &b, &c, &ab, &ac, Reference::A);
        assert_eq!(
            table(&vector),
            vec![
                [Some(0), Some(0), Some(0)],
                [None, Some(1), None],
                [None, Some(2), None],
                [None, None, Some(1)],
            ]
        );
    }

    #[test]
    fn test_reference_b() {
        let a = ["a\n", "b\n"];
        let b = ["a\n", "b\n", "c\n"];
        let c = ["a\n", "b\n", "c\n", "d\n"];
        let ab = DiffList::new([DiffSegment::new(2, 0, 1)]);
        let bc = DiffList::new([DiffSegment::new(3, 0, 1)]);
        let vector = build(&a, &b, &c, &ab, &bc, Reference::B);
        assert_eq!(
            table(&vector),
            vec![
                [Some(0), Some(0), Some(0)],
                [Some(1), Some(1), Some(1)],
                [None, Some(2), Some(2)],
                [None, None, Some(3)],
            ]
        );
        assert_eq!(vector.reference(), Reference::B);
        assert_eq!(vector.changes(2), ChangeFlags::FIRST);
        // B and A are both absent, which counts as agreement
        assert_eq!(vector.changes(3), ChangeFlags::SECOND);
    }

    #[test]
    fn test_length_mismatch() {
        let a = ["a\n", "b\n"];
        let sources = TextSources::three_way(&a, &a, &a);
        let short = DiffList::identity(1);
        let result = Diff3LineVector::build(
            &DiffList::identity(2),
            &short,
            &sources,
            &AlignOptions::default(),
            &CancelToken::new(),
        );
        assert_eq!(
            result,
            Err(AlignError::LengthMismatch {
                list: "AC",
                stream: Stream::First,
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn test_missing_c() {
        let a = ["a\n"];
        let sources = TextSources::two_way(&a, &a);
        let list = DiffList::identity(1);
        let result = Diff3LineVector::build(
            &list,
            &list,
            &sources,
            &AlignOptions::default(),
            &CancelToken::new(),
        );
        assert_eq!(result, Err(AlignError::MissingSource(Source::C)));
    }

    #[test]
    fn test_cancelled_build_yields_nothing() {
        let a = ["a\n", "b\n"];
        let sources = TextSources::three_way(&a, &a, &a);
        let list = DiffList::identity(2);
        let cancel = CancelToken::new();
        cancel.cancel();
        let result =
            Diff3LineVector::build(&list, &list, &sources, &AlignOptions::default(), &cancel);
        assert_eq!(result, Ok(None));
    }

    /// Trips `cancel` the first time a line of C is read.
    struct CancelOnC<'a> {
        inner: TextSources<'a, &'a str>,
        cancel: CancelToken,
        c_lookups: std::cell::Cell<usize>,
    }

    impl LineSource for CancelOnC<'_> {
        fn line(&self, source: Source, index: usize) -> Option<&str> {
            if source == Source::C {
                self.cancel.cancel();
                self.c_lookups.set(self.c_lookups.get() + 1);
            }
            self.inner.line(source, index)
        }

        fn line_count(&self, source: Source) -> Option<usize> {
            self.inner.line_count(source)
        }
    }

    #[test]
    fn test_cancel_stops_within_insertion_run() {
        let a = ["a\n"];
        let c: Vec<&str> = std::iter::repeat("x\n").take(100).chain(["a\n"]).collect();
        let cancel = CancelToken::new();
        let sources = CancelOnC {
            inner: TextSources::three_way(&a, &a, &c),
            cancel: cancel.clone(),
            c_lookups: std::cell::Cell::new(0),
        };
        let ab = DiffList::identity(1);
        let ac = DiffList::new([DiffSegment::new(0, 0, 100), DiffSegment::new(1, 0, 0)]);

        let result = Diff3LineVector::build(&ab, &ac, &sources, &AlignOptions::default(), &cancel);
        assert_eq!(result, Ok(None));
        // only the first inserted row was compared
        assert_eq!(sources.c_lookups.get(), 2);
    }

    #[test]
    fn test_two_way() {
        let a = ["a\n", "b\n"];
        let b = ["a\n", "B\n", "c\n"];
        let sources = TextSources::two_way(&a, &b);
        let vector =
            Diff3LineVector::compare(&sources, &AlignOptions::default(), &CancelToken::new())
                .unwrap()
                .unwrap();
        assert!(!vector.is_three_way());
        assert_eq!(
            table(&vector),
            vec![
                [Some(0), Some(0), None],
                [Some(1), Some(1), None],
                [None, Some(2), None],
            ]
        );
        assert_eq!(vector.changes(0), ChangeFlags::NONE);
        assert_eq!(vector.changes(1), ChangeFlags::FIRST);
    }

    #[test]
    fn test_delta_navigation() {
        let a = ["1\n", "2\n", "3\n", "4\n", "5\n", "6\n"];
        let b = ["1\n", "x\n", "y\n", "4\n", "5\n", "z\n"];
        let sources = TextSources::two_way(&a, &b);
        let vector =
            Diff3LineVector::compare(&sources, &AlignOptions::default(), &CancelToken::new())
                .unwrap()
                .unwrap();
        assert_eq!(vector.len(), 6);
        assert_eq!(vector.delta_count(), 2);
        assert_eq!(vector.next_delta(0), Some(1));
        assert_eq!(vector.next_delta(1), Some(5));
        assert_eq!(vector.next_delta(5), None);
        assert_eq!(vector.prev_delta(5), Some(1));
        assert_eq!(vector.prev_delta(2), None);
        assert_eq!(vector.prev_delta(4), Some(1));
    }

    #[test]
    fn test_line_info() {
        let a = ["a\n", "b\n"];
        let b = ["a\n", "B\n"];
        let c = ["a\n"];
        let ab = DiffList::new([DiffSegment::new(1, 1, 1)]);
        let ac = DiffList::new([DiffSegment::new(1, 1, 0)]);
        let vector = build(&a, &b, &c, &ab, &ac, Reference::A);
        let row = &vector[1];

        let info = row.line_info(Source::A, true);
        assert_eq!(info.line, Some(1));
        assert_eq!(info.changed, ChangeFlags::SECOND);
        assert_eq!(info.changed_text, ChangeFlags::BOTH);
        assert_eq!(info.fine_first, row.fine_diff(Pair::AB));
        assert!(info.fine_second.is_none());

        let info = row.line_info(Source::C, true);
        assert_eq!(info.line, None);
        assert_eq!(info.changed, ChangeFlags::BOTH);

        let info = row.line_info(Source::A, false);
        assert_eq!(info.changed, ChangeFlags::NONE);
        assert_eq!(info.changed_text, ChangeFlags::FIRST);
    }
}
