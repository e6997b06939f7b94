//! Lockstep walk over two diff lists sharing a reference stream.

use bitflags::bitflags;

use crate::diff::{DiffList, DiffSegment, Stream};

bitflags! {
    /// Which of the two compared sides differ at a position.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ChangeFlags: u8 {
        /// Unchanged on both sides.
        const NONE   = 0b00;
        /// Differs from the first other side.
        const FIRST  = 0b01;
        /// Differs from the second other side.
        const SECOND = 0b10;
        const BOTH   = Self::FIRST.bits() | Self::SECOND.bits();
    }
}

impl Default for ChangeFlags {
    fn default() -> Self {
        Self::NONE
    }
}

/// Position within one diff list, measured on its reference stream.
///
/// Lines that exist only on the other stream are never visited one by one;
/// they are collected as pending insertions whenever the cursor moves past
/// them and can be drained with [`Cursor::take_insertions`].
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    segments: std::slice::Iter<'a, DiffSegment>,
    current: DiffSegment,
    reference: Stream,
    ref_index: usize,
    other_index: usize,
    inserted: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(list: &'a DiffList, reference: Stream) -> Self {
        let mut cursor = Self {
            segments: list.iter(),
            current: DiffSegment::SENTINEL,
            reference,
            ref_index: 0,
            other_index: 0,
            inserted: 0,
        };
        cursor.settle();
        cursor
    }

    fn ref_pending(&self) -> usize {
        self.current.diff(self.reference)
    }

    fn other_pending(&self) -> usize {
        self.current.diff(self.reference.other())
    }

    /// Reference position the cursor stands on.
    pub(crate) fn ref_index(&self) -> usize {
        self.ref_index
    }

    /// The current reference position lies in an equal run.
    pub(crate) fn is_equal(&self) -> bool {
        self.current.equal > 0
    }

    pub(crate) fn is_end(&self) -> bool {
        self.segments.len() == 0 && self.current.equal == 0 && self.ref_pending() == 0
    }

    /// Line on the other stream aligned with the current reference position.
    pub(crate) fn counterpart(&self) -> Option<usize> {
        if self.current.equal > 0 || (self.ref_pending() > 0 && self.other_pending() > 0) {
            Some(self.other_index)
        } else {
            None
        }
    }

    /// Other-stream lines skipped since the last call, in order.
    pub(crate) fn take_insertions(&mut self) -> std::ops::Range<usize> {
        let start = self.other_index - self.inserted;
        self.inserted = 0;
        start..self.other_index
    }

    /// Step one reference element. Insertions not taken beforehand are dropped.
    pub(crate) fn advance(&mut self) {
        self.inserted = 0;
        if self.current.equal > 0 {
            self.current.equal -= 1;
            self.other_index += 1;
        } else if self.ref_pending() > 0 {
            *self.current.diff_mut(self.reference) -= 1;
            if self.other_pending() > 0 {
                *self.current.diff_mut(self.reference.other()) -= 1;
                self.other_index += 1;
            }
        } else {
            return;
        }
        self.ref_index += 1;
        self.settle();
    }

    /// Move on to the next segment with reference content, collecting any
    /// other-stream surplus on the way.
    fn settle(&mut self) {
        while self.current.equal == 0 && self.ref_pending() == 0 {
            let surplus = self.other_pending();
            self.other_index += surplus;
            self.inserted += surplus;
            self.current = DiffSegment::SENTINEL;
            match self.segments.next() {
                Some(segment) => self.current = *segment,
                None => break,
            }
        }
    }
}

/// Advances two diff lists one reference element at a time.
///
/// Both lists must describe the same reference sequence; `Merger::new`
/// takes the reference to be the first stream of `first` and the second
/// stream of `second`, the pairing used for per-source highlighting where
/// fine diffs are stored cyclically (AB, BC, CA).
///
/// Iterating a `Merger` yields one [`ChangeFlags`] per reference element.
#[derive(Debug, Clone)]
pub struct Merger<'a> {
    first: Cursor<'a>,
    second: Cursor<'a>,
}

impl<'a> Merger<'a> {
    pub fn new(first: &'a DiffList, second: &'a DiffList) -> Self {
        Self::with_streams(first, Stream::First, second, Stream::Second)
    }

    /// Walk two lists, naming which stream of each is the shared reference.
    pub fn with_streams(
        first: &'a DiffList,
        first_reference: Stream,
        second: &'a DiffList,
        second_reference: Stream,
    ) -> Self {
        Self {
            first: Cursor::new(first, first_reference),
            second: Cursor::new(second, second_reference),
        }
    }

    /// Go one step.
    pub fn advance(&mut self) {
        self.first.advance();
        self.second.advance();
    }

    /// Classification of the current reference position.
    pub fn what_changed(&self) -> ChangeFlags {
        let mut changed = ChangeFlags::NONE;
        if !self.first.is_equal() {
            changed |= ChangeFlags::FIRST;
        }
        if !self.second.is_equal() {
            changed |= ChangeFlags::SECOND;
        }
        changed
    }

    /// Both lists are exhausted.
    pub fn is_end_reached(&self) -> bool {
        self.first.is_end() && self.second.is_end()
    }

    pub(crate) fn cursors_mut(&mut self) -> (&mut Cursor<'a>, &mut Cursor<'a>) {
        (&mut self.first, &mut self.second)
    }
}

impl Iterator for Merger<'_> {
    type Item = ChangeFlags;

    fn next(&mut self) -> Option<ChangeFlags> {
        if self.is_end_reached() {
            return None;
        }
        let changed = self.what_changed();
        self.advance();
        Some(changed)
    }
}

/// Classify every character of a line of `len` characters.
///
/// `first` and `second` are the line's fine diffs against the two other
/// sources, oriented as for [`Merger::new`]. `None` means the other line is
/// identical. Positions past the end of the lists report no change.
pub fn char_changes(len: usize, first: Option<&DiffList>, second: Option<&DiffList>) -> Vec<ChangeFlags> {
    let identity = DiffList::identity(len);
    let mut changes: Vec<ChangeFlags> =
        Merger::new(first.unwrap_or(&identity), second.unwrap_or(&identity))
            .take(len)
            .collect();
    changes.resize(len, ChangeFlags::NONE);
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const N: ChangeFlags = ChangeFlags::NONE;
    const F: ChangeFlags = ChangeFlags::FIRST;
    const S: ChangeFlags = ChangeFlags::SECOND;
    const B: ChangeFlags = ChangeFlags::BOTH;

    #[test]
    fn test_uneven_runs() {
        // reference positions 1..4 changed against the first list,
        // only position 2 against the second.
        let first = DiffList::new([DiffSegment::new(1, 3, 3), DiffSegment::new(1, 0, 0)]);
        let second = DiffList::new([DiffSegment::new(2, 1, 1), DiffSegment::new(2, 0, 0)]);
        let merger = Merger::new(&first, &second);
        assert_eq!(merger.collect::<Vec<_>>(), vec![N, F, B, F, N]);
    }

    #[test]
    fn test_explicit_protocol() {
        let first = DiffList::new([DiffSegment::new(1, 1, 0)]);
        let second = DiffList::new([DiffSegment::new(0, 2, 1), DiffSegment::new(1, 0, 0)]);
        let mut merger = Merger::new(&first, &second);
        assert!(!merger.is_end_reached());
        assert_eq!(merger.what_changed(), S);
        merger.advance();
        assert_eq!(merger.what_changed(), F);
        merger.advance();
        assert!(merger.is_end_reached());
    }

    #[test]
    fn test_insertions_do_not_classify_reference() {
        let first = DiffList::new([DiffSegment::new(2, 0, 3), DiffSegment::new(1, 0, 0)]);
        let second = DiffList::identity(3);
        let merger = Merger::with_streams(&first, Stream::First, &second, Stream::First);
        assert_eq!(merger.collect::<Vec<_>>(), vec![N, N, N]);
    }

    #[test]
    fn test_cursor_counterparts_and_insertions() {
        // ref: r0 r1 r2      other: o0 x x r1' y
        let list = DiffList::new([
            DiffSegment::new(1, 0, 2),
            DiffSegment::new(0, 1, 2),
            DiffSegment::new(1, 0, 0),
        ]);
        let mut cursor = Cursor::new(&list, Stream::First);
        // the leading equal run comes before the insertion
        assert_eq!(cursor.take_insertions(), 0..0);
        assert_eq!(cursor.counterpart(), Some(0));
        cursor.advance();
        assert_eq!(cursor.take_insertions(), 1..3);
        assert_eq!(cursor.counterpart(), Some(3));
        cursor.advance();
        assert_eq!(cursor.take_insertions(), 4..5);
        assert_eq!(cursor.counterpart(), Some(5));
        cursor.advance();
        assert!(cursor.is_end());
        assert_eq!(cursor.ref_index(), 3);
    }

    #[test]
    fn test_cursor_deletion() {
        let list = DiffList::new([DiffSegment::new(0, 2, 0), DiffSegment::new(1, 0, 0)]);
        let mut cursor = Cursor::new(&list, Stream::First);
        assert_eq!(cursor.counterpart(), None);
        cursor.advance();
        assert_eq!(cursor.counterpart(), None);
        cursor.advance();
        assert_eq!(cursor.counterpart(), Some(0));
    }

    #[test]
    fn test_char_changes() {
        let first = DiffList::chars("abc", "aXc");
        assert_eq!(char_changes(3, Some(&first), None), vec![N, F, N]);
        assert_eq!(char_changes(2, None, None), vec![N, N]);
    }

    #[test]
    fn test_char_changes_against_both_sides() {
        // line "abcd"; the second list holds the line as its second stream
        let first = DiffList::chars("abcd", "aXcY");
        let second = DiffList::chars("aQRd", "abcd");
        assert_eq!(
            char_changes(4, Some(&first), Some(&second)),
            vec![N, B, S, F]
        );
        assert_eq!(char_changes(4, None, Some(&second)), vec![N, S, S, N]);
    }
}
