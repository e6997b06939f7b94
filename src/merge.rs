//! Merge decisions over an alignment.
//!
//! Every row of a [`Diff3LineVector`] is classified on its own: unchanged,
//! changed on one side only (take that side), changed identically on both
//! sides (take the common result), or conflicting. Conflicts are never
//! guessed; they stay unsolved until the caller picks a source.

use std::borrow::Cow;
use std::ops::Index;

use tracing::debug;

use crate::diff3::{Diff3Line, Diff3LineVector};
use crate::error::{AlignError, Result};
use crate::source::{LineSource, Reference, Source};

/// Classification of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeClass {
    /// All sources agree.
    Unchanged,
    /// Only the given side differs from the reference.
    CleanChange(Source),
    /// Both sides differ from the reference but agree with each other.
    IdenticalChange,
    /// Both sides differ from the reference and from each other.
    Conflict,
}

/// What a row contributes to the merged output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    /// The line of this source.
    Line(Source),
    /// Nothing: the line was deleted.
    Omit,
    /// A conflict nobody has decided yet.
    Unsolved,
}

/// One row's merge decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeLine {
    lines: [Option<usize>; 3],
    class: MergeClass,
    selection: Selection,
}

impl MergeLine {
    pub fn class(&self) -> MergeClass {
        self.class
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Line index `source` offers on this row.
    pub fn candidate(&self, source: Source) -> Option<usize> {
        self.lines[source.index()]
    }

    pub fn is_conflict(&self) -> bool {
        self.class == MergeClass::Conflict
    }

    pub fn is_unsolved(&self) -> bool {
        self.selection == Selection::Unsolved
    }

    /// The source line this row emits, if any.
    pub fn output(&self) -> Option<(Source, usize)> {
        match self.selection {
            Selection::Line(source) => self.candidate(source).map(|line| (source, line)),
            Selection::Omit | Selection::Unsolved => None,
        }
    }
}

fn classify(row: &Diff3Line, reference: Reference, three_way: bool) -> MergeClass {
    let base = reference.source();
    let (side1, side2) = reference.sides();
    if !three_way {
        return if row.is_equal(base, side1) {
            MergeClass::Unchanged
        } else {
            MergeClass::Conflict
        };
    }
    match (row.is_equal(base, side1), row.is_equal(base, side2)) {
        (true, true) => MergeClass::Unchanged,
        (true, false) => MergeClass::CleanChange(side2),
        (false, true) => MergeClass::CleanChange(side1),
        (false, false) if row.is_equal(side1, side2) => MergeClass::IdenticalChange,
        (false, false) => MergeClass::Conflict,
    }
}

fn select(row: &Diff3Line, class: MergeClass, reference: Reference) -> Selection {
    let take = |source: Source| match row.line(source) {
        Some(_) => Selection::Line(source),
        None => Selection::Omit,
    };
    match class {
        MergeClass::Unchanged => take(reference.source()),
        MergeClass::CleanChange(source) => take(source),
        MergeClass::IdenticalChange => take(reference.sides().0),
        MergeClass::Conflict => Selection::Unsolved,
    }
}

/// Both sides inserted lines before the same reference line.
///
/// Each inserted line sits on its own row, side 1's run first. Runs with
/// the same text collapse onto side 1's rows; anything else is a conflict
/// spanning both runs.
fn reconcile_insertions<S: LineSource + ?Sized>(
    lines: &mut [MergeLine],
    reference: Reference,
    sources: &S,
) {
    let base = reference.source();
    let (side1, side2) = reference.sides();
    let text = |line: &MergeLine, source: Source| {
        line.candidate(source)
            .and_then(|index| sources.line(source, index))
    };

    let mut row = 0;
    while row < lines.len() {
        if lines[row].candidate(base).is_some() {
            row += 1;
            continue;
        }
        let end = (row..lines.len())
            .find(|&i| lines[i].candidate(base).is_some())
            .unwrap_or(lines.len());
        let split = (row..end)
            .find(|&i| lines[i].candidate(side1).is_none())
            .unwrap_or(end);
        let (first, second) = lines[row..end].split_at_mut(split - row);
        if !first.is_empty() && !second.is_empty() {
            let same = first.len() == second.len()
                && first
                    .iter()
                    .zip(second.iter())
                    .all(|(x, y)| text(x, side1) == text(y, side2));
            let (class, kept, dropped) = if same {
                (MergeClass::IdenticalChange, Selection::Line(side1), Selection::Omit)
            } else {
                (MergeClass::Conflict, Selection::Unsolved, Selection::Unsolved)
            };
            for line in first.iter_mut() {
                line.class = class;
                line.selection = kept;
            }
            for line in second.iter_mut() {
                line.class = class;
                line.selection = dropped;
            }
            debug!(
                row,
                first = first.len(),
                second = second.len(),
                same,
                "insertions on both sides"
            );
        }
        row = end;
    }
}

/// Produces the start, base, middle and end lines around a conflict.
///
/// Every marker must end with a line terminator.
pub trait MergeMarkers {
    fn start_marker(&self) -> String;

    /// `None` leaves the reference lines out of conflict blocks.
    fn base_marker(&self) -> Option<String>;

    fn mid_marker(&self) -> String;

    fn end_marker(&self) -> String;
}

/// The familiar `<<<<<<<` / `|||||||` / `=======` / `>>>>>>>` markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMarkers<'a> {
    upper_name: Option<&'a str>,
    lower_name: Option<&'a str>,
    base: Option<Option<&'a str>>,
}

impl<'a> StandardMarkers<'a> {
    pub fn new(upper_name: Option<&'a str>, lower_name: Option<&'a str>) -> Self {
        Self {
            upper_name,
            lower_name,
            base: None,
        }
    }

    /// Also show the reference lines, labelled `base_name`.
    pub fn with_base(mut self, base_name: Option<&'a str>) -> Self {
        self.base = Some(base_name);
        self
    }
}

fn marker(token: &str, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("{token} {name}\n"),
        None => format!("{token}\n"),
    }
}

impl MergeMarkers for StandardMarkers<'_> {
    fn start_marker(&self) -> String {
        marker("<<<<<<<", self.upper_name)
    }

    fn base_marker(&self) -> Option<String> {
        self.base.map(|name| marker("|||||||", name))
    }

    fn mid_marker(&self) -> String {
        marker("=======", None)
    }

    fn end_marker(&self) -> String {
        marker(">>>>>>>", self.lower_name)
    }
}

/// Per-row merge decisions for a whole alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    lines: Vec<MergeLine>,
    conflicts: Vec<usize>,
    reference: Reference,
    three_way: bool,
}

impl MergeResult {
    /// Classify every row of `vector`, whose line texts come from `sources`.
    pub fn build<S: LineSource + ?Sized>(vector: &Diff3LineVector, sources: &S) -> Self {
        let reference = vector.reference();
        let three_way = vector.is_three_way();
        let mut lines: Vec<MergeLine> = vector
            .iter()
            .map(|row| {
                let class = classify(row, reference, three_way);
                MergeLine {
                    lines: row.lines(),
                    class,
                    selection: select(row, class, reference),
                }
            })
            .collect();
        if three_way {
            reconcile_insertions(&mut lines, reference, sources);
        }
        let conflicts: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.is_conflict())
            .map(|(row, _)| row)
            .collect();
        debug!(rows = lines.len(), conflicts = conflicts.len(), "classified merge");
        Self {
            lines,
            conflicts,
            reference,
            three_way,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&MergeLine> {
        self.lines.get(row)
    }

    pub fn lines(&self) -> &[MergeLine] {
        &self.lines
    }

    pub fn class(&self, row: usize) -> Option<MergeClass> {
        self.get(row).map(MergeLine::class)
    }

    /// Rows classified as conflicts, resolved or not, in document order.
    pub fn conflicts(&self) -> &[usize] {
        &self.conflicts
    }

    pub fn conflict_count(&self) -> usize {
        self.conflicts.len()
    }

    pub fn unsolved_count(&self) -> usize {
        self.conflicts
            .iter()
            .filter(|&&row| self.lines[row].is_unsolved())
            .count()
    }

    /// No unsolved conflicts remain.
    pub fn is_clean(&self) -> bool {
        self.unsolved_count() == 0
    }

    /// The candidate lines of every source present on `row`.
    pub fn candidates<'s, S: LineSource + ?Sized>(
        &self,
        row: usize,
        sources: &'s S,
    ) -> Vec<(Source, &'s str)> {
        let Some(line) = self.get(row) else {
            return Vec::new();
        };
        Source::ALL
            .into_iter()
            .filter_map(|source| {
                let index = line.candidate(source)?;
                sources.line(source, index).map(|text| (source, text))
            })
            .collect()
    }

    /// Decide a conflict row: take `choice`'s line, or drop the row with `None`.
    pub fn resolve(&mut self, row: usize, choice: Option<Source>) -> Result<()> {
        let line = self
            .lines
            .get_mut(row)
            .filter(|line| line.is_conflict())
            .ok_or(AlignError::NotAConflict { row })?;
        line.selection = match choice {
            Some(source) if line.candidate(source).is_none() => {
                return Err(AlignError::UnavailableChoice {
                    row,
                    choice: source,
                })
            }
            Some(source) => Selection::Line(source),
            None => Selection::Omit,
        };
        debug!(row, ?choice, "resolved conflict");
        Ok(())
    }

    fn block_start(&self, row: usize, matches: impl Fn(&MergeLine) -> bool) -> bool {
        matches(&self.lines[row]) && (row == 0 || !matches(&self.lines[row - 1]))
    }

    fn next_block(&self, row: usize, matches: impl Fn(&MergeLine) -> bool) -> Option<usize> {
        (row + 1..self.len()).find(|&i| self.block_start(i, &matches))
    }

    fn prev_block(&self, row: usize, matches: impl Fn(&MergeLine) -> bool) -> Option<usize> {
        let mut start = row.min(self.len());
        while start > 0
            && start < self.len()
            && matches(&self.lines[start])
            && matches(&self.lines[start - 1])
        {
            start -= 1;
        }
        (0..start).rev().find(|&i| self.block_start(i, &matches))
    }

    /// First row of the next block of conflict rows after `row`.
    pub fn next_conflict(&self, row: usize) -> Option<usize> {
        self.next_block(row, MergeLine::is_conflict)
    }

    /// First row of the conflict block before the one containing `row`.
    pub fn prev_conflict(&self, row: usize) -> Option<usize> {
        self.prev_block(row, MergeLine::is_conflict)
    }

    /// First row of the next block of unsolved conflict rows after `row`.
    pub fn next_unsolved_conflict(&self, row: usize) -> Option<usize> {
        self.next_block(row, MergeLine::is_unsolved)
    }

    /// First row of the unsolved block before the one containing `row`.
    pub fn prev_unsolved_conflict(&self, row: usize) -> Option<usize> {
        self.prev_block(row, MergeLine::is_unsolved)
    }

    /// Assemble the merged text.
    ///
    /// Runs of unsolved rows are written as one conflict block: side 1's
    /// lines, optionally the reference lines, then side 2's lines. In a
    /// two-way merge the reference takes the upper half and side 1 the lower.
    pub fn merge_lines<'s, S: LineSource + ?Sized>(
        &self,
        sources: &'s S,
        markers: &impl MergeMarkers,
    ) -> Vec<Cow<'s, str>> {
        let base = self.reference.source();
        let (upper, lower) = if self.three_way {
            self.reference.sides()
        } else {
            (base, self.reference.sides().0)
        };
        let push_lines = |out: &mut Vec<Cow<'s, str>>, block: &[MergeLine], source: Source| {
            for line in block {
                if let Some(text) = line.candidate(source).and_then(|i| sources.line(source, i)) {
                    out.push(Cow::Borrowed(text));
                }
            }
        };

        let mut out = Vec::with_capacity(self.lines.len());
        let mut row = 0;
        while row < self.lines.len() {
            if !self.lines[row].is_unsolved() {
                if let Some(text) = self.lines[row]
                    .output()
                    .and_then(|(source, index)| sources.line(source, index))
                {
                    out.push(Cow::Borrowed(text));
                }
                row += 1;
                continue;
            }

            let end = (row..self.lines.len())
                .find(|&i| !self.lines[i].is_unsolved())
                .unwrap_or(self.lines.len());
            let block = &self.lines[row..end];
            out.push(Cow::Owned(markers.start_marker()));
            push_lines(&mut out, block, upper);
            if self.three_way {
                if let Some(base_marker) = markers.base_marker() {
                    out.push(Cow::Owned(base_marker));
                    push_lines(&mut out, block, base);
                }
            }
            out.push(Cow::Owned(markers.mid_marker()));
            push_lines(&mut out, block, lower);
            out.push(Cow::Owned(markers.end_marker()));
            row = end;
        }
        out
    }
}

impl Index<usize> for MergeResult {
    type Output = MergeLine;

    fn index(&self, row: usize) -> &MergeLine {
        &self.lines[row]
    }
}
