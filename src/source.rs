//! Source identifiers and line lookup.

use std::fmt;

use crate::diff::Stream;

/// One of the up to three compared inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Source {
    A,
    B,
    C,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::A, Source::B, Source::C];

    pub const fn index(self) -> usize {
        match self {
            Source::A => 0,
            Source::B => 1,
            Source::C => 2,
        }
    }

    /// Cyclic successor: A -> B -> C -> A.
    pub const fn next(self) -> Source {
        match self {
            Source::A => Source::B,
            Source::B => Source::C,
            Source::C => Source::A,
        }
    }

    /// Cyclic predecessor: A -> C -> B -> A.
    pub const fn prev(self) -> Source {
        match self {
            Source::A => Source::C,
            Source::B => Source::A,
            Source::C => Source::B,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::A => f.write_str("A"),
            Source::B => f.write_str("B"),
            Source::C => f.write_str("C"),
        }
    }
}

/// The source both pairwise diffs are computed against.
///
/// With [`Reference::A`] the inputs are the (A,B) and (A,C) diffs; with
/// [`Reference::B`] they are (A,B) and (B,C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Reference {
    #[default]
    A,
    B,
}

impl Reference {
    pub const fn source(self) -> Source {
        match self {
            Reference::A => Source::A,
            Reference::B => Source::B,
        }
    }

    /// The two non-reference sources, side 1 first.
    pub const fn sides(self) -> (Source, Source) {
        match self {
            Reference::A => (Source::B, Source::C),
            Reference::B => (Source::A, Source::C),
        }
    }

    /// Which stream of the (A,B) list holds the reference.
    pub(crate) const fn stream_in_ab(self) -> Stream {
        match self {
            Reference::A => Stream::First,
            Reference::B => Stream::Second,
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.source().fmt(f)
    }
}

/// Per-line text lookup used when comparing aligned lines.
pub trait LineSource {
    /// Text of line `index` of `source`, including its terminator.
    fn line(&self, source: Source, index: usize) -> Option<&str>;

    /// Number of lines in `source`, or `None` if the source is absent.
    fn line_count(&self, source: Source) -> Option<usize>;
}

/// [`LineSource`] over borrowed, already split lines.
#[derive(Debug, Clone, Copy)]
pub struct TextSources<'a, S> {
    lines: [Option<&'a [S]>; 3],
}

impl<'a, S: AsRef<str>> TextSources<'a, S> {
    pub fn new(a: &'a [S], b: &'a [S], c: Option<&'a [S]>) -> Self {
        Self {
            lines: [Some(a), Some(b), c],
        }
    }

    pub fn two_way(a: &'a [S], b: &'a [S]) -> Self {
        Self::new(a, b, None)
    }

    pub fn three_way(a: &'a [S], b: &'a [S], c: &'a [S]) -> Self {
        Self::new(a, b, Some(c))
    }

    pub fn lines(&self, source: Source) -> Option<&'a [S]> {
        self.lines[source.index()]
    }

    pub fn is_three_way(&self) -> bool {
        self.lines[Source::C.index()].is_some()
    }
}

impl<S: AsRef<str>> LineSource for TextSources<'_, S> {
    fn line(&self, source: Source, index: usize) -> Option<&str> {
        self.lines(source)?.get(index).map(AsRef::as_ref)
    }

    fn line_count(&self, source: Source) -> Option<usize> {
        self.lines(source).map(<[S]>::len)
    }
}

/// Split text into lines, keeping each line's terminator.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle() {
        for source in Source::ALL {
            assert_eq!(source.next().prev(), source);
        }
        assert_eq!(Source::C.next(), Source::A);
    }

    #[test]
    fn test_text_sources() {
        let a = split_lines("one\ntwo\n");
        let b = split_lines("one\n2");
        let sources = TextSources::two_way(&a, &b);
        assert_eq!(sources.line(Source::A, 1), Some("two\n"));
        assert_eq!(sources.line(Source::B, 1), Some("2"));
        assert_eq!(sources.line(Source::B, 2), None);
        assert_eq!(sources.line_count(Source::C), None);
        assert!(!sources.is_three_way());
    }

    #[test]
    fn test_reference_sides() {
        assert_eq!(Reference::A.sides(), (Source::B, Source::C));
        assert_eq!(Reference::B.sides(), (Source::A, Source::C));
        assert_eq!(Reference::B.to_string(), "B");
    }
}
