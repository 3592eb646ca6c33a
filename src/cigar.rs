//! CIGAR codec: run-length encoding between an ordered edit sequence and the compact
//! `(count, kind)` run form, plus alignment extraction and edit counting.
//!
//! The type itself is the usual op enum plus run-length element, with `Display` built on
//! `write!`.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// A single edit operation. `Match` covers both equal and unequal aligned pairs; the format is
/// "alignment", not "match" in the strict sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Consume both text and pattern.
    Match,
    /// Consume pattern only (a gap in the text).
    Insert,
    /// Consume text only (a gap in the pattern).
    Delete,
}

impl Edit {
    fn kind_char(self) -> char {
        match self {
            Edit::Match => 'M',
            Edit::Insert => 'I',
            Edit::Delete => 'D',
        }
    }
}

/// One run of `count` consecutive identical-kind edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CigarElem {
    pub count: u32,
    pub kind: Edit,
}

impl fmt::Display for CigarElem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.kind.kind_char())
    }
}

/// A sequence of runs, adjacent runs always differing in kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cigar(pub Vec<CigarElem>);

impl fmt::Display for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for elem in &self.0 {
            write!(f, "{}", elem)?;
        }
        Ok(())
    }
}

impl Cigar {
    pub fn to_cigar_string(&self) -> String {
        self.to_string()
    }
}

/// Run-length encode an edit sequence into a `Cigar`.
pub fn edits_to_cigar(edits: &[Edit]) -> Cigar {
    let mut runs: Vec<CigarElem> = Vec::new();
    for &edit in edits {
        match runs.last_mut() {
            Some(last) if last.kind == edit => last.count += 1,
            _ => runs.push(CigarElem { count: 1, kind: edit }),
        }
    }
    Cigar(runs)
}

/// Inverse of `edits_to_cigar`: expand runs back into the flat edit sequence.
pub fn cigar_to_edits(cigar: &Cigar) -> Vec<Edit> {
    let mut edits = Vec::new();
    for elem in &cigar.0 {
        for _ in 0..elem.count {
            edits.push(elem.kind);
        }
    }
    edits
}

/// The two aligned rows produced by walking a CIGAR: the text row (with `-` for insertions)
/// and the pattern row (with `-` for deletions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub text_row: Vec<u8>,
    pub pattern_row: Vec<u8>,
}

/// Walk `cigar` from `pos` in `text` and position `0` in `pattern`, emitting the aligned pair.
/// `M` consumes both; `I` consumes the pattern and inserts `-` on the text side; `D` consumes
/// the text and inserts `-` on the pattern side.
pub fn extract_alignment(text: &[u8], pattern: &[u8], pos: usize, cigar: &Cigar) -> Alignment {
    let mut text_row = Vec::new();
    let mut pattern_row = Vec::new();
    let mut ti = pos;
    let mut pi = 0usize;

    for elem in &cigar.0 {
        for _ in 0..elem.count {
            match elem.kind {
                Edit::Match => {
                    text_row.push(text[ti]);
                    pattern_row.push(pattern[pi]);
                    ti += 1;
                    pi += 1;
                }
                Edit::Insert => {
                    text_row.push(b'-');
                    pattern_row.push(pattern[pi]);
                    pi += 1;
                }
                Edit::Delete => {
                    text_row.push(text[ti]);
                    pattern_row.push(b'-');
                    ti += 1;
                }
            }
        }
    }

    Alignment {
        text_row,
        pattern_row,
    }
}

/// Number of columns where the text row and pattern row differ (mismatches and all gaps).
pub fn count_edits(alignment: &Alignment) -> usize {
    alignment
        .text_row
        .iter()
        .zip(alignment.pattern_row.iter())
        .filter(|(t, p)| t != p)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_example() {
        let edits = [
            Edit::Match,
            Edit::Match,
            Edit::Insert,
            Edit::Match,
            Edit::Delete,
        ];
        let cigar = edits_to_cigar(&edits);
        assert_eq!(cigar.to_cigar_string(), "2M1I1M1D");
        assert_eq!(cigar_to_edits(&cigar), edits);
    }

    #[test]
    fn round_trip_is_general() {
        let patterns: &[&[Edit]] = &[
            &[Edit::Match],
            &[Edit::Insert, Edit::Insert, Edit::Insert],
            &[Edit::Match, Edit::Delete, Edit::Delete, Edit::Match, Edit::Match],
        ];
        for edits in patterns {
            let cigar = edits_to_cigar(edits);
            assert_eq!(&cigar_to_edits(&cigar), edits);
        }
    }

    #[test]
    fn extract_alignment_all_match() {
        let text = b"mississippi";
        let pattern = b"ssi";
        let cigar = Cigar(vec![CigarElem { count: 3, kind: Edit::Match }]);
        let alignment = extract_alignment(text, pattern, 3, &cigar);
        assert_eq!(alignment.text_row, b"ssi");
        assert_eq!(alignment.pattern_row, b"ssi");
        assert_eq!(count_edits(&alignment), 0);
    }

    #[test]
    fn extract_alignment_with_insert_and_delete() {
        // text: "abc", pattern "axbc" aligned as M I M M (insert 'x')
        let text = b"abc";
        let pattern = b"axbc";
        let cigar = edits_to_cigar(&[Edit::Match, Edit::Insert, Edit::Match, Edit::Match]);
        let alignment = extract_alignment(text, pattern, 0, &cigar);
        assert_eq!(alignment.text_row, b"a-bc");
        assert_eq!(alignment.pattern_row, b"axbc");
        assert_eq!(count_edits(&alignment), 1);
    }
}
