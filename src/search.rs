//! Bounded-edit backwards traversal of the FM-index.
//!
//! Realized as an explicit state machine over a frame stack and a pre-allocated edit-op buffer
//! rather than natural recursion, so that long patterns with generous edit budgets cannot blow
//! the host stack. `Phase::Init` runs the D-table pruning check and hit detection; popping the
//! stack and `continue`ing the work loop stands in for returning from a recursive call; an
//! empty stack is the terminal state.
//!
//! The traversal itself is a borrowing struct implementing `Iterator`, giving callers a lazy,
//! pull-based stream of hits instead of a collected `Vec`.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use crate::bwt::{CTable, OTable};
use crate::cigar::{edits_to_cigar, Cigar, Edit};
use crate::dtable::DTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Entry point for a node: run the D-table pruning check, then either detect a hit
    /// (`i < 0`) or move on to trying the M operator.
    Init,
    /// Emitting `(SA[j], cigar)` for `j` ascending through `[l, r)`. The sole suspension point.
    Emit { j: u32 },
    /// Trying the M operator for symbol `next_a` and upward.
    Match { next_a: u32 },
    /// Trying the I operator (attempted exactly once per node).
    Insert,
    /// Trying the D operator for symbol `next_a` and upward; skipped entirely when
    /// `edits_idx == 0` (the no-leading-deletion rule, checked uniformly at every node rather
    /// than special-cased only for the literal root).
    Delete { next_a: u32 },
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    l: u32,
    r: u32,
    i: isize,
    edits_left: u32,
    edits_idx: usize,
    phase: Phase,
}

/// A lazy, pull-based stream of `(sa_index, cigar)` hits for one `(pattern, k)` search.
///
/// Holds the entire traversal state (frame stack, edit-op buffer) so a consumer that stops
/// pulling simply drops it; no partial external state needs unwinding.
pub struct SearchIter<'a> {
    sa: &'a [u32],
    c: &'a CTable,
    o: &'a OTable,
    sigma: u32,
    pattern: Vec<u32>,
    d: DTable,
    edit_buf: Vec<Edit>,
    stack: Vec<Frame>,
}

impl<'a> SearchIter<'a> {
    /// Build the traversal for a pattern already mapped into the reference's dense alphabet,
    /// with its D-table already computed against `c`/`o_rev`.
    pub(crate) fn new(
        sa: &'a [u32],
        c: &'a CTable,
        o: &'a OTable,
        sigma: u32,
        pattern: Vec<u32>,
        d: DTable,
        k: u32,
    ) -> Self {
        let n = sa.len() as u32;
        let m = pattern.len();
        let mut stack = Vec::with_capacity(m + 1);
        if m > 0 {
            stack.push(Frame {
                l: 0,
                r: n,
                i: m as isize - 1,
                edits_left: k,
                edits_idx: 0,
                phase: Phase::Init,
            });
        }
        let edit_buf = vec![Edit::Match; m + k as usize];
        SearchIter {
            sa,
            c,
            o,
            sigma,
            pattern,
            d,
            edit_buf,
            stack,
        }
    }

    /// An iterator with no matches: used when the pattern contains a symbol absent from the
    /// reference's alphabet (`UnknownSymbol` surfaces as an empty stream, not an error).
    pub(crate) fn empty(sa: &'a [u32], c: &'a CTable, o: &'a OTable, sigma: u32) -> Self {
        SearchIter {
            sa,
            c,
            o,
            sigma,
            pattern: Vec::new(),
            d: DTable::build(&[], c, o),
            edit_buf: Vec::new(),
            stack: Vec::new(),
        }
    }
}

impl<'a> Iterator for SearchIter<'a> {
    type Item = (u32, Cigar);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = *self.stack.last()?;

            match frame.phase {
                Phase::Init => {
                    let bound = self.d.lookup(frame.i);
                    if frame.edits_left < bound {
                        self.stack.pop();
                        continue;
                    }
                    if frame.i < 0 {
                        self.stack.last_mut().unwrap().phase = Phase::Emit { j: frame.l };
                    } else {
                        self.stack.last_mut().unwrap().phase = Phase::Match { next_a: 1 };
                    }
                }

                Phase::Emit { j } => {
                    if j >= frame.r {
                        self.stack.pop();
                        continue;
                    }
                    self.stack.last_mut().unwrap().phase = Phase::Emit { j: j + 1 };
                    let pos = self.sa[j as usize];
                    let mut ops = self.edit_buf[..frame.edits_idx].to_vec();
                    ops.reverse();
                    return Some((pos, edits_to_cigar(&ops)));
                }

                Phase::Match { next_a } => {
                    if next_a >= self.sigma {
                        self.stack.last_mut().unwrap().phase = Phase::Insert;
                        continue;
                    }
                    self.stack.last_mut().unwrap().phase = Phase::Match { next_a: next_a + 1 };

                    let a = next_a;
                    let l2 = self.c[a as usize] + self.o.get(a, frame.l as usize);
                    let r2 = self.c[a as usize] + self.o.get(a, frame.r as usize);
                    if l2 >= r2 {
                        continue;
                    }
                    let cost: u32 = if a != self.pattern[frame.i as usize] { 1 } else { 0 };
                    if frame.edits_left < cost {
                        continue;
                    }
                    self.edit_buf[frame.edits_idx] = Edit::Match;
                    self.stack.push(Frame {
                        l: l2,
                        r: r2,
                        i: frame.i - 1,
                        edits_left: frame.edits_left - cost,
                        edits_idx: frame.edits_idx + 1,
                        phase: Phase::Init,
                    });
                }

                Phase::Insert => {
                    self.stack.last_mut().unwrap().phase = Phase::Delete { next_a: 1 };
                    if frame.edits_left == 0 {
                        continue;
                    }
                    self.edit_buf[frame.edits_idx] = Edit::Insert;
                    self.stack.push(Frame {
                        l: frame.l,
                        r: frame.r,
                        i: frame.i - 1,
                        edits_left: frame.edits_left - 1,
                        edits_idx: frame.edits_idx + 1,
                        phase: Phase::Init,
                    });
                }

                Phase::Delete { next_a } => {
                    // Forbidden both at the root and whenever nothing has been emitted yet on
                    // this path; identical condition, per the Phase::Delete doc comment.
                    if frame.edits_idx == 0 {
                        self.stack.pop();
                        continue;
                    }
                    if next_a >= self.sigma {
                        self.stack.pop();
                        continue;
                    }
                    self.stack.last_mut().unwrap().phase = Phase::Delete { next_a: next_a + 1 };
                    if frame.edits_left == 0 {
                        continue;
                    }

                    let a = next_a;
                    let l2 = self.c[a as usize] + self.o.get(a, frame.l as usize);
                    let r2 = self.c[a as usize] + self.o.get(a, frame.r as usize);
                    if l2 >= r2 {
                        continue;
                    }
                    self.edit_buf[frame.edits_idx] = Edit::Delete;
                    self.stack.push(Frame {
                        l: l2,
                        r: r2,
                        i: frame.i,
                        edits_left: frame.edits_left - 1,
                        edits_idx: frame.edits_idx + 1,
                        phase: Phase::Init,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::bwt;
    use crate::cigar::{count_edits, extract_alignment};

    struct TestIndex {
        text: alloc::vec::Vec<u8>,
        alphabet: Alphabet,
        sa: alloc::vec::Vec<u32>,
        c: CTable,
        o: OTable,
        o_rev: OTable,
    }

    fn build_index(text: &str) -> TestIndex {
        let alphabet = Alphabet::build(text.as_bytes());
        let mapped = alphabet.map_with_sentinel(text.as_bytes()).unwrap();
        let forward = bwt::build(&mapped, alphabet.sigma());
        let c = bwt::build_c_table(&forward.bwt, alphabet.sigma() as usize);
        let o = OTable::build(&forward.bwt, alphabet.sigma() as usize);

        let mut reversed: alloc::vec::Vec<u8> = text.as_bytes().to_vec();
        reversed.reverse();
        let rev_mapped = alphabet.map_with_sentinel(&reversed).unwrap();
        let rev_result = bwt::build(&rev_mapped, alphabet.sigma());
        let o_rev = OTable::build(&rev_result.bwt, alphabet.sigma() as usize);

        TestIndex {
            text: text.as_bytes().to_vec(),
            alphabet,
            sa: forward.sa,
            c,
            o,
            o_rev,
        }
    }

    fn search<'a>(index: &'a TestIndex, pattern: &str, k: u32) -> Vec<(u32, Cigar)> {
        let mapped_pattern = index.alphabet.map_pattern(pattern.as_bytes()).unwrap();
        let d = DTable::build(&mapped_pattern, &index.c, &index.o_rev);
        let iter = SearchIter::new(
            &index.sa,
            &index.c,
            &index.o,
            index.alphabet.sigma(),
            mapped_pattern,
            d,
            k,
        );
        iter.collect()
    }

    fn naive_exact_positions(text: &[u8], pattern: &[u8]) -> alloc::vec::Vec<usize> {
        if pattern.is_empty() || pattern.len() > text.len() {
            return alloc::vec::Vec::new();
        }
        (0..=text.len() - pattern.len())
            .filter(|&i| &text[i..i + pattern.len()] == pattern)
            .collect()
    }

    #[test]
    fn exact_match_matches_naive_scan() {
        let index = build_index("mississippi");
        for pattern in ["si", "ppi", "ssi", "pip", "x"] {
            let mut got: alloc::vec::Vec<usize> = search(&index, pattern, 0)
                .into_iter()
                .map(|(pos, _)| pos as usize)
                .collect();
            got.sort_unstable();
            let mut want = naive_exact_positions(index.text.as_slice(), pattern.as_bytes());
            want.sort_unstable();
            assert_eq!(got, want, "pattern {:?}", pattern);
        }
    }

    #[test]
    fn every_hit_is_sound_under_k() {
        let index = build_index("mississippi");
        for k in 1..=3u32 {
            for pattern in ["ssi", "ppi", "issp"] {
                for (pos, cigar) in search(&index, pattern, k) {
                    let alignment =
                        extract_alignment(&index.text, pattern.as_bytes(), pos as usize, &cigar);
                    assert!(
                        count_edits(&alignment) <= k as usize,
                        "pattern {:?} pos {} cigar {} exceeded k={}",
                        pattern,
                        pos,
                        cigar,
                        k
                    );
                }
            }
        }
    }

    #[test]
    fn unknown_symbol_yields_empty_stream_not_error() {
        let index = build_index("mississippi");
        let mapped = index.alphabet.map_pattern(b"z");
        assert!(mapped.is_err());
    }

    #[test]
    fn k_zero_aabca_exact() {
        let index = build_index("aabca");
        let hits = search(&index, "a", 0);
        let mut positions: alloc::vec::Vec<usize> =
            hits.into_iter().map(|(p, _)| p as usize).collect();
        positions.sort_unstable();
        assert_eq!(positions, vec![0, 1, 4]);
    }
}
