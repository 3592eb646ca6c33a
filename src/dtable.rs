//! D-table: a per-pattern lower bound on the number of edits still needed, used to prune the
//! approximate search.
//!
//! Grounded on the original sources' `build_dtab`: walk the pattern forward through the
//! reverse-O-table index, resetting the interval and bumping the edit counter whenever it
//! collapses to empty.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use crate::bwt::{CTable, OTable};

/// `D[i]` is a lower bound on edits required for `P[0..i]` to match somewhere in the reference.
/// Monotone non-decreasing in `i`. The virtual slot `D[-1] = 0` is not stored; callers index
/// with `lookup(&d_table, i)` which treats negative indices as `0`.
pub struct DTable(Vec<u32>);

impl DTable {
    /// Build the D-table for mapped pattern `pattern` (symbols already run through
    /// `Alphabet::map_pattern`), given the reference's C-table and reverse-O-table.
    pub fn build(pattern: &[u32], c: &CTable, o_rev: &OTable) -> Self {
        let m = pattern.len();
        let n = o_rev.text_len();
        let mut d = vec![0u32; m];
        let mut l = 0u32;
        let mut r = n as u32;
        let mut min_edits = 0u32;

        for (i, &symbol) in pattern.iter().enumerate() {
            let c_a = c[symbol as usize];
            l = c_a + o_rev.get(symbol, l as usize);
            r = c_a + o_rev.get(symbol, r as usize);
            if l == r {
                min_edits += 1;
                l = 0;
                r = n as u32;
            }
            d[i] = min_edits;
        }

        DTable(d)
    }

    /// `D[i]` for `i >= 0`, or `0` for the virtual index `-1` (modeled here as `i == usize::MAX`
    /// never occurring; callers pass `i` as `isize` via `lookup`).
    pub fn get(&self, i: usize) -> u32 {
        self.0[i]
    }

    /// Bounds-guarded lookup matching the spec's `D[-1] = 0` convention: `i < 0` yields `0`.
    pub fn lookup(&self, i: isize) -> u32 {
        if i < 0 {
            0
        } else {
            self.0[i as usize]
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
