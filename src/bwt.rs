//! The Burrows-Wheeler Transform and its supporting rank/count tables.
//!
//! Tables are sized by the alphabet's actual `sigma` rather than a fixed byte range, since the
//! mapped alphabet here is small and dense.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use crate::sais;

/// `C[a] = |{ j : B[j] < a }|`. Monotone non-decreasing; `C[0] = 0`.
pub type CTable = Vec<u32>;

/// Dense `sigma x (n+1)` occurrence matrix, column-major: `O[a][i] = |{ j < i : B[j] = a }|`.
///
/// Stored as a single flat allocation of `sigma * (n+1)` cells, indexed `a * (n+1) + i`. The
/// matrix is read one `(symbol, position)` pair at a time with no row-wise scanning, so a
/// compact column-major layout is the natural fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OTable {
    sigma: usize,
    stride: usize, // n + 1
    cells: Vec<u32>,
}

impl OTable {
    /// Build `O` from a BWT string over an alphabet of size `sigma`.
    pub fn build(bwt: &[u32], sigma: usize) -> Self {
        let n = bwt.len();
        let stride = n + 1;
        let mut cells = vec![0u32; sigma * stride];
        // O[:, 0] is all zero; column i = column i-1 plus one at row B[i-1].
        for i in 1..=n {
            for a in 0..sigma {
                let prev = cells[a * stride + i - 1];
                cells[a * stride + i] = prev;
            }
            let row = bwt[i - 1] as usize;
            cells[row * stride + i] += 1;
        }
        Self {
            sigma,
            stride,
            cells,
        }
    }

    #[inline]
    pub fn get(&self, symbol: u32, i: usize) -> u32 {
        debug_assert!((symbol as usize) < self.sigma);
        debug_assert!(i < self.stride);
        self.cells[symbol as usize * self.stride + i]
    }

    pub fn sigma(&self) -> usize {
        self.sigma
    }

    /// `n`, the length of the BWT this table was built from (`stride - 1`).
    pub fn text_len(&self) -> usize {
        self.stride - 1
    }

    /// Rebuild a table from raw flat cells (as produced by persistence), validating shape.
    /// Used only at the `serde`/`bincode` boundary in `index.rs`; returns `None` on a cell-count
    /// mismatch so the caller can surface `SearchError::CorruptIndex` instead of panicking.
    pub fn from_raw_cells(cells: Vec<u32>, sigma: usize, n: usize) -> Option<Self> {
        let stride = n + 1;
        if cells.len() != sigma * stride {
            return None;
        }
        Some(Self {
            sigma,
            stride,
            cells,
        })
    }
}

/// Prefix-sum the symbol-frequency vector of `bwt` into a C-table over alphabet size `sigma`.
pub fn build_c_table(bwt: &[u32], sigma: usize) -> CTable {
    let mut freq = vec![0u32; sigma];
    for &c in bwt {
        freq[c as usize] += 1;
    }
    let mut c = vec![0u32; sigma];
    let mut sum = 0u32;
    for a in 0..sigma {
        c[a] = sum;
        sum += freq[a];
    }
    c
}

/// `BWT(T)`: the suffix array, paired with `B[i] = T[(SA[i] - 1) mod n]`.
pub struct BwtResult {
    pub sa: Vec<u32>,
    pub bwt: Vec<u32>,
}

/// Build the suffix array (via SA-IS) and the BWT derived from it.
pub fn build(mapped_text: &[u32], sigma: u32) -> BwtResult {
    let sa = sais::suffix_array(mapped_text, sigma);
    let n = sa.len();
    let bwt = sa
        .iter()
        .map(|&pos| {
            let prev = (pos as usize + n - 1) % n;
            mapped_text[prev]
        })
        .collect();
    BwtResult { sa, bwt }
}
