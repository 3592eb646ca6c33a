//! Bijection between source symbols and dense small integers `0..sigma`.
//!
//! `0` is reserved as the sentinel: strictly smaller than every real symbol, and conceptually
//! appended once to every indexed text.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::error::SearchError;

pub const SENTINEL: u32 = 0;

/// An ordered mapping from source bytes to integers `1..sigma-1`.
///
/// Built over the *sorted, deduplicated* set of bytes appearing in a text, so the mapping is
/// order-preserving: `a < b` as source bytes implies `map[a] < map[b]`.
#[derive(Debug, Clone)]
pub struct Alphabet {
    forward: BTreeMap<u8, u32>,
    backward: Vec<u8>,
}

impl Alphabet {
    /// Build an alphabet from the distinct bytes of `text`, in ascending order.
    pub fn build(text: &[u8]) -> Self {
        let mut distinct: Vec<u8> = text.to_vec();
        distinct.sort_unstable();
        distinct.dedup();

        let mut forward = BTreeMap::new();
        let mut backward = Vec::with_capacity(distinct.len() + 1);
        backward.push(0u8); // slot 0 is the sentinel; never looked up by byte value.
        for (idx, &byte) in distinct.iter().enumerate() {
            let symbol = (idx + 1) as u32;
            forward.insert(byte, symbol);
            backward.push(byte);
        }
        Self { forward, backward }
    }

    /// Total symbol count, including the sentinel: `sigma = |alphabet| + 1`.
    pub fn sigma(&self) -> u32 {
        self.forward.len() as u32 + 1
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    fn symbol_of(&self, byte: u8) -> Option<u32> {
        self.forward.get(&byte).copied()
    }

    /// Map source bytes into the dense alphabet and append the sentinel.
    ///
    /// This is the "with-sentinel mapped string" constructor of the spec: the returned sequence
    /// has length `text.len() + 1` and its last element is always `SENTINEL`.
    pub fn map_with_sentinel(&self, text: &[u8]) -> Result<Vec<u32>, SearchError> {
        let mut mapped = self.map_subsequence(text)?;
        mapped.push(SENTINEL);
        Ok(mapped)
    }

    /// Map source bytes into the dense alphabet, without appending a sentinel.
    ///
    /// This is the "with-sentinel mapped subsequence" constructor: same mapping, used where the
    /// caller manages the sentinel itself (e.g. SAIS unit tests over raw integer sequences).
    pub fn map_subsequence(&self, text: &[u8]) -> Result<Vec<u32>, SearchError> {
        text.iter()
            .map(|&b| {
                self.symbol_of(b)
                    .ok_or(SearchError::UnknownSymbol(b as char))
            })
            .collect()
    }

    /// Map a single query pattern. Fails with `UnknownSymbol` on the first unseen byte;
    /// callers treat this as "no matches possible" and stop silently (see `Index::search`).
    pub fn map_pattern(&self, pattern: &[u8]) -> Result<Vec<u32>, SearchError> {
        self.map_subsequence(pattern)
    }

    /// Recover the source byte for a dense symbol (`0` maps back to the sentinel placeholder).
    pub fn unmap(&self, symbol: u32) -> u8 {
        self.backward[symbol as usize]
    }

    /// The distinct source bytes, in ascending order. Sufficient to rebuild this exact mapping
    /// via `from_sorted_bytes`; used only at the persistence boundary, since an `Alphabet`
    /// itself carries no useful on-disk representation beyond the bytes it was built from.
    pub fn sorted_bytes(&self) -> Vec<u8> {
        self.backward[1..].to_vec()
    }

    /// Rebuild an alphabet from its distinct source bytes, already sorted ascending (as
    /// produced by `sorted_bytes`). Skips the sort/dedup pass `build` performs, since a
    /// persisted alphabet is already in that form.
    pub fn from_sorted_bytes(sorted: &[u8]) -> Self {
        let mut forward = BTreeMap::new();
        let mut backward = Vec::with_capacity(sorted.len() + 1);
        backward.push(0u8);
        for (idx, &byte) in sorted.iter().enumerate() {
            forward.insert(byte, (idx + 1) as u32);
            backward.push(byte);
        }
        Self { forward, backward }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigma_counts_sentinel() {
        let alphabet = Alphabet::build(b"aabca");
        // distinct bytes: a, b, c -> |alphabet| = 3, sigma = 4
        assert_eq!(alphabet.sigma(), 4);
    }

    #[test]
    fn mapping_is_order_preserving() {
        let alphabet = Alphabet::build(b"aabca");
        let mapped = alphabet.map_subsequence(b"abc").unwrap();
        assert_eq!(mapped, vec![1, 2, 3]);
    }

    #[test]
    fn with_sentinel_appends_zero() {
        let alphabet = Alphabet::build(b"aabca");
        let mapped = alphabet.map_with_sentinel(b"aabca").unwrap();
        assert_eq!(*mapped.last().unwrap(), SENTINEL);
        assert_eq!(mapped.len(), 6);
        assert!(mapped[..5].iter().all(|&s| s != SENTINEL));
    }

    #[test]
    fn unknown_symbol_rejected() {
        let alphabet = Alphabet::build(b"aabca");
        let err = alphabet.map_pattern(b"z").unwrap_err();
        assert_eq!(err, SearchError::UnknownSymbol('z'));
    }
}
