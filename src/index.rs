//! Index packaging: bundle `{alphabet, SA, C, O, O'}` per reference sequence and expose a
//! callable matcher.
//!
//! Built once, owns every table, and exposes query methods that take borrowed patterns. Holds
//! the full suffix array rather than a sampled subset, trading memory for simplicity.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::bwt::{self, CTable, OTable};
use crate::dtable::DTable;
use crate::error::SearchError;
use crate::search::SearchIter;

/// The immutable quintuple `(Alphabet, SA, C, O, O')` for one reference sequence.
///
/// Created once by `preprocess`, persisted opaquely, loaded to serve many queries. Nothing
/// mutates an `Index` after construction, so a matcher may borrow it freely without
/// synchronization.
pub struct Index {
    alphabet: Alphabet,
    sa: Vec<u32>,
    c: CTable,
    o: OTable,
    o_rev: OTable,
}

/// A plain-data mirror of `Index`'s tables, used only at the `serde`/`bincode` persistence
/// boundary. `Alphabet` itself is not serialized; it is rebuilt from `alphabet_bytes`, the
/// sorted distinct source bytes, which fully determines the mapping.
#[cfg(feature = "std")]
#[derive(Serialize, Deserialize)]
struct IndexRecord {
    alphabet_bytes: Vec<u8>,
    sa: Vec<u32>,
    c: Vec<u32>,
    o_sigma: usize,
    o_cells: Vec<u32>,
    o_rev_cells: Vec<u32>,
}

impl Index {
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn sa(&self) -> &[u32] {
        &self.sa
    }

    pub fn c(&self) -> &CTable {
        &self.c
    }

    pub fn o(&self) -> &OTable {
        &self.o
    }

    pub fn o_rev(&self) -> &OTable {
        &self.o_rev
    }

    pub fn text_len(&self) -> usize {
        self.sa.len()
    }

    /// Bounded-edit search. Rejects an empty pattern loudly; a pattern containing a symbol
    /// absent from this reference's alphabet yields an empty hit stream, not an error.
    pub fn search<'a>(&'a self, pattern: &[u8], k: u32) -> Result<SearchIter<'a>, SearchError> {
        if pattern.is_empty() {
            return Err(SearchError::EmptyPattern);
        }
        match self.alphabet.map_pattern(pattern) {
            Ok(mapped) => {
                let d = DTable::build(&mapped, &self.c, &self.o_rev);
                Ok(SearchIter::new(
                    &self.sa,
                    &self.c,
                    &self.o,
                    self.alphabet.sigma(),
                    mapped,
                    d,
                    k,
                ))
            }
            Err(SearchError::UnknownSymbol(_)) => Ok(SearchIter::empty(
                &self.sa,
                &self.c,
                &self.o,
                self.alphabet.sigma(),
            )),
            Err(other) => Err(other),
        }
    }

    #[cfg(feature = "std")]
    fn to_record(&self) -> IndexRecord {
        let sigma = self.alphabet.sigma() as usize;
        let n = self.sa.len();
        let o_cells: Vec<u32> = (0..sigma)
            .flat_map(|a| (0..=n).map(move |i| (a, i)))
            .map(|(a, i)| self.o.get(a as u32, i))
            .collect();
        let o_rev_cells: Vec<u32> = (0..sigma)
            .flat_map(|a| (0..=n).map(move |i| (a, i)))
            .map(|(a, i)| self.o_rev.get(a as u32, i))
            .collect();
        IndexRecord {
            alphabet_bytes: self.alphabet.sorted_bytes(),
            sa: self.sa.clone(),
            c: self.c.clone(),
            o_sigma: sigma,
            o_cells,
            o_rev_cells,
        }
    }

    #[cfg(feature = "std")]
    fn from_record(record: IndexRecord) -> Result<Self, SearchError> {
        let alphabet = Alphabet::from_sorted_bytes(&record.alphabet_bytes);
        let sigma = alphabet.sigma() as usize;
        let n = record.sa.len();

        if record.o_sigma != sigma {
            return Err(SearchError::CorruptIndex("O-table sigma does not match alphabet"));
        }
        if record.c.len() != sigma {
            return Err(SearchError::CorruptIndex("C-table length does not match alphabet"));
        }
        if record.o_cells.len() != sigma * (n + 1) || record.o_rev_cells.len() != sigma * (n + 1)
        {
            return Err(SearchError::CorruptIndex("O-table shape inconsistent with SA length"));
        }

        let o = OTable::from_raw_cells(record.o_cells, sigma, n)
            .ok_or(SearchError::CorruptIndex("O-table cell count mismatch"))?;
        let o_rev = OTable::from_raw_cells(record.o_rev_cells, sigma, n)
            .ok_or(SearchError::CorruptIndex("reverse O-table cell count mismatch"))?;

        Ok(Index {
            alphabet,
            sa: record.sa,
            c: record.c,
            o,
            o_rev,
        })
    }
}

/// Bundle `(Alphabet, SA, C, O, O')` for one reference text. Multiple references share no
/// state; each call produces an independent index.
pub fn preprocess(text: &[u8]) -> Index {
    let alphabet = Alphabet::build(text);
    let mapped = alphabet
        .map_with_sentinel(text)
        .expect("alphabet built from this text must map it");
    let forward = bwt::build(&mapped, alphabet.sigma());
    let c = bwt::build_c_table(&forward.bwt, alphabet.sigma() as usize);
    let o = OTable::build(&forward.bwt, alphabet.sigma() as usize);

    let mut reversed_text = text.to_vec();
    reversed_text.reverse();
    let rev_mapped = alphabet
        .map_with_sentinel(&reversed_text)
        .expect("alphabet built from this text must map its reverse too");
    let reverse = bwt::build(&rev_mapped, alphabet.sigma());
    let o_rev = OTable::build(&reverse.bwt, alphabet.sigma() as usize);

    Index {
        alphabet,
        sa: forward.sa,
        c,
        o,
        o_rev,
    }
}

/// An ordered `reference-name -> Index` mapping, preserving insertion order the way the
/// original sources keep a named reference set.
pub struct ReferenceSet {
    entries: Vec<(String, Index)>,
}

impl Default for ReferenceSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceSet {
    pub fn new() -> Self {
        ReferenceSet { entries: Vec::new() }
    }

    pub fn insert(&mut self, name: String, index: Index) {
        self.entries.push((name, index));
    }

    pub fn get(&self, name: &str) -> Option<&Index> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, i)| i)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, Index)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(feature = "std")]
    pub(crate) fn to_records(&self) -> Vec<(String, IndexRecord)> {
        self.entries
            .iter()
            .map(|(name, index)| (name.clone(), index.to_record()))
            .collect()
    }

    #[cfg(feature = "std")]
    pub(crate) fn from_records(records: Vec<(String, IndexRecord)>) -> Result<Self, SearchError> {
        let mut entries = Vec::with_capacity(records.len());
        for (name, record) in records {
            entries.push((name, Index::from_record(record)?));
        }
        Ok(ReferenceSet { entries })
    }
}

#[cfg(feature = "std")]
pub(crate) type PersistedRecord = IndexRecord;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preprocess_aabca_matches_spec_tables() {
        let index = preprocess(b"aabca");
        assert_eq!(index.sa(), &[5, 4, 0, 1, 2, 3]);
        assert_eq!(index.c().as_slice(), &[0, 1, 4, 5]);
    }

    #[test]
    fn search_rejects_empty_pattern() {
        let index = preprocess(b"aabca");
        let err = index.search(b"", 0).unwrap_err();
        assert_eq!(err, SearchError::EmptyPattern);
    }

    #[test]
    fn search_unknown_symbol_is_empty_not_error() {
        let index = preprocess(b"aabca");
        let hits: Vec<_> = index.search(b"z", 1).unwrap().collect();
        assert!(hits.is_empty());
    }

    #[test]
    fn reference_set_preserves_insertion_order() {
        let mut refs = ReferenceSet::new();
        refs.insert("chr2".into(), preprocess(b"acgt"));
        refs.insert("chr1".into(), preprocess(b"ggcc"));
        let names: Vec<&str> = refs.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["chr2", "chr1"]);
    }
}
