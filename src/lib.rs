//! # alice-readmap
//!
//! **Approximate string-matching read mapper built on an FM-index.**
//!
//! Given a reference text and a collection of short query patterns, reports every occurrence
//! of each pattern within a caller-supplied edit-distance bound `k`, together with a CIGAR
//! string describing the alignment.
//!
//! ## Architecture
//!
//! - [`alphabet`]: source symbols <-> dense small integers, sentinel `0`.
//! - [`sais`]: induced-sorting suffix-array construction.
//! - [`bwt`]: Burrows-Wheeler Transform plus the C/O/O' rank tables.
//! - [`cigar`]: edit-sequence <-> CIGAR run-length codec and alignment extraction.
//! - [`dtable`]: per-pattern lower-bound table pruning the search.
//! - [`search`]: bounded-edit backwards traversal of the FM-index.
//! - [`index`]: bundles the above per reference sequence into a callable matcher.
//!
//! Everything above is `no_std` + `alloc`. The ambient layer, [`fasta`], [`fastq`], [`sam`], and
//! [`persist`], is `std`-only and sits outside the core data flow; it exists so the crate can
//! preprocess a FASTA and emit SAM records end to end, not just serve in-process queries.
//!
//! ## Example
//!
//! ```
//! use alice_readmap::index::preprocess;
//!
//! let index = preprocess(b"mississippi");
//! let hits: Vec<_> = index.search(b"ssi", 0).unwrap().collect();
//! assert_eq!(hits.len(), 2);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod alphabet;
pub mod bwt;
pub mod cigar;
pub mod dtable;
pub mod error;
pub mod index;
pub mod sais;
pub mod search;

#[cfg(feature = "std")]
pub mod fasta;
#[cfg(feature = "std")]
pub mod fastq;
#[cfg(feature = "std")]
pub mod persist;
#[cfg(feature = "std")]
pub mod sam;

pub use error::SearchError;
pub use index::{preprocess, Index, ReferenceSet};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_count() {
        let index = preprocess(b"abracadabra");
        let hits: Vec<_> = index.search(b"abra", 0).unwrap().collect();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn approximate_match_within_budget() {
        let index = preprocess(b"abracadabra");
        let hits: Vec<_> = index.search(b"abrx", 1).unwrap().collect();
        assert!(hits.iter().any(|(pos, _)| *pos == 0 || *pos == 7));
    }

    #[test]
    fn empty_pattern_is_rejected() {
        let index = preprocess(b"hello");
        assert_eq!(index.search(b"", 0).unwrap_err(), SearchError::EmptyPattern);
    }

    #[test]
    fn unknown_symbol_yields_no_hits() {
        let index = preprocess(b"hello");
        let hits: Vec<_> = index.search(b"z", 2).unwrap().collect();
        assert!(hits.is_empty());
    }
}
