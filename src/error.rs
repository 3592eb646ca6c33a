//! Error taxonomy.
//!
//! The core engine (`SearchError`) is `no_std` + `alloc` safe and carries no external
//! dependency: no example repo in this corpus reaches for `thiserror`/`anyhow` at its
//! algorithmic core, so neither do we. The ambient collaborators (FASTA/FASTQ/SAM/persistence/
//! CLI) are `std`-only and use `thiserror`, matching the seam where the corpus does use it.

use core::fmt;

/// Errors produced by the core search engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// `search` was invoked on an empty pattern. A contract violation, not "no hits".
    EmptyPattern,
    /// A query character is absent from the reference's alphabet.
    UnknownSymbol(char),
    /// Table shapes or C/O invariants are inconsistent on load.
    CorruptIndex(&'static str),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::EmptyPattern => write!(f, "search pattern must not be empty"),
            SearchError::UnknownSymbol(c) => write!(f, "unknown symbol in pattern: {:?}", c),
            SearchError::CorruptIndex(reason) => write!(f, "corrupt index: {}", reason),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SearchError {}

/// Errors produced by the ambient layer (sequence I/O, SAM emission, persistence, CLI).
#[cfg(feature = "std")]
#[derive(Debug, thiserror::Error)]
pub enum ReadmapError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed FASTA record: {0}")]
    MalformedFasta(String),

    #[error("malformed FASTQ record: {0}")]
    MalformedFastq(String),

    #[error("usage error: {0}")]
    Usage(String),

    #[error("failed to (de)serialize index: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("unknown reference: {0}")]
    UnknownReference(String),

    #[error(transparent)]
    Search(#[from] SearchError),
}
