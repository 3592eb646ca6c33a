//! FASTA reference parsing.
//!
//! Hand-rolled line-oriented parser over `BufRead`, in the spirit of the corpus's own
//! lightweight SAM/FASTA handling rather than a heavyweight bio-parsing crate.

use std::io::BufRead;

use crate::error::ReadmapError;

/// One named reference sequence as loaded from FASTA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The header line, sans `>`, up to the first whitespace.
    pub name: String,
    pub seq: Vec<u8>,
}

/// Parse a FASTA stream into records, preserving their order.
pub fn parse(reader: impl BufRead) -> Result<Vec<Record>, ReadmapError> {
    let mut records = Vec::new();
    let mut current_name: Option<String> = None;
    let mut current_seq = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        if let Some(header) = line.strip_prefix('>') {
            if let Some(name) = current_name.take() {
                records.push(Record {
                    name,
                    seq: core::mem::take(&mut current_seq),
                });
            }
            let name = header.split_whitespace().next().unwrap_or("").to_string();
            current_name = Some(name);
        } else {
            if current_name.is_none() {
                return Err(ReadmapError::MalformedFasta(
                    "sequence data before first header".to_string(),
                ));
            }
            current_seq.extend(line.bytes().filter(|b| !b.is_ascii_whitespace()));
        }
    }

    if let Some(name) = current_name {
        records.push(Record {
            name,
            seq: current_seq,
        });
    }

    Ok(records)
}

/// Read and parse a FASTA file from disk.
pub fn read(path: impl AsRef<std::path::Path>) -> Result<Vec<Record>, ReadmapError> {
    let file = std::fs::File::open(path)?;
    parse(std::io::BufReader::new(file))
}
