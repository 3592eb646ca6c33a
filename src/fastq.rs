//! FASTQ read parsing.
//!
//! Validates the 4-line record grammar (`@name`, sequence, `+`, quality) and the
//! sequence/quality length match; quality strings are kept but not otherwise used, since
//! alignment scoring is out of scope.

use std::io::BufRead;

use crate::error::ReadmapError;

/// One read as loaded from FASTQ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The header line, sans `@`, up to the first whitespace.
    pub name: String,
    pub seq: Vec<u8>,
    pub qual: Vec<u8>,
}

/// Parse a FASTQ stream into records, preserving their order.
pub fn parse(reader: impl BufRead) -> Result<Vec<Record>, ReadmapError> {
    let mut records = Vec::new();
    let mut lines = reader.lines();

    loop {
        let header = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let header = header.trim_end();
        if header.is_empty() {
            continue;
        }
        let name = header
            .strip_prefix('@')
            .ok_or_else(|| ReadmapError::MalformedFastq(format!("expected '@', got {:?}", header)))?
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_string();

        let seq_line = lines
            .next()
            .ok_or_else(|| ReadmapError::MalformedFastq("truncated record: missing sequence line".to_string()))??;
        let seq: Vec<u8> = seq_line.trim_end().bytes().collect();

        let plus_line = lines
            .next()
            .ok_or_else(|| ReadmapError::MalformedFastq("truncated record: missing '+' line".to_string()))??;
        if !plus_line.trim_end().starts_with('+') {
            return Err(ReadmapError::MalformedFastq(format!(
                "expected '+' separator, got {:?}",
                plus_line
            )));
        }

        let qual_line = lines
            .next()
            .ok_or_else(|| ReadmapError::MalformedFastq("truncated record: missing quality line".to_string()))??;
        let qual: Vec<u8> = qual_line.trim_end().bytes().collect();

        if qual.len() != seq.len() {
            return Err(ReadmapError::MalformedFastq(format!(
                "quality length {} does not match sequence length {} for read {:?}",
                qual.len(),
                seq.len(),
                name
            )));
        }

        records.push(Record { name, seq, qual });
    }

    Ok(records)
}

/// Read and parse a FASTQ file from disk.
pub fn read(path: impl AsRef<std::path::Path>) -> Result<Vec<Record>, ReadmapError> {
    let file = std::fs::File::open(path)?;
    parse(std::io::BufReader::new(file))
}
