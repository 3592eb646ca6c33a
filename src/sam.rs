//! SAM record emission.
//!
//! Manual `write!`-based record emission rather than a SAM-writing crate, matching the
//! lightweight hand-rolled style this corpus uses at I/O boundaries.

use std::io::{self, Write};

use crate::cigar::Cigar;

/// Write one SAM line with the five contract fields (`read_name`, `reference_name`, `pos`,
/// `cigar`, `read_seq`), converting `pos_0based` to SAM's 1-based convention, plus the
/// placeholder columns (`flag`, `mapq`, `rnext`, `pnext`, `tlen`, `qual`) required for the line
/// to be syntactically a complete SAM record. The CLI never populates those beyond the
/// placeholders; scoring and mapping quality are out of scope.
pub fn write_record(
    out: &mut impl Write,
    read_name: &str,
    reference_name: &str,
    pos_0based: u32,
    cigar: &Cigar,
    read_seq: &[u8],
) -> io::Result<()> {
    writeln!(
        out,
        "{}\t0\t{}\t{}\t255\t{}\t*\t0\t0\t{}\t*",
        read_name,
        reference_name,
        pos_0based + 1,
        cigar,
        String::from_utf8_lossy(read_seq),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cigar::{edits_to_cigar, Edit};

    #[test]
    fn emits_five_contract_fields_tab_separated() {
        let mut buf = Vec::new();
        let cigar = edits_to_cigar(&[Edit::Match, Edit::Match, Edit::Insert]);
        write_record(&mut buf, "read1", "chr1", 41, &cigar, b"ACG").unwrap();
        let line = String::from_utf8(buf).unwrap();
        let fields: Vec<&str> = line.trim_end().split('\t').collect();
        assert_eq!(fields[0], "read1");
        assert_eq!(fields[2], "chr1");
        assert_eq!(fields[3], "42"); // 1-based
        assert_eq!(fields[5], "2M1I");
        assert_eq!(fields[9], "ACG");
    }
}
