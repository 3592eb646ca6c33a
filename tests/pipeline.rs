//! End-to-end FASTA -> index -> FASTQ -> SAM pipeline, spanning `fasta`, `index`, `fastq`,
//! `sam`, and `persist`: a scenario that belongs to none of those modules individually.

use std::io::Cursor;

use alice_readmap::index::{preprocess, ReferenceSet};
use alice_readmap::{fasta, fastq, persist, sam};

#[test]
fn fasta_to_sam_end_to_end() {
    let fasta_input = b">chr1\nACGTACGTACGTACGT\n>chr2\nTTTTGGGGCCCCAAAA\n";
    let records = fasta::parse(Cursor::new(&fasta_input[..])).unwrap();
    assert_eq!(records.len(), 2);

    let mut refs = ReferenceSet::new();
    for record in &records {
        refs.insert(record.name.clone(), preprocess(&record.seq));
    }

    let fastq_input = b"@read1\nACGT\n+\nIIII\n@read2\nGGGG\n+\nIIII\n@read3\nZZZZ\n+\nIIII\n";
    let reads = fastq::parse(Cursor::new(&fastq_input[..])).unwrap();
    assert_eq!(reads.len(), 3);

    let mut sam_lines = Vec::new();
    for read in &reads {
        for (reference_name, index) in refs.iter() {
            if let Ok(hits) = index.search(&read.seq, 0) {
                for (pos, cigar) in hits {
                    let mut buf = Vec::new();
                    sam::write_record(&mut buf, &read.name, reference_name, pos, &cigar, &read.seq)
                        .unwrap();
                    sam_lines.push(String::from_utf8(buf).unwrap());
                }
            }
        }
    }

    // read1 ("ACGT") hits chr1 repeatedly; read2 ("GGGG") hits chr2; read3 has an unknown
    // symbol under this reference's alphabet and produces no SAM lines at all.
    assert!(sam_lines.iter().any(|l| l.starts_with("read1\t0\tchr1\t")));
    assert!(sam_lines.iter().any(|l| l.starts_with("read2\t0\tchr2\t")));
    assert!(sam_lines.iter().all(|l| !l.starts_with("read3\t")));

    for line in &sam_lines {
        let fields: Vec<&str> = line.trim_end().split('\t').collect();
        assert_eq!(fields.len(), 11, "line {line:?} did not have 11 SAM columns");
    }
}

#[test]
fn preprocess_then_persist_then_load_reproduces_search_results() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chr1.idx");

    let mut refs = ReferenceSet::new();
    refs.insert("chr1".to_string(), preprocess(b"mississippi"));
    persist::save(&path, &refs).unwrap();

    let loaded = persist::load(&path).unwrap();
    let index = loaded.get("chr1").unwrap();

    let mut hits: Vec<u32> = index.search(b"ssi", 0).unwrap().map(|(pos, _)| pos).collect();
    hits.sort_unstable();
    assert_eq!(hits, vec![2, 5]);
}
