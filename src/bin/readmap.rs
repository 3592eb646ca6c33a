//! CLI binary: `readmap [-p] [-d EDITS] <genome> [reads]`.
//!
//! Reproduces the original `readmap.py`'s contract: preprocess a FASTA into a persisted index
//! file, or load/build an index and map a FASTQ read set against it, writing SAM records to
//! stdout. Logs one `info!` per reference loaded or preprocessed and one `trace!` per read
//! searched.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{info, trace};

use alice_readmap::error::ReadmapError;
use alice_readmap::index::{preprocess, ReferenceSet};
use alice_readmap::{fasta, fastq, persist, sam};

#[derive(Parser)]
#[command(name = "readmap", about = "FM-index approximate read mapper")]
struct Cli {
    /// Treat `genome` as a FASTA to preprocess; write `<genome>.idx` and exit.
    #[arg(short = 'p', long = "preprocess")]
    preprocess: bool,

    /// Maximum edit distance passed to `search`.
    #[arg(short = 'd', long = "edits", default_value_t = 1)]
    edits: u32,

    /// FASTA reference, or a previously-persisted index file.
    genome: PathBuf,

    /// FASTQ read file. Required unless `-p` is given.
    reads: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("readmap: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ReadmapError> {
    if cli.preprocess {
        return preprocess_genome(&cli.genome);
    }

    let reads_path = cli
        .reads
        .ok_or_else(|| ReadmapError::Usage("reads file required unless -p is given".into()))?;

    let refs = load_or_build(&cli.genome)?;
    info!("loaded {} reference(s) from {:?}", refs.len(), cli.genome);

    let reads = fastq::read(&reads_path)?;
    info!("read {} record(s) from {:?}", reads.len(), reads_path);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for read in &reads {
        trace!("searching read {:?} ({} bp)", read.name, read.seq.len());
        for (reference_name, index) in refs.iter() {
            let hits = match index.search(&read.seq, cli.edits) {
                Ok(iter) => iter,
                Err(_) => continue,
            };
            for (pos, cigar) in hits {
                sam::write_record(&mut out, &read.name, reference_name, pos, &cigar, &read.seq)?;
            }
        }
    }

    Ok(())
}

fn preprocess_genome(genome: &PathBuf) -> Result<(), ReadmapError> {
    let records = fasta::read(genome)?;
    let mut refs = ReferenceSet::new();
    for record in records {
        info!("preprocessing {:?} ({} bp)", record.name, record.seq.len());
        refs.insert(record.name, preprocess(&record.seq));
    }

    let out_path = index_path_for(genome);
    persist::save(&out_path, &refs)?;
    println!("wrote {} reference(s) to {:?}", refs.len(), out_path);
    Ok(())
}

/// Try `persist::load` first (genome is an index file already); fall back to FASTA + preprocess,
/// matching the original's "preprocess once, query many times" split.
fn load_or_build(genome: &PathBuf) -> Result<ReferenceSet, ReadmapError> {
    match persist::load(genome) {
        Ok(refs) => Ok(refs),
        Err(_) => {
            let records = fasta::read(genome)?;
            let mut refs = ReferenceSet::new();
            for record in records {
                info!("preprocessing {:?} ({} bp)", record.name, record.seq.len());
                refs.insert(record.name, preprocess(&record.seq));
            }
            Ok(refs)
        }
    }
}

fn index_path_for(genome: &PathBuf) -> PathBuf {
    let mut name = genome.as_os_str().to_os_string();
    name.push(".idx");
    PathBuf::from(name)
}
