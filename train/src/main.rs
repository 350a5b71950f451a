use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use trigramma::{corpus, CountsTable, Model, SmoothingPolicy, Trainer};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    /// Replace every low-frequency word with _RARE_
    Rare,
    /// Classify low-frequency words by surface shape
    Class,
}

impl From<Policy> for SmoothingPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Rare => Self::RareOnly,
            Policy::Class => Self::WordShape,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "A program to train tagging models of Trigramma.")]
struct Args {
    /// A tagged training corpus ("word tag" lines, blank line between sentences)
    #[arg(long)]
    corpus: PathBuf,

    /// The file to write the trained model to
    #[arg(long)]
    model: PathBuf,

    /// The smoothing policy applied to low-frequency words
    #[arg(long, value_enum, default_value_t = Policy::Class)]
    policy: Policy,

    /// Words occurring fewer times than this are replaced with a class
    #[arg(long, default_value = "5")]
    threshold: u64,

    /// Write the class-substituted corpus to this file
    #[arg(long)]
    rewritten: Option<PathBuf>,

    /// Write the regenerated counts file to this file
    #[arg(long)]
    counts: Option<PathBuf>,

    /// The number of workers for zstd (0 means multithreaded will be disabled)
    #[arg(long, default_value = "0")]
    zstd_workers: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let policy = SmoothingPolicy::from(args.policy);

    eprintln!("Loading {:?} ...", args.corpus);
    let f = BufReader::new(File::open(&args.corpus)?);
    let sentences = corpus::read_tagged(f)?;
    eprintln!("# of sentences: {}", sentences.len());

    eprintln!("Rewriting low-frequency words...");
    let trainer = Trainer::new(policy).threshold(args.threshold);
    let rewritten = trainer.rewrite(&sentences);
    if let Some(path) = &args.rewritten {
        let mut f = BufWriter::new(File::create(path)?);
        corpus::write_tagged(&mut f, &rewritten)?;
    }

    eprintln!("Counting...");
    let counts = CountsTable::from_sentences(&rewritten);
    if let Some(path) = &args.counts {
        let mut f = BufWriter::new(File::create(path)?);
        counts.write(&mut f)?;
    }

    let model = Model::from_counts(counts, policy)?;
    eprintln!("Finish training.");

    let mut f = zstd::Encoder::new(File::create(&args.model)?, 19)?;
    f.multithread(args.zstd_workers)?;
    model.write(&mut f)?;
    f.finish()?;

    Ok(())
}
