use std::collections::BTreeMap;
use std::fs::File;
use std::io::stdin;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use trigramma::{corpus, Model, Tagger};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Tag each token independently by emission probability
    Greedy,
    /// Trigram Viterbi decoding
    Viterbi,
}

/// Per-tag tallies for precision and recall.
#[derive(Default)]
struct TagMeasure {
    n_correct: usize,
    n_reference: usize,
    n_predicted: usize,
}

#[derive(Parser, Debug)]
#[command(about = "A program to evaluate the tagging accuracy of Trigramma.")]
struct Args {
    /// The model file to use when tagging text
    #[arg(long)]
    model: PathBuf,

    /// Decoding mode
    #[arg(long, value_enum, default_value_t = Mode::Viterbi)]
    mode: Mode,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    eprintln!("Loading model file...");
    let mut f = zstd::Decoder::new(File::open(&args.model)?)?;
    let model = Model::read(&mut f)?;
    let tagger = Tagger::new(model);

    eprintln!("Start tagging");
    let gold = corpus::read_tagged(stdin().lock())?;

    let mut n_correct = 0;
    let mut n_total = 0;
    let mut table: BTreeMap<String, TagMeasure> = BTreeMap::new();
    for sentence in &gold {
        let words: Vec<String> = sentence.iter().map(|tw| tw.word.clone()).collect();
        let tags = match args.mode {
            Mode::Greedy => tagger.tag_greedy(&words),
            Mode::Viterbi => tagger.tag_viterbi(&words),
        };
        for (tw, predicted) in sentence.iter().zip(&tags) {
            n_total += 1;
            table.entry(tw.tag.clone()).or_default().n_reference += 1;
            table.entry(predicted.clone()).or_default().n_predicted += 1;
            if &tw.tag == predicted {
                n_correct += 1;
                table.entry(tw.tag.clone()).or_default().n_correct += 1;
            }
        }
    }

    println!(
        "Accuracy: {} ({}/{})",
        n_correct as f64 / n_total as f64,
        n_correct,
        n_total
    );
    for (tag, m) in &table {
        let precision = m.n_correct as f64 / m.n_predicted as f64;
        let recall = m.n_correct as f64 / m.n_reference as f64;
        let f1 = 2. * precision * recall / (precision + recall);
        println!(
            "{}: Precision: {}, Recall: {}, F1: {}",
            tag, precision, recall, f1
        );
    }

    Ok(())
}
