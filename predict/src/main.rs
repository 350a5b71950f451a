use std::fs::File;
use std::io::{stdin, stdout, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::{ArgGroup, Parser, ValueEnum};
use trigramma::{corpus, Model, SmoothingPolicy, Tagger};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    /// The counts were produced with every low-frequency word as _RARE_
    Rare,
    /// The counts were produced with shape-classified low-frequency words
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

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Tag each token independently by emission probability
    Greedy,
    /// Trigram Viterbi decoding
    Viterbi,
}

impl Mode {
    fn suffix(self) -> &'static str {
        match self {
            Self::Greedy => "greedy",
            Self::Viterbi => "viterbi",
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    about = "A program to tag token sequences.",
    group = ArgGroup::new("params").required(true),
)]
struct Args {
    /// The model file to use when tagging text
    #[arg(long, group = "params")]
    model: Option<PathBuf>,

    /// A counts file to build the parameters from instead of a model file
    #[arg(long, group = "params", requires = "policy")]
    counts: Option<PathBuf>,

    /// The smoothing policy that produced the counts file
    #[arg(long, value_enum, requires = "counts")]
    policy: Option<Policy>,

    /// The test input (one token per line); reads standard input when omitted
    #[arg(long)]
    input: Option<PathBuf>,

    /// The output file; defaults to "<input>.<policy>.<mode>" when --input
    /// is given, standard output otherwise
    #[arg(long)]
    output: Option<PathBuf>,

    /// Decoding mode
    #[arg(long, value_enum, default_value_t = Mode::Viterbi)]
    mode: Mode,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let model = if let Some(path) = &args.model {
        eprintln!("Loading model file...");
        let mut f = zstd::Decoder::new(File::open(path)?)?;
        Model::read(&mut f)?
    } else {
        // The "params" group guarantees --counts (and with it --policy).
        eprintln!("Loading counts file...");
        let f = BufReader::new(File::open(args.counts.as_ref().unwrap())?);
        Model::from_counts_reader(f, args.policy.unwrap().into())?
    };
    let policy = model.policy();
    let tagger = Tagger::new(model);

    let sentences = match &args.input {
        Some(path) => corpus::read_raw(BufReader::new(File::open(path)?))?,
        None => corpus::read_raw(stdin().lock())?,
    };

    let output = args.output.clone().or_else(|| {
        args.input.as_ref().map(|input| {
            let mut name = input.as_os_str().to_owned();
            name.push(format!(".{}.{}", policy.suffix(), args.mode.suffix()));
            PathBuf::from(name)
        })
    });
    let mut wtr: Box<dyn Write> = match &output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(stdout().lock())),
    };

    eprintln!("Start tagging");
    let mut n_tokens = 0;
    let start = Instant::now();
    for words in &sentences {
        let tags = match args.mode {
            Mode::Greedy => tagger.tag_greedy(words),
            Mode::Viterbi => tagger.tag_viterbi(words),
        };
        n_tokens += words.len();
        corpus::write_sentence(&mut wtr, words, &tags)?;
    }
    wtr.flush()?;
    let duration = start.elapsed();
    eprintln!("Elapsed: {} [sec]", duration.as_secs_f64());
    eprintln!(
        "Speed: {} [tokens/sec]",
        n_tokens as f64 / duration.as_secs_f64()
    );

    Ok(())
}
