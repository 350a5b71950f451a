//! # Trigramma
//!
//! Trigramma is a trigram hidden Markov model tagger. It learns
//! maximum-likelihood transition and emission parameters from a tagged
//! corpus, smooths the vocabulary by substituting word classes for
//! low-frequency words, and decodes test sentences with an exact Viterbi
//! search over tag trigrams.
//!
//! ## Examples
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::{stdin, BufReader};
//!
//! use trigramma::{corpus, Model, Tagger};
//!
//! let mut f = BufReader::new(File::open("model.bin").unwrap());
//! let model = Model::read(&mut f).unwrap();
//! let tagger = Tagger::new(model);
//!
//! for sentence in corpus::read_raw(stdin().lock()).unwrap() {
//!     let tags = tagger.tag_viterbi(&sentence);
//!     for (word, tag) in sentence.iter().zip(&tags) {
//!         println!("{} {}", word, tag);
//!     }
//!     println!();
//! }
//! ```

mod utils;

pub mod corpus;
mod counts;
mod errors;
mod model;
mod tagger;
mod trainer;
pub mod word_class;

pub use corpus::{TaggedSentence, TaggedWord};
pub use counts::{CountsTable, START_SYMBOL, STOP_SYMBOL};
pub use errors::{Result, TrigrammaError};
pub use model::Model;
pub use tagger::Tagger;
pub use trainer::Trainer;
pub use word_class::SmoothingPolicy;
