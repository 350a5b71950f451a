//! Maximum-likelihood tagging parameters.

use std::io::{BufRead, Read, Write};

use bincode::{Decode, Encode};
use hashbrown::HashSet;
use log::debug;

use crate::counts::CountsTable;
use crate::errors::{Result, TrigrammaError};
use crate::utils::{SerializableHashMap, SerializableHashSet};
use crate::word_class::SmoothingPolicy;

/// Model data.
///
/// Wraps the counts of one trained corpus and answers maximum-likelihood
/// probability queries. A model is immutable once constructed; decoding
/// only reads it, so it can be shared freely across sentences.
#[derive(Debug, Decode, Encode)]
pub struct Model {
    pub(crate) tags: Vec<String>,
    pub(crate) unigrams: SerializableHashMap<String, u64>,
    pub(crate) bigrams: SerializableHashMap<(String, String), u64>,
    pub(crate) trigrams: SerializableHashMap<(String, String, String), u64>,
    pub(crate) emissions: SerializableHashMap<(String, String), u64>,
    pub(crate) vocabulary: SerializableHashSet<String>,
    pub(crate) policy: SmoothingPolicy,
}

impl Model {
    /// Builds a model from a counts table.
    ///
    /// `policy` must be the smoothing policy whose rewrite produced
    /// `counts`; it is recorded so that decoding classifies unseen words
    /// the same way the training rewrite did.
    ///
    /// # Errors
    ///
    /// If `counts` contains no tag unigrams, an error variant will be
    /// returned.
    pub fn from_counts(counts: CountsTable, policy: SmoothingPolicy) -> Result<Self> {
        if counts.unigrams.is_empty() {
            return Err(TrigrammaError::invalid_argument(
                "counts",
                "contains no 1-GRAM entries",
            ));
        }
        let mut tags: Vec<String> = counts.unigrams.keys().cloned().collect();
        tags.sort();
        let vocabulary: HashSet<String> = counts
            .emissions
            .keys()
            .map(|(word, _)| word.clone())
            .collect();
        debug!(
            "model: {} tags, {} vocabulary entries",
            tags.len(),
            vocabulary.len()
        );
        Ok(Self {
            tags,
            unigrams: SerializableHashMap(counts.unigrams),
            bigrams: SerializableHashMap(counts.bigrams),
            trigrams: SerializableHashMap(counts.trigrams),
            emissions: SerializableHashMap(counts.emissions),
            vocabulary: SerializableHashSet(vocabulary),
            policy,
        })
    }

    /// Parses a counts file and builds a model from it.
    pub fn from_counts_reader<R>(rdr: R, policy: SmoothingPolicy) -> Result<Self>
    where
        R: BufRead,
    {
        Self::from_counts(CountsTable::from_reader(rdr)?, policy)
    }

    /// Maximum-likelihood emission probability of `word` given `tag`.
    ///
    /// A tag with zero total count yields 0.0, as does a pair never seen
    /// in training.
    pub fn emission(&self, word: &str, tag: &str) -> f64 {
        let denom = self.unigrams.get(tag).copied().unwrap_or(0);
        if denom == 0 {
            return 0.0;
        }
        let num = self
            .emissions
            .get(&(word.to_string(), tag.to_string()))
            .copied()
            .unwrap_or(0);
        num as f64 / denom as f64
    }

    /// Maximum-likelihood probability of `t3` following the tag bigram
    /// `(t1, t2)`.
    ///
    /// A bigram with zero count yields 0.0, as does a trigram never seen
    /// in training.
    pub fn trigram(&self, t1: &str, t2: &str, t3: &str) -> f64 {
        let denom = self
            .bigrams
            .get(&(t1.to_string(), t2.to_string()))
            .copied()
            .unwrap_or(0);
        if denom == 0 {
            return 0.0;
        }
        let num = self
            .trigrams
            .get(&(t1.to_string(), t2.to_string(), t3.to_string()))
            .copied()
            .unwrap_or(0);
        num as f64 / denom as f64
    }

    /// The assignable tag alphabet in sorted order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// The smoothing policy that produced the training counts.
    pub fn policy(&self) -> SmoothingPolicy {
        self.policy
    }

    /// Returns whether `word` occurred in the corpus the model was
    /// counted over.
    pub fn contains_word(&self, word: &str) -> bool {
        self.vocabulary.contains(word)
    }

    /// Exports the model data.
    ///
    /// # Arguments
    ///
    /// * `wtr` - Byte-oriented sink object.
    ///
    /// # Errors
    ///
    /// When `wtr` generates an error, it will be returned as is.
    pub fn write<W>(&self, wtr: &mut W) -> Result<()>
    where
        W: Write,
    {
        bincode::encode_into_std_write(self, wtr, bincode::config::standard())?;
        Ok(())
    }

    /// Creates a model from a reader.
    ///
    /// # Arguments
    ///
    /// * `rdr` - A data source.
    ///
    /// # Errors
    ///
    /// When `rdr` generates an error, it will be returned as is.
    pub fn read<R>(rdr: &mut R) -> Result<Self>
    where
        R: Read,
    {
        Ok(bincode::decode_from_std_read(
            rdr,
            bincode::config::standard(),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::TaggedWord;

    fn corpus(sentences: &[&[(&str, &str)]]) -> Vec<Vec<TaggedWord>> {
        sentences
            .iter()
            .map(|s| s.iter().map(|(w, t)| TaggedWord::new(*w, *t)).collect())
            .collect()
    }

    fn model() -> Model {
        let counts = CountsTable::from_sentences(&corpus(&[
            &[("the", "D"), ("dog", "N")],
            &[("dog", "N")],
        ]));
        Model::from_counts(counts, SmoothingPolicy::WordShape).unwrap()
    }

    #[test]
    fn test_from_counts_empty() {
        let e = Model::from_counts(CountsTable::default(), SmoothingPolicy::WordShape);

        assert!(e.is_err());
        assert_eq!(
            "InvalidArgumentError: counts: contains no 1-GRAM entries",
            &e.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_tags_sorted() {
        assert_eq!(&["D".to_string(), "N".to_string()], model().tags());
    }

    #[test]
    fn test_emission() {
        let model = model();

        assert_eq!(1.0, model.emission("the", "D"));
        assert_eq!(1.0, model.emission("dog", "N"));
        assert_eq!(0.0, model.emission("cat", "N"));
        // Unknown tag: zero denominator, not a fault.
        assert_eq!(0.0, model.emission("dog", "X"));
    }

    #[test]
    fn test_trigram() {
        let model = model();

        assert_eq!(0.5, model.trigram("*", "*", "D"));
        assert_eq!(0.5, model.trigram("*", "*", "N"));
        assert_eq!(1.0, model.trigram("D", "N", "STOP"));
        // Unseen bigram: zero denominator, not a fault.
        assert_eq!(0.0, model.trigram("N", "N", "N"));
    }

    #[test]
    fn test_trigram_probability_mass() {
        let model = model();
        let mut mass = 0.0;
        for t3 in ["D", "N", "STOP"] {
            mass += model.trigram("*", "*", t3);
        }

        assert_eq!(1.0, mass);
    }

    #[test]
    fn test_probabilities_in_unit_interval() {
        let model = model();
        for t1 in ["*", "D", "N"] {
            for t2 in ["*", "D", "N"] {
                for t3 in ["D", "N", "STOP"] {
                    let p = model.trigram(t1, t2, t3);
                    assert!((0.0..=1.0).contains(&p));
                }
            }
        }
        for word in ["the", "dog", "cat"] {
            for tag in ["D", "N"] {
                let p = model.emission(word, tag);
                assert!((0.0..=1.0).contains(&p));
            }
        }
    }

    #[test]
    fn test_contains_word() {
        let model = model();

        assert!(model.contains_word("dog"));
        assert!(!model.contains_word("cat"));
    }

    #[test]
    fn test_write_read_round_trip() {
        let model = model();
        let mut buf = vec![];
        model.write(&mut buf).unwrap();
        let restored = Model::read(&mut buf.as_slice()).unwrap();

        assert_eq!(model.tags(), restored.tags());
        assert_eq!(model.policy(), restored.policy());
        assert_eq!(model.emission("dog", "N"), restored.emission("dog", "N"));
        assert_eq!(
            model.trigram("*", "*", "D"),
            restored.trigram("*", "*", "D")
        );
    }
}
