//! Training pipeline: counting, vocabulary rewriting, recounting.

use log::debug;

use crate::corpus::{TaggedSentence, TaggedWord};
use crate::counts::CountsTable;
use crate::errors::Result;
use crate::model::Model;
use crate::word_class::{self, SmoothingPolicy, RARE_THRESHOLD};

/// Trainer.
///
/// Produces a [`Model`] whose counts come from a class-substituted corpus:
/// the corpus is counted once to find low-frequency words, rewritten with
/// their class labels, and counted again so that each class's emission
/// distribution is the aggregate over its member words. A single counting
/// pass would under-count the classes.
///
/// # Examples
///
/// ```
/// use trigramma::{corpus, SmoothingPolicy, Tagger, Trainer};
///
/// let sentences = corpus::read_tagged("the D\ndog N\n\n".as_bytes()).unwrap();
/// let model = Trainer::new(SmoothingPolicy::WordShape)
///     .train(&sentences)
///     .unwrap();
/// let tagger = Tagger::new(model);
/// ```
pub struct Trainer {
    policy: SmoothingPolicy,
    threshold: u64,
}

impl Trainer {
    /// Creates a trainer for the given smoothing policy with the standard
    /// frequency threshold.
    pub fn new(policy: SmoothingPolicy) -> Self {
        Self {
            policy,
            threshold: RARE_THRESHOLD,
        }
    }

    /// Overrides the frequency threshold.
    pub fn threshold(mut self, threshold: u64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Rewrites a corpus, replacing each low-frequency word with its
    /// class label. Tokens whose word is not classified are left
    /// untouched, so an already-substituted corpus is a fixed point.
    pub fn rewrite(&self, sentences: &[TaggedSentence]) -> Vec<TaggedSentence> {
        let raw_counts = CountsTable::from_sentences(sentences);
        let classes = word_class::partition(&raw_counts, self.policy, self.threshold);
        debug!(
            "rewrite: {} words below threshold {}",
            classes.values().map(|members| members.len()).sum::<usize>(),
            self.threshold
        );
        sentences
            .iter()
            .map(|sentence| {
                sentence
                    .iter()
                    .map(|tw| {
                        // The class sets are disjoint; at most one matches.
                        for (label, members) in &classes {
                            if members.contains(&tw.word) {
                                return TaggedWord::new(*label, tw.tag.as_str());
                            }
                        }
                        tw.clone()
                    })
                    .collect()
            })
            .collect()
    }

    /// Trains a model: count, partition, rewrite, recount.
    ///
    /// # Errors
    ///
    /// If the corpus contains no annotated tokens, an error variant will
    /// be returned.
    pub fn train(&self, sentences: &[TaggedSentence]) -> Result<Model> {
        let rewritten = self.rewrite(sentences);
        let counts = CountsTable::from_sentences(&rewritten);
        Model::from_counts(counts, self.policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(sentences: &[&[(&str, &str)]]) -> Vec<TaggedSentence> {
        sentences
            .iter()
            .map(|s| s.iter().map(|(w, t)| TaggedWord::new(*w, *t)).collect())
            .collect()
    }

    #[test]
    fn test_rewrite_substitutes_low_frequency_words() {
        let sentences = corpus(&[
            &[("dog", "N")],
            &[("dog", "N")],
            &[("dog", "N")],
            &[("dog", "N")],
            &[("dog", "N"), ("zzz", "V")],
        ]);
        let rewritten = Trainer::new(SmoothingPolicy::WordShape).rewrite(&sentences);

        let expected_last = vec![TaggedWord::new("dog", "N"), TaggedWord::new("_RARE_", "V")];
        assert_eq!(expected_last, rewritten[4]);
        assert_eq!(sentences[0], rewritten[0]);
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let trainer = Trainer::new(SmoothingPolicy::WordShape);
        let sentences = corpus(&[&[("zzz", "N"), ("ABC123", "N"), ("NASA", "V")]]);
        let rewritten = trainer.rewrite(&sentences);

        assert_eq!(rewritten, trainer.rewrite(&rewritten));
    }

    #[test]
    fn test_train_aggregates_class_emissions() {
        let mut sentences = corpus(&[&[("aaa", "X")], &[("bbb", "X")]]);
        for _ in 0..5 {
            sentences.push(vec![TaggedWord::new("dog", "N")]);
        }
        let model = Trainer::new(SmoothingPolicy::WordShape)
            .train(&sentences)
            .unwrap();

        // Both rare words pooled their mass: 2 of the 2 X emissions.
        assert_eq!(1.0, model.emission("_RARE_", "X"));
        assert!(!model.contains_word("aaa"));
        assert!(model.contains_word("_RARE_"));
        assert!(model.contains_word("dog"));
    }

    #[test]
    fn test_train_policies_are_independent() {
        let mut sentences = corpus(&[&[("ABC123", "X")]]);
        for _ in 0..5 {
            sentences.push(vec![TaggedWord::new("dog", "N")]);
        }
        let shaped = Trainer::new(SmoothingPolicy::WordShape)
            .train(&sentences)
            .unwrap();
        let rare_only = Trainer::new(SmoothingPolicy::RareOnly)
            .train(&sentences)
            .unwrap();

        assert_eq!(1.0, shaped.emission("_NUMERIC_", "X"));
        assert_eq!(0.0, shaped.emission("_RARE_", "X"));
        assert_eq!(1.0, rare_only.emission("_RARE_", "X"));
        assert_eq!(SmoothingPolicy::WordShape, shaped.policy());
        assert_eq!(SmoothingPolicy::RareOnly, rare_only.policy());
    }

    #[test]
    fn test_threshold_override() {
        let sentences = corpus(&[&[("dog", "N")], &[("dog", "N")]]);
        let rewritten = Trainer::new(SmoothingPolicy::WordShape)
            .threshold(1)
            .rewrite(&sentences);

        // Every word count reaches a threshold of 1.
        assert_eq!(sentences, rewritten);
    }
}
