//! Tag sequence decoding.

use hashbrown::HashMap;

use crate::counts::{START_SYMBOL, STOP_SYMBOL};
use crate::model::Model;
use crate::word_class::SmoothingPolicy;

/// Decoder over a trained [`Model`].
///
/// Construction folds the model's counts into log-domain score tables
/// keyed by dense tag ids, so decoding never touches string keys. Scores
/// are sums of log-probabilities; a probability of exactly zero becomes
/// negative infinity and simply never wins the arg-max, which keeps
/// unseen transitions and emissions out of the result without any special
/// cases.
///
/// All per-sentence state is local to a single call, so one tagger can
/// decode any number of sentences, in any order.
pub struct Tagger {
    tags: Vec<String>,
    // log q(t3 | t1, t2) for observed trigrams; absent keys score -inf.
    log_trigrams: HashMap<(usize, usize, usize), f64>,
    // Per word, log e(word | tag) over assignable tag ids.
    log_emissions: HashMap<String, Vec<f64>>,
    policy: SmoothingPolicy,
    start: usize,
    stop: usize,
}

impl Tagger {
    /// Creates a new tagger.
    ///
    /// # Arguments
    ///
    /// * `model` - A model data.
    ///
    /// # Returns
    ///
    /// A new tagger.
    pub fn new(model: Model) -> Self {
        let Model {
            tags,
            unigrams,
            bigrams,
            trigrams,
            emissions,
            vocabulary: _,
            policy,
        } = model;

        let n_tags = tags.len();
        let start = n_tags;
        let stop = n_tags + 1;

        let (log_trigrams, log_emissions) = {
            let ids: HashMap<&str, usize> = tags
                .iter()
                .enumerate()
                .map(|(id, tag)| (tag.as_str(), id))
                .collect();
            let symbol = |tag: &str| match tag {
                START_SYMBOL => Some(start),
                STOP_SYMBOL => Some(stop),
                _ => ids.get(tag).copied(),
            };

            let mut log_trigrams = HashMap::with_capacity(trigrams.len());
            for ((t1, t2, t3), &count) in trigrams.iter() {
                let denom = bigrams
                    .get(&(t1.clone(), t2.clone()))
                    .copied()
                    .unwrap_or(0);
                if denom == 0 {
                    continue;
                }
                // A symbol missing from the alphabet cannot lie on any
                // candidate path.
                if let (Some(a), Some(b), Some(c)) = (symbol(t1), symbol(t2), symbol(t3)) {
                    log_trigrams.insert((a, b, c), (count as f64 / denom as f64).ln());
                }
            }

            let mut log_emissions: HashMap<String, Vec<f64>> = HashMap::new();
            for ((word, tag), &count) in emissions.iter() {
                if let (Some(&tag_id), Some(&denom)) = (ids.get(tag.as_str()), unigrams.get(tag))
                {
                    if denom > 0 {
                        let row = log_emissions
                            .entry(word.clone())
                            .or_insert_with(|| vec![f64::NEG_INFINITY; n_tags]);
                        row[tag_id] = (count as f64 / denom as f64).ln();
                    }
                }
            }
            (log_trigrams, log_emissions)
        };

        Self {
            tags,
            log_trigrams,
            log_emissions,
            policy,
            start,
            stop,
        }
    }

    /// The assignable tag alphabet in sorted order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    // Emission scores for a word: its own row when it was seen in
    // training, otherwise the row of the class its shape maps to.
    fn emission_row(&self, word: &str) -> Option<&Vec<f64>> {
        self.log_emissions
            .get(word)
            .or_else(|| self.log_emissions.get(self.policy.classify(word)))
    }

    /// Finds the single most probable tag sequence for `words`.
    ///
    /// Runs the trigram dynamic program over states `(position, t1, t2)`,
    /// with `*`-padded start context and a final virtual step to `STOP`,
    /// then walks the backpointers. Maximization is strict, seeded by the
    /// first candidate, so equal scores keep the first-seen tag and the
    /// output is deterministic; even a sentence whose every tag sequence
    /// has probability zero still decodes to a full sequence.
    ///
    /// An empty sentence yields an empty result.
    pub fn tag_viterbi(&self, words: &[String]) -> Vec<String> {
        let n = words.len();
        if n == 0 {
            return vec![];
        }
        let n_tags = self.tags.len();
        // State ids range over the alphabet plus the start symbol.
        let s = n_tags + 1;
        let real: Vec<usize> = (0..n_tags).collect();
        let boundary = [self.start];

        let rows: Vec<Option<&Vec<f64>>> = words.iter().map(|w| self.emission_row(w)).collect();
        let transit = |a: usize, b: usize, c: usize| {
            self.log_trigrams
                .get(&(a, b, c))
                .copied()
                .unwrap_or(f64::NEG_INFINITY)
        };
        let idx = |i: usize, u: usize, v: usize| (i * s + u) * s + v;

        // Fresh tables per sentence; sharing them across decodes would
        // leak scores between sentences.
        let mut score = vec![f64::NEG_INFINITY; n * s * s];
        let mut back = vec![usize::MAX; n * s * s];

        for i in 0..n {
            let preds: &[usize] = if i >= 2 { &real } else { &boundary };
            let firsts: &[usize] = if i >= 1 { &real } else { &boundary };
            for &u in firsts {
                for v in 0..n_tags {
                    let emit = rows[i].map_or(f64::NEG_INFINITY, |row| row[v]);
                    let mut best = f64::NEG_INFINITY;
                    let mut best_pred = usize::MAX;
                    let mut seeded = false;
                    for &t0 in preds {
                        let prev = if i == 0 { 0.0 } else { score[idx(i - 1, t0, u)] };
                        let current = prev + transit(t0, u, v) + emit;
                        if !seeded || current > best {
                            seeded = true;
                            best = current;
                            best_pred = t0;
                        }
                    }
                    score[idx(i, u, v)] = best;
                    back[idx(i, u, v)] = best_pred;
                }
            }
        }

        // Virtual step to STOP seeds the last two tags.
        let lasts: &[usize] = if n >= 2 { &real } else { &boundary };
        let mut best = f64::NEG_INFINITY;
        let mut best_pair = (self.start, 0);
        let mut seeded = false;
        for &u in lasts {
            for v in 0..n_tags {
                let current = score[idx(n - 1, u, v)] + transit(u, v, self.stop);
                if !seeded || current > best {
                    seeded = true;
                    best = current;
                    best_pair = (u, v);
                }
            }
        }

        let mut ids = vec![0; n];
        ids[n - 1] = best_pair.1;
        if n >= 2 {
            ids[n - 2] = best_pair.0;
        }
        for i in (0..n.saturating_sub(2)).rev() {
            ids[i] = back[idx(i + 2, ids[i + 1], ids[i + 2])];
        }
        ids.into_iter().map(|id| self.tags[id].clone()).collect()
    }

    /// Tags each token independently by maximum emission probability.
    ///
    /// No transition term is used; this baseline exists only for
    /// comparison against [`Tagger::tag_viterbi`]. Unseen words fall back
    /// to their class emission exactly as in Viterbi decoding.
    pub fn tag_greedy(&self, words: &[String]) -> Vec<String> {
        words
            .iter()
            .map(|word| {
                let mut best = f64::NEG_INFINITY;
                let mut best_tag = 0;
                if let Some(row) = self.emission_row(word) {
                    for (id, &emit) in row.iter().enumerate() {
                        if emit > best {
                            best = emit;
                            best_tag = id;
                        }
                    }
                }
                self.tags[best_tag].clone()
            })
            .collect()
    }
}
