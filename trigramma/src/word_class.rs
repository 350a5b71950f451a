//! Word classes substituted for low-frequency training words.

use bincode::{Decode, Encode};
use hashbrown::{HashMap, HashSet};

use crate::counts::CountsTable;

/// Training words whose total frequency falls below this threshold are
/// replaced with a word class.
pub const RARE_THRESHOLD: u64 = 5;

/// Fallback class for low-frequency words.
pub const RARE: &str = "_RARE_";

/// Class for low-frequency words containing at least one numeric character.
pub const NUMERIC: &str = "_NUMERIC_";

/// Class for low-frequency words consisting entirely of uppercase letters.
pub const ALL_CAPS: &str = "_ALLCAPS_";

/// Class for low-frequency words whose final character is uppercase.
pub const LAST_CAPS: &str = "_LASTCAPS_";

// The labels are never partition targets themselves, so substituted
// corpora re-train to the same counts.
const CLASS_LABELS: [&str; 4] = [RARE, NUMERIC, ALL_CAPS, LAST_CAPS];

/// Policy deciding which class stands in for a low-frequency or unseen
/// word.
///
/// The policy that rewrote the training corpus must also classify unseen
/// words at decoding time; [`crate::Model`] records it so the two cannot
/// drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Decode, Encode)]
pub enum SmoothingPolicy {
    /// Every low-frequency word maps to `_RARE_`.
    RareOnly,

    /// Low-frequency words are split by surface shape into `_NUMERIC_`,
    /// `_ALLCAPS_` and `_LASTCAPS_`, falling back to `_RARE_`.
    WordShape,
}

impl SmoothingPolicy {
    /// Maps a word to the class label standing in for it. The first
    /// matching shape wins: numeric, then all-caps, then last-caps.
    ///
    /// # Examples
    ///
    /// ```
    /// use trigramma::SmoothingPolicy;
    ///
    /// assert_eq!("_NUMERIC_", SmoothingPolicy::WordShape.classify("ABC123"));
    /// assert_eq!("_RARE_", SmoothingPolicy::RareOnly.classify("ABC123"));
    /// ```
    pub fn classify(self, word: &str) -> &'static str {
        match self {
            Self::RareOnly => RARE,
            Self::WordShape => {
                if word.chars().any(char::is_numeric) {
                    NUMERIC
                } else if !word.is_empty() && word.chars().all(char::is_uppercase) {
                    ALL_CAPS
                } else if word.chars().last().map_or(false, char::is_uppercase) {
                    LAST_CAPS
                } else {
                    RARE
                }
            }
        }
    }

    /// Filename suffix identifying the policy in output artifacts.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::RareOnly => "rare",
            Self::WordShape => "class",
        }
    }
}

/// Returns whether `word` is one of the reserved class labels.
pub fn is_class_label(word: &str) -> bool {
    CLASS_LABELS.contains(&word)
}

/// Partitions the training vocabulary into class-membership sets.
///
/// Every word whose total tag-marginal count in `counts` falls below
/// `threshold` is assigned to exactly one class; words at or above the
/// threshold are left untouched. Reserved class labels are skipped, so a
/// corpus that has already been substituted partitions to nothing new.
pub fn partition(
    counts: &CountsTable,
    policy: SmoothingPolicy,
    threshold: u64,
) -> HashMap<&'static str, HashSet<String>> {
    let mut classes: HashMap<&'static str, HashSet<String>> = HashMap::new();
    for (word, freq) in counts.word_frequencies() {
        if freq >= threshold || is_class_label(word) {
            continue;
        }
        classes
            .entry(policy.classify(word))
            .or_default()
            .insert(word.to_string());
    }
    classes
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

    #[test]
    fn test_classify_numeric_beats_all_caps() {
        assert_eq!(NUMERIC, SmoothingPolicy::WordShape.classify("ABC123"));
    }

    #[test]
    fn test_classify_word_shape() {
        let policy = SmoothingPolicy::WordShape;
        assert_eq!(NUMERIC, policy.classify("2020"));
        assert_eq!(NUMERIC, policy.classify("b12"));
        assert_eq!(ALL_CAPS, policy.classify("NASA"));
        assert_eq!(LAST_CAPS, policy.classify("McD"));
        assert_eq!(LAST_CAPS, policy.classify("mRNA"));
        assert_eq!(RARE, policy.classify("dog"));
        assert_eq!(RARE, policy.classify("Madrid"));
        assert_eq!(RARE, policy.classify(""));
    }

    #[test]
    fn test_classify_rare_only() {
        let policy = SmoothingPolicy::RareOnly;
        assert_eq!(RARE, policy.classify("2020"));
        assert_eq!(RARE, policy.classify("NASA"));
        assert_eq!(RARE, policy.classify("dog"));
    }

    #[test]
    fn test_partition_by_shape() {
        let sentences = corpus(&[
            &[("dog", "N")],
            &[("dog", "N")],
            &[("dog", "N")],
            &[("dog", "N")],
            &[("dog", "N")],
            &[("zzz", "N"), ("ABC123", "N"), ("NASA", "N")],
        ]);
        let counts = CountsTable::from_sentences(&sentences);
        let classes = partition(&counts, SmoothingPolicy::WordShape, RARE_THRESHOLD);

        // "dog" reaches the threshold and stays untouched.
        assert!(classes.values().all(|members| !members.contains("dog")));
        assert!(classes[RARE].contains("zzz"));
        assert!(classes[NUMERIC].contains("ABC123"));
        assert!(classes[ALL_CAPS].contains("NASA"));
    }

    #[test]
    fn test_partition_rare_only() {
        let sentences = corpus(&[&[("zzz", "N"), ("ABC123", "N"), ("NASA", "N")]]);
        let counts = CountsTable::from_sentences(&sentences);
        let classes = partition(&counts, SmoothingPolicy::RareOnly, RARE_THRESHOLD);

        assert_eq!(1, classes.len());
        assert_eq!(3, classes[RARE].len());
    }

    #[test]
    fn test_partition_at_threshold_untouched() {
        let sentences = corpus(&[
            &[("dog", "N")],
            &[("dog", "N")],
            &[("dog", "N")],
            &[("dog", "N")],
            &[("dog", "N")],
        ]);
        let counts = CountsTable::from_sentences(&sentences);
        let classes = partition(&counts, SmoothingPolicy::WordShape, RARE_THRESHOLD);

        assert!(classes.is_empty());
    }

    #[test]
    fn test_partition_skips_class_labels() {
        let sentences = corpus(&[&[("_RARE_", "N"), ("_NUMERIC_", "N")]]);
        let counts = CountsTable::from_sentences(&sentences);
        let classes = partition(&counts, SmoothingPolicy::WordShape, RARE_THRESHOLD);

        assert!(classes.is_empty());
    }
}
