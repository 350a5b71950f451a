//! Tag n-gram and emission counts and the plain-text counts format.

use std::io::{BufRead, Write};

use hashbrown::HashMap;

use crate::corpus::TaggedSentence;
use crate::errors::{Result, TrigrammaError};

/// Start-padding symbol; never assigned to a real token.
pub const START_SYMBOL: &str = "*";

/// Sentence-end symbol; never assigned to a real token.
pub const STOP_SYMBOL: &str = "STOP";

/// Tag n-gram and word-tag co-occurrence counts for one corpus.
///
/// Counting pads every sentence's tag sequence with two `*` in front and
/// one `STOP` at the end and slides a trigram window over it. Unigram and
/// emission counts are only taken for windows ending at a real token, so
/// the unigram keys are exactly the assignable tag alphabet. Every
/// trigram's count is bounded by the count of its prefix bigram, and every
/// bigram's by its prefix unigram, because all of them are tallied from
/// the same windows.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CountsTable {
    pub(crate) unigrams: HashMap<String, u64>,
    pub(crate) bigrams: HashMap<(String, String), u64>,
    pub(crate) trigrams: HashMap<(String, String, String), u64>,
    pub(crate) emissions: HashMap<(String, String), u64>,
}

impl CountsTable {
    /// Counts a tagged corpus. Empty sentences contribute nothing.
    pub fn from_sentences(sentences: &[TaggedSentence]) -> Self {
        let mut counts = Self::default();
        for sentence in sentences {
            if sentence.is_empty() {
                continue;
            }
            let mut tags = Vec::with_capacity(sentence.len() + 3);
            tags.push(START_SYMBOL);
            tags.push(START_SYMBOL);
            tags.extend(sentence.iter().map(|tw| tw.tag.as_str()));
            tags.push(STOP_SYMBOL);

            // No window ends inside the start padding, so the start bigram
            // is tallied separately, once per sentence.
            *counts
                .bigrams
                .entry((START_SYMBOL.to_string(), START_SYMBOL.to_string()))
                .or_insert(0) += 1;

            for (i, window) in tags.windows(3).enumerate() {
                let (t1, t2, t3) = (window[0], window[1], window[2]);
                *counts
                    .trigrams
                    .entry((t1.to_string(), t2.to_string(), t3.to_string()))
                    .or_insert(0) += 1;
                *counts
                    .bigrams
                    .entry((t2.to_string(), t3.to_string()))
                    .or_insert(0) += 1;
                if let Some(tw) = sentence.get(i) {
                    *counts.unigrams.entry(t3.to_string()).or_insert(0) += 1;
                    *counts
                        .emissions
                        .entry((tw.word.clone(), t3.to_string()))
                        .or_insert(0) += 1;
                }
            }
        }
        counts
    }

    /// Parses a counts file.
    ///
    /// Accepted lines are `"count WORDTAG tag word"` for emissions and
    /// `"count N-GRAM tag..."` (N in 1..=3) for tag n-grams. The whole
    /// file is consumed before any query is served.
    ///
    /// # Errors
    ///
    /// [`TrigrammaError::InvalidFormat`] will be returned for the first
    /// malformed line; nothing is skipped silently.
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: BufRead,
    {
        let mut counts = Self::default();
        for (i, line) in rdr.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            match *fields.as_slice() {
                [count, "WORDTAG", tag, word] => {
                    *counts
                        .emissions
                        .entry((word.to_string(), tag.to_string()))
                        .or_insert(0) += parse_count(count, i + 1)?;
                }
                [count, "1-GRAM", tag] => {
                    *counts.unigrams.entry(tag.to_string()).or_insert(0) +=
                        parse_count(count, i + 1)?;
                }
                [count, "2-GRAM", t1, t2] => {
                    *counts
                        .bigrams
                        .entry((t1.to_string(), t2.to_string()))
                        .or_insert(0) += parse_count(count, i + 1)?;
                }
                [count, "3-GRAM", t1, t2, t3] => {
                    *counts
                        .trigrams
                        .entry((t1.to_string(), t2.to_string(), t3.to_string()))
                        .or_insert(0) += parse_count(count, i + 1)?;
                }
                _ => {
                    return Err(TrigrammaError::invalid_format(
                        i + 1,
                        format!("unrecognized counts line: {:?}", line),
                    ));
                }
            }
        }
        Ok(counts)
    }

    /// Writes the counts file in deterministic sorted order.
    pub fn write<W>(&self, wtr: &mut W) -> Result<()>
    where
        W: Write,
    {
        let mut emissions: Vec<_> = self.emissions.iter().collect();
        emissions.sort();
        for ((word, tag), count) in emissions {
            writeln!(wtr, "{} WORDTAG {} {}", count, tag, word)?;
        }
        let mut unigrams: Vec<_> = self.unigrams.iter().collect();
        unigrams.sort();
        for (tag, count) in unigrams {
            writeln!(wtr, "{} 1-GRAM {}", count, tag)?;
        }
        let mut bigrams: Vec<_> = self.bigrams.iter().collect();
        bigrams.sort();
        for ((t1, t2), count) in bigrams {
            writeln!(wtr, "{} 2-GRAM {} {}", count, t1, t2)?;
        }
        let mut trigrams: Vec<_> = self.trigrams.iter().collect();
        trigrams.sort();
        for ((t1, t2, t3), count) in trigrams {
            writeln!(wtr, "{} 3-GRAM {} {} {}", count, t1, t2, t3)?;
        }
        Ok(())
    }

    /// Total training frequency of each word across all tags.
    pub fn word_frequencies(&self) -> HashMap<&str, u64> {
        let mut freqs: HashMap<&str, u64> = HashMap::new();
        for ((word, _), count) in &self.emissions {
            *freqs.entry(word.as_str()).or_insert(0) += count;
        }
        freqs
    }

    pub fn unigram(&self, tag: &str) -> u64 {
        self.unigrams.get(tag).copied().unwrap_or(0)
    }

    pub fn bigram(&self, t1: &str, t2: &str) -> u64 {
        self.bigrams
            .get(&(t1.to_string(), t2.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn trigram(&self, t1: &str, t2: &str, t3: &str) -> u64 {
        self.trigrams
            .get(&(t1.to_string(), t2.to_string(), t3.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn emission(&self, word: &str, tag: &str) -> u64 {
        self.emissions
            .get(&(word.to_string(), tag.to_string()))
            .copied()
            .unwrap_or(0)
    }
}

fn parse_count(field: &str, line: usize) -> Result<u64> {
    field
        .parse()
        .map_err(|_| TrigrammaError::invalid_format(line, format!("invalid count: {:?}", field)))
}
