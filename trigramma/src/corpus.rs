//! Corpus and test input I/O.
//!
//! Annotated corpora are plain text with one `"word tag"` pair per line
//! and a blank line between sentences; test input has the same layout
//! without tags.

use std::io::{BufRead, Write};
use std::mem;

use crate::errors::{Result, TrigrammaError};

/// One annotated token of a training corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedWord {
    pub word: String,
    pub tag: String,
}

impl TaggedWord {
    pub fn new<W, T>(word: W, tag: T) -> Self
    where
        W: Into<String>,
        T: Into<String>,
    {
        Self {
            word: word.into(),
            tag: tag.into(),
        }
    }
}

/// A sentence of annotated tokens.
pub type TaggedSentence = Vec<TaggedWord>;

/// Reads an annotated corpus, failing fast on any malformed line.
///
/// # Errors
///
/// [`TrigrammaError::InvalidFormat`] will be returned for the first line
/// that is not a `"word tag"` pair, carrying its line number.
pub fn read_tagged<R>(rdr: R) -> Result<Vec<TaggedSentence>>
where
    R: BufRead,
{
    let mut sentences = vec![];
    let mut current = vec![];
    for (i, line) in rdr.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            if !current.is_empty() {
                sentences.push(mem::take(&mut current));
            }
            continue;
        }
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next(), fields.next()) {
            (Some(word), Some(tag), None) => current.push(TaggedWord::new(word, tag)),
            _ => {
                return Err(TrigrammaError::invalid_format(
                    i + 1,
                    format!("expected \"word tag\", got {:?}", line),
                ));
            }
        }
    }
    if !current.is_empty() {
        sentences.push(current);
    }
    Ok(sentences)
}

/// Reads unannotated test input, one token per line.
pub fn read_raw<R>(rdr: R) -> Result<Vec<Vec<String>>>
where
    R: BufRead,
{
    let mut sentences = vec![];
    let mut current = vec![];
    for line in rdr.lines() {
        let line = line?;
        let word = line.trim();
        if word.is_empty() {
            if !current.is_empty() {
                sentences.push(mem::take(&mut current));
            }
        } else {
            current.push(word.to_string());
        }
    }
    if !current.is_empty() {
        sentences.push(current);
    }
    Ok(sentences)
}

/// Writes one tagged sentence followed by the separating blank line.
pub fn write_sentence<W>(wtr: &mut W, words: &[String], tags: &[String]) -> Result<()>
where
    W: Write,
{
    for (word, tag) in words.iter().zip(tags) {
        writeln!(wtr, "{} {}", word, tag)?;
    }
    writeln!(wtr)?;
    Ok(())
}

/// Writes an annotated corpus in the same format [`read_tagged`] accepts.
pub fn write_tagged<W>(wtr: &mut W, sentences: &[TaggedSentence]) -> Result<()>
where
    W: Write,
{
    for sentence in sentences {
        for tw in sentence {
            writeln!(wtr, "{} {}", tw.word, tw.tag)?;
        }
        writeln!(wtr)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_tagged() {
        let text = "the D\ndog N\n\nrun V\n";
        let sentences = read_tagged(text.as_bytes()).unwrap();

        let expected = vec![
            vec![TaggedWord::new("the", "D"), TaggedWord::new("dog", "N")],
            vec![TaggedWord::new("run", "V")],
        ];
        assert_eq!(expected, sentences);
    }

    #[test]
    fn test_read_tagged_empty() {
        let sentences = read_tagged("".as_bytes()).unwrap();

        assert!(sentences.is_empty());
    }

    #[test]
    fn test_read_tagged_consecutive_blank_lines() {
        let text = "the D\n\n\n\ndog N\n";
        let sentences = read_tagged(text.as_bytes()).unwrap();

        assert_eq!(2, sentences.len());
    }

    #[test]
    fn test_read_tagged_malformed_line() {
        let text = "the D\nlonely\n";
        let e = read_tagged(text.as_bytes());

        assert!(e.is_err());
        assert_eq!(
            "InvalidFormatError: line 2: expected \"word tag\", got \"lonely\"",
            &e.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_read_tagged_too_many_fields() {
        let text = "the D extra\n";
        let e = read_tagged(text.as_bytes());

        assert!(e.is_err());
    }

    #[test]
    fn test_read_raw() {
        let text = "the\ndog\n\nzzz\n";
        let sentences = read_raw(text.as_bytes()).unwrap();

        let expected = vec![
            vec!["the".to_string(), "dog".to_string()],
            vec!["zzz".to_string()],
        ];
        assert_eq!(expected, sentences);
    }

    #[test]
    fn test_write_sentence() {
        let words = vec!["the".to_string(), "dog".to_string()];
        let tags = vec!["D".to_string(), "N".to_string()];
        let mut buf = vec![];
        write_sentence(&mut buf, &words, &tags).unwrap();

        assert_eq!("the D\ndog N\n\n", String::from_utf8(buf).unwrap());
    }

    #[test]
    fn test_write_tagged_round_trip() {
        let text = "the D\ndog N\n\nrun V\n\n";
        let sentences = read_tagged(text.as_bytes()).unwrap();
        let mut buf = vec![];
        write_tagged(&mut buf, &sentences).unwrap();

        assert_eq!(text, String::from_utf8(buf).unwrap());
    }
}
