//! Dictionary word spotting in recovered plaintext.
//!
//! Recovered plaintext has no word boundaries, so the spotter slides a
//! window of every word length over the text and checks each fragment
//! against the dictionary. A high hit count is a cheap, human-readable
//! signal that a candidate decryption is real language.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::debug;

use crate::error::QuagmireError;

/// Words shorter than this are ignored; they match almost anywhere.
const MIN_WORD_LEN: usize = 3;

/// An uppercase word list with fast membership lookup.
pub struct Dictionary {
    /// The words, uppercased.
    words: HashSet<String>,
    /// Length of the longest word, bounding the scan window.
    max_word_len: usize,
}

impl Dictionary {
    /// Loads a dictionary file with one word per line.
    ///
    /// # Errors
    /// Fails on I/O errors. Blank lines are skipped.
    pub fn from_file(path: &Path) -> Result<Dictionary, QuagmireError> {
        let contents = fs::read_to_string(path)?;
        let dictionary = Self::from_words(contents.split_whitespace());
        debug!(
            "loaded {} dictionary words from {}, longest {}",
            dictionary.words.len(),
            path.display(),
            dictionary.max_word_len
        );
        Ok(dictionary)
    }

    /// Builds a dictionary from an iterator of words.
    pub fn from_words<I, S>(words: I) -> Dictionary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: HashSet<String> = words
            .into_iter()
            .map(|word| word.as_ref().to_ascii_uppercase())
            .filter(|word| !word.is_empty())
            .collect();
        let max_word_len = words.iter().map(|word| word.len()).max().unwrap_or(0);
        Dictionary { words, max_word_len }
    }

    /// Number of words in the dictionary.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the dictionary holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Every dictionary word embedded in `plaintext`, one entry per
    /// occurrence, in scan order.
    pub fn find_words<'a>(&self, plaintext: &'a str) -> Vec<&'a str> {
        let mut found = Vec::new();
        if self.max_word_len < MIN_WORD_LEN {
            return found;
        }
        for start in 0..=plaintext.len().saturating_sub(MIN_WORD_LEN) {
            let longest = self.max_word_len.min(plaintext.len() - start);
            for word_len in MIN_WORD_LEN..=longest {
                let fragment = &plaintext[start..start + word_len];
                if self.words.contains(fragment) {
                    found.push(fragment);
                }
            }
        }
        found
    }
}
