//! N-gram statistics model.
//!
//! The table covers every possible n-gram over the alphabet, `26^n`
//! entries. Observed counts are log-scaled with `ln(1 + count)` and
//! normalised so the whole table sums to one; unobserved n-grams keep a
//! zero entry. Scoring a text sums the table over its n-gram windows.

use std::fs;
use std::path::Path;

use log::debug;

use crate::alphabet::ALPHABET_SIZE;
use crate::error::QuagmireError;

/// Largest supported n-gram size. A size-5 table is `26^5` floats,
/// about 45 MiB.
pub const MAX_NGRAM_SIZE: usize = 5;

/// Normalised log-frequency table for a fixed n-gram size.
pub struct NgramModel {
    /// The n in n-gram.
    size: usize,
    /// One entry per n-gram, indexed little-endian base 26: the first
    /// symbol of the n-gram is the least significant digit.
    data: Vec<f32>,
}

impl NgramModel {
    /// Loads a model from a statistics file with one `NGRAM\tCOUNT` line
    /// per observed n-gram.
    ///
    /// # Errors
    /// I/O failures, a size outside `1..=5`, malformed lines, and n-grams
    /// of the wrong length are all rejected.
    pub fn from_file(path: &Path, size: usize) -> Result<NgramModel, QuagmireError> {
        debug!("loading {}-gram statistics from {}", size, path.display());
        let contents = fs::read_to_string(path)?;
        let mut counts = Vec::new();
        for line in contents.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split_whitespace();
            let ngram = fields.next().unwrap_or("");
            let count: u64 = fields.next().and_then(|c| c.parse().ok()).ok_or_else(|| {
                QuagmireError::InvalidNgramFile(format!("malformed line '{line}'"))
            })?;
            counts.push((ngram, count));
        }
        Self::from_counts(size, counts)
    }

    /// Builds a model from in-memory `(ngram, count)` pairs. The file
    /// loader funnels through this; tests use it directly.
    ///
    /// # Errors
    /// Rejects sizes outside `1..=5`, n-grams whose length is not `size`,
    /// and tables with no non-zero counts.
    pub fn from_counts<'a, I>(size: usize, counts: I) -> Result<NgramModel, QuagmireError>
    where
        I: IntoIterator<Item = (&'a str, u64)>,
    {
        if size == 0 || size > MAX_NGRAM_SIZE {
            return Err(QuagmireError::InvalidNgramFile(format!(
                "unsupported n-gram size {size}, expected 1 to {MAX_NGRAM_SIZE}"
            )));
        }
        let mut data = vec![0f32; ALPHABET_SIZE.pow(size as u32)];
        for (ngram, count) in counts {
            let symbols = crate::alphabet::symbols_from_text(ngram)?;
            if symbols.len() != size {
                return Err(QuagmireError::InvalidNgramFile(format!(
                    "'{ngram}' is not a {size}-gram"
                )));
            }
            data[ngram_index(&symbols)] = count as f32;
        }

        // Log-scale, then normalise to a unit sum.
        let mut total = 0f32;
        for entry in data.iter_mut() {
            *entry = (1.0 + *entry).ln();
            total += *entry;
        }
        if total == 0.0 {
            return Err(QuagmireError::InvalidNgramFile(
                "no n-grams with non-zero counts".to_string(),
            ));
        }
        for entry in data.iter_mut() {
            *entry /= total;
        }

        Ok(NgramModel { size, data })
    }

    /// The n this model was built for.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Mean log-frequency over the first `L - n` n-gram windows of the
    /// text, scaled by `26^n` so scores stay comparable across sizes.
    pub fn score(&self, text: &[u8]) -> f64 {
        if text.len() <= self.size {
            return 0.0;
        }
        let mut total = 0f64;
        for start in 0..text.len() - self.size {
            total += self.data[ngram_index(&text[start..start + self.size])] as f64;
        }
        let scale = (ALPHABET_SIZE as f64).powi(self.size as i32);
        scale * total / (text.len() - self.size) as f64
    }
}

/// Table index of an n-gram: little-endian base 26. `TH` maps to
/// `19 + 7 * 26 = 201`.
fn ngram_index(symbols: &[u8]) -> usize {
    let mut index = 0;
    let mut base = 1;
    for &symbol in symbols {
        index += symbol as usize * base;
        base *= ALPHABET_SIZE;
    }
    index
}
