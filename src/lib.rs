//! Quagmire is a stochastic solver for the Vigenère cipher family:
//! Vigenère, Beaufort, and Quagmire I-IV, each optionally in its variant
//! form. Given a ciphertext and, optionally, a partial crib, it recovers
//! plausible keyword alphabets, a cycleword, and the plaintext with a
//! shotgun-restarted hill climber.
// Warns in case we forget to include documentation
#![warn(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

/// Alphabet primitives: symbol conversions, tallies, IoC, entropy.
pub mod alphabet;
/// The cipher transforms and the `CipherKind` tag.
pub mod cipher;
/// CLI argument parsing and input file loading.
pub mod cli;
/// CLI pretty printing module for consistent output formatting.
pub mod cli_pretty_printing;
/// The configuration struct threaded through the solver.
pub mod config;
/// Crib parsing, the feasibility gate, and the cycleword constraint.
pub mod cribs;
/// Dictionary word spotting in recovered plaintext.
pub mod dictionary;
/// Unified error type.
pub mod error;
/// The composite fitness function.
pub mod fitness;
/// English language model constants.
pub mod language;
/// The n-gram statistics model.
pub mod ngrams;
/// Cycleword length estimation.
pub mod period;
/// The search driver, hill climber, and perturbation operators.
pub mod search;

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::alphabet::{
    text_from_symbols, ALPHABET_SIZE, MAX_CIPHER_LENGTH, MAX_CYCLEWORD_LEN,
};
use crate::cipher::CipherKind;
use crate::config::Config;
use crate::error::QuagmireError;
use crate::ngrams::NgramModel;

/// The best solution a search found.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Composite fitness score; a typical correct solution lands near 1.
    pub score: f64,
    /// The cipher kind that was attacked.
    pub cipher_kind: CipherKind,
    /// Whether the variant form was attacked.
    pub variant: bool,
    /// The period the solution was found at.
    pub cycleword_len: usize,
    /// Keyword block length of the plaintext alphabet.
    pub plaintext_keyword_len: usize,
    /// Keyword block length of the ciphertext alphabet.
    pub ciphertext_keyword_len: usize,
    /// Recovered plaintext keyword alphabet.
    pub plaintext_keyword: [u8; ALPHABET_SIZE],
    /// Recovered ciphertext keyword alphabet.
    pub ciphertext_keyword: [u8; ALPHABET_SIZE],
    /// Recovered cycleword. For Vigenère this spans the whole alphabet;
    /// [`Solution::cycleword_text`] trims it to the period for display.
    pub cycleword: Vec<u8>,
    /// The recovered plaintext.
    pub plaintext: Vec<u8>,
}

impl Solution {
    /// The recovered plaintext as text.
    pub fn plaintext_text(&self) -> String {
        text_from_symbols(&self.plaintext)
    }

    /// The cycleword as text, trimmed to the period.
    pub fn cycleword_text(&self) -> String {
        text_from_symbols(&self.cycleword[..self.cycleword_len.min(self.cycleword.len())])
    }
}

/// The main function to call which performs the cracking.
///
/// `ciphertext` is the cipher as a single token of letters; `cribtext`,
/// when present, is a line of the same length with `_` at unknown
/// positions. The n-gram model scores trial decryptions and `config`
/// carries every search knob.
///
/// ```
/// use quagmire::cipher::CipherKind;
/// use quagmire::config::Config;
/// use quagmire::ngrams::NgramModel;
///
/// let ngrams = NgramModel::from_counts(2, [("TH", 100), ("HE", 91)]).unwrap();
/// let config = Config {
///     cipher_kind: CipherKind::Beaufort,
///     cycleword_len: Some(1),
///     n_hill_climbs: 50,
///     seed: Some(1),
///     ..Config::default()
/// };
/// let solution =
///     quagmire::perform_cracking("XJMAWIOGPZCUDLCTHWEBYCVMZXJMFQRSNCK", None, &ngrams, &config)
///         .unwrap();
/// assert!(solution.score > 0.0);
/// assert_eq!(solution.cycleword_len, 1);
/// ```
///
/// # Errors
/// Invalid symbols, length mismatches, out-of-range lengths, an empty
/// period estimate ([`QuagmireError::NoCandidatePeriods`]), and a fully
/// excluded search space are all reported as typed errors.
pub fn perform_cracking(
    ciphertext: &str,
    cribtext: Option<&str>,
    ngrams: &NgramModel,
    config: &Config,
) -> Result<Solution, QuagmireError> {
    let cipher = alphabet::symbols_from_text(ciphertext)?;
    if cipher.len() < 2 {
        return Err(QuagmireError::InvalidInput(format!(
            "ciphertext has {} symbols, need at least 2",
            cipher.len()
        )));
    }
    if cipher.len() > MAX_CIPHER_LENGTH {
        return Err(QuagmireError::InvalidInput(format!(
            "ciphertext has {} symbols, the limit is {MAX_CIPHER_LENGTH}",
            cipher.len()
        )));
    }

    let cribs = match cribtext {
        Some(cribtext) => cribs::parse_cribtext(cribtext, cipher.len())?,
        None => Vec::new(),
    };
    debug!("{} crib positions", cribs.len());

    if let Some(len) = config.cycleword_len {
        if len == 0 || len > MAX_CYCLEWORD_LEN {
            return Err(QuagmireError::InvalidInput(format!(
                "cycleword length {len} is outside 1..={MAX_CYCLEWORD_LEN}"
            )));
        }
    }
    if config.n_restarts == 0 {
        return Err(QuagmireError::InvalidInput(
            "need at least one restart".to_string(),
        ));
    }

    let candidate_periods = match config.cycleword_len {
        Some(len) => vec![len],
        None => period::estimate_cycleword_lengths(
            &cipher,
            config.max_cycleword_len.min(MAX_CYCLEWORD_LEN),
            config.n_sigma_threshold,
            config.ioc_threshold,
        ),
    };
    if candidate_periods.is_empty() {
        return Err(QuagmireError::NoCandidatePeriods);
    }
    debug!("candidate periods {candidate_periods:?}");

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    search::search(&cipher, &cribs, &candidate_periods, ngrams, config, &mut rng)
        .ok_or(QuagmireError::SearchSpaceEmpty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_model() -> NgramModel {
        NgramModel::from_counts(2, [("TH", 120), ("HE", 100), ("IN", 90), ("ER", 80)]).unwrap()
    }

    #[test]
    fn rejects_a_too_short_ciphertext() {
        let config = Config::default();
        let result = perform_cracking("A", None, &small_model(), &config);
        assert!(matches!(result, Err(QuagmireError::InvalidInput(_))));
    }

    #[test]
    fn rejects_an_oversized_cycleword_length() {
        let config = Config { cycleword_len: Some(30), ..Config::default() };
        let result = perform_cracking("ABCDEFG", None, &small_model(), &config);
        assert!(matches!(result, Err(QuagmireError::InvalidInput(_))));
    }

    #[test]
    fn reports_when_no_period_stands_out() {
        // Constant text gives every period the same column IoC.
        let config = Config::default();
        let result = perform_cracking(&"Q".repeat(100), None, &small_model(), &config);
        assert!(matches!(result, Err(QuagmireError::NoCandidatePeriods)));
    }

    #[test]
    fn crib_length_mismatch_is_fatal() {
        let config = Config { cycleword_len: Some(2), ..Config::default() };
        let result = perform_cracking("ABCDEF", Some("AB_"), &small_model(), &config);
        assert!(matches!(result, Err(QuagmireError::LengthMismatch { .. })));
    }
}
