//! Composite fitness of a candidate solution.
//!
//! Four normalised components vote on how English the trial decryption
//! looks: n-gram log-likelihood, crib agreement, Index of Coincidence
//! proximity, and entropy proximity. Their weighted mean is divided by a
//! fixed calibration constant so a typical correct solution lands near 1.

use crate::alphabet::{index_of_coincidence, shannon_entropy, ALPHABET_SIZE};
use crate::cipher::{decrypt_into, encrypt_into};
use crate::cribs::Crib;
use crate::language::{ENGLISH_ENTROPY, ENGLISH_IOC, SCORE_NORMALISER};
use crate::ngrams::NgramModel;

/// Relative weights of the fitness components.
#[derive(Debug, Clone, Copy)]
pub struct Weights {
    /// Weight of the n-gram log-likelihood score.
    pub ngram: f64,
    /// Weight of the crib match ratio.
    pub crib: f64,
    /// Weight of the IoC proximity score.
    pub ioc: f64,
    /// Weight of the entropy proximity score.
    pub entropy: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Weights { ngram: 12.0, crib: 36.0, ioc: 1.0, entropy: 1.0 }
    }
}

/// Fraction of cribs the text reproduces, zero when there are none.
pub fn crib_match_ratio(text: &[u8], cribs: &[Crib]) -> f64 {
    if cribs.is_empty() {
        return 0.0;
    }
    let matches = cribs
        .iter()
        .filter(|crib| text[crib.position] == crib.symbol)
        .count();
    matches as f64 / cribs.len() as f64
}

/// Scores a candidate `(P, C, W)` against the ciphertext.
///
/// The trial decryption is written into `decrypted` (the encrypting
/// transform when `variant` is set) and scored in place; the caller owns
/// the scratch buffer so the search loop never reallocates.
#[allow(clippy::too_many_arguments)]
pub fn state_score(
    decrypted: &mut Vec<u8>,
    cipher: &[u8],
    cribs: &[Crib],
    pt_keyword: &[u8; ALPHABET_SIZE],
    ct_keyword: &[u8; ALPHABET_SIZE],
    cycleword: &[u8],
    variant: bool,
    beaufort: bool,
    ngrams: &NgramModel,
    weights: &Weights,
) -> f64 {
    if variant {
        encrypt_into(decrypted, cipher, pt_keyword, ct_keyword, cycleword, beaufort);
    } else {
        decrypt_into(decrypted, cipher, pt_keyword, ct_keyword, cycleword, beaufort);
    }

    let ngram_score = ngrams.score(decrypted);
    let crib_score = crib_match_ratio(decrypted, cribs);

    let scaled_ioc = ALPHABET_SIZE as f64 * index_of_coincidence(decrypted);
    let ioc_score = (-(scaled_ioc - ENGLISH_IOC).powi(2)).exp();

    let entropy = shannon_entropy(decrypted);
    let entropy_score = (-(entropy - ENGLISH_ENTROPY).powi(2)).exp();

    let score = weights.ngram * ngram_score
        + weights.crib * crib_score
        + weights.ioc * ioc_score
        + weights.entropy * entropy_score;
    let weight_total = weights.ngram + weights.crib + weights.ioc + weights.entropy;

    score / weight_total / SCORE_NORMALISER
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::symbols_from_text;
    use crate::cipher::straight_alphabet;
    use crate::ngrams::NgramModel;

    fn bigram_model() -> NgramModel {
        NgramModel::from_counts(
            2,
            [("TH", 120), ("HE", 100), ("IN", 90), ("ER", 80), ("AN", 75), ("RE", 70)],
        )
        .unwrap()
    }

    #[test]
    fn crib_ratio_counts_matches() {
        let text = symbols_from_text("HELLO").unwrap();
        let cribs = vec![
            Crib { position: 0, symbol: 7 },  // H matches
            Crib { position: 1, symbol: 0 },  // A does not
        ];
        assert_eq!(crib_match_ratio(&text, &cribs), 0.5);
        assert_eq!(crib_match_ratio(&text, &[]), 0.0);
    }

    #[test]
    fn identity_decryption_of_english_scores_higher_than_junk() {
        let identity = straight_alphabet();
        let english = symbols_from_text(
            "THEREISNOTHINGEITHERGOODORBADBUTTHINKINGMAKESITSOTHEREINLIESTHERUB",
        )
        .unwrap();
        let junk = vec![16u8; english.len()];
        let model = bigram_model();
        let weights = Weights::default();
        let mut scratch = Vec::new();

        let english_score = state_score(
            &mut scratch, &english, &[], &identity, &identity, &[0], false, false, &model,
            &weights,
        );
        let junk_score = state_score(
            &mut scratch, &junk, &[], &identity, &identity, &[0], false, false, &model, &weights,
        );
        assert!(english_score > junk_score);
        assert!(english_score > 0.0);
    }

    #[test]
    fn score_is_deterministic() {
        let identity = straight_alphabet();
        let cipher = symbols_from_text("WHENSHALLWETHREEMEETAGAIN").unwrap();
        let model = bigram_model();
        let weights = Weights::default();
        let mut scratch = Vec::new();
        let first = state_score(
            &mut scratch, &cipher, &[], &identity, &identity, &[3, 1, 4], false, false, &model,
            &weights,
        );
        let second = state_score(
            &mut scratch, &cipher, &[], &identity, &identity, &[3, 1, 4], false, false, &model,
            &weights,
        );
        assert_eq!(first, second);
    }

    #[test]
    fn ioc_component_prefers_english_over_uniform_text() {
        // Scaled IoC of English sits near 1.742, uniform text near 0.9.
        let english_ioc = 1.716f64;
        let uniform_ioc = 0.903f64;
        let english_component = (-(english_ioc - ENGLISH_IOC).powi(2)).exp();
        let uniform_component = (-(uniform_ioc - ENGLISH_IOC).powi(2)).exp();
        assert!(english_component > uniform_component);
    }
}
