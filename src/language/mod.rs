//! English language model.
//!
//! Every statistical constant the solver is calibrated against lives here:
//! the expected Index of Coincidence and entropy of English, the monogram
//! frequency table, and the score normaliser. Keeping them in one place
//! makes the calibration auditable and keeps magic numbers out of the
//! search code.

use crate::alphabet::ALPHABET_SIZE;

/// Mean Index of Coincidence of English text, scaled by the alphabet size.
pub const ENGLISH_IOC: f64 = 1.742;

/// Mean Shannon entropy of the English letter distribution, in nats.
pub const ENGLISH_ENTROPY: f64 = 2.85;

/// Calibration constant for the composite fitness score, chosen so that a
/// typical correct solution under the default weights scores near 1.0.
/// Changing it breaks comparability with published configurations.
pub const SCORE_NORMALISER: f64 = 3.41;

/// English monogram frequencies as fractions, indexed A through Z.
pub const ENGLISH_MONOGRAMS: [f64; ALPHABET_SIZE] = [
    0.08167, 0.01492, 0.02782, 0.04253, 0.12702, 0.02228, 0.02015, // A-G
    0.06094, 0.06966, 0.00153, 0.00772, 0.04025, 0.02406, 0.06749, // H-N
    0.07507, 0.01929, 0.00095, 0.05987, 0.06327, 0.09056, 0.02758, // O-U
    0.00978, 0.02360, 0.00150, 0.01974, 0.00074, // V-Z
];

/// Expands a keyword into a full alphabet permutation: the keyword's
/// distinct letters in order, followed by the unused letters ascending.
/// `KRYPTOS` becomes `KRYPTOSABCDEFGHIJLMNQUVWXZ`.
///
/// Returns the permutation and the keyword block length.
///
/// # Errors
/// Propagates [`crate::error::QuagmireError::InvalidSymbol`] for
/// non-letter input.
pub fn keyword_permutation(
    word: &str,
) -> Result<([u8; ALPHABET_SIZE], usize), crate::error::QuagmireError> {
    let symbols = crate::alphabet::symbols_from_text(word)?;
    let mut permutation = [0u8; ALPHABET_SIZE];
    let mut used = [false; ALPHABET_SIZE];
    let mut block_len = 0;
    for &symbol in &symbols {
        if !used[symbol as usize] {
            used[symbol as usize] = true;
            permutation[block_len] = symbol;
            block_len += 1;
        }
    }
    let mut at = block_len;
    for symbol in 0..ALPHABET_SIZE as u8 {
        if !used[symbol as usize] {
            permutation[at] = symbol;
            at += 1;
        }
    }
    Ok((permutation, block_len))
}
