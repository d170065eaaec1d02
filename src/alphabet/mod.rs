//! Alphabet primitives shared by every transform and scoring path.
//!
//! All cipher machinery works on symbols, integers in `[0, 26)`. Text only
//! exists at the edges of the program: it is converted to symbols once on
//! input and back to text for display.

use crate::error::QuagmireError;
use crate::language::ENGLISH_MONOGRAMS;

/// Number of symbols in the fixed Latin alphabet.
pub const ALPHABET_SIZE: usize = 26;

/// Longest ciphertext the solver accepts.
pub const MAX_CIPHER_LENGTH: usize = 1000;

/// Longest cycleword the search will consider.
pub const MAX_CYCLEWORD_LEN: usize = 26;

/// Converts text to symbol indices, `A -> 0` through `Z -> 25`.
/// Lowercase input is accepted and folded to uppercase.
///
/// # Errors
/// Returns [`QuagmireError::InvalidSymbol`] on any non-letter character.
pub fn symbols_from_text(text: &str) -> Result<Vec<u8>, QuagmireError> {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                Ok(c.to_ascii_uppercase() as u8 - b'A')
            } else {
                Err(QuagmireError::InvalidSymbol(c))
            }
        })
        .collect()
}

/// Converts symbol indices back to uppercase text.
pub fn text_from_symbols(symbols: &[u8]) -> String {
    symbols.iter().map(|&s| (s + b'A') as char).collect()
}

/// Counts the occurrences of each symbol.
pub fn tally(text: &[u8]) -> [u32; ALPHABET_SIZE] {
    let mut frequencies = [0u32; ALPHABET_SIZE];
    for &symbol in text {
        frequencies[symbol as usize] += 1;
    }
    frequencies
}

/// Friedman's Index of Coincidence, `sum f(f-1) / (L(L-1))`, unscaled.
/// Texts shorter than two symbols score zero.
pub fn index_of_coincidence(text: &[u8]) -> f64 {
    if text.len() < 2 {
        return 0.0;
    }
    let frequencies = tally(text);
    let total: f64 = frequencies
        .iter()
        .map(|&f| f as f64 * (f as f64 - 1.0))
        .sum();
    let len = text.len() as f64;
    total / (len * (len - 1.0))
}

/// Shannon entropy of the letter distribution, in nats.
pub fn shannon_entropy(text: &[u8]) -> f64 {
    if text.is_empty() {
        return 0.0;
    }
    let frequencies = tally(text);
    let len = text.len() as f64;
    let mut entropy = 0.0;
    for &count in frequencies.iter() {
        if count > 0 {
            let frequency = count as f64 / len;
            entropy -= frequency * frequency.ln();
        }
    }
    entropy
}

/// Chi-squared distance between the letter distribution of `text` and
/// English monogram frequencies. Lower is closer to English.
pub fn chi_squared(text: &[u8]) -> f64 {
    if text.is_empty() {
        return 0.0;
    }
    let frequencies = tally(text);
    let len = text.len() as f64;
    let mut chi2 = 0.0;
    for (count, expected) in frequencies.iter().zip(ENGLISH_MONOGRAMS.iter()) {
        let frequency = *count as f64 / len;
        chi2 += (frequency - expected).powi(2) / expected;
    }
    chi2
}

/// Inverse of an alphabet permutation: `inverse[perm[i]] == i`.
pub fn invert_permutation(perm: &[u8; ALPHABET_SIZE]) -> [u8; ALPHABET_SIZE] {
    let mut inverse = [0u8; ALPHABET_SIZE];
    for (position, &symbol) in perm.iter().enumerate() {
        inverse[symbol as usize] = position as u8;
    }
    inverse
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip() {
        let symbols = symbols_from_text("HELLOWORLD").unwrap();
        assert_eq!(symbols, vec![7, 4, 11, 11, 14, 22, 14, 17, 11, 3]);
        assert_eq!(text_from_symbols(&symbols), "HELLOWORLD");
    }

    #[test]
    fn lowercase_is_folded() {
        assert_eq!(
            symbols_from_text("abc").unwrap(),
            symbols_from_text("ABC").unwrap()
        );
    }

    #[test]
    fn non_letters_are_rejected() {
        assert!(matches!(
            symbols_from_text("AB CD"),
            Err(QuagmireError::InvalidSymbol(' '))
        ));
        assert!(symbols_from_text("AB3").is_err());
    }

    #[test]
    fn ioc_of_uniform_text_is_low() {
        let uniform = symbols_from_text(&"ABCDEFGHIJKLMNOPQRSTUVWXYZ".repeat(10)).unwrap();
        let scaled = ALPHABET_SIZE as f64 * index_of_coincidence(&uniform);
        assert!((scaled - 0.9035).abs() < 0.001, "scaled IoC was {scaled}");
    }

    #[test]
    fn ioc_of_degenerate_text_is_zero() {
        assert_eq!(index_of_coincidence(&[0]), 0.0);
        assert_eq!(index_of_coincidence(&[]), 0.0);
    }

    #[test]
    fn entropy_of_single_symbol_text_is_zero() {
        let text = vec![4u8; 50];
        assert_eq!(shannon_entropy(&text), 0.0);
    }

    #[test]
    fn entropy_of_uniform_text_is_log_alphabet_size() {
        let uniform = symbols_from_text("ABCDEFGHIJKLMNOPQRSTUVWXYZ").unwrap();
        let expected = (ALPHABET_SIZE as f64).ln();
        assert!((shannon_entropy(&uniform) - expected).abs() < 1e-9);
    }

    #[test]
    fn chi_squared_prefers_english() {
        let english = symbols_from_text("THEQUICKBROWNFOXJUMPSOVERTHELAZYDOGANDTHENSOMEMORETEXT").unwrap();
        let skewed = vec![16u8; 54];
        assert!(chi_squared(&english) < chi_squared(&skewed));
    }

    #[test]
    fn invert_permutation_round_trips() {
        let mut perm = [0u8; ALPHABET_SIZE];
        for (i, entry) in perm.iter_mut().enumerate() {
            *entry = ((i * 7 + 3) % ALPHABET_SIZE) as u8;
        }
        let inverse = invert_permutation(&perm);
        for i in 0..ALPHABET_SIZE {
            assert_eq!(inverse[perm[i] as usize] as usize, i);
        }
    }
}
