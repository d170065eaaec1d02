//! Known-plaintext (crib) handling.
//!
//! Cribs do two jobs during the search. Before a period is searched at
//! all, [`cribs_satisfied`] checks that the cribs can coexist within its
//! columns. During the climb, [`constrain_cycleword`] pins down cycleword
//! positions directly from the candidate keywords, turning each crib into
//! a hard constraint instead of a scoring hint.

use crate::alphabet::{invert_permutation, ALPHABET_SIZE, MAX_CYCLEWORD_LEN};
use crate::error::QuagmireError;

/// A single known plaintext symbol at a known position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crib {
    /// Position in the ciphertext.
    pub position: usize,
    /// The plaintext symbol at that position.
    pub symbol: u8,
}

/// Parses a crib line: one character per ciphertext position, `_` where
/// the plaintext is unknown. Positions come out unique and ascending.
///
/// # Errors
/// The line must have exactly `cipher_len` characters
/// ([`QuagmireError::LengthMismatch`]) and contain only letters and
/// underscores ([`QuagmireError::InvalidSymbol`]).
pub fn parse_cribtext(cribtext: &str, cipher_len: usize) -> Result<Vec<Crib>, QuagmireError> {
    let crib_len = cribtext.chars().count();
    if crib_len != cipher_len {
        return Err(QuagmireError::LengthMismatch { cipher_len, crib_len });
    }
    let mut cribs = Vec::new();
    for (position, c) in cribtext.chars().enumerate() {
        if c == '_' {
            continue;
        }
        if !c.is_ascii_alphabetic() {
            return Err(QuagmireError::InvalidSymbol(c));
        }
        cribs.push(Crib {
            position,
            symbol: c.to_ascii_uppercase() as u8 - b'A',
        });
    }
    Ok(cribs)
}

/// Whether the ciphertext can satisfy the cribs at the given period.
///
/// Within each column the cribs induce a partial mapping between
/// ciphertext and plaintext symbols; a period is feasible only if that
/// mapping is one-to-one in both directions. No keyword pair can rescue a
/// period that fails here.
pub fn cribs_satisfied(cipher: &[u8], cribs: &[Crib], cycleword_len: usize) -> bool {
    if cribs.is_empty() {
        return true;
    }
    for column in 0..cycleword_len {
        let mut pt_to_ct = [None::<u8>; ALPHABET_SIZE];
        let mut ct_to_pt = [None::<u8>; ALPHABET_SIZE];
        for crib in cribs.iter().filter(|c| c.position % cycleword_len == column) {
            let ct_symbol = cipher[crib.position];
            match pt_to_ct[crib.symbol as usize] {
                Some(previous) if previous != ct_symbol => return false,
                _ => pt_to_ct[crib.symbol as usize] = Some(ct_symbol),
            }
            match ct_to_pt[ct_symbol as usize] {
                Some(previous) if previous != crib.symbol => return false,
                _ => ct_to_pt[ct_symbol as usize] = Some(crib.symbol),
            }
        }
    }
    true
}

/// Derives cycleword symbols from the candidate keyword pair and the
/// cribs, writing them into `cycleword`. Positions no crib touches are
/// left alone.
///
/// Returns `true` on a contradiction: two cribs in the same column
/// demanding different cycleword symbols. The keyword pair cannot satisfy
/// the cribs at this period, and `cycleword` is left exactly as it was so
/// the caller scores an unclobbered state.
pub fn constrain_cycleword(
    cipher: &[u8],
    cribs: &[Crib],
    pt_keyword: &[u8; ALPHABET_SIZE],
    ct_keyword: &[u8; ALPHABET_SIZE],
    cycleword: &mut [u8],
    variant: bool,
) -> bool {
    if cribs.is_empty() {
        return false;
    }
    let inv_pt = invert_permutation(pt_keyword);
    let inv_ct = invert_permutation(ct_keyword);
    let cycleword_len = cycleword.len();
    let mut derived = [None::<u8>; MAX_CYCLEWORD_LEN];

    for crib in cribs {
        let column = crib.position % cycleword_len;
        let ct_symbol = cipher[crib.position] as usize;
        let pt_symbol = crib.symbol as usize;

        // The keyword positions of the ciphertext and plaintext symbols
        // fix the cycleword rotation for this column; the variant form
        // swaps which keyword each symbol is looked up in.
        let rotation = if variant {
            let ct_position = inv_pt[ct_symbol] as usize;
            let pt_position = inv_ct[pt_symbol] as usize;
            (pt_position + ALPHABET_SIZE - ct_position) % ALPHABET_SIZE
        } else {
            let ct_position = inv_ct[ct_symbol] as usize;
            let pt_position = inv_pt[pt_symbol] as usize;
            (ct_position + ALPHABET_SIZE - pt_position) % ALPHABET_SIZE
        };
        let cycle_symbol = pt_keyword[rotation];

        match derived[column] {
            None => derived[column] = Some(cycle_symbol),
            Some(previous) if previous != cycle_symbol => return true,
            _ => {}
        }
    }

    for (slot, derived) in cycleword.iter_mut().zip(derived.iter()) {
        if let Some(symbol) = derived {
            *slot = *symbol;
        }
    }
    false
}
