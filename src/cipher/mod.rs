//! Cipher transforms for the Vigenère / Quagmire family.
//!
//! Every cipher here is parameterised by a plaintext keyword permutation
//! `P`, a ciphertext keyword permutation `C`, and a cycleword `W` that
//! advances one position per symbol. The family members differ only in
//! which of `P` and `C` are key-permuted versus straight alphabets, and
//! whether the Beaufort Atbash involution applies; those coupling rules
//! are enforced by the search driver, not here.

use crate::alphabet::{invert_permutation, ALPHABET_SIZE};

/// The supported cipher family members, as defined by the ACA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherKind {
    /// `P = C = W`: the keyword permutation doubles as the key stream.
    Vigenere,
    /// Key-permuted plaintext alphabet, straight ciphertext alphabet.
    QuagmireI,
    /// Straight plaintext alphabet, key-permuted ciphertext alphabet.
    QuagmireII,
    /// The same keyword permutes both alphabets.
    QuagmireIII,
    /// Independent keyword permutations for both alphabets.
    QuagmireIV,
    /// Straight alphabets with the Atbash involution on key and output.
    Beaufort,
}

impl CipherKind {
    /// Maps the CLI type id (0 Vigenère, 1-4 Quagmire I-IV, 5 Beaufort).
    pub fn from_type_id(id: u8) -> Option<CipherKind> {
        match id {
            0 => Some(CipherKind::Vigenere),
            1 => Some(CipherKind::QuagmireI),
            2 => Some(CipherKind::QuagmireII),
            3 => Some(CipherKind::QuagmireIII),
            4 => Some(CipherKind::QuagmireIV),
            5 => Some(CipherKind::Beaufort),
            _ => None,
        }
    }

    /// The CLI type id of this kind.
    pub fn type_id(self) -> u8 {
        match self {
            CipherKind::Vigenere => 0,
            CipherKind::QuagmireI => 1,
            CipherKind::QuagmireII => 2,
            CipherKind::QuagmireIII => 3,
            CipherKind::QuagmireIV => 4,
            CipherKind::Beaufort => 5,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            CipherKind::Vigenere => "Vigenere",
            CipherKind::QuagmireI => "Quagmire I",
            CipherKind::QuagmireII => "Quagmire II",
            CipherKind::QuagmireIII => "Quagmire III",
            CipherKind::QuagmireIV => "Quagmire IV",
            CipherKind::Beaufort => "Beaufort",
        }
    }

    /// Whether the Atbash involution applies to key stream and output.
    pub fn is_beaufort(self) -> bool {
        self == CipherKind::Beaufort
    }

    /// Whether the plaintext and ciphertext alphabets share one keyword.
    pub fn shares_keywords(self) -> bool {
        matches!(self, CipherKind::Vigenere | CipherKind::QuagmireIII)
    }
}

/// The straight alphabet `ABCDEFGHIJKLMNOPQRSTUVWXYZ` in index form.
pub fn straight_alphabet() -> [u8; ALPHABET_SIZE] {
    let mut alphabet = [0u8; ALPHABET_SIZE];
    for (i, entry) in alphabet.iter_mut().enumerate() {
        *entry = i as u8;
    }
    alphabet
}

/// Decrypts `cipher` into `out` under `(P, C, W)`.
///
/// Per position: locate the ciphertext symbol in `C`, locate the current
/// cycleword symbol in `C`, and read the plaintext symbol out of `P` at
/// the difference of the two positions.
///
/// The Beaufort transform is an involution, so with `beaufort` set this
/// applies the encrypting form; decrypting and encrypting coincide there,
/// which keeps `decrypt(encrypt(m)) == m` across the whole family.
pub fn decrypt_into(
    out: &mut Vec<u8>,
    cipher: &[u8],
    pt_keyword: &[u8; ALPHABET_SIZE],
    ct_keyword: &[u8; ALPHABET_SIZE],
    cycleword: &[u8],
    beaufort: bool,
) {
    if beaufort {
        encrypt_into(out, cipher, pt_keyword, ct_keyword, cycleword, true);
        return;
    }
    let inv_ct = invert_permutation(ct_keyword);
    out.clear();
    for (i, &symbol) in cipher.iter().enumerate() {
        let keyword_position = inv_ct[symbol as usize] as usize;
        let cycle_symbol = cycleword[i % cycleword.len()] as usize;
        let cycle_position = inv_ct[cycle_symbol] as usize;
        let index = (keyword_position + ALPHABET_SIZE - cycle_position) % ALPHABET_SIZE;
        out.push(pt_keyword[index]);
    }
}

/// Encrypts `text` into `out` under `(P, C, W)`: locate the plaintext
/// symbol in `P`, the cycleword symbol in `C`, and read the ciphertext
/// symbol out of `C` at the sum of the two positions. With `beaufort`
/// set, the cycleword symbol and the output both pass through Atbash.
pub fn encrypt_into(
    out: &mut Vec<u8>,
    text: &[u8],
    pt_keyword: &[u8; ALPHABET_SIZE],
    ct_keyword: &[u8; ALPHABET_SIZE],
    cycleword: &[u8],
    beaufort: bool,
) {
    let inv_pt = invert_permutation(pt_keyword);
    let inv_ct = invert_permutation(ct_keyword);
    out.clear();
    for (i, &symbol) in text.iter().enumerate() {
        let keyword_position = inv_pt[symbol as usize] as usize;
        let mut cycle_symbol = cycleword[i % cycleword.len()];
        if beaufort {
            cycle_symbol = atbash(cycle_symbol);
        }
        let cycle_position = inv_ct[cycle_symbol as usize] as usize;
        let mut output = ct_keyword[(keyword_position + cycle_position) % ALPHABET_SIZE];
        if beaufort {
            output = atbash(output);
        }
        out.push(output);
    }
}

/// Allocating convenience wrapper around [`decrypt_into`].
pub fn decrypt(
    cipher: &[u8],
    pt_keyword: &[u8; ALPHABET_SIZE],
    ct_keyword: &[u8; ALPHABET_SIZE],
    cycleword: &[u8],
    beaufort: bool,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(cipher.len());
    decrypt_into(&mut out, cipher, pt_keyword, ct_keyword, cycleword, beaufort);
    out
}

/// Allocating convenience wrapper around [`encrypt_into`].
pub fn encrypt(
    text: &[u8],
    pt_keyword: &[u8; ALPHABET_SIZE],
    ct_keyword: &[u8; ALPHABET_SIZE],
    cycleword: &[u8],
    beaufort: bool,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    encrypt_into(&mut out, text, pt_keyword, ct_keyword, cycleword, beaufort);
    out
}

/// Reverse-alphabet involution: `A <-> Z`, `B <-> Y`, and so on.
fn atbash(symbol: u8) -> u8 {
    (ALPHABET_SIZE - 1) as u8 - symbol
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{symbols_from_text, text_from_symbols};
    use crate::language::keyword_permutation;

    #[test]
    fn vigenere_lemon_encrypts_to_the_known_ciphertext() {
        let (perm, _) = keyword_permutation("LEMON").unwrap();
        let plaintext = symbols_from_text("THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG").unwrap();
        let cipher = encrypt(&plaintext, &perm, &perm, &perm, false);
        assert_eq!(
            text_from_symbols(&cipher),
            "TIOTYRJVKLJCQWRIOHUDIYRYPSHMMDOOKGS"
        );
        assert_eq!(decrypt(&cipher, &perm, &perm, &perm, false), plaintext);
    }

    #[test]
    fn quagmire3_kryptos_komitet_round_trips() {
        let (perm, _) = keyword_permutation("KRYPTOS").unwrap();
        let cycleword = symbols_from_text("KOMITET").unwrap();
        let plaintext = symbols_from_text("BETWEENSUBTLESHADINGANDTHEABSENCEOFLIGHT").unwrap();
        let cipher = encrypt(&plaintext, &perm, &perm, &cycleword, false);
        assert_eq!(
            text_from_symbols(&cipher),
            "BJVFIVWSKKNUVDHFYTWXENIVPIMFSJEXIJJLQOPB"
        );
        assert_eq!(decrypt(&cipher, &perm, &perm, &cycleword, false), plaintext);
    }

    #[test]
    fn beaufort_is_an_involution() {
        let identity = straight_alphabet();
        let cycleword = symbols_from_text("QUEEN").unwrap();
        let plaintext = symbols_from_text("ATTACKATDAWN").unwrap();
        let cipher = encrypt(&plaintext, &identity, &identity, &cycleword, true);
        // Encrypting the ciphertext again recovers the plaintext.
        assert_eq!(
            encrypt(&cipher, &identity, &identity, &cycleword, true),
            plaintext
        );
        assert_eq!(decrypt(&cipher, &identity, &identity, &cycleword, true), plaintext);
    }

    #[test]
    fn beaufort_matches_the_classical_definition() {
        // Classical Beaufort: ciphertext = key - plaintext (mod 26).
        let identity = straight_alphabet();
        let cipher = encrypt(&[2], &identity, &identity, &[16], true); // key Q, plain C
        assert_eq!(cipher, vec![14]); // 16 - 2 = 14, 'O'
    }

    #[test]
    fn type_ids_round_trip() {
        for id in 0..=5 {
            let kind = CipherKind::from_type_id(id).unwrap();
            assert_eq!(kind.type_id(), id);
        }
        assert!(CipherKind::from_type_id(6).is_none());
    }

    #[test]
    fn quagmire2_uses_the_straight_plaintext_alphabet() {
        let identity = straight_alphabet();
        let (ct_perm, _) = keyword_permutation("PAULBRANDT").unwrap();
        let cycleword = symbols_from_text("BRASS").unwrap();
        let plaintext = symbols_from_text("DONTTHINKABOUTELEPHANTS").unwrap();
        let cipher = encrypt(&plaintext, &identity, &ct_perm, &cycleword, false);
        assert_eq!(decrypt(&cipher, &identity, &ct_perm, &cycleword, false), plaintext);
        assert_ne!(cipher, plaintext);
    }
}
