//! Random state generation and perturbation operators.
//!
//! Keyword permutations carry a block encoding: the first `keyword_len`
//! positions hold the keyword letters in order, the rest hold the unused
//! letters ascending. Every operator here preserves that encoding, which
//! keeps the search space the set of genuine keyword alphabets rather
//! than arbitrary permutations.

use rand::Rng;

use crate::alphabet::ALPHABET_SIZE;

/// Probability of the in-block swap move in [`perturbate_keyword`]; the
/// alternative swaps a keyword letter with one outside the block.
const IN_BLOCK_SWAP_PROBABILITY: f64 = 0.2;

/// A fresh keyword permutation: `keyword_len` distinct random symbols in
/// the leading block, the remaining symbols ascending in the tail.
pub fn random_keyword<R: Rng>(rng: &mut R, keyword_len: usize) -> [u8; ALPHABET_SIZE] {
    let mut keyword = [0u8; ALPHABET_SIZE];
    let mut used = [false; ALPHABET_SIZE];
    for (slot, pick) in keyword
        .iter_mut()
        .zip(rand::seq::index::sample(rng, ALPHABET_SIZE, keyword_len))
    {
        *slot = pick as u8;
        used[pick] = true;
    }
    let mut at = keyword_len;
    for symbol in 0..ALPHABET_SIZE {
        if !used[symbol] {
            keyword[at] = symbol as u8;
            at += 1;
        }
    }
    keyword
}

/// A cycleword of `len` uniform random symbols.
pub fn random_cycleword<R: Rng>(rng: &mut R, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.gen_range(0..ALPHABET_SIZE) as u8).collect()
}

/// Replaces one random cycleword position with a random symbol.
pub fn perturbate_cycleword<R: Rng>(rng: &mut R, cycleword: &mut [u8]) {
    let position = rng.gen_range(0..cycleword.len());
    cycleword[position] = rng.gen_range(0..ALPHABET_SIZE) as u8;
}

/// Perturbs a keyword permutation while preserving its block encoding.
///
/// One move in five swaps two letters within the keyword block. The rest
/// swap a block letter with a tail letter: the tail letter takes the
/// block position, and the displaced letter is re-inserted at the spot
/// that keeps the tail ascending. A full-alphabet block has no tail, so
/// only the in-block swap applies there.
pub fn perturbate_keyword<R: Rng>(
    rng: &mut R,
    state: &mut [u8; ALPHABET_SIZE],
    keyword_len: usize,
) {
    if keyword_len >= ALPHABET_SIZE || rng.gen::<f64>() < IN_BLOCK_SWAP_PROBABILITY {
        let i = rng.gen_range(0..keyword_len);
        let j = rng.gen_range(0..keyword_len);
        state.swap(i, j);
        return;
    }

    let i = pick_index(rng, state, 0, keyword_len);
    let j = pick_index(rng, state, keyword_len, ALPHABET_SIZE);
    let displaced = state[i];
    state[i] = state[j];

    // Close the gap the tail letter left behind.
    for position in j + 1..ALPHABET_SIZE {
        state[position - 1] = state[position];
    }

    // Re-insert the displaced letter where the tail stays ascending.
    for position in keyword_len..ALPHABET_SIZE {
        if state[position] > displaced || position == ALPHABET_SIZE - 1 {
            for shunt in (position + 1..ALPHABET_SIZE).rev() {
                state[shunt] = state[shunt - 1];
            }
            state[position] = displaced;
            break;
        }
    }
}

/// Uniform index selection in `[lo, hi)`.
#[cfg(not(feature = "frequency-weighted-perturbation"))]
fn pick_index<R: Rng>(rng: &mut R, _state: &[u8; ALPHABET_SIZE], lo: usize, hi: usize) -> usize {
    rng.gen_range(lo..hi)
}

/// Index selection in `[lo, hi)` weighted by the English monogram
/// frequency of the letter currently occupying each position.
#[cfg(feature = "frequency-weighted-perturbation")]
fn pick_index<R: Rng>(rng: &mut R, state: &[u8; ALPHABET_SIZE], lo: usize, hi: usize) -> usize {
    use rand::distributions::{Distribution, WeightedIndex};

    use crate::language::ENGLISH_MONOGRAMS;

    let weights = state[lo..hi]
        .iter()
        .map(|&symbol| ENGLISH_MONOGRAMS[symbol as usize]);
    let distribution =
        WeightedIndex::new(weights).expect("monogram frequencies are strictly positive");
    lo + distribution.sample(rng)
}
