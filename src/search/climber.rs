//! The slippery, shotgun-restarted hill climber.
//!
//! One invocation searches a single `(period, keyword lengths)` cell of
//! the space. Restarts reseed from scratch, or backtrack to the best
//! state found so far on a coin flip. Within a restart, each iteration
//! perturbs either the keyword(s) or the cycleword, lets the cribs
//! constrain the cycleword where they can, and accepts the candidate when
//! it scores higher, or occasionally when it does not (a "slip") to
//! escape local maxima.

use std::time::Instant;

use log::trace;
use rand::Rng;

use crate::alphabet::{
    chi_squared, index_of_coincidence, shannon_entropy, text_from_symbols, ALPHABET_SIZE,
};
use crate::cipher::{decrypt_into, encrypt_into, straight_alphabet, CipherKind};
use crate::cli_pretty_printing::{search_progress, SearchProgress};
use crate::cribs::{constrain_cycleword, Crib};
use crate::fitness::{state_score, Weights};
use crate::ngrams::NgramModel;
use crate::search::perturb::{
    perturbate_cycleword, perturbate_keyword, random_cycleword, random_keyword,
};

/// One point in the joint search space.
#[derive(Debug, Clone)]
pub struct SearchState {
    /// Plaintext keyword permutation.
    pub pt_keyword: [u8; ALPHABET_SIZE],
    /// Ciphertext keyword permutation.
    pub ct_keyword: [u8; ALPHABET_SIZE],
    /// Cycleword, one symbol per period position.
    pub cycleword: Vec<u8>,
}

/// Counters describing how a climb went.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClimbStats {
    /// Total iterations across all restarts.
    pub iterations: u64,
    /// Restarts that reseeded from the best state.
    pub backtracks: u64,
    /// Accepted non-improving moves.
    pub slips: u64,
    /// Crib contradictions that forced a keyword perturbation.
    pub contradictions: u64,
}

/// The best state a climb found, with its score and decryption.
#[derive(Debug, Clone)]
pub struct ClimbOutcome {
    /// Composite fitness of `state`.
    pub score: f64,
    /// The best `(P, C, W)` found.
    pub state: SearchState,
    /// Trial decryption under `state`.
    pub decrypted: Vec<u8>,
    /// Run counters.
    pub stats: ClimbStats,
}

/// Tunable climb parameters, shared across all cells of one search.
#[derive(Debug, Clone, Copy)]
pub struct ClimbParams {
    /// Iterations per restart.
    pub n_hill_climbs: usize,
    /// Number of restarts.
    pub n_restarts: usize,
    /// Probability a restart reseeds from the best state.
    pub backtracking_probability: f64,
    /// Probability an iteration perturbs the keyword(s) instead of the
    /// cycleword.
    pub keyword_permutation_probability: f64,
    /// Probability of accepting a non-improving candidate.
    pub slip_probability: f64,
    /// Fitness component weights.
    pub weights: Weights,
}

/// Runs the climber over one `(period, k_P, k_C)` cell.
///
/// # Panics
/// `params.n_restarts` must be at least one; with no restart there is no
/// state to return.
#[allow(clippy::too_many_arguments)]
pub fn shotgun_hill_climber<R: Rng>(
    kind: CipherKind,
    variant: bool,
    cipher: &[u8],
    cribs: &[Crib],
    cycleword_len: usize,
    pt_keyword_len: usize,
    ct_keyword_len: usize,
    ngrams: &NgramModel,
    params: &ClimbParams,
    rng: &mut R,
    verbose: bool,
) -> ClimbOutcome {
    // The Vigenere keyword permutation doubles as the key stream, so its
    // cycle always spans the whole alphabet.
    let cycleword_len = if kind == CipherKind::Vigenere {
        ALPHABET_SIZE
    } else {
        cycleword_len
    };
    let beaufort = kind.is_beaufort();

    let started = Instant::now();
    let mut stats = ClimbStats::default();
    let mut decrypted = Vec::with_capacity(cipher.len());
    let mut best: Option<SearchState> = None;
    let mut best_score = 0.0f64;

    for restart in 0..params.n_restarts {
        let mut current;
        let mut current_score;
        if best_score > 0.0 && rng.gen::<f64>() < params.backtracking_probability {
            stats.backtracks += 1;
            current = best.clone().expect("a positive best score stores a state");
            current_score = best_score;
        } else {
            current = initial_state(kind, rng, cycleword_len, pt_keyword_len, ct_keyword_len);
            current_score = state_score(
                &mut decrypted,
                cipher,
                cribs,
                &current.pt_keyword,
                &current.ct_keyword,
                &current.cycleword,
                variant,
                beaufort,
                ngrams,
                &params.weights,
            );
            if best.is_none() {
                best = Some(current.clone());
                best_score = current_score;
            }
        }

        let mut must_perturb_keyword = false;

        for iteration in 0..params.n_hill_climbs {
            stats.iterations += 1;
            let mut candidate = current.clone();

            let perturb_keyword = kind != CipherKind::Beaufort
                && (must_perturb_keyword
                    || kind == CipherKind::Vigenere
                    || rng.gen::<f64>() < params.keyword_permutation_probability);
            if perturb_keyword {
                perturb_keywords(kind, rng, &mut candidate, pt_keyword_len, ct_keyword_len);
            } else {
                perturbate_cycleword(rng, &mut candidate.cycleword);
            }

            if !matches!(kind, CipherKind::Vigenere | CipherKind::Beaufort) && !cribs.is_empty() {
                must_perturb_keyword = false;
                let contradiction = constrain_cycleword(
                    cipher,
                    cribs,
                    &candidate.pt_keyword,
                    &candidate.ct_keyword,
                    &mut candidate.cycleword,
                    variant,
                );
                if contradiction {
                    // The keyword pair cannot satisfy the cribs; the next
                    // move must change it rather than the cycleword.
                    stats.contradictions += 1;
                    must_perturb_keyword = true;
                }
            }

            let candidate_score = state_score(
                &mut decrypted,
                cipher,
                cribs,
                &candidate.pt_keyword,
                &candidate.ct_keyword,
                &candidate.cycleword,
                variant,
                beaufort,
                ngrams,
                &params.weights,
            );

            if candidate_score > current_score {
                current = candidate;
                current_score = candidate_score;
            } else if rng.gen::<f64>() < params.slip_probability {
                stats.slips += 1;
                current = candidate;
                current_score = candidate_score;
            }

            if current_score > best_score {
                best_score = current_score;
                best = Some(current.clone());
                trace!(
                    "new best {best_score:.4} at restart {restart}, iteration {iteration}"
                );
                if verbose {
                    report_progress(
                        &mut decrypted, kind, variant, cipher, best_score,
                        best.as_ref().expect("best was just set"), cycleword_len, &stats,
                        restart, iteration, &started,
                    );
                }
            }
        }
    }

    let state = best.expect("at least one restart initialises a state");
    if variant {
        encrypt_into(
            &mut decrypted, cipher, &state.pt_keyword, &state.ct_keyword, &state.cycleword,
            beaufort,
        );
    } else {
        decrypt_into(
            &mut decrypted, cipher, &state.pt_keyword, &state.ct_keyword, &state.cycleword,
            beaufort,
        );
    }

    ClimbOutcome { score: best_score, state, decrypted, stats }
}

/// A fresh random state obeying the coupling rules of the cipher kind.
fn initial_state<R: Rng>(
    kind: CipherKind,
    rng: &mut R,
    cycleword_len: usize,
    pt_keyword_len: usize,
    ct_keyword_len: usize,
) -> SearchState {
    match kind {
        CipherKind::Vigenere => {
            let pt_keyword = random_keyword(rng, pt_keyword_len);
            SearchState {
                pt_keyword,
                ct_keyword: pt_keyword,
                cycleword: pt_keyword.to_vec(),
            }
        }
        CipherKind::QuagmireI => SearchState {
            pt_keyword: random_keyword(rng, pt_keyword_len),
            ct_keyword: straight_alphabet(),
            cycleword: random_cycleword(rng, cycleword_len),
        },
        CipherKind::QuagmireII => SearchState {
            pt_keyword: straight_alphabet(),
            ct_keyword: random_keyword(rng, ct_keyword_len),
            cycleword: random_cycleword(rng, cycleword_len),
        },
        CipherKind::QuagmireIII => {
            let pt_keyword = random_keyword(rng, pt_keyword_len);
            SearchState {
                pt_keyword,
                ct_keyword: pt_keyword,
                cycleword: random_cycleword(rng, cycleword_len),
            }
        }
        CipherKind::QuagmireIV => SearchState {
            pt_keyword: random_keyword(rng, pt_keyword_len),
            ct_keyword: random_keyword(rng, ct_keyword_len),
            cycleword: random_cycleword(rng, cycleword_len),
        },
        CipherKind::Beaufort => SearchState {
            pt_keyword: straight_alphabet(),
            ct_keyword: straight_alphabet(),
            cycleword: random_cycleword(rng, cycleword_len),
        },
    }
}

/// Perturbs the keyword(s) of `candidate` under the coupling rules.
/// Beaufort never reaches here; its alphabets are fixed straight.
fn perturb_keywords<R: Rng>(
    kind: CipherKind,
    rng: &mut R,
    candidate: &mut SearchState,
    pt_keyword_len: usize,
    ct_keyword_len: usize,
) {
    match kind {
        CipherKind::Vigenere => {
            perturbate_keyword(rng, &mut candidate.pt_keyword, pt_keyword_len);
            candidate.ct_keyword = candidate.pt_keyword;
            candidate.cycleword = candidate.pt_keyword.to_vec();
        }
        CipherKind::QuagmireI => {
            perturbate_keyword(rng, &mut candidate.pt_keyword, pt_keyword_len);
        }
        CipherKind::QuagmireII => {
            perturbate_keyword(rng, &mut candidate.ct_keyword, ct_keyword_len);
        }
        CipherKind::QuagmireIII => {
            perturbate_keyword(rng, &mut candidate.pt_keyword, pt_keyword_len);
            candidate.ct_keyword = candidate.pt_keyword;
        }
        CipherKind::QuagmireIV => {
            if rng.gen::<f64>() < 0.5 {
                perturbate_keyword(rng, &mut candidate.pt_keyword, pt_keyword_len);
            } else {
                perturbate_keyword(rng, &mut candidate.ct_keyword, ct_keyword_len);
            }
        }
        CipherKind::Beaufort => unreachable!("Beaufort keywords are never perturbed"),
    }
}

/// Recomputes the decryption for a new best state and hands the details
/// to the pretty printer.
#[allow(clippy::too_many_arguments)]
fn report_progress(
    decrypted: &mut Vec<u8>,
    kind: CipherKind,
    variant: bool,
    cipher: &[u8],
    best_score: f64,
    best: &SearchState,
    cycleword_len: usize,
    stats: &ClimbStats,
    restart: usize,
    iteration: usize,
    started: &Instant,
) {
    let beaufort = kind.is_beaufort();
    if variant {
        encrypt_into(
            decrypted, cipher, &best.pt_keyword, &best.ct_keyword, &best.cycleword, beaufort,
        );
    } else {
        decrypt_into(
            decrypted, cipher, &best.pt_keyword, &best.ct_keyword, &best.cycleword, beaufort,
        );
    }
    let elapsed = started.elapsed().as_secs_f64();
    search_progress(&SearchProgress {
        elapsed,
        iterations_per_second: stats.iterations as f64 / elapsed.max(1e-9),
        backtracks: stats.backtracks,
        restart,
        iteration,
        slips: stats.slips,
        contradiction_ratio: stats.contradictions as f64 / stats.iterations as f64,
        ioc: index_of_coincidence(decrypted),
        entropy: shannon_entropy(decrypted),
        chi_squared: chi_squared(decrypted),
        score: best_score,
        pt_keyword: text_from_symbols(&best.pt_keyword),
        ct_keyword: text_from_symbols(&best.ct_keyword),
        cycleword: text_from_symbols(&best.cycleword[..cycleword_len.min(best.cycleword.len())]),
        tableau: tableau_rows(&best.ct_keyword, &best.cycleword, cycleword_len),
        decrypted: text_from_symbols(decrypted),
    });
}

/// The cipher tableau rows implied by a ciphertext keyword and cycleword:
/// one rotation of the keyword alphabet per cycleword position.
fn tableau_rows(
    ct_keyword: &[u8; ALPHABET_SIZE],
    cycleword: &[u8],
    cycleword_len: usize,
) -> Vec<String> {
    cycleword
        .iter()
        .take(cycleword_len)
        .map(|&cycle_symbol| {
            (0..ALPHABET_SIZE)
                .map(|j| {
                    let index = (j + cycle_symbol as usize) % ALPHABET_SIZE;
                    (ct_keyword[index] + b'A') as char
                })
                .collect()
        })
        .collect()
}
