//! The search driver.
//!
//! Enumerates every `(period, plaintext keyword length, ciphertext
//! keyword length)` combination the cipher kind and user settings allow,
//! gates each period on crib feasibility, runs the hill climber on the
//! survivors, and keeps the single best solution across all cells.

/// The shotgun hill climber.
pub mod climber;
/// Random state generation and perturbation operators.
pub mod perturb;

use log::{debug, info, warn};
use rand::Rng;

use crate::cipher::CipherKind;
use crate::config::Config;
use crate::cribs::{cribs_satisfied, Crib};
use crate::ngrams::NgramModel;
use crate::Solution;

use self::climber::{shotgun_hill_climber, ClimbParams};

pub use self::climber::{ClimbOutcome, ClimbStats, SearchState};

/// Runs the full search over the candidate periods.
///
/// Returns `None` when the constraints left nothing to search: every
/// keyword-length combination was excluded by the coupling rules, or
/// every period fell to the crib feasibility gate.
pub fn search<R: Rng>(
    cipher: &[u8],
    cribs: &[Crib],
    candidate_periods: &[usize],
    ngrams: &NgramModel,
    config: &Config,
    rng: &mut R,
) -> Option<Solution> {
    let kind = config.cipher_kind;
    let params = ClimbParams {
        n_hill_climbs: config.n_hill_climbs,
        n_restarts: config.n_restarts,
        backtracking_probability: config.backtracking_probability,
        keyword_permutation_probability: config.keyword_permutation_probability,
        slip_probability: config.slip_probability,
        weights: config.weights,
    };

    // Vigenere and Beaufort keywords may be shorter than the usual
    // minimum, and a user-fixed length below the minimum still has to be
    // reachable by the enumeration.
    let min_keyword_len = match kind {
        CipherKind::Vigenere | CipherKind::Beaufort => 1,
        _ => config.min_keyword_len,
    };
    let pt_range = keyword_len_range(min_keyword_len, config.max_keyword_len, config.plaintext_keyword_len);
    let ct_range = keyword_len_range(min_keyword_len, config.max_keyword_len, config.ciphertext_keyword_len);

    let mut best: Option<Solution> = None;

    for &period in candidate_periods {
        if !cribs_satisfied(cipher, cribs, period) {
            warn!("cribs cannot be satisfied at period {period}");
            if cfg!(feature = "crib-check") {
                continue;
            }
        }

        for pt_keyword_len in pt_range.clone() {
            for ct_keyword_len in ct_range.clone() {
                if config
                    .plaintext_keyword_len
                    .is_some_and(|fixed| pt_keyword_len != fixed)
                {
                    continue;
                }
                if config
                    .ciphertext_keyword_len
                    .is_some_and(|fixed| ct_keyword_len != fixed)
                {
                    continue;
                }
                if kind.shares_keywords() && pt_keyword_len != ct_keyword_len {
                    continue;
                }
                // The Vigenere key stream is the keyword itself, so all
                // three lengths must agree.
                if kind == CipherKind::Vigenere
                    && !(period == pt_keyword_len && period == ct_keyword_len)
                {
                    continue;
                }
                if kind == CipherKind::Beaufort && !(pt_keyword_len == 1 && ct_keyword_len == 1) {
                    continue;
                }

                debug!(
                    "climbing period {period}, keyword lengths {pt_keyword_len}/{ct_keyword_len}"
                );
                let outcome = shotgun_hill_climber(
                    kind,
                    config.variant,
                    cipher,
                    cribs,
                    period,
                    pt_keyword_len,
                    ct_keyword_len,
                    ngrams,
                    &params,
                    rng,
                    config.verbose,
                );

                if best.as_ref().map_or(true, |b| outcome.score > b.score) {
                    info!(
                        "best so far {:.4} at period {period}, keyword lengths \
                         {pt_keyword_len}/{ct_keyword_len}",
                        outcome.score
                    );
                    best = Some(Solution {
                        score: outcome.score,
                        cipher_kind: kind,
                        variant: config.variant,
                        cycleword_len: period,
                        plaintext_keyword_len: pt_keyword_len,
                        ciphertext_keyword_len: ct_keyword_len,
                        plaintext_keyword: outcome.state.pt_keyword,
                        ciphertext_keyword: outcome.state.ct_keyword,
                        cycleword: outcome.state.cycleword,
                        plaintext: outcome.decrypted,
                    });
                }
            }
        }
    }

    best
}

/// Half-open keyword-length range, stretched to include a user-fixed
/// length that would otherwise fall outside it.
fn keyword_len_range(
    min_keyword_len: usize,
    max_keyword_len: usize,
    fixed: Option<usize>,
) -> std::ops::Range<usize> {
    match fixed {
        Some(fixed) => min_keyword_len.min(fixed)..max_keyword_len.max(fixed + 1),
        None => min_keyword_len..max_keyword_len,
    }
}
