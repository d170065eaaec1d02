//! Solver configuration.
//!
//! Every knob the CLI exposes lives in one struct that is threaded, by
//! reference, through the library API. The defaults are the tuning that
//! works well on short ciphers in the 100-character range.

use crate::cipher::CipherKind;
use crate::fitness::Weights;

/// All solver settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Which family member to attack.
    pub cipher_kind: CipherKind,
    /// Swap the encrypt/decrypt roles (the "variant" cipher forms).
    pub variant: bool,
    /// Smallest keyword length the driver enumerates.
    pub min_keyword_len: usize,
    /// One past the largest keyword length the driver enumerates.
    pub max_keyword_len: usize,
    /// Fix the plaintext keyword length instead of enumerating it.
    pub plaintext_keyword_len: Option<usize>,
    /// Fix the ciphertext keyword length instead of enumerating it.
    pub ciphertext_keyword_len: Option<usize>,
    /// Fix the cycleword length, skipping period estimation.
    pub cycleword_len: Option<usize>,
    /// Largest period the estimator considers.
    pub max_cycleword_len: usize,
    /// Z-score a candidate period must clear to be accepted.
    pub n_sigma_threshold: f64,
    /// Absolute mean column IoC a candidate period must clear.
    pub ioc_threshold: f64,
    /// Hill-climbing iterations per restart.
    pub n_hill_climbs: usize,
    /// Shotgun restarts per (period, keyword lengths) cell.
    pub n_restarts: usize,
    /// Probability a restart reseeds from the best state found so far.
    pub backtracking_probability: f64,
    /// Probability an iteration perturbs the keyword(s) rather than the
    /// cycleword.
    pub keyword_permutation_probability: f64,
    /// Probability of accepting a non-improving move.
    pub slip_probability: f64,
    /// Fitness component weights.
    pub weights: Weights,
    /// Seed for the search RNG; `None` seeds from entropy. Fixing it
    /// makes the whole search deterministic.
    pub seed: Option<u64>,
    /// Print per-improvement progress during the climb.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cipher_kind: CipherKind::QuagmireIII,
            variant: false,
            min_keyword_len: 5,
            max_keyword_len: 12,
            plaintext_keyword_len: None,
            ciphertext_keyword_len: None,
            cycleword_len: None,
            max_cycleword_len: 20,
            n_sigma_threshold: 1.0,
            ioc_threshold: 0.047,
            n_hill_climbs: 1000,
            n_restarts: 1,
            backtracking_probability: 0.01,
            keyword_permutation_probability: 0.01,
            slip_probability: 0.0005,
            weights: Weights::default(),
            seed: None,
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_tuning() {
        let config = Config::default();
        assert_eq!(config.cipher_kind, CipherKind::QuagmireIII);
        assert_eq!(config.n_hill_climbs, 1000);
        assert_eq!(config.max_cycleword_len, 20);
        assert_eq!(config.ioc_threshold, 0.047);
        assert_eq!(config.weights.crib, 36.0);
        assert!(config.seed.is_none());
    }
}
