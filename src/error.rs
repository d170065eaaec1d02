//! Unified error type for the solver.
//!
//! One central enum covers the input and startup failure modes, enabling
//! consistent `Result`-based propagation with the `?` operator. Crib
//! contradictions during the search are deliberately not represented
//! here: they are a control signal for the hill climber, not an error.

use std::fmt;

/// Central error type for solver operations.
#[derive(Debug)]
pub enum QuagmireError {
    /// A required input file or flag is absent.
    MissingInput(String),
    /// Ciphertext and crib line differ in length.
    LengthMismatch {
        /// Length of the ciphertext.
        cipher_len: usize,
        /// Length of the crib line.
        crib_len: usize,
    },
    /// A non-letter character where a letter was required.
    InvalidSymbol(char),
    /// The n-gram statistics file could not be used.
    InvalidNgramFile(String),
    /// Some other invalid input (length bounds, unknown cipher type).
    InvalidInput(String),
    /// The period estimator accepted no cycleword length.
    NoCandidatePeriods,
    /// Every (period, keyword length) combination was excluded.
    SearchSpaceEmpty,
    /// I/O errors (file operations).
    Io(std::io::Error),
}

impl fmt::Display for QuagmireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuagmireError::MissingInput(what) => write!(f, "missing input: {what}"),
            QuagmireError::LengthMismatch { cipher_len, crib_len } => write!(
                f,
                "ciphertext has {cipher_len} characters but the crib has {crib_len}"
            ),
            QuagmireError::InvalidSymbol(c) => {
                write!(f, "invalid character {c:?}, expected a letter")
            }
            QuagmireError::InvalidNgramFile(msg) => write!(f, "bad n-gram file: {msg}"),
            QuagmireError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            QuagmireError::NoCandidatePeriods => write!(
                f,
                "no candidate cycleword length stood out; supply one with --cyclewordlen"
            ),
            QuagmireError::SearchSpaceEmpty => write!(
                f,
                "no feasible (period, keyword length) combination; check the cribs and \
                 length constraints"
            ),
            QuagmireError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for QuagmireError {}

impl From<std::io::Error> for QuagmireError {
    fn from(e: std::io::Error) -> Self {
        QuagmireError::Io(e)
    }
}
