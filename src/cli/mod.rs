//! CLI argument parsing and input file loading.
//!
//! This layer turns flags and files into the core inputs: ciphertext and
//! crib strings, an [`NgramModel`], an optional [`Dictionary`], and a
//! [`Config`]. Nothing here touches the search itself.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::trace;

use crate::cipher::CipherKind;
use crate::config::Config;
use crate::dictionary::Dictionary;
use crate::error::QuagmireError;
use crate::fitness::Weights;
use crate::ngrams::NgramModel;

/// The struct for Clap CLI arguments.
#[derive(Parser)]
#[command(about, long_about = None)]
pub struct Opts {
    /// Cipher type: 0 Vigenere, 1-4 Quagmire I-IV, 5 Beaufort
    #[arg(long = "type", default_value_t = 3)]
    cipher_type: u8,

    /// Ciphertext file; only the first whitespace-delimited token is read
    #[arg(long)]
    cipher: PathBuf,

    /// Crib file: one line the same length as the ciphertext, with `_`
    /// at unknown positions
    #[arg(long)]
    crib: Option<PathBuf>,

    /// N-gram size of the statistics file
    #[arg(long)]
    ngramsize: usize,

    /// N-gram statistics file, one `NGRAM<tab>COUNT` line per n-gram
    #[arg(long)]
    ngramfile: PathBuf,

    /// One past the largest keyword length to enumerate
    #[arg(long)]
    maxkeywordlen: Option<usize>,

    /// Fix both keyword lengths
    #[arg(long)]
    keywordlen: Option<usize>,

    /// Fix the plaintext keyword length
    #[arg(long)]
    plaintextkeywordlen: Option<usize>,

    /// Fix the ciphertext keyword length
    #[arg(long)]
    ciphertextkeywordlen: Option<usize>,

    /// Largest cycleword length the period estimator considers
    #[arg(long)]
    maxcyclewordlen: Option<usize>,

    /// Fix the cycleword length, skipping period estimation (0 unsets)
    #[arg(long)]
    cyclewordlen: Option<usize>,

    /// Z-score threshold for accepting a candidate period
    #[arg(long)]
    nsigmathreshold: Option<f64>,

    /// Absolute mean column IoC threshold for accepting a period
    #[arg(long)]
    iocthreshold: Option<f64>,

    /// Hill-climbing iterations per restart
    #[arg(long)]
    nhillclimbs: Option<usize>,

    /// Shotgun restarts per search cell
    #[arg(long)]
    nrestarts: Option<usize>,

    /// Probability of reseeding a restart from the best state
    #[arg(long)]
    backtrackprob: Option<f64>,

    /// Probability of perturbing the keyword instead of the cycleword
    #[arg(long)]
    keywordpermprob: Option<f64>,

    /// Probability of accepting a non-improving move
    #[arg(long)]
    slipprob: Option<f64>,

    /// Weight of the n-gram score
    #[arg(long)]
    weightngram: Option<f64>,

    /// Weight of the crib match score
    #[arg(long)]
    weightcrib: Option<f64>,

    /// Weight of the IoC proximity score
    #[arg(long)]
    weightioc: Option<f64>,

    /// Weight of the entropy proximity score
    #[arg(long)]
    weightentropy: Option<f64>,

    /// Attack the variant form (key encrypts instead of decrypts)
    #[arg(long)]
    variant: bool,

    /// Dictionary file for post-hoc word spotting, one word per line
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Seed the search RNG for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// A level of verbosity, and can be used multiple times
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Loaded input files, ready for the library API.
pub struct RunInputs {
    /// The ciphertext token.
    pub ciphertext: String,
    /// The crib line, if a crib file was given.
    pub cribtext: Option<String>,
    /// The n-gram model.
    pub ngrams: NgramModel,
    /// The word-spotting dictionary, if one was given.
    pub dictionary: Option<Dictionary>,
    /// Display name of the ciphertext file, for the summary line.
    pub cipher_file: String,
}

/// Parses CLI arguments, initialises logging, and loads every input file.
///
/// # Errors
/// Any missing or malformed input file, and an unknown cipher type id.
pub fn parse_cli_args() -> Result<(RunInputs, Config), QuagmireError> {
    let opts = Opts::parse();
    let min_log_level = match opts.verbose {
        0 => "Warn",
        1 => "Info",
        2 => "Debug",
        _ => "Trace",
    };
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, min_log_level),
    );
    trace!("parsed CLI arguments");
    opts_into_inputs(opts)
}

/// Reads the first whitespace-delimited token of a file. Ciphertext and
/// crib files keep anything after the first token for notes, which the
/// solver ignores.
///
/// # Errors
/// The file must exist and contain at least one token.
pub fn read_first_token(path: &Path) -> Result<String, QuagmireError> {
    if !path.exists() {
        return Err(QuagmireError::MissingInput(format!(
            "file '{}' not found",
            path.display()
        )));
    }
    let contents = fs::read_to_string(path)?;
    contents
        .split_whitespace()
        .next()
        .map(str::to_owned)
        .ok_or_else(|| QuagmireError::MissingInput(format!("file '{}' is empty", path.display())))
}

/// Turns parsed options into loaded inputs and a `Config`.
fn opts_into_inputs(opts: Opts) -> Result<(RunInputs, Config), QuagmireError> {
    let cipher_kind = CipherKind::from_type_id(opts.cipher_type).ok_or_else(|| {
        QuagmireError::InvalidInput(format!(
            "unknown cipher type {}, expected 0 to 5",
            opts.cipher_type
        ))
    })?;

    let ciphertext = read_first_token(&opts.cipher)?;
    let cribtext = opts.crib.as_deref().map(read_first_token).transpose()?;
    if !opts.ngramfile.exists() {
        return Err(QuagmireError::MissingInput(format!(
            "file '{}' not found",
            opts.ngramfile.display()
        )));
    }
    let ngrams = NgramModel::from_file(&opts.ngramfile, opts.ngramsize)?;
    let dictionary = opts
        .dictionary
        .as_deref()
        .map(Dictionary::from_file)
        .transpose()?;

    let mut config = Config {
        cipher_kind,
        variant: opts.variant,
        seed: opts.seed,
        verbose: opts.verbose > 0,
        ..Config::default()
    };
    if let Some(max) = opts.maxkeywordlen {
        config.max_keyword_len = max;
    }
    if let Some(fixed) = opts.keywordlen {
        config.plaintext_keyword_len = Some(fixed);
        config.ciphertext_keyword_len = Some(fixed);
    }
    if let Some(fixed) = opts.plaintextkeywordlen {
        config.plaintext_keyword_len = Some(fixed);
    }
    if let Some(fixed) = opts.ciphertextkeywordlen {
        config.ciphertext_keyword_len = Some(fixed);
    }
    if let Some(max) = opts.maxcyclewordlen {
        config.max_cycleword_len = max;
    }
    // A zero length means "estimate after all".
    config.cycleword_len = opts.cyclewordlen.filter(|&len| len > 0);
    if let Some(threshold) = opts.nsigmathreshold {
        config.n_sigma_threshold = threshold;
    }
    if let Some(threshold) = opts.iocthreshold {
        config.ioc_threshold = threshold;
    }
    if let Some(n) = opts.nhillclimbs {
        config.n_hill_climbs = n;
    }
    if let Some(n) = opts.nrestarts {
        config.n_restarts = n;
    }
    if let Some(probability) = opts.backtrackprob {
        config.backtracking_probability = probability;
    }
    if let Some(probability) = opts.keywordpermprob {
        config.keyword_permutation_probability = probability;
    }
    if let Some(probability) = opts.slipprob {
        config.slip_probability = probability;
    }
    config.weights = Weights {
        ngram: opts.weightngram.unwrap_or(config.weights.ngram),
        crib: opts.weightcrib.unwrap_or(config.weights.crib),
        ioc: opts.weightioc.unwrap_or(config.weights.ioc),
        entropy: opts.weightentropy.unwrap_or(config.weights.entropy),
    };

    let cipher_file = opts.cipher.display().to_string();
    Ok((
        RunInputs { ciphertext, cribtext, ngrams, dictionary, cipher_file },
        config,
    ))
}
