//! All user-facing terminal output.
//!
//! Keeping the `println!` calls in one module keeps formatting decisions
//! consistent and the core search code silent. Functions that build
//! strings are separated from the ones that print them so the formats
//! stay testable.

use ansi_term::Colour::Yellow;

use crate::alphabet::text_from_symbols;
use crate::cipher::CipherKind;
use crate::Solution;

/// Announces which cipher is being attacked.
pub fn solving_banner(kind: CipherKind, variant: bool) {
    let variant_prefix = if variant { "variant " } else { "" };
    println!("\nSolving a {}{} cipher.\n", variant_prefix, kind.name());
}

/// Prints a fatal startup error.
pub fn fatal_error(error: &dyn std::fmt::Display) {
    eprintln!("{} {}", Yellow.bold().paint("ERROR:"), error);
}

/// Prints a non-fatal warning.
pub fn warning(message: &str) {
    eprintln!("{} {}", Yellow.bold().paint("WARNING:"), message);
}

/// Everything the climber reports when it finds a new best state.
pub struct SearchProgress {
    /// Seconds since the climb started.
    pub elapsed: f64,
    /// Iteration throughput so far.
    pub iterations_per_second: f64,
    /// Restarts that reseeded from the best state.
    pub backtracks: u64,
    /// Restart the improvement happened in.
    pub restart: usize,
    /// Iteration the improvement happened in.
    pub iteration: usize,
    /// Accepted non-improving moves so far.
    pub slips: u64,
    /// Fraction of iterations rejected by crib contradictions.
    pub contradiction_ratio: f64,
    /// Index of Coincidence of the decryption.
    pub ioc: f64,
    /// Shannon entropy of the decryption.
    pub entropy: f64,
    /// Chi-squared distance of the decryption from English.
    pub chi_squared: f64,
    /// Composite score of the new best state.
    pub score: f64,
    /// Plaintext keyword alphabet.
    pub pt_keyword: String,
    /// Ciphertext keyword alphabet.
    pub ct_keyword: String,
    /// Cycleword.
    pub cycleword: String,
    /// Tableau rows implied by the state.
    pub tableau: Vec<String>,
    /// The trial decryption.
    pub decrypted: String,
}

/// Prints a per-improvement progress block.
pub fn search_progress(progress: &SearchProgress) {
    println!("\n{:.2}\t[sec]", progress.elapsed);
    println!("{:.0}K\t[it/sec]", 1e-3 * progress.iterations_per_second);
    println!("{}\t[backtracks]", progress.backtracks);
    println!("{}\t[restarts]", progress.restart);
    println!("{}\t[iterations]", progress.iteration);
    println!("{}\t[slips]", progress.slips);
    println!("{:.2}\t[contradiction pct]", progress.contradiction_ratio);
    println!("{:.4}\t[IOC]", progress.ioc);
    println!("{:.4}\t[entropy]", progress.entropy);
    println!("{:.2}\t[chi-squared]", progress.chi_squared);
    println!("{:.2}\t[score]", progress.score);
    println!("{}", progress.pt_keyword);
    println!("{}", progress.ct_keyword);
    println!("{}", progress.cycleword);
    println!();
    for row in &progress.tableau {
        println!("{row}");
    }
    println!();
    println!("{}", progress.decrypted);
}

/// Prints the human-readable solution block followed by the summary line.
pub fn solution_report(
    solution: &Solution,
    cipher: &[u8],
    cipher_file: &str,
    words_found: Option<&[&str]>,
) {
    println!("\n{:.2}", solution.score);
    if let Some(words) = words_found {
        for word in words {
            println!("{word}");
        }
        println!("{} words found.", words.len());
    }
    println!("{}", text_from_symbols(cipher));
    println!("{}", text_from_symbols(&solution.plaintext_keyword));
    println!("{}", text_from_symbols(&solution.ciphertext_keyword));
    println!("{}", solution.cycleword_text());
    println!(
        "{}",
        Yellow.bold().paint(text_from_symbols(&solution.plaintext))
    );
    println!("\n{}", summary_line(solution, cipher, cipher_file, words_found));
}

/// The machine-readable summary line consumed by downstream pipelines:
/// `>>> score, [words,] type, file, ciphertext, PT keyword, CT keyword,
/// cycleword, plaintext`.
pub fn summary_line(
    solution: &Solution,
    cipher: &[u8],
    cipher_file: &str,
    words_found: Option<&[&str]>,
) -> String {
    let words_field = match words_found {
        Some(words) => format!("{}, ", words.len()),
        None => String::new(),
    };
    format!(
        ">>> {:.2}, {}{}, {}, {}, {}, {}, {}, {}",
        solution.score,
        words_field,
        solution.cipher_kind.type_id(),
        cipher_file,
        text_from_symbols(cipher),
        text_from_symbols(&solution.plaintext_keyword),
        text_from_symbols(&solution.ciphertext_keyword),
        solution.cycleword_text(),
        text_from_symbols(&solution.plaintext),
    )
}
