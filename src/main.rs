//! Quagmire CLI entry point.
//!
//! Thin glue around the library: parse flags, load the input files, run
//! the search, and print the result. Exits 0 on success and 1 on any
//! startup or search failure.

use quagmire::cli::parse_cli_args;
use quagmire::cli_pretty_printing::{fatal_error, solution_report, solving_banner};
use quagmire::perform_cracking;

fn main() {
    // Set up human panic for better crash reports
    human_panic::setup_panic!();

    let (inputs, config) = match parse_cli_args() {
        Ok(parsed) => parsed,
        Err(error) => {
            fatal_error(&error);
            std::process::exit(1);
        }
    };

    solving_banner(config.cipher_kind, config.variant);

    let cipher = match quagmire::alphabet::symbols_from_text(&inputs.ciphertext) {
        Ok(cipher) => cipher,
        Err(error) => {
            fatal_error(&error);
            std::process::exit(1);
        }
    };

    match perform_cracking(
        &inputs.ciphertext,
        inputs.cribtext.as_deref(),
        &inputs.ngrams,
        &config,
    ) {
        Ok(solution) => {
            let plaintext = solution.plaintext_text();
            let words = inputs
                .dictionary
                .as_ref()
                .map(|dictionary| dictionary.find_words(&plaintext));
            solution_report(&solution, &cipher, &inputs.cipher_file, words.as_deref());
        }
        Err(error) => {
            fatal_error(&error);
            std::process::exit(1);
        }
    }
}
