//! End-to-end scenarios against the public API.

use quagmire::alphabet::{index_of_coincidence, symbols_from_text, text_from_symbols, ALPHABET_SIZE};
use quagmire::cipher::{decrypt, encrypt, straight_alphabet, CipherKind};
use quagmire::config::Config;
use quagmire::error::QuagmireError;
use quagmire::fitness::Weights;
use quagmire::language::keyword_permutation;
use quagmire::ngrams::NgramModel;
use quagmire::period::estimate_cycleword_lengths;
use quagmire::perform_cracking;

/// 400 characters of English prose, used as period-estimation and
/// statistics material.
const ENGLISH_400: &str = concat!(
    "NMENTBECOMESDESTRUCTIVEOFTHESEENDSITISTHERIGHTOFTHEPEOPLETOALTERORTO",
    "ABOLISHITANDTOINSTITUTENEWGOVERNMENTLAYINGITSFOUNDATIONONSUCHPRINCIP",
    "LESANDORGANIZINGITSPOWERSINSUCHFORMASTOTHEMSHALLSEEMMOSTLIKELYTOEFFE",
    "CTTHEIRSAFETYANDHAPPINESSPRUDENCEINDEEDWILLDICTATETHATGOVERNMENTSLON",
    "GESTABLISHEDSHOULDNOTBECHANGEDFORLIGHTANDTRANSIENTCAUSESANDACCORDING",
    "LYALLEXPERIENCEHATHSHEWNTHATMANKINDAREMOREDISPOSEDTOSUFFERWH"
);

/// `ENGLISH_400` enciphered with straight alphabets and the period-7
/// cycleword `JOURNEY`.
const ENGLISH_400_PERIOD_7: &str = concat!(
    "WAYEGFCLCGVFHCBHLLPXGESIWGLCBSYEQWGCWMKUIPRUBKBJRQSJVBTJNHIRYXCACLKB",
    "EZXZCJUMRJBXKBMLBHCKHXCWSQXBZCABGVAXJJMCETMRBTILAHYCWIEBRQDQBGEMLLWJ",
    "CRWYWRIITELRNCETMRBDINRVQRBMLPLDXFGRFXMCVYDFLYUZMVRQKXGNCVOCUMNFRJDN",
    "QNKUIGAGUWRXWJBXYNTNRBYJFTPDRYEPIGWRYVQAGUZXZPXYCSNYNXEXJYIAQCWHMCBR",
    "ENGNROPGBVYUFLMDZXEBXZNQBRAKCMTIIYMEQHUEQXPJBMZRRRLOOJRWYWRUTPSPMWHX",
    "YCYUZYOCIPRSHTRLYCVMYRALCVUKZELTWHUNVCVCLVQMQYCMVQXMBIZWRVUQ"
);

fn bigram_model() -> NgramModel {
    NgramModel::from_counts(
        2,
        [
            ("TH", 116997844),
            ("HE", 100689263),
            ("IN", 87674002),
            ("ER", 77134382),
            ("AN", 69775179),
            ("RE", 60923600),
            ("ON", 56915252),
            ("ST", 54018399),
            ("EN", 48991276),
            ("AT", 48274564),
        ],
    )
    .unwrap()
}

#[test]
fn vigenere_lemon_round_trips() {
    let (perm, keyword_len) = keyword_permutation("LEMON").unwrap();
    assert_eq!(keyword_len, 5);
    let plaintext = symbols_from_text("THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG").unwrap();
    let cipher = encrypt(&plaintext, &perm, &perm, &perm, false);
    assert_eq!(decrypt(&cipher, &perm, &perm, &perm, false), plaintext);
    assert_eq!(encrypt(&decrypt(&cipher, &perm, &perm, &perm, false), &perm, &perm, &perm, false), cipher);
}

#[test]
fn quagmire3_decrypts_under_the_known_key() {
    let (perm, _) = keyword_permutation("KRYPTOS").unwrap();
    assert_eq!(text_from_symbols(&perm), "KRYPTOSABCDEFGHIJLMNQUVWXZ");
    let cycleword = symbols_from_text("KOMITET").unwrap();
    let cipher = symbols_from_text("BJVFIVWSKKNUVDHFYTWXENIVPIMFSJEXIJJLQOPB").unwrap();
    let decrypted = decrypt(&cipher, &perm, &perm, &cycleword, false);
    assert_eq!(
        text_from_symbols(&decrypted),
        "BETWEENSUBTLESHADINGANDTHEABSENCEOFLIGHT"
    );
}

#[test]
fn round_trip_holds_for_every_kind() {
    let (pt_perm, _) = keyword_permutation("PARSIMONY").unwrap();
    let (ct_perm, _) = keyword_permutation("GOLDFINCH").unwrap();
    let identity = straight_alphabet();
    let cycleword = symbols_from_text("VECTOR").unwrap();
    let message = symbols_from_text("ONCEUPONAMIDNIGHTDREARYWHILEIPONDERED").unwrap();

    // (P, C, beaufort) triples satisfying each kind's coupling rules.
    let cases = [
        (pt_perm, pt_perm, false),  // Vigenere / Quagmire III shape
        (pt_perm, identity, false), // Quagmire I
        (identity, ct_perm, false), // Quagmire II
        (pt_perm, ct_perm, false),  // Quagmire IV
        (identity, identity, true), // Beaufort
    ];
    for (pt_keyword, ct_keyword, beaufort) in cases {
        let cipher = encrypt(&message, &pt_keyword, &ct_keyword, &cycleword, beaufort);
        assert_eq!(
            decrypt(&cipher, &pt_keyword, &ct_keyword, &cycleword, beaufort),
            message
        );
        let decrypted = decrypt(&message, &pt_keyword, &ct_keyword, &cycleword, beaufort);
        assert_eq!(
            encrypt(&decrypted, &pt_keyword, &ct_keyword, &cycleword, beaufort),
            message
        );
    }
}

#[test]
fn period_estimator_ranks_the_true_period_first() {
    let plaintext = symbols_from_text(ENGLISH_400).unwrap();
    assert_eq!(plaintext.len(), 400);
    let identity = straight_alphabet();
    let cycleword = symbols_from_text("JOURNEY").unwrap();
    let cipher = encrypt(&plaintext, &identity, &identity, &cycleword, false);
    assert_eq!(text_from_symbols(&cipher), ENGLISH_400_PERIOD_7);

    let lengths = estimate_cycleword_lengths(&cipher, 20, 1.0, 0.047);
    assert_eq!(lengths, vec![7, 14]);
}

#[test]
fn infeasible_cribs_reject_the_period() {
    // Column 0 of period 2 would need A -> X and A -> Y at once.
    let config = Config {
        cycleword_len: Some(2),
        n_hill_climbs: 10,
        seed: Some(1),
        ..Config::default()
    };
    let result = perform_cracking("AAAA", Some("X_Y_"), &bigram_model(), &config);
    if cfg!(feature = "crib-check") {
        assert!(matches!(result, Err(QuagmireError::SearchSpaceEmpty)));
    } else {
        assert!(result.is_ok());
    }
}

#[test]
fn english_ioc_sits_near_the_calibration_point() {
    let english = symbols_from_text(ENGLISH_400).unwrap();
    let scaled = ALPHABET_SIZE as f64 * index_of_coincidence(&english);
    assert!((1.6..1.85).contains(&scaled), "scaled IoC was {scaled}");

    let uniform = symbols_from_text(&"ABCDEFGHIJKLMNOPQRSTUVWXYZ".repeat(10)).unwrap();
    let uniform_scaled = ALPHABET_SIZE as f64 * index_of_coincidence(&uniform);
    assert!((0.85..1.0).contains(&uniform_scaled), "was {uniform_scaled}");
}

#[test]
fn beaufort_with_a_full_crib_is_solved_exactly() {
    let plaintext = "THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG";
    // Enciphered with the single-symbol Beaufort cycleword Q.
    let ciphertext = "XJMAWIOGPZCUDLCTHWEBYCVMZXJMFQRSNCK";

    let config = Config {
        cipher_kind: CipherKind::Beaufort,
        cycleword_len: Some(1),
        n_hill_climbs: 1000,
        n_restarts: 2,
        seed: Some(3),
        // The crib fully determines the answer; keep the sparse test
        // n-gram table from outvoting it.
        weights: Weights { ngram: 0.0, crib: 36.0, ioc: 1.0, entropy: 1.0 },
        ..Config::default()
    };
    let solution =
        perform_cracking(ciphertext, Some(plaintext), &bigram_model(), &config).unwrap();
    assert_eq!(solution.plaintext_text(), plaintext);
    assert_eq!(solution.cycleword_text(), "Q");
    assert_eq!(solution.plaintext_keyword_len, 1);
    assert_eq!(solution.ciphertext_keyword_len, 1);
}

#[test]
fn a_fixed_seed_makes_the_search_deterministic() {
    let config = Config {
        cipher_kind: CipherKind::QuagmireIII,
        cycleword_len: Some(3),
        plaintext_keyword_len: Some(5),
        ciphertext_keyword_len: Some(5),
        n_hill_climbs: 200,
        seed: Some(17),
        ..Config::default()
    };
    let ciphertext = "QHLWJAMENWJXQEHUWDSKEIGNBTVRNIQEMOSE";
    let first = perform_cracking(ciphertext, None, &bigram_model(), &config).unwrap();
    let second = perform_cracking(ciphertext, None, &bigram_model(), &config).unwrap();
    assert_eq!(first.score, second.score);
    assert_eq!(first.plaintext, second.plaintext);
    assert_eq!(first.cycleword, second.cycleword);
    assert_eq!(first.plaintext_keyword, second.plaintext_keyword);
}

#[test]
fn quagmire3_search_with_cribs_returns_a_scored_solution() {
    let (perm, _) = keyword_permutation("KRYPTOS").unwrap();
    let cycleword = symbols_from_text("OIL").unwrap();
    let plaintext = symbols_from_text("SLOWLYDESPARATLYSLOWLYTHEREMAINSOFPASSAGEDEBRIS").unwrap();
    let cipher = encrypt(&plaintext, &perm, &perm, &cycleword, false);
    let ciphertext = text_from_symbols(&cipher);
    // Crib the first twelve positions.
    let mut cribtext = text_from_symbols(&plaintext[..12]);
    cribtext.push_str(&"_".repeat(plaintext.len() - 12));

    let config = Config {
        cipher_kind: CipherKind::QuagmireIII,
        cycleword_len: Some(3),
        n_hill_climbs: 300,
        n_restarts: 3,
        seed: Some(23),
        ..Config::default()
    };
    let solution =
        perform_cracking(&ciphertext, Some(&cribtext), &bigram_model(), &config).unwrap();
    assert!(solution.score > 0.0);
    assert_eq!(solution.cycleword_len, 3);
    // The solution's plaintext is the decryption of the cipher under the
    // solution's own key material.
    let again = decrypt(
        &cipher,
        &solution.plaintext_keyword,
        &solution.ciphertext_keyword,
        &solution.cycleword,
        false,
    );
    assert_eq!(again, solution.plaintext);
}

#[test]
fn ngram_statistics_load_from_a_file() {
    let model = NgramModel::from_file(
        std::path::Path::new("tests/data/english_bigrams.txt"),
        2,
    )
    .unwrap();
    assert_eq!(model.size(), 2);
    let the = symbols_from_text("THETHE").unwrap();
    let junk = symbols_from_text("QZQZQZ").unwrap();
    assert!(model.score(&the) > model.score(&junk));
}
