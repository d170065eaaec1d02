//! Cycleword length estimation.
//!
//! A polyalphabetic cipher with period `p` splits into `p` interleaved
//! monoalphabetic columns. Columns of the true period (and its multiples)
//! keep the Index of Coincidence of the underlying language, while wrong
//! periods mix alphabets and flatten it. The estimator z-scores the mean
//! column IoC of every candidate period and keeps the outliers.

use log::debug;

use crate::alphabet::index_of_coincidence;

/// Mean IoC over the `period` columns of `text`, unweighted.
pub fn mean_column_ioc(text: &[u8], period: usize) -> f64 {
    let mut total = 0.0;
    let mut column = Vec::with_capacity(text.len() / period + 1);
    for offset in 0..period {
        column.clear();
        column.extend(text.iter().skip(offset).step_by(period));
        total += index_of_coincidence(&column);
    }
    total / period as f64
}

/// Candidate cycleword lengths for `text`, most plausible first.
///
/// A length `p` in `1..=max_len` is accepted when its mean column IoC sits
/// more than `n_sigma_threshold` standard deviations above the mean of all
/// candidates and exceeds `ioc_threshold` in absolute terms. Accepted
/// lengths are ordered by descending z-score. An empty result means no
/// length stood out; the caller can fall back to a user-supplied period.
pub fn estimate_cycleword_lengths(
    text: &[u8],
    max_len: usize,
    n_sigma_threshold: f64,
    ioc_threshold: f64,
) -> Vec<usize> {
    let mean_iocs: Vec<f64> = (1..=max_len)
        .map(|period| mean_column_ioc(text, period))
        .collect();

    let mean = mean_iocs.iter().sum::<f64>() / mean_iocs.len() as f64;
    let variance = mean_iocs
        .iter()
        .map(|ioc| (ioc - mean).powi(2))
        .sum::<f64>()
        / mean_iocs.len() as f64;
    let stddev = variance.sqrt();
    debug!("column IoC mean {mean:.3}, stddev {stddev:.6}");
    if stddev < 1e-12 {
        return Vec::new();
    }

    let mut accepted: Vec<(f64, usize)> = mean_iocs
        .iter()
        .enumerate()
        .filter_map(|(i, &ioc)| {
            let z = (ioc - mean) / stddev;
            (z > n_sigma_threshold && ioc > ioc_threshold).then_some((z, i + 1))
        })
        .collect();
    accepted.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let lengths: Vec<usize> = accepted.into_iter().map(|(_, period)| period).collect();
    debug!("accepted cycleword lengths {lengths:?}");
    lengths
}
