//! Iris-code comparison: truncating normalized Hamming distance mapped
//! onto calibrated decision bands.

use crate::config::MatcherConfig;
use crate::{IrisCode, MatchDecision, MatchResult};

/// Compare two iris codes.
///
/// Codes of different lengths are not an error: only the common prefix
/// `min(len_a, len_b)` is compared and the longer tail is ignored. The
/// decision bands are fixed calibration constants from the config, never
/// derived at runtime. Two empty codes compare as a vacuous perfect
/// match (distance 0, confidence 100).
pub fn match_codes(a: &IrisCode, b: &IrisCode, config: &MatcherConfig) -> MatchResult {
    let min_len = a.len().min(b.len());
    let differing_bits = a.bits()[..min_len]
        .iter()
        .zip(&b.bits()[..min_len])
        .filter(|(x, y)| x != y)
        .count();

    let normalized_distance = if min_len == 0 {
        0.0
    } else {
        differing_bits as f64 / min_len as f64
    };

    let decision = if normalized_distance < config.match_threshold {
        MatchDecision::Match
    } else if normalized_distance < config.uncertain_threshold {
        MatchDecision::Uncertain
    } else {
        MatchDecision::NoMatch
    };

    MatchResult {
        differing_bits,
        normalized_distance,
        decision,
        confidence: (1.0 - normalized_distance) * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn code_with_prefix_flips(len: usize, flipped: usize) -> (IrisCode, IrisCode) {
        let a = IrisCode::from_bits(vec![0u8; len]);
        let mut bits = vec![0u8; len];
        for b in bits.iter_mut().take(flipped) {
            *b = 1;
        }
        (a, IrisCode::from_bits(bits))
    }

    #[test]
    fn self_match_is_perfect() {
        let code = IrisCode::from_bits((0..1000).map(|i| (i % 2) as u8).collect());
        let result = match_codes(&code, &code, &MatcherConfig::default());
        assert_eq!(result.differing_bits, 0);
        assert_abs_diff_eq!(result.normalized_distance, 0.0);
        assert_eq!(result.decision, MatchDecision::Match);
        assert_abs_diff_eq!(result.confidence, 100.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let (a, b) = code_with_prefix_flips(1000, 371);
        let cfg = MatcherConfig::default();
        assert_abs_diff_eq!(
            match_codes(&a, &b, &cfg).normalized_distance,
            match_codes(&b, &a, &cfg).normalized_distance
        );
    }

    #[test]
    fn twenty_percent_distance_is_a_match() {
        let (a, b) = code_with_prefix_flips(1000, 200);
        let result = match_codes(&a, &b, &MatcherConfig::default());
        assert_abs_diff_eq!(result.normalized_distance, 0.20);
        assert_eq!(result.decision, MatchDecision::Match);
        assert_abs_diff_eq!(result.confidence, 80.0);
    }

    #[test]
    fn thirty_five_percent_distance_is_uncertain() {
        let (a, b) = code_with_prefix_flips(1000, 350);
        let result = match_codes(&a, &b, &MatcherConfig::default());
        assert_abs_diff_eq!(result.normalized_distance, 0.35);
        assert_eq!(result.decision, MatchDecision::Uncertain);
    }

    #[test]
    fn fifty_percent_distance_is_no_match() {
        let (a, b) = code_with_prefix_flips(1000, 500);
        let result = match_codes(&a, &b, &MatcherConfig::default());
        assert_abs_diff_eq!(result.normalized_distance, 0.50);
        assert_eq!(result.decision, MatchDecision::NoMatch);
        assert_abs_diff_eq!(result.confidence, 50.0);
    }

    #[test]
    fn band_edges_are_half_open() {
        let cfg = MatcherConfig::default();
        let (a, b) = code_with_prefix_flips(100, 32);
        assert_eq!(match_codes(&a, &b, &cfg).decision, MatchDecision::Uncertain);
        let (a, b) = code_with_prefix_flips(100, 40);
        assert_eq!(match_codes(&a, &b, &cfg).decision, MatchDecision::NoMatch);
    }

    #[test]
    fn length_mismatch_compares_common_prefix() {
        let a = IrisCode::from_bits(vec![1u8; 1000]);
        let mut long = vec![1u8; 1000];
        long.extend(vec![0u8; 200]);
        let b = IrisCode::from_bits(long);
        let result = match_codes(&a, &b, &MatcherConfig::default());
        assert_eq!(result.differing_bits, 0);
        assert_eq!(result.decision, MatchDecision::Match);
    }

    #[test]
    fn empty_codes_match_vacuously() {
        let empty = IrisCode::from_bits(Vec::new());
        let result = match_codes(&empty, &empty, &MatcherConfig::default());
        assert_eq!(result.differing_bits, 0);
        assert_abs_diff_eq!(result.normalized_distance, 0.0);
        assert_eq!(result.decision, MatchDecision::Match);
        assert_abs_diff_eq!(result.confidence, 100.0);
    }

    #[test]
    fn custom_bands_shift_decisions() {
        let cfg = MatcherConfig {
            match_threshold: 0.10,
            uncertain_threshold: 0.15,
        };
        let (a, b) = code_with_prefix_flips(1000, 120);
        assert_eq!(match_codes(&a, &b, &cfg).decision, MatchDecision::Uncertain);
    }
}
