//! Shared fixtures for the unit test modules.

use crate::{
    opinion::{Evidence, Opinion},
    referral::{DirectReferralEvidence, Link},
};

pub fn links(pairs: &[(u64, u64)]) -> Vec<Link> {
    pairs
        .iter()
        .map(|&(from, to)| Link::new(from, to))
        .collect()
}

pub fn evidence_map(entries: &[(u64, u64, f64, f64)]) -> DirectReferralEvidence {
    entries
        .iter()
        .map(|&(from, to, positive, negative)| {
            (Link::new(from, to), Evidence::new(positive, negative))
        })
        .collect()
}

pub fn assert_opinion_near(actual: &Opinion, expected: (f64, f64, f64), tolerance: f64) {
    assert!(
        (actual.belief - expected.0).abs() < tolerance
            && (actual.disbelief - expected.1).abs() < tolerance
            && (actual.uncertainty - expected.2).abs() < tolerance,
        "opinion {} differs from expected {{B: {}, D: {}, U: {}}}",
        actual,
        expected.0,
        expected.1,
        expected.2
    );
}

pub fn assert_unit_sum(opinion: &Opinion) {
    let sum = opinion.belief + opinion.disbelief + opinion.uncertainty;
    assert!(
        (sum - 1.0).abs() < 1e-9,
        "opinion {opinion} is off the unit manifold (sum = {sum})"
    );
}
