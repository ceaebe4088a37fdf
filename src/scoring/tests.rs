use super::*;
use crate::corpus::FaqEntry;
use crate::index::RetrievedCandidate;

fn candidates(sims: &[f32]) -> Vec<RetrievedCandidate> {
    sims.iter()
        .enumerate()
        .map(|(i, s)| {
            RetrievedCandidate::new(
                FaqEntry::new(format!("q{i}"), format!("a{i}"), "c"),
                *s,
                i,
            )
        })
        .collect()
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_empty_candidates_score_zero() {
    assert_eq!(ConfidenceScorer::default().assess(&[]), 0.0);
}

#[test]
fn test_single_strong_match_is_not_boosted() {
    let scorer = ConfidenceScorer::default();
    assert_close(scorer.assess(&candidates(&[0.9, 0.4, 0.2])), 0.9);
}

#[test]
fn test_two_high_matches_are_boosted() {
    let scorer = ConfidenceScorer::default();
    assert_close(scorer.assess(&candidates(&[0.75, 0.65, 0.3])), 0.85);
}

#[test]
fn test_boost_does_not_scale_with_count() {
    let scorer = ConfidenceScorer::default();
    assert_close(scorer.assess(&candidates(&[0.7, 0.65, 0.62])), 0.8);
}

#[test]
fn test_boost_is_capped_at_one() {
    let scorer = ConfidenceScorer::default();
    assert_close(scorer.assess(&candidates(&[0.97, 0.95, 0.9])), 1.0);
}

#[test]
fn test_high_line_is_strict() {
    let scorer = ConfidenceScorer::default();
    assert_close(scorer.assess(&candidates(&[0.7, 0.6])), 0.7);
}

#[test]
fn test_uses_first_candidate_without_resorting() {
    let scorer = ConfidenceScorer::default();
    assert_close(scorer.assess(&candidates(&[0.3, 0.5])), 0.3);
}

#[test]
fn test_single_candidate_below_line() {
    let scorer = ConfidenceScorer::default();
    assert_close(scorer.assess(&candidates(&[0.3])), 0.3);
}

#[test]
fn test_output_stays_in_unit_range() {
    let scorer = ConfidenceScorer::default();
    let grids: [&[f32]; 5] = [
        &[1.0, 1.0, 1.0],
        &[0.99, 0.61],
        &[0.0],
        &[0.61, 0.61, 0.61],
        &[0.8, 0.2, 0.1],
    ];
    for sims in grids {
        let c = scorer.assess(&candidates(sims));
        assert!((0.0..=1.0).contains(&c), "{sims:?} scored {c}");
    }
}

#[test]
fn test_custom_parameters() {
    let scorer = ConfidenceScorer::new(0.5, 0.2);
    assert_close(scorer.assess(&candidates(&[0.55, 0.52])), 0.75);
}

#[test]
fn test_negative_similarity_floors_at_zero() {
    let scorer = ConfidenceScorer::default();
    assert_eq!(scorer.assess(&candidates(&[-0.4, -0.9])), 0.0);
}
