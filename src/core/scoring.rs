use crate::models::{LocationArchetype, ScoringWeights, SelectionState};

/// Slack added before flooring so that exact halves computed with binary
/// floating point still round up.
const ROUNDING_EPSILON: f64 = 1e-9;

pub const MAX_SCORE: u8 = 100;

/// Calculate a match score (0-100) for an archetype given the selected criteria
///
/// Scoring formula:
/// score = round(
///     archetype_coverage * 0.4 +   # share of the archetype's criteria selected
///     selection_coverage * 0.4 +   # share of the selection the archetype has
///     base_potential     * 0.2     # hand-assigned prior
/// )
///
/// Coverages are percentages. An empty selection or an archetype without
/// criteria scores 0. Also returns the archetype criteria that matched, in
/// archetype order.
pub fn calculate_match_score(
    archetype: &LocationArchetype,
    selected: &SelectionState,
    weights: &ScoringWeights,
) -> (u8, Vec<String>) {
    if selected.is_empty() || archetype.criteria.is_empty() {
        return (0, Vec::new());
    }

    let matched: Vec<String> = archetype
        .criteria
        .iter()
        .filter(|criterion| selected.contains(criterion))
        .cloned()
        .collect();

    let archetype_coverage = coverage(matched.len(), archetype.criteria.len());
    let selection_coverage = coverage(matched.len(), selected.len());

    let total = archetype_coverage * weights.archetype_coverage
        + selection_coverage * weights.selection_coverage
        + archetype.base_potential_score as f64 * weights.base_potential;

    (round_half_up(total), matched)
}

/// Score with the default weights
pub fn score(archetype: &LocationArchetype, selected: &SelectionState) -> u8 {
    calculate_match_score(archetype, selected, &ScoringWeights::default()).0
}

/// Percentage of `whole` covered by `part` (0-100)
#[inline]
pub fn coverage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

#[inline]
fn round_half_up(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    (value + 0.5 + ROUNDING_EPSILON)
        .floor()
        .clamp(0.0, MAX_SCORE as f64) as u8
}
