use crate::models::{LocationArchetype, ScoredArchetype, ScoringWeights, SelectionState};
use crate::core::scoring::calculate_match_score;

/// Result of ranking a catalog
#[derive(Debug, Clone, PartialEq)]
pub struct RankResult {
    pub results: Vec<ScoredArchetype>,
    /// Archetypes with a non-zero score, before any limit was applied
    pub total_scored: usize,
}

/// Ranks location archetypes against a visitor's selected criteria
///
/// # Pipeline Stages
/// 1. Empty selection short-circuit
/// 2. Per-archetype scoring
/// 3. Zero-score filtering
/// 4. Stable descending sort and optional limit
#[derive(Debug, Clone)]
pub struct LocationFinder {
    weights: ScoringWeights,
}

impl LocationFinder {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank all archetypes, best match first
    ///
    /// Equal scores keep their catalog order. Returns an empty list when
    /// nothing is selected.
    pub fn rank(
        &self,
        archetypes: &[LocationArchetype],
        selected: &SelectionState,
    ) -> Vec<ScoredArchetype> {
        self.rank_with_limit(archetypes, selected, None).results
    }

    /// Rank all archetypes and keep at most `limit` of them
    pub fn rank_with_limit(
        &self,
        archetypes: &[LocationArchetype],
        selected: &SelectionState,
        limit: Option<usize>,
    ) -> RankResult {
        if selected.is_empty() {
            return RankResult {
                results: Vec::new(),
                total_scored: 0,
            };
        }

        let mut results: Vec<ScoredArchetype> = archetypes
            .iter()
            .filter_map(|archetype| {
                let (score, matched) = calculate_match_score(archetype, selected, &self.weights);

                if score > 0 {
                    Some(ScoredArchetype::from_archetype(archetype, score, matched))
                } else {
                    None
                }
            })
            .collect();

        // Vec::sort_by is stable, so ties stay in catalog order
        results.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        let total_scored = results.len();
        if let Some(limit) = limit {
            results.truncate(limit);
        }

        tracing::debug!(
            "Ranked {} of {} locations for {} criteria",
            total_scored,
            archetypes.len(),
            selected.len()
        );

        RankResult {
            results,
            total_scored,
        }
    }
}

impl Default for LocationFinder {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Rank with the default weights
pub fn rank(archetypes: &[LocationArchetype], selected: &SelectionState) -> Vec<ScoredArchetype> {
    LocationFinder::with_default_weights().rank(archetypes, selected)
}
