// Unit tests for Location Finder

use location_finder::catalog::Catalog;
use location_finder::core::{calculate_match_score, rank, score, LocationFinder};
use location_finder::models::{LocationArchetype, ScoringWeights, SelectionState};

fn builtin() -> Catalog {
    Catalog::builtin().expect("builtin catalog is valid")
}

/// Every subset of the criteria catalog, including the empty one
fn all_selections(catalog: &Catalog) -> Vec<SelectionState> {
    let ids: Vec<&str> = catalog.criteria().iter().map(|c| c.id.as_str()).collect();
    (0u32..(1 << ids.len()))
        .map(|mask| {
            ids.iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << *i) != 0)
                .map(|(_, id)| *id)
                .collect()
        })
        .collect()
}

#[test]
fn test_transit_center_example() {
    let catalog = builtin();
    let transit = catalog.location("transit-center").expect("transit center present");
    let selected: SelectionState = ["high-traffic", "captive-audience", "extended-hours"]
        .into_iter()
        .collect();

    assert_eq!(score(transit, &selected), 83);
}

#[test]
fn test_scores_stay_in_bounds() {
    let catalog = builtin();
    let weights = ScoringWeights::default();

    for selected in all_selections(&catalog).iter().filter(|s| !s.is_empty()) {
        for archetype in catalog.locations() {
            let (score, matched) = calculate_match_score(archetype, selected, &weights);
            assert!(score <= 100, "{} scored {}", archetype.id, score);
            assert!(matched.len() <= selected.len());
        }
    }
}

#[test]
fn test_full_match_formula() {
    let catalog = builtin();

    for archetype in catalog.locations() {
        let selected: SelectionState = archetype.criteria.iter().cloned().collect();
        // 80 + base * 0.2, rounded half up, in integer arithmetic
        let expected = (800 + 2 * archetype.base_potential_score as u32 + 5) / 10;

        assert_eq!(score(archetype, &selected) as u32, expected, "{}", archetype.id);
    }
}

#[test]
fn test_adding_owned_criterion_never_lowers_score() {
    let catalog = builtin();

    for selected in all_selections(&catalog).iter().filter(|s| !s.is_empty()) {
        for archetype in catalog.locations() {
            let before = score(archetype, selected);
            for criterion in archetype.criteria.iter().filter(|c| !selected.contains(c)) {
                let mut grown = selected.clone();
                grown.toggle(criterion);
                assert!(
                    score(archetype, &grown) >= before,
                    "{} dropped after adding {}",
                    archetype.id,
                    criterion
                );
            }
        }
    }
}

#[test]
fn test_empty_selection_ranks_nothing() {
    let catalog = builtin();
    assert!(rank(catalog.locations(), &SelectionState::new()).is_empty());
}

#[test]
fn test_rank_order_is_descending_and_stable() {
    let catalog = builtin();
    let position = |id: &str| {
        catalog
            .locations()
            .iter()
            .position(|l| l.id == id)
            .expect("ranked id comes from the catalog")
    };

    for selected in all_selections(&catalog).iter().step_by(7) {
        let ranked = rank(catalog.locations(), selected);
        for pair in ranked.windows(2) {
            assert!(pair[0].match_score >= pair[1].match_score);
            if pair[0].match_score == pair[1].match_score {
                assert!(position(&pair[0].id) < position(&pair[1].id));
            }
        }
    }
}

#[test]
fn test_rank_is_idempotent() {
    let catalog = builtin();
    let finder = LocationFinder::with_default_weights();
    let selected: SelectionState = ["large-workforce", "limited-breaks", "no-competition"]
        .into_iter()
        .collect();

    let first = finder.rank(catalog.locations(), &selected);
    let second = finder.rank(catalog.locations(), &selected);

    assert_eq!(first, second);
    assert_eq!(first[0].id, "warehouse");
}

#[test]
fn test_unknown_selection_ids_only_dilute() {
    let archetype = LocationArchetype {
        id: "kiosk".to_string(),
        name: "Kiosk".to_string(),
        description: String::new(),
        base_potential_score: 50,
        criteria: vec!["a".to_string()],
    };
    let exact: SelectionState = ["a"].into_iter().collect();
    let diluted: SelectionState = ["a", "zzz"].into_iter().collect();

    // 100 * 0.4 + 100 * 0.4 + 10 vs 100 * 0.4 + 50 * 0.4 + 10
    assert_eq!(score(&archetype, &exact), 90);
    assert_eq!(score(&archetype, &diluted), 70);
}
