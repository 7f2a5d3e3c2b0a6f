// Criterion benchmarks for Location Finder

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use location_finder::catalog::Catalog;
use location_finder::core::{calculate_match_score, LocationFinder};
use location_finder::models::{Criterion as SiteCriterion, LocationArchetype, ScoringWeights, SelectionState};

fn create_catalog(size: usize, criteria_count: usize) -> Catalog {
    let criteria: Vec<SiteCriterion> = (0..criteria_count)
        .map(|i| SiteCriterion {
            id: format!("criterion-{}", i),
            label: format!("Criterion {}", i),
            description: String::new(),
        })
        .collect();

    let locations: Vec<LocationArchetype> = (0..size)
        .map(|i| LocationArchetype {
            id: format!("location-{}", i),
            name: format!("Location {}", i),
            description: String::new(),
            base_potential_score: (50 + i % 50) as u8,
            criteria: (0..criteria_count)
                .filter(|c| (i + c) % 3 != 0)
                .map(|c| format!("criterion-{}", c))
                .collect(),
        })
        .collect();

    Catalog::from_parts(criteria, locations).expect("generated catalog is valid")
}

fn create_selection(count: usize) -> SelectionState {
    (0..count).map(|c| format!("criterion-{}", c)).collect()
}

fn bench_score(c: &mut Criterion) {
    let catalog = Catalog::builtin().expect("builtin catalog");
    let transit = catalog.location("transit-center").expect("transit center");
    let selected: SelectionState = ["high-traffic", "captive-audience", "extended-hours"]
        .into_iter()
        .collect();
    let weights = ScoringWeights::default();

    c.bench_function("calculate_match_score", |b| {
        b.iter(|| calculate_match_score(black_box(transit), black_box(&selected), &weights));
    });
}

fn bench_rank_builtin(c: &mut Criterion) {
    let catalog = Catalog::builtin().expect("builtin catalog");
    let finder = LocationFinder::with_default_weights();
    let selected: SelectionState = ["large-workforce", "limited-breaks", "no-competition", "secure-indoor"]
        .into_iter()
        .collect();

    c.bench_function("rank_builtin_catalog", |b| {
        b.iter(|| finder.rank(black_box(catalog.locations()), black_box(&selected)));
    });
}

fn bench_rank_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_scaling");
    let finder = LocationFinder::with_default_weights();
    let selected = create_selection(8);

    for size in [12, 100, 1000].iter() {
        let catalog = create_catalog(*size, 24);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| finder.rank(black_box(catalog.locations()), black_box(&selected)));
        });
    }

    group.finish();
}

fn bench_catalog_load(c: &mut Criterion) {
    c.bench_function("catalog_builtin_load", |b| {
        b.iter(|| Catalog::builtin().expect("builtin catalog"));
    });
}

criterion_group!(
    benches,
    bench_score,
    bench_rank_builtin,
    bench_rank_scaling,
    bench_catalog_load
);
criterion_main!(benches);
