use std::collections::HashSet;

use eco_meal_finder_rs::models::{Catalog, ImpactVector, MealSet};
use eco_meal_finder_rs::planner::{
    SearchConfig, SearchLimits, enumerate_meals, search_meal_sets, search_meal_sets_parallel,
    search_meal_sets_with,
};
use eco_meal_finder_rs::state::default_tables;

fn catalog() -> Catalog {
    enumerate_meals(&default_tables(), 720.0).unwrap().catalog
}

fn config(set_size: usize, threshold: [f64; 5]) -> SearchConfig {
    SearchConfig {
        set_size,
        threshold: ImpactVector::from_array(threshold),
        limits: SearchLimits::default(),
    }
}

fn key(set: &MealSet) -> Vec<String> {
    set.iter().map(|m| m.label()).collect()
}

#[test]
fn test_pairs_under_default_threshold() {
    let catalog = catalog();
    let cfg = config(2, [3.0, 2.0, 10.0, 6.0, 2000.0]);
    let outcome = search_meal_sets(&catalog, &cfg).unwrap();

    assert_eq!(outcome.stats.restricted, 90);
    assert_eq!(outcome.sets.len(), 472);
    assert_eq!(outcome.stats.complete, 472);
    assert_eq!(outcome.stats.expanded, 472);
    assert_eq!(outcome.stats.exhausted, 58);
    assert!(!outcome.stats.truncated);

    let restricted: HashSet<String> = catalog
        .below_threshold(&cfg.threshold)
        .iter()
        .map(|m| m.label())
        .collect();

    for set in &outcome.sets {
        assert_eq!(set.len(), 2);
        let labels = key(set);
        assert_ne!(labels[0], labels[1]);
        assert!(labels.iter().all(|l| restricted.contains(l)));
        assert!(set.total_impact().all_lt(&cfg.threshold));
        assert!(set.total_impact().approx_eq_default(&set.recomputed_impact()));
    }
}

#[test]
fn test_member_order_is_significant() {
    let outcome = search_meal_sets(&catalog(), &config(2, [3.0, 2.0, 10.0, 6.0, 2000.0])).unwrap();
    let ordered: HashSet<Vec<String>> = outcome.sets.iter().map(key).collect();
    assert_eq!(ordered.len(), 472);

    // Every pair also appears reversed.
    for set in &outcome.sets {
        let mut reversed = key(set);
        reversed.reverse();
        assert!(ordered.contains(&reversed));
    }
}

#[test]
fn test_triples_are_pruned_away() {
    let outcome = search_meal_sets(&catalog(), &config(3, [3.0, 2.0, 10.0, 6.0, 2000.0])).unwrap();
    assert!(outcome.sets.is_empty());
    assert_eq!(outcome.stats.expanded, 472);
    assert_eq!(outcome.stats.exhausted, 530);
}

#[test]
fn test_tight_threshold_finds_nothing() {
    let outcome = search_meal_sets(&catalog(), &config(2, [2.5, 1.5, 8.0, 5.0, 1500.0])).unwrap();
    assert_eq!(outcome.stats.restricted, 57);
    assert!(outcome.sets.is_empty());
    assert_eq!(outcome.stats.exhausted, 57);
}

#[test]
fn test_single_meal_sets_equal_restricted_catalog() {
    let outcome = search_meal_sets(&catalog(), &config(1, [3.0, 2.0, 10.0, 6.0, 2000.0])).unwrap();
    assert_eq!(outcome.sets.len(), 90);
    assert_eq!(outcome.stats.expanded, 0);
}

#[test]
fn test_loose_threshold_count() {
    let outcome = search_meal_sets(&catalog(), &config(2, [4.0, 3.0, 15.0, 8.0, 2500.0])).unwrap();
    assert_eq!(outcome.stats.restricted, 191);
    assert_eq!(outcome.sets.len(), 3738);
}

#[test]
fn test_sink_receives_every_set() {
    let catalog = catalog();
    let mut seen = 0;
    let stats = search_meal_sets_with(&catalog, &config(2, [3.0, 2.0, 10.0, 6.0, 2000.0]), |set| {
        assert_eq!(set.len(), 2);
        seen += 1;
    })
    .unwrap();
    assert_eq!(seen, 472);
    assert_eq!(stats.complete, 472);
}

#[test]
fn test_limits_cut_the_search() {
    let catalog = catalog();
    let mut cfg = config(2, [3.0, 2.0, 10.0, 6.0, 2000.0]);
    cfg.limits.max_results = Some(10);
    let outcome = search_meal_sets(&catalog, &cfg).unwrap();
    assert_eq!(outcome.sets.len(), 10);
    assert!(outcome.stats.truncated);

    let mut cfg = config(2, [3.0, 2.0, 10.0, 6.0, 2000.0]);
    cfg.limits.max_expanded = Some(5);
    let outcome = search_meal_sets(&catalog, &cfg).unwrap();
    assert!(outcome.stats.expanded >= 5);
    assert!(outcome.stats.truncated);
    assert!(outcome.sets.len() < 472);
}

#[test]
fn test_parallel_finds_the_same_sets() {
    let catalog = catalog();
    let cfg = config(2, [4.0, 3.0, 15.0, 8.0, 2500.0]);
    let sequential = search_meal_sets(&catalog, &cfg).unwrap();
    let parallel = search_meal_sets_parallel(&catalog, &cfg).unwrap();

    assert_eq!(parallel.sets.len(), sequential.sets.len());
    assert_eq!(parallel.stats.expanded, sequential.stats.expanded);
    assert_eq!(parallel.stats.exhausted, sequential.stats.exhausted);

    let a: HashSet<Vec<String>> = sequential.sets.iter().map(key).collect();
    let b: HashSet<Vec<String>> = parallel.sets.iter().map(key).collect();
    assert_eq!(a, b);
}

#[test]
fn test_parallel_respects_max_results() {
    let mut cfg = config(2, [4.0, 3.0, 15.0, 8.0, 2500.0]);
    cfg.limits.max_results = Some(25);
    let outcome = search_meal_sets_parallel(&catalog(), &cfg).unwrap();
    assert_eq!(outcome.sets.len(), 25);
    assert!(outcome.stats.truncated);
}

#[test]
fn test_zero_max_results_agrees_across_paths() {
    let catalog = catalog();
    let mut cfg = config(2, [3.0, 2.0, 10.0, 6.0, 2000.0]);
    cfg.limits.max_results = Some(0);

    let sequential = search_meal_sets(&catalog, &cfg).unwrap();
    let parallel = search_meal_sets_parallel(&catalog, &cfg).unwrap();
    assert!(sequential.sets.is_empty());
    assert!(parallel.sets.is_empty());
    assert_eq!(sequential.stats.restricted, 90);
    assert!(sequential.stats.truncated);
    assert_eq!(parallel.stats.truncated, sequential.stats.truncated);
}
