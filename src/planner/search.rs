use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{EcoError, Result};
use crate::models::{Catalog, ImpactVector, Meal, MealSet};
use crate::planner::constants::{DEFAULT_SET_SIZE, DEFAULT_THRESHOLD};

/// Optional cutoffs for the search. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchLimits {
    /// Stop after this many complete sets.
    pub max_results: Option<usize>,
    /// Stop after this many expansions (candidates pushed by extension).
    pub max_expanded: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Meals per set (K).
    pub set_size: usize,
    /// Every set's total impact must be strictly below this.
    pub threshold: ImpactVector,
    pub limits: SearchLimits,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            set_size: DEFAULT_SET_SIZE,
            threshold: ImpactVector::from_array(DEFAULT_THRESHOLD),
            limits: SearchLimits::default(),
        }
    }
}

/// Counters describing a finished search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Catalog meals individually below the threshold.
    pub restricted: usize,
    /// Complete sets emitted.
    pub complete: usize,
    /// Candidates created by extending a partial set.
    pub expanded: usize,
    /// Partial sets with no admissible extension.
    pub exhausted: usize,
    /// A limit stopped the search before the frontier was empty.
    pub truncated: bool,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub sets: Vec<MealSet>,
    pub stats: SearchStats,
}

/// A partial set on the work stack: indices into the restricted meals and
/// their summed impact.
#[derive(Debug, Clone)]
struct Candidate {
    members: Vec<usize>,
    total: ImpactVector,
}

/// Read-only state shared by every worker.
struct Frontier<'a> {
    meals: &'a [Meal],
    threshold: &'a ImpactVector,
    set_size: usize,
}

impl<'a> Frontier<'a> {
    fn seed(&self, index: usize) -> Candidate {
        Candidate {
            members: vec![index],
            total: *self.meals[index].impact(),
        }
    }

    /// Push every admissible one-meal extension of `candidate`.
    /// Returns how many were pushed.
    fn expand(&self, candidate: &Candidate, stack: &mut Vec<Candidate>) -> usize {
        let mut pushed = 0;
        for (index, meal) in self.meals.iter().enumerate() {
            if candidate.members.contains(&index) {
                continue;
            }
            let total = candidate.total.add(meal.impact());
            // Impacts are non-negative, so a sum that fails here fails for every superset.
            if !total.all_lt(self.threshold) {
                continue;
            }
            let mut members = Vec::with_capacity(candidate.members.len() + 1);
            members.extend_from_slice(&candidate.members);
            members.push(index);
            stack.push(Candidate { members, total });
            pushed += 1;
        }
        pushed
    }

    fn to_meal_set(&self, candidate: &Candidate) -> MealSet {
        MealSet::from_meals(candidate.members.iter().map(|&i| self.meals[i].clone()))
    }
}

fn validate(config: &SearchConfig) -> Result<()> {
    if config.set_size == 0 {
        return Err(EcoError::InvalidInput(
            "meal set size must be at least 1".to_string(),
        ));
    }
    if !config.threshold.is_non_negative() {
        return Err(EcoError::InvalidInput(format!(
            "threshold must be non-negative, got {}",
            config.threshold
        )));
    }
    Ok(())
}

fn reached(limit: Option<usize>, count: usize) -> bool {
    limit.is_some_and(|max| count >= max)
}

/// Enumerate every set of `set_size` distinct catalog meals whose total
/// impact is strictly below the threshold, passing each to `sink`.
///
/// Runs on an explicit stack, seeded with one singleton per meal that is
/// itself below the threshold. Member order is significant: the same meals
/// reached in a different order are a different set.
pub fn search_meal_sets_with(
    catalog: &Catalog,
    config: &SearchConfig,
    mut sink: impl FnMut(MealSet),
) -> Result<SearchStats> {
    validate(config)?;
    let restricted = catalog.below_threshold(&config.threshold);
    let frontier = Frontier {
        meals: restricted.meals(),
        threshold: &config.threshold,
        set_size: config.set_size,
    };
    let mut stats = SearchStats {
        restricted: restricted.len(),
        ..SearchStats::default()
    };
    debug!(
        restricted = stats.restricted,
        catalog = catalog.len(),
        set_size = config.set_size,
        "Starting meal set search"
    );

    let mut stack: Vec<Candidate> = (0..restricted.len()).map(|i| frontier.seed(i)).collect();
    if reached(config.limits.max_results, 0) {
        stats.truncated = !stack.is_empty();
        stack.clear();
    }

    while let Some(candidate) = stack.pop() {
        if candidate.members.len() == frontier.set_size {
            sink(frontier.to_meal_set(&candidate));
            stats.complete += 1;
            if reached(config.limits.max_results, stats.complete) {
                stats.truncated = !stack.is_empty();
                break;
            }
            continue;
        }

        let pushed = frontier.expand(&candidate, &mut stack);
        stats.expanded += pushed;
        if pushed == 0 {
            stats.exhausted += 1;
        }
        if reached(config.limits.max_expanded, stats.expanded) {
            stats.truncated = !stack.is_empty();
            break;
        }
    }

    info!(
        restricted = stats.restricted,
        complete = stats.complete,
        expanded = stats.expanded,
        exhausted = stats.exhausted,
        truncated = stats.truncated,
        "Meal set search finished"
    );
    Ok(stats)
}

/// Collect every admissible set. See [`search_meal_sets_with`].
pub fn search_meal_sets(catalog: &Catalog, config: &SearchConfig) -> Result<SearchOutcome> {
    let mut sets = Vec::new();
    let stats = search_meal_sets_with(catalog, config, |set| sets.push(set))?;
    Ok(SearchOutcome { sets, stats })
}

/// Parallel search: each seed's subtree is drained on the rayon pool with
/// its own stack and the per-seed results are concatenated in seed order.
/// Limits are shared through atomic counters.
///
/// Produces the same sets as [`search_meal_sets`] when no limit is hit, though
/// not in the same order.
pub fn search_meal_sets_parallel(
    catalog: &Catalog,
    config: &SearchConfig,
) -> Result<SearchOutcome> {
    validate(config)?;
    let restricted = catalog.below_threshold(&config.threshold);
    let frontier = Frontier {
        meals: restricted.meals(),
        threshold: &config.threshold,
        set_size: config.set_size,
    };

    let complete = AtomicUsize::new(0);
    let expanded = AtomicUsize::new(0);
    let exhausted = AtomicUsize::new(0);
    let stop = AtomicBool::new(false);
    let truncated = AtomicBool::new(false);
    if reached(config.limits.max_results, 0) {
        stop.store(true, Ordering::Relaxed);
    }

    debug!(
        restricted = restricted.len(),
        set_size = config.set_size,
        threads = rayon::current_num_threads(),
        "Starting parallel meal set search"
    );

    let sets: Vec<MealSet> = (0..restricted.len())
        .into_par_iter()
        .flat_map_iter(|seed| {
            let mut stack = vec![frontier.seed(seed)];
            let mut found = Vec::new();

            while let Some(candidate) = stack.pop() {
                if stop.load(Ordering::Relaxed) {
                    truncated.store(true, Ordering::Relaxed);
                    break;
                }

                if candidate.members.len() == frontier.set_size {
                    let prior = complete.fetch_add(1, Ordering::SeqCst);
                    if reached(config.limits.max_results, prior) {
                        complete.fetch_sub(1, Ordering::SeqCst);
                        stop.store(true, Ordering::Relaxed);
                        truncated.store(true, Ordering::Relaxed);
                        break;
                    }
                    found.push(frontier.to_meal_set(&candidate));
                    continue;
                }

                let pushed = frontier.expand(&candidate, &mut stack);
                let total = expanded.fetch_add(pushed, Ordering::SeqCst) + pushed;
                if pushed == 0 {
                    exhausted.fetch_add(1, Ordering::Relaxed);
                }
                if reached(config.limits.max_expanded, total) {
                    stop.store(true, Ordering::Relaxed);
                    if !stack.is_empty() {
                        truncated.store(true, Ordering::Relaxed);
                    }
                    break;
                }
            }
            found
        })
        .collect();

    let stats = SearchStats {
        restricted: restricted.len(),
        complete: sets.len(),
        expanded: expanded.into_inner(),
        exhausted: exhausted.into_inner(),
        truncated: truncated.into_inner(),
    };
    info!(
        restricted = stats.restricted,
        complete = stats.complete,
        expanded = stats.expanded,
        exhausted = stats.exhausted,
        truncated = stats.truncated,
        "Parallel meal set search finished"
    );
    Ok(SearchOutcome { sets, stats })
}
