//! Tests for history statistics and the statistics cache.

use std::thread;

use lotoforge_test::{sample_history, SAMPLE_RESULTS};

use super::*;

#[test]
fn test_frequencies_match_draws() {
    let history = sample_history();
    let stats = HistoryStatistics::compute(history.draws());

    assert_eq!(stats.draws, 12);
    for n in 1..=MAX_NUMBER {
        let expected = SAMPLE_RESULTS
            .iter()
            .filter(|(_, numbers)| numbers.contains(&n))
            .count() as u32;
        assert_eq!(stats.frequency(n), expected, "number {n}");
    }
    let total: u32 = stats.frequencies.iter().sum();
    assert_eq!(total, 12 * 15);
    assert_eq!(stats.frequency(0), 0);
}

#[test]
fn test_hot_and_cold_are_ranked() {
    let history = sample_history();
    let stats = HistoryStatistics::compute(history.draws());

    assert_eq!(stats.hot.len(), HOT_COLD_COUNT);
    assert_eq!(stats.cold.len(), HOT_COLD_COUNT);
    for pair in stats.hot.windows(2) {
        assert!(stats.frequency(pair[0]) >= stats.frequency(pair[1]));
    }
    for pair in stats.cold.windows(2) {
        assert!(stats.frequency(pair[0]) <= stats.frequency(pair[1]));
    }
    let coldest_hot = stats.frequency(stats.hot[HOT_COLD_COUNT - 1]);
    assert!((1..=MAX_NUMBER)
        .filter(|n| !stats.hot.contains(n))
        .all(|n| stats.frequency(n) <= coldest_hot));
}

#[test]
fn test_repeats_summary_skips_oldest_draw() {
    let history = sample_history();
    let stats = HistoryStatistics::compute(history.draws());

    let repeats = stats.summary(ConstraintType::Repeats).unwrap();
    assert_eq!(repeats.samples, 11);
    let sum = stats.summary(ConstraintType::Sum).unwrap();
    assert_eq!(sum.samples, 12);
    assert!((0.0..=1.0).contains(&sum.ideal_share));
    assert!(sum.mean >= 120.0 && sum.mean <= 270.0);
}

#[test]
fn test_empty_window() {
    let stats = HistoryStatistics::compute(&[]);
    assert_eq!(stats.draws, 0);
    assert_eq!(stats.hot, vec![1, 2, 3, 4, 5]);
    assert_eq!(stats.cold, vec![1, 2, 3, 4, 5]);
    assert!(stats.constraints.iter().all(|s| s.samples == 0 && s.mean == 0.0));
    assert_eq!(stats.constraints.len(), ConstraintType::COUNT);
}

#[test]
fn test_cache_hits_and_misses() {
    let history = sample_history();
    let cache = StatisticsCache::new(2);

    let a = cache.get_or_compute(history.window(5));
    let b = cache.get_or_compute(history.window(5));
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cache.hits(), 1);
    assert_eq!(cache.misses(), 1);
    assert_eq!(*a, HistoryStatistics::compute(history.window(5)));
}

#[test]
fn test_cache_evicts_least_recently_used() {
    let history = sample_history();
    let cache = StatisticsCache::new(2);

    let five = cache.get_or_compute(history.window(5));
    cache.get_or_compute(history.window(6));
    // touch 5 so 6 becomes the oldest
    cache.get_or_compute(history.window(5));
    cache.get_or_compute(history.window(7));
    assert_eq!(cache.len(), 2);

    let again = cache.get_or_compute(history.window(5));
    assert!(Arc::ptr_eq(&five, &again));

    let misses = cache.misses();
    cache.get_or_compute(history.window(6));
    assert_eq!(cache.misses(), misses + 1);
}

#[test]
fn test_cache_is_shared_across_threads() {
    let history = sample_history();
    let cache = StatisticsCache::default();

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for n in 1..=history.len() {
                    let stats = cache.get_or_compute(history.window(n));
                    assert_eq!(stats.draws, n);
                }
            });
        }
    });

    assert_eq!(cache.len(), history.len());
    let expected = HistoryStatistics::compute(history.window(3));
    assert_eq!(*cache.get_or_compute(history.window(3)), expected);
}

#[test]
fn test_zero_capacity_still_caches_one() {
    let cache = StatisticsCache::new(0);
    assert_eq!(cache.capacity(), 1);
    cache.get_or_compute(sample_history().window(2));
    assert_eq!(cache.len(), 1);
    cache.clear();
    assert!(cache.is_empty());
}
