//! Provider metrics: cache and load counters.
//!
//! Each provider owns its own counters; there is no global metrics state.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for one provider's mapping cache and locale loads.
#[derive(Debug, Default)]
pub struct ProviderMetrics {
    /// Number of times a mapping was served from the cache
    cache_hits: AtomicUsize,

    /// Number of times a mapping had to be loaded
    cache_misses: AtomicUsize,

    /// Number of locale loads started (shared in-flight loads count once)
    loads: AtomicUsize,

    /// Number of locale loads that failed
    load_failures: AtomicUsize,
}

impl ProviderMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_load(&self) {
        self.loads.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_load_failure(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> usize {
        self.cache_misses.load(Ordering::Relaxed)
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    pub fn load_failures(&self) -> usize {
        self.load_failures.load(Ordering::Relaxed)
    }

    /// Generate a snapshot report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let total_cache_queries = hits + misses;
        let cache_hit_rate = if total_cache_queries > 0 {
            (hits as f64 / total_cache_queries as f64) * 100.0
        } else {
            0.0
        };

        let loads = self.loads();
        let failures = self.load_failures();
        let load_success_rate = if loads > 0 {
            ((loads - failures) as f64 / loads as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            loads,
            load_failures: failures,
            load_success_rate,
        }
    }
}

/// Snapshot of one provider's counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub cache_misses: usize,
    /// Cache hit rate as a percentage (0-100)
    pub cache_hit_rate: f64,
    pub loads: usize,
    pub load_failures: usize,
    /// Load success rate as a percentage (0-100)
    pub load_success_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = ProviderMetrics::new();
        assert_eq!(metrics.cache_hits(), 0);
        assert_eq!(metrics.cache_misses(), 0);
        assert_eq!(metrics.loads(), 0);
        assert_eq!(metrics.load_failures(), 0);
    }

    #[test]
    fn test_counters_increment() {
        let metrics = ProviderMetrics::new();

        metrics.record_cache_hit();
        metrics.record_cache_hit();
        metrics.record_cache_miss();
        metrics.record_load();
        metrics.record_load_failure();

        assert_eq!(metrics.cache_hits(), 2);
        assert_eq!(metrics.cache_misses(), 1);
        assert_eq!(metrics.loads(), 1);
        assert_eq!(metrics.load_failures(), 1);
    }

    #[test]
    fn test_report_empty() {
        let report = ProviderMetrics::new().report();

        assert_eq!(report.cache_hit_rate, 0.0);
        assert_eq!(report.load_success_rate, 0.0);
    }

    #[test]
    fn test_report_cache_hit_rate() {
        let metrics = ProviderMetrics::new();

        // 3 hits, 1 miss = 75% hit rate
        metrics.record_cache_hit();
        metrics.record_cache_hit();
        metrics.record_cache_hit();
        metrics.record_cache_miss();

        let report = metrics.report();
        assert_eq!(report.cache_hits, 3);
        assert_eq!(report.cache_misses, 1);
        assert_eq!(report.cache_hit_rate, 75.0);
    }

    #[test]
    fn test_report_load_success_rate() {
        let metrics = ProviderMetrics::new();

        // 4 loads, 1 failure = 75% success rate
        for _ in 0..4 {
            metrics.record_load();
        }
        metrics.record_load_failure();

        let report = metrics.report();
        assert_eq!(report.loads, 4);
        assert_eq!(report.load_failures, 1);
        assert_eq!(report.load_success_rate, 75.0);
    }

    #[test]
    fn test_instances_are_independent() {
        let a = ProviderMetrics::new();
        let b = ProviderMetrics::new();

        a.record_cache_hit();

        assert_eq!(a.cache_hits(), 1);
        assert_eq!(b.cache_hits(), 0);
    }
}
