//! Metrics aggregator.
//!
//! `avg_latency_ms` is an exponentially-weighted moving average, not a true
//! mean: each completion folds in as `avg = (avg + sample) / 2`, so recent
//! completions dominate and the metric never needs to retain history.

use crate::types::MetricsSnapshot;

#[derive(Debug, Default)]
pub struct Metrics {
    tasks_processed: u64,
    tasks_rejected: u64,
    avg_latency_ms: f64,
    current_load: f64,
}

impl Metrics {
    pub fn record_completion(&mut self, latency_ms: f64) {
        self.tasks_processed += 1;
        self.avg_latency_ms = if self.avg_latency_ms == 0.0 {
            latency_ms
        } else {
            (self.avg_latency_ms + latency_ms) / 2.0
        };
    }

    pub fn record_rejection(&mut self) {
        self.tasks_rejected += 1;
    }

    pub fn set_load(&mut self, load: f64) {
        self.current_load = load;
    }

    pub fn snapshot(&self, rejected_queue_size: usize) -> MetricsSnapshot {
        MetricsSnapshot {
            tasks_processed: self.tasks_processed,
            tasks_rejected: self.tasks_rejected,
            rejected_queue_size,
            avg_latency_ms: self.avg_latency_ms,
            current_load: self.current_load,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_completion_seeds_the_average() {
        let mut m = Metrics::default();
        m.record_completion(100.0);
        assert_eq!(m.snapshot(0).avg_latency_ms, 100.0);
    }

    #[test]
    fn subsequent_completions_use_the_ewma_recurrence() {
        let mut m = Metrics::default();
        m.record_completion(100.0);
        m.record_completion(200.0);
        assert_eq!(m.snapshot(0).avg_latency_ms, 150.0);
    }

    #[test]
    fn rejection_and_processed_counters_are_independent() {
        let mut m = Metrics::default();
        m.record_completion(50.0);
        m.record_rejection();
        m.record_rejection();
        let snap = m.snapshot(2);
        assert_eq!(snap.tasks_processed, 1);
        assert_eq!(snap.tasks_rejected, 2);
        assert_eq!(snap.rejected_queue_size, 2);
    }
}
