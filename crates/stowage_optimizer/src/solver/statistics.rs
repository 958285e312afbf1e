use jiff::{SignedDuration, Timestamp};
use serde::Serialize;

/// One improvement of the best-known solution.
#[derive(Debug, Clone, Serialize)]
pub struct BestUpdateRow {
    pub iteration: usize,
    pub cost: f64,
    pub elapsed: SignedDuration,
}

/// Counters collected over a full search run; serialized to JSON by the CLI
/// when asked.
#[derive(Debug, Clone, Serialize)]
pub struct SearchStatistics {
    pub iterations: usize,
    pub accepted: usize,
    pub improvements: usize,
    pub best_updates: Vec<BestUpdateRow>,
    pub total_duration: SignedDuration,

    #[serde(skip)]
    started: Timestamp,
}

impl SearchStatistics {
    pub fn new() -> Self {
        SearchStatistics {
            iterations: 0,
            accepted: 0,
            improvements: 0,
            best_updates: Vec::new(),
            total_duration: SignedDuration::ZERO,
            started: Timestamp::now(),
        }
    }

    pub fn elapsed(&self) -> SignedDuration {
        Timestamp::now().duration_since(self.started)
    }

    pub fn record_best(&mut self, iteration: usize, cost: f64) {
        self.best_updates.push(BestUpdateRow {
            iteration,
            cost,
            elapsed: self.elapsed(),
        });
    }

    pub fn finish(&mut self) {
        self.total_duration = self.elapsed();
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        SearchStatistics::new()
    }
}
