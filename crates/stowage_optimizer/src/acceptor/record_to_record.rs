use crate::acceptor::accept_solution::{AcceptContext, AcceptSolution};

/// Record-to-record travel: a candidate is accepted when it lies within a
/// threshold of the best-known solution, with the threshold decaying
/// linearly from `start` to `end` over the iteration budget. An optional
/// restart period resets the decay so late stages of the search can still
/// escape local optima.
pub struct RecordToRecordAcceptor {
    start_threshold: f64,
    end_threshold: f64,
    restart_interval: Option<usize>,

    iterations_in_cycle: usize,
}

impl RecordToRecordAcceptor {
    pub fn new(start_threshold: f64, end_threshold: f64, restart_interval: Option<usize>) -> Self {
        assert!(start_threshold >= end_threshold);
        assert!(end_threshold >= 0.0);

        RecordToRecordAcceptor {
            start_threshold,
            end_threshold,
            restart_interval,
            iterations_in_cycle: 0,
        }
    }

    fn threshold(&self, context: AcceptContext) -> f64 {
        let cycle_length = self
            .restart_interval
            .unwrap_or(context.max_iterations)
            .max(1);

        let progress = (self.iterations_in_cycle.min(cycle_length)) as f64 / cycle_length as f64;

        self.start_threshold - (self.start_threshold - self.end_threshold) * progress
    }
}

impl AcceptSolution for RecordToRecordAcceptor {
    fn accept(
        &mut self,
        best_cost: f64,
        _current_cost: f64,
        candidate_cost: f64,
        context: AcceptContext,
    ) -> bool {
        let threshold = self.threshold(context);

        self.iterations_in_cycle += 1;
        if let Some(interval) = self.restart_interval
            && self.iterations_in_cycle >= interval
        {
            self.iterations_in_cycle = 0;
        }

        candidate_cost <= best_cost + threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(iteration: usize) -> AcceptContext {
        AcceptContext {
            iteration,
            max_iterations: 100,
        }
    }

    #[test]
    fn accepts_within_threshold_of_best() {
        let mut acceptor = RecordToRecordAcceptor::new(10.0, 0.0, None);

        assert!(acceptor.accept(100.0, 100.0, 109.0, context(0)));
        assert!(!acceptor.accept(100.0, 100.0, 120.0, context(1)));
    }

    #[test]
    fn threshold_decays_to_end_value() {
        let mut acceptor = RecordToRecordAcceptor::new(10.0, 0.0, None);

        for iteration in 0..100 {
            acceptor.accept(100.0, 100.0, 100.0, context(iteration));
        }

        // After a full budget the threshold has bottomed out.
        assert!(!acceptor.accept(100.0, 100.0, 100.5, context(100)));
        assert!(acceptor.accept(100.0, 100.0, 100.0, context(101)));
    }

    #[test]
    fn restart_resets_the_decay() {
        let mut acceptor = RecordToRecordAcceptor::new(10.0, 0.0, Some(10));

        for iteration in 0..10 {
            acceptor.accept(100.0, 100.0, 100.0, context(iteration));
        }

        // A fresh cycle starts at the full threshold again.
        assert!(acceptor.accept(100.0, 100.0, 109.0, context(10)));
    }
}
