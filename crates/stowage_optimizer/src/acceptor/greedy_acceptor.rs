use crate::acceptor::accept_solution::{AcceptContext, AcceptSolution};

/// Accepts only strict improvements over the current solution.
pub struct GreedyAcceptor;

impl AcceptSolution for GreedyAcceptor {
    fn accept(
        &mut self,
        _best_cost: f64,
        current_cost: f64,
        candidate_cost: f64,
        _context: AcceptContext,
    ) -> bool {
        candidate_cost < current_cost
    }
}
