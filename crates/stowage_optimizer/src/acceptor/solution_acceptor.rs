use crate::acceptor::accept_solution::{AcceptContext, AcceptSolution};
use crate::acceptor::greedy_acceptor::GreedyAcceptor;
use crate::acceptor::record_to_record::RecordToRecordAcceptor;

pub enum SolutionAcceptor {
    RecordToRecord(RecordToRecordAcceptor),
    Greedy(GreedyAcceptor),
}

impl AcceptSolution for SolutionAcceptor {
    fn accept(
        &mut self,
        best_cost: f64,
        current_cost: f64,
        candidate_cost: f64,
        context: AcceptContext,
    ) -> bool {
        match self {
            SolutionAcceptor::RecordToRecord(acceptor) => {
                acceptor.accept(best_cost, current_cost, candidate_cost, context)
            }
            SolutionAcceptor::Greedy(acceptor) => {
                acceptor.accept(best_cost, current_cost, candidate_cost, context)
            }
        }
    }
}
