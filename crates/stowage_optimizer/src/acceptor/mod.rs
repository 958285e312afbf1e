pub mod accept_solution;
pub mod greedy_acceptor;
pub mod record_to_record;
pub mod solution_acceptor;

pub use accept_solution::{AcceptContext, AcceptSolution};
pub use solution_acceptor::SolutionAcceptor;
