use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::acceptor::accept_solution::{AcceptContext, AcceptSolution};
use crate::acceptor::greedy_acceptor::GreedyAcceptor;
use crate::acceptor::record_to_record::RecordToRecordAcceptor;
use crate::acceptor::solution_acceptor::SolutionAcceptor;
use crate::problem::Instance;
use crate::solver::alns_weights::{AlnsScores, AlnsWeights, ScoreOutcome};
use crate::solver::construction::initial_solution;
use crate::solver::ls::LocalSearch;
use crate::solver::recreate::recreate_context::RecreateContext;
use crate::solver::recreate::recreate_solution::RecreateSolution;
use crate::solver::ruin::ruin_context::RuinContext;
use crate::solver::ruin::ruin_solution::RuinSolution;
use crate::solver::solution::{EPSILON, Solution};
use crate::solver::solver_params::{AcceptorStrategy, SolverParams};
use crate::solver::statistics::SearchStatistics;

/// Adaptive large neighbourhood search over the destroy/repair operator
/// library: each iteration clones the current solution, ruins and recreates
/// it, optionally polishes it with the exact per-route sub-solvers, and asks
/// the acceptance criterion whether to move to it. Operator weights adapt to
/// each pairing's track record. The loop is strictly sequential; candidate
/// evaluation inside the operators is where the parallelism lives.
pub struct Alns {
    instance: Arc<Instance>,
    params: SolverParams,
}

pub struct AlnsResult {
    pub best: Solution,
    pub best_cost: f64,
    pub statistics: SearchStatistics,
}

impl Alns {
    pub fn new(instance: Arc<Instance>, params: SolverParams) -> Self {
        assert!(!params.ruin_strategies.is_empty());
        assert!(!params.recreate_strategies.is_empty());
        assert!(params.iterations > 0);

        Alns { instance, params }
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    fn create_acceptor(&self) -> SolutionAcceptor {
        match self.params.acceptor {
            AcceptorStrategy::RecordToRecord {
                start_threshold,
                end_threshold,
                restart_interval,
            } => SolutionAcceptor::RecordToRecord(RecordToRecordAcceptor::new(
                start_threshold,
                end_threshold,
                restart_interval,
            )),
            AcceptorStrategy::Greedy => SolutionAcceptor::Greedy(GreedyAcceptor),
        }
    }

    pub fn run(&self) -> AlnsResult {
        self.run_with_observer(|_, _| {})
    }

    /// Runs the full iteration budget. The observer sees every iteration
    /// index with the best cost so far; the CLI hangs its progress bar on
    /// it.
    pub fn run_with_observer<F>(&self, mut observer: F) -> AlnsResult
    where
        F: FnMut(usize, f64),
    {
        let instance = self.instance.as_ref();
        let params = &self.params;

        let mut rng = SmallRng::seed_from_u64(params.seed);
        let mut statistics = SearchStatistics::new();

        let mut current = initial_solution(instance);
        let mut current_cost = current.objective(instance);
        let mut best = current.clone();
        let mut best_cost = current_cost;
        statistics.record_best(0, best_cost);

        let mut acceptor = self.create_acceptor();
        let local_search = LocalSearch::new(params.max_sequencing_customers, params.num_blocks);

        let mut ruin_weights = AlnsWeights::new(params.ruin_strategies.clone());
        let mut recreate_weights = AlnsWeights::new(params.recreate_strategies.clone());
        let mut ruin_scores = AlnsScores::new(params.ruin_strategies.clone());
        let mut recreate_scores = AlnsScores::new(params.recreate_strategies.clone());

        let num_to_remove = params.ruin.num_to_remove(instance.num_customers());

        info!(
            customers = instance.num_customers(),
            iterations = params.iterations,
            initial_cost = current_cost,
            "starting search"
        );

        for iteration in 0..params.iterations {
            let ruin_strategy = ruin_weights.select_strategy(&mut rng);
            let recreate_strategy = recreate_weights.select_strategy(&mut rng);

            let mut candidate = current.clone();

            ruin_strategy.ruin_solution(
                &mut candidate,
                RuinContext {
                    instance,
                    params: &params.ruin,
                    rng: &mut rng,
                    num_to_remove,
                },
            );

            recreate_strategy.recreate_solution(
                &mut candidate,
                RecreateContext {
                    instance,
                    params: &params.recreate,
                    rng: &mut rng,
                },
            );

            debug_assert!(!candidate.has_unassigned());
            debug_assert!(candidate.is_feasible(instance));

            let polished = rng.random_bool(params.local_search_probability);
            if polished {
                local_search.improve(instance, &mut candidate);
            }

            let mut candidate_cost = candidate.objective(instance);

            // A would-be best is always worth polishing.
            if !polished && candidate_cost < best_cost - EPSILON {
                local_search.improve(instance, &mut candidate);
                candidate_cost = candidate.objective(instance);
            }

            let is_best = candidate_cost < best_cost - EPSILON;
            let improved = candidate_cost < current_cost - EPSILON;

            let context = AcceptContext {
                iteration,
                max_iterations: params.iterations,
            };
            let accepted =
                acceptor.accept(best_cost, current_cost, candidate_cost, context) || is_best;

            let outcome = ScoreOutcome {
                is_best,
                improved,
                accepted,
            };
            ruin_scores.update_score(ruin_strategy, params, outcome);
            recreate_scores.update_score(recreate_strategy, params, outcome);

            if is_best {
                best = candidate.clone();
                best_cost = candidate_cost;
                statistics.improvements += 1;
                statistics.record_best(iteration, best_cost);
                debug!(iteration, cost = best_cost, "new best solution");
            }

            if accepted {
                current = candidate;
                current_cost = candidate_cost;
                statistics.accepted += 1;
            }

            if (iteration + 1) % params.alns_segment_iterations == 0 {
                ruin_weights.update_weights(&mut ruin_scores, params.alns_reaction_factor);
                recreate_weights.update_weights(&mut recreate_scores, params.alns_reaction_factor);
            }

            statistics.iterations += 1;
            observer(iteration, best_cost);
        }

        statistics.finish();
        info!(
            cost = best_cost,
            routes = best.num_routes(),
            accepted = statistics.accepted,
            "search finished"
        );

        AlnsResult {
            best,
            best_cost,
            statistics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::recreate::RecreateStrategy;
    use crate::solver::ruin::RuinStrategy;
    use crate::test_utils;

    fn short_run_params(iterations: usize, seed: u64) -> SolverParams {
        SolverParams {
            iterations,
            seed,
            acceptor: AcceptorStrategy::RecordToRecord {
                start_threshold: 5.0,
                end_threshold: 0.0,
                restart_interval: None,
            },
            ..SolverParams::default()
        }
    }

    #[test]
    fn search_never_worsens_the_best() {
        let instance = Arc::new(test_utils::line_instance(6, 40.0, 2, 1.0, 2.0, 2.0));
        let mut initial = initial_solution(&instance);
        let initial_cost = initial.objective(&instance);

        let result = Alns::new(Arc::clone(&instance), short_run_params(300, 7)).run();

        assert!(result.best_cost <= initial_cost);
        assert!(!result.best.has_unassigned());
        assert!(result.best.is_feasible(&instance));

        for customer in 0..instance.num_customers() {
            assert!(result.best.find_route(customer).is_some());
        }
    }

    #[test]
    fn merges_single_customer_routes() {
        // Everything fits in one vehicle; the search should discover a far
        // cheaper consolidation than one round trip per customer.
        let instance = Arc::new(test_utils::line_instance(5, 100.0, 2, 0.0, 2.0, 2.0));
        let result = Alns::new(Arc::clone(&instance), short_run_params(300, 11)).run();

        // The one-route sweep costs 10; the initial solution costs 30.
        assert!(result.best_cost <= 10.0 + 1e-9);
    }

    #[test]
    fn same_seed_reproduces_the_run() {
        let instance = Arc::new(test_utils::line_instance(6, 40.0, 2, 1.0, 2.0, 2.0));

        let first = Alns::new(Arc::clone(&instance), short_run_params(150, 99)).run();
        let second = Alns::new(Arc::clone(&instance), short_run_params(150, 99)).run();

        assert_eq!(first.best_cost, second.best_cost);
    }

    #[test]
    fn full_destroy_then_greedy_repair_leaves_no_unassigned() {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        use crate::solver::recreate::recreate_params::RecreateParams;
        use crate::solver::ruin::ruin_params::RuinParams;

        let instance = test_utils::line_instance(3, 100.0, 2, 1.0, 2.0, 2.0);
        let mut solution = initial_solution(&instance);
        assert_eq!(solution.num_routes(), 3);

        let mut rng = SmallRng::seed_from_u64(1);
        let ruin_params = RuinParams::default();
        let recreate_params = RecreateParams::default();

        RuinStrategy::RandomCustomers.ruin_solution(
            &mut solution,
            RuinContext {
                instance: &instance,
                params: &ruin_params,
                rng: &mut rng,
                num_to_remove: instance.num_customers(),
            },
        );

        assert_eq!(solution.unassigned().len(), 3);
        assert_eq!(solution.num_routes(), 0);

        RecreateStrategy::Greedy.recreate_solution(
            &mut solution,
            RecreateContext {
                instance: &instance,
                params: &recreate_params,
                rng: &mut rng,
            },
        );

        assert!(solution.unassigned().is_empty());
        assert!(solution.is_feasible(&instance));
    }
}
