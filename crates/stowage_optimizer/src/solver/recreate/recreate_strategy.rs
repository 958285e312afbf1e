use std::fmt::Display;

use rand::Rng;
use serde::Serialize;

use crate::solver::recreate::greedy_insertion::GreedyInsertion;
use crate::solver::recreate::near_best_insertion::NearBestInsertion;
use crate::solver::recreate::random_insertion::RandomInsertion;
use crate::solver::recreate::recreate_context::RecreateContext;
use crate::solver::recreate::recreate_solution::RecreateSolution;
use crate::solver::solution::Solution;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecreateStrategy {
    Greedy,
    NearBest,
    Random,
}

impl RecreateStrategy {
    pub fn all() -> Vec<RecreateStrategy> {
        vec![
            RecreateStrategy::Greedy,
            RecreateStrategy::NearBest,
            RecreateStrategy::Random,
        ]
    }
}

impl Serialize for RecreateStrategy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl Display for RecreateStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Greedy => write!(f, "Greedy"),
            Self::NearBest => write!(f, "NearBest"),
            Self::Random => write!(f, "Random"),
        }
    }
}

impl RecreateSolution for RecreateStrategy {
    fn recreate_solution<R>(&self, solution: &mut Solution, context: RecreateContext<R>)
    where
        R: Rng,
    {
        match self {
            RecreateStrategy::Greedy => GreedyInsertion.recreate_solution(solution, context),
            RecreateStrategy::NearBest => {
                let nearness = context.params.near_best_k;
                NearBestInsertion::new(nearness).recreate_solution(solution, context)
            }
            RecreateStrategy::Random => RandomInsertion.recreate_solution(solution, context),
        }
    }
}
