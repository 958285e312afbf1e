use std::fmt::Display;
use std::hash::Hash;

use fxhash::FxHashMap;
use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::solver::solver_params::SolverParams;

/// Roulette-wheel weights over a set of strategies, updated per segment from
/// the scores the strategies earned. New strategies start at weight 1; a
/// floor keeps every strategy selectable so none starves permanently.
#[derive(Debug, Clone, Serialize)]
pub struct AlnsWeights<S>
where
    S: Copy + Eq + Hash,
{
    weights: Vec<Operator<S>>,
}

impl<S> Display for AlnsWeights<S>
where
    S: Copy + Eq + Hash + Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{:<30} {:>8}", "Operator", "Weight")?;
        for operator in &self.weights {
            writeln!(f, "{:<30} {:>8.4}", operator.strategy.to_string(), operator.weight)?;
        }
        Ok(())
    }
}

impl<S> AlnsWeights<S>
where
    S: Copy + Eq + Hash,
{
    pub fn new(strategies: Vec<S>) -> Self {
        let weights = strategies
            .into_iter()
            .map(|strategy| Operator {
                strategy,
                weight: 1.0,
            })
            .collect();

        AlnsWeights { weights }
    }

    pub fn update_weights(&mut self, scores: &mut AlnsScores<S>, reaction_factor: f64) {
        for operator in self.weights.iter_mut() {
            if let Some(entry) = scores.scores.get_mut(&operator.strategy) {
                operator.update_weight(entry, reaction_factor);
                entry.reset();
            }
        }
    }

    pub fn select_strategy<R>(&self, rng: &mut R) -> S
    where
        R: rand::Rng,
    {
        self.weights
            .choose_weighted(rng, |operator| operator.weight)
            .map(|operator| operator.strategy)
            .expect("no strategies configured")
    }

    pub fn reset(&mut self) {
        for operator in self.weights.iter_mut() {
            operator.weight = 1.0;
        }
    }
}

const MIN_WEIGHT: f64 = 0.1;

#[derive(Debug, Clone, Serialize)]
pub struct Operator<S> {
    pub strategy: S,
    pub weight: f64,
}

impl<S> Operator<S> {
    fn update_weight(&mut self, entry: &ScoreEntry, reaction_factor: f64) {
        let new_weight = if entry.iterations == 0 {
            (1.0 - reaction_factor) * self.weight
        } else {
            (1.0 - reaction_factor) * self.weight
                + reaction_factor * (entry.score / entry.iterations as f64)
        };

        self.weight = new_weight.max(MIN_WEIGHT);
    }
}

#[derive(Debug, Default)]
struct ScoreEntry {
    score: f64,
    iterations: usize,
}

impl ScoreEntry {
    fn reset(&mut self) {
        self.score = 0.0;
        self.iterations = 0;
    }
}

/// Scores earned by each strategy since the last weight update.
#[derive(Debug)]
pub struct AlnsScores<S>
where
    S: Eq + Hash,
{
    scores: FxHashMap<S, ScoreEntry>,
}

#[derive(Debug, Clone, Copy)]
pub struct ScoreOutcome {
    pub is_best: bool,
    pub improved: bool,
    pub accepted: bool,
}

impl<S> AlnsScores<S>
where
    S: Eq + Hash + Copy,
{
    pub fn new(strategies: Vec<S>) -> Self {
        AlnsScores {
            scores: strategies
                .iter()
                .map(|&strategy| (strategy, ScoreEntry::default()))
                .collect(),
        }
    }

    pub fn reset(&mut self) {
        for entry in self.scores.values_mut() {
            entry.reset();
        }
    }

    pub fn update_score(&mut self, strategy: S, params: &SolverParams, outcome: ScoreOutcome) {
        let score = if outcome.is_best {
            params.alns_best_factor
        } else if outcome.improved {
            params.alns_improvement_factor
        } else if outcome.accepted {
            params.alns_accepted_factor
        } else {
            params.alns_rejected_factor
        };

        let entry = self.scores.entry(strategy).or_default();
        entry.score += score;
        entry.iterations += 1;
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn rewarded_strategies_gain_weight() {
        let params = SolverParams::default();

        let mut weights = AlnsWeights::new(vec!["good", "bad"]);
        let mut scores = AlnsScores::new(vec!["good", "bad"]);

        for _ in 0..10 {
            scores.update_score(
                "good",
                &params,
                ScoreOutcome {
                    is_best: true,
                    improved: true,
                    accepted: true,
                },
            );
            scores.update_score(
                "bad",
                &params,
                ScoreOutcome {
                    is_best: false,
                    improved: false,
                    accepted: false,
                },
            );
        }

        weights.update_weights(&mut scores, params.alns_reaction_factor);

        let good = weights
            .weights
            .iter()
            .find(|operator| operator.strategy == "good")
            .unwrap()
            .weight;
        let bad = weights
            .weights
            .iter()
            .find(|operator| operator.strategy == "bad")
            .unwrap()
            .weight;

        assert!(good > bad);
    }

    #[test]
    fn selection_follows_the_weights() {
        let params = SolverParams::default();
        let mut rng = SmallRng::seed_from_u64(53);

        let mut weights = AlnsWeights::new(vec!["heavy", "light"]);
        let mut scores = AlnsScores::new(vec!["heavy", "light"]);

        for _ in 0..100 {
            scores.update_score(
                "heavy",
                &params,
                ScoreOutcome {
                    is_best: true,
                    improved: true,
                    accepted: true,
                },
            );
        }
        weights.update_weights(&mut scores, 1.0);

        let mut heavy_hits = 0;
        for _ in 0..1000 {
            if weights.select_strategy(&mut rng) == "heavy" {
                heavy_hits += 1;
            }
        }

        // Weight 25 vs the 0.1 floor leaves no room for doubt.
        assert!(heavy_hits > 900);
    }

    #[test]
    fn weight_never_drops_below_the_floor() {
        let params = SolverParams::default();

        let mut weights = AlnsWeights::new(vec!["starved"]);
        let mut scores = AlnsScores::new(vec!["starved"]);

        for _ in 0..20 {
            weights.update_weights(&mut scores, params.alns_reaction_factor);
        }

        assert!(weights.weights[0].weight >= MIN_WEIGHT);
    }
}
