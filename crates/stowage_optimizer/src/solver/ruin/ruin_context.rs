use rand::Rng;

use crate::problem::Instance;
use crate::solver::ruin::ruin_params::RuinParams;

pub struct RuinContext<'a, R>
where
    R: Rng,
{
    pub instance: &'a Instance,
    pub params: &'a RuinParams,
    pub rng: &'a mut R,

    /// How many customers this ruin should move into the unassigned pool.
    /// Operators that remove whole routes or neighbourhoods may overshoot.
    pub num_to_remove: usize,
}
