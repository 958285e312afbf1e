use rand::Rng;

use crate::problem::Instance;
use crate::solver::recreate::recreate_params::RecreateParams;

pub struct RecreateContext<'a, R>
where
    R: Rng,
{
    pub instance: &'a Instance,
    pub params: &'a RecreateParams,
    pub rng: &'a mut R,
}
