use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RuinParams {
    /// Fraction of all customers removed per iteration.
    pub destruction_fraction: f64,
}

impl Default for RuinParams {
    fn default() -> Self {
        RuinParams {
            destruction_fraction: 0.25,
        }
    }
}

impl RuinParams {
    pub fn num_to_remove(&self, num_customers: usize) -> usize {
        ((num_customers as f64 * self.destruction_fraction) as usize).clamp(1, num_customers)
    }
}
