use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("failed to read instance file: {0}")]
    Io(#[from] std::io::Error),

    #[error("field {index} is not a number: {value:?}")]
    Malformed { index: usize, value: String },

    #[error("expected {expected} fields, found {found}")]
    WrongLength { expected: usize, found: usize },

    #[error("capacity {capacity} is not positive")]
    InvalidCapacity { capacity: f64 },

    #[error("customer {customer} has a negative volume")]
    NegativeVolume { customer: usize },

    #[error(
        "customer {customer} has an item of volume {volume} exceeding the \
         stack capacity {stack_capacity}"
    )]
    ItemExceedsStackCapacity {
        customer: usize,
        volume: f64,
        stack_capacity: f64,
    },
}

/// Immutable problem data: distances, volumes, and vehicle configuration.
/// Loaded once at program start and shared by reference with everything else;
/// all derived lookup tables are precomputed here.
pub struct Instance {
    instance_id: u64,
    capacity: f64,
    handling_cost: f64,
    num_customers: usize,
    num_stacks: usize,

    /// Dense `(n + 1)²` matrix, row-major, with the depot at node 0 and
    /// customer `c` at node `c + 1`.
    distances: Vec<f64>,
    demands: Vec<f64>,
    pickups: Vec<f64>,

    /// For each customer, every other customer ordered by increasing
    /// distance. Used as a relatedness measure by the ruin operators.
    nearest_customers: Vec<Vec<usize>>,

    /// Customers ordered by increasing total quantity (demand + pickup).
    customers_by_quantity: Vec<usize>,
}

impl Instance {
    pub fn new(
        instance_id: u64,
        capacity: f64,
        handling_cost: f64,
        num_stacks: usize,
        distances: Vec<f64>,
        demands: Vec<f64>,
        pickups: Vec<f64>,
    ) -> Result<Self, InstanceError> {
        let num_customers = demands.len();
        assert_eq!(pickups.len(), num_customers);
        assert_eq!(distances.len(), (num_customers + 1) * (num_customers + 1));
        assert!(num_stacks > 0);

        if capacity <= 0.0 {
            return Err(InstanceError::InvalidCapacity { capacity });
        }

        let stack_capacity = capacity / num_stacks as f64;

        for customer in 0..num_customers {
            for &volume in [demands[customer], pickups[customer]].iter() {
                if volume < 0.0 {
                    return Err(InstanceError::NegativeVolume { customer });
                }

                if volume > stack_capacity {
                    return Err(InstanceError::ItemExceedsStackCapacity {
                        customer,
                        volume,
                        stack_capacity,
                    });
                }
            }
        }

        let nearest_customers = Instance::precompute_nearest_customers(num_customers, &distances);
        let customers_by_quantity =
            Instance::precompute_customers_by_quantity(&demands, &pickups);

        Ok(Instance {
            instance_id,
            capacity,
            handling_cost,
            num_customers,
            num_stacks,
            distances,
            demands,
            pickups,
            nearest_customers,
            customers_by_quantity,
        })
    }

    /// Parses the single-line comma-separated instance format:
    /// `id,capacity,n,handling_cost,num_stacks,<(n+1)² distances>,<n pairs of
    /// (delivery, pickup) volumes>`.
    pub fn parse(content: &str) -> Result<Self, InstanceError> {
        let fields = content
            .split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .collect::<Vec<_>>();

        let number = |index: usize| -> Result<f64, InstanceError> {
            let value = fields
                .get(index)
                .ok_or(InstanceError::WrongLength {
                    expected: index + 1,
                    found: fields.len(),
                })?;

            value.parse::<f64>().map_err(|_| InstanceError::Malformed {
                index,
                value: value.to_string(),
            })
        };

        let instance_id = number(0)? as u64;
        let capacity = number(1)?;
        let num_customers = number(2)? as usize;
        let handling_cost = number(3)?;
        let num_stacks = number(4)? as usize;

        let num_nodes = num_customers + 1;
        let expected = 5 + num_nodes * num_nodes + 2 * num_customers;

        if fields.len() != expected {
            return Err(InstanceError::WrongLength {
                expected,
                found: fields.len(),
            });
        }

        let mut distances = Vec::with_capacity(num_nodes * num_nodes);
        for index in 5..5 + num_nodes * num_nodes {
            distances.push(number(index)?);
        }

        let mut demands = Vec::with_capacity(num_customers);
        let mut pickups = Vec::with_capacity(num_customers);
        let volumes_offset = 5 + num_nodes * num_nodes;

        for customer in 0..num_customers {
            demands.push(number(volumes_offset + 2 * customer)?);
            pickups.push(number(volumes_offset + 2 * customer + 1)?);
        }

        Instance::new(
            instance_id,
            capacity,
            handling_cost,
            num_stacks,
            distances,
            demands,
            pickups,
        )
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, InstanceError> {
        let content = std::fs::read_to_string(path)?;
        Instance::parse(&content)
    }

    fn precompute_nearest_customers(num_customers: usize, distances: &[f64]) -> Vec<Vec<usize>> {
        let num_nodes = num_customers + 1;

        (0..num_customers)
            .map(|customer| {
                let mut others = (0..num_customers)
                    .filter(|&other| other != customer)
                    .collect::<Vec<_>>();

                others.sort_by(|&a, &b| {
                    let to_a = distances[(customer + 1) * num_nodes + a + 1];
                    let to_b = distances[(customer + 1) * num_nodes + b + 1];
                    to_a.total_cmp(&to_b)
                });

                others
            })
            .collect()
    }

    fn precompute_customers_by_quantity(demands: &[f64], pickups: &[f64]) -> Vec<usize> {
        let mut customers = (0..demands.len()).collect::<Vec<_>>();
        customers.sort_by(|&a, &b| {
            (demands[a] + pickups[a]).total_cmp(&(demands[b] + pickups[b]))
        });

        customers
    }

    pub fn instance_id(&self) -> u64 {
        self.instance_id
    }

    pub fn num_customers(&self) -> usize {
        self.num_customers
    }

    pub fn num_stacks(&self) -> usize {
        self.num_stacks
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn stack_capacity(&self) -> f64 {
        self.capacity / self.num_stacks as f64
    }

    pub fn handling_cost(&self) -> f64 {
        self.handling_cost
    }

    pub fn demand(&self, customer: usize) -> f64 {
        self.demands[customer]
    }

    pub fn pickup(&self, customer: usize) -> f64 {
        self.pickups[customer]
    }

    pub fn quantity(&self, customer: usize) -> f64 {
        self.demands[customer] + self.pickups[customer]
    }

    pub fn distance_between(&self, from: usize, to: usize) -> f64 {
        self.distances[(from + 1) * (self.num_customers + 1) + to + 1]
    }

    pub fn distance_from_depot(&self, customer: usize) -> f64 {
        self.distances[customer + 1]
    }

    pub fn distance_to_depot(&self, customer: usize) -> f64 {
        self.distances[(customer + 1) * (self.num_customers + 1)]
    }

    pub fn round_trip_distance(&self, customer: usize) -> f64 {
        self.distance_from_depot(customer) + self.distance_to_depot(customer)
    }

    /// Distance of the edge between two stops, where `None` is the depot.
    pub fn leg_distance(&self, from: Option<usize>, to: Option<usize>) -> f64 {
        match (from, to) {
            (None, None) => 0.0,
            (None, Some(to)) => self.distance_from_depot(to),
            (Some(from), None) => self.distance_to_depot(from),
            (Some(from), Some(to)) => self.distance_between(from, to),
        }
    }

    pub fn nearest_customers(&self, customer: usize) -> &[usize] {
        &self.nearest_customers[customer]
    }

    pub fn customers_by_quantity(&self) -> &[usize] {
        &self.customers_by_quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance_line() -> String {
        // Two customers; 3x3 distance matrix; volumes (4, 2) and (3, 1).
        let mut fields = vec![
            "7".to_string(),
            "10".to_string(),
            "2".to_string(),
            "1.5".to_string(),
            "2".to_string(),
        ];

        let distances = ["0", "1", "2", "1", "0", "3", "2", "3", "0"];
        fields.extend(distances.iter().map(|d| d.to_string()));
        fields.extend(["4", "2", "3", "1"].iter().map(|v| v.to_string()));

        fields.join(",")
    }

    #[test]
    fn parses_instance_line() {
        let instance = Instance::parse(&instance_line()).unwrap();

        assert_eq!(instance.instance_id(), 7);
        assert_eq!(instance.num_customers(), 2);
        assert_eq!(instance.num_stacks(), 2);
        assert_eq!(instance.stack_capacity(), 5.0);
        assert_eq!(instance.handling_cost(), 1.5);

        assert_eq!(instance.distance_from_depot(0), 1.0);
        assert_eq!(instance.distance_to_depot(1), 2.0);
        assert_eq!(instance.distance_between(0, 1), 3.0);

        assert_eq!(instance.demand(0), 4.0);
        assert_eq!(instance.pickup(0), 2.0);
        assert_eq!(instance.demand(1), 3.0);
        assert_eq!(instance.pickup(1), 1.0);
    }

    #[test]
    fn rejects_oversized_item() {
        // Stack capacity is 10 / 2 = 5, but customer 1's demand is 6.
        let line = instance_line().replace(",3,1", ",6,1");
        let result = Instance::parse(&line);

        assert!(matches!(
            result,
            Err(InstanceError::ItemExceedsStackCapacity { customer: 1, .. })
        ));
    }

    #[test]
    fn rejects_truncated_line() {
        let line = instance_line();
        let truncated = &line[..line.len() - 4];

        assert!(matches!(
            Instance::parse(truncated),
            Err(InstanceError::WrongLength { .. })
        ));
    }

    #[test]
    fn nearest_customers_are_sorted_by_distance() {
        let instance = Instance::parse(&instance_line()).unwrap();

        assert_eq!(instance.nearest_customers(0), &[1]);
        assert_eq!(instance.nearest_customers(1), &[0]);
    }

    #[test]
    fn quantity_ordering_is_ascending() {
        let instance = Instance::parse(&instance_line()).unwrap();

        // Customer 1 has quantity 4, customer 0 has 6.
        assert_eq!(instance.customers_by_quantity(), &[1, 0]);
    }
}
