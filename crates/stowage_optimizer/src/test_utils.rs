use crate::problem::Instance;

/// Three customers with delivery volumes 5, 4, 3 and pickup volumes 2, 3,
/// 0.5 on a short line; total capacity 10 split over the given stacks.
pub(crate) fn small_instance(num_stacks: usize, handling_cost: f64) -> Instance {
    #[rustfmt::skip]
    let distances = vec![
        0.0, 1.0, 2.0, 3.0,
        1.0, 0.0, 1.0, 2.0,
        2.0, 1.0, 0.0, 1.0,
        3.0, 2.0, 1.0, 0.0,
    ];

    Instance::new(
        1,
        10.0,
        handling_cost,
        num_stacks,
        distances,
        vec![5.0, 4.0, 3.0],
        vec![2.0, 3.0, 0.5],
    )
    .unwrap()
}

/// Customers at positions 1..=n on a line with the depot at 0, uniform
/// delivery and pickup volumes.
pub(crate) fn line_instance(
    num_customers: usize,
    capacity: f64,
    num_stacks: usize,
    handling_cost: f64,
    demand: f64,
    pickup: f64,
) -> Instance {
    let num_nodes = num_customers + 1;
    let mut distances = vec![0.0; num_nodes * num_nodes];

    for i in 0..num_nodes {
        for j in 0..num_nodes {
            distances[i * num_nodes + j] = (i as f64 - j as f64).abs();
        }
    }

    Instance::new(
        2,
        capacity,
        handling_cost,
        num_stacks,
        distances,
        vec![demand; num_customers],
        vec![pickup; num_customers],
    )
    .unwrap()
}

/// An instance with an explicit distance matrix.
pub(crate) fn matrix_instance(
    distances: Vec<f64>,
    demands: Vec<f64>,
    pickups: Vec<f64>,
    capacity: f64,
    num_stacks: usize,
    handling_cost: f64,
) -> Instance {
    Instance::new(
        3,
        capacity,
        handling_cost,
        num_stacks,
        distances,
        demands,
        pickups,
    )
    .unwrap()
}
