use rand::Rng;

/// Samples `count` distinct positions out of `0..length` with a triangular
/// bias: position 0 is most likely, positions `count..` share a uniform
/// baseline weight. Callers map position 0 onto whichever end of their
/// sorted candidate list should be favoured, so the choice stays random
/// instead of deterministically extreme (which would make the search cycle).
pub fn skewed_selection<R>(rng: &mut R, length: usize, count: usize) -> Vec<usize>
where
    R: Rng,
{
    let count = count.min(length);

    let mut weights = (0..length)
        .map(|position| {
            if position < count {
                (count - position) as f64
            } else {
                1.0
            }
        })
        .collect::<Vec<_>>();

    let mut positions = (0..length).collect::<Vec<_>>();
    let mut selected = Vec::with_capacity(count);

    for _ in 0..count {
        let total: f64 = weights.iter().sum();
        let mut draw = rng.random_range(0.0..total);

        let mut chosen = weights.len() - 1;
        for (index, &weight) in weights.iter().enumerate() {
            if draw < weight {
                chosen = index;
                break;
            }
            draw -= weight;
        }

        selected.push(positions.swap_remove(chosen));
        weights.swap_remove(chosen);
    }

    selected
}
