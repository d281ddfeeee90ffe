use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

// Shared by several test crates; not every helper is used by each of them.
#[allow(dead_code)]
pub(crate) fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Samples `count` values in `[low, high)` whose magnitude is at least `min_abs`,
/// keeping test points away from kinks and singularities at zero.
#[allow(dead_code)]
pub(crate) fn sample_inputs(rng: &mut StdRng, count: usize, low: f64, high: f64, min_abs: f64) -> Vec<f64> {
    let dist = Uniform::new(low, high);
    let mut values = Vec::with_capacity(count);
    while values.len() < count {
        let v: f64 = dist.sample(rng);
        if v.abs() >= min_abs {
            values.push(v);
        }
    }
    values
}

#[allow(dead_code)]
pub(crate) fn toy_dataset() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let xs = vec![
        vec![2.0, 3.0, -1.0],
        vec![3.0, -1.0, 0.5],
        vec![0.5, 1.0, 1.0],
        vec![1.0, 1.0, -1.0],
    ];
    let ys = vec![vec![1.0], vec![-1.0], vec![-1.0], vec![1.0]];
    (xs, ys)
}
