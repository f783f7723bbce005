//! Weight vector operators used by reproduction.
//!
//! A genome is a flat vector of connection weights and biases (see
//! [`GenomeShape`](crate::GenomeShape) for the layout). These functions create
//! and recombine such vectors; [`PopulationEvolver`](crate::PopulationEvolver)
//! strings them together into one generation's reproduction step.
//!
//! # Operations
//!
//! - **Initialization**: [`random`] draws every weight uniformly
//! - **Crossover**: [`blx_alpha`] blends two parents position by position
//! - **Mutation**: [`mutate`] adds Gaussian noise to a random subset
//!
//! # Design Decisions
//!
//! ## Signed, Symmetric Bounds
//!
//! Network weights and biases may be negative, and a steering output is read
//! by its sign alone. Every operator therefore works on the symmetric range
//! `[-max_weight, max_weight]` and clamps its results into it. There is no
//! normalization step: scaling all weights of a `tanh` network changes its
//! outputs, so two vectors differing by a constant factor are different
//! solutions here.
//!
//! ## BLX-α Crossover
//!
//! For parents `x1` and `x2` at one position, the child is drawn from
//! `[min - α·d, max + α·d]` where `d = |x1 - x2|`. With `α = 0` the child lies
//! between the parents; larger values let it land outside. Identical parents
//! (`d = 0`) produce an identical child, so only mutation moves a converged
//! population.
//!
//! ## Gaussian Mutation
//!
//! Each weight is perturbed with probability `rate` by a sample of
//! `N(0, σ²)`. `rate = 0` leaves the vector untouched.

use rand::Rng;
use rand_distr::Normal;

/// Creates a weight vector by applying a function to each index.
///
/// # Arguments
///
/// * `f` - Function mapping index to weight value
/// * `len` - Number of weights to generate
///
/// # Examples
///
/// ```
/// use dodger_neat::weights;
///
/// let w = weights::from_fn(|i| i as f32 - 1.0, 3);
/// assert_eq!(w, vec![-1.0, 0.0, 1.0]);
/// ```
pub fn from_fn<F>(f: F, len: usize) -> Vec<f32>
where
    F: FnMut(usize) -> f32,
{
    (0..len).map(f).collect()
}

/// Samples each weight uniformly from `[-max_weight, max_weight]`.
///
/// Used for the first generation; later generations come from
/// [`blx_alpha`] and [`mutate`].
pub fn random<R>(rng: &mut R, max_weight: f32, len: usize) -> Vec<f32>
where
    R: Rng + ?Sized,
{
    from_fn(|_| rng.random_range(-max_weight..=max_weight), len)
}

/// BLX-α crossover.
///
/// For each position the child is drawn uniformly from the parents' interval
/// widened by `alpha` times its length on both sides, then clamped.
///
/// # Arguments
///
/// * `p1`, `p2` - Parent weight vectors of equal length
/// * `alpha` - Range expansion factor (0.0 keeps children between parents)
/// * `max_weight` - Children are clamped to `[-max_weight, max_weight]`
/// * `rng` - Random source
///
/// # Panics
///
/// Panics if the parents have different lengths.
pub fn blx_alpha<R>(p1: &[f32], p2: &[f32], alpha: f32, max_weight: f32, rng: &mut R) -> Vec<f32>
where
    R: Rng + ?Sized,
{
    assert_eq!(p1.len(), p2.len(), "parents must have the same length");
    p1.iter()
        .zip(p2)
        .map(|(&x1, &x2)| {
            let min = f32::min(x1, x2);
            let max = f32::max(x1, x2);
            let d = max - min;
            rng.random_range((min - alpha * d)..=(max + alpha * d))
                .clamp(-max_weight, max_weight)
        })
        .collect()
}

/// Gaussian mutation: with probability `rate`, adds `N(0, sigma)` noise to a
/// weight and clamps it.
///
/// # Arguments
///
/// * `weights` - Vector mutated in place
/// * `sigma` - Standard deviation of the noise
/// * `max_weight` - Mutated weights are clamped to `[-max_weight, max_weight]`
/// * `rate` - Per-weight mutation probability in `[0, 1]`
/// * `rng` - Random source
///
/// # Panics
///
/// Panics if `sigma` is negative or not finite.
pub fn mutate<R>(weights: &mut [f32], sigma: f32, max_weight: f32, rate: f32, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let normal = Normal::new(0.0, sigma).expect("mutation sigma must be finite and non-negative");
    for w in weights {
        if rng.random_bool(rate.into()) {
            *w = (*w + rng.sample(normal)).clamp(-max_weight, max_weight);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn test_random_is_signed_and_bounded() {
        let mut rng = Pcg64Mcg::seed_from_u64(0);
        let w = random(&mut rng, 2.0, 1000);
        assert!(w.iter().all(|x| (-2.0..=2.0).contains(x)));
        assert!(w.iter().any(|&x| x < 0.0));
        assert!(w.iter().any(|&x| x > 0.0));
    }

    #[test]
    fn test_blx_alpha_zero_stays_between_parents() {
        let mut rng = Pcg64Mcg::seed_from_u64(0);
        let p1 = [-1.0, 0.5, 2.0];
        let p2 = [1.0, 0.5, -2.0];
        for _ in 0..100 {
            let child = blx_alpha(&p1, &p2, 0.0, 10.0, &mut rng);
            for ((c, a), b) in child.iter().zip(p1).zip(p2) {
                assert!(*c >= a.min(b) && *c <= a.max(b));
            }
        }
    }

    #[test]
    fn test_blx_alpha_is_clamped() {
        let mut rng = Pcg64Mcg::seed_from_u64(0);
        for _ in 0..100 {
            let child = blx_alpha(&[-1.0], &[1.0], 5.0, 1.5, &mut rng);
            assert!((-1.5..=1.5).contains(&child[0]));
        }
    }

    #[test]
    fn test_mutate_rate_bounds() {
        let mut rng = Pcg64Mcg::seed_from_u64(0);
        let mut w = vec![0.5; 50];
        mutate(&mut w, 1.0, 5.0, 0.0, &mut rng);
        assert!(w.iter().all(|&x| x == 0.5));

        mutate(&mut w, 100.0, 5.0, 1.0, &mut rng);
        assert!(w.iter().all(|x| (-5.0..=5.0).contains(x)));
        assert!(w.iter().any(|&x| x != 0.5));
    }
}
