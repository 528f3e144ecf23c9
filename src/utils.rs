//! Utility functions for the Cortica crate.
//!
//! Random-index helpers used by proximal initialization and learning-cell
//! sampling. All of them draw from a caller-supplied generator so the
//! region's seed stays the single source of randomness.

use rand::Rng;

/// Generate a random unsigned integer in range [min, max] (inclusive).
#[inline]
pub fn rand_uint<R: Rng>(min: u32, max: u32, rng: &mut R) -> u32 {
    rng.gen_range(min..=max)
}

/// Shuffle a slice of indices in-place using Fisher-Yates.
///
/// # Examples
///
/// ```
/// use cortica::utils::shuffle_indices;
/// use rand::SeedableRng;
///
/// let mut indices = vec![0, 1, 2, 3, 4];
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// shuffle_indices(&mut indices, &mut rng);
/// ```
pub fn shuffle_indices<R: Rng>(arr: &mut [usize], rng: &mut R) {
    for i in (1..arr.len()).rev() {
        let j = rng.gen_range(0..=i);
        arr.swap(i, j);
    }
}

/// Draw `n` distinct elements from `pool` without replacement.
///
/// Linear-scan partial shuffle: position `i` swaps with a random position
/// in `i..len`, so only the first `n` slots are ever decided. Returns the
/// sampled prefix; `pool` order beyond it is unspecified. If `n >=
/// pool.len()` the whole pool is returned shuffled.
pub fn sample_indices<R: Rng>(pool: &mut Vec<usize>, n: usize, rng: &mut R) -> Vec<usize> {
    let n = n.min(pool.len());
    for i in 0..n {
        let j = rng.gen_range(i..pool.len());
        pool.swap(i, j);
    }
    pool[..n].to_vec()
}
