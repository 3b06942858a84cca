use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{MlErr, Result};

/// The row indices of a train/test split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Randomly splits `n` rows into a train and a test set.
///
/// The indices are permuted with a generator seeded by `seed`, the first `ceil(n * test_fraction)`
/// of them become the test set and the remaining ones the train set, so the same inputs always
/// yield the same split.
///
/// # Arguments
/// * `n` - The amount of rows.
/// * `test_fraction` - The portion of rows held out for testing, in `(0, 1)`.
/// * `seed` - The seed for the permutation.
pub fn train_test_split(n: usize, test_fraction: f32, seed: u64) -> Result<Split> {
    if !(test_fraction > 0. && test_fraction < 1.) {
        return Err(MlErr::InvalidFraction(test_fraction));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut StdRng::seed_from_u64(seed));

    let n_test = (n as f32 * test_fraction).ceil() as usize;
    let train = indices.split_off(n_test);

    Ok(Split {
        train,
        test: indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eighty_twenty() {
        let split = train_test_split(1000, 0.2, 42).unwrap();

        assert_eq!(split.train.len(), 800);
        assert_eq!(split.test.len(), 200);
    }

    #[test]
    fn test_size_rounds_up() {
        let split = train_test_split(11, 0.2, 0).unwrap();

        assert_eq!(split.test.len(), 3);
        assert_eq!(split.train.len(), 8);
    }

    #[test]
    fn deterministic_for_a_seed() {
        let a = train_test_split(100, 0.2, 7).unwrap();
        let b = train_test_split(100, 0.2, 7).unwrap();
        let c = train_test_split(100, 0.2, 8).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn partitions_every_row() {
        let split = train_test_split(50, 0.2, 1).unwrap();

        let mut all: Vec<_> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();

        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn invalid_fraction_fails() {
        assert!(train_test_split(10, 0., 0).is_err());
        assert!(train_test_split(10, 1., 0).is_err());
    }
}
