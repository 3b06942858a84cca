use std::{cell::RefCell, rc::Rc};

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use super::{ParamGen, Result, param_gen::take};

/// Draws parameters from a distribution.
///
/// The generator is shared through `Rc<RefCell<_>>` so every layer of a model consumes the same
/// seeded stream, in layer order.
pub struct RandParamGen<R: Rng, D: Distribution<f32>> {
    rng: Rc<RefCell<R>>,
    distribution: D,
    remaining: usize,
}

impl<R: Rng, D: Distribution<f32>> RandParamGen<R, D> {
    pub fn new(rng: Rc<RefCell<R>>, distribution: D, limit: usize) -> Self {
        Self {
            rng,
            distribution,
            remaining: limit,
        }
    }
}

impl<R: Rng> RandParamGen<R, Uniform<f32>> {
    /// Samples uniformly from `[low, high)`.
    ///
    /// # Returns
    /// An error if `low >= high` or either bound isn't finite.
    pub fn uniform(rng: Rc<RefCell<R>>, limit: usize, low: f32, high: f32) -> Result<Self> {
        let distribution = Uniform::new(low, high)?;
        Ok(Self::new(rng, distribution, limit))
    }

    /// Glorot uniform initialization for a `(fan_in, fan_out)` weight matrix: uniform over
    /// `[-l, l)` with `l = sqrt(6 / (fan_in + fan_out))`.
    ///
    /// # Arguments
    /// * `rng` - The shared generator.
    /// * `limit` - How many weights to generate.
    /// * `fan_in` - The amount of inputs of the layer.
    /// * `fan_out` - The amount of outputs of the layer.
    pub fn xavier_uniform(
        rng: Rc<RefCell<R>>,
        limit: usize,
        fan_in: usize,
        fan_out: usize,
    ) -> Result<Self> {
        let l = (6. / (fan_in + fan_out) as f32).sqrt();
        Self::uniform(rng, limit, -l, l)
    }
}

impl<R: Rng, D: Distribution<f32>> ParamGen for RandParamGen<R, D> {
    fn remaining(&self) -> usize {
        self.remaining
    }

    fn sample(&mut self, n: usize) -> Option<Vec<f32>> {
        let n = take(&mut self.remaining, n)?;
        let mut rng = self.rng.borrow_mut();

        Some((0..n).map(|_| self.distribution.sample(&mut *rng)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded_rng() -> Rc<RefCell<StdRng>> {
        Rc::new(RefCell::new(StdRng::seed_from_u64(42)))
    }

    #[test]
    fn empty() {
        let mut param_gen = RandParamGen::uniform(seeded_rng(), 0, 0., 1.).unwrap();
        assert!(param_gen.sample(1).is_none());
    }

    #[test]
    fn partial() {
        let mut param_gen = RandParamGen::xavier_uniform(seeded_rng(), 10, 4, 2).unwrap();

        let sample = param_gen.sample(7).unwrap();
        assert_eq!(sample.len(), 7);

        let sample = param_gen.sample(7).unwrap();
        assert_eq!(sample.len(), 3);

        assert!(param_gen.sample(1).is_none());
    }

    #[test]
    fn xavier_uniform_stays_in_range() {
        let range = (6f32 / 12.).sqrt();
        let mut param_gen = RandParamGen::xavier_uniform(seeded_rng(), 100, 4, 8).unwrap();

        let sample = param_gen.sample(100).unwrap();
        assert!(sample.iter().all(|w| (-range..=range).contains(w)));
    }

    #[test]
    fn invalid_range_fails() {
        assert!(RandParamGen::uniform(seeded_rng(), 1, 1., -1.).is_err());
    }
}
