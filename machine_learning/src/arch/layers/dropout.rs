use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::arch::Mode;

/// Inverted dropout: in training mode each unit is zeroed with probability `rate` and the
/// survivors are scaled by `1 / (1 - rate)`, in evaluation mode it's the identity.
#[derive(Clone, Debug)]
pub struct Dropout {
    rate: f32,
    rng: StdRng,
    mask: Option<Array2<f32>>,
}

impl Dropout {
    /// Creates a new `Dropout` layer.
    ///
    /// # Arguments
    /// * `rate` - The probability of dropping a unit, expected in `[0, 1)`.
    /// * `seed` - The seed for the masks' random number generator.
    pub fn new(rate: f32, seed: u64) -> Self {
        Self {
            rate,
            rng: StdRng::seed_from_u64(seed),
            mask: None,
        }
    }

    pub fn forward(&mut self, x: Array2<f32>, mode: Mode) -> Array2<f32> {
        if mode == Mode::Eval || self.rate <= 0. {
            self.mask = None;
            return x;
        }

        let keep = 1. - self.rate;
        let rng = &mut self.rng;
        let mask = Array2::from_shape_simple_fn(x.raw_dim(), || {
            if rng.random::<f32>() < keep { 1. / keep } else { 0. }
        });

        let out = &x * &mask;
        self.mask = Some(mask);
        out
    }

    pub fn backward(&mut self, d: Array2<f32>) -> Array2<f32> {
        match self.mask.take() {
            Some(mask) => d * &mask,
            None => d,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_mode_is_the_identity() {
        let mut dropout = Dropout::new(0.3, 1);
        let x = Array2::from_elem((4, 8), 2.0);

        assert_eq!(dropout.forward(x.clone(), Mode::Eval), x);
    }

    #[test]
    fn train_mode_drops_or_rescales_every_unit() {
        let mut dropout = Dropout::new(0.5, 1);
        let x = Array2::from_elem((32, 32), 1.0);

        let y = dropout.forward(x, Mode::Train);

        assert!(y.iter().all(|&v| v == 0. || v == 2.));
        assert!(y.iter().any(|&v| v == 0.));
        assert!(y.iter().any(|&v| v == 2.));
    }

    #[test]
    fn backward_reuses_the_forward_mask() {
        let mut dropout = Dropout::new(0.5, 3);
        let x = Array2::from_elem((8, 8), 1.0);

        let y = dropout.forward(x, Mode::Train);
        let d = dropout.backward(Array2::from_elem((8, 8), 1.0));

        assert_eq!(y, d);
    }

    #[test]
    fn same_seed_same_masks() {
        let x = Array2::from_elem((8, 8), 1.0);

        let mut a = Dropout::new(0.3, 42);
        let mut b = Dropout::new(0.3, 42);

        assert_eq!(
            a.forward(x.clone(), Mode::Train),
            b.forward(x, Mode::Train)
        );
    }
}
