use ndarray::{Array2, ArrayView2, Zip};

use super::LossFn;

/// Binary cross-entropy loss function, for models whose output is a probability.
#[derive(Clone, Copy, Debug)]
pub struct BinaryCrossEntropy {
    epsilon: f32,
}

impl BinaryCrossEntropy {
    /// Returns a new `BinaryCrossEntropy`.
    ///
    /// # Arguments
    /// * `epsilon` - Predictions are clamped to `[epsilon, 1 - epsilon]` before taking logarithms.
    pub fn new(epsilon: f32) -> Self {
        Self { epsilon }
    }

    fn clamp(&self, p: f32) -> f32 {
        p.clamp(self.epsilon, 1. - self.epsilon)
    }
}

impl Default for BinaryCrossEntropy {
    fn default() -> Self {
        Self::new(1e-7)
    }
}

impl LossFn for BinaryCrossEntropy {
    fn loss(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> f32 {
        let n = y_pred.len();
        if n == 0 {
            return 0.;
        }

        let total = Zip::from(&y_pred).and(&y).fold(0., |acc, &p, &y| {
            let p = self.clamp(p);
            acc - (y * p.ln() + (1. - y) * (1. - p).ln())
        });

        total / n as f32
    }

    fn loss_prime(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> Array2<f32> {
        let n = y_pred.len().max(1) as f32;

        Zip::from(&y_pred).and(&y).map_collect(|&p, &y| {
            let p = self.clamp(p);
            (p - y) / (p * (1. - p)) / n
        })
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn perfect_predictions_have_near_zero_loss() {
        let bce = BinaryCrossEntropy::default();
        let y = array![[1.0], [0.0]];

        let loss = bce.loss(y.view(), y.view());
        assert!(loss < 1e-5, "loss: {loss}");
    }

    #[test]
    fn uninformed_predictions_cost_ln_2() {
        let bce = BinaryCrossEntropy::default();
        let y_pred = array![[0.5], [0.5]];
        let y = array![[1.0], [0.0]];

        let loss = bce.loss(y_pred.view(), y.view());
        assert!((loss - std::f32::consts::LN_2).abs() < 1e-5);
    }

    #[test]
    fn saturated_predictions_stay_finite() {
        let bce = BinaryCrossEntropy::default();
        let y_pred = array![[0.0], [1.0]];
        let y = array![[1.0], [0.0]];

        assert!(bce.loss(y_pred.view(), y.view()).is_finite());
        assert!(bce.loss_prime(y_pred.view(), y.view()).iter().all(|d| d.is_finite()));
    }

    #[test]
    fn gradient_points_towards_the_label() {
        let bce = BinaryCrossEntropy::default();
        let y_pred = array![[0.3], [0.7]];
        let y = array![[1.0], [0.0]];

        let d = bce.loss_prime(y_pred.view(), y.view());
        assert!(d[[0, 0]] < 0.);
        assert!(d[[1, 0]] > 0.);
    }
}
