use std::{cell::RefCell, mem, rc::Rc};

use ndarray::{Array2, ArrayView2};
use rand::Rng;

use super::{Mode, Model, layers::Layer, loss::LossFn};
use crate::{
    MlErr, Result,
    initialization::{ChainedParamGen, ParamGen},
    optimization::Optimizer,
    training::{EpochStats, binary_accuracy},
};

/// A sequential model: information flows forward when computing an output and backward when
/// computing the *deltas* of its layers.
///
/// The parameters are not owned by the model, they live in a flat buffer laid out layer after
/// layer in the same order as `layers`.
#[derive(Clone, Debug)]
pub struct Sequential {
    layers: Vec<Layer>,
}

impl Sequential {
    /// Creates a new `Sequential`.
    ///
    /// # Arguments
    /// * `layers` - The layers the sequential is composed of.
    ///
    /// # Returns
    /// A new `Sequential` instance.
    pub fn new<I>(layers: I) -> Self
    where
        I: IntoIterator<Item = Layer>,
    {
        Self {
            layers: layers.into_iter().collect(),
        }
    }

    /// Returns the layers of this model.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    fn check_len(&self, what: &'static str, len: usize) -> Result<()> {
        let expected = self.size();

        if len != expected {
            return Err(MlErr::SizeMismatch {
                what,
                got: len,
                expected,
            });
        }

        Ok(())
    }

    /// Propagates the loss derivative `d` from the last layer to the first one, writing each
    /// layer's gradient in its slice of `grad`.
    fn backward(&mut self, params: &[f32], grad: &mut [f32], mut d: Array2<f32>) -> Result<()> {
        let mut params_left = params;
        let mut grad_left = grad;

        for layer in self.layers.iter_mut().rev() {
            let size = layer.size();

            let (params_head, params_tail) = params_left.split_at(params_left.len() - size);
            params_left = params_head;

            let grad_rest = mem::take(&mut grad_left);
            let split = grad_rest.len() - size;
            let (grad_head, grad_tail) = grad_rest.split_at_mut(split);
            grad_left = grad_head;

            d = layer.backward(params_tail, grad_tail, d)?;
        }

        Ok(())
    }
}

impl Model for Sequential {
    fn size(&self) -> usize {
        self.layers.iter().map(|layer| layer.size()).sum()
    }

    fn init_params<R: Rng + 'static>(&self, rng: Rc<RefCell<R>>) -> Result<Vec<f32>> {
        let mut param_gens = Vec::with_capacity(self.layers.len() * 2);

        for layer in &self.layers {
            param_gens.extend(layer.param_gens(&rng)?);
        }

        let expected = self.size();
        let mut param_gen = ChainedParamGen::new(param_gens);

        let available = param_gen.remaining();
        if available < expected {
            return Err(MlErr::ParamGenExhausted {
                got: available,
                expected,
            });
        }

        Ok(param_gen.sample(expected).unwrap_or_default())
    }

    fn forward(&mut self, params: &[f32], mut x: Array2<f32>, mode: Mode) -> Result<Array2<f32>> {
        self.check_len("params", params.len())?;

        let mut params_left = params;

        for layer in self.layers.iter_mut() {
            let (layer_params, rest) = params_left.split_at(layer.size());
            params_left = rest;

            x = layer.forward(layer_params, x, mode)?;
        }

        Ok(x)
    }

    // NOTE: since getting the actual loss would require forwarding over all batches again at
    // the end of the backprop iterations, we are approximating it by averaging the loss at
    // each batch, the same goes for the accuracy.
    fn backprop<'a, L, O, I>(
        &mut self,
        params: &mut [f32],
        grad: &mut [f32],
        loss_fn: &L,
        optimizer: &mut O,
        batches: I,
    ) -> Result<EpochStats>
    where
        L: LossFn,
        O: Optimizer,
        I: Iterator<Item = (ArrayView2<'a, f32>, ArrayView2<'a, f32>)>,
    {
        self.check_len("grad", grad.len())?;

        let mut total_loss = 0.0;
        let mut total_accuracy = 0.0;
        let mut num_batches = 0;

        for (x, y) in batches {
            grad.fill(0.);

            let y_pred = self.forward(params, x.to_owned(), Mode::Train)?;
            total_loss += loss_fn.loss(y_pred.view(), y);
            total_accuracy += binary_accuracy(y_pred.view(), y);
            num_batches += 1;

            let d_last = loss_fn.loss_prime(y_pred.view(), y);
            self.backward(params, grad, d_last)?;

            optimizer.update_params(grad, params)?;
        }

        if num_batches == 0 {
            return Err(MlErr::EmptyBatch);
        }

        Ok(EpochStats {
            loss: total_loss / num_batches as f32,
            accuracy: total_accuracy / num_batches as f32,
        })
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::arch::activations::ActFn;

    fn seeded_rng() -> Rc<RefCell<StdRng>> {
        Rc::new(RefCell::new(StdRng::seed_from_u64(7)))
    }

    #[test]
    fn size_is_the_sum_of_the_layers() {
        let model = Sequential::new([
            Layer::dense((3, 4), Some(ActFn::relu())),
            Layer::batch_norm(4),
            Layer::dropout(0.5, 0),
            Layer::dense((4, 1), Some(ActFn::sigmoid())),
        ]);

        assert_eq!(model.size(), (3 + 1) * 4 + 2 * 4 + (4 + 1));
    }

    #[test]
    fn init_params_fills_the_whole_buffer() {
        let model = Sequential::new([
            Layer::dense((3, 4), Some(ActFn::relu())),
            Layer::batch_norm(4),
            Layer::dense((4, 1), None),
        ]);

        let params = model.init_params(seeded_rng()).unwrap();
        assert_eq!(params.len(), model.size());

        // batch norm's gamma and beta
        assert_eq!(&params[16..20], &[1.; 4]);
        assert_eq!(&params[20..24], &[0.; 4]);
    }

    #[test]
    fn forward_rejects_a_wrong_parameter_count() {
        let mut model = Sequential::new([Layer::dense((2, 1), None)]);
        let x = array![[1.0, 2.0]];

        let res = model.forward(&[0.; 2], x, Mode::Eval);
        assert!(matches!(res, Err(MlErr::SizeMismatch { what: "params", .. })));
    }

    #[test]
    fn forward_rejects_a_wrong_input_width() {
        let mut model = Sequential::new([Layer::dense((2, 1), None)]);
        let x = array![[1.0, 2.0, 3.0]];

        let res = model.forward(&[0.; 3], x, Mode::Eval);
        assert!(matches!(res, Err(MlErr::SizeMismatch { .. })));
    }
}
