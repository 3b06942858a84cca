use ndarray::prelude::*;

use crate::{
    MlErr, Result,
    arch::Mode,
    initialization::{ConstParamGen, ParamGen},
};

const MOMENTUM: f32 = 0.99;
const EPSILON: f32 = 1e-3;

/// Batch normalization over the feature axis.
///
/// Its parameters are the `dim` scales (gamma) followed by the `dim` offsets (beta). The running
/// mean and variance used in evaluation mode are layer state, not parameters.
#[derive(Clone, Debug)]
pub struct BatchNorm {
    dim: usize,
    running_mean: Array1<f32>,
    running_var: Array1<f32>,

    // Forward metadata
    x_hat: Array2<f32>,
    inv_std: Array1<f32>,
}

impl BatchNorm {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            running_mean: Array1::zeros(dim),
            running_var: Array1::ones(dim),
            x_hat: Array2::zeros((0, dim)),
            inv_std: Array1::ones(dim),
        }
    }

    pub fn size(&self) -> usize {
        2 * self.dim
    }

    pub fn param_gens(&self) -> Vec<Box<dyn ParamGen>> {
        let gamma: Box<dyn ParamGen> = Box::new(ConstParamGen::ones(self.dim));
        let beta: Box<dyn ParamGen> = Box::new(ConstParamGen::zeros(self.dim));

        vec![gamma, beta]
    }

    pub fn forward(&mut self, params: &[f32], x: Array2<f32>, mode: Mode) -> Result<Array2<f32>> {
        if x.ncols() != self.dim {
            return Err(MlErr::SizeMismatch {
                what: "batch norm input",
                got: x.ncols(),
                expected: self.dim,
            });
        }

        let (gamma, beta) = self.view_params(params)?;

        let (mean, var) = match mode {
            Mode::Train => {
                let mean = x.mean_axis(Axis(0)).ok_or(MlErr::EmptyBatch)?;
                let var = x.var_axis(Axis(0), 0.);

                self.running_mean = &self.running_mean * MOMENTUM + &mean * (1. - MOMENTUM);
                self.running_var = &self.running_var * MOMENTUM + &var * (1. - MOMENTUM);
                (mean, var)
            }
            Mode::Eval => (self.running_mean.clone(), self.running_var.clone()),
        };

        let inv_std = var.mapv(|v| 1. / (v + EPSILON).sqrt());
        let x_hat = (x - &mean) * &inv_std;
        let out = &x_hat * &gamma + &beta;

        self.x_hat = x_hat;
        self.inv_std = inv_std;
        Ok(out)
    }

    pub fn backward(
        &mut self,
        params: &[f32],
        grad: &mut [f32],
        d: Array2<f32>,
    ) -> Result<Array2<f32>> {
        let n = d.nrows() as f32;
        let (gamma, _) = self.view_params(params)?;

        let (dgamma_raw, dbeta_raw) = grad.split_at_mut(self.dim);
        let mut dgamma = ArrayViewMut1::from_shape(self.dim, dgamma_raw)?;
        let mut dbeta = ArrayViewMut1::from_shape(self.dim, dbeta_raw)?;
        dgamma.assign(&(&d * &self.x_hat).sum_axis(Axis(0)));
        dbeta.assign(&d.sum_axis(Axis(0)));

        let dx_hat = d * &gamma;
        let sum_dx_hat = dx_hat.sum_axis(Axis(0));
        let sum_dx_hat_x_hat = (&dx_hat * &self.x_hat).sum_axis(Axis(0));

        let scale = &self.inv_std / n;
        let dx = (dx_hat * n - &sum_dx_hat - &self.x_hat * &sum_dx_hat_x_hat) * &scale;
        Ok(dx)
    }

    fn view_params<'a>(
        &self,
        params: &'a [f32],
    ) -> Result<(ArrayView1<'a, f32>, ArrayView1<'a, f32>)> {
        let (gamma_raw, beta_raw) = params.split_at(self.dim.min(params.len()));
        let gamma = ArrayView1::from_shape(self.dim, gamma_raw)?;
        let beta = ArrayView1::from_shape(self.dim, beta_raw)?;
        Ok((gamma, beta))
    }
}
