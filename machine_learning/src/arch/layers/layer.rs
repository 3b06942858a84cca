use std::{cell::RefCell, rc::Rc};

use ndarray::Array2;
use rand::Rng;

use super::{BatchNorm, Dense, Dropout};

use crate::{
    Result,
    arch::{Mode, activations::ActFn},
    initialization::ParamGen,
};

#[derive(Clone, Debug)]
pub enum Layer {
    Dense(Dense),
    BatchNorm(BatchNorm),
    Dropout(Dropout),
}
use Layer::*;

impl Layer {
    pub fn dense(dim: (usize, usize), act_fn: Option<ActFn>) -> Self {
        Dense(super::Dense::new(dim, act_fn))
    }

    pub fn batch_norm(dim: usize) -> Self {
        BatchNorm(super::BatchNorm::new(dim))
    }

    pub fn dropout(rate: f32, seed: u64) -> Self {
        Dropout(super::Dropout::new(rate, seed))
    }

    /// Returns the amount of trainable parameters of this layer.
    pub fn size(&self) -> usize {
        match self {
            Dense(l) => l.size(),
            BatchNorm(l) => l.size(),
            Dropout(_) => 0,
        }
    }

    /// Returns the generators for this layer's initial parameters, in buffer order.
    pub fn param_gens<R: Rng + 'static>(
        &self,
        rng: &Rc<RefCell<R>>,
    ) -> Result<Vec<Box<dyn ParamGen>>> {
        match self {
            Dense(l) => l.param_gens(rng),
            BatchNorm(l) => Ok(l.param_gens()),
            Dropout(_) => Ok(Vec::new()),
        }
    }

    pub fn forward(&mut self, params: &[f32], x: Array2<f32>, mode: Mode) -> Result<Array2<f32>> {
        match self {
            Dense(l) => l.forward(params, x),
            BatchNorm(l) => l.forward(params, x, mode),
            Dropout(l) => Ok(l.forward(x, mode)),
        }
    }

    pub fn backward(
        &mut self,
        params: &[f32],
        grad: &mut [f32],
        d: Array2<f32>,
    ) -> Result<Array2<f32>> {
        match self {
            Dense(l) => l.backward(params, grad, d),
            BatchNorm(l) => l.backward(params, grad, d),
            Dropout(l) => Ok(l.backward(d)),
        }
    }
}
