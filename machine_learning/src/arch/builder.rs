use super::{
    Sequential,
    activations::ActFn,
    layers::Layer,
    spec::{ActFnSpec, LayerSpec, ModelSpec},
};
use crate::{MlErr, Result};

/// Builds models given a specification.
#[derive(Default)]
pub struct ModelBuilder {
    seed: u64,
}

impl ModelBuilder {
    /// Creates a new `ModelBuilder`.
    ///
    /// # Arguments
    /// * `seed` - The base seed for the layers that own a random number generator.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Builds a new model following a spec.
    ///
    /// # Arguments
    /// * `spec` - The specification for the model.
    ///
    /// # Returns
    /// The model or an error if adjacent layers have incompatible sizes.
    pub fn build(&self, spec: &ModelSpec) -> Result<Sequential> {
        match spec {
            ModelSpec::Sequential { layers } => {
                self.validate(layers)?;

                let layers = layers
                    .iter()
                    .enumerate()
                    .map(|(i, spec)| self.resolve_layer(i, *spec));

                Ok(Sequential::new(layers))
            }
        }
    }

    fn validate(&self, layers: &[LayerSpec]) -> Result<()> {
        let mut width: Option<usize> = None;

        for spec in layers {
            match *spec {
                LayerSpec::Dense { dim: (n, m), .. } => {
                    check_width(width, n)?;
                    width = Some(m);
                }
                LayerSpec::BatchNorm { dim } => {
                    check_width(width, dim)?;
                    width = Some(dim);
                }
                LayerSpec::Dropout { .. } => {}
            }
        }

        Ok(())
    }

    fn resolve_layer(&self, idx: usize, spec: LayerSpec) -> Layer {
        match spec {
            LayerSpec::Dense { dim, act_fn } => Layer::dense(dim, act_fn.map(resolve_act_fn)),
            LayerSpec::BatchNorm { dim } => Layer::batch_norm(dim),
            LayerSpec::Dropout { rate } => Layer::dropout(rate, self.seed.wrapping_add(idx as u64)),
        }
    }
}

fn resolve_act_fn(spec: ActFnSpec) -> ActFn {
    match spec {
        ActFnSpec::Relu => ActFn::relu(),
        ActFnSpec::Sigmoid => ActFn::sigmoid(),
    }
}

fn check_width(width: Option<usize>, input: usize) -> Result<()> {
    match width {
        Some(expected) if expected != input => Err(MlErr::SizeMismatch {
            what: "layer input",
            got: input,
            expected,
        }),
        _ => Ok(()),
    }
}
