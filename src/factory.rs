use machine_learning::{
    Result,
    arch::{
        ModelBuilder, Sequential,
        spec::{ActFnSpec, LayerSpec, ModelSpec},
    },
};
use serde::{Deserialize, Serialize};

/// The dropout rate after the first hidden layer.
pub const DROPOUT_RATE: f32 = 0.3;

const SHALLOW_HIDDEN: [usize; 4] = [64, 32, 16, 8];
const DEEP_HIDDEN: [usize; 5] = [128, 64, 32, 16, 8];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Architecture {
    #[default]
    Shallow,
    Deep,
}

impl Architecture {
    pub fn hidden(self) -> &'static [usize] {
        match self {
            Architecture::Shallow => &SHALLOW_HIDDEN,
            Architecture::Deep => &DEEP_HIDDEN,
        }
    }
}

/// Lays out a feed forward binary classifier over `n_features` inputs.
///
/// The first hidden layer is followed by batch normalization and dropout, every hidden layer
/// uses ReLU and the single output unit a sigmoid.
pub fn model_spec(architecture: Architecture, n_features: usize) -> ModelSpec {
    let hidden = architecture.hidden();
    let mut layers = Vec::with_capacity(hidden.len() + 3);
    let mut width = n_features;

    for (i, &dim) in hidden.iter().enumerate() {
        layers.push(LayerSpec::Dense {
            dim: (width, dim),
            act_fn: Some(ActFnSpec::Relu),
        });

        if i == 0 {
            layers.push(LayerSpec::BatchNorm { dim });
            layers.push(LayerSpec::Dropout { rate: DROPOUT_RATE });
        }

        width = dim;
    }

    layers.push(LayerSpec::Dense {
        dim: (width, 1),
        act_fn: Some(ActFnSpec::Sigmoid),
    });

    ModelSpec::Sequential { layers }
}

/// Builds the model for `n_features` inputs, seeding its dropout layers with `seed`.
pub fn build_model(
    architecture: Architecture,
    n_features: usize,
    seed: u64,
) -> Result<Sequential> {
    ModelBuilder::new(seed).build(&model_spec(architecture, n_features))
}

#[cfg(test)]
mod tests {
    use machine_learning::arch::Model;

    use super::*;

    #[test]
    fn shallow_layout() {
        let ModelSpec::Sequential { layers } = model_spec(Architecture::Shallow, 5);

        assert_eq!(layers.len(), 7);
        assert_eq!(
            layers[0],
            LayerSpec::Dense {
                dim: (5, 64),
                act_fn: Some(ActFnSpec::Relu)
            }
        );
        assert_eq!(layers[1], LayerSpec::BatchNorm { dim: 64 });
        assert_eq!(layers[2], LayerSpec::Dropout { rate: 0.3 });
        assert_eq!(
            layers[6],
            LayerSpec::Dense {
                dim: (8, 1),
                act_fn: Some(ActFnSpec::Sigmoid)
            }
        );
    }

    #[test]
    fn deep_has_one_more_hidden_layer() {
        let ModelSpec::Sequential { layers } = model_spec(Architecture::Deep, 4);

        let dense = layers
            .iter()
            .filter(|l| matches!(l, LayerSpec::Dense { .. }))
            .count();
        assert_eq!(dense, 6);
        assert_eq!(layers[1], LayerSpec::BatchNorm { dim: 128 });
    }

    #[test]
    fn built_model_size() {
        let model = build_model(Architecture::Shallow, 5, 0).unwrap();

        let dense = (5 + 1) * 64 + (64 + 1) * 32 + (32 + 1) * 16 + (16 + 1) * 8 + (8 + 1);
        assert_eq!(model.size(), dense + 2 * 64);
    }
}
