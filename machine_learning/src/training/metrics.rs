use ndarray::{ArrayView2, Zip};

use crate::{
    MlErr, Result,
    arch::{Mode, Model, loss::LossFn},
    dataset::Dataset,
};

/// The loss and accuracy of a model over a set of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochStats {
    pub loss: f32,
    pub accuracy: f32,
}

/// Computes the fraction of predictions that land on the same side of `0.5` as the targets.
///
/// A prediction of exactly `0.5` counts as the negative class.
pub fn binary_accuracy(y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> f32 {
    if y.is_empty() {
        return 0.;
    }

    let hits = Zip::from(&y_pred)
        .and(&y)
        .fold(0usize, |acc, &p, &t| acc + ((p > 0.5) == (t > 0.5)) as usize);

    hits as f32 / y.len() as f32
}

/// Evaluates `model` over the whole dataset in a single evaluation mode pass.
///
/// # Arguments
/// * `model` - The model to evaluate.
/// * `params` - The model's parameters.
/// * `dataset` - The samples to evaluate on.
/// * `loss_fn` - The loss function.
///
/// # Returns
/// The loss and accuracy over `dataset`, or an error if it's empty.
pub fn evaluate<M, L>(
    model: &mut M,
    params: &[f32],
    dataset: &Dataset,
    loss_fn: &L,
) -> Result<EpochStats>
where
    M: Model,
    L: LossFn,
{
    if dataset.is_empty() {
        return Err(MlErr::EmptyBatch);
    }

    let y_pred = model.forward(params, dataset.x().to_owned(), Mode::Eval)?;

    Ok(EpochStats {
        loss: loss_fn.loss(y_pred.view(), dataset.y()),
        accuracy: binary_accuracy(y_pred.view(), dataset.y()),
    })
}
