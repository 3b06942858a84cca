use std::num::NonZeroUsize;

use log::{debug, info};
use rand::Rng;

use super::{History, evaluate};
use crate::{
    Result,
    arch::{Model, loss::LossFn},
    dataset::Dataset,
    optimization::Optimizer,
};

/// Fits a model for a fixed amount of epochs, validating it after each one.
pub struct ModelTrainer<M: Model, O: Optimizer, L: LossFn, R: Rng> {
    grad: Vec<f32>,
    model: M,
    optimizer: O,
    loss_fn: L,

    epochs: NonZeroUsize,
    batch_size: NonZeroUsize,
    rng: R,
}

impl<M: Model, O: Optimizer, L: LossFn, R: Rng> ModelTrainer<M, O, L, R> {
    /// Creates a new `ModelTrainer`.
    ///
    /// # Arguments
    /// * `model` - The model to fit.
    /// * `optimizer` - The optimizer for the model's parameters.
    /// * `loss_fn` - The loss function to minimize.
    /// * `epochs` - The amount of passes over the training set.
    /// * `batch_size` - The amount of samples per gradient step.
    /// * `rng` - The generator used to reshuffle the training set each epoch.
    pub fn new(
        model: M,
        optimizer: O,
        loss_fn: L,
        epochs: NonZeroUsize,
        batch_size: NonZeroUsize,
        rng: R,
    ) -> Self {
        Self {
            grad: vec![0.; model.size()],
            model,
            optimizer,
            loss_fn,
            epochs,
            batch_size,
            rng,
        }
    }

    /// Trains the model, **updating `params` in place**.
    ///
    /// # Arguments
    /// * `params` - The model's parameters.
    /// * `train` - The training set, reshuffled at the start of every epoch.
    /// * `val` - The validation set, evaluated at the end of every epoch.
    ///
    /// # Returns
    /// The per epoch history of training and validation metrics.
    pub fn train(
        &mut self,
        params: &mut [f32],
        train: &mut Dataset,
        val: &Dataset,
    ) -> Result<History> {
        let epochs = self.epochs.get();
        let mut history = History::with_capacity(epochs);

        for epoch in 1..=epochs {
            train.shuffle(&mut self.rng);
            debug!(
                "epoch {epoch}: {} samples in batches of {}",
                train.len(),
                self.batch_size
            );

            let batches = train.batches(self.batch_size);
            let train_stats = self.model.backprop(
                params,
                &mut self.grad,
                &self.loss_fn,
                &mut self.optimizer,
                batches,
            )?;
            let val_stats = evaluate(&mut self.model, params, val, &self.loss_fn)?;

            info!(
                "epoch {epoch}/{epochs} - loss: {:.4} - accuracy: {:.4} - val_loss: {:.4} - val_accuracy: {:.4}",
                train_stats.loss, train_stats.accuracy, val_stats.loss, val_stats.accuracy
            );

            history.push(train_stats, val_stats);
        }

        Ok(history)
    }

    /// Consumes the trainer, returning the fitted model.
    pub fn into_model(self) -> M {
        self.model
    }
}
