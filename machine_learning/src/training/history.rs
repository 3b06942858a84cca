use super::EpochStats;

/// Per epoch training and validation metrics, one entry per epoch in every vector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    pub loss: Vec<f32>,
    pub accuracy: Vec<f32>,
    pub val_loss: Vec<f32>,
    pub val_accuracy: Vec<f32>,
}

impl History {
    pub fn with_capacity(epochs: usize) -> Self {
        Self {
            loss: Vec::with_capacity(epochs),
            accuracy: Vec::with_capacity(epochs),
            val_loss: Vec::with_capacity(epochs),
            val_accuracy: Vec::with_capacity(epochs),
        }
    }

    /// Appends the metrics of one epoch.
    pub fn push(&mut self, train: EpochStats, val: EpochStats) {
        self.loss.push(train.loss);
        self.accuracy.push(train.accuracy);
        self.val_loss.push(val.loss);
        self.val_accuracy.push(val.accuracy);
    }

    /// Returns the amount of recorded epochs.
    pub fn epochs(&self) -> usize {
        self.loss.len()
    }

    pub fn last_val_accuracy(&self) -> Option<f32> {
        self.val_accuracy.last().copied()
    }
}
