use std::fmt::{self, Display};

use machine_learning::arch::{Mode, Model};
use ndarray::Axis;

use crate::{error::Result, pipeline::TaskModel};

/// The probability above which a sample is flagged.
pub const THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Suspicious,
    Normal,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Suspicious => f.write_str("Suspicious"),
            Verdict::Normal => f.write_str("Normal"),
        }
    }
}

/// Flags a probability strictly above `THRESHOLD`, exactly `0.5` is normal.
pub fn classify(probability: f32) -> Verdict {
    if probability > THRESHOLD {
        Verdict::Suspicious
    } else {
        Verdict::Normal
    }
}

impl TaskModel {
    /// Standardizes one raw sample and returns the model's positive class probability.
    ///
    /// # Arguments
    /// * `features` - The raw feature values, in the task's feature order.
    ///
    /// # Returns
    /// The probability, or a size mismatch if `features` has the wrong length.
    pub fn predict(&mut self, features: &[f32]) -> Result<f32> {
        let x = self.scaler.transform_row(features)?.insert_axis(Axis(0));
        let y = self.model.forward(&self.params, x, Mode::Eval)?;

        Ok(y[[0, 0]])
    }

    pub fn detect(&mut self, features: &[f32]) -> Result<Verdict> {
        Ok(classify(self.predict(features)?))
    }
}
