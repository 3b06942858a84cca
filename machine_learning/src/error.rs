use std::{
    error::Error,
    fmt::{self, Display},
};

use ndarray::ShapeError;

use crate::initialization::RandErr;

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug)]
pub enum MlErr {
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    Shape(ShapeError),
    EmptyBatch,
    ParamGenExhausted {
        got: usize,
        expected: usize,
    },
    InvalidDistribution(RandErr),
    InvalidFraction(f32),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch for {what}, got {got} and expected {expected}"
            ),
            MlErr::Shape(e) => write!(f, "Invalid array shape: {e}"),
            MlErr::EmptyBatch => write!(f, "Tried to compute statistics over an empty batch"),
            MlErr::ParamGenExhausted { got, expected } => write!(
                f,
                "The parameter generator ran out of values, generated {got} of the expected {expected}"
            ),
            MlErr::InvalidDistribution(e) => write!(f, "Invalid distribution: {e}"),
            MlErr::InvalidFraction(fraction) => {
                write!(f, "The fraction {fraction} is not in the open interval (0, 1)")
            }
        }
    }
}

impl Error for MlErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MlErr::Shape(e) => Some(e),
            MlErr::InvalidDistribution(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for MlErr {
    fn from(value: ShapeError) -> Self {
        Self::Shape(value)
    }
}

impl From<RandErr> for MlErr {
    fn from(value: RandErr) -> Self {
        Self::InvalidDistribution(value)
    }
}
