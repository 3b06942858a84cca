use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

use machine_learning::MlErr;
use rand_distr::uniform;

/// The result type used across the detection pipeline.
pub type Result<T> = std::result::Result<T, DetectErr>;

/// The detection pipeline's error type.
#[derive(Debug)]
pub enum DetectErr {
    Io(io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    Ml(MlErr),
    Distribution(uniform::Error),
    MissingColumn(String),
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },
    RaggedColumns {
        column: String,
        len: usize,
        expected: usize,
    },
}

impl Display for DetectErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectErr::Io(e) => write!(f, "io error: {e}"),
            DetectErr::Csv(e) => write!(f, "csv error: {e}"),
            DetectErr::Json(e) => write!(f, "invalid configuration: {e}"),
            DetectErr::Ml(e) => write!(f, "{e}"),
            DetectErr::Distribution(e) => write!(f, "invalid distribution: {e}"),
            DetectErr::MissingColumn(column) => write!(f, "there's no column named {column:?}"),
            DetectErr::NonNumeric { column, row, value } => write!(
                f,
                "the value {value:?} at row {row} of column {column:?} is not numeric"
            ),
            DetectErr::RaggedColumns {
                column,
                len,
                expected,
            } => write!(
                f,
                "column {column:?} has {len} cells, expected {expected}"
            ),
        }
    }
}

impl Error for DetectErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DetectErr::Io(e) => Some(e),
            DetectErr::Csv(e) => Some(e),
            DetectErr::Json(e) => Some(e),
            DetectErr::Ml(e) => Some(e),
            DetectErr::Distribution(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DetectErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for DetectErr {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<serde_json::Error> for DetectErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<MlErr> for DetectErr {
    fn from(value: MlErr) -> Self {
        Self::Ml(value)
    }
}

impl From<uniform::Error> for DetectErr {
    fn from(value: uniform::Error) -> Self {
        Self::Distribution(value)
    }
}
