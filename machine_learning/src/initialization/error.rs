use std::{
    error::Error,
    fmt::{self, Display},
};

use rand_distr::uniform;

pub type Result<T> = std::result::Result<T, RandErr>;

/// The distribution behind a `RandParamGen` couldn't be built from the given bounds.
#[derive(Debug)]
pub struct RandErr(uniform::Error);

impl From<uniform::Error> for RandErr {
    fn from(value: uniform::Error) -> Self {
        Self(value)
    }
}

impl Display for RandErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid initialization bounds: {}", self.0)
    }
}

impl Error for RandErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}
