pub mod config;
pub mod data;
pub mod error;
pub mod factory;
pub mod inference;
pub mod label;
pub mod logging;
pub mod pipeline;
pub mod preprocess;
pub mod registry;
pub mod synthetic;

pub use error::{DetectErr, Result};
