pub mod activations;
mod builder;
pub mod layers;
pub mod loss;
mod model;
mod sequential;
pub mod spec;

pub use builder::ModelBuilder;
pub use model::{Mode, Model};
pub use sequential::Sequential;
