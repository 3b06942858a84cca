mod batch_norm;
mod dense;
mod dropout;
mod layer;

pub use batch_norm::BatchNorm;
pub use dense::Dense;
pub use dropout::Dropout;
pub use layer::Layer;
