mod history;
mod metrics;
mod trainer;

pub use history::History;
pub use metrics::{EpochStats, binary_accuracy, evaluate};
pub use trainer::ModelTrainer;
