mod scaler;
mod split;

pub use scaler::StandardScaler;
pub use split::{Split, train_test_split};
