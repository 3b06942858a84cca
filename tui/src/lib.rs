mod app;
mod state;
mod ui;

pub use app::run::show;
pub use state::plot::{Curves, PlotState};
