use ratatui::{widgets::Block, Frame};

use crate::state::plot::{points, PlotState};

use super::{
    layout,
    theme::Theme,
    widgets::{self, Series},
};

/// Draws the entire UI.
pub fn draw(f: &mut Frame, state: &PlotState) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let (header_area, body_area, footer_area) = layout::vertical(area);
    f.render_widget(widgets::header(state), header_area);
    f.render_widget(widgets::footer(), footer_area);

    let Some(curves) = state.selected() else {
        return;
    };

    let history = &curves.history;
    let epochs = history.epochs();
    let (accuracy_area, loss_area) = layout::charts(body_area);

    let accuracy = [
        Series {
            name: "accuracy",
            style: Theme::train(),
            points: points(&history.accuracy),
        },
        Series {
            name: "val_accuracy",
            style: Theme::val_accuracy(),
            points: points(&history.val_accuracy),
        },
    ];
    f.render_widget(widgets::chart("Accuracy", &accuracy, epochs, 1.), accuracy_area);

    let loss = [
        Series {
            name: "loss",
            style: Theme::train(),
            points: points(&history.loss),
        },
        Series {
            name: "val_loss",
            style: Theme::val_loss(),
            points: points(&history.val_loss),
        },
    ];
    let loss_max = loss
        .iter()
        .flat_map(|s| s.points.iter().map(|&(_, y)| y))
        .fold(0., f64::max);
    let loss_max = if loss_max > 0. { loss_max * 1.1 } else { 1. };
    f.render_widget(widgets::chart("Loss", &loss, epochs, loss_max), loss_area);
}
