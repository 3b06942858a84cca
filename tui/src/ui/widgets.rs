use ratatui::{
    layout::Alignment,
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::{state::plot::PlotState, ui::theme::Theme};

/// A named line of a chart.
pub struct Series {
    pub name: &'static str,
    pub style: Style,
    pub points: Vec<(f64, f64)>,
}

pub fn header(state: &PlotState) -> Paragraph<'_> {
    let (pos, total) = state.position();
    let name = state.selected().map_or("no trained tasks", |c| c.name.as_str());

    let line = Line::from(vec![
        Span::styled(name, Theme::title()),
        Span::styled(format!("  ({pos}/{total})"), Theme::dim()),
    ]);

    Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::base())
            .title("Training History"),
    )
}

pub fn footer() -> Paragraph<'static> {
    Paragraph::new(Span::styled("←/→ switch task   q/Esc quit", Theme::muted()))
        .alignment(Alignment::Center)
}

/// Builds a line chart over epochs `1..=epochs` with a y axis going from 0 to `y_max`.
pub fn chart<'a>(title: &'a str, series: &'a [Series], epochs: usize, y_max: f64) -> Chart<'a> {
    let datasets = series
        .iter()
        .map(|s| {
            Dataset::default()
                .name(s.name)
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(s.style)
                .data(&s.points)
        })
        .collect();

    let x_max = epochs.max(1) as f64;

    Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::base())
                .title(Span::styled(title, Theme::title())),
        )
        .x_axis(
            Axis::default()
                .title("epoch")
                .style(Theme::dim())
                .bounds([1., x_max])
                .labels(vec![Span::raw("1"), Span::raw(format!("{epochs}"))]),
        )
        .y_axis(
            Axis::default()
                .style(Theme::dim())
                .bounds([0., y_max])
                .labels(vec![Span::raw("0"), Span::raw(format!("{y_max:.2}"))]),
        )
}
