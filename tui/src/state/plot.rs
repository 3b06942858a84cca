use machine_learning::training::History;

/// The training curves of one task.
#[derive(Debug, Clone)]
pub struct Curves {
    pub name: String,
    pub history: History,
}

impl Curves {
    pub fn new(name: impl Into<String>, history: History) -> Self {
        Self {
            name: name.into(),
            history,
        }
    }
}

/// What the plot screen shows: every task's curves and the one currently selected.
#[derive(Debug, Clone)]
pub struct PlotState {
    curves: Vec<Curves>,
    selected: usize,
}

impl PlotState {
    pub fn new(curves: Vec<Curves>) -> Self {
        Self {
            curves,
            selected: 0,
        }
    }

    pub fn selected(&self) -> Option<&Curves> {
        self.curves.get(self.selected)
    }

    /// Returns the 1-based position of the selected task and the amount of tasks.
    pub fn position(&self) -> (usize, usize) {
        match self.curves.len() {
            0 => (0, 0),
            n => (self.selected + 1, n),
        }
    }

    pub fn next(&mut self) {
        if !self.curves.is_empty() {
            self.selected = (self.selected + 1) % self.curves.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.curves.is_empty() {
            self.selected = (self.selected + self.curves.len() - 1) % self.curves.len();
        }
    }
}

/// Turns a metric into chart points, epochs counted from 1. Non finite values are skipped.
pub fn points(values: &[f32]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, &v)| ((i + 1) as f64, v as f64))
        .collect()
}
