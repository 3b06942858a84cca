use ratatui::style::{Color, Modifier, Style};

/// Neon-green on black, with one accent per validation curve.
pub struct Theme;

impl Theme {
    const BG: Color = Color::Rgb(0, 0, 0);
    const NEON: Color = Color::Rgb(57, 255, 20);
    const DIM: Color = Color::Rgb(0, 190, 0);
    const MUTED: Color = Color::Rgb(80, 90, 80);
    const CYAN: Color = Color::Rgb(0, 255, 255);
    const MAGENTA: Color = Color::Rgb(255, 0, 255);

    pub fn base() -> Style {
        Style::default().fg(Self::NEON).bg(Self::BG)
    }

    pub fn title() -> Style {
        Self::base().add_modifier(Modifier::BOLD)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED)
    }

    /// Curves measured on the training set.
    pub fn train() -> Style {
        Style::default().fg(Self::NEON)
    }

    pub fn val_accuracy() -> Style {
        Style::default().fg(Self::CYAN)
    }

    pub fn val_loss() -> Style {
        Style::default().fg(Self::MAGENTA)
    }
}
