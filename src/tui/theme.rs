//! Board color palettes.
//!
//! Two palettes, light and dark, selected by the persisted preference and
//! swappable at runtime with the theme toggle key.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemePreference;
use crate::domain::ticket::Status;

pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub dim: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(13, 17, 23),
            foreground: Color::Rgb(230, 237, 243),
            dim: Color::Rgb(125, 133, 144),
            accent: Color::Rgb(88, 166, 255),
            success: Color::Rgb(63, 185, 80),
            warning: Color::Rgb(210, 153, 34),
            error: Color::Rgb(248, 81, 73),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(255, 255, 255),
            foreground: Color::Rgb(31, 35, 40),
            dim: Color::Rgb(110, 119, 129),
            accent: Color::Rgb(9, 105, 218),
            success: Color::Rgb(26, 127, 55),
            warning: Color::Rgb(154, 103, 0),
            error: Color::Rgb(209, 36, 47),
        }
    }

    pub fn from_preference(preference: ThemePreference) -> Self {
        match preference {
            ThemePreference::Light => Self::light(),
            ThemePreference::Dark => Self::dark(),
        }
    }

    pub fn base(&self) -> Style {
        Style::default().bg(self.background).fg(self.foreground)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.foreground)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.error)
            .add_modifier(Modifier::BOLD)
    }

    /// Border/marker style for the ticket matching the selected id.
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Highlight for the row or card under the navigation cursor.
    pub fn cursor(&self) -> Style {
        Style::default()
            .bg(self.accent)
            .fg(self.background)
    }

    pub fn status_style(&self, status: Status) -> Style {
        match status {
            Status::Open => Style::default().fg(self.accent),
            Status::InProgress => Style::default().fg(self.warning),
            Status::Done => Style::default().fg(self.success),
        }
    }

    pub fn priority_style(&self, priority: &str) -> Style {
        match priority {
            "high" => Style::default().fg(self.error),
            "low" => Style::default().fg(self.dim),
            _ => Style::default().fg(self.foreground),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preference_picks_palette() {
        let dark = Theme::from_preference(ThemePreference::Dark);
        let light = Theme::from_preference(ThemePreference::Light);
        assert_eq!(dark.background, Color::Rgb(13, 17, 23));
        assert_eq!(light.background, Color::Rgb(255, 255, 255));
    }

    #[test]
    fn priority_styles_differ_by_value() {
        let theme = Theme::dark();
        assert_ne!(theme.priority_style("high"), theme.priority_style("low"));
        assert_eq!(
            theme.priority_style("normal"),
            theme.priority_style("whatever")
        );
    }
}
