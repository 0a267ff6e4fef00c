//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::config::ThemeMode;

/// Luma above which the terminal background counts as light.
const LIGHT_LUMA_THRESHOLD: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Degree-of-influence colors (traffic light pattern)
    pub degree_high: Color,
    pub degree_mid: Color,
    pub degree_low: Color,
    pub bar_empty: Color,

    // Table colors
    pub row_alt_bg: Color,
    pub index_color: Color,
    pub type_color: Color,
    pub points_color: Color,

    // Styles
    pub header_style: Style,
    pub row_selected: Style,
    pub totals_style: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,

    // Tab colors
    pub tab_active_style: Style,
    pub tab_inactive_style: Style,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
    pub field_active: Style,
}

impl ThemeColors {
    /// Dark theme palette
    pub fn dark() -> Self {
        Self {
            degree_high: Color::Red,
            degree_mid: Color::Yellow,
            degree_low: Color::Green,
            bar_empty: Color::DarkGray,
            row_alt_bg: Color::Indexed(235),
            index_color: Color::DarkGray,
            type_color: Color::Cyan,
            points_color: Color::Yellow,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            totals_style: Style::new().fg(Color::White).bold(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            tab_active_style: Style::new().fg(Color::Cyan).bold(),
            tab_inactive_style: Style::new().fg(Color::DarkGray),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
            field_active: Style::new().fg(Color::Black).bg(Color::Cyan),
        }
    }

    /// Light theme palette
    pub fn light() -> Self {
        Self {
            degree_high: Color::Rgb(180, 30, 30),
            degree_mid: Color::Rgb(160, 110, 0),
            degree_low: Color::Rgb(20, 120, 40),
            bar_empty: Color::Indexed(250),
            row_alt_bg: Color::Indexed(254),
            index_color: Color::Indexed(244),
            type_color: Color::Blue,
            points_color: Color::Rgb(160, 110, 0),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            totals_style: Style::new().fg(Color::Black).bold(),
            muted: Color::Indexed(242),
            title_color: Color::Blue,
            tab_active_style: Style::new().fg(Color::Blue).bold(),
            tab_inactive_style: Style::new().fg(Color::Indexed(246)),
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Blue,
            flash_success: Color::Rgb(20, 120, 40),
            flash_error: Color::Rgb(180, 30, 30),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
            popup_bg: Color::Indexed(255),
            field_active: Style::new().fg(Color::White).bg(Color::Blue),
        }
    }

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    /// Color for a degree of influence on the 0-5 scale
    pub fn degree_color(&self, degree: u8) -> Color {
        match degree {
            4..=5 => self.degree_high,
            2..=3 => self.degree_mid,
            _ => self.degree_low,
        }
    }
}

/// Pick the palette. `auto` asks the terminal for its background and falls
/// back to dark when the query fails.
pub fn resolve_theme(mode: ThemeMode) -> Theme {
    match mode {
        ThemeMode::Dark => Theme::Dark,
        ThemeMode::Light => Theme::Light,
        ThemeMode::Auto => match terminal_light::luma() {
            Ok(luma) if luma > LIGHT_LUMA_THRESHOLD => Theme::Light,
            Ok(_) => Theme::Dark,
            Err(e) => {
                tracing::debug!(error = %e, "terminal background detection failed");
                Theme::Dark
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_modes_skip_detection() {
        assert_eq!(resolve_theme(ThemeMode::Dark), Theme::Dark);
        assert_eq!(resolve_theme(ThemeMode::Light), Theme::Light);
    }

    #[test]
    fn test_degree_color_bands() {
        let colors = ThemeColors::dark();
        assert_eq!(colors.degree_color(0), Color::Green);
        assert_eq!(colors.degree_color(1), Color::Green);
        assert_eq!(colors.degree_color(3), Color::Yellow);
        assert_eq!(colors.degree_color(5), Color::Red);
    }
}
