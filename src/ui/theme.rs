//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Every widget takes its colours from here.
pub struct Theme;

impl Theme {
    // ── catalog ────────────────────────────────────────────────
    pub fn car_title_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn price_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn available_badge_style() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
    }

    pub fn rented_badge_style() -> Style {
        Style::default().fg(Color::White).bg(Color::Red)
    }

    pub fn danger_action_style() -> Style {
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD)
    }

    pub fn ghost_action_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn dim_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn selected_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    // ── forms ──────────────────────────────────────────────────
    pub fn label_style() -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    pub fn input_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn focused_border_style() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn success_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD)
    }
}
