//! Slate-and-signal palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const SKY: Color = Color::Rgb(125, 207, 255); // #7dcfff
pub const VIOLET: Color = Color::Rgb(187, 154, 247); // #bb9af7
pub const AMBER: Color = Color::Rgb(224, 175, 104); // #e0af68
pub const GREEN: Color = Color::Rgb(158, 206, 106); // #9ece6a
pub const RED: Color = Color::Rgb(247, 118, 142); // #f7768e
pub const ORANGE: Color = Color::Rgb(255, 158, 100); // #ff9e64

// ── Extended Palette ──────────────────────────────────────────────────

pub const FOG: Color = Color::Rgb(169, 177, 214); // #a9b1d6
pub const SLATE: Color = Color::Rgb(86, 95, 137); // #565f89
pub const BG_HIGHLIGHT: Color = Color::Rgb(41, 46, 66); // #292e42
pub const BG_DARK: Color = Color::Rgb(26, 27, 38); // #1a1b26

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(SKY).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(VIOLET)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(SLATE)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(SKY)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(FOG)
}

/// Selected / highlighted table row.
pub fn table_selected() -> Style {
    Style::default()
        .fg(VIOLET)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(SLATE)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(SKY).add_modifier(Modifier::BOLD)
}

/// Stat card value.
pub fn stat_value() -> Style {
    Style::default().fg(VIOLET).add_modifier(Modifier::BOLD)
}

/// Stat card label.
pub fn stat_label() -> Style {
    Style::default().fg(FOG)
}
