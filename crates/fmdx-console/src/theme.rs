//! Color palette and style constants for the tuner console.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(18, 18, 18);
pub const C_ACCENT: Color = Color::Rgb(255, 95, 95);
pub const C_PLAYING: Color = Color::Rgb(80, 200, 120);
pub const C_CONNECTING: Color = Color::Rgb(255, 184, 80);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);
pub const C_OVERLAY_BG: Color = Color::Rgb(18, 18, 26);
pub const C_FREQUENCY: Color = Color::Rgb(255, 200, 80);
pub const C_PROMPT_BG: Color = Color::Rgb(20, 20, 32);
pub const C_PROMPT_FG: Color = Color::Rgb(255, 200, 80);
pub const C_LOCATION: Color = Color::Rgb(100, 160, 130);
pub const C_RDS: Color = Color::Rgb(180, 120, 220);
pub const C_METER_FILL: Color = Color::Rgb(80, 160, 220);
pub const C_METER_EMPTY: Color = Color::Rgb(30, 30, 42);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_WARNING: Color = Color::Rgb(255, 184, 80);
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 95, 95);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_default() -> Style {
    Style::default().fg(C_PRIMARY)
}

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_label() -> Style {
    Style::default().fg(C_SECONDARY).add_modifier(Modifier::BOLD)
}

pub fn style_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}
