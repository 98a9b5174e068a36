//! Header component — one-row top bar: program title left, wall clock right.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    app_state::ViewState,
    component::Component,
    theme::{C_ACCENT, C_PRIMARY, C_SECONDARY},
};

const TITLE: &str = "FM-DX console";

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }
}

impl Component for Header {
    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &ViewState<'_>) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(7)])
            .split(area);

        let title = Line::from(vec![
            Span::styled(" ◉ ", Style::default().fg(C_ACCENT)),
            Span::styled(
                TITLE,
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", env!("CARGO_PKG_VERSION")),
                Style::default().fg(C_SECONDARY),
            ),
        ]);
        frame.render_widget(Paragraph::new(title), cols[0]);

        let clock = Line::from(Span::styled(
            clock_text(&state.now),
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        ))
        .right_aligned();
        frame.render_widget(Paragraph::new(clock), cols[1]);
    }

    fn min_height(&self) -> u16 {
        1
    }
}

/// `HH:MM`, 24-hour, local time.
pub fn clock_text(now: &DateTime<Local>) -> String {
    now.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_clock_is_zero_padded() {
        let t = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 59).unwrap();
        assert_eq!(clock_text(&t), "07:05");
        let t = Local.with_ymd_and_hms(2024, 3, 9, 23, 41, 0).unwrap();
        assert_eq!(clock_text(&t), "23:41");
    }
}
