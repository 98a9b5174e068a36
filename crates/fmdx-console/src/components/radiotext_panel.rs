//! RadiotextPanel — the two RDS radiotext lines, centered.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::{
    app_state::ViewState,
    component::Component,
    theme::C_PRIMARY,
    widgets::pane_chrome::pane_chrome,
};

pub struct RadiotextPanel;

impl RadiotextPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Component for RadiotextPanel {
    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &ViewState<'_>) {
        let (line0, line1) = state
            .snapshot
            .map(|s| (s.radiotext.line0.trim(), s.radiotext.line1.trim()))
            .unwrap_or(("", ""));
        let style = Style::default().fg(C_PRIMARY);
        let lines = vec![
            Line::styled(line0.to_string(), style),
            Line::styled(line1.to_string(), style),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(pane_chrome("Radiotext", None)),
            area,
        );
    }

    fn min_height(&self) -> u16 {
        4
    }
}
