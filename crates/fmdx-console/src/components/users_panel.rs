//! UsersPanel — listener count reported by the webserver.

use ratatui::{layout::Rect, widgets::Paragraph, Frame};

use super::label_row;
use crate::{app_state::ViewState, component::Component, widgets::pane_chrome::pane_chrome};

pub struct UsersPanel;

impl UsersPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Component for UsersPanel {
    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &ViewState<'_>) {
        let users = state
            .snapshot
            .and_then(|s| s.users)
            .map(|u| u.to_string())
            .unwrap_or_default();
        frame.render_widget(
            Paragraph::new(label_row("Users:", users)).block(pane_chrome("Users", None)),
            area,
        );
    }
}
