//! PaneChrome — the bordered block every tuner panel sits in.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

use crate::theme::{style_border, C_MUTED};

/// A badge shown in the top-right of the pane header (e.g. "ST", "LIVE").
pub struct Badge<'a> {
    pub text: &'a str,
    pub color: Color,
}

pub fn pane_chrome<'a>(title: &'a str, badge: Option<Badge<'a>>) -> Block<'a> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style_border())
        .title(Line::from(Span::styled(
            format!(" {} ", title),
            Style::default().fg(C_MUTED),
        )));

    match badge {
        Some(b) => block.title_top(
            Line::from(Span::styled(
                format!(" {} ", b.text),
                Style::default().fg(b.color).add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        ),
        None => block,
    }
}
