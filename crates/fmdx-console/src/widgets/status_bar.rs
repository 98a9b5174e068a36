//! Status bar — bottom line with connection state, playback and the help hint.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::connection::ConnectionState;
use crate::playback::PlaybackState;
use crate::theme::{C_ACCENT, C_CONNECTING, C_MUTED, C_PLAYING, C_SECONDARY};

pub fn connection_line(state: ConnectionState, address: &str) -> String {
    match state {
        ConnectionState::Connecting => format!("Connecting to {}…", address),
        ConnectionState::Open => format!("Connected to server on {}", address),
        ConnectionState::Closed => format!("Disconnected from {}", address),
    }
}

/// Draw the one-row footer.
pub fn draw_status_bar(
    frame: &mut Frame,
    area: Rect,
    connection: ConnectionState,
    playback: PlaybackState,
    address: &str,
) {
    let conn_color = match connection {
        ConnectionState::Connecting => C_CONNECTING,
        ConnectionState::Open => C_PLAYING,
        ConnectionState::Closed => C_ACCENT,
    };
    let (audio_icon, audio_color) = match playback {
        PlaybackState::Playing => ("▶ audio", C_PLAYING),
        PlaybackState::Stopped => ("■ audio", C_MUTED),
    };

    let line = Line::from(vec![
        Span::styled(" ● ", Style::default().fg(conn_color)),
        Span::styled(
            connection_line(connection, address),
            Style::default().fg(C_SECONDARY),
        ),
        Span::raw("  "),
        Span::styled(
            audio_icon,
            Style::default().fg(audio_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  press h for help", Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
