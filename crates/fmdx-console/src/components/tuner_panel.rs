//! TunerPanel — frequency, signal, stereo flag and RDS identifiers.
//!
//! Before the first frame of a session the panel shows the connection status
//! instead of tuner data.

use fmdx_proto::protocol::TunerSnapshot;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use super::{label_row, label_row_styled};
use crate::{
    app_state::ViewState,
    component::Component,
    theme::{style_secondary, C_FREQUENCY, C_PLAYING, C_RDS},
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub struct TunerPanel;

impl TunerPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Component for TunerPanel {
    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &ViewState<'_>) {
        let snapshot = state.snapshot;
        let badge = snapshot.filter(|s| s.stereo).map(|_| Badge {
            text: "ST",
            color: C_PLAYING,
        });
        let block = pane_chrome("Tuner", badge);

        let lines = match snapshot {
            Some(s) => tuner_lines(s),
            None => vec![
                Line::from(""),
                Line::styled(format!(" {}", state.status_text()), style_secondary()),
            ],
        };
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn min_height(&self) -> u16 {
        7
    }
}

fn tuner_lines(s: &TunerSnapshot) -> Vec<Line<'static>> {
    vec![
        label_row_styled(
            "Frequency:",
            format_frequency(s.frequency_mhz()),
            Style::default().fg(C_FREQUENCY).add_modifier(Modifier::BOLD),
        ),
        label_row("Signal:", format_signal(s.signal)),
        label_row("Mode:", if s.stereo { "Stereo" } else { "Mono" }),
        label_row_styled("RDS PS:", s.ps.clone(), Style::default().fg(C_RDS)),
        label_row_styled("RDS PI:", s.pi.clone(), Style::default().fg(C_RDS)),
    ]
}

pub fn format_frequency(mhz: Option<f64>) -> String {
    match mhz {
        Some(f) => format!("{:.3} MHz", f),
        None => "--.--- MHz".to_string(),
    }
}

pub fn format_signal(signal: Option<f64>) -> String {
    match signal {
        Some(v) => format!("{:.1} dBf", v),
        None => "-- dBf".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_frequency() {
        assert_eq!(format_frequency(Some(94.5)), "94.500 MHz");
        assert_eq!(format_frequency(Some(100.1)), "100.100 MHz");
        assert_eq!(format_frequency(None), "--.--- MHz");
    }

    #[test]
    fn test_format_signal() {
        assert_eq!(format_signal(Some(38.24)), "38.2 dBf");
        assert_eq!(format_signal(Some(0.0)), "0.0 dBf");
        assert_eq!(format_signal(None), "-- dBf");
    }
}
