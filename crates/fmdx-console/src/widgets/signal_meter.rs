//! Smooth Unicode signal meter.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_METER_EMPTY, C_METER_FILL, C_SECONDARY};

/// Signal readings above this are shown as a full meter.
pub const SIGNAL_MAX: f64 = 100.0;

/// Whole percentage for a raw signal reading: clamp to `0..=SIGNAL_MAX`, then
/// floor.  Unknown signal reads as zero.
pub fn signal_percent(signal: Option<f64>) -> u8 {
    let raw = signal.filter(|s| s.is_finite()).unwrap_or(0.0);
    (raw.clamp(0.0, SIGNAL_MAX) / SIGNAL_MAX * 100.0).floor() as u8
}

/// Render the meter in `area` with a right-hand percentage label.
pub fn draw_signal_meter(frame: &mut Frame, area: Rect, signal: Option<f64>) {
    if area.width < 8 || area.height == 0 {
        return;
    }
    let percent = signal_percent(signal);
    let label = format!(" {:>3}%", percent);
    let bar_w = area.width as usize - label.len();

    let line = Line::from(vec![
        Span::styled(bar(percent, bar_w), Style::default().fg(C_METER_FILL).bg(C_METER_EMPTY)),
        Span::styled(label, Style::default().fg(C_SECONDARY)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// `bar_w` cells, filled in eighths.
fn bar(percent: u8, bar_w: usize) -> String {
    const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

    let eighths = percent.min(100) as usize * bar_w * 8 / 100;
    let full_blocks = eighths / 8;
    let partial = eighths % 8;

    let mut s = String::with_capacity(bar_w * 3);
    for _ in 0..full_blocks {
        s.push('█');
    }
    if full_blocks < bar_w {
        s.push(BLOCKS[partial]);
        for _ in (full_blocks + 1)..bar_w {
            s.push(' ');
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_clamps_then_floors() {
        assert_eq!(signal_percent(Some(38.9)), 38);
        assert_eq!(signal_percent(Some(100.0)), 100);
        assert_eq!(signal_percent(Some(131.7)), 100);
        assert_eq!(signal_percent(Some(-4.0)), 0);
        assert_eq!(signal_percent(Some(f64::NAN)), 0);
        assert_eq!(signal_percent(None), 0);
    }

    #[test]
    fn test_bar_width_is_constant() {
        for p in [0, 1, 37, 50, 99, 100] {
            assert_eq!(bar(p, 20).chars().count(), 20, "{p}%");
        }
        assert_eq!(bar(100, 4), "████");
        assert_eq!(bar(50, 4), "██  ");
    }
}
