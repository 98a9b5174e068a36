//! FrequencyPrompt — one-line tui-input bar for typing a frequency in MHz.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{C_MUTED, C_PROMPT_BG, C_PROMPT_FG, C_SECONDARY};

const LABEL: &str = "tune to MHz: ";

#[derive(Debug, PartialEq)]
pub enum PromptAction {
    /// Enter pressed; carries the raw text, not yet validated.
    Submitted(String),
    Cancelled,
    None,
}

#[derive(Default)]
pub struct FrequencyPrompt {
    input: Input,
    active: bool,
}

impl FrequencyPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open with an empty input.
    pub fn activate(&mut self) {
        self.input = Input::default();
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    /// Feed a key while the prompt is open.  Enter submits, Esc cancels, and
    /// everything else edits the line.
    pub fn handle_key(&mut self, key: KeyEvent) -> PromptAction {
        if key.kind == KeyEventKind::Release {
            return PromptAction::None;
        }
        match key.code {
            KeyCode::Esc => {
                self.active = false;
                PromptAction::Cancelled
            }
            KeyCode::Enter => {
                self.active = false;
                PromptAction::Submitted(self.input.value().trim().to_string())
            }
            _ => {
                self.input.handle_event(&Event::Key(key));
                PromptAction::None
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let label_w = LABEL.chars().count();
        let scroll = self
            .input
            .visual_scroll((area.width as usize).saturating_sub(label_w + 1));
        let value = self.text();
        let shown = if value.is_empty() {
            Span::styled("e.g. 94.5  (enter to tune, esc to cancel)", Style::default().fg(C_MUTED))
        } else {
            Span::styled(
                value.chars().skip(scroll).collect::<String>(),
                Style::default().fg(C_PROMPT_FG),
            )
        };
        let line = Line::from(vec![
            Span::styled(LABEL, Style::default().fg(C_SECONDARY)),
            shown,
        ]);
        frame.render_widget(
            Paragraph::new(line).style(Style::default().bg(C_PROMPT_BG)),
            area,
        );

        if self.active && area.width > 0 {
            let cursor_x = area.x + (label_w + self.input.visual_cursor() - scroll) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width - 1), area.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(p: &mut FrequencyPrompt, s: &str) {
        for ch in s.chars() {
            assert_eq!(p.handle_key(key(KeyCode::Char(ch))), PromptAction::None);
        }
    }

    #[test]
    fn test_enter_submits_trimmed_text() {
        let mut p = FrequencyPrompt::new();
        p.activate();
        type_str(&mut p, " 100.1 ");
        assert_eq!(
            p.handle_key(key(KeyCode::Enter)),
            PromptAction::Submitted("100.1".into())
        );
        assert!(!p.is_active());
    }

    #[test]
    fn test_backspace_edits() {
        let mut p = FrequencyPrompt::new();
        p.activate();
        type_str(&mut p, "94.55");
        p.handle_key(key(KeyCode::Backspace));
        assert_eq!(p.text(), "94.5");
    }

    #[test]
    fn test_esc_cancels_and_reopen_starts_empty() {
        let mut p = FrequencyPrompt::new();
        p.activate();
        type_str(&mut p, "87");
        assert_eq!(p.handle_key(key(KeyCode::Esc)), PromptAction::Cancelled);
        assert!(!p.is_active());
        p.activate();
        assert_eq!(p.text(), "");
    }
}
