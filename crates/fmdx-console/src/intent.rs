//! Operator intents — every discrete action the console reacts to.
//!
//! Keys are mapped to an `Intent` in one place ([`intent_for_key`]); the rest
//! of the program never looks at key codes.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Fixed frequency steps offered on the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Down1000,
    Up1000,
    Down100,
    Up100,
    Down10,
    Up10,
}

impl Step {
    pub fn delta_khz(self) -> i64 {
        match self {
            Step::Down1000 => -1000,
            Step::Up1000 => 1000,
            Step::Down100 => -100,
            Step::Up100 => 100,
            Step::Down10 => -10,
            Step::Up10 => 10,
        }
    }
}

/// Intents that end up as a tune command on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum TuneIntent {
    Step(Step),
    /// Re-send the current frequency so the server re-announces its state.
    Refresh,
    /// Operator input from the frequency prompt, in MHz, not yet validated.
    SetAbsolute(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Tune(TuneIntent),
    /// Open the frequency prompt.
    PromptFrequency,
    ToggleHelp,
    TogglePlayback,
    Quit,
}

/// Global key map.  Returns `None` for keys with no meaning.
pub fn intent_for_key(key: KeyEvent) -> Option<Intent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Intent::Quit),
            _ => None,
        };
    }
    let step = |s| Some(Intent::Tune(TuneIntent::Step(s)));
    match key.code {
        KeyCode::Char('q') => step(Step::Down1000),
        KeyCode::Char('w') => step(Step::Up1000),
        KeyCode::Char('a') => step(Step::Down100),
        KeyCode::Char('s') => step(Step::Up100),
        KeyCode::Char('z') => step(Step::Down10),
        KeyCode::Char('x') => step(Step::Up10),
        KeyCode::Char('r') => Some(Intent::Tune(TuneIntent::Refresh)),
        KeyCode::Char('t') => Some(Intent::PromptFrequency),
        KeyCode::Char('p') => Some(Intent::TogglePlayback),
        KeyCode::Char('h') => Some(Intent::ToggleHelp),
        KeyCode::Esc => Some(Intent::Quit),
        _ => None,
    }
}
