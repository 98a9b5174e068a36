//! Component trait — the interface every tuner panel implements.
//!
//! Panels are views: they read `ViewState` and render.  Operator input never
//! reaches them; keys are mapped to intents before anything else sees them.

use ratatui::{layout::Rect, Frame};

use crate::app_state::ViewState;

pub trait Component {
    /// Render the component into `area`.
    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &ViewState<'_>);

    /// The minimum height required to render meaningfully.
    fn min_height(&self) -> u16 {
        3
    }
}
