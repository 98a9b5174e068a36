pub mod header;
pub mod help_overlay;
pub mod radiotext_panel;
pub mod station_panel;
pub mod tuner_panel;
pub mod users_panel;

use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::theme::{style_default, style_label};

/// Width of the label column in the data panels.
const LABEL_WIDTH: usize = 11;

/// One `Label:    value` row.
pub(crate) fn label_row<'a>(label: &'a str, value: impl Into<String>) -> Line<'a> {
    label_row_styled(label, value, style_default())
}

pub(crate) fn label_row_styled<'a>(
    label: &'a str,
    value: impl Into<String>,
    value_style: Style,
) -> Line<'a> {
    Line::from(vec![
        Span::raw(" "),
        Span::styled(format!("{:<w$}", label, w = LABEL_WIDTH), style_label()),
        Span::styled(value.into(), value_style),
    ])
}
