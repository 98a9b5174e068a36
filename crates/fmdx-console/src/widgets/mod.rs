pub mod frequency_prompt;
pub mod pane_chrome;
pub mod signal_meter;
pub mod status_bar;
pub mod toast;
