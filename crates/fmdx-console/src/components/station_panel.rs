//! StationPanel — transmitter data for the tuned station.

use fmdx_proto::protocol::TransmitterInfo;
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
    theme::{C_LOCATION, C_PRIMARY},
    widgets::pane_chrome::pane_chrome,
};

pub struct StationPanel;

impl StationPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Component for StationPanel {
    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &ViewState<'_>) {
        let empty = TransmitterInfo::default();
        let tx = state
            .snapshot
            .and_then(|s| s.transmitter.as_ref())
            .unwrap_or(&empty);

        let lines: Vec<Line> = vec![
            label_row_styled(
                "Station:",
                tx.station.clone().unwrap_or_default(),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ),
            label_row_styled(
                "Location:",
                format_location(tx),
                Style::default().fg(C_LOCATION),
            ),
            label_row(
                "Distance:",
                tx.distance_km
                    .map(|d| format!("{} km", d))
                    .unwrap_or_default(),
            ),
            label_row("Power:", format_power(tx)),
            label_row(
                "Azimuth:",
                tx.azimuth_deg
                    .map(|a| format!("{}°", a))
                    .unwrap_or_default(),
            ),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(pane_chrome("Station Data", None)),
            area,
        );
    }

    fn min_height(&self) -> u16 {
        7
    }
}

/// `city, itu`; empty without a city.
pub fn format_location(tx: &TransmitterInfo) -> String {
    match (&tx.city, &tx.itu) {
        (Some(city), Some(itu)) => format!("{}, {}", city, itu),
        (Some(city), None) => city.clone(),
        (None, _) => String::new(),
    }
}

/// `5 kW [H]`; empty without a power figure.
pub fn format_power(tx: &TransmitterInfo) -> String {
    match (tx.erp_kw, &tx.polarization) {
        (Some(erp), Some(pol)) => format!("{} kW [{}]", erp, pol),
        (Some(erp), None) => format!("{} kW", erp),
        (None, _) => String::new(),
    }
}
