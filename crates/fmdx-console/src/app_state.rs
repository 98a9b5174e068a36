//! ViewState — read-only data handed to every panel at draw time.
//!
//! Built fresh for each frame by the App from what it owns: the core's
//! snapshot, the session state and the playback state.  Panels never keep a
//! copy of the snapshot between frames.

use chrono::{DateTime, Local};
use fmdx_proto::protocol::TunerSnapshot;

use crate::connection::ConnectionState;
use crate::playback::PlaybackState;

pub struct ViewState<'a> {
    /// `None` until the first valid frame of the current session.
    pub snapshot: Option<&'a TunerSnapshot>,
    pub connection: ConnectionState,
    pub playback: PlaybackState,
    /// The control address as given by the operator.
    pub address: &'a str,
    pub now: DateTime<Local>,
}

impl ViewState<'_> {
    /// Message shown in place of tuner data while there is none.
    pub fn status_text(&self) -> &'static str {
        match self.connection {
            ConnectionState::Connecting => "connecting…",
            ConnectionState::Open => "connection established",
            ConnectionState::Closed => "connection closed",
        }
    }
}
