//! Playback coordinator — on/off lifecycle of the audio collaborator.
//!
//! Toggled only by the operator.  The control connection never starts or stops
//! audio, and audio failures never reach the control connection.

use std::fmt;

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("audio player binary not found (install mpv or set audio.player)")]
    PlayerNotFound,
    #[error("audio player failed: {0}")]
    Player(String),
}

/// The external audio engine.  Both calls are requests: they return at once
/// and must be harmless when repeated.
pub trait AudioPlayer {
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn stop(&mut self) -> Result<(), PlaybackError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackState::Stopped => f.write_str("stopped"),
            PlaybackState::Playing => f.write_str("playing"),
        }
    }
}

pub struct PlaybackCoordinator<P> {
    player: P,
    state: PlaybackState,
}

impl<P: AudioPlayer> PlaybackCoordinator<P> {
    pub fn new(player: P) -> Self {
        Self {
            player,
            state: PlaybackState::Stopped,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Start when stopped, stop when playing.
    ///
    /// The state always flips: it records what was last requested of the
    /// player.  A collaborator failure is logged and handed back next to the
    /// new state for the caller to surface.
    pub fn toggle(&mut self) -> (PlaybackState, Result<(), PlaybackError>) {
        let (next, outcome) = match self.state {
            PlaybackState::Stopped => (PlaybackState::Playing, self.player.play()),
            PlaybackState::Playing => (PlaybackState::Stopped, self.player.stop()),
        };
        self.state = next;
        match &outcome {
            Ok(()) => info!("playback: {}", next),
            Err(e) => warn!("playback: {} requested, player failed: {}", next, e),
        }
        (next, outcome)
    }

    /// Stop if playing.  Used on shutdown.
    pub fn stop(&mut self) {
        if self.state == PlaybackState::Playing {
            let _ = self.toggle();
        }
    }

    #[cfg(test)]
    pub fn player(&self) -> &P {
        &self.player
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Records calls instead of producing sound.
    #[derive(Debug, Default)]
    pub struct RecordingPlayer {
        pub calls: Vec<&'static str>,
        pub fail_play: bool,
    }

    impl AudioPlayer for RecordingPlayer {
        fn play(&mut self) -> Result<(), PlaybackError> {
            self.calls.push("play");
            if self.fail_play {
                return Err(PlaybackError::PlayerNotFound);
            }
            Ok(())
        }

        fn stop(&mut self) -> Result<(), PlaybackError> {
            self.calls.push("stop");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingPlayer;
    use super::*;

    #[test]
    fn test_initial_state_is_stopped() {
        let coordinator = PlaybackCoordinator::new(RecordingPlayer::default());
        assert_eq!(coordinator.state(), PlaybackState::Stopped);
        assert!(coordinator.player().calls.is_empty());
    }

    #[test]
    fn test_toggle_alternates() {
        let mut c = PlaybackCoordinator::new(RecordingPlayer::default());
        assert_eq!(c.toggle().0, PlaybackState::Playing);
        assert_eq!(c.toggle().0, PlaybackState::Stopped);
        assert_eq!(c.toggle().0, PlaybackState::Playing);
        assert_eq!(c.player().calls, vec!["play", "stop", "play"]);
    }

    #[test]
    fn test_failed_start_still_alternates() {
        let mut c = PlaybackCoordinator::new(RecordingPlayer {
            fail_play: true,
            ..Default::default()
        });
        let (state, outcome) = c.toggle();
        assert_eq!(state, PlaybackState::Playing);
        assert!(matches!(outcome, Err(PlaybackError::PlayerNotFound)));
        // the second toggle returns to Stopped and stop() is harmless
        let (state, outcome) = c.toggle();
        assert_eq!(state, PlaybackState::Stopped);
        assert!(outcome.is_ok());
        assert_eq!(c.player().calls, vec!["play", "stop"]);
    }

    #[test]
    fn test_stop_when_stopped_is_a_no_op() {
        let mut c = PlaybackCoordinator::new(RecordingPlayer::default());
        c.stop();
        assert!(c.player().calls.is_empty());
        let _ = c.toggle();
        c.stop();
        c.stop();
        assert_eq!(c.player().calls, vec!["play", "stop"]);
        assert_eq!(c.state(), PlaybackState::Stopped);
    }
}
