/// ConsoleCore — the event reducer between the transport, the tuner store and
/// the operator.
///
/// ```text
///   Session ──ConnectionEvent──┐
///   keyboard ──Intent──────────┼──► ConsoleCore::handle ──► Vec<Effect> ──► App
///   clock ──Tick───────────────┘          │
///                                         └── TunerStore (sole writer)
/// ```
///
/// Every input is one `CoreEvent`, handled to completion before the next.  The
/// core never performs I/O: sending a command, toggling audio and showing a
/// notice are returned as effects for the App to carry out.
use fmdx_proto::protocol::{TuneCommand, TunerSnapshot, TunerUpdate};
use fmdx_proto::state::TunerStore;
use tracing::{debug, info, warn};

use crate::dispatcher::{command_for, DispatchError};
use crate::intent::Intent;
use crate::widgets::toast::Severity;

// ── CoreEvent ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum CoreEvent {
    /// One raw text frame from the control channel, in arrival order.
    FrameReceived(String),
    ConnectionOpened,
    ConnectionClosed { reason: String },
    /// Clock tick, roughly once a second.
    Tick,
    Intent(Intent),
}

// ── Effect ────────────────────────────────────────────────────────────────────

/// Side effects requested by the core.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Send(TuneCommand),
    Notice(Severity, String),
    TogglePlayback,
    ToggleHelp,
    OpenPrompt,
    Quit,
}

// ── ConsoleCore ───────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ConsoleCore {
    store: TunerStore,
}

impl ConsoleCore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The merged tuner view, `None` until the first valid frame.
    pub fn snapshot(&self) -> Option<&TunerSnapshot> {
        self.store.current()
    }

    pub fn handle(&mut self, event: CoreEvent) -> Vec<Effect> {
        match event {
            CoreEvent::FrameReceived(text) => self.on_frame(&text),
            CoreEvent::ConnectionOpened => {
                vec![Effect::Notice(
                    Severity::Success,
                    "connection established".to_string(),
                )]
            }
            CoreEvent::ConnectionClosed { reason } => {
                self.store.reset();
                vec![Effect::Notice(
                    Severity::Error,
                    format!("connection closed: {}", reason),
                )]
            }
            CoreEvent::Tick => Vec::new(),
            CoreEvent::Intent(intent) => self.on_intent(intent),
        }
    }

    fn on_frame(&mut self, text: &str) -> Vec<Effect> {
        let update = match TunerUpdate::decode(text) {
            Ok(u) => u,
            Err(e) => {
                warn!("core: dropping frame: {} ({:.120})", e, text);
                return vec![Effect::Notice(
                    Severity::Warning,
                    format!("dropped frame: {}", e),
                )];
            }
        };
        if update.is_empty() {
            debug!("core: frame carried no known fields");
            return Vec::new();
        }
        let khz = self.store.apply_update(&update).frequency_khz;
        debug!("core: rev {} freq {:?} kHz", self.store.rev(), khz);
        Vec::new()
    }

    fn on_intent(&mut self, intent: Intent) -> Vec<Effect> {
        match intent {
            Intent::Tune(tune) => match command_for(&tune, self.store.frequency_khz()) {
                Ok(cmd) => {
                    info!("core: {:?} → {}", tune, cmd);
                    vec![Effect::Send(cmd)]
                }
                Err(DispatchError::FrequencyUnknown) => {
                    debug!("core: {:?} ignored, frequency unknown", tune);
                    vec![Effect::Notice(
                        Severity::Info,
                        "frequency not known yet, nothing sent".to_string(),
                    )]
                }
                Err(e) => {
                    warn!("core: {:?} rejected: {}", tune, e);
                    vec![Effect::Notice(Severity::Warning, e.to_string())]
                }
            },
            Intent::PromptFrequency => vec![Effect::OpenPrompt],
            Intent::ToggleHelp => vec![Effect::ToggleHelp],
            Intent::TogglePlayback => vec![Effect::TogglePlayback],
            Intent::Quit => vec![Effect::Quit],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::{Step, TuneIntent};
    use pretty_assertions::assert_eq;

    fn frame(json: &str) -> CoreEvent {
        CoreEvent::FrameReceived(json.to_string())
    }

    fn tune(intent: TuneIntent) -> CoreEvent {
        CoreEvent::Intent(Intent::Tune(intent))
    }

    fn sent(effects: &[Effect]) -> Vec<String> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Send(cmd) => Some(cmd.encode()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_steps_before_first_frame_send_nothing() {
        let mut core = ConsoleCore::new();
        for s in [Step::Up10, Step::Down100, Step::Up1000] {
            let effects = core.handle(tune(TuneIntent::Step(s)));
            assert!(sent(&effects).is_empty());
            assert!(matches!(effects[0], Effect::Notice(Severity::Info, _)));
        }
        assert!(sent(&core.handle(tune(TuneIntent::Refresh))).is_empty());
    }

    #[test]
    fn test_session_scenario() {
        let mut core = ConsoleCore::new();
        core.handle(CoreEvent::ConnectionOpened);
        core.handle(frame(r#"{"freq":"94.500","signal":"38.2","st":true,"ps":"RADIO 1"}"#));
        core.handle(frame(r#"{"users":3}"#));

        let snap = core.snapshot().unwrap();
        assert_eq!(snap.frequency_khz, Some(94_500));
        assert_eq!(snap.ps, "RADIO 1");
        assert_eq!(snap.users, Some(3));

        assert_eq!(
            sent(&core.handle(tune(TuneIntent::Step(Step::Up1000)))),
            vec!["T95500"]
        );
        assert_eq!(
            sent(&core.handle(tune(TuneIntent::Step(Step::Down10)))),
            vec!["T94490"]
        );
        assert_eq!(
            sent(&core.handle(tune(TuneIntent::SetAbsolute("100.1".into())))),
            vec!["T100100"]
        );
        // no optimistic update: the store still shows the device's last word
        assert_eq!(core.snapshot().unwrap().frequency_khz, Some(94_500));

        core.handle(frame(r#"{"freq":100.1}"#));
        assert_eq!(
            sent(&core.handle(tune(TuneIntent::Refresh))),
            vec!["T100100"]
        );
    }

    #[test]
    fn test_malformed_frame_leaves_snapshot_untouched() {
        let mut core = ConsoleCore::new();
        core.handle(frame(r#"{"freq":94.5,"ps":"ONE"}"#));
        let before = core.snapshot().cloned();

        for bad in ["{not json", "[1,2]", r#"{"freq":-3}"#, r#"{"freq":"abc"}"#] {
            let effects = core.handle(frame(bad));
            assert!(
                matches!(effects.as_slice(), [Effect::Notice(Severity::Warning, _)]),
                "{bad}"
            );
        }
        assert_eq!(core.snapshot().cloned(), before);
    }

    #[test]
    fn test_close_clears_snapshot() {
        let mut core = ConsoleCore::new();
        core.handle(frame(r#"{"freq":94.5}"#));
        let effects = core.handle(CoreEvent::ConnectionClosed {
            reason: "peer went away".into(),
        });
        assert!(core.snapshot().is_none());
        assert_eq!(
            effects,
            vec![Effect::Notice(
                Severity::Error,
                "connection closed: peer went away".into()
            )]
        );
        assert!(sent(&core.handle(tune(TuneIntent::Step(Step::Up100)))).is_empty());
    }

    #[test]
    fn test_bad_absolute_input_is_a_warning() {
        let mut core = ConsoleCore::new();
        let effects = core.handle(tune(TuneIntent::SetAbsolute("ninety".into())));
        assert!(matches!(
            effects.as_slice(),
            [Effect::Notice(Severity::Warning, _)]
        ));
    }

    #[test]
    fn test_non_tune_intents_map_to_effects() {
        let mut core = ConsoleCore::new();
        assert_eq!(
            core.handle(CoreEvent::Intent(Intent::TogglePlayback)),
            vec![Effect::TogglePlayback]
        );
        assert_eq!(
            core.handle(CoreEvent::Intent(Intent::ToggleHelp)),
            vec![Effect::ToggleHelp]
        );
        assert_eq!(
            core.handle(CoreEvent::Intent(Intent::PromptFrequency)),
            vec![Effect::OpenPrompt]
        );
        assert_eq!(core.handle(CoreEvent::Intent(Intent::Quit)), vec![Effect::Quit]);
        assert!(core.handle(CoreEvent::Tick).is_empty());
    }
}
