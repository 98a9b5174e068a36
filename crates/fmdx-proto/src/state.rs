use crate::protocol::{TunerSnapshot, TunerUpdate};

/// Owner of the tuner snapshot for one control session.
///
/// Mutated only by the event loop that decodes inbound frames; everything else
/// reads through [`TunerStore::current`].  A frame is merged field by field:
/// keys absent from the frame keep their stored value, keys present overwrite
/// it, explicit empty values included.
#[derive(Debug, Default)]
pub struct TunerStore {
    snapshot: TunerSnapshot,
    received: bool,
    rev: u64,
}

impl TunerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a decoded frame and return the resulting snapshot.
    pub fn apply_update(&mut self, update: &TunerUpdate) -> &TunerSnapshot {
        let s = &mut self.snapshot;

        if let Some(khz) = update.frequency_khz {
            s.frequency_khz = Some(khz);
        }
        if let Some(signal) = update.signal {
            s.signal = signal;
        }
        if let Some(stereo) = update.stereo {
            s.stereo = stereo;
        }
        if let Some(ps) = &update.ps {
            s.ps.clone_from(ps);
        }
        if let Some(pi) = &update.pi {
            s.pi.clone_from(pi);
        }
        if let Some(rt) = &update.radiotext {
            s.radiotext.clone_from(rt);
        }
        // txInfo is replaced as a unit: sub-fields missing from the new record
        // belong to a different transmitter and must not leak through.
        if let Some(tx) = &update.transmitter {
            s.transmitter.clone_from(tx);
        }
        if let Some(users) = update.users {
            s.users = users;
        }

        self.rev += 1;
        self.received = true;
        &self.snapshot
    }

    /// The merged snapshot, or `None` if nothing has been received yet.
    pub fn current(&self) -> Option<&TunerSnapshot> {
        self.received.then_some(&self.snapshot)
    }

    /// Number of frames merged since the store was created or last reset.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn frequency_khz(&self) -> Option<u32> {
        self.current().and_then(|s| s.frequency_khz)
    }

    /// Forget everything.  Called when the session that fed this store ends,
    /// so stale values are never shown as live.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Radiotext, TransmitterInfo};
    use pretty_assertions::assert_eq;

    fn decode(frame: &str) -> TunerUpdate {
        TunerUpdate::decode(frame).unwrap()
    }

    #[test]
    fn test_empty_store_has_no_snapshot() {
        let store = TunerStore::new();
        assert!(store.current().is_none());
        assert_eq!(store.frequency_khz(), None);
    }

    #[test]
    fn test_received_zero_is_distinct_from_unknown() {
        let mut store = TunerStore::new();
        store.apply_update(&decode(r#"{"freq": 0}"#));
        assert_eq!(store.frequency_khz(), Some(0));
    }

    #[test]
    fn test_frame_without_frequency_keeps_it_unknown() {
        let mut store = TunerStore::new();
        store.apply_update(&decode(r#"{"ps": "NPO 3FM"}"#));
        assert!(store.current().is_some());
        assert_eq!(store.frequency_khz(), None);
    }

    #[test]
    fn test_absent_fields_are_kept() {
        let mut store = TunerStore::new();
        store.apply_update(&decode(
            r#"{"freq": 94.5, "ps": "RADIO 1", "pi": "83A1", "users": 2, "rt0": "a", "rt1": "b"}"#,
        ));
        store.apply_update(&decode(r#"{"signal": 30}"#));

        let s = store.current().unwrap();
        assert_eq!(s.frequency_khz, Some(94_500));
        assert_eq!(s.ps, "RADIO 1");
        assert_eq!(s.pi, "83A1");
        assert_eq!(s.users, Some(2));
        assert_eq!(
            s.radiotext,
            Radiotext {
                line0: "a".into(),
                line1: "b".into()
            }
        );
        assert_eq!(s.signal, Some(30.0));
    }

    #[test]
    fn test_explicit_empty_values_overwrite() {
        let mut store = TunerStore::new();
        store.apply_update(&decode(
            r#"{"ps": "RADIO 1", "users": 4, "txInfo": {"city": "Hilversum"}}"#,
        ));
        store.apply_update(&decode(r#"{"ps": "", "users": null, "txInfo": null}"#));

        let s = store.current().unwrap();
        assert_eq!(s.ps, "");
        assert_eq!(s.users, None);
        assert_eq!(s.transmitter, None);
    }

    #[test]
    fn test_transmitter_replaced_as_unit() {
        let mut store = TunerStore::new();
        store.apply_update(&decode(
            r#"{"txInfo": {"city": "Lopik", "erp": 120, "station": "NPO Radio 2"}}"#,
        ));
        store.apply_update(&decode(r#"{"txInfo": {"city": "Roermond"}}"#));

        assert_eq!(
            store.current().unwrap().transmitter,
            Some(TransmitterInfo {
                city: Some("Roermond".into()),
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_merge_is_idempotent() {
        let update = decode(r#"{"freq": 101.2, "st": false, "ps": "X", "rt0": "1", "rt1": "2"}"#);

        let mut once = TunerStore::new();
        once.apply_update(&update);

        let mut twice = TunerStore::new();
        twice.apply_update(&update);
        twice.apply_update(&update);

        assert_eq!(once.current(), twice.current());
        assert_eq!(once.rev(), 1);
        assert_eq!(twice.rev(), 2);
    }

    #[test]
    fn test_unusable_values_keep_stored_ones() {
        let mut store = TunerStore::new();
        store.apply_update(&decode(r#"{"signal": 42.5, "users": 3}"#));
        store.apply_update(&decode(r#"{"signal": "n/a", "users": "?"}"#));
        store.apply_update(&decode(r#"{"users": 2.7}"#));
        store.apply_update(&decode(r#"{"users": -1}"#));

        let s = store.current().unwrap();
        assert_eq!(s.signal, Some(42.5));
        assert_eq!(s.users, Some(3));
    }

    #[test]
    fn test_reset_forgets_snapshot() {
        let mut store = TunerStore::new();
        store.apply_update(&decode(r#"{"freq": 94.5}"#));
        store.reset();
        assert!(store.current().is_none());
        assert_eq!(store.rev(), 0);
        assert_eq!(store.frequency_khz(), None);
    }
}
