use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Tag letter of the tune command (`T94500`).
pub const TUNE_TAG: char = 'T';

/// Errors raised while decoding an inbound control-channel frame.
/// All of them are recoverable: the frame is dropped and the session goes on.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("frame is not a json object")]
    NotAnObject,
    #[error("invalid frequency {0}")]
    InvalidFrequency(Value),
}

/// The two radiotext lines.  The device only ever reports them as a pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Radiotext {
    pub line0: String,
    pub line1: String,
}

/// Transmitter database entry for the tuned station.
/// Every field may be missing; a missing field is unknown, not zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransmitterInfo {
    pub city: Option<String>,
    pub distance_km: Option<f64>,
    pub station: Option<String>,
    pub erp_kw: Option<f64>,
    pub itu: Option<String>,
    pub polarization: Option<String>,
    pub azimuth_deg: Option<f64>,
}

impl TransmitterInfo {
    fn from_object(obj: &Map<String, Value>) -> Self {
        let text = |key: &str| obj.get(key).and_then(non_empty_text);
        let number = |key: &str| obj.get(key).and_then(as_number);
        Self {
            city: text("city"),
            distance_km: number("distance"),
            station: text("station"),
            erp_kw: number("erp"),
            itu: text("itu"),
            polarization: text("pol"),
            azimuth_deg: number("azimuth"),
        }
    }
}

/// Last known state of the remote tuner, merged from every frame received in
/// the current session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TunerSnapshot {
    /// `None` until a frame carrying a frequency has been merged.
    pub frequency_khz: Option<u32>,
    /// Raw signal level in dBf.
    pub signal: Option<f64>,
    pub stereo: bool,
    pub ps: String,
    pub pi: String,
    pub radiotext: Radiotext,
    pub transmitter: Option<TransmitterInfo>,
    pub users: Option<u32>,
}

impl TunerSnapshot {
    pub fn frequency_mhz(&self) -> Option<f64> {
        self.frequency_khz.map(khz_to_mhz)
    }
}

/// A decoded inbound frame.  Every field is optional: `None` means the key was
/// absent and the stored value must be kept.  For the nullable fields the
/// inner `None` is an explicit `null` on the wire, which clears the value.
/// A value that does not fit its field is treated as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TunerUpdate {
    pub frequency_khz: Option<u32>,
    pub signal: Option<Option<f64>>,
    pub stereo: Option<bool>,
    pub ps: Option<String>,
    pub pi: Option<String>,
    pub radiotext: Option<Radiotext>,
    pub transmitter: Option<Option<TransmitterInfo>>,
    pub users: Option<Option<u32>>,
}

/// Shape of the JSON record pushed by the webserver.  Values are kept raw so
/// that "absent" and "null" stay distinguishable and numbers sent as strings
/// still decode.
#[derive(Debug, Default, Deserialize)]
struct RawFrame {
    #[serde(default, deserialize_with = "present")]
    freq: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    signal: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    st: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    ps: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pi: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    rt0: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    rt1: Option<Value>,
    #[serde(default, rename = "txInfo", deserialize_with = "present")]
    tx_info: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    users: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl TunerUpdate {
    /// Decode one text frame from the control channel.
    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(DecodeError::NotAnObject);
        }
        let raw: RawFrame = serde_json::from_value(value)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawFrame) -> Result<Self, DecodeError> {
        let frequency_khz = match raw.freq {
            None | Some(Value::Null) => None,
            Some(v) => Some(
                as_number(&v)
                    .and_then(mhz_to_khz)
                    .ok_or(DecodeError::InvalidFrequency(v))?,
            ),
        };

        let radiotext = match (raw.rt0, raw.rt1) {
            (Some(rt0), Some(rt1)) => Some(Radiotext {
                line0: as_text(&rt0),
                line1: as_text(&rt1),
            }),
            _ => None,
        };

        let transmitter = match raw.tx_info {
            None => None,
            Some(Value::Null) => Some(None),
            Some(Value::Object(obj)) => Some(Some(TransmitterInfo::from_object(&obj))),
            Some(other) => {
                tracing::debug!("ignoring txInfo of unexpected shape: {}", other);
                None
            }
        };

        Ok(Self {
            frequency_khz,
            signal: raw.signal.and_then(|v| nullable("signal", v, as_number)),
            stereo: raw.st.and_then(|v| as_flag(&v)),
            ps: raw.ps.map(|v| as_text(&v)),
            pi: raw.pi.map(|v| as_text(&v)),
            radiotext,
            transmitter,
            users: raw.users.and_then(|v| nullable("users", v, as_count)),
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// `null` clears, a valid value sets, anything else leaves the field alone.
fn nullable<T>(key: &str, value: Value, parse: fn(&Value) -> Option<T>) -> Option<Option<T>> {
    if value.is_null() {
        return Some(None);
    }
    let parsed = parse(&value);
    if parsed.is_none() {
        tracing::debug!("ignoring {} of unexpected value: {}", key, value);
    }
    parsed.map(Some)
}

fn as_count(value: &Value) -> Option<u32> {
    as_number(value)
        .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= u32::MAX as f64)
        .map(|n| n as u32)
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn non_empty_text(value: &Value) -> Option<String> {
    let text = as_text(value);
    (!text.trim().is_empty()).then_some(text)
}

fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Null => Some(false),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        _ => None,
    }
}

/// Convert a wire frequency in MHz to whole kHz, rounding to the nearest kHz.
/// Rejects negative, non-finite and out-of-range values.
pub fn mhz_to_khz(mhz: f64) -> Option<u32> {
    if !mhz.is_finite() || mhz < 0.0 {
        return None;
    }
    let khz = (mhz * 1000.0).round();
    (khz <= u32::MAX as f64).then_some(khz as u32)
}

pub fn khz_to_mhz(khz: u32) -> f64 {
    khz as f64 / 1000.0
}

/// Outbound tune command: tag letter followed by the frequency in kHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TuneCommand {
    pub frequency_khz: u32,
}

impl TuneCommand {
    pub fn new(frequency_khz: u32) -> Self {
        Self { frequency_khz }
    }

    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Parse a command as the device would see it.
    #[cfg(test)]
    fn parse(text: &str) -> Option<Self> {
        let digits = text.strip_prefix(TUNE_TAG)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(Self::new)
    }
}

impl fmt::Display for TuneCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", TUNE_TAG, self.frequency_khz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_frame() {
        let frame = r#"{
            "freq": "94.500", "signal": 42.5, "st": true, "ps": "RADIO 1 ", "pi": "83A1",
            "rt0": "hello", "rt1": "world", "users": 3,
            "txInfo": {"city": "Utrecht", "distance": "41", "station": "Radio 1",
                       "erp": 50, "itu": "HOL", "pol": "h", "azimuth": "122"}
        }"#;
        let update = TunerUpdate::decode(frame).unwrap();
        assert_eq!(update.frequency_khz, Some(94_500));
        assert_eq!(update.signal, Some(Some(42.5)));
        assert_eq!(update.stereo, Some(true));
        assert_eq!(update.ps.as_deref(), Some("RADIO 1 "));
        assert_eq!(update.pi.as_deref(), Some("83A1"));
        assert_eq!(
            update.radiotext,
            Some(Radiotext {
                line0: "hello".into(),
                line1: "world".into()
            })
        );
        assert_eq!(update.users, Some(Some(3)));
        let tx = update.transmitter.unwrap().unwrap();
        assert_eq!(tx.city.as_deref(), Some("Utrecht"));
        assert_eq!(tx.distance_km, Some(41.0));
        assert_eq!(tx.erp_kw, Some(50.0));
        assert_eq!(tx.polarization.as_deref(), Some("h"));
        assert_eq!(tx.azimuth_deg, Some(122.0));
    }

    #[test]
    fn test_decode_absent_vs_null() {
        let absent = TunerUpdate::decode(r#"{"ps": "X"}"#).unwrap();
        assert_eq!(absent.users, None);
        assert_eq!(absent.transmitter, None);
        assert_eq!(absent.signal, None);

        let null =
            TunerUpdate::decode(r#"{"users": null, "txInfo": null, "signal": null}"#).unwrap();
        assert_eq!(null.users, Some(None));
        assert_eq!(null.transmitter, Some(None));
        assert_eq!(null.signal, Some(None));
    }

    #[test]
    fn test_unusable_numbers_decode_as_absent() {
        let update =
            TunerUpdate::decode(r#"{"signal": "n/a", "users": "?", "ps": "X"}"#).unwrap();
        assert_eq!(update.signal, None);
        assert_eq!(update.users, None);

        for users in ["-1", "2.7", "\"2.5\"", "true", "[3]"] {
            let frame = format!(r#"{{"users": {}}}"#, users);
            assert_eq!(TunerUpdate::decode(&frame).unwrap().users, None, "{}", frame);
        }
        assert_eq!(
            TunerUpdate::decode(r#"{"users": "4"}"#).unwrap().users,
            Some(Some(4))
        );
        assert_eq!(
            TunerUpdate::decode(r#"{"users": 5.0}"#).unwrap().users,
            Some(Some(5))
        );
    }

    #[test]
    fn test_radiotext_needs_both_lines() {
        let update = TunerUpdate::decode(r#"{"rt0": "only one"}"#).unwrap();
        assert_eq!(update.radiotext, None);
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(matches!(
            TunerUpdate::decode("{not json"),
            Err(DecodeError::Json(_))
        ));
        assert!(matches!(
            TunerUpdate::decode("[1, 2]"),
            Err(DecodeError::NotAnObject)
        ));
        assert!(matches!(
            TunerUpdate::decode(r#"{"freq": "abc"}"#),
            Err(DecodeError::InvalidFrequency(_))
        ));
        assert!(matches!(
            TunerUpdate::decode(r#"{"freq": -87.5}"#),
            Err(DecodeError::InvalidFrequency(_))
        ));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let update = TunerUpdate::decode(r#"{"freq": 100.1, "ant": 2, "bw": 0}"#).unwrap();
        assert_eq!(update.frequency_khz, Some(100_100));
    }

    #[test]
    fn test_frequency_conversion() {
        assert_eq!(mhz_to_khz(94.5), Some(94_500));
        assert_eq!(khz_to_mhz(94_500), 94.5);
        // 87.6 * 1000 is 87599.99999… in binary floating point
        assert_eq!(mhz_to_khz(87.6), Some(87_600));
        assert_eq!(mhz_to_khz(f64::NAN), None);
        assert_eq!(mhz_to_khz(-1.0), None);
    }

    #[test]
    fn test_tune_command_wire_format() {
        assert_eq!(TuneCommand::new(94_500).encode(), "T94500");
        assert_eq!(TuneCommand::parse("T100100"), Some(TuneCommand::new(100_100)));
        assert_eq!(TuneCommand::parse("T-5"), None);
        assert_eq!(TuneCommand::parse("X94500"), None);
    }
}
