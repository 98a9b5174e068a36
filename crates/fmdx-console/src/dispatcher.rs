//! Command dispatcher — turns tune intents into wire commands.
//!
//! Only reads the last known frequency; the store is never touched here.  The
//! device's next state push is what moves the displayed frequency.

use fmdx_proto::protocol::{mhz_to_khz, TuneCommand};
use thiserror::Error;

use crate::intent::TuneIntent;

#[derive(Debug, Error, PartialEq)]
pub enum DispatchError {
    #[error("frequency not known yet")]
    FrequencyUnknown,
    #[error("{0} kHz is out of range")]
    OutOfRange(i64),
    #[error("{0:?} is not a frequency in MHz")]
    InvalidInput(String),
}

/// Build the command for `intent` given the current frequency in kHz.
pub fn command_for(
    intent: &TuneIntent,
    current_khz: Option<u32>,
) -> Result<TuneCommand, DispatchError> {
    match intent {
        TuneIntent::Step(step) => {
            let current = current_khz.ok_or(DispatchError::FrequencyUnknown)?;
            let target = current as i64 + step.delta_khz();
            u32::try_from(target)
                .map(TuneCommand::new)
                .map_err(|_| DispatchError::OutOfRange(target))
        }
        TuneIntent::Refresh => current_khz
            .map(TuneCommand::new)
            .ok_or(DispatchError::FrequencyUnknown),
        TuneIntent::SetAbsolute(input) => {
            let mhz = parse_mhz(input)?;
            // zero is never a real tuner frequency, only a typo
            match mhz_to_khz(mhz) {
                Some(khz) if khz > 0 => Ok(TuneCommand::new(khz)),
                _ => Err(DispatchError::InvalidInput(input.clone())),
            }
        }
    }
}

/// Parse operator input such as `100.1` or `94,5`.
pub fn parse_mhz(input: &str) -> Result<f64, DispatchError> {
    let normalized = input.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DispatchError::InvalidInput(input.to_string()))
}
