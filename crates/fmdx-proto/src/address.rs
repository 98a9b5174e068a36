//! Endpoint derivation for an FM-DX webserver.
//!
//! The operator gives one address, the control channel root.  The text channel
//! lives below it and the audio stream is either on a fixed port (plain `ws://`)
//! or below a fixed path (`wss://`, usually behind a reverse proxy).

use thiserror::Error;

/// Port the webserver streams audio on for unencrypted connections.
pub const AUDIO_PORT: u16 = 8081;
/// Path of the audio stream for encrypted connections.
pub const AUDIO_PATH: &str = "stream/";
/// Path of the control text channel.
pub const TEXT_PATH: &str = "text";

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("no server address given")]
    Missing,
    #[error("address {0:?} does not start with ws:// or wss://")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Ws,
    Wss,
}

pub fn scheme_of(address: &str) -> Result<Scheme, AddressError> {
    if address.trim().is_empty() {
        Err(AddressError::Missing)
    } else if address.starts_with("ws://") {
        Ok(Scheme::Ws)
    } else if address.starts_with("wss://") {
        Ok(Scheme::Wss)
    } else {
        Err(AddressError::UnsupportedScheme(address.to_string()))
    }
}

/// Derive the audio stream address from the control address.
pub fn resolve_audio_address(address: &str) -> Result<String, AddressError> {
    match scheme_of(address)? {
        Scheme::Ws => Ok(match strip_port(address) {
            Some(host) => format!("{}:{}", host, AUDIO_PORT),
            None => address.to_string(),
        }),
        Scheme::Wss => Ok(join(address, AUDIO_PATH)),
    }
}

/// Address of the control text channel.
pub fn text_endpoint(address: &str) -> Result<String, AddressError> {
    scheme_of(address)?;
    Ok(join(address, TEXT_PATH))
}

/// Everything before a trailing `:<digits>`, if the address ends with one.
fn strip_port(address: &str) -> Option<&str> {
    let digits = address.trim_end_matches(|c: char| c.is_ascii_digit());
    if digits.len() == address.len() {
        return None;
    }
    digits.strip_suffix(':')
}

fn join(base: &str, path: &str) -> String {
    if base.ends_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}
