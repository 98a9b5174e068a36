//! Shared model of an FM-DX webserver session: wire protocol, tuner snapshot
//! store, endpoint derivation and on-disk configuration.

pub mod address;
pub mod config;
pub mod platform;
pub mod protocol;
pub mod state;
