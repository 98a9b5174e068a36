//! fmdx-console — terminal remote control for an FM-DX webserver tuner.
//!
//! # Usage
//!
//! ```bash
//! fmdx-console --url ws://tuner.example:8080/
//! fmdx-console --url wss://tuner.example/ --play
//! RUST_LOG=debug fmdx-console --url ws://192.168.1.20:8080
//! ```

mod app;
mod app_state;
mod component;
mod components;
mod connection;
mod core;
mod dispatcher;
mod intent;
mod mpv;
mod playback;
mod theme;
mod widgets;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fmdx_proto::address::{resolve_audio_address, text_endpoint};
use fmdx_proto::config::Config;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const MIN_COLS: u16 = 80;
const MIN_ROWS: u16 = 24;
const CONNECTION_QUEUE: usize = 256;

/// Terminal remote control for an FM-DX webserver tuner
#[derive(Parser, Debug)]
#[command(name = "fmdx-console")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Webserver address, ws://host:port/ or wss://host/
    #[arg(short = 'u', long, value_name = "ADDR")]
    url: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Start audio playback right away
    #[arg(short = 'p', long)]
    play: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // ── Load config ──────────────────────────────────────────────────────────
    let loaded = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(c) => c,
        Err(e) => {
            eprintln!("fmdx-console: cannot load config: {:#}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    // ── Resolve endpoints before anything touches the network ────────────────
    let address = args
        .url
        .clone()
        .or_else(|| config.connection.url.clone())
        .unwrap_or_default();
    let endpoints = text_endpoint(&address)
        .and_then(|text| resolve_audio_address(&address).map(|audio| (text, audio)));
    let (text_url, audio_url) = match endpoints {
        Ok(e) => e,
        Err(e) => {
            eprintln!("fmdx-console: {}", e);
            eprintln!("usage: fmdx-console --url <websocket_address>");
            return Ok(ExitCode::FAILURE);
        }
    };

    // ── Logging ──────────────────────────────────────────────────────────────
    let data_dir = fmdx_proto::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("console.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // RUST_LOG wins over the configured filter.
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.filter.clone());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(EnvFilter::new(log_filter))
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("fmdx-console log: {}", log_path.display());
    tracing::info!("fmdx-console starting: control channel {}", text_url);

    // ── Terminal size guard ──────────────────────────────────────────────────
    let (cols, rows) = ratatui::crossterm::terminal::size()?;
    if cols < MIN_COLS || rows < MIN_ROWS {
        eprintln!(
            "fmdx-console: terminal is {}x{}, at least {}x{} is needed",
            cols, rows, MIN_COLS, MIN_ROWS
        );
        return Ok(ExitCode::FAILURE);
    }

    // ── Audio collaborator, bound once for the process ───────────────────────
    let mpv_binary = fmdx_proto::platform::find_mpv_binary(config.audio.player.as_deref());
    if mpv_binary.is_none() {
        tracing::warn!("mpv not found; audio playback unavailable");
    }
    let player = mpv::MpvStreamPlayer::new(audio_url, mpv_binary, config.audio.player_args.clone());
    tracing::info!("audio stream {}", player.address());

    // ── Control session ──────────────────────────────────────────────────────
    let (conn_tx, conn_rx) = mpsc::channel(CONNECTION_QUEUE);
    let session = connection::Session::open(text_url, conn_tx);

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let autoplay = args.play || config.audio.autoplay;
    let app = app::App::new(address, session, player, autoplay);
    app.run(conn_rx).await?;

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["fmdx-console", "--url", "ws://10.0.0.2:8080", "--play"]);
        assert_eq!(args.url.as_deref(), Some("ws://10.0.0.2:8080"));
        assert!(args.play);
        assert!(args.config.is_none());

        let args = Args::parse_from(["fmdx-console"]);
        assert!(args.url.is_none());
        assert!(!args.play);
    }
}
