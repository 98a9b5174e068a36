/// Audio collaborator backed by an mpv child process.
///
/// ```text
///   MpvStreamPlayer::play()
///         │
///         └── stream_task  ← websocket (binary MP3 frames)
///                              └── mpv stdin  (`mpv -`)
/// ```
///
/// `play()` and `stop()` return immediately; the task owns the socket and the
/// child.  Aborting the task drops the child, which kills mpv.  Failures inside
/// the task are logged and end the task, nothing more.
use std::path::{Path, PathBuf};
use std::process::Stdio;

use futures_util::{SinkExt, StreamExt};
use tokio::io::AsyncWriteExt;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use crate::playback::{AudioPlayer, PlaybackError};

/// Asks the webserver's audio endpoint for a plain MP3 stream.
pub const FALLBACK_HANDSHAKE: &str = r#"{"type":"fallback","data":"mp3"}"#;

pub struct MpvStreamPlayer {
    address: String,
    binary: Option<PathBuf>,
    extra_args: Vec<String>,
    task: Option<JoinHandle<()>>,
}

impl MpvStreamPlayer {
    /// Bind a player to the audio stream address for the life of the process.
    /// A missing `binary` is only reported when playback is requested.
    pub fn new(address: String, binary: Option<PathBuf>, extra_args: Vec<String>) -> Self {
        Self {
            address,
            binary,
            extra_args,
            task: None,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl AudioPlayer for MpvStreamPlayer {
    fn play(&mut self) -> Result<(), PlaybackError> {
        if self.is_running() {
            return Ok(());
        }
        let binary = self.binary.clone().ok_or(PlaybackError::PlayerNotFound)?;
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| PlaybackError::Player(e.to_string()))?;

        info!("audio: starting {:?} for {}", binary, self.address);
        self.task = Some(runtime.spawn(stream_task(
            self.address.clone(),
            binary,
            self.extra_args.clone(),
        )));
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PlaybackError> {
        if let Some(task) = self.task.take() {
            info!("audio: stopping");
            task.abort();
        }
        Ok(())
    }
}

impl Drop for MpvStreamPlayer {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

// ── stream task ───────────────────────────────────────────────────────────────

async fn stream_task(address: String, binary: PathBuf, extra_args: Vec<String>) {
    match pump(&address, &binary, &extra_args).await {
        Ok(()) => info!("audio: stream ended"),
        Err(e) => warn!("audio: {:#}", e),
    }
}

async fn pump(address: &str, binary: &Path, extra_args: &[String]) -> anyhow::Result<()> {
    let (ws, _) = tokio_tungstenite::connect_async(address).await?;
    let (mut sink, mut stream) = ws.split();
    sink.send(Message::Text(FALLBACK_HANDSHAKE.to_string()))
        .await?;
    info!("audio: connected to {}", address);

    // mpv stderr goes to its own log file for debugging decoder trouble
    let stderr_path = fmdx_proto::platform::data_dir().join("mpv-stderr.log");
    let stderr = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&stderr_path)
    {
        Ok(file) => Stdio::from(file),
        Err(e) => {
            debug!("audio: cannot open {:?}: {}", stderr_path, e);
            Stdio::null()
        }
    };

    let mut child = tokio::process::Command::new(binary)
        .arg("--no-video")
        .arg("--quiet")
        .args(mpv_args(extra_args))
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(stderr)
        .kill_on_drop(true)
        .spawn()?;
    info!("audio: spawned mpv with pid {:?}", child.id());

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| anyhow::anyhow!("mpv stdin unavailable"))?;

    let mut bytes_in: u64 = 0;
    while let Some(msg) = stream.next().await {
        match msg? {
            Message::Binary(chunk) => {
                bytes_in += chunk.len() as u64;
                stdin.write_all(&chunk).await?;
            }
            Message::Ping(payload) => sink.send(Message::Pong(payload)).await?,
            Message::Close(_) => break,
            _ => {}
        }
    }
    debug!("audio: {} bytes forwarded", bytes_in);

    drop(stdin);
    let _ = child.kill().await;
    Ok(())
}

/// Arguments after the fixed ones: user extras, then `-` to read stdin.
fn mpv_args(extra_args: &[String]) -> Vec<String> {
    let mut args = extra_args.to_vec();
    args.push("-".to_string());
    args
}
