use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub connection: ConnectionConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Control address used when `--url` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Explicit mpv binary; searched beside the executable and on PATH otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<PathBuf>,
    /// Extra arguments passed to the player before the stdin source.
    #[serde(default)]
    pub player_args: Vec<String>,
    /// Start audio as soon as the console is up.
    #[serde(default)]
    pub autoplay: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive; `RUST_LOG` wins when set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            player: None,
            player_args: default_player_args(),
            autoplay: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_player_args() -> Vec<String> {
    vec!["--cache=no".to_string()]
}

fn default_log_filter() -> String {
    "info,fmdx_console=debug,tungstenite=warn,tokio_tungstenite=warn".to_string()
}

impl Config {
    /// Load from the default location, writing defaults on first run.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.connection.url.is_none());
        assert!(!config.audio.autoplay);
        assert_eq!(config.audio.player_args, vec!["--cache=no"]);
        assert!(config.logging.filter.starts_with("info"));
        assert!(Config::config_path().ends_with("fmdx-console/config.toml"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::parse(
            r#"
            [connection]
            url = "ws://tuner.local:8080/"

            [audio]
            autoplay = true
            "#,
        )
        .unwrap();
        assert_eq!(config.connection.url.as_deref(), Some("ws://tuner.local:8080/"));
        assert!(config.audio.autoplay);
        assert_eq!(config.audio.player_args, vec!["--cache=no"]);
        assert_eq!(config.logging.filter, default_log_filter());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = Config::default();
        config.audio.player = Some(PathBuf::from("/usr/bin/mpv"));
        let text = toml::to_string_pretty(&config).unwrap();
        let back = Config::parse(&text).unwrap();
        assert_eq!(back.audio.player, config.audio.player);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(Config::parse("[audio\nautoplay = yes").is_err());
    }
}
