//! Agent configuration loading from file and environment variables.

use serde::Deserialize;
use switchboard_voice::{MediaConfig, PipelineConfig, TelephonyConfig};
use thiserror::Error;

/// Top-level agent configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// LiveKit deployment settings.
    #[serde(default)]
    pub media: MediaConfig,

    /// SIP trunk and supervisor contact for the escalation path.
    #[serde(default)]
    pub telephony: TelephonyConfig,

    /// Local speech engine paths.
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Assistant persona and session settings.
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Assistant persona and session settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Name the assistant introduces itself with.
    #[serde(default = "default_agent_name")]
    pub agent_name: String,

    /// Room the assistant serves the caller in.
    #[serde(default = "default_session_name")]
    pub session_name: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "switchboard_agent=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_agent_name() -> String {
    "Alex".to_string()
}

fn default_session_name() -> String {
    "switchboard-call".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            agent_name: default_agent_name(),
            session_name: default_session_name(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `SWITCHBOARD_URL` overrides `media.url`
/// - `SWITCHBOARD_API_KEY` overrides `media.api_key`
/// - `SWITCHBOARD_API_SECRET` overrides `media.api_secret`
/// - `SWITCHBOARD_TRUNK_ID` overrides `telephony.trunk_id`
/// - `SWITCHBOARD_SUPERVISOR_CONTACT` overrides `telephony.supervisor_contact`
/// - `SWITCHBOARD_SESSION_NAME` overrides `assistant.session_name`
/// - `SWITCHBOARD_LOG_LEVEL` overrides `logging.level`
/// - `SWITCHBOARD_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    // Environment variable overrides
    if let Ok(url) = std::env::var("SWITCHBOARD_URL") {
        config.media.url = url;
    }
    if let Ok(key) = std::env::var("SWITCHBOARD_API_KEY") {
        config.media.api_key = key;
    }
    if let Ok(secret) = std::env::var("SWITCHBOARD_API_SECRET") {
        config.media.api_secret = secret;
    }
    if let Ok(trunk) = std::env::var("SWITCHBOARD_TRUNK_ID") {
        config.telephony.trunk_id = trunk;
    }
    if let Ok(contact) = std::env::var("SWITCHBOARD_SUPERVISOR_CONTACT") {
        config.telephony.supervisor_contact = contact;
    }
    if let Ok(session) = std::env::var("SWITCHBOARD_SESSION_NAME") {
        config.assistant.session_name = session;
    }
    if let Ok(level) = std::env::var("SWITCHBOARD_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(json) = std::env::var("SWITCHBOARD_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_apply_without_a_file() {
        let config = load_config(None).expect("defaults should load");
        assert_eq!(config.assistant.agent_name, "Alex");
        assert_eq!(config.assistant.session_name, "switchboard-call");
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert!(config.telephony.trunk_id.is_empty());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config(Some("/definitely/not/here.toml")).expect("should fall back");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn file_values_are_loaded() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"
            [media]
            url = "wss://switchboard.example.com"
            api_key = "APIkey"
            api_secret = "secret"

            [telephony]
            trunk_id = "ST_abcxyz"
            supervisor_contact = "+12003004000"

            [assistant]
            agent_name = "Robin"

            [logging]
            level = "debug"
            json = true
            "#
        )
        .expect("write config");

        let config =
            load_config(Some(file.path().to_str().expect("utf-8 path"))).expect("should parse");
        assert_eq!(config.media.url, "wss://switchboard.example.com");
        assert_eq!(config.telephony.trunk_id, "ST_abcxyz");
        assert_eq!(config.assistant.agent_name, "Robin");
        assert_eq!(config.assistant.session_name, "switchboard-call");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not [valid toml").expect("write config");

        let err = load_config(Some(file.path().to_str().expect("utf-8 path")))
            .expect_err("should fail to parse");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
