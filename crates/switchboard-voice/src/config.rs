//! Media and telephony configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

fn default_token_ttl_seconds() -> u64 {
    3600
}

fn default_hold_audio() -> String {
    "hold_music.mp3".to_string()
}

/// Connection settings for the LiveKit deployment.
#[derive(Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Server URL (`ws://` or `http://` both accepted; Twirp calls are
    /// made over the HTTP form).
    pub url: String,
    pub api_key: String,
    #[serde(skip_serializing)]
    pub api_secret: String,
    /// JWT token TTL in seconds for join tokens. Default: 3600 (1 hour).
    #[serde(default = "default_token_ttl_seconds")]
    pub token_ttl_seconds: u64,
}

impl MediaConfig {
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            token_ttl_seconds: default_token_ttl_seconds(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.url.is_empty()
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            token_ttl_seconds: default_token_ttl_seconds(),
        }
    }
}

impl fmt::Debug for MediaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish()
    }
}

/// Telephony settings for the warm-transfer escalation path.
///
/// `trunk_id` and `supervisor_contact` are both required for a transfer
/// to start; the orchestrator refuses escalation (with a spoken notice)
/// when either is empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelephonyConfig {
    /// Outbound SIP trunk identifier, e.g. `ST_abcxyz`.
    #[serde(default)]
    pub trunk_id: String,
    /// Supervisor phone number in E.164 form, e.g. `+12003004000`.
    #[serde(default)]
    pub supervisor_contact: String,
    /// Hold-audio asset looped at the caller during escalation.
    #[serde(default = "default_hold_audio")]
    pub hold_audio: String,
}
