//! Minimal Twirp JSON client for LiveKit server RPCs not covered by the
//! SDK's typed wrappers (SIP dial-out, participant migration).
//!
//! Twirp accepts `application/json` bodies at
//! `POST {base}/twirp/{service}/{method}` with a Bearer server token.

use livekit_api::access_token::{AccessToken, VideoGrants};
use serde_json::Value;

/// Identity stamped on server-to-server API tokens.
const API_IDENTITY: &str = "switchboard-api";

#[derive(Debug, Clone)]
pub(crate) struct TwirpClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

/// Rewrites a WebSocket-form server URL into its HTTP form.
fn http_url(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("ws://") {
        format!("http://{rest}")
    } else if let Some(rest) = url.strip_prefix("wss://") {
        format!("https://{rest}")
    } else {
        url.to_string()
    }
}

impl TwirpClient {
    pub(crate) fn new(url: &str, api_key: &str, api_secret: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: http_url(url).trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
        }
    }

    fn server_token(&self, room: &str) -> Result<String, String> {
        AccessToken::with_api_key(&self.api_key, &self.api_secret)
            .with_identity(API_IDENTITY)
            .with_grants(VideoGrants {
                room_admin: true,
                room: room.to_string(),
                ..Default::default()
            })
            .to_jwt()
            .map_err(|e| format!("failed to sign server token: {e}"))
    }

    /// Calls `service`/`method` with `body`, authorized for `room`.
    ///
    /// Errors are plain strings; callers fold them into their own error
    /// kind so the transfer core sees the right failure category.
    pub(crate) async fn post(
        &self,
        service: &str,
        method: &str,
        room: &str,
        body: &Value,
    ) -> Result<Value, String> {
        let token = self.server_token(room)?;
        let url = format!("{}/twirp/{service}/{method}", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(|e| format!("{service}/{method} request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(format!("{service}/{method} returned {status}: {detail}"));
        }

        response
            .json()
            .await
            .map_err(|e| format!("{service}/{method} returned invalid JSON: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn websocket_urls_rewritten_to_http() {
        assert_eq!(http_url("ws://localhost:7880"), "http://localhost:7880");
        assert_eq!(http_url("wss://lk.example.com"), "https://lk.example.com");
        assert_eq!(http_url("http://localhost:7880"), "http://localhost:7880");
    }
}
