//! SIP dial-out over the LiveKit SIP service.

use crate::config::MediaConfig;
use crate::error::MediaError;
use crate::twirp::TwirpClient;
use async_trait::async_trait;
use serde_json::json;
use switchboard_transfer::{DialOutGateway, TransferError};
use tracing::info;

/// Dials phone numbers onto an outbound SIP trunk and joins the answered
/// call to a named room as a participant.
#[derive(Debug, Clone)]
pub struct TelephonyClient {
    twirp: TwirpClient,
}

impl TelephonyClient {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            twirp: TwirpClient::new(&config.url, &config.api_key, &config.api_secret),
        }
    }

    /// Creates a SIP participant: dials `call_to` over `trunk_id` and
    /// joins the call to `room_name` under `identity`. With
    /// `wait_until_answered` the RPC resolves only once the callee picks
    /// up or the server-side ringing timeout fires.
    pub async fn create_participant(
        &self,
        trunk_id: &str,
        call_to: &str,
        room_name: &str,
        identity: &str,
        wait_until_answered: bool,
    ) -> Result<(), MediaError> {
        let body = json!({
            "sipTrunkId": trunk_id,
            "sipCallTo": call_to,
            "roomName": room_name,
            "participantIdentity": identity,
            "waitUntilAnswered": wait_until_answered,
            "krispEnabled": true,
        });

        self.twirp
            .post("livekit.SIP", "CreateSIPParticipant", room_name, &body)
            .await
            .map_err(MediaError::Telephony)?;

        info!(to = call_to, room = room_name, identity, "SIP participant created");
        Ok(())
    }
}

#[async_trait]
impl DialOutGateway for TelephonyClient {
    async fn create_participant(
        &self,
        trunk_id: &str,
        destination: &str,
        session_name: &str,
        identity: &str,
        wait_until_answered: bool,
    ) -> Result<(), TransferError> {
        TelephonyClient::create_participant(
            self,
            trunk_id,
            destination,
            session_name,
            identity,
            wait_until_answered,
        )
        .await
        .map_err(TransferError::from)
    }
}
