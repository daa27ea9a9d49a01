//! Participant migration between rooms.

use crate::config::MediaConfig;
use crate::error::MediaError;
use crate::twirp::TwirpClient;
use async_trait::async_trait;
use serde_json::json;
use switchboard_transfer::{ParticipantMigration, TransferError};
use tracing::info;

/// Moves a live participant from one room to another without terminating
/// the underlying call.
#[derive(Debug, Clone)]
pub struct MigrationClient {
    twirp: TwirpClient,
}

impl MigrationClient {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            twirp: TwirpClient::new(&config.url, &config.api_key, &config.api_secret),
        }
    }

    pub async fn move_participant(
        &self,
        source_room: &str,
        identity: &str,
        destination_room: &str,
    ) -> Result<(), MediaError> {
        let body = json!({
            "room": source_room,
            "identity": identity,
            "destinationRoom": destination_room,
        });

        self.twirp
            .post("livekit.RoomService", "MoveParticipant", source_room, &body)
            .await
            .map_err(MediaError::Migration)?;

        info!(
            from = source_room,
            to = destination_room,
            identity,
            "participant moved"
        );
        Ok(())
    }
}

#[async_trait]
impl ParticipantMigration for MigrationClient {
    async fn move_participant(
        &self,
        source_session: &str,
        identity: &str,
        destination_session: &str,
    ) -> Result<(), TransferError> {
        MigrationClient::move_participant(self, source_session, identity, destination_session)
            .await
            .map_err(TransferError::from)
    }
}
