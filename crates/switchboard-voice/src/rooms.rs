//! Room lifecycle and scoped join tokens.

use crate::config::MediaConfig;
use crate::error::MediaError;
use livekit_api::access_token::{AccessToken, VideoGrants};
use livekit_api::services::room::{CreateRoomOptions, RoomClient};
use livekit_protocol::Room;
use std::time::Duration;

#[derive(Debug)]
pub struct RoomService {
    config: MediaConfig,
    room_client: RoomClient,
}

impl RoomService {
    pub fn new(config: MediaConfig) -> Self {
        let room_client =
            RoomClient::with_api_key(&config.url, &config.api_key, &config.api_secret);
        Self {
            config,
            room_client,
        }
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    pub async fn create_room(&self, name: &str) -> Result<Room, MediaError> {
        let options = CreateRoomOptions::default();

        self.room_client
            .create_room(name, options)
            .await
            .map_err(|e| MediaError::RoomService(e.to_string()))
    }

    /// Issues a join token for an agent identity, scoped to exactly one
    /// room: join, publish, subscribe, and own-metadata updates.
    pub fn agent_join_token(
        &self,
        room_name: &str,
        identity: &str,
    ) -> Result<String, MediaError> {
        let token = AccessToken::with_api_key(&self.config.api_key, &self.config.api_secret)
            .with_identity(identity)
            .with_name(identity)
            .with_grants(VideoGrants {
                room_join: true,
                room: room_name.to_string(),
                can_publish: true,
                can_subscribe: true,
                can_update_own_metadata: true,
                ..Default::default()
            })
            .with_ttl(Duration::from_secs(self.config.token_ttl_seconds));

        token.to_jwt().map_err(MediaError::LiveKit)
    }

    pub async fn remove_participant(&self, room: &str, identity: &str) -> Result<(), MediaError> {
        self.room_client
            .remove_participant(room, identity)
            .await
            .map_err(|e| MediaError::RoomService(e.to_string()))
    }

    /// Returns the number of participants currently in a room.
    /// Returns 0 if the room does not exist.
    pub async fn participant_count(&self, room_name: &str) -> Result<u32, MediaError> {
        match self.room_client.list_participants(room_name).await {
            Ok(participants) => Ok(participants.len() as u32),
            Err(_) => Ok(0),
        }
    }
}
