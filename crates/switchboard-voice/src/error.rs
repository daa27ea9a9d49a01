use switchboard_transfer::TransferError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("LiveKit API error: {0}")]
    LiveKit(#[from] livekit_api::access_token::AccessTokenError),

    #[error("Room service error: {0}")]
    RoomService(String),

    #[error("Telephony error: {0}")]
    Telephony(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Playback error: {0}")]
    Playback(String),

    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Folds infrastructure errors into the transfer core's taxonomy so that
/// every failure kind lands on the orchestrator's matching recovery path.
impl From<MediaError> for TransferError {
    fn from(error: MediaError) -> Self {
        match error {
            MediaError::LiveKit(e) => TransferError::Credential(e.to_string()),
            MediaError::RoomService(msg) | MediaError::Config(msg) => TransferError::Session(msg),
            MediaError::Telephony(msg) => TransferError::Dial(msg),
            MediaError::Migration(msg) => TransferError::Migration(msg),
            MediaError::Playback(msg) => TransferError::Playback(msg),
            MediaError::Pipeline(msg) => TransferError::Pipeline(msg),
        }
    }
}
