//! Capability traits for the external collaborators of the transfer core.
//!
//! Each trait is the narrowest surface the orchestrator actually needs,
//! so unit tests can substitute counting mocks and the core never depends
//! on a concrete media SDK. Production implementations over LiveKit live
//! in `switchboard-voice`.

use crate::error::TransferError;
use crate::summarizer::SupervisorSignal;
use async_trait::async_trait;
use std::sync::Arc;
use switchboard_types::{AudioDirection, DialogueTurn};
use tokio::sync::mpsc;

/// A party's local leg in a real-time session.
///
/// Implemented by both the caller-session adapter and the consult-session
/// adapter; the state machine only ever sees this interface.
#[async_trait]
pub trait SessionControl: Send + Sync {
    /// Name of the session this leg is connected to.
    fn name(&self) -> &str;

    /// Speaks `text` to the remote parties on this leg.
    async fn announce(&self, text: &str) -> Result<(), TransferError>;

    /// Gates audio flow in one direction on this leg.
    fn set_audio_enabled(&self, direction: AudioDirection, enabled: bool);

    /// Whether audio currently flows in `direction`.
    fn audio_enabled(&self, direction: AudioDirection) -> bool;

    /// Snapshot of the dialogue recorded on this leg so far.
    fn history(&self) -> Result<Vec<DialogueTurn>, TransferError>;

    /// Gracefully closes the leg. Closing twice is allowed.
    async fn close(&self) -> Result<(), TransferError>;
}

/// An in-flight background playback started by [`AudioPlayer::play`].
pub trait PlaybackHandle: Send + Sync {
    /// Stops playback. Stopping an already-stopped handle is allowed.
    fn stop(&self) -> Result<(), TransferError>;
}

impl std::fmt::Debug for dyn PlaybackHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PlaybackHandle")
    }
}

/// Background audio playback on the caller's session.
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Starts playing `source`, looping until the handle is stopped.
    async fn play(
        &self,
        source: &str,
        looped: bool,
    ) -> Result<Box<dyn PlaybackHandle>, TransferError>;
}

/// Telephony dial-out gateway.
#[async_trait]
pub trait DialOutGateway: Send + Sync {
    /// Dials `destination` over `trunk_id` and joins the answered call to
    /// `session_name` under `identity`. With `wait_until_answered` the
    /// call resolves only once the remote party picks up (or the gateway
    /// gives up).
    async fn create_participant(
        &self,
        trunk_id: &str,
        destination: &str,
        session_name: &str,
        identity: &str,
        wait_until_answered: bool,
    ) -> Result<(), TransferError>;
}

/// Moves a live participant between sessions without ending their call.
#[async_trait]
pub trait ParticipantMigration: Send + Sync {
    async fn move_participant(
        &self,
        source_session: &str,
        identity: &str,
        destination_session: &str,
    ) -> Result<(), TransferError>;
}

/// Builds the private consultation session.
///
/// An implementation creates the named room, issues a join credential
/// scoped to it for the summarizer identity, starts a fresh
/// speech/LLM/speech pipeline seeded with `instructions`, and wires the
/// room's disconnect notification to `signals` as
/// [`SupervisorSignal::ConsultClosed`] (at most once per disconnect).
#[async_trait]
pub trait ConsultRoomFactory: Send + Sync {
    async fn open_consult(
        &self,
        session_name: &str,
        instructions: &str,
        signals: mpsc::Sender<SupervisorSignal>,
    ) -> Result<Arc<dyn SessionControl>, TransferError>;
}
