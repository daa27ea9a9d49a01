//! Local agent session leg.
//!
//! One [`AgentSessionHandle`] represents an agent's connection to a room:
//! it gates audio in both directions, speaks via the session's TTS
//! engine, records the dialogue, and notifies watchers on disconnect.
//!
//! In a production environment with the `livekit` client crate available
//! this would wrap a `livekit::Room` and a local audio track; audio
//! publication here is a simulation around the same surface.

use crate::error::MediaError;
use crate::pipeline::VoicePipeline;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use switchboard_transfer::{SessionControl, TransferError};
use switchboard_types::{AudioDirection, DialogueRole, DialogueTurn};
use tokio::sync::watch;
use tracing::{debug, info};

pub struct AgentSessionHandle {
    room_url: String,
    room_name: String,
    identity: String,
    instructions: String,
    pipeline: VoicePipeline,
    input_enabled: AtomicBool,
    output_enabled: AtomicBool,
    connected: AtomicBool,
    history: Mutex<Vec<DialogueTurn>>,
    closed_tx: watch::Sender<bool>,
}

impl AgentSessionHandle {
    /// Connects to `room_name` under `identity` with a scoped join token.
    ///
    /// `instructions` seed the language-model loop driving this leg.
    pub async fn connect(
        url: &str,
        token: &str,
        room_name: &str,
        identity: &str,
        pipeline: VoicePipeline,
        instructions: &str,
    ) -> Result<Arc<Self>, MediaError> {
        info!(
            room = room_name,
            identity,
            url,
            token_len = token.len(),
            "agent connecting to room"
        );

        let (closed_tx, _) = watch::channel(false);

        Ok(Arc::new(Self {
            room_url: url.to_string(),
            room_name: room_name.to_string(),
            identity: identity.to_string(),
            instructions: instructions.to_string(),
            pipeline,
            input_enabled: AtomicBool::new(true),
            output_enabled: AtomicBool::new(true),
            connected: AtomicBool::new(true),
            history: Mutex::new(Vec::new()),
            closed_tx,
        }))
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn room_url(&self) -> &str {
        &self.room_url
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Instruction block seeding this leg's language-model loop.
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Resolves when the leg disconnects. Subscribers created after the
    /// disconnect still observe it.
    pub fn subscribe_close(&self) -> watch::Receiver<bool> {
        self.closed_tx.subscribe()
    }

    /// Records a remote party's transcribed turn.
    ///
    /// Only forwarded while input audio is enabled; a held caller's
    /// speech never reaches the agent.
    pub fn record_remote_turn(&self, text: &str) {
        if !self.input_enabled.load(Ordering::SeqCst) {
            debug!(room = %self.room_name, "input gated, dropping remote turn");
            return;
        }
        self.push_turn(DialogueTurn::speech(DialogueRole::Caller, text));
    }

    /// Records a tool invocation made by this leg's agent.
    pub fn record_function_call(&self, name: &str) {
        self.push_turn(DialogueTurn::function_call(DialogueRole::Assistant, name));
    }

    fn push_turn(&self, turn: DialogueTurn) {
        if let Ok(mut history) = self.history.lock() {
            history.push(turn);
        }
    }
}

#[async_trait]
impl SessionControl for AgentSessionHandle {
    fn name(&self) -> &str {
        &self.room_name
    }

    async fn announce(&self, text: &str) -> Result<(), TransferError> {
        if !self.connected.load(Ordering::SeqCst) {
            return Err(TransferError::Session(format!(
                "agent is not connected to room {}",
                self.room_name
            )));
        }

        if let Some(tts) = &self.pipeline.tts {
            let pcm = tts.synthesize(text).await.map_err(TransferError::from)?;
            info!(
                room = %self.room_name,
                pcm_bytes = pcm.len(),
                "publishing synthesized announcement"
            );
        } else {
            debug!(room = %self.room_name, "no TTS engine, skipping synthesis");
        }

        self.push_turn(DialogueTurn::speech(DialogueRole::Assistant, text));
        Ok(())
    }

    fn set_audio_enabled(&self, direction: AudioDirection, enabled: bool) {
        debug!(room = %self.room_name, %direction, enabled, "audio gate changed");
        match direction {
            AudioDirection::Input => self.input_enabled.store(enabled, Ordering::SeqCst),
            AudioDirection::Output => self.output_enabled.store(enabled, Ordering::SeqCst),
        }
    }

    fn audio_enabled(&self, direction: AudioDirection) -> bool {
        match direction {
            AudioDirection::Input => self.input_enabled.load(Ordering::SeqCst),
            AudioDirection::Output => self.output_enabled.load(Ordering::SeqCst),
        }
    }

    fn history(&self) -> Result<Vec<DialogueTurn>, TransferError> {
        self.history
            .lock()
            .map(|history| history.clone())
            .map_err(|_| TransferError::Session("dialogue history lock poisoned".to_string()))
    }

    async fn close(&self) -> Result<(), TransferError> {
        if self.connected.swap(false, Ordering::SeqCst) {
            info!(room = %self.room_name, identity = %self.identity, "agent disconnecting");
            let _ = self.closed_tx.send(true);
        }
        Ok(())
    }
}
