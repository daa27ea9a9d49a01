//! Hold controller.
//!
//! The only component allowed to touch the caller's audio-enable flags.
//! Holding mutes both directions on the caller's leg and loops hold audio
//! at them; releasing stops playback and restores audio. At most one hold
//! playback exists per caller session.

use crate::error::TransferError;
use crate::traits::{AudioPlayer, PlaybackHandle, SessionControl};
use std::sync::Arc;
use switchboard_types::AudioDirection;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub struct HoldController {
    caller: Arc<dyn SessionControl>,
    player: Arc<dyn AudioPlayer>,
    source: String,
    handle: Mutex<Option<Box<dyn PlaybackHandle>>>,
}

impl HoldController {
    /// `source` names the hold-audio asset passed to the player.
    pub fn new(
        caller: Arc<dyn SessionControl>,
        player: Arc<dyn AudioPlayer>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            caller,
            player,
            source: source.into(),
            handle: Mutex::new(None),
        }
    }

    /// Puts the caller on hold.
    ///
    /// Disables both audio directions, then starts looped playback. If a
    /// hold is already active its handle is stopped before the new one
    /// starts, so handles never leak.
    pub async fn start_hold(&self) -> Result<(), TransferError> {
        debug!(session = self.caller.name(), "putting caller on hold");
        self.caller.set_audio_enabled(AudioDirection::Input, false);
        self.caller.set_audio_enabled(AudioDirection::Output, false);

        let mut slot = self.handle.lock().await;
        if let Some(previous) = slot.take() {
            if let Err(error) = previous.stop() {
                warn!(%error, "error stopping previous hold playback");
            }
        }
        *slot = Some(self.player.play(&self.source, true).await?);
        Ok(())
    }

    /// Releases the hold.
    ///
    /// A no-op when no hold is active. Playback-stop errors are logged
    /// and swallowed; audio is re-enabled regardless, because restoring
    /// the caller must not be blocked by a playback fault.
    pub async fn stop_hold(&self) {
        debug!(session = self.caller.name(), "releasing hold");
        if let Some(handle) = self.handle.lock().await.take() {
            if let Err(error) = handle.stop() {
                warn!(%error, "error stopping hold playback");
            }
        }
        self.caller.set_audio_enabled(AudioDirection::Input, true);
        self.caller.set_audio_enabled(AudioDirection::Output, true);
    }

    /// Whether a hold playback is currently active.
    pub async fn is_holding(&self) -> bool {
        self.handle.lock().await.is_some()
    }
}
