//! Background audio playback on a session.
//!
//! Used for hold music: a playback task loops the source until its handle
//! is stopped. Publishing into the room is delegated to the session's
//! media layer; this module owns only the loop and its lifecycle.

use crate::error::MediaError;
use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use switchboard_transfer::{AudioPlayer, PlaybackHandle, TransferError};
use tracing::{debug, warn};

/// Interval between loop iterations of the playback task.
const LOOP_CHUNK: Duration = Duration::from_millis(500);

/// Background audio player bound to one session.
#[derive(Debug)]
pub struct BackgroundAudio {
    session_name: String,
}

impl BackgroundAudio {
    pub fn new(session_name: impl Into<String>) -> Self {
        Self {
            session_name: session_name.into(),
        }
    }

    fn start_loop(&self, source: &str, looped: bool) -> LoopPlaybackHandle {
        let stopped = Arc::new(AtomicBool::new(false));
        let task_stopped = Arc::clone(&stopped);
        let session = self.session_name.clone();
        let source = source.to_string();

        tokio::spawn(async move {
            debug!(session = %session, source = %source, "playback started");
            loop {
                if task_stopped.load(Ordering::SeqCst) {
                    break;
                }
                tokio::time::sleep(LOOP_CHUNK).await;
                if !looped {
                    break;
                }
            }
            debug!(session = %session, source = %source, "playback stopped");
        });

        LoopPlaybackHandle { stopped }
    }
}

#[async_trait]
impl AudioPlayer for BackgroundAudio {
    async fn play(
        &self,
        source: &str,
        looped: bool,
    ) -> Result<Box<dyn PlaybackHandle>, TransferError> {
        if !Path::new(source).exists() {
            return Err(TransferError::from(MediaError::Playback(format!(
                "audio source not found: {source}"
            ))));
        }
        Ok(Box::new(self.start_loop(source, looped)))
    }
}

/// Handle for one playback loop. Stopping twice is allowed.
pub struct LoopPlaybackHandle {
    stopped: Arc<AtomicBool>,
}

impl PlaybackHandle for LoopPlaybackHandle {
    fn stop(&self) -> Result<(), TransferError> {
        if self.stopped.swap(true, Ordering::SeqCst) {
            warn!("playback already stopped");
        }
        Ok(())
    }
}
