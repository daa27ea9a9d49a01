//! Per-session speech pipeline.
//!
//! Each live session leg gets its own [`VoicePipeline`] built by the
//! [`PipelineFactory`], so a fault in one session's engines never bleeds
//! into another. Engines shell out to local binaries (whisper.cpp for
//! STT, piper for TTS) over stdin/stdout; both are optional — an
//! unconfigured engine simply leaves that half of the pipeline off.

use crate::error::MediaError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::info;

/// Maximum audio input size for STT (10 MiB).
const MAX_STT_INPUT_BYTES: usize = 10 * 1024 * 1024;

/// Maximum text input size for TTS (64 KiB).
const MAX_TTS_INPUT_BYTES: usize = 64 * 1024;

const STT_TIMEOUT: Duration = Duration::from_secs(120);
const TTS_TIMEOUT: Duration = Duration::from_secs(60);

/// Paths for the local speech engines. Empty paths disable the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub stt_binary: String,
    #[serde(default)]
    pub stt_model: String,
    #[serde(default)]
    pub tts_binary: String,
    #[serde(default)]
    pub tts_model: String,
}

/// Speech-to-text over a whisper.cpp-style binary reading audio from
/// stdin and writing the transcription to stdout.
#[derive(Debug, Clone)]
pub struct SttEngine {
    binary: PathBuf,
    model: PathBuf,
}

impl SttEngine {
    pub fn new(binary: impl Into<PathBuf>, model: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            model: model.into(),
        }
    }

    pub async fn transcribe(&self, audio: &[u8]) -> Result<String, MediaError> {
        if audio.len() > MAX_STT_INPUT_BYTES {
            return Err(MediaError::Pipeline(format!(
                "audio exceeds maximum size: {} bytes (limit: {} bytes)",
                audio.len(),
                MAX_STT_INPUT_BYTES
            )));
        }

        let started = Instant::now();
        let mut child = Command::new(&self.binary)
            .arg("-m")
            .arg(&self.model)
            .arg("-f")
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| MediaError::Pipeline(format!("failed to spawn STT binary: {e}")))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| MediaError::Pipeline("failed to open STT stdin".to_string()))?;
        stdin
            .write_all(audio)
            .await
            .map_err(|e| MediaError::Pipeline(format!("failed to write STT stdin: {e}")))?;
        drop(stdin);

        let output = tokio::time::timeout(STT_TIMEOUT, child.wait_with_output())
            .await
            .map_err(|_| {
                MediaError::Pipeline(format!(
                    "STT timed out after {} seconds",
                    STT_TIMEOUT.as_secs()
                ))
            })?
            .map_err(|e| MediaError::Pipeline(format!("failed to wait for STT: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MediaError::Pipeline(format!("STT binary failed: {stderr}")));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            audio_bytes = audio.len(),
            "transcription complete"
        );
        Ok(text)
    }
}

/// Text-to-speech over a piper-style binary reading text from stdin and
/// writing raw PCM (s16le) to stdout.
#[derive(Debug, Clone)]
pub struct TtsEngine {
    binary: PathBuf,
    model: PathBuf,
}

impl TtsEngine {
    pub fn new(binary: impl Into<PathBuf>, model: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            model: model.into(),
        }
    }

    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, MediaError> {
        if text.len() > MAX_TTS_INPUT_BYTES {
            return Err(MediaError::Pipeline(format!(
                "text exceeds maximum size: {} bytes (limit: {} bytes)",
                text.len(),
                MAX_TTS_INPUT_BYTES
            )));
        }

        let started = Instant::now();
        let mut child = Command::new(&self.binary)
            .arg("--model")
            .arg(&self.model)
            .arg("--output_raw")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| MediaError::Pipeline(format!("failed to spawn TTS binary: {e}")))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| MediaError::Pipeline("failed to open TTS stdin".to_string()))?;
        let text_owned = text.to_string();

        // Write on a task so a full output buffer cannot deadlock us.
        let write_task =
            tokio::spawn(async move { stdin.write_all(text_owned.as_bytes()).await });

        let output = tokio::time::timeout(TTS_TIMEOUT, child.wait_with_output())
            .await
            .map_err(|_| {
                MediaError::Pipeline(format!(
                    "TTS timed out after {} seconds",
                    TTS_TIMEOUT.as_secs()
                ))
            })?
            .map_err(|e| MediaError::Pipeline(format!("failed to wait for TTS: {e}")))?;

        match write_task.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(MediaError::Pipeline(format!(
                    "failed to write TTS stdin: {e}"
                )))
            }
            Err(e) => return Err(MediaError::Pipeline(format!("TTS stdin task failed: {e}"))),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MediaError::Pipeline(format!("TTS binary failed: {stderr}")));
        }

        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            pcm_bytes = output.stdout.len(),
            "synthesis complete"
        );
        Ok(output.stdout)
    }
}

/// One session's speech engines.
#[derive(Debug, Clone, Default)]
pub struct VoicePipeline {
    pub stt: Option<SttEngine>,
    pub tts: Option<TtsEngine>,
}

/// Builds fresh [`VoicePipeline`] instances, one per session.
///
/// Engine binaries and models are validated lazily on first use, but the
/// configured paths are shared, so repeated builds stay cheap (the
/// prewarm analogue of loading models once per worker).
#[derive(Debug, Clone)]
pub struct PipelineFactory {
    config: PipelineConfig,
}

impl PipelineFactory {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn build(&self) -> VoicePipeline {
        let stt = (!self.config.stt_binary.is_empty())
            .then(|| SttEngine::new(&self.config.stt_binary, &self.config.stt_model));
        let tts = (!self.config.tts_binary.is_empty())
            .then(|| TtsEngine::new(&self.config.tts_binary, &self.config.tts_model));
        VoicePipeline { stt, tts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_builds_independent_pipelines() {
        let factory = PipelineFactory::new(PipelineConfig {
            stt_binary: "/usr/local/bin/whisper".to_string(),
            stt_model: "ggml-base.en.bin".to_string(),
            tts_binary: "/usr/local/bin/piper".to_string(),
            tts_model: "en_US-lessac-medium.onnx".to_string(),
        });

        let pipeline = factory.build();
        assert!(pipeline.stt.is_some());
        assert!(pipeline.tts.is_some());
    }

    #[test]
    fn unconfigured_engines_are_disabled() {
        let factory = PipelineFactory::new(PipelineConfig::default());
        let pipeline = factory.build();
        assert!(pipeline.stt.is_none());
        assert!(pipeline.tts.is_none());
    }

    #[tokio::test]
    async fn oversized_stt_input_is_rejected() {
        let engine = SttEngine::new("/nonexistent", "/nonexistent");
        let audio = vec![0u8; MAX_STT_INPUT_BYTES + 1];
        let err = engine.transcribe(&audio).await.expect_err("should reject");
        assert!(err.to_string().contains("maximum size"));
    }
}
