use thiserror::Error;

/// Errors surfaced by external collaborators during a transfer attempt.
///
/// Every variant routes to the same caller-safe remediation inside the
/// orchestrator; the kind exists for logging and for tests that assert
/// which stage failed.
#[derive(Error, Debug)]
pub enum TransferError {
    /// Creating or joining a real-time session failed.
    #[error("session error: {0}")]
    Session(String),

    /// Issuing a scoped join credential failed.
    #[error("credential error: {0}")]
    Credential(String),

    /// Outbound SIP dial failed, was rejected, or timed out.
    #[error("dial error: {0}")]
    Dial(String),

    /// Moving the supervisor between sessions failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// Background playback failed to start or stop.
    #[error("playback error: {0}")]
    Playback(String),

    /// Building the per-session speech/LLM/speech pipeline failed.
    #[error("pipeline error: {0}")]
    Pipeline(String),
}
