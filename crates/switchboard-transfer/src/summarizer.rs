//! Summarization agent for the consultation session.
//!
//! A bounded, one-shot conversational participant: it greets the dialed
//! supervisor, presents the briefing, waits for the supervisor to say
//! they are ready, and then signals the orchestrator to merge. Its two
//! tool actions are both terminal — after either one the consult session
//! is expected to close.

use crate::briefing::Briefing;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Events delivered to the orchestrator's signal channel.
///
/// Delivery is at most once per physical event: each agent tool action
/// sends one signal, and the consult room's disconnect notification is
/// forwarded once by the room factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorSignal {
    /// The supervisor confirmed they can take the call.
    ReadyToConnect,
    /// The dialed line went to voicemail or is otherwise unreachable.
    Unreachable,
    /// The consult session disconnected.
    ConsultClosed,
}

/// The agent placed inside the consult session.
///
/// Cloneable so the session wiring can hand the tool layer its own copy;
/// all clones share the same signal channel.
#[derive(Debug, Clone)]
pub struct SummarizationAgent {
    instructions: String,
    signals: mpsc::Sender<SupervisorSignal>,
}

impl SummarizationAgent {
    pub fn new(briefing: &Briefing, signals: mpsc::Sender<SupervisorSignal>) -> Self {
        let instructions = format!(
            "You are a summary agent. Your job is to briefly summarize the \
             customer's issue for a human supervisor. Start by greeting the \
             supervisor, then provide a short summary of the conversation \
             below, and wait for the supervisor to confirm they can take the \
             call. When the supervisor says they are ready, call the tool \
             'ready_to_connect'. If the call went to voicemail, call the tool \
             'voicemail_detected'.\n\nConversation history:\n{}",
            briefing.text()
        );
        Self {
            instructions,
            signals,
        }
    }

    /// Instruction block seeding the agent's language-model loop.
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Tool action: the supervisor is ready; ask the orchestrator to
    /// merge the calls.
    pub async fn ready_to_connect(&self) {
        info!("supervisor ready, requesting merge");
        if self
            .signals
            .send(SupervisorSignal::ReadyToConnect)
            .await
            .is_err()
        {
            warn!("orchestrator signal channel closed, merge request dropped");
        }
    }

    /// Tool action: the dialed line went to voicemail; fail the transfer.
    pub async fn voicemail_detected(&self) {
        info!("voicemail detected while dialing supervisor");
        if self
            .signals
            .send(SupervisorSignal::Unreachable)
            .await
            .is_err()
        {
            warn!("orchestrator signal channel closed, failure signal dropped");
        }
    }
}
