//! The front-line assistant.
//!
//! Glues the caller session leg, the placeholder tool set, and the
//! transfer orchestrator into the surface the language-model loop drives:
//! greet the caller, dispatch tool calls, and hand the call to a human
//! when asked.

use crate::prompts::{self, PromptConfig};
use crate::tools::Tool;
use std::sync::Arc;
use switchboard_transfer::{SessionControl, TransferError, TransferOrchestrator};
use switchboard_voice::AgentSessionHandle;
use tracing::{info, warn};

pub struct Assistant {
    session: Arc<AgentSessionHandle>,
    orchestrator: Arc<TransferOrchestrator>,
    prompt: PromptConfig,
    tools: Vec<Box<dyn Tool>>,
}

impl Assistant {
    pub fn new(
        session: Arc<AgentSessionHandle>,
        orchestrator: Arc<TransferOrchestrator>,
        prompt: PromptConfig,
        tools: Vec<Box<dyn Tool>>,
    ) -> Self {
        Self {
            session,
            orchestrator,
            prompt,
            tools,
        }
    }

    /// Speaks the opening greeting to the caller.
    pub async fn greet(&self) -> Result<(), TransferError> {
        self.session.announce(&prompts::greeting(&self.prompt)).await
    }

    /// Escalates the call to a human supervisor.
    ///
    /// Never returns an error to the model: a failed or refused transfer
    /// is already spoken to the caller by the orchestrator, and the
    /// conversation continues with the assistant.
    pub async fn transfer_to_human(&self) -> String {
        info!(session = self.session.name(), "caller asked for a human");
        self.session.record_function_call("transfer_to_human");
        self.orchestrator.start_transfer().await;
        "transfer attempt finished".to_string()
    }

    /// Dispatches a named tool call from the model.
    pub async fn dispatch_tool(&self, name: &str, argument: &str) -> String {
        if name == "transfer_to_human" {
            return self.transfer_to_human().await;
        }
        for tool in &self.tools {
            if tool.name() == name {
                self.session.record_function_call(name);
                return match tool.invoke(argument).await {
                    Ok(result) => result,
                    Err(err) => {
                        warn!(tool = name, error = %err, "tool invocation failed");
                        "the tool is unavailable right now".to_string()
                    }
                };
            }
        }
        warn!(tool = name, "model invoked an unknown tool");
        format!("unknown tool: {name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::placeholder_tools;
    use switchboard_transfer::{ConsultationConductor, HoldController, SupervisorStatus};
    use switchboard_types::TurnKind;
    use switchboard_voice::{
        BackgroundAudio, ConsultFactory, MediaConfig, MigrationClient, PipelineConfig,
        PipelineFactory, RoomService, TelephonyClient, VoicePipeline,
    };

    async fn assistant_without_telephony() -> Assistant {
        let session = AgentSessionHandle::connect(
            "ws://localhost:7880",
            "token",
            "room-1",
            "assistant",
            VoicePipeline::default(),
            "You are a helpful assistant.",
        )
        .await
        .expect("connect");

        let media = MediaConfig::new("http://localhost:7880", "devkey", "secret");
        let rooms = Arc::new(RoomService::new(media.clone()));
        let pipelines = PipelineFactory::new(PipelineConfig::default());
        let factory = Arc::new(ConsultFactory::new(rooms, pipelines));
        let dialer = Arc::new(TelephonyClient::new(&media));
        let migration = Arc::new(MigrationClient::new(&media));

        let hold = HoldController::new(
            session.clone() as Arc<dyn SessionControl>,
            Arc::new(BackgroundAudio::new("room-1")),
            "hold_music.mp3",
        );
        // Empty trunk and contact: escalation refuses with a spoken notice.
        let conductor = ConsultationConductor::new(factory, dialer, "", "");
        let orchestrator = TransferOrchestrator::new(
            session.clone() as Arc<dyn SessionControl>,
            hold,
            conductor,
            migration,
        );

        Assistant::new(
            session,
            orchestrator,
            PromptConfig {
                agent_name: "Robin".to_string(),
            },
            placeholder_tools(),
        )
    }

    #[tokio::test]
    async fn greeting_is_spoken_to_the_caller() {
        let assistant = assistant_without_telephony().await;
        assistant.greet().await.expect("greet");

        let history = assistant.session.history().expect("history");
        assert_eq!(history.len(), 1);
        assert!(history[0].text.contains("Robin"));
    }

    #[tokio::test]
    async fn transfer_without_telephony_apologizes_and_stays_active() {
        let assistant = assistant_without_telephony().await;
        assistant.dispatch_tool("transfer_to_human", "").await;

        assert_eq!(
            assistant.orchestrator.supervisor_status().await,
            SupervisorStatus::Inactive
        );
        let history = assistant.session.history().expect("history");
        let spoken: Vec<_> = history
            .iter()
            .filter(|turn| turn.kind == TurnKind::Speech)
            .collect();
        assert_eq!(spoken.len(), 1);
        assert!(spoken[0].text.contains("unavailable"));
        assert!(history
            .iter()
            .any(|turn| turn.kind == TurnKind::FunctionCall && turn.text == "transfer_to_human"));
    }

    #[tokio::test]
    async fn placeholder_tools_answer_and_unknown_tools_do_not_panic() {
        let assistant = assistant_without_telephony().await;

        let answer = assistant.dispatch_tool("answer_question", "store hours").await;
        assert!(!answer.is_empty());

        let unknown = assistant.dispatch_tool("teleport", "").await;
        assert!(unknown.contains("unknown tool"));
    }
}
