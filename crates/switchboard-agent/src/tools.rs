//! Tools the assistant's language-model loop can invoke.
//!
//! Besides the transfer tool (wired in [`crate::assistant`]), the
//! assistant carries a few placeholder tools whose real behavior lives in
//! other systems; each returns a canned status string so the model gets a
//! well-formed tool result.

use async_trait::async_trait;
use switchboard_transfer::TransferError;
use tracing::info;

/// One tool exposed to the assistant's language-model loop.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the model invokes the tool by.
    fn name(&self) -> &'static str;

    /// One-line description surfaced to the model.
    fn description(&self) -> &'static str;

    async fn invoke(&self, argument: &str) -> Result<String, TransferError>;
}

/// Ends the call at the caller's request.
pub struct HangUpTool;

#[async_trait]
impl Tool for HangUpTool {
    fn name(&self) -> &'static str {
        "hang_up"
    }

    fn description(&self) -> &'static str {
        "End the call once the caller is done."
    }

    async fn invoke(&self, _argument: &str) -> Result<String, TransferError> {
        info!(tool = self.name(), "hang-up requested");
        Ok("call ended".to_string())
    }
}

/// Answers a frequently-asked question from the knowledge base.
pub struct QaTool;

#[async_trait]
impl Tool for QaTool {
    fn name(&self) -> &'static str {
        "answer_question"
    }

    fn description(&self) -> &'static str {
        "Look up an answer in the knowledge base."
    }

    async fn invoke(&self, argument: &str) -> Result<String, TransferError> {
        info!(tool = self.name(), question = argument, "knowledge-base lookup");
        Ok("no knowledge base is connected".to_string())
    }
}

/// Emails the caller a transcript of the conversation.
pub struct TranscriptTool;

#[async_trait]
impl Tool for TranscriptTool {
    fn name(&self) -> &'static str {
        "send_transcript"
    }

    fn description(&self) -> &'static str {
        "Email the caller a transcript of this call."
    }

    async fn invoke(&self, argument: &str) -> Result<String, TransferError> {
        info!(tool = self.name(), destination = argument, "transcript requested");
        Ok("transcript delivery is not configured".to_string())
    }
}

/// The default placeholder tool set.
pub fn placeholder_tools() -> Vec<Box<dyn Tool>> {
    vec![Box::new(HangUpTool), Box::new(QaTool), Box::new(TranscriptTool)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn placeholder_tools_have_distinct_names_and_answer() {
        let tools = placeholder_tools();
        let mut names: Vec<_> = tools.iter().map(|tool| tool.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 3);

        for tool in &tools {
            let result = tool.invoke("anything").await.expect("stub should answer");
            assert!(!result.is_empty());
        }
    }
}
