//! Supervisor briefing snapshot.
//!
//! Built once, at consult-session creation time, from the dialogue
//! recorded on the caller's leg. Immutable afterwards; its only consumer
//! is the summarization agent's instruction block.

use switchboard_types::{DialogueTurn, TurnKind};

const PLACEHOLDER: &str = "(failed to copy conversation history)";

/// Read-only rendering of the prior caller/assistant dialogue.
///
/// Function-call turns and empty turns are excluded by construction; the
/// order of the remaining turns is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Briefing {
    text: String,
}

impl Briefing {
    /// Renders `turns` into a briefing block, one `Role: text` line per
    /// spoken non-empty turn.
    pub fn from_turns(turns: &[DialogueTurn]) -> Self {
        let mut text = String::new();
        for turn in turns {
            if turn.kind == TurnKind::FunctionCall || turn.text.trim().is_empty() {
                continue;
            }
            text.push_str(turn.role.as_str());
            text.push_str(": ");
            text.push_str(turn.text.trim());
            text.push('\n');
        }
        Self { text }
    }

    /// Fallback used when the dialogue snapshot could not be taken.
    ///
    /// Summarization must never block the rest of the transfer, so a copy
    /// failure degrades to this placeholder instead of aborting.
    pub fn placeholder() -> Self {
        Self {
            text: PLACEHOLDER.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchboard_types::DialogueRole;

    #[test]
    fn briefing_excludes_empty_and_function_call_turns() {
        let turns = vec![
            DialogueTurn::speech(DialogueRole::Assistant, "How can I help you today?"),
            DialogueTurn::speech(DialogueRole::Caller, "   "),
            DialogueTurn::speech(DialogueRole::Caller, "I need to change my booking."),
            DialogueTurn::function_call(DialogueRole::Assistant, "transfer_to_human"),
            DialogueTurn::speech(DialogueRole::Assistant, "Let me get a supervisor."),
        ];

        let briefing = Briefing::from_turns(&turns);
        assert_eq!(
            briefing.text(),
            "Assistant: How can I help you today?\n\
             Customer: I need to change my booking.\n\
             Assistant: Let me get a supervisor.\n",
            "order of remaining turns should be preserved"
        );
    }

    #[test]
    fn briefing_from_no_turns_is_empty() {
        let briefing = Briefing::from_turns(&[]);
        assert!(briefing.is_empty());
    }

    #[test]
    fn placeholder_is_not_empty() {
        assert!(!Briefing::placeholder().is_empty());
    }
}
