//! Dialogue turn types.
//!
//! A live session records the conversation as a sequence of turns. The
//! transfer core snapshots these turns when building the supervisor
//! briefing, so the representation stays deliberately flat: who spoke,
//! what was said, and whether the turn was speech or a function call.

use serde::{Deserialize, Serialize};

/// Which party produced a dialogue turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueRole {
    /// The end user on the phone.
    Caller,
    /// The voice assistant.
    Assistant,
}

impl DialogueRole {
    /// Returns the label used when rendering a turn into a briefing.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Caller => "Customer",
            Self::Assistant => "Assistant",
        }
    }
}

impl std::fmt::Display for DialogueRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a turn carried spoken content or a tool invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    /// Transcribed or synthesized speech.
    #[default]
    Speech,
    /// A function/tool call event. Excluded from briefings.
    FunctionCall,
}

/// One turn of a recorded conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueTurn {
    /// Who produced the turn.
    pub role: DialogueRole,
    /// Text content. May be empty for e.g. interrupted turns.
    pub text: String,
    /// Speech or function call.
    #[serde(default)]
    pub kind: TurnKind,
}

impl DialogueTurn {
    /// A spoken turn.
    pub fn speech(role: DialogueRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            kind: TurnKind::Speech,
        }
    }

    /// A function-call turn (tool name or serialized call in `text`).
    pub fn function_call(role: DialogueRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            kind: TurnKind::FunctionCall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_kind_defaults_to_speech_when_absent() {
        let turn: DialogueTurn =
            serde_json::from_str(r#"{"role": "caller", "text": "hello"}"#).expect("deserialize");
        assert_eq!(turn.kind, TurnKind::Speech);
        assert_eq!(turn.role, DialogueRole::Caller);
    }

    #[test]
    fn role_labels_match_briefing_rendering() {
        assert_eq!(DialogueRole::Caller.as_str(), "Customer");
        assert_eq!(DialogueRole::Assistant.as_str(), "Assistant");
    }
}
