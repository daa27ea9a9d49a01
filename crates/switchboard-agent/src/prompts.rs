//! Assistant prompt template.

use serde::Deserialize;

/// Variables substituted into the assistant prompt.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptConfig {
    pub agent_name: String,
}

/// Renders the assistant's standing instructions.
///
/// The persona is a front-line customer service agent that answers what it
/// can and escalates to a human supervisor when asked or when it is out of
/// its depth.
pub fn render_prompt(config: &PromptConfig) -> String {
    format!(
        "You are {name}, a friendly customer service voice assistant. \
         Keep answers short and conversational; this is a phone call, not a chat. \
         Answer questions you are confident about. \
         If the caller asks for a human, a manager, or a supervisor, or if you \
         cannot help after two attempts, call the transfer_to_human tool. \
         Never promise a transfer you have not started. \
         When the caller is done, say goodbye and call the hang_up tool.",
        name = config.agent_name
    )
}

/// First thing the assistant says when a caller connects.
pub fn greeting(config: &PromptConfig) -> String {
    format!(
        "Hi, this is {name}. How can I help you today?",
        name = config.agent_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_carries_the_agent_name_and_tools() {
        let config = PromptConfig {
            agent_name: "Robin".to_string(),
        };
        let prompt = render_prompt(&config);
        assert!(prompt.contains("You are Robin"));
        assert!(prompt.contains("transfer_to_human"));
        assert!(prompt.contains("hang_up"));
    }

    #[test]
    fn greeting_introduces_the_agent() {
        let config = PromptConfig {
            agent_name: "Robin".to_string(),
        };
        assert_eq!(greeting(&config), "Hi, this is Robin. How can I help you today?");
    }
}
