//! Session leg selectors.

use serde::{Deserialize, Serialize};

/// Direction of audio flow on a local session leg.
///
/// `Input` is audio arriving from the remote party (what the agent
/// hears); `Output` is audio the agent publishes (what the remote party
/// hears). Putting a caller on hold disables both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioDirection {
    Input,
    Output,
}

impl AudioDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }
}

impl std::fmt::Display for AudioDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
