//! Shared plain-data types for the Switchboard platform.
//!
//! These types cross crate boundaries: dialogue turns recorded by a live
//! session and replayed into the supervisor briefing, and the audio
//! direction selector used when gating a session leg.

pub mod dialogue;
pub mod session;

pub use dialogue::{DialogueRole, DialogueTurn, TurnKind};
pub use session::AudioDirection;
