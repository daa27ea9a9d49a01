//! Warm call-transfer core for the Switchboard platform.
//!
//! Escalates an active caller/assistant session to a human supervisor
//! without dropping the caller: the caller is put on hold, a private
//! consultation room is opened where a one-shot summarization agent
//! briefs the dialed-in supervisor, and on the supervisor's go-ahead the
//! supervisor is migrated into the caller's room and the assistant leg
//! closes. Every failure along the way converges on the same remediation:
//! hold released, caller told the transfer did not work, caller back in a
//! normal conversation with the assistant.
//!
//! The crate never names a concrete media SDK. External collaborators
//! (session handles, background playback, SIP dial-out, participant
//! migration, consult-room creation) are narrow capability traits in
//! [`traits`]; production implementations live in `switchboard-voice`.
//!
//! # Structure
//!
//! - [`state`] — pure state machine: a [`state::TransferState`] value
//!   whose transitions return lists of side-effect [`state::Command`]s.
//! - [`hold`] — the only component that touches caller audio flags.
//! - [`briefing`] — immutable dialogue snapshot for the supervisor.
//! - [`summarizer`] — the consultation-room agent and its signals.
//! - [`consult`] — builds the consult room and dials the supervisor.
//! - [`orchestrator`] — drives transitions, executes commands, recovers.

pub mod briefing;
pub mod consult;
pub mod error;
pub mod hold;
pub mod orchestrator;
pub mod state;
pub mod summarizer;
pub mod traits;

pub use briefing::Briefing;
pub use consult::{consult_room_name, ConsultationConductor, CONSULT_SUFFIX};
pub use error::TransferError;
pub use hold::HoldController;
pub use orchestrator::TransferOrchestrator;
pub use state::{Command, CustomerStatus, SupervisorStatus, TransferState};
pub use summarizer::{SummarizationAgent, SupervisorSignal};
pub use traits::{
    AudioPlayer, ConsultRoomFactory, DialOutGateway, ParticipantMigration, PlaybackHandle,
    SessionControl,
};

/// Fixed identity under which the supervisor's SIP leg is created.
///
/// Migration targets this identity, so it must be stable between the
/// dial-out into the consult room and the later move into the caller
/// room.
pub const SUPERVISOR_IDENTITY: &str = "supervisor-sip";

/// Identity under which the summarization agent joins the consult room.
pub const SUMMARIZER_IDENTITY: &str = "summary-agent";
