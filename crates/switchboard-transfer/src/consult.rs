//! Supervisor consultation conductor.
//!
//! Builds the private consult session next to a caller session and dials
//! the supervisor into it. The conductor owns the telephony configuration
//! (trunk and contact) so the orchestrator can gate escalation on it
//! being present.

use crate::error::TransferError;
use crate::summarizer::SupervisorSignal;
use crate::traits::{ConsultRoomFactory, DialOutGateway, SessionControl};
use crate::SUPERVISOR_IDENTITY;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

/// Suffix appended to a caller session name to derive the consult session
/// name. Deterministic and collision-free against the caller name itself.
pub const CONSULT_SUFFIX: &str = "-consult";

/// Default cap on the wait-until-answered dial. The gateway applies its
/// own ringing timeout; this bounds the whole call in case it does not.
const DEFAULT_DIAL_TIMEOUT: Duration = Duration::from_secs(120);

/// Derives the consult session name from the caller session name.
pub fn consult_room_name(caller_session: &str) -> String {
    format!("{caller_session}{CONSULT_SUFFIX}")
}

pub struct ConsultationConductor {
    factory: Arc<dyn ConsultRoomFactory>,
    dialer: Arc<dyn DialOutGateway>,
    trunk_id: String,
    supervisor_contact: String,
    dial_timeout: Duration,
}

impl ConsultationConductor {
    pub fn new(
        factory: Arc<dyn ConsultRoomFactory>,
        dialer: Arc<dyn DialOutGateway>,
        trunk_id: impl Into<String>,
        supervisor_contact: impl Into<String>,
    ) -> Self {
        Self {
            factory,
            dialer,
            trunk_id: trunk_id.into(),
            supervisor_contact: supervisor_contact.into(),
            dial_timeout: DEFAULT_DIAL_TIMEOUT,
        }
    }

    /// Overrides the dial cap. Expiry is treated as a dial error.
    pub fn with_dial_timeout(mut self, timeout: Duration) -> Self {
        self.dial_timeout = timeout;
        self
    }

    /// Whether a transfer can be attempted at all: both the trunk and the
    /// supervisor contact must be configured.
    pub fn is_configured(&self) -> bool {
        !self.trunk_id.is_empty() && !self.supervisor_contact.is_empty()
    }

    /// Creates the consult session for `caller_session` and starts the
    /// summarizer inside it, seeded with `instructions`.
    pub async fn open_consult(
        &self,
        caller_session: &str,
        instructions: &str,
        signals: mpsc::Sender<SupervisorSignal>,
    ) -> Result<Arc<dyn SessionControl>, TransferError> {
        let name = consult_room_name(caller_session);
        info!(session = %name, "opening consult session");
        self.factory.open_consult(&name, instructions, signals).await
    }

    /// Dials the supervisor into `consult_session` under the fixed
    /// supervisor identity, blocking until answered, a dial error, or the
    /// configured cap.
    pub async fn dial_supervisor(&self, consult_session: &str) -> Result<(), TransferError> {
        info!(
            to = %self.supervisor_contact,
            session = %consult_session,
            "dialing supervisor"
        );
        let dial = self.dialer.create_participant(
            &self.trunk_id,
            &self.supervisor_contact,
            consult_session,
            SUPERVISOR_IDENTITY,
            true,
        );
        tokio::time::timeout(self.dial_timeout, dial)
            .await
            .map_err(|_| {
                TransferError::Dial(format!(
                    "dial not answered within {}s",
                    self.dial_timeout.as_secs()
                ))
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consult_name_is_deterministic_and_distinct() {
        assert_eq!(consult_room_name("room-1"), "room-1-consult");
        assert_ne!(consult_room_name("room-1"), "room-1");
    }
}
