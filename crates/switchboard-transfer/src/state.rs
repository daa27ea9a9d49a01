//! Pure transfer state machine.
//!
//! [`TransferState`] is a plain value owned by the orchestrator. Each
//! transition validates its precondition, updates the two status fields,
//! and returns the list of side-effect [`Command`]s the orchestrator must
//! execute — in order — to realize the transition. Nothing in this module
//! performs I/O, so every path is unit-testable without live sessions.

use serde::Serialize;

/// Whether the caller is in a normal conversation or mid-escalation.
///
/// A new transfer may only start while `Active`; escalation flips the
/// status to `Escalated`, and every failure path returns it to `Active`
/// so the caller is never stranded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    Active,
    Escalated,
}

/// Lifecycle of the supervisor side of one transfer attempt.
///
/// The only forward path is `Inactive → Summarizing → Merged`. `Failed`
/// is reachable from setup or from `Summarizing`; a fresh escalation can
/// begin a new attempt afterwards. No transition leaves `Merged`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SupervisorStatus {
    Inactive,
    Summarizing,
    Merged,
    Failed,
}

/// A side effect the orchestrator must perform to realize a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Mute both caller audio directions and start looped hold audio.
    StartHold,
    /// Tell the caller they are being connected to a human.
    AnnounceHold,
    /// Create the consult session and start the summarizer inside it.
    OpenConsult,
    /// Dial the supervisor into the consult session, blocking until
    /// answered.
    DialSupervisor,
    /// Move the supervisor identity from the consult session into the
    /// caller session.
    MigrateSupervisor,
    /// Stop hold audio and re-enable caller audio.
    StopHold,
    /// Tell the caller the transfer did not succeed.
    AnnounceFailure,
    /// Say goodbye before the assistant leaves the call.
    AnnounceFarewell,
    /// Close the assistant's leg in the caller session.
    CloseAssistantLeg,
    /// Close the summarizer's leg in the consult session.
    CloseConsult,
}

/// Reason a transition was refused. Refusals have no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denied {
    /// `begin_escalation` while the customer is not `Active`.
    TransferInProgress,
    /// `begin_merge` while the supervisor is not `Summarizing`.
    NotSummarizing,
}

impl std::fmt::Display for Denied {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TransferInProgress => write!(f, "a transfer is already in progress"),
            Self::NotSummarizing => write!(f, "supervisor is not in the summarizing state"),
        }
    }
}

/// The transfer lifecycle value owned by one orchestrator instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferState {
    customer: CustomerStatus,
    supervisor: SupervisorStatus,
}

impl Default for TransferState {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferState {
    pub fn new() -> Self {
        Self {
            customer: CustomerStatus::Active,
            supervisor: SupervisorStatus::Inactive,
        }
    }

    pub fn customer(&self) -> CustomerStatus {
        self.customer
    }

    pub fn supervisor(&self) -> SupervisorStatus {
        self.supervisor
    }

    /// Begins an escalation attempt.
    ///
    /// Only allowed while the customer is `Active`. On success the
    /// customer becomes `Escalated` and the caller must be held, told,
    /// and the consult session built and dialed — in that order.
    pub fn begin_escalation(&mut self) -> Result<Vec<Command>, Denied> {
        if self.customer != CustomerStatus::Active {
            return Err(Denied::TransferInProgress);
        }
        self.customer = CustomerStatus::Escalated;
        Ok(vec![
            Command::StartHold,
            Command::AnnounceHold,
            Command::OpenConsult,
            Command::DialSupervisor,
        ])
    }

    /// Marks the dial-out as answered; the summarizer is now briefing the
    /// supervisor and a merge may be accepted.
    pub fn escalation_established(&mut self) {
        self.supervisor = SupervisorStatus::Summarizing;
    }

    /// Fails the supervisor side and returns the caller to the assistant.
    ///
    /// Callable from any state, any number of times. From `Merged` it is
    /// a no-op (the transfer already completed; nothing to remediate).
    /// Otherwise the supervisor becomes `Failed`, the customer returns to
    /// `Active`, and the remediation commands restore the caller.
    pub fn fail_supervisor(&mut self) -> Vec<Command> {
        if self.supervisor == SupervisorStatus::Merged {
            return Vec::new();
        }
        self.supervisor = SupervisorStatus::Failed;
        self.customer = CustomerStatus::Active;
        vec![
            Command::StopHold,
            Command::AnnounceFailure,
            Command::CloseConsult,
        ]
    }

    /// Accepts a merge request.
    ///
    /// Only allowed while the supervisor is `Summarizing`. The status is
    /// left unchanged until [`Self::merge_completed`] so that a failure
    /// anywhere in the command sequence can still claim the attempt.
    pub fn begin_merge(&mut self) -> Result<Vec<Command>, Denied> {
        if self.supervisor != SupervisorStatus::Summarizing {
            return Err(Denied::NotSummarizing);
        }
        Ok(vec![
            Command::MigrateSupervisor,
            Command::StopHold,
            Command::AnnounceFarewell,
            Command::CloseAssistantLeg,
            Command::CloseConsult,
        ])
    }

    /// Marks the merge sequence as fully executed. Terminal.
    pub fn merge_completed(&mut self) {
        self.supervisor = SupervisorStatus::Merged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escalation_only_from_active() {
        let mut state = TransferState::new();
        let commands = state.begin_escalation().expect("first escalation allowed");
        assert_eq!(state.customer(), CustomerStatus::Escalated);
        assert_eq!(
            commands,
            vec![
                Command::StartHold,
                Command::AnnounceHold,
                Command::OpenConsult,
                Command::DialSupervisor,
            ]
        );

        // Second attempt while escalated is refused without state change.
        assert_eq!(
            state.begin_escalation(),
            Err(Denied::TransferInProgress),
            "escalation while escalated should be refused"
        );
        assert_eq!(state.supervisor(), SupervisorStatus::Inactive);
    }

    #[test]
    fn established_escalation_moves_to_summarizing() {
        let mut state = TransferState::new();
        state.begin_escalation().expect("escalation allowed");
        state.escalation_established();
        assert_eq!(state.supervisor(), SupervisorStatus::Summarizing);
    }

    #[test]
    fn failure_returns_customer_to_active_from_any_state() {
        // From setup, before the dial completed.
        let mut state = TransferState::new();
        state.begin_escalation().expect("escalation allowed");
        let commands = state.fail_supervisor();
        assert_eq!(state.customer(), CustomerStatus::Active);
        assert_eq!(state.supervisor(), SupervisorStatus::Failed);
        assert_eq!(
            commands,
            vec![
                Command::StopHold,
                Command::AnnounceFailure,
                Command::CloseConsult,
            ]
        );

        // From summarizing.
        let mut state = TransferState::new();
        state.begin_escalation().expect("escalation allowed");
        state.escalation_established();
        state.fail_supervisor();
        assert_eq!(state.customer(), CustomerStatus::Active);
        assert_eq!(state.supervisor(), SupervisorStatus::Failed);
    }

    #[test]
    fn failure_is_repeatable() {
        let mut state = TransferState::new();
        state.begin_escalation().expect("escalation allowed");
        let first = state.fail_supervisor();
        let second = state.fail_supervisor();
        assert_eq!(first, second, "repeated failure performs the same remediation");
        assert_eq!(state.customer(), CustomerStatus::Active);
    }

    #[test]
    fn failure_after_merge_is_a_no_op() {
        let mut state = TransferState::new();
        state.begin_escalation().expect("escalation allowed");
        state.escalation_established();
        state.begin_merge().expect("merge allowed");
        state.merge_completed();

        let commands = state.fail_supervisor();
        assert!(commands.is_empty(), "no transitions leave merged");
        assert_eq!(state.supervisor(), SupervisorStatus::Merged);
    }

    #[test]
    fn merge_requires_summarizing() {
        let mut state = TransferState::new();
        assert_eq!(state.begin_merge(), Err(Denied::NotSummarizing));

        state.begin_escalation().expect("escalation allowed");
        assert_eq!(
            state.begin_merge(),
            Err(Denied::NotSummarizing),
            "dial not yet answered"
        );

        state.escalation_established();
        let commands = state.begin_merge().expect("merge allowed");
        assert_eq!(
            commands,
            vec![
                Command::MigrateSupervisor,
                Command::StopHold,
                Command::AnnounceFarewell,
                Command::CloseAssistantLeg,
                Command::CloseConsult,
            ],
            "migration comes first, teardown after"
        );
        assert_eq!(
            state.supervisor(),
            SupervisorStatus::Summarizing,
            "status unchanged until the whole sequence completes"
        );
    }

    #[test]
    fn merge_completion_is_terminal() {
        let mut state = TransferState::new();
        state.begin_escalation().expect("escalation allowed");
        state.escalation_established();
        state.begin_merge().expect("merge allowed");
        state.merge_completed();
        assert_eq!(state.supervisor(), SupervisorStatus::Merged);
    }

    #[test]
    fn fresh_escalation_possible_after_failure() {
        let mut state = TransferState::new();
        state.begin_escalation().expect("escalation allowed");
        state.fail_supervisor();

        // Failed is not sticky across attempts.
        state.begin_escalation().expect("new attempt allowed");
        state.escalation_established();
        assert_eq!(state.supervisor(), SupervisorStatus::Summarizing);
    }
}
