//! Transfer orchestrator.
//!
//! Owns the [`TransferState`] value and drives it: public operations
//! validate a transition, then execute the returned commands against the
//! external collaborators. Every failure inside an operation is recovered
//! locally — the only externally observable effects are the caller's
//! spoken state and audio state.

use crate::briefing::Briefing;
use crate::consult::ConsultationConductor;
use crate::error::TransferError;
use crate::hold::HoldController;
use crate::state::{Command, CustomerStatus, SupervisorStatus, TransferState};
use crate::summarizer::{SummarizationAgent, SupervisorSignal};
use crate::traits::{ParticipantMigration, SessionControl};
use crate::SUPERVISOR_IDENTITY;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Spoken while the caller is being put on hold.
const HOLD_NOTICE: &str = "Please hold while I connect you to a human agent.";

/// Spoken when escalation cannot start because telephony is unconfigured.
const UNAVAILABLE_NOTICE: &str = "Sorry, transfer is unavailable right now.";

/// Spoken when the transfer attempt failed and the assistant takes back
/// the conversation.
const FAILURE_NOTICE: &str =
    "Sorry, I couldn't connect you to a supervisor. How else can I help?";

/// Spoken after the supervisor joined, before the assistant leaves.
const FAREWELL_NOTICE: &str =
    "You are now connected to a human supervisor. I will leave the line now. Goodbye.";

/// Capacity of the supervisor signal channel. Signals are rare (a handful
/// per transfer attempt), so a small buffer suffices.
const SIGNAL_CHANNEL_CAPACITY: usize = 16;

pub struct TransferOrchestrator {
    caller: Arc<dyn SessionControl>,
    hold: HoldController,
    conductor: ConsultationConductor,
    migration: Arc<dyn ParticipantMigration>,
    state: Mutex<TransferState>,
    consult: Mutex<Option<Arc<dyn SessionControl>>>,
    summarizer: Mutex<Option<SummarizationAgent>>,
    signal_tx: mpsc::Sender<SupervisorSignal>,
    signal_rx: Mutex<Option<mpsc::Receiver<SupervisorSignal>>>,
}

impl TransferOrchestrator {
    pub fn new(
        caller: Arc<dyn SessionControl>,
        hold: HoldController,
        conductor: ConsultationConductor,
        migration: Arc<dyn ParticipantMigration>,
    ) -> Arc<Self> {
        let (signal_tx, signal_rx) = mpsc::channel(SIGNAL_CHANNEL_CAPACITY);
        Arc::new(Self {
            caller,
            hold,
            conductor,
            migration,
            state: Mutex::new(TransferState::new()),
            consult: Mutex::new(None),
            summarizer: Mutex::new(None),
            signal_tx,
            signal_rx: Mutex::new(Some(signal_rx)),
        })
    }

    /// Sender half of the supervisor signal channel, for wiring external
    /// event sources (e.g. the consult room's disconnect notification).
    pub fn signals(&self) -> mpsc::Sender<SupervisorSignal> {
        self.signal_tx.clone()
    }

    pub async fn customer_status(&self) -> CustomerStatus {
        self.state.lock().await.customer()
    }

    pub async fn supervisor_status(&self) -> SupervisorStatus {
        self.state.lock().await.supervisor()
    }

    /// The summarization agent of the current attempt, if one exists.
    pub async fn summarizer(&self) -> Option<SummarizationAgent> {
        self.summarizer.lock().await.clone()
    }

    /// Spawns the signal dispatcher task.
    ///
    /// Consumes the channel fed by the summarization agent's tool actions
    /// and the consult room's disconnect notification. Each signal is
    /// handled once, in arrival order.
    pub fn spawn_dispatcher(self: &Arc<Self>) -> JoinHandle<()> {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            let mut rx = match this.signal_rx.lock().await.take() {
                Some(rx) => rx,
                None => {
                    warn!("signal dispatcher already running");
                    return;
                }
            };
            while let Some(signal) = rx.recv().await {
                match signal {
                    SupervisorSignal::ReadyToConnect => this.merge_calls().await,
                    SupervisorSignal::Unreachable => this.set_supervisor_failed().await,
                    SupervisorSignal::ConsultClosed => {
                        // A disconnect after merge (or after a failure
                        // already remediated) needs no action.
                        if this.supervisor_status().await == SupervisorStatus::Summarizing {
                            warn!("consult session disconnected mid-transfer");
                            this.set_supervisor_failed().await;
                        }
                    }
                }
            }
        })
    }

    /// Escalates the caller to a human supervisor.
    ///
    /// No-op (beyond a spoken notice for missing configuration) when a
    /// transfer is already in flight or telephony is unconfigured. On any
    /// error during the hold/consult/dial sequence the attempt is failed
    /// and the caller restored; errors never propagate out.
    pub async fn start_transfer(&self) {
        if self.state.lock().await.customer() != CustomerStatus::Active {
            info!("transfer already in progress or customer not active");
            return;
        }
        if !self.conductor.is_configured() {
            error!("trunk or supervisor contact not configured, transfer unavailable");
            if let Err(err) = self.caller.announce(UNAVAILABLE_NOTICE).await {
                warn!(error = %err, "error notifying caller that transfer is unavailable");
            }
            return;
        }

        let commands = match self.state.lock().await.begin_escalation() {
            Ok(commands) => commands,
            Err(denied) => {
                info!(%denied, "ignoring transfer request");
                return;
            }
        };

        match self.execute_all(commands).await {
            Ok(()) => {
                self.state.lock().await.escalation_established();
                info!("supervisor dialed, waiting for summary step");
            }
            Err(err) => {
                warn!(error = %err, "failed to start transfer");
                self.set_supervisor_failed().await;
            }
        }
    }

    /// Fails the supervisor side and restores the caller.
    ///
    /// Safe to call multiple times and from any state (a no-op once
    /// merged). Remediation errors are logged and swallowed: nothing may
    /// block returning the caller to a working conversation.
    pub async fn set_supervisor_failed(&self) {
        let commands = self.state.lock().await.fail_supervisor();
        if commands.is_empty() {
            return;
        }
        for command in commands {
            if let Err(err) = self.execute(command).await {
                warn!(?command, error = %err, "error during transfer remediation");
            }
        }
    }

    /// Moves the supervisor into the caller session and retires the
    /// assistant.
    ///
    /// Requires an established consultation (`Summarizing`) and valid
    /// session names; anything else — including an error anywhere in the
    /// migrate/teardown sequence — routes to [`Self::set_supervisor_failed`],
    /// so the caller observably ends up either with the supervisor or
    /// back with the assistant.
    pub async fn merge_calls(&self) {
        let begin_result = self.state.lock().await.begin_merge();
        let commands = match begin_result {
            Ok(commands) => commands,
            Err(denied) => {
                info!(%denied, "merge refused");
                self.set_supervisor_failed().await;
                return;
            }
        };

        let consult_name = self.consult_name().await;
        let sessions_valid = !self.caller.name().is_empty()
            && consult_name.as_deref().is_some_and(|name| !name.is_empty());
        if !sessions_valid {
            error!("sessions missing for merge");
            self.set_supervisor_failed().await;
            return;
        }

        match self.execute_all(commands).await {
            Ok(()) => {
                self.state.lock().await.merge_completed();
                info!("calls merged successfully");
            }
            Err(err) => {
                warn!(error = %err, "could not merge calls");
                self.set_supervisor_failed().await;
            }
        }
    }

    async fn consult_name(&self) -> Option<String> {
        self.consult
            .lock()
            .await
            .as_ref()
            .map(|session| session.name().to_string())
    }

    async fn execute_all(&self, commands: Vec<Command>) -> Result<(), TransferError> {
        for command in commands {
            self.execute(command).await?;
        }
        Ok(())
    }

    async fn execute(&self, command: Command) -> Result<(), TransferError> {
        match command {
            Command::StartHold => self.hold.start_hold().await,
            Command::AnnounceHold => self.caller.announce(HOLD_NOTICE).await,
            Command::OpenConsult => self.open_consult().await,
            Command::DialSupervisor => {
                let name = self.consult_name().await.ok_or_else(|| {
                    TransferError::Session("no consult session to dial into".to_string())
                })?;
                self.conductor.dial_supervisor(&name).await
            }
            Command::MigrateSupervisor => {
                let source = self.consult_name().await.ok_or_else(|| {
                    TransferError::Session("no consult session to migrate from".to_string())
                })?;
                self.migration
                    .move_participant(&source, SUPERVISOR_IDENTITY, self.caller.name())
                    .await
            }
            Command::StopHold => {
                self.hold.stop_hold().await;
                Ok(())
            }
            Command::AnnounceFailure => self.caller.announce(FAILURE_NOTICE).await,
            Command::AnnounceFarewell => self.caller.announce(FAREWELL_NOTICE).await,
            Command::CloseAssistantLeg => self.caller.close().await,
            Command::CloseConsult => {
                if let Some(session) = self.consult.lock().await.take() {
                    if let Err(err) = session.close().await {
                        warn!(error = %err, "error closing consult session");
                    }
                }
                Ok(())
            }
        }
    }

    /// Snapshots the dialogue, builds the summarization agent, and opens
    /// the consult session seeded with its instructions.
    ///
    /// A history-snapshot failure degrades to a placeholder briefing —
    /// summarization must never block the transfer itself.
    async fn open_consult(&self) -> Result<(), TransferError> {
        let briefing = match self.caller.history() {
            Ok(turns) => Briefing::from_turns(&turns),
            Err(err) => {
                warn!(error = %err, "failed to snapshot dialogue history");
                Briefing::placeholder()
            }
        };
        let agent = SummarizationAgent::new(&briefing, self.signal_tx.clone());
        let session = self
            .conductor
            .open_consult(
                self.caller.name(),
                agent.instructions(),
                self.signal_tx.clone(),
            )
            .await?;
        *self.consult.lock().await = Some(session);
        *self.summarizer.lock().await = Some(agent);
        Ok(())
    }
}
