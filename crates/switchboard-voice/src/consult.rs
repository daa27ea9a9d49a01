//! Production consult-room factory.
//!
//! Creates the private consultation room, issues the summarizer's scoped
//! join credential, starts a fresh speech pipeline for the new leg, and
//! forwards the room's disconnect notification to the orchestrator's
//! signal channel.

use crate::pipeline::PipelineFactory;
use crate::rooms::RoomService;
use crate::session::AgentSessionHandle;
use async_trait::async_trait;
use std::sync::Arc;
use switchboard_transfer::{
    ConsultRoomFactory, SessionControl, SupervisorSignal, TransferError, SUMMARIZER_IDENTITY,
};
use tokio::sync::mpsc;
use tracing::info;

pub struct ConsultFactory {
    rooms: Arc<RoomService>,
    pipelines: PipelineFactory,
}

impl ConsultFactory {
    pub fn new(rooms: Arc<RoomService>, pipelines: PipelineFactory) -> Self {
        Self { rooms, pipelines }
    }
}

#[async_trait]
impl ConsultRoomFactory for ConsultFactory {
    async fn open_consult(
        &self,
        session_name: &str,
        instructions: &str,
        signals: mpsc::Sender<SupervisorSignal>,
    ) -> Result<Arc<dyn SessionControl>, TransferError> {
        self.rooms
            .create_room(session_name)
            .await
            .map_err(TransferError::from)?;

        let token = self
            .rooms
            .agent_join_token(session_name, SUMMARIZER_IDENTITY)
            .map_err(TransferError::from)?;

        // Fresh engines per consult session: a pipeline fault here never
        // touches the caller session's pipeline.
        let pipeline = self.pipelines.build();

        let session = AgentSessionHandle::connect(
            self.rooms.url(),
            &token,
            session_name,
            SUMMARIZER_IDENTITY,
            pipeline,
            instructions,
        )
        .await
        .map_err(TransferError::from)?;

        info!(room = session_name, "summarizer connected to consult room");

        let mut closed = session.subscribe_close();
        tokio::spawn(async move {
            while closed.changed().await.is_ok() {
                let is_closed = *closed.borrow();
                if is_closed {
                    let _ = signals.send(SupervisorSignal::ConsultClosed).await;
                    break;
                }
            }
        });

        Ok(session as Arc<dyn SessionControl>)
    }
}
