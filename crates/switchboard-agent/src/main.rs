//! Switchboard agent binary.
//!
//! Connects the assistant to its caller room with structured logging and
//! graceful shutdown, and wires the warm-transfer orchestrator over the
//! LiveKit deployment named in the configuration.

mod assistant;
mod config;
mod prompts;
mod tools;

use assistant::Assistant;
use prompts::PromptConfig;
use std::sync::Arc;
use switchboard_transfer::{
    ConsultationConductor, HoldController, SessionControl, TransferOrchestrator,
};
use switchboard_voice::{
    AgentSessionHandle, BackgroundAudio, ConsultFactory, MigrationClient, PipelineFactory,
    RoomService, TelephonyClient,
};
use tracing_subscriber::EnvFilter;

fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("SWITCHBOARD_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

#[tokio::main]
async fn main() {
    let (resolved_config_path, config_source) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().or(Some("config.toml"));

    // Load configuration
    let config = config::load_config(selected_config_path)
        .expect("failed to load configuration — the agent cannot start without valid config");

    // Initialize tracing
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        source = config_source,
        path = selected_config_path.unwrap_or("<none>"),
        "resolved startup configuration path"
    );

    if !config.media.is_enabled() {
        tracing::error!("media.url is not configured — the agent cannot join a room");
        std::process::exit(1);
    }

    // Media and telephony services
    let rooms = Arc::new(RoomService::new(config.media.clone()));
    let pipelines = PipelineFactory::new(config.pipeline.clone());
    let dialer = Arc::new(TelephonyClient::new(&config.media));
    let migration = Arc::new(MigrationClient::new(&config.media));

    // Caller session leg
    let session_name = config.assistant.session_name.clone();
    let prompt = PromptConfig {
        agent_name: config.assistant.agent_name.clone(),
    };
    let instructions = prompts::render_prompt(&prompt);

    rooms
        .create_room(&session_name)
        .await
        .expect("failed to create the caller room — check media.url and credentials");
    let token = rooms
        .agent_join_token(&session_name, "assistant")
        .expect("failed to mint the assistant's join token");
    let session = AgentSessionHandle::connect(
        rooms.url(),
        &token,
        &session_name,
        "assistant",
        pipelines.build(),
        &instructions,
    )
    .await
    .expect("failed to join the caller room");

    // Warm-transfer orchestration
    let hold = HoldController::new(
        session.clone() as Arc<dyn SessionControl>,
        Arc::new(BackgroundAudio::new(&session_name)),
        config.telephony.hold_audio.clone(),
    );
    let factory = Arc::new(ConsultFactory::new(Arc::clone(&rooms), pipelines));
    let conductor = ConsultationConductor::new(
        factory,
        dialer,
        config.telephony.trunk_id.clone(),
        config.telephony.supervisor_contact.clone(),
    );
    let orchestrator = TransferOrchestrator::new(
        session.clone() as Arc<dyn SessionControl>,
        hold,
        conductor,
        migration,
    );
    let dispatcher = orchestrator.spawn_dispatcher();

    let assistant = Assistant::new(
        session.clone(),
        Arc::clone(&orchestrator),
        prompt,
        tools::placeholder_tools(),
    );

    tracing::info!(session = %session_name, "switchboard agent ready");

    if let Err(err) = assistant.greet().await {
        tracing::warn!(error = %err, "failed to greet the caller");
    }

    shutdown_signal().await;

    if let Err(err) = session.close().await {
        tracing::warn!(error = %err, "error closing the caller session");
    }
    dispatcher.abort();
    tracing::info!("switchboard agent shut down");
}

/// Waits for a SIGINT (Ctrl+C) or SIGTERM signal for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { tracing::info!("received SIGINT, initiating graceful shutdown"); }
        () = terminate => { tracing::info!("received SIGTERM, initiating graceful shutdown"); }
    }
}
