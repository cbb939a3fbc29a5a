use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use serenity::all::{Client, GatewayIntents};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use modbridge_api::config::{RelayBackend, ServerConfig};
use modbridge_api::router::build_app_router;
use modbridge_api::state::AppState;
use modbridge_cloud::{DirectRelay, OpenCloudClient, OpenCloudConfig};
use modbridge_core::claim::{ClaimStore, MemoryClaimStore};
use modbridge_core::relay::{QueueRelay, TeleportRelay};
use modbridge_core::teleport::TeleportQueue;
use modbridge_discord::{DiscordAlertSink, DiscordConfig, Handler};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "modbridge_api=debug,modbridge_core=debug,modbridge_discord=debug,\
                 modbridge_cloud=debug,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        backend = ?config.relay_backend,
        require_job_id = config.queue_policy.require_job_id,
        "Loaded server configuration"
    );

    let discord_config = DiscordConfig::from_env();
    tracing::info!(
        guild_id = %discord_config.guild_id,
        alert_channel_id = %discord_config.alert_channel_id,
        moderator_role = %discord_config.moderator_role,
        "Loaded Discord configuration"
    );

    // --- In-memory stores ---
    let claims: Arc<dyn ClaimStore> = Arc::new(MemoryClaimStore::new());
    let teleport_queue = Arc::new(TeleportQueue::in_memory(config.queue_policy));

    // --- Teleport relay ---
    let relay: Arc<dyn TeleportRelay> = match config.relay_backend {
        RelayBackend::Queue => Arc::new(QueueRelay::new(Arc::clone(&teleport_queue))),
        RelayBackend::Direct => {
            let cloud_config = OpenCloudConfig::from_env();
            tracing::info!(universe_id = cloud_config.universe_id, "Loaded Open Cloud configuration");
            let client =
                OpenCloudClient::new(&cloud_config).expect("Failed to build Open Cloud HTTP client");
            Arc::new(DirectRelay::new(client))
        }
    };
    tracing::info!(backend = relay.backend(), "Teleport relay ready");

    // --- Discord client ---
    let handler = Handler::new(Arc::clone(&claims), Arc::clone(&relay), &discord_config);
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES;
    let mut client = Client::builder(&discord_config.token, intents)
        .event_handler(handler)
        .await
        .expect("Failed to build Discord client");

    let alert_sink = Arc::new(DiscordAlertSink::new(
        Arc::clone(&client.http),
        discord_config.alert_channel_id,
    ));
    let shard_manager = Arc::clone(&client.shard_manager);

    let gateway_handle = tokio::spawn(async move {
        if let Err(err) = client.start().await {
            tracing::error!(error = %err, "Discord gateway stopped");
        }
    });
    tracing::info!("Discord gateway started");

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        alert_sink,
        teleport_queue: Arc::clone(&teleport_queue),
        claims,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    let pending = teleport_queue.pending().await;
    if pending > 0 {
        tracing::warn!(pending, "Dropping undelivered teleport requests");
    }

    shard_manager.shutdown_all().await;
    let _ = tokio::time::timeout(Duration::from_secs(5), gateway_handle).await;
    tracing::info!("Discord gateway shut down");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
