//! Registers the bot's slash commands in the configured guild and exits.

use serenity::all::Http;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use modbridge_discord::commands::register_commands;
use modbridge_discord::DiscordConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "modbridge_discord=info,modbridge_register=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DiscordConfig::from_env();

    let http = Http::new(&config.token);
    http.set_application_id(config.application_id);

    tracing::info!(guild_id = %config.guild_id, "Refreshing application (/) commands");
    let count = register_commands(&http, config.guild_id).await?;
    tracing::info!(count, "Reloaded application (/) commands");

    Ok(())
}
