//! Slash command definitions and guild registration.

use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption, GuildId, Http};

pub const TELEPORT_COMMAND: &str = "teleport";
pub const PLAYER_OPTION: &str = "player";
pub const JOB_ID_OPTION: &str = "job_id";

/// `/teleport player:<name> [job_id:<id>]`
pub fn teleport_command() -> CreateCommand {
    CreateCommand::new(TELEPORT_COMMAND)
        .description("Teleport a mod to a player")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                PLAYER_OPTION,
                "Player name to teleport to",
            )
            .required(true),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                JOB_ID_OPTION,
                "Job id of the server the player is in",
            )
            .required(false),
        )
}

pub fn guild_commands() -> Vec<CreateCommand> {
    vec![teleport_command()]
}

/// Replace the guild's command set. Returns how many commands are now registered.
pub async fn register_commands(http: &Http, guild_id: GuildId) -> serenity::Result<usize> {
    let registered = guild_id.set_commands(http, guild_commands()).await?;
    Ok(registered.len())
}
