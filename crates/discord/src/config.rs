use modbridge_core::roles::DEFAULT_MODERATOR_ROLE;
use serenity::all::{ApplicationId, ChannelId, GuildId};

/// Application the slash commands are registered under.
const DEFAULT_APPLICATION_ID: u64 = 1_374_735_135_420_977_183;
/// Guild the bot moderates.
const DEFAULT_GUILD_ID: u64 = 1_371_312_134_868_308_071;
/// Channel alerts are posted to.
const DEFAULT_ALERT_CHANNEL_ID: u64 = 1_374_665_649_082_597_416;

/// Discord bot configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    /// Bot token.
    pub token: String,
    pub application_id: ApplicationId,
    pub guild_id: GuildId,
    pub alert_channel_id: ChannelId,
    /// Role name required to use `/teleport`.
    pub moderator_role: String,
    /// Re-register guild commands every time the gateway connects.
    pub register_commands_on_ready: bool,
}

impl DiscordConfig {
    /// Load Discord configuration from environment variables.
    ///
    /// | Env Var                      | Required | Default           |
    /// |------------------------------|----------|-------------------|
    /// | `DISCORD_TOKEN`              | **yes**  | --                |
    /// | `DISCORD_APPLICATION_ID`     | no       | production app    |
    /// | `DISCORD_GUILD_ID`           | no       | production guild  |
    /// | `ALERT_CHANNEL_ID`           | no       | production channel|
    /// | `MODERATOR_ROLE`             | no       | `Game Developers` |
    /// | `REGISTER_COMMANDS_ON_READY` | no       | `false`           |
    ///
    /// # Panics
    ///
    /// Panics if `DISCORD_TOKEN` is missing or empty, or if an id is not a
    /// valid non-zero snowflake.
    pub fn from_env() -> Self {
        let token =
            std::env::var("DISCORD_TOKEN").expect("DISCORD_TOKEN must be set in the environment");
        assert!(!token.is_empty(), "DISCORD_TOKEN must not be empty");

        let application_id =
            ApplicationId::new(snowflake_from_env("DISCORD_APPLICATION_ID", DEFAULT_APPLICATION_ID));
        let guild_id = GuildId::new(snowflake_from_env("DISCORD_GUILD_ID", DEFAULT_GUILD_ID));
        let alert_channel_id =
            ChannelId::new(snowflake_from_env("ALERT_CHANNEL_ID", DEFAULT_ALERT_CHANNEL_ID));

        let moderator_role =
            std::env::var("MODERATOR_ROLE").unwrap_or_else(|_| DEFAULT_MODERATOR_ROLE.into());

        let register_commands_on_ready: bool = std::env::var("REGISTER_COMMANDS_ON_READY")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("REGISTER_COMMANDS_ON_READY must be `true` or `false`");

        Self {
            token,
            application_id,
            guild_id,
            alert_channel_id,
            moderator_role,
            register_commands_on_ready,
        }
    }
}

fn snowflake_from_env(var: &str, default: u64) -> u64 {
    let id: u64 = match std::env::var(var) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{var} must be a valid u64: {e}")),
        Err(_) => default,
    };
    assert!(id != 0, "{var} must not be zero");
    id
}
