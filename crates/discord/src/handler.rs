//! Gateway event handling: claim buttons and `/teleport`.
//!
//! Every interaction is answered or logged here; nothing propagates back
//! into serenity.

use std::sync::Arc;

use async_trait::async_trait;
use modbridge_core::alert::CLAIM_ALERT_ID;
use modbridge_core::claim::{claim_alert, ClaimOutcome, ClaimStore, ALREADY_CLAIMED_MESSAGE};
use modbridge_core::relay::{
    followup_message, relay_if_authorized, sending_message, TeleportRelay,
};
use modbridge_core::roles::PERMISSION_DENIED_MESSAGE;
use modbridge_core::teleport::TeleportRequest;
use serenity::all::{
    CommandInteraction, ComponentInteraction, Context, CreateInteractionResponse,
    CreateInteractionResponseFollowup, EventHandler, GuildId, Interaction, Member, Ready,
};

use crate::commands::{register_commands, JOB_ID_OPTION, PLAYER_OPTION, TELEPORT_COMMAND};
use crate::config::DiscordConfig;
use crate::embed::{claimed_update, ephemeral_reply, public_reply};

pub struct Handler {
    claims: Arc<dyn ClaimStore>,
    relay: Arc<dyn TeleportRelay>,
    moderator_role: String,
    guild_id: GuildId,
    register_on_ready: bool,
}

impl Handler {
    pub fn new(
        claims: Arc<dyn ClaimStore>,
        relay: Arc<dyn TeleportRelay>,
        config: &DiscordConfig,
    ) -> Self {
        Self {
            claims,
            relay,
            moderator_role: config.moderator_role.clone(),
            guild_id: config.guild_id,
            register_on_ready: config.register_commands_on_ready,
        }
    }

    async fn on_claim(&self, ctx: &Context, component: &ComponentInteraction) {
        let alert_id = component.message.id.get();
        let claimer = component.user.id.get();

        let response = match claim_alert(self.claims.as_ref(), alert_id, claimer).await {
            ClaimOutcome::Claimed { attribution } => claimed_update(&attribution),
            ClaimOutcome::AlreadyClaimed => ephemeral_reply(ALREADY_CLAIMED_MESSAGE),
        };

        if let Err(err) = component.create_response(&ctx.http, response).await {
            tracing::error!(alert_id, error = %err, "Failed to answer claim interaction");
        }
    }

    async fn on_teleport(&self, ctx: &Context, command: &CommandInteraction) {
        let moderator = command.user.name.clone();

        let Some(target) = string_option(command, PLAYER_OPTION) else {
            respond(ctx, command, ephemeral_reply("Missing required option `player`.")).await;
            return;
        };

        let mut request = TeleportRequest::new(moderator.as_str(), target);
        if let Some(job_id) = string_option(command, JOB_ID_OPTION) {
            request = request.with_job_id(job_id);
        }

        let role_names = member_role_names(ctx, command).await;
        let result = match relay_if_authorized(
            &role_names,
            &self.moderator_role,
            self.relay.as_ref(),
            request,
            || respond(ctx, command, public_reply(sending_message(target))),
        )
        .await
        {
            Ok(result) => result,
            Err(err) => {
                tracing::info!(%moderator, error = %err, "Teleport refused");
                respond(ctx, command, ephemeral_reply(PERMISSION_DENIED_MESSAGE)).await;
                return;
            }
        };

        if let Err(err) = &result {
            tracing::warn!(
                %moderator,
                target_player = target,
                backend = self.relay.backend(),
                error = %err,
                "Teleport request failed"
            );
        }

        let followup = CreateInteractionResponseFollowup::new()
            .content(followup_message(&result))
            .ephemeral(true);
        if let Err(err) = command.create_followup(&ctx.http, followup).await {
            tracing::error!(error = %err, "Failed to send teleport follow-up");
        }
    }
}

/// Names of the invoking member's roles. Empty outside a guild or when the
/// role list cannot be read, which makes authorization fail.
///
/// Served from the gateway cache; REST is only hit before the guild has
/// been cached.
async fn member_role_names(ctx: &Context, command: &CommandInteraction) -> Vec<String> {
    let (Some(guild_id), Some(member)) = (command.guild_id, command.member.as_deref()) else {
        return Vec::new();
    };

    if let Some(names) = cached_role_names(ctx, guild_id, member) {
        return names;
    }

    match guild_id.roles(&ctx.http).await {
        Ok(guild_roles) => member
            .roles
            .iter()
            .filter_map(|id| guild_roles.get(id))
            .map(|role| role.name.clone())
            .collect(),
        Err(err) => {
            tracing::warn!(%guild_id, error = %err, "Failed to fetch guild roles");
            Vec::new()
        }
    }
}

fn cached_role_names(ctx: &Context, guild_id: GuildId, member: &Member) -> Option<Vec<String>> {
    let guild = guild_id.to_guild_cached(&ctx.cache)?;
    Some(
        member
            .roles
            .iter()
            .filter_map(|id| guild.roles.get(id))
            .map(|role| role.name.clone())
            .collect(),
    )
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!(bot = %ready.user.name, "Logged in to Discord");

        if self.register_on_ready {
            match register_commands(&ctx.http, self.guild_id).await {
                Ok(count) => tracing::info!(count, guild_id = %self.guild_id, "Registered guild commands"),
                Err(err) => tracing::error!(error = %err, "Failed to register guild commands"),
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Component(component) if component.data.custom_id == CLAIM_ALERT_ID => {
                self.on_claim(&ctx, &component).await;
            }
            Interaction::Command(command) if command.data.name == TELEPORT_COMMAND => {
                self.on_teleport(&ctx, &command).await;
            }
            other => {
                tracing::debug!(kind = ?other.kind(), "Ignoring unhandled interaction");
            }
        }
    }
}

async fn respond(ctx: &Context, command: &CommandInteraction, response: CreateInteractionResponse) {
    if let Err(err) = command.create_response(&ctx.http, response).await {
        tracing::error!(command = %command.data.name, error = %err, "Failed to answer command");
    }
}

fn string_option<'a>(command: &'a CommandInteraction, name: &str) -> Option<&'a str> {
    command
        .data
        .options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_str())
        .filter(|value| !value.is_empty())
}
