//! Discord rendering of alert notices and claim updates.

use modbridge_core::alert::{AlertNotice, NoticeControl};
use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateMessage, Timestamp,
};

/// Message posted to the alert channel: one embed, one button row.
pub fn alert_message(notice: &AlertNotice) -> CreateMessage {
    CreateMessage::new()
        .embed(alert_embed(notice))
        .components(vec![control_row(&notice.control)])
}

pub fn alert_embed(notice: &AlertNotice) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(notice.title.as_str())
        .colour(notice.colour);

    for field in &notice.fields {
        embed = embed.field(field.name.as_str(), field.value.as_str(), field.inline);
    }

    match Timestamp::from_unix_timestamp(notice.timestamp.timestamp()) {
        Ok(ts) => embed.timestamp(ts),
        Err(_) => embed.timestamp(Timestamp::now()),
    }
}

pub fn control_row(control: &NoticeControl) -> CreateActionRow {
    CreateActionRow::Buttons(vec![CreateButton::new(control.custom_id.as_str())
        .label(control.label.as_str())
        .style(ButtonStyle::Primary)
        .disabled(control.disabled)])
}

/// In-place edit of a freshly claimed alert.
///
/// Embeds are not part of the edit so Discord keeps the original ones.
pub fn claimed_update(attribution: &str) -> CreateInteractionResponse {
    CreateInteractionResponse::UpdateMessage(
        CreateInteractionResponseMessage::new()
            .content(attribution)
            .components(vec![control_row(&NoticeControl::claimed())]),
    )
}

/// Reply only the invoking user can see.
pub fn ephemeral_reply(content: &str) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    )
}

/// Reply visible to the whole channel.
pub fn public_reply(content: impl Into<String>) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().content(content))
}
