//! Audit embed builders for relayed guild messages
//!
//! Shared embed construction for the logs-channel relay. The builder core
//! takes plain data so callers resolve channel/guild names first and tests
//! need no gateway objects.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use crate::core::response::truncate;
use serenity::builder::CreateEmbed;
use serenity::model::channel::Message;
use serenity::model::Timestamp;

/// Accent color for audit entries
const AUDIT_COLOR: u32 = 0x3498db;

/// Placeholder description for attachment-only or embed-only messages
const NO_CONTENT: &str = "*[No text content]*";

/// Build the audit embed for one relayed guild message.
///
/// `max_content_len` caps the description at the transport chunk budget.
pub fn audit_embed(
    msg: &Message,
    channel_name: &str,
    guild_name: &str,
    max_content_len: usize,
) -> CreateEmbed {
    let attachment_names: Vec<String> = msg
        .attachments
        .iter()
        .map(|att| att.filename.clone())
        .collect();

    build_audit_embed(
        &format!("{} ({})", msg.author.name, msg.author.tag()),
        &msg.author.face(),
        &msg.content,
        msg.timestamp,
        &attachment_names,
        channel_name,
        guild_name,
        max_content_len,
    )
}

#[allow(clippy::too_many_arguments)]
fn build_audit_embed(
    author_line: &str,
    author_icon: &str,
    content: &str,
    timestamp: Timestamp,
    attachment_names: &[String],
    channel_name: &str,
    guild_name: &str,
    max_content_len: usize,
) -> CreateEmbed {
    let mut embed = CreateEmbed::default();

    let description = if content.is_empty() {
        NO_CONTENT.to_string()
    } else {
        truncate(content, max_content_len)
    };
    embed.description(description);
    embed.color(AUDIT_COLOR);
    embed.timestamp(timestamp);

    embed.author(|a| a.name(author_line).icon_url(author_icon));
    embed.footer(|f| f.text(format!("#{channel_name} • {guild_name}")));

    if !attachment_names.is_empty() {
        embed.field("Attachments", attachment_names.join("\n"), false);
    }

    embed
}
