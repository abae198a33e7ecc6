//! # Audit Feature
//!
//! Relays accepted guild messages to a restricted `logs` channel. DMs are
//! never relayed. A permission failure degrades the relay for that one
//! message and is logged, never propagated into the event path.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

use anyhow::{Context as AnyhowContext, Result};
use log::{info, warn};
use serenity::model::channel::{
    ChannelType, GuildChannel, Message, PermissionOverwrite, PermissionOverwriteType,
};
use serenity::model::id::{GuildId, RoleId};
use serenity::model::permissions::Permissions;
use serenity::prelude::Context;

use crate::core::embeds::audit_embed;

/// Name of the per-guild audit channel
pub const LOG_CHANNEL_NAME: &str = "logs";

const LOG_CHANNEL_TOPIC: &str = "Bot message logs";

/// Find the guild's audit channel, creating it with restricted permissions
/// (read-only for @everyone, writable by the bot) when absent.
pub async fn get_or_create_log_channel(ctx: &Context, guild_id: GuildId) -> Result<GuildChannel> {
    let channels = guild_id
        .channels(&ctx.http)
        .await
        .context("failed to list guild channels")?;

    if let Some(existing) = channels
        .values()
        .find(|channel| channel.kind == ChannelType::Text && channel.name == LOG_CHANNEL_NAME)
    {
        return Ok(existing.clone());
    }

    // The @everyone role id is the guild id
    let overwrites = vec![
        PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::SEND_MESSAGES,
            kind: PermissionOverwriteType::Role(RoleId(guild_id.0)),
        },
        PermissionOverwrite {
            allow: Permissions::SEND_MESSAGES,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(ctx.cache.current_user_id()),
        },
    ];

    let channel = guild_id
        .create_channel(&ctx.http, |c| {
            c.name(LOG_CHANNEL_NAME)
                .kind(ChannelType::Text)
                .topic(LOG_CHANNEL_TOPIC)
                .permissions(overwrites)
        })
        .await
        .context("failed to create logs channel")?;

    info!("✅ Created #{LOG_CHANNEL_NAME} channel in guild {guild_id}");
    Ok(channel)
}

/// Relay one accepted guild message to the audit channel as an embed.
///
/// No-op for DMs. `max_content_len` caps the relayed text at the transport
/// chunk budget.
pub async fn relay_message(ctx: &Context, msg: &Message, max_content_len: usize) -> Result<()> {
    let Some(guild_id) = msg.guild_id else {
        return Ok(());
    };

    let log_channel = get_or_create_log_channel(ctx, guild_id).await?;

    // The bot's own audit entries must not loop through the relay
    if msg.channel_id == log_channel.id {
        return Ok(());
    }

    let channel_name = msg
        .channel_id
        .name(&ctx.cache)
        .await
        .unwrap_or_else(|| "unknown".to_string());
    let guild_name = ctx
        .cache
        .guild(guild_id)
        .map(|guild| guild.name)
        .unwrap_or_else(|| guild_id.to_string());

    let embed = audit_embed(msg, &channel_name, &guild_name, max_content_len);
    log_channel
        .id
        .send_message(&ctx.http, |m| m.set_embed(embed))
        .await
        .context("failed to send audit entry")?;

    let logged_at = chrono::DateTime::from_timestamp(msg.timestamp.unix_timestamp(), 0)
        .unwrap_or_else(chrono::Utc::now);
    info!(
        "📋 Relayed message | author: {} | channel: #{channel_name} | sent: {}",
        msg.author.id,
        logged_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    Ok(())
}

/// Relay wrapper for the ingress path: catches and logs every failure so a
/// broken audit channel never blocks command routing.
pub async fn relay_message_isolated(ctx: &Context, msg: &Message, max_content_len: usize) {
    if let Err(e) = relay_message(ctx, msg, max_content_len).await {
        warn!("⚠️ Audit relay failed (continuing): {e:#}");
    }
}
