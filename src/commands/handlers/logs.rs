//! Logs command handler
//!
//! Handles: logs
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use anyhow::Result;
use async_trait::async_trait;
use log::error;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::mention::Mentionable;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::features::audit;

/// Handler for /logs: ensure the audit channel exists
pub struct LogsHandler;

#[async_trait]
impl SlashCommandHandler for LogsHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["logs"]
    }

    async fn handle(
        &self,
        _ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let Some(guild_id) = command.guild_id else {
            return respond(serenity_ctx, command, "❌ This command can only be used in servers.").await;
        };

        let content = match audit::get_or_create_log_channel(serenity_ctx, guild_id).await {
            Ok(channel) => format!("✅ Logs channel: {}", channel.id.mention()),
            Err(e) => {
                // Permission failure degrades this one call, nothing else
                error!("Could not provide logs channel in guild {guild_id}: {e:#}");
                "❌ Could not create or access logs channel. Check bot permissions.".to_string()
            }
        };

        respond(serenity_ctx, command, &content).await
    }
}

async fn respond(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    content: &str,
) -> Result<()> {
    command
        .create_interaction_response(&serenity_ctx.http, |r| {
            r.kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|m| m.content(content).ephemeral(true))
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logs_handler_commands() {
        let handler = LogsHandler;
        let names = handler.command_names();

        assert!(names.contains(&"logs"));
        assert_eq!(names.len(), 1);
    }
}
