//! # Command Handler
//!
//! Application layer joining the ingress gate to the command system. Every
//! inbound message passes the flood limiter first; accepted messages feed
//! two independent consumers (the audit relay and the text-command router),
//! and a failure in either never blocks the other. Slash interactions
//! dispatch through the handler registry.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Text-form /ai fallback shares the dispatcher pipeline
//! - 1.0.0: Initial release with flood gate and slash dispatch

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, error, info, warn};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::channel::Message;
use serenity::model::id::ChannelId;
use serenity::prelude::Context;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::commands::handlers::{AiCommandHandler, InfoHandler, LogsHandler};
use crate::commands::{CommandContext, CommandRegistry};
use crate::features::ai::{Acknowledger, AiRequest};
use crate::features::audit;

/// How long the flood warning stays visible before self-deleting
const FLOOD_NOTICE_TTL: Duration = Duration::from_secs(5);

pub struct CommandHandler {
    context: Arc<CommandContext>,
    registry: CommandRegistry,
}

/// Deferred acknowledgment for text-form invocations: a typing indicator,
/// the closest thing plain messages have to a pending response.
struct TypingAck<'a> {
    serenity_ctx: &'a Context,
    channel_id: ChannelId,
}

#[async_trait]
impl Acknowledger for TypingAck<'_> {
    async fn defer(&self) -> Result<()> {
        self.channel_id
            .broadcast_typing(&self.serenity_ctx.http)
            .await?;
        Ok(())
    }
}

impl CommandHandler {
    pub fn new(context: Arc<CommandContext>) -> Self {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(AiCommandHandler));
        registry.register(Arc::new(LogsHandler));
        registry.register(Arc::new(InfoHandler));

        CommandHandler { context, registry }
    }

    /// Ingress gate for one inbound message. Returns Ok even when the
    /// message is rejected; a throttled sender is not an error.
    pub async fn handle_message(&self, ctx: &Context, msg: &Message) -> Result<()> {
        let user_id = msg.author.id.to_string();

        if !self.context.rate_guard.admit_message(&user_id) {
            debug!("🚫 Flood limit exceeded for user {user_id}");
            self.send_flood_notice(ctx, msg).await;
            return Ok(());
        }

        // Two independent consumers: the audit relay and the command router.
        // Each isolates its own failures.
        audit::relay_message_isolated(ctx, msg, self.context.config.max_chunk_size).await;

        if let Err(e) = self.route_text_command(ctx, msg).await {
            error!("Text command routing failed: {e:#}");
            let _ = msg
                .channel_id
                .say(
                    &ctx.http,
                    "❌ An error occurred while processing the command.",
                )
                .await;
        }

        Ok(())
    }

    /// Dispatch one slash interaction through the handler registry.
    pub async fn handle_slash_command(
        &self,
        ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let name = command.data.name.as_str();
        match self.registry.get(name) {
            Some(handler) => handler.handle(Arc::clone(&self.context), ctx, command).await,
            None => {
                warn!("Received unregistered slash command: {name}");
                Ok(())
            }
        }
    }

    /// Transient rejection notice that deletes itself shortly after.
    async fn send_flood_notice(&self, ctx: &Context, msg: &Message) {
        let warning = match msg
            .reply(ctx, "🚫 Slow down! You're sending messages too quickly.")
            .await
        {
            Ok(warning) => warning,
            Err(e) => {
                // Missing send permission is not worth more than a debug line
                debug!("Could not send flood notice: {e}");
                return;
            }
        };

        let http = ctx.http.clone();
        let channel_id = warning.channel_id;
        let message_id = warning.id;
        tokio::spawn(async move {
            tokio::time::sleep(FLOOD_NOTICE_TTL).await;
            if let Err(e) = channel_id.delete_message(&http, message_id).await {
                debug!("Could not expire flood notice: {e}");
            }
        });
    }

    /// Text-form command fallback. Only `/ai` is routed here; `/logs` and
    /// `/info` are interaction-only since they lean on Discord-side
    /// permission gating.
    async fn route_text_command(&self, ctx: &Context, msg: &Message) -> Result<()> {
        let Some((command, rest)) = split_command(&msg.content) else {
            return Ok(());
        };

        match command {
            "ai" => self.handle_text_ai(ctx, msg, rest).await,
            // Unknown text commands are ignored, same as unknown prefixes
            _ => Ok(()),
        }
    }

    async fn handle_text_ai(&self, ctx: &Context, msg: &Message, args: &str) -> Result<()> {
        let request_id = Uuid::new_v4();

        let Some((selector, prompt)) = args.split_once(char::is_whitespace) else {
            msg.channel_id
                .say(&ctx.http, "❌ Usage: `/ai <chatgpt|gemini> <prompt>`")
                .await?;
            return Ok(());
        };

        info!(
            "[{request_id}] text /ai command | Model: {selector} | User: {}",
            msg.author.id
        );

        let request = AiRequest {
            user_id: msg.author.id.to_string(),
            selector: selector.to_string(),
            prompt: prompt.trim().to_string(),
        };
        let ack = TypingAck {
            serenity_ctx: ctx,
            channel_id: msg.channel_id,
        };

        // Sequential sends keep the chunks in conversation order
        let chunks = self.context.dispatcher.handle(&request, &ack).await;
        for chunk in &chunks {
            msg.channel_id.say(&ctx.http, chunk).await?;
        }

        Ok(())
    }
}

/// Split a text command line into (name, argument rest). None for anything
/// that is not a `/command`.
fn split_command(content: &str) -> Option<(&str, &str)> {
    let stripped = content.trim().strip_prefix('/')?;
    if stripped.is_empty() {
        return None;
    }
    match stripped.split_once(char::is_whitespace) {
        Some((command, rest)) => Some((command, rest.trim_start())),
        None => Some((stripped, "")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_command_basic() {
        assert_eq!(
            split_command("/ai chatgpt hello there"),
            Some(("ai", "chatgpt hello there"))
        );
    }

    #[test]
    fn test_split_command_no_args() {
        assert_eq!(split_command("/info"), Some(("info", "")));
    }

    #[test]
    fn test_split_command_ignores_plain_text() {
        assert_eq!(split_command("hello world"), None);
        assert_eq!(split_command(""), None);
        assert_eq!(split_command("/"), None);
    }

    #[test]
    fn test_split_command_trims_surrounding_whitespace() {
        assert_eq!(
            split_command("  /ai gemini what is rust  "),
            Some(("ai", "gemini what is rust"))
        );
    }
}
