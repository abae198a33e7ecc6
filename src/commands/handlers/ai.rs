//! AI command handler
//!
//! Handles: ai
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use anyhow::Result;
use async_trait::async_trait;
use log::{error, info};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::get_string_option;
use crate::features::ai::{Acknowledger, AiRequest};

/// Handler for /ai: proxy a prompt to one of the configured backends
pub struct AiCommandHandler;

/// Deferred acknowledgment over a slash interaction. Records whether the
/// defer was actually sent so the reply path knows to edit versus respond.
struct InteractionAck<'a> {
    serenity_ctx: &'a Context,
    command: &'a ApplicationCommandInteraction,
    deferred: AtomicBool,
}

#[async_trait]
impl Acknowledger for InteractionAck<'_> {
    async fn defer(&self) -> Result<()> {
        self.command
            .create_interaction_response(&self.serenity_ctx.http, |r| {
                r.kind(InteractionResponseType::DeferredChannelMessageWithSource)
            })
            .await?;
        self.deferred.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl SlashCommandHandler for AiCommandHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["ai"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();

        // Discord enforces required options, but a malformed payload still
        // gets a named notice rather than a generic failure
        let Some(ai_model) = get_string_option(&command.data.options, "ai_model") else {
            return respond_ephemeral(serenity_ctx, command, "❌ Missing required argument: `ai_model`").await;
        };
        let Some(prompt) = get_string_option(&command.data.options, "prompt") else {
            return respond_ephemeral(serenity_ctx, command, "❌ Missing required argument: `prompt`").await;
        };

        let user_id = command.user.id.to_string();
        info!("[{request_id}] /ai command | Model: {ai_model} | User: {user_id}");

        let request = AiRequest {
            user_id,
            selector: ai_model,
            prompt,
        };
        let ack = InteractionAck {
            serenity_ctx,
            command,
            deferred: AtomicBool::new(false),
        };

        let chunks = ctx.dispatcher.handle(&request, &ack).await;

        if ack.deferred.load(Ordering::SeqCst) {
            // In-flight reply: first chunk edits the deferred response, the
            // rest follow up, in sequence order
            let mut rest = chunks.iter();
            if let Some(first) = rest.next() {
                command
                    .edit_original_interaction_response(&serenity_ctx.http, |r| r.content(first))
                    .await?;
            }
            for chunk in rest {
                command
                    .create_followup_message(&serenity_ctx.http, |m| m.content(chunk))
                    .await?;
            }
            info!("[{request_id}] /ai reply sent ({} chunks)", chunks.len());
        } else {
            // Early refusal: one ephemeral notice, nothing was deferred
            let notice = chunks
                .into_iter()
                .next()
                .unwrap_or_else(|| "❌ An error occurred while processing the command.".to_string());
            respond_ephemeral(serenity_ctx, command, &notice).await?;
        }

        Ok(())
    }
}

async fn respond_ephemeral(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    content: &str,
) -> Result<()> {
    command
        .create_interaction_response(&serenity_ctx.http, |r| {
            r.kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|m| m.content(content).ephemeral(true))
        })
        .await
        .map_err(|e| {
            error!("Failed to send ephemeral notice: {e}");
            e.into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_handler_commands() {
        let handler = AiCommandHandler;
        let names = handler.command_names();

        assert!(names.contains(&"ai"));
        assert_eq!(names.len(), 1);
    }
}
