//! Info command handler
//!
//! Handles: info
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;
use serenity::builder::CreateEmbed;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;

const INFO_COLOR: u32 = 0x00ff00;

/// Handler for /info: backend availability, rate limits, guild count
pub struct InfoHandler;

#[async_trait]
impl SlashCommandHandler for InfoHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["info"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let embed = build_info_embed(&ctx, serenity_ctx.cache.guild_count());

        command
            .create_interaction_response(&serenity_ctx.http, |r| {
                r.kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|m| m.set_embed(embed))
            })
            .await?;
        Ok(())
    }
}

fn build_info_embed(ctx: &CommandContext, guild_count: usize) -> CreateEmbed {
    // Stable display order: selectors are sorted
    let ai_status: Vec<String> = ctx
        .registry
        .selectors()
        .iter()
        .filter_map(|selector| ctx.registry.resolve(selector))
        .map(|backend| {
            let mark = if backend.is_available() { "✅" } else { "❌" };
            format!("{mark} {}", backend.name())
        })
        .collect();

    let uptime_secs = ctx.start_time.elapsed().as_secs();
    let uptime = format!(
        "{}h {}m {}s",
        uptime_secs / 3600,
        (uptime_secs % 3600) / 60,
        uptime_secs % 60
    );

    let mut embed = CreateEmbed::default();
    embed
        .title("🤖 Bot Information")
        .description("Discord bot with message auditing and AI integration")
        .color(INFO_COLOR)
        .field("AI Services", ai_status.join("\n"), true)
        .field("Servers", guild_count.to_string(), true)
        .field("Uptime", uptime, true)
        .field(
            "Rate Limits",
            format!(
                "Messages: {}/{}s\nAI Requests: {}/{}s",
                ctx.config.flood_limit,
                ctx.config.flood_window_secs,
                ctx.config.ai_limit,
                ctx.config.ai_window_secs
            ),
            false,
        );
    embed
}
