use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::model::application::interaction::Interaction;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::guild::Guild;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use sentinel::command_handler::CommandHandler;
use sentinel::commands::{register_global_commands, register_guild_commands, CommandContext};
use sentinel::core::Config;
use sentinel::features::ai::{BackendRegistry, Dispatcher};
use sentinel::features::audit;
use sentinel::features::rate_limiting::RateGuard;

/// Sweep cadence for the limiter idle-key eviction task
const EVICTION_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

struct Handler {
    command_handler: Arc<CommandHandler>,
    guild_id: Option<GuildId>,
}

impl Handler {
    fn new(command_handler: CommandHandler, guild_id: Option<GuildId>) -> Self {
        Handler {
            command_handler: Arc::new(command_handler),
            guild_id,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        if let Err(e) = self.command_handler.handle_message(&ctx, &msg).await {
            error!("Error handling message: {e:#}");
            if let Err(why) = msg
                .channel_id
                .say(
                    &ctx.http,
                    "Sorry, I encountered an error processing your message.",
                )
                .await
            {
                error!("Failed to send error message: {why}");
            }
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        // Guild commands for development (instant), global for production
        if let Some(guild_id) = self.guild_id {
            info!("🔧 Development mode: Registering commands for guild {guild_id}");
            if let Err(e) = register_guild_commands(&ctx, guild_id).await {
                error!("❌ Failed to register guild slash commands: {e}");
            }
        } else {
            info!("🌍 Production mode: Registering commands globally");
            if let Err(e) = register_global_commands(&ctx).await {
                error!("❌ Failed to register global slash commands: {e}");
            }
        }
    }

    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: bool) {
        if !is_new {
            return;
        }

        info!("🆕 Joined new guild: {} ({})", guild.name, guild.id);
        if let Err(e) = audit::get_or_create_log_channel(&ctx, guild.id).await {
            // Likely a permission gap; the relay will retry per message
            error!("❌ Could not prepare logs channel in {}: {e:#}", guild.name);
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::ApplicationCommand(command) = interaction {
            if let Err(e) = self
                .command_handler
                .handle_slash_command(&ctx, &command)
                .await
            {
                error!(
                    "Error handling slash command '{}': {}",
                    command.data.name, e
                );

                let error_message =
                    "❌ Sorry, I encountered an error processing your command. Please try again.";

                // Edit the deferred response if one exists, otherwise answer fresh
                #[allow(clippy::redundant_pattern_matching)]
                if let Err(_) = command
                    .edit_original_interaction_response(&ctx.http, |response| {
                        response.content(error_message)
                    })
                    .await
                {
                    let _ = command
                        .create_interaction_response(&ctx.http, |response| {
                            response
                                .kind(serenity::model::application::interaction::InteractionResponseType::ChannelMessageWithSource)
                                .interaction_response_data(|message| message.content(error_message))
                        })
                        .await;
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    // The openai crate reads its key from env vars, not from our config.
    // Set both OPENAI_API_KEY and OPENAI_KEY for compatibility.
    if let Some(key) = &config.openai_api_key {
        std::env::set_var("OPENAI_API_KEY", key);
        std::env::set_var("OPENAI_KEY", key);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting Sentinel Discord Bot...");

    let registry = Arc::new(BackendRegistry::from_config(&config));
    for backend in registry.backends() {
        if backend.is_available() {
            info!("✅ {} backend initialized", backend.name());
        } else {
            warn!("⚠️ {} API key not found - backend unavailable", backend.name());
        }
    }

    let rate_guard = Arc::new(RateGuard::from_config(&config));

    // Periodic idle-key sweep so the limiter maps stay bounded
    let eviction_guard = Arc::clone(&rate_guard);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(EVICTION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            eviction_guard.evict_idle();
        }
    });

    let dispatcher = Arc::new(Dispatcher::new(
        Arc::clone(&registry),
        Arc::clone(&rate_guard),
        config.max_chunk_size,
    ));

    let context = Arc::new(CommandContext::new(
        registry,
        dispatcher,
        rate_guard,
        config.clone(),
    ));
    let command_handler = CommandHandler::new(context);

    // Parse guild ID if provided for development mode
    let guild_id = config
        .discord_guild_id
        .as_ref()
        .and_then(|id| id.parse::<u64>().ok())
        .map(GuildId);

    let handler = Handler::new(command_handler, guild_id);

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");
    info!("Gateway intents: {intents:?}");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        error!("This could be due to:");
        error!("  - Invalid bot token");
        error!("  - Network connectivity issues");
        error!("  - Discord API outage");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
