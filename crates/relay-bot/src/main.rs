//! Relay bot for Telegram
//!
//! Forwards user text messages to the DeepSeek completion API and
//! relays the generated reply back to the chat. Every message runs
//! through the same pipeline: rate limit, validation, language
//! detection, prompt construction, completion call, delivery.

mod config;
mod dispatch;
mod handlers;
mod health;
mod language;
mod pipeline;
mod prompt;
mod ratelimit;
mod session;
mod transport;
mod validate;

use anyhow::Result;
use chrono::Duration;
use clap::Parser;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::Message;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::dispatch::ResponseDispatcher;
use crate::handlers::AppContext;
use crate::pipeline::MessagePipeline;
use crate::session::SessionStore;
use crate::transport::TelegramTransport;
use llm_deepseek::DeepSeekClient;

/// Relay Bot CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/relay-bot.toml")]
    config: String,

    /// Telegram bot token (overrides config file)
    #[arg(long, env = "TELEGRAM_BOT_TOKEN")]
    bot_token: Option<String>,

    /// DeepSeek API key (overrides config file)
    #[arg(long, env = "DEEPSEEK_API_KEY")]
    api_key: Option<String>,

    /// Health check server port
    #[arg(long, env = "HEALTH_CHECK_PORT", default_value = "3000")]
    health_port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relay_bot=debug,llm_deepseek=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting relay bot");

    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration; missing secrets are fatal here, before any
    // connection is attempted. CLI/env secrets override the file and
    // are sufficient on their own when no file exists.
    let config = if std::path::Path::new(&args.config).exists() {
        info!("Loading config from file: {}", args.config);
        let mut config = Config::from_file(&args.config)?;
        if let Some(bot_token) = args.bot_token {
            config.telegram.bot_token = bot_token;
        }
        if let Some(api_key) = args.api_key {
            config.llm.api_key = api_key;
        }
        config
    } else {
        info!("Config file not found, using CLI/environment secrets");
        Config::from_secrets(args.bot_token, args.api_key)?
    };

    info!("Configuration loaded successfully");
    info!("Model: {}", config.llm.model);

    // Build the completion client
    let completion = Arc::new(DeepSeekClient::new(config.llm.to_deepseek_config())?);

    // Create Telegram bot
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram.bot_token);

    // Verify bot token
    let bot_username = match bot.get_me().await {
        Ok(me) => {
            let username = me.username().to_string();
            info!("Bot authenticated as: @{}", username);
            Some(username)
        }
        Err(e) => {
            error!("Failed to authenticate bot: {}", e);
            return Err(e.into());
        }
    };

    // Start health check server
    let health_state = health::AppState::new(bot_username);
    let health_state_clone = health_state.clone();
    let health_port = args.health_port;
    tokio::spawn(async move {
        if let Err(e) = health::start_health_server(health_state_clone, health_port).await {
            error!("Health check server error: {}", e);
        }
    });

    // Wire up the pipeline
    let store = SessionStore::new();
    let dispatcher = ResponseDispatcher::new(Arc::new(TelegramTransport::new(bot.clone())));
    let pipeline = MessagePipeline::new(
        store.clone(),
        dispatcher.clone(),
        completion,
        Duration::seconds(config.limits.min_message_interval_secs as i64),
        config.limits.reply_preview_chars,
    );

    let ctx = AppContext {
        pipeline,
        dispatcher,
        store,
    };

    info!("Bot initialized, starting message dispatcher...");

    // Setup dispatcher with the handler tree: commands first, then
    // plain text into the pipeline
    let handler = Update::filter_message()
        .branch(
            dptree::filter(|msg: Message| {
                msg.text().map(|t| t.starts_with('/')).unwrap_or(false)
            })
            .endpoint(handlers::handle_command),
        )
        .branch(
            dptree::filter(|msg: Message| msg.text().is_some())
                .endpoint(handlers::handle_text_message),
        );

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![ctx, health_state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Relay bot stopped");
    Ok(())
}
