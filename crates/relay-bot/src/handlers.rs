//! Message handlers for Telegram updates

use relay_types::{IncomingMessage, PipelineResult};
use teloxide::prelude::*;
use teloxide::types::Message;
use tracing::{debug, info, warn};

use crate::dispatch::ResponseDispatcher;
use crate::health::AppState;
use crate::pipeline::MessagePipeline;
use crate::session::SessionStore;

const START_TEXT: &str = "Hi! I'm an AI assistant powered by DeepSeek. 🤖\n\
    Ask me any question and I'll help you with an intelligent response.";

const HELP_TEXT: &str = "🤖 AI Bot Commands\n\n\
    /start - Start the bot\n\
    /help - Show this help message\n\
    /role <label> - Set the persona I answer as (no label clears it)\n\n\
    Just send me any text message and I'll respond with an AI-powered answer!";

/// Shared handler dependencies
#[derive(Clone)]
pub struct AppContext {
    pub pipeline: MessagePipeline,
    pub dispatcher: ResponseDispatcher,
    pub store: SessionStore,
}

/// Handle text messages
pub async fn handle_text_message(
    _bot: Bot,
    msg: Message,
    ctx: AppContext,
    health: AppState,
) -> ResponseResult<()> {
    let text = msg.text().unwrap_or_default();

    debug!("Received text message: {}", text);
    health.increment_messages_received().await;

    let Some(from) = msg.from.as_ref() else {
        warn!("Text message without a sender, ignoring");
        return Ok(());
    };

    let incoming = IncomingMessage {
        chat_id: msg.chat.id.0,
        user_id: from.id.0 as i64,
        user_display_name: from.first_name.clone(),
        text: text.to_string(),
    };

    match ctx.pipeline.process(&incoming).await {
        PipelineResult::Delivered(_) => health.increment_replies_delivered().await,
        PipelineResult::Rejected(reason) => {
            debug!(%reason, "Message rejected");
            health.increment_rejections().await;
        }
        PipelineResult::Failed(_) => health.increment_completion_errors().await,
    }

    health.set_active_sessions(ctx.store.active_sessions().await).await;

    Ok(())
}

/// Handle commands. Thin and stateless; commands bypass the pipeline.
pub async fn handle_command(msg: Message, ctx: AppContext, health: AppState) -> ResponseResult<()> {
    let text = msg.text().unwrap_or_default();
    health.increment_messages_received().await;

    let Some((command, args)) = parse_command(text) else {
        return Ok(());
    };

    info!("Received command: {} with {} args", command, args.len());
    health.increment_commands().await;

    let chat_id = msg.chat.id.0;

    match command.as_str() {
        "start" => {
            ctx.dispatcher.send_notice(chat_id, START_TEXT).await;
        }
        "help" => {
            ctx.dispatcher.send_notice(chat_id, HELP_TEXT).await;
        }
        "role" => {
            let Some(from) = msg.from.as_ref() else {
                return Ok(());
            };
            let user_id = from.id.0 as i64;

            if args.is_empty() {
                ctx.store.set_role(user_id, None).await;
                ctx.dispatcher
                    .send_notice(chat_id, "Persona cleared. I'll answer as myself again.")
                    .await;
            } else {
                let role = args.join(" ");
                let confirmation = format!("Got it, I'll answer as: {}", role);
                ctx.store.set_role(user_id, Some(role)).await;
                ctx.dispatcher.send_notice(chat_id, &confirmation).await;
            }
        }
        _ => {
            ctx.dispatcher
                .send_notice(chat_id, "Unknown command. Use /help to see available commands.")
                .await;
        }
    }

    Ok(())
}

/// Split leading-slash text into a lowercased command name and its
/// arguments
fn parse_command(text: &str) -> Option<(String, Vec<&str>)> {
    let mut parts = text.split_whitespace();
    let head = parts.next()?;
    let command = head.strip_prefix('/')?.to_lowercase();
    Some((command, parts.collect()))
}

#[cfg(test)]
mod tests {
    use super::parse_command;

    #[test]
    fn test_parse_bare_command() {
        assert_eq!(parse_command("/start"), Some(("start".to_string(), vec![])));
    }

    #[test]
    fn test_parse_command_with_args() {
        assert_eq!(
            parse_command("/role pirate captain"),
            Some(("role".to_string(), vec!["pirate", "captain"]))
        );
    }

    #[test]
    fn test_command_name_is_lowercased() {
        assert_eq!(parse_command("/HELP"), Some(("help".to_string(), vec![])));
    }

    #[test]
    fn test_non_command_text_is_rejected() {
        assert_eq!(parse_command("hello there"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   "), None);
    }
}
