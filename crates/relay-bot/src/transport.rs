//! Telegram transport adapter
//!
//! Implements the pipeline's `ChatTransport` seam on top of teloxide.

use async_trait::async_trait;
use relay_types::{ChatTransport, SendOutcome};
use teloxide::prelude::*;
use teloxide::types::{ChatAction, ChatId, ParseMode};

/// Outbound Telegram transport
#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_text(&self, chat_id: i64, text: &str, markup: bool) -> SendOutcome {
        let mut req = self.bot.send_message(ChatId(chat_id), text);

        // Markdown only for AI replies; notices stay plain so error
        // strings cannot trip the entity parser
        if markup {
            req.parse_mode = Some(ParseMode::Markdown);
        }

        match req.await {
            Ok(_) => SendOutcome::Sent,
            Err(e) => SendOutcome::Failed(e.to_string()),
        }
    }

    async fn send_typing(&self, chat_id: i64) -> SendOutcome {
        match self
            .bot
            .send_chat_action(ChatId(chat_id), ChatAction::Typing)
            .await
        {
            Ok(_) => SendOutcome::Sent,
            Err(e) => SendOutcome::Failed(e.to_string()),
        }
    }
}
