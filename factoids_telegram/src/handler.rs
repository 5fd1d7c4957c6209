use crate::{Result, TelegramBot};
use factoids_core::InboundMessage;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::{debug, info};

/// Build the engine's view of a Telegram message.
///
/// Messages without text or without a sender (channel posts) yield `None`.
#[must_use]
pub fn inbound_from(msg: &Message) -> Option<InboundMessage> {
    let text = msg.text()?;
    let sender = msg.from.as_ref()?;
    let sender_id = i64::try_from(sender.id.0).ok()?;

    Some(InboundMessage {
        scope_id: msg.chat.id.0,
        sender_id,
        sender_name: sender.username.clone(),
        text: text.to_string(),
    })
}

/// Handle any incoming message. At most one reply is sent.
pub async fn handle_message(bot: TelegramBot, msg: Message) -> Result<()> {
    let chat_id = msg.chat.id.0;
    if !bot.is_allowed(chat_id) {
        debug!("Ignoring message from chat {chat_id} outside allow_from");
        return Ok(());
    }

    let Some(inbound) = inbound_from(&msg) else {
        return Ok(());
    };

    let Some(reply) = bot.engine.handle(&inbound).await else {
        return Ok(());
    };

    info!("[chat {chat_id}] Reply: {}", reply.text);

    let request = bot.bot.send_message(msg.chat.id, reply.text);
    if reply.rich_text {
        request.parse_mode(ParseMode::Html).await?;
    } else {
        request.await?;
    }

    Ok(())
}
