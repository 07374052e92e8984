use crate::{Error, Result, TelegramBot};
use teloxide::payloads::SendMessageSetters;
use teloxide::requests::Requester;
use teloxide::types::{KeyboardButton, KeyboardMarkup, KeyboardRemove, Message, ReplyMarkup};
use tracing::{info, warn};
use vocabot_quiz::{InboundEvent, Reply};

/// Buttons per keyboard row.
const KEYBOARD_COLUMNS: usize = 2;

fn to_event(msg: &Message) -> InboundEvent {
    let user = msg.from.as_ref();
    InboundEvent {
        user_id: user.map(|u| u.id.0),
        chat_id: msg.chat.id.0,
        name: user.map(|u| u.first_name.clone()),
        text: msg.text().unwrap_or_default().to_string(),
    }
}

/// Reply keyboard for the options, or a removal when there are none.
fn reply_markup(options: &[String]) -> ReplyMarkup {
    if options.is_empty() {
        return ReplyMarkup::KeyboardRemove(KeyboardRemove::new());
    }

    let rows: Vec<Vec<KeyboardButton>> = options
        .chunks(KEYBOARD_COLUMNS)
        .map(|row| row.iter().map(KeyboardButton::new).collect())
        .collect();
    ReplyMarkup::Keyboard(KeyboardMarkup::new(rows).resize_keyboard())
}

/// Handle any message (commands, buttons or free text)
pub async fn handle_message(bot: TelegramBot, msg: Message) -> Result<()> {
    let chat_id = msg.chat.id.0;
    if !bot.is_allowed(chat_id) {
        warn!("Ignoring message from chat {chat_id}");
        return Err(Error::Unauthorized(chat_id));
    }

    let event = to_event(&msg);
    let username = msg
        .from
        .as_ref()
        .and_then(|u| u.username.as_deref())
        .unwrap_or("unknown");
    info!("[@{username}] Message: {}", event.text);

    let Reply { text, options } = bot.engine.handle_event(&event).await;

    bot.bot
        .send_message(msg.chat.id, text)
        .reply_markup(reply_markup(&options))
        .await?;

    Ok(())
}
