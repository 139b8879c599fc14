//! teloxide → core type conversion.

use crate::core::{Chat, Message, MessageDirection, ToCoreMessage, ToCoreUser, User};

pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl ToCoreUser for TelegramUserWrapper<'_> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl TelegramMessageWrapper<'_> {
    fn chat_type(&self) -> &'static str {
        let chat = &self.0.chat;
        if chat.is_private() {
            "private"
        } else if chat.is_supergroup() {
            "supergroup"
        } else if chat.is_group() {
            "group"
        } else if chat.is_channel() {
            "channel"
        } else {
            "unknown"
        }
    }
}

impl ToCoreMessage for TelegramMessageWrapper<'_> {
    fn to_core(&self) -> Message {
        let user = self
            .0
            .from
            .as_ref()
            .map(|u| TelegramUserWrapper(u).to_core())
            .unwrap_or(User {
                id: 0,
                username: None,
                first_name: None,
                last_name: None,
            });
        Message {
            id: self.0.id.to_string(),
            user,
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: self.chat_type().to_string(),
            },
            content: self.0.text().unwrap_or_default().to_string(),
            message_type: if self.0.text().is_some() { "text" } else { "other" }.to_string(),
            direction: MessageDirection::Incoming,
            created_at: self.0.date,
            reply_to_message_id: self.0.reply_to_message().map(|m| m.id.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_wrapper_to_core() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(42),
            is_bot: false,
            first_name: "Ada".to_string(),
            last_name: None,
            username: Some("ada".to_string()),
            language_code: None,
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let core_user = TelegramUserWrapper(&user).to_core();
        assert_eq!(core_user.id, 42);
        assert_eq!(core_user.username.as_deref(), Some("ada"));
        assert_eq!(core_user.first_name.as_deref(), Some("Ada"));
        assert_eq!(core_user.last_name, None);
    }
}
