//! # Error Reporter
//!
//! Last stop for anything a command handler (or the attention hook) could not deal with.
//! Apologises to the sender when there is one and always posts a diagnostic to the
//! operations channel, as an attachment when the transport can render one.

use std::sync::Arc;

use crate::domain::traits::ChatProvider;
use crate::domain::types::{Attachment, IncomingMessage};
use crate::strings::{logs, messages};

pub struct ErrorReporter {
    chat: Arc<dyn ChatProvider>,
    channel: String,
}

impl ErrorReporter {
    pub fn new(chat: Arc<dyn ChatProvider>, channel: impl Into<String>) -> Self {
        Self {
            chat,
            channel: channel.into(),
        }
    }

    /// Reports `error`. Delivery failures are logged, never returned.
    pub async fn report(&self, error: &anyhow::Error, origin: Option<&IncomingMessage>) {
        match origin {
            Some(message) => tracing::error!(
                "Error handling '{}' from {}: {:#}",
                message.text,
                message.user.id,
                error
            ),
            None => tracing::error!("Error: {:#}", error),
        }

        if let Some(message) = origin
            && let Err(e) = self.chat.reply(message, messages::APOLOGY).await
        {
            tracing::error!("{}", logs::report_send_fail(&message.user.id, &e));
        }

        let attachment = diagnostic(error, origin);
        let sent = match self.chat.rich_messages() {
            Some(rich) => rich.send_attachment(&self.channel, &attachment).await,
            None => {
                self.chat
                    .send_to_channel(&self.channel, &attachment.fallback)
                    .await
            }
        };
        if let Err(e) = sent {
            tracing::error!("{}", logs::report_send_fail(&self.channel, &e));
        }
    }
}

/// Builds the operations-channel diagnostic for `error`.
pub fn diagnostic(error: &anyhow::Error, origin: Option<&IncomingMessage>) -> Attachment {
    let mut fallback = format!("Error: {error:#}");
    let mut text = format!("```\nError: {error:?}\n```");

    if let Some(message) = origin {
        let from = format!("Error responding to message from @{}", message.user.name);
        fallback = format!("{from}\nCommand: {}\n{fallback}", message.text);
        text = format!("{from}\n```\nCommand: {}\n```\n{text}", message.text);
    }

    Attachment {
        fallback,
        title: messages::ERROR_TITLE.to_string(),
        text,
        color: messages::ERROR_COLOR.to_string(),
    }
}
