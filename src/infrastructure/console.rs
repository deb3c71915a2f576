//! # Console Adapter
//!
//! A local transport for trying the bot without a chat server: each stdin line is a message
//! from one fixed user, and everything the bot sends is printed to stdout.
//!
//! The console has no user directory, so any `@username` resolves to a user of that name.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::bot::Hackbot;
use crate::domain::traits::ChatProvider;
use crate::domain::types::{ChatUser, IncomingMessage};
use crate::strings::logs;

pub const ROOM: &str = "console";

#[derive(Debug, Default, Clone)]
pub struct ConsoleChat;

impl ConsoleChat {
    /// Reads stdin until EOF, delivering each non-empty line as a message from `user`.
    pub async fn run(&self, bot: Arc<Hackbot>, user: &str) -> Result<()> {
        println!("{}", logs::CONSOLE_START);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            let delivery = bot
                .receive(IncomingMessage::new(ChatUser::named(user), ROOM, text))
                .await;
            tracing::debug!("Console message was {:?}", delivery);
        }
        Ok(())
    }
}

#[async_trait]
impl ChatProvider for ConsoleChat {
    async fn reply(&self, message: &IncomingMessage, content: &str) -> Result<(), String> {
        println!("{}: {}", message.user.name, content);
        Ok(())
    }

    async fn send_to_channel(&self, channel: &str, content: &str) -> Result<(), String> {
        println!("[{channel}] {content}");
        Ok(())
    }

    async fn find_user_by_name(&self, name: &str) -> Result<Option<ChatUser>, String> {
        Ok(Some(ChatUser::named(name)))
    }
}
