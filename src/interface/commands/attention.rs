//! # Attention Trigger
//!
//! "OK hackbot" opens the sender's attention window.

use anyhow::Result;

use crate::application::router::Request;
use crate::strings::messages;

/// Heard on every message starting with `OK `; acts only when the rest names this bot.
pub async fn listen(request: Request) -> Result<()> {
    let called = request.param(0).trim();
    if !called.eq_ignore_ascii_case(&request.services.config.bot.name) {
        return Ok(());
    }

    request
        .services
        .attention
        .listen(&request.message.user.id)
        .await?;
    request.reply(messages::LISTENING).await
}
