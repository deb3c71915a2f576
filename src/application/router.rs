//! # Command Router
//!
//! Routes incoming messages to the appropriate command handler (in `interface/commands`).
//! Listeners are kept in registration order and the first matching pattern wins.
//! `respond` listeners only see messages addressed to the bot (with the address stripped),
//! `hear` listeners see the raw text.

use anyhow::{Result, anyhow};
use futures::FutureExt;
use futures::future::BoxFuture;
use regex::Regex;
use std::future::Future;
use std::sync::Arc;

use crate::application::services::Services;
use crate::domain::types::IncomingMessage;

pub type Handler = Arc<dyn Fn(Request) -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// What a handler receives: the shared services, the message and the pattern's captures.
pub struct Request {
    pub services: Arc<Services>,
    pub message: IncomingMessage,
    pub params: Vec<String>,
}

impl Request {
    /// Capture group `index` (0-based, excluding the whole match). Empty if the group did not take part.
    pub fn param(&self, index: usize) -> &str {
        self.params.get(index).map(String::as_str).unwrap_or_default()
    }

    pub async fn reply(&self, content: &str) -> Result<()> {
        self.services
            .chat
            .reply(&self.message, content)
            .await
            .map_err(|e| anyhow!(e))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Handled,
    Unhandled,
}

struct Listener {
    pattern: Regex,
    addressed: bool,
    handler: Handler,
}

pub struct CommandRouter {
    name: String,
    address: Regex,
    listeners: Vec<Listener>,
}

impl CommandRouter {
    pub fn new(name: &str, alias: Option<&str>) -> Result<Self> {
        let mut names = vec![regex::escape(name)];
        if let Some(alias) = alias {
            names.push(regex::escape(alias));
        }
        let address = Regex::new(&format!(r"(?i)^\s*@?(?:{})[:,]?\s*", names.join("|")))?;

        Ok(Self {
            name: name.to_string(),
            address,
            listeners: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a listener for messages addressed to the bot. The pattern is anchored
    /// at the start of the text that follows the address.
    pub fn respond<F, Fut>(&mut self, pattern: &str, handler: F) -> Result<()>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let pattern = Regex::new(&format!("^(?:{pattern})"))?;
        self.register(pattern, true, handler);
        Ok(())
    }

    /// Registers a listener for any message, addressed or not.
    pub fn hear<F, Fut>(&mut self, pattern: &str, handler: F) -> Result<()>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let pattern = Regex::new(pattern)?;
        self.register(pattern, false, handler);
        Ok(())
    }

    fn register<F, Fut>(&mut self, pattern: Regex, addressed: bool, handler: F)
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let handler: Handler = Arc::new(move |request| handler(request).boxed());
        self.listeners.push(Listener {
            pattern,
            addressed,
            handler,
        });
    }

    /// Text after the bot's address, if the message is addressed to it.
    pub fn strip_address<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.address.find(text).map(|m| &text[m.end()..])
    }

    /// Runs the first listener matching `message`. Handler failures are returned to the caller.
    pub async fn dispatch(
        &self,
        services: &Arc<Services>,
        message: &IncomingMessage,
    ) -> Result<Dispatch> {
        let addressed = self.strip_address(&message.text);

        for listener in &self.listeners {
            let text = if listener.addressed {
                match addressed {
                    Some(text) => text,
                    None => continue,
                }
            } else {
                message.text.as_str()
            };

            let Some(captures) = listener.pattern.captures(text) else {
                continue;
            };
            let params: Vec<String> = captures
                .iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect();

            tracing::info!(
                "Router dispatching pattern='{}' params={:?} sender='{}'",
                listener.pattern.as_str(),
                params,
                message.user.id
            );

            (listener.handler)(Request {
                services: services.clone(),
                message: message.clone(),
                params,
            })
            .await?;
            return Ok(Dispatch::Handled);
        }

        Ok(Dispatch::Unhandled)
    }
}
