//! # Hackbot
//!
//! Ties the router, the attention window and the error reporter together.
//! Every inbound message goes through [`Hackbot::receive`]: the router gets first pick,
//! unmatched messages are offered to the attention window, and any handler failure is
//! handed to the reporter instead of escaping to the transport.

use anyhow::Result;
use std::sync::Arc;

use crate::application::attention::{Attention, AttentionWindow};
use crate::application::reporter::ErrorReporter;
use crate::application::router::{CommandRouter, Dispatch};
use crate::application::services::Services;
use crate::domain::config::AppConfig;
use crate::domain::traits::{Brain, ChatProvider, Clock, ResourceClient};
use crate::domain::types::IncomingMessage;
use crate::interface::commands;

/// What happened to an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// A listener matched (whether or not it succeeded)
    Handled,
    /// Unmatched, but the sender was in their attention window so it was re-dispatched as addressed
    Redispatched,
    /// Unmatched and the sender's attention window had expired
    Dropped,
    /// Nothing wanted it
    Unhandled,
}

pub struct Hackbot {
    router: CommandRouter,
    services: Arc<Services>,
    reporter: ErrorReporter,
}

impl Hackbot {
    pub fn new(router: CommandRouter, services: Arc<Services>, reporter: ErrorReporter) -> Self {
        Self {
            router,
            services,
            reporter,
        }
    }

    /// Wires the standard command set around the given collaborators.
    pub fn build(
        config: Arc<AppConfig>,
        chat: Arc<dyn ChatProvider>,
        api: Arc<dyn ResourceClient>,
        brain: Arc<dyn Brain>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let mut router = CommandRouter::new(&config.bot.name, config.bot.alias.as_deref())?;
        commands::register_all(&mut router)?;

        let reporter = ErrorReporter::new(chat.clone(), config.errors.channel.clone());
        let attention = AttentionWindow::new(brain, clock, config.bot.attention_seconds);
        let services = Arc::new(Services {
            config,
            chat,
            api,
            attention,
        });

        Ok(Self::new(router, services, reporter))
    }

    #[cfg(test)]
    pub fn services(&self) -> &Arc<Services> {
        &self.services
    }

    pub async fn receive(&self, message: IncomingMessage) -> Delivery {
        match self.dispatch(&message).await {
            Dispatch::Handled => Delivery::Handled,
            Dispatch::Unhandled => self.catch_all(&message).await,
        }
    }

    /// Router dispatch behind the error boundary. A failed handler still counts as handled.
    async fn dispatch(&self, message: &IncomingMessage) -> Dispatch {
        match self.router.dispatch(&self.services, message).await {
            Ok(dispatch) => dispatch,
            Err(e) => {
                self.reporter.report(&e, Some(message)).await;
                Dispatch::Handled
            }
        }
    }

    async fn catch_all(&self, message: &IncomingMessage) -> Delivery {
        let user_id = &message.user.id;
        let attention = match self.services.attention.consume(user_id).await {
            Ok(attention) => attention,
            Err(e) => {
                self.reporter.report(&e, None).await;
                return Delivery::Unhandled;
            }
        };

        match attention {
            Attention::Idle => Delivery::Unhandled,
            Attention::Expired { expired_at } => {
                tracing::debug!(
                    "Dropping message from {}: attention expired at {}",
                    user_id,
                    expired_at
                );
                Delivery::Dropped
            }
            Attention::Listening { .. } => {
                let addressed = message.addressed_to(self.router.name());
                self.dispatch(&addressed).await;

                if let Err(e) = self.services.attention.listen(user_id).await {
                    self.reporter.report(&e, None).await;
                }
                Delivery::Redispatched
            }
        }
    }
}
