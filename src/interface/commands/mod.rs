//! # Command Handlers
//!
//! Contains the handler functions for each supported chat command (e.g. `create team`,
//! `leave my team`). These handlers are registered with the Router in a fixed order by
//! [`register_all`]. Each handler sends at most one reply; failures bubble up to the
//! error reporter.

pub mod api;
pub mod attention;
pub mod info;
pub mod members;
pub mod team;

use anyhow::{Result, anyhow};

use crate::application::router::{CommandRouter, Request};
use crate::domain::envelope::Outcome;
use crate::domain::types::{ChatUser, Team};

/// Registers every command. Order matters: the first matching pattern wins.
pub fn register_all(router: &mut CommandRouter) -> Result<()> {
    router.hear(r"(?i)^OK (.+)$", attention::listen)?;
    router.respond(r"(?i)can you see the api\??", api::check_api)?;
    router.respond(r"(?i)create team (.*)", team::create_team)?;
    router.respond(r"add @([a-z0-9.\-_]+)\s+to my team", members::add_member)?;
    router.respond(r"kick @([a-z0-9.\-_]+)\s+from my team", members::kick_member)?;
    router.respond(r"(?i)leave my team", team::leave_team)?;
    router.respond(r"(?i)our motto is (.*)", team::update_motto)?;
    router.respond(r"(?i)find teams like (.*)", info::find_teams)?;
    router.respond(r"(?i)tell me about my team", info::my_team_info)?;
    router.respond(r"(?i)tell me about team (.*)", info::team_info)?;
    router.respond(r"(?i)tell me about @([a-z0-9.\-_]+)", info::user_info)?;
    Ok(())
}

/// The requester's team. `None` when the API does not know them or they are in no team.
async fn current_team(request: &Request) -> Result<Option<Team>> {
    let response = request
        .services
        .api
        .get_user(&request.message.user.id)
        .await?;
    if response.outcome() == Outcome::NotFound {
        return Ok(None);
    }
    Ok(response.into_payload("getUser")?.team)
}

/// Looks a chat user up by name through the transport.
async fn find_chat_user(request: &Request, name: &str) -> Result<Option<ChatUser>> {
    request
        .services
        .chat
        .find_user_by_name(name)
        .await
        .map_err(|e| anyhow!(e))
}
