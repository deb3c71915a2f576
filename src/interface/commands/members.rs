//! # Membership Commands
//!
//! `add @<username> to my team` and `kick @<username> from my team`.

use anyhow::Result;

use crate::application::router::Request;
use crate::domain::envelope::Outcome;
use crate::interface::commands::{current_team, find_chat_user};
use crate::strings::messages;

/// Adds another chat user to the requester's team, registering them with the API first if needed.
pub async fn add_member(request: Request) -> Result<()> {
    let username = request.param(0);
    let requester = &request.message.user;
    let api = &request.services.api;

    let Some(team) = current_team(&request).await? else {
        return request.reply(messages::NOT_IN_A_TEAM_TO_CHANGE).await;
    };
    let Some(target) = find_chat_user(&request, username).await? else {
        return request.reply(&messages::unknown_user(username)).await;
    };

    let existing = api.get_user(&target.id).await?;
    match existing.outcome() {
        Outcome::Success => {}
        Outcome::NotFound => {
            let created = api
                .create_user(&target.id, username, &requester.identity)
                .await?;
            if !created.ok {
                tracing::warn!(
                    "createUser for {} returned {}; adding to team anyway",
                    target.id,
                    created.status_code
                );
            }
        }
        _ => return Err(existing.unexpected("getUser").into()),
    }

    let added = api
        .add_user_to_team(&team.id, &target.id, &requester.identity)
        .await?;
    let reply = match added.outcome() {
        Outcome::Success => messages::DONE.to_string(),
        Outcome::BadRequest => messages::already_in_another_team(username),
        Outcome::Forbidden => messages::NO_PERMISSION_TO_ADD.to_string(),
        _ => return Err(added.unexpected("addUserToTeam").into()),
    };
    request.reply(&reply).await
}

pub async fn kick_member(request: Request) -> Result<()> {
    let username = request.param(0);
    let requester = &request.message.user;

    let Some(team) = current_team(&request).await? else {
        return request.reply(messages::NOT_IN_A_TEAM_TO_CHANGE).await;
    };
    let Some(target) = find_chat_user(&request, username).await? else {
        return request.reply(&messages::unknown_user(username)).await;
    };

    let removed = request
        .services
        .api
        .remove_team_member(&team.id, &target.id, &requester.identity)
        .await?;
    let reply = match removed.outcome() {
        Outcome::Success => messages::DONE.to_string(),
        Outcome::BadRequest => messages::not_in_your_team(username),
        Outcome::Forbidden => messages::NO_PERMISSION_TO_KICK.to_string(),
        _ => messages::SOMETHING_WENT_WRONG.to_string(),
    };
    request.reply(&reply).await
}
