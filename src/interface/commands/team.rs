//! # Team Commands
//!
//! `create team <name>`, `leave my team` and `our motto is <motto>`.

use anyhow::Result;

use crate::application::router::Request;
use crate::domain::envelope::Outcome;
use crate::interface::commands::current_team;
use crate::strings::messages;

/// Creates the requester's user record if needed, then a team with them as sole member.
pub async fn create_team(request: Request) -> Result<()> {
    let team_name = request.param(0).trim();
    let requester = &request.message.user;
    let api = &request.services.api;

    let response = api.get_user(&requester.id).await?;
    match response.outcome() {
        Outcome::NotFound => {
            let created = api
                .create_user(&requester.id, &requester.name, &requester.identity)
                .await?;
            match created.outcome() {
                Outcome::Success => {}
                Outcome::Forbidden => {
                    return request.reply(messages::NO_PERMISSION_TO_CREATE).await;
                }
                _ => return request.reply(messages::CANNOT_CREATE_USER).await,
            }
        }
        _ => {
            if let Some(team) = response.into_payload("getUser")?.team {
                return request.reply(&messages::already_a_member(&team.name)).await;
            }
        }
    }

    let reply = match api
        .create_team(team_name, &requester.id, &requester.identity)
        .await?
        .outcome()
    {
        Outcome::Success => messages::welcome_to_team(team_name),
        Outcome::Forbidden => messages::NO_PERMISSION_TO_CREATE.to_string(),
        Outcome::Conflict => messages::TEAM_EXISTS.to_string(),
        _ => messages::CANNOT_CREATE_TEAM.to_string(),
    };
    request.reply(&reply).await
}

/// Removes the requester from their team, and deletes the team when they were its last member.
pub async fn leave_team(request: Request) -> Result<()> {
    let requester = &request.message.user;
    let api = &request.services.api;

    let response = api.get_user(&requester.id).await?;
    let team = if response.ok {
        response.payload.and_then(|user| user.team)
    } else {
        None
    };
    let Some(team) = team else {
        return request.reply(messages::NOT_IN_A_TEAM).await;
    };

    let removed = api
        .remove_team_member(&team.id, &requester.id, &requester.identity)
        .await?;
    match removed.outcome() {
        Outcome::Success => {}
        Outcome::Forbidden => return request.reply(messages::NO_PERMISSION_TO_LEAVE).await,
        _ => return request.reply(messages::SOMETHING_WENT_WRONG).await,
    }

    // Other members keep the team alive; an unknown member list lets the API decide.
    let others_remain = team.members.iter().any(|m| m.id != requester.id);
    if !others_remain && api.remove_team(&team.id, &requester.identity).await?.ok {
        return request
            .reply(&messages::left_and_deleted_team(&team.name))
            .await;
    }
    request.reply(&messages::left_team(&team.name)).await
}

pub async fn update_motto(request: Request) -> Result<()> {
    let motto = request.param(0).trim();
    let requester = &request.message.user;

    let Some(team) = current_team(&request).await? else {
        return request.reply(messages::NOT_IN_A_TEAM).await;
    };

    let updated = request
        .services
        .api
        .update_motto(motto, &team.id, &requester.identity)
        .await?;
    let reply = match updated.outcome() {
        Outcome::Success => messages::motto_updated(&team.name, motto),
        Outcome::Forbidden => messages::ONLY_MEMBERS_CHANGE_MOTTO.to_string(),
        _ => messages::SOMETHING_WENT_WRONG.to_string(),
    };
    request.reply(&reply).await
}
