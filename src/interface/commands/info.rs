//! # Information Commands
//!
//! Read-only lookups: `find teams like`, `tell me about my team`, `tell me about team`
//! and `tell me about @<username>`.

use anyhow::Result;

use crate::application::router::Request;
use crate::application::utils::slugify;
use crate::domain::envelope::Outcome;
use crate::domain::types::Team;
use crate::interface::commands::find_chat_user;
use crate::strings::messages;

const FOUND_PREVIEW: usize = 3;

pub async fn find_teams(request: Request) -> Result<()> {
    let filter = request.param(0).trim();

    let teams = request
        .services
        .api
        .find_teams(filter)
        .await?
        .into_payload("findTeams")?;
    if teams.is_empty() {
        return request.reply(messages::NONE_FOUND).await;
    }

    let names: Vec<&str> = teams
        .iter()
        .take(FOUND_PREVIEW)
        .map(|t| t.name.as_str())
        .collect();
    request
        .reply(&messages::teams_found(teams.len(), &names))
        .await
}

pub async fn my_team_info(request: Request) -> Result<()> {
    let response = request
        .services
        .api
        .get_user(&request.message.user.id)
        .await?;
    let team = match response.outcome() {
        Outcome::NotFound => None,
        _ => response.into_payload("getUser")?.team,
    };
    let Some(team) = team else {
        return request.reply(messages::NOT_IN_A_TEAM).await;
    };
    request.reply(&summary(&team)).await
}

/// Describes a team looked up by its display name.
pub async fn team_info(request: Request) -> Result<()> {
    let team_id = slugify(request.param(0));

    let response = request.services.api.get_team(&team_id).await?;
    let team = match response.outcome() {
        Outcome::Success => response.into_payload("getTeam")?,
        Outcome::NotFound => return request.reply(messages::TEAM_NOT_FOUND).await,
        _ => return request.reply(messages::TEAM_LOOKUP_FAILED).await,
    };

    let reply = match team.members.as_slice() {
        [] => messages::empty_team(&team.name),
        [only] if only.id == request.message.user.id => {
            messages::only_member(&team.name, team.motto.as_deref())
        }
        _ => summary(&team),
    };
    request.reply(&reply).await
}

pub async fn user_info(request: Request) -> Result<()> {
    let username = request.param(0);
    let Some(target) = find_chat_user(&request, username).await? else {
        return request.reply(&messages::unknown_user(username)).await;
    };

    let response = request.services.api.get_user(&target.id).await?;
    if response.outcome() == Outcome::NotFound {
        return request.reply(&messages::unknown_user(&target.name)).await;
    }

    let reply = match response.into_payload("getUser")?.team {
        None => messages::not_yet_in_a_team(&target.name),
        Some(team) => messages::member_of_team(&target.name, &team.name, team.motto.as_deref()),
    };
    request.reply(&reply).await
}

fn summary(team: &Team) -> String {
    messages::team_summary(&team.name, &team.member_names(), team.motto.as_deref())
}
