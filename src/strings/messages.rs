//! # Messages
//!
//! Contains constant strings and format functions for user-facing replies.
//! The wording is part of the bot's contract with its users; tests compare against it verbatim.

// Shared
pub const DONE: &str = "Done!";
pub const NOT_IN_A_TEAM: &str = "You're not in a team! :goberserk:";
pub const NOT_IN_A_TEAM_TO_CHANGE: &str = "I would, but you're not in a team...";
pub const SOMETHING_WENT_WRONG: &str = "Sorry, I tried, but something went wrong.";
pub const APOLOGY: &str = "Uhh, sorry, I just experienced an error :goberserk:";

pub fn unknown_user(name: &str) -> String {
    format!("\"{name}\" is not a user I recognise!")
}

pub fn motto_line(motto: Option<&str>) -> String {
    match motto {
        Some(motto) => format!("They say: {motto}"),
        None => "They don't yet have a motto!".to_string(),
    }
}

pub fn team_summary(name: &str, members: &[&str], motto: Option<&str>) -> String {
    let noun = if members.len() == 1 { "member" } else { "members" };
    format!(
        "\"{name}\" has {} {noun}: {}\r\n{}",
        members.len(),
        members.join(", "),
        motto_line(motto)
    )
}

// Create team
pub const NO_PERMISSION_TO_CREATE: &str = "Sorry, you don't have permission to create a team.";
pub const CANNOT_CREATE_USER: &str = "Sorry, I can't create your user account :frowning:";
pub const CANNOT_CREATE_TEAM: &str = "Sorry, I can't create your team :frowning:";
pub const TEAM_EXISTS: &str = "Sorry, but that team already exists!";

pub fn already_a_member(team: &str) -> String {
    format!("You're already a member of {team}!")
}

pub fn welcome_to_team(team: &str) -> String {
    format!("Welcome to team {team}!")
}

// Add member
pub const NO_PERMISSION_TO_ADD: &str =
    "Sorry, you don't have permission to add people to your team.";

pub fn already_in_another_team(username: &str) -> String {
    format!("Sorry, {username} is already in another team and must leave that team first.")
}

// Kick member
pub const NO_PERMISSION_TO_KICK: &str =
    "Sorry, you don't have permission to kick people from your team.";

pub fn not_in_your_team(username: &str) -> String {
    format!("Sorry, I can't because @{username} is not in your team...")
}

// Leave team
pub const NO_PERMISSION_TO_LEAVE: &str = "Sorry, you don't have permission to leave your team.";

pub fn left_team(team: &str) -> String {
    format!("OK, you've been removed from team \"{team}\"")
}

pub fn left_and_deleted_team(team: &str) -> String {
    format!("OK, you've been removed from team \"{team}\" and the team has been deleted.")
}

// Motto
pub const ONLY_MEMBERS_CHANGE_MOTTO: &str = "Sorry, only team members can change the motto.";

pub fn motto_updated(team: &str, motto: &str) -> String {
    format!("So it is! As {team} say: {motto}")
}

// Find teams
pub const NONE_FOUND: &str = "None found.";

pub fn teams_found(total: usize, names: &[&str]) -> String {
    format!("Found {total} teams; here's a few: {}", names.join(", "))
}

// Team info
pub const TEAM_NOT_FOUND: &str = "Sorry, I can't find that team.";
pub const TEAM_LOOKUP_FAILED: &str =
    "Sorry, there was a problem when I tried to look up that team :frowning:";

pub fn empty_team(team: &str) -> String {
    format!("\"{team}\" is an empty team.")
}

pub fn only_member(team: &str, motto: Option<&str>) -> String {
    match motto {
        Some(motto) => format!("You are the only member of \"{team}\" and your motto is: {motto}"),
        None => format!("You are the only member of \"{team}\" and you have not yet set your motto!"),
    }
}

// User info
pub fn not_yet_in_a_team(name: &str) -> String {
    format!("\"{name}\" is not yet a member of a team!")
}

pub fn member_of_team(name: &str, team: &str, motto: Option<&str>) -> String {
    format!("\"{name}\" is a member of team: {team},\r\n{}", motto_line(motto))
}

// Api
pub const API_VISIBLE: &str = "I see her!";

pub fn api_problem(status: u16) -> String {
    format!("I'm sorry, there appears to be a problem; something about \"{status}\"")
}

// Attention
pub const LISTENING: &str = "Yes?";

// Error reporting
pub const ERROR_TITLE: &str = "Hackbot error caught";
pub const ERROR_COLOR: &str = "warning";
