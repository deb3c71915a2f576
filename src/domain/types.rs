//! # Domain Types
//!
//! Common data structures shared by the router, the workflows and the transports.

/// A chat participant as seen by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatUser {
    /// Platform-scoped, stable identifier (also the id used against the resource API)
    pub id: String,
    /// Display name used in replies and lookups
    pub name: String,
    /// Opaque credential forwarded to mutating API calls
    pub identity: String,
}

impl ChatUser {
    /// A user whose id, name and identity are all the same string.
    pub fn named(name: &str) -> Self {
        Self {
            id: name.to_string(),
            name: name.to_string(),
            identity: name.to_string(),
        }
    }
}

/// An inbound text message, plus everything needed to reply to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub user: ChatUser,
    pub room: String,
    pub text: String,
}

impl IncomingMessage {
    pub fn new(user: ChatUser, room: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            user,
            room: room.into(),
            text: text.into(),
        }
    }

    /// Same message, rewritten as if the sender had addressed `bot_name` explicitly.
    pub fn addressed_to(&self, bot_name: &str) -> Self {
        Self {
            user: self.user.clone(),
            room: self.room.clone(),
            text: format!("{bot_name} {}", self.text),
        }
    }
}

/// A member reference inside a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: String,
    pub name: String,
    /// `None` means no motto was ever set; an empty string is a motto.
    pub motto: Option<String>,
    pub members: Vec<TeamMember>,
}

impl Team {
    pub fn member_names(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub team: Option<Team>,
}

/// Structured diagnostic for transports that can render more than plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub fallback: String,
    pub title: String,
    pub text: String,
    pub color: String,
}
