//! # Domain Traits
//!
//! Abstract interfaces for the collaborators of the command layer (Chat, Resource API, Brain, Clock).
//! Allows for pluggable implementations in the Infrastructure layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::envelope::{ApiError, ApiResponse};
use crate::domain::types::{Attachment, ChatUser, IncomingMessage, Team, User};

/// Abstract interface for a Chat Provider (e.g., Matrix, Console)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Reply to the sender of `message`, in the room it came from
    async fn reply(&self, message: &IncomingMessage, content: &str) -> Result<(), String>;

    /// Send a plain message to a named channel (room id or alias)
    async fn send_to_channel(&self, channel: &str, content: &str) -> Result<(), String>;

    /// Look up a chat user by name
    async fn find_user_by_name(&self, name: &str) -> Result<Option<ChatUser>, String>;

    /// Optional rich-message capability. Queried on every use, never assumed.
    fn rich_messages(&self) -> Option<&dyn RichMessaging> {
        None
    }
}

/// Capability of transports that can render structured attachments
#[async_trait]
pub trait RichMessaging: Send + Sync {
    async fn send_attachment(&self, channel: &str, attachment: &Attachment) -> Result<(), String>;
}

/// The remote team/user resource service.
///
/// `requester` arguments are opaque identity strings passed through unchanged.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    async fn check_api(&self) -> Result<ApiResponse, ApiError>;

    async fn create_user(
        &self,
        id: &str,
        name: &str,
        requester: &str,
    ) -> Result<ApiResponse, ApiError>;

    async fn get_user(&self, id: &str) -> Result<ApiResponse<User>, ApiError>;

    async fn create_team(
        &self,
        name: &str,
        member_id: &str,
        requester: &str,
    ) -> Result<ApiResponse, ApiError>;

    async fn get_team(&self, id: &str) -> Result<ApiResponse<Team>, ApiError>;

    async fn find_teams(&self, name_filter: &str) -> Result<ApiResponse<Vec<Team>>, ApiError>;

    async fn add_user_to_team(
        &self,
        team_id: &str,
        user_id: &str,
        requester: &str,
    ) -> Result<ApiResponse, ApiError>;

    async fn remove_team_member(
        &self,
        team_id: &str,
        user_id: &str,
        requester: &str,
    ) -> Result<ApiResponse, ApiError>;

    async fn remove_team(&self, team_id: &str, requester: &str) -> Result<ApiResponse, ApiError>;

    async fn update_motto(
        &self,
        motto: &str,
        team_id: &str,
        requester: &str,
    ) -> Result<ApiResponse, ApiError>;
}

/// Persistent key-value store ("brain")
#[async_trait]
pub trait Brain: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: String) -> anyhow::Result<()>;
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
}

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
