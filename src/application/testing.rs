//! Recording fakes for the chat, resource API and clock collaborators.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::application::bot::Hackbot;
use crate::domain::config::AppConfig;
use crate::domain::envelope::{ApiError, ApiResponse, CREATED, NO_CONTENT, NOT_FOUND, OK};
use crate::domain::traits::{ChatProvider, Clock, ResourceClient, RichMessaging};
use crate::domain::types::{Attachment, ChatUser, IncomingMessage, Team, TeamMember, User};
use crate::infrastructure::brain::MemoryBrain;

pub const ROOM: &str = "!general:example.org";

pub fn message(user: &str, text: &str) -> IncomingMessage {
    IncomingMessage::new(ChatUser::named(user), ROOM, text)
}

pub fn team(id: &str, name: &str, members: &[&str], motto: Option<&str>) -> Team {
    Team {
        id: id.to_string(),
        name: name.to_string(),
        motto: motto.map(str::to_string),
        members: members
            .iter()
            .map(|m| TeamMember {
                id: m.to_lowercase(),
                name: m.to_string(),
            })
            .collect(),
    }
}

pub fn user(id: &str, team: Option<Team>) -> ApiResponse<User> {
    ApiResponse::success(
        OK,
        User {
            id: id.to_string(),
            name: id.to_string(),
            team,
        },
    )
}

/// Builds a bot around the given fakes with default configuration.
pub fn hackbot(chat: Arc<FakeChat>, api: Arc<FakeApi>, clock: Arc<ManualClock>) -> Hackbot {
    Hackbot::build(
        Arc::new(AppConfig::default()),
        chat,
        api,
        Arc::new(MemoryBrain::default()),
        clock,
    )
    .expect("default router patterns compile")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub operation: &'static str,
    pub args: Vec<String>,
}

/// Scriptable resource client that records every call.
///
/// Unscripted users and teams answer 404; unscripted mutations answer their success code.
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    users: Mutex<HashMap<String, ApiResponse<User>>>,
    teams: Mutex<HashMap<String, ApiResponse<Team>>>,
    found: Mutex<Option<ApiResponse<Vec<Team>>>>,
    statuses: Mutex<HashMap<&'static str, ApiResponse>>,
    failing: Mutex<HashSet<&'static str>>,
}

impl FakeApi {
    pub fn with_user(&self, id: &str, response: ApiResponse<User>) -> &Self {
        self.users.lock().unwrap().insert(id.to_string(), response);
        self
    }

    pub fn with_team(&self, id: &str, response: ApiResponse<Team>) -> &Self {
        self.teams.lock().unwrap().insert(id.to_string(), response);
        self
    }

    pub fn with_found(&self, response: ApiResponse<Vec<Team>>) -> &Self {
        *self.found.lock().unwrap() = Some(response);
        self
    }

    /// Overrides the envelope returned by a body-less operation.
    pub fn respond(&self, operation: &'static str, response: ApiResponse) -> &Self {
        self.statuses.lock().unwrap().insert(operation, response);
        self
    }

    /// Makes `operation` reject instead of returning an envelope.
    pub fn fail(&self, operation: &'static str) -> &Self {
        self.failing.lock().unwrap().insert(operation);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, operation: &str) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|c| c.operation == operation)
            .map(|c| c.args)
            .collect()
    }

    fn record(&self, operation: &'static str, args: &[&str]) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(Call {
            operation,
            args: args.iter().map(|a| a.to_string()).collect(),
        });
        if self.failing.lock().unwrap().contains(operation) {
            let err = serde_json::from_str::<serde_json::Value>("<html>502</html>").unwrap_err();
            return Err(ApiError::Decode(err));
        }
        Ok(())
    }

    fn status(&self, operation: &'static str, success: u16) -> ApiResponse {
        self.statuses
            .lock()
            .unwrap()
            .get(operation)
            .cloned()
            .unwrap_or_else(|| ApiResponse::done(success))
    }
}

#[async_trait]
impl ResourceClient for FakeApi {
    async fn check_api(&self) -> Result<ApiResponse, ApiError> {
        self.record("check_api", &[])?;
        Ok(self.status("check_api", OK))
    }

    async fn create_user(
        &self,
        id: &str,
        name: &str,
        requester: &str,
    ) -> Result<ApiResponse, ApiError> {
        self.record("create_user", &[id, name, requester])?;
        Ok(self.status("create_user", CREATED))
    }

    async fn get_user(&self, id: &str) -> Result<ApiResponse<User>, ApiError> {
        self.record("get_user", &[id])?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or_else(|| ApiResponse::failed(NOT_FOUND)))
    }

    async fn create_team(
        &self,
        name: &str,
        member_id: &str,
        requester: &str,
    ) -> Result<ApiResponse, ApiError> {
        self.record("create_team", &[name, member_id, requester])?;
        Ok(self.status("create_team", CREATED))
    }

    async fn get_team(&self, id: &str) -> Result<ApiResponse<Team>, ApiError> {
        self.record("get_team", &[id])?;
        Ok(self
            .teams
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or_else(|| ApiResponse::failed(NOT_FOUND)))
    }

    async fn find_teams(&self, name_filter: &str) -> Result<ApiResponse<Vec<Team>>, ApiError> {
        self.record("find_teams", &[name_filter])?;
        Ok(self
            .found
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| ApiResponse::success(OK, Vec::new())))
    }

    async fn add_user_to_team(
        &self,
        team_id: &str,
        user_id: &str,
        requester: &str,
    ) -> Result<ApiResponse, ApiError> {
        self.record("add_user_to_team", &[team_id, user_id, requester])?;
        Ok(self.status("add_user_to_team", CREATED))
    }

    async fn remove_team_member(
        &self,
        team_id: &str,
        user_id: &str,
        requester: &str,
    ) -> Result<ApiResponse, ApiError> {
        self.record("remove_team_member", &[team_id, user_id, requester])?;
        Ok(self.status("remove_team_member", NO_CONTENT))
    }

    async fn remove_team(&self, team_id: &str, requester: &str) -> Result<ApiResponse, ApiError> {
        self.record("remove_team", &[team_id, requester])?;
        Ok(self.status("remove_team", NO_CONTENT))
    }

    async fn update_motto(
        &self,
        motto: &str,
        team_id: &str,
        requester: &str,
    ) -> Result<ApiResponse, ApiError> {
        self.record("update_motto", &[motto, team_id, requester])?;
        Ok(self.status("update_motto", NO_CONTENT))
    }
}

/// Chat transport that records everything it is asked to send.
#[derive(Default)]
pub struct FakeChat {
    rich: bool,
    directory: Mutex<HashMap<String, ChatUser>>,
    replies: Mutex<Vec<(String, String)>>,
    channel_messages: Mutex<Vec<(String, String)>>,
    attachments: Mutex<Vec<(String, Attachment)>>,
}

impl FakeChat {
    /// A transport that also supports attachments.
    pub fn rich() -> Self {
        Self {
            rich: true,
            ..Self::default()
        }
    }

    pub fn with_user(self, user: ChatUser) -> Self {
        self.directory
            .lock()
            .unwrap()
            .insert(user.name.clone(), user);
        self
    }

    /// Reply texts, in order.
    pub fn replies(&self) -> Vec<String> {
        self.replies
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }

    /// (recipient, text) pairs, in order.
    pub fn replies_to(&self) -> Vec<(String, String)> {
        self.replies.lock().unwrap().clone()
    }

    pub fn channel_messages(&self) -> Vec<(String, String)> {
        self.channel_messages.lock().unwrap().clone()
    }

    pub fn attachments(&self) -> Vec<(String, Attachment)> {
        self.attachments.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for FakeChat {
    async fn reply(&self, message: &IncomingMessage, content: &str) -> Result<(), String> {
        self.replies
            .lock()
            .unwrap()
            .push((message.user.name.clone(), content.to_string()));
        Ok(())
    }

    async fn send_to_channel(&self, channel: &str, content: &str) -> Result<(), String> {
        self.channel_messages
            .lock()
            .unwrap()
            .push((channel.to_string(), content.to_string()));
        Ok(())
    }

    async fn find_user_by_name(&self, name: &str) -> Result<Option<ChatUser>, String> {
        Ok(self.directory.lock().unwrap().get(name).cloned())
    }

    fn rich_messages(&self) -> Option<&dyn RichMessaging> {
        if self.rich { Some(self) } else { None }
    }
}

#[async_trait]
impl RichMessaging for FakeChat {
    async fn send_attachment(&self, channel: &str, attachment: &Attachment) -> Result<(), String> {
        self.attachments
            .lock()
            .unwrap()
            .push((channel.to_string(), attachment.clone()));
        Ok(())
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            now: Mutex::new(DateTime::<Utc>::from_timestamp(1_717_243_200, 0).unwrap()),
        }
    }
}

impl ManualClock {
    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
