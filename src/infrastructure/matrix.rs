//! # Matrix Service Adapter
//!
//! Implements the `ChatProvider` and `RichMessaging` traits for the Matrix protocol using the
//! `matrix_sdk`, and runs the sync loop that feeds inbound room messages to the bot.
//!
//! Chat users are identified by their full Matrix id (`@bob:example.org`); their chat name is
//! the localpart (`bob`), which is what `@username` commands refer to.

use anyhow::{Context, Result};
use async_trait::async_trait;
use matrix_sdk::{
    Client, RoomMemberships,
    config::SyncSettings,
    room::Room,
    ruma::{
        OwnedRoomId, RoomAliasId, RoomId,
        events::room::{
            member::{MembershipState, StrippedRoomMemberEvent},
            message::{FormattedBody, MessageType, RoomMessageEventContent, SyncRoomMessageEvent},
        },
    },
};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::application::bot::Hackbot;
use crate::domain::config::MatrixConfig;
use crate::domain::traits::{ChatProvider, RichMessaging};
use crate::domain::types::{Attachment, ChatUser, IncomingMessage};
use crate::strings::logs;

#[derive(Clone)]
pub struct MatrixChat {
    client: Client,
}

impl MatrixChat {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Logs in with the configured account.
    pub async fn login(config: &MatrixConfig) -> Result<Self> {
        let client = Client::builder()
            .homeserver_url(&config.homeserver)
            .build()
            .await?;

        let mut login = client
            .matrix_auth()
            .login_username(&config.username, &config.password);
        if let Some(display_name) = &config.display_name {
            login = login.initial_device_display_name(display_name);
        }
        login.send().await?;

        tracing::info!("{}", logs::logged_in(&config.username));
        Ok(Self::new(client))
    }

    /// Resolves a room id (`!abc:server`), a full alias (`#ops:server`) or a bare alias
    /// (`#ops`, completed with our own server name).
    async fn room(&self, channel: &str) -> Result<Room> {
        let room_id: OwnedRoomId = if channel.starts_with('!') {
            RoomId::parse(channel)?
        } else {
            let alias = if channel.contains(':') {
                channel.to_string()
            } else {
                let server = self
                    .client
                    .user_id()
                    .context("Not logged in")?
                    .server_name();
                format!("#{}:{}", channel.trim_start_matches('#'), server)
            };
            let alias = RoomAliasId::parse(&alias)?;
            self.client.resolve_room_alias(&alias).await?.room_id
        };

        self.client
            .get_room(&room_id)
            .with_context(|| format!("Not a member of {channel}"))
    }

    async fn send(&self, channel: &str, content: RoomMessageEventContent) -> Result<()> {
        self.room(channel).await?.send(content).await?;
        Ok(())
    }

    async fn lookup(&self, name: &str) -> Result<Option<ChatUser>> {
        for room in self.client.joined_rooms() {
            for member in room.members(RoomMemberships::JOIN).await? {
                let user_id = member.user_id();
                if user_id.localpart() == name || member.display_name() == Some(name) {
                    return Ok(Some(chat_user(user_id.as_str(), user_id.localpart())));
                }
            }
        }
        Ok(None)
    }

    /// Runs the sync loop, handing every new text message to `bot`. Only returns on failure.
    pub async fn run(&self, bot: Arc<Hackbot>) -> Result<()> {
        let start_time = SystemTime::now();

        self.client
            .add_event_handler(move |ev: SyncRoomMessageEvent, room: Room| {
                let bot = bot.clone();
                async move {
                    let Some(original) = ev.as_original() else {
                        return;
                    };
                    let event_time =
                        UNIX_EPOCH + Duration::from_millis(ev.origin_server_ts().get().into());
                    if event_time < start_time || original.sender == room.own_user_id() {
                        return;
                    }
                    let MessageType::Text(text) = &original.content.msgtype else {
                        return;
                    };

                    tracing::info!("Received message from {}: {}", original.sender, text.body);
                    let user = chat_user(original.sender.as_str(), original.sender.localpart());
                    let message = IncomingMessage::new(user, room.room_id().as_str(), &text.body);
                    let delivery = bot.receive(message).await;
                    tracing::debug!("Message from {} was {:?}", original.sender, delivery);
                }
            });

        self.client
            .add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
                if ev.content.membership == MembershipState::Invite {
                    tracing::info!("{}", logs::invite_received(room.room_id().as_str()));
                    if let Err(e) = room.join().await {
                        tracing::warn!("{}", logs::join_invite_fail(&e.to_string()));
                    }
                }
            });

        tracing::info!("{}", logs::SYNC_LOOP_START);
        self.client
            .sync(SyncSettings::default())
            .await
            .context("Matrix sync loop failed")
    }
}

fn chat_user(id: &str, name: &str) -> ChatUser {
    ChatUser {
        id: id.to_string(),
        name: name.to_string(),
        identity: id.to_string(),
    }
}

/// Matrix has no attachment colours; map the usual names onto hex values.
fn mx_color(color: &str) -> &str {
    match color {
        "good" => "#2eb886",
        "warning" => "#daa038",
        "danger" => "#a30200",
        other => other,
    }
}

fn attachment_html(attachment: &Attachment) -> String {
    let text = FormattedBody::markdown(&attachment.text)
        .map(|formatted| formatted.body)
        .unwrap_or_else(|| attachment.text.clone());
    format!(
        "<strong><font data-mx-color=\"{}\">{}</font></strong><br>{}",
        mx_color(&attachment.color),
        attachment.title,
        text
    )
}

#[async_trait]
impl ChatProvider for MatrixChat {
    async fn reply(&self, message: &IncomingMessage, content: &str) -> Result<(), String> {
        let text = format!("{}: {}", message.user.name, content);
        tracing::info!("Replying in {}: {}", message.room, text);
        self.send(&message.room, RoomMessageEventContent::text_markdown(text))
            .await
            .map_err(|e| e.to_string())
    }

    async fn send_to_channel(&self, channel: &str, content: &str) -> Result<(), String> {
        self.send(channel, RoomMessageEventContent::text_markdown(content))
            .await
            .map_err(|e| e.to_string())
    }

    async fn find_user_by_name(&self, name: &str) -> Result<Option<ChatUser>, String> {
        self.lookup(name).await.map_err(|e| e.to_string())
    }

    fn rich_messages(&self) -> Option<&dyn RichMessaging> {
        Some(self)
    }
}

#[async_trait]
impl RichMessaging for MatrixChat {
    async fn send_attachment(&self, channel: &str, attachment: &Attachment) -> Result<(), String> {
        let content =
            RoomMessageEventContent::notice_html(&attachment.fallback, attachment_html(attachment));
        self.send(channel, content).await.map_err(|e| e.to_string())
    }
}
