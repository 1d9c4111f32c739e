//! [`Notification`]: an activity entry addressed to one user.

use serde::{Deserialize, Serialize};

use crate::id::{NotificationId, PostId, UserId};
use crate::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Like,
    Comment,
    Follow,
    Mention,
}

impl NotificationKind {
    /// Display text shown after the source username.
    pub fn default_message(self) -> &'static str {
        match self {
            NotificationKind::Like => "liked your post.",
            NotificationKind::Comment => "commented on your post.",
            NotificationKind::Follow => "started following you.",
            NotificationKind::Mention => "mentioned you.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// User the notification is addressed to.
    pub recipient_id: UserId,
    pub from_user_id: UserId,
    pub from_username: String,
    pub from_user_avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<PostId>,
    pub message: String,
    pub timestamp: u64,
    #[serde(default)]
    pub read: bool,
}

impl Notification {
    /// Creates an unread notification from `source` to `recipient`.
    pub fn new(
        id: NotificationId,
        kind: NotificationKind,
        recipient: UserId,
        source: &User,
        post_id: Option<PostId>,
        message: String,
        timestamp: u64,
    ) -> Self {
        Notification {
            id,
            kind,
            recipient_id: recipient,
            from_user_id: source.id.clone(),
            from_username: source.username.clone(),
            from_user_avatar: source.avatar.clone(),
            post_id,
            message,
            timestamp,
            read: false,
        }
    }
}
