//! [`Story`]: an ephemeral image from one user.
//!
//! Real services expire stories after a day; expiry is not modelled here.
//! `viewed` is a single flag, not tracked per viewer.

use serde::{Deserialize, Serialize};

use crate::id::{StoryId, UserId};
use crate::user::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: StoryId,
    pub user_id: UserId,
    pub username: String,
    pub user_avatar: String,
    pub image_url: String,
    pub timestamp: u64,
    #[serde(default)]
    pub viewed: bool,
}

impl Story {
    /// Creates an unviewed story, snapshotting the author's name and avatar.
    pub fn new(id: StoryId, author: &User, image_url: &str, timestamp: u64) -> Self {
        Story {
            id,
            user_id: author.id.clone(),
            username: author.username.clone(),
            user_avatar: author.avatar.clone(),
            image_url: image_url.to_string(),
            timestamp,
            viewed: false,
        }
    }
}
