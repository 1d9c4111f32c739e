pub mod directory;
pub mod error;
pub mod id;
pub mod likes;
pub mod notification;
pub mod post;
pub mod story;
pub mod text;
pub mod time;
pub mod timeline;
pub mod user;

// Re-export commonly used types
pub use directory::UserDirectory;
pub use error::CoreError;
pub use id::{CommentId, NotificationId, PostId, StoryId, UserId};
pub use likes::LikeSet;
pub use notification::{Notification, NotificationKind};
pub use post::{Comment, Post, PostPatch};
pub use story::Story;
pub use text::{extract_hashtags, extract_mentions};
pub use timeline::Timeline;
pub use user::User;
