//! Stable ID newtypes for store entities.
//!
//! All IDs are distinct newtype wrappers over `String`, so a `PostId` cannot
//! be passed where a `UserId` is expected. Seed data uses short literal ids
//! (`user1`, `post1`); everything created at runtime gets a UUID v4.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Allocates a fresh random identifier.
            pub fn generate() -> Self {
                $name(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(s)
            }
        }
    };
}

string_id!(
    /// Stable user identifier.
    UserId
);
string_id!(
    /// Post identifier.
    PostId
);
string_id!(
    /// Comment identifier, unique within its post.
    CommentId
);
string_id!(
    /// Story identifier.
    StoryId
);
string_id!(
    /// Notification identifier.
    NotificationId
);
