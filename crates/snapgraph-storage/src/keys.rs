//! Stable key names for the persisted state.
//!
//! These strings are part of the durable layout: renaming one orphans the
//! data stored under the old name.

use std::fmt;

/// One independently persisted piece of store state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    Users,
    Posts,
    Stories,
    Notifications,
    CurrentUser,
    DarkMode,
}

impl StateKey {
    /// Every key, in the order a full flush writes them.
    pub const ALL: [StateKey; 6] = [
        StateKey::Users,
        StateKey::Posts,
        StateKey::Stories,
        StateKey::Notifications,
        StateKey::CurrentUser,
        StateKey::DarkMode,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StateKey::Users => "users",
            StateKey::Posts => "posts",
            StateKey::Stories => "stories",
            StateKey::Notifications => "notifications",
            StateKey::CurrentUser => "currentUser",
            StateKey::DarkMode => "darkMode",
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
