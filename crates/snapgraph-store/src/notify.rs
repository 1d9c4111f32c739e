//! Notification fan-out.

use indexmap::IndexSet;

use snapgraph_core::{
    extract_mentions, Notification, NotificationId, NotificationKind, PostId, User,
    UserDirectory, UserId,
};

/// Prepends a notification unless `source` is the recipient. Likes and
/// follows are not repeated while an identical one is still unread.
pub(crate) fn push(
    notifications: &mut Vec<Notification>,
    kind: NotificationKind,
    recipient: &UserId,
    source: &User,
    post: Option<&PostId>,
    message: String,
    now: u64,
) -> bool {
    if recipient == &source.id {
        return false;
    }
    if matches!(kind, NotificationKind::Like | NotificationKind::Follow)
        && notifications.iter().any(|n| {
            !n.read
                && n.kind == kind
                && &n.recipient_id == recipient
                && n.from_user_id == source.id
                && n.post_id.as_ref() == post
        })
    {
        return false;
    }
    notifications.insert(
        0,
        Notification::new(
            NotificationId::generate(),
            kind,
            recipient.clone(),
            source,
            post.cloned(),
            message,
            now,
        ),
    );
    true
}

/// Sends a `mention` notification to every distinct user named in `text`.
/// Unknown usernames and self-mentions are ignored. Returns how many were
/// sent.
pub(crate) fn mentions(
    notifications: &mut Vec<Notification>,
    users: &UserDirectory,
    source: &User,
    post: &PostId,
    text: &str,
    now: u64,
) -> usize {
    let named: IndexSet<String> = extract_mentions(text).into_iter().collect();
    let mut sent = 0;
    for username in named {
        let Some(recipient) = users.by_username(&username) else {
            continue;
        };
        if push(
            notifications,
            NotificationKind::Mention,
            &recipient.id,
            source,
            Some(post),
            NotificationKind::Mention.default_message().to_string(),
            now,
        ) {
            sent += 1;
        }
    }
    sent
}
