//! Integration tests for SocialStore mutations and reads.

use std::cell::Cell;
use std::rc::Rc;

use snapgraph_store::core::{CoreError, NotificationKind, PostId, PostPatch, UserId};
use snapgraph_store::storage::{InMemoryKv, KvStore, StateKey, StorageError};
use snapgraph_store::{RegisterProfile, SocialStore, StoreError};

fn seeded() -> SocialStore<InMemoryKv> {
    SocialStore::open(InMemoryKv::new()).unwrap()
}

fn uid(id: &str) -> UserId {
    UserId::from(id)
}

fn pid(id: &str) -> PostId {
    PostId::from(id)
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[test]
fn open_seeds_and_signs_in_user1() {
    let store = seeded();
    assert_eq!(store.users().len(), 4);
    assert_eq!(store.posts().len(), 3);
    assert_eq!(store.stories().len(), 2);
    assert_eq!(store.current_user().unwrap().id, uid("user1"));
}

#[test]
fn authenticate_by_username() {
    let mut store = seeded();
    let user = store.authenticate("food_lover").unwrap();
    assert_eq!(user.id, uid("user3"));
    assert_eq!(store.current_user().unwrap().id, uid("user3"));

    let err = store.authenticate("nobody").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.current_user().unwrap().id, uid("user3"));
}

#[test]
fn register_creates_and_signs_in() {
    let mut store = seeded();
    let user = store
        .register(RegisterProfile::new("  newbie ", "New Person"))
        .unwrap();
    assert_eq!(user.username, "newbie");
    assert_eq!(user.bio, snapgraph_store::store::DEFAULT_BIO);
    assert_eq!(
        user.avatar,
        "https://api.dicebear.com/7.x/avataaars/svg?seed=newbie"
    );
    assert!(user.followers().is_empty());
    assert!(user.following().is_empty());
    assert_eq!(store.users().len(), 5);
    assert_eq!(store.current_user().unwrap().id, user.id);
}

#[test]
fn register_rejects_blank_and_taken_usernames() {
    let mut store = seeded();
    let err = store.register(RegisterProfile::new("   ", "x")).unwrap_err();
    assert!(err.is_validation());
    let err = store.register(RegisterProfile::new("x", "")).unwrap_err();
    assert!(err.is_validation());
    let err = store
        .register(RegisterProfile::new("food_lover", "Impostor"))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Core(CoreError::UsernameTaken { .. })
    ));
    assert_eq!(store.users().len(), 4);
}

#[test]
fn mutations_require_a_session() {
    let mut store = seeded();
    store.sign_out();
    assert!(store.current_user().is_none());

    let unauth = |r: Result<_, StoreError>| matches!(r, Err(StoreError::Unauthenticated));
    assert!(unauth(store.follow(&uid("user3")).map(|_| ())));
    assert!(unauth(store.unfollow(&uid("user2")).map(|_| ())));
    assert!(unauth(store.create_post("img", "cap", None).map(|_| ())));
    assert!(unauth(
        store
            .update_post(&pid("post1"), PostPatch::caption("x"))
            .map(|_| ())
    ));
    assert!(unauth(store.delete_post(&pid("post1")).map(|_| ())));
    assert!(unauth(store.toggle_like(&pid("post1")).map(|_| ())));
    assert!(unauth(store.add_comment(&pid("post1"), "hi").map(|_| ())));
    assert!(unauth(store.create_story("img").map(|_| ())));
    assert!(unauth(store.mark_all_notifications_read().map(|_| ())));

    assert_eq!(store.posts().len(), 3);
    assert!(store.feed().is_empty());
}

// ---------------------------------------------------------------------------
// Follow graph
// ---------------------------------------------------------------------------

#[test]
fn follow_updates_both_sides_and_notifies() {
    let mut store = seeded();
    assert!(!store.is_following(&uid("user3")));
    assert!(store.follow(&uid("user3")).unwrap());
    assert!(store.is_following(&uid("user3")));

    let user3 = store.user(&uid("user3")).unwrap();
    assert!(user3.followers().contains(&uid("user1")));
    assert!(store.current_user().unwrap().following().contains(&uid("user3")));

    let n = &store.notifications()[0];
    assert_eq!(n.kind, NotificationKind::Follow);
    assert_eq!(n.recipient_id, uid("user3"));
    assert_eq!(n.from_user_id, uid("user1"));
    assert!(!n.read);
}

#[test]
fn follow_is_idempotent() {
    let mut store = seeded();
    assert!(store.follow(&uid("user3")).unwrap());
    assert!(!store.follow(&uid("user3")).unwrap());
    let user3 = store.user(&uid("user3")).unwrap();
    assert_eq!(
        user3.followers().iter().filter(|f| **f == uid("user1")).count(),
        1
    );
    assert_eq!(store.notifications().len(), 1);
}

#[test]
fn self_follow_is_a_no_op() {
    let mut store = seeded();
    let before = store.current_user().unwrap().clone();
    assert!(!store.follow(&uid("user1")).unwrap());
    assert_eq!(store.current_user().unwrap(), &before);
    assert!(store.notifications().is_empty());
}

#[test]
fn follow_unknown_user_changes_nothing() {
    let mut store = seeded();
    let before = store.directory().clone();
    let err = store.follow(&uid("ghost")).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.directory(), &before);
}

#[test]
fn unfollow_removes_both_sides() {
    let mut store = seeded();
    assert!(store.unfollow(&uid("user2")).unwrap());
    assert!(!store.is_following(&uid("user2")));
    assert!(!store
        .user(&uid("user2"))
        .unwrap()
        .followers()
        .contains(&uid("user1")));
    assert!(!store.unfollow(&uid("user2")).unwrap());
    store.directory().check_consistency().unwrap();
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

#[test]
fn create_post_prepends_with_tags() {
    let mut store = seeded();
    let post = store
        .create_post("https://img/1.jpg", "Morning run #fitness #Run", Some("  "))
        .unwrap();
    assert_eq!(store.posts()[0].id, post.id);
    assert_eq!(post.tags(), ["fitness", "Run"]);
    assert_eq!(post.user_id, uid("user1"));
    assert_eq!(post.username, "instagram_user");
    assert_eq!(post.likes().count(), 0);
    assert!(post.comments().is_empty());
    assert_eq!(post.location, None);
}

#[test]
fn create_post_requires_an_image() {
    let mut store = seeded();
    let err = store.create_post("  ", "caption", None).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(store.posts().len(), 3);
}

#[test]
fn create_post_notifies_mentioned_users_once() {
    let mut store = seeded();
    let post = store
        .create_post(
            "img",
            "with @food_lover and @food_lover and @instagram_user and @ghost",
            None,
        )
        .unwrap();
    let mentions: Vec<_> = store
        .notifications()
        .iter()
        .filter(|n| n.kind == NotificationKind::Mention)
        .collect();
    assert_eq!(mentions.len(), 1);
    assert_eq!(mentions[0].recipient_id, uid("user3"));
    assert_eq!(mentions[0].post_id.as_ref(), Some(&post.id));
}

#[test]
fn update_post_rederives_tags_and_keeps_timestamp() {
    let mut store = seeded();
    let post = store.create_post("img", "old #one", None).unwrap();
    let patch = PostPatch {
        caption: Some("new #two #three".to_string()),
        location: Some(Some("Lisbon".to_string())),
        image_url: None,
    };
    assert!(store.update_post(&post.id, patch).unwrap());

    let updated = store.post(&post.id).unwrap();
    assert_eq!(updated.caption(), "new #two #three");
    assert_eq!(updated.tags(), ["two", "three"]);
    assert_eq!(updated.location.as_deref(), Some("Lisbon"));
    assert_eq!(updated.image_url, "img");
    assert_eq!(updated.timestamp(), post.timestamp());
}

#[test]
fn update_absent_post_is_a_no_op() {
    let mut store = seeded();
    let before = store.timeline().clone();
    assert!(!store
        .update_post(&pid("missing"), PostPatch::caption("x"))
        .unwrap());
    assert_eq!(store.timeline(), &before);
}

#[test]
fn only_the_owner_may_edit_or_delete() {
    let mut store = seeded();
    let err = store
        .update_post(&pid("post1"), PostPatch::caption("hijacked"))
        .unwrap_err();
    assert!(matches!(err, StoreError::Forbidden { action: "edit", .. }));
    let err = store.delete_post(&pid("post1")).unwrap_err();
    assert!(matches!(err, StoreError::Forbidden { action: "delete", .. }));
    assert!(store.post(&pid("post1")).is_some());

    store.authenticate("nature_photography").unwrap();
    assert!(store
        .update_post(&pid("post1"), PostPatch::caption("mine #sunset"))
        .unwrap());
    assert!(store.delete_post(&pid("post1")).unwrap());
    assert!(store.post(&pid("post1")).is_none());
}

#[test]
fn delete_absent_post_leaves_collection_unchanged() {
    let mut store = seeded();
    assert!(!store.delete_post(&pid("missing")).unwrap());
    assert_eq!(store.posts().len(), 3);
}

#[test]
fn delete_post_drops_its_notifications() {
    let mut store = seeded();
    let post = store.create_post("img", "hello", None).unwrap();
    store.authenticate("nature_photography").unwrap();
    store.toggle_like(&post.id).unwrap();
    assert!(store.follow(&uid("user3")).unwrap());
    assert_eq!(store.notifications().len(), 2);

    store.authenticate("instagram_user").unwrap();
    assert!(store.delete_post(&post.id).unwrap());
    assert_eq!(store.notifications().len(), 1);
    assert_eq!(store.notifications()[0].kind, NotificationKind::Follow);
}

// ---------------------------------------------------------------------------
// Likes & comments
// ---------------------------------------------------------------------------

fn likers(store: &SocialStore<InMemoryKv>, post: &str) -> Vec<UserId> {
    store.post(&pid(post)).unwrap().likes().liked_by().cloned().collect()
}

#[test]
fn toggle_like_twice_restores_state() {
    let mut store = seeded();
    let before = likers(&store, "post3");
    assert_eq!(before, vec![uid("user1"), uid("user2"), uid("user3")]);
    let persisted = store.kv().get(StateKey::Posts.as_str()).unwrap();

    assert!(!store.toggle_like(&pid("post3")).unwrap());
    assert!(store.toggle_like(&pid("post3")).unwrap());

    assert_eq!(likers(&store, "post3"), before);
    assert_eq!(store.kv().get(StateKey::Posts.as_str()).unwrap(), persisted);
}

#[test]
fn unliked_post_returns_to_unliked() {
    let mut store = seeded();
    store.authenticate("travel_adventures").unwrap();
    let before = likers(&store, "post1");
    assert!(store.toggle_like(&pid("post1")).unwrap());
    assert!(!store.toggle_like(&pid("post1")).unwrap());
    assert_eq!(likers(&store, "post1"), before);
    assert_eq!(store.post(&pid("post1")).unwrap().likes().count(), 2);
}

#[test]
fn like_count_tracks_likers() {
    let mut store = seeded();
    store.authenticate("travel_adventures").unwrap();
    assert!(store.toggle_like(&pid("post1")).unwrap());
    let likes = store.post(&pid("post1")).unwrap().likes();
    assert_eq!(likes.count(), 3);
    assert_eq!(likes.count(), likes.liked_by().count());
}

#[test]
fn like_notifies_author_once_while_unread() {
    let mut store = seeded();
    store.authenticate("travel_adventures").unwrap();
    store.toggle_like(&pid("post1")).unwrap();
    store.toggle_like(&pid("post1")).unwrap();
    store.toggle_like(&pid("post1")).unwrap();

    let likes: Vec<_> = store
        .notifications()
        .iter()
        .filter(|n| n.kind == NotificationKind::Like)
        .collect();
    assert_eq!(likes.len(), 1);
    assert_eq!(likes[0].recipient_id, uid("user2"));
    assert_eq!(likes[0].post_id.as_ref(), Some(&pid("post1")));
}

#[test]
fn liking_own_post_sends_nothing() {
    let mut store = seeded();
    let post = store.create_post("img", "me", None).unwrap();
    assert!(store.toggle_like(&post.id).unwrap());
    assert!(store.notifications().is_empty());
}

#[test]
fn toggle_like_on_missing_post_is_not_found() {
    let mut store = seeded();
    let err = store.toggle_like(&pid("missing")).unwrap_err();
    assert!(matches!(err, StoreError::Core(CoreError::PostNotFound { .. })));
}

#[test]
fn add_comment_appends_trimmed_text() {
    let mut store = seeded();
    let comment = store.add_comment(&pid("post1"), "  lovely  ").unwrap();
    assert_eq!(comment.text, "lovely");
    assert_eq!(comment.user_id, uid("user1"));

    let post = store.post(&pid("post1")).unwrap();
    assert_eq!(post.comments().len(), 3);
    assert_eq!(post.comments().last().unwrap().id, comment.id);

    let n = &store.notifications()[0];
    assert_eq!(n.kind, NotificationKind::Comment);
    assert_eq!(n.recipient_id, uid("user2"));
    assert_eq!(n.message, "commented: \"lovely\"");
}

#[test]
fn comments_keep_call_order() {
    let mut store = seeded();
    let post = store.create_post("img", "fresh", None).unwrap();
    for text in ["a", "b", "c"] {
        store.add_comment(&post.id, text).unwrap();
    }
    let texts: Vec<&str> = store
        .post(&post.id)
        .unwrap()
        .comments()
        .iter()
        .map(|c| c.text.as_str())
        .collect();
    assert_eq!(texts, vec!["a", "b", "c"]);
}

#[test]
fn blank_comment_is_rejected() {
    let mut store = seeded();
    let err = store.add_comment(&pid("post1"), " \n ").unwrap_err();
    assert!(err.is_validation());
    assert_eq!(store.post(&pid("post1")).unwrap().comments().len(), 2);
}

#[test]
fn toggle_comment_like() {
    let mut store = seeded();
    let comment = snapgraph_store::core::CommentId::from("comment2");
    assert!(store.toggle_comment_like(&pid("post1"), &comment).unwrap());
    let post = store.post(&pid("post1")).unwrap();
    assert_eq!(post.comment(&comment).unwrap().likes().count(), 1);

    let err = store
        .toggle_comment_like(&pid("post1"), &"nope".into())
        .unwrap_err();
    assert!(err.is_not_found());
}

// ---------------------------------------------------------------------------
// Stories, notifications, theme
// ---------------------------------------------------------------------------

#[test]
fn stories_are_prepended_and_viewed() {
    let mut store = seeded();
    let story = store.create_story("https://img/s.jpg").unwrap();
    assert_eq!(store.stories()[0].id, story.id);
    assert!(!story.viewed);

    store.mark_story_viewed(&story.id).unwrap();
    assert!(store.stories()[0].viewed);
    assert!(store.mark_story_viewed(&"missing".into()).unwrap_err().is_not_found());
}

#[test]
fn notification_read_flags() {
    let mut store = seeded();
    store.authenticate("travel_adventures").unwrap();
    assert!(store.follow(&uid("user2")).unwrap());
    store.add_comment(&pid("post1"), "nice").unwrap();

    store.authenticate("nature_photography").unwrap();
    assert_eq!(store.notifications_for_current().len(), 2);
    assert_eq!(store.unread_notification_count(), 2);

    let first = store.notifications_for_current()[0].id.clone();
    store.mark_notification_read(&first).unwrap();
    assert_eq!(store.unread_notification_count(), 1);
    assert_eq!(store.mark_all_notifications_read().unwrap(), 1);
    assert_eq!(store.unread_notification_count(), 0);

    // Someone else's notification is invisible to this user.
    store.authenticate("instagram_user").unwrap();
    assert!(store.mark_notification_read(&first).unwrap_err().is_not_found());
}

#[test]
fn toggle_theme_flips_and_persists() {
    let mut store = seeded();
    assert!(!store.dark_mode());
    assert!(store.toggle_theme());
    assert_eq!(
        store.kv().get(StateKey::DarkMode.as_str()).unwrap().as_deref(),
        Some("true")
    );
    assert!(!store.toggle_theme());
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[test]
fn feed_shows_self_and_followed() {
    let store = seeded();
    let ids: Vec<_> = store.feed().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["post1", "post3"]);
}

#[test]
fn feed_follows_new_relationships() {
    let mut store = seeded();
    store.follow(&uid("user3")).unwrap();
    let own = store.create_post("img", "mine", None).unwrap();
    let ids: Vec<_> = store.feed().iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids, vec![own.id, pid("post1"), pid("post2"), pid("post3")]);
}

#[test]
fn search_and_suggestions() {
    let store = seeded();
    let users: Vec<_> = store.search_users("FOOD").iter().map(|u| u.id.clone()).collect();
    assert_eq!(users, vec![uid("user3")]);

    let posts: Vec<_> = store.search_posts("#pizza").iter().map(|p| p.id.clone()).collect();
    assert_eq!(posts, vec![pid("post2")]);
    let posts: Vec<_> = store.search_posts("BEACH").iter().map(|p| p.id.clone()).collect();
    assert_eq!(posts, vec![pid("post1")]);

    let suggested: Vec<_> = store.suggested_users().iter().map(|u| u.id.clone()).collect();
    assert_eq!(suggested, vec![uid("user3")]);

    assert_eq!(store.posts_by(&uid("user4")).len(), 1);
    assert_eq!(store.posts_tagged("#Hiking").len(), 1);
}

// ---------------------------------------------------------------------------
// Best-effort persistence
// ---------------------------------------------------------------------------

/// A medium that refuses writes once `fail_writes` is set.
#[derive(Default)]
struct FailingKv {
    inner: InMemoryKv,
    fail_writes: Rc<Cell<bool>>,
}

impl KvStore for FailingKv {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::WriteRejected {
                key: key.to_string(),
                reason: "medium is read-only".to_string(),
            });
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.inner.keys()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

#[test]
fn failed_writes_keep_in_memory_state() {
    init_tracing();
    let kv = FailingKv::default();
    let fail_writes = Rc::clone(&kv.fail_writes);
    let mut store = SocialStore::open(kv).unwrap();
    let persisted = store.kv().get(StateKey::Posts.as_str()).unwrap();
    assert!(persisted.is_some());

    fail_writes.set(true);
    let post = store.create_post("img", "offline", None).unwrap();
    assert_eq!(store.posts()[0].id, post.id);
    assert_eq!(store.kv().get(StateKey::Posts.as_str()).unwrap(), persisted);
    assert!(matches!(store.flush(), Err(StoreError::Storage(_))));
}
