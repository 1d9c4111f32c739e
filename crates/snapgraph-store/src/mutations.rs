//! Store mutations.
//!
//! Every operation here follows the same shape: resolve the actor (failing
//! with `Unauthenticated` when signed out), validate, change the in-memory
//! state through the core types that own the invariants, fan out
//! notifications, then persist the touched keys.

use snapgraph_core::time::now_millis;
use snapgraph_core::{
    Comment, CommentId, CoreError, NotificationId, NotificationKind, Post, PostId, PostPatch,
    Story, StoryId, UserId,
};
use snapgraph_storage::{KvStore, StateKey};

use crate::error::StoreError;
use crate::notify;
use crate::store::SocialStore;

impl<S: KvStore> SocialStore<S> {
    // -----------------------------------------------------------------------
    // Social graph
    // -----------------------------------------------------------------------

    /// Follows `target`. Returns `Ok(false)` for a self-follow or when the
    /// relationship already exists.
    pub fn follow(&mut self, target: &UserId) -> Result<bool, StoreError> {
        let actor = self.actor()?;
        let changed = self.state.users.follow(&actor.id, target)?;
        if !changed {
            return Ok(false);
        }
        notify::push(
            &mut self.state.notifications,
            NotificationKind::Follow,
            target,
            &actor,
            None,
            NotificationKind::Follow.default_message().to_string(),
            now_millis(),
        );
        self.persist(&[StateKey::Users, StateKey::Notifications]);
        tracing::debug!(actor = %actor.id, target = %target, "follow");
        Ok(true)
    }

    /// Unfollows `target`. Returns `Ok(false)` when there was nothing to
    /// remove.
    pub fn unfollow(&mut self, target: &UserId) -> Result<bool, StoreError> {
        let actor = self.actor()?;
        let changed = self.state.users.unfollow(&actor.id, target)?;
        if changed {
            self.persist(&[StateKey::Users]);
            tracing::debug!(actor = %actor.id, target = %target, "unfollow");
        }
        Ok(changed)
    }

    // -----------------------------------------------------------------------
    // Posts
    // -----------------------------------------------------------------------

    /// Publishes a post by the signed-in user at the top of the timeline.
    pub fn create_post(
        &mut self,
        image: &str,
        caption: &str,
        location: Option<&str>,
    ) -> Result<Post, StoreError> {
        let actor = self.actor()?;
        if image.trim().is_empty() {
            return Err(CoreError::EmptyField { field: "image" }.into());
        }
        let now = now_millis();
        let post = Post::new(PostId::generate(), &actor, image, caption, location, now);
        let post = self.state.posts.prepend(post).clone();

        let mentioned = notify::mentions(
            &mut self.state.notifications,
            &self.state.users,
            &actor,
            &post.id,
            caption,
            now,
        );
        if mentioned > 0 {
            self.persist(&[StateKey::Posts, StateKey::Notifications]);
        } else {
            self.persist(&[StateKey::Posts]);
        }
        tracing::debug!(actor = %actor.id, post = %post.id, tags = post.tags().len(), "create_post");
        Ok(post)
    }

    /// Applies `patch` to a post the signed-in user owns. An unknown post
    /// is a no-op returning `Ok(false)`.
    pub fn update_post(&mut self, id: &PostId, patch: PostPatch) -> Result<bool, StoreError> {
        let actor = self.actor()?;
        let Ok(post) = self.state.posts.get_mut(id) else {
            return Ok(false);
        };
        if !post.is_authored_by(&actor.id) {
            return Err(StoreError::Forbidden {
                actor: actor.id,
                action: "edit",
                post: id.clone(),
            });
        }
        let changed = patch.apply(post);
        if changed {
            self.persist(&[StateKey::Posts]);
            tracing::debug!(actor = %actor.id, post = %id, "update_post");
        }
        Ok(changed)
    }

    /// Deletes a post the signed-in user owns, along with the notifications
    /// that point at it. An unknown post is a no-op returning `Ok(false)`.
    pub fn delete_post(&mut self, id: &PostId) -> Result<bool, StoreError> {
        let actor = self.actor()?;
        let Some(post) = self.state.posts.get(id) else {
            return Ok(false);
        };
        if !post.is_authored_by(&actor.id) {
            return Err(StoreError::Forbidden {
                actor: actor.id,
                action: "delete",
                post: id.clone(),
            });
        }
        self.state.posts.remove(id);

        let before = self.state.notifications.len();
        self.state
            .notifications
            .retain(|n| n.post_id.as_ref() != Some(id));
        if self.state.notifications.len() != before {
            self.persist(&[StateKey::Posts, StateKey::Notifications]);
        } else {
            self.persist(&[StateKey::Posts]);
        }
        tracing::debug!(actor = %actor.id, post = %id, "delete_post");
        Ok(true)
    }

    /// Likes or unlikes a post. Returns `true` when the post is liked by
    /// the signed-in user afterwards.
    pub fn toggle_like(&mut self, id: &PostId) -> Result<bool, StoreError> {
        let actor = self.actor()?;
        let post = self.state.posts.get_mut(id)?;
        let liked = post.toggle_like(&actor.id);
        let author = post.user_id.clone();

        let mut keys = vec![StateKey::Posts];
        if liked
            && notify::push(
                &mut self.state.notifications,
                NotificationKind::Like,
                &author,
                &actor,
                Some(id),
                NotificationKind::Like.default_message().to_string(),
                now_millis(),
            )
        {
            keys.push(StateKey::Notifications);
        }
        self.persist(&keys);
        tracing::debug!(actor = %actor.id, post = %id, liked, "toggle_like");
        Ok(liked)
    }

    /// Appends a comment to a post. The text is stored trimmed.
    pub fn add_comment(&mut self, id: &PostId, text: &str) -> Result<Comment, StoreError> {
        let actor = self.actor()?;
        let text = text.trim();
        if text.is_empty() {
            return Err(CoreError::EmptyField { field: "comment" }.into());
        }
        let now = now_millis();
        let post = self.state.posts.get_mut(id)?;
        let author = post.user_id.clone();
        let comment = post
            .push_comment(Comment::new(CommentId::generate(), &actor, text, now))
            .clone();

        let mut notified = notify::push(
            &mut self.state.notifications,
            NotificationKind::Comment,
            &author,
            &actor,
            Some(id),
            format!("commented: \"{text}\""),
            now,
        );
        notified |= notify::mentions(
            &mut self.state.notifications,
            &self.state.users,
            &actor,
            id,
            text,
            now,
        ) > 0;

        if notified {
            self.persist(&[StateKey::Posts, StateKey::Notifications]);
        } else {
            self.persist(&[StateKey::Posts]);
        }
        tracing::debug!(actor = %actor.id, post = %id, comment = %comment.id, "add_comment");
        Ok(comment)
    }

    /// Likes or unlikes a comment. Returns `true` when the comment is liked
    /// by the signed-in user afterwards.
    pub fn toggle_comment_like(
        &mut self,
        post: &PostId,
        comment: &CommentId,
    ) -> Result<bool, StoreError> {
        let actor = self.actor()?;
        let liked = self
            .state
            .posts
            .get_mut(post)?
            .comment_mut(comment)?
            .toggle_like(&actor.id);
        self.persist(&[StateKey::Posts]);
        tracing::debug!(actor = %actor.id, post = %post, comment = %comment, liked, "toggle_comment_like");
        Ok(liked)
    }

    // -----------------------------------------------------------------------
    // Stories
    // -----------------------------------------------------------------------

    /// Publishes an unviewed story at the front of the story list.
    pub fn create_story(&mut self, image: &str) -> Result<Story, StoreError> {
        let actor = self.actor()?;
        if image.trim().is_empty() {
            return Err(CoreError::EmptyField { field: "image" }.into());
        }
        let story = Story::new(StoryId::generate(), &actor, image, now_millis());
        self.state.stories.insert(0, story.clone());
        self.persist(&[StateKey::Stories]);
        tracing::debug!(actor = %actor.id, story = %story.id, "create_story");
        Ok(story)
    }

    pub fn mark_story_viewed(&mut self, id: &StoryId) -> Result<(), StoreError> {
        let story = self
            .state
            .stories
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| CoreError::StoryNotFound { id: id.clone() })?;
        if !story.viewed {
            story.viewed = true;
            self.persist(&[StateKey::Stories]);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Notifications
    // -----------------------------------------------------------------------

    /// Marks one of the signed-in user's notifications as read.
    pub fn mark_notification_read(&mut self, id: &NotificationId) -> Result<(), StoreError> {
        let actor = self.actor()?;
        let notification = self
            .state
            .notifications
            .iter_mut()
            .find(|n| &n.id == id && n.recipient_id == actor.id)
            .ok_or_else(|| CoreError::NotificationNotFound { id: id.clone() })?;
        if !notification.read {
            notification.read = true;
            self.persist(&[StateKey::Notifications]);
        }
        Ok(())
    }

    /// Marks every notification of the signed-in user as read. Returns how
    /// many changed.
    pub fn mark_all_notifications_read(&mut self) -> Result<usize, StoreError> {
        let actor = self.actor()?;
        let mut changed = 0;
        for n in self
            .state
            .notifications
            .iter_mut()
            .filter(|n| n.recipient_id == actor.id && !n.read)
        {
            n.read = true;
            changed += 1;
        }
        if changed > 0 {
            self.persist(&[StateKey::Notifications]);
        }
        Ok(changed)
    }

    // -----------------------------------------------------------------------
    // Preferences
    // -----------------------------------------------------------------------

    /// Flips the dark-mode flag and returns the new value.
    pub fn toggle_theme(&mut self) -> bool {
        self.state.dark_mode = !self.state.dark_mode;
        self.persist(&[StateKey::DarkMode]);
        self.state.dark_mode
    }
}
