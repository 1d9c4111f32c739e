//! Default content installed into an empty store.
//!
//! Each collection is checked on its own: an empty user list gets the four
//! default users (and `user1` becomes the session user), an empty post list
//! gets the three default posts, an empty story list the two default
//! stories. A populated collection is never touched, so running the seeder
//! twice changes nothing the second time.
//!
//! The follow pattern is installed edge by edge through
//! [`UserDirectory::follow`], which keeps it bidirectionally consistent.
//! Like counts are derived from the seeded `likedBy` sets.

use snapgraph_core::user::default_avatar;
use snapgraph_core::{
    Comment, CommentId, CoreError, Post, PostId, Story, StoryId, Timeline, User, UserDirectory,
    UserId,
};
use snapgraph_storage::{StateKey, StateSnapshot};

const MINUTE: u64 = 60_000;
const HOUR: u64 = 60 * MINUTE;

/// What a seeding pass installed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub posts: usize,
    pub stories: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.users == 0 && self.posts == 0 && self.stories == 0
    }

    /// Keys whose contents changed during the pass.
    pub fn touched_keys(&self) -> Vec<StateKey> {
        let mut keys = Vec::new();
        if self.users > 0 {
            keys.push(StateKey::Users);
            keys.push(StateKey::CurrentUser);
        }
        if self.posts > 0 {
            keys.push(StateKey::Posts);
        }
        if self.stories > 0 {
            keys.push(StateKey::Stories);
        }
        keys
    }
}

/// `(follower, followee)` pairs of the default graph.
const SEED_FOLLOWS: [(&str, &str); 8] = [
    ("user1", "user2"),
    ("user1", "user4"),
    ("user2", "user1"),
    ("user3", "user1"),
    ("user3", "user2"),
    ("user3", "user4"),
    ("user4", "user1"),
    ("user4", "user3"),
];

fn seed_users() -> Vec<User> {
    vec![
        User::new(UserId::from("user1"), "instagram_user", "Instagram User")
            .with_bio("Photography enthusiast | Travel lover | Coffee addict ☕")
            .with_website("www.instagram.com")
            .verified(true),
        User::new(UserId::from("user2"), "nature_photography", "Nature Photography")
            .with_avatar(&default_avatar("nature"))
            .with_bio("Capturing the beauty of nature 🌿📸"),
        User::new(UserId::from("user3"), "food_lover", "Food Lover")
            .with_avatar(&default_avatar("food"))
            .with_bio("Foodie | Chef | Recipe creator 🍕🍰"),
        User::new(UserId::from("user4"), "travel_adventures", "Travel Adventures")
            .with_avatar(&default_avatar("travel"))
            .with_bio("Exploring the world one city at a time ✈️🗺️"),
    ]
}

/// Installs the default users and follow graph into an empty directory.
fn install_users(users: &mut UserDirectory) -> Result<usize, CoreError> {
    let defaults = seed_users();
    let count = defaults.len();
    for user in defaults {
        users.insert(user)?;
    }
    for (follower, followee) in SEED_FOLLOWS {
        users.follow(&UserId::from(follower), &UserId::from(followee))?;
    }
    Ok(count)
}

struct SeedComment {
    id: &'static str,
    author: &'static str,
    text: &'static str,
    age: u64,
    liked_by: &'static [&'static str],
}

struct SeedPost {
    id: &'static str,
    author: &'static str,
    image_url: &'static str,
    caption: &'static str,
    location: Option<&'static str>,
    age: u64,
    liked_by: &'static [&'static str],
    comments: &'static [SeedComment],
}

const SEED_POSTS: [SeedPost; 3] = [
    SeedPost {
        id: "post1",
        author: "user2",
        image_url: "https://images.unsplash.com/photo-1682687982501-1e58ab814714?w=800&q=80",
        caption: "Beautiful sunset at the beach 🌅 Nothing beats the golden hour magic! #sunset #photography #nature",
        location: Some("Malibu Beach, CA"),
        age: HOUR,
        liked_by: &["user1", "user3"],
        comments: &[
            SeedComment {
                id: "comment1",
                author: "user1",
                text: "Wow! Amazing view! 😍",
                age: 50 * MINUTE,
                liked_by: &["user2"],
            },
            SeedComment {
                id: "comment2",
                author: "user3",
                text: "Great composition! 📸",
                age: 40 * MINUTE,
                liked_by: &[],
            },
        ],
    },
    SeedPost {
        id: "post2",
        author: "user3",
        image_url: "https://images.unsplash.com/photo-1565299624946-b28f40a0ae38?w=800&q=80",
        caption: "Homemade pizza for dinner tonight! 🍕 Recipe in my bio #homemade #pizza #foodie",
        location: None,
        age: 2 * HOUR,
        liked_by: &["user1"],
        comments: &[SeedComment {
            id: "comment3",
            author: "user2",
            text: "Looks delicious! 🤤",
            age: 100 * MINUTE,
            liked_by: &["user3"],
        }],
    },
    SeedPost {
        id: "post3",
        author: "user4",
        image_url: "https://images.unsplash.com/photo-1526392060635-9d6019884377?w=800&q=80",
        caption: "Exploring the mountains this weekend ⛰️ The view from the top was absolutely breathtaking! #mountains #hiking #adventure",
        location: Some("Rocky Mountain National Park"),
        age: 3 * HOUR,
        liked_by: &["user1", "user2", "user3"],
        comments: &[SeedComment {
            id: "comment4",
            author: "user1",
            text: "Which trail is this? 🥾",
            age: 150 * MINUTE,
            liked_by: &[],
        }],
    },
];

/// Builds the default posts whose authors exist in `users`. Posts whose
/// author or commenters are missing are skipped.
fn build_posts(users: &UserDirectory, now: u64) -> Vec<Post> {
    let mut posts = Vec::new();
    for seed in &SEED_POSTS {
        let Some(author) = users.get(&UserId::from(seed.author)) else {
            tracing::debug!(post = seed.id, author = seed.author, "skipping seed post");
            continue;
        };
        let mut post = Post::new(
            PostId::from(seed.id),
            author,
            seed.image_url,
            seed.caption,
            seed.location,
            now.saturating_sub(seed.age),
        );
        for liker in seed.liked_by {
            post.toggle_like(&UserId::from(*liker));
        }
        let mut complete = true;
        for c in seed.comments {
            let Some(commenter) = users.get(&UserId::from(c.author)) else {
                complete = false;
                break;
            };
            let mut comment = Comment::new(
                CommentId::from(c.id),
                commenter,
                c.text,
                now.saturating_sub(c.age),
            );
            for liker in c.liked_by {
                comment.toggle_like(&UserId::from(*liker));
            }
            post.push_comment(comment);
        }
        if complete {
            posts.push(post);
        }
    }
    posts
}

fn build_stories(users: &UserDirectory, now: u64) -> Vec<Story> {
    let seeds = [
        (
            "story1",
            "user2",
            "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=400&q=80",
            30 * MINUTE,
        ),
        (
            "story2",
            "user3",
            "https://images.unsplash.com/photo-1551024506-0bccd828d307?w=400&q=80",
            HOUR,
        ),
    ];
    seeds
        .into_iter()
        .filter_map(|(id, author, image, age)| {
            let author = users.get(&UserId::from(author))?;
            Some(Story::new(
                StoryId::from(id),
                author,
                image,
                now.saturating_sub(age),
            ))
        })
        .collect()
}

/// Seeds every empty collection of `state`.
pub fn seed_if_empty(state: &mut StateSnapshot, now: u64) -> Result<SeedReport, CoreError> {
    let mut report = SeedReport::default();

    if state.users.is_empty() {
        report.users = install_users(&mut state.users)?;
        state.current_user = Some(UserId::from("user1"));
    }

    if state.posts.is_empty() {
        let posts = build_posts(&state.users, now);
        report.posts = posts.len();
        state.posts = Timeline::from_posts(posts);
    }

    if state.stories.is_empty() {
        state.stories = build_stories(&state.users, now);
        report.stories = state.stories.len();
    }

    Ok(report)
}
