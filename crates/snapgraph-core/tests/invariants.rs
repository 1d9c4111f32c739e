//! Property tests for the follow-graph and like-count invariants.
//!
//! Arbitrary sequences of follow/unfollow and like toggles are replayed
//! against a small fixed population; after every step the invariants must
//! hold.

use proptest::prelude::*;

use snapgraph_core::{Post, PostId, User, UserDirectory, UserId};

const POPULATION: usize = 5;

fn population() -> UserDirectory {
    let mut dir = UserDirectory::new();
    for i in 0..POPULATION {
        let name = format!("user{i}");
        dir.insert(User::new(UserId::from(name.as_str()), &name, &name))
            .unwrap();
    }
    dir
}

fn uid(i: usize) -> UserId {
    UserId::from(format!("user{i}"))
}

#[derive(Debug, Clone)]
enum GraphOp {
    Follow(usize, usize),
    Unfollow(usize, usize),
}

fn graph_op() -> impl Strategy<Value = GraphOp> {
    prop_oneof![
        (0..POPULATION, 0..POPULATION).prop_map(|(a, b)| GraphOp::Follow(a, b)),
        (0..POPULATION, 0..POPULATION).prop_map(|(a, b)| GraphOp::Unfollow(a, b)),
    ]
}

proptest! {
    #[test]
    fn follow_graph_stays_bidirectional(ops in prop::collection::vec(graph_op(), 0..64)) {
        let mut dir = population();
        for op in ops {
            match op {
                GraphOp::Follow(a, b) => { dir.follow(&uid(a), &uid(b)).unwrap(); }
                GraphOp::Unfollow(a, b) => { dir.unfollow(&uid(a), &uid(b)).unwrap(); }
            }
            prop_assert!(dir.check_consistency().is_ok());
        }
        for a in dir.users() {
            for b in dir.users() {
                prop_assert_eq!(
                    b.followers().contains(&a.id),
                    a.following().contains(&b.id)
                );
            }
            prop_assert!(!a.following().contains(&a.id));
        }
    }

    #[test]
    fn likes_always_equal_likers(likers in prop::collection::vec(0..POPULATION, 0..64)) {
        let dir = population();
        let author = dir.get(&uid(0)).unwrap();
        let mut post = Post::new(PostId::from("p"), author, "img", "", None, 0);
        for i in likers {
            post.toggle_like(&uid(i));
            prop_assert_eq!(post.likes().count(), post.likes().liked_by().count());
        }
    }

    #[test]
    fn double_toggle_restores_likes(
        seed in prop::collection::vec(0..POPULATION, 0..16),
        actor in 0..POPULATION,
    ) {
        let dir = population();
        let author = dir.get(&uid(0)).unwrap();
        let mut post = Post::new(PostId::from("p"), author, "img", "", None, 0);
        for i in seed {
            post.toggle_like(&uid(i));
        }
        let before = post.likes().clone();
        post.toggle_like(&uid(actor));
        post.toggle_like(&uid(actor));
        prop_assert_eq!(post.likes().count(), before.count());
        prop_assert_eq!(
            post.likes().liked_by().collect::<Vec<_>>(),
            before.liked_by().collect::<Vec<_>>()
        );
    }
}
