//! In-memory [`Gateway`] and model builders for the service-layer tests.

use litfass_common::model::auth::PasswordHash;
use litfass_common::model::post::{Post, PostText};
use litfass_common::model::user::{Nickname, Profile, User, UserCard};
use litfass_db::error::{Result, StoreError};
use litfass_db::gateway::Gateway;
use std::collections::BTreeMap;
use std::sync::Mutex;
use time::OffsetDateTime;

#[derive(Default)]
struct State {
    users: BTreeMap<Nickname, User>,
    // Per author, unordered; reads sort most-recent-first like the store.
    posts: BTreeMap<Nickname, Vec<Post>>,
    follower_edges: BTreeMap<(Nickname, Nickname), UserCard>,
    following_edges: BTreeMap<(Nickname, Nickname), UserCard>,
    fail_posts_for: Option<Nickname>,
}

#[derive(Default)]
pub(crate) struct MemoryGateway {
    state: Mutex<State>,
}

impl MemoryGateway {
    /// Places a post directly into storage, overwriting on an identical
    /// (author, created_at) key like the real table does.
    pub(crate) fn push_post(&self, post: Post) {
        let mut state = self.state.lock().unwrap();
        let posts = state.posts.entry(post.author.clone()).or_default();
        posts.retain(|existing| existing.created_at != post.created_at);
        posts.push(post);
    }

    /// Makes every subsequent post fetch for `author` fail.
    pub(crate) fn fail_posts_for(&self, author: &Nickname) {
        self.state.lock().unwrap().fail_posts_for = Some(author.clone());
    }
}

impl Gateway for MemoryGateway {
    async fn fetch_user(&self, nick: &Nickname) -> Result<Option<User>> {
        Ok(self.state.lock().unwrap().users.get(nick).cloned())
    }

    async fn insert_user(&self, user: &User) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .users
            .insert(user.nickname.clone(), user.clone());
        Ok(())
    }

    async fn insert_post(&self, author: &Nickname, text: &PostText) -> Result<Post> {
        let post = Post {
            author: author.clone(),
            created_at: OffsetDateTime::now_utc(),
            text: text.clone(),
        };
        self.push_post(post.clone());
        Ok(post)
    }

    async fn update_post_text(&self, post: &Post) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(posts) = state.posts.get_mut(&post.author)
            && let Some(existing) = posts
                .iter_mut()
                .find(|existing| existing.created_at == post.created_at)
        {
            existing.text = post.text.clone();
        }
        Ok(())
    }

    async fn recent_posts_by_author(&self, author: &Nickname, limit: u16) -> Result<Vec<Post>> {
        let state = self.state.lock().unwrap();
        if state.fail_posts_for.as_ref() == Some(author) {
            return Err(StoreError::Timeout("injected failure".to_owned()));
        }

        let mut posts = state.posts.get(author).cloned().unwrap_or_default();
        posts.sort_by_key(|post| std::cmp::Reverse(post.created_at));
        posts.truncate(usize::from(limit));
        Ok(posts)
    }

    async fn insert_follower_edge(&self, subject: &Nickname, follower: &UserCard) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .follower_edges
            .insert((subject.clone(), follower.nickname.clone()), follower.clone());
        Ok(())
    }

    async fn insert_following_edge(&self, subject: &Nickname, following: &UserCard) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .following_edges
            .insert((subject.clone(), following.nickname.clone()), following.clone());
        Ok(())
    }

    async fn delete_follower_edge(&self, subject: &Nickname, follower: &Nickname) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .follower_edges
            .remove(&(subject.clone(), follower.clone()));
        Ok(())
    }

    async fn delete_following_edge(&self, subject: &Nickname, following: &Nickname) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .following_edges
            .remove(&(subject.clone(), following.clone()));
        Ok(())
    }

    async fn fetch_follower_edge(
        &self,
        subject: &Nickname,
        follower: &Nickname,
    ) -> Result<Option<UserCard>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .follower_edges
            .get(&(subject.clone(), follower.clone()))
            .cloned())
    }

    async fn fetch_following_edge(
        &self,
        subject: &Nickname,
        following: &Nickname,
    ) -> Result<Option<UserCard>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .following_edges
            .get(&(subject.clone(), following.clone()))
            .cloned())
    }

    async fn list_followers(&self, subject: &Nickname) -> Result<Vec<UserCard>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .follower_edges
            .iter()
            .filter(|((nick, _), _)| nick == subject)
            .map(|(_, card)| card.clone())
            .collect())
    }

    async fn list_following(&self, subject: &Nickname) -> Result<Vec<Nickname>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .following_edges
            .keys()
            .filter(|(nick, _)| nick == subject)
            .map(|(_, following)| following.clone())
            .collect())
    }
}

pub(crate) fn nickname(nick: &str) -> Nickname {
    Nickname::new(nick.to_owned()).unwrap()
}

pub(crate) fn user(nick: &str) -> User {
    User {
        nickname: nickname(nick),
        // Graph and feed tests never verify credentials.
        password: PasswordHash::new("unverifiable".to_owned()),
        profile: Profile {
            first_name: "Test".to_owned(),
            last_name: "Person".to_owned(),
            birth_date: "01-01-2000".parse().unwrap(),
            bio: String::new(),
        },
    }
}

pub(crate) fn post_at(author: &str, unix_seconds: i64, text: &str) -> Post {
    Post {
        author: nickname(author),
        created_at: OffsetDateTime::from_unix_timestamp(unix_seconds).unwrap(),
        text: PostText::new(text.to_owned()).unwrap(),
    }
}
