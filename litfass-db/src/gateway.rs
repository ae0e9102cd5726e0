use crate::error::Result;
use litfass_common::model::post::{Post, PostText};
use litfass_common::model::user::{Nickname, User, UserCard};

/// The narrow storage interface the service layer is written against.
///
/// Edges are addressed one at a time; pairing the two replicas of a follow
/// relationship is the graph store's job, not the gateway's. Implementations
/// must be safe for concurrent use by independent operations but give no
/// ordering guarantee across them.
#[allow(async_fn_in_trait)]
pub trait Gateway: Send + Sync {
    async fn fetch_user(&self, nick: &Nickname) -> Result<Option<User>>;

    async fn insert_user(&self, user: &User) -> Result<()>;

    /// Writes a post stamped with the current wall-clock time and returns it
    /// as stored. A collision on (author, created_at) overwrites the text.
    async fn insert_post(&self, author: &Nickname, text: &PostText) -> Result<Post>;

    /// Overwrites the text of the post identified by `post.author` and
    /// `post.created_at`. No existence check is made.
    async fn update_post_text(&self, post: &Post) -> Result<()>;

    /// Up to `limit` posts by one author, most recent first.
    async fn recent_posts_by_author(&self, author: &Nickname, limit: u16) -> Result<Vec<Post>>;

    async fn insert_follower_edge(&self, subject: &Nickname, follower: &UserCard) -> Result<()>;

    async fn insert_following_edge(&self, subject: &Nickname, following: &UserCard) -> Result<()>;

    async fn delete_follower_edge(&self, subject: &Nickname, follower: &Nickname) -> Result<()>;

    async fn delete_following_edge(&self, subject: &Nickname, following: &Nickname) -> Result<()>;

    async fn fetch_follower_edge(
        &self,
        subject: &Nickname,
        follower: &Nickname,
    ) -> Result<Option<UserCard>>;

    async fn fetch_following_edge(
        &self,
        subject: &Nickname,
        following: &Nickname,
    ) -> Result<Option<UserCard>>;

    async fn list_followers(&self, subject: &Nickname) -> Result<Vec<UserCard>>;

    async fn list_following(&self, subject: &Nickname) -> Result<Vec<Nickname>>;
}
