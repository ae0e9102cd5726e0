use crate::error::Result;
use crate::gateway::Gateway;
use crate::record::{FollowerRecord, FollowingRecord, PostRecord, UserRecord};
use litfass_common::model::ModelValidationError;
use litfass_common::model::post::{Post, PostText};
use litfass_common::model::user::{Nickname, User, UserCard};
use sqlx::{PgPool, query, query_as, query_scalar};
use time::OffsetDateTime;
use tracing::debug;

const SELECT_USER: &str = "
    SELECT nick, password, first_name, last_name, birth_date, bio
    FROM users
    WHERE nick = $1
";
const INSERT_USER: &str = "
    INSERT INTO users (nick, password, first_name, last_name, birth_date, bio)
    VALUES ($1, $2, $3, $4, $5, $6)
    ON CONFLICT (nick) DO UPDATE SET
        password = EXCLUDED.password,
        first_name = EXCLUDED.first_name,
        last_name = EXCLUDED.last_name,
        birth_date = EXCLUDED.birth_date,
        bio = EXCLUDED.bio
";
const INSERT_POST: &str = "
    INSERT INTO posts (author_nick, created_at, text)
    VALUES ($1, $2, $3)
    ON CONFLICT (author_nick, created_at) DO UPDATE SET text = EXCLUDED.text
";
const UPDATE_POST: &str = "
    UPDATE posts SET text = $1 WHERE author_nick = $2 AND created_at = $3
";
const SELECT_POSTS: &str = "
    SELECT author_nick, created_at, text
    FROM posts
    WHERE author_nick = $1
    ORDER BY created_at DESC
    LIMIT $2
";
const SELECT_FOLLOWER: &str = "
    SELECT nick, follower_nick, follower_first_name, follower_last_name,
        follower_birth_date, follower_bio
    FROM followers
    WHERE nick = $1 AND follower_nick = $2
";
const SELECT_FOLLOWERS: &str = "
    SELECT nick, follower_nick, follower_first_name, follower_last_name,
        follower_birth_date, follower_bio
    FROM followers
    WHERE nick = $1
";
const SELECT_FOLLOWING: &str = "
    SELECT nick, following_nick, following_first_name, following_last_name,
        following_birth_date, following_bio
    FROM following
    WHERE nick = $1 AND following_nick = $2
";
const SELECT_FOLLOWING_NICKS: &str = "
    SELECT following_nick FROM following WHERE nick = $1
";
const INSERT_FOLLOWER: &str = "
    INSERT INTO followers (nick, follower_nick, follower_first_name,
        follower_last_name, follower_birth_date, follower_bio)
    VALUES ($1, $2, $3, $4, $5, $6)
    ON CONFLICT (nick, follower_nick) DO UPDATE SET
        follower_first_name = EXCLUDED.follower_first_name,
        follower_last_name = EXCLUDED.follower_last_name,
        follower_birth_date = EXCLUDED.follower_birth_date,
        follower_bio = EXCLUDED.follower_bio
";
const INSERT_FOLLOWING: &str = "
    INSERT INTO following (nick, following_nick, following_first_name,
        following_last_name, following_birth_date, following_bio)
    VALUES ($1, $2, $3, $4, $5, $6)
    ON CONFLICT (nick, following_nick) DO UPDATE SET
        following_first_name = EXCLUDED.following_first_name,
        following_last_name = EXCLUDED.following_last_name,
        following_birth_date = EXCLUDED.following_birth_date,
        following_bio = EXCLUDED.following_bio
";
const DELETE_FOLLOWER: &str = "
    DELETE FROM followers WHERE nick = $1 AND follower_nick = $2
";
const DELETE_FOLLOWING: &str = "
    DELETE FROM following WHERE nick = $1 AND following_nick = $2
";

/// Postgres-backed [`Gateway`]. Built once at startup around a shared pool
/// and handed to every component needing storage access; sqlx's per
/// connection statement cache keeps the operations above prepared.
pub struct StoreClient {
    pool: PgPool,
}

impl StoreClient {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

impl Gateway for StoreClient {
    async fn fetch_user(&self, nick: &Nickname) -> Result<Option<User>> {
        let record = query_as::<_, UserRecord>(SELECT_USER)
            .bind(nick.get())
            .fetch_optional(&self.pool)
            .await?;

        let user = record.map(User::try_from).transpose()?;
        Ok(user)
    }

    async fn insert_user(&self, user: &User) -> Result<()> {
        debug!(nick = %user.nickname, "inserting user");
        query(INSERT_USER)
            .bind(user.nickname.get())
            .bind(user.password.get())
            .bind(&user.profile.first_name)
            .bind(&user.profile.last_name)
            .bind(user.profile.birth_date.to_string())
            .bind(&user.profile.bio)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn insert_post(&self, author: &Nickname, text: &PostText) -> Result<Post> {
        let created_at = OffsetDateTime::now_utc();

        debug!(%author, %created_at, "inserting post");
        query(INSERT_POST)
            .bind(author.get())
            .bind(created_at)
            .bind(text.get())
            .execute(&self.pool)
            .await?;

        Ok(Post {
            author: author.clone(),
            created_at,
            text: text.clone(),
        })
    }

    async fn update_post_text(&self, post: &Post) -> Result<()> {
        debug!(author = %post.author, created_at = %post.created_at, "updating post text");
        query(UPDATE_POST)
            .bind(post.text.get())
            .bind(post.author.get())
            .bind(post.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn recent_posts_by_author(&self, author: &Nickname, limit: u16) -> Result<Vec<Post>> {
        let records = query_as::<_, PostRecord>(SELECT_POSTS)
            .bind(author.get())
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        let posts = records
            .into_iter()
            .map(Post::try_from)
            .collect::<Result<_, _>>()?;
        Ok(posts)
    }

    async fn insert_follower_edge(&self, subject: &Nickname, follower: &UserCard) -> Result<()> {
        debug!(%subject, follower = %follower.nickname, "inserting follower edge");
        query(INSERT_FOLLOWER)
            .bind(subject.get())
            .bind(follower.nickname.get())
            .bind(&follower.profile.first_name)
            .bind(&follower.profile.last_name)
            .bind(follower.profile.birth_date.to_string())
            .bind(&follower.profile.bio)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn insert_following_edge(&self, subject: &Nickname, following: &UserCard) -> Result<()> {
        debug!(%subject, following = %following.nickname, "inserting following edge");
        query(INSERT_FOLLOWING)
            .bind(subject.get())
            .bind(following.nickname.get())
            .bind(&following.profile.first_name)
            .bind(&following.profile.last_name)
            .bind(following.profile.birth_date.to_string())
            .bind(&following.profile.bio)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_follower_edge(&self, subject: &Nickname, follower: &Nickname) -> Result<()> {
        debug!(%subject, %follower, "deleting follower edge");
        query(DELETE_FOLLOWER)
            .bind(subject.get())
            .bind(follower.get())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_following_edge(&self, subject: &Nickname, following: &Nickname) -> Result<()> {
        debug!(%subject, %following, "deleting following edge");
        query(DELETE_FOLLOWING)
            .bind(subject.get())
            .bind(following.get())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn fetch_follower_edge(
        &self,
        subject: &Nickname,
        follower: &Nickname,
    ) -> Result<Option<UserCard>> {
        let record = query_as::<_, FollowerRecord>(SELECT_FOLLOWER)
            .bind(subject.get())
            .bind(follower.get())
            .fetch_optional(&self.pool)
            .await?;

        let card = record.map(UserCard::try_from).transpose()?;
        Ok(card)
    }

    async fn fetch_following_edge(
        &self,
        subject: &Nickname,
        following: &Nickname,
    ) -> Result<Option<UserCard>> {
        let record = query_as::<_, FollowingRecord>(SELECT_FOLLOWING)
            .bind(subject.get())
            .bind(following.get())
            .fetch_optional(&self.pool)
            .await?;

        let card = record.map(UserCard::try_from).transpose()?;
        Ok(card)
    }

    async fn list_followers(&self, subject: &Nickname) -> Result<Vec<UserCard>> {
        let records = query_as::<_, FollowerRecord>(SELECT_FOLLOWERS)
            .bind(subject.get())
            .fetch_all(&self.pool)
            .await?;

        let cards = records
            .into_iter()
            .map(UserCard::try_from)
            .collect::<Result<_, _>>()?;
        Ok(cards)
    }

    async fn list_following(&self, subject: &Nickname) -> Result<Vec<Nickname>> {
        let nicks = query_scalar::<_, String>(SELECT_FOLLOWING_NICKS)
            .bind(subject.get())
            .fetch_all(&self.pool)
            .await?;

        let nicknames = nicks
            .into_iter()
            .map(|nick| Nickname::new(nick).map_err(ModelValidationError::from))
            .collect::<Result<_, _>>()?;
        Ok(nicknames)
    }
}
