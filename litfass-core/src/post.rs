use crate::feed::AUTHOR_POST_CAP;
use litfass_common::model::post::{Post, PostText, PostTextLengthError};
use litfass_common::model::user::Nickname;
use litfass_db::error::StoreError;
use litfass_db::gateway::Gateway;
use std::sync::Arc;
use thiserror::Error;
use time::OffsetDateTime;

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum PostError {
    #[error(transparent)]
    Length(#[from] PostTextLengthError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Validate-then-write post operations. No retries and no existence checks
/// live here; both belong to the storage layer if anywhere.
pub struct PostStore<G> {
    gateway: Arc<G>,
}

impl<G: Gateway> PostStore<G> {
    #[must_use]
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Validates the text bound and writes the post; the creation timestamp
    /// is assigned by the gateway at write time.
    pub async fn create_post(&self, author: &Nickname, text: &str) -> Result<Post, PostError> {
        let text = PostText::new(text.to_owned())?;

        let post = self.gateway.insert_post(author, &text).await?;
        Ok(post)
    }

    /// Overwrites the text of the post identified by (author, created_at).
    /// The timestamp is identity and never changes. Targeting a post that
    /// does not exist succeeds without effect; callers wanting to be sure
    /// must fetch first.
    pub async fn update_post(
        &self,
        author: &Nickname,
        created_at: OffsetDateTime,
        text: &str,
    ) -> Result<Post, PostError> {
        let text = PostText::new(text.to_owned())?;

        let post = Post {
            author: author.clone(),
            created_at,
            text,
        };
        self.gateway.update_post_text(&post).await?;
        Ok(post)
    }

    /// The author's own recent posts, most recent first, for display and for
    /// picking one to edit.
    pub async fn recent_by_author(&self, author: &Nickname) -> Result<Vec<Post>, StoreError> {
        self.gateway
            .recent_posts_by_author(author, AUTHOR_POST_CAP)
            .await
    }
}
