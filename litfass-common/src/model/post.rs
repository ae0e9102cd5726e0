use crate::model::user::Nickname;
use thiserror::Error;
use time::OffsetDateTime;

/// Exclusive upper bound on post length, matching the storage schema.
pub const POST_TEXT_MAX_LEN: usize = 400;

/// Post body, non-empty and under [`POST_TEXT_MAX_LEN`] characters.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct PostText(String);

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The post text length is out of bounds: {0} characters")]
pub struct PostTextLengthError(pub usize);

impl PostText {
    pub fn new(text: String) -> Result<Self, PostTextLengthError> {
        let len = text.chars().count();
        if len > 0 && len < POST_TEXT_MAX_LEN {
            Ok(PostText(text))
        } else {
            Err(PostTextLengthError(len))
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// One post. The (author, created_at) pair is the identity: edits replace
/// the text, never the timestamp.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Post {
    pub author: Nickname,
    pub created_at: OffsetDateTime,
    pub text: PostText,
}
