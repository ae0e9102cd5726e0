pub mod auth;
pub mod post;
pub mod user;

use crate::model::{
    post::PostTextLengthError,
    user::{InvalidBirthDateError, InvalidNicknameError},
};
use thiserror::Error;

/// Conversion failures for data coming back out of the store.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum ModelValidationError {
    #[error(transparent)]
    Nickname(#[from] InvalidNicknameError),
    #[error(transparent)]
    BirthDate(#[from] InvalidBirthDateError),
    #[error(transparent)]
    PostText(#[from] PostTextLengthError),
}
