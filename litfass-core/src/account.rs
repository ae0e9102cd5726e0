use litfass_common::model::auth::{Password, PasswordHashError};
use litfass_common::model::user::{BirthDate, Nickname, Profile, User};
use litfass_common::validate::{self, FieldViolation};
use litfass_db::error::StoreError;
use litfass_db::gateway::Gateway;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Raw registration input as read from the prompts, validated as a whole so
/// the caller can report every problem at once.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct RegistrationForm {
    pub nickname: String,
    pub password: String,
    pub repeated_password: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub bio: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum RegisterError {
    #[error("The registration form was rejected")]
    Rejected(Vec<FieldViolation>),
    #[error(transparent)]
    Hash(#[from] PasswordHashError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum LoginError {
    #[error("Unknown nickname or wrong password")]
    BadCredentials,
    #[error(transparent)]
    Hash(#[from] PasswordHashError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Registration and login on top of the users table.
pub struct Accounts<G> {
    gateway: Arc<G>,
}

impl<G: Gateway> Accounts<G> {
    #[must_use]
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn register(&self, form: &RegistrationForm) -> Result<User, RegisterError> {
        let mut violations = Vec::new();

        let nickname = Nickname::new(form.nickname.clone())
            .map_err(|_| violations.push(FieldViolation::NicknameLength))
            .ok();
        if let Some(nickname) = &nickname
            && self.gateway.fetch_user(nickname).await?.is_some()
        {
            violations.push(FieldViolation::NicknameTaken);
        }

        let password = Password::new(form.password.clone())
            .map_err(|_| violations.push(FieldViolation::PasswordLength))
            .ok();
        if form.repeated_password != form.password {
            violations.push(FieldViolation::PasswordMismatch);
        }

        if !validate::name_length_ok(&form.first_name) {
            violations.push(FieldViolation::FirstNameLength);
        }
        if !validate::name_length_ok(&form.last_name) {
            violations.push(FieldViolation::LastNameLength);
        }
        let birth_date = form
            .birth_date
            .parse::<BirthDate>()
            .map_err(|_| violations.push(FieldViolation::BirthDate))
            .ok();
        if !validate::bio_length_ok(&form.bio) {
            violations.push(FieldViolation::BioLength);
        }

        let (Some(nickname), Some(password), Some(birth_date)) = (nickname, password, birth_date)
        else {
            return Err(RegisterError::Rejected(violations));
        };
        if !violations.is_empty() {
            return Err(RegisterError::Rejected(violations));
        }

        let user = User {
            nickname,
            password: password.hash()?,
            profile: Profile {
                first_name: form.first_name.clone(),
                last_name: form.last_name.clone(),
                birth_date,
                bio: form.bio.clone(),
            },
        };
        self.gateway.insert_user(&user).await?;

        debug!(nick = %user.nickname, "registered");
        Ok(user)
    }

    /// A failed lookup and a failed verification are indistinguishable to
    /// the caller.
    pub async fn login(&self, nickname: &str, password: &str) -> Result<User, LoginError> {
        let Ok(nickname) = Nickname::new(nickname.to_owned()) else {
            return Err(LoginError::BadCredentials);
        };
        let Ok(password) = Password::new(password.to_owned()) else {
            return Err(LoginError::BadCredentials);
        };

        let Some(user) = self.gateway.fetch_user(&nickname).await? else {
            return Err(LoginError::BadCredentials);
        };

        if user.password.verify(&password)? {
            Ok(user)
        } else {
            Err(LoginError::BadCredentials)
        }
    }

    /// Point lookup used by the user search.
    pub async fn find_user(&self, nickname: &str) -> Result<Option<User>, StoreError> {
        let Ok(nickname) = Nickname::new(nickname.to_owned()) else {
            return Ok(None);
        };
        self.gateway.fetch_user(&nickname).await
    }
}
