use crate::model::auth::PasswordHash;
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{Error, Unexpected},
};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

pub const NICKNAME_MAX_LEN: usize = 50;

/// The unique user key. Non-empty and bounded; everything else about the
/// spelling is up to the user.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize)]
#[serde(transparent)]
pub struct Nickname(String);

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The nickname is invalid: {0}")]
pub struct InvalidNicknameError(String);

impl Nickname {
    pub fn new(nickname: String) -> Result<Self, InvalidNicknameError> {
        let len = nickname.chars().count();
        if len > 0 && len <= NICKNAME_MAX_LEN {
            Ok(Nickname(nickname))
        } else {
            Err(InvalidNicknameError(nickname))
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

impl Display for Nickname {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<'de> Deserialize<'de> for Nickname {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        Nickname::new(inner)
            .map_err(|err| Error::invalid_value(Unexpected::Str(&err.0), &"Nickname"))
    }
}

const BIRTH_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]-[month]-[year]");

/// A calendar date whose external representation is always `dd-MM-yyyy`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct BirthDate(Date);

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The birth date is not a valid dd-MM-yyyy date: {0}")]
pub struct InvalidBirthDateError(String);

impl BirthDate {
    #[must_use]
    pub fn new(date: Date) -> Self {
        Self(date)
    }

    #[must_use]
    pub fn get(self) -> Date {
        self.0
    }
}

impl FromStr for BirthDate {
    type Err = InvalidBirthDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s, BIRTH_DATE_FORMAT)
            .map(BirthDate)
            .map_err(|_| InvalidBirthDateError(s.to_owned()))
    }
}

impl Display for BirthDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let formatted = self.0.format(BIRTH_DATE_FORMAT).map_err(|_| std::fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl Serialize for BirthDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BirthDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        inner
            .parse()
            .map_err(|_| Error::invalid_value(Unexpected::Str(&inner), &"a dd-MM-yyyy date"))
    }
}

/// The profile fields that get denormalized onto follow edges.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize, Deserialize)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: BirthDate,
    pub bio: String,
}

/// A full user row, credential included. Immutable after registration.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct User {
    pub nickname: Nickname,
    pub password: PasswordHash,
    pub profile: Profile,
}

impl User {
    /// The denormalized snapshot written onto edge rows and returned by
    /// follower listings. Never carries the credential.
    #[must_use]
    pub fn card(&self) -> UserCard {
        UserCard {
            nickname: self.nickname.clone(),
            profile: self.profile.clone(),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize, Deserialize)]
pub struct UserCard {
    pub nickname: Nickname,
    pub profile: Profile,
}
