use litfass_common::model::ModelValidationError;
use litfass_common::model::auth::PasswordHash;
use litfass_common::model::post::{Post, PostText};
use litfass_common::model::user::{Nickname, Profile, User, UserCard};
use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Clone, Eq, PartialEq, Debug, Default, FromRow)]
pub struct UserRecord {
    pub nick: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub bio: String,
}

#[derive(Clone, Eq, PartialEq, Debug, FromRow)]
pub struct PostRecord {
    pub author_nick: String,
    pub created_at: OffsetDateTime,
    pub text: String,
}

/// One row of the `followers` table: the edge key plus the follower's
/// denormalized profile.
#[derive(Clone, Eq, PartialEq, Debug, Default, FromRow)]
pub struct FollowerRecord {
    pub nick: String,
    pub follower_nick: String,
    pub follower_first_name: String,
    pub follower_last_name: String,
    pub follower_birth_date: String,
    pub follower_bio: String,
}

/// One row of the `following` table, the mirror replica of
/// [`FollowerRecord`].
#[derive(Clone, Eq, PartialEq, Debug, Default, FromRow)]
pub struct FollowingRecord {
    pub nick: String,
    pub following_nick: String,
    pub following_first_name: String,
    pub following_last_name: String,
    pub following_birth_date: String,
    pub following_bio: String,
}

impl TryFrom<UserRecord> for User {
    type Error = ModelValidationError;

    fn try_from(value: UserRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            nickname: Nickname::new(value.nick)?,
            password: PasswordHash::new(value.password),
            profile: Profile {
                first_name: value.first_name,
                last_name: value.last_name,
                birth_date: value.birth_date.parse()?,
                bio: value.bio,
            },
        })
    }
}

impl TryFrom<PostRecord> for Post {
    type Error = ModelValidationError;

    fn try_from(value: PostRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            author: Nickname::new(value.author_nick)?,
            created_at: value.created_at,
            text: PostText::new(value.text)?,
        })
    }
}

impl TryFrom<FollowerRecord> for UserCard {
    type Error = ModelValidationError;

    fn try_from(value: FollowerRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            nickname: Nickname::new(value.follower_nick)?,
            profile: Profile {
                first_name: value.follower_first_name,
                last_name: value.follower_last_name,
                birth_date: value.follower_birth_date.parse()?,
                bio: value.follower_bio,
            },
        })
    }
}

impl TryFrom<FollowingRecord> for UserCard {
    type Error = ModelValidationError;

    fn try_from(value: FollowingRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            nickname: Nickname::new(value.following_nick)?,
            profile: Profile {
                first_name: value.following_first_name,
                last_name: value.following_last_name,
                birth_date: value.following_birth_date.parse()?,
                bio: value.following_bio,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::record::{FollowerRecord, UserRecord};
    use litfass_common::model::user::{User, UserCard};

    fn user_record() -> UserRecord {
        UserRecord {
            nick: "ada".to_owned(),
            password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_owned(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            birth_date: "10-12-1815".to_owned(),
            bio: String::new(),
        }
    }

    #[test]
    fn user_record_converts() {
        let user = User::try_from(user_record()).unwrap();
        assert_eq!(user.nickname.get(), "ada");
        assert_eq!(user.profile.birth_date.to_string(), "10-12-1815");
    }

    #[test]
    fn invalid_birth_date_is_rejected() {
        let mut record = user_record();
        record.birth_date = "not-a-date".to_owned();
        assert!(User::try_from(record).is_err());
    }

    #[test]
    fn empty_nick_is_rejected() {
        let record = FollowerRecord {
            nick: "ada".to_owned(),
            follower_birth_date: "01-01-2000".to_owned(),
            ..FollowerRecord::default()
        };
        assert!(UserCard::try_from(record).is_err());
    }
}
