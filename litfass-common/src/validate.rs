//! Pure field predicates shared by registration and the CLI prompts. Bounds
//! are character counts; both ends of a range are inclusive.

use thiserror::Error;

pub const PASSWORD_MIN_LEN: usize = 4;
pub const PASSWORD_MAX_LEN: usize = 99;
pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 99;
pub const BIO_MAX_LEN: usize = 2999;

/// One reason a registration form was rejected. A single submission can
/// collect several of these.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Error)]
pub enum FieldViolation {
    #[error("The nickname is empty or too long")]
    NicknameLength,
    #[error("The nickname is already taken")]
    NicknameTaken,
    #[error("The password length is out of bounds")]
    PasswordLength,
    #[error("The passwords do not match")]
    PasswordMismatch,
    #[error("The first name length is out of bounds")]
    FirstNameLength,
    #[error("The last name length is out of bounds")]
    LastNameLength,
    #[error("The birth date is not a valid dd-MM-yyyy date")]
    BirthDate,
    #[error("The bio is too long")]
    BioLength,
}

#[must_use]
pub fn password_length_ok(password: &str) -> bool {
    (PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&password.chars().count())
}

#[must_use]
pub fn name_length_ok(name: &str) -> bool {
    (NAME_MIN_LEN..=NAME_MAX_LEN).contains(&name.chars().count())
}

#[must_use]
pub fn bio_length_ok(bio: &str) -> bool {
    bio.chars().count() <= BIO_MAX_LEN
}

#[cfg(test)]
mod tests {
    use crate::validate::{bio_length_ok, name_length_ok, password_length_ok};

    #[test]
    fn password_lengths() {
        assert!(!password_length_ok("abc"));
        assert!(!password_length_ok(&"a".repeat(100)));

        assert!(password_length_ok("abcd"));
        assert!(password_length_ok(&"a".repeat(99)));
    }

    #[test]
    fn name_lengths() {
        assert!(!name_length_ok("ab"));
        assert!(!name_length_ok(&"a".repeat(100)));

        assert!(name_length_ok("Ada"));
    }

    #[test]
    fn bio_lengths() {
        assert!(bio_length_ok(""));
        assert!(bio_length_ok(&"a".repeat(2999)));
        assert!(!bio_length_ok(&"a".repeat(3000)));
    }
}
