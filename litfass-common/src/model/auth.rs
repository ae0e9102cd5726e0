use crate::validate;
use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use std::fmt::{Debug, Formatter};
use thiserror::Error;

/// A cleartext credential, length-checked and held only for as long as it
/// takes to hash or verify it.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Password(String);

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The password length is out of bounds")]
pub struct InvalidPasswordError;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Error)]
#[error("Hashing the password failed: {0}")]
pub struct PasswordHashError(password_hash::Error);

impl Password {
    pub fn new(password: String) -> Result<Self, InvalidPasswordError> {
        if validate::password_length_ok(&password) {
            Ok(Password(password))
        } else {
            Err(InvalidPasswordError)
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }

    pub fn hash(&self) -> Result<PasswordHash, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(self.0.as_bytes(), &salt)
            .map_err(PasswordHashError)?;

        Ok(PasswordHash(hash.to_string()))
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Password").field(&"[redacted]").finish()
    }
}

/// A PHC-format hash string, the only credential form the store ever sees.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct PasswordHash(String);

impl PasswordHash {
    #[must_use]
    pub fn new(phc_string: String) -> Self {
        Self(phc_string)
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }

    pub fn verify(&self, password: &Password) -> Result<bool, PasswordHashError> {
        let parsed = password_hash::PasswordHash::new(&self.0).map_err(PasswordHashError)?;

        match Argon2::default().verify_password(password.get().as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError(err)),
        }
    }
}

impl Debug for PasswordHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PasswordHash").field(&"[redacted]").finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::model::auth::Password;

    #[test]
    fn password_bounds() {
        assert!(Password::new("abc".to_owned()).is_err());
        assert!(Password::new("a".repeat(100)).is_err());
        assert!(Password::new("abcd".to_owned()).is_ok());
    }

    #[test]
    fn hash_and_verify() {
        let password = Password::new("hunter22".to_owned()).unwrap();
        let hash = password.hash().unwrap();

        assert!(hash.verify(&password).unwrap());

        let other = Password::new("hunter23".to_owned()).unwrap();
        assert!(!hash.verify(&other).unwrap());
    }
}
