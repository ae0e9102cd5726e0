//! User-visible strings, loaded from a JSON catalog so deployments can ship
//! translated variants. Missing keys fall back to the built-in English.

use litfass_common::validate::FieldViolation;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MessagesError {
    #[error("Error reading message catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error parsing message catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Eq, PartialEq, Debug, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub greeting_new: String,
    pub log_in: String,
    pub register: String,
    pub quit: String,
    pub select: String,
    pub post: String,
    pub show_followers: String,
    pub show_following: String,
    pub show_posts: String,
    pub search_for_users: String,
    pub edit_post: String,
    pub log_out: String,
    pub invalid_input: String,
    pub bye: String,

    pub username: String,
    pub password: String,
    pub rewrite_password: String,
    pub first_name: String,
    pub last_name: String,
    pub birthdate: String,
    pub bio: String,
    pub fill_in_registration: String,
    pub registration_done: String,
    pub login_failed: String,
    pub logged_in: String,

    pub post_text: String,
    pub post_created: String,
    pub post_updated: String,
    pub pick_post: String,
    pub no_posts: String,
    pub no_followers: String,
    pub no_following: String,
    pub feed_empty: String,

    pub user_not_found: String,
    pub follow_offer: String,
    pub unfollow_offer: String,
    pub followed: String,
    pub unfollowed: String,
    pub inconsistent_follow_state: String,

    pub nickname_wrong_length: String,
    pub duplicated_login: String,
    pub password_wrong_length: String,
    pub passwords_dont_match: String,
    pub first_name_wrong_length: String,
    pub last_name_wrong_length: String,
    pub wrong_birth_date: String,
    pub bio_wrong_length: String,
    pub post_wrong_length: String,

    pub storage_failure: String,
}

impl Messages {
    pub fn load(path: &Path) -> Result<Self, MessagesError> {
        let contents = fs::read_to_string(path)?;
        let messages = serde_json::from_str(&contents)?;
        Ok(messages)
    }

    #[must_use]
    pub fn field_violation(&self, violation: FieldViolation) -> &str {
        match violation {
            FieldViolation::NicknameLength => &self.nickname_wrong_length,
            FieldViolation::NicknameTaken => &self.duplicated_login,
            FieldViolation::PasswordLength => &self.password_wrong_length,
            FieldViolation::PasswordMismatch => &self.passwords_dont_match,
            FieldViolation::FirstNameLength => &self.first_name_wrong_length,
            FieldViolation::LastNameLength => &self.last_name_wrong_length,
            FieldViolation::BirthDate => &self.wrong_birth_date,
            FieldViolation::BioLength => &self.bio_wrong_length,
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            greeting_new: "Welcome! What would you like to do?".to_owned(),
            log_in: "Log in".to_owned(),
            register: "Register".to_owned(),
            quit: "Quit".to_owned(),
            select: "Select an action".to_owned(),
            post: "Write a post".to_owned(),
            show_followers: "Show your followers".to_owned(),
            show_following: "Show who you follow".to_owned(),
            show_posts: "Show recent posts from people you follow".to_owned(),
            search_for_users: "Search for a user".to_owned(),
            edit_post: "Edit one of your posts".to_owned(),
            log_out: "Log out".to_owned(),
            invalid_input: "Invalid input, try again.".to_owned(),
            bye: "Bye!".to_owned(),

            username: "Username".to_owned(),
            password: "Password".to_owned(),
            rewrite_password: "Repeat password".to_owned(),
            first_name: "First name".to_owned(),
            last_name: "Last name".to_owned(),
            birthdate: "Birth date (dd-MM-yyyy)".to_owned(),
            bio: "Bio".to_owned(),
            fill_in_registration: "Fill in the registration form.".to_owned(),
            registration_done: "Registration complete, you can log in now.".to_owned(),
            login_failed: "Unknown nickname or wrong password.".to_owned(),
            logged_in: "Logged in as".to_owned(),

            post_text: "Post text".to_owned(),
            post_created: "Post published.".to_owned(),
            post_updated: "Post updated.".to_owned(),
            pick_post: "Number of the post to edit".to_owned(),
            no_posts: "You have no posts yet.".to_owned(),
            no_followers: "Nobody follows you yet.".to_owned(),
            no_following: "You don't follow anyone yet.".to_owned(),
            feed_empty: "Nothing to show. Follow someone first!".to_owned(),

            user_not_found: "No user with that nickname.".to_owned(),
            follow_offer: "Follow this user? (y/n)".to_owned(),
            unfollow_offer: "You follow this user. Unfollow? (y/n)".to_owned(),
            followed: "Followed.".to_owned(),
            unfollowed: "Unfollowed.".to_owned(),
            inconsistent_follow_state:
                "Follow state for this user is inconsistent. Please contact the administrator."
                    .to_owned(),

            nickname_wrong_length: "The nickname must be 1 to 50 characters.".to_owned(),
            duplicated_login: "That nickname is already taken.".to_owned(),
            password_wrong_length: "The password must be 4 to 99 characters.".to_owned(),
            passwords_dont_match: "The passwords don't match.".to_owned(),
            first_name_wrong_length: "The first name must be 3 to 99 characters.".to_owned(),
            last_name_wrong_length: "The last name must be 3 to 99 characters.".to_owned(),
            wrong_birth_date: "The birth date must be a valid dd-MM-yyyy date.".to_owned(),
            bio_wrong_length: "The bio must be under 3000 characters.".to_owned(),
            post_wrong_length: "The post must be 1 to 399 characters.".to_owned(),

            storage_failure: "Storage problem".to_owned(),
        }
    }
}
