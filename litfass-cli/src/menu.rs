//! Menu keys, parsing, and rendering. One letter per action, matching the
//! prompts the message catalog describes.

use crate::messages::Messages;
use std::fmt::Write;

pub const LOGIN: &str = "L";
pub const REGISTER: &str = "R";
pub const QUIT: &str = "Q";

pub const WRITE: &str = "W";
pub const FOLLOWERS: &str = "F";
pub const FOLLOWING: &str = "G";
pub const POSTS: &str = "P";
pub const SEARCH: &str = "S";
pub const EDIT: &str = "E";
pub const LOGOUT: &str = "O";

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum PreLoginCommand {
    LogIn,
    Register,
    Quit,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Command {
    WritePost,
    ShowFollowers,
    ShowFollowing,
    ShowFeed,
    Search,
    EditPost,
    LogOut,
    Quit,
}

#[must_use]
pub fn parse_pre_login(input: &str) -> Option<PreLoginCommand> {
    match input.trim().to_ascii_uppercase().as_str() {
        LOGIN => Some(PreLoginCommand::LogIn),
        REGISTER => Some(PreLoginCommand::Register),
        QUIT => Some(PreLoginCommand::Quit),
        _ => None,
    }
}

#[must_use]
pub fn parse_command(input: &str) -> Option<Command> {
    match input.trim().to_ascii_uppercase().as_str() {
        WRITE => Some(Command::WritePost),
        FOLLOWERS => Some(Command::ShowFollowers),
        FOLLOWING => Some(Command::ShowFollowing),
        POSTS => Some(Command::ShowFeed),
        SEARCH => Some(Command::Search),
        EDIT => Some(Command::EditPost),
        LOGOUT => Some(Command::LogOut),
        QUIT => Some(Command::Quit),
        _ => None,
    }
}

#[must_use]
pub fn pre_login_menu(messages: &Messages) -> String {
    let mut menu = String::new();
    let _ = writeln!(menu, "{}", messages.greeting_new);
    let _ = writeln!(menu, "{LOGIN}: {}", messages.log_in);
    let _ = writeln!(menu, "{REGISTER}: {}", messages.register);
    let _ = write!(menu, "{QUIT}: {}", messages.quit);
    menu
}

#[must_use]
pub fn main_menu(messages: &Messages) -> String {
    let mut menu = String::new();
    let _ = writeln!(menu, "{}:", messages.select);
    let _ = writeln!(menu, "{WRITE}: {}", messages.post);
    let _ = writeln!(menu, "{FOLLOWERS}: {}", messages.show_followers);
    let _ = writeln!(menu, "{FOLLOWING}: {}", messages.show_following);
    let _ = writeln!(menu, "{POSTS}: {}", messages.show_posts);
    let _ = writeln!(menu, "{SEARCH}: {}", messages.search_for_users);
    let _ = writeln!(menu, "{EDIT}: {}", messages.edit_post);
    let _ = writeln!(menu, "{LOGOUT}: {}", messages.log_out);
    let _ = write!(menu, "{QUIT}: {}", messages.quit);
    menu
}
