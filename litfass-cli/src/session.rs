//! The interactive line-mode session. Presentation only: every decision
//! about storage, validation, and the social graph is delegated to the
//! service layer, and failures are rendered through the message catalog.

use crate::menu::{self, Command, PreLoginCommand};
use crate::messages::Messages;
use litfass_common::model::post::Post;
use litfass_common::model::user::{User, UserCard};
use litfass_core::account::{Accounts, LoginError, RegisterError, RegistrationForm};
use litfass_core::feed::FeedAggregator;
use litfass_core::graph::{FollowStatus, GraphError, SocialGraph};
use litfass_core::post::{PostError, PostStore};
use litfass_db::gateway::Gateway;
use std::io;
use std::sync::Arc;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

const POST_TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

pub struct Session<G> {
    accounts: Accounts<G>,
    graph: SocialGraph<G>,
    feed: FeedAggregator<G>,
    posts: PostStore<G>,
    messages: Messages,
    lines: Lines<BufReader<Stdin>>,
}

impl<G: Gateway> Session<G> {
    #[must_use]
    pub fn new(gateway: Arc<G>, messages: Messages) -> Self {
        Self {
            accounts: Accounts::new(gateway.clone()),
            graph: SocialGraph::new(gateway.clone()),
            feed: FeedAggregator::new(gateway.clone()),
            posts: PostStore::new(gateway),
            messages,
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    pub async fn run(mut self) -> io::Result<()> {
        loop {
            println!("{}", menu::pre_login_menu(&self.messages));
            let Some(input) = self.read_line().await? else {
                break;
            };

            match menu::parse_pre_login(&input) {
                Some(PreLoginCommand::LogIn) => {
                    if let Some(user) = self.login_flow().await?
                        && self.main_loop(&user).await?
                    {
                        break;
                    }
                }
                Some(PreLoginCommand::Register) => self.register_flow().await?,
                Some(PreLoginCommand::Quit) => break,
                None => println!("{}", self.messages.invalid_input),
            }
        }

        println!("{}", self.messages.bye);
        Ok(())
    }

    /// Runs the post-login menu until log out, quit, or EOF. Returns whether
    /// the whole application should quit.
    async fn main_loop(&mut self, user: &User) -> io::Result<bool> {
        loop {
            println!("{}", menu::main_menu(&self.messages));
            let Some(input) = self.read_line().await? else {
                return Ok(true);
            };

            match menu::parse_command(&input) {
                Some(Command::WritePost) => self.write_post_flow(user).await?,
                Some(Command::ShowFollowers) => self.show_followers(user).await,
                Some(Command::ShowFollowing) => self.show_following(user).await,
                Some(Command::ShowFeed) => self.show_feed(user).await,
                Some(Command::Search) => self.search_flow(user).await?,
                Some(Command::EditPost) => self.edit_post_flow(user).await?,
                Some(Command::LogOut) => return Ok(false),
                Some(Command::Quit) => return Ok(true),
                None => println!("{}", self.messages.invalid_input),
            }
        }
    }

    async fn login_flow(&mut self) -> io::Result<Option<User>> {
        let Some(nickname) = self.prompt_owned(&self.messages.username.clone()).await? else {
            return Ok(None);
        };
        let Some(password) = self.prompt_owned(&self.messages.password.clone()).await? else {
            return Ok(None);
        };

        match self.accounts.login(&nickname, &password).await {
            Ok(user) => {
                println!("{} {}", self.messages.logged_in, user.nickname);
                Ok(Some(user))
            }
            Err(LoginError::BadCredentials) => {
                println!("{}", self.messages.login_failed);
                Ok(None)
            }
            Err(err @ (LoginError::Hash(_) | LoginError::Store(_))) => {
                self.print_failure(&err);
                Ok(None)
            }
        }
    }

    async fn register_flow(&mut self) -> io::Result<()> {
        println!("{}", self.messages.fill_in_registration);

        let prompts = [
            self.messages.username.clone(),
            self.messages.password.clone(),
            self.messages.rewrite_password.clone(),
            self.messages.first_name.clone(),
            self.messages.last_name.clone(),
            self.messages.birthdate.clone(),
            self.messages.bio.clone(),
        ];
        let mut answers = Vec::with_capacity(prompts.len());
        for prompt in &prompts {
            let Some(answer) = self.prompt_owned(prompt).await? else {
                return Ok(());
            };
            answers.push(answer);
        }
        let mut answers = answers.into_iter();
        let mut next_answer = || answers.next().unwrap_or_default();
        let form = RegistrationForm {
            nickname: next_answer(),
            password: next_answer(),
            repeated_password: next_answer(),
            first_name: next_answer(),
            last_name: next_answer(),
            birth_date: next_answer(),
            bio: next_answer(),
        };

        match self.accounts.register(&form).await {
            Ok(_) => println!("{}", self.messages.registration_done),
            Err(RegisterError::Rejected(violations)) => {
                for violation in violations {
                    println!("{}", self.messages.field_violation(violation));
                }
            }
            Err(err @ (RegisterError::Hash(_) | RegisterError::Store(_))) => {
                self.print_failure(&err);
            }
        }

        Ok(())
    }

    async fn write_post_flow(&mut self, user: &User) -> io::Result<()> {
        let Some(text) = self.prompt_owned(&self.messages.post_text.clone()).await? else {
            return Ok(());
        };

        match self.posts.create_post(&user.nickname, &text).await {
            Ok(_) => println!("{}", self.messages.post_created),
            Err(PostError::Length(_)) => println!("{}", self.messages.post_wrong_length),
            Err(err @ PostError::Store(_)) => self.print_failure(&err),
        }

        Ok(())
    }

    async fn edit_post_flow(&mut self, user: &User) -> io::Result<()> {
        let own_posts = match self.posts.recent_by_author(&user.nickname).await {
            Ok(posts) => posts,
            Err(err) => {
                self.print_failure(&err);
                return Ok(());
            }
        };
        if own_posts.is_empty() {
            println!("{}", self.messages.no_posts);
            return Ok(());
        }

        for (index, post) in own_posts.iter().enumerate() {
            println!("{}) {}", index + 1, render_post(post));
        }
        let Some(picked) = self.prompt_owned(&self.messages.pick_post.clone()).await? else {
            return Ok(());
        };
        let Some(post) = picked
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|number| own_posts.get(number.checked_sub(1)?))
        else {
            println!("{}", self.messages.invalid_input);
            return Ok(());
        };

        let Some(text) = self.prompt_owned(&self.messages.post_text.clone()).await? else {
            return Ok(());
        };
        match self
            .posts
            .update_post(&user.nickname, post.created_at, &text)
            .await
        {
            Ok(_) => println!("{}", self.messages.post_updated),
            Err(PostError::Length(_)) => println!("{}", self.messages.post_wrong_length),
            Err(err @ PostError::Store(_)) => self.print_failure(&err),
        }

        Ok(())
    }

    async fn show_followers(&mut self, user: &User) {
        match self.graph.followers(&user.nickname).await {
            Ok(followers) if followers.is_empty() => println!("{}", self.messages.no_followers),
            Ok(followers) => {
                for card in followers {
                    println!("{}", render_card(&card));
                }
            }
            Err(err) => self.print_failure(&err),
        }
    }

    async fn show_following(&mut self, user: &User) {
        match self.graph.following(&user.nickname).await {
            Ok(following) if following.is_empty() => println!("{}", self.messages.no_following),
            Ok(following) => {
                for nickname in following {
                    println!("{nickname}");
                }
            }
            Err(err) => self.print_failure(&err),
        }
    }

    async fn show_feed(&mut self, user: &User) {
        match self.feed.recent_posts(&user.nickname).await {
            Ok(posts) if posts.is_empty() => println!("{}", self.messages.feed_empty),
            Ok(posts) => {
                for post in posts {
                    println!("{}", render_post(&post));
                }
            }
            Err(err) => self.print_failure(&err),
        }
    }

    async fn search_flow(&mut self, user: &User) -> io::Result<()> {
        let Some(nickname) = self.prompt_owned(&self.messages.username.clone()).await? else {
            return Ok(());
        };

        let target = match self.accounts.find_user(nickname.trim()).await {
            Ok(Some(target)) => target,
            Ok(None) => {
                println!("{}", self.messages.user_not_found);
                return Ok(());
            }
            Err(err) => {
                self.print_failure(&err);
                return Ok(());
            }
        };

        println!("{}", render_card(&target.card()));
        if target.nickname == user.nickname {
            return Ok(());
        }

        match self
            .graph
            .is_following(&user.nickname, &target.nickname)
            .await
        {
            Ok(FollowStatus::NotFollowing) => {
                println!("{}", self.messages.follow_offer);
                if self.read_yes().await? {
                    match self.graph.follow(user, &target).await {
                        Ok(()) => println!("{}", self.messages.followed),
                        Err(err) => self.print_failure(&err),
                    }
                }
            }
            Ok(FollowStatus::Following) => {
                println!("{}", self.messages.unfollow_offer);
                if self.read_yes().await? {
                    match self.graph.unfollow(&user.nickname, &target.nickname).await {
                        Ok(()) => println!("{}", self.messages.unfollowed),
                        Err(err) => self.print_failure(&err),
                    }
                }
            }
            Err(GraphError::Inconsistent { .. }) => {
                println!("{}", self.messages.inconsistent_follow_state);
            }
            Err(err @ GraphError::Store(_)) => self.print_failure(&err),
        }

        Ok(())
    }

    async fn read_line(&mut self) -> io::Result<Option<String>> {
        self.lines.next_line().await
    }

    async fn prompt_owned(&mut self, label: &str) -> io::Result<Option<String>> {
        println!("{label}:");
        self.read_line().await
    }

    async fn read_yes(&mut self) -> io::Result<bool> {
        let answer = self.read_line().await?;
        Ok(answer.is_some_and(|line| line.trim().eq_ignore_ascii_case("y")))
    }

    fn print_failure(&self, err: &dyn std::error::Error) {
        println!("{}: {err}", self.messages.storage_failure);
    }
}

fn render_post(post: &Post) -> String {
    let timestamp = post.created_at.format(POST_TIME_FORMAT).unwrap_or_default();
    format!("[{timestamp}] {}: {}", post.author, post.text.get())
}

fn render_card(card: &UserCard) -> String {
    format!(
        "{} - {} {} ({})",
        card.nickname, card.profile.first_name, card.profile.last_name, card.profile.birth_date
    )
}
