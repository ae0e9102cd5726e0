mod menu;
mod messages;
mod session;

use crate::messages::{Messages, MessagesError};
use crate::session::Session;
use litfass_db::client::StoreClient;
use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Error)]
enum InitError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
    #[error("Error loading message catalog: {0}")]
    Messages(#[from] MessagesError),
    #[error("Error connecting to the database: {0}")]
    Connect(sqlx::Error),
    #[error("Error applying migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("Error reading from the terminal: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Eq, PartialEq, Debug, Deserialize)]
struct Env {
    database_url: String,
    messages_file: Option<PathBuf>,
}

fn install_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "litfass_cli=debug,litfass_core=debug,litfass_db=debug,sqlx=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn get_env() -> Result<Env, InitError> {
    if let Err(e) = dotenvy::dotenv() {
        if e.not_found() {
            debug!("No .dotenv file found");
        } else {
            return Err(e.into());
        }
    }

    envy::from_env().map_err(InitError::from)
}

#[tokio::main]
async fn main() -> Result<(), InitError> {
    install_tracing();
    let env = get_env()?;

    let messages = match &env.messages_file {
        Some(path) => Messages::load(path)?,
        None => Messages::default(),
    };

    let pool = PgPoolOptions::new()
        .connect(&env.database_url)
        .await
        .map_err(InitError::Connect)?;
    let client = Arc::new(StoreClient::new(pool));
    client.run_migrations().await?;
    info!("Connected to the store");

    Session::new(client, messages).run().await?;

    Ok(())
}
