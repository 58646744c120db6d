//! riftlog - Discord bot for a League of Legends community
//!
//! Architecture:
//! - SeaORM for database access (SQLite)
//! - Serenity for Discord slash commands
//! - Gemini vision call for scoreboard extraction
//! - Tokio for async runtime

mod config;
mod discord;
mod entities;
mod error;
mod gemini;
mod migration;
mod prelude;
mod state;
mod sv;
mod utils;

use std::sync::Arc;

use serenity::all::{Client, GatewayIntents};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Config;
use crate::prelude::*;
use crate::state::AppState;

#[tokio::main]
async fn main() {
  dotenvy::dotenv().ok();

  // Initialize tracing
  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "riftlog=debug,serenity=warn,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  // Load configuration from environment; abort on anything missing
  let config = Config::from_env().expect("Invalid environment configuration");

  info!("Starting riftlog v{}", env!("CARGO_PKG_VERSION"));

  // Initialize application state (connects + migrates the database)
  let app = Arc::new(AppState::new(config).await);

  // Slash commands need no privileged intents
  let intents = GatewayIntents::non_privileged();

  let mut client = Client::builder(&app.config.discord_token, intents)
    .event_handler(discord::Handler::new(app.clone()))
    .await
    .expect("Failed to create Discord client");

  if let Err(err) = client.start().await {
    error!("Discord client error: {err}");
  }
}
