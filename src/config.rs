//! Environment configuration, validated once at startup

use std::env;

use anyhow::{Context, bail};

#[derive(Debug, Clone)]
pub struct Config {
  pub discord_token: String,
  pub database_url: String,
  pub gemini_api_key: String,
  /// When set, slash commands are registered guild-scoped (instant
  /// propagation) instead of globally.
  pub guild_id: Option<u64>,
  /// Discord webhook for critical alerts (rollback failures).
  pub webhook_logs_url: Option<String>,
}

impl Config {
  pub fn from_env() -> anyhow::Result<Self> {
    let discord_token =
      env::var("DISCORD_TOKEN").context("DISCORD_TOKEN not set")?;
    if discord_token.trim().is_empty() {
      bail!("DISCORD_TOKEN is empty");
    }

    let gemini_api_key =
      env::var("GEMINI_API_KEY").context("GEMINI_API_KEY not set")?;
    if gemini_api_key.trim().is_empty() {
      bail!("GEMINI_API_KEY is empty");
    }

    let database_url = env::var("DATABASE_URL")
      .unwrap_or_else(|_| "sqlite:riftlog.db?mode=rwc".into());

    let guild_id = match env::var("GUILD_ID") {
      Ok(raw) => {
        Some(raw.trim().parse().context("GUILD_ID must be a numeric id")?)
      }
      Err(_) => None,
    };

    let webhook_logs_url = env::var("WEBHOOK_LOGS_URL").ok();
    if let Some(url) = &webhook_logs_url
      && !url.starts_with("http")
    {
      bail!("WEBHOOK_LOGS_URL must be an http(s) URL");
    }

    Ok(Self {
      discord_token,
      database_url,
      gemini_api_key,
      guild_id,
      webhook_logs_url,
    })
  }
}
