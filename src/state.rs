use crate::{config::Config, gemini::Gemini, migration::Migrator, prelude::*, sv};

/// Per-request bundle of service handles borrowing the shared connection.
pub struct Services<'a> {
  pub users: sv::Users<'a>,
  pub accounts: sv::Accounts<'a>,
  pub matches: sv::Matches<'a>,
  pub stats: sv::Stats<'a>,
  pub guilds: sv::Guilds<'a>,
}

/// Best-effort critical-alert channel: a Discord webhook, when configured.
pub struct Alerts {
  http: reqwest::Client,
  url: Option<String>,
}

impl Alerts {
  pub fn new(url: Option<String>) -> Self {
    Self { http: reqwest::Client::new(), url }
  }

  /// Failures to deliver an alert are logged and dropped; alerting must
  /// never fail the operation that raised it.
  pub async fn critical(&self, text: &str) {
    let Some(url) = &self.url else { return };
    let body = json::json!({ "content": format!("🚨 {text}") });
    if let Err(err) = self.http.post(url).json(&body).send().await {
      error!("failed to deliver webhook alert: {err}");
    }
  }
}

pub struct AppState {
  pub db: DatabaseConnection,
  pub gemini: Gemini,
  pub alerts: Alerts,
  pub config: Config,
}

impl AppState {
  pub async fn new(config: Config) -> Self {
    info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
      .await
      .expect("Failed to connect to database");

    info!("Running migrations...");
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    let gemini = Gemini::new(config.gemini_api_key.clone());
    let alerts = Alerts::new(config.webhook_logs_url.clone());

    Self { db, gemini, alerts, config }
  }

  pub fn sv(&self) -> Services<'_> {
    Services {
      users: sv::Users::new(&self.db),
      accounts: sv::Accounts::new(&self.db),
      matches: sv::Matches::new(&self.db),
      stats: sv::Stats::new(&self.db),
      guilds: sv::Guilds::new(&self.db),
    }
  }

  pub fn ingest(&self) -> sv::Ingest<'_> {
    sv::Ingest::new(&self.db).with_alerts(&self.alerts)
  }
}
