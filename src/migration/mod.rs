//! Database migrations using SeaORM

use sea_orm_migration::prelude::*;

mod m20260601_000001_create_users;
mod m20260601_000002_create_accounts;
mod m20260601_000003_create_matches;
mod m20260601_000004_create_player_stats;
mod m20260601_000005_create_guild_settings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![
      Box::new(m20260601_000001_create_users::Migration),
      Box::new(m20260601_000002_create_accounts::Migration),
      Box::new(m20260601_000003_create_matches::Migration),
      Box::new(m20260601_000004_create_player_stats::Migration),
      Box::new(m20260601_000005_create_guild_settings::Migration),
    ]
  }
}
