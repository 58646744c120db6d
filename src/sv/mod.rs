pub mod account;
pub mod guild;
pub mod ingest;
pub mod matches;
pub mod stats;
pub mod user;

pub use account::{Accounts, validate_nickname};
pub use guild::Guilds;
pub use ingest::Ingest;
pub use matches::Matches;
pub use stats::{RankingMode, Stats};
pub use user::Users;

#[cfg(test)]
pub(crate) mod test_db {
  use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, DbBackend, Schema,
  };

  use crate::entities::*;

  pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();

    let schema = Schema::new(DbBackend::Sqlite);
    for stmt in [
      schema.create_table_from_entity(user::Entity),
      schema.create_table_from_entity(account::Entity),
      schema.create_table_from_entity(lol_match::Entity),
      schema.create_table_from_entity(player_stat::Entity),
      schema.create_table_from_entity(guild_setting::Entity),
    ] {
      db.execute(db.get_database_backend().build(&stmt)).await.unwrap();
    }

    db
  }
}
