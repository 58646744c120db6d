use sea_orm::SqlErr;

use crate::{entities::account, prelude::*};

pub const NICKNAME_MIN: usize = 3;
pub const NICKNAME_MAX: usize = 16;

/// Trims and length-checks a requested summoner name (3-16 chars).
pub fn validate_nickname(raw: &str) -> Result<&str> {
  let name = raw.trim();
  let len = name.chars().count();
  if len < NICKNAME_MIN || len > NICKNAME_MAX {
    return Err(Error::InvalidNickname);
  }
  Ok(name)
}

pub struct Accounts<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Accounts<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn by_owner(
    &self,
    discord_id: i64,
  ) -> Result<Option<account::Model>> {
    let account = account::Entity::find()
      .filter(account::Column::OwnerDiscordId.eq(discord_id))
      .one(self.db)
      .await?;
    Ok(account)
  }

  pub async fn by_name(&self, name: &str) -> Result<Option<account::Model>> {
    let account = account::Entity::find()
      .filter(account::Column::SummonerName.eq(name))
      .one(self.db)
      .await?;
    Ok(account)
  }

  /// Bulk lookup for ingestion: all accounts whose summoner name appears
  /// on the extracted scoreboard.
  pub async fn by_names(&self, names: &[String]) -> Result<Vec<account::Model>> {
    let accounts = account::Entity::find()
      .filter(account::Column::SummonerName.is_in(names.iter().cloned()))
      .all(self.db)
      .await?;
    Ok(accounts)
  }

  /// Creates the account link. The unique constraints are the
  /// authoritative duplicate checks: a violation on either column is
  /// mapped to the matching conflict error, which closes the race left
  /// open by any earlier check-then-insert lookups.
  pub async fn link(
    &self,
    discord_id: i64,
    summoner_name: &str,
  ) -> Result<account::Model> {
    let model = account::ActiveModel {
      owner_discord_id: Set(discord_id),
      summoner_name: Set(summoner_name.to_owned()),
      linked_at: Set(Utc::now().naive_utc()),
      ..Default::default()
    };

    match model.insert(self.db).await {
      Ok(account) => Ok(account),
      Err(err) => match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg))
          if msg.contains("owner_discord_id") =>
        {
          let existing = self
            .by_owner(discord_id)
            .await?
            .map(|account| account.summoner_name)
            .unwrap_or_else(|| summoner_name.to_owned());
          Err(Error::AccountLinked(existing))
        }
        Some(SqlErr::UniqueConstraintViolation(_)) => {
          Err(Error::NicknameTaken(summoner_name.to_owned()))
        }
        _ => Err(err.into()),
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{sv, sv::test_db::setup_test_db};

  async fn seed_user(db: &DatabaseConnection, id: i64) {
    sv::Users::new(db).upsert(id, &format!("user{id}#0001")).await.unwrap();
  }

  #[test]
  fn nickname_boundaries() {
    assert!(matches!(validate_nickname("ab"), Err(Error::InvalidNickname)));
    assert_eq!(validate_nickname("abc").unwrap(), "abc");
    assert_eq!(validate_nickname("exactly16chars!!").unwrap(), "exactly16chars!!");
    assert!(matches!(
      validate_nickname("seventeen chars!!"),
      Err(Error::InvalidNickname)
    ));
    // surrounding whitespace does not count towards the length
    assert_eq!(validate_nickname("  abc  ").unwrap(), "abc");
  }

  #[tokio::test]
  async fn link_creates_account() {
    let db = setup_test_db().await;
    seed_user(&db, 1).await;

    let account = Accounts::new(&db).link(1, "Faker").await.unwrap();
    assert_eq!(account.owner_discord_id, 1);
    assert_eq!(account.summoner_name, "Faker");
  }

  #[tokio::test]
  async fn second_account_for_same_owner_is_rejected() {
    let db = setup_test_db().await;
    seed_user(&db, 1).await;
    let sv = Accounts::new(&db);

    sv.link(1, "Faker").await.unwrap();
    let err = sv.link(1, "Chovy").await.unwrap_err();
    assert!(matches!(err, Error::AccountLinked(name) if name == "Faker"));
  }

  #[tokio::test]
  async fn taken_nickname_is_rejected() {
    let db = setup_test_db().await;
    seed_user(&db, 1).await;
    seed_user(&db, 2).await;
    let sv = Accounts::new(&db);

    sv.link(1, "Faker").await.unwrap();
    let err = sv.link(2, "Faker").await.unwrap_err();
    assert!(matches!(err, Error::NicknameTaken(name) if name == "Faker"));
  }

  #[tokio::test]
  async fn bulk_lookup_matches_scoreboard_names() {
    let db = setup_test_db().await;
    seed_user(&db, 1).await;
    seed_user(&db, 2).await;
    let sv = Accounts::new(&db);

    sv.link(1, "Faker").await.unwrap();
    sv.link(2, "Chovy").await.unwrap();

    let names =
      vec!["Faker".to_owned(), "Chovy".to_owned(), "Nobody".to_owned()];
    let found = sv.by_names(&names).await.unwrap();
    assert_eq!(found.len(), 2);
  }
}
