use sea_orm::SqlErr;

use crate::{
  entities::{lol_match, player_stat},
  prelude::*,
};

pub struct Matches<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Matches<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn exists(&self, hash: &str) -> Result<bool> {
    let found = lol_match::Entity::find_by_id(hash).one(self.db).await?;
    Ok(found.is_some())
  }

  /// The first durable write of an ingestion. A unique violation here
  /// means another submission of the same screenshot won the race; the
  /// loser reports a plain duplicate and must not roll anything back.
  pub async fn insert(
    &self,
    hash: &str,
    winning_team: Option<i32>,
    screenshot_url: &str,
  ) -> Result<lol_match::Model> {
    let model = lol_match::ActiveModel {
      match_hash: Set(hash.to_owned()),
      winning_team: Set(winning_team),
      processed_at: Set(Utc::now().naive_utc()),
      screenshot_url: Set(screenshot_url.to_owned()),
    };

    match model.insert(self.db).await {
      Ok(inserted) => Ok(inserted),
      Err(err) => match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
          Err(Error::DuplicateMatch)
        }
        _ => Err(err.into()),
      },
    }
  }

  /// Compensating delete: removes the match (and, by cascade, any stat
  /// rows) keyed by fingerprint. Deleting an already-removed or
  /// never-inserted hash is a no-op, so callers may invoke this freely.
  pub async fn remove(&self, hash: &str) -> Result<()> {
    lol_match::Entity::delete_by_id(hash).exec(self.db).await?;
    Ok(())
  }

  pub async fn insert_stats(
    &self,
    rows: Vec<player_stat::ActiveModel>,
  ) -> Result<()> {
    player_stat::Entity::insert_many(rows).exec(self.db).await?;
    Ok(())
  }

  pub async fn stats_for(
    &self,
    hash: &str,
  ) -> Result<Vec<player_stat::Model>> {
    let rows = player_stat::Entity::find()
      .filter(player_stat::Column::MatchHash.eq(hash))
      .all(self.db)
      .await?;
    Ok(rows)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::test_db::setup_test_db;

  #[tokio::test]
  async fn duplicate_insert_maps_to_conflict() {
    let db = setup_test_db().await;
    let sv = Matches::new(&db);

    sv.insert("abc123", Some(1), "https://cdn/x.png").await.unwrap();
    let err = sv.insert("abc123", Some(2), "https://cdn/y.png").await;
    assert!(matches!(err, Err(Error::DuplicateMatch)));
  }

  #[tokio::test]
  async fn remove_is_idempotent() {
    let db = setup_test_db().await;
    let sv = Matches::new(&db);

    sv.insert("abc123", None, "https://cdn/x.png").await.unwrap();
    sv.remove("abc123").await.unwrap();
    // second compensation and unknown hashes are no-ops
    sv.remove("abc123").await.unwrap();
    sv.remove("never-inserted").await.unwrap();

    assert!(!sv.exists("abc123").await.unwrap());
  }
}
