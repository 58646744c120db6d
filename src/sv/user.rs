use sea_orm::sea_query::OnConflict;

use crate::{entities::user, prelude::*};

pub struct Users<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Users<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Insert-or-refresh keyed by Discord id; the tag is a display-name
  /// snapshot and follows whatever the user currently calls themselves.
  pub async fn upsert(&self, discord_id: i64, discord_tag: &str) -> Result<()> {
    let model = user::ActiveModel {
      discord_id: Set(discord_id),
      discord_tag: Set(discord_tag.to_owned()),
    };

    user::Entity::insert(model)
      .on_conflict(
        OnConflict::column(user::Column::DiscordId)
          .update_column(user::Column::DiscordTag)
          .to_owned(),
      )
      .exec(self.db)
      .await?;

    Ok(())
  }

  pub async fn by_id(&self, discord_id: i64) -> Result<Option<user::Model>> {
    let user = user::Entity::find_by_id(discord_id).one(self.db).await?;
    Ok(user)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::test_db::setup_test_db;

  #[tokio::test]
  async fn upsert_refreshes_tag() {
    let db = setup_test_db().await;
    let sv = Users::new(&db);

    sv.upsert(42, "old#0001").await.unwrap();
    sv.upsert(42, "new#0001").await.unwrap();

    let user = sv.by_id(42).await.unwrap().unwrap();
    assert_eq!(user.discord_tag, "new#0001");
  }
}
