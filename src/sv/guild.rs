use sea_orm::sea_query::OnConflict;

use crate::{entities::guild_setting, prelude::*};

pub struct Guilds<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Guilds<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn log_channel(&self, guild_id: i64) -> Result<Option<i64>> {
    let settings =
      guild_setting::Entity::find_by_id(guild_id).one(self.db).await?;
    Ok(settings.map(|s| s.log_channel_id))
  }

  pub async fn set_log_channel(
    &self,
    guild_id: i64,
    channel_id: i64,
  ) -> Result<()> {
    let model = guild_setting::ActiveModel {
      guild_id: Set(guild_id),
      log_channel_id: Set(channel_id),
    };

    guild_setting::Entity::insert(model)
      .on_conflict(
        OnConflict::column(guild_setting::Column::GuildId)
          .update_column(guild_setting::Column::LogChannelId)
          .to_owned(),
      )
      .exec(self.db)
      .await?;

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::test_db::setup_test_db;

  #[tokio::test]
  async fn set_then_reconfigure_log_channel() {
    let db = setup_test_db().await;
    let sv = Guilds::new(&db);

    assert_eq!(sv.log_channel(10).await.unwrap(), None);

    sv.set_log_channel(10, 555).await.unwrap();
    assert_eq!(sv.log_channel(10).await.unwrap(), Some(555));

    sv.set_log_channel(10, 777).await.unwrap();
    assert_eq!(sv.log_channel(10).await.unwrap(), Some(777));
  }
}
