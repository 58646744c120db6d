//! GuildSetting entity - per-guild bot configuration

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "guild_settings")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub guild_id: i64,
  /// Channel that receives processed-match log embeds.
  pub log_channel_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
