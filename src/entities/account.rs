//! Account entity - the single LoL account linked to a Discord user
//!
//! Both unique columns are load-bearing: they are the authoritative
//! duplicate checks behind `/register` (the pre-insert lookups only exist
//! for friendlier messages).

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub account_id: i32,
  #[sea_orm(unique)]
  pub owner_discord_id: i64,
  #[sea_orm(unique)]
  pub summoner_name: String,
  pub linked_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::user::Entity",
    from = "Column::OwnerDiscordId",
    to = "super::user::Column::DiscordId"
  )]
  User,
  #[sea_orm(has_many = "super::player_stat::Entity")]
  PlayerStats,
}

impl Related<super::user::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::User.def()
  }
}

impl Related<super::player_stat::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::PlayerStats.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
