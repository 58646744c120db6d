//! Match entity - one row per ingested scoreboard
//!
//! The primary key is the content fingerprint (SHA-256 over the sorted
//! player/KDA pairs), which is the only dedup mechanism for submissions.

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "matches")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub match_hash: String,
  /// 1 or 2; NULL when the scoreboard result could not be read.
  pub winning_team: Option<i32>,
  pub processed_at: NaiveDateTime,
  pub screenshot_url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "super::player_stat::Entity")]
  PlayerStats,
}

impl Related<super::player_stat::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::PlayerStats.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
