//! PlayerStat entity - one row per extracted player per match
//!
//! `summoner_name_snapshot` is denormalized on purpose: it records what
//! the scoreboard said at ingestion time, insulated from later account
//! changes. `account_id` is NULL for players who are not registered
//! members.

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "player_stats")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub stat_id: i32,
  pub match_hash: String,
  pub account_id: Option<i32>,
  pub summoner_name_snapshot: String,
  pub champion_name: String,
  /// NULL when the match's winning team is unknown.
  pub win: Option<bool>,
  pub team: i32,
  pub kills: i32,
  pub deaths: i32,
  pub assists: i32,
  pub damage: i64,
  pub gold: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::lol_match::Entity",
    from = "Column::MatchHash",
    to = "super::lol_match::Column::MatchHash"
  )]
  Match,
  #[sea_orm(
    belongs_to = "super::account::Entity",
    from = "Column::AccountId",
    to = "super::account::Column::AccountId"
  )]
  Account,
}

impl Related<super::lol_match::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Match.def()
  }
}

impl Related<super::account::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Account.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
