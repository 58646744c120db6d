use sea_orm_migration::prelude::*;

use super::m20260601_000002_create_accounts::Accounts;
use super::m20260601_000003_create_matches::Matches;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(PlayerStats::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(PlayerStats::StatId)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(PlayerStats::MatchHash).string().not_null())
          .col(ColumnDef::new(PlayerStats::AccountId).integer().null())
          .col(
            ColumnDef::new(PlayerStats::SummonerNameSnapshot)
              .string()
              .not_null(),
          )
          .col(ColumnDef::new(PlayerStats::ChampionName).string().not_null())
          .col(ColumnDef::new(PlayerStats::Win).boolean().null())
          .col(ColumnDef::new(PlayerStats::Team).integer().not_null())
          .col(ColumnDef::new(PlayerStats::Kills).integer().not_null().default(0))
          .col(ColumnDef::new(PlayerStats::Deaths).integer().not_null().default(0))
          .col(ColumnDef::new(PlayerStats::Assists).integer().not_null().default(0))
          .col(ColumnDef::new(PlayerStats::Damage).big_integer().not_null().default(0))
          .col(ColumnDef::new(PlayerStats::Gold).big_integer().not_null().default(0))
          .foreign_key(
            ForeignKey::create()
              .name("fk_player_stats_match")
              .from(PlayerStats::Table, PlayerStats::MatchHash)
              .to(Matches::Table, Matches::MatchHash)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_player_stats_account")
              .from(PlayerStats::Table, PlayerStats::AccountId)
              .to(Accounts::Table, Accounts::AccountId)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_player_stats_match")
          .table(PlayerStats::Table)
          .col(PlayerStats::MatchHash)
          .to_owned(),
      )
      .await?;

    // Profile/history resolve rows by the denormalized name snapshot.
    manager
      .create_index(
        Index::create()
          .name("idx_player_stats_snapshot")
          .table(PlayerStats::Table)
          .col(PlayerStats::SummonerNameSnapshot)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(PlayerStats::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum PlayerStats {
  Table,
  StatId,
  MatchHash,
  AccountId,
  SummonerNameSnapshot,
  ChampionName,
  Win,
  Team,
  Kills,
  Deaths,
  Assists,
  Damage,
  Gold,
}
