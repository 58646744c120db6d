use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Matches::Table)
          .if_not_exists()
          .col(
            // Content fingerprint over the sorted player/KDA pairs.
            ColumnDef::new(Matches::MatchHash)
              .string()
              .not_null()
              .primary_key(),
          )
          .col(ColumnDef::new(Matches::WinningTeam).integer().null())
          .col(ColumnDef::new(Matches::ProcessedAt).date_time().not_null())
          .col(ColumnDef::new(Matches::ScreenshotUrl).string().not_null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Matches::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Matches {
  Table,
  MatchHash,
  WinningTeam,
  ProcessedAt,
  ScreenshotUrl,
}
