use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(GuildSettings::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(GuildSettings::GuildId)
              .big_integer()
              .not_null()
              .primary_key(),
          )
          .col(
            ColumnDef::new(GuildSettings::LogChannelId)
              .big_integer()
              .not_null(),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(GuildSettings::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum GuildSettings {
  Table,
  GuildId,
  LogChannelId,
}
