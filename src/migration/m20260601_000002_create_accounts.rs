use sea_orm_migration::prelude::*;

use super::m20260601_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Accounts::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Accounts::AccountId)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(
            // One LoL account per Discord user.
            ColumnDef::new(Accounts::OwnerDiscordId)
              .big_integer()
              .not_null()
              .unique_key(),
          )
          .col(
            // One Discord user per summoner name.
            ColumnDef::new(Accounts::SummonerName)
              .string()
              .not_null()
              .unique_key(),
          )
          .col(ColumnDef::new(Accounts::LinkedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_accounts_user")
              .from(Accounts::Table, Accounts::OwnerDiscordId)
              .to(Users::Table, Users::DiscordId)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Accounts::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Accounts {
  Table,
  AccountId,
  OwnerDiscordId,
  SummonerName,
  LinkedAt,
}
