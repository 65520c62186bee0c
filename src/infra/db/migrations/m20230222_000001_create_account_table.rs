//! Migration: Create the account table (revision zero).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .col(
                        ColumnDef::new(Account::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Account::Username)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Account::Email)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Account::HashedPassword)
                            .string_len(1024)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Account::HashedSalt)
                            .string_len(1024)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Account::IsAdmin).boolean().not_null())
                    .col(ColumnDef::new(Account::IsLoggedIn).boolean().not_null())
                    .col(ColumnDef::new(Account::IsVerified).boolean().not_null())
                    .col(
                        ColumnDef::new(Account::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Account::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Account::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Account {
    Table,
    Id,
    Username,
    Email,
    #[sea_orm(iden = "_hashed_password")]
    HashedPassword,
    #[sea_orm(iden = "_hashed_salt")]
    HashedSalt,
    IsAdmin,
    IsLoggedIn,
    IsVerified,
    CreatedAt,
    UpdatedAt,
}
