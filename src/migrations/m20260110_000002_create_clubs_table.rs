// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use sea_orm_migration::{prelude::*, schema::*};

use super::m20260110_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clubs::Table)
                    .if_not_exists()
                    .col(pk_auto(Clubs::Id))
                    .col(string(Clubs::Name))
                    .col(text_null(Clubs::Description))
                    .col(string_null(Clubs::Location))
                    .col(integer(Clubs::CreatedBy))
                    .col(timestamp(Clubs::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_clubs_created_by")
                            .from(Clubs::Table, Clubs::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Clubs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Clubs {
    Table,
    Id,
    Name,
    Description,
    Location,
    CreatedBy,
    CreatedAt,
}
