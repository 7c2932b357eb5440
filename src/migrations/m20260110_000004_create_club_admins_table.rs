// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260110_000001_create_users_table::Users, m20260110_000002_create_clubs_table::Clubs,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClubAdmins::Table)
                    .if_not_exists()
                    .col(integer(ClubAdmins::UserId))
                    .col(integer(ClubAdmins::ClubId))
                    .col(timestamp(ClubAdmins::PromotedAt).default(Expr::current_timestamp()))
                    .primary_key(
                        Index::create()
                            .name("pk_club_admins")
                            .col(ClubAdmins::UserId)
                            .col(ClubAdmins::ClubId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_club_admins_user_id")
                            .from(ClubAdmins::Table, ClubAdmins::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_club_admins_club_id")
                            .from(ClubAdmins::Table, ClubAdmins::ClubId)
                            .to(Clubs::Table, Clubs::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClubAdmins::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ClubAdmins {
    Table,
    UserId,
    ClubId,
    PromotedAt,
}
