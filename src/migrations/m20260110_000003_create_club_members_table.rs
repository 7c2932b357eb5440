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
                    .table(ClubMembers::Table)
                    .if_not_exists()
                    .col(integer(ClubMembers::UserId))
                    .col(integer(ClubMembers::ClubId))
                    .col(timestamp(ClubMembers::JoinedAt).default(Expr::current_timestamp()))
                    .primary_key(
                        Index::create()
                            .name("pk_club_members")
                            .col(ClubMembers::UserId)
                            .col(ClubMembers::ClubId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_club_members_user_id")
                            .from(ClubMembers::Table, ClubMembers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_club_members_club_id")
                            .from(ClubMembers::Table, ClubMembers::ClubId)
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
            .drop_table(Table::drop().table(ClubMembers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ClubMembers {
    Table,
    UserId,
    ClubId,
    JoinedAt,
}
