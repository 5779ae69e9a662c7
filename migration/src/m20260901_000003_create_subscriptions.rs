use crate::m20260901_000001_create_users_and_teams::Teams;
use crate::m20260901_000002_create_plans::Plans;
use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Subscriptions {
    Table,
    Id,
    TeamId,
    PlanId,
    SubscriptionType,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SubscriptionActivations {
    Table,
    Id,
    SubscriptionId,
    ActivationDate,
    LastActiveDate,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("subscription_type"))
                    .values(vec![Alias::new("monthly"), Alias::new("yearly")])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subscriptions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subscriptions::TeamId).big_integer().not_null())
                    .col(ColumnDef::new(Subscriptions::PlanId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Subscriptions::SubscriptionType)
                            .custom(Alias::new("subscription_type"))
                            .not_null()
                            .default(Expr::cust("'monthly'::subscription_type")),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscriptions_team")
                            .from(Subscriptions::Table, Subscriptions::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscriptions_plan")
                            .from(Subscriptions::Table, Subscriptions::PlanId)
                            .to(Plans::Table, Plans::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_subscriptions_team")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::TeamId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SubscriptionActivations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubscriptionActivations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionActivations::SubscriptionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionActivations::ActivationDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionActivations::LastActiveDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activations_subscription")
                            .from(
                                SubscriptionActivations::Table,
                                SubscriptionActivations::SubscriptionId,
                            )
                            .to(Subscriptions::Table, Subscriptions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // active-window lookups filter on both columns
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_activations_subscription_last_active")
                    .table(SubscriptionActivations::Table)
                    .col(SubscriptionActivations::SubscriptionId)
                    .col(SubscriptionActivations::LastActiveDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(SubscriptionActivations::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(Subscriptions::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_type(
                Type::drop()
                    .name(Alias::new("subscription_type"))
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
