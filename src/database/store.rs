//! Storage seam for the billing service.
//!
//! Services only talk to [`BillingStore`], so the same pipeline runs against
//! PostgreSQL in production and an in-memory fake in tests.

use crate::entities::{
    activation_entity as activation, plan_entity as plan, subscription_entity as subscription,
    team_entity as team, user_entity as user,
};
use crate::error::{AppError, AppResult};
use crate::services::PLAN_NAME_TAKEN;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};

/// Writable fields of a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanChanges {
    pub name: String,
    pub monthly_price: f64,
    pub yearly_price: f64,
}

#[async_trait]
pub trait BillingStore: Send + Sync {
    async fn find_plan_by_id(&self, id: i64) -> AppResult<Option<plan::Model>>;

    async fn find_plan_by_name(&self, name: &str) -> AppResult<Option<plan::Model>>;

    /// All plans in storage order.
    async fn list_plans(&self) -> AppResult<Vec<plan::Model>>;

    /// Fails with `BadRequest(PLAN_NAME_TAKEN)` when the name is already used.
    async fn insert_plan(
        &self,
        fields: PlanChanges,
        created_at: DateTime<Utc>,
    ) -> AppResult<plan::Model>;

    /// Returns the number of rows touched; zero when `id` does not exist.
    /// Renaming onto another plan's name fails like [`insert_plan`](Self::insert_plan).
    async fn update_plan_by_id(
        &self,
        id: i64,
        fields: PlanChanges,
        updated_at: DateTime<Utc>,
    ) -> AppResult<u64>;

    async fn find_team_by_id(&self, id: i64) -> AppResult<Option<team::Model>>;

    async fn find_subscription_by_team_id(
        &self,
        team_id: i64,
    ) -> AppResult<Option<subscription::Model>>;

    /// An activation of `subscription_id` whose window still covers `now`.
    async fn find_active_activation(
        &self,
        subscription_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Option<activation::Model>>;

    async fn find_user_by_id(&self, id: i64) -> AppResult<Option<user::Model>>;
}

#[derive(Clone)]
pub struct SeaOrmBillingStore {
    pool: DatabaseConnection,
}

impl SeaOrmBillingStore {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }
}

// The unique index on plans.name settles races the service pre-check can't.
fn map_plan_write_err(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::bad_request(PLAN_NAME_TAKEN),
        _ => AppError::DatabaseError(err),
    }
}

#[async_trait]
impl BillingStore for SeaOrmBillingStore {
    async fn find_plan_by_id(&self, id: i64) -> AppResult<Option<plan::Model>> {
        Ok(plan::Entity::find_by_id(id).one(&self.pool).await?)
    }

    async fn find_plan_by_name(&self, name: &str) -> AppResult<Option<plan::Model>> {
        Ok(plan::Entity::find()
            .filter(plan::Column::Name.eq(name))
            .one(&self.pool)
            .await?)
    }

    async fn list_plans(&self) -> AppResult<Vec<plan::Model>> {
        Ok(plan::Entity::find()
            .order_by_asc(plan::Column::Id)
            .all(&self.pool)
            .await?)
    }

    async fn insert_plan(
        &self,
        fields: PlanChanges,
        created_at: DateTime<Utc>,
    ) -> AppResult<plan::Model> {
        let model = plan::ActiveModel {
            name: Set(fields.name),
            monthly_price: Set(fields.monthly_price),
            yearly_price: Set(fields.yearly_price),
            created_at: Set(Some(created_at)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(map_plan_write_err)?;
        Ok(model)
    }

    async fn update_plan_by_id(
        &self,
        id: i64,
        fields: PlanChanges,
        updated_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let res = plan::Entity::update_many()
            .col_expr(plan::Column::Name, Expr::value(fields.name))
            .col_expr(plan::Column::MonthlyPrice, Expr::value(fields.monthly_price))
            .col_expr(plan::Column::YearlyPrice, Expr::value(fields.yearly_price))
            .col_expr(plan::Column::UpdatedAt, Expr::value(Some(updated_at)))
            .filter(plan::Column::Id.eq(id))
            .exec(&self.pool)
            .await
            .map_err(map_plan_write_err)?;
        Ok(res.rows_affected)
    }

    async fn find_team_by_id(&self, id: i64) -> AppResult<Option<team::Model>> {
        Ok(team::Entity::find_by_id(id).one(&self.pool).await?)
    }

    async fn find_subscription_by_team_id(
        &self,
        team_id: i64,
    ) -> AppResult<Option<subscription::Model>> {
        // one subscription per team by convention; prefer the newest if not
        Ok(subscription::Entity::find()
            .filter(subscription::Column::TeamId.eq(team_id))
            .order_by_desc(subscription::Column::Id)
            .one(&self.pool)
            .await?)
    }

    async fn find_active_activation(
        &self,
        subscription_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Option<activation::Model>> {
        Ok(activation::Entity::find()
            .filter(activation::Column::SubscriptionId.eq(subscription_id))
            .filter(activation::Column::LastActiveDate.gte(now))
            .order_by_desc(activation::Column::LastActiveDate)
            .one(&self.pool)
            .await?)
    }

    async fn find_user_by_id(&self, id: i64) -> AppResult<Option<user::Model>> {
        Ok(user::Entity::find_by_id(id).one(&self.pool).await?)
    }
}
