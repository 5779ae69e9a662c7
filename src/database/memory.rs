//! In-memory [`BillingStore`] used by unit tests.

use super::store::{BillingStore, PlanChanges};
use crate::entities::{
    SubscriptionType, activation_entity as activation, plan_entity as plan,
    subscription_entity as subscription, team_entity as team, user_entity as user,
};
use crate::error::{AppError, AppResult};
use crate::services::PLAN_NAME_TAKEN;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sea_orm::DbErr;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryStore {
    plans: Mutex<Vec<plan::Model>>,
    teams: Mutex<Vec<team::Model>>,
    subscriptions: Mutex<Vec<subscription::Model>>,
    activations: Mutex<Vec<activation::Model>>,
    users: Mutex<Vec<user::Model>>,
    fail_reads: bool,
    stale_name_lookups: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every read fails with a connection error.
    pub fn failing() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    /// Name lookups miss, as when a concurrent create commits between the
    /// lookup and the insert. The unique name constraint still holds.
    pub fn with_stale_name_lookups() -> Self {
        Self {
            stale_name_lookups: true,
            ..Self::default()
        }
    }

    pub fn add_user(&self, id: i64, is_admin: bool) {
        self.users.lock().unwrap().push(user::Model {
            id,
            email: format!("user{id}@example.com"),
            is_admin,
            created_at: Some(Utc::now()),
        });
    }

    pub fn add_team(&self, id: i64, owner_id: i64) {
        self.teams.lock().unwrap().push(team::Model {
            id,
            owner_id,
            name: format!("team-{id}"),
            created_at: Some(Utc::now()),
        });
    }

    pub fn add_plan(&self, name: &str, monthly_price: f64, yearly_price: f64) -> plan::Model {
        let mut plans = self.plans.lock().unwrap();
        let model = plan::Model {
            id: plans.len() as i64 + 1,
            name: name.to_string(),
            monthly_price,
            yearly_price,
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        plans.push(model.clone());
        model
    }

    pub fn add_subscription(&self, id: i64, team_id: i64, plan_id: i64) {
        self.subscriptions.lock().unwrap().push(subscription::Model {
            id,
            team_id,
            plan_id,
            subscription_type: SubscriptionType::Monthly,
            created_at: Some(Utc::now()),
        });
    }

    pub fn add_activation(&self, subscription_id: i64, last_active_date: DateTime<Utc>) {
        let mut activations = self.activations.lock().unwrap();
        let id = activations.len() as i64 + 1;
        activations.push(activation::Model {
            id,
            subscription_id,
            activation_date: last_active_date - Duration::days(30),
            last_active_date,
        });
    }

    pub fn plans(&self) -> Vec<plan::Model> {
        self.plans.lock().unwrap().clone()
    }

    fn check_reads(&self) -> AppResult<()> {
        if self.fail_reads {
            return Err(DbErr::Conn(sea_orm::RuntimeErr::Internal("store offline".into())).into());
        }
        Ok(())
    }
}

#[async_trait]
impl BillingStore for MemoryStore {
    async fn find_plan_by_id(&self, id: i64) -> AppResult<Option<plan::Model>> {
        self.check_reads()?;
        Ok(self.plans.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn find_plan_by_name(&self, name: &str) -> AppResult<Option<plan::Model>> {
        self.check_reads()?;
        if self.stale_name_lookups {
            return Ok(None);
        }
        Ok(self
            .plans
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.name == name)
            .cloned())
    }

    async fn list_plans(&self) -> AppResult<Vec<plan::Model>> {
        self.check_reads()?;
        Ok(self.plans())
    }

    async fn insert_plan(
        &self,
        fields: PlanChanges,
        created_at: DateTime<Utc>,
    ) -> AppResult<plan::Model> {
        let mut plans = self.plans.lock().unwrap();
        if plans.iter().any(|p| p.name == fields.name) {
            return Err(AppError::bad_request(PLAN_NAME_TAKEN));
        }
        let model = plan::Model {
            id: plans.len() as i64 + 1,
            name: fields.name,
            monthly_price: fields.monthly_price,
            yearly_price: fields.yearly_price,
            created_at: Some(created_at),
            updated_at: None,
        };
        plans.push(model.clone());
        Ok(model)
    }

    async fn update_plan_by_id(
        &self,
        id: i64,
        fields: PlanChanges,
        updated_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let mut plans = self.plans.lock().unwrap();
        if plans.iter().any(|p| p.id != id && p.name == fields.name)
            && plans.iter().any(|p| p.id == id)
        {
            return Err(AppError::bad_request(PLAN_NAME_TAKEN));
        }
        let mut touched = 0;
        for p in plans.iter_mut().filter(|p| p.id == id) {
            p.name = fields.name.clone();
            p.monthly_price = fields.monthly_price;
            p.yearly_price = fields.yearly_price;
            p.updated_at = Some(updated_at);
            touched += 1;
        }
        Ok(touched)
    }

    async fn find_team_by_id(&self, id: i64) -> AppResult<Option<team::Model>> {
        self.check_reads()?;
        Ok(self.teams.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn find_subscription_by_team_id(
        &self,
        team_id: i64,
    ) -> AppResult<Option<subscription::Model>> {
        self.check_reads()?;
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.team_id == team_id)
            .max_by_key(|s| s.id)
            .cloned())
    }

    async fn find_active_activation(
        &self,
        subscription_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Option<activation::Model>> {
        self.check_reads()?;
        Ok(self
            .activations
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.subscription_id == subscription_id && a.is_active_at(now))
            .max_by_key(|a| a.last_active_date)
            .cloned())
    }

    async fn find_user_by_id(&self, id: i64) -> AppResult<Option<user::Model>> {
        self.check_reads()?;
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }
}
