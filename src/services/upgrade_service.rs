use crate::database::BillingStore;
use crate::error::{AppError, AppResult};
use crate::models::{PlanResponse, UpgradeQuote};
use crate::utils::{days_remaining, price_difference, prorated_upgrade_price};
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub const INVALID_TEAM: &str = "Invalid teamId";
pub const NO_TEAM_ACCESS: &str = "You don't have access to the team";
pub const NO_SUBSCRIPTION: &str = "The team doesn't have subscription";
pub const SUBSCRIPTION_INACTIVE: &str = "Subscription not active";
pub const INVALID_PLAN: &str = "Invalid plan";
pub const DOWNGRADE_UNSUPPORTED: &str = "Unable to calculate the price for downgrading plan";

/// Quotes mid-cycle upgrades between monthly plans.
#[derive(Clone)]
pub struct UpgradeService {
    store: Arc<dyn BillingStore>,
}

impl UpgradeService {
    pub fn new(store: Arc<dyn BillingStore>) -> Self {
        Self { store }
    }

    pub async fn get_upgrade(
        &self,
        requester_id: i64,
        team_id: i64,
        plan_id: i64,
    ) -> AppResult<UpgradeQuote> {
        self.get_upgrade_at(requester_id, team_id, plan_id, Utc::now())
            .await
    }

    /// Same as [`get_upgrade`](Self::get_upgrade) with an explicit clock.
    ///
    /// Checks run in a fixed order and the first failure wins: team, team
    /// ownership, subscription, active window, both plans, downgrade guard.
    pub async fn get_upgrade_at(
        &self,
        requester_id: i64,
        team_id: i64,
        plan_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<UpgradeQuote> {
        let team = self
            .store
            .find_team_by_id(team_id)
            .await?
            .ok_or_else(|| AppError::bad_request(INVALID_TEAM))?;

        if !team.is_owned_by(requester_id) {
            log::warn!("User {requester_id} requested upgrade quote for team {team_id} they don't own");
            return Err(AppError::forbidden(NO_TEAM_ACCESS));
        }

        let subscription = self
            .store
            .find_subscription_by_team_id(team.id)
            .await?
            .ok_or_else(|| AppError::not_found(NO_SUBSCRIPTION))?;

        let activation = self
            .store
            .find_active_activation(subscription.id, now)
            .await?
            .ok_or_else(|| AppError::bad_request(SUBSCRIPTION_INACTIVE))?;

        let new_plan = self.store.find_plan_by_id(plan_id).await?;
        let current_plan = self.store.find_plan_by_id(subscription.plan_id).await?;
        let (Some(new_plan), Some(current_plan)) = (new_plan, current_plan) else {
            return Err(AppError::bad_request(INVALID_PLAN));
        };

        if new_plan.monthly_price < current_plan.monthly_price {
            return Err(AppError::bad_request(DOWNGRADE_UNSUPPORTED));
        }

        let days_remaining = days_remaining(activation.last_active_date, now);
        let price_difference = price_difference(current_plan.monthly_price, new_plan.monthly_price);
        let upgrading_price = prorated_upgrade_price(price_difference, days_remaining);

        Ok(UpgradeQuote {
            current_plan: PlanResponse::from(current_plan),
            new_plan: PlanResponse::from(new_plan),
            days_remaining,
            price_difference,
            upgrading_price,
        })
    }
}
