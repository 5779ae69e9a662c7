use crate::database::{BillingStore, PlanChanges};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::{Capability, authorize};
use chrono::Utc;
use std::sync::Arc;

pub const PLAN_NOT_FOUND: &str = "Plan not found";
pub const PLAN_NAME_REQUIRED: &str = "Plan name is required";
pub const PLAN_NAME_TAKEN: &str = "Plan name already exists";
pub const INVALID_PRICE: &str = "Price must be a non-negative number";

#[derive(Clone)]
pub struct PlanService {
    store: Arc<dyn BillingStore>,
}

impl PlanService {
    pub fn new(store: Arc<dyn BillingStore>) -> Self {
        Self { store }
    }

    /// All plans in storage order. A storage failure yields an empty list.
    pub async fn list_plans(&self) -> Vec<PlanResponse> {
        match self.store.list_plans().await {
            Ok(plans) => plans.into_iter().map(PlanResponse::from).collect(),
            Err(e) => {
                log::warn!("Failed to list plans, returning empty list: {e}");
                Vec::new()
            }
        }
    }

    pub async fn get_plan(&self, plan_id: i64) -> AppResult<PlanResponse> {
        self.store
            .find_plan_by_id(plan_id)
            .await?
            .map(PlanResponse::from)
            .ok_or_else(|| AppError::not_found(PLAN_NOT_FOUND))
    }

    pub async fn create_plan(&self, caller_id: i64, req: CreatePlanRequest) -> AppResult<()> {
        authorize(self.store.as_ref(), caller_id, Capability::ManagePlans).await?;
        let fields = validate_plan_fields(req.name, req.monthly_price, req.yearly_price)?;

        if self.store.find_plan_by_name(&fields.name).await?.is_some() {
            return Err(AppError::bad_request(PLAN_NAME_TAKEN));
        }

        let plan = self.store.insert_plan(fields, Utc::now()).await?;
        log::info!("User {caller_id} created plan {} ({})", plan.id, plan.name);
        Ok(())
    }

    /// Overwrites name and prices of `plan_id`. An unknown id is not an error;
    /// renaming onto another plan's name is rejected by the store.
    pub async fn update_plan(
        &self,
        caller_id: i64,
        plan_id: i64,
        req: UpdatePlanRequest,
    ) -> AppResult<()> {
        authorize(self.store.as_ref(), caller_id, Capability::ManagePlans).await?;
        let fields = validate_plan_fields(req.name, req.monthly_price, req.yearly_price)?;

        let touched = self
            .store
            .update_plan_by_id(plan_id, fields, Utc::now())
            .await?;
        log::info!("User {caller_id} updated plan {plan_id} ({touched} row(s))");
        Ok(())
    }
}

fn validate_plan_fields(name: String, monthly_price: f64, yearly_price: f64) -> AppResult<PlanChanges> {
    if name.trim().is_empty() {
        return Err(AppError::bad_request(PLAN_NAME_REQUIRED));
    }
    let valid_price = |p: f64| p.is_finite() && p >= 0.0;
    if !valid_price(monthly_price) || !valid_price(yearly_price) {
        return Err(AppError::bad_request(INVALID_PRICE));
    }
    Ok(PlanChanges {
        name,
        monthly_price,
        yearly_price,
    })
}
