use crate::models::PlanResponse;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpgradeQuery {
    pub team_id: i64,
    pub plan_id: i64,
}

/// Prorated cost of moving a team to a pricier monthly plan for the rest of
/// its current window. Advisory only; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpgradeQuote {
    pub current_plan: PlanResponse,
    pub new_plan: PlanResponse,
    pub days_remaining: i64,
    pub price_difference: f64,
    pub upgrading_price: f64,
}
