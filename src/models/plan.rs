use crate::entities::plan_entity as plan;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlanResponse {
    pub id: i64,
    #[schema(example = "Pro")]
    pub name: String,
    #[schema(example = 59.0)]
    pub monthly_price: f64,
    #[schema(example = 590.0)]
    pub yearly_price: f64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<plan::Model> for PlanResponse {
    fn from(m: plan::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            monthly_price: m.monthly_price,
            yearly_price: m.yearly_price,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePlanRequest {
    #[schema(example = "Business")]
    pub name: String,
    #[schema(example = 199.0)]
    pub monthly_price: f64,
    #[schema(example = 1990.0)]
    pub yearly_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdatePlanRequest {
    #[schema(example = "Business")]
    pub name: String,
    #[schema(example = 179.0)]
    pub monthly_price: f64,
    #[schema(example = 1790.0)]
    pub yearly_price: f64,
}
