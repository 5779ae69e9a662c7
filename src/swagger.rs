use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::SubscriptionType;
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::plan::list_plans,
        handlers::plan::get_plan,
        handlers::plan::create_plan,
        handlers::plan::update_plan,
        handlers::plan::get_upgrade,
    ),
    components(
        schemas(
            PlanResponse,
            CreatePlanRequest,
            UpdatePlanRequest,
            UpgradeQuote,
            SubscriptionType,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "plan", description = "Subscription plans and upgrade quotes"),
    ),
    info(
        title = "Plan Billing API",
        version = "0.1.0",
        description = "Plan management and upgrade pricing REST API"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
