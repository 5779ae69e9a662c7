use crate::middlewares::AuthUser;
use crate::models::*;
use crate::services::{PlanService, UpgradeService};
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/plans",
    tag = "plan",
    responses(
        (status = 200, description = "All plans in storage order", body = [PlanResponse])
    )
)]
pub async fn list_plans(plan_service: web::Data<PlanService>) -> Result<HttpResponse> {
    let plans = plan_service.list_plans().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(plans)))
}

#[utoipa::path(
    get,
    path = "/plans/{id}",
    tag = "plan",
    params(("id" = i64, Path, description = "Plan id")),
    responses(
        (status = 200, description = "Plan found", body = PlanResponse),
        (status = 404, description = "Plan not found")
    )
)]
pub async fn get_plan(
    plan_service: web::Data<PlanService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match plan_service.get_plan(path.into_inner()).await {
        Ok(plan) => Ok(HttpResponse::Ok().json(ApiResponse::success(plan))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/plans",
    tag = "plan",
    request_body = CreatePlanRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Plan created"),
        (status = 400, description = "Invalid plan fields"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only admin allowed to access")
    )
)]
pub async fn create_plan(
    plan_service: web::Data<PlanService>,
    user: AuthUser,
    request: web::Json<CreatePlanRequest>,
) -> Result<HttpResponse> {
    match plan_service
        .create_plan(user.id(), request.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::ack("Plan created"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/plans/{id}",
    tag = "plan",
    params(("id" = i64, Path, description = "Plan id")),
    request_body = UpdatePlanRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Plan updated"),
        (status = 400, description = "Invalid plan fields"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only admin allowed to access")
    )
)]
pub async fn update_plan(
    plan_service: web::Data<PlanService>,
    user: AuthUser,
    path: web::Path<i64>,
    request: web::Json<UpdatePlanRequest>,
) -> Result<HttpResponse> {
    match plan_service
        .update_plan(user.id(), path.into_inner(), request.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::ack("Plan updated"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/plans/upgrade",
    tag = "plan",
    params(UpgradeQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Prorated upgrade quote", body = UpgradeQuote),
        (status = 400, description = "Invalid team, plan, inactive subscription or downgrade"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "You don't have access to the team"),
        (status = 404, description = "The team doesn't have subscription")
    )
)]
pub async fn get_upgrade(
    upgrade_service: web::Data<UpgradeService>,
    user: AuthUser,
    query: web::Query<UpgradeQuery>,
) -> Result<HttpResponse> {
    let UpgradeQuery { team_id, plan_id } = query.into_inner();
    match upgrade_service.get_upgrade(user.id(), team_id, plan_id).await {
        Ok(quote) => Ok(HttpResponse::Ok().json(ApiResponse::success(quote))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn plan_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/plans")
            .route("", web::get().to(list_plans))
            .route("", web::post().to(create_plan))
            // before "/{id}" so "upgrade" is never parsed as an id
            .route("/upgrade", web::get().to(get_upgrade))
            .route("/{id}", web::get().to(get_plan))
            .route("/{id}", web::put().to(update_plan)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use crate::middlewares::AuthMiddleware;
    use crate::utils::JwtService;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use chrono::{Duration, Utc};
    use serde_json::{Value, json};
    use std::sync::Arc;

    const ADMIN: i64 = 1;
    const OWNER: i64 = 2;

    fn jwt() -> JwtService {
        JwtService::new("handler-test-secret", 3600)
    }

    fn bearer(user_id: i64) -> (&'static str, String) {
        let token = jwt().generate_access_token(user_id).unwrap();
        ("Authorization", format!("Bearer {token}"))
    }

    fn seeded_store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store.add_user(ADMIN, true);
        store.add_user(OWNER, false);
        let pro = store.add_plan("Pro", 59.0, 590.0);
        store.add_plan("Business", 199.0, 1990.0);
        store.add_team(7, OWNER);
        store.add_subscription(70, 7, pro.id);
        store.add_activation(70, Utc::now() + Duration::days(14) + Duration::minutes(1));
        store
    }

    macro_rules! app {
        ($store:expr) => {
            test::init_service(
                App::new()
                    .wrap(AuthMiddleware::new(jwt()))
                    .app_data(web::Data::new(PlanService::new($store.clone())))
                    .app_data(web::Data::new(UpgradeService::new($store.clone())))
                    .service(web::scope("/api/v1").configure(plan_config)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_list_plans_is_public() {
        let store = seeded_store();
        let app = app!(store);

        let req = test::TestRequest::get().uri("/api/v1/plans").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"][0]["name"], json!("Pro"));
        assert_eq!(body["data"][1]["name"], json!("Business"));
    }

    #[actix_web::test]
    async fn test_create_plan_requires_token() {
        let store = seeded_store();
        let app = app!(store);

        let req = test::TestRequest::post()
            .uri("/api/v1/plans")
            .set_json(json!({"name": "Team", "monthly_price": 99.0, "yearly_price": 990.0}))
            .to_request();
        let resp = test::try_call_service(&app, req).await;

        let err = resp.err().expect("request without token must fail");
        assert_eq!(
            err.as_response_error().status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_create_plan_as_admin() {
        let store = seeded_store();
        let app = app!(store);

        let req = test::TestRequest::post()
            .uri("/api/v1/plans")
            .insert_header(bearer(ADMIN))
            .set_json(json!({"name": "Team", "monthly_price": 99.0, "yearly_price": 990.0}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["success"], json!(true));
        assert!(body.get("data").is_none());
        assert!(store.plans().iter().any(|p| p.name == "Team"));
    }

    #[actix_web::test]
    async fn test_update_plan_as_member_is_forbidden() {
        let store = seeded_store();
        let app = app!(store);

        let req = test::TestRequest::put()
            .uri("/api/v1/plans/1")
            .insert_header(bearer(OWNER))
            .set_json(json!({"name": "Pro", "monthly_price": 1.0, "yearly_price": 10.0}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], json!("FORBIDDEN"));
        assert_eq!(
            body["error"]["message"],
            json!("Only admin allowed to access")
        );
    }

    #[actix_web::test]
    async fn test_get_upgrade_quote() {
        let store = seeded_store();
        let app = app!(store);

        let req = test::TestRequest::get()
            .uri("/api/v1/plans/upgrade?team_id=7&plan_id=2")
            .insert_header(bearer(OWNER))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["days_remaining"], json!(14));
        assert_eq!(body["data"]["price_difference"], json!(140.0));
        assert_eq!(body["data"]["upgrading_price"], json!((140.0 / 30.0) * 14.0));
        assert_eq!(body["data"]["current_plan"]["name"], json!("Pro"));
        assert_eq!(body["data"]["new_plan"]["name"], json!("Business"));
    }

    #[actix_web::test]
    async fn test_get_upgrade_unknown_team() {
        let store = seeded_store();
        let app = app!(store);

        let req = test::TestRequest::get()
            .uri("/api/v1/plans/upgrade?team_id=404&plan_id=2")
            .insert_header(bearer(OWNER))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], json!("BAD_REQUEST"));
        assert_eq!(body["error"]["message"], json!("Invalid teamId"));
    }
}
