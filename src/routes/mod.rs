//! 라우트 구성
//!
//! 공개 엔드포인트와 `AuthMiddleware` 로 보호되는 `/api/v1` scope 를 등록합니다.
//! 보호 scope 의 미들웨어는 컨테이너의 `SecurityService` 를 공유합니다.

use std::sync::Arc;
use actix_web::web;
use serde_json::json;
use crate::handlers;
use crate::middlewares::AuthMiddleware;
use crate::services::auth::SecurityService;

pub fn configure_all_routes(security: Arc<SecurityService>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.service(health_check);

        configure_auth_routes(cfg);
        configure_protected_routes(cfg, security);
        configure_key_routes(cfg);
    }
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::auth::register)
        .service(handlers::auth::local_login)
        .service(handlers::auth::google_login)
        .service(handlers::auth::refresh_token);
}

fn configure_protected_routes(cfg: &mut web::ServiceConfig, security: Arc<SecurityService>) {
    cfg.service(
        web::scope("/api/v1")
            .wrap(AuthMiddleware::new(security))
            .service(handlers::users::me)
    );
}

fn configure_key_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::rsa::jwks_handler);
}

#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "jamlink_auth_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
