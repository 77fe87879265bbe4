//! 사용자 HTTP 핸들러
//!
//! `AuthMiddleware` 가 적용된 scope 에만 등록됩니다.

use actix_web::{get, web, HttpResponse};
use crate::core::AppContainer;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::utils::deadline::with_deadline;

/// 현재 로그인한 사용자의 프로필
#[get("/me")]
pub async fn me(
    container: web::Data<AppContainer>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = with_deadline(
        container.request_timeout,
        "me",
        container.get_current_user.execute(&user.user_id),
    )
    .await?;

    Ok(HttpResponse::Ok().json(profile))
}
