//! 인증 HTTP 핸들러
//!
//! | Method | Path | 응답 |
//! |--------|------|------|
//! | POST | `/register` | 201 사용자 프로필 |
//! | POST | `/login` | `{token, refreshToken}` |
//! | POST | `/login/google` | `{token}` + `refresh_token` 쿠키 |
//! | POST | `/refresh` | `{token}` |
//!
//! 핸들러는 입력 검증 후 유스케이스를 마감 시간 안에서 실행하기만 합니다.

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{post, web, HttpRequest, HttpResponse};
use validator::Validate;
use crate::core::AppContainer;
use crate::domain::dto::tokens::{RefreshTokenRequest, TokenResponse};
use crate::domain::dto::users::request::{GoogleLoginRequest, LocalLoginRequest, RegisterRequest};
use crate::domain::dto::users::response::UserResponse;
use crate::domain::models::token::REFRESH_TOKEN_LIFETIME;
use crate::errors::AppError;
use crate::utils::deadline::with_deadline;

pub const REFRESH_COOKIE_NAME: &str = "refresh_token";
pub const REFRESH_COOKIE_PATH: &str = "/refresh";

#[post("/register")]
pub async fn register(
    container: web::Data<AppContainer>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = with_deadline(
        container.request_timeout,
        "register",
        container.create_user.execute(payload.into_inner()),
    )
    .await?;

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

#[post("/login")]
pub async fn local_login(
    container: web::Data<AppContainer>,
    payload: web::Json<LocalLoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let token_pair = with_deadline(
        container.request_timeout,
        "login",
        container.login_user.execute(&payload.email, &payload.password),
    )
    .await?;

    Ok(HttpResponse::Ok().json(token_pair))
}

/// 리프레시 토큰은 본문 대신 HttpOnly 쿠키로 내려줍니다.
#[post("/login/google")]
pub async fn google_login(
    container: web::Data<AppContainer>,
    payload: web::Json<GoogleLoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let GoogleLoginRequest { id_token, preferred_language } = payload.into_inner();

    let token_pair = with_deadline(
        container.request_timeout,
        "login_google",
        container.login_with_google.execute(&id_token, preferred_language),
    )
    .await?;

    let cookie = refresh_cookie(token_pair.refresh_token, container.secure_cookies);

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(TokenResponse::new(token_pair.access_token)))
}

/// 본문의 `refreshToken` 을 우선 사용하고, 없으면 `refresh_token` 쿠키를 읽습니다.
#[post("/refresh")]
pub async fn refresh_token(
    req: HttpRequest,
    container: web::Data<AppContainer>,
    payload: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, AppError> {
    let from_body = payload
        .and_then(|p| p.into_inner().refresh_token)
        .filter(|t| !t.trim().is_empty());

    let token = from_body
        .or_else(|| req.cookie(REFRESH_COOKIE_NAME).map(|c| c.value().to_string()))
        .ok_or(AppError::InvalidToken)?;

    let access_token = with_deadline(
        container.request_timeout,
        "refresh",
        container.refresh_token.execute(&token),
    )
    .await?;

    Ok(HttpResponse::Ok().json(TokenResponse::new(access_token)))
}

fn refresh_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE_NAME, value)
        .path(REFRESH_COOKIE_PATH)
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(CookieDuration::seconds(REFRESH_TOKEN_LIFETIME.as_secs() as i64))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_cookie_attributes() {
        let cookie = refresh_cookie("abc".to_string(), true);

        assert_eq!(cookie.name(), REFRESH_COOKIE_NAME);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.path(), Some("/refresh"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.max_age(), Some(CookieDuration::days(7)));
    }
}
