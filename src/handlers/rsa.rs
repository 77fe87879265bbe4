use actix_web::{get, web, HttpResponse};
use crate::core::AppContainer;
use crate::errors::AppError;

/// RS256 공개키 JWKS
///
/// 다른 서비스가 우리 토큰을 직접 검증할 때 사용합니다. HMAC 모드에서는 404.
#[get("/.well-known/jwks.json")]
pub async fn jwks_handler(container: web::Data<AppContainer>) -> Result<HttpResponse, AppError> {
    let jwks = container
        .security
        .signing_key()
        .jwks()
        .ok_or_else(|| AppError::NotFound("공개 서명 키가 없습니다".to_string()))?;

    Ok(HttpResponse::Ok()
        .insert_header(("Cache-Control", "public, max-age=3600"))
        .json(jwks))
}
