//! 사용자 응답 DTO
//!
//! 엔티티를 그대로 노출하지 않고 비밀번호 해시를 제외한 필드만 응답합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;
use crate::domain::entities::users::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub preferred_language: String,
    pub provider: AuthProvider,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            email,
            preferred_language,
            provider,
            verification,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            email,
            preferred_language,
            provider,
            is_verified: verification.is_verified,
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::user::Verification;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_user_response_hides_password_hash() {
        let mut user = User::create(
            "A@X.com",
            "$2b$04$hash".to_string(),
            None,
            AuthProvider::Local,
            Verification::default(),
        )
        .unwrap();
        user.id = Some(ObjectId::new());

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["provider"], "local");
        assert_eq!(json["isVerified"], false);
    }
}
