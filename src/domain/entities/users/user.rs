//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 로컬 인증과 Google 로그인을 모두 지원하는 통합된 사용자 모델과
//! 생성 규칙([`User::create`])을 제공합니다.

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;
use crate::errors::AppError;
use crate::utils::string_utils::{clean_optional_string, normalize_email};

/// 선호 언어가 없을 때 사용하는 기본값
pub const DEFAULT_PREFERRED_LANGUAGE: &str = "en";

/// 언어 태그 최대 길이 (예: "pt-BR")
const MAX_LANGUAGE_TAG_LEN: usize = 5;

/// 계정 인증 상태
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    pub is_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
}

impl Verification {
    pub fn verified_now() -> Self {
        Self {
            is_verified: true,
            verified_at: Some(Utc::now()),
        }
    }
}

/// 사용자 엔티티
///
/// 비밀번호 해시는 항상 존재합니다. Google로 가입한 계정은 무작위 값의
/// 해시를 저장하므로 실질적으로 비밀번호 로그인이 불가능합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자 이메일 (unique, 정규화됨)
    pub email: String,
    pub password_hash: String,
    pub preferred_language: String,
    /// 계정을 만든 인증 프로바이더 (생성 후 변경되지 않음)
    pub provider: AuthProvider,
    #[serde(default)]
    pub verification: Verification,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 새 사용자 생성
    ///
    /// 이메일을 정규화하고 선호 언어 기본값을 채웁니다.
    /// ID는 저장소가 생성 시점에 부여합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 이메일 형식 오류, 빈 해시, 잘못된 언어 태그
    pub fn create(
        email: &str,
        password_hash: String,
        preferred_language: Option<String>,
        provider: AuthProvider,
        verification: Verification,
    ) -> Result<Self, AppError> {
        let email = normalize_email(email);
        if !is_plausible_email(&email) {
            return Err(AppError::ValidationError("유효한 이메일 주소가 아닙니다".to_string()));
        }

        if password_hash.is_empty() {
            return Err(AppError::ValidationError("비밀번호 해시가 없습니다".to_string()));
        }

        let preferred_language = clean_optional_string(preferred_language)
            .unwrap_or_else(|| DEFAULT_PREFERRED_LANGUAGE.to_string());
        if preferred_language.len() > MAX_LANGUAGE_TAG_LEN {
            return Err(AppError::ValidationError(format!(
                "언어 태그는 {}자 이하여야 합니다",
                MAX_LANGUAGE_TAG_LEN
            )));
        }

        let now = Utc::now();

        Ok(Self {
            id: None,
            email,
            password_hash,
            preferred_language,
            provider,
            verification,
            created_at: now,
            updated_at: now,
        })
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn is_verified(&self) -> bool {
        self.verification.is_verified
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}
