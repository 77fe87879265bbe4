//! # 외부 신원 프로바이더 모델
//!
//! 외부 프로바이더는 비밀번호가 아니라 "검증된 이메일 신원"의 출처로 취급합니다.
//! 프로바이더별 토큰 클레임은 하위 모듈에서 [`ExternalIdentity`] 로 변환됩니다.

pub mod google_oauth_model;

use serde::{Deserialize, Serialize};

/// 외부 프로바이더가 보증한 사용자 신원
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalIdentity {
    /// 프로바이더 내 사용자 ID
    pub subject: String,
    pub email: String,
    /// 프로바이더가 이메일 소유를 확인했는지 여부
    pub email_verified: bool,
}
