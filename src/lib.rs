//! 잼링크 인증 서비스 백엔드
//!
//! 로컬 비밀번호 로그인과 Google 연동 로그인을 제공하는 인증 서비스입니다.
//! 서명된 액세스/리프레시 토큰을 발급하고, 보호된 라우트 앞에서
//! `AuthMiddleware` 가 토큰과 계정 인증 상태를 확인합니다.
//!
//! # Features
//!
//! - **회원가입/로그인**: bcrypt 해시 기반 로컬 계정
//! - **Google 로그인**: ID 토큰 서명 검증 후 계정 자동 생성
//! - **JWT**: HS256 또는 RS256 서명, 용도(`login` / `refresh_token`) 구분
//! - **MongoDB**: 사용자 데이터 영구 저장 (개발용 메모리 저장소 선택 가능)
//! - **Redis**: 선택적 사용자 조회 캐시
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← 공개 라우트 + AuthMiddleware 보호 scope
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리, 쿠키
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    UseCases     │ ← 로그인/갱신 흐름
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Services + Repo │ ← SecurityService, Google 검증기, UserRepository
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use jamlink_auth_backend::config::AppConfig;
//! use jamlink_auth_backend::core::AppContainer;
//!
//! let config = AppConfig::from_env()?;
//! let container = AppContainer::build(&config).await?;
//! let pair = container.login_user.execute("a@x.com", "Passw0rd!").await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
pub mod usecases;
