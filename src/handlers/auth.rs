//! Authentication HTTP Handlers
//!
//! 사용자 인증과 관련된 HTTP 엔드포인트를 처리하는 핸들러 함수들입니다.
//! Telegram 토큰 인증과 로컬 인증을 모두 지원하며, JWT 토큰 기반의
//! 상태 없는 인증을 구현합니다.
//!
//! # Auth Providers
//!
//! - **Telegram 토큰**: 봇이 발급한 자격 토큰 교환 (`POST /telegram/token`)
//! - **토큰 갱신**: 리프레시 토큰으로 액세스 토큰 재발급 (`POST /token/refresh`)
//! - **로컬 인증**: 사용자명/비밀번호 방식 (`POST /api/v1/auth/login`)

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::tokens::request::{RefreshRequest, TelegramTokenRequest};
use crate::domain::dto::users::request::LocalLoginRequest;
use crate::domain::dto::users::response::LoginResponse;
use crate::errors::AppError;
use crate::services::auth::{TelegramAuthService, TokenService};
use crate::services::users::UserService;

/// Telegram 토큰 교환 핸들러
///
/// Telegram 봇이 발급한 자격 토큰을 JWT 세션 토큰 쌍으로 교환합니다.
/// 사전 인증이 필요 없는 엔드포인트입니다.
///
/// 토큰 누락도 빈 토큰과 마찬가지로 다른 인증 실패와 같은 401로
/// 끝납니다. 응답 모양으로 실패 원인을 구분할 수 없어야 합니다.
///
/// # Endpoint
/// `POST /telegram/token`
#[post("/token")]
pub async fn telegram_token(
    auth_service: web::Data<TelegramAuthService>,
    payload: web::Json<TelegramTokenRequest>,
) -> Result<HttpResponse, AppError> {
    let tg_token = payload.tg_token.as_deref().unwrap_or_default();

    let response = auth_service.exchange(tg_token).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 토큰 갱신 핸들러
///
/// 리프레시 토큰을 검증하여 새 액세스 토큰을 발급합니다.
///
/// # Endpoint
/// `POST /token/refresh`
#[post("/refresh")]
pub async fn refresh_token(
    auth_service: web::Data<TelegramAuthService>,
    payload: web::Json<RefreshRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = auth_service.refresh(&payload.refresh).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 로컬 로그인 핸들러
///
/// 사용자명과 비밀번호를 사용한 전통적인 로그인을 처리합니다.
/// 성공 시 Telegram 로그인과 동일한 JWT 토큰 쌍이 발급됩니다.
///
/// # Endpoint
/// `POST /api/v1/auth/login`
#[post("/login")]
pub async fn local_login(
    user_service: web::Data<UserService>,
    token_service: web::Data<TokenService>,
    payload: web::Json<LocalLoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = user_service
        .verify_password(&payload.username, &payload.password)
        .await?;

    let tokens = token_service.issue_token_pair(&user)?;

    log::info!("로컬 로그인 성공: {}", user.username);

    Ok(HttpResponse::Ok().json(LoginResponse::new(user, tokens)))
}
