//! # Authentication Configuration Module
//!
//! Telegram 토큰 유도와 JWT 세션 토큰 발급에 필요한 설정을 관리합니다.
//!
//! 두 비밀값 모두 프로세스 전역 설정으로, 기동 시점에 한 번 읽혀
//! 각 서비스 생성자에 명시적으로 전달됩니다. 비즈니스 로직이
//! 전역 상태나 환경 변수를 직접 조회하는 일은 없습니다.
//!
//! ## 필수 환경 변수
//!
//! ```bash
//! # Telegram 토큰 유도용 HMAC 비밀키
//! export TELEGRAM_AUTH_SECRET="your-telegram-auth-secret"
//!
//! # JWT 서명용 비밀키
//! export JWT_SECRET="your-super-secret-jwt-key"
//! ```
//!
//! 둘 중 하나라도 누락되면 `AppError::ConfigurationError`가 반환되고
//! 프로세스는 기동을 거부합니다. 비밀키 없이 조용히 동작하는 것보다
//! 시작 실패가 안전합니다.
//!
//! ## 키 생성 예제
//!
//! ```bash
//! openssl rand -base64 32
//! ```

use std::env;

use crate::errors::{AppError, AppResult};

/// Telegram 토큰 유도 설정
///
/// Telegram 사용자 ID에서 자격 토큰을 유도하는 HMAC 비밀키를 담습니다.
/// 이 비밀키가 유출되면 임의의 Telegram ID에 대한 토큰을 위조할 수
/// 있으므로 절대 로그에 출력하거나 응답에 포함해서는 안 됩니다.
#[derive(Clone)]
pub struct TelegramAuthConfig {
    /// HMAC-SHA256 키로 사용되는 비밀값
    pub secret: String,
}

impl TelegramAuthConfig {
    /// 주어진 비밀값으로 설정을 생성합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigurationError` - 비밀값이 비어 있는 경우
    pub fn new(secret: impl Into<String>) -> AppResult<Self> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(AppError::ConfigurationError(
                "TELEGRAM_AUTH_SECRET이 설정되지 않았습니다".to_string(),
            ));
        }
        Ok(Self { secret })
    }

    /// 환경 변수 `TELEGRAM_AUTH_SECRET`에서 설정을 읽어옵니다.
    ///
    /// 기동 시점에 한 번만 호출되어야 하며, 실패는 치명적입니다.
    pub fn from_env() -> AppResult<Self> {
        Self::new(env::var("TELEGRAM_AUTH_SECRET").unwrap_or_default())
    }
}

/// JSON Web Token (JWT) 관련 설정
///
/// 세션 토큰 쌍의 서명 키와 만료 시간을 관리합니다.
///
/// ## 권장 설정값
///
/// - **개발**: 액세스 토큰 30분, 리프레시 토큰 7일
/// - **프로덕션**: 액세스 토큰 15분, 리프레시 토큰 30일
#[derive(Clone)]
pub struct JwtConfig {
    /// JWT 서명에 사용할 비밀키
    pub secret: String,
    /// 액세스 토큰 만료 시간 (분)
    pub access_expiration_minutes: i64,
    /// 리프레시 토큰 만료 시간 (일)
    pub refresh_expiration_days: i64,
}

impl JwtConfig {
    /// 주어진 값들로 설정을 생성합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigurationError` - 비밀키가 비어 있거나 만료 시간이 0 이하인 경우
    pub fn new(
        secret: impl Into<String>,
        access_expiration_minutes: i64,
        refresh_expiration_days: i64,
    ) -> AppResult<Self> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(AppError::ConfigurationError(
                "JWT_SECRET이 설정되지 않았습니다".to_string(),
            ));
        }
        if access_expiration_minutes <= 0 || refresh_expiration_days <= 0 {
            return Err(AppError::ConfigurationError(
                "JWT 만료 시간은 0보다 커야 합니다".to_string(),
            ));
        }
        Ok(Self {
            secret,
            access_expiration_minutes,
            refresh_expiration_days,
        })
    }

    /// 환경 변수에서 JWT 설정을 읽어옵니다.
    ///
    /// `JWT_SECRET`은 필수이며, 만료 시간은 다음 기본값을 사용합니다:
    ///
    /// * `JWT_ACCESS_EXPIRATION_MINUTES` - 기본값 30분
    /// * `JWT_REFRESH_EXPIRATION_DAYS` - 기본값 7일
    pub fn from_env() -> AppResult<Self> {
        let access_expiration_minutes = env::var("JWT_ACCESS_EXPIRATION_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        let refresh_expiration_days = env::var("JWT_REFRESH_EXPIRATION_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .unwrap_or(7);

        Self::new(
            env::var("JWT_SECRET").unwrap_or_default(),
            access_expiration_minutes,
            refresh_expiration_days,
        )
    }
}
