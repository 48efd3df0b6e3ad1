//! # 사용자 관리 서비스 구현
//!
//! 사용자 계정의 생성과 인증을 담당하는 핵심 비즈니스 로직을 구현합니다.
//!
//! ## 계정 생성 경로
//!
//! ```text
//! 로컬 회원가입                     Telegram 신원 등록
//!      │                                │
//!      ▼                                ▼
//! 입력 검증 + bcrypt 해싱          tg_id 필수 확인
//!      │                                │
//!      ▼                                ▼
//! 사용자명 정규화                   토큰 유도 (오버라이드 없으면)
//!      │                                │
//!      │                                ▼
//!      │                          사용자명 정규화
//!      │                                │
//!      └────────────┬───────────────────┘
//!                   ▼
//!          저장소 삽입 (유니크 인덱스가 중복을 원자적으로 거부)
//! ```
//!
//! ## 보안 설계 원칙
//!
//! - **bcrypt 해싱**: 환경별 cost로 무차별 대입 공격 방지
//! - **사용 불가 비밀번호**: Telegram 계정은 비밀번호 경로가 영구히 닫힘
//! - **중복 방지**: 사전 조회가 아닌 삽입 시점의 유니크 제약으로 경쟁 없이 보장

use std::sync::Arc;

use bcrypt::{hash, verify};
use log::{info, warn};

use crate::domain::dto::users::request::{CreateUserRequest, TelegramSignup};
use crate::domain::dto::users::response::UserResponse;
use crate::domain::entities::users::user::User;
use crate::errors::{AppError, AppResult};
use crate::repositories::AccountStore;
use crate::services::auth::telegram_token::TelegramTokenEngine;
use crate::services::users::username::canonical_username;
use crate::utils::string_utils::clean_optional_string;

/// 사용자 관리 비즈니스 로직 서비스
///
/// 계정 저장소와 토큰 유도 엔진은 생성자에서 주입됩니다.
pub struct UserService {
    /// 사용자 계정 저장소
    accounts: Arc<dyn AccountStore>,
    /// Telegram 토큰 유도 엔진
    token_engine: Arc<TelegramTokenEngine>,
    /// bcrypt 해싱 cost
    bcrypt_cost: u32,
}

impl UserService {
    /// 주입된 의존성으로 서비스를 생성합니다.
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        token_engine: Arc<TelegramTokenEngine>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            accounts,
            token_engine,
            bcrypt_cost,
        }
    }

    /// 새 로컬 사용자를 생성합니다.
    ///
    /// 비밀번호는 bcrypt로 해싱되어 저장되고, 사용자명은 정규화됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::MissingIdentity` - 사용자명이 비어 있는 경우
    /// * `AppError::ConflictError` - 유니크 속성 충돌
    /// * `AppError::InternalError` - 해싱 실패
    pub async fn create_user(&self, request: CreateUserRequest) -> AppResult<UserResponse> {
        let username = canonical_username(Some(&request.username), None, None)?;

        let password_hash = hash(&request.password, self.bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;

        let user = User::new_local(
            username,
            password_hash,
            clean_optional_string(request.phone),
            clean_optional_string(request.email),
            clean_optional_string(request.first_name),
            clean_optional_string(request.second_name),
        );

        let created = self.accounts.insert(user).await?;

        info!("새 로컬 사용자 등록: {}", created.username);

        Ok(UserResponse::from(created))
    }

    /// Telegram 신원으로 새 사용자를 생성합니다.
    ///
    /// 자격 토큰이 지정되지 않으면 유도 엔진이 `tg_id`에서 유도합니다.
    /// 사용자명은 Telegram 표시 이름에서, 그것도 없으면 `tg_id`에서
    /// 합성됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::MissingIdentity` - `tg_id`가 없는 경우
    /// * `AppError::ConflictError` - 이미 등록된 Telegram 신원
    pub async fn create_from_telegram(&self, signup: TelegramSignup) -> AppResult<User> {
        let tg_id = signup
            .tg_id
            .ok_or_else(|| AppError::MissingIdentity("Telegram ID가 없습니다".to_string()))?;

        let tg_username = clean_optional_string(signup.tg_username);
        let username = canonical_username(None, tg_username.as_deref(), Some(tg_id))?;

        // 오버라이드는 마이그레이션 경로에서만 쓰이고, 평소에는 항상 유도합니다
        let tg_token = match clean_optional_string(signup.tg_token) {
            Some(token) => token,
            None => self.token_engine.derive(tg_id),
        };

        let user = User::new_telegram(
            username,
            tg_id,
            tg_username,
            tg_token,
            clean_optional_string(signup.phone),
            clean_optional_string(signup.email),
        );

        let created = self.accounts.insert(user).await?;

        info!(
            "새 Telegram 사용자 등록: {} (tg_id: {})",
            created.username, tg_id
        );

        Ok(created)
    }

    /// 사용자명/비밀번호 자격을 검증합니다.
    ///
    /// 계정이 없거나, 비밀번호가 사용 불가 상태이거나, 해시가 일치하지
    /// 않으면 모두 같은 인증 실패로 끝납니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 자격 불일치
    /// * `AppError::DatabaseError` - 저장소 장애
    pub async fn verify_password(&self, username: &str, password: &str) -> AppResult<User> {
        let user = self.accounts.find_by_username(username).await?;

        let Some(user) = user else {
            warn!("로그인 실패 - 알 수 없는 사용자: {}", username);
            return Err(AppError::AuthenticationError(
                "사용자명 또는 비밀번호가 올바르지 않습니다".to_string(),
            ));
        };

        // Telegram 전용 계정은 비밀번호 경로로 인증할 수 없습니다
        let Some(stored_hash) = user.password.usable_hash() else {
            warn!("로그인 실패 - 비밀번호가 설정되지 않은 계정: {}", username);
            return Err(AppError::AuthenticationError(
                "사용자명 또는 비밀번호가 올바르지 않습니다".to_string(),
            ));
        };

        let matches = verify(password, stored_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;

        if !matches {
            warn!("로그인 실패 - 비밀번호 불일치: {}", username);
            return Err(AppError::AuthenticationError(
                "사용자명 또는 비밀번호가 올바르지 않습니다".to_string(),
            ));
        }

        Ok(user)
    }
}
