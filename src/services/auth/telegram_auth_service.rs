//! # Telegram 토큰 인증 서비스
//!
//! Telegram 봇이 발급한 신원을 백엔드 세션으로 교환하는
//! 자격 교환 프로토콜을 구현합니다. 비밀번호 없이 동작하는
//! 유일한 로그인 경로입니다.
//!
//! ## 교환 플로우
//!
//! ```text
//! ┌─────────────┐                    ┌─────────────────┐              ┌─────────────┐
//! │ 클라이언트    │                    │   우리 서버      │              │   MongoDB   │
//! └─────────────┘                    └─────────────────┘              └─────────────┘
//!        │                                    │                             │
//!        │ 1. POST /telegram/token {tg_token} │                             │
//!        ├───────────────────────────────────►│                             │
//!        │                                    │ 2. 빈 토큰이면 즉시 거부       │
//!        │                                    │    (저장소 조회 없음)         │
//!        │                                    │                             │
//!        │                                    │ 3. 토큰으로 계정 조회          │
//!        │                                    ├────────────────────────────►│
//!        │                                    │◄────────────────────────────┤
//!        │                                    │                             │
//!        │                                    │ 4. 미스 → 동일한 401          │
//!        │                                    │    차단 계정 → 403            │
//!        │                                    │                             │
//!        │                                    │ 5. JWT 토큰 쌍 발급           │
//!        │ 6. {access, refresh,               │                             │
//!        │     user_id, tg_username}          │                             │
//!        │◄───────────────────────────────────┤                             │
//! ```
//!
//! ## 보안 특징
//!
//! ### 1. 균일한 실패 응답
//!
//! 토큰 누락, 형식 오류, 미등록 토큰은 모두 같은
//! [`AppError::InvalidCredential`]로 끝납니다. 응답만 보고 어떤 토큰이
//! 등록되어 있는지 알아낼 수 없습니다.
//!
//! ### 2. 저장소를 통한 검증
//!
//! 클라이언트가 제시한 토큰은 그 자체로 아무것도 증명하지 않습니다.
//! 저장소에서 해당 토큰을 가진 계정이 조회되어야만 유효합니다.
//!
//! ### 3. 상태 없는 교환
//!
//! 호출 간에 공유되는 상태가 없습니다. 같은 토큰으로 반복 호출하면
//! 매번 독립적인 새 세션 쌍이 발급됩니다.

use std::sync::Arc;

use log::info;

use crate::domain::dto::tokens::response::{RefreshResponse, TelegramTokenResponse};
use crate::domain::models::token::TokenUse;
use crate::errors::{AppError, AppResult};
use crate::repositories::AccountStore;
use crate::services::auth::token_service::TokenService;

/// Telegram 토큰 인증 서비스
///
/// 자격 토큰을 받아 계정으로 해석하고 세션 토큰 쌍을 발급합니다.
/// 계정 저장소와 토큰 서비스는 생성자에서 주입됩니다.
pub struct TelegramAuthService {
    /// 사용자 계정 저장소
    accounts: Arc<dyn AccountStore>,
    /// JWT 세션 토큰 서비스
    tokens: Arc<TokenService>,
}

impl TelegramAuthService {
    /// 주입된 의존성으로 서비스를 생성합니다.
    pub fn new(accounts: Arc<dyn AccountStore>, tokens: Arc<TokenService>) -> Self {
        Self { accounts, tokens }
    }

    /// Telegram 자격 토큰을 세션 토큰 쌍으로 교환합니다.
    ///
    /// # 처리 단계
    ///
    /// 1. 빈 토큰은 저장소 조회 없이 즉시 거부
    /// 2. 저장소에서 토큰으로 계정 해석
    /// 3. 미스는 1번과 동일한 에러 (미스와 형식 오류를 구분해 노출하지 않음)
    /// 4. 차단된 계정은 발급 거부
    /// 5. 성공 시 새 세션 쌍과 계정 식별 정보 반환
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidCredential` - 토큰 누락/형식 오류/미등록
    /// * `AppError::AccountBanned` - 차단된 계정
    /// * `AppError::DatabaseError` - 저장소 장애 (인증 실패와 구분됨)
    pub async fn exchange(&self, tg_token: &str) -> AppResult<TelegramTokenResponse> {
        let tg_token = tg_token.trim();
        if tg_token.is_empty() {
            return Err(AppError::InvalidCredential);
        }

        let user = self
            .accounts
            .find_by_token(tg_token)
            .await?
            .ok_or(AppError::InvalidCredential)?;

        let pair = self.tokens.issue_token_pair(&user)?;

        let user_id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        info!("Telegram 토큰 로그인 성공: {}", user.username);

        Ok(TelegramTokenResponse {
            access: pair.access_token,
            refresh: pair.refresh_token,
            user_id,
            tg_username: user.tg_username,
        })
    }

    /// 리프레시 토큰으로 새 액세스 토큰을 발급합니다.
    ///
    /// 리프레시 토큰을 검증한 뒤 계정을 저장소에서 다시 읽어
    /// 차단 정책을 재적용합니다. 발급 이후 차단된 계정은 남은
    /// 리프레시 토큰으로도 새 액세스 토큰을 받을 수 없습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 만료/변조/용도 불일치, 계정 소멸
    /// * `AppError::AccountBanned` - 차단된 계정
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<RefreshResponse> {
        let claims = self.tokens.verify_token(refresh_token, TokenUse::Refresh)?;

        let user = self
            .accounts
            .find_by_id(&claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::AuthenticationError("사용자를 찾을 수 없습니다".to_string())
            })?;

        let access = self.tokens.issue_access_token(&user)?;

        Ok(RefreshResponse { access })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use mongodb::bson::oid::ObjectId;

    use crate::config::JwtConfig;
    use crate::domain::entities::users::user::User;

    /// 테스트용 인메모리 계정 저장소
    ///
    /// 토큰 조회 횟수를 기록하여 빈 토큰이 저장소에 도달하지 않는
    /// 것을 검증할 수 있게 합니다.
    #[derive(Default)]
    struct InMemoryStore {
        users: Mutex<Vec<User>>,
        token_lookups: AtomicUsize,
    }

    impl InMemoryStore {
        fn with_user(user: User) -> Self {
            Self {
                users: Mutex::new(vec![user]),
                token_lookups: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AccountStore for InMemoryStore {
        async fn insert(&self, mut user: User) -> crate::errors::AppResult<User> {
            user.id = Some(ObjectId::new());
            self.users.lock().unwrap().push(user.clone());
            Ok(user)
        }

        async fn find_by_id(&self, id: &str) -> crate::errors::AppResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.id_string().as_deref() == Some(id))
                .cloned())
        }

        async fn find_by_username(&self, username: &str) -> crate::errors::AppResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.username == username)
                .cloned())
        }

        async fn find_by_tg_id(&self, tg_id: i64) -> crate::errors::AppResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.tg_id == Some(tg_id))
                .cloned())
        }

        async fn find_by_token(&self, tg_token: &str) -> crate::errors::AppResult<Option<User>> {
            self.token_lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.tg_token.as_deref() == Some(tg_token))
                .cloned())
        }
    }

    fn registered_user() -> User {
        let mut user = User::new_telegram(
            "driver_42".to_string(),
            42,
            Some("driver_42".to_string()),
            "a-valid-token".to_string(),
            None,
            None,
        );
        user.id = Some(ObjectId::new());
        user
    }

    fn service(store: Arc<InMemoryStore>) -> TelegramAuthService {
        let tokens = Arc::new(TokenService::new(
            JwtConfig::new("test-jwt-secret", 30, 7).unwrap(),
        ));
        TelegramAuthService::new(store, tokens)
    }

    #[actix_web::test]
    async fn test_exchange_returns_session_pair() {
        let user = registered_user();
        let user_id = user.id_string().unwrap();
        let store = Arc::new(InMemoryStore::with_user(user));
        let service = service(store.clone());

        let response = service.exchange("a-valid-token").await.unwrap();

        assert_eq!(response.user_id, user_id);
        assert_eq!(response.tg_username.as_deref(), Some("driver_42"));
        assert!(!response.access.is_empty());
        assert!(!response.refresh.is_empty());
        assert_ne!(response.access, response.refresh);
    }

    #[actix_web::test]
    async fn test_empty_token_fails_without_store_lookup() {
        let store = Arc::new(InMemoryStore::with_user(registered_user()));
        let service = service(store.clone());

        for input in ["", "   "] {
            assert!(matches!(
                service.exchange(input).await,
                Err(AppError::InvalidCredential)
            ));
        }

        assert_eq!(store.token_lookups.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn test_unknown_token_fails_with_same_error_as_empty() {
        let store = Arc::new(InMemoryStore::with_user(registered_user()));
        let service = service(store);

        let unknown = service.exchange("not-a-real-token").await.unwrap_err();
        let empty = service.exchange("").await.unwrap_err();

        // 두 실패 모두 동일한 에러 본문이어야 합니다
        assert_eq!(unknown.to_string(), empty.to_string());
        assert!(matches!(unknown, AppError::InvalidCredential));
    }

    #[actix_web::test]
    async fn test_banned_account_cannot_exchange() {
        let mut user = registered_user();
        user.is_banned = true;
        let store = Arc::new(InMemoryStore::with_user(user));
        let service = service(store);

        assert!(matches!(
            service.exchange("a-valid-token").await,
            Err(AppError::AccountBanned)
        ));
    }

    #[actix_web::test]
    async fn test_repeated_exchange_produces_independent_sessions() {
        let store = Arc::new(InMemoryStore::with_user(registered_user()));
        let service = service(store);

        let first = service.exchange("a-valid-token").await.unwrap();
        let second = service.exchange("a-valid-token").await.unwrap();

        assert_ne!(first.access, second.access);
        assert_ne!(first.refresh, second.refresh);
    }

    #[actix_web::test]
    async fn test_refresh_returns_new_access_token() {
        let store = Arc::new(InMemoryStore::with_user(registered_user()));
        let service = service(store);

        let pair = service.exchange("a-valid-token").await.unwrap();
        let refreshed = service.refresh(&pair.refresh).await.unwrap();

        assert!(!refreshed.access.is_empty());
    }

    #[actix_web::test]
    async fn test_refresh_rejects_access_token() {
        let store = Arc::new(InMemoryStore::with_user(registered_user()));
        let service = service(store);

        let pair = service.exchange("a-valid-token").await.unwrap();

        assert!(matches!(
            service.refresh(&pair.access).await,
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[actix_web::test]
    async fn test_refresh_rejects_banned_account() {
        let user = registered_user();
        let store = Arc::new(InMemoryStore::with_user(user.clone()));
        let service = service(store.clone());

        let pair = service.exchange("a-valid-token").await.unwrap();

        // 발급 이후 계정이 차단된 상황
        store
            .users
            .lock()
            .unwrap()
            .iter_mut()
            .for_each(|u| u.is_banned = true);

        assert!(matches!(
            service.refresh(&pair.refresh).await,
            Err(AppError::AccountBanned)
        ));
    }
}
