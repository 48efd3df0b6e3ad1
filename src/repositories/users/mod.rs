//! 사용자 리포지토리 모듈
//!
//! 사용자 계정에 대한 타입이 있는 저장소 추상화와 MongoDB 구현을 제공합니다.

pub mod user_repo;

use async_trait::async_trait;

use crate::domain::entities::users::user::User;
use crate::errors::AppResult;

/// 사용자 계정 저장소 추상화
///
/// 서비스 계층은 이 trait에만 의존하므로 테스트에서는 인메모리
/// 구현으로 대체할 수 있습니다. 프로덕션 구현은
/// [`user_repo::UserRepository`]입니다.
///
/// ## 조회 결과 규약
///
/// 모든 조회는 "없음"과 "장애"를 구분합니다:
///
/// - `Ok(Some(user))` - 계정을 찾음
/// - `Ok(None)` - 해당 계정이 없음 (정상적이고 조용한 결과)
/// - `Err(_)` - 저장소 장애, 타임아웃 등 인프라 에러
///
/// 호출자는 미스와 장애를 절대 혼동해서는 안 됩니다. 미스는 인증
/// 실패로, 장애는 5xx로 이어집니다.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// 새 계정을 저장합니다.
    ///
    /// 유니크 제약 위반 시 `AppError::ConflictError`를 반환합니다.
    /// 중복 검사는 저장소의 유니크 인덱스가 원자적으로 수행하므로
    /// 동시 생성 경쟁에서도 정확히 하나만 성공합니다.
    async fn insert(&self, user: User) -> AppResult<User>;

    /// ID로 계정을 조회합니다.
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// 사용자명으로 계정을 조회합니다.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Telegram 사용자 ID로 계정을 조회합니다.
    async fn find_by_tg_id(&self, tg_id: i64) -> AppResult<Option<User>>;

    /// 자격 토큰으로 계정을 조회합니다.
    ///
    /// 인증 경로에서 호출되므로 미등록 토큰은 조용히 `Ok(None)`으로
    /// 끝나야 합니다.
    async fn find_by_token(&self, tg_token: &str) -> AppResult<Option<User>>;
}
