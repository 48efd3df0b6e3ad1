//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//! MongoDB를 주 저장소로 사용하고, Redis를 통한 캐싱을 지원합니다.
//!
//! ## 특징
//!
//! - **하이브리드 스토리지**: MongoDB + Redis 캐싱
//! - **데이터 무결성**: 유니크 제약 조건 및 인덱스 관리
//! - **원자적 중복 방지**: 삽입 시점에 유니크 인덱스가 충돌을 거부
//!
//! ## 캐싱 전략
//!
//! ### L1 Cache (Redis)
//! - **TTL**: 10분 (600초)
//! - **키 패턴**: 개별 사용자 `user:{user_id}`
//!
//! 인증 경로의 조회(`find_by_token`, `find_by_username`)는 캐싱하지
//! 않습니다. 차단 플래그 같은 상태 변경이 캐시 TTL 동안 무시되면
//! 차단된 계정이 세션을 계속 발급받을 수 있기 때문입니다.
//!
//! ### L2 Storage (MongoDB)
//! - **컬렉션명**: `users`
//! - **유니크 인덱스**: username, tg_id, tg_username, tg_token, phone, email
//!   (옵션 필드는 sparse)

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::caching::redis::RedisClient;
use crate::db::Database;
use crate::domain::entities::users::user::User;
use crate::errors::{AppError, AppResult};
use crate::repositories::users::AccountStore;

/// 개별 사용자 캐시 TTL (초)
const USER_CACHE_TTL_SECONDS: u64 = 600;

/// 사용자 데이터 액세스 리포지토리
///
/// 사용자 엔티티의 저장과 조회를 담당하며, MongoDB 컬렉션과
/// Redis 캐시를 통합하여 최적화된 데이터 액세스를 제공합니다.
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,
    /// Redis 캐시 클라이언트
    redis: Arc<RedisClient>,
}

impl UserRepository {
    /// 새 리포지토리 인스턴스를 생성합니다.
    pub fn new(db: Arc<Database>, redis: Arc<RedisClient>) -> Self {
        Self { db, redis }
    }

    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection("users")
    }

    fn cache_key(id: &str) -> String {
        format!("user:{}", id)
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 사용자 컬렉션에 필요한 모든 유니크 인덱스를 생성합니다.
    /// 애플리케이션 초기화 시점에 한 번 실행됩니다.
    ///
    /// 옵션 필드의 인덱스는 sparse로 만들어 필드가 없는 문서끼리
    /// 충돌하지 않게 합니다. 이 인덱스들이 동시 생성 경쟁에서
    /// 중복 계정을 막는 유일한 방어선입니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let collection = self.collection();

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("username_unique".to_string())
                    .build(),
            )
            .build();

        let sparse_unique = |field: &str| {
            IndexModel::builder()
                .keys(doc! { field: 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .sparse(true)
                        .name(format!("{}_unique", field))
                        .build(),
                )
                .build()
        };

        collection
            .create_indexes([
                username_index,
                sparse_unique("tg_id"),
                sparse_unique("tg_username"),
                sparse_unique("tg_token"),
                sparse_unique("phone"),
                sparse_unique("email"),
            ])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// MongoDB 중복 키 에러(E11000) 여부를 판별합니다.
    fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
        if let ErrorKind::Write(WriteFailure::WriteError(ref write_error)) = *error.kind {
            return write_error.code == 11000;
        }
        false
    }

    /// 중복 키 에러 메시지에서 충돌한 속성의 이름을 추출합니다.
    ///
    /// 에러 메시지에는 인덱스 이름이 포함되므로 클라이언트에게
    /// 어떤 속성이 충돌했는지 알려줄 수 있습니다.
    fn duplicate_field_label(message: &str) -> &'static str {
        const LABELS: [(&str, &str); 6] = [
            ("username_unique", "사용자명"),
            ("tg_id_unique", "Telegram ID"),
            ("tg_username_unique", "Telegram 사용자명"),
            ("tg_token_unique", "Telegram 토큰"),
            ("phone_unique", "전화번호"),
            ("email_unique", "이메일"),
        ];

        for (index_name, label) in LABELS {
            if message.contains(index_name) {
                return label;
            }
        }
        "계정 속성"
    }
}

#[async_trait]
impl AccountStore for UserRepository {
    /// 새 사용자 생성
    ///
    /// 중복 검사는 사전 조회가 아니라 삽입 자체에 맡깁니다.
    /// 유니크 인덱스가 위반되면 MongoDB가 E11000으로 삽입을 거부하고,
    /// 이는 `ConflictError`로 변환됩니다. 동시 생성 경쟁에서도
    /// 정확히 하나의 삽입만 성공합니다.
    async fn insert(&self, mut user: User) -> AppResult<User> {
        let result = self.collection().insert_one(&user).await.map_err(|e| {
            if Self::is_duplicate_key(&e) {
                let label = Self::duplicate_field_label(&e.to_string());
                AppError::ConflictError(format!("이미 사용 중인 {}입니다", label))
            } else {
                AppError::DatabaseError(e.to_string())
            }
        })?;

        user.id = result.inserted_id.as_object_id();

        Ok(user)
    }

    /// ID로 사용자 조회
    ///
    /// 가장 빈번한 조회 패턴이므로 캐시 우선 조회를 적용합니다.
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let cache_key = Self::cache_key(id);

        // 캐시에서 먼저 확인
        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        // DB 에서 조회
        let user = self
            .collection()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        // 캐시에 저장 (10분)
        if let Some(ref user) = user {
            let _ = self
                .redis
                .set_with_expiry(&cache_key, user, USER_CACHE_TTL_SECONDS)
                .await;
        }

        Ok(user)
    }

    /// 사용자명으로 사용자 조회
    ///
    /// 인증 경로에서 쓰이므로 캐싱하지 않습니다.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.collection()
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// Telegram 사용자 ID로 사용자 조회
    async fn find_by_tg_id(&self, tg_id: i64) -> AppResult<Option<User>> {
        self.collection()
            .find_one(doc! { "tg_id": tg_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 자격 토큰으로 사용자 조회
    ///
    /// 미등록 토큰은 `Ok(None)`이고 데이터베이스 장애만 에러입니다.
    /// 차단 플래그의 최신성이 중요하므로 캐싱하지 않습니다.
    async fn find_by_token(&self, tg_token: &str) -> AppResult<Option<User>> {
        self.collection()
            .find_one(doc! { "tg_token": tg_token })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_field_label_maps_index_names() {
        assert_eq!(
            UserRepository::duplicate_field_label(
                "E11000 duplicate key error collection: rideshare.users index: username_unique"
            ),
            "사용자명"
        );
        assert_eq!(
            UserRepository::duplicate_field_label("... index: tg_token_unique dup key ..."),
            "Telegram 토큰"
        );
        assert_eq!(
            UserRepository::duplicate_field_label("... index: tg_id_unique dup key ..."),
            "Telegram ID"
        );
    }

    #[test]
    fn test_duplicate_field_label_falls_back_to_generic() {
        assert_eq!(
            UserRepository::duplicate_field_label("unknown index"),
            "계정 속성"
        );
    }

    #[test]
    fn test_cache_key_format() {
        assert_eq!(
            UserRepository::cache_key("507f1f77bcf86cd799439011"),
            "user:507f1f77bcf86cd799439011"
        );
    }
}
