//! # Redis 캐시 클라이언트 구현
//!
//! 이 모듈은 Redis를 백엔드로 하는 캐시 클라이언트를 제공합니다.
//! 타입 안전성과 비동기 처리를 지원합니다.
//!
//! ## 설계 철학
//!
//! - **타입 안전성**: Rust의 타입 시스템을 활용한 컴파일 타임 검증
//! - **비동기 우선**: 모든 작업이 async/await 기반으로 구현
//! - **에러 처리**: Result 타입을 통한 명시적 에러 핸들링
//! - **자동 직렬화**: Serde를 통한 투명한 JSON 변환
//!
//! ## 연결 관리
//!
//! Redis 연결은 멀티플렉싱을 사용하여 단일 TCP 연결에서
//! 여러 동시 요청을 효율적으로 처리합니다.

use log::info;
use redis::{AsyncCommands, Client};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::RedisConfig;
use crate::errors::{AppError, AppResult};

/// Redis 캐시 클라이언트 래퍼
///
/// Redis 서버와의 상호작용을 추상화하며 조회 성능 향상을 위한
/// 캐싱 레이어를 제공합니다. 캐시는 읽기 최적화 용도로만 쓰이므로
/// 캐시 장애가 본 저장소 경로를 막아서는 안 됩니다. 호출자는
/// 캐시 에러를 무시할지 전파할지 선택할 수 있습니다.
///
/// ## 사용 예제
///
/// ```rust,ignore
/// use crate::caching::redis::RedisClient;
/// use crate::config::RedisConfig;
///
/// let redis = RedisClient::new(&RedisConfig::from_env()).await?;
///
/// // 10분 TTL로 캐싱
/// redis.set_with_expiry("user:123", &user, 600).await?;
///
/// // 캐시된 데이터 조회
/// let cached: Option<User> = redis.get("user:123").await?;
/// ```
#[derive(Clone)]
pub struct RedisClient {
    /// 멀티플렉싱을 지원하는 Redis 클라이언트
    client: Client,
}

impl RedisClient {
    /// 새 Redis 클라이언트 인스턴스를 생성합니다.
    ///
    /// 생성 시 PING 명령으로 연결 테스트를 수행하여 Redis 서버의
    /// 가용성을 확인합니다.
    pub async fn new(config: &RedisConfig) -> AppResult<Self> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| AppError::RedisError(format!("Redis URL 파싱 실패: {}", e)))?;

        // 연결 테스트 - PING 명령으로 서버 가용성 확인
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::RedisError(format!("Redis 연결 실패: {}", e)))?;
        redis::cmd("PING")
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| AppError::RedisError(format!("Redis PING 실패: {}", e)))?;

        info!("✅ Redis 연결 성공");

        Ok(Self { client })
    }

    /// 키에 해당하는 값을 조회합니다.
    ///
    /// 값은 JSON으로 역직렬화되며, 키가 없으면 `Ok(None)`을 반환합니다.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self.connection().await?;

        let raw: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| AppError::RedisError(format!("Redis GET 실패: {}", e)))?;

        match raw {
            Some(json) => {
                let value = serde_json::from_str(&json)
                    .map_err(|e| AppError::RedisError(format!("캐시 역직렬화 실패: {}", e)))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// 값을 TTL과 함께 저장합니다.
    ///
    /// 값은 JSON으로 직렬화되어 저장되며, `ttl_seconds` 이후 만료됩니다.
    pub async fn set_with_expiry<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let mut conn = self.connection().await?;

        let json = serde_json::to_string(value)
            .map_err(|e| AppError::RedisError(format!("캐시 직렬화 실패: {}", e)))?;

        conn.set_ex::<_, _, ()>(key, json, ttl_seconds)
            .await
            .map_err(|e| AppError::RedisError(format!("Redis SETEX 실패: {}", e)))?;

        Ok(())
    }

    /// 키를 삭제합니다.
    ///
    /// 존재하지 않는 키 삭제는 에러가 아닙니다.
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.connection().await?;

        conn.del::<_, ()>(key)
            .await
            .map_err(|e| AppError::RedisError(format!("Redis DEL 실패: {}", e)))?;

        Ok(())
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::RedisError(format!("Redis 연결 획득 실패: {}", e)))
    }
}
