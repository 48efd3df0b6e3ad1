//! # User Management HTTP Handlers
//!
//! 사용자 관리와 관련된 HTTP 엔드포인트를 처리하는 핸들러 함수들입니다.
//!
//! ## 에러 처리 패턴
//!
//! | 상황 | 상태 코드 |
//! |------|-----------|
//! | 입력 검증 실패 | 400 Bad Request |
//! | 유니크 속성 충돌 | 409 Conflict |
//! | 저장소 장애 | 500 Internal Server Error |

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::users::request::CreateUserRequest;
use crate::errors::AppError;
use crate::services::users::UserService;

/// 사용자 생성 핸들러 (회원가입)
///
/// 새 로컬 사용자 계정을 생성합니다. 사용자명/연락처 중복은
/// 저장소의 유니크 제약이 거부하며 409로 응답됩니다.
///
/// # Endpoint
/// `POST /api/v1/users`
#[post("")]
pub async fn create_user(
    user_service: web::Data<UserService>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = user_service.create_user(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}
