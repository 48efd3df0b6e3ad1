//! 로컬 로그인 요청 DTO

use serde::Deserialize;
use validator::Validate;

/// 사용자명/비밀번호 로그인 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct LocalLoginRequest {
    /// 사용자명
    #[validate(length(min = 1, message = "사용자명은 필수입니다"))]
    pub username: String,

    /// 비밀번호
    #[validate(length(min = 1, message = "비밀번호는 필수입니다"))]
    pub password: String,
}
