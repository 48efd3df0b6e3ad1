//! 토큰 관련 요청 DTO
//!
//! Telegram 토큰 교환과 세션 갱신 엔드포인트의 요청 본문을 정의합니다.

use serde::Deserialize;
use validator::Validate;

/// Telegram 토큰 교환 요청 DTO
///
/// 사전 인증 없이 호출되는 엔드포인트이므로 토큰 필드 외에는
/// 아무것도 받지 않습니다.
///
/// 필드가 `Option`인 이유: 토큰 누락을 역직렬화 실패(400)가 아니라
/// 다른 인증 실패와 동일한 401로 처리해야 하기 때문입니다.
#[derive(Debug, Deserialize)]
pub struct TelegramTokenRequest {
    /// Telegram ID에서 유도된 자격 토큰
    pub tg_token: Option<String>,
}

/// 토큰 갱신 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    /// 발급 시 전달된 리프레시 토큰
    #[validate(length(min = 1, message = "refresh는 필수입니다"))]
    pub refresh: String,
}
