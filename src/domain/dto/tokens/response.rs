//! 토큰 관련 응답 DTO

use serde::Serialize;

/// Telegram 토큰 교환 성공 응답
#[derive(Debug, Serialize)]
pub struct TelegramTokenResponse {
    /// 액세스 토큰
    pub access: String,
    /// 리프레시 토큰
    pub refresh: String,
    /// 인증된 사용자 ID
    pub user_id: String,
    /// Telegram 표시 이름 (없으면 null)
    pub tg_username: Option<String>,
}

/// 토큰 갱신 성공 응답
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// 새로 발급된 액세스 토큰
    pub access: String,
}
