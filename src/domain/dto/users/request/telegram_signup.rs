//! Telegram 신원 기반 계정 생성 데이터
//!
//! Telegram 봇이나 마이그레이션 경로에서 전달되는 계정 생성 입력입니다.
//! 필드가 모두 선택적이므로 필수값 검증은 서비스 계층에서 수행됩니다.

use serde::Deserialize;

/// Telegram 신원으로 계정을 생성하기 위한 입력
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramSignup {
    /// Telegram 사용자 ID - 없으면 계정을 만들 수 없습니다
    pub tg_id: Option<i64>,
    /// Telegram 표시 이름
    pub tg_username: Option<String>,
    /// 사전 계산된 자격 토큰 (마이그레이션용 오버라이드)
    ///
    /// 지정되지 않으면 토큰 유도 엔진이 `tg_id`에서 유도합니다.
    pub tg_token: Option<String>,
    /// 전화번호
    pub phone: Option<String>,
    /// 이메일
    pub email: Option<String>,
}
