//! 사용자 관련 응답 DTO
//!
//! 엔티티를 API 응답으로 변환합니다. 비밀번호 상태를 포함한
//! 민감 정보는 변환 과정에서 제거됩니다.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::users::user::User;
use crate::domain::models::token::TokenPair;

/// 사용자 정보 응답 DTO
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// 사용자 ID
    pub id: String,
    /// 사용자명
    pub username: String,
    /// Telegram 사용자 ID
    pub tg_id: Option<i64>,
    /// Telegram 표시 이름
    pub tg_username: Option<String>,
    /// 전화번호
    pub phone: Option<String>,
    /// 이메일
    pub email: Option<String>,
    /// 이름
    pub first_name: Option<String>,
    /// 성
    pub second_name: Option<String>,
    /// 관리자 역할 여부
    pub is_admin: bool,
    /// 모더레이터 역할 여부
    pub is_moderator: bool,
    /// 차단 여부
    pub is_banned: bool,
    /// 생성 시간
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            username: user.username,
            tg_id: user.tg_id,
            tg_username: user.tg_username,
            phone: user.phone,
            email: user.email,
            first_name: user.first_name,
            second_name: user.second_name,
            is_admin: user.is_admin,
            is_moderator: user.is_moderator,
            is_banned: user.is_banned,
            created_at: user.created_at.to_chrono(),
        }
    }
}

/// 로그인 성공 응답 DTO
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// 인증된 사용자 정보
    pub user: UserResponse,
    /// 액세스 토큰
    pub access_token: String,
    /// 리프레시 토큰
    pub refresh_token: String,
    /// 액세스 토큰 만료 시간 (초)
    pub expires_in: i64,
}

impl LoginResponse {
    /// 사용자와 토큰 쌍으로 로그인 응답을 구성합니다.
    pub fn new(user: User, tokens: TokenPair) -> Self {
        Self {
            user: UserResponse::from(user),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::user::StoredPassword;

    #[test]
    fn test_user_response_omits_password_state() {
        let mut user = User::new_telegram(
            "driver_7".to_string(),
            7,
            Some("driver_7".to_string()),
            "token".to_string(),
            None,
            None,
        );
        user.password = StoredPassword::Usable("$2b$04$hash".to_string());

        let response = UserResponse::from(user);
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "driver_7");
        assert_eq!(json["tg_id"], 7);
    }
}
