//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 로컬 인증(사용자명/비밀번호)과 Telegram 토큰 인증을 모두 지원하는
//! 통합된 사용자 모델을 제공합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 저장된 비밀번호의 상태
///
/// "비밀번호 없음"을 빈 문자열 같은 센티널 값이 아니라 명시적인
/// 상태로 표현합니다. Telegram으로 생성된 계정은 `Unusable` 상태로
/// 만들어지며, 비밀번호 인증 경로는 `Usable`에 대해서만 성공할 수 있습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "hash", rename_all = "snake_case")]
pub enum StoredPassword {
    /// 아직 어떤 비밀번호도 설정되지 않음 (계정 구성 중에만 일시적으로 존재)
    Unset,
    /// 비밀번호 인증이 비활성화됨 (Telegram 전용 계정)
    Unusable,
    /// bcrypt 해시가 저장된 사용 가능한 비밀번호
    Usable(String),
}

impl StoredPassword {
    /// 비밀번호 인증에 사용할 수 있는 해시를 반환합니다.
    ///
    /// `Unset`/`Unusable` 상태에서는 항상 `None`이므로
    /// 비밀번호 검증이 성공할 수 없습니다.
    pub fn usable_hash(&self) -> Option<&str> {
        match self {
            StoredPassword::Usable(hash) => Some(hash),
            _ => None,
        }
    }

    /// 비밀번호 인증이 가능한 상태인지 확인합니다.
    pub fn is_usable(&self) -> bool {
        matches!(self, StoredPassword::Usable(_))
    }
}

/// 사용자 엔티티
///
/// 시스템의 모든 사용자를 표현하는 핵심 도메인 엔티티입니다.
/// 로컬 인증과 Telegram 토큰 인증을 모두 지원합니다.
///
/// ## 유니크 제약
///
/// `username`, `tg_id`, `tg_username`, `tg_token`, `phone`, `email`은
/// 저장소 계층의 유니크 인덱스로 보호됩니다 (옵션 필드는 sparse).
/// Option 필드에 `skip_serializing_if`를 붙여 `None`이 `null`로
/// 저장되지 않게 해야 sparse 인덱스가 올바르게 동작합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 정규화된 사용자명 (unique)
    pub username: String,
    /// Telegram 사용자 ID (unique, 존재하는 경우)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tg_id: Option<i64>,
    /// Telegram 표시 이름 (unique, 존재하는 경우)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tg_username: Option<String>,
    /// Telegram ID에서 유도된 자격 토큰 (unique, 존재하는 경우)
    ///
    /// 비밀번호 해시를 대신하는 대체 주 자격 증명입니다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tg_token: Option<String>,
    /// 저장된 비밀번호 상태
    pub password: StoredPassword,
    /// 전화번호 (unique, 존재하는 경우)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// 이메일 (unique, 존재하는 경우)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// 이름
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// 성
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_name: Option<String>,
    /// 관리자 역할 여부
    pub is_admin: bool,
    /// 모더레이터 역할 여부
    pub is_moderator: bool,
    /// 차단 여부 - 차단된 계정은 세션을 발급받을 수 없음
    pub is_banned: bool,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성 (사용자명/비밀번호)
    pub fn new_local(
        username: String,
        password_hash: String,
        phone: Option<String>,
        email: Option<String>,
        first_name: Option<String>,
        second_name: Option<String>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            username,
            tg_id: None,
            tg_username: None,
            tg_token: None,
            password: StoredPassword::Usable(password_hash),
            phone,
            email,
            first_name,
            second_name,
            is_admin: false,
            is_moderator: false,
            is_banned: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// 새 Telegram 사용자 생성
    ///
    /// Telegram 신원으로 생성된 계정은 비밀번호가 `Unusable` 상태로
    /// 시작되므로 비밀번호 인증 경로가 절대 성공하지 않습니다.
    pub fn new_telegram(
        username: String,
        tg_id: i64,
        tg_username: Option<String>,
        tg_token: String,
        phone: Option<String>,
        email: Option<String>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            username,
            tg_id: Some(tg_id),
            tg_username,
            tg_token: Some(tg_token),
            password: StoredPassword::Unusable,
            phone,
            email,
            first_name: None,
            second_name: None,
            is_admin: false,
            is_moderator: false,
            is_banned: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 비밀번호 인증이 가능한 사용자인지 확인
    pub fn has_usable_password(&self) -> bool {
        self.password.is_usable()
    }

    /// Telegram 토큰 인증이 가능한 사용자인지 확인
    pub fn has_telegram_token(&self) -> bool {
        self.tg_token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_user_has_usable_password() {
        let user = User::new_local(
            "alice".to_string(),
            "$2b$04$hash".to_string(),
            None,
            None,
            None,
            None,
        );

        assert!(user.has_usable_password());
        assert!(!user.has_telegram_token());
        assert_eq!(user.password.usable_hash(), Some("$2b$04$hash"));
    }

    #[test]
    fn test_telegram_user_password_is_unusable() {
        let user = User::new_telegram(
            "driver_42".to_string(),
            42,
            Some("driver_42".to_string()),
            "deadbeef".to_string(),
            None,
            None,
        );

        assert!(!user.has_usable_password());
        assert!(user.has_telegram_token());
        assert_eq!(user.password, StoredPassword::Unusable);
        assert_eq!(user.password.usable_hash(), None);
    }

    #[test]
    fn test_unset_password_is_not_usable() {
        assert!(!StoredPassword::Unset.is_usable());
        assert_eq!(StoredPassword::Unset.usable_hash(), None);
    }

    #[test]
    fn test_new_user_role_flags_default_to_false() {
        let user = User::new_telegram(
            "rider".to_string(),
            7,
            None,
            "token".to_string(),
            None,
            None,
        );

        assert!(!user.is_admin);
        assert!(!user.is_moderator);
        assert!(!user.is_banned);
    }

    #[test]
    fn test_stored_password_bson_roundtrip() {
        let usable = StoredPassword::Usable("$2b$04$hash".to_string());
        let doc = mongodb::bson::to_bson(&usable).unwrap();
        let back: StoredPassword = mongodb::bson::from_bson(doc).unwrap();
        assert_eq!(back, usable);

        let unusable = StoredPassword::Unusable;
        let doc = mongodb::bson::to_bson(&unusable).unwrap();
        let back: StoredPassword = mongodb::bson::from_bson(doc).unwrap();
        assert_eq!(back, unusable);
    }
}
