//! Telegram 자격 토큰 유도 엔진
//!
//! Telegram 사용자 ID로부터 불투명한 자격 토큰을 결정적으로 유도합니다.
//! 같은 비밀키로 같은 ID를 넣으면 항상 같은 토큰이 나오므로, Telegram
//! 봇 쪽과 백엔드가 별도의 토큰 교환 없이 동일한 토큰을 공유할 수
//! 있습니다.
//!
//! ## 유도 방식
//!
//! ```text
//! token = lowercase_hex( HMAC-SHA256( key = TELEGRAM_AUTH_SECRET,
//!                                     message = decimal(tg_id) ) )
//! ```
//!
//! 키가 있는 단방향 함수이므로 비밀키 없이는 토큰을 위조하거나
//! 토큰에서 ID를 역산할 수 없습니다.
//!
//! ## 검증에 대하여
//!
//! 이 엔진은 토큰을 만들 뿐, 클라이언트가 제시한 토큰을 스스로
//! 증명된 것으로 받아들이지 않습니다. 제시된 토큰의 검증은 항상
//! 저장소 조회([`AccountStore::find_by_token`])를 통해서만 이뤄집니다.
//!
//! [`AccountStore::find_by_token`]: crate::repositories::AccountStore::find_by_token

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::config::TelegramAuthConfig;

type HmacSha256 = Hmac<Sha256>;

/// Telegram 토큰 유도 엔진
///
/// 비밀키는 생성자에서 명시적으로 주입됩니다. 설정 생성 자체가
/// 빈 비밀키를 거부하므로, 엔진이 비밀키 없이 만들어지는 일은 없습니다.
pub struct TelegramTokenEngine {
    secret: String,
}

impl TelegramTokenEngine {
    /// 주입된 설정으로 엔진을 생성합니다.
    pub fn new(config: TelegramAuthConfig) -> Self {
        Self {
            secret: config.secret,
        }
    }

    /// Telegram 사용자 ID에서 자격 토큰을 유도합니다.
    ///
    /// 결정적 연산입니다. 같은 `(tg_id, 비밀키)` 쌍은 항상 같은
    /// 64자 소문자 16진수 문자열을 만듭니다.
    pub fn derive(&self, tg_id: i64) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC은 임의 길이의 키를 허용합니다");
        mac.update(tg_id.to_string().as_bytes());

        hex::encode(mac.finalize().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(secret: &str) -> TelegramTokenEngine {
        TelegramTokenEngine::new(TelegramAuthConfig::new(secret).unwrap())
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let engine = engine("test-secret");

        assert_eq!(engine.derive(42), engine.derive(42));
        assert_eq!(engine.derive(-7), engine.derive(-7));
    }

    #[test]
    fn test_different_ids_produce_different_tokens() {
        let engine = engine("test-secret");

        assert_ne!(engine.derive(42), engine.derive(43));
        assert_ne!(engine.derive(1), engine.derive(10));
    }

    #[test]
    fn test_different_secrets_produce_different_tokens() {
        let a = engine("secret-a");
        let b = engine("secret-b");

        assert_ne!(a.derive(42), b.derive(42));
    }

    #[test]
    fn test_token_is_lowercase_hex() {
        let token = engine("test-secret").derive(123456789);

        assert_eq!(token.len(), 64);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_message_is_decimal_representation() {
        // 유도 입력은 ID의 십진수 문자열입니다
        let engine = engine("test-secret");

        let mut mac = HmacSha256::new_from_slice(b"test-secret").unwrap();
        mac.update(b"42");
        let expected = hex::encode(mac.finalize().into_bytes());

        assert_eq!(engine.derive(42), expected);
    }
}
