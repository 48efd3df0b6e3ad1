//! JWT 토큰 관리 서비스 구현
//!
//! JSON Web Token 기반의 세션 발급 시스템을 제공합니다.
//! 액세스 토큰과 리프레시 토큰의 생성과 검증을 담당합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::domain::entities::users::user::User;
use crate::domain::models::token::{TokenClaims, TokenPair, TokenUse};
use crate::errors::{AppError, AppResult};

/// JWT 토큰 관리 서비스
///
/// HMAC-SHA256 서명을 사용하여 안전한 JWT 토큰을 생성하고 검증합니다.
/// 서명 키는 생성자에서 명시적으로 주입되므로 테스트에서 고정 키를
/// 사용할 수 있습니다.
///
/// 발급은 서명 연산 외의 부수효과가 없습니다. 저장소를 변경하지
/// 않으므로 같은 계정으로 반복 발급하면 매번 독립적인 새 토큰 쌍이
/// 나옵니다 (`jti` 클레임이 매번 달라집니다).
///
/// ## 차단 정책
///
/// 차단된 계정(`is_banned`)에 대한 발급 요청은 어떤 경로로 들어오든
/// 이 서비스가 거부합니다. 정책을 발급 지점 하나에 묶어 두면 새 인증
/// 경로가 추가되어도 차단 검사를 빠뜨릴 수 없습니다.
pub struct TokenService {
    config: JwtConfig,
}

impl TokenService {
    /// 주입된 설정으로 서비스를 생성합니다.
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    /// 계정이 세션을 발급받을 수 있는 상태인지 확인합니다.
    fn ensure_issuable(&self, user: &User) -> AppResult<()> {
        if user.is_banned {
            return Err(AppError::AccountBanned);
        }
        Ok(())
    }

    /// 주어진 용도와 수명으로 토큰을 서명합니다.
    fn sign(&self, user_id: &str, token_use: TokenUse, lifetime: Duration) -> AppResult<String> {
        let now = Utc::now();

        let claims = TokenClaims {
            sub: user_id.to_string(),
            token_use,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.config.secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 사용자를 위한 JWT 액세스 토큰 생성
    ///
    /// # Errors
    ///
    /// * `AppError::AccountBanned` - 차단된 계정
    /// * `AppError::InternalError` - 토큰 생성 실패 또는 사용자 ID 없음
    pub fn issue_access_token(&self, user: &User) -> AppResult<String> {
        self.ensure_issuable(user)?;

        let user_id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        self.sign(
            &user_id,
            TokenUse::Access,
            Duration::minutes(self.config.access_expiration_minutes),
        )
    }

    /// 토큰 쌍 생성 (액세스 + 리프레시)
    ///
    /// # Errors
    ///
    /// * `AppError::AccountBanned` - 차단된 계정
    /// * `AppError::InternalError` - 토큰 생성 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token_pair = token_service.issue_token_pair(&user)?;
    /// println!("Access token: {}", token_pair.access_token);
    /// println!("Expires in: {} seconds", token_pair.expires_in);
    /// ```
    pub fn issue_token_pair(&self, user: &User) -> AppResult<TokenPair> {
        self.ensure_issuable(user)?;

        let user_id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        let access_token = self.sign(
            &user_id,
            TokenUse::Access,
            Duration::minutes(self.config.access_expiration_minutes),
        )?;
        let refresh_token = self.sign(
            &user_id,
            TokenUse::Refresh,
            Duration::days(self.config.refresh_expiration_days),
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.config.access_expiration_minutes * 60,
        })
    }

    /// JWT 토큰 검증 및 클레임 추출
    ///
    /// 서명과 만료를 검증한 뒤 토큰 용도까지 확인합니다. 액세스
    /// 토큰이 리프레시 자리에서 수락되는 일은 없습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 만료, 변조, 잘못된 형식, 용도 불일치
    pub fn verify_token(&self, token: &str, expected_use: TokenUse) -> AppResult<TokenClaims> {
        let decoding_key = DecodingKey::from_secret(self.config.secret.as_ref());
        let validation = Validation::default();

        let claims = decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string())
                }
                _ => AppError::AuthenticationError(format!("토큰 검증 실패: {}", e)),
            })?;

        if claims.token_use != expected_use {
            return Err(AppError::AuthenticationError(
                "토큰 용도가 올바르지 않습니다".to_string(),
            ));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn service() -> TokenService {
        TokenService::new(JwtConfig::new("test-jwt-secret", 30, 7).unwrap())
    }

    fn persisted_user() -> User {
        let mut user = User::new_telegram(
            "driver_42".to_string(),
            42,
            Some("driver_42".to_string()),
            "token".to_string(),
            None,
            None,
        );
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn test_issue_token_pair_binds_user_id() {
        let service = service();
        let user = persisted_user();

        let pair = service.issue_token_pair(&user).unwrap();

        let access = service
            .verify_token(&pair.access_token, TokenUse::Access)
            .unwrap();
        let refresh = service
            .verify_token(&pair.refresh_token, TokenUse::Refresh)
            .unwrap();

        assert_eq!(access.sub, user.id_string().unwrap());
        assert_eq!(refresh.sub, user.id_string().unwrap());
        assert_eq!(pair.expires_in, 30 * 60);
        assert!(access.exp > access.iat);
    }

    #[test]
    fn test_repeated_issuance_produces_fresh_pairs() {
        let service = service();
        let user = persisted_user();

        let first = service.issue_token_pair(&user).unwrap();
        let second = service.issue_token_pair(&user).unwrap();

        // jti가 매번 달라지므로 같은 초에 발급돼도 토큰이 겹치지 않습니다
        assert_ne!(first.access_token, second.access_token);
        assert_ne!(first.refresh_token, second.refresh_token);
    }

    #[test]
    fn test_banned_user_cannot_receive_tokens() {
        let service = service();
        let mut user = persisted_user();
        user.is_banned = true;

        assert!(matches!(
            service.issue_token_pair(&user),
            Err(AppError::AccountBanned)
        ));
        assert!(matches!(
            service.issue_access_token(&user),
            Err(AppError::AccountBanned)
        ));
    }

    #[test]
    fn test_access_token_rejected_as_refresh() {
        let service = service();
        let pair = service.issue_token_pair(&persisted_user()).unwrap();

        assert!(matches!(
            service.verify_token(&pair.access_token, TokenUse::Refresh),
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let service = service();
        let pair = service.issue_token_pair(&persisted_user()).unwrap();

        let mut tampered = pair.access_token.clone();
        tampered.pop();
        tampered.push('x');

        assert!(service.verify_token(&tampered, TokenUse::Access).is_err());
    }

    #[test]
    fn test_token_from_other_key_is_rejected() {
        let service = service();
        let other = TokenService::new(JwtConfig::new("other-secret", 30, 7).unwrap());

        let pair = other.issue_token_pair(&persisted_user()).unwrap();

        assert!(service
            .verify_token(&pair.access_token, TokenUse::Access)
            .is_err());
    }
}
