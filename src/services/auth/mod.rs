//! 인증 관련 서비스 모듈

pub mod telegram_auth_service;
pub mod telegram_token;
pub mod token_service;

pub use telegram_auth_service::TelegramAuthService;
pub use telegram_token::TelegramTokenEngine;
pub use token_service::TokenService;
