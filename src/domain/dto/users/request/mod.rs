pub mod auth_request;
pub mod create_user_request;
pub mod telegram_signup;

pub use auth_request::LocalLoginRequest;
pub use create_user_request::CreateUserRequest;
pub use telegram_signup::TelegramSignup;
