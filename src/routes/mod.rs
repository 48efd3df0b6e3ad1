//! API 라우트 설정 모듈
//!
//! RESTful API 엔드포인트들을 기능별로 그룹화하여 제공합니다.
//! 인증 관련 라우트와 헬스체크 엔드포인트를 포함합니다.
//!
//! # Available Routes
//!
//! ## 인증 (Public)
//! - `POST /telegram/token` - Telegram 자격 토큰을 세션 쌍으로 교환
//! - `POST /token/refresh` - 리프레시 토큰으로 액세스 토큰 재발급
//! - `POST /api/v1/auth/login` - 사용자명/비밀번호 로그인
//!
//! ## 사용자 (Public)
//! - `POST /api/v1/users` - 회원가입
//!
//! ## 운영
//! - `GET /health` - 헬스체크
//!
//! # Examples
//!
//! ```bash
//! # Telegram 토큰 교환
//! curl -X POST http://localhost:8080/telegram/token/ \
//!   -H "Content-Type: application/json" \
//!   -d '{"tg_token":"3f1a..."}'
//!
//! # 토큰 갱신
//! curl -X POST http://localhost:8080/token/refresh/ \
//!   -H "Content-Type: application/json" \
//!   -d '{"refresh":"eyJhbGciOiJIUzI1NiIs..."}'
//! ```

use actix_web::web;
use serde_json::json;

use crate::handlers;

/// 모든 라우트를 설정합니다
///
/// 기능별로 분할된 라우트들을 통합하여 애플리케이션에 등록합니다.
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    // Feature-specific routes
    configure_token_routes(cfg);
    configure_user_routes(cfg);
}

/// 토큰 교환/갱신 라우트를 설정합니다
///
/// 두 라우트 모두 사전 인증 없이 접근 가능합니다. 경로는
/// `NormalizePath::trim` 미들웨어 덕분에 트레일링 슬래시 유무와
/// 무관하게 해석됩니다.
fn configure_token_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/telegram").service(handlers::auth::telegram_token));
    cfg.service(web::scope("/token").service(handlers::auth::refresh_token));
}

/// 사용자 관련 라우트를 설정합니다
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1/users").service(handlers::users::create_user));
    cfg.service(web::scope("/api/v1/auth").service(handlers::auth::local_login));
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
///
/// # Examples
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "rideshare_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "auth": "Telegram token + JWT"
        }
    }))
}
