//! Restaurant Ordering API Library
//!
//! # Overview
//!
//! 레스토랑 주문 플랫폼의 백엔드 API (회원가입/로그인, 상품 조회/관리).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                         API                              │
//! │                                                          │
//! │  ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌─────────┐    │
//! │  │ Routes  │  │Services │  │   DB    │  │  Types  │    │
//! │  └────┬────┘  └────┬────┘  └────┬────┘  └────┬────┘    │
//! │       │            │            │            │          │
//! │       └────────────┴────────────┴────────────┘          │
//! │                         │                                │
//! └─────────────────────────┼────────────────────────────────┘
//!                           │
//!                           ▼
//!                  ┌────────────────┐
//!                  │   PostgreSQL   │
//!                  └────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: 환경 설정 관리
//! - `error`: 에러 타입 및 처리
//! - `routes`: HTTP 엔드포인트 핸들러
//! - `services`: 비즈니스 로직 (상품, 조회 기록, 회원)
//! - `db`: 데이터베이스 연동
//! - `types`: 공통 타입 정의
//!
//! ## Usage
//!
//! ```rust,ignore
//! use restaurant_api::{AppState, Config, Database};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let db = Database::connect(&config.database_url, config.database_max_connections).await?;
//!     let state = AppState::new(Arc::new(db), config);
//!
//!     // ... 서버 시작
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod db;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use error::ApiError;
pub use db::Database;
pub use services::{MemberService, ProductService, RestaurantSignup, ViewService};

/// 애플리케이션 전역 상태
///
/// 서비스는 시작 시 한 번 생성되어 모든 요청이 공유한다.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub products: Arc<ProductService>,
    pub restaurant: Arc<RestaurantSignup>,
    pub config: Arc<Config>,
}

impl AppState {
    /// PostgreSQL 저장소로 모든 서비스를 구성
    pub fn new(db: Arc<Database>, config: Config) -> Self {
        let views = ViewService::new(db.clone());
        let products = ProductService::new(db.clone(), views);
        let members = MemberService::new(db.clone());

        Self {
            products: Arc::new(products),
            restaurant: Arc::new(RestaurantSignup::new(Arc::new(members))),
            db,
            config: Arc::new(config),
        }
    }
}
