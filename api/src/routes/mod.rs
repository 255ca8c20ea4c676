//! API Routes Module
//!
//! 모든 HTTP 엔드포인트 정의
//!
//! # Routes
//! - `/health` - 헬스 체크
//! - `/product/*` - 상품 조회 (고객)
//! - `/admin/product/*` - 상품 관리 (레스토랑)
//! - `/admin/signup`, `/admin/login` - 레스토랑 회원

pub mod health;
pub mod product;
pub mod restaurant;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// 라우터 생성
///
/// # Route Structure
///
/// ```text
/// GET  /health                  - 서버 상태 확인
///
/// GET  /product/all             - 판매 중 상품 목록 (page, limit, order, search, productCollection)
/// GET  /product/:id             - 상품 상세 (x-member-id 헤더 → 조회수 집계)
///
/// GET  /admin/product/all       - 전체 상품
/// POST /admin/product/create    - 상품 생성
/// POST /admin/product/:id       - 상품 수정
///
/// POST /admin/signup            - 레스토랑 회원가입
/// POST /admin/login             - 로그인
/// ```
pub fn create_router(state: AppState) -> Router {
    let cors = if state.config.is_production() {
        // 프로덕션: 특정 도메인만 허용 (ALLOWED_ORIGINS)
        let origins: Vec<HeaderValue> = state
            .config
            .allowed_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        // 개발: 모두 허용
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        // Health check
        .route("/health", get(health::health_check))

        // Product (고객)
        .route("/product/all", get(product::get_products))
        .route("/product/:id", get(product::get_product))

        // Product (관리)
        .route("/admin/product/all", get(product::get_all_products))
        .route("/admin/product/create", post(product::create_product))
        .route("/admin/product/:id", post(product::update_chosen_product))

        // Member
        .route("/admin/signup", post(restaurant::process_signup))
        .route("/admin/login", post(restaurant::process_login))

        // 미들웨어
        .layer(TraceLayer::new_for_http())
        .layer(cors)

        // 상태 주입
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::{
        config::{Config, Environment},
        db::{
            mock::{MockMemberRepository, MockProductRepository, MockViewRepository},
            Database,
        },
        services::{MemberService, ProductService, RestaurantSignup, ViewService},
        AppState,
    };

    pub fn config() -> Config {
        Config {
            port: 0,
            database_url: "postgres://localhost/unused".to_string(),
            database_max_connections: 1,
            allowed_origins: vec![],
            environment: Environment::Development,
        }
    }

    /// in-memory 저장소로 구성한 상태 (DB 풀은 연결하지 않음)
    pub fn state() -> AppState {
        let products = Arc::new(MockProductRepository::new());
        let views = ViewService::new(Arc::new(MockViewRepository::new()));
        let members = MemberService::new(Arc::new(MockMemberRepository::new()));
        let config = config();

        AppState {
            db: Arc::new(Database::connect_lazy(&config.database_url).unwrap()),
            products: Arc::new(ProductService::new(products, views)),
            restaurant: Arc::new(RestaurantSignup::new(Arc::new(members))),
            config: Arc::new(config),
        }
    }
}
