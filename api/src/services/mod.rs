//! Services Module
//!
//! 비즈니스 로직을 담당하는 서비스 레이어
//!
//! # Services
//! - `ViewService`: 조회 기록 (중복 조회 판정)
//! - `ProductService`: 상품 조회/생성/수정, 조회수 집계
//! - `MemberService`: 회원가입/로그인
//! - `RestaurantSignup`: 레스토랑 회원가입 어댑터

mod member;
mod product;
mod view;

pub use member::{MemberManagement, MemberService, RestaurantSignup};
pub use product::{ProductInquiry, ProductService};
pub use view::ViewService;
