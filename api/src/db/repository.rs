//! Repository Traits
//!
//! 서비스 레이어는 이 trait들에만 의존한다.
//!
//! - PostgreSQL 구현: `Database` (db/products.rs, db/views.rs, db/members.rs)
//! - 테스트용 in-memory 구현: `mock` 모듈
//!
//! ```rust,ignore
//! let db = Arc::new(Database::connect(&config.database_url, 10).await?);
//! let products = ProductService::new(db.clone(), ViewService::new(db.clone()));
//! ```

use async_trait::async_trait;
use sqlx::error::{DatabaseError, ErrorKind};
use thiserror::Error;

use super::models::{
    Member, NewMember, Product, ProductFilter, ProductInput, ProductUpdateInput, ViewInput,
    ViewRecord,
};
use crate::types::RecordId;

/// 저장소 에러
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// 유니크 제약 위반
    #[error("record already exists")]
    AlreadyExists,

    /// CHECK / NOT NULL 제약 위반
    #[error("invalid data")]
    InvalidData,

    #[error("storage error: {0}")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(error: sqlx::Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}

/// 상품 저장소
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_product(&self, id: RecordId) -> Result<Option<Product>, RepositoryError>;

    /// 필터/정렬/offset/limit 적용 목록
    async fn find_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError>;

    async fn find_all_products(&self) -> Result<Vec<Product>, RepositoryError>;

    /// 조회수 +1 후 변경된 문서 반환 (원자적)
    async fn increment_product_views(&self, id: RecordId) -> Result<Option<Product>, RepositoryError>;

    async fn insert_product(&self, input: &ProductInput) -> Result<Product, RepositoryError>;

    /// 부분 수정 후 변경된 문서 반환. 일치하는 id가 없으면 None
    async fn update_product(
        &self,
        id: RecordId,
        input: &ProductUpdateInput,
    ) -> Result<Option<Product>, RepositoryError>;
}

/// 조회 기록 저장소
#[async_trait]
pub trait ViewRepository: Send + Sync {
    async fn view_exists(&self, input: &ViewInput) -> Result<bool, RepositoryError>;

    async fn insert_view(&self, input: &ViewInput) -> Result<ViewRecord, RepositoryError>;

    /// 같은 (member, 대상, 그룹) 기록이 없을 때만 삽입. 삽입되면 Some
    async fn insert_view_if_absent(
        &self,
        input: &ViewInput,
    ) -> Result<Option<ViewRecord>, RepositoryError>;
}

/// 회원 저장소
#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn insert_member(&self, member: &NewMember) -> Result<Member, RepositoryError>;

    async fn find_member_by_nick(&self, nick: &str) -> Result<Option<Member>, RepositoryError>;
}
