//! Database Module
//!
//! # Interview Q&A
//!
//! Q: 조회수 중복 방지는 어떻게 보장하는가?
//! A: views 테이블의 UNIQUE (member_id, view_ref_id, view_group)
//!
//!    ```sql
//!    INSERT INTO views (...) VALUES (...)
//!    ON CONFLICT (member_id, view_ref_id, view_group) DO NOTHING
//!    RETURNING ...
//!    ```
//!
//!    - 존재 확인 + 삽입을 한 문장으로 처리 (check-then-act 경쟁 제거)
//!    - 행이 반환된 경우에만 조회수 증가
//!
//! Q: 커넥션 풀은 어떻게 관리하는가?
//! A: SQLx의 PgPool 사용
//!    - 최소/최대 커넥션 수 설정
//!    - 커넥션 재사용 (오버헤드 감소)
//!    - 타임아웃 처리

mod members;
mod models;
mod products;
mod repository;
mod views;

pub use models::*;
pub use repository::{MemberRepository, ProductRepository, RepositoryError, ViewRepository};

#[cfg(test)]
pub use repository::mock;

use anyhow::Result;
use sqlx::{postgres::PgPoolOptions, PgPool};

/// 데이터베이스 연결 및 쿼리 담당
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// 데이터베이스 연결
    ///
    /// # Connection Pool Settings
    ///
    /// - max_connections: 설정값 (기본 10)
    /// - min_connections: 1 (idle 시 최소 유지)
    /// - acquire_timeout: 3초 (커넥션 획득 대기)
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .acquire_timeout(std::time::Duration::from_secs(3))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// 실제 연결 없이 풀 생성 (첫 쿼리 시 연결)
    pub fn connect_lazy(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(std::time::Duration::from_secs(1))
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    /// 마이그레이션 실행
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await?;
        Ok(())
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
