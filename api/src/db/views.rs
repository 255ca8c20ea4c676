//! PostgreSQL 조회 기록 쿼리

use async_trait::async_trait;

use super::{
    models::{ViewInput, ViewRecord},
    repository::{RepositoryError, ViewRepository},
    Database,
};
use crate::types::RecordId;

#[async_trait]
impl ViewRepository for Database {
    async fn view_exists(&self, input: &ViewInput) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM views
                WHERE member_id = $1 AND view_ref_id = $2 AND view_group = $3
            )
            "#
        )
        .bind(input.member_id.as_uuid())
        .bind(input.view_ref_id.as_uuid())
        .bind(input.view_group.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn insert_view(&self, input: &ViewInput) -> Result<ViewRecord, RepositoryError> {
        let record = sqlx::query_as::<_, ViewRecord>(
            r#"
            INSERT INTO views (id, member_id, view_ref_id, view_group)
            VALUES ($1, $2, $3, $4)
            RETURNING id, member_id, view_ref_id, view_group, created_at
            "#
        )
        .bind(RecordId::new().as_uuid())
        .bind(input.member_id.as_uuid())
        .bind(input.view_ref_id.as_uuid())
        .bind(input.view_group.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn insert_view_if_absent(
        &self,
        input: &ViewInput,
    ) -> Result<Option<ViewRecord>, RepositoryError> {
        // 충돌 시 행이 반환되지 않음 → None
        let record = sqlx::query_as::<_, ViewRecord>(
            r#"
            INSERT INTO views (id, member_id, view_ref_id, view_group)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (member_id, view_ref_id, view_group) DO NOTHING
            RETURNING id, member_id, view_ref_id, view_group, created_at
            "#
        )
        .bind(RecordId::new().as_uuid())
        .bind(input.member_id.as_uuid())
        .bind(input.view_ref_id.as_uuid())
        .bind(input.view_group.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}
