//! PostgreSQL 회원 쿼리

use async_trait::async_trait;

use super::{
    models::{Member, NewMember},
    repository::{MemberRepository, RepositoryError},
    Database,
};
use crate::types::RecordId;

const MEMBER_COLUMNS: &str = "id, member_type, member_status, member_nick, member_phone, \
    member_password, member_address, member_desc, member_image, member_points, \
    created_at, updated_at";

#[async_trait]
impl MemberRepository for Database {
    async fn insert_member(&self, member: &NewMember) -> Result<Member, RepositoryError> {
        let created = sqlx::query_as::<_, Member>(&format!(
            r#"
            INSERT INTO members (
                id, member_type, member_nick, member_phone, member_password,
                member_address, member_desc, member_image
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {MEMBER_COLUMNS}
            "#
        ))
        .bind(RecordId::new().as_uuid())
        .bind(member.member_type.as_str())
        .bind(&member.member_nick)
        .bind(&member.member_phone)
        .bind(&member.password_hash)
        .bind(&member.member_address)
        .bind(&member.member_desc)
        .bind(&member.member_image)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_member_by_nick(&self, nick: &str) -> Result<Option<Member>, RepositoryError> {
        let member = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE member_nick = $1"
        ))
        .bind(nick)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }
}
