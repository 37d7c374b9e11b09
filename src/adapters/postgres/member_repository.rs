//! PostgreSQL implementation of MemberRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, Timestamp};
use crate::domain::membership::Member;
use crate::ports::MemberRepository;

use super::db_error;

pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a member.
#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: Option<String>,
    phone: Option<String>,
    membership_type: String,
    active: bool,
    created_at: DateTime<Utc>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member {
            id: MemberId::from_uuid(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            membership_type: row.membership_type,
            active: row.active,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

const SELECT_MEMBER: &str = r#"
    SELECT id, first_name, last_name, email, phone, membership_type, active, created_at
    FROM members
"#;

/// Escapes LIKE wildcards in user input.
fn like_pattern(query: &str) -> String {
    let escaped = query
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn insert(&self, member: &Member) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO members (
                id, first_name, last_name, email, phone, membership_type, active, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(member.id.as_uuid())
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(&member.membership_type)
        .bind(member.active)
        .bind(member.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert member", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_MEMBER))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find member", e))?;

        Ok(row.map(Member::from))
    }

    async fn list(&self) -> Result<Vec<Member>, DomainError> {
        let rows: Vec<MemberRow> =
            sqlx::query_as(&format!("{} ORDER BY last_name, first_name", SELECT_MEMBER))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error("Failed to list members", e))?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn search(&self, query: &str, limit: u32) -> Result<Vec<Member>, DomainError> {
        let rows: Vec<MemberRow> = sqlx::query_as(&format!(
            r#"{}
            WHERE first_name ILIKE $1
               OR last_name ILIKE $1
               OR (first_name || ' ' || last_name) ILIKE $1
               OR email ILIKE $1
            ORDER BY last_name, first_name
            LIMIT $2"#,
            SELECT_MEMBER
        ))
        .bind(like_pattern(query))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to search members", e))?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn update_membership_type(
        &self,
        id: &MemberId,
        membership_type: &str,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE members SET membership_type = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(membership_type)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update member membership type", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::MemberNotFound,
                format!("Member not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn list_by_membership_types(&self, codes: &[&str]) -> Result<Vec<Member>, DomainError> {
        let codes: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
        let rows: Vec<MemberRow> =
            sqlx::query_as(&format!("{} WHERE membership_type = ANY($1)", SELECT_MEMBER))
                .bind(&codes)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error("Failed to list members by membership type", e))?;

        Ok(rows.into_iter().map(Member::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern(" ana "), "%ana%");
        assert_eq!(like_pattern("100%_"), "%100\\%\\_%");
    }
}
