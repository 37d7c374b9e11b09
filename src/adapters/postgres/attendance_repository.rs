//! PostgreSQL implementation of AttendanceRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::attendance::Attendance;
use crate::domain::foundation::{AttendanceId, DomainError, ErrorCode, MemberId, Timestamp};
use crate::ports::AttendanceRepository;

use super::db_error;

pub struct PostgresAttendanceRepository {
    pool: PgPool,
}

impl PostgresAttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AttendanceRow {
    id: Uuid,
    member_id: Uuid,
    check_in_time: DateTime<Utc>,
    check_out_time: Option<DateTime<Utc>>,
}

impl From<AttendanceRow> for Attendance {
    fn from(row: AttendanceRow) -> Self {
        Attendance {
            id: AttendanceId::from_uuid(row.id),
            member_id: MemberId::from_uuid(row.member_id),
            check_in_time: Timestamp::from_datetime(row.check_in_time),
            check_out_time: row.check_out_time.map(Timestamp::from_datetime),
        }
    }
}

fn not_found(id: &AttendanceId) -> DomainError {
    DomainError::new(
        ErrorCode::AttendanceNotFound,
        format!("Attendance record not found: {}", id),
    )
}

#[async_trait]
impl AttendanceRepository for PostgresAttendanceRepository {
    async fn insert(&self, attendance: &Attendance) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO attendance (id, member_id, check_in_time, check_out_time)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(attendance.id.as_uuid())
        .bind(attendance.member_id.as_uuid())
        .bind(attendance.check_in_time.as_datetime())
        .bind(attendance.check_out_time.as_ref().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert attendance", e))?;

        Ok(())
    }

    async fn update(&self, attendance: &Attendance) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE attendance SET check_in_time = $2, check_out_time = $3 WHERE id = $1",
        )
        .bind(attendance.id.as_uuid())
        .bind(attendance.check_in_time.as_datetime())
        .bind(attendance.check_out_time.as_ref().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update attendance", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(&attendance.id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &AttendanceId) -> Result<Option<Attendance>, DomainError> {
        let row: Option<AttendanceRow> = sqlx::query_as(
            "SELECT id, member_id, check_in_time, check_out_time FROM attendance WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find attendance", e))?;

        Ok(row.map(Attendance::from))
    }

    async fn find_open_for_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Option<Attendance>, DomainError> {
        let row: Option<AttendanceRow> = sqlx::query_as(
            r#"
            SELECT id, member_id, check_in_time, check_out_time
            FROM attendance
            WHERE member_id = $1 AND check_out_time IS NULL
            ORDER BY check_in_time DESC
            LIMIT 1
            "#,
        )
        .bind(member_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find open session", e))?;

        Ok(row.map(Attendance::from))
    }

    async fn list_between(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Attendance>, DomainError> {
        let rows: Vec<AttendanceRow> = sqlx::query_as(
            r#"
            SELECT id, member_id, check_in_time, check_out_time
            FROM attendance
            WHERE check_in_time >= $1 AND check_in_time < $2
            ORDER BY check_in_time DESC
            "#,
        )
        .bind(from.as_datetime())
        .bind(to.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list attendance", e))?;

        Ok(rows.into_iter().map(Attendance::from).collect())
    }

    async fn close_open_before(
        &self,
        cutoff: Timestamp,
        now: Timestamp,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE attendance
            SET check_out_time = $2
            WHERE check_out_time IS NULL AND check_in_time < $1
            "#,
        )
        .bind(cutoff.as_datetime())
        .bind(now.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to close overdue sessions", e))?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &AttendanceId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM attendance WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete attendance", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
