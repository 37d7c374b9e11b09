//! PostgreSQL implementation of ClassRepository.

use async_trait::async_trait;
use chrono::{NaiveTime, Weekday};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::classes::{ClassEnrollment, GymClass};
use crate::domain::foundation::{ClassId, DomainError, ErrorCode};
use crate::ports::ClassRepository;

use super::db_error;

pub struct PostgresClassRepository {
    pool: PgPool,
}

impl PostgresClassRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClassRow {
    id: Uuid,
    name: String,
    instructor: Option<String>,
    day_of_week: i16,
    start_time: NaiveTime,
    duration_minutes: i32,
    capacity: i32,
}

/// Weekdays are stored Monday = 0 through Sunday = 6.
fn weekday_from_db(value: i16) -> Option<Weekday> {
    match value {
        0 => Some(Weekday::Mon),
        1 => Some(Weekday::Tue),
        2 => Some(Weekday::Wed),
        3 => Some(Weekday::Thu),
        4 => Some(Weekday::Fri),
        5 => Some(Weekday::Sat),
        6 => Some(Weekday::Sun),
        _ => None,
    }
}

#[cfg(test)]
fn weekday_to_db(day: Weekday) -> i16 {
    day.num_days_from_monday() as i16
}

impl TryFrom<ClassRow> for GymClass {
    type Error = DomainError;

    fn try_from(row: ClassRow) -> Result<Self, Self::Error> {
        let invalid = |field: &str, value: String| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid {} for class {}: {}", field, row.id, value),
            )
        };

        Ok(GymClass {
            id: ClassId::from_uuid(row.id),
            day_of_week: weekday_from_db(row.day_of_week)
                .ok_or_else(|| invalid("day_of_week", row.day_of_week.to_string()))?,
            duration_minutes: u32::try_from(row.duration_minutes)
                .map_err(|_| invalid("duration_minutes", row.duration_minutes.to_string()))?,
            capacity: u32::try_from(row.capacity)
                .map_err(|_| invalid("capacity", row.capacity.to_string()))?,
            name: row.name,
            instructor: row.instructor,
            start_time: row.start_time,
        })
    }
}

#[async_trait]
impl ClassRepository for PostgresClassRepository {
    async fn list(&self) -> Result<Vec<GymClass>, DomainError> {
        let rows: Vec<ClassRow> = sqlx::query_as(
            r#"
            SELECT id, name, instructor, day_of_week, start_time, duration_minutes, capacity
            FROM classes
            ORDER BY day_of_week, start_time
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list classes", e))?;

        rows.into_iter().map(GymClass::try_from).collect()
    }

    async fn count_enrollments(&self, class_id: &ClassId) -> Result<u32, DomainError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM class_enrollments WHERE class_id = $1")
                .bind(class_id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("Failed to count enrollments", e))?;

        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    async fn enroll(&self, enrollment: &ClassEnrollment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO class_enrollments (id, class_id, member_id, enrolled_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(enrollment.id.as_uuid())
        .bind(enrollment.class_id.as_uuid())
        .bind(enrollment.member_id.as_uuid())
        .bind(enrollment.enrolled_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to enroll member", e))?;

        Ok(())
    }
}
