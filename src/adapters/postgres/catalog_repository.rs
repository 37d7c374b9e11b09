//! PostgreSQL implementations of the membership catalog and gym settings ports.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::attendance::GymSettings;
use crate::domain::foundation::{DomainError, ErrorCode, MembershipTypeId};
use crate::domain::membership::{MembershipCatalog, MembershipType};
use crate::ports::{MembershipTypeRepository, SettingsRepository};

use super::db_error;

pub struct PostgresMembershipTypeRepository {
    pool: PgPool,
}

impl PostgresMembershipTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a catalog entry.
#[derive(Debug, sqlx::FromRow)]
struct MembershipTypeRow {
    id: Uuid,
    #[sqlx(rename = "type")]
    code: String,
    price: Decimal,
    duration: i32,
    description: Option<String>,
}

impl TryFrom<MembershipTypeRow> for MembershipType {
    type Error = DomainError;

    fn try_from(row: MembershipTypeRow) -> Result<Self, Self::Error> {
        let duration_days = u32::try_from(row.duration).map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid duration for membership type {}: {}", row.code, row.duration),
            )
        })?;

        let entry = MembershipType::new(
            MembershipTypeId::from_uuid(row.id),
            row.code,
            row.price,
            duration_days,
        )?;

        Ok(match row.description {
            Some(description) => entry.with_description(description),
            None => entry,
        })
    }
}

#[async_trait]
impl MembershipTypeRepository for PostgresMembershipTypeRepository {
    async fn list(&self) -> Result<MembershipCatalog, DomainError> {
        let rows: Vec<MembershipTypeRow> = sqlx::query_as(
            r#"
            SELECT id, type, price, duration, description
            FROM membership_types
            ORDER BY created_at, type
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list membership types", e))?;

        let entries = rows
            .into_iter()
            .map(MembershipType::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MembershipCatalog::new(entries))
    }

    async fn insert(&self, membership_type: &MembershipType) -> Result<(), DomainError> {
        let duration = i32::try_from(membership_type.duration_days).map_err(|_| {
            DomainError::validation("duration", "Duration does not fit in the catalog")
        })?;

        sqlx::query(
            r#"
            INSERT INTO membership_types (id, type, price, duration, description)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(membership_type.id.as_uuid())
        .bind(&membership_type.code)
        .bind(membership_type.price)
        .bind(duration)
        .bind(&membership_type.description)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert membership type", e))?;

        Ok(())
    }
}

pub struct PostgresSettingsRepository {
    pool: PgPool,
}

impl PostgresSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SettingsRow {
    auto_checkout_minutes: i32,
    auto_checkout_enabled: bool,
}

#[async_trait]
impl SettingsRepository for PostgresSettingsRepository {
    async fn get(&self) -> Result<Option<GymSettings>, DomainError> {
        let row: Option<SettingsRow> = sqlx::query_as(
            "SELECT auto_checkout_minutes, auto_checkout_enabled FROM gym_settings WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load gym settings", e))?;

        row.map(|row| {
            let minutes = u32::try_from(row.auto_checkout_minutes).map_err(|_| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid auto check-out minutes: {}", row.auto_checkout_minutes),
                )
            })?;
            Ok(GymSettings::new(minutes, row.auto_checkout_enabled))
        })
        .transpose()
    }

    async fn save(&self, settings: &GymSettings) -> Result<(), DomainError> {
        settings.validate()?;
        let minutes = i32::try_from(settings.auto_checkout_minutes).map_err(|_| {
            DomainError::validation("auto_checkout_minutes", "Value is too large")
        })?;

        sqlx::query(
            r#"
            INSERT INTO gym_settings (id, auto_checkout_minutes, auto_checkout_enabled)
            VALUES (1, $1, $2)
            ON CONFLICT (id) DO UPDATE SET
                auto_checkout_minutes = EXCLUDED.auto_checkout_minutes,
                auto_checkout_enabled = EXCLUDED.auto_checkout_enabled
            "#,
        )
        .bind(minutes)
        .bind(settings.auto_checkout_enabled)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save gym settings", e))?;

        Ok(())
    }
}
