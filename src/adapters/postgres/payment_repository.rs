//! PostgreSQL implementation of PaymentRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, PaymentId, Timestamp};
use crate::domain::payment::{Payment, PaymentMethod, PaymentStatus};
use crate::ports::{PaymentQuery, PaymentRepository};

use super::db_error;

pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a payment.
#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    member_id: Uuid,
    amount: Decimal,
    due_date: NaiveDate,
    payment_date: NaiveDate,
    status: String,
    payment_method: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let status = PaymentStatus::parse(&row.status).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid payment status value: {}", row.status),
            )
        })?;

        Ok(Payment {
            id: PaymentId::from_uuid(row.id),
            member_id: MemberId::from_uuid(row.member_id),
            amount: row.amount,
            due_date: row.due_date,
            payment_date: row.payment_date,
            status,
            payment_method: PaymentMethod::parse(&row.payment_method),
            notes: row.notes,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

const SELECT_PAYMENT: &str = r#"
    SELECT id, member_id, amount, due_date, payment_date, status, payment_method, notes, created_at
    FROM payments
"#;

fn into_payments(rows: Vec<PaymentRow>) -> Result<Vec<Payment>, DomainError> {
    rows.into_iter().map(Payment::try_from).collect()
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn insert(&self, payment: &Payment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, member_id, amount, due_date, payment_date, status, payment_method, notes, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.member_id.as_uuid())
        .bind(payment.amount)
        .bind(payment.due_date)
        .bind(payment.payment_date)
        .bind(payment.status.as_str())
        .bind(payment.payment_method.as_str())
        .bind(&payment.notes)
        .bind(payment.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert payment", e))?;

        Ok(())
    }

    async fn update(&self, payment: &Payment) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE payments SET
                amount = $2,
                due_date = $3,
                payment_date = $4,
                status = $5,
                payment_method = $6,
                notes = $7
            WHERE id = $1
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.amount)
        .bind(payment.due_date)
        .bind(payment.payment_date)
        .bind(payment.status.as_str())
        .bind(payment.payment_method.as_str())
        .bind(&payment.notes)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update payment", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::PaymentNotFound,
                format!("Payment not found: {}", payment.id),
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_PAYMENT))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find payment", e))?;

        row.map(Payment::try_from).transpose()
    }

    async fn list(&self, query: &PaymentQuery) -> Result<Vec<Payment>, DomainError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_PAYMENT);
        builder.push(" WHERE TRUE");
        if let Some(member_id) = query.member_id {
            builder.push(" AND member_id = ").push_bind(*member_id.as_uuid());
        }
        if let Some(status) = query.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
        builder
            .push(" ORDER BY due_date DESC, created_at DESC LIMIT ")
            .push_bind(i64::from(query.limit))
            .push(" OFFSET ")
            .push_bind(i64::from(query.offset));

        let rows: Vec<PaymentRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list payments", e))?;

        into_payments(rows)
    }

    async fn list_paid_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Payment>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            "{} WHERE status = 'paid' AND payment_date >= $1 AND payment_date < $2 ORDER BY payment_date",
            SELECT_PAYMENT
        ))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list paid payments", e))?;

        into_payments(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str) -> PaymentRow {
        PaymentRow {
            id: Uuid::new_v4(),
            member_id: Uuid::new_v4(),
            amount: Decimal::new(4500, 2),
            due_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            payment_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            status: status.to_string(),
            payment_method: "bank_transfer".to_string(),
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn row_converts_to_payment() {
        let payment = Payment::try_from(row("pending")).unwrap();
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.payment_method, PaymentMethod::Transfer);
    }

    #[test]
    fn unknown_status_is_a_database_error() {
        let err = Payment::try_from(row("refunded")).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
