//! In-memory data store implementing every repository port.
//!
//! Backs the integration tests and local runs without a database. Rows live
//! behind `tokio::sync::RwLock`s, so each call is atomic on its own and
//! concurrent writers resolve last-write-wins, like row updates in PostgreSQL.
//!
//! # Example
//!
//! ```ignore
//! let store = Arc::new(InMemoryGymStore::new());
//! store.seed_catalog(vec![monthly]).await;
//! let handler = CheckInHandler::new(store.clone(), store.clone(), notifier);
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::attendance::{Attendance, GymSettings};
use crate::domain::classes::{ClassEnrollment, GymClass};
use crate::domain::foundation::{
    AttendanceId, ClassId, DomainError, ErrorCode, MemberId, PaymentId, Timestamp,
};
use crate::domain::membership::{Member, MembershipCatalog, MembershipType};
use crate::domain::payment::{Payment, PaymentStatus};
use crate::ports::{
    AttendanceRepository, ClassRepository, MemberRepository, MembershipTypeRepository,
    PaymentQuery, PaymentRepository, SettingsRepository,
};

/// Every table of the gym database, held in memory.
#[derive(Default)]
pub struct InMemoryGymStore {
    members: RwLock<Vec<Member>>,
    payments: RwLock<Vec<Payment>>,
    attendance: RwLock<Vec<Attendance>>,
    membership_types: RwLock<Vec<MembershipType>>,
    settings: RwLock<Option<GymSettings>>,
    classes: RwLock<Vec<GymClass>>,
    enrollments: RwLock<Vec<ClassEnrollment>>,
}

impl InMemoryGymStore {
    pub fn new() -> Self {
        Self::default()
    }

    // === Seeding ===

    pub async fn seed_member(&self, member: Member) {
        self.members.write().await.push(member);
    }

    pub async fn seed_catalog(&self, entries: Vec<MembershipType>) {
        self.membership_types.write().await.extend(entries);
    }

    pub async fn seed_class(&self, class: GymClass) {
        self.classes.write().await.push(class);
    }

    pub async fn seed_attendance(&self, attendance: Attendance) {
        self.attendance.write().await.push(attendance);
    }

    pub async fn seed_payment(&self, payment: Payment) {
        self.payments.write().await.push(payment);
    }

    // === Inspection ===

    pub async fn member(&self, id: &MemberId) -> Option<Member> {
        self.members.read().await.iter().find(|m| m.id == *id).cloned()
    }

    pub async fn attendance_rows(&self) -> Vec<Attendance> {
        self.attendance.read().await.clone()
    }

    pub async fn payment_rows(&self) -> Vec<Payment> {
        self.payments.read().await.clone()
    }
}

#[async_trait]
impl MemberRepository for InMemoryGymStore {
    async fn insert(&self, member: &Member) -> Result<(), DomainError> {
        self.members.write().await.push(member.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        Ok(self.member(id).await)
    }

    async fn list(&self) -> Result<Vec<Member>, DomainError> {
        let mut members = self.members.read().await.clone();
        members.sort_by(|a, b| {
            (a.last_name.as_str(), a.first_name.as_str())
                .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
        });
        Ok(members)
    }

    async fn search(&self, query: &str, limit: u32) -> Result<Vec<Member>, DomainError> {
        let mut found: Vec<Member> = MemberRepository::list(self)
            .await?
            .into_iter()
            .filter(|m| m.matches(query))
            .collect();
        found.truncate(limit as usize);
        Ok(found)
    }

    async fn update_membership_type(
        &self,
        id: &MemberId,
        membership_type: &str,
    ) -> Result<(), DomainError> {
        let mut members = self.members.write().await;
        let member = members
            .iter_mut()
            .find(|m| m.id == *id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::MemberNotFound, format!("Member not found: {}", id))
            })?;
        member.membership_type = membership_type.to_string();
        Ok(())
    }

    async fn list_by_membership_types(&self, codes: &[&str]) -> Result<Vec<Member>, DomainError> {
        Ok(self
            .members
            .read()
            .await
            .iter()
            .filter(|m| codes.contains(&m.membership_type.as_str()))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PaymentRepository for InMemoryGymStore {
    async fn insert(&self, payment: &Payment) -> Result<(), DomainError> {
        self.payments.write().await.push(payment.clone());
        Ok(())
    }

    async fn update(&self, payment: &Payment) -> Result<(), DomainError> {
        let mut payments = self.payments.write().await;
        let row = payments
            .iter_mut()
            .find(|p| p.id == payment.id)
            .ok_or_else(|| payment_not_found(&payment.id))?;
        *row = payment.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError> {
        Ok(self.payments.read().await.iter().find(|p| p.id == *id).cloned())
    }

    async fn list(&self, query: &PaymentQuery) -> Result<Vec<Payment>, DomainError> {
        let mut rows: Vec<Payment> = self
            .payments
            .read()
            .await
            .iter()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.due_date
                .cmp(&a.due_date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(rows
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect())
    }

    async fn list_paid_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Payment>, DomainError> {
        Ok(self
            .payments
            .read()
            .await
            .iter()
            .filter(|p| {
                p.status == PaymentStatus::Paid && p.payment_date >= from && p.payment_date < to
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryGymStore {
    async fn insert(&self, attendance: &Attendance) -> Result<(), DomainError> {
        self.attendance.write().await.push(attendance.clone());
        Ok(())
    }

    async fn update(&self, attendance: &Attendance) -> Result<(), DomainError> {
        let mut rows = self.attendance.write().await;
        let row = rows
            .iter_mut()
            .find(|a| a.id == attendance.id)
            .ok_or_else(|| attendance_not_found(&attendance.id))?;
        *row = attendance.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &AttendanceId) -> Result<Option<Attendance>, DomainError> {
        Ok(self.attendance.read().await.iter().find(|a| a.id == *id).cloned())
    }

    async fn find_open_for_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Option<Attendance>, DomainError> {
        Ok(self
            .attendance
            .read()
            .await
            .iter()
            .filter(|a| a.member_id == *member_id && a.is_open())
            .max_by_key(|a| a.check_in_time)
            .cloned())
    }

    async fn list_between(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Attendance>, DomainError> {
        let mut rows: Vec<Attendance> = self
            .attendance
            .read()
            .await
            .iter()
            .filter(|a| a.check_in_time >= from && a.check_in_time < to)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.check_in_time.cmp(&a.check_in_time));
        Ok(rows)
    }

    async fn close_open_before(
        &self,
        cutoff: Timestamp,
        now: Timestamp,
    ) -> Result<u64, DomainError> {
        let mut closed = 0;
        for row in self.attendance.write().await.iter_mut() {
            if row.is_stale(cutoff) {
                row.check_out_time = Some(now);
                closed += 1;
            }
        }
        Ok(closed)
    }

    async fn delete(&self, id: &AttendanceId) -> Result<(), DomainError> {
        let mut rows = self.attendance.write().await;
        let before = rows.len();
        rows.retain(|a| a.id != *id);
        if rows.len() == before {
            return Err(attendance_not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl MembershipTypeRepository for InMemoryGymStore {
    async fn list(&self) -> Result<MembershipCatalog, DomainError> {
        Ok(MembershipCatalog::new(self.membership_types.read().await.clone()))
    }

    async fn insert(&self, membership_type: &MembershipType) -> Result<(), DomainError> {
        self.membership_types.write().await.push(membership_type.clone());
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for InMemoryGymStore {
    async fn get(&self) -> Result<Option<GymSettings>, DomainError> {
        Ok(*self.settings.read().await)
    }

    async fn save(&self, settings: &GymSettings) -> Result<(), DomainError> {
        *self.settings.write().await = Some(*settings);
        Ok(())
    }
}

#[async_trait]
impl ClassRepository for InMemoryGymStore {
    async fn list(&self) -> Result<Vec<GymClass>, DomainError> {
        let mut classes = self.classes.read().await.clone();
        classes.sort_by_key(|c| (c.day_of_week.num_days_from_monday(), c.start_time));
        Ok(classes)
    }

    async fn count_enrollments(&self, class_id: &ClassId) -> Result<u32, DomainError> {
        let count = self
            .enrollments
            .read()
            .await
            .iter()
            .filter(|e| e.class_id == *class_id)
            .count();
        Ok(count as u32)
    }

    async fn enroll(&self, enrollment: &ClassEnrollment) -> Result<(), DomainError> {
        self.enrollments.write().await.push(enrollment.clone());
        Ok(())
    }
}

fn payment_not_found(id: &PaymentId) -> DomainError {
    DomainError::new(ErrorCode::PaymentNotFound, format!("Payment not found: {}", id))
}

fn attendance_not_found(id: &AttendanceId) -> DomainError {
    DomainError::new(
        ErrorCode::AttendanceNotFound,
        format!("Attendance record not found: {}", id),
    )
}
