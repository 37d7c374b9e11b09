//! Shared application state for the HTTP adapter.

use std::sync::Arc;

use crate::application::{
    CheckInHandler, CheckOutHandler, CreatePaymentHandler, DeleteAttendanceHandler,
    EditAttendanceHandler, ListClassesHandler, ListPaymentsHandler, PaymentStatusReportHandler,
    ResolveMembershipAmountHandler, RetryPolicy, RevenueComparisonHandler,
    SweepOverdueCheckinsHandler, TodayAttendanceHandler, UpdatePaymentHandler,
};
use crate::config::GymConfig;
use crate::domain::attendance::GymSettings;
use crate::domain::payment::StatusPolicy;
use crate::ports::{
    AttendanceRepository, ClassRepository, MemberRepository, MembershipTypeRepository, Notifier,
    PaymentRepository, SettingsRepository,
};

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every port is Arc-wrapped. Handlers are built on
/// demand from the shared ports.
#[derive(Clone)]
pub struct GymAppState {
    pub members: Arc<dyn MemberRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub attendance: Arc<dyn AttendanceRepository>,
    pub membership_types: Arc<dyn MembershipTypeRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    pub classes: Arc<dyn ClassRepository>,
    pub notifier: Arc<dyn Notifier>,
    pub status_policy: StatusPolicy,
    pub default_settings: GymSettings,
    pub class_retry: RetryPolicy,
}

impl GymAppState {
    /// State backed by a single store implementing every repository port.
    pub fn from_store<S>(store: Arc<S>, notifier: Arc<dyn Notifier>, gym: &GymConfig) -> Self
    where
        S: MemberRepository
            + PaymentRepository
            + AttendanceRepository
            + MembershipTypeRepository
            + SettingsRepository
            + ClassRepository
            + 'static,
    {
        Self {
            members: store.clone(),
            payments: store.clone(),
            attendance: store.clone(),
            membership_types: store.clone(),
            settings: store.clone(),
            classes: store,
            notifier,
            status_policy: gym.status_policy(),
            default_settings: gym.default_settings(),
            class_retry: gym.class_fetch_retry(),
        }
    }

    pub fn create_payment_handler(&self) -> CreatePaymentHandler {
        CreatePaymentHandler::new(
            self.payments.clone(),
            self.members.clone(),
            self.membership_types.clone(),
            self.notifier.clone(),
        )
    }

    pub fn update_payment_handler(&self) -> UpdatePaymentHandler {
        UpdatePaymentHandler::new(
            self.payments.clone(),
            self.members.clone(),
            self.membership_types.clone(),
            self.notifier.clone(),
        )
    }

    pub fn list_payments_handler(&self) -> ListPaymentsHandler {
        ListPaymentsHandler::new(self.payments.clone(), self.status_policy)
    }

    pub fn resolve_amount_handler(&self) -> ResolveMembershipAmountHandler {
        ResolveMembershipAmountHandler::new(self.membership_types.clone(), self.notifier.clone())
    }

    pub fn check_in_handler(&self) -> CheckInHandler {
        CheckInHandler::new(
            self.members.clone(),
            self.attendance.clone(),
            self.notifier.clone(),
        )
    }

    pub fn check_out_handler(&self) -> CheckOutHandler {
        CheckOutHandler::new(self.attendance.clone(), self.notifier.clone())
    }

    pub fn edit_attendance_handler(&self) -> EditAttendanceHandler {
        EditAttendanceHandler::new(self.attendance.clone(), self.notifier.clone())
    }

    pub fn delete_attendance_handler(&self) -> DeleteAttendanceHandler {
        DeleteAttendanceHandler::new(self.attendance.clone(), self.notifier.clone())
    }

    pub fn sweep_handler(&self) -> SweepOverdueCheckinsHandler {
        SweepOverdueCheckinsHandler::new(
            self.settings.clone(),
            self.attendance.clone(),
            self.notifier.clone(),
        )
        .with_defaults(self.default_settings)
    }

    pub fn today_attendance_handler(&self) -> TodayAttendanceHandler {
        TodayAttendanceHandler::new(self.attendance.clone())
    }

    pub fn list_classes_handler(&self) -> ListClassesHandler {
        ListClassesHandler::new(self.classes.clone(), self.notifier.clone())
            .with_retry(self.class_retry)
    }

    pub fn revenue_handler(&self) -> RevenueComparisonHandler {
        RevenueComparisonHandler::new(self.payments.clone())
    }

    pub fn payment_status_handler(&self) -> PaymentStatusReportHandler {
        PaymentStatusReportHandler::new(self.payments.clone(), self.status_policy)
    }
}
