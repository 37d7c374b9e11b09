//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Besides the handlers it holds the pieces with their own lifecycle or state:
//! the auto-checkout scheduler, the retry policy and the optimistic list.

pub mod handlers;
mod optimistic;
mod retry;
mod scheduler;

pub use optimistic::{Identified, OptimisticList, Patch, PendingMutation};
pub use retry::RetryPolicy;
pub use scheduler::{AutoCheckoutScheduler, AutoCheckoutTask, DEFAULT_SWEEP_INTERVAL};

pub use handlers::attendance::{
    CheckInCommand, CheckInHandler, CheckOutCommand, CheckOutHandler, CheckOutTarget,
    DeleteAttendanceCommand, DeleteAttendanceHandler, EditAttendanceCommand,
    EditAttendanceHandler, SweepOverdueCheckinsCommand, SweepOverdueCheckinsHandler,
    SweepResult, TodayAttendance, TodayAttendanceHandler,
};
pub use handlers::classes::{ClassView, ListClassesHandler};
pub use handlers::memberships::{
    MigrateLegacyMembershipTypesHandler, MigratedMember, MigrationReport,
};
pub use handlers::payments::{
    CreatePaymentCommand, CreatePaymentHandler, ListPaymentsHandler, ListPaymentsQuery,
    ListPaymentsResult, MembershipWriteThrough, PaymentSaved, PaymentView,
    ResolveMembershipAmountHandler, ResolveMembershipAmountQuery, ResolvedAmount,
    UpdatePaymentCommand, UpdatePaymentHandler,
};
pub use handlers::reports::{
    PaymentStatusReportHandler, Period, PeriodRevenue, RevenueComparison,
    RevenueComparisonHandler,
};
