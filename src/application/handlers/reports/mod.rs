//! Reporting queries.

mod payment_status_report;
mod revenue_comparison;

pub use payment_status_report::PaymentStatusReportHandler;
pub use revenue_comparison::{Period, PeriodRevenue, RevenueComparison, RevenueComparisonHandler};
