//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Data Store Ports
//!
//! Table-scoped capabilities over the hosted relational backend:
//!
//! - `MemberRepository` - member directory and plan codes
//! - `PaymentRepository` - payment rows, paging and revenue queries
//! - `AttendanceRepository` - check-in sessions and the batch auto-checkout
//! - `MembershipTypeRepository` - the membership-type catalog
//! - `SettingsRepository` - the singleton gym settings row
//! - `ClassRepository` - weekly class schedule and enrollments
//!
//! ## Notification Ports
//!
//! - `Notifier` - user-facing notifications raised by handlers

mod attendance_repository;
mod catalog_repository;
mod class_repository;
mod member_repository;
mod notifier;
mod payment_repository;

pub use attendance_repository::AttendanceRepository;
pub use catalog_repository::{MembershipTypeRepository, SettingsRepository};
pub use class_repository::ClassRepository;
pub use member_repository::MemberRepository;
pub use notifier::{Notification, NotificationLevel, Notifier};
pub use payment_repository::{PaymentQuery, PaymentRepository};
