//! Membership handlers.
//!
//! ## Commands
//! - One-time migration of retired membership codes

mod migrate_legacy;

pub use migrate_legacy::{MigrateLegacyMembershipTypesHandler, MigratedMember, MigrationReport};
