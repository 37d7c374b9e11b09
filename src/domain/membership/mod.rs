//! Membership domain module.
//!
//! Handles the membership-type catalog, retired plan codes, pricing and the
//! member directory entry.
//!
//! # Module Structure
//!
//! - `membership_type` - Catalog entries and the ordered catalog
//! - `legacy` - Retired codes (basic, premium, platinum) and their replacements
//! - `pricing` - Amount resolution and the payment-form amount state
//! - `member` - Member record

mod errors;
mod legacy;
mod member;
mod membership_type;
mod pricing;

pub use errors::MembershipError;
pub use legacy::LegacyMembershipType;
pub use member::Member;
pub use membership_type::{MembershipCatalog, MembershipType};
pub use pricing::{resolve_amount, AmountResolution, AmountSelection, ResolutionKind};
