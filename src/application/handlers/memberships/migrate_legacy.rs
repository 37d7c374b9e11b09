//! MigrateLegacyMembershipTypesHandler - One-time remap of retired plan codes.
//!
//! Members still holding basic, premium or platinum are moved to monthly,
//! quarterly or annual. Runs once at startup before traffic is served, so amount
//! resolution never has to write on read. Re-running it is a no-op.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::MemberId;
use crate::domain::membership::{LegacyMembershipType, MembershipError};
use crate::ports::{MemberRepository, MembershipTypeRepository};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigratedMember {
    pub member_id: MemberId,
    pub from: LegacyMembershipType,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub migrated: Vec<MigratedMember>,
    /// Members left alone because the replacement plan is not in the catalog.
    pub skipped: Vec<MemberId>,
    /// Members whose update failed; they keep their retired code.
    pub failed: Vec<MemberId>,
}

impl MigrationReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.failed.is_empty()
    }
}

pub struct MigrateLegacyMembershipTypesHandler {
    members: Arc<dyn MemberRepository>,
    membership_types: Arc<dyn MembershipTypeRepository>,
}

impl MigrateLegacyMembershipTypesHandler {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        membership_types: Arc<dyn MembershipTypeRepository>,
    ) -> Self {
        Self {
            members,
            membership_types,
        }
    }

    pub async fn handle(&self) -> Result<MigrationReport, MembershipError> {
        let catalog = self.membership_types.list().await?;
        let legacy_codes = LegacyMembershipType::codes();
        let candidates = self.members.list_by_membership_types(&legacy_codes).await?;

        let mut report = MigrationReport::default();
        for member in candidates {
            let Some(legacy) = member.legacy_membership_type() else {
                continue;
            };
            let target = legacy.current_code();
            if !catalog.contains(target) {
                tracing::warn!(member_id = %member.id, from = %legacy, to = target, "replacement plan missing from catalog");
                report.skipped.push(member.id);
                continue;
            }

            match self.members.update_membership_type(&member.id, target).await {
                Ok(()) => report.migrated.push(MigratedMember {
                    member_id: member.id,
                    from: legacy,
                    to: target.to_string(),
                }),
                Err(err) => {
                    tracing::error!(member_id = %member.id, error = %err, "legacy membership migration failed");
                    report.failed.push(member.id);
                }
            }
        }

        tracing::info!(
            migrated = report.migrated.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "legacy membership migration finished"
        );
        Ok(report)
    }
}
