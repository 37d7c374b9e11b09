//! Catalog and settings ports.

use async_trait::async_trait;

use crate::domain::attendance::GymSettings;
use crate::domain::foundation::DomainError;
use crate::domain::membership::{MembershipCatalog, MembershipType};

/// Access to the `membership_types` table.
#[async_trait]
pub trait MembershipTypeRepository: Send + Sync {
    /// The full catalog in insertion order.
    async fn list(&self) -> Result<MembershipCatalog, DomainError>;

    async fn insert(&self, membership_type: &MembershipType) -> Result<(), DomainError>;
}

/// Access to the singleton `gym_settings` row.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// `None` when no settings row exists.
    async fn get(&self) -> Result<Option<GymSettings>, DomainError>;

    async fn save(&self, settings: &GymSettings) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ports_are_object_safe() {
        fn _types(_repo: &dyn MembershipTypeRepository) {}
        fn _settings(_repo: &dyn SettingsRepository) {}
    }
}
