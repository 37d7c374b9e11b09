//! Retired membership codes and their replacements.

use serde::{Deserialize, Serialize};

/// Membership codes from the original tiered catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegacyMembershipType {
    Basic,
    Premium,
    Platinum,
}

impl LegacyMembershipType {
    pub const ALL: [LegacyMembershipType; 3] = [
        LegacyMembershipType::Basic,
        LegacyMembershipType::Premium,
        LegacyMembershipType::Platinum,
    ];

    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "basic" => Some(LegacyMembershipType::Basic),
            "premium" => Some(LegacyMembershipType::Premium),
            "platinum" => Some(LegacyMembershipType::Platinum),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            LegacyMembershipType::Basic => "basic",
            LegacyMembershipType::Premium => "premium",
            LegacyMembershipType::Platinum => "platinum",
        }
    }

    /// Current catalog code replacing this one.
    pub fn current_code(&self) -> &'static str {
        match self {
            LegacyMembershipType::Basic => "monthly",
            LegacyMembershipType::Premium => "quarterly",
            LegacyMembershipType::Platinum => "annual",
        }
    }

    pub fn codes() -> Vec<&'static str> {
        Self::ALL.iter().map(|l| l.code()).collect()
    }
}

impl std::fmt::Display for LegacyMembershipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
