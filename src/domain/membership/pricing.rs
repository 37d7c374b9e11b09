//! Membership pricing resolution.
//!
//! Turns a membership code into the amount due. Resolution never blocks the
//! payment workflow: unknown codes fall back to the first catalog entry and the
//! caller is told to warn staff. Only an empty catalog is an error.

use rust_decimal::Decimal;
use serde::Serialize;

use super::{LegacyMembershipType, MembershipCatalog, MembershipError, MembershipType};

/// How a code was matched against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionKind {
    /// The code exists in the catalog.
    Exact,
    /// A retired code mapped onto its replacement.
    LegacyRemap { from: LegacyMembershipType },
    /// Nothing matched; the first catalog entry was used.
    Fallback,
}

/// Outcome of resolving a membership code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmountResolution {
    pub requested_code: String,
    pub membership_type: MembershipType,
    pub kind: ResolutionKind,
}

impl AmountResolution {
    pub fn price(&self) -> Decimal {
        self.membership_type.price
    }

    pub fn resolved_code(&self) -> &str {
        &self.membership_type.code
    }

    /// Staff should be warned that the requested plan could not be found.
    pub fn is_fallback(&self) -> bool {
        matches!(self.kind, ResolutionKind::Fallback)
    }

    /// The member row still carries a code other than the resolved one.
    pub fn needs_member_update(&self) -> bool {
        self.requested_code != self.membership_type.code
    }

    /// Warning text for a fallback resolution.
    pub fn warning(&self) -> Option<String> {
        self.is_fallback().then(|| {
            format!(
                "Membership type '{}' not found, using '{}' instead",
                self.requested_code, self.membership_type.code
            )
        })
    }
}

/// Resolves the price of `code` against `catalog`.
///
/// 1. exact match on the catalog code
/// 2. retired codes (basic, premium, platinum) via their replacement
/// 3. first catalog entry, flagged as a fallback
///
/// # Errors
///
/// `NoMembershipTypesConfigured` when the catalog is empty.
pub fn resolve_amount(
    code: &str,
    catalog: &MembershipCatalog,
) -> Result<AmountResolution, MembershipError> {
    let first = catalog
        .first()
        .ok_or(MembershipError::NoMembershipTypesConfigured)?;

    let requested_code = code.trim().to_string();

    if let Some(found) = catalog.find(&requested_code) {
        return Ok(AmountResolution {
            requested_code,
            membership_type: found.clone(),
            kind: ResolutionKind::Exact,
        });
    }

    if let Some(legacy) = LegacyMembershipType::parse(&requested_code) {
        if let Some(found) = catalog.find(legacy.current_code()) {
            return Ok(AmountResolution {
                requested_code,
                membership_type: found.clone(),
                kind: ResolutionKind::LegacyRemap { from: legacy },
            });
        }
    }

    Ok(AmountResolution {
        requested_code,
        membership_type: first.clone(),
        kind: ResolutionKind::Fallback,
    })
}

/// Amount field state on the payment form.
///
/// Selecting a different membership type resets the amount to the catalog price.
/// A manual override survives until the selection changes again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmountSelection {
    membership_type: Option<String>,
    amount: Option<Decimal>,
    overridden: bool,
}

impl AmountSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a membership type.
    ///
    /// Re-selecting the current type keeps whatever amount is shown.
    pub fn select_type(
        &mut self,
        code: &str,
        catalog: &MembershipCatalog,
    ) -> Result<AmountResolution, MembershipError> {
        let resolution = resolve_amount(code, catalog)?;
        let code = code.trim();
        if self.membership_type.as_deref() != Some(code) {
            self.membership_type = Some(code.to_string());
            self.amount = Some(resolution.price());
            self.overridden = false;
        }
        Ok(resolution)
    }

    /// Staff typed an amount by hand.
    pub fn override_amount(&mut self, amount: Decimal) {
        self.amount = Some(amount);
        self.overridden = true;
    }

    pub fn membership_type(&self) -> Option<&str> {
        self.membership_type.as_deref()
    }

    pub fn amount(&self) -> Option<Decimal> {
        self.amount
    }

    pub fn is_overridden(&self) -> bool {
        self.overridden
    }
}
