//! Gym-wide attendance settings.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

pub const DEFAULT_AUTO_CHECKOUT_MINUTES: u32 = 240;
const MAX_AUTO_CHECKOUT_MINUTES: u32 = 24 * 60;

/// The single settings row. A missing row means [`GymSettings::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GymSettings {
    #[serde(default = "default_minutes")]
    pub auto_checkout_minutes: u32,
    #[serde(default = "default_enabled")]
    pub auto_checkout_enabled: bool,
}

impl Default for GymSettings {
    fn default() -> Self {
        Self {
            auto_checkout_minutes: default_minutes(),
            auto_checkout_enabled: default_enabled(),
        }
    }
}

impl GymSettings {
    pub fn new(auto_checkout_minutes: u32, auto_checkout_enabled: bool) -> Self {
        Self {
            auto_checkout_minutes,
            auto_checkout_enabled,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.auto_checkout_minutes == 0 || self.auto_checkout_minutes > MAX_AUTO_CHECKOUT_MINUTES {
            return Err(ValidationError::out_of_range(
                "auto_checkout_minutes",
                1,
                i64::from(MAX_AUTO_CHECKOUT_MINUTES),
                i64::from(self.auto_checkout_minutes),
            ));
        }
        Ok(())
    }

    /// Sessions opened before the returned instant are overdue for checkout.
    ///
    /// `None` when auto-checkout is disabled.
    pub fn cutoff(&self, now: Timestamp) -> Option<Timestamp> {
        self.auto_checkout_enabled
            .then(|| now.minus_minutes(i64::from(self.auto_checkout_minutes)))
    }
}

fn default_minutes() -> u32 {
    DEFAULT_AUTO_CHECKOUT_MINUTES
}

fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn defaults_are_four_hours_enabled() {
        let settings = GymSettings::default();
        assert_eq!(settings.auto_checkout_minutes, 240);
        assert!(settings.auto_checkout_enabled);
    }

    #[test]
    fn cutoff_subtracts_threshold() {
        let now = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 6, 15, 20, 0, 0).unwrap());
        let cutoff = GymSettings::default().cutoff(now).unwrap();
        assert_eq!(now.duration_since(&cutoff).num_minutes(), 240);
    }

    #[test]
    fn disabled_has_no_cutoff() {
        assert!(GymSettings::new(240, false).cutoff(Timestamp::now()).is_none());
    }

    #[test]
    fn zero_minutes_is_invalid() {
        assert!(GymSettings::new(0, true).validate().is_err());
        assert!(GymSettings::new(90, true).validate().is_ok());
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let settings: GymSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, GymSettings::default());
    }
}
