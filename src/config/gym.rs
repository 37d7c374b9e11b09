//! Gym rules configuration

use serde::Deserialize;
use std::time::Duration;

use crate::application::RetryPolicy;
use crate::domain::attendance::{GymSettings, DEFAULT_AUTO_CHECKOUT_MINUTES};
use crate::domain::payment::{StatusPolicy, NEAR_OVERDUE_DAYS};

use super::error::ValidationError;

/// Business-rule defaults and background task timing
#[derive(Debug, Clone, Deserialize)]
pub struct GymConfig {
    /// Seconds between auto-checkout sweeps
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    /// Auto-checkout threshold used while no settings row exists
    #[serde(default = "default_auto_checkout_minutes")]
    pub default_auto_checkout_minutes: u32,

    /// Auto-checkout switch used while no settings row exists
    #[serde(default = "default_auto_checkout_enabled")]
    pub default_auto_checkout_enabled: bool,

    /// Pending payments due within this many days show as near overdue
    #[serde(default = "default_near_overdue_days")]
    pub near_overdue_days: i64,

    /// Class-list fetch retries
    #[serde(default = "default_class_fetch_retries")]
    pub class_fetch_retries: u32,

    /// First class-list retry delay in milliseconds
    #[serde(default = "default_class_fetch_initial_delay")]
    pub class_fetch_initial_delay_ms: u64,

    /// Longest class-list retry delay in milliseconds
    #[serde(default = "default_class_fetch_max_delay")]
    pub class_fetch_max_delay_ms: u64,
}

impl GymConfig {
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn default_settings(&self) -> GymSettings {
        GymSettings::new(
            self.default_auto_checkout_minutes,
            self.default_auto_checkout_enabled,
        )
    }

    pub fn status_policy(&self) -> StatusPolicy {
        StatusPolicy::new(self.near_overdue_days)
    }

    pub fn class_fetch_retry(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.class_fetch_retries,
            Duration::from_millis(self.class_fetch_initial_delay_ms),
            Duration::from_millis(self.class_fetch_max_delay_ms),
        )
    }

    /// Validate gym configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sweep_interval_secs == 0 || self.sweep_interval_secs > 3600 {
            return Err(ValidationError::InvalidSweepInterval);
        }
        if self.default_settings().validate().is_err() {
            return Err(ValidationError::InvalidAutoCheckoutMinutes);
        }
        if !(1..=90).contains(&self.near_overdue_days) {
            return Err(ValidationError::InvalidNearOverdueWindow);
        }
        if self.class_fetch_initial_delay_ms == 0
            || self.class_fetch_initial_delay_ms > self.class_fetch_max_delay_ms
        {
            return Err(ValidationError::InvalidRetryPolicy);
        }
        Ok(())
    }
}

impl Default for GymConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: default_sweep_interval(),
            default_auto_checkout_minutes: default_auto_checkout_minutes(),
            default_auto_checkout_enabled: default_auto_checkout_enabled(),
            near_overdue_days: default_near_overdue_days(),
            class_fetch_retries: default_class_fetch_retries(),
            class_fetch_initial_delay_ms: default_class_fetch_initial_delay(),
            class_fetch_max_delay_ms: default_class_fetch_max_delay(),
        }
    }
}

fn default_sweep_interval() -> u64 {
    300
}

fn default_auto_checkout_minutes() -> u32 {
    DEFAULT_AUTO_CHECKOUT_MINUTES
}

fn default_auto_checkout_enabled() -> bool {
    true
}

fn default_near_overdue_days() -> i64 {
    NEAR_OVERDUE_DAYS
}

fn default_class_fetch_retries() -> u32 {
    2
}

fn default_class_fetch_initial_delay() -> u64 {
    1000
}

fn default_class_fetch_max_delay() -> u64 {
    4000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gym_config_defaults() {
        let config = GymConfig::default();
        assert_eq!(config.sweep_interval(), Duration::from_secs(300));
        assert_eq!(config.default_settings(), GymSettings::default());
        assert_eq!(config.status_policy(), StatusPolicy::default());
        assert_eq!(config.class_fetch_retry(), RetryPolicy::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_sweep_interval() {
        let config = GymConfig {
            sweep_interval_secs: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidSweepInterval)));
    }

    #[test]
    fn test_validation_auto_checkout_out_of_range() {
        let config = GymConfig {
            default_auto_checkout_minutes: 2000,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidAutoCheckoutMinutes)
        ));
    }

    #[test]
    fn test_validation_zero_near_overdue_window() {
        let config = GymConfig {
            near_overdue_days: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidNearOverdueWindow)
        ));

        let one_day = GymConfig {
            near_overdue_days: 1,
            ..Default::default()
        };
        assert!(one_day.validate().is_ok());
    }

    #[test]
    fn test_validation_retry_delays() {
        let config = GymConfig {
            class_fetch_initial_delay_ms: 5000,
            class_fetch_max_delay_ms: 1000,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidRetryPolicy)));
    }
}
