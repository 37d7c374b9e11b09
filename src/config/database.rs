//! Data store selection and PostgreSQL pool settings

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL. Without one the service runs on the
    /// in-memory store.
    pub url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Apply the bundled schema migrations on startup
    #[serde(default)]
    pub run_migrations: bool,

    /// Rewrite retired membership codes on member rows before serving traffic
    #[serde(default = "default_migrate_legacy")]
    pub migrate_legacy_membership_types: bool,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Validate database configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = &self.url {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(ValidationError::InvalidDatabaseUrl);
            }
        }
        if !(1..=100).contains(&self.max_connections) {
            return Err(ValidationError::InvalidPoolSize);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            run_migrations: false,
            migrate_legacy_membership_types: default_migrate_legacy(),
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    5
}

fn default_migrate_legacy() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_selects_in_memory_store() {
        let config = DatabaseConfig::default();
        assert!(config.url.is_none());
        assert!(config.migrate_legacy_membership_types);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_non_postgres_url() {
        let config = DatabaseConfig {
            url: Some("mysql://localhost/gym".to_string()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidDatabaseUrl)));
    }

    #[test]
    fn test_validation_pool_size_bounds() {
        for max_connections in [0, 150] {
            let config = DatabaseConfig {
                url: Some("postgresql://gym@localhost/gym".to_string()),
                max_connections,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ValidationError::InvalidPoolSize)));
        }
    }

    #[test]
    fn test_acquire_timeout_duration() {
        let config = DatabaseConfig {
            acquire_timeout_secs: 12,
            ..Default::default()
        };
        assert_eq!(config.acquire_timeout(), Duration::from_secs(12));
    }
}
