use core_config::{ConfigError, FromEnv, env_parse};

/// Catalog tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Products per listing page
    pub page_size: u64,
    /// Products returned by the top-rated query
    pub top_limit: i64,
    /// Attempts for a read-modify-write before giving up with a conflict
    pub max_write_attempts: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            top_limit: 3,
            max_write_attempts: 3,
        }
    }
}

impl FromEnv for CatalogConfig {
    /// - CATALOG_PAGE_SIZE: defaults to 10
    /// - CATALOG_TOP_LIMIT: defaults to 3
    /// - CATALOG_MAX_WRITE_ATTEMPTS: defaults to 3
    fn from_env() -> Result<Self, ConfigError> {
        let page_size: u64 = env_parse("CATALOG_PAGE_SIZE", "10")?;
        let top_limit: i64 = env_parse("CATALOG_TOP_LIMIT", "3")?;
        let max_write_attempts: u32 = env_parse("CATALOG_MAX_WRITE_ATTEMPTS", "3")?;

        if page_size == 0 {
            return Err(ConfigError::ParseError {
                key: "CATALOG_PAGE_SIZE".to_string(),
                details: "must be at least 1".to_string(),
            });
        }
        if top_limit < 1 {
            return Err(ConfigError::ParseError {
                key: "CATALOG_TOP_LIMIT".to_string(),
                details: "must be at least 1".to_string(),
            });
        }
        if max_write_attempts == 0 {
            return Err(ConfigError::ParseError {
                key: "CATALOG_MAX_WRITE_ATTEMPTS".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            page_size,
            top_limit,
            max_write_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_env() {
        temp_env::with_vars_unset(
            [
                "CATALOG_PAGE_SIZE",
                "CATALOG_TOP_LIMIT",
                "CATALOG_MAX_WRITE_ATTEMPTS",
            ],
            || {
                assert_eq!(CatalogConfig::from_env().unwrap(), CatalogConfig::default());
            },
        );
    }

    #[test]
    fn test_overrides() {
        temp_env::with_vars(
            [
                ("CATALOG_PAGE_SIZE", Some("25")),
                ("CATALOG_TOP_LIMIT", Some("5")),
                ("CATALOG_MAX_WRITE_ATTEMPTS", Some("7")),
            ],
            || {
                let config = CatalogConfig::from_env().unwrap();
                assert_eq!(config.page_size, 25);
                assert_eq!(config.top_limit, 5);
                assert_eq!(config.max_write_attempts, 7);
            },
        );
    }

    #[test]
    fn test_zero_page_size_rejected() {
        temp_env::with_var("CATALOG_PAGE_SIZE", Some("0"), || {
            assert!(CatalogConfig::from_env().is_err());
        });
    }
}
