use crate::errors::{BazaarError, Result};
use crate::pipeline::DEFAULT_PER_PAGE;

const DEFAULT_DATABASE_URL: &str = "sqlite:charbrowser.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BazaarConfig {
    pub trader_database_url: String,
    /// Item catalog location. Often the same database as the trader store.
    pub content_database_url: String,
    pub per_page: usize,
    pub blocked: bool,
}

impl Default for BazaarConfig {
    fn default() -> Self {
        Self {
            trader_database_url: DEFAULT_DATABASE_URL.to_string(),
            content_database_url: DEFAULT_DATABASE_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            blocked: false,
        }
    }
}

impl BazaarConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let trader_database_url = lookup("TRADER_DATABASE_URL")
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let content_database_url =
            lookup("CONTENT_DATABASE_URL").unwrap_or_else(|| trader_database_url.clone());

        let per_page = match lookup("BAZAAR_PER_PAGE") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                BazaarError::Config(format!("BAZAAR_PER_PAGE '{}' is not a count: {}", raw, e))
            })?,
            None => DEFAULT_PER_PAGE,
        };

        let blocked = match lookup("BAZAAR_BLOCKED") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                BazaarError::Config(format!("BAZAAR_BLOCKED '{}' is not a flag", raw))
            })?,
            None => false,
        };

        let config = Self {
            trader_database_url,
            content_database_url,
            per_page,
            blocked,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.per_page == 0 {
            return Err(BazaarError::Config("per_page must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = BazaarConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, BazaarConfig::default());
    }

    #[test]
    fn test_content_store_falls_back_to_trader_store() {
        let config =
            BazaarConfig::from_lookup(lookup(&[("TRADER_DATABASE_URL", "sqlite:peq.db")])).unwrap();
        assert_eq!(config.content_database_url, "sqlite:peq.db");
    }

    #[test]
    fn test_bad_values_are_config_errors() {
        assert!(matches!(
            BazaarConfig::from_lookup(lookup(&[("BAZAAR_PER_PAGE", "0")])),
            Err(BazaarError::Config(_))
        ));
        assert!(matches!(
            BazaarConfig::from_lookup(lookup(&[("BAZAAR_BLOCKED", "maybe")])),
            Err(BazaarError::Config(_))
        ));
        let blocked = BazaarConfig::from_lookup(lookup(&[("BAZAAR_BLOCKED", "true")])).unwrap();
        assert!(blocked.blocked);
    }
}
