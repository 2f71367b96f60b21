use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::order::{PricingRules, RequiredFields, ValidationRules};
use crate::view::{Paginator, DEFAULT_PAGE_SIZE};

// ============================================================================
// Portal Configuration
// ============================================================================
//
// Plain defaults plus named presets. `from_env` overlays a few PORTAL_*
// variables; a value that does not parse is an error, never a fallback.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalConfig {
    pub pricing: PricingRules,
    pub required_fields: RequiredFields,
    pub orders_page_size: usize,
    pub invoices_page_size: usize,
    /// Simulated tracking backend delay
    pub tracking_latency_ms: u64,
    /// Simulated delay while the reset flow verifies an email
    pub reset_email_latency_ms: u64,
    /// Simulated delay while the reset flow stores a new password
    pub reset_latency_ms: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            pricing: PricingRules::canonical(),
            required_fields: RequiredFields::Full,
            orders_page_size: DEFAULT_PAGE_SIZE,
            invoices_page_size: DEFAULT_PAGE_SIZE,
            tracking_latency_ms: 1000,
            reset_email_latency_ms: 1000,
            reset_latency_ms: 1500,
        }
    }
}

impl PortalConfig {
    /// No simulated latency anywhere (tests, scripted demos)
    pub fn instant() -> Self {
        Self {
            tracking_latency_ms: 0,
            reset_email_latency_ms: 0,
            reset_latency_ms: 0,
            ..Self::default()
        }
    }

    /// Quick-entry form: only name and delivery address, reduced surcharges
    pub fn quick_entry() -> Self {
        Self {
            pricing: PricingRules::reduced_surcharge(),
            required_fields: RequiredFields::Minimal,
            ..Self::default()
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`PortalConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("PORTAL_PRICING") {
            config.pricing = match value.trim().to_ascii_lowercase().as_str() {
                "canonical" => PricingRules::canonical(),
                "reduced" => PricingRules::reduced_surcharge(),
                other => anyhow::bail!("PORTAL_PRICING must be `canonical` or `reduced`, got `{}`", other),
            };
        }

        if let Some(value) = lookup("PORTAL_REQUIRED_FIELDS") {
            config.required_fields = match value.trim().to_ascii_lowercase().as_str() {
                "full" => RequiredFields::Full,
                "minimal" => RequiredFields::Minimal,
                other => anyhow::bail!("PORTAL_REQUIRED_FIELDS must be `full` or `minimal`, got `{}`", other),
            };
        }

        if let Some(value) = lookup("PORTAL_PAGE_SIZE") {
            let size: usize = value
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORTAL_PAGE_SIZE `{}`: {}", value, e))?;
            if size == 0 {
                anyhow::bail!("PORTAL_PAGE_SIZE must be at least 1");
            }
            config.orders_page_size = size;
            config.invoices_page_size = size;
        }

        if let Some(value) = lookup("PORTAL_LOOKUP_DELAY_MS") {
            config.tracking_latency_ms = value
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORTAL_LOOKUP_DELAY_MS `{}`: {}", value, e))?;
        }

        tracing::debug!(?config, "Portal configuration loaded");
        Ok(config)
    }

    pub fn validation_rules(&self) -> ValidationRules {
        ValidationRules::new(self.required_fields)
    }

    pub fn orders_paginator(&self) -> Paginator {
        Paginator::new(self.orders_page_size)
    }

    pub fn invoices_paginator(&self) -> Paginator {
        Paginator::new(self.invoices_page_size)
    }

    pub fn tracking_latency(&self) -> Duration {
        Duration::from_millis(self.tracking_latency_ms)
    }

    pub fn reset_email_latency(&self) -> Duration {
        Duration::from_millis(self.reset_email_latency_ms)
    }

    pub fn reset_latency(&self) -> Duration {
        Duration::from_millis(self.reset_latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = PortalConfig::default();

        assert_eq!(config.pricing, PricingRules::canonical());
        assert_eq!(config.required_fields, RequiredFields::Full);
        assert_eq!(config.orders_page_size, 10);
        assert_eq!(config.tracking_latency(), Duration::from_secs(1));
        assert_eq!(config.reset_latency(), Duration::from_millis(1500));
    }

    #[test]
    fn test_presets() {
        assert_eq!(PortalConfig::instant().tracking_latency_ms, 0);
        assert_eq!(PortalConfig::quick_entry().required_fields, RequiredFields::Minimal);
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        let config = PortalConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, PortalConfig::default());
    }

    #[test]
    fn test_environment_overrides() {
        let config = PortalConfig::from_lookup(lookup_from(&[
            ("PORTAL_PRICING", "Reduced"),
            ("PORTAL_REQUIRED_FIELDS", "minimal"),
            ("PORTAL_PAGE_SIZE", "25"),
            ("PORTAL_LOOKUP_DELAY_MS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.pricing, PricingRules::reduced_surcharge());
        assert_eq!(config.validation_rules(), ValidationRules::new(RequiredFields::Minimal));
        assert_eq!(config.orders_paginator().page_size(), 25);
        assert_eq!(config.invoices_page_size, 25);
        assert_eq!(config.tracking_latency_ms, 0);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(PortalConfig::from_lookup(lookup_from(&[("PORTAL_PRICING", "cheap")])).is_err());
        assert!(PortalConfig::from_lookup(lookup_from(&[("PORTAL_REQUIRED_FIELDS", "none")])).is_err());
        assert!(PortalConfig::from_lookup(lookup_from(&[("PORTAL_PAGE_SIZE", "0")])).is_err());
        assert!(PortalConfig::from_lookup(lookup_from(&[("PORTAL_PAGE_SIZE", "ten")])).is_err());
        assert!(PortalConfig::from_lookup(lookup_from(&[("PORTAL_LOOKUP_DELAY_MS", "-5")])).is_err());
    }

    #[test]
    fn test_config_serializes() {
        let json = serde_json::to_value(PortalConfig::default()).unwrap();
        assert_eq!(json["requiredFields"], "full");
        assert_eq!(json["ordersPageSize"], 10);
    }
}
