//! Storefront configuration.
//!
//! Pricing fees and the remote API endpoint are deployment concerns, so they
//! live here rather than in the reducers that consume them.

use std::path::PathBuf;

/// Default remote API endpoint.
pub const DEFAULT_API_BASE_URL: &str =
    "https://restaurant-be-400174736012.asia-southeast2.run.app/api";

/// Default location of the persisted session token.
pub const DEFAULT_TOKEN_PATH: &str = ".foodcourt-session-token";

/// Fixed per-order fees applied at checkout, in rupiah.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutFees {
    /// Flat delivery fee added to every order.
    pub delivery_fee: i64,
    /// Flat service fee added to every order.
    pub service_fee: i64,
}

impl Default for CheckoutFees {
    fn default() -> Self {
        Self {
            delivery_fee: 10_000,
            service_fee: 1_000,
        }
    }
}

/// Top-level configuration for the storefront.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the remote API, without a trailing slash.
    pub api_base_url: String,
    /// Where the session token is persisted between runs.
    pub token_path: PathBuf,
    /// Fees applied at checkout.
    pub fees: CheckoutFees,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
            fees: CheckoutFees::default(),
        }
    }
}

impl StorefrontConfig {
    /// Creates a configuration pointing at the given API endpoint.
    #[must_use]
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    /// Reads the configuration from the environment, falling back to
    /// defaults for anything unset.
    ///
    /// Recognised variables: `FOODCOURT_API_BASE_URL`,
    /// `FOODCOURT_TOKEN_PATH`, `FOODCOURT_DELIVERY_FEE`,
    /// `FOODCOURT_SERVICE_FEE`. Fee values that do not parse as integers
    /// keep their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = var("FOODCOURT_API_BASE_URL") {
            config.api_base_url = url;
        }
        if let Some(path) = var("FOODCOURT_TOKEN_PATH") {
            config.token_path = PathBuf::from(path);
        }
        if let Some(fee) = var("FOODCOURT_DELIVERY_FEE").and_then(|v| v.parse().ok()) {
            config.fees.delivery_fee = fee;
        }
        if let Some(fee) = var("FOODCOURT_SERVICE_FEE").and_then(|v| v.parse().ok()) {
            config.fees.service_fee = fee;
        }
        config
    }

    /// Overrides the token storage location.
    #[must_use]
    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = path.into();
        self
    }

    /// Overrides the checkout fees.
    #[must_use]
    pub const fn with_fees(mut self, fees: CheckoutFees) -> Self {
        self.fees = fees;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fees_match_storefront_pricing() {
        let fees = CheckoutFees::default();
        assert_eq!(fees.delivery_fee, 10_000);
        assert_eq!(fees.service_fee, 1_000);
    }

    #[test]
    fn environment_overrides_fees_and_endpoint() {
        let config = StorefrontConfig::from_lookup(|key| match key {
            "FOODCOURT_API_BASE_URL" => Some("http://localhost:3000/api".to_string()),
            "FOODCOURT_DELIVERY_FEE" => Some("15000".to_string()),
            "FOODCOURT_SERVICE_FEE" => Some("2000".to_string()),
            _ => None,
        });
        assert_eq!(config.api_base_url, "http://localhost:3000/api");
        assert_eq!(config.fees.delivery_fee, 15_000);
        assert_eq!(config.fees.service_fee, 2_000);
        assert_eq!(config.token_path, PathBuf::from(DEFAULT_TOKEN_PATH));
    }

    #[test]
    fn unparsable_fee_values_keep_defaults() {
        let config = StorefrontConfig::from_lookup(|key| {
            (key == "FOODCOURT_DELIVERY_FEE").then(|| "free".to_string())
        });
        assert_eq!(config.fees, CheckoutFees::default());
    }

    #[test]
    fn builder_overrides_apply() {
        let config = StorefrontConfig::new("http://localhost:3000/api")
            .with_token_path("/tmp/token")
            .with_fees(CheckoutFees {
                delivery_fee: 0,
                service_fee: 500,
            });
        assert_eq!(config.api_base_url, "http://localhost:3000/api");
        assert_eq!(config.token_path, PathBuf::from("/tmp/token"));
        assert_eq!(config.fees.service_fee, 500);
    }
}
