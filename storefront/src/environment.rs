//! Dependencies injected into the effectful reducers.

use std::sync::Arc;

use foodcourt_core::environment::{Clock, SystemClock};

use crate::api::{ApiClient, StorefrontApi};
use crate::config::{CheckoutFees, StorefrontConfig};
use crate::storage::{FileTokenStore, TokenStore};

/// Everything the session and checkout reducers need from the outside
/// world. Cloned into every spawned effect.
#[derive(Clone)]
pub struct StorefrontEnvironment {
    /// Remote API.
    pub api: Arc<dyn StorefrontApi>,
    /// Durable token storage.
    pub tokens: Arc<dyn TokenStore>,
    /// Time source, used to timestamp order confirmations.
    pub clock: Arc<dyn Clock>,
    /// Fees applied at checkout.
    pub fees: CheckoutFees,
}

impl StorefrontEnvironment {
    /// Builds an environment from explicit parts. Tests use this with a
    /// stub API, an in-memory token store and a fixed clock.
    #[must_use]
    pub fn new(
        api: Arc<dyn StorefrontApi>,
        tokens: Arc<dyn TokenStore>,
        clock: Arc<dyn Clock>,
        fees: CheckoutFees,
    ) -> Self {
        Self {
            api,
            tokens,
            clock,
            fees,
        }
    }

    /// Builds the production environment: HTTP client against the
    /// configured endpoint, token persisted to disk, system time.
    #[must_use]
    pub fn production(config: &StorefrontConfig) -> Self {
        let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(config.token_path.clone()));
        let api: Arc<dyn StorefrontApi> = Arc::new(ApiClient::new(
            config.api_base_url.clone(),
            Arc::clone(&tokens),
        ));
        Self::new(api, tokens, Arc::new(SystemClock), config.fees)
    }
}

impl std::fmt::Debug for StorefrontEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontEnvironment")
            .field("fees", &self.fees)
            .finish_non_exhaustive()
    }
}
