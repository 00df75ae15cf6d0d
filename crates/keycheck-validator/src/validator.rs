//! Single-key validation.

use std::sync::Arc;
use std::time::Duration;

use keycheck_registry::{KeyProvider, ProviderHint, ProviderId, Registry};
use tracing::{debug, warn};

use crate::error::ValidationFailure;
use crate::redact::redact;
use crate::transport::{HttpTransport, Transport};

/// Hard limit on a single validation call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Validates one key at a time against its provider.
pub struct KeyValidator {
    registry: Arc<Registry>,
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl KeyValidator {
    pub fn new(registry: Arc<Registry>, transport: Arc<dyn Transport>) -> Self {
        Self {
            registry,
            transport,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Validator backed by a fresh [`HttpTransport`].
    pub fn http(registry: Arc<Registry>) -> Self {
        Self::new(registry, Arc::new(HttpTransport::new()))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether the provider resolved for `key` accepts it.
    ///
    /// Never fails: every failure is logged and reported as `false`.
    pub async fn validate(&self, key: &str, hint: ProviderHint) -> bool {
        match self.check(key, hint).await {
            Ok(provider) => {
                debug!(provider = %provider, key = %redact(key), "key accepted");
                true
            }
            Err(failure) => {
                log_failure(key, &failure);
                false
            }
        }
    }

    /// Like [`validate`](Self::validate) but against an explicit provider.
    pub async fn validate_with(&self, key: &str, provider: &dyn KeyProvider) -> bool {
        match self.check_with(key, provider).await {
            Ok(()) => true,
            Err(failure) => {
                log_failure(key, &failure);
                false
            }
        }
    }

    /// Resolve the provider and run the validation call, keeping the reason
    /// for a rejection.
    pub async fn check(
        &self,
        key: &str,
        hint: ProviderHint,
    ) -> Result<ProviderId, ValidationFailure> {
        let provider = self
            .registry
            .identify(key, hint)
            .ok_or(ValidationFailure::Unrecognized)?;
        self.check_with(key, provider.as_ref()).await?;
        Ok(provider.id())
    }

    pub async fn check_with(
        &self,
        key: &str,
        provider: &dyn KeyProvider,
    ) -> Result<(), ValidationFailure> {
        let request = provider.build_request(key);
        debug!(
            provider = %provider.id(),
            key = %redact(key),
            method = %request.method(),
            "sending validation request"
        );

        // On expiry the send future is dropped, which aborts the request.
        let status = tokio::time::timeout(self.timeout, self.transport.send(request))
            .await
            .map_err(|_| ValidationFailure::Timeout(self.timeout))?
            .map_err(ValidationFailure::Transport)?;

        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(ValidationFailure::Rejected { status })
        }
    }
}

impl std::fmt::Debug for KeyValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyValidator")
            .field("registry", &self.registry)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn log_failure(key: &str, failure: &ValidationFailure) {
    match failure {
        ValidationFailure::Unrecognized | ValidationFailure::Rejected { .. } => {
            debug!(key = %redact(key), reason = %failure, "key rejected");
        }
        _ => {
            warn!(key = %redact(key), error = %failure, "key validation failed");
        }
    }
}
