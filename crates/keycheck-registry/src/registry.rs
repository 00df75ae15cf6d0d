//! The registry: an ordered, immutable set of provider descriptors.

use std::sync::Arc;

use crate::endpoints::ProviderEndpoints;
use crate::error::Result;
use crate::provider::{KeyProvider, ProviderId};
use crate::providers::{AnthropicProvider, GoogleProvider, MistralProvider, OpenAIProvider};

/// Provider descriptors in pattern-matching order.
///
/// Built once at start-up and shared behind an `Arc`; nothing mutates it
/// afterwards, so concurrent readers need no locking.
#[derive(Clone)]
pub struct Registry {
    providers: Vec<Arc<dyn KeyProvider>>,
}

impl Registry {
    /// Build the four built-in providers against the given endpoints.
    pub fn new(endpoints: &ProviderEndpoints) -> Result<Self> {
        Ok(Self::from_providers(vec![
            Arc::new(OpenAIProvider::new(&endpoints.openai)?),
            Arc::new(AnthropicProvider::new(&endpoints.anthropic)?),
            Arc::new(GoogleProvider::new(&endpoints.google)?),
            Arc::new(MistralProvider::new(&endpoints.mistral)?),
        ]))
    }

    /// Built-in providers against the public APIs.
    pub fn with_defaults() -> Self {
        Self::new(&ProviderEndpoints::default()).expect("default provider endpoints should parse")
    }

    /// Build a registry from explicit descriptors. Iteration order is the
    /// order given here.
    pub fn from_providers(providers: Vec<Arc<dyn KeyProvider>>) -> Self {
        Self { providers }
    }

    /// All descriptors, in pattern-matching order.
    pub fn providers(&self) -> &[Arc<dyn KeyProvider>] {
        &self.providers
    }

    /// Look up the descriptor for a provider id.
    pub fn get(&self, id: ProviderId) -> Option<&Arc<dyn KeyProvider>> {
        self.providers.iter().find(|p| p.id() == id)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.providers.iter().map(|p| p.id()))
            .finish()
    }
}
