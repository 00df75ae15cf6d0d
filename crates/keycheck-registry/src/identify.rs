//! Mapping an opaque key string to the provider that most likely issued it.

use std::sync::Arc;

use crate::provider::{KeyProvider, ProviderHint, ProviderId};
use crate::registry::Registry;

/// Prefix of legacy OpenAI keys that predate the current key shape.
const LEGACY_OPENAI_PREFIX: &str = "sk-";

impl Registry {
    /// Resolve the provider to validate `key` against.
    ///
    /// Resolution order:
    /// 1. An explicit hint wins, whatever the key looks like.
    /// 2. The first provider whose key pattern matches, in registry order.
    /// 3. Any key starting with `sk-` falls back to OpenAI.
    ///
    /// Returns `None` when nothing applies.
    pub fn identify(&self, key: &str, hint: ProviderHint) -> Option<Arc<dyn KeyProvider>> {
        if let Some(id) = hint.provider()
            && let Some(provider) = self.get(id)
        {
            return Some(Arc::clone(provider));
        }

        if let Some(provider) = self.providers().iter().find(|p| p.matches(key)) {
            return Some(Arc::clone(provider));
        }

        if key.starts_with(LEGACY_OPENAI_PREFIX) {
            return self.get(ProviderId::OpenAI).cloned();
        }

        None
    }
}
