//! Base URLs for each provider's API.

use crate::provider::ProviderId;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const DEFAULT_GOOGLE_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MISTRAL_BASE_URL: &str = "https://api.mistral.ai/v1";

/// Per-provider API base URLs. Defaults point at the public APIs; overrides
/// are used for proxies and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    pub openai: String,
    pub anthropic: String,
    pub google: String,
    pub mistral: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            openai: DEFAULT_OPENAI_BASE_URL.into(),
            anthropic: DEFAULT_ANTHROPIC_BASE_URL.into(),
            google: DEFAULT_GOOGLE_BASE_URL.into(),
            mistral: DEFAULT_MISTRAL_BASE_URL.into(),
        }
    }
}

impl ProviderEndpoints {
    /// Replace one provider's base URL.
    pub fn set(&mut self, id: ProviderId, base_url: impl Into<String>) {
        let slot = match id {
            ProviderId::OpenAI => &mut self.openai,
            ProviderId::Anthropic => &mut self.anthropic,
            ProviderId::Google => &mut self.google,
            ProviderId::Mistral => &mut self.mistral,
        };
        *slot = base_url.into();
    }
}
