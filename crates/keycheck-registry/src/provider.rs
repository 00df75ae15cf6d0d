//! Provider identities and the descriptor trait each provider implements.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;
use crate::request::ValidationRequest;

/// Identity of a supported provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    OpenAI,
    Anthropic,
    Google,
    Mistral,
}

impl ProviderId {
    /// All providers, in pattern-matching order.
    pub const ALL: [ProviderId; 4] = [
        ProviderId::OpenAI,
        ProviderId::Anthropic,
        ProviderId::Google,
        ProviderId::Mistral,
    ];

    /// Stable identifier (e.g. `"openai"`).
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderId::OpenAI => "openai",
            ProviderId::Anthropic => "anthropic",
            ProviderId::Google => "google",
            ProviderId::Mistral => "mistral",
        }
    }

    /// Human-friendly name (e.g. `"Google Gemini"`).
    pub fn display_name(self) -> &'static str {
        match self {
            ProviderId::OpenAI => "OpenAI",
            ProviderId::Anthropic => "Anthropic",
            ProviderId::Google => "Google Gemini",
            ProviderId::Mistral => "Mistral",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| Error::UnknownProvider(s.to_string()))
    }
}

/// Caller-supplied provider selection.
///
/// An explicit provider overrides shape-based guessing entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderHint {
    #[default]
    Auto,
    Provider(ProviderId),
}

impl ProviderHint {
    /// Lenient parse: `"auto"`, an unknown id, or nothing all mean
    /// [`ProviderHint::Auto`].
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(ProviderId::from_str) {
            Some(Ok(id)) => ProviderHint::Provider(id),
            _ => ProviderHint::Auto,
        }
    }

    /// The explicitly selected provider, if any.
    pub fn provider(self) -> Option<ProviderId> {
        match self {
            ProviderHint::Auto => None,
            ProviderHint::Provider(id) => Some(id),
        }
    }
}

impl From<ProviderId> for ProviderHint {
    fn from(id: ProviderId) -> Self {
        ProviderHint::Provider(id)
    }
}

/// Descriptor that provider implementations expose to the identifier and
/// the validator.
///
/// Implementations are immutable after construction and shared read-only
/// across concurrent validations.
pub trait KeyProvider: Send + Sync {
    /// Which provider this descriptor validates against.
    fn id(&self) -> ProviderId;

    /// Whether `key` has this provider's well-formed key shape.
    fn matches(&self, key: &str) -> bool;

    /// Build the validation call for `key`.
    fn build_request(&self, key: &str) -> ValidationRequest;

    /// Base validation URL, without any key material.
    fn endpoint(&self) -> &Url;
}

impl std::fmt::Debug for dyn KeyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyProvider")
            .field("id", &self.id())
            .field("endpoint", &self.endpoint().as_str())
            .finish()
    }
}
