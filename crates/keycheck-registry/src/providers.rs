//! The four built-in provider descriptors.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::json;
use url::Url;

use crate::error::{Error, Result};
use crate::provider::{KeyProvider, ProviderId};
use crate::request::ValidationRequest;

pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const ANTHROPIC_PROBE_MODEL: &str = "claude-3-haiku-20240307";

fn openai_key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^sk-[A-Za-z0-9]{20,}T3BlbkFJ[A-Za-z0-9]{20,}$").expect("openai key regex")
    })
}

fn anthropic_key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^sk-ant-api[0-9]{2}-[A-Za-z0-9_-]{95}$").expect("anthropic key regex")
    })
}

fn google_key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^AIzaSy[A-Za-z0-9_-]{33}$").expect("google key regex"))
}

fn mistral_key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9]{32}$").expect("mistral key regex"))
}

/// Join `path` onto a configured base URL.
fn validation_url(id: ProviderId, base_url: &str, path: &str) -> Result<Url> {
    let joined = format!("{}/{}", base_url.trim_end_matches('/'), path);
    Url::parse(&joined).map_err(|_| Error::InvalidEndpoint {
        provider: id.to_string(),
        url: base_url.to_string(),
    })
}

/// OpenAI: `GET /models` with a bearer token.
#[derive(Debug, Clone)]
pub struct OpenAIProvider {
    url: Url,
}

impl OpenAIProvider {
    /// Descriptor whose validation URL hangs off `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            url: validation_url(ProviderId::OpenAI, base_url, "models")?,
        })
    }
}

impl KeyProvider for OpenAIProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAI
    }

    fn matches(&self, key: &str) -> bool {
        openai_key_regex().is_match(key)
    }

    fn build_request(&self, key: &str) -> ValidationRequest {
        ValidationRequest::get(self.url.clone()).header("Authorization", format!("Bearer {key}"))
    }

    fn endpoint(&self) -> &Url {
        &self.url
    }
}

/// Anthropic: `POST /messages` asking for a single token.
#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    url: Url,
}

impl AnthropicProvider {
    /// Descriptor whose validation URL hangs off `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            url: validation_url(ProviderId::Anthropic, base_url, "messages")?,
        })
    }
}

impl KeyProvider for AnthropicProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Anthropic
    }

    fn matches(&self, key: &str) -> bool {
        anthropic_key_regex().is_match(key)
    }

    fn build_request(&self, key: &str) -> ValidationRequest {
        let body = json!({
            "model": ANTHROPIC_PROBE_MODEL,
            "max_tokens": 1,
            "messages": [{ "role": "user", "content": "Hi" }],
        });
        ValidationRequest::post(self.url.clone(), body)
            .header("x-api-key", key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
    }

    fn endpoint(&self) -> &Url {
        &self.url
    }
}

/// Google Gemini: `GET /models?key=...`; the key itself is the credential.
#[derive(Debug, Clone)]
pub struct GoogleProvider {
    url: Url,
}

impl GoogleProvider {
    /// Descriptor whose validation URL hangs off `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            url: validation_url(ProviderId::Google, base_url, "models")?,
        })
    }
}

impl KeyProvider for GoogleProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Google
    }

    fn matches(&self, key: &str) -> bool {
        google_key_regex().is_match(key)
    }

    fn build_request(&self, key: &str) -> ValidationRequest {
        let mut url = self.url.clone();
        url.query_pairs_mut().append_pair("key", key);
        ValidationRequest::get(url)
    }

    fn endpoint(&self) -> &Url {
        &self.url
    }
}

/// Mistral: `GET /models` with a bearer token.
#[derive(Debug, Clone)]
pub struct MistralProvider {
    url: Url,
}

impl MistralProvider {
    /// Descriptor whose validation URL hangs off `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            url: validation_url(ProviderId::Mistral, base_url, "models")?,
        })
    }
}

impl KeyProvider for MistralProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Mistral
    }

    fn matches(&self, key: &str) -> bool {
        mistral_key_regex().is_match(key)
    }

    fn build_request(&self, key: &str) -> ValidationRequest {
        ValidationRequest::get(self.url.clone()).header("Authorization", format!("Bearer {key}"))
    }

    fn endpoint(&self) -> &Url {
        &self.url
    }
}
