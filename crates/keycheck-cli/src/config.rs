//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use keycheck_registry::endpoints::{
    DEFAULT_ANTHROPIC_BASE_URL, DEFAULT_GOOGLE_BASE_URL, DEFAULT_MISTRAL_BASE_URL,
    DEFAULT_OPENAI_BASE_URL,
};
use keycheck_registry::{ProviderEndpoints, ProviderHint, ProviderId, Registry};
use keycheck_validator::{BatchValidator, KeyValidator};

pub const DEFAULT_BIND: &str = "127.0.0.1:8787";

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Address the HTTP service listens on.
    #[arg(long, env = "KEYCHECK_BIND", default_value = DEFAULT_BIND, global = true)]
    pub bind: SocketAddr,

    /// Per-key validation timeout in milliseconds.
    #[arg(long, env = "KEYCHECK_TIMEOUT_MS", default_value_t = 5_000, global = true)]
    pub timeout_ms: u64,

    #[arg(
        long,
        env = "KEYCHECK_OPENAI_BASE_URL",
        default_value = DEFAULT_OPENAI_BASE_URL,
        global = true
    )]
    pub openai_base_url: String,

    #[arg(
        long,
        env = "KEYCHECK_ANTHROPIC_BASE_URL",
        default_value = DEFAULT_ANTHROPIC_BASE_URL,
        global = true
    )]
    pub anthropic_base_url: String,

    #[arg(
        long,
        env = "KEYCHECK_GOOGLE_BASE_URL",
        default_value = DEFAULT_GOOGLE_BASE_URL,
        global = true
    )]
    pub google_base_url: String,

    #[arg(
        long,
        env = "KEYCHECK_MISTRAL_BASE_URL",
        default_value = DEFAULT_MISTRAL_BASE_URL,
        global = true
    )]
    pub mistral_base_url: String,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn endpoints(&self) -> ProviderEndpoints {
        ProviderEndpoints {
            openai: self.openai_base_url.clone(),
            anthropic: self.anthropic_base_url.clone(),
            google: self.google_base_url.clone(),
            mistral: self.mistral_base_url.clone(),
        }
    }

    /// Build the registry and the HTTP-backed batch validator.
    pub fn build(&self) -> Result<BatchValidator, keycheck_registry::Error> {
        let registry = Arc::new(Registry::new(&self.endpoints())?);
        let validator = KeyValidator::http(registry).with_timeout(self.timeout());
        Ok(BatchValidator::new(Arc::new(validator)))
    }
}

/// Strict parse for a CLI `--provider` value: `auto` or a known id.
pub fn parse_hint(value: &str) -> Result<ProviderHint, keycheck_registry::Error> {
    if value == "auto" {
        return Ok(ProviderHint::Auto);
    }
    ProviderId::from_str(value).map(ProviderHint::Provider)
}
