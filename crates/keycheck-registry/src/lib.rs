//! # keycheck-registry
//!
//! Static table of AI-provider key descriptors.
//!
//! Each provider knows two things about its API keys:
//!
//! - **Shape**: a pattern that well-formed keys match, used to guess which
//!   provider issued an opaque key string.
//! - **Validation call**: the single lightweight authenticated request that
//!   tells whether the provider currently accepts the key.
//!
//! The [`Registry`] holds one descriptor per provider in a fixed order and
//! resolves a key (plus an optional [`ProviderHint`]) to a descriptor.
//!
//! ```ignore
//! use keycheck_registry::{ProviderHint, Registry};
//!
//! let registry = Registry::with_defaults();
//! let provider = registry.identify("AIzaSy...", ProviderHint::Auto);
//! let request = provider.unwrap().build_request("AIzaSy...");
//! ```

pub mod endpoints;
pub mod error;
pub mod identify;
pub mod provider;
pub mod providers;
pub mod registry;
pub mod request;

pub use endpoints::ProviderEndpoints;
pub use error::Error;
pub use provider::{KeyProvider, ProviderHint, ProviderId};
pub use providers::{AnthropicProvider, GoogleProvider, MistralProvider, OpenAIProvider};
pub use registry::Registry;
pub use request::{Method, ValidationRequest};
