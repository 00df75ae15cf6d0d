//! # keycheck-validator
//!
//! Checks whether AI-provider API keys are currently accepted.
//!
//! - [`KeyValidator`] resolves a key to a provider, makes one bounded
//!   outbound call and reduces the outcome to a boolean.
//! - [`BatchValidator`] fans a batch of keys out concurrently and collects
//!   one [`KeyCheckResult`] per key, in input order.
//!
//! The outbound call goes through the [`Transport`] trait; [`HttpTransport`]
//! is the reqwest-backed implementation.
//!
//! ```ignore
//! use std::sync::Arc;
//! use keycheck_registry::{ProviderHint, Registry};
//! use keycheck_validator::{BatchValidator, KeyValidator};
//!
//! let validator = KeyValidator::http(Arc::new(Registry::with_defaults()));
//! let batch = BatchValidator::new(Arc::new(validator));
//! let results = batch.validate_batch(vec!["sk-...".into()], ProviderHint::Auto).await;
//! ```

pub mod batch;
pub mod error;
pub mod redact;
pub mod transport;
pub mod validator;

pub use batch::{BatchRequest, BatchValidator, KeyCheckResult};
pub use error::{BatchError, BoxError, ValidationFailure};
pub use redact::redact;
pub use transport::{HttpTransport, Transport};
pub use validator::{DEFAULT_TIMEOUT, KeyValidator};
