//! Concurrent validation of a batch of keys.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use keycheck_registry::ProviderHint;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::error::{BatchError, ValidationFailure};
use crate::redact::redact;
use crate::validator::KeyValidator;

/// Outcome for one input key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyCheckResult {
    pub key: String,
    pub is_valid: bool,
}

/// A batch payload: `{ "keys": [...], "provider"?: "..." }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub keys: Vec<String>,
    /// Applied to every key in the batch.
    pub provider: ProviderHint,
}

impl BatchRequest {
    pub fn new(keys: Vec<String>, provider: ProviderHint) -> Self {
        Self { keys, provider }
    }

    /// Parse a raw JSON body.
    pub fn parse(body: &[u8]) -> Result<Self, BatchError> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(&value)
    }

    /// `keys` must be an array of strings; `provider` is optional and any
    /// value outside the known set means auto-detection.
    pub fn from_value(value: &Value) -> Result<Self, BatchError> {
        let items = value
            .get("keys")
            .and_then(Value::as_array)
            .ok_or(BatchError::KeysNotSequence)?;

        let keys = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or(BatchError::KeyNotString { index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let provider = ProviderHint::parse(value.get("provider").and_then(Value::as_str));
        Ok(Self { keys, provider })
    }
}

/// Fans a batch out over a shared [`KeyValidator`].
#[derive(Debug, Clone)]
pub struct BatchValidator {
    validator: Arc<KeyValidator>,
}

impl BatchValidator {
    pub fn new(validator: Arc<KeyValidator>) -> Self {
        Self { validator }
    }

    pub async fn run(&self, request: BatchRequest) -> Vec<KeyCheckResult> {
        self.validate_batch(request.keys, request.provider).await
    }

    /// Validate every key concurrently and return one result per key, in
    /// input order.
    ///
    /// Duplicates are validated independently. A key whose validation fails
    /// in any way, including a panic, is reported as invalid without
    /// affecting its siblings.
    pub async fn validate_batch(
        &self,
        keys: Vec<String>,
        hint: ProviderHint,
    ) -> Vec<KeyCheckResult> {
        if keys.is_empty() {
            return Vec::new();
        }
        debug!(count = keys.len(), ?hint, "validating batch");

        let mut tasks = JoinSet::new();
        for (index, key) in keys.iter().enumerate() {
            let validator = Arc::clone(&self.validator);
            let key = key.clone();
            tasks.spawn(async move {
                let outcome = AssertUnwindSafe(validator.validate(&key, hint))
                    .catch_unwind()
                    .await;
                let is_valid = outcome.unwrap_or_else(|_| {
                    warn!(
                        key = %redact(&key),
                        error = %ValidationFailure::Panicked,
                        "key validation failed"
                    );
                    false
                });
                (index, is_valid)
            });
        }

        // Completions arrive in any order; each lands in its own slot. A slot
        // whose task never reports back stays invalid.
        let mut valid = vec![false; keys.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, is_valid)) => valid[index] = is_valid,
                Err(err) => warn!(error = %err, "validation task did not complete"),
            }
        }

        keys.into_iter()
            .zip(valid)
            .map(|(key, is_valid)| KeyCheckResult { key, is_valid })
            .collect()
    }
}
