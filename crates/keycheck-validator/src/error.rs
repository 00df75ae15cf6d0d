use std::time::Duration;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Why a single key was judged invalid.
///
/// Never leaves the crate as an error: [`crate::KeyValidator::validate`]
/// collapses it to `false` and logs it.
#[derive(Debug, thiserror::Error)]
pub enum ValidationFailure {
    /// No provider pattern matched and no hint applied.
    #[error("no provider recognizes this key")]
    Unrecognized,

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// DNS, TLS, connection or protocol failure.
    #[error("transport error: {0}")]
    Transport(BoxError),

    /// The provider answered with a non-success status.
    #[error("rejected with status {status}")]
    Rejected { status: u16 },

    #[error("validation task panicked")]
    Panicked,
}

/// A batch payload the caller got wrong.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Invalid JSON body: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("`keys` must be an array of strings")]
    KeysNotSequence,

    #[error("`keys[{index}]` must be a string")]
    KeyNotString { index: usize },
}
