/// Errors produced by the provider registry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A provider id outside the known set.
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    /// A configured base URL could not be turned into a validation URL.
    #[error("invalid endpoint for {provider}: {url}")]
    InvalidEndpoint { provider: String, url: String },
}

pub type Result<T> = std::result::Result<T, Error>;
