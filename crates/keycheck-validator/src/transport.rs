//! Outbound HTTP seam.

use async_trait::async_trait;
use keycheck_registry::{Method, ValidationRequest};

use crate::error::BoxError;

/// Executes one validation call and reports the response status code.
///
/// Dropping the returned future must abort the in-flight call.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ValidationRequest) -> Result<u16, BoxError>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ValidationRequest) -> Result<u16, BoxError> {
        let method = match request.method() {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut req = self.client.request(method, request.url);
        for (name, value) in &request.headers {
            req = req.header(*name, value);
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        // Only the status matters; the body is never read. The URL is dropped
        // from errors since it can carry the key in its query string.
        let resp = req
            .send()
            .await
            .map_err(|e| Box::new(e.without_url()) as BoxError)?;
        Ok(resp.status().as_u16())
    }
}
