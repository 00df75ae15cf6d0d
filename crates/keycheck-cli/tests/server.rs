//! End-to-end tests: a fake provider API and the keycheck service, both
//! bound to ephemeral local ports, driven over real HTTP.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use keycheck_cli::server;
use keycheck_registry::{ProviderEndpoints, Registry};
use keycheck_validator::{BatchValidator, KeyValidator};
use serde_json::{Value, json};

const GOOD_KEY: &str = "good";

#[derive(Clone, Default)]
struct FakeProvider {
    hits: Arc<AtomicUsize>,
}

impl FakeProvider {
    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

fn bearer_is_good(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|key| key.ends_with(GOOD_KEY))
}

fn status_for(accepted: bool) -> StatusCode {
    if accepted {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    }
}

async fn bearer_models(State(fake): State<FakeProvider>, headers: HeaderMap) -> StatusCode {
    fake.hits.fetch_add(1, Ordering::SeqCst);
    status_for(bearer_is_good(&headers))
}

async fn anthropic_messages(
    State(fake): State<FakeProvider>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> StatusCode {
    fake.hits.fetch_add(1, Ordering::SeqCst);
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let accepted = headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|key| key.ends_with(GOOD_KEY))
        && headers.contains_key("anthropic-version")
        && body["max_tokens"] == 1;
    status_for(accepted)
}

async fn google_models(
    State(fake): State<FakeProvider>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> StatusCode {
    fake.hits.fetch_add(1, Ordering::SeqCst);
    let accepted = !headers.contains_key("authorization")
        && query.get("key").is_some_and(|key| key.ends_with(GOOD_KEY));
    status_for(accepted)
}

async fn hang(State(fake): State<FakeProvider>) -> StatusCode {
    fake.hits.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(30)).await;
    StatusCode::OK
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

struct Harness {
    base: String,
    fake: FakeProvider,
    client: reqwest::Client,
}

impl Harness {
    async fn start() -> Self {
        Self::start_with(|_| {}).await
    }

    async fn start_with(customize: impl FnOnce(&mut ProviderEndpoints)) -> Self {
        let fake = FakeProvider::default();
        let provider_app = Router::new()
            .route("/openai/models", get(bearer_models))
            .route("/mistral/models", get(bearer_models))
            .route("/anthropic/messages", post(anthropic_messages))
            .route("/google/models", get(google_models))
            .route("/hang/models", get(hang))
            .with_state(fake.clone());
        let provider_addr = spawn(provider_app).await;

        let mut endpoints = ProviderEndpoints::default();
        for id in keycheck_registry::ProviderId::ALL {
            endpoints.set(id, format!("http://{provider_addr}/{id}"));
        }
        customize(&mut endpoints);

        let registry = Registry::new(&endpoints).expect("registry");
        let validator =
            KeyValidator::http(Arc::new(registry)).with_timeout(Duration::from_millis(500));
        let batch = BatchValidator::new(Arc::new(validator));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = server::serve(listener, batch, std::future::pending()).await;
        });

        Self {
            base: format!("http://{addr}"),
            fake,
            client: reqwest::Client::new(),
        }
    }

    async fn post_json(&self, body: Value) -> reqwest::Response {
        self.client
            .post(format!("{}/validate", self.base))
            .json(&body)
            .send()
            .await
            .expect("request")
    }

    async fn results(&self, body: Value) -> Vec<Value> {
        let resp = self.post_json(body).await;
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        resp.json().await.expect("json array")
    }
}

fn openai_key(suffix: &str) -> String {
    format!("sk-{}T3BlbkFJ{}{}", "a".repeat(20), "b".repeat(20), suffix)
}

fn anthropic_key(suffix: &str) -> String {
    let body = format!("{}{}", "x".repeat(95 - suffix.len()), suffix);
    format!("sk-ant-api03-{body}")
}

fn google_key(suffix: &str) -> String {
    format!("AIzaSy{}{}", "g".repeat(33 - suffix.len()), suffix)
}

fn mistral_key(suffix: &str) -> String {
    format!("{}{}", "m".repeat(32 - suffix.len()), suffix)
}

#[tokio::test]
async fn empty_batch_round_trips() {
    let harness = Harness::start().await;
    let results = harness.results(json!({"keys": []})).await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn unrecognized_key_is_invalid_without_outbound_calls() {
    let harness = Harness::start().await;
    let results = harness.results(json!({"keys": ["bad-key"]})).await;
    assert_eq!(results, vec![json!({"key": "bad-key", "isValid": false})]);
    assert_eq!(harness.fake.hits(), 0);
}

#[tokio::test]
async fn every_provider_is_checked_and_order_is_kept() {
    let harness = Harness::start().await;
    let keys = vec![
        openai_key(GOOD_KEY),
        anthropic_key(GOOD_KEY),
        google_key("nope"),
        mistral_key(GOOD_KEY),
        "bad-key".to_string(),
        google_key(GOOD_KEY),
        openai_key("nope"),
    ];

    let results = harness.results(json!({"keys": keys, "provider": "auto"})).await;

    let echoed: Vec<&str> = results.iter().filter_map(|r| r["key"].as_str()).collect();
    assert_eq!(echoed, keys.iter().map(String::as_str).collect::<Vec<_>>());
    let validity: Vec<bool> = results.iter().filter_map(|r| r["isValid"].as_bool()).collect();
    assert_eq!(validity, vec![true, true, false, true, false, true, false]);
    assert_eq!(harness.fake.hits(), 6);
}

#[tokio::test]
async fn provider_hint_overrides_key_shape() {
    let harness = Harness::start().await;
    let results = harness
        .results(json!({"keys": ["arbitrary-good"], "provider": "google"}))
        .await;
    assert_eq!(results, vec![json!({"key": "arbitrary-good", "isValid": true})]);
    assert_eq!(harness.fake.hits(), 1);
}

#[tokio::test]
async fn duplicate_keys_are_checked_independently() {
    let harness = Harness::start().await;
    let key = mistral_key(GOOD_KEY);
    let results = harness.results(json!({"keys": [key, key]})).await;
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r["isValid"] == true));
    assert_eq!(harness.fake.hits(), 2);
}

#[tokio::test]
async fn slow_provider_times_out_without_holding_the_batch() {
    let harness = Harness::start_with(|endpoints| {
        let hang = endpoints.openai.replace("/openai", "/hang");
        endpoints.openai = hang;
    })
    .await;

    let started = Instant::now();
    let results = harness
        .results(json!({"keys": [openai_key(GOOD_KEY), mistral_key(GOOD_KEY)]}))
        .await;
    let elapsed = started.elapsed();

    assert_eq!(results[0]["isValid"], false);
    assert_eq!(results[1]["isValid"], true);
    assert!(elapsed < Duration::from_secs(5), "batch took {elapsed:?}");
}

#[tokio::test]
async fn unreachable_provider_reads_as_invalid() {
    let harness = Harness::start_with(|endpoints| {
        endpoints.mistral = "http://127.0.0.1:1/mistral".to_string();
    })
    .await;

    let results = harness.results(json!({"keys": [mistral_key(GOOD_KEY)]})).await;
    assert_eq!(results[0]["isValid"], false);
}

#[tokio::test]
async fn malformed_json_is_a_plain_text_400() {
    let harness = Harness::start().await;
    let resp = harness
        .client
        .post(&harness.base)
        .header("content-type", "application/json")
        .body("{\"keys\": [")
        .send()
        .await
        .expect("request");

    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/plain"), "got {content_type}");
    assert_eq!(harness.fake.hits(), 0);
}

#[tokio::test]
async fn non_array_keys_is_a_400() {
    let harness = Harness::start().await;
    for body in [json!({"keys": "sk-abc"}), json!({}), json!({"keys": [1, 2]})] {
        let resp = harness.post_json(body.clone()).await;
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST, "body {body}");
    }
}

#[tokio::test]
async fn wrong_method_is_a_405() {
    let harness = Harness::start().await;
    let resp = harness
        .client
        .get(format!("{}/validate", harness.base))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn preflight_allows_any_origin() {
    let harness = Harness::start().await;
    let resp = harness
        .client
        .request(reqwest::Method::OPTIONS, &harness.base)
        .header("origin", "https://example.test")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .expect("request");

    assert_eq!(resp.status(), reqwest::StatusCode::NO_CONTENT);
    let header = |name: &str| {
        resp.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    assert_eq!(header("access-control-allow-origin").as_deref(), Some("*"));
    assert_eq!(
        header("access-control-allow-methods").as_deref(),
        Some("POST, OPTIONS")
    );
    assert_eq!(
        header("access-control-allow-headers").as_deref(),
        Some("Content-Type")
    );
}

#[tokio::test]
async fn results_carry_cors_and_json_headers() {
    let harness = Harness::start().await;
    let resp = harness.post_json(json!({"keys": ["bad-key"]})).await;
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    assert_eq!(
        resp.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
}

#[tokio::test]
async fn health_check_responds() {
    let harness = Harness::start().await;
    let resp = harness
        .client
        .get(format!("{}/health", harness.base))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(resp.text().await.expect("body"), "ok");
}

#[tokio::test]
async fn unknown_path_is_a_404_with_cors_headers() {
    let harness = Harness::start().await;
    let resp = harness
        .client
        .post(format!("{}/nope", harness.base))
        .json(&json!({"keys": []}))
        .send()
        .await
        .expect("request");

    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
