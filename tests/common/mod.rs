//! Shared fakes for integration tests.
#![allow(dead_code)]

use alloy::primitives::{Address, Bytes, B256, U256};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use functions_client::blockchain::TxOverrides;
use functions_client::config::GistConfig;
use functions_client::request::{
    CodeLanguage, Confirmation, ConsumerContract, Location, RequestConfig, RequestPayload,
    RequestReceipt, ReturnType, SubmitParams,
};
use functions_client::secrets::{GistStore, SecretsEncryptor};
use functions_client::subscription::{CostParams, GasOracle, SubscriptionInfo, SubscriptionSource};
use functions_client::FunctionsResult;

pub const CONSUMER: &str = "0x8ba1f109551bd432803012645ac136ddd64dba72";
pub const SUBSCRIPTION_ID: u64 = 1_234;

pub fn consumer() -> Address {
    CONSUMER.parse().unwrap()
}

/// One LINK in juels.
pub fn link(amount: u64) -> U256 {
    U256::from(amount) * U256::from(10u64).pow(U256::from(18))
}

pub fn submit_params() -> SubmitParams {
    SubmitParams {
        consumer: consumer(),
        subscription_id: SUBSCRIPTION_ID,
        callback_gas_limit: 300_000,
        don_id: "fun-ethereum-sepolia-1".to_string(),
        overrides: TxOverrides::default().with_gas_limit(1_500_000),
    }
}

pub fn request(secrets_location: Location, secrets: &[(&str, &str)]) -> RequestConfig {
    RequestConfig {
        source: "return Functions.encodeUint256(1)".to_string(),
        code_language: CodeLanguage::JavaScript,
        secrets: secrets
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
        secrets_location,
        args: vec!["ca22bd8b-5ea4-4c4b-a2a4-3c3f7d1cf8f1".to_string(), "TURNER".to_string()],
        bytes_args: vec![],
        expected_return_type: ReturnType::Uint256,
    }
}

#[derive(Clone)]
pub struct FakeSubscriptions {
    pub info: SubscriptionInfo,
    pub estimate: U256,
    pub estimates: Arc<Mutex<Vec<CostParams>>>,
}

impl FakeSubscriptions {
    pub fn new(consumers: Vec<Address>, balance: U256, estimate: U256) -> Self {
        Self {
            info: SubscriptionInfo {
                id: SUBSCRIPTION_ID,
                balance_juels: balance,
                authorized_consumers: consumers,
            },
            estimate,
            estimates: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl SubscriptionSource for FakeSubscriptions {
    async fn subscription_info(&self, _subscription_id: u64) -> FunctionsResult<SubscriptionInfo> {
        Ok(self.info.clone())
    }

    async fn estimate_request_cost(&self, params: &CostParams) -> FunctionsResult<U256> {
        self.estimates.lock().unwrap().push(params.clone());
        Ok(self.estimate)
    }
}

pub struct FixedGas(pub u128);

impl GasOracle for FixedGas {
    async fn gas_price_wei(&self) -> FunctionsResult<u128> {
        Ok(self.0)
    }
}

/// Records every payload it is asked to send.
#[derive(Clone, Default)]
pub struct FakeConsumer {
    pub sent: Arc<Mutex<Vec<(RequestPayload, TxOverrides)>>>,
    pub error: Bytes,
    pub response: Bytes,
}

impl FakeConsumer {
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl ConsumerContract for FakeConsumer {
    async fn send_request(
        &self,
        payload: &RequestPayload,
        overrides: &TxOverrides,
    ) -> FunctionsResult<RequestReceipt> {
        self.sent
            .lock()
            .unwrap()
            .push((payload.clone(), *overrides));
        Ok(RequestReceipt {
            request_id: B256::repeat_byte(0xaa),
            transaction_hash: B256::repeat_byte(0xbb),
        })
    }

    async fn latest_error(&self) -> FunctionsResult<Bytes> {
        Ok(self.error.clone())
    }

    async fn latest_response(&self) -> FunctionsResult<Bytes> {
        Ok(self.response.clone())
    }
}

/// Answers every prompt the same way and keeps the prompts.
#[derive(Clone)]
pub struct ScriptedConfirmation {
    pub answer: bool,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedConfirmation {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Confirmation for ScriptedConfirmation {
    async fn confirm(&self, prompt: &str) -> FunctionsResult<bool> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer)
    }
}

#[derive(Clone, Default)]
pub struct FakeGists {
    pub uploads: Arc<AtomicUsize>,
}

impl GistStore for FakeGists {
    async fn create_gist(&self, _content: &str) -> FunctionsResult<String> {
        let n = self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://gist.github.com/alice/{:012x}/raw", n + 1))
    }

    async fn delete_gist(&self, _gist_url: &str) -> FunctionsResult<bool> {
        Ok(true)
    }
}

/// Stands in for DON encryption: prefixes the joined URLs with a marker byte.
#[derive(Clone, Default)]
pub struct FakeEncryptor {
    pub calls: Arc<AtomicUsize>,
}

impl SecretsEncryptor for FakeEncryptor {
    async fn encrypt_secrets_urls(&self, urls: &[String]) -> FunctionsResult<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut out = vec![0xee];
        out.extend_from_slice(urls.join(" ").as_bytes());
        Ok(Bytes::from(out))
    }
}

/// State of the local GitHub API mock.
#[derive(Default)]
pub struct MockGitHubState {
    /// Value of `x-oauth-scopes`; `None` omits the header.
    pub scopes: Option<String>,
    pub fail_create: AtomicBool,
    pub created: Mutex<Vec<Value>>,
    pub deleted: Mutex<Vec<String>>,
    pub authorization: Mutex<Option<String>>,
}

pub struct MockGitHub {
    pub state: Arc<MockGitHubState>,
    pub config: GistConfig,
}

/// Serve a minimal GitHub gist API on an ephemeral port.
pub async fn start_mock_github(scopes: Option<&str>) -> MockGitHub {
    let state = Arc::new(MockGitHubState {
        scopes: scopes.map(str::to_string),
        ..Default::default()
    });

    let app = Router::new()
        .route("/user", get(user))
        .route("/gists", post(create_gist))
        .route("/gists/{id}", delete(delete_gist))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockGitHub {
        state,
        config: GistConfig {
            api_base: format!("http://{}/", addr),
            timeout_secs: 5,
        },
    }
}

async fn user(State(state): State<Arc<MockGitHubState>>, headers: HeaderMap) -> impl IntoResponse {
    *state.authorization.lock().unwrap() = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let mut response_headers = HeaderMap::new();
    if let Some(scopes) = &state.scopes {
        response_headers.insert("x-oauth-scopes", scopes.parse().unwrap());
    }
    (response_headers, Json(json!({ "login": "alice" })))
}

async fn create_gist(
    State(state): State<Arc<MockGitHubState>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if state.fail_create.load(Ordering::SeqCst) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "message": "Validation Failed" })),
        );
    }
    state.created.lock().unwrap().push(body);
    (
        StatusCode::CREATED,
        Json(json!({ "id": "abc123", "html_url": "https://gist.github.com/alice/abc123" })),
    )
}

async fn delete_gist(State(state): State<Arc<MockGitHubState>>, Path(id): Path<String>) -> StatusCode {
    if id == "abc123" {
        state.deleted.lock().unwrap().push(id);
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
