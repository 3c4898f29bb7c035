//! API server
//!
//! HTTP/REST routes over the proof engine and the broker, using Axum.
//!
//! # Example
//!
//! ```rust,no_run
//! use compliance_fort::api::ApiServer;
//! use compliance_fort::config::EngineConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = ApiServer::new("127.0.0.1:8000".parse()?, EngineConfig::default());
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

use crate::api::error::ApiError;
use crate::broker::{Broker, IngestReport};
use crate::config::{ConfiguredProver, ConfiguredVerifier, EngineConfig};
use crate::crypto::ChallengeKind;
use crate::error::Result;
use crate::proof::{batch_create_items, batch_verify};
use crate::types::{BatchItem, Message};
use crate::utils::Helpers;
use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

/// Service name reported by the root route
pub const SERVICE_NAME: &str = "Compliance Fort";

/// Service description reported by the root route
pub const SERVICE_DESCRIPTION: &str =
    "Zero-Knowledge cryptography library for compliance verification";

/// Most items a single batch or ingestion request may carry
pub const MAX_BATCH_SIZE: usize = 10_000;

fn check_batch_size(len: usize) -> std::result::Result<(), ApiError> {
    if len > MAX_BATCH_SIZE {
        return Err(ApiError::BadRequest(format!(
            "batch of {} exceeds the limit of {}",
            len, MAX_BATCH_SIZE
        )));
    }
    Ok(())
}

fn utcnow() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Proof creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRequest {
    pub id: i32,
    pub data: i32,
    pub secret_key: i32,
    /// Derived from `secret_key` when absent
    #[serde(default)]
    pub public_key: Option<i32>,
}

/// Created proof
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: i32,
    pub data: i32,
    pub proof_r: i32,
    pub proof_s: i32,
    pub public_key: i32,
    pub timestamp: String,
}

impl MessageResponse {
    fn from_message(msg: Message, timestamp: String) -> Self {
        Self {
            id: msg.id,
            data: msg.data,
            proof_r: msg.proof_r,
            proof_s: msg.proof_s,
            public_key: msg.public_key,
            timestamp,
        }
    }

    /// Strip the timestamp
    pub fn to_message(&self) -> Message {
        Message::new(
            self.id,
            self.data,
            self.proof_r,
            self.proof_s,
            self.public_key,
        )
    }
}

/// Proof verification response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub message: String,
    pub timestamp: String,
}

/// Public key request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicKeyRequest {
    pub secret_key: i32,
}

/// Public key response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicKeyResponse {
    pub public_key: i32,
    pub timestamp: String,
}

/// Batch verification request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchVerifyRequest {
    pub proofs: Vec<Message>,
    pub public_key: i32,
}

/// Batch verification response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchVerifyResponse {
    pub total: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub results: Vec<bool>,
    pub elapsed_ms: f64,
    pub timestamp: String,
}

/// Batch creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchCreateRequest {
    pub items: Vec<BatchItem>,
    pub secret_key: i32,
    #[serde(default)]
    pub public_key: Option<i32>,
}

/// Batch creation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchCreateResponse {
    pub proofs: Vec<MessageResponse>,
    pub elapsed_ms: f64,
    pub timestamp: String,
}

/// Broker ingestion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRequest {
    pub messages: Vec<Message>,
    pub public_key: i32,
}

/// Broker ingestion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    #[serde(flatten)]
    pub report: IngestReport,
    pub timestamp: String,
}

/// Dequeued message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DequeueResponse {
    pub partition: usize,
    pub message: Message,
    pub timestamp: String,
}

/// Shared state behind every route
pub struct AppState {
    prover: ConfiguredProver,
    verifier: ConfiguredVerifier,
    broker: Mutex<Broker<ChallengeKind>>,
}

impl AppState {
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            prover: config.build_prover(),
            verifier: config.build_verifier(),
            broker: Mutex::new(config.build_broker()?),
        })
    }

    fn broker(&self) -> std::sync::MutexGuard<'_, Broker<ChallengeKind>> {
        self.broker
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

type SharedState = Arc<AppState>;

/// Build the application router
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/v1/key/generate", post(generate_public_key))
        .route("/api/v1/proof/create", post(create_proof))
        .route("/api/v1/proof/verify", post(verify_proof))
        .route("/api/v1/batch/verify", post(batch_verify_proofs))
        .route("/api/v1/batch/create", post(batch_create_proofs))
        .route("/api/v1/messages", post(ingest_messages))
        .route("/api/v1/partitions/{id}/dequeue", post(dequeue_message))
        .with_state(state)
}

/// API server
pub struct ApiServer {
    /// Server address
    addr: SocketAddr,
    config: EngineConfig,
}

impl ApiServer {
    /// Create a new API server
    ///
    /// # Arguments
    /// * `addr` - Socket address to bind to
    /// * `config` - Engine configuration
    pub fn new(addr: SocketAddr, config: EngineConfig) -> Self {
        Self { addr, config }
    }

    /// Start the API server
    ///
    /// Blocks until the server shuts down.
    pub async fn start(&self) -> anyhow::Result<()> {
        let state = Arc::new(AppState::from_config(&self.config)?);
        if !self.config.is_legacy() {
            log::warn!("non-legacy proof settings: proofs are not interoperable with legacy verifiers");
        }

        let app = router(state).layer(ServiceBuilder::new().layer(CorsLayer::permissive()));

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        log::info!("API server listening on {}", self.addr);
        axum::serve(listener, app).await?;

        Ok(())
    }
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": SERVICE_NAME,
        "version": crate::VERSION,
        "status": "operational",
        "description": SERVICE_DESCRIPTION,
    }))
}

async fn health_check(State(state): State<SharedState>) -> Json<serde_json::Value> {
    let stored = state.broker().manager().total_len();
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": utcnow(),
        "version": crate::VERSION,
        "stored_messages": stored,
    }))
}

async fn generate_public_key(
    State(state): State<SharedState>,
    Json(request): Json<PublicKeyRequest>,
) -> Json<PublicKeyResponse> {
    Json(PublicKeyResponse {
        public_key: state.prover.derive_public_key(request.secret_key),
        timestamp: utcnow(),
    })
}

async fn create_proof(
    State(state): State<SharedState>,
    Json(request): Json<MessageRequest>,
) -> Json<MessageResponse> {
    let public_key = request
        .public_key
        .unwrap_or_else(|| state.prover.derive_public_key(request.secret_key));
    let msg = state
        .prover
        .create_proof(request.id, request.data, request.secret_key, public_key);
    Json(MessageResponse::from_message(msg, utcnow()))
}

async fn verify_proof(
    State(state): State<SharedState>,
    Json(request): Json<Message>,
) -> Json<VerifyResponse> {
    let valid = state.verifier.verify_self_signed(&request);
    Json(VerifyResponse {
        valid,
        message: if valid {
            "Proof is valid".to_string()
        } else {
            "Proof is invalid".to_string()
        },
        timestamp: utcnow(),
    })
}

async fn batch_verify_proofs(
    State(state): State<SharedState>,
    Json(request): Json<BatchVerifyRequest>,
) -> std::result::Result<Json<BatchVerifyResponse>, ApiError> {
    check_batch_size(request.proofs.len())?;
    let start = Instant::now();
    let outcome = batch_verify(&state.verifier, &request.proofs, request.public_key);

    Ok(Json(BatchVerifyResponse {
        total: outcome.total(),
        valid_count: outcome.valid_count,
        invalid_count: outcome.invalid_count(),
        results: outcome.results,
        elapsed_ms: Helpers::elapsed_ms(start),
        timestamp: utcnow(),
    }))
}

async fn batch_create_proofs(
    State(state): State<SharedState>,
    Json(request): Json<BatchCreateRequest>,
) -> std::result::Result<Json<BatchCreateResponse>, ApiError> {
    check_batch_size(request.items.len())?;
    let start = Instant::now();
    let public_key = request
        .public_key
        .unwrap_or_else(|| state.prover.derive_public_key(request.secret_key));
    let messages = batch_create_items(&state.prover, &request.items, request.secret_key, public_key);

    let now = utcnow();
    Ok(Json(BatchCreateResponse {
        proofs: messages
            .into_iter()
            .map(|m| MessageResponse::from_message(m, now.clone()))
            .collect(),
        elapsed_ms: Helpers::elapsed_ms(start),
        timestamp: now,
    }))
}

async fn ingest_messages(
    State(state): State<SharedState>,
    Json(request): Json<IngestRequest>,
) -> std::result::Result<Json<IngestResponse>, ApiError> {
    check_batch_size(request.messages.len())?;
    let report = state.broker().ingest(&request.messages, request.public_key);
    Ok(Json(IngestResponse {
        report,
        timestamp: utcnow(),
    }))
}

async fn dequeue_message(
    State(state): State<SharedState>,
    Path(partition): Path<usize>,
) -> std::result::Result<Json<DequeueResponse>, ApiError> {
    let message = state.broker().dequeue_from(partition)?;
    Ok(Json(DequeueResponse {
        partition,
        message,
        timestamp: utcnow(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    fn app() -> Router {
        router(Arc::new(
            AppState::from_config(&EngineConfig::default()).unwrap(),
        ))
    }

    async fn post_json<T: DeserializeOwned>(
        app: Router,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, T) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_root_and_health() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["name"], "Compliance Fort");
        assert_eq!(body["status"], "operational");
        assert_eq!(body["description"], SERVICE_DESCRIPTION);

        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_generate_public_key() {
        let (status, body): (_, PublicKeyResponse) = post_json(
            app(),
            "/api/v1/key/generate",
            serde_json::json!({"secret_key": 7}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.public_key, 17);
    }

    #[tokio::test]
    async fn test_create_then_verify() {
        let (status, created): (_, MessageResponse) = post_json(
            app(),
            "/api/v1/proof/create",
            serde_json::json!({"id": 1, "data": 100, "secret_key": 7}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created.to_message(), Message::new(1, 100, 22, 6, 17));

        let (_, verified): (_, VerifyResponse) = post_json(
            app(),
            "/api/v1/proof/verify",
            serde_json::to_value(created.to_message()).unwrap(),
        )
        .await;
        assert!(verified.valid);
        assert_eq!(verified.message, "Proof is valid");

        let mut forged = created.to_message();
        forged.public_key = 16;
        let (_, verified): (_, VerifyResponse) = post_json(
            app(),
            "/api/v1/proof/verify",
            serde_json::to_value(forged).unwrap(),
        )
        .await;
        assert!(!verified.valid);
    }

    #[tokio::test]
    async fn test_batch_routes() {
        let items: Vec<_> = (1..=5)
            .map(|i| serde_json::json!({"id": i, "data": i * 10}))
            .collect();
        let (_, created): (_, BatchCreateResponse) = post_json(
            app(),
            "/api/v1/batch/create",
            serde_json::json!({"items": items, "secret_key": 7}),
        )
        .await;
        assert_eq!(created.proofs.len(), 5);

        let proofs: Vec<Message> = created.proofs.iter().map(|p| p.to_message()).collect();
        let (_, verified): (_, BatchVerifyResponse) = post_json(
            app(),
            "/api/v1/batch/verify",
            serde_json::json!({"proofs": proofs, "public_key": 17}),
        )
        .await;
        assert_eq!(verified.total, 5);
        assert_eq!(verified.valid_count, 5);
        assert_eq!(verified.invalid_count, 0);
        assert_eq!(verified.results, vec![true; 5]);
    }

    #[tokio::test]
    async fn test_empty_batch_verify() {
        let (_, verified): (_, BatchVerifyResponse) = post_json(
            app(),
            "/api/v1/batch/verify",
            serde_json::json!({"proofs": [], "public_key": 17}),
        )
        .await;
        assert_eq!(verified.total, 0);
        assert!(verified.results.is_empty());
    }

    #[tokio::test]
    async fn test_ingest_and_dequeue() {
        let app = app();
        let msg = crate::proof::create_zk_proof(2, 20, 7, 17);

        let (_, ingested): (_, IngestResponse) = post_json(
            app.clone(),
            "/api/v1/messages",
            serde_json::json!({"messages": [msg], "public_key": 17}),
        )
        .await;
        assert_eq!(ingested.report.accepted, vec![(2, 3)]);

        let (status, dequeued): (_, DequeueResponse) = post_json(
            app.clone(),
            "/api/v1/partitions/3/dequeue",
            serde_json::json!({}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(dequeued.message, msg);

        let (status, body): (_, crate::api::error::ErrorBody) = post_json(
            app,
            "/api/v1/partitions/3/dequeue",
            serde_json::json!({}),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "queue is empty");
    }

    #[tokio::test]
    async fn test_oversized_batches_rejected() {
        let proofs = vec![Message::new(1, 10, 0, 0, 17); MAX_BATCH_SIZE + 1];
        let (status, body): (_, crate::api::error::ErrorBody) = post_json(
            app(),
            "/api/v1/batch/verify",
            serde_json::json!({"proofs": proofs, "public_key": 17}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.starts_with("bad request"));

        let (status, _): (_, crate::api::error::ErrorBody) = post_json(
            app(),
            "/api/v1/messages",
            serde_json::json!({"messages": proofs, "public_key": 17}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let items = vec![serde_json::json!({"id": 1, "data": 1}); MAX_BATCH_SIZE + 1];
        let (status, _): (_, crate::api::error::ErrorBody) = post_json(
            app(),
            "/api/v1/batch/create",
            serde_json::json!({"items": items, "secret_key": 7}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
