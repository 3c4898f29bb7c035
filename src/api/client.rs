//! API client
//!
//! This module provides HTTP client functionality for interacting with the API server.
//!
//! # Example
//!
//! ```rust,no_run
//! use compliance_fort::api::ApiClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ApiClient::new("http://127.0.0.1:8000");
//!
//!     let public_key = client.generate_public_key(7).await?;
//!     let proof = client.create_proof(1, 1000, 7, None).await?;
//!     let valid = client.verify_proof(&proof.to_message()).await?;
//!     println!("public key {}, proof valid: {}", public_key, valid);
//!
//!     Ok(())
//! }
//! ```

use crate::api::server::{
    BatchCreateRequest, BatchCreateResponse, BatchVerifyRequest, BatchVerifyResponse,
    DequeueResponse, IngestRequest, IngestResponse, MessageRequest, MessageResponse,
    PublicKeyRequest, PublicKeyResponse, VerifyResponse,
};
use crate::types::{BatchItem, Message};
use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// API client
///
/// Provides methods for interacting with the compliance_fort API server.
pub struct ApiClient {
    /// Base URL of the API server
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the API server (e.g., "http://127.0.0.1:8000")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> anyhow::Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST {}", url))?;

        if !response.status().is_success() {
            bail!("API request failed: {} ({})", response.status(), url);
        }
        Ok(response.json().await?)
    }

    /// Health check
    ///
    /// # Returns
    /// `Ok(())` if server is healthy, `Err` otherwise
    pub async fn health_check(&self) -> anyhow::Result<()> {
        let url = format!("{}/health", self.base_url);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            bail!("Health check failed: {}", response.status());
        }
        Ok(())
    }

    pub async fn generate_public_key(&self, secret_key: i32) -> anyhow::Result<i32> {
        let response: PublicKeyResponse = self
            .post("/api/v1/key/generate", &PublicKeyRequest { secret_key })
            .await?;
        Ok(response.public_key)
    }

    pub async fn create_proof(
        &self,
        id: i32,
        data: i32,
        secret_key: i32,
        public_key: Option<i32>,
    ) -> anyhow::Result<MessageResponse> {
        let request = MessageRequest {
            id,
            data,
            secret_key,
            public_key,
        };
        self.post("/api/v1/proof/create", &request).await
    }

    /// Verify a proof against the public key it carries
    pub async fn verify_proof(&self, message: &Message) -> anyhow::Result<bool> {
        let response: VerifyResponse = self.post("/api/v1/proof/verify", message).await?;
        Ok(response.valid)
    }

    pub async fn batch_verify(
        &self,
        proofs: Vec<Message>,
        public_key: i32,
    ) -> anyhow::Result<BatchVerifyResponse> {
        self.post("/api/v1/batch/verify", &BatchVerifyRequest { proofs, public_key })
            .await
    }

    pub async fn batch_create(
        &self,
        items: Vec<BatchItem>,
        secret_key: i32,
        public_key: Option<i32>,
    ) -> anyhow::Result<BatchCreateResponse> {
        let request = BatchCreateRequest {
            items,
            secret_key,
            public_key,
        };
        self.post("/api/v1/batch/create", &request).await
    }

    /// Verify and route messages into the broker
    pub async fn ingest(
        &self,
        messages: Vec<Message>,
        public_key: i32,
    ) -> anyhow::Result<IngestResponse> {
        self.post("/api/v1/messages", &IngestRequest { messages, public_key })
            .await
    }

    pub async fn dequeue(&self, partition: usize) -> anyhow::Result<DequeueResponse> {
        let path = format!("/api/v1/partitions/{}/dequeue", partition);
        self.post(&path, &serde_json::json!({})).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::server::{router, AppState, MAX_BATCH_SIZE};
    use crate::config::EngineConfig;
    use std::sync::Arc;

    /// Serve the default router on an ephemeral port and return a client for it
    async fn spawn_server() -> ApiClient {
        let state = Arc::new(AppState::from_config(&EngineConfig::default()).unwrap());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });
        ApiClient::new(format!("http://{}/", addr))
    }

    #[test]
    fn test_api_client_new() {
        let client = ApiClient::new("http://127.0.0.1:8000/");
        assert_eq!(client.base_url, "http://127.0.0.1:8000");
    }

    #[tokio::test]
    async fn test_client_single_proof_routes() {
        let client = spawn_server().await;
        client.health_check().await.unwrap();

        assert_eq!(client.generate_public_key(7).await.unwrap(), 17);

        let created = client.create_proof(1, 100, 7, None).await.unwrap();
        assert_eq!(created.to_message(), Message::new(1, 100, 22, 6, 17));
        assert!(client.verify_proof(&created.to_message()).await.unwrap());

        let mut forged = created.to_message();
        forged.public_key = 16;
        assert!(!client.verify_proof(&forged).await.unwrap());
    }

    #[tokio::test]
    async fn test_client_batch_and_broker_routes() {
        let client = spawn_server().await;

        let items: Vec<BatchItem> = (1..=4).map(|id| BatchItem { id, data: id * 10 }).collect();
        let created = client.batch_create(items, 7, Some(17)).await.unwrap();
        assert_eq!(created.proofs.len(), 4);

        let mut proofs: Vec<Message> = created.proofs.iter().map(|p| p.to_message()).collect();
        let verified = client.batch_verify(proofs.clone(), 17).await.unwrap();
        assert_eq!(verified.total, 4);
        assert_eq!(verified.valid_count, 4);
        assert_eq!(verified.results, vec![true; 4]);

        // Tamper with id 3 so ingestion rejects it
        proofs[2].data += 1;
        let ingested = client.ingest(proofs.clone(), 17).await.unwrap();
        assert_eq!(ingested.report.accepted, vec![(1, 0), (2, 3), (4, 1)]);
        assert_eq!(ingested.report.rejected_invalid, vec![3]);

        let dequeued = client.dequeue(3).await.unwrap();
        assert_eq!(dequeued.partition, 3);
        assert_eq!(dequeued.message, proofs[1]);

        assert!(client.dequeue(3).await.is_err());
        assert!(client.dequeue(99).await.is_err());
    }

    #[tokio::test]
    async fn test_client_surfaces_rejected_batches() {
        let client = spawn_server().await;
        let proofs = vec![Message::new(1, 10, 22, 6, 17); MAX_BATCH_SIZE + 1];
        assert!(client.batch_verify(proofs, 17).await.is_err());
    }
}
